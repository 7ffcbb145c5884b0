//! WebAssembly module for the Stockroom dashboard
//!
//! Runs the analytics engine in the browser over a snapshot passed as JSON
//! (`{"items": [...], "transactions": [...], "restocks": [...]}`). Every
//! function returns its result as a JSON string.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use shared::analytics;
use shared::{validate_snapshot, Snapshot};
use wasm_bindgen::prelude::*;

/// Forecast demand for one item; `null` when there is not enough history
#[wasm_bindgen]
pub fn forecast_item_demand(snapshot_json: &str, item_id: &str, days: u32) -> Result<String, JsValue> {
    forecast_json(snapshot_json, item_id, days).map_err(into_js)
}

/// ABC classification, optionally net of return costs
#[wasm_bindgen]
pub fn abc_classification(snapshot_json: &str, net_of_returns: bool) -> Result<String, JsValue> {
    abc_json(snapshot_json, net_of_returns).map_err(into_js)
}

/// Turnover per item over the trailing `period_days`.
///
/// `now_ms` is epoch milliseconds; the browser clock is used when omitted.
#[wasm_bindgen]
pub fn inventory_turnover(
    snapshot_json: &str,
    period_days: u32,
    now_ms: Option<f64>,
) -> Result<String, JsValue> {
    let now = resolve_now(now_ms)?;
    turnover_json(snapshot_json, period_days, now).map_err(into_js)
}

/// Reorder point in units
#[wasm_bindgen]
pub fn item_reorder_point(
    snapshot_json: &str,
    item_id: &str,
    lead_time_days: u32,
    service_level: f64,
) -> Result<f64, JsValue> {
    let point = reorder_point_units(snapshot_json, item_id, lead_time_days, service_level)
        .map_err(into_js)?;
    Ok(point as f64)
}

/// Items with no genuine sale in the last `days`
#[wasm_bindgen]
pub fn dead_stock_items(snapshot_json: &str, days: u32, now_ms: Option<f64>) -> Result<String, JsValue> {
    let now = resolve_now(now_ms)?;
    dead_stock_json(snapshot_json, days, now).map_err(into_js)
}

#[wasm_bindgen]
pub fn category_margins(snapshot_json: &str) -> Result<String, JsValue> {
    with_snapshot(snapshot_json, |s| {
        analytics::margin_by_category(&s.transactions, &s.items)
    })
    .map_err(into_js)
}

#[wasm_bindgen]
pub fn return_summary(snapshot_json: &str) -> Result<String, JsValue> {
    with_snapshot(snapshot_json, |s| {
        analytics::return_analytics(&s.restocks, &s.transactions, &s.items)
    })
    .map_err(into_js)
}

#[wasm_bindgen]
pub fn net_sales_by_item(snapshot_json: &str) -> Result<String, JsValue> {
    with_snapshot(snapshot_json, |s| analytics::net_sales(&s.transactions, &s.restocks))
        .map_err(into_js)
}

fn into_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Read the caller's local wall-clock time, matching snapshot timestamps
fn resolve_now(now_ms: Option<f64>) -> Result<NaiveDateTime, JsValue> {
    let date = match now_ms {
        Some(ms) => js_sys::Date::new(&JsValue::from_f64(ms)),
        None => js_sys::Date::new_0(),
    };

    NaiveDate::from_ymd_opt(
        date.get_full_year() as i32,
        date.get_month() + 1,
        date.get_date(),
    )
    .and_then(|day| day.and_hms_opt(date.get_hours(), date.get_minutes(), date.get_seconds()))
    .ok_or_else(|| JsValue::from_str("Invalid current time"))
}

fn parse_snapshot(snapshot_json: &str) -> Result<Snapshot, String> {
    let snapshot: Snapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| format!("Invalid snapshot JSON: {}", e))?;
    validate_snapshot(&snapshot).map_err(|e| e.to_string())?;
    Ok(snapshot)
}

fn with_snapshot<T, F>(snapshot_json: &str, f: F) -> Result<String, String>
where
    T: Serialize,
    F: FnOnce(&Snapshot) -> T,
{
    let snapshot = parse_snapshot(snapshot_json)?;
    serde_json::to_string(&f(&snapshot)).map_err(|e| format!("Failed to encode result: {}", e))
}

fn forecast_json(snapshot_json: &str, item_id: &str, days: u32) -> Result<String, String> {
    with_snapshot(snapshot_json, |s| {
        analytics::forecast_demand(&s.transactions, item_id, days)
    })
}

fn abc_json(snapshot_json: &str, net_of_returns: bool) -> Result<String, String> {
    with_snapshot(snapshot_json, |s| {
        if net_of_returns {
            analytics::classify_abc_net_of_returns(&s.items, &s.transactions, &s.restocks)
        } else {
            analytics::classify_abc(&s.items, &s.transactions)
        }
    })
}

fn turnover_json(snapshot_json: &str, period_days: u32, now: NaiveDateTime) -> Result<String, String> {
    with_snapshot(snapshot_json, |s| {
        analytics::analyze_turnover(&s.items, &s.transactions, period_days, now)
    })
}

fn reorder_point_units(
    snapshot_json: &str,
    item_id: &str,
    lead_time_days: u32,
    service_level: f64,
) -> Result<u64, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    Ok(analytics::reorder_point(
        &snapshot.transactions,
        item_id,
        lead_time_days,
        service_level,
    ))
}

fn dead_stock_json(snapshot_json: &str, days: u32, now: NaiveDateTime) -> Result<String, String> {
    let s = parse_snapshot(snapshot_json)?;
    let dead = analytics::find_dead_stock(&s.items, &s.transactions, days, now);
    serde_json::to_string(&dead).map_err(|e| format!("Failed to encode result: {}", e))
}
