//! Hosted relational store reader

use std::time::Duration;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use shared::{InventoryItem, MovementKind, Restock, Snapshot, Transaction, TransactionType};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use crate::config::SourceConfig;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct PgSource {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: String,
    name: String,
    category: String,
    quantity: i64,
    cost_price: Decimal,
    selling_price: Decimal,
    reorder_level: i64,
    total_cogs: Option<Decimal>,
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: String,
    item_id: String,
    item_name: String,
    quantity: i64,
    cost_price: Decimal,
    selling_price: Decimal,
    total_cost: Decimal,
    total_revenue: Decimal,
    profit: Decimal,
    occurred_at: NaiveDateTime,
    kind: String,
    transaction_type: String,
}

#[derive(Debug, FromRow)]
struct RestockRow {
    id: String,
    item_id: String,
    item_name: String,
    quantity: i64,
    cost_price: Decimal,
    total_cost: Decimal,
    occurred_at: NaiveDateTime,
    reason: Option<String>,
}

impl From<ItemRow> for InventoryItem {
    fn from(row: ItemRow) -> Self {
        InventoryItem {
            id: row.id,
            name: row.name,
            category: row.category,
            quantity: row.quantity,
            cost_price: row.cost_price,
            selling_price: row.selling_price,
            reorder_level: row.reorder_level,
            total_cogs: row.total_cogs,
        }
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let malformed = |message: String| AppError::MalformedSource {
            file: format!("transactions/{}", row.id),
            message,
        };
        let kind: MovementKind = row.kind.parse().map_err(malformed)?;
        let transaction_type: TransactionType = row.transaction_type.parse().map_err(malformed)?;

        Ok(Transaction {
            id: row.id,
            item_id: row.item_id,
            item_name: row.item_name,
            quantity: row.quantity,
            cost_price: row.cost_price,
            selling_price: row.selling_price,
            total_cost: row.total_cost,
            total_revenue: row.total_revenue,
            profit: row.profit,
            timestamp: row.occurred_at,
            kind,
            transaction_type,
        })
    }
}

impl From<RestockRow> for Restock {
    fn from(row: RestockRow) -> Self {
        Restock {
            id: row.id,
            item_id: row.item_id,
            item_name: row.item_name,
            quantity: row.quantity,
            cost_price: row.cost_price,
            total_cost: row.total_cost,
            timestamp: row.occurred_at,
            reason: row.reason.unwrap_or_default(),
        }
    }
}

impl PgSource {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open a connection pool for the configured database
    pub async fn connect(url: &str, config: &SourceConfig) -> AppResult<Self> {
        tracing::info!("Connecting to database...");
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await?;
        tracing::info!("Database connection established");
        Ok(Self::new(db))
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }

    pub async fn is_reachable(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db).await.is_ok()
    }

    /// Read all three tables concurrently
    pub async fn load(&self) -> AppResult<Snapshot> {
        let (items, transactions, restocks) =
            tokio::try_join!(self.items(), self.transactions(), self.restocks())?;
        Ok(Snapshot::new(items, transactions, restocks))
    }

    async fn items(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, category, quantity, cost_price, selling_price,
                   reorder_level, total_cogs
            FROM inventory_items
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    async fn transactions(&self) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, item_id, item_name, quantity, cost_price, selling_price,
                   total_cost, total_revenue, profit, occurred_at, kind, transaction_type
            FROM transactions
            ORDER BY occurred_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn restocks(&self) -> AppResult<Vec<Restock>> {
        let rows = sqlx::query_as::<_, RestockRow>(
            r#"
            SELECT id, item_id, item_name, quantity, cost_price, total_cost,
                   occurred_at, reason
            FROM restocks
            ORDER BY occurred_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Restock::from).collect())
    }
}
