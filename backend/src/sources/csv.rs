//! Spreadsheet export reader
//!
//! Reads `items.csv`, `transactions.csv` and (optionally) `restocks.csv`
//! from a directory. Headers use the provider field names (`itemId`,
//! `totalCOGS`, ...) and timestamps the `yyyy-MM-dd / hh:mm a` layout.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use shared::Snapshot;

use crate::error::{AppError, AppResult};

pub const ITEMS_FILE: &str = "items.csv";
pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const RESTOCKS_FILE: &str = "restocks.csv";

#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_reachable(&self) -> bool {
        self.dir.join(ITEMS_FILE).is_file() && self.dir.join(TRANSACTIONS_FILE).is_file()
    }

    /// Read the three files off the async runtime
    pub async fn load(&self) -> AppResult<Snapshot> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || read_dir(&dir))
            .await
            .map_err(|e| AppError::Internal(format!("CSV reader task failed: {}", e)))?
    }
}

/// Read a snapshot from a directory of CSV files
pub fn read_dir(dir: &Path) -> AppResult<Snapshot> {
    let items = read_file(&dir.join(ITEMS_FILE))?;
    let transactions = read_file(&dir.join(TRANSACTIONS_FILE))?;

    let restocks_path = dir.join(RESTOCKS_FILE);
    let restocks = if restocks_path.is_file() {
        read_file(&restocks_path)?
    } else {
        tracing::debug!("No {} in {}, assuming no restocks", RESTOCKS_FILE, dir.display());
        Vec::new()
    };

    Ok(Snapshot::new(items, transactions, restocks))
}

fn read_file<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let file = File::open(path).map_err(|e| {
        AppError::SourceUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;
    read_records(file).map_err(|e| AppError::MalformedSource {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Deserialize every row of a headed CSV document
pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{InventoryItem, MovementKind, Restock, Transaction, TransactionType};

    const ITEMS: &str = "\
id,name,category,quantity,costPrice,sellingPrice,reorderLevel,totalCOGS
sku-1,Pour Over Kettle,Brewing,4,18.50,39.00,5,
sku-2,Paper Filters,Supplies,120,1.20,3.50,40,150.00
";

    const TRANSACTIONS: &str = "\
id,itemId,itemName,quantity,costPrice,sellingPrice,totalCost,totalRevenue,profit,timestamp,type,transactionType
t-1,sku-1,Pour Over Kettle,1,18.50,39.00,18.50,39.00,20.50,2024-03-15 / 02:30 PM,sale,sale
t-2,sku-2,Paper Filters,10,1.20,3.50,12.00,35.00,23.00,2024-03-16 / 09:05 AM,sale,demo
";

    #[test]
    fn test_read_items() {
        let items: Vec<InventoryItem> = read_records(ITEMS.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].total_cogs, None);
        assert_eq!(items[1].total_cogs, Some(Decimal::from(150)));
        assert_eq!(items[0].cost_price, Decimal::new(1850, 2));
    }

    #[test]
    fn test_read_transactions() {
        let txs: Vec<Transaction> = read_records(TRANSACTIONS.as_bytes()).unwrap();
        assert_eq!(txs[0].kind, MovementKind::Sale);
        assert!(txs[0].is_genuine_sale());
        assert_eq!(txs[1].transaction_type, TransactionType::Demo);
        assert_eq!(txs[1].timestamp.to_string(), "2024-03-16 09:05:00");
    }

    #[test]
    fn test_read_restocks_with_blank_reason() {
        let csv = "\
id,itemId,itemName,quantity,costPrice,totalCost,timestamp,reason
r-1,sku-1,Pour Over Kettle,2,18.50,37.00,2024-03-20 / 11:00 AM,damaged-return
r-2,sku-2,Paper Filters,50,1.20,60.00,2024-03-21 / 11:00 AM,
";
        let restocks: Vec<Restock> = read_records(csv.as_bytes()).unwrap();
        assert!(restocks[0].is_return());
        assert!(!restocks[1].is_return());
    }

    #[test]
    fn test_malformed_timestamp_fails_the_file() {
        let bad = TRANSACTIONS.replace("2024-03-15 / 02:30 PM", "15/03/2024");
        let err = read_records::<Transaction, _>(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("malformed timestamp"));
    }

    #[test]
    fn test_read_dir_without_restocks() {
        let dir = std::env::temp_dir().join(format!("stockroom-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(ITEMS_FILE), ITEMS).unwrap();
        std::fs::write(dir.join(TRANSACTIONS_FILE), TRANSACTIONS).unwrap();

        let source = CsvSource::new(&dir);
        assert!(source.is_reachable());
        let snapshot = read_dir(source.dir()).unwrap();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.transactions.len(), 2);
        assert!(snapshot.restocks.is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let err = read_dir(Path::new("/nonexistent/stockroom")).unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable(_)));
    }
}
