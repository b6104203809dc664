//! Transaction loading from JSON and CSV files
//!
//! Records carry either `amountRupees` (major units, converted with
//! `round(x * 100)`) or `amountPaise` (minor units). Amounts are absolute;
//! direction comes from the `type` column.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind};

/// One transaction as written in an input file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub date: String,
    #[serde(default)]
    pub amount_rupees: Option<f64>,
    #[serde(default)]
    pub amount_paise: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
}

impl TransactionRecord {
    /// Validate and convert into an engine transaction
    pub fn into_transaction(self) -> Result<Transaction> {
        let date = parse_timestamp(&self.date)?;
        let kind: TransactionKind = self.kind.parse().map_err(Error::Import)?;
        let amount_minor = match (self.amount_rupees, self.amount_paise) {
            (Some(rupees), None) => rupees_to_paise(rupees)?,
            (None, Some(paise)) => u64::try_from(paise)
                .map_err(|_| Error::Import(format!("Amount must be non-negative: {}", paise)))?,
            (Some(_), Some(_)) => {
                return Err(Error::Import(
                    "Give either amountRupees or amountPaise, not both".into(),
                ))
            }
            (None, None) => return Err(Error::Import("Missing amount".into())),
        };
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Transaction {
            date,
            amount_minor,
            kind,
            category,
        })
    }
}

/// Parse a JSON array of records, bare or wrapped in `{ "data": [...] }`
///
/// Each element is decoded on its own so that a malformed record is reported
/// by its 1-based position.
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let value: Value = serde_json::from_reader(reader)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(Error::Import("Expected an object with a \"data\" array".into())),
        },
        _ => return Err(Error::Import("Expected a JSON array of transactions".into())),
    };

    let records = items.into_iter().map(|item| {
        serde_json::from_value::<TransactionRecord>(item).map_err(|e| Error::Import(e.to_string()))
    });

    let transactions = convert_records(records)?;
    debug!("Parsed {} JSON transactions", transactions.len());
    Ok(transactions)
}

/// Parse CSV with headers `date,type,amount,category[,description,merchant]`
///
/// `amount` is in rupees and may carry a currency symbol or grouping commas.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };
    let date_col = column("date").ok_or_else(|| Error::Import("Missing date column".into()))?;
    let type_col = column("type").ok_or_else(|| Error::Import("Missing type column".into()))?;
    let amount_col =
        column("amount").ok_or_else(|| Error::Import("Missing amount column".into()))?;
    let category_col = column("category");
    let description_col = column("description");
    let merchant_col = column("merchant");

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let field = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .map(|s| s.to_string())
                .filter(|s| !s.is_empty())
        };

        let amount_str = record.get(amount_col).unwrap_or("");
        let amount_rupees = parse_amount(amount_str).ok_or_else(|| {
            Error::Import(format!(
                "Record {}: Unable to parse amount: {}",
                i + 1,
                amount_str
            ))
        })?;

        records.push(TransactionRecord {
            date: record.get(date_col).unwrap_or("").to_string(),
            amount_rupees: Some(amount_rupees),
            amount_paise: None,
            kind: record.get(type_col).unwrap_or("").to_string(),
            category: field(category_col),
            description: field(description_col),
            merchant: field(merchant_col),
        });
    }

    let transactions = convert_records(records.into_iter().map(Ok))?;
    debug!("Parsed {} CSV transactions", transactions.len());
    Ok(transactions)
}

/// Load a `.json` or `.csv` file
pub fn load_file(path: &Path) -> Result<Vec<Transaction>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let reader = || -> Result<BufReader<File>> { Ok(BufReader::new(File::open(path)?)) };

    match extension.as_deref() {
        Some("json") => parse_json(reader()?),
        Some("csv") => parse_csv(reader()?),
        _ => Err(Error::Import(format!(
            "Unsupported file type (expected .json or .csv): {}",
            path.display()
        ))),
    }
}

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00+05:30`), a naive date-time taken as
/// UTC (`2024-01-15T10:30:00`), or a bare date at midnight UTC (`2024-01-15`).
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

fn convert_records<I>(records: I) -> Result<Vec<Transaction>>
where
    I: IntoIterator<Item = Result<TransactionRecord>>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            record.and_then(TransactionRecord::into_transaction).map_err(|e| match e {
                Error::Import(msg) => Error::Import(format!("Record {}: {}", i + 1, msg)),
                other => other,
            })
        })
        .collect()
}

/// Convert rupees to paise, rounding to the nearest paisa
fn rupees_to_paise(rupees: f64) -> Result<u64> {
    if !rupees.is_finite() {
        return Err(Error::Import(format!("Amount is not a number: {}", rupees)));
    }
    if rupees < 0.0 {
        return Err(Error::Import(format!("Amount must be non-negative: {}", rupees)));
    }
    let paise = (rupees * 100.0).round();
    if paise > u64::MAX as f64 {
        return Err(Error::Import(format!("Amount too large: {}", rupees)));
    }
    Ok(paise as u64)
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().replace(['₹', '$', ',', ' '], "");
    cleaned.parse::<f64>().ok()
}
