//! CSV export of the visible customer list.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::filter::FetchMode;
use crate::services::ServiceResult;
use crate::view_store::ViewStore;

/// Prefix that lets spreadsheet tools detect UTF-8 (Arabic names).
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const CSV_HEADERS: [&str; 10] = [
    "ID",
    "Name",
    "Email",
    "Phone",
    "Address",
    "Total Orders",
    "Total Spent",
    "Last Order Date",
    "Status",
    "Created At",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no customers to export")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A ready-to-download CSV file.
#[derive(Debug)]
pub struct CsvExport {
    pub filename: String,
    pub content: Vec<u8>,
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn customer_row(customer: &Customer) -> [String; 10] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        customer.id.to_string(),
        text(&customer.name),
        text(&customer.email),
        text(&customer.phone),
        text(&customer.address),
        customer.total_orders.to_string(),
        customer.total_spent.to_string(),
        customer
            .last_order_date
            .as_ref()
            .map(timestamp)
            .unwrap_or_default(),
        customer.status.as_str().to_string(),
        timestamp(&customer.created_at),
    ]
}

/// Serializes customers to BOM-prefixed CSV with every cell quoted and rows
/// joined by CRLF.
pub fn customers_to_csv<'a, I>(customers: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a Customer>,
{
    let mut customers = customers.into_iter().peekable();
    if customers.peek().is_none() {
        return Err(ExportError::Empty);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(CSV_HEADERS)?;
    for customer in customers {
        writer.write_record(customer_row(customer))?;
    }

    let mut content = writer.into_inner().map_err(|e| e.into_error())?;
    // Rows are joined by CRLF, the last one carries no terminator.
    if content.ends_with(b"\r\n") {
        content.truncate(content.len() - 2);
    }
    Ok(content)
}

/// Builds `customers_<mode>_<date>.csv`.
pub fn export_filename(mode: &FetchMode, date: NaiveDate) -> String {
    format!("customers_{}_{}.csv", mode.slug(), date.format("%Y-%m-%d"))
}

/// Exports the visible list of the session's view.
pub fn export_view(store: &ViewStore, key: Uuid, today: NaiveDate) -> ServiceResult<CsvExport> {
    let view = store.snapshot(key);
    let content = customers_to_csv(view.visible()).map_err(|err| {
        if !matches!(err, ExportError::Empty) {
            log::error!("Failed to export customers: {err}");
        }
        err
    })?;

    Ok(CsvExport {
        filename: export_filename(view.mode(), today),
        content,
    })
}
