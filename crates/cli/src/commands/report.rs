//! Report download commands.
//!
//! Reports are opaque spreadsheet bytes; they are written to disk
//! unparsed, under the server-suggested filename unless `--out` is given.

use stockpilot_console::api::reports::ReportDownload;
use stockpilot_console::ApiClient;
use stockpilot_core::OrderId;

pub async fn stock(
    client: &ApiClient,
    out: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    save(client.download_stock_report().await?, out)
}

pub async fn orders(
    client: &ApiClient,
    out: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    save(client.download_orders_report().await?, out)
}

pub async fn order(
    client: &ApiClient,
    id: i32,
    out: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    save(client.download_order_report(OrderId::new(id)).await?, out)
}

fn save(report: ReportDownload, out: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let path = out.unwrap_or(report.filename);
    std::fs::write(&path, &report.bytes)?;
    tracing::info!("Wrote {} bytes to {path}", report.bytes.len());
    Ok(())
}
