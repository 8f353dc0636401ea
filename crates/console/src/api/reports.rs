//! Spreadsheet report downloads.
//!
//! Reports are generated server-side and consumed opaquely; the client
//! never parses the bytes, it only hands them to the user as a file.

use chrono::Utc;
use stockpilot_core::OrderId;
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;

/// A downloaded report: opaque spreadsheet bytes plus a suggested
/// filename carrying the report kind and today's date.
#[derive(Debug, Clone)]
pub struct ReportDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ReportDownload {
    fn new(stem: String, bytes: Vec<u8>) -> Self {
        let date = Utc::now().format("%Y-%m-%d");
        Self {
            filename: format!("{stem}_{date}.xlsx"),
            bytes,
        }
    }
}

impl ApiClient {
    /// Download the stock-levels report.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn download_stock_report(&self) -> Result<ReportDownload, ApiError> {
        let bytes = self.get_bytes("/report/stock").await?;
        Ok(ReportDownload::new("stock_report".to_string(), bytes))
    }

    /// Download the all-orders report.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn download_orders_report(&self) -> Result<ReportDownload, ApiError> {
        let bytes = self.get_bytes("/report/orders").await?;
        Ok(ReportDownload::new("orders_report".to_string(), bytes))
    }

    /// Download the report for a single order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn download_order_report(&self, id: OrderId) -> Result<ReportDownload, ApiError> {
        let bytes = self.get_bytes(&format!("/report/order/{id}")).await?;
        Ok(ReportDownload::new(format!("order_report_{id}"), bytes))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ConsoleConfig;

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ConsoleConfig::with_api_url(server.uri())).expect("client should build")
    }

    #[tokio::test]
    async fn test_order_report_bytes_are_opaque() {
        let server = MockServer::start().await;
        let payload: &[u8] = b"PK\x03\x04not-really-a-sheet";
        Mock::given(method("GET"))
            .and(path("/report/order/7"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let report = client
            .download_order_report(OrderId::new(7))
            .await
            .expect("download should succeed");
        assert_eq!(report.bytes, payload);
        assert!(report.filename.starts_with("order_report_7_"));
        assert!(report.filename.ends_with(".xlsx"));
    }

    #[tokio::test]
    async fn test_report_rejection_uses_error_channel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/report/stock"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "Report generation failed"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.download_stock_report().await.unwrap_err();
        assert_eq!(err.to_string(), "Report generation failed");
    }
}
