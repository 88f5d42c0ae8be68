//! Customer endpoints, including the bulk CSV upload.

use crate::client::{CrmClient, ListQuery};
use crm_core::types::{BulkUploadReport, Customer, CustomerInput, Envelope, ListPage};
use crm_core::CrmResult;
use std::path::Path;
use tracing::info;

impl CrmClient {
    pub async fn list_customers(&self, query: &ListQuery) -> CrmResult<ListPage<Customer>> {
        self.get("/customers", &query.params()).await
    }

    pub async fn get_customer(&self, id: &str) -> CrmResult<Customer> {
        let envelope: Envelope<Customer> = self.get(&format!("/customers/{id}"), &[]).await?;
        Ok(envelope.data)
    }

    pub async fn create_customer(&self, input: &CustomerInput) -> CrmResult<Customer> {
        let envelope: Envelope<Customer> = self.post("/customers", input).await?;
        Ok(envelope.data)
    }

    pub async fn update_customer(&self, id: &str, input: &CustomerInput) -> CrmResult<Customer> {
        let envelope: Envelope<Customer> = self.put(&format!("/customers/{id}"), input).await?;
        Ok(envelope.data)
    }

    pub async fn delete_customer(&self, id: &str) -> CrmResult<()> {
        self.delete(&format!("/customers/{id}")).await
    }

    /// `POST /customers/bulk-upload` — forwards a CSV file as multipart
    /// form data and returns per-row success/failure counts.
    pub async fn bulk_upload_customers(&self, path: &Path) -> CrmResult<BulkUploadReport> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let report: BulkUploadReport = self.post_multipart("/customers/bulk-upload", form).await?;
        info!(
            file = %file_name,
            success = report.success,
            failed = report.failed,
            "bulk upload complete"
        );
        Ok(report)
    }
}
