//! Shared wire types for the CRM backend — entities, response envelopes,
//! pagination. Field names mirror the backend contract exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Customer ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Cumulative spend across all orders, maintained by the backend.
    #[serde(default)]
    pub total_spendings: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a customer. The id and cumulative
/// spend are backend-owned and never sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ─── Order ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing order number, distinct from the record id.
    pub order_id: String,
    pub customer_id: CustomerRef,
    #[serde(default)]
    pub items: Vec<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The backend returns `customerId` either as a bare id or as a populated
/// customer object, depending on the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Id(String),
    Populated(Box<Customer>),
}

impl CustomerRef {
    pub fn id(&self) -> &str {
        match self {
            CustomerRef::Id(id) => id,
            CustomerRef::Populated(customer) => &customer.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CustomerRef::Id(_) => None,
            CustomerRef::Populated(customer) => Some(&customer.name),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub order_id: String,
    pub customer_id: String,
    pub items: Vec<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ─── Response envelopes ────────────────────────────────────────────────────

/// Single-entity responses: `{success, data, message?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Paginated list responses: `{success, data: [...], count, pagination}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Total matching records across all pages.
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> ListPage<T> {
    /// Page count for this result. Prefers the backend's `pagination.pages`;
    /// older backends omit it, in which case the count is derived from the
    /// reported total and the requested page size.
    pub fn total_pages(&self, page_size: u32) -> u32 {
        if self.pagination.pages > 0 {
            return self.pagination.pages;
        }
        let total = self
            .count
            .or(self.pagination.total)
            .unwrap_or(self.data.len() as u64);
        Pagination::pages_for(total, page_size)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total: Option<u64>,
}

impl Pagination {
    /// Page count for a given total and page size, matching the backend's
    /// ceiling division.
    pub fn pages_for(total: u64, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        ((total + page_size as u64 - 1) / page_size as u64) as u32
    }
}

/// Result of a bulk CSV upload: per-row success and failure counts.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUploadReport {
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub failed: u64,
}

// ─── Session ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_deserializes_backend_shape() {
        let json = r#"{
            "_id": "65f1a2",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "location": "London",
            "tags": ["vip"],
            "totalSpendings": 1250.5
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, "65f1a2");
        assert_eq!(customer.total_spendings, 1250.5);
        assert_eq!(customer.tags, vec!["vip"]);
        assert!(customer.phone.is_none());
    }

    #[test]
    fn order_customer_ref_accepts_both_shapes() {
        let bare: Order = serde_json::from_str(
            r#"{"_id":"o1","orderId":"ORD-1","customerId":"c1","items":["mug"],"price":12.0}"#,
        )
        .unwrap();
        assert_eq!(bare.customer_id.id(), "c1");
        assert!(bare.customer_id.name().is_none());

        let populated: Order = serde_json::from_str(
            r#"{"_id":"o2","orderId":"ORD-2","price":40.0,
                "customerId":{"_id":"c2","name":"Grace","email":"g@example.com"}}"#,
        )
        .unwrap();
        assert_eq!(populated.customer_id.id(), "c2");
        assert_eq!(populated.customer_id.name(), Some("Grace"));
    }

    #[test]
    fn pagination_reports_three_pages_for_23_of_10() {
        assert_eq!(Pagination::pages_for(23, 10), 3);
        assert_eq!(Pagination::pages_for(0, 10), 0);
        assert_eq!(Pagination::pages_for(10, 10), 1);
        assert_eq!(Pagination::pages_for(11, 10), 2);
    }

    #[test]
    fn total_pages_falls_back_to_count_when_pages_missing() {
        let page: ListPage<Customer> =
            serde_json::from_str(r#"{"data": [], "count": 23, "pagination": {"pages": 3}}"#)
                .unwrap();
        assert_eq!(page.total_pages(10), 3);

        let legacy: ListPage<Customer> =
            serde_json::from_str(r#"{"data": [], "count": 23}"#).unwrap();
        assert_eq!(legacy.total_pages(10), 3);

        let bare: ListPage<Customer> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(bare.total_pages(10), 0);
    }

    #[test]
    fn list_page_tolerates_missing_fields() {
        let page: ListPage<Customer> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.pages, 0);
        assert!(page.count.is_none());
    }
}
