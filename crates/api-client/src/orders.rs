//! Order endpoints.

use crate::client::{CrmClient, ListQuery};
use crm_core::types::{Envelope, ListPage, Order, OrderInput};
use crm_core::CrmResult;

impl CrmClient {
    /// Optionally narrowed to one customer's orders, as when drilling down
    /// from a customer detail view.
    pub async fn list_orders(
        &self,
        query: &ListQuery,
        customer_id: Option<&str>,
    ) -> CrmResult<ListPage<Order>> {
        let mut params = query.params();
        if let Some(id) = customer_id {
            params.push(("customerId", id.to_string()));
        }
        self.get("/orders", &params).await
    }

    pub async fn get_order(&self, id: &str) -> CrmResult<Order> {
        let envelope: Envelope<Order> = self.get(&format!("/orders/{id}"), &[]).await?;
        Ok(envelope.data)
    }

    pub async fn create_order(&self, input: &OrderInput) -> CrmResult<Order> {
        let envelope: Envelope<Order> = self.post("/orders", input).await?;
        Ok(envelope.data)
    }

    pub async fn update_order(&self, id: &str, input: &OrderInput) -> CrmResult<Order> {
        let envelope: Envelope<Order> = self.put(&format!("/orders/{id}"), input).await?;
        Ok(envelope.data)
    }

    pub async fn delete_order(&self, id: &str) -> CrmResult<()> {
        self.delete(&format!("/orders/{id}")).await
    }
}
