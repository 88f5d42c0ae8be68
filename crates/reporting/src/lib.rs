//! Dashboard aggregation over server-provided data. Totals come from the
//! list endpoints' `count` fields; revenue is the one client-computed
//! figure in the system.

use crm_core::types::{Customer, Order};
use serde::Serialize;

/// Headline figures plus recent-activity samples for the dashboard view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSummary {
    pub total_customers: u64,
    pub total_orders: u64,
    pub total_campaigns: u64,
    pub total_revenue: f64,
    pub recent_customers: Vec<Customer>,
    pub recent_orders: Vec<Order>,
}

impl DashboardSummary {
    /// Assembles the summary from already-fetched pages.
    ///
    /// `total_revenue` is the sum of customers' cumulative spend
    /// (`totalSpendings`), not a sum over order amounts. The two can
    /// disagree; which metric is intended is an open question with the API
    /// owner, so the original definition is kept.
    pub fn compute(
        all_customers: &[Customer],
        counts: EntityCounts,
        recent_customers: Vec<Customer>,
        recent_orders: Vec<Order>,
    ) -> Self {
        let total_revenue = customer_spend_revenue(all_customers);
        Self {
            total_customers: counts.customers,
            total_orders: counts.orders,
            total_campaigns: counts.campaigns,
            total_revenue,
            recent_customers,
            recent_orders,
        }
    }
}

/// Authoritative record counts reported by the list endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityCounts {
    pub customers: u64,
    pub orders: u64,
    pub campaigns: u64,
}

/// Revenue as Σ customer `totalSpendings`. Non-finite values are skipped
/// rather than poisoning the sum.
pub fn customer_spend_revenue(customers: &[Customer]) -> f64 {
    customers
        .iter()
        .map(|customer| customer.total_spendings)
        .filter(|spend| spend.is_finite())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str, spend: f64) -> Customer {
        serde_json::from_value(serde_json::json!({
            "_id": name,
            "name": name,
            "email": format!("{name}@example.com"),
            "totalSpendings": spend,
        }))
        .unwrap()
    }

    #[test]
    fn revenue_sums_customer_spend() {
        let customers = vec![customer("a", 100.0), customer("b", 250.5), customer("c", 0.0)];
        assert_eq!(customer_spend_revenue(&customers), 350.5);
    }

    #[test]
    fn revenue_skips_non_finite_spend() {
        let mut customers = vec![customer("a", 100.0)];
        customers[0].total_spendings = f64::NAN;
        customers.push(customer("b", 50.0));
        assert_eq!(customer_spend_revenue(&customers), 50.0);
    }

    #[test]
    fn summary_carries_counts_and_samples() {
        let recent = vec![customer("a", 10.0)];
        let summary = DashboardSummary::compute(
            &recent,
            EntityCounts {
                customers: 23,
                orders: 7,
                campaigns: 3,
            },
            recent.clone(),
            Vec::new(),
        );
        assert_eq!(summary.total_customers, 23);
        assert_eq!(summary.total_revenue, 10.0);
        assert_eq!(summary.recent_customers.len(), 1);
        assert!(summary.recent_orders.is_empty());
    }
}
