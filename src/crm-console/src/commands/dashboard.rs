//! Dashboard: headline counts, revenue, and recent activity.

use crate::output::OutputFormat;
use crm_api::{CrmClient, ListQuery};
use crm_core::types::Customer;
use crm_core::AppConfig;
use crm_reporting::{DashboardSummary, EntityCounts};

/// Rows shown in each recent-activity panel.
const RECENT_LIMIT: u32 = 5;

/// Revenue sums every customer's cumulative spend, so all pages are
/// walked with the configured page size.
async fn fetch_all_customers(client: &CrmClient, page_size: u32) -> anyhow::Result<Vec<Customer>> {
    let first = client.list_customers(&ListQuery::new(1, page_size)).await?;
    let pages = first.total_pages(page_size).max(1);
    let mut customers = first.data;
    for page in 2..=pages {
        let next = client.list_customers(&ListQuery::new(page, page_size)).await?;
        if next.data.is_empty() {
            break;
        }
        customers.extend(next.data);
    }
    Ok(customers)
}

pub async fn handle(
    client: &CrmClient,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let recent_customers = client
        .list_customers(&ListQuery::new(1, RECENT_LIMIT))
        .await?;
    let recent_orders = client
        .list_orders(&ListQuery::new(1, RECENT_LIMIT), None)
        .await?;
    let campaigns = client.list_campaigns(&ListQuery::new(1, RECENT_LIMIT)).await?;
    let all_customers = fetch_all_customers(client, config.page_size).await?;
    let order_count = recent_orders.count.unwrap_or(0);

    let summary = DashboardSummary::compute(
        &all_customers,
        EntityCounts {
            customers: recent_customers
                .count
                .unwrap_or(all_customers.len() as u64),
            orders: order_count,
            campaigns: campaigns.count.unwrap_or(0),
        },
        recent_customers.data,
        recent_orders.data,
    );

    if format.is_json() {
        format.print_json(&summary);
        return Ok(());
    }

    println!("Customers: {}", summary.total_customers);
    println!("Orders:    {}", summary.total_orders);
    println!("Campaigns: {}", summary.total_campaigns);
    println!("Revenue:   ${:.2} (sum of customer cumulative spend)", summary.total_revenue);

    if !summary.recent_customers.is_empty() {
        println!("\nRecent customers:");
        format.print(&summary.recent_customers, &summary.recent_customers);
    }
    if !summary.recent_orders.is_empty() {
        println!("\nRecent orders:");
        format.print(&summary.recent_orders, &summary.recent_orders);
    }
    Ok(())
}
