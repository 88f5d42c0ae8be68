//! Order commands.

use super::{confirm, split_list};
use crate::output::{page_footer, OutputFormat};
use clap::Subcommand;
use crm_api::{CrmClient, ListQuery};
use crm_core::types::OrderInput;
use crm_core::AppConfig;

#[derive(Subcommand)]
pub enum OrderCommands {
    /// List orders
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
        /// Only orders for this customer id
        #[arg(long)]
        customer: Option<String>,
    },
    /// Show one order
    Get { id: String },
    /// Create an order
    Create {
        /// Human-facing order number
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        customer: String,
        /// Comma-separated item names
        #[arg(long)]
        items: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update an order
    Update {
        id: String,
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        customer: String,
        #[arg(long)]
        items: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an order
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

fn input(
    order_id: String,
    customer: String,
    items: String,
    price: f64,
    notes: Option<String>,
) -> OrderInput {
    OrderInput {
        order_id,
        customer_id: customer,
        items: split_list(&items),
        price,
        notes,
    }
}

pub async fn handle(
    action: OrderCommands,
    client: &CrmClient,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        OrderCommands::List {
            page,
            search,
            customer,
        } => {
            let query = ListQuery::new(page, config.page_size).search(search.unwrap_or_default());
            let result = client.list_orders(&query, customer.as_deref()).await?;
            if result.data.is_empty() {
                println!("No orders found.");
                return Ok(());
            }
            format.print(&result.data, &result.data);
            if !format.is_json() {
                let pages = result.total_pages(config.page_size);
                println!("{}", page_footer(page, pages, result.count));
            }
        }
        OrderCommands::Get { id } => {
            let order = client.get_order(&id).await?;
            format.print_json(&order);
        }
        OrderCommands::Create {
            order_id,
            customer,
            items,
            price,
            notes,
        } => {
            let order = client
                .create_order(&input(order_id, customer, items, price, notes))
                .await?;
            println!("Created order {}", order.id);
        }
        OrderCommands::Update {
            id,
            order_id,
            customer,
            items,
            price,
            notes,
        } => {
            let order = client
                .update_order(&id, &input(order_id, customer, items, price, notes))
                .await?;
            println!("Updated order {}", order.id);
        }
        OrderCommands::Delete { id, yes } => {
            if confirm(&format!("Delete order {id}?"), yes)? {
                client.delete_order(&id).await?;
                println!("Deleted order {id}");
            }
        }
    }
    Ok(())
}
