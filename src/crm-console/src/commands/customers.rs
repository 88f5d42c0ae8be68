//! Customer commands: list/detail/CRUD plus bulk CSV upload.

use super::{confirm, split_list};
use crate::output::{page_footer, OutputFormat};
use clap::Subcommand;
use crm_api::{CrmClient, ListQuery};
use crm_core::types::CustomerInput;
use crm_core::AppConfig;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// List customers
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one customer
    Get { id: String },
    /// Create a customer
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update a customer
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a customer
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Upload customers from a CSV file
    BulkUpload { file: PathBuf },
}

fn input(
    name: String,
    email: String,
    phone: Option<String>,
    location: Option<String>,
    tags: Option<String>,
    notes: Option<String>,
) -> CustomerInput {
    CustomerInput {
        name,
        email,
        phone,
        location,
        tags: tags.as_deref().map(split_list).unwrap_or_default(),
        notes,
    }
}

pub async fn handle(
    action: CustomerCommands,
    client: &CrmClient,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        CustomerCommands::List { page, search } => {
            let query = ListQuery::new(page, config.page_size).search(search.unwrap_or_default());
            let result = client.list_customers(&query).await?;
            if result.data.is_empty() {
                println!("No customers found.");
                return Ok(());
            }
            format.print(&result.data, &result.data);
            if !format.is_json() {
                let pages = result.total_pages(config.page_size);
                println!("{}", page_footer(page, pages, result.count));
            }
        }
        CustomerCommands::Get { id } => {
            let customer = client.get_customer(&id).await?;
            format.print_json(&customer);
        }
        CustomerCommands::Create {
            name,
            email,
            phone,
            location,
            tags,
            notes,
        } => {
            let customer = client
                .create_customer(&input(name, email, phone, location, tags, notes))
                .await?;
            println!("Created customer {}", customer.id);
        }
        CustomerCommands::Update {
            id,
            name,
            email,
            phone,
            location,
            tags,
            notes,
        } => {
            let customer = client
                .update_customer(&id, &input(name, email, phone, location, tags, notes))
                .await?;
            println!("Updated customer {}", customer.id);
        }
        CustomerCommands::Delete { id, yes } => {
            if confirm(&format!("Delete customer {id}?"), yes)? {
                client.delete_customer(&id).await?;
                println!("Deleted customer {id}");
            }
        }
        CustomerCommands::BulkUpload { file } => {
            let report = client.bulk_upload_customers(&file).await?;
            println!(
                "Bulk upload: {} imported, {} failed",
                report.success, report.failed
            );
        }
    }
    Ok(())
}
