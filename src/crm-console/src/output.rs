//! Console output: table rows for each entity and a format switch.

use clap::ValueEnum;
use colored::Colorize;
use crm_api::AudienceMember;
use crm_campaigns::{Campaign, CampaignStatus};
use crm_core::types::{Customer, Order};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn print<T, R>(&self, items: &[T], raw: &R)
    where
        for<'a> &'a T: Into<Row>,
        R: Serialize,
    {
        match self {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(raw).unwrap_or_default()
                );
            }
            OutputFormat::Table => {
                if items.is_empty() {
                    return;
                }
                let rows: Vec<Row> = items.iter().map(Into::into).collect();
                println!("{}", Table::new(rows));
            }
        }
    }

    pub fn print_json<R: Serialize>(&self, raw: &R) {
        println!("{}", serde_json::to_string_pretty(raw).unwrap_or_default());
    }

    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// One display row, shared across entities so tables stay uniform.
#[derive(Tabled)]
pub struct Row {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Details")]
    pub details: String,
    #[tabled(rename = "Status / Amount")]
    pub status: String,
}

impl From<&Customer> for Row {
    fn from(customer: &Customer) -> Self {
        Row {
            id: customer.id.clone(),
            name: customer.name.clone(),
            details: format!(
                "{} — {}",
                customer.email,
                customer.location.as_deref().unwrap_or("-")
            ),
            status: format!("${:.2}", customer.total_spendings),
        }
    }
}

impl From<&Order> for Row {
    fn from(order: &Order) -> Self {
        Row {
            id: order.id.clone(),
            name: order.order_id.clone(),
            details: format!(
                "{} — {}",
                order.customer_id.name().unwrap_or(order.customer_id.id()),
                order.items.join(", ")
            ),
            status: format!("${:.2}", order.price),
        }
    }
}

impl From<&Campaign> for Row {
    fn from(campaign: &Campaign) -> Self {
        Row {
            id: campaign.id.clone(),
            name: campaign.name.clone(),
            details: campaign.subject.clone().unwrap_or_default(),
            status: colored_status(campaign.status),
        }
    }
}

impl From<&AudienceMember> for Row {
    fn from(member: &AudienceMember) -> Self {
        Row {
            id: String::new(),
            name: member.name.clone(),
            details: member.email.clone(),
            status: String::new(),
        }
    }
}

pub fn colored_status(status: CampaignStatus) -> String {
    let label = status.as_str();
    match status {
        CampaignStatus::Sent => label.green().to_string(),
        CampaignStatus::Scheduled => label.yellow().to_string(),
        CampaignStatus::Failed => label.red().to_string(),
        CampaignStatus::Draft => label.to_string(),
    }
}

/// Footer line under paginated tables.
pub fn page_footer(page: u32, pages: u32, count: Option<u64>) -> String {
    match count {
        Some(count) => format!("page {page} of {pages} ({count} total)"),
        None => format!("page {page} of {pages}"),
    }
}
