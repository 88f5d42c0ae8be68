//! Campaign commands: list/detail, draft creation with audience preview
//! and AI message drafting, send.

use super::confirm;
use crate::output::{colored_status, page_footer, OutputFormat};
use clap::Subcommand;
use crm_api::{CrmClient, ListQuery};
use crm_campaigns::{Campaign, CampaignDraft};
use crm_core::AppConfig;
use crm_segmentation::{LogicOperator, RuleField, RuleOperator, RuleSetEditor, SegmentRuleSet};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum CampaignCommands {
    /// List campaigns
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one campaign with its delivery stats
    Get { id: String },
    /// Create a campaign from a draft file
    Create {
        /// TOML draft file
        #[arg(short, long)]
        file: PathBuf,
        /// Validate and show the payload without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// Preview the audience matched by segment rules
    Preview {
        /// TOML draft file supplying the rules
        #[arg(short, long, required_unless_present = "rule", conflicts_with = "rule")]
        file: Option<PathBuf>,
        /// Inline rule `FIELD OPERATOR VALUE`, repeatable; rules after the
        /// first may lead with AND or OR
        #[arg(long)]
        rule: Vec<String>,
    },
    /// Generate a campaign message from a prompt and the draft's audience
    Generate {
        #[arg(short, long)]
        file: PathBuf,
        /// What the campaign should say
        #[arg(long)]
        prompt: String,
    },
    /// Send a draft campaign now
    Send {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete a campaign
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

fn load_draft(path: &Path) -> anyhow::Result<CampaignDraft> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read draft {}: {e}", path.display()))?;
    let draft: CampaignDraft = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid draft {}: {e}", path.display()))?;
    Ok(draft)
}

/// Builds a rule sequence from repeated `--rule` flags. Each flag is
/// `FIELD OPERATOR VALUE`; rules after the first may start with `AND` or
/// `OR` to set the combinator with the previous rule.
fn rules_from_flags(flags: &[String]) -> anyhow::Result<SegmentRuleSet> {
    if flags.is_empty() {
        anyhow::bail!("at least one --rule is required");
    }
    let mut editor = RuleSetEditor::new();
    for (i, flag) in flags.iter().enumerate() {
        let mut parts = flag.split_whitespace();
        let mut field = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("rule {}: expected FIELD OPERATOR VALUE", i + 1))?;
        if i > 0 {
            editor.add_rule();
            if let Ok(logic) = field.parse::<LogicOperator>() {
                editor.set_logic(i, logic)?;
                field = parts.next().ok_or_else(|| {
                    anyhow::anyhow!("rule {}: expected a field after the logic operator", i + 1)
                })?;
            }
        }
        let operator: RuleOperator = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("rule {}: missing operator", i + 1))?
            .parse()?;
        let value = parts.collect::<Vec<_>>().join(" ");
        editor.set_field(i, RuleField::from(field.to_string()))?;
        editor.set_operator(i, operator)?;
        editor.set_value(i, value)?;
    }
    Ok(editor.finish()?)
}

fn print_detail(campaign: &Campaign) {
    println!("{} — {}", campaign.id, campaign.name);
    println!("  status:    {}", colored_status(campaign.status));
    if let Some(subject) = &campaign.subject {
        println!("  subject:   {subject}");
    }
    if !campaign.description.is_empty() {
        println!("  about:     {}", campaign.description);
    }
    for (i, rule) in campaign.segment_rules.iter().enumerate() {
        let prefix = match (i, rule.logic_operator) {
            (0, _) => "  rules:     ".to_string(),
            (_, Some(op)) => format!("             {op:?} ").to_uppercase(),
            (_, None) => "             AND ".to_string(),
        };
        println!("{prefix}{} {} {}", rule.field, rule.operator, rule.value);
    }
    if let Some(scheduled) = campaign.scheduled_for {
        println!("  scheduled: {scheduled}");
    }
    if let Some(sent) = campaign.sent_at {
        println!("  sent:      {sent}");
    }
    if let (Some(audience), Some(delivered), Some(failed)) =
        (campaign.target_audience, campaign.delivered, campaign.failed)
    {
        println!("  delivery:  {delivered}/{audience} delivered, {failed} failed");
    }
    let actions: Vec<_> = campaign
        .allowed_actions()
        .iter()
        .map(|a| format!("{a:?}").to_lowercase())
        .collect();
    if !actions.is_empty() {
        println!("  actions:   {}", actions.join(", "));
    }
}

pub async fn handle(
    action: CampaignCommands,
    client: &CrmClient,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        CampaignCommands::List { page, search } => {
            let query = ListQuery::new(page, config.page_size).search(search.unwrap_or_default());
            let result = client.list_campaigns(&query).await?;
            if result.data.is_empty() {
                println!("No campaigns found. Create your first campaign now!");
                return Ok(());
            }
            format.print(&result.data, &result.data);
            if !format.is_json() {
                let pages = result.total_pages(config.page_size);
                println!("{}", page_footer(page, pages, result.count));
            }
        }
        CampaignCommands::Get { id } => {
            let campaign = client.get_campaign(&id).await?;
            if format.is_json() {
                format.print_json(&campaign);
            } else {
                print_detail(&campaign);
            }
        }
        CampaignCommands::Create { file, dry_run } => {
            let request = load_draft(&file)?.into_request()?;
            if dry_run {
                println!("{}", serde_json::to_string_pretty(&request)?);
                return Ok(());
            }
            let campaign = client.create_campaign(&request).await?;
            println!(
                "Created campaign {} ({})",
                campaign.id,
                colored_status(campaign.status)
            );
        }
        CampaignCommands::Preview { file, rule } => {
            let rules = match file {
                Some(path) => SegmentRuleSet::normalized(&load_draft(&path)?.rules)?,
                None => rules_from_flags(&rule)?,
            };
            let preview = client
                .preview_audience(&rules, config.preview_sample_size)
                .await?;
            println!("Target audience: {} customers", preview.count);
            format.print(&preview.sample, &preview);
            if preview.count as usize > preview.sample.len() && !format.is_json() {
                println!(
                    "... and {} more customers",
                    preview.count as usize - preview.sample.len()
                );
            }
        }
        CampaignCommands::Generate { file, prompt } => {
            let draft = load_draft(&file)?;
            let audience = draft.audience_description()?;
            let message = client.generate_message(&prompt, &audience).await?;
            println!("{message}");
        }
        CampaignCommands::Send { id, yes } => {
            let campaign = client.get_campaign(&id).await?;
            if !campaign.status.can_send() {
                anyhow::bail!(
                    "campaign {id} has status `{}` and cannot be sent",
                    campaign.status.as_str()
                );
            }
            if confirm("Are you sure you want to send this campaign now?", yes)? {
                let sent = client.send_campaign(&id).await?;
                print_detail(&sent);
            }
        }
        CampaignCommands::Delete { id, yes } => {
            let campaign = client.get_campaign(&id).await?;
            if !campaign.status.can_delete() {
                anyhow::bail!(
                    "campaign {id} has status `{}` and cannot be deleted",
                    campaign.status.as_str()
                );
            }
            if confirm(&format!("Delete campaign {id}?"), yes)? {
                client.delete_campaign(&id).await?;
                println!("Deleted campaign {id}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_segmentation::RuleValue;

    fn flags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rule_flags_build_a_coerced_sequence() {
        let set = rules_from_flags(&flags(&[
            "totalSpendings greaterThan 1000",
            "OR tags equals vip",
        ]))
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules()[0].value, RuleValue::Number(1000.0));
        assert_eq!(set.rules()[0].logic_operator, None);
        assert_eq!(set.rules()[1].logic_operator, Some(LogicOperator::Or));
    }

    #[test]
    fn rule_flags_default_to_and_without_a_combinator() {
        let set = rules_from_flags(&flags(&[
            "location startsWith New",
            "tags contains loyal",
        ]))
        .unwrap();
        assert_eq!(set.rules()[1].logic_operator, Some(LogicOperator::And));
    }

    #[test]
    fn rule_flag_values_keep_their_spaces() {
        let set = rules_from_flags(&flags(&["location equals New York"])).unwrap();
        assert_eq!(
            set.rules()[0].value,
            RuleValue::Text("New York".to_string())
        );
    }

    #[test]
    fn bad_rule_flags_are_rejected() {
        assert!(rules_from_flags(&[]).is_err());
        assert!(rules_from_flags(&flags(&["tags equals"])).is_err());
        assert!(rules_from_flags(&flags(&["tags matches vip"])).is_err());
        assert!(rules_from_flags(&flags(&["tags greaterThan 5"])).is_err());
        assert!(rules_from_flags(&flags(&["totalSpendings lessThan lots"])).is_err());
    }
}
