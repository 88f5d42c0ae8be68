//! Campaign draft — the transient, client-side form state validated
//! before it becomes a create request.

use chrono::{DateTime, Utc};
use crm_core::{CrmError, CrmResult};
use crm_segmentation::{SegmentRule, SegmentRuleSet};
use serde::{Deserialize, Serialize};

const MIN_MESSAGE_CHARS: usize = 10;

/// A campaign as authored by the user, before validation. Deserializable
/// from a draft file; `rules` hold raw values (numeric coercion happens
/// during validation).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub rules: Vec<SegmentRule>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl CampaignDraft {
    /// Validates the draft and produces the create payload. Failures here
    /// are reported inline and no request is sent.
    pub fn into_request(self) -> CrmResult<CreateCampaignRequest> {
        if self.name.trim().is_empty() {
            return Err(CrmError::Validation("campaign name is required".to_string()));
        }
        if self.subject.trim().is_empty() {
            return Err(CrmError::Validation("campaign subject is required".to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(CrmError::Validation("campaign message is required".to_string()));
        }
        if self.message.chars().count() < MIN_MESSAGE_CHARS {
            return Err(CrmError::Validation(format!(
                "campaign message must be at least {MIN_MESSAGE_CHARS} characters long"
            )));
        }
        let segment_rules = SegmentRuleSet::normalized(&self.rules)?;
        Ok(CreateCampaignRequest {
            name: self.name,
            description: self.description,
            subject: self.subject,
            segment_rules,
            message: self.message,
            scheduled_for: self.scheduled_for,
        })
    }

    /// Audience description for the message generator, derived from the
    /// current rules without requiring a fully valid draft.
    pub fn audience_description(&self) -> CrmResult<String> {
        Ok(SegmentRuleSet::normalized(&self.rules)?.describe())
    }
}

/// Wire payload for `POST /campaigns`. Rule values are already coerced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    pub description: String,
    pub subject: String,
    pub segment_rules: SegmentRuleSet,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_segmentation::{RuleField, RuleOperator};

    fn valid_draft() -> CampaignDraft {
        CampaignDraft {
            name: "Summer Sale".to_string(),
            description: String::new(),
            subject: "20% off everything".to_string(),
            rules: vec![SegmentRule::new(
                RuleField::TotalSpendings,
                RuleOperator::GreaterThan,
                "1000",
            )],
            message: "Big discounts all month long.".to_string(),
            scheduled_for: None,
        }
    }

    #[test]
    fn valid_draft_produces_coerced_payload() {
        let request = valid_draft().into_request().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["segmentRules"][0]["value"], 1000.0);
        assert_eq!(json["name"], "Summer Sale");
        assert!(json.get("scheduledFor").is_none());
    }

    #[test]
    fn missing_subject_is_rejected() {
        let mut draft = valid_draft();
        draft.subject = String::new();
        assert!(draft.into_request().is_err());
    }

    #[test]
    fn short_message_is_rejected() {
        let mut draft = valid_draft();
        draft.message = "Hi there".to_string();
        assert!(draft.into_request().is_err());
    }

    #[test]
    fn incomplete_rules_are_rejected() {
        let mut draft = valid_draft();
        draft.rules = vec![SegmentRule::new(RuleField::Tags, RuleOperator::Equals, "")];
        assert!(draft.into_request().is_err());

        let mut draft = valid_draft();
        draft.rules.clear();
        assert!(draft.into_request().is_err());
    }

    #[test]
    fn schedule_serializes_when_present() {
        let mut draft = valid_draft();
        draft.scheduled_for = Some("2026-09-01T10:00:00Z".parse().unwrap());
        let json = serde_json::to_value(&draft.into_request().unwrap()).unwrap();
        let scheduled = json["scheduledFor"].as_str().unwrap();
        assert!(scheduled.starts_with("2026-09-01T10:00:00"));
    }
}
