//! Campaign entity and status lifecycle.

use chrono::{DateTime, Utc};
use crm_segmentation::SegmentRule;
use serde::{Deserialize, Serialize};

// ─── Campaign ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub segment_rules: Vec<SegmentRule>,
    #[serde(default)]
    pub message: String,
    pub status: CampaignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    /// Audience size at send time, reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Campaign {
    pub fn allowed_actions(&self) -> Vec<CampaignAction> {
        self.status.allowed_actions()
    }
}

/// Server-owned lifecycle state. The client only reflects it; transitions
/// happen on the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sent,
    Failed,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Scheduled => "scheduled",
            CampaignStatus::Sent => "sent",
            CampaignStatus::Failed => "failed",
        }
    }

    /// Actions the interface may offer for a campaign in this state.
    pub fn allowed_actions(self) -> Vec<CampaignAction> {
        match self {
            CampaignStatus::Draft => vec![
                CampaignAction::Send,
                CampaignAction::Edit,
                CampaignAction::Delete,
            ],
            CampaignStatus::Scheduled => vec![CampaignAction::Delete],
            CampaignStatus::Sent => vec![],
            CampaignStatus::Failed => vec![CampaignAction::Delete],
        }
    }

    pub fn can_send(self) -> bool {
        self.allowed_actions().contains(&CampaignAction::Send)
    }

    pub fn can_edit(self) -> bool {
        self.allowed_actions().contains(&CampaignAction::Edit)
    }

    pub fn can_delete(self) -> bool {
        self.allowed_actions().contains(&CampaignAction::Delete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignAction {
    Send,
    Edit,
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CampaignStatus::Scheduled).unwrap(),
            "\"scheduled\""
        );
        let status: CampaignStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(status, CampaignStatus::Failed);
    }

    #[test]
    fn draft_allows_send_edit_delete() {
        let actions = CampaignStatus::Draft.allowed_actions();
        assert!(actions.contains(&CampaignAction::Send));
        assert!(actions.contains(&CampaignAction::Edit));
        assert!(actions.contains(&CampaignAction::Delete));
    }

    #[test]
    fn sent_campaign_is_read_only() {
        let status = CampaignStatus::Sent;
        assert!(!status.can_send());
        assert!(!status.can_edit());
        assert!(!status.can_delete());
    }

    #[test]
    fn campaign_deserializes_backend_shape() {
        let json = r#"{
            "_id": "c1",
            "name": "Summer Sale",
            "subject": "20% off",
            "segmentRules": [
                {"field": "totalSpendings", "operator": "greaterThan", "value": 1000}
            ],
            "message": "Hello!",
            "status": "sent",
            "sentAt": "2026-06-01T12:00:00Z",
            "targetAudience": 42,
            "delivered": 40,
            "failed": 2
        }"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.status, CampaignStatus::Sent);
        assert_eq!(campaign.segment_rules.len(), 1);
        assert_eq!(campaign.delivered, Some(40));
        assert!(campaign.allowed_actions().is_empty());
    }
}
