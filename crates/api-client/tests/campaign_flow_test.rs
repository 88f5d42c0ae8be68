//! Wire-contract test for the campaign creation flow: draft → validated
//! payload → backend response shapes. No network; exercises the exact
//! JSON the backend expects and returns.

use crm_campaigns::{Campaign, CampaignDraft, CampaignStatus};
use crm_core::types::ListPage;
use crm_segmentation::{LogicOperator, RuleField, RuleOperator, SegmentRule};

fn sample_draft() -> CampaignDraft {
    CampaignDraft {
        name: "Win-back Q3".to_string(),
        description: "Lapsed high spenders".to_string(),
        subject: "We miss you".to_string(),
        rules: vec![
            SegmentRule::new(RuleField::TotalSpendings, RuleOperator::GreaterThan, "1000"),
            SegmentRule {
                logic_operator: Some(LogicOperator::Or),
                ..SegmentRule::new(RuleField::Tags, RuleOperator::Contains, "vip")
            },
        ],
        message: "Come back for an exclusive offer.".to_string(),
        scheduled_for: None,
    }
}

#[test]
fn create_payload_matches_backend_contract() {
    let request = sample_draft().into_request().unwrap();
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["name"], "Win-back Q3");
    assert_eq!(json["subject"], "We miss you");

    let rules = json["segmentRules"].as_array().unwrap();
    assert_eq!(rules.len(), 2);
    // Order preserved, numeric value coerced, first rule has no combinator.
    assert_eq!(rules[0]["field"], "totalSpendings");
    assert_eq!(rules[0]["operator"], "greaterThan");
    assert_eq!(rules[0]["value"], 1000.0);
    assert!(rules[0].get("logicOperator").is_none());
    assert_eq!(rules[1]["logicOperator"], "OR");
}

#[test]
fn campaign_list_page_round_trips() {
    let body = r#"{
        "success": true,
        "data": [
            {"_id": "c1", "name": "A", "message": "hello world", "status": "draft",
             "segmentRules": [{"field": "location", "operator": "equals", "value": "Berlin"}]},
            {"_id": "c2", "name": "B", "message": "hi", "status": "sent",
             "sentAt": "2026-07-01T09:00:00Z", "targetAudience": 20,
             "delivered": 18, "failed": 2}
        ],
        "count": 23,
        "pagination": {"page": 1, "pages": 3, "total": 23}
    }"#;
    let page: ListPage<Campaign> = serde_json::from_str(body).unwrap();
    assert_eq!(page.pagination.pages, 3);
    assert_eq!(page.count, Some(23));

    let draft = &page.data[0];
    assert!(draft.status.can_send());
    let sent = &page.data[1];
    assert_eq!(sent.status, CampaignStatus::Sent);
    assert!(!sent.status.can_send());
    assert_eq!(sent.delivered, Some(18));
}

#[test]
fn draft_round_trips_through_toml() {
    let raw = r#"
        name = "Summer Sale"
        subject = "20% off"
        message = "Everything is discounted."

        [[rules]]
        field = "totalSpendings"
        operator = "greaterThan"
        value = "500"

        [[rules]]
        field = "location"
        operator = "startsWith"
        value = "New"
        logicOperator = "OR"
    "#;
    let draft: CampaignDraft = toml::from_str(raw).unwrap();
    let request = draft.into_request().unwrap();
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["segmentRules"][0]["value"], 500.0);
    assert_eq!(json["segmentRules"][1]["logicOperator"], "OR");
}
