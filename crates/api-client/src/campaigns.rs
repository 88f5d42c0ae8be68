//! Campaign endpoints: CRUD, audience preview, AI message drafting, send.

use crate::client::{CrmClient, ListQuery};
use crm_campaigns::{Campaign, CreateCampaignRequest};
use crm_core::types::{Envelope, ListPage};
use crm_core::{CrmError, CrmResult};
use crm_segmentation::SegmentRuleSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

// ─── Preview ───────────────────────────────────────────────────────────────

/// Server-computed audience for a rule sequence: an authoritative count
/// plus a small sample of matching customers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudiencePreview {
    pub count: u64,
    pub sample: Vec<AudienceMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Extracts a preview from the raw response body. The backend wraps the
/// payload in `{data: {count, audience}}`; an empty or malformed body
/// degrades to zero matches rather than an error, and the sample is
/// truncated to `sample_size`.
pub(crate) fn parse_preview(body: &serde_json::Value, sample_size: usize) -> AudiencePreview {
    let data = body.get("data").unwrap_or(body);
    let count = data.get("count").and_then(|c| c.as_u64()).unwrap_or(0);
    let mut sample: Vec<AudienceMember> = data
        .get("audience")
        .and_then(|a| a.as_array())
        .map(|members| {
            members
                .iter()
                .filter_map(|m| serde_json::from_value(m.clone()).ok())
                .collect()
        })
        .unwrap_or_default();
    sample.truncate(sample_size);
    AudiencePreview { count, sample }
}

// ─── Wire bodies ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRequest<'a> {
    segment_rules: &'a SegmentRuleSet,
}

#[derive(Serialize)]
struct GenerateMessageRequest<'a> {
    prompt: &'a str,
    audience: &'a str,
}

/// The message may arrive bare (`{message}`) or wrapped
/// (`{success, data: {message}}`) depending on backend version.
pub(crate) fn parse_generated_message(body: &serde_json::Value) -> Option<String> {
    let data = body.get("data").unwrap_or(body);
    data.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(String::from)
}

impl CrmClient {
    pub async fn list_campaigns(&self, query: &ListQuery) -> CrmResult<ListPage<Campaign>> {
        self.get("/campaigns", &query.params()).await
    }

    pub async fn get_campaign(&self, id: &str) -> CrmResult<Campaign> {
        let envelope: Envelope<Campaign> = self.get(&format!("/campaigns/{id}"), &[]).await?;
        Ok(envelope.data)
    }

    pub async fn create_campaign(&self, request: &CreateCampaignRequest) -> CrmResult<Campaign> {
        let envelope: Envelope<Campaign> = self.post("/campaigns", request).await?;
        Ok(envelope.data)
    }

    pub async fn delete_campaign(&self, id: &str) -> CrmResult<()> {
        self.delete(&format!("/campaigns/{id}")).await
    }

    /// `POST /campaigns/preview-audience` — live count and sample for the
    /// current rule sequence. Malformed responses — including an empty or
    /// non-JSON 200 body — are treated as zero matches; already-entered
    /// rules are never affected by a failure here.
    pub async fn preview_audience(
        &self,
        rules: &SegmentRuleSet,
        sample_size: usize,
    ) -> CrmResult<AudiencePreview> {
        let body = self
            .post_lenient("/campaigns/preview-audience", &PreviewRequest { segment_rules: rules })
            .await?;
        let preview = parse_preview(&body, sample_size);
        if preview.count == 0 && preview.sample.is_empty() && body.get("data").is_none() {
            warn!("preview response had no data payload; treating as zero matches");
        }
        Ok(preview)
    }

    /// `POST /campaigns/generate-message` — AI-assisted draft from a prompt
    /// and a plain-language audience description.
    pub async fn generate_message(&self, prompt: &str, audience: &str) -> CrmResult<String> {
        let body: serde_json::Value = self
            .post(
                "/campaigns/generate-message",
                &GenerateMessageRequest { prompt, audience },
            )
            .await?;
        parse_generated_message(&body).ok_or_else(|| CrmError::Api {
            status: 200,
            message: "message generation returned no content".to_string(),
        })
    }

    /// `POST /campaigns/:id/send` — returns the updated record with
    /// delivery and failure counts.
    pub async fn send_campaign(&self, id: &str) -> CrmResult<Campaign> {
        let envelope: Envelope<Campaign> = self
            .post(&format!("/campaigns/{id}/send"), &serde_json::json!({}))
            .await?;
        Ok(envelope.data)
    }
}
