//! Campaign domain — the campaign entity as the backend returns it, the
//! server-owned status lifecycle, and the client-side draft that is
//! validated before submission.

pub mod draft;
pub mod model;

pub use draft::{CampaignDraft, CreateCampaignRequest};
pub use model::{Campaign, CampaignAction, CampaignStatus};
