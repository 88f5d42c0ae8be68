//! Typed async client for the CRM backend. Every data operation in the
//! console goes through here; the backend owns all evaluation and
//! persistence.

pub mod auth;
pub mod campaigns;
pub mod client;
pub mod customers;
pub mod orders;

pub use campaigns::{AudienceMember, AudiencePreview};
pub use client::{CrmClient, ListQuery};
