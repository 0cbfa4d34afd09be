//! hr-outreach — contact discovery and throttled outreach campaigns.
//!
//! Resolves contact records for an organization/role pair (pluggable
//! search provider with a deterministic synthetic fallback), renders
//! templated outreach mail per contact, and drives a rate-limited,
//! retry-aware sequential dispatch loop that streams per-contact
//! statuses.

pub mod campaign;
pub mod config;
pub mod contacts;
pub mod error;
pub mod export;
pub mod model;
pub mod template;
