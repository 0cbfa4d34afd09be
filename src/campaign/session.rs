//! Campaign session — a caller-owned value object for resolution results.

use chrono::{DateTime, Utc};

use crate::contacts::{ContactSource, ResolvedContacts};
use crate::model::ContactRecord;

/// Holds one resolution result for an (organization, role) pair.
///
/// Owned by the caller and passed by reference into rendering and
/// dispatch; the core keeps no ambient state between calls.
#[derive(Debug, Clone)]
pub struct CampaignSession {
    pub organization: String,
    pub role: String,
    pub contacts: Vec<ContactRecord>,
    pub source: ContactSource,
    pub resolved_at: DateTime<Utc>,
}

impl CampaignSession {
    pub fn new(
        organization: impl Into<String>,
        role: impl Into<String>,
        resolved: ResolvedContacts,
    ) -> Self {
        Self {
            organization: organization.into(),
            role: role.into(),
            contacts: resolved.contacts,
            source: resolved.source,
            resolved_at: Utc::now(),
        }
    }

    /// Whether the contact list came from the synthetic fallback.
    pub fn is_synthetic(&self) -> bool {
        self.source == ContactSource::Synthetic
    }

    /// Select contacts by index, preserving the given selection order.
    /// Out-of-range indices are ignored.
    pub fn select(&self, indices: &[usize]) -> Vec<ContactRecord> {
        indices
            .iter()
            .filter_map(|&i| self.contacts.get(i).cloned())
            .collect()
    }
}
