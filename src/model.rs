//! Data model for contact discovery and outreach campaigns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PacingConfig;

/// Sentinel email value for contacts discovered without a usable address.
///
/// Distinct from an empty string: the field is present, there is just no
/// address to send to. Such contacts stay selectable and previewable but
/// are skipped (with a status) at dispatch time.
pub const EMAIL_UNAVAILABLE: &str = "unavailable";

/// A single discovered person with contact/profile fields.
/// Immutable once produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub title: String,
    /// Email address, or [`EMAIL_UNAVAILABLE`] when none was discovered.
    pub email: String,
    /// Profile URL; may be empty.
    pub profile_link: String,
    pub organization: String,
    pub department: String,
}

impl ContactRecord {
    /// Whether this contact has an address the transport can be asked
    /// to deliver to.
    pub fn has_usable_email(&self) -> bool {
        self.email != EMAIL_UNAVAILABLE && self.email.contains('@')
    }
}

/// The sender's own identity fields, all optional.
///
/// Missing fields render as visibly distinct placeholders (see
/// [`crate::template`]) so unfilled sections are noticed before a
/// message goes out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenderProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_link: Option<String>,
    pub years_experience: Option<u32>,
    pub skills: Option<String>,
    pub achievement: Option<String>,
    /// Subject template; `{role}` and `{company}` are substituted.
    pub subject_template: Option<String>,
    /// Up to two "reason for interest" lines used as bullets in the body.
    pub reasons: Vec<String>,
}

/// One dispatch run over a fixed, ordered set of selected contacts.
///
/// Logically frozen once dispatch begins — the dispatcher takes
/// ownership, so later selection changes cannot affect a running
/// campaign.
#[derive(Debug, Clone)]
pub struct CampaignRequest {
    pub id: Uuid,
    pub organization: String,
    pub role: String,
    /// Selected contacts in selection order. Dispatch preserves this order.
    pub contacts: Vec<ContactRecord>,
    pub sender: SenderProfile,
    pub pacing: PacingConfig,
    pub started_at: DateTime<Utc>,
}

impl CampaignRequest {
    pub fn new(
        organization: impl Into<String>,
        role: impl Into<String>,
        contacts: Vec<ContactRecord>,
        sender: SenderProfile,
        pacing: PacingConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization: organization.into(),
            role: role.into(),
            contacts,
            sender,
            pacing,
            started_at: Utc::now(),
        }
    }
}

/// Rendered outreach message for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// Terminal outcome for a single contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The transport accepted the message.
    Sent,
    /// No transport call was made (no usable address, abort, or cancel).
    Skipped { reason: String },
    /// The transport rejected the message, retries exhausted if transient.
    Failed { reason: String },
}

impl DispatchOutcome {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Per-contact status event, emitted in dispatch order.
/// Every selected contact yields exactly one of these.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchStatus {
    pub contact: ContactRecord,
    /// Transport attempts made for this contact (0 for skips).
    pub attempt_count: u32,
    pub outcome: DispatchOutcome,
    pub timestamp: DateTime<Utc>,
}

/// Terminal outcome for a whole campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CampaignOutcome {
    /// Every contact was processed.
    Completed,
    /// A permanent transport error ended the run early.
    Aborted { reason: String },
    /// The caller cancelled between contacts.
    Cancelled,
}

/// Event on the live dispatch stream: one `Status` per contact in
/// selection order, then exactly one `Finished`.
#[derive(Debug, Clone, Serialize)]
pub enum CampaignEvent {
    Status(DispatchStatus),
    Finished(CampaignOutcome),
}
