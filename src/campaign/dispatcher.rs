//! Campaign dispatcher — a single sequential worker that drives the
//! throttled, retry-aware send loop and streams per-contact statuses.
//!
//! Ordering is a correctness requirement: statuses are emitted in exactly
//! the contact-selection order, a retried contact keeps its slot, and
//! every selected contact yields exactly one terminal status on every
//! path (completion, abort, cancellation).

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use futures::Stream;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};

use crate::campaign::pacing::Pacer;
use crate::campaign::transport::MailTransport;
use crate::config::RetryConfig;
use crate::error::{ConfigError, SendError};
use crate::model::{
    CampaignEvent, CampaignOutcome, CampaignRequest, ContactRecord, DispatchOutcome,
    DispatchStatus, RenderedMessage,
};
use crate::template;

/// Live stream of campaign events: one `Status` per contact in selection
/// order, then exactly one `Finished`.
pub type CampaignStream = Pin<Box<dyn Stream<Item = CampaignEvent> + Send>>;

/// Skip reason for contacts without a sendable address.
pub const SKIP_NO_ADDRESS: &str = "no usable address";
/// Skip reason for contacts after a permanent transport failure.
pub const SKIP_ABORTED: &str = "campaign aborted";
/// Skip reason for contacts after a cancellation request.
pub const SKIP_CANCELLED: &str = "cancelled before send";

/// Cooperative cancellation handle, checked between contacts. An
/// in-flight send is allowed to finish.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs campaigns: validates pacing, then processes the selected
/// contacts sequentially against a mail transport.
pub struct CampaignDispatcher {
    retry: RetryConfig,
}

impl CampaignDispatcher {
    pub fn new(retry: RetryConfig) -> Self {
        Self { retry }
    }

    /// Validate pacing and start the dispatch worker.
    ///
    /// Configuration errors fail the whole campaign here, before any
    /// send. On success the request is frozen — the worker owns it, so
    /// later caller-side selection changes cannot affect the run.
    pub fn run(
        &self,
        request: CampaignRequest,
        transport: Arc<dyn MailTransport>,
        cancel: CancelHandle,
    ) -> Result<CampaignStream, ConfigError> {
        request.pacing.validate()?;

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let retry = self.retry.clone();

        tokio::spawn(async move {
            let outcome = dispatch_loop(&request, transport.as_ref(), &cancel, &retry, &tx).await;
            info!(campaign = %request.id, outcome = ?outcome, "Campaign finished");
            let _ = tx.send(CampaignEvent::Finished(outcome));
        });

        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }
}

async fn dispatch_loop(
    request: &CampaignRequest,
    transport: &dyn MailTransport,
    cancel: &CancelHandle,
    retry: &RetryConfig,
    tx: &tokio::sync::mpsc::UnboundedSender<CampaignEvent>,
) -> CampaignOutcome {
    info!(
        campaign = %request.id,
        organization = %request.organization,
        role = %request.role,
        contacts = request.contacts.len(),
        "Starting campaign dispatch"
    );

    let mut pacer = Pacer::new(request.pacing.clone());

    for (index, contact) in request.contacts.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(campaign = %request.id, "Cancellation requested; stopping before next send");
            drain_remaining(&request.contacts[index..], SKIP_CANCELLED, tx);
            return CampaignOutcome::Cancelled;
        }

        // Expected steady-state case, not an error: no transport call,
        // no pacing cost.
        if !contact.has_usable_email() {
            emit(tx, contact, 0, DispatchOutcome::Skipped { reason: SKIP_NO_ADDRESS.into() });
            continue;
        }

        // Pacing delay sits after the previous status went out and
        // before this contact's attempt, so it never blocks delivery of
        // already-completed statuses.
        let delay = pacer.delay_until_allowed(Utc::now());
        if !delay.is_zero() {
            debug!(campaign = %request.id, ?delay, "Pacing delay before next send");
            tokio::time::sleep(delay).await;
        }

        let message = template::render(contact, &request.role, &request.sender);
        pacer.record_send(Utc::now());

        match attempt_send(transport, contact, &message, retry).await {
            SendResult::Sent { attempts } => {
                emit(tx, contact, attempts, DispatchOutcome::Sent);
            }
            SendResult::RetriesExhausted { attempts, reason } => {
                emit(tx, contact, attempts, DispatchOutcome::Failed { reason });
            }
            SendResult::Permanent { attempts, reason } => {
                // A bad credential fails every later send identically;
                // stop here but leave no contact unreported.
                warn!(
                    campaign = %request.id,
                    error = %reason,
                    "Permanent transport failure; aborting remaining campaign"
                );
                emit(tx, contact, attempts, DispatchOutcome::Failed { reason: reason.clone() });
                drain_remaining(&request.contacts[index + 1..], SKIP_ABORTED, tx);
                return CampaignOutcome::Aborted { reason };
            }
        }
    }

    CampaignOutcome::Completed
}

enum SendResult {
    Sent { attempts: u32 },
    RetriesExhausted { attempts: u32, reason: String },
    Permanent { attempts: u32, reason: String },
}

/// Call the transport, retrying transient failures with doubling backoff
/// up to the configured attempt bound.
async fn attempt_send(
    transport: &dyn MailTransport,
    contact: &ContactRecord,
    message: &RenderedMessage,
    retry: &RetryConfig,
) -> SendResult {
    let max_attempts = retry.max_attempts.max(1);
    let mut backoff = retry.backoff;
    let mut last_reason = String::new();

    for attempt in 1..=max_attempts {
        match transport
            .send(&contact.email, &message.subject, &message.body)
            .await
        {
            Ok(()) => return SendResult::Sent { attempts: attempt },
            Err(SendError::Permanent(reason)) => {
                return SendResult::Permanent {
                    attempts: attempt,
                    reason,
                };
            }
            Err(SendError::Transient(reason)) => {
                warn!(
                    to = %contact.email,
                    attempt,
                    max_attempts,
                    error = %reason,
                    "Transient send failure"
                );
                last_reason = reason;
                if attempt < max_attempts {
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
            }
        }
    }

    SendResult::RetriesExhausted {
        attempts: max_attempts,
        reason: last_reason,
    }
}

/// Emit one explicit `Skipped` status per not-yet-attempted contact so a
/// terminated campaign leaves nothing perpetually pending.
fn drain_remaining(
    contacts: &[ContactRecord],
    reason: &str,
    tx: &tokio::sync::mpsc::UnboundedSender<CampaignEvent>,
) {
    for contact in contacts {
        emit(tx, contact, 0, DispatchOutcome::Skipped { reason: reason.into() });
    }
}

fn emit(
    tx: &tokio::sync::mpsc::UnboundedSender<CampaignEvent>,
    contact: &ContactRecord,
    attempt_count: u32,
    outcome: DispatchOutcome,
) {
    debug!(contact = %contact.name, outcome = outcome.label(), "Dispatch status");
    // A dropped receiver must not stop the campaign mid-send.
    let _ = tx.send(CampaignEvent::Status(DispatchStatus {
        contact: contact.clone(),
        attempt_count,
        outcome,
        timestamp: Utc::now(),
    }));
}
