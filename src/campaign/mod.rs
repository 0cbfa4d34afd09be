//! Campaign dispatch — transport seam, pacing, session, and the
//! sequential dispatch loop.

pub mod dispatcher;
pub mod pacing;
pub mod session;
pub mod transport;

pub use dispatcher::{CampaignDispatcher, CampaignStream, CancelHandle};
pub use pacing::Pacer;
pub use session::CampaignSession;
pub use transport::{MailTransport, SmtpMailTransport};
