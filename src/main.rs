use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;

use hr_outreach::campaign::{CampaignDispatcher, CampaignSession, CancelHandle, SmtpMailTransport};
use hr_outreach::config::{PacingConfig, RetryConfig, SerpApiConfig, SmtpConfig};
use hr_outreach::contacts::{ContactResolver, SearchProvider, SerpApiProvider};
use hr_outreach::model::{CampaignEvent, CampaignRequest, DispatchOutcome, SenderProfile};
use hr_outreach::export;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let organization = args.next().unwrap_or_else(|| "Google".to_string());
    let role = args.next().unwrap_or_else(|| "Software Engineer".to_string());

    eprintln!("📨 hr-outreach v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Organization: {organization}");
    eprintln!("   Role: {role}");

    // ── Resolve contacts ────────────────────────────────────────────────
    let provider = SerpApiConfig::from_env()
        .map(|config| Arc::new(SerpApiProvider::new(config)) as Arc<dyn SearchProvider>);
    if provider.is_none() {
        eprintln!("   SERPAPI_KEY not set — using synthetic contacts");
    }

    let resolver = ContactResolver::new(provider);
    let resolved = resolver.resolve(&organization, &role).await;
    let session = CampaignSession::new(&organization, &role, resolved);

    eprintln!(
        "   Found {} contacts at {} ({})\n",
        session.contacts.len(),
        organization,
        if session.is_synthetic() { "synthetic" } else { "provider" },
    );
    for (index, contact) in session.contacts.iter().enumerate() {
        eprintln!(
            "   {index}. {} — {} <{}>",
            contact.name, contact.title, contact.email
        );
    }

    // ── Export ──────────────────────────────────────────────────────────
    let export_dir = std::env::var("OUTREACH_EXPORT_DIR").unwrap_or_else(|_| ".".to_string());
    let export_path = export::export_contacts(
        Path::new(&export_dir),
        &organization,
        &session.contacts,
        Utc::now().date_naive(),
    )?;
    eprintln!("\n   Exported: {}", export_path.display());

    // ── Dispatch (opt-in) ───────────────────────────────────────────────
    let Some(smtp_config) = SmtpConfig::from_env() else {
        eprintln!("   EMAIL_ADDRESS not set — preview only, no emails sent");
        return Ok(());
    };
    if std::env::var("OUTREACH_SEND").as_deref() != Ok("1") {
        eprintln!("   Set OUTREACH_SEND=1 to dispatch the campaign");
        return Ok(());
    }

    // Default selection: the first two contacts, like the preview flow.
    let indices = selected_indices(session.contacts.len());
    let selected = session.select(&indices);
    eprintln!("   Dispatching to {} selected contacts\n", selected.len());

    let pacing = pacing_from_env();
    let request = CampaignRequest::new(
        organization,
        role,
        selected,
        sender_profile_from_env(),
        pacing,
    );

    let cancel = CancelHandle::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("   Cancelling after the in-flight send...");
                cancel.cancel();
            }
        });
    }

    let dispatcher = CampaignDispatcher::new(RetryConfig::default());
    let transport = Arc::new(SmtpMailTransport::new(smtp_config));
    let mut stream = dispatcher.run(request, transport, cancel)?;

    while let Some(event) = stream.next().await {
        match event {
            CampaignEvent::Status(status) => {
                let detail = match &status.outcome {
                    DispatchOutcome::Sent => format!("attempts: {}", status.attempt_count),
                    DispatchOutcome::Skipped { reason } | DispatchOutcome::Failed { reason } => {
                        reason.clone()
                    }
                };
                eprintln!(
                    "   {} <{}>: {} ({detail})",
                    status.contact.name,
                    status.contact.email,
                    status.outcome.label(),
                );
            }
            CampaignEvent::Finished(outcome) => {
                eprintln!("\n🎉 Campaign finished: {outcome:?}");
            }
        }
    }

    Ok(())
}

/// Selected contact indices from `OUTREACH_SELECT` (comma-separated),
/// defaulting to the first two contacts.
fn selected_indices(contact_count: usize) -> Vec<usize> {
    match std::env::var("OUTREACH_SELECT") {
        Ok(raw) => raw
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect(),
        Err(_) => (0..contact_count.min(2)).collect(),
    }
}

fn pacing_from_env() -> PacingConfig {
    let mut pacing = PacingConfig::default();
    if let Some(max) = std::env::var("OUTREACH_MAX_PER_DAY")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        pacing.max_per_window = max;
    }
    if let Some(secs) = std::env::var("OUTREACH_SEND_GAP_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        pacing.inter_send_delay = std::time::Duration::from_secs(secs);
    }
    pacing
}

fn sender_profile_from_env() -> SenderProfile {
    let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    let reasons: Vec<String> = [var("SENDER_REASON_1"), var("SENDER_REASON_2")]
        .into_iter()
        .flatten()
        .collect();

    SenderProfile {
        name: var("SENDER_NAME"),
        title: var("SENDER_TITLE"),
        email: var("SENDER_EMAIL").or_else(|| var("EMAIL_ADDRESS")),
        phone: var("SENDER_PHONE"),
        profile_link: var("SENDER_LINKEDIN"),
        years_experience: var("SENDER_YEARS").and_then(|s| s.parse().ok()),
        skills: var("SENDER_SKILLS"),
        achievement: var("SENDER_ACHIEVEMENT"),
        subject_template: var("SENDER_SUBJECT"),
        reasons,
    }
}
