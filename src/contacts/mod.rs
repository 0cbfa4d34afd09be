//! Contact discovery — provider-backed with a deterministic synthetic
//! fallback.

pub mod parse;
pub mod provider;
pub mod synthetic;

pub use parse::{ParsedHit, parse_hit_title};
pub use provider::{RawHit, SearchProvider, SerpApiProvider};

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::model::{ContactRecord, EMAIL_UNAVAILABLE};

/// Where a resolved contact list came from. An explicit tag — callers
/// must not have to infer degraded mode from the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSource {
    Provider,
    Synthetic,
}

/// A resolved contact list plus its source tag.
#[derive(Debug, Clone)]
pub struct ResolvedContacts {
    pub contacts: Vec<ContactRecord>,
    pub source: ContactSource,
}

/// Resolves contacts for an organization/role pair.
///
/// Never fails — degrades to [`synthetic::generate`] when no provider is
/// configured, the provider call fails, or it returns nothing usable.
pub struct ContactResolver {
    provider: Option<Arc<dyn SearchProvider>>,
}

impl ContactResolver {
    pub fn new(provider: Option<Arc<dyn SearchProvider>>) -> Self {
        Self { provider }
    }

    /// Resolver with no provider; every resolve is synthetic.
    pub fn without_provider() -> Self {
        Self { provider: None }
    }

    /// Resolve contacts, preserving the provider's ranking order.
    pub async fn resolve(&self, organization: &str, role: &str) -> ResolvedContacts {
        if let Some(provider) = &self.provider {
            let query = format!("{role} at {organization} site:linkedin.com");
            match provider.search(&query).await {
                Ok(hits) => {
                    let contacts = contacts_from_hits(&hits, organization);
                    if !contacts.is_empty() {
                        debug!(count = contacts.len(), "Resolved contacts from provider");
                        return ResolvedContacts {
                            contacts,
                            source: ContactSource::Provider,
                        };
                    }
                    warn!("Provider returned no usable hits; falling back to synthetic contacts");
                }
                Err(e) => {
                    warn!(error = %e, "Provider search failed; falling back to synthetic contacts");
                }
            }
        }

        ResolvedContacts {
            contacts: synthetic::generate(organization, role),
            source: ContactSource::Synthetic,
        }
    }
}

/// Convert raw hits into contact records, preserving hit order.
///
/// Non-profile links and unparseable titles are skipped, never fatal to
/// the batch. Provider hits carry no address, so email is the
/// [`EMAIL_UNAVAILABLE`] sentinel.
fn contacts_from_hits(hits: &[RawHit], organization: &str) -> Vec<ContactRecord> {
    hits.iter()
        .filter(|hit| parse::is_profile_link(&hit.link))
        .filter_map(|hit| match parse_hit_title(&hit.title) {
            ParsedHit::Parsed { name, title } => Some(ContactRecord {
                name,
                title,
                email: EMAIL_UNAVAILABLE.to_string(),
                profile_link: hit.link.clone(),
                organization: organization.to_string(),
                department: "Unknown".to_string(),
            }),
            ParsedHit::Unparseable => {
                debug!(title = %hit.title, "Skipping unparseable hit");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::ProviderError;

    struct StubProvider {
        result: Result<Vec<RawHit>, ProviderError>,
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        async fn search(&self, _query: &str) -> Result<Vec<RawHit>, ProviderError> {
            match &self.result {
                Ok(hits) => Ok(hits.clone()),
                Err(e) => Err(ProviderError::Http(e.to_string())),
            }
        }
    }

    fn hit(title: &str, link: &str) -> RawHit {
        RawHit {
            title: title.into(),
            link: link.into(),
        }
    }

    #[tokio::test]
    async fn no_provider_falls_back_to_synthetic() {
        let resolver = ContactResolver::without_provider();
        let resolved = resolver.resolve("Acme", "Engineer").await;
        assert_eq!(resolved.source, ContactSource::Synthetic);
        assert_eq!(resolved.contacts.len(), 2);
    }

    #[tokio::test]
    async fn provider_error_falls_back_to_synthetic() {
        let provider = Arc::new(StubProvider {
            result: Err(ProviderError::Http("connection refused".into())),
        });
        let resolver = ContactResolver::new(Some(provider));
        let resolved = resolver.resolve("Acme", "Engineer").await;
        assert_eq!(resolved.source, ContactSource::Synthetic);
        assert!(!resolved.contacts.is_empty());
    }

    #[tokio::test]
    async fn empty_provider_result_falls_back_to_synthetic() {
        let provider = Arc::new(StubProvider { result: Ok(vec![]) });
        let resolver = ContactResolver::new(Some(provider));
        let resolved = resolver.resolve("Acme", "Engineer").await;
        assert_eq!(resolved.source, ContactSource::Synthetic);
    }

    #[tokio::test]
    async fn provider_hits_are_parsed_in_order() {
        let provider = Arc::new(StubProvider {
            result: Ok(vec![
                hit("Jane Doe - Recruiter", "https://linkedin.com/in/jane"),
                hit("John Roe", "https://linkedin.com/in/john"),
            ]),
        });
        let resolver = ContactResolver::new(Some(provider));
        let resolved = resolver.resolve("Acme", "Engineer").await;

        assert_eq!(resolved.source, ContactSource::Provider);
        assert_eq!(resolved.contacts.len(), 2);
        assert_eq!(resolved.contacts[0].name, "Jane Doe");
        assert_eq!(resolved.contacts[0].title, "Recruiter");
        assert_eq!(resolved.contacts[1].name, "John Roe");
        assert_eq!(resolved.contacts[1].title, "Unknown");
        assert_eq!(resolved.contacts[0].email, EMAIL_UNAVAILABLE);
        assert_eq!(resolved.contacts[0].organization, "Acme");
    }

    #[tokio::test]
    async fn non_profile_and_unparseable_hits_are_skipped() {
        let provider = Arc::new(StubProvider {
            result: Ok(vec![
                hit("Acme Careers", "https://linkedin.com/company/acme"),
                hit(" - Recruiter", "https://linkedin.com/in/broken"),
                hit("Jane Doe - Recruiter", "https://linkedin.com/in/jane"),
            ]),
        });
        let resolver = ContactResolver::new(Some(provider));
        let resolved = resolver.resolve("Acme", "Engineer").await;

        assert_eq!(resolved.source, ContactSource::Provider);
        assert_eq!(resolved.contacts.len(), 1);
        assert_eq!(resolved.contacts[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn all_hits_unusable_falls_back_to_synthetic() {
        let provider = Arc::new(StubProvider {
            result: Ok(vec![hit("Acme Careers", "https://acme.com/jobs")]),
        });
        let resolver = ContactResolver::new(Some(provider));
        let resolved = resolver.resolve("Acme", "Engineer").await;
        assert_eq!(resolved.source, ContactSource::Synthetic);
    }
}
