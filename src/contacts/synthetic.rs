//! Deterministic synthetic contact generation.
//!
//! This is the documented degraded mode of the resolver, used when no
//! search provider is configured, the provider call fails, or it returns
//! nothing usable. Same (organization, role) inputs produce byte-identical
//! output, so callers and tests work without network access.

use crate::model::ContactRecord;

/// Known corporate mail domains; everything else maps to `example.com`.
fn domain_for(organization: &str) -> &'static str {
    match organization {
        "Google" => "google.com",
        "Microsoft" => "microsoft.com",
        "Amazon" => "amazon.com",
        "Apple" => "apple.com",
        "Meta" => "fb.com",
        _ => "example.com",
    }
}

/// Generate plausible contacts for (organization, role).
///
/// Fixed order: the role-specific recruiter first, the generalist HR
/// business partner second.
pub fn generate(organization: &str, role: &str) -> Vec<ContactRecord> {
    let domain = domain_for(organization);
    let org_key: String = organization.to_lowercase().replace(' ', "");
    let first_word = organization.split_whitespace().next().unwrap_or(organization);
    let last_word = organization.split_whitespace().last().unwrap_or(organization);
    let role_word = role.split_whitespace().next().unwrap_or(role);

    vec![
        ContactRecord {
            name: format!("Sarah {first_word}ski"),
            title: format!("Senior {role_word} Recruiter"),
            email: format!("sarah.recruiting@{domain}"),
            profile_link: format!("https://linkedin.com/in/sarah-{org_key}-recruiter"),
            organization: organization.to_string(),
            department: "Talent Acquisition".to_string(),
        },
        ContactRecord {
            name: format!("David {last_word}son"),
            title: "HR Business Partner".to_string(),
            email: format!("david.hr@{domain}"),
            profile_link: format!("https://linkedin.com/in/david-{org_key}-hr"),
            organization: organization.to_string(),
            department: "Human Resources".to_string(),
        },
    ]
}
