//! Outreach message rendering.
//!
//! Pure string assembly — no I/O, never fails. Missing sender fields
//! render their documented placeholder so unfilled sections are visible
//! in a preview instead of silently disappearing.

use crate::model::{ContactRecord, RenderedMessage, SenderProfile};

/// Default subject when the sender did not override it; `{role}` and
/// `{company}` are substituted before returning.
pub const DEFAULT_SUBJECT_TEMPLATE: &str = "Application for {role} at {company}";

/// Greeting used when the contact has no name.
pub const FALLBACK_GREETING: &str = "Hiring Manager";

/// Organization shown when the contact record carries none.
pub const FALLBACK_ORGANIZATION: &str = "your target company";

pub const PLACEHOLDER_NAME: &str = "[Your Name]";
pub const PLACEHOLDER_TITLE: &str = "[Your Profession]";
pub const PLACEHOLDER_YEARS: &str = "[X]";
pub const PLACEHOLDER_SKILLS: &str = "[relevant skills]";
pub const PLACEHOLDER_ACHIEVEMENT: &str = "[key achievement]";
pub const PLACEHOLDER_REASON_1: &str = "[Reason 1]";
pub const PLACEHOLDER_REASON_2: &str = "[Reason 2]";
pub const PLACEHOLDER_EMAIL: &str = "[your.email@example.com]";
pub const PLACEHOLDER_PHONE: &str = "[+1 (XXX) XXX-XXXX]";
pub const PLACEHOLDER_PROFILE_LINK: &str = "[linkedin.com/in/yourprofile]";

/// Render the outreach message for one contact.
pub fn render(contact: &ContactRecord, role: &str, sender: &SenderProfile) -> RenderedMessage {
    let organization = if contact.organization.is_empty() {
        FALLBACK_ORGANIZATION
    } else {
        contact.organization.as_str()
    };

    let subject = sender
        .subject_template
        .as_deref()
        .unwrap_or(DEFAULT_SUBJECT_TEMPLATE)
        .replace("{role}", role)
        .replace("{company}", organization)
        .replace("{organization}", organization);

    let greeting = if contact.name.is_empty() {
        FALLBACK_GREETING
    } else {
        contact.name.as_str()
    };

    let title = sender.title.as_deref().unwrap_or(PLACEHOLDER_TITLE);
    let years = sender
        .years_experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| PLACEHOLDER_YEARS.to_string());
    let skills = sender.skills.as_deref().unwrap_or(PLACEHOLDER_SKILLS);
    let achievement = sender
        .achievement
        .as_deref()
        .unwrap_or(PLACEHOLDER_ACHIEVEMENT);
    let reason_1 = sender
        .reasons
        .first()
        .map(String::as_str)
        .unwrap_or(PLACEHOLDER_REASON_1);
    let reason_2 = sender
        .reasons
        .get(1)
        .map(String::as_str)
        .unwrap_or(PLACEHOLDER_REASON_2);
    let name = sender.name.as_deref().unwrap_or(PLACEHOLDER_NAME);
    let email = sender.email.as_deref().unwrap_or(PLACEHOLDER_EMAIL);
    let phone = sender.phone.as_deref().unwrap_or(PLACEHOLDER_PHONE);
    let profile_link = sender
        .profile_link
        .as_deref()
        .unwrap_or(PLACEHOLDER_PROFILE_LINK);

    let body = format!(
        "Dear {greeting},\n\
         \n\
         I hope this message finds you well. I'm writing to express my enthusiasm \
         for the {role} position at {organization}.\n\
         \n\
         As a {title} with {years} years of experience in {skills}, \
         I've successfully {achievement}.\n\
         \n\
         What excites me about {organization}:\n\
         - {reason_1}\n\
         - {reason_2}\n\
         \n\
         I've attached my resume and would welcome the opportunity to discuss how \
         I could contribute to your team. Please let me know if we might schedule \
         a conversation.\n\
         \n\
         Best regards,\n\
         {name}\n\
         {email}\n\
         Phone: {phone}\n\
         LinkedIn: {profile_link}\n"
    );

    RenderedMessage { subject, body }
}
