//! Parsing raw search hits into name/title pairs.

/// Result of parsing a `"Name - Title"` hit title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedHit {
    Parsed { name: String, title: String },
    Unparseable,
}

/// Parse a search-result title of the form `"Name - Title"`.
///
/// Splits on the first `" - "`. A missing separator yields the whole
/// string as the name with title `"Unknown"`. An empty name is
/// unparseable — the caller skips such hits rather than failing the batch.
pub fn parse_hit_title(raw: &str) -> ParsedHit {
    let (name, title) = match raw.split_once(" - ") {
        Some((name, title)) => (name.trim(), title.trim()),
        None => (raw.trim(), ""),
    };

    if name.is_empty() {
        return ParsedHit::Unparseable;
    }

    let title = if title.is_empty() { "Unknown" } else { title };

    ParsedHit::Parsed {
        name: name.to_string(),
        title: title.to_string(),
    }
}

/// Whether a hit link points at an individual profile page.
pub fn is_profile_link(link: &str) -> bool {
    link.contains("linkedin.com/in")
}
