//! Pure conversion from source-specific raw records into canonical [`Job`]s.
//!
//! No I/O happens here; every adapter funnels its parsed payload through
//! [`normalize`] so id derivation and field cleanup live in one place.

use sha2::{Digest, Sha256};

use crate::domain::models::{Job, SourceKind, LOCATION_FALLBACK};

/// Source-shaped record before normalization. Adapters fill whatever their
/// origin actually provides and leave the rest `None`.
#[derive(Debug, Clone, Default)]
pub struct RawJob {
    /// Native identifier from the origin (listing GUID, card data-id, ...).
    pub native_id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub link: Option<String>,
    pub posted_time: Option<String>,
    pub description: Option<String>,
}

/// Convert a raw record into a [`Job`], substituting defaults for missing
/// optional fields. Returns `None` when title or company is empty after
/// cleanup; such records cannot be deduplicated meaningfully.
pub fn normalize(raw: RawJob, source: SourceKind) -> Option<Job> {
    let title = clean_text(&raw.title);
    let company = clean_text(&raw.company);
    if title.is_empty() || company.is_empty() {
        return None;
    }

    let location = raw
        .location
        .as_deref()
        .map(clean_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| LOCATION_FALLBACK.to_string());

    let id = derive_id(raw.native_id.as_deref(), &title, &company, source);

    Some(Job {
        id,
        title,
        company,
        location,
        link: raw.link.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        posted_time: raw
            .posted_time
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        source,
        description: raw
            .description
            .as_deref()
            .map(clean_text)
            .filter(|s| !s.is_empty()),
    })
}

/// Deduplication-key derivation. Precedence:
/// 1. native identifier, prefixed with the source tag;
/// 2. composite of title+company slug plus a short hash over
///    `title|company|source` as disambiguator.
///
/// The dedup invariant rests entirely on this function staying stable for
/// the same real-world posting.
pub fn derive_id(native_id: Option<&str>, title: &str, company: &str, source: SourceKind) -> String {
    if let Some(native) = native_id.map(str::trim).filter(|s| !s.is_empty()) {
        return format!("{}-{}", source.as_str(), native);
    }
    let fingerprint = format!("{}|{}|{}", title, company, source.as_str());
    let digest = Sha256::digest(fingerprint.as_bytes());
    format!(
        "{}-{}-{}",
        slugify(title),
        slugify(company),
        &hex::encode(digest)[..8]
    )
}

/// Strip markup-like angle-bracket fragments and collapse whitespace.
pub fn clean_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_dash = true;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
