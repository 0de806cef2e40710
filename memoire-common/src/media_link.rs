//! Media-host link extraction
//!
//! The dashboard direct-add flow accepts either a bare asset reference
//! (e.g. `mariage/photo1`) or a full media CDN delivery URL. A URL is
//! reduced to the bare reference by dropping everything up to the
//! `/upload/` segment, any `v<digits>` version segment, the query string
//! and the file extension.

/// Extract the bare asset reference from a link or passthrough input.
///
/// Returns None when the input is empty or a CDN URL without a
/// recognizable `/upload/` segment.
pub fn extract_asset_ref(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if !trimmed.contains("cloudinary.com") {
        // Already a bare reference
        return Some(trimmed.to_string());
    }

    let after_upload = trimmed.find("/upload/").map(|i| &trimmed[i + "/upload/".len()..])?;

    // Drop query string and fragment
    let path = after_upload
        .split(['?', '#'])
        .next()
        .unwrap_or(after_upload);

    // Drop empty and version (`v<digits>`) segments
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && !is_version_segment(s))
        .collect();
    if segments.is_empty() {
        return None;
    }

    let mut asset_ref = segments.join("/");

    // Strip the file extension from the final segment
    if let Some(dot) = asset_ref.rfind('.') {
        if dot > 0 {
            asset_ref.truncate(dot);
        }
    }

    if asset_ref.is_empty() {
        None
    } else {
        Some(asset_ref)
    }
}

/// True for `v1690000000`-style version path segments
fn is_version_segment(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('v') && {
        let rest = chars.as_str();
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
    }
}
