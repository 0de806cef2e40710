//! Video link extraction
//!
//! Accepts a bare 11-character video token or the common hosted-video URL
//! shapes (short link, watch, embed, shorts) and extracts the token.
//! Anything else is rejected. Pure string parsing, no network.

/// Length of a hosted-video token
pub const VIDEO_ID_LEN: usize = 11;

/// True when `s` is exactly an 11-character `[A-Za-z0-9_-]` token
pub fn is_valid_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Extract a video token from a URL or bare token input.
///
/// Recognized forms:
/// - bare token: `dQw4w9WgXcQ`
/// - short link: `https://youtu.be/<token>`
/// - long link: `youtube.com/watch?v=<token>`, `/embed/<token>`,
///   `/shorts/<token>`
///
/// Returns None for anything else.
pub fn extract_video_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Already a bare token
    if is_valid_video_id(trimmed) {
        return Some(trimmed.to_string());
    }

    // Short-link form: youtu.be/<token>
    if let Some(idx) = trimmed.find("youtu.be/") {
        return token_at(trimmed, idx + "youtu.be/".len());
    }

    // Long-link forms require the youtube.com host
    let rest = match trimmed.find("youtube.com/") {
        Some(idx) => &trimmed[idx + "youtube.com/".len()..],
        None => return None,
    };

    if let Some(idx) = rest.find("embed/") {
        return token_at(rest, idx + "embed/".len());
    }
    if let Some(idx) = rest.find("shorts/") {
        return token_at(rest, idx + "shorts/".len());
    }

    // watch?v=<token> query parameter
    if let Some(q) = rest.find('?') {
        for param in rest[q + 1..].split('&') {
            if let Some(value) = param.strip_prefix("v=") {
                if is_valid_video_id(value) {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

/// Take an 11-character token starting at `start`, if present and valid.
/// The character after the token must be absent or a delimiter; a longer
/// run of token characters is not a token with a suffix, it is a
/// different id.
fn token_at(s: &str, start: usize) -> Option<String> {
    let candidate = s.get(start..start + VIDEO_ID_LEN)?;
    if !is_valid_video_id(candidate) {
        return None;
    }
    match s[start + VIDEO_ID_LEN..].chars().next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '-' => None,
        _ => Some(candidate.to_string()),
    }
}
