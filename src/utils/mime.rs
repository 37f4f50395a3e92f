//! MIME utilities for file uploads

const FALLBACK_MIME: &str = "application/octet-stream";

/// MIME type to send for `file_name`: the explicit type when given, otherwise
/// a guess from the extension.
#[must_use]
pub fn resolve_mime(file_name: &str, explicit: Option<&str>) -> String {
    match explicit.map(str::trim).filter(|m| !m.is_empty()) {
        Some(mime) => mime.to_string(),
        None => mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or(FALLBACK_MIME)
            .to_string(),
    }
}
