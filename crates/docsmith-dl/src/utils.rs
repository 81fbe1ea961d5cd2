use std::time::{SystemTime, UNIX_EPOCH};

use ureq::http::HeaderValue;

/// Extract a filename from a Content-Disposition header value.
pub fn filename_from_header(value: &HeaderValue) -> Option<String> {
    value
        .to_str()
        .ok()?
        .split(';')
        .find_map(|p| p.trim().strip_prefix("filename="))
        .map(|s| s.trim_matches(&['"', '\''][..]).to_string())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.split(['/', '\\'])
                .next_back()
                .map(String::from)
                .unwrap_or(s)
        })
}

/// Map a declared media type to the archive extension used for generated
/// filenames. Unknown types fall back to `bin`.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    match mime.as_str() {
        "application/zip" => "zip",
        "application/gzip" | "application/x-gzip" => "tar.gz",
        "application/x-tar" => "tar",
        _ => "bin",
    }
}

/// Generate a fallback filename when the response carries no filename hint.
pub fn generated_filename(content_type: Option<&str>) -> String {
    let extension = content_type
        .map(extension_for_content_type)
        .unwrap_or("bin");

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    format!("download_{timestamp}.{extension}")
}
