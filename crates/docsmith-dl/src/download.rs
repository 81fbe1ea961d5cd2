use std::{
    fs::{self, File},
    io::{Read as _, Write as _},
    path::{Path, PathBuf},
};

use tracing::debug;
use ureq::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    Body,
};

use crate::{
    error::DownloadError,
    host::DownloadRequest,
    http_client::SHARED_AGENT,
    utils::{filename_from_header, generated_filename},
};

/// Upper bound on how much of an error-response body is read for message
/// extraction.
const ERROR_BODY_LIMIT: u64 = 64 * 1024;

/// A downloaded archive persisted to disk.
#[derive(Debug)]
pub struct DownloadedArchive {
    /// Absolute path of the saved archive file.
    pub path: PathBuf,
    /// Media type declared by the server, without parameters.
    pub content_type: Option<String>,
    /// Resolved filename under the destination directory.
    pub filename: String,
}

/// Perform the download request and persist the response body into
/// `dest_dir`.
///
/// Blocking, single attempt, redirects followed by the agent. Transport
/// failures surface as [`DownloadError::Network`]; HTTP >= 400 as
/// [`DownloadError::HttpError`] with a best-effort message extracted from
/// the response body. The file appears at its final path only once fully
/// written.
pub fn fetch(request: &DownloadRequest, dest_dir: &Path) -> Result<DownloadedArchive, DownloadError> {
    debug!(url = %request.endpoint, "fetching archive");

    let mut req = SHARED_AGENT.get(&request.endpoint);
    for (name, value) in &request.headers {
        req = req.header(*name, value);
    }

    let resp = req.call()?;
    let status = resp.status();

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.split(';').next().unwrap_or(s).trim().to_lowercase());

    if status.as_u16() >= 400 {
        let body = read_limited(resp.into_body());
        let message = extract_error_message(&body, content_type.as_deref());
        return Err(DownloadError::HttpError {
            status: status.as_u16(),
            message,
        });
    }

    let filename = resp
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(filename_from_header)
        .unwrap_or_else(|| generated_filename(content_type.as_deref()));

    let path = dest_dir.join(&filename);
    write_body(resp.into_body(), dest_dir, &filename, &path)?;

    debug!(path = %path.display(), "archive saved");

    Ok(DownloadedArchive {
        path,
        content_type,
        filename,
    })
}

/// Stream the body to `<filename>.part` and rename into place, so a partial
/// download never shows up at the final path.
fn write_body(
    body: Body,
    dest_dir: &Path,
    filename: &str,
    path: &Path,
) -> Result<(), DownloadError> {
    let part_path = dest_dir.join(format!("{filename}.part"));

    let result: Result<(), std::io::Error> = (|| {
        let mut file = File::create(&part_path)?;
        let mut reader = body.into_reader();
        std::io::copy(&mut reader, &mut file)?;
        file.flush()?;
        Ok(())
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(&part_path);
        return Err(err.into());
    }

    fs::rename(&part_path, path)?;
    Ok(())
}

fn read_limited(body: Body) -> Vec<u8> {
    let mut buf = Vec::new();
    let _ = body.into_reader().take(ERROR_BODY_LIMIT).read_to_end(&mut buf);
    buf
}

/// Best-effort error message from a failed response: a `message`/`error`
/// field when the body is JSON, otherwise the first 100 bytes.
fn extract_error_message(body: &[u8], content_type: Option<&str>) -> String {
    if content_type.is_some_and(|ct| ct.contains("application/json")) {
        if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
            if let Some(message) = json
                .get("message")
                .or_else(|| json.get("error"))
                .and_then(|v| v.as_str())
            {
                return message.to_string();
            }
        }
        return "Unknown error".to_string();
    }

    let head = &body[..body.len().min(100)];
    String::from_utf8_lossy(head).into_owned()
}
