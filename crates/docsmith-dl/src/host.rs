use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::DownloadError;

/// User agent sent with every archive request; the GitHub API rejects
/// requests without one.
pub const USER_AGENT: &str = "docsmith";

/// Percent-encoding set for values embedded as a single URL segment (the
/// GitLab project path, the tag); everything but alphanumerics, `-`, `_` and
/// `.` is escaped, notably `/`, `?`, `#` and spaces.
const URL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

/// A fully prepared archive download request: the API endpoint plus the
/// headers to send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub endpoint: String,
    pub headers: Vec<(&'static str, String)>,
}

/// Supported repository hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Github,
    Gitlab,
}

impl Host {
    /// Resolve a repository URL to its host adapter.
    ///
    /// Recognition is an exact match on the lowercased hostname with one
    /// leading `www.` stripped; anything else is
    /// [`DownloadError::UnrecognizedHost`].
    pub fn resolve(repo_url: &str) -> Result<Self, DownloadError> {
        let parsed = Url::parse(repo_url).map_err(|source| DownloadError::InvalidUrl {
            url: repo_url.to_string(),
            source,
        })?;

        let host = parsed
            .host_str()
            .ok_or_else(|| DownloadError::MalformedRepositoryUrl {
                url: repo_url.to_string(),
            })?
            .to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);

        match host {
            "github.com" => Ok(Self::Github),
            "gitlab.com" => Ok(Self::Gitlab),
            _ => Err(DownloadError::UnrecognizedHost {
                host: host.to_string(),
            }),
        }
    }

    /// Build the archive download request for one tag of a repository.
    ///
    /// GitHub uses the zipball-by-ref API; GitLab the project-archive API
    /// with the project path percent-encoded as a single segment and the tag
    /// passed as the `sha` query parameter. The tag is percent-encoded on
    /// both hosts so refs like `feature/x` survive as one segment.
    pub fn download_request(
        &self,
        repo_url: &str,
        tag: &str,
        token: Option<&str>,
    ) -> Result<DownloadRequest, DownloadError> {
        let (owner, repo) = parse_project(repo_url)?;
        let tag = utf8_percent_encode(tag, URL_SEGMENT).to_string();

        let endpoint = match self {
            Host::Github => {
                format!("https://api.github.com/repos/{owner}/{repo}/zipball/{tag}")
            }
            Host::Gitlab => {
                let project =
                    utf8_percent_encode(&format!("{owner}/{repo}"), URL_SEGMENT).to_string();
                format!(
                    "https://gitlab.com/api/v4/projects/{project}/repository/archive.zip?sha={tag}"
                )
            }
        };

        let mut headers = vec![("User-Agent", USER_AGENT.to_string())];
        if let Some(token) = token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }

        Ok(DownloadRequest {
            endpoint,
            headers,
        })
    }
}

/// Extract `(owner, repo)` as the first two path segments after the host.
fn parse_project(repo_url: &str) -> Result<(String, String), DownloadError> {
    let parsed = Url::parse(repo_url).map_err(|source| DownloadError::InvalidUrl {
        url: repo_url.to_string(),
        source,
    })?;

    let mut segments = parsed
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty());

    match (segments.next(), segments.next()) {
        (Some(owner), Some(repo)) => Ok((owner.to_string(), repo.to_string())),
        _ => Err(DownloadError::MalformedRepositoryUrl {
            url: repo_url.to_string(),
        }),
    }
}
