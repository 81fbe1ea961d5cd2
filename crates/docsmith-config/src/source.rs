use serde::{Deserialize, Serialize};

/// One configured documentation repository.
///
/// A source is identified by its unique `name` and carries the repository
/// URL, the ordered list of tags (or branches) to fetch, and an optional
/// access token for private repositories. Sources are read-only for the
/// duration of a sync run.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Source {
    /// Unique name of the source; also the repository display name used for
    /// the destination folder.
    pub name: String,

    /// Repository URL, e.g. `https://github.com/acme/widgets`.
    pub url: String,

    /// Tags or branches to fetch, in order.
    pub tags: Vec<String>,

    /// Optional bearer token sent with the archive request.
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_token_optional() {
        let source: Source = toml::from_str(
            r#"
            name = "widgets"
            url = "https://github.com/acme/widgets"
            tags = ["v1.0.0", "v1.1.0"]
            "#,
        )
        .unwrap();

        assert_eq!(source.name, "widgets");
        assert_eq!(source.tags, vec!["v1.0.0", "v1.1.0"]);
        assert!(source.token.is_none());
    }
}
