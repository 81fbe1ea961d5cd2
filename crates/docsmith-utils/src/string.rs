/// Fallback used when a repository name sanitizes down to nothing.
pub const DEFAULT_FOLDER_NAME: &str = "default_folder";

/// Reduce a repository display name to a safe destination folder name.
///
/// Strips every character that is not ASCII alphanumeric, `-` or `_`. An
/// all-symbol name collapses to [`DEFAULT_FOLDER_NAME`] so the destination
/// tree always has a usable root.
///
/// # Examples
///
/// ```
/// use docsmith_utils::string::sanitize_folder_name;
///
/// assert_eq!(sanitize_folder_name("My Repo!! 2.0"), "MyRepo20");
/// ```
pub fn sanitize_folder_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if cleaned.is_empty() {
        DEFAULT_FOLDER_NAME.to_string()
    } else {
        cleaned
    }
}
