use thiserror::Error;

/// Failure while loading a specification document.
///
/// Both variants surface to the user the same way: as the display string
/// stored in the shell's `error` field.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}
