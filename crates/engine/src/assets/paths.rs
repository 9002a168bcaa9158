use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetPathError {
    #[error("asset path must not be empty")]
    Empty,
    #[error("asset path must be relative, got leading '/'")]
    LeadingSlash,
    #[error("asset path must use '/' separators")]
    Backslash,
    #[error("asset path must not contain '..'")]
    ParentTraversal,
    #[error("asset path contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Logical asset paths look like `menu/btn_start.png`: lowercase ASCII,
/// digits, `_`, `-`, `/` and single dots.
pub(crate) fn validate_asset_path(path: &str) -> Result<(), AssetPathError> {
    if path.is_empty() {
        return Err(AssetPathError::Empty);
    }
    if path.starts_with('/') {
        return Err(AssetPathError::LeadingSlash);
    }
    if path.contains('\\') {
        return Err(AssetPathError::Backslash);
    }
    if path.contains("..") {
        return Err(AssetPathError::ParentTraversal);
    }
    for ch in path.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-' | '.') {
            continue;
        }
        return Err(AssetPathError::InvalidCharacter { character: ch });
    }
    Ok(())
}
