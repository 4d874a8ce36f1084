//! Result type alias for metascrub

use super::errors::ScrubError;

/// Result type alias for metascrub operations
///
/// # Examples
///
/// ```
/// use metascrub::domain::result::Result;
/// use metascrub::domain::errors::ScrubError;
///
/// fn failing_function() -> Result<()> {
///     Err(ScrubError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScrubError>;
