use thiserror::Error;

/// Errors returned by ArtDMX payload helpers.
///
/// # Examples
/// ```
/// use artcast_core::ArtNetError;
///
/// let err = ArtNetError::InvalidChannel { channel: 0 };
/// assert!(err.to_string().contains("invalid DMX channel"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtNetError {
    #[error("DMX data too long: at most {max} slots, got {actual}")]
    TooLong { max: usize, actual: usize },
    #[error("invalid DMX channel: {channel} (expected 1..=512)")]
    InvalidChannel { channel: u16 },
}
