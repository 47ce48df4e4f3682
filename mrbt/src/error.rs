/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by tree construction and insertion.
///
/// Verification never errors: every failed check is reported as a negative
/// verification result instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid config error {0}")]
    InvalidConfig(&'static str),

    #[error("key ordering error: key {key} does not exceed last inserted key {last}")]
    KeyOrderingError { key: u64, last: u64 },

    #[error("key alignment error: key {key} is not a multiple of scaling factor {scaling_factor}")]
    KeyAlignmentError { key: u64, scaling_factor: u64 },

    #[error("overflow error {0}")]
    Overflow(&'static str),

    #[error("corruption error {0}")]
    CorruptionError(&'static str),
}
