//! Error types for encoding operations.

use thiserror::Error;

/// Result type for encoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors that can occur during encoding operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// A write was requested with a bit width outside 1..=64.
    #[error("Invalid bit width: {0} (must be 1..=64)")]
    InvalidBitWidth(u8),

    /// Value exceeds the maximum allowed for its bit width.
    #[error("Value too large for field {field}: {actual_value} > {max_value} (max)")]
    ValueTooLarge {
        /// Name of the field.
        field: &'static str,
        /// Maximum allowed value.
        max_value: u64,
        /// Actual value provided.
        actual_value: u64,
    },
}

/// Checks that a derived length or count fits in `bits` before it is written.
pub(crate) fn check_width(field: &'static str, value: usize, bits: u8) -> EncodingResult<u64> {
    let max_value = (1u64 << bits) - 1;
    let actual_value = value as u64;
    if actual_value > max_value {
        return Err(EncodingError::ValueTooLarge {
            field,
            max_value,
            actual_value,
        });
    }
    Ok(actual_value)
}
