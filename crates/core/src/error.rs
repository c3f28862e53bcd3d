//! Error types for the scrubgen core.

use thiserror::Error;

/// Errors produced by grid construction and level generation.
#[derive(Debug, Error)]
pub enum GenError {
    /// Grid size was zero, or `size * size` overflowed `usize`.
    #[error("invalid grid dimensions: size must be non-zero and square must fit in usize")]
    InvalidDimensions,

    /// A data vector did not match the grid size it was paired with.
    #[error("grid data length {got} does not match {size}x{size}")]
    DataLengthMismatch { size: usize, got: usize },

    /// Two grids had different sizes for an operation that requires equal sizes.
    #[error("grid size mismatch: {lhs} vs {rhs}")]
    SizeMismatch { lhs: usize, rhs: usize },

    /// A configuration value failed validation at orchestrator construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_message_mentions_size() {
        let msg = GenError::InvalidDimensions.to_string();
        assert!(msg.contains("size"), "got: {msg}");
    }

    #[test]
    fn data_length_mismatch_includes_both_numbers() {
        let msg = GenError::DataLengthMismatch { size: 8, got: 63 }.to_string();
        assert!(msg.contains('8'), "missing size in: {msg}");
        assert!(msg.contains("63"), "missing length in: {msg}");
    }

    #[test]
    fn size_mismatch_includes_both_sizes() {
        let msg = GenError::SizeMismatch { lhs: 16, rhs: 32 }.to_string();
        assert!(msg.contains("16") && msg.contains("32"), "got: {msg}");
    }

    #[test]
    fn invalid_config_carries_reason() {
        let msg = GenError::InvalidConfig("grid_size is zero".into()).to_string();
        assert!(msg.contains("grid_size is zero"), "got: {msg}");
    }

    #[test]
    fn gen_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GenError>();
    }

    #[test]
    fn gen_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<GenError>();
    }
}
