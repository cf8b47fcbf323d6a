//! Error types for the cinecert crate.

use thiserror::Error;

/// Error type for cinecert operations.
///
/// Validation variants are raised before any numeric work starts, so an
/// analysis either fails with one of them or returns a complete result.
#[derive(Debug, Error)]
pub enum CineCertError {
    /// No project configuration was supplied.
    #[error("no project configuration supplied")]
    ConfigurationMissing,

    /// A room dimension is zero, negative or not a number.
    #[error("invalid room dimensions: length={length} ft, width={width} ft, height={height} ft (all must be > 0)")]
    InvalidRoomDimensions {
        /// Room length in feet.
        length: f64,
        /// Room width in feet.
        width: f64,
        /// Room height in feet.
        height: f64,
    },

    /// The screen diagonal is zero, negative or not a number.
    #[error("invalid screen size: diagonal={diagonal} in (must be > 0)")]
    InvalidScreenSize {
        /// Screen diagonal in inches.
        diagonal: f64,
    },

    /// The seating plan has no rows.
    #[error("seating plan is empty: at least one row is required")]
    EmptySeatingPlan,

    /// A seating row carries an out-of-range value.
    #[error("invalid row at position {position} (id {row_id}): {reason}")]
    InvalidRow {
        /// 1-based position of the row in the configuration.
        position: usize,
        /// Identifier of the row.
        row_id: u32,
        /// Which field is wrong and why.
        reason: String,
    },

    /// Two rows share the same identifier.
    #[error("duplicate row id: {row_id}")]
    DuplicateRowId {
        /// The repeated identifier.
        row_id: u32,
    },

    /// I/O error wrapper.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for cinecert operations.
pub type Result<T> = std::result::Result<T, CineCertError>;

impl CineCertError {
    /// Returns true if the configuration itself was rejected.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CineCertError::ConfigurationMissing
                | CineCertError::InvalidRoomDimensions { .. }
                | CineCertError::InvalidScreenSize { .. }
                | CineCertError::EmptySeatingPlan
                | CineCertError::InvalidRow { .. }
                | CineCertError::DuplicateRowId { .. }
        )
    }

    /// Returns true if this is a file/IO or parsing error.
    pub fn is_io_error(&self) -> bool {
        matches!(self, CineCertError::Io(_) | CineCertError::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_classified() {
        assert!(CineCertError::EmptySeatingPlan.is_validation_error());
        assert!(CineCertError::ConfigurationMissing.is_validation_error());
        assert!(CineCertError::DuplicateRowId { row_id: 2 }.is_validation_error());
        assert!(!CineCertError::EmptySeatingPlan.is_io_error());
    }

    #[test]
    fn test_io_errors_are_classified() {
        let err: CineCertError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.is_io_error());
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_invalid_row_message_names_position() {
        let err = CineCertError::InvalidRow {
            position: 2,
            row_id: 7,
            reason: "distance from screen must be > 0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("position 2"));
        assert!(msg.contains("id 7"));
    }
}
