#![doc = include_str!("../README.md")]

/// Error types for cinecert operations.
pub mod error;
pub use error::{CineCertError, Result};

/// Physical constants and fixed thresholds
pub mod constants;
/// Project configuration types
pub mod types;

/// Screen size and viewing angles
pub mod geometry;
/// Sightline obstruction between rows
pub mod sightline;
/// Per-row verdicts
pub mod row;
/// Low-frequency treatment prescriptions
pub mod treatment;
/// Axial room modes
pub mod modes;
/// Reverberation time estimate
pub mod rt60;
/// Project orchestration, scoring and certification
pub mod analyze;

/// Configuration loading and advisory validation
pub mod config;

// Re-export commonly used items
pub use analyze::{AnalysisResult, Certification, analyze_project, validate_project};
pub use config::{
    ValidationResult, load_project_config, parse_project_config, validate_project_config,
};
pub use geometry::{
    ScreenDimensions, ScreenFit, VerticalAngles, horizontal_viewing_angle, screen_dimensions,
    screen_fits_room, vertical_viewing_angle,
};
pub use modes::{ModeType, RoomAxis, RoomModeResult, calculate_room_modes};
pub use row::{RowAnalysis, RowStatus, VerticalAngleStatus, ViewingContext, analyze_row};
pub use rt60::{Rt60Analysis, Rt60Status, estimate_rt60};
pub use sightline::{SightlineResult, SightlineStatus, evaluate_sightline};
pub use treatment::{Placement, TreatmentPrescription, TreatmentType, prescribe_treatment};
pub use types::*;
