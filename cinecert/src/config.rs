//! Loading and advisory validation of project configurations

use crate::constants::INCHES_PER_FOOT;
use crate::error::{CineCertError, Result};
use crate::geometry::screen_dimensions;
use crate::types::{ProjectConfig, SeatingRow};
use log::{error, warn};
use std::collections::HashSet;
use std::path::Path;

/// Lowest ceiling that leaves room for a projector above a riser (ft)
const MIN_COMFORTABLE_ROOM_HEIGHT_FT: f64 = 7.0;

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the configuration is valid
    pub is_valid: bool,
    /// Violations that prevent analysis
    pub errors: Vec<String>,
    /// Design issues worth a second look
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a valid result with no errors or warnings
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error (marks result as invalid)
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
        self.is_valid = false;
    }

    /// Add a warning (does not affect validity)
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.is_valid = self.is_valid && other.is_valid;
    }

    /// Log warnings and errors
    pub fn log_results(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
        for err in &self.errors {
            error!("{}", err);
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Parse a project configuration from JSON.
///
/// Blank input and a bare `null` mean no configuration was given.
pub fn parse_project_config(json: &str) -> Result<ProjectConfig> {
    let value: serde_json::Value = if json.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(json)?
    };
    if value.is_null() {
        return Err(CineCertError::ConfigurationMissing);
    }
    Ok(serde_json::from_value(value)?)
}

/// Read and parse a project configuration file
pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    let json = std::fs::read_to_string(path)?;
    parse_project_config(&json)
}

/// Validate a complete project configuration, reporting every problem
pub fn validate_project_config(config: &ProjectConfig) -> ValidationResult {
    let mut result = ValidationResult::valid();

    validate_room(config, &mut result);
    validate_screen(config, &mut result);
    result.merge(validate_rows(&config.rows));
    validate_layout(config, &mut result);

    result
}

fn validate_room(config: &ProjectConfig, result: &mut ValidationResult) {
    let room = &config.room;
    for (name, value) in [
        ("length", room.length),
        ("width", room.width),
        ("height", room.height),
    ] {
        if !(value.is_finite() && value > 0.0) {
            result.add_error(format!("room {} ({}) must be positive", name, value));
        }
    }

    if room.height.is_finite() && room.height > 0.0 && room.height < MIN_COMFORTABLE_ROOM_HEIGHT_FT {
        result.add_warning(format!(
            "room height ({} ft) is under {} ft, leaving little room for risers",
            room.height, MIN_COMFORTABLE_ROOM_HEIGHT_FT
        ));
    }
}

fn validate_screen(config: &ProjectConfig, result: &mut ValidationResult) {
    let screen = &config.screen;
    if !(screen.diagonal.is_finite() && screen.diagonal > 0.0) {
        result.add_error(format!(
            "screen diagonal ({}) must be positive",
            screen.diagonal
        ));
    }
    if !(screen.bottom_edge_height.is_finite() && screen.bottom_edge_height >= 0.0) {
        result.add_warning(format!(
            "screen bottom edge height ({}) should not be negative",
            screen.bottom_edge_height
        ));
    }
}

fn validate_rows(rows: &[SeatingRow]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if rows.is_empty() {
        result.add_error("No seating rows defined".to_string());
        return result;
    }

    let mut seen = HashSet::new();
    for (index, row) in rows.iter().enumerate() {
        let position = index + 1;
        if !(row.distance_from_screen.is_finite() && row.distance_from_screen > 0.0) {
            result.add_error(format!(
                "row {} (id {}): distance from screen ({}) must be positive",
                position, row.id, row.distance_from_screen
            ));
        }
        if !(row.ear_height.is_finite() && row.ear_height >= 0.0) {
            result.add_error(format!(
                "row {} (id {}): ear height ({}) must not be negative",
                position, row.id, row.ear_height
            ));
        }
        if !(row.riser_height.is_finite() && row.riser_height >= 0.0) {
            result.add_error(format!(
                "row {} (id {}): riser height ({}) must not be negative",
                position, row.id, row.riser_height
            ));
        }
        if !seen.insert(row.id) {
            result.add_error(format!("row id {} is used more than once", row.id));
        }
    }

    result
}

/// Design checks that only make sense once the numbers are sane
fn validate_layout(config: &ProjectConfig, result: &mut ValidationResult) {
    if !result.is_valid {
        return;
    }

    let mut rows = config.rows.clone();
    rows.sort_by(|a, b| a.distance_from_screen.total_cmp(&b.distance_from_screen));

    for pair in rows.windows(2) {
        let (front, back) = (&pair[0], &pair[1]);
        if back.riser_height <= front.riser_height {
            result.add_warning(format!(
                "row {} riser ({} in) does not rise above row {} ({} in)",
                back.id, back.riser_height, front.id, front.riser_height
            ));
        }
    }

    let screen = screen_dimensions(config.screen.diagonal, config.screen.aspect_ratio);
    for row in &rows {
        let distance_inches = row.distance_from_screen * INCHES_PER_FOOT;
        if distance_inches < screen.width {
            result.add_warning(format!(
                "row {} sits closer ({:.0} in) than the screen is wide ({:.0} in)",
                row.id, distance_inches, screen.width
            ));
        }
        if config.screen.bottom_edge_height > row.eye_level() {
            result.add_warning(format!(
                "screen bottom edge ({} in) is above row {} eye level ({} in)",
                config.screen.bottom_edge_height,
                row.id,
                row.eye_level()
            ));
        }
    }
}
