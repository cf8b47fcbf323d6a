//! Physical constants and fixed thresholds used by the analysis

// ============================================================================
// Acoustics
// ============================================================================

/// Speed of sound in ft/s at 68°F
pub const SPEED_OF_SOUND_FT_S: f64 = 1125.0;

/// Sabine constant for imperial units (seconds per foot)
pub const SABINE_CONSTANT_IMPERIAL: f64 = 0.049;

/// Target reverberation time for a dedicated theater (seconds)
pub const TARGET_RT60_S: f64 = 0.45;

/// RT60 tolerance above target still rated optimal (seconds)
pub const RT60_OPTIMAL_TOLERANCE_S: f64 = 0.1;

/// RT60 tolerance above target still rated acceptable (seconds)
pub const RT60_ACCEPTABLE_TOLERANCE_S: f64 = 0.3;

/// Absorption coefficient of carpeted floor
pub const CARPET_ABSORPTION: f64 = 0.10;

/// Absorption coefficient of an untreated ceiling
pub const CEILING_ABSORPTION: f64 = 0.05;

/// Absorption coefficient of upholstered theater seating
pub const SEATING_ABSORPTION: f64 = 0.25;

/// Fraction of the floor area covered by seating
pub const SEATING_FLOOR_FRACTION: f64 = 0.30;

/// Highest harmonic order computed for each axial mode
pub const MAX_MODE_ORDER: u32 = 3;

/// Modes above this frequency are not reported (Hz)
pub const MAX_MODE_FREQUENCY_HZ: f64 = 300.0;

/// Modes up to this frequency contribute to the treatment plan (Hz)
pub const TREATMENT_PLAN_MAX_FREQUENCY_HZ: f64 = 200.0;

/// Below this frequency a flexible wall lets bass escape the room (Hz)
pub const BASS_LEAKAGE_FREQUENCY_HZ: f64 = 80.0;

// ============================================================================
// Viewing geometry
// ============================================================================

/// Distance from the ear canal to the crown of a seated viewer (inches)
pub const EYE_TO_CROWN_IN: f64 = 4.0;

/// Side clearance the screen needs inside the room width (inches)
pub const MIN_SCREEN_CLEARANCE_IN: f64 = 6.0;

/// Clearance over the head in front that counts as an unobstructed view (inches)
pub const SIGHTLINE_OPTIMAL_CLEARANCE_IN: f64 = 4.0;

/// Vertical sub-angle up to which a seat is optimal (degrees)
pub const VVA_OPTIMAL_MAX_DEG: f64 = 15.0;

/// Vertical sub-angle up to which a seat is marginal (degrees)
pub const VVA_MARGINAL_MAX_DEG: f64 = 18.0;

/// Vertical sub-angle bound for a row to be rated optimal overall (degrees)
pub const VVA_REFERENCE_MAX_DEG: f64 = 12.0;

/// Horizontal half-angle headroom below the limit for an optimal row (degrees)
pub const HVA_REFERENCE_MARGIN_DEG: f64 = 5.0;

pub const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Scoring
// ============================================================================

pub const MAX_SCORE: f64 = 100.0;
pub const FAIL_ROW_PENALTY: f64 = 25.0;
pub const WARNING_ROW_PENALTY: f64 = 8.0;
pub const BASS_LEAKAGE_PENALTY: f64 = 2.0;
pub const OPTIMAL_ROW_BONUS: f64 = 2.0;

/// Lowest score that may still be certified compliant
pub const COMPLIANT_MIN_SCORE: f64 = 80.0;
