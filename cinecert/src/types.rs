//! Project configuration types
//!
//! Copyright (C) 2025 Pierre Aubert pierre(at)spinorama(dot)org
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Room and Screen
// ============================================================================

/// Interior room dimensions in feet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoomDimensions {
    /// Front wall to back wall (ft)
    pub length: f64,
    /// Side wall to side wall (ft)
    pub width: f64,
    /// Floor to ceiling (ft)
    pub height: f64,
}

impl RoomDimensions {
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Floor area, also used for the ceiling (ft²)
    pub fn floor_area(&self) -> f64 {
        self.length * self.width
    }

    /// Combined area of the four walls (ft²)
    pub fn wall_area(&self) -> f64 {
        2.0 * (self.length * self.height + self.width * self.height)
    }

    /// Floor, ceiling and walls (ft²)
    pub fn surface_area(&self) -> f64 {
        2.0 * self.floor_area() + self.wall_area()
    }
}

/// Screen aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AspectRatio {
    /// 16:9 (1.78:1) video
    #[serde(rename = "16:9")]
    Widescreen,
    /// 2.35:1 scope
    #[serde(rename = "2.35:1")]
    Scope235,
    /// 2.40:1 scope
    #[serde(rename = "2.40:1")]
    Scope240,
}

impl AspectRatio {
    /// Width divided by height
    pub fn ratio(self) -> f64 {
        match self {
            AspectRatio::Widescreen => 16.0 / 9.0,
            AspectRatio::Scope235 => 2.35,
            AspectRatio::Scope240 => 2.40,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Scope235 => "2.35:1",
            AspectRatio::Scope240 => "2.40:1",
        }
    }
}

/// Screen border masking
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum MaskingSystem {
    /// Fixed masking matching the screen ratio
    #[default]
    FixedRatio,
    /// Motorized masking that follows the content ratio
    Motorized,
    /// Bare screen with no masking
    NoMasking,
}

impl MaskingSystem {
    pub fn label(self) -> &'static str {
        match self {
            MaskingSystem::FixedRatio => "fixed-ratio masking",
            MaskingSystem::Motorized => "motorized masking",
            MaskingSystem::NoMasking => "no masking",
        }
    }
}

/// Projection screen configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScreenConfig {
    /// Diagonal size (inches)
    pub diagonal: f64,
    pub aspect_ratio: AspectRatio,
    /// Height of the bottom edge of the image above the floor (inches)
    pub bottom_edge_height: f64,
    #[serde(default)]
    pub masking: MaskingSystem,
}

// ============================================================================
// Seating
// ============================================================================

/// One row of seats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SeatingRow {
    /// Unique row identifier
    pub id: u32,
    /// Distance from the screen plane to the seated ear (ft)
    pub distance_from_screen: f64,
    /// Seated ear height above the row's floor (inches)
    pub ear_height: f64,
    /// Riser height under the row (inches)
    #[serde(default)]
    pub riser_height: f64,
}

impl SeatingRow {
    /// Ear height measured from the room floor (inches)
    pub fn eye_level(&self) -> f64 {
        self.ear_height + self.riser_height
    }
}

// ============================================================================
// Lookup tables
// ============================================================================

/// Physical coefficients of a wall build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallCoefficients {
    /// Share of modal energy the walls hold in the room (0-1)
    pub damping_factor: f64,
    /// Broadband absorption coefficient used for RT60
    pub absorption_coefficient: f64,
}

/// Wall construction class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum WallConstruction {
    /// Single layer of gypsum on studs
    #[default]
    Drywall,
    /// Two gypsum layers with damping compound
    DoubleDrywall,
    /// Decoupled gypsum with resilient channel and insulation
    Hybrid,
    /// Brick or block
    Masonry,
    /// Poured concrete
    Concrete,
}

impl WallConstruction {
    pub const ALL: [WallConstruction; 5] = [
        WallConstruction::Drywall,
        WallConstruction::DoubleDrywall,
        WallConstruction::Hybrid,
        WallConstruction::Masonry,
        WallConstruction::Concrete,
    ];

    pub const fn coefficients(self) -> WallCoefficients {
        match self {
            WallConstruction::Drywall => WallCoefficients {
                damping_factor: 0.55,
                absorption_coefficient: 0.10,
            },
            WallConstruction::DoubleDrywall => WallCoefficients {
                damping_factor: 0.70,
                absorption_coefficient: 0.08,
            },
            WallConstruction::Hybrid => WallCoefficients {
                damping_factor: 0.80,
                absorption_coefficient: 0.15,
            },
            WallConstruction::Masonry => WallCoefficients {
                damping_factor: 0.95,
                absorption_coefficient: 0.03,
            },
            WallConstruction::Concrete => WallCoefficients {
                damping_factor: 1.0,
                absorption_coefficient: 0.02,
            },
        }
    }

    pub fn damping_factor(self) -> f64 {
        self.coefficients().damping_factor
    }

    pub fn absorption_coefficient(self) -> f64 {
        self.coefficients().absorption_coefficient
    }

    /// True for the construction with the lowest damping factor, which
    /// transmits low bass out of the room.
    pub fn leaks_bass(self) -> bool {
        self == WallConstruction::Drywall
    }

    pub fn label(self) -> &'static str {
        match self {
            WallConstruction::Drywall => "single drywall",
            WallConstruction::DoubleDrywall => "double drywall",
            WallConstruction::Hybrid => "hybrid decoupled",
            WallConstruction::Masonry => "masonry",
            WallConstruction::Concrete => "concrete",
        }
    }
}

/// Content standard the room is designed for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ContentStandard {
    /// Standard dynamic range
    #[default]
    Sdr,
    /// High dynamic range reference viewing
    Hdr,
}

impl ContentStandard {
    /// Largest horizontal half-angle allowed (degrees)
    pub fn horizontal_limit_degrees(self) -> f64 {
        match self {
            ContentStandard::Sdr => 45.0,
            ContentStandard::Hdr => 40.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentStandard::Sdr => "SDR",
            ContentStandard::Hdr => "HDR",
        }
    }
}

// ============================================================================
// Project
// ============================================================================

/// Complete home theater project
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProjectConfig {
    /// Configuration version (semantic versioning, e.g., "1.0.0")
    #[serde(default = "default_config_version")]
    pub version: String,
    /// Free-form project name
    #[serde(default)]
    pub name: String,
    pub room: RoomDimensions,
    pub screen: ScreenConfig,
    /// Seating rows in any order
    pub rows: Vec<SeatingRow>,
    #[serde(default)]
    pub wall_construction: WallConstruction,
    #[serde(default)]
    pub content_standard: ContentStandard,
}

pub fn default_config_version() -> String {
    "1.0.0".to_string()
}
