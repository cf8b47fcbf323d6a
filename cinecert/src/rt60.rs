//! Reverberation time estimate (Sabine, imperial units)
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

use crate::constants::{
    CARPET_ABSORPTION, CEILING_ABSORPTION, RT60_ACCEPTABLE_TOLERANCE_S, RT60_OPTIMAL_TOLERANCE_S,
    SABINE_CONSTANT_IMPERIAL, SEATING_ABSORPTION, SEATING_FLOOR_FRACTION, TARGET_RT60_S,
};
use crate::types::{RoomDimensions, WallConstruction};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Rt60Status {
    Optimal,
    Acceptable,
    NeedsTreatment,
}

impl Rt60Status {
    pub fn label(self) -> &'static str {
        match self {
            Rt60Status::Optimal => "optimal",
            Rt60Status::Acceptable => "acceptable",
            Rt60Status::NeedsTreatment => "needs treatment",
        }
    }
}

/// Untreated reverberation estimate and the treatment needed to reach target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Rt60Analysis {
    /// Estimated RT60 of the untreated room (s)
    pub estimated_rt60: f64,
    /// Target RT60 (s)
    pub target_rt60: f64,
    /// Share of the room surface to treat (0-100)
    pub treatment_coverage_required: f64,
    pub status: Rt60Status,
    /// Room volume (ft³)
    pub volume: f64,
    /// Floor, ceiling and walls (ft²)
    pub surface_area: f64,
    pub average_absorption: f64,
    /// Absorption of the untreated room (sabins, ft²)
    pub current_sabins: f64,
    /// Absorption that would give the target RT60 (sabins, ft²)
    pub required_sabins: f64,
}

/// RT60 = 0.049 * V / A with V in ft³ and A in sabins
pub fn rt60_sabine_imperial(volume: f64, total_absorption: f64) -> f64 {
    if total_absorption > 0.0 {
        SABINE_CONSTANT_IMPERIAL * volume / total_absorption
    } else {
        f64::INFINITY
    }
}

/// Absorption of the untreated room in sabins
///
/// Walls use the construction coefficient; floor and ceiling areas use the
/// carpet and ceiling coefficients; seats cover a fixed share of the floor.
pub fn untreated_sabins(room: &RoomDimensions, wall_construction: WallConstruction) -> f64 {
    let floor = room.floor_area();
    room.wall_area() * wall_construction.absorption_coefficient()
        + floor * CARPET_ABSORPTION
        + floor * CEILING_ABSORPTION
        + floor * SEATING_FLOOR_FRACTION * SEATING_ABSORPTION
}

fn classify(rt60: f64) -> Rt60Status {
    if rt60 <= TARGET_RT60_S + RT60_OPTIMAL_TOLERANCE_S {
        Rt60Status::Optimal
    } else if rt60 <= TARGET_RT60_S + RT60_ACCEPTABLE_TOLERANCE_S {
        Rt60Status::Acceptable
    } else {
        Rt60Status::NeedsTreatment
    }
}

/// Estimate RT60 and the treatment coverage needed to reach the target.
///
/// The coverage figure is the magnitude of the deviation from the target
/// absorption, so a room that is already too dead also reports a non-zero
/// coverage.
pub fn estimate_rt60(room: &RoomDimensions, wall_construction: WallConstruction) -> Rt60Analysis {
    let volume = room.volume();
    let surface_area = room.surface_area();
    let current_sabins = untreated_sabins(room, wall_construction);
    let average_absorption = current_sabins / surface_area;

    let estimated_rt60 = rt60_sabine_imperial(volume, surface_area * average_absorption);
    let required_sabins = SABINE_CONSTANT_IMPERIAL * volume / TARGET_RT60_S;
    let treatment_coverage_required =
        ((required_sabins - current_sabins).abs() / surface_area * 100.0).clamp(0.0, 100.0);

    let status = classify(estimated_rt60);
    debug!(
        "RT60 {:.2}s (target {:.2}s, {}), alpha {:.3}, coverage {:.1}%",
        estimated_rt60,
        TARGET_RT60_S,
        status.label(),
        average_absorption,
        treatment_coverage_required
    );

    Rt60Analysis {
        estimated_rt60,
        target_rt60: TARGET_RT60_S,
        treatment_coverage_required,
        status,
        volume,
        surface_area,
        average_absorption,
        current_sabins,
        required_sabins,
    }
}
