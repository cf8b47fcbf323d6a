//! Axial room mode analysis
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
    BASS_LEAKAGE_FREQUENCY_HZ, MAX_MODE_FREQUENCY_HZ, MAX_MODE_ORDER, SPEED_OF_SOUND_FT_S,
};
use crate::treatment::{TreatmentPrescription, prescribe_treatment};
use crate::types::{RoomDimensions, WallConstruction};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mode family
///
/// Only axial modes are computed; the other two are part of the output
/// vocabulary so that consumers can match on the full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ModeType {
    Axial,
    Tangential,
    Oblique,
}

/// Room dimension a mode runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RoomAxis {
    Length,
    Width,
    Height,
}

impl RoomAxis {
    pub fn label(self) -> &'static str {
        match self {
            RoomAxis::Length => "Length",
            RoomAxis::Width => "Width",
            RoomAxis::Height => "Height",
        }
    }

    fn indices(self, order: u32) -> [u32; 3] {
        match self {
            RoomAxis::Length => [order, 0, 0],
            RoomAxis::Width => [0, order, 0],
            RoomAxis::Height => [0, 0, order],
        }
    }
}

/// One standing wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoomModeResult {
    /// Resonant frequency in Hz
    pub frequency: f64,
    pub mode_type: ModeType,
    pub axis: RoomAxis,
    /// Harmonic order (1-based)
    pub order: u32,
    /// Relative strength after wall damping (0-1)
    pub intensity: f64,
    /// Mode is low enough to pass through flexible walls
    pub bass_leakage: bool,
    /// e.g. "2,0,0 - Length mode"
    pub description: String,
    pub treatment: TreatmentPrescription,
}

/// Axial mode frequency: f = n * c / (2 * L)
pub fn axial_mode_frequency(order: u32, dimension_feet: f64) -> f64 {
    order as f64 * SPEED_OF_SOUND_FT_S / (2.0 * dimension_feet)
}

/// Axial modes of all three dimensions up to `MAX_MODE_ORDER`, sorted by
/// frequency, discarding anything above `MAX_MODE_FREQUENCY_HZ`.
pub fn calculate_room_modes(
    room: &RoomDimensions,
    wall_construction: WallConstruction,
) -> Vec<RoomModeResult> {
    let damping = wall_construction.damping_factor();
    let leaky_walls = wall_construction.leaks_bass();

    let mut modes = Vec::new();
    for (axis, dimension) in [
        (RoomAxis::Length, room.length),
        (RoomAxis::Width, room.width),
        (RoomAxis::Height, room.height),
    ] {
        for order in 1..=MAX_MODE_ORDER {
            let frequency = axial_mode_frequency(order, dimension);
            if frequency > MAX_MODE_FREQUENCY_HZ {
                continue;
            }

            let [n, m, p] = axis.indices(order);
            modes.push(RoomModeResult {
                frequency,
                mode_type: ModeType::Axial,
                axis,
                order,
                intensity: damping / order as f64,
                bass_leakage: leaky_walls && frequency < BASS_LEAKAGE_FREQUENCY_HZ,
                description: format!("{},{},{} - {} mode", n, m, p, axis.label()),
                treatment: prescribe_treatment(frequency),
            });
        }
    }

    modes.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    debug!(
        "{} axial modes at or below {} Hz (damping factor {:.2})",
        modes.len(),
        MAX_MODE_FREQUENCY_HZ,
        damping
    );

    modes
}
