//! Per-row viewing analysis
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
    HVA_REFERENCE_MARGIN_DEG, VVA_MARGINAL_MAX_DEG, VVA_OPTIMAL_MAX_DEG, VVA_REFERENCE_MAX_DEG,
};
use crate::geometry::{
    ScreenDimensions, VerticalAngles, horizontal_viewing_angle, vertical_viewing_angle,
};
use crate::sightline::{SightlineResult, SightlineStatus, evaluate_sightline};
use crate::types::{ContentStandard, MaskingSystem, SeatingRow};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rating of one vertical sub-angle
///
/// Ordered so that the worse rating compares greater.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAngleStatus {
    Optimal,
    Marginal,
    Warning,
}

impl VerticalAngleStatus {
    pub fn classify(angle_deg: f64) -> Self {
        if angle_deg <= VVA_OPTIMAL_MAX_DEG {
            VerticalAngleStatus::Optimal
        } else if angle_deg <= VVA_MARGINAL_MAX_DEG {
            VerticalAngleStatus::Marginal
        } else {
            VerticalAngleStatus::Warning
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VerticalAngleStatus::Optimal => "optimal",
            VerticalAngleStatus::Marginal => "marginal",
            VerticalAngleStatus::Warning => "warning",
        }
    }
}

/// Overall rating of a seating row
///
/// Ordered so that the worse rating compares greater.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum RowStatus {
    Optimal,
    Acceptable,
    Warning,
    Fail,
}

impl RowStatus {
    pub fn label(self) -> &'static str {
        match self {
            RowStatus::Optimal => "optimal",
            RowStatus::Acceptable => "acceptable",
            RowStatus::Warning => "warning",
            RowStatus::Fail => "fail",
        }
    }
}

/// Screen-side inputs shared by every row of a project
#[derive(Debug, Clone, Copy)]
pub struct ViewingContext {
    pub screen: ScreenDimensions,
    /// Height of the image bottom edge above the floor (inches)
    pub bottom_edge_height: f64,
    pub masking: MaskingSystem,
    pub content_standard: ContentStandard,
}

/// Verdict for one seating row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RowAnalysis {
    pub row_id: u32,
    /// Distance from screen (ft)
    pub distance_from_screen: f64,
    /// Ear height plus riser (inches)
    pub eye_height: f64,
    pub vertical_angles: VerticalAngles,
    pub vertical_top_status: VerticalAngleStatus,
    pub vertical_bottom_status: VerticalAngleStatus,
    /// Worse of the two sub-angle ratings
    pub vertical_status: VerticalAngleStatus,
    /// Both sub-angles within the marginal band
    pub vertical_pass: bool,
    /// Full edge-to-edge angle (degrees)
    pub horizontal_angle: f64,
    pub horizontal_half_angle: f64,
    /// Half-angle limit of the content standard (degrees)
    pub horizontal_limit: f64,
    pub horizontal_pass: bool,
    /// None for the row closest to the screen
    pub sightline_clearance: Option<f64>,
    pub sightline_blocked: bool,
    pub sightline: Option<SightlineResult>,
    pub overall_status: RowStatus,
    pub notes: Vec<String>,
}

/// Analyze `row` given the row directly in front of it, if any.
pub fn analyze_row(
    row: &SeatingRow,
    predecessor: Option<&SeatingRow>,
    context: &ViewingContext,
) -> RowAnalysis {
    let eye_height = row.eye_level();
    let distance = row.distance_from_screen;

    let vertical_angles = vertical_viewing_angle(
        context.screen.height,
        context.bottom_edge_height,
        eye_height,
        distance,
    );
    let vertical_top_status = VerticalAngleStatus::classify(vertical_angles.to_top);
    let vertical_bottom_status = VerticalAngleStatus::classify(vertical_angles.to_bottom);
    let vertical_status = vertical_top_status.max(vertical_bottom_status);
    let vertical_pass = vertical_angles.to_top <= VVA_MARGINAL_MAX_DEG
        && vertical_angles.to_bottom <= VVA_MARGINAL_MAX_DEG;

    let horizontal_angle = horizontal_viewing_angle(context.screen.width, distance);
    let horizontal_half_angle = horizontal_angle / 2.0;
    let horizontal_limit = context.content_standard.horizontal_limit_degrees();
    let horizontal_pass = horizontal_half_angle <= horizontal_limit;

    let sightline =
        predecessor.map(|front| evaluate_sightline(front, row, distance, context.masking));

    let mut notes = Vec::new();
    match vertical_status {
        VerticalAngleStatus::Warning => notes.push(format!(
            "Vertical viewing angle exceeds {:.0}° (top {:.1}°, bottom {:.1}°): expect neck strain; lower the screen or move the row back",
            VVA_MARGINAL_MAX_DEG, vertical_angles.to_top, vertical_angles.to_bottom
        )),
        VerticalAngleStatus::Marginal => notes.push(format!(
            "Vertical viewing angle is marginal (top {:.1}°, bottom {:.1}°): above the {:.0}° comfort target",
            vertical_angles.to_top, vertical_angles.to_bottom, VVA_OPTIMAL_MAX_DEG
        )),
        VerticalAngleStatus::Optimal => {}
    }

    if !horizontal_pass {
        notes.push(format!(
            "Horizontal half-angle {:.1}° exceeds the {:.0}° {} limit: the row is too close for this screen width",
            horizontal_half_angle,
            horizontal_limit,
            context.content_standard.label()
        ));
    }

    if let Some(result) = &sightline {
        let obstruction = result.obstruction_height.unwrap_or(0.0);
        let angle = result.obstruction_angle.unwrap_or(0.0);
        match result.status {
            SightlineStatus::Fail => notes.push(format!(
                "Sightline blocked: {:.1} in obstruction ({:.2}°) exceeds {} tolerance; raise the riser",
                obstruction,
                angle,
                context.masking.label()
            )),
            SightlineStatus::Warning => notes.push(format!(
                "Sightline partially blocked: {:.1} in obstruction ({:.2}°) is only within the {} warning band",
                obstruction,
                angle,
                context.masking.label()
            )),
            SightlineStatus::Acceptable => notes.push(format!(
                "Sightline acceptable with {}: {:.1} in residual obstruction ({:.2}°)",
                context.masking.label(),
                obstruction,
                angle
            )),
            SightlineStatus::Optimal => {}
        }
    }

    let sightline_status = sightline.map(|s| s.status);
    let overall_status = if sightline_status == Some(SightlineStatus::Fail) {
        RowStatus::Fail
    } else if vertical_status == VerticalAngleStatus::Warning || !horizontal_pass {
        RowStatus::Warning
    } else if sightline_status == Some(SightlineStatus::Warning) {
        RowStatus::Warning
    } else if sightline_status == Some(SightlineStatus::Acceptable)
        || vertical_status == VerticalAngleStatus::Marginal
    {
        RowStatus::Acceptable
    } else if vertical_angles.to_top <= VVA_REFERENCE_MAX_DEG
        && vertical_angles.to_bottom <= VVA_REFERENCE_MAX_DEG
        && horizontal_half_angle <= horizontal_limit - HVA_REFERENCE_MARGIN_DEG
    {
        RowStatus::Optimal
    } else {
        RowStatus::Acceptable
    };

    debug!(
        "row {}: {:.1} ft, VVA {:.1}°/{:.1}° ({}), HVA half {:.1}°, {}",
        row.id,
        distance,
        vertical_angles.to_top,
        vertical_angles.to_bottom,
        vertical_status.label(),
        horizontal_half_angle,
        overall_status.label()
    );

    RowAnalysis {
        row_id: row.id,
        distance_from_screen: distance,
        eye_height,
        vertical_angles,
        vertical_top_status,
        vertical_bottom_status,
        vertical_status,
        vertical_pass,
        horizontal_angle,
        horizontal_half_angle,
        horizontal_limit,
        horizontal_pass,
        sightline_clearance: sightline.map(|s| s.clearance),
        sightline_blocked: sightline.is_some_and(|s| s.blocked),
        sightline,
        overall_status,
        notes,
    }
}
