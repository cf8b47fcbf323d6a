//! Sightline evaluation between consecutive seating rows
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

use crate::constants::{EYE_TO_CROWN_IN, INCHES_PER_FOOT, SIGHTLINE_OPTIMAL_CLEARANCE_IN};
use crate::types::{MaskingSystem, SeatingRow};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sightline rating of a row over the row in front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SightlineStatus {
    Optimal,
    Acceptable,
    Warning,
    Fail,
}

impl SightlineStatus {
    pub fn label(self) -> &'static str {
        match self {
            SightlineStatus::Optimal => "optimal",
            SightlineStatus::Acceptable => "acceptable",
            SightlineStatus::Warning => "warning",
            SightlineStatus::Fail => "fail",
        }
    }
}

/// Obstruction bound of one tier: an obstruction must stay under both the
/// angle and the height to belong to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstructionBound {
    /// Exclusive upper bound on the obstruction angle (degrees)
    pub max_angle_deg: f64,
    /// Upper bound on the obstruction height (inches)
    pub max_height_in: f64,
    /// Whether `max_height_in` itself is allowed
    pub height_inclusive: bool,
}

impl ObstructionBound {
    const fn new(max_angle_deg: f64, max_height_in: f64, height_inclusive: bool) -> Self {
        Self {
            max_angle_deg,
            max_height_in,
            height_inclusive,
        }
    }

    pub fn admits(&self, angle_deg: f64, height_in: f64) -> bool {
        let height_ok = if self.height_inclusive {
            height_in <= self.max_height_in
        } else {
            height_in < self.max_height_in
        };
        angle_deg < self.max_angle_deg && height_ok
    }
}

/// Acceptable and warning bounds for one masking system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightlineTolerance {
    pub acceptable: ObstructionBound,
    pub warning: ObstructionBound,
}

const NO_MASKING_TOLERANCE: SightlineTolerance = SightlineTolerance {
    acceptable: ObstructionBound::new(0.5, 0.5, true),
    warning: ObstructionBound::new(1.0, 2.0, true),
};

const MOTORIZED_TOLERANCE: SightlineTolerance = SightlineTolerance {
    acceptable: ObstructionBound::new(2.0, 6.0, false),
    warning: ObstructionBound::new(3.0, 8.0, false),
};

const FIXED_RATIO_TOLERANCE: SightlineTolerance = SightlineTolerance {
    acceptable: ObstructionBound::new(1.0, 4.0, false),
    warning: ObstructionBound::new(2.0, 6.0, false),
};

impl MaskingSystem {
    /// Masking hides part of the image edge, so heads in front are tolerated more
    pub fn sightline_tolerance(self) -> SightlineTolerance {
        match self {
            MaskingSystem::NoMasking => NO_MASKING_TOLERANCE,
            MaskingSystem::Motorized => MOTORIZED_TOLERANCE,
            MaskingSystem::FixedRatio => FIXED_RATIO_TOLERANCE,
        }
    }
}

/// Sightline of a row over the head of the row in front
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SightlineResult {
    /// Back eye level minus front head top (inches, negative when below)
    pub clearance: f64,
    pub status: SightlineStatus,
    /// True for warning and fail ratings
    pub blocked: bool,
    /// Height of the head intruding into the sightline (inches)
    pub obstruction_height: Option<f64>,
    /// Angle subtended by the intrusion at the viewing distance (degrees)
    pub obstruction_angle: Option<f64>,
}

/// Rate the view from `back` over the head of `front`.
///
/// `distance_feet` is the back row's distance from the screen.
pub fn evaluate_sightline(
    front: &SeatingRow,
    back: &SeatingRow,
    distance_feet: f64,
    masking: MaskingSystem,
) -> SightlineResult {
    let front_head_top = front.eye_level() + EYE_TO_CROWN_IN;
    let back_eye = back.eye_level();
    let clearance = back_eye - front_head_top;

    if clearance >= SIGHTLINE_OPTIMAL_CLEARANCE_IN {
        return SightlineResult {
            clearance,
            status: SightlineStatus::Optimal,
            blocked: false,
            obstruction_height: None,
            obstruction_angle: None,
        };
    }

    let obstruction_height = clearance.abs();
    let distance_inches = distance_feet * INCHES_PER_FOOT;
    let obstruction_angle = (obstruction_height / distance_inches).atan().to_degrees();

    let tolerance = masking.sightline_tolerance();
    let status = if tolerance.acceptable.admits(obstruction_angle, obstruction_height) {
        SightlineStatus::Acceptable
    } else if tolerance.warning.admits(obstruction_angle, obstruction_height) {
        SightlineStatus::Warning
    } else {
        SightlineStatus::Fail
    };

    SightlineResult {
        clearance,
        status,
        blocked: matches!(status, SightlineStatus::Warning | SightlineStatus::Fail),
        obstruction_height: Some(obstruction_height),
        obstruction_angle: Some(obstruction_angle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u32, distance: f64, ear: f64, riser: f64) -> SeatingRow {
        SeatingRow {
            id,
            distance_from_screen: distance,
            ear_height: ear,
            riser_height: riser,
        }
    }

    #[test]
    fn test_riser_gives_optimal_clearance() {
        let front = row(1, 11.0, 42.0, 0.0);
        let back = row(2, 15.0, 42.0, 10.0);
        let result = evaluate_sightline(&front, &back, 15.0, MaskingSystem::FixedRatio);
        assert_eq!(result.status, SightlineStatus::Optimal);
        assert!(!result.blocked);
        assert!((result.clearance - 6.0).abs() < 1e-12);
        assert!(result.obstruction_angle.is_none());
        assert!(result.obstruction_height.is_none());
    }

    #[test]
    fn test_exact_four_inch_clearance_is_optimal() {
        let front = row(1, 10.0, 40.0, 0.0);
        let back = row(2, 14.0, 40.0, 8.0);
        let result = evaluate_sightline(&front, &back, 14.0, MaskingSystem::NoMasking);
        assert_eq!(result.status, SightlineStatus::Optimal);
    }

    #[test]
    fn test_small_obstruction_is_acceptable_with_fixed_masking() {
        // Clearance 1in -> obstruction 1in at 180in, about 0.32 degrees
        let front = row(1, 11.0, 42.0, 0.0);
        let back = row(2, 15.0, 42.0, 5.0);
        let result = evaluate_sightline(&front, &back, 15.0, MaskingSystem::FixedRatio);
        assert_eq!(result.status, SightlineStatus::Acceptable);
        assert!(!result.blocked);
        assert_eq!(result.obstruction_height, Some(1.0));
    }

    #[test]
    fn test_flat_floor_depends_on_masking() {
        // No riser: head top is 4in above the back eye, 180in away -> 1.27 degrees
        let front = row(1, 11.0, 42.0, 0.0);
        let back = row(2, 15.0, 42.0, 0.0);

        let fixed = evaluate_sightline(&front, &back, 15.0, MaskingSystem::FixedRatio);
        assert_eq!(fixed.status, SightlineStatus::Warning);
        assert!(fixed.blocked);

        let motorized = evaluate_sightline(&front, &back, 15.0, MaskingSystem::Motorized);
        assert_eq!(motorized.status, SightlineStatus::Acceptable);
        assert!(!motorized.blocked);

        let bare = evaluate_sightline(&front, &back, 15.0, MaskingSystem::NoMasking);
        assert_eq!(bare.status, SightlineStatus::Fail);
        assert!(bare.blocked);
    }

    #[test]
    fn test_height_bound_applies_even_when_angle_is_small() {
        // 5in obstruction seen from 60ft is only 0.4 degrees but exceeds 4in
        let front = row(1, 50.0, 46.0, 0.0);
        let back = row(2, 60.0, 45.0, 0.0);
        let result = evaluate_sightline(&front, &back, 60.0, MaskingSystem::FixedRatio);
        assert!(result.obstruction_angle.unwrap() < 1.0);
        assert_eq!(result.status, SightlineStatus::Warning);
    }

    #[test]
    fn test_motorized_warning_and_fail_tiers() {
        let front = row(1, 11.0, 42.0, 0.0);

        // 7in at 180in: 2.23 degrees, past the 6in acceptable bound
        let warned = evaluate_sightline(
            &front,
            &row(2, 15.0, 39.0, 0.0),
            15.0,
            MaskingSystem::Motorized,
        );
        assert_eq!(warned.obstruction_height, Some(7.0));
        assert!(warned.obstruction_angle.unwrap() < 3.0);
        assert_eq!(warned.status, SightlineStatus::Warning);
        assert!(warned.blocked);

        // 7in at 120in: 3.34 degrees, past the 3 degree warning bound
        let steep = evaluate_sightline(
            &front,
            &row(2, 10.0, 39.0, 0.0),
            10.0,
            MaskingSystem::Motorized,
        );
        assert!(steep.obstruction_angle.unwrap() > 3.0);
        assert_eq!(steep.status, SightlineStatus::Fail);

        // 8in far away: tiny angle, but the 8in height bound is exclusive
        let far_front = row(1, 50.0, 46.0, 0.0);
        let tall = evaluate_sightline(
            &far_front,
            &row(2, 60.0, 42.0, 0.0),
            60.0,
            MaskingSystem::Motorized,
        );
        assert_eq!(tall.obstruction_height, Some(8.0));
        assert!(tall.obstruction_angle.unwrap() < 1.0);
        assert_eq!(tall.status, SightlineStatus::Fail);
    }

    #[test]
    fn test_no_masking_warning_tier() {
        let front = row(1, 11.0, 42.0, 0.0);

        // Exactly 2in at 180in: 0.64 degrees, still a warning
        let edge = evaluate_sightline(
            &front,
            &row(2, 15.0, 44.0, 0.0),
            15.0,
            MaskingSystem::NoMasking,
        );
        assert_eq!(edge.obstruction_height, Some(2.0));
        assert!(edge.obstruction_angle.unwrap() < 1.0);
        assert_eq!(edge.status, SightlineStatus::Warning);
        assert!(edge.blocked);

        // 1.5in at 60in: under 2in but 1.43 degrees
        let close = evaluate_sightline(
            &front,
            &row(2, 5.0, 44.5, 0.0),
            5.0,
            MaskingSystem::NoMasking,
        );
        assert!(close.obstruction_angle.unwrap() > 1.0);
        assert_eq!(close.status, SightlineStatus::Fail);

        // 2.5in far away: small angle, over the height bound
        let far_front = row(1, 50.0, 46.0, 0.0);
        let over = evaluate_sightline(
            &far_front,
            &row(2, 60.0, 47.5, 0.0),
            60.0,
            MaskingSystem::NoMasking,
        );
        assert_eq!(over.obstruction_height, Some(2.5));
        assert_eq!(over.status, SightlineStatus::Fail);

        let bound = MaskingSystem::NoMasking.sightline_tolerance().warning;
        assert!(bound.admits(0.9, 2.0));
        assert!(!bound.admits(1.0, 1.0));
    }

    #[test]
    fn test_no_masking_height_bound_is_inclusive() {
        let bound = MaskingSystem::NoMasking.sightline_tolerance().acceptable;
        assert!(bound.admits(0.1, 0.5));
        let fixed = MaskingSystem::FixedRatio.sightline_tolerance().acceptable;
        assert!(!fixed.admits(0.1, 4.0));
    }
}
