//! Viewing geometry primitives
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

use crate::constants::{INCHES_PER_FOOT, MIN_SCREEN_CLEARANCE_IN};
use crate::types::AspectRatio;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Visible image size (inches)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScreenDimensions {
    pub width: f64,
    pub height: f64,
}

/// Vertical angles from a seated eye to the screen edges (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VerticalAngles {
    /// Eye to top edge
    pub to_top: f64,
    /// Eye to bottom edge
    pub to_bottom: f64,
    /// Sum of both sub-angles
    pub total: f64,
}

/// Whether the screen fits between the side walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScreenFit {
    pub fits: bool,
    pub screen_width_inches: f64,
    pub room_width_inches: f64,
    /// Room width minus screen width (negative when the screen is wider)
    pub margin_inches: f64,
}

/// Solve image width and height from the diagonal and aspect ratio
///
/// height = diagonal / sqrt(ratio² + 1), width = height * ratio
pub fn screen_dimensions(diagonal: f64, aspect_ratio: AspectRatio) -> ScreenDimensions {
    let ratio = aspect_ratio.ratio();
    let height = diagonal / (ratio * ratio + 1.0).sqrt();
    ScreenDimensions {
        width: height * ratio,
        height,
    }
}

/// Angles from an eye at `eye_height` (inches) to the top and bottom of the
/// image, viewed from `distance_feet`.
pub fn vertical_viewing_angle(
    screen_height: f64,
    bottom_edge: f64,
    eye_height: f64,
    distance_feet: f64,
) -> VerticalAngles {
    let distance_inches = distance_feet * INCHES_PER_FOOT;
    let screen_top = bottom_edge + screen_height;

    let to_top = ((screen_top - eye_height) / distance_inches)
        .atan()
        .to_degrees()
        .abs();
    let to_bottom = ((eye_height - bottom_edge) / distance_inches)
        .atan()
        .to_degrees()
        .abs();

    VerticalAngles {
        to_top,
        to_bottom,
        total: to_top + to_bottom,
    }
}

/// Full edge-to-edge horizontal angle (degrees)
pub fn horizontal_viewing_angle(screen_width: f64, distance_feet: f64) -> f64 {
    let distance_inches = distance_feet * INCHES_PER_FOOT;
    2.0 * (screen_width / 2.0 / distance_inches).atan().to_degrees()
}

/// Check that the screen leaves the side clearance inside the room width
pub fn screen_fits_room(diagonal: f64, aspect_ratio: AspectRatio, room_width_feet: f64) -> ScreenFit {
    let screen_width_inches = screen_dimensions(diagonal, aspect_ratio).width;
    let room_width_inches = room_width_feet * INCHES_PER_FOOT;

    ScreenFit {
        fits: screen_width_inches <= room_width_inches - MIN_SCREEN_CLEARANCE_IN,
        screen_width_inches,
        room_width_inches,
        margin_inches: room_width_inches - screen_width_inches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_dimensions_120_inch_16_9() {
        let dims = screen_dimensions(120.0, AspectRatio::Widescreen);
        assert!((dims.width - 104.589).abs() < 1e-3);
        assert!((dims.height - 58.831).abs() < 1e-3);
    }

    #[test]
    fn test_screen_dimensions_keep_ratio_and_diagonal() {
        for ratio in [
            AspectRatio::Widescreen,
            AspectRatio::Scope235,
            AspectRatio::Scope240,
        ] {
            let dims = screen_dimensions(135.0, ratio);
            assert!((dims.width / dims.height - ratio.ratio()).abs() < 1e-9);
            let diagonal = (dims.width * dims.width + dims.height * dims.height).sqrt();
            assert!((diagonal - 135.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vertical_angle_front_row() {
        let dims = screen_dimensions(120.0, AspectRatio::Widescreen);
        let angles = vertical_viewing_angle(dims.height, 24.0, 42.0, 11.0);
        assert!((angles.to_top - 17.1883).abs() < 1e-3);
        assert!((angles.to_bottom - 7.7652).abs() < 1e-3);
        assert!((angles.total - (angles.to_top + angles.to_bottom)).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_angle_eye_above_screen_top_is_absolute() {
        let angles = vertical_viewing_angle(30.0, 24.0, 60.0, 10.0);
        // Eye is 6 inches above the top edge
        let expected_top = (6.0_f64 / 120.0).atan().to_degrees();
        assert!((angles.to_top - expected_top).abs() < 1e-9);
        assert!(angles.to_top >= 0.0);
    }

    #[test]
    fn test_horizontal_angle() {
        let angle = horizontal_viewing_angle(104.589_064_454_945_9, 11.0);
        assert!((angle - 43.224).abs() < 1e-3);
    }

    #[test]
    fn test_screen_fit_boundary() {
        let fit = screen_fits_room(120.0, AspectRatio::Widescreen, 14.0);
        assert!(fit.fits);
        assert_eq!(fit.room_width_inches, 168.0);
        assert!((fit.margin_inches - (168.0 - fit.screen_width_inches)).abs() < 1e-12);

        // 104.6in image needs 110.6in of wall; 9ft is 108in
        let tight = screen_fits_room(120.0, AspectRatio::Widescreen, 9.0);
        assert!(!tight.fits);
        assert!(tight.margin_inches > 0.0);

        let too_wide = screen_fits_room(160.0, AspectRatio::Scope240, 10.0);
        assert!(!too_wide.fits);
        assert!(too_wide.margin_inches < 0.0);
    }
}
