//! Project analysis: validation, per-row orchestration, scoring and certification
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
    BASS_LEAKAGE_PENALTY, COMPLIANT_MIN_SCORE, FAIL_ROW_PENALTY, MAX_SCORE, MIN_SCREEN_CLEARANCE_IN,
    OPTIMAL_ROW_BONUS, TREATMENT_PLAN_MAX_FREQUENCY_HZ, WARNING_ROW_PENALTY,
};
use crate::error::{CineCertError, Result};
use crate::geometry::{ScreenDimensions, ScreenFit, screen_dimensions, screen_fits_room};
use crate::modes::{RoomModeResult, calculate_room_modes};
use crate::row::{RowAnalysis, RowStatus, ViewingContext, analyze_row};
use crate::rt60::{Rt60Analysis, estimate_rt60};
use crate::treatment::TreatmentPrescription;
use crate::types::{ProjectConfig, SeatingRow};
use log::{info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Certification tier of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Certification {
    CediaCompliant,
    Acceptable,
    RequiresRevision,
}

impl Certification {
    pub fn label(self) -> &'static str {
        match self {
            Certification::CediaCompliant => "CEDIA Compliant",
            Certification::Acceptable => "Acceptable",
            Certification::RequiresRevision => "Requires Revision",
        }
    }
}

/// Complete analysis of one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Rows ordered from the screen backwards
    pub rows: Vec<RowAnalysis>,
    /// Axial modes ordered by frequency
    pub room_modes: Vec<RoomModeResult>,
    /// 0-100
    pub score: f64,
    pub certification: Certification,
    pub rt60: Rt60Analysis,
    /// One prescription per treatment type, lowest frequency first
    pub treatments: Vec<TreatmentPrescription>,
    pub bass_leakage_warning: bool,
    pub screen_dimensions: ScreenDimensions,
    pub screen_fit: ScreenFit,
}

impl AnalysisResult {
    fn count(&self, status: RowStatus) -> usize {
        self.rows
            .iter()
            .filter(|r| r.overall_status == status)
            .count()
    }

    pub fn failed_rows(&self) -> usize {
        self.count(RowStatus::Fail)
    }

    pub fn warning_rows(&self) -> usize {
        self.count(RowStatus::Warning)
    }

    pub fn optimal_rows(&self) -> usize {
        self.count(RowStatus::Optimal)
    }

    pub fn acceptable_rows(&self) -> usize {
        self.count(RowStatus::Acceptable)
    }

    pub fn is_compliant(&self) -> bool {
        self.certification == Certification::CediaCompliant
    }
}

/// Positive and finite
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Zero or positive, and finite
fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn validate_row(position: usize, row: &SeatingRow) -> Result<()> {
    let reason = if !is_positive(row.distance_from_screen) {
        Some(format!(
            "distance from screen must be > 0 ft (got {})",
            row.distance_from_screen
        ))
    } else if !is_non_negative(row.ear_height) {
        Some(format!("ear height must be >= 0 in (got {})", row.ear_height))
    } else if !is_non_negative(row.riser_height) {
        Some(format!(
            "riser height must be >= 0 in (got {})",
            row.riser_height
        ))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CineCertError::InvalidRow {
            position,
            row_id: row.id,
            reason,
        }),
        None => Ok(()),
    }
}

/// Reject configurations the numeric pipeline cannot handle.
///
/// Checks run in a fixed order and the first violation is returned.
pub fn validate_project(config: &ProjectConfig) -> Result<()> {
    let room = &config.room;
    if !(is_positive(room.length) && is_positive(room.width) && is_positive(room.height)) {
        return Err(CineCertError::InvalidRoomDimensions {
            length: room.length,
            width: room.width,
            height: room.height,
        });
    }

    if !is_positive(config.screen.diagonal) {
        return Err(CineCertError::InvalidScreenSize {
            diagonal: config.screen.diagonal,
        });
    }

    if config.rows.is_empty() {
        return Err(CineCertError::EmptySeatingPlan);
    }

    for (index, row) in config.rows.iter().enumerate() {
        validate_row(index + 1, row)?;
    }

    let mut seen = HashSet::new();
    for row in &config.rows {
        if !seen.insert(row.id) {
            return Err(CineCertError::DuplicateRowId { row_id: row.id });
        }
    }

    Ok(())
}

/// Apply the scoring policy; an unfit screen scores zero.
pub fn score_rows(rows: &[RowAnalysis], screen_fits: bool, bass_leakage_warning: bool) -> f64 {
    if !screen_fits {
        return 0.0;
    }

    let mut score = MAX_SCORE;
    for row in rows {
        match row.overall_status {
            RowStatus::Fail => score -= FAIL_ROW_PENALTY,
            RowStatus::Warning => score -= WARNING_ROW_PENALTY,
            RowStatus::Optimal => score += OPTIMAL_ROW_BONUS,
            RowStatus::Acceptable => {}
        }
    }
    if bass_leakage_warning {
        score -= BASS_LEAKAGE_PENALTY;
    }

    score.clamp(0.0, MAX_SCORE)
}

/// Derive the certification tier from fit, row verdicts and score.
pub fn certify(rows: &[RowAnalysis], screen_fits: bool, score: f64) -> Certification {
    let any = |status: RowStatus| rows.iter().any(|r| r.overall_status == status);

    if !screen_fits || any(RowStatus::Fail) {
        Certification::RequiresRevision
    } else if any(RowStatus::Warning) || score < COMPLIANT_MIN_SCORE {
        Certification::Acceptable
    } else {
        Certification::CediaCompliant
    }
}

/// One prescription per treatment type from modes up to 200 Hz, keeping the
/// lowest-frequency occurrence.
pub fn treatment_plan(modes: &[RoomModeResult]) -> Vec<TreatmentPrescription> {
    let mut seen = HashSet::new();
    modes
        .iter()
        .filter(|mode| mode.frequency <= TREATMENT_PLAN_MAX_FREQUENCY_HZ)
        .filter(|mode| seen.insert(mode.treatment.treatment_type))
        .map(|mode| mode.treatment.clone())
        .collect()
}

fn force_unfit_screen(analysis: &mut RowAnalysis, fit: &ScreenFit) {
    analysis.overall_status = analysis.overall_status.max(RowStatus::Warning);
    let action = format!(
        "ACTION REQUIRED: reduce the screen size or widen the room; the screen needs {:.0} in of clearance inside the side walls",
        MIN_SCREEN_CLEARANCE_IN
    );
    let critical = format!(
        "CRITICAL: screen width {:.1} in does not fit the {:.1} in room width",
        fit.screen_width_inches, fit.room_width_inches
    );
    analysis.notes.insert(0, critical);
    analysis.notes.insert(0, action);
}

/// Analyze a complete project.
///
/// The configuration is validated first; nothing is computed when it is
/// rejected.
pub fn analyze_project(config: &ProjectConfig) -> Result<AnalysisResult> {
    validate_project(config)?;

    let mut rows: Vec<SeatingRow> = config.rows.clone();
    rows.sort_by(|a, b| a.distance_from_screen.total_cmp(&b.distance_from_screen));

    let screen = screen_dimensions(config.screen.diagonal, config.screen.aspect_ratio);
    let screen_fit = screen_fits_room(
        config.screen.diagonal,
        config.screen.aspect_ratio,
        config.room.width,
    );
    if !screen_fit.fits {
        warn!(
            "screen width {:.1} in does not fit room width {:.1} in",
            screen_fit.screen_width_inches, screen_fit.room_width_inches
        );
    }

    let context = ViewingContext {
        screen,
        bottom_edge_height: config.screen.bottom_edge_height,
        masking: config.screen.masking,
        content_standard: config.content_standard,
    };

    let mut row_analyses: Vec<RowAnalysis> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let predecessor = index.checked_sub(1).map(|prev| &rows[prev]);
            analyze_row(row, predecessor, &context)
        })
        .collect();

    if !screen_fit.fits {
        for analysis in &mut row_analyses {
            force_unfit_screen(analysis, &screen_fit);
        }
    }

    let room_modes = calculate_room_modes(&config.room, config.wall_construction);
    let rt60 = estimate_rt60(&config.room, config.wall_construction);
    let treatments = treatment_plan(&room_modes);
    let bass_leakage_warning = config.wall_construction.leaks_bass();

    let score = score_rows(&row_analyses, screen_fit.fits, bass_leakage_warning);
    let certification = certify(&row_analyses, screen_fit.fits, score);

    info!(
        "analyzed {} rows and {} modes: score {:.0}, {}",
        row_analyses.len(),
        room_modes.len(),
        score,
        certification.label()
    );

    Ok(AnalysisResult {
        rows: row_analyses,
        room_modes,
        score,
        certification,
        rt60,
        treatments,
        bass_leakage_warning,
        screen_dimensions: screen,
        screen_fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AspectRatio, ContentStandard, MaskingSystem, RoomDimensions, ScreenConfig,
        WallConstruction, default_config_version,
    };

    fn row(id: u32, distance: f64, ear: f64, riser: f64) -> SeatingRow {
        SeatingRow {
            id,
            distance_from_screen: distance,
            ear_height: ear,
            riser_height: riser,
        }
    }

    fn project(rows: Vec<SeatingRow>) -> ProjectConfig {
        ProjectConfig {
            version: default_config_version(),
            name: "test".to_string(),
            room: RoomDimensions {
                length: 20.0,
                width: 14.0,
                height: 9.0,
            },
            screen: ScreenConfig {
                diagonal: 120.0,
                aspect_ratio: AspectRatio::Widescreen,
                bottom_edge_height: 24.0,
                masking: MaskingSystem::FixedRatio,
            },
            rows,
            wall_construction: WallConstruction::Hybrid,
            content_standard: ContentStandard::Hdr,
        }
    }

    fn with_status(status: RowStatus) -> RowAnalysis {
        let config = project(vec![row(1, 11.0, 42.0, 0.0)]);
        let mut analysis = analyze_project(&config).unwrap().rows.remove(0);
        analysis.overall_status = status;
        analysis
    }

    #[test]
    fn test_validation_order() {
        let mut config = project(vec![]);
        config.room.width = 0.0;
        config.screen.diagonal = -1.0;
        assert!(matches!(
            validate_project(&config),
            Err(CineCertError::InvalidRoomDimensions { .. })
        ));

        config.room.width = 14.0;
        assert!(matches!(
            validate_project(&config),
            Err(CineCertError::InvalidScreenSize { .. })
        ));

        config.screen.diagonal = 120.0;
        assert!(matches!(
            validate_project(&config),
            Err(CineCertError::EmptySeatingPlan)
        ));
    }

    #[test]
    fn test_invalid_row_reports_position() {
        let config = project(vec![row(4, 11.0, 42.0, 0.0), row(9, 15.0, -1.0, 0.0)]);
        match validate_project(&config) {
            Err(CineCertError::InvalidRow {
                position, row_id, ..
            }) => {
                assert_eq!(position, 2);
                assert_eq!(row_id, 9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut config = project(vec![row(1, 11.0, 42.0, 0.0)]);
        config.room.height = f64::NAN;
        assert!(matches!(
            analyze_project(&config),
            Err(CineCertError::InvalidRoomDimensions { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let config = project(vec![row(1, 11.0, 42.0, 0.0), row(1, 15.0, 42.0, 10.0)]);
        assert!(matches!(
            analyze_project(&config),
            Err(CineCertError::DuplicateRowId { row_id: 1 })
        ));
    }

    #[test]
    fn test_rows_are_sorted_by_distance() {
        let config = project(vec![row(7, 15.0, 42.0, 10.0), row(3, 11.0, 42.0, 0.0)]);
        let result = analyze_project(&config).unwrap();
        let ids: Vec<u32> = result.rows.iter().map(|r| r.row_id).collect();
        assert_eq!(ids, vec![3, 7]);
        assert!(result.rows[0].sightline_clearance.is_none());
        assert_eq!(result.rows[1].sightline_clearance, Some(6.0));
    }

    #[test]
    fn test_row_counts_cover_every_row() {
        let config = project(vec![row(1, 11.0, 42.0, 0.0), row(2, 15.0, 42.0, 10.0)]);
        let result = analyze_project(&config).unwrap();
        assert_eq!(result.acceptable_rows(), 1);
        assert_eq!(result.optimal_rows(), 1);
        assert_eq!(result.warning_rows(), 0);
        assert_eq!(result.failed_rows(), 0);
        assert_eq!(
            result.optimal_rows()
                + result.acceptable_rows()
                + result.warning_rows()
                + result.failed_rows(),
            result.rows.len()
        );
    }

    #[test]
    fn test_scoring_policy() {
        let rows = vec![
            with_status(RowStatus::Fail),
            with_status(RowStatus::Warning),
            with_status(RowStatus::Optimal),
            with_status(RowStatus::Acceptable),
        ];
        assert_eq!(score_rows(&rows, true, false), 100.0 - 25.0 - 8.0 + 2.0);
        assert_eq!(score_rows(&rows, true, true), 100.0 - 25.0 - 8.0 + 2.0 - 2.0);
        assert_eq!(score_rows(&rows, false, false), 0.0);

        let many_fails: Vec<RowAnalysis> = (0..5).map(|_| with_status(RowStatus::Fail)).collect();
        assert_eq!(score_rows(&many_fails, true, true), 0.0);

        let optimal: Vec<RowAnalysis> = (0..3).map(|_| with_status(RowStatus::Optimal)).collect();
        assert_eq!(score_rows(&optimal, true, false), 100.0);
    }

    #[test]
    fn test_certification_policy() {
        let fine = vec![with_status(RowStatus::Optimal)];
        assert_eq!(certify(&fine, true, 100.0), Certification::CediaCompliant);
        assert_eq!(certify(&fine, true, 79.0), Certification::Acceptable);
        assert_eq!(certify(&fine, false, 100.0), Certification::RequiresRevision);

        let warned = vec![with_status(RowStatus::Warning)];
        assert_eq!(certify(&warned, true, 92.0), Certification::Acceptable);

        let failed = vec![with_status(RowStatus::Fail)];
        assert_eq!(certify(&failed, true, 75.0), Certification::RequiresRevision);
    }

    #[test]
    fn test_treatment_plan_is_deduplicated() {
        let config = project(vec![row(1, 11.0, 42.0, 0.0)]);
        let result = analyze_project(&config).unwrap();
        let types: Vec<_> = result.treatments.iter().map(|t| t.treatment_type).collect();
        let unique: HashSet<_> = types.iter().collect();
        assert_eq!(types.len(), unique.len());
        assert_eq!(types.len(), 3);
        assert!((result.treatments[0].frequency - 28.125).abs() < 1e-9);
        assert!(result.treatments.iter().all(|t| t.frequency <= 200.0));
    }

    #[test]
    fn test_unfit_screen_notes_come_first() {
        let mut config = project(vec![row(1, 11.0, 42.0, 0.0)]);
        config.room.width = 8.0;
        let result = analyze_project(&config).unwrap();
        let notes = &result.rows[0].notes;
        assert!(notes[0].starts_with("ACTION REQUIRED"));
        assert!(notes[1].starts_with("CRITICAL"));
        assert!(notes[1].contains("104.6"));
        assert!(notes[1].contains("96.0"));
        assert_eq!(result.rows[0].overall_status, RowStatus::Warning);
        assert_eq!(result.score, 0.0);
    }
}
