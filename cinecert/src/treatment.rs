//! Low-frequency treatment prescriptions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of absorber to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentType {
    /// Membrane absorber tuned to the lowest modes
    DiaphragmaticAbsorber,
    /// Porous core with a limp membrane facing
    HybridBassTrap,
    /// Thick porous panel
    BroadbandPorousAbsorber,
}

impl TreatmentType {
    pub fn label(self) -> &'static str {
        match self {
            TreatmentType::DiaphragmaticAbsorber => "diaphragmatic (membrane) absorber",
            TreatmentType::HybridBassTrap => "hybrid bass trap",
            TreatmentType::BroadbandPorousAbsorber => "broadband porous absorber",
        }
    }
}

/// Where the absorber goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Floor and ceiling tri-corners
    TriCorner,
    /// Front wall and side walls
    FrontSideWalls,
    /// Rear wall and ceiling
    RearWallCeiling,
}

impl Placement {
    pub fn label(self) -> &'static str {
        match self {
            Placement::TriCorner => "tri-corners (wall/wall/ceiling and wall/wall/floor)",
            Placement::FrontSideWalls => "front and side walls",
            Placement::RearWallCeiling => "rear wall and ceiling",
        }
    }
}

/// Treatment recommendation for one problem frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TreatmentPrescription {
    /// Frequency the prescription was derived from (Hz)
    pub frequency: f64,
    pub treatment_type: TreatmentType,
    pub placement: Placement,
    /// Minimum build depth (inches)
    pub min_depth_inches: f64,
    /// Maximum build depth (inches)
    pub max_depth_inches: f64,
    pub description: String,
}

fn treatment_for(frequency: f64) -> (TreatmentType, f64, f64) {
    if frequency < 40.0 {
        (TreatmentType::DiaphragmaticAbsorber, 6.0, 12.0)
    } else if frequency <= 80.0 {
        (TreatmentType::HybridBassTrap, 12.0, 16.0)
    } else {
        (TreatmentType::BroadbandPorousAbsorber, 4.0, 6.0)
    }
}

fn placement_for(frequency: f64) -> Placement {
    if frequency < 50.0 {
        Placement::TriCorner
    } else if frequency <= 100.0 {
        Placement::FrontSideWalls
    } else {
        Placement::RearWallCeiling
    }
}

/// Prescribe treatment for a problem frequency (Hz)
pub fn prescribe_treatment(frequency: f64) -> TreatmentPrescription {
    let (treatment_type, min_depth_inches, max_depth_inches) = treatment_for(frequency);
    let placement = placement_for(frequency);

    let description = format!(
        "{:.1} Hz: {} at {}, {:.0}-{:.0} in deep",
        frequency,
        treatment_type.label(),
        placement.label(),
        min_depth_inches,
        max_depth_inches
    );

    TreatmentPrescription {
        frequency,
        treatment_type,
        placement,
        min_depth_inches,
        max_depth_inches,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(
            prescribe_treatment(39.9).treatment_type,
            TreatmentType::DiaphragmaticAbsorber
        );
        assert_eq!(prescribe_treatment(40.0).treatment_type, TreatmentType::HybridBassTrap);
        assert_eq!(prescribe_treatment(80.0).treatment_type, TreatmentType::HybridBassTrap);
        assert_eq!(
            prescribe_treatment(80.1).treatment_type,
            TreatmentType::BroadbandPorousAbsorber
        );
    }

    #[test]
    fn test_placement_edges() {
        assert_eq!(prescribe_treatment(49.9).placement, Placement::TriCorner);
        assert_eq!(prescribe_treatment(50.0).placement, Placement::FrontSideWalls);
        assert_eq!(prescribe_treatment(100.0).placement, Placement::FrontSideWalls);
        assert_eq!(prescribe_treatment(100.1).placement, Placement::RearWallCeiling);
    }

    #[test]
    fn test_depths() {
        let low = prescribe_treatment(28.0);
        assert_eq!((low.min_depth_inches, low.max_depth_inches), (6.0, 12.0));
        let mid = prescribe_treatment(60.0);
        assert_eq!((mid.min_depth_inches, mid.max_depth_inches), (12.0, 16.0));
        let high = prescribe_treatment(150.0);
        assert_eq!((high.min_depth_inches, high.max_depth_inches), (4.0, 6.0));
    }

    #[test]
    fn test_prescription_is_pure() {
        for freq in [12.5, 40.0, 56.25, 80.357, 187.5, 299.0] {
            assert_eq!(prescribe_treatment(freq), prescribe_treatment(freq));
        }
    }
}
