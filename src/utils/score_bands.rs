/// Score Band Lookup Tables
///
/// Maps continuous scores onto discrete presentation bands.
///
/// - Sustainability index (0-100, higher = better): descending minimum
///   thresholds, the highest qualifying minimum wins.
/// - Environmental score (0-100, higher = worse): ascending maximum
///   thresholds, the lowest qualifying maximum wins.
///
/// Inputs outside every band (negative, above 100 for the environmental
/// table, NaN) fall back to the most extreme band so callers always get a
/// result.
use serde::Serialize;

/// Presentation band for a sustainability index
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBand {
    pub min: f64,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Presentation band for a raw environmental score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentalBand {
    pub max: f64,
    pub label: &'static str,
    pub color: &'static str,
}

static SUSTAINABILITY_BANDS: &[ScoreBand] = &[
    ScoreBand { min: 80.0, label: "Excellent", icon: "🌿", color: "#2e7d32" },
    ScoreBand { min: 60.0, label: "Good", icon: "🌱", color: "#66bb6a" },
    ScoreBand { min: 40.0, label: "Moderate", icon: "🍃", color: "#fbc02d" },
    ScoreBand { min: 20.0, label: "Poor", icon: "⚠️", color: "#fb8c00" },
    ScoreBand { min: 0.0, label: "Very poor", icon: "🔴", color: "#c62828" },
];

static ENVIRONMENTAL_BANDS: &[EnvironmentalBand] = &[
    EnvironmentalBand { max: 20.0, label: "Very low impact", color: "#2e7d32" },
    EnvironmentalBand { max: 40.0, label: "Low impact", color: "#66bb6a" },
    EnvironmentalBand { max: 60.0, label: "Moderate impact", color: "#fbc02d" },
    EnvironmentalBand { max: 80.0, label: "High impact", color: "#fb8c00" },
    EnvironmentalBand { max: 100.0, label: "Very high impact", color: "#c62828" },
];

/// Evaluate a sustainability index
pub fn evaluate(score: f64) -> ScoreBand {
    SUSTAINABILITY_BANDS
        .iter()
        .find(|band| score >= band.min)
        .copied()
        .unwrap_or(SUSTAINABILITY_BANDS[SUSTAINABILITY_BANDS.len() - 1])
}

/// Evaluate a raw environmental score
pub fn environmental_label(env: f64) -> EnvironmentalBand {
    ENVIRONMENTAL_BANDS
        .iter()
        .find(|band| env <= band.max)
        .copied()
        .unwrap_or(ENVIRONMENTAL_BANDS[ENVIRONMENTAL_BANDS.len() - 1])
}
