use super::super::catalog::Provider;
use super::round1;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Full certainty is reached when the top two providers are three score
/// points apart.
const FULL_CONFIDENCE_GAP: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Moderate,
    High,
}

impl ConfidenceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Moderate => "Moderate",
            ConfidenceLevel::High => "High",
        }
    }
}

/// Decision certainty derived solely from the absolute gap between the top
/// two provider scores. The gap is absolute rather than relative so the
/// rating stays meaningful when both scores are small but far apart in
/// substance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    #[serde(rename = "confidence_percent")]
    pub percent: f64,
    #[serde(rename = "confidence_level")]
    pub level: ConfidenceLevel,
}

pub fn compute_confidence(scores: &BTreeMap<Provider, f64>) -> Confidence {
    if scores.len() < 2 {
        return Confidence {
            percent: 0.0,
            level: ConfidenceLevel::Low,
        };
    }

    let mut ordered: Vec<f64> = scores.values().copied().collect();
    ordered.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    let difference = ordered[0] - ordered[1];

    let level = if difference >= 1.5 {
        ConfidenceLevel::High
    } else if difference >= 0.8 {
        ConfidenceLevel::Moderate
    } else {
        ConfidenceLevel::Low
    };

    let percent = round1((difference / FULL_CONFIDENCE_GAP * 100.0).clamp(0.0, 100.0));

    Confidence { percent, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(aws: f64, azure: f64, gcp: f64) -> BTreeMap<Provider, f64> {
        [
            (Provider::Aws, aws),
            (Provider::Azure, azure),
            (Provider::Gcp, gcp),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn single_entry_yields_zero_low() {
        let lone: BTreeMap<Provider, f64> = [(Provider::Aws, 6.0)].into_iter().collect();
        let confidence = compute_confidence(&lone);
        assert_eq!(confidence.percent, 0.0);
        assert_eq!(confidence.level, ConfidenceLevel::Low);
    }

    #[test]
    fn moderate_band_starts_at_point_eight() {
        let confidence = compute_confidence(&scores(6.2, 5.1, 5.0));
        assert_eq!(confidence.level, ConfidenceLevel::Moderate);
        assert!((confidence.percent - 36.7).abs() < 1e-9);
    }

    #[test]
    fn high_band_starts_at_one_point_five() {
        let confidence = compute_confidence(&scores(7.0, 5.0, 4.0));
        assert_eq!(confidence.level, ConfidenceLevel::High);
        assert!((confidence.percent - 66.7).abs() < 1e-9);
    }

    #[test]
    fn narrow_gap_is_low() {
        let confidence = compute_confidence(&scores(5.34, 5.03, 4.57));
        assert_eq!(confidence.level, ConfidenceLevel::Low);
    }

    #[test]
    fn percent_is_capped_at_one_hundred() {
        let confidence = compute_confidence(&scores(9.0, 2.0, 1.0));
        assert_eq!(confidence.percent, 100.0);
        assert_eq!(confidence.level, ConfidenceLevel::High);
    }

    #[test]
    fn relabeling_providers_does_not_change_the_rating() {
        let first = compute_confidence(&scores(7.2, 5.4, 4.0));
        let second = compute_confidence(&scores(4.0, 7.2, 5.4));
        assert_eq!(first.percent, second.percent);
        assert_eq!(first.level, second.level);
    }
}
