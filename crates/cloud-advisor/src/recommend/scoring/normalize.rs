use super::super::catalog::Feature;
use super::super::domain::{PreferenceLevel, RecommendError, UserPreferences};
use std::collections::BTreeMap;

const DEFAULT_LEVEL: &str = "medium";
const INTENSITY_CEILING: f64 = 9.0;

/// Validate the qualitative level of every feature and convert it to a
/// normalized intensity in (0, 1]. All five features are checked on every
/// call, including ones the caller omitted (those default to "medium").
pub(crate) fn normalize_preferences(
    preferences: &UserPreferences,
) -> Result<BTreeMap<Feature, f64>, RecommendError> {
    let mut normalized = BTreeMap::new();

    for feature in Feature::ALL {
        let raw = preferences.level(feature).unwrap_or(DEFAULT_LEVEL);
        let level = PreferenceLevel::parse(raw).ok_or_else(|| RecommendError::InvalidValue {
            field: feature.key().to_string(),
        })?;
        // Scale to 0-1 so the weighted sum stays in a bounded range.
        normalized.insert(feature, f64::from(level.intensity()) / INTENSITY_CEILING);
    }

    Ok(normalized)
}
