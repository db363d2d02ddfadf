use super::super::catalog::{Feature, FeatureWeights};
use std::collections::BTreeMap;

/// Choose the weights used for scoring.
///
/// A custom override is honored only when it carries a finite, non-negative
/// value for every feature and the values sum to something positive; the
/// override is then normalized to sum to 1.0. Every other case silently
/// falls back to the defaults so the scorer always stays executable.
pub(crate) fn select_weights(
    defaults: &FeatureWeights,
    custom: Option<&BTreeMap<Feature, f64>>,
) -> BTreeMap<Feature, f64> {
    let Some(custom) = custom else {
        return defaults.as_map().clone();
    };

    let mut raw = BTreeMap::new();
    let mut total = 0.0;
    for feature in Feature::ALL {
        let Some(&value) = custom.get(&feature) else {
            return defaults.as_map().clone();
        };
        if !value.is_finite() || value < 0.0 {
            return defaults.as_map().clone();
        }
        raw.insert(feature, value);
        total += value;
    }

    if total <= 0.0 {
        return defaults.as_map().clone();
    }

    raw.into_iter().map(|(feature, value)| (feature, value / total)).collect()
}
