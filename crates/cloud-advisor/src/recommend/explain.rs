use super::catalog::{Feature, FeatureWeights, Provider, ProviderCatalog};
use super::domain::{PreferenceLevel, UserPreferences};
use super::rules::ServiceModelDecision;
use std::cmp::Ordering;
use std::collections::BTreeMap;

const TOP_CRITERIA: usize = 3;
const MAX_STRENGTHS: usize = 3;
/// Influence intensity assumed for absent or unrecognized levels.
const DEFAULT_INFLUENCE: f64 = 6.0;

/// Build the deterministic explanation lines: the provider sentence naming
/// the highest-influence criteria, the provider's key strengths, and the
/// service-model reason. Does not recalculate scores or select a provider.
pub(crate) fn generate_explanation(
    preferences: &UserPreferences,
    scores: &BTreeMap<Provider, f64>,
    selected: Provider,
    decision: Option<&ServiceModelDecision>,
    catalog: &ProviderCatalog,
    weights: &FeatureWeights,
) -> Vec<String> {
    let mut lines = Vec::new();

    let ranked = rank_criteria_by_influence(preferences, weights);
    let criteria: Vec<&str> = ranked
        .iter()
        .take(TOP_CRITERIA)
        .filter(|(_, influence)| *influence > 0.0)
        .map(|(feature, _)| feature.label())
        .collect();

    let provider_name = selected.id().to_uppercase();
    if criteria.is_empty() {
        lines.push(format!(
            "{provider_name} was selected as the recommended provider."
        ));
    } else {
        let criteria_text = criteria.join(", ");
        match scores.get(&selected) {
            Some(&score) => lines.push(format!(
                "{provider_name} was selected (score: {}) based on your priorities: {criteria_text}.",
                format_score(score)
            )),
            None => lines.push(format!(
                "{provider_name} was selected based on your priorities: {criteria_text}."
            )),
        }
    }

    let strengths = catalog.profile(selected).strengths();
    if !strengths.is_empty() {
        let strength_text = strengths
            .iter()
            .take(MAX_STRENGTHS)
            .copied()
            .collect::<Vec<_>>()
            .join("; ");
        lines.push(format!("Key strengths: {strength_text}."));
    }

    match decision {
        Some(decision) if !decision.reason.is_empty() => lines.push(decision.reason.clone()),
        _ => lines.push("Service model: default recommendation applied.".to_string()),
    }

    lines
}

/// Rank features by default weight x stated-level intensity, descending.
/// The sort is stable over the fixed feature order, so ties are
/// reproducible.
fn rank_criteria_by_influence(
    preferences: &UserPreferences,
    weights: &FeatureWeights,
) -> Vec<(Feature, f64)> {
    let mut influence: Vec<(Feature, f64)> = Feature::ALL
        .into_iter()
        .map(|feature| {
            let intensity = preferences
                .level(feature)
                .and_then(PreferenceLevel::parse)
                .map(|level| f64::from(level.intensity()))
                .unwrap_or(DEFAULT_INFLUENCE);
            (feature, weights.get(feature) * intensity)
        })
        .collect();

    influence.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    influence
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        score.to_string()
    }
}
