use super::super::catalog::{Feature, ProviderProfile};
use super::super::domain::UserPreferences;

/// Estimate the monthly cost (USD) for one provider from its base pricing
/// and the preferences that drive resource consumption.
///
/// The multiplier accumulates additively over the base of 1.0:
/// scalability high +0.30 / medium +0.15, security high +0.20 /
/// medium +0.10, team expertise low +0.10. Level strings are lowercased
/// here; absent or empty values count as "medium".
pub(crate) fn estimated_cost(profile: &ProviderProfile, preferences: &UserPreferences) -> u32 {
    let base_total = f64::from(profile.base_monthly_cost());

    let mut multiplier = 1.0;
    match level_or_medium(preferences.level(Feature::Scalability)).as_str() {
        "high" => multiplier += 0.30,
        "medium" => multiplier += 0.15,
        _ => {}
    }
    match level_or_medium(preferences.level(Feature::Security)).as_str() {
        "high" => multiplier += 0.20,
        "medium" => multiplier += 0.10,
        _ => {}
    }
    if level_or_medium(preferences.team_expertise.as_deref()) == "low" {
        multiplier += 0.10;
    }

    (base_total * multiplier).round() as u32
}

fn level_or_medium(raw: Option<&str>) -> String {
    match raw {
        Some(value) if !value.is_empty() => value.to_lowercase(),
        _ => "medium".to_string(),
    }
}
