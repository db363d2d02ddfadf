mod confidence;
mod cost;
mod normalize;
mod weights;

pub use confidence::{compute_confidence, Confidence, ConfidenceLevel};

use super::catalog::{
    Feature, FeatureWeights, Provider, ProviderCatalog, Region, RegionalModifiers,
};
use super::domain::{RecommendError, UserPreferences};
use std::collections::BTreeMap;

/// Weight removed from a provider's score per unit of relative cost when the
/// caller explicitly values low cost. Heuristic constant kept as-is; the
/// most expensive option loses the full amount, cheaper ones proportionally
/// less.
const HIGH_BUDGET_COST_PENALTY: f64 = 0.2;

/// Stateless scorer over the read-only catalog, default weights, and
/// regional modifier tables.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: ProviderCatalog,
    default_weights: FeatureWeights,
    regions: RegionalModifiers,
}

impl ScoringEngine {
    pub fn new(
        catalog: ProviderCatalog,
        default_weights: FeatureWeights,
        regions: RegionalModifiers,
    ) -> Self {
        Self {
            catalog,
            default_weights,
            regions,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            ProviderCatalog::standard(),
            FeatureWeights::standard(),
            RegionalModifiers::standard(),
        )
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    pub fn default_weights(&self) -> &FeatureWeights {
        &self.default_weights
    }

    /// Compute the weighted score per provider.
    ///
    /// Each provider's score is the sum over features of
    /// weight x normalized user intensity x provider feature score, rounded
    /// to 4 decimal places. A recognized region adds its per-provider bonus
    /// (rounded again); an explicit "high" budget preference subtracts a
    /// cost-proportional penalty so the most expensive option is discouraged
    /// from winning.
    pub fn calculate_provider_scores(
        &self,
        preferences: &UserPreferences,
        custom_weights: Option<&BTreeMap<Feature, f64>>,
        region: Option<Region>,
    ) -> Result<BTreeMap<Provider, f64>, RecommendError> {
        let intensity = normalize::normalize_preferences(preferences)?;
        let weights = weights::select_weights(&self.default_weights, custom_weights);

        let mut scores = BTreeMap::new();
        for provider in Provider::ALL {
            let profile = self.catalog.profile(provider);
            let mut score = 0.0;
            for feature in Feature::ALL {
                let weight = weights.get(&feature).copied().unwrap_or(0.0);
                let user_intensity = intensity.get(&feature).copied().unwrap_or(0.0);
                score += weight * user_intensity * f64::from(profile.feature_score(feature));
            }
            scores.insert(provider, round4(score));
        }

        if let Some(region) = region {
            for (provider, score) in scores.iter_mut() {
                *score = round4(*score + self.regions.modifier(region, *provider));
            }
        }

        if preferences.wants_high_budget() {
            let costs = self.estimated_costs(preferences);
            let max_cost = costs.values().copied().max().unwrap_or(0);
            if max_cost > 0 {
                for (provider, score) in scores.iter_mut() {
                    let cost = costs.get(provider).copied().unwrap_or(0);
                    let penalty =
                        HIGH_BUDGET_COST_PENALTY * (f64::from(cost) / f64::from(max_cost));
                    *score = round4(*score - penalty);
                }
            }
        }

        Ok(scores)
    }

    /// Estimated monthly cost (USD) for one provider. Deterministic; no
    /// external pricing lookups.
    pub fn estimated_cost(&self, preferences: &UserPreferences, provider: Provider) -> u32 {
        cost::estimated_cost(self.catalog.profile(provider), preferences)
    }

    pub fn estimated_costs(&self, preferences: &UserPreferences) -> BTreeMap<Provider, u32> {
        Provider::ALL
            .into_iter()
            .map(|provider| (provider, self.estimated_cost(preferences, provider)))
            .collect()
    }
}

/// Arg-max over the fixed provider order; a tie keeps the earlier provider
/// (aws before azure before gcp), so selection is reproducible.
pub fn select_provider(scores: &BTreeMap<Provider, f64>) -> Option<Provider> {
    let mut best: Option<(Provider, f64)> = None;
    for provider in Provider::ALL {
        let Some(&score) = scores.get(&provider) else {
            continue;
        };
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((provider, score)),
        }
    }
    best.map(|(provider, _)| provider)
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
