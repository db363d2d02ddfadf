use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three providers the advisor can recommend. `ALL` fixes the iteration
/// order (aws, azure, gcp); score maps, tie-breaks, and response payloads all
/// follow it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Aws, Provider::Azure, Provider::Gcp];

    pub const fn id(self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
        }
    }
}

/// The five scored preference dimensions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Budget,
    Scalability,
    Security,
    EaseOfUse,
    FreeTier,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Budget,
        Feature::Scalability,
        Feature::Security,
        Feature::EaseOfUse,
        Feature::FreeTier,
    ];

    /// Wire key as it appears in request payloads and weight maps.
    pub const fn key(self) -> &'static str {
        match self {
            Feature::Budget => "budget",
            Feature::Scalability => "scalability",
            Feature::Security => "security",
            Feature::EaseOfUse => "ease_of_use",
            Feature::FreeTier => "free_tier",
        }
    }

    /// Human-readable name used in explanation sentences.
    pub const fn label(self) -> &'static str {
        match self {
            Feature::Budget => "budget",
            Feature::Scalability => "scalability",
            Feature::Security => "security",
            Feature::EaseOfUse => "ease of use",
            Feature::FreeTier => "free tier",
        }
    }

    pub fn from_key(key: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|feature| feature.key() == key)
    }
}

/// Deployment regions carrying per-provider score modifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    India,
    Us,
    Europe,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::India, Region::Us, Region::Europe];

    pub fn parse(raw: &str) -> Option<Region> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "india" => Some(Region::India),
            "us" => Some(Region::Us),
            "europe" => Some(Region::Europe),
            _ => None,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Region::India => "india",
            Region::Us => "us",
            Region::Europe => "europe",
        }
    }
}

/// Static profile for one provider: per-feature scores on a 3-10 scale,
/// ordered strength statements, and base monthly pricing in USD.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    feature_scores: BTreeMap<Feature, u8>,
    strengths: Vec<&'static str>,
    base_compute: u32,
    base_storage: u32,
}

impl ProviderProfile {
    pub fn feature_score(&self, feature: Feature) -> u8 {
        self.feature_scores.get(&feature).copied().unwrap_or(0)
    }

    pub fn strengths(&self) -> &[&'static str] {
        &self.strengths
    }

    pub fn base_monthly_cost(&self) -> u32 {
        self.base_compute + self.base_storage
    }
}

/// Read-only provider table, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    profiles: BTreeMap<Provider, ProviderProfile>,
}

impl ProviderCatalog {
    /// Each provider is specialized with clear strengths and weaknesses so
    /// different inputs yield different winners.
    pub fn standard() -> Self {
        let mut profiles = BTreeMap::new();

        profiles.insert(
            Provider::Aws,
            ProviderProfile {
                feature_scores: feature_scores([
                    (Feature::Scalability, 10),
                    (Feature::Security, 9),
                    (Feature::EaseOfUse, 7),
                    (Feature::Budget, 6),
                    (Feature::FreeTier, 5),
                ]),
                strengths: vec![
                    "Broadest service catalog and global footprint",
                    "Strong enterprise and compliance offerings",
                    "Leading scalability and security",
                ],
                base_compute: 120,
                base_storage: 40,
            },
        );

        profiles.insert(
            Provider::Azure,
            ProviderProfile {
                feature_scores: feature_scores([
                    (Feature::Security, 10),
                    (Feature::Scalability, 8),
                    (Feature::EaseOfUse, 6),
                    (Feature::Budget, 5),
                    (Feature::FreeTier, 4),
                ]),
                strengths: vec![
                    "Deep integration with Microsoft stack and hybrid cloud",
                    "Strong compliance and government offerings",
                    "Top-tier security and enterprise focus",
                ],
                base_compute: 110,
                base_storage: 45,
            },
        );

        profiles.insert(
            Provider::Gcp,
            ProviderProfile {
                feature_scores: feature_scores([
                    (Feature::FreeTier, 10),
                    (Feature::Budget, 9),
                    (Feature::EaseOfUse, 9),
                    (Feature::Scalability, 7),
                    (Feature::Security, 6),
                ]),
                strengths: vec![
                    "Strong data and ML/AI capabilities",
                    "Generous free tier and sustained-use discounts",
                    "Cost-effective and developer-friendly",
                ],
                base_compute: 100,
                base_storage: 35,
            },
        );

        Self { profiles }
    }

    pub fn profile(&self, provider: Provider) -> &ProviderProfile {
        self.profiles
            .get(&provider)
            .expect("catalog covers every provider")
    }
}

fn feature_scores<const N: usize>(entries: [(Feature, u8); N]) -> BTreeMap<Feature, u8> {
    entries.into_iter().collect()
}

/// Default feature weights. Invariant: the weights sum to 1.0.
#[derive(Debug, Clone)]
pub struct FeatureWeights {
    weights: BTreeMap<Feature, f64>,
}

impl FeatureWeights {
    pub fn standard() -> Self {
        Self {
            weights: [
                (Feature::Budget, 0.25),
                (Feature::Scalability, 0.20),
                (Feature::Security, 0.25),
                (Feature::EaseOfUse, 0.15),
                (Feature::FreeTier, 0.15),
            ]
            .into_iter()
            .collect(),
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.weights.get(&feature).copied().unwrap_or(0.0)
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<Feature, f64> {
        &self.weights
    }
}

/// Small additive score bonus per provider per region, applied after base
/// scoring. Requests without a recognized region get no modifier.
#[derive(Debug, Clone)]
pub struct RegionalModifiers {
    modifiers: BTreeMap<Region, BTreeMap<Provider, f64>>,
}

impl RegionalModifiers {
    pub fn standard() -> Self {
        let mut modifiers = BTreeMap::new();
        modifiers.insert(
            Region::India,
            provider_bonuses([
                (Provider::Aws, 0.2),
                (Provider::Azure, 0.3),
                (Provider::Gcp, 0.1),
            ]),
        );
        modifiers.insert(
            Region::Us,
            provider_bonuses([
                (Provider::Aws, 0.3),
                (Provider::Azure, 0.2),
                (Provider::Gcp, 0.2),
            ]),
        );
        modifiers.insert(
            Region::Europe,
            provider_bonuses([
                (Provider::Aws, 0.2),
                (Provider::Azure, 0.3),
                (Provider::Gcp, 0.2),
            ]),
        );
        Self { modifiers }
    }

    pub fn modifier(&self, region: Region, provider: Provider) -> f64 {
        self.modifiers
            .get(&region)
            .and_then(|bonuses| bonuses.get(&provider))
            .copied()
            .unwrap_or(0.0)
    }
}

fn provider_bonuses<const N: usize>(entries: [(Provider, f64); N]) -> BTreeMap<Provider, f64> {
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = FeatureWeights::standard();
        let total: f64 = Feature::ALL.iter().map(|&feature| weights.get(feature)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn every_provider_scores_every_feature() {
        let catalog = ProviderCatalog::standard();
        for provider in Provider::ALL {
            let profile = catalog.profile(provider);
            for feature in Feature::ALL {
                let score = profile.feature_score(feature);
                assert!((3..=10).contains(&score), "{provider:?} {feature:?}");
            }
            assert_eq!(profile.strengths().len(), 3);
            assert!(profile.base_monthly_cost() > 0);
        }
    }

    #[test]
    fn region_parse_trims_and_lowercases() {
        assert_eq!(Region::parse("  US "), Some(Region::Us));
        assert_eq!(Region::parse("Europe"), Some(Region::Europe));
        assert_eq!(Region::parse("mars"), None);
    }

    #[test]
    fn feature_keys_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_key(feature.key()), Some(feature));
        }
        assert_eq!(Feature::from_key("latency"), None);
    }

    #[test]
    fn every_region_modifies_every_provider() {
        let modifiers = RegionalModifiers::standard();
        for region in Region::ALL {
            for provider in Provider::ALL {
                let bonus = modifiers.modifier(region, provider);
                assert!((0.1..=0.3).contains(&bonus), "{region:?} {provider:?}");
            }
        }
    }
}
