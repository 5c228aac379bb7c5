//! Pricing catalog: the packages a customer can buy.
//!
//! A package is identified by the pair (tier, complexity) and referred
//! to elsewhere by its display name `"<tier> <complexity>"`.

use crate::types::{Currency, Hours};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingTier {
    pub tier:       String,
    pub complexity: String,
    /// Monthly effort per customer.
    pub effort:     Hours,
    /// Monthly price per customer.
    pub price:      Currency,
}

impl PricingTier {
    pub fn new(tier: &str, complexity: &str, effort: Hours, price: Currency) -> Self {
        Self {
            tier:       tier.to_string(),
            complexity: complexity.to_string(),
            effort,
            price,
        }
    }

    /// The name schedules and package mixes use to refer to this tier.
    pub fn package_type(&self) -> String {
        format!("{} {}", self.tier, self.complexity)
    }

    fn matches(&self, package_type: &str) -> bool {
        package_type.len() == self.tier.len() + 1 + self.complexity.len()
            && package_type.starts_with(self.tier.as_str())
            && package_type[self.tier.len()..].starts_with(' ')
            && package_type.ends_with(self.complexity.as_str())
    }
}

/// Read-only view over an ordered slice of pricing tiers.
#[derive(Debug, Clone, Copy)]
pub struct PricingCatalog<'a> {
    tiers: &'a [PricingTier],
}

impl<'a> PricingCatalog<'a> {
    pub fn new(tiers: &'a [PricingTier]) -> Self {
        Self { tiers }
    }

    /// First tier whose display name equals `package_type`.
    pub fn find(&self, package_type: &str) -> Option<&'a PricingTier> {
        self.tiers.iter().find(|t| t.matches(package_type))
    }

    pub fn find_tier(&self, tier: &str, complexity: &str) -> Option<&'a PricingTier> {
        self.tiers
            .iter()
            .find(|t| t.tier == tier && t.complexity == complexity)
    }

    /// Distinct tier names, in first-seen order.
    pub fn tiers(&self) -> Vec<&'a str> {
        let mut seen: Vec<&'a str> = Vec::new();
        for t in self.tiers {
            if !seen.contains(&t.tier.as_str()) {
                seen.push(&t.tier);
            }
        }
        seen
    }

    /// Distinct complexities offered for `tier`, in first-seen order.
    pub fn complexities_for(&self, tier: &str) -> Vec<&'a str> {
        let mut seen: Vec<&'a str> = Vec::new();
        for t in self.tiers.iter().filter(|t| t.tier == tier) {
            if !seen.contains(&t.complexity.as_str()) {
                seen.push(&t.complexity);
            }
        }
        seen
    }

    pub fn package_types(&self) -> Vec<String> {
        self.tiers.iter().map(PricingTier::package_type).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Bronze/Silver/Gold × Small/Medium/Large reference catalog.
pub fn default_catalog() -> Vec<PricingTier> {
    vec![
        PricingTier::new("Bronze", "Small",  80.0,  14079.0),
        PricingTier::new("Bronze", "Medium", 120.0, 21118.0),
        PricingTier::new("Bronze", "Large",  160.0, 28158.0),
        PricingTier::new("Silver", "Small",  120.0, 21118.0),
        PricingTier::new("Silver", "Medium", 180.0, 31695.0),
        PricingTier::new("Silver", "Large",  240.0, 42073.0),
        PricingTier::new("Gold",   "Small",  160.0, 28158.0),
        PricingTier::new("Gold",   "Medium", 240.0, 42073.0),
        PricingTier::new("Gold",   "Large",  320.0, 56080.0),
    ]
}
