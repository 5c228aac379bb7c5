//! Onboarding policy: when new customers arrive and which packages
//! they buy.
//!
//! Two modes:
//!   - cadence:  a fixed number of customers every N months, packages
//!               assigned from a percentage mix by a rotating selector
//!   - schedule: explicit (month, package, quantity) entries
//!
//! Candidate generation is a pure function of (config, month, catalog).
//! Candidates naming a package the catalog does not carry are dropped.

use crate::{
    customer::CustomerInstance,
    error::{SimError, SimResult},
    pricing::PricingCatalog,
    team::TeamConfiguration,
    types::Month,
};
use serde::{Deserialize, Serialize};

/// Mix percentages are expected, not required, to total this.
pub const FULL_MIX_PERCENTAGE: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingType {
    Cadence,
    Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageMixItem {
    pub package_type: String,
    pub percentage:   f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingScheduleItem {
    pub month:        Month,
    pub package_type: String,
    pub quantity:     u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingConfiguration {
    pub simulation_months: Month,
    pub onboarding_type:   OnboardingType,

    // Cadence mode
    pub cadence_months:        u32,
    pub customers_per_cadence: u32,
    pub package_mix:           Vec<PackageMixItem>,

    // Schedule mode
    pub onboarding_schedule: Vec<OnboardingScheduleItem>,

    // Churn
    pub enable_churn:       bool,
    pub churn_after_months: Month,
    /// Percent of eligible customers churned per month.
    pub churn_rate:         f64,

    // Capacity
    pub max_capacity_percentage: f64,
    pub auto_scale_team:         bool,
}

impl Default for OnboardingConfiguration {
    fn default() -> Self {
        Self {
            simulation_months:     24,
            onboarding_type:       OnboardingType::Cadence,
            cadence_months:        3,
            customers_per_cadence: 2,
            package_mix: vec![
                PackageMixItem { package_type: "Bronze Small".into(),  percentage: 50.0 },
                PackageMixItem { package_type: "Silver Medium".into(), percentage: 30.0 },
                PackageMixItem { package_type: "Gold Large".into(),    percentage: 20.0 },
            ],
            onboarding_schedule:     Vec::new(),
            enable_churn:            false,
            churn_after_months:      12,
            churn_rate:              5.0,
            max_capacity_percentage: 90.0,
            auto_scale_team:         false,
        }
    }
}

impl OnboardingConfiguration {
    /// Reject configurations the engine cannot step through.
    pub fn validate(&self) -> SimResult<()> {
        if self.onboarding_type == OnboardingType::Cadence && self.cadence_months == 0 {
            return Err(SimError::InvalidCadence {
                cadence_months: self.cadence_months,
            });
        }
        Ok(())
    }

    pub fn total_mix_percentage(&self) -> f64 {
        self.package_mix.iter().map(|m| m.percentage).sum()
    }

    /// Non-fatal inconsistencies between this config, the team and the
    /// catalog. None of these stop a run.
    pub fn config_warnings(
        &self,
        team: &TeamConfiguration,
        catalog: &PricingCatalog<'_>,
    ) -> Vec<String> {
        let mut warnings = Vec::new();

        match self.onboarding_type {
            OnboardingType::Cadence => {
                let total = self.total_mix_percentage();
                if total != FULL_MIX_PERCENTAGE {
                    warnings.push(format!(
                        "package mix totals {total}%, some cadence slots will onboard nobody \
                         or later entries will never be picked"
                    ));
                }
                for item in &self.package_mix {
                    if catalog.find(&item.package_type).is_none() {
                        warnings.push(format!(
                            "package mix entry '{}' is not in the pricing catalog",
                            item.package_type
                        ));
                    }
                }
            }
            OnboardingType::Schedule => {
                for item in &self.onboarding_schedule {
                    if catalog.find(&item.package_type).is_none() {
                        warnings.push(format!(
                            "schedule entry for month {} names '{}', which is not in the pricing catalog",
                            item.month, item.package_type
                        ));
                    }
                }
            }
        }

        let coverage = team.level_coverage();
        if !coverage.is_valid() {
            warnings.push(format!(
                "team makeup should include at least one L1, L2 and L3 member \
                 (L1: {}, L2: {}, L3: {})",
                coverage.has_l1, coverage.has_l2, coverage.has_l3
            ));
        }

        warnings
    }

    pub fn should_onboard(&self, month: Month) -> bool {
        match self.onboarding_type {
            OnboardingType::Cadence => {
                self.cadence_months > 0 && month % self.cadence_months == 0
            }
            OnboardingType::Schedule => {
                self.onboarding_schedule.iter().any(|item| item.month == month)
            }
        }
    }

    /// Package for the `index`-th cadence candidate of `month`, if the mix
    /// covers its selector.
    pub fn cadence_package(&self, month: Month, index: u32) -> Option<&str> {
        let customer_index =
            u64::from(month.saturating_sub(1)) * u64::from(self.customers_per_cadence)
                + u64::from(index);
        let selector = (customer_index % 100) as f64;

        let mut cumulative = 0.0;
        for item in &self.package_mix {
            cumulative += item.percentage;
            if selector < cumulative {
                return Some(item.package_type.as_str());
            }
        }
        None
    }

    /// Customers proposed for onboarding in `month`, in generation order.
    /// Not yet admitted; capacity control decides that.
    pub fn candidates_for(
        &self,
        month: Month,
        catalog: &PricingCatalog<'_>,
    ) -> Vec<CustomerInstance> {
        if !self.should_onboard(month) {
            return Vec::new();
        }

        match self.onboarding_type {
            OnboardingType::Cadence => (0..self.customers_per_cadence)
                .filter_map(|i| {
                    let tier = catalog.find(self.cadence_package(month, i)?)?;
                    Some(CustomerInstance::new(format!("customer-{month}-{i}"), tier, month))
                })
                .collect(),
            OnboardingType::Schedule => {
                let mut candidates = Vec::new();
                let entries = self
                    .onboarding_schedule
                    .iter()
                    .filter(|item| item.month == month);
                for (entry_index, item) in entries.enumerate() {
                    let Some(tier) = catalog.find(&item.package_type) else {
                        continue;
                    };
                    for i in 0..item.quantity {
                        candidates.push(CustomerInstance::new(
                            format!("customer-{month}-{entry_index}-{i}"),
                            tier,
                            month,
                        ));
                    }
                }
                candidates
            }
        }
    }
}
