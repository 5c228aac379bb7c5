//! Customers: the static mix used for steady-state snapshots, and the
//! per-run arena of simulated customer instances.

use crate::{
    pricing::PricingTier,
    types::{Currency, Hours, Month},
};
use serde::{Deserialize, Serialize};

// ── Static mix ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerMixItem {
    pub id:         String,
    pub tier:       String,
    pub complexity: String,
    pub quantity:   u32,
    /// Effort per unit.
    pub effort:     Hours,
    /// Price per unit.
    pub price:      Currency,
}

impl CustomerMixItem {
    /// New line item priced from a catalog entry, with a fresh id.
    pub fn from_tier(tier: &PricingTier, quantity: u32) -> Self {
        Self {
            id:         uuid::Uuid::new_v4().to_string(),
            tier:       tier.tier.clone(),
            complexity: tier.complexity.clone(),
            quantity,
            effort:     tier.effort,
            price:      tier.price,
        }
    }

    pub fn line_revenue(&self) -> Currency {
        self.price * self.quantity as f64
    }

    pub fn line_effort(&self) -> Hours {
        self.effort * self.quantity as f64
    }
}

// ── Simulated customers ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInstance {
    pub id:              String,
    pub package_type:    String,
    pub onboarded_month: Month,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub churn_month:     Option<Month>,
    pub monthly_revenue: Currency,
    pub monthly_effort:  Hours,
}

impl CustomerInstance {
    pub fn new(id: String, tier: &PricingTier, onboarded_month: Month) -> Self {
        Self {
            id,
            package_type: tier.package_type(),
            onboarded_month,
            churn_month: None,
            monthly_revenue: tier.price,
            monthly_effort: tier.effort,
        }
    }

    /// Still contributing revenue and effort in `month`.
    /// A customer churned in `month` still counts for that month.
    pub fn is_active_in(&self, month: Month) -> bool {
        match self.churn_month {
            None => true,
            Some(churned) => churned >= month,
        }
    }

    pub fn has_churned(&self) -> bool {
        self.churn_month.is_some()
    }
}

/// Stable index of a customer inside a [`CustomerBook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(usize);

/// Append-only arena of every customer a run has onboarded.
///
/// Instances are never removed. Churn is the single state transition,
/// recorded in place on the instance's stable index, so iteration order
/// is always onboarding order.
#[derive(Debug, Default, Clone)]
pub struct CustomerBook {
    customers: Vec<CustomerInstance>,
}

impl CustomerBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, customer: CustomerInstance) -> CustomerId {
        self.customers.push(customer);
        CustomerId(self.customers.len() - 1)
    }

    pub fn get(&self, id: CustomerId) -> Option<&CustomerInstance> {
        self.customers.get(id.0)
    }

    /// Mark a customer churned. Returns false if the id is unknown or the
    /// customer had already churned; the first churn month is kept.
    pub fn mark_churned(&mut self, id: CustomerId, month: Month) -> bool {
        match self.customers.get_mut(id.0) {
            Some(c) if c.churn_month.is_none() => {
                c.churn_month = Some(month);
                true
            }
            _ => false,
        }
    }

    pub fn active_in(&self, month: Month) -> impl Iterator<Item = &CustomerInstance> + '_ {
        self.customers.iter().filter(move |c| c.is_active_in(month))
    }

    /// Effort owed in `month` by every active customer.
    pub fn active_effort(&self, month: Month) -> Hours {
        self.active_in(month).map(|c| c.monthly_effort).sum()
    }

    /// Customers that have never churned and were onboarded at least
    /// `min_tenure` months before `month`, in onboarding order.
    pub fn churn_eligible(&self, month: Month, min_tenure: Month) -> Vec<CustomerId> {
        self.customers
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.churn_month.is_none() && month.saturating_sub(c.onboarded_month) >= min_tenure
            })
            .map(|(i, _)| CustomerId(i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn churned_count(&self) -> usize {
        self.customers.iter().filter(|c| c.has_churned()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomerInstance> + '_ {
        self.customers.iter()
    }
}
