//! Steady-state profitability of a static customer mix.
//!
//! Pure and total: any numeric input is accepted as-is. Team cost uses
//! the same per-seat model as the simulation engine, applied to the
//! literal makeup (one charge per listed member).

use crate::{
    customer::CustomerMixItem,
    team::TeamConfiguration,
    types::{percentage_of, Currency, Hours},
};
use serde::{Deserialize, Serialize};

pub const HIGH_UTILIZATION_PCT:   f64 = 90.0;
pub const MEDIUM_UTILIZATION_PCT: f64 = 70.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityCalculation {
    pub total_revenue:          Currency,
    pub total_effort:           Hours,
    pub team_cost:              Currency,
    pub monthly_capacity:       Hours,
    /// 0 when the team has no capacity.
    pub utilization_percentage: f64,
    pub profit:                 Currency,
    /// 0 when there is no revenue.
    pub margin_percentage:      f64,
    pub is_over_capacity:       bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarginHealth {
    Healthy,
    BelowTarget,
}

impl MarginHealth {
    pub fn assess(margin_percentage: f64, target_margin: f64) -> Self {
        if margin_percentage >= target_margin {
            MarginHealth::Healthy
        } else {
            MarginHealth::BelowTarget
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationStatus {
    Low,
    Medium,
    High,
}

impl UtilizationStatus {
    pub fn from_percentage(utilization: f64) -> Self {
        if utilization > HIGH_UTILIZATION_PCT {
            UtilizationStatus::High
        } else if utilization > MEDIUM_UTILIZATION_PCT {
            UtilizationStatus::Medium
        } else {
            UtilizationStatus::Low
        }
    }
}

impl ProfitabilityCalculation {
    pub fn margin_health(&self, team: &TeamConfiguration) -> MarginHealth {
        MarginHealth::assess(self.margin_percentage, team.target_margin)
    }

    pub fn utilization_status(&self) -> UtilizationStatus {
        UtilizationStatus::from_percentage(self.utilization_percentage)
    }
}

pub fn calculate_profitability(
    team: &TeamConfiguration,
    customer_mix: &[CustomerMixItem],
) -> ProfitabilityCalculation {
    let total_revenue: Currency = customer_mix.iter().map(CustomerMixItem::line_revenue).sum();
    let total_effort: Hours = customer_mix.iter().map(CustomerMixItem::line_effort).sum();

    let monthly_capacity = team.monthly_capacity();
    let team_cost = team.makeup_monthly_cost();

    let utilization_percentage = percentage_of(total_effort, monthly_capacity);

    let profit = total_revenue - team_cost;
    let margin_percentage = if total_revenue > 0.0 {
        (profit / total_revenue) * 100.0
    } else {
        0.0
    };

    ProfitabilityCalculation {
        total_revenue,
        total_effort,
        team_cost,
        monthly_capacity,
        utilization_percentage,
        profit,
        margin_percentage,
        is_over_capacity: total_effort > monthly_capacity,
    }
}
