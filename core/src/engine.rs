//! The simulation engine: month-stepped onboarding, capacity control
//! and churn over a pricing catalog.
//!
//! EXECUTION ORDER (fixed, every month, never reordered):
//!   A. Decide whether this month onboards
//!   B. Generate candidates (cadence mix or schedule)
//!   C. Capacity admission: admit all, auto-scale, or first-fit partial
//!   D. Churn the first N eligible customers
//!   E. Compute the month's metrics and append its record
//!
//! RULES:
//!   - Single forward pass. A month reads only state carried from
//!     earlier months and never revises an earlier record.
//!   - No randomness. Identical inputs give identical output.
//!   - Team cost uses the same per-seat model as the profitability
//!     calculator, cycling the makeup to fill the current team size.

use crate::{
    clock::SimClock,
    customer::{CustomerBook, CustomerInstance},
    error::SimResult,
    event::SimEvent,
    observer::{NoopObserver, SimObserver},
    onboarding::OnboardingConfiguration,
    pricing::{PricingCatalog, PricingTier},
    team::{capacity_for, team_size_for_effort, TeamConfiguration},
    types::{percentage_of, Currency, Hours, Month},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySimulationResult {
    pub month:                    Month,
    pub customers_onboarded:      u32,
    pub customers_churned:        u32,
    pub active_customers:         u32,
    pub total_revenue:            Currency,
    pub total_effort:             Hours,
    pub team_cost:                Currency,
    pub profit:                   Currency,
    pub cumulative_profit:        Currency,
    pub capacity_used_percentage: f64,
    pub is_over_capacity:         bool,
    pub team_size:                u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub monthly_results:           Vec<MonthlySimulationResult>,
    /// First month with non-negative cumulative profit; None if never.
    pub breakeven_month:           Option<Month>,
    pub total_customers_onboarded: u32,
    pub total_customers_churned:   u32,
    pub final_profit:              Currency,
    /// Highest monthly capacity usage; 0 for a run with no months.
    pub max_capacity_reached:      f64,
    pub auto_scale_triggered:      bool,
}

impl SimulationResult {
    /// (lowest, highest) cumulative profit across the run.
    pub fn cumulative_profit_range(&self) -> Option<(Currency, Currency)> {
        let mut values = self.monthly_results.iter().map(|m| m.cumulative_profit);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn peak_team_size(&self) -> Option<u32> {
        self.monthly_results.iter().map(|m| m.team_size).max()
    }
}

/// Outcome of capacity admission for one month's candidates.
#[derive(Debug, Clone, PartialEq)]
enum Admission {
    All,
    Scaled { to_size: u32 },
    Partial { admitted: usize, headroom: Hours },
}

pub struct SimEngine<'a> {
    config:  &'a OnboardingConfiguration,
    team:    &'a TeamConfiguration,
    catalog: PricingCatalog<'a>,

    clock:                SimClock,
    customers:            CustomerBook,
    current_team_size:    u32,
    monthly_capacity:     Hours,
    cumulative_profit:    Currency,
    breakeven_month:      Option<Month>,
    auto_scale_triggered: bool,
    monthly_results:      Vec<MonthlySimulationResult>,
    started:              bool,
}

impl<'a> SimEngine<'a> {
    /// Validate the configuration and set up month 0.
    pub fn new(
        config: &'a OnboardingConfiguration,
        team: &'a TeamConfiguration,
        pricing: &'a [PricingTier],
    ) -> SimResult<Self> {
        config.validate()?;
        let catalog = PricingCatalog::new(pricing);

        for warning in config.config_warnings(team, &catalog) {
            log::warn!("engine: {warning}");
        }

        Ok(Self {
            config,
            team,
            catalog,
            clock:                SimClock::new(config.simulation_months),
            customers:            CustomerBook::new(),
            current_team_size:    team.team_size,
            monthly_capacity:     capacity_for(team.team_size),
            cumulative_profit:    0.0,
            breakeven_month:      None,
            auto_scale_triggered: false,
            monthly_results:      Vec::with_capacity(config.simulation_months as usize),
            started:              false,
        })
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn customers(&self) -> &CustomerBook {
        &self.customers
    }

    pub fn current_team_size(&self) -> u32 {
        self.current_team_size
    }

    pub fn monthly_results(&self) -> &[MonthlySimulationResult] {
        &self.monthly_results
    }

    /// Simulate the next month. Returns None once the horizon is reached.
    pub fn step(&mut self, observer: &mut dyn SimObserver) -> Option<&MonthlySimulationResult> {
        if !self.started {
            self.started = true;
            observer.on_event(&SimEvent::RunStarted {
                simulation_months: self.config.simulation_months,
                team_size:         self.current_team_size,
                monthly_capacity:  self.monthly_capacity,
            });
        }

        let month = self.clock.advance()?;

        // A + B.
        let candidates = self.config.candidates_for(month, &self.catalog);

        // C. Every onboarding month, even with no surviving candidates.
        let customers_onboarded = if self.config.should_onboard(month) {
            self.admit(month, candidates, observer)
        } else {
            0
        };

        // D.
        let customers_churned = if self.config.enable_churn {
            self.churn(month, observer)
        } else {
            0
        };

        // E.
        let record = self.record_month(month, customers_onboarded, customers_churned, observer);
        observer.on_step(month, &record);
        self.monthly_results.push(record);
        self.monthly_results.last()
    }

    /// Run every remaining month and assemble the result.
    pub fn run(mut self, observer: &mut dyn SimObserver) -> SimulationResult {
        while self.step(observer).is_some() {}
        let result = self.finish();
        observer.on_event(&SimEvent::RunCompleted {
            months:       result.monthly_results.len() as Month,
            final_profit: result.final_profit,
        });
        result
    }

    fn finish(self) -> SimulationResult {
        let max_capacity_reached = self
            .monthly_results
            .iter()
            .map(|m| m.capacity_used_percentage)
            .reduce(f64::max)
            .unwrap_or(0.0);

        SimulationResult {
            breakeven_month:           self.breakeven_month,
            total_customers_onboarded: self.customers.len() as u32,
            total_customers_churned:   self.customers.churned_count() as u32,
            final_profit:              self.cumulative_profit,
            max_capacity_reached,
            auto_scale_triggered:      self.auto_scale_triggered,
            monthly_results:           self.monthly_results,
        }
    }

    // ── Step C: capacity admission ───────────────────────────────────────────

    fn decide_admission(&self, current_effort: Hours, candidates: &[CustomerInstance]) -> Admission {
        let max_pct = self.config.max_capacity_percentage;
        let new_effort: Hours = candidates.iter().map(|c| c.monthly_effort).sum();
        let total_effort = current_effort + new_effort;

        // A team with no capacity cannot absorb any effort at all.
        let projected_pct = if self.monthly_capacity > 0.0 {
            percentage_of(total_effort, self.monthly_capacity)
        } else if total_effort > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        if projected_pct <= max_pct {
            return Admission::All;
        }
        if self.config.auto_scale_team {
            return Admission::Scaled {
                to_size: team_size_for_effort(total_effort),
            };
        }

        let headroom = self.monthly_capacity * max_pct / 100.0 - current_effort;
        let mut used = 0.0;
        let admitted = candidates
            .iter()
            .take_while(|c| {
                if used + c.monthly_effort <= headroom {
                    used += c.monthly_effort;
                    true
                } else {
                    false
                }
            })
            .count();
        Admission::Partial { admitted, headroom }
    }

    fn admit(
        &mut self,
        month: Month,
        mut candidates: Vec<CustomerInstance>,
        observer: &mut dyn SimObserver,
    ) -> u32 {
        let current_effort = self.customers.active_effort(month);

        match self.decide_admission(current_effort, &candidates) {
            Admission::All => {}
            Admission::Scaled { to_size } => {
                let required_effort =
                    current_effort + candidates.iter().map(|c| c.monthly_effort).sum::<Hours>();
                observer.on_event(&SimEvent::TeamAutoScaled {
                    month,
                    from_size: self.current_team_size,
                    to_size,
                    required_effort,
                });
                self.current_team_size = to_size;
                self.monthly_capacity = capacity_for(to_size);
                self.auto_scale_triggered = true;
            }
            Admission::Partial { admitted, headroom } => {
                let rejected = (candidates.len() - admitted) as u32;
                candidates.truncate(admitted);
                if rejected > 0 {
                    observer.on_event(&SimEvent::CandidatesRejected {
                        month,
                        rejected,
                        headroom,
                    });
                }
            }
        }

        if candidates.is_empty() {
            return 0;
        }

        let added_effort: Hours = candidates.iter().map(|c| c.monthly_effort).sum();
        let customer_ids: Vec<String> = candidates.iter().map(|c| c.id.clone()).collect();
        let admitted = candidates.len() as u32;
        for customer in candidates {
            self.customers.admit(customer);
        }
        observer.on_event(&SimEvent::CustomersOnboarded {
            month,
            customer_ids,
            added_effort,
        });
        admitted
    }

    // ── Step D: churn ────────────────────────────────────────────────────────

    fn churn(&mut self, month: Month, observer: &mut dyn SimObserver) -> u32 {
        let eligible = self
            .customers
            .churn_eligible(month, self.config.churn_after_months);
        let to_churn = churn_count(eligible.len(), self.config.churn_rate);
        if to_churn == 0 {
            return 0;
        }

        let mut customer_ids = Vec::with_capacity(to_churn);
        for &id in eligible.iter().take(to_churn) {
            if self.customers.mark_churned(id, month) {
                if let Some(c) = self.customers.get(id) {
                    customer_ids.push(c.id.clone());
                }
            }
        }

        let churned = customer_ids.len() as u32;
        observer.on_event(&SimEvent::CustomersChurned {
            month,
            customer_ids,
            eligible: eligible.len() as u32,
        });
        churned
    }

    // ── Step E: monthly metrics ──────────────────────────────────────────────

    fn record_month(
        &mut self,
        month: Month,
        customers_onboarded: u32,
        customers_churned: u32,
        observer: &mut dyn SimObserver,
    ) -> MonthlySimulationResult {
        let mut active_customers = 0u32;
        let mut total_revenue = 0.0;
        let mut total_effort = 0.0;
        for c in self.customers.active_in(month) {
            active_customers += 1;
            total_revenue += c.monthly_revenue;
            total_effort += c.monthly_effort;
        }

        let team_cost = self.team.monthly_cost_for_seats(self.current_team_size);
        let profit = total_revenue - team_cost;
        self.cumulative_profit += profit;

        if self.breakeven_month.is_none() && self.cumulative_profit >= 0.0 {
            self.breakeven_month = Some(month);
            observer.on_event(&SimEvent::BreakevenReached {
                month,
                cumulative_profit: self.cumulative_profit,
            });
        }

        let max_pct = self.config.max_capacity_percentage;
        let capacity_used_percentage = percentage_of(total_effort, self.monthly_capacity);
        let is_over_capacity = if self.monthly_capacity > 0.0 {
            capacity_used_percentage > max_pct
        } else {
            total_effort > 0.0
        };

        MonthlySimulationResult {
            month,
            customers_onboarded,
            customers_churned,
            active_customers,
            total_revenue,
            total_effort,
            team_cost,
            profit,
            cumulative_profit: self.cumulative_profit,
            capacity_used_percentage,
            is_over_capacity,
            team_size: self.current_team_size,
        }
    }
}

/// `floor(eligible * rate / 100)`, clamped to `[0, eligible]`.
fn churn_count(eligible: usize, churn_rate: f64) -> usize {
    let raw = (eligible as f64 * churn_rate / 100.0).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(eligible)
    }
}

/// Run a full simulation with no observer attached.
pub fn run_simulation(
    config: &OnboardingConfiguration,
    team: &TeamConfiguration,
    pricing: &[PricingTier],
) -> SimResult<SimulationResult> {
    run_simulation_with(config, team, pricing, &mut NoopObserver)
}

/// Run a full simulation, reporting every step and event to `observer`.
pub fn run_simulation_with(
    config: &OnboardingConfiguration,
    team: &TeamConfiguration,
    pricing: &[PricingTier],
    observer: &mut dyn SimObserver,
) -> SimResult<SimulationResult> {
    let engine = SimEngine::new(config, team, pricing)?;
    Ok(engine.run(observer))
}
