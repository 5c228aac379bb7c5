//! Capacity admission control and auto-scaling.

use approx::assert_relative_eq;
use opsprofit_core::{
    engine::{run_simulation_with, SimEngine},
    observer::{EventRecorder, NoopObserver},
    onboarding::{OnboardingConfiguration, OnboardingScheduleItem, OnboardingType},
    pricing::PricingTier,
    run_simulation,
    team::TeamConfiguration,
    event::SimEvent,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn pricing() -> Vec<PricingTier> {
    vec![
        PricingTier::new("Custom", "A", 500.0, 60000.0),
        PricingTier::new("Custom", "B", 600.0, 70000.0),
        PricingTier::new("Custom", "C", 100.0, 12000.0),
    ]
}

fn scheduled(month: u32, packages: &[&str], months: u32, auto_scale: bool) -> OnboardingConfiguration {
    OnboardingConfiguration {
        simulation_months: months,
        onboarding_type: OnboardingType::Schedule,
        onboarding_schedule: packages
            .iter()
            .map(|p| OnboardingScheduleItem {
                month,
                package_type: (*p).to_string(),
                quantity: 1,
            })
            .collect(),
        max_capacity_percentage: 90.0,
        auto_scale_team: auto_scale,
        ..Default::default()
    }
}

/// Month 1 brings Custom A and Custom B under a 40% ceiling with churn after
/// 0 months at 50%, so A churns in month 1. Month 2 schedules a package the
/// catalog does not carry.
fn shrinking_config() -> OnboardingConfiguration {
    let item = |month: u32, package: &str| OnboardingScheduleItem {
        month,
        package_type: package.to_string(),
        quantity: 1,
    };
    OnboardingConfiguration {
        simulation_months: 2,
        onboarding_type: OnboardingType::Schedule,
        onboarding_schedule: vec![
            item(1, "Custom A"),
            item(1, "Custom B"),
            item(2, "Custom Z"),
        ],
        enable_churn: true,
        churn_after_months: 0,
        churn_rate: 50.0,
        max_capacity_percentage: 40.0,
        auto_scale_team: true,
        ..Default::default()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// 6 people = 1080h, 90% ceiling = 972h. 500h fits, 500h + 600h does not.
#[test]
fn constrained_month_admits_first_fit_in_generation_order() {
    let team = TeamConfiguration::default_team();
    let config = scheduled(1, &["Custom A", "Custom B"], 1, false);

    let mut recorder = EventRecorder::new();
    let result = run_simulation_with(&config, &team, &pricing(), &mut recorder).unwrap();

    let m1 = &result.monthly_results[0];
    assert_eq!(m1.customers_onboarded, 1);
    assert_eq!(m1.total_effort, 500.0);
    assert_eq!(m1.team_size, 6);
    assert!(!result.auto_scale_triggered);
    assert_eq!(result.total_customers_onboarded, 1);

    let rejected = recorder.events_of_type("candidates_rejected");
    assert_eq!(rejected.len(), 1);
    match rejected[0] {
        SimEvent::CandidatesRejected { rejected, headroom, .. } => {
            assert_eq!(*rejected, 1);
            assert_relative_eq!(*headroom, 972.0);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

/// Admission stops at the first candidate that does not fit, even when a
/// later, smaller candidate would.
#[test]
fn admission_stops_at_first_candidate_that_does_not_fit() {
    let team = TeamConfiguration::default_team();
    let config = scheduled(1, &["Custom A", "Custom B", "Custom C"], 1, false);

    let result = run_simulation(&config, &team, &pricing()).unwrap();

    assert_eq!(result.monthly_results[0].customers_onboarded, 1);
    assert_eq!(result.monthly_results[0].total_effort, 500.0);
}

#[test]
fn auto_scale_admits_everyone_and_grows_the_team() {
    let team = TeamConfiguration::default_team();
    let config = scheduled(1, &["Custom A", "Custom B"], 3, true);

    let mut recorder = EventRecorder::new();
    let result = run_simulation_with(&config, &team, &pricing(), &mut recorder).unwrap();

    let m1 = &result.monthly_results[0];
    assert_eq!(m1.customers_onboarded, 2);
    // ceil(1100 / 180) = 7
    assert_eq!(m1.team_size, 7);
    assert_relative_eq!(m1.capacity_used_percentage, 1100.0 / 1260.0 * 100.0);
    // The seventh seat repeats makeup[0], an L1 offshore at 55/h.
    assert_eq!(m1.team_cost, (559.0 + 55.0) * 180.0);
    assert!(result.auto_scale_triggered);

    // The scaled team carries forward.
    assert!(result.monthly_results.iter().all(|m| m.team_size == 7));
    assert_eq!(result.peak_team_size(), Some(7));

    let scaled = recorder.events_of_type("team_auto_scaled");
    assert_eq!(
        scaled,
        vec![&SimEvent::TeamAutoScaled {
            month: 1,
            from_size: 6,
            to_size: 7,
            required_effort: 1100.0,
        }]
    );
}

#[test]
fn within_ceiling_admits_all_without_scaling() {
    let team = TeamConfiguration::default_team();
    let config = scheduled(2, &["Custom A", "Custom C"], 2, true);

    let result = run_simulation(&config, &team, &pricing()).unwrap();

    assert_eq!(result.monthly_results[1].customers_onboarded, 2);
    assert!(!result.auto_scale_triggered);
    assert_eq!(result.monthly_results[1].team_size, 6);
}

#[test]
fn zero_sized_team_without_auto_scale_admits_nothing() {
    let mut team = TeamConfiguration::default_team();
    team.team_size = 0;
    let config = scheduled(1, &["Custom C"], 2, false);

    let result = run_simulation(&config, &team, &pricing()).unwrap();

    assert_eq!(result.total_customers_onboarded, 0);
    for m in &result.monthly_results {
        assert_eq!(m.capacity_used_percentage, 0.0);
        assert!(!m.is_over_capacity);
        assert_eq!(m.team_cost, 0.0);
    }
}

#[test]
fn zero_sized_team_with_auto_scale_hires_enough_people() {
    let mut team = TeamConfiguration::default_team();
    team.team_size = 0;
    let config = scheduled(1, &["Custom C"], 1, true);

    let result = run_simulation(&config, &team, &pricing()).unwrap();

    let m1 = &result.monthly_results[0];
    assert_eq!(m1.team_size, 1);
    assert_eq!(m1.customers_onboarded, 1);
    assert_relative_eq!(m1.capacity_used_percentage, 100.0 / 180.0 * 100.0);
}

#[test]
fn over_capacity_flag_uses_the_configured_ceiling() {
    let team = TeamConfiguration::default_team();
    // 1000h of 1080h is 92.6%, over a 90% ceiling; auto-scale sizes the team
    // to exactly ceil(1000 / 180) = 6, so the month still reports over capacity.
    let config = scheduled(1, &["Custom A", "Custom A"], 1, true);

    let result = run_simulation(&config, &team, &pricing()).unwrap();

    let m1 = &result.monthly_results[0];
    assert_eq!(m1.team_size, 6);
    assert!(m1.is_over_capacity);
    assert!(result.auto_scale_triggered);
    assert_relative_eq!(result.max_capacity_reached, 1000.0 / 1080.0 * 100.0);
}

/// An onboarding month whose candidates were all dropped still re-sizes an
/// auto-scaled team: 600h on 1260h is 47.6%, over 40%, so ceil(600/180) = 4.
#[test]
fn auto_scale_resizes_on_onboarding_month_with_no_candidates() {
    let team = TeamConfiguration::default_team();
    let config = shrinking_config();

    let mut recorder = EventRecorder::new();
    let result = run_simulation_with(&config, &team, &pricing(), &mut recorder).unwrap();

    let sizes: Vec<u32> = result.monthly_results.iter().map(|m| m.team_size).collect();
    assert_eq!(sizes, vec![7, 4]);

    let m2 = &result.monthly_results[1];
    assert_eq!(m2.customers_onboarded, 0);
    assert_eq!(m2.total_effort, 600.0);
    assert_eq!(m2.team_cost, team.monthly_cost_for_seats(4));
    assert_relative_eq!(m2.capacity_used_percentage, 600.0 / 720.0 * 100.0);

    assert_eq!(
        recorder.events_of_type("team_auto_scaled")[1],
        &SimEvent::TeamAutoScaled {
            month: 2,
            from_size: 7,
            to_size: 4,
            required_effort: 600.0,
        }
    );
    // Nothing was onboarded in month 2, so only month 1 reports onboarding.
    assert_eq!(recorder.events_of_type("customers_onboarded").len(), 1);
}

/// Stepping the engine by hand exposes the same per-month team size.
#[test]
fn stepping_the_engine_tracks_team_size_month_by_month() {
    let team = TeamConfiguration::default_team();
    let config = shrinking_config();
    let tiers = pricing();

    let mut engine = SimEngine::new(&config, &team, &tiers).unwrap();
    assert_eq!(engine.current_team_size(), 6);
    assert_eq!(engine.clock().current_month, 0);

    let first = engine.step(&mut NoopObserver).map(|m| m.team_size);
    assert_eq!(first, Some(7));
    assert_eq!(engine.current_team_size(), 7);
    assert_eq!(engine.customers().len(), 2);

    let second = engine.step(&mut NoopObserver).map(|m| m.team_size);
    assert_eq!(second, Some(4));
    assert_eq!(engine.current_team_size(), 4);
    assert!(engine.clock().is_finished());

    assert!(engine.step(&mut NoopObserver).is_none());
    assert_eq!(engine.monthly_results().len(), 2);
    assert_eq!(engine.monthly_results()[0].customers_churned, 1);
}
