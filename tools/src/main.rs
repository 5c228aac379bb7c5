//! profit-runner: headless runner for the managed-services profitability model.
//!
//! Usage:
//!   profit-runner --scenario scenario.json --out analysis.json
//!   profit-runner --months 36 --auto-scale --verbose-steps

use anyhow::{Context, Result};
use opsprofit_core::{
    config::ScenarioConfig,
    engine::{run_simulation_with, SimulationResult},
    observer::{LogObserver, NoopObserver, SimObserver},
    profitability::ProfitabilityCalculation,
    snapshot::AnalysisSnapshot,
    team::TeamConfiguration,
};
use std::env;

const DEFAULT_OUT: &str = "profitability-analysis.json";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let scenario_path = find_value(&args, "--scenario");
    let out = find_value(&args, "--out").unwrap_or(DEFAULT_OUT);
    let auto_scale = args.iter().any(|a| a == "--auto-scale");
    let verbose_steps = args.iter().any(|a| a == "--verbose-steps");

    let mut scenario = match scenario_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {path}"))?;
            ScenarioConfig::from_json(&content)?
        }
        None => ScenarioConfig::default(),
    };

    let months = parse_arg(&args, "--months", scenario.onboarding.simulation_months);
    scenario.onboarding.simulation_months = months;
    if auto_scale {
        scenario.onboarding.auto_scale_team = true;
    }

    println!("Managed Services Profitability - profit-runner");
    println!("  scenario:  {}", scenario_path.unwrap_or("(built-in defaults)"));
    println!("  months:    {months}");
    println!("  team size: {}", scenario.team_configuration.team_size);
    println!("  out:       {out}");
    println!();

    let mut log_observer = LogObserver;
    let mut noop = NoopObserver;
    let observer: &mut dyn SimObserver = if verbose_steps { &mut log_observer } else { &mut noop };

    let simulation = run_simulation_with(
        &scenario.onboarding,
        &scenario.team_configuration,
        &scenario.pricing,
        observer,
    )?;
    let snapshot = AnalysisSnapshot::new(&scenario, Some(simulation));

    print_profitability(&snapshot.profitability, &snapshot.team_configuration);
    if let Some(sim) = &snapshot.simulation {
        print_simulation(sim);
    }

    std::fs::write(out, snapshot.to_json_pretty()?)
        .with_context(|| format!("Cannot write {out}"))?;
    log::info!("Exported analysis to {out}");

    Ok(())
}

fn print_profitability(calc: &ProfitabilityCalculation, team: &TeamConfiguration) {
    println!("=== STEADY-STATE PROFITABILITY ===");
    println!("  revenue:      ${:.2}", calc.total_revenue);
    println!("  team cost:    ${:.2}", calc.team_cost);
    println!("  profit:       ${:.2}", calc.profit);
    println!(
        "  margin:       {:.1}% (target {:.1}%, {:?})",
        calc.margin_percentage,
        team.target_margin,
        calc.margin_health(team)
    );
    println!(
        "  utilization:  {:.1}% of {:.0}h ({:?}){}",
        calc.utilization_percentage,
        calc.monthly_capacity,
        calc.utilization_status(),
        if calc.is_over_capacity { " OVER CAPACITY" } else { "" }
    );
    println!();
}

fn print_simulation(sim: &SimulationResult) {
    println!("=== SIMULATION SUMMARY ===");
    match sim.breakeven_month {
        Some(m) => println!("  breakeven:      month {m}"),
        None => println!("  breakeven:      not reached"),
    }
    println!("  onboarded:      {}", sim.total_customers_onboarded);
    println!("  churned:        {}", sim.total_customers_churned);
    println!("  final profit:   ${:.2}", sim.final_profit);
    println!("  max capacity:   {:.1}%", sim.max_capacity_reached);
    println!("  auto-scaled:    {}", sim.auto_scale_triggered);
    if let Some(peak) = sim.peak_team_size() {
        println!("  peak team size: {peak}");
    }
    if let Some((lo, hi)) = sim.cumulative_profit_range() {
        println!("  cumulative:     ${lo:.2} .. ${hi:.2}");
    }

    println!();
    println!("=== LAST 6 MONTHS ===");
    if sim.monthly_results.is_empty() {
        println!("  (No months simulated)");
    } else {
        let recent: Vec<_> = sim.monthly_results.iter().rev().take(6).collect();
        for m in recent.iter().rev() {
            println!(
                "  M{:>3} | Active: {:>3} | Profit: ${:.0} | Cumulative: ${:.0} | Capacity: {:.1}% | Team: {}",
                m.month, m.active_customers, m.profit, m.cumulative_profit,
                m.capacity_used_percentage, m.team_size
            );
        }
    }
}

fn find_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
