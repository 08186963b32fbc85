use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use gv_app::{AppResult, Dashboard, DashboardConfig, LoadedPrediction, LoadedSimulation};
use gv_core::{
    Choice, Density, Objective, Pattern, PredictRequest, ScenarioConfig, VehicleMix, VehicleType,
    display_label, topology,
};
use gv_views::SnapshotTimeline;

#[derive(Parser)]
#[command(name = "gv-cli")]
#[command(about = "genVANET CLI - inspect simulation traces and AI route predictions", long_about = None)]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend base URL (overrides config and GENVANET_API)
    #[arg(long, global = true)]
    api: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the scenario choices offered by the backend
    Options,
    /// Run a simulation and print one step of the trace
    Simulate {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Step to display (0-based, clamped into the trace)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        step: i64,
    },
    /// Ask the prediction service for a route recommendation
    Predict {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// car | ambulance
        #[arg(long, default_value = "car", value_parser = parse_vehicle_type)]
        vehicle_type: VehicleType,
        /// fast | safe
        #[arg(long, default_value = "fast", value_parser = parse_objective)]
        objective: Objective,
    },
}

#[derive(Args)]
struct ScenarioArgs {
    /// low | medium | high | rush_hour
    #[arg(long, default_value = "medium", value_parser = parse_density)]
    density: Density,
    /// cars_only | mixed | heavy_commercial
    #[arg(long, default_value = "mixed", value_parser = parse_vehicle_mix)]
    vehicle_mix: VehicleMix,
    /// uniform | rush_hour | random
    #[arg(long, default_value = "uniform", value_parser = parse_pattern)]
    pattern: Pattern,
    /// Random seed
    #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
    seed: i64,
}

impl ScenarioArgs {
    fn config(&self) -> ScenarioConfig {
        ScenarioConfig {
            density: self.density,
            vehicle_mix: self.vehicle_mix,
            pattern: self.pattern,
            seed: self.seed,
        }
    }
}

fn parse_density(s: &str) -> Result<Density, String> {
    s.parse().map_err(|e: gv_core::CoreError| e.to_string())
}

fn parse_vehicle_mix(s: &str) -> Result<VehicleMix, String> {
    s.parse().map_err(|e: gv_core::CoreError| e.to_string())
}

fn parse_pattern(s: &str) -> Result<Pattern, String> {
    s.parse().map_err(|e: gv_core::CoreError| e.to_string())
}

fn parse_vehicle_type(s: &str) -> Result<VehicleType, String> {
    s.parse().map_err(|e: gv_core::CoreError| e.to_string())
}

fn parse_objective(s: &str) -> Result<Objective, String> {
    s.parse().map_err(|e: gv_core::CoreError| e.to_string())
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(api) = cli.api {
        config = config.with_api_base(api);
        config.validate()?;
    }
    // Leave headroom over the HTTP timeout so the client reports it first.
    let wait = config.timeout().saturating_add(Duration::from_secs(5));
    tracing::info!(
        api_base = %config.api_base,
        timeout_s = config.timeout_s,
        "backend configured"
    );
    let mut dashboard = Dashboard::with_http(&config)?;

    let ok = match cli.command {
        Commands::Options => cmd_options(&mut dashboard, wait),
        Commands::Simulate { scenario, step } => {
            cmd_simulate(&mut dashboard, scenario.config(), step, wait)
        }
        Commands::Predict {
            scenario,
            vehicle_type,
            objective,
        } => cmd_predict(
            &mut dashboard,
            PredictRequest {
                scenario: scenario.config(),
                vehicle_type,
                objective,
            },
            wait,
        ),
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_options(dashboard: &mut Dashboard, wait: Duration) -> bool {
    dashboard.load_options();
    dashboard.wait_options(wait);

    if let Some(banner) = dashboard.connectivity_banner() {
        eprintln!("✗ {}", banner);
        report_detail(dashboard.options_workflow().last_error_detail());
        return false;
    }

    let options = dashboard.options();
    print_choices("Traffic density", &options.density);
    print_choices("Vehicle mix", &options.vehicle_mix);
    print_choices("Departure pattern", &options.pattern);
    true
}

fn print_choices(title: &str, values: &[String]) {
    println!("{}:", title);
    if values.is_empty() {
        println!("  (none)");
    }
    for value in values {
        println!("  {:<18} {}", value, display_label(value));
    }
}

fn cmd_simulate(
    dashboard: &mut Dashboard,
    scenario: ScenarioConfig,
    step: i64,
    wait: Duration,
) -> bool {
    println!(
        "Running simulation: density={} mix={} pattern={} seed={}",
        scenario.density, scenario.vehicle_mix, scenario.pattern, scenario.seed
    );
    dashboard.submit_simulation(scenario);
    if !dashboard.wait_simulation(wait) {
        eprintln!("✗ Timed out waiting for the simulation");
        return false;
    }

    if let Some(message) = dashboard.simulation().error() {
        eprintln!("✗ {}", message);
        report_detail(dashboard.simulation().last_error_detail());
        return false;
    }

    let applied = dashboard.seek(step);
    tracing::debug!(requested = step, ?applied, "cursor positioned");
    if let Some(loaded) = dashboard.loaded_simulation() {
        print_simulation(loaded);
    }
    true
}

fn print_simulation(loaded: &LoadedSimulation) {
    let summary = &loaded.summary;
    println!("✓ Simulation completed");
    println!(
        "  Total vehicles: {} | Simulation steps: {} | Density: {} | CO2: {:.2} mg",
        summary.total_vehicles,
        summary.total_steps,
        display_label(loaded.scenario.density.as_str()),
        summary.total_co2_mg
    );
    println!();
    print_step(&loaded.timeline);
}

fn print_step(timeline: &SnapshotTimeline) {
    println!("{} | {}", timeline.step_label(), timeline.time_label());
    println!();

    let vehicles = &timeline.current().vehicles;
    if vehicles.is_empty() {
        println!("No active vehicles at this step");
    } else {
        println!("Vehicles ({})", vehicles.len());
        println!(
            "  {:<14} {:<8} {:>11} {:<10} {:>20} {:>11}",
            "ID", "Type", "Speed (m/s)", "Road", "Position", "CO2 (mg/s)"
        );
        for v in vehicles {
            println!(
                "  {:<14} {:<8} {:>11.2} {:<10} {:>20} {:>11.2}",
                v.id,
                v.vehicle_type,
                v.speed,
                v.road,
                format!("({:.2}, {:.2})", v.position.x, v.position.y),
                v.co2_emission
            );
        }
    }
    println!();

    let edges = timeline.active_edges();
    if edges.is_empty() {
        println!("No traffic on any edge at this step");
    } else {
        println!("Road Traffic ({} active roads)", edges.len());
        println!(
            "  {:<10} {:>8} {:>15} {:>13} {:>13}",
            "Road", "Vehicles", "Avg Speed (m/s)", "Occupancy (%)", "Wait Time (s)"
        );
        for e in edges {
            println!(
                "  {:<10} {:>8} {:>15.2} {:>13.2} {:>13.2}",
                e.id, e.vehicle_count, e.mean_speed, e.occupancy, e.waiting_time
            );
        }
    }
}

fn cmd_predict(dashboard: &mut Dashboard, request: PredictRequest, wait: Duration) -> bool {
    println!(
        "Requesting prediction: {} / {} (density={} seed={})",
        request.vehicle_type.label(),
        request.objective.label(),
        request.scenario.density,
        request.scenario.seed
    );
    dashboard.submit_prediction(request);
    if !dashboard.wait_prediction(wait) {
        eprintln!("✗ Timed out waiting for the prediction");
        return false;
    }

    if let Some(message) = dashboard.prediction().error() {
        eprintln!("✗ {}", message);
        report_detail(dashboard.prediction().last_error_detail());
        return false;
    }

    if let Some(loaded) = dashboard.loaded_prediction() {
        print_prediction(loaded);
    }
    true
}

fn print_prediction(loaded: &LoadedPrediction) {
    let response = &loaded.response;
    let ai = &response.ai_prediction;
    let validation = &response.validation;

    println!(
        "AI Prediction [{}] ({} active vehicles sampled)",
        validation.status().label(),
        response.traffic_snapshot.active_vehicles
    );
    println!("  Prediction:         {}", ai.prediction);
    println!("  Recommended route:  {}", ai.recommended_route);
    println!("  Expected delay:     {}s", ai.expected_delay);
    println!("  Congestion:         {}", ai.congestion);
    println!("  Explanation:        \"{}\"", ai.explanation);
    if !validation.errors.is_empty() {
        println!("  Validation corrections applied:");
        for err in &validation.errors {
            println!("    ⚠ {}", err);
        }
    }
    println!();

    let comparison = &loaded.comparison;
    if comparison.is_empty() {
        println!("No route statistics reported");
        return;
    }
    println!(
        "  {:<8} {:<15} {:>16} {:>14} {:>14} {:>6} {:>8}",
        "Route", "Name", "Avg Speed (m/s)", "Vehicles", "Wait Time (s)", "Edges", "Travel"
    );
    for row in comparison.rows() {
        println!(
            "  {:<8} {:<15} {:>9.2} {} {:>7} {} {:>7.1} {} {:>6} {:>7.0}s{}",
            row.label.as_str(),
            topology::route_name(row.label),
            row.stat.avg_speed,
            bar(row.speed_pct),
            row.stat.vehicles,
            bar(row.vehicles_pct),
            row.stat.waiting_time,
            bar(row.waiting_pct),
            row.stat.edge_count,
            row.travel_time_s,
            if row.recommended { "  ★ AI Recommended" } else { "" }
        );
    }
}

/// Six-cell text bar for a percentage.
fn bar(pct: f64) -> String {
    let filled = ((pct / 100.0) * 6.0).round().clamp(0.0, 6.0) as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(6 - filled))
}

fn report_detail(detail: Option<&str>) {
    if let Some(detail) = detail {
        eprintln!("  cause: {}", detail);
    }
}
