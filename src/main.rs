use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use daytrip::config::PlannerConfig;
use daytrip::error::PlannerError;
use daytrip::models::{Plan, PlanRequest, Preference, Projection};
use daytrip::planner::TripPlanner;

const USAGE: &str = "\
usage: daytrip <city> [options]

options:
  --start HH:MM     window start (default 09:00)
  --end HH:MM       window end (default 18:00)
  --budget AMOUNT   daily budget, display only (default 2000)
  --prefer NAME     balanced | cheapest | fastest | avoid_rain | less_walking
  -h, --help        show this help";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let config = match PlannerConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.user_message());
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let request = match parse_args(&args) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{}", err.user_message());
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let planner = match TripPlanner::new(&config) {
        Ok(planner) => planner,
        Err(err) => {
            eprintln!("{}", err.user_message());
            return ExitCode::FAILURE;
        }
    };

    match planner.plan(&request) {
        Ok(plan) => {
            render(&plan, &request);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("planning failed: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &PlannerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn parse_args(args: &[String]) -> daytrip::Result<PlanRequest> {
    let mut city: Option<String> = None;
    let mut start = "09:00".to_string();
    let mut end = "18:00".to_string();
    let mut budget = 2000u32;
    let mut preference = Preference::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--start" => start = flag_value(&mut iter, "--start")?,
            "--end" => end = flag_value(&mut iter, "--end")?,
            "--budget" => {
                let value = flag_value(&mut iter, "--budget")?;
                budget = value.parse().map_err(|_| {
                    PlannerError::validation(format!(
                        "budget must be a non-negative number, got '{value}'"
                    ))
                })?;
            }
            "--prefer" => preference = flag_value(&mut iter, "--prefer")?.parse()?,
            other if other.starts_with('-') => {
                return Err(PlannerError::validation(format!("unknown option '{other}'")));
            }
            other => {
                if city.is_some() {
                    return Err(PlannerError::validation(format!(
                        "unexpected argument '{other}'"
                    )));
                }
                city = Some(other.to_string());
            }
        }
    }

    let city = city.ok_or_else(|| PlannerError::validation("missing city name"))?;
    Ok(PlanRequest {
        city,
        start,
        end,
        budget,
        preference,
    })
}

fn flag_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> daytrip::Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| PlannerError::validation(format!("{flag} needs a value")))
}

fn render(plan: &Plan, request: &PlanRequest) {
    let budget_delta = i64::from(request.budget) - i64::from(plan.totals.cost);

    println!(
        "Day plan for {} ({} - {}, {})",
        plan.city, request.start, request.end, request.preference
    );
    println!(
        "Total time on the move and on site: {} minutes",
        plan.totals.minutes
    );
    println!(
        "Estimated spend: {} (budget delta: {budget_delta})",
        plan.totals.cost
    );
    println!();

    println!(
        "Forecast: {} | high {:.1}°C / low {:.1}°C | rain probability {}%",
        plan.weather.description, plan.weather.high_temp, plan.weather.low_temp,
        plan.weather.rain_probability
    );
    if plan.weather.rain_probability > 60 {
        println!("Rain is likely today: indoor stops were prioritized, pack rain gear.");
    }
    println!();

    for (index, stop) in plan.route.stops.iter().enumerate() {
        println!("{}. {} ({})", index + 1, stop.poi.name, stop.poi.category);
        println!(
            "   via {} | {} min | fare {}",
            stop.transport.mode, stop.transport.duration, stop.transport.cost
        );
        println!("   stay {} min | entry {}", stop.poi.stay, stop.poi.cost);
    }
    println!();

    println!("Other strategies:");
    for alternative in &plan.alternatives {
        match alternative.projection {
            Projection::TotalCost(cost) => {
                println!("  {}: about {cost} total", alternative.strategy);
            }
            Projection::TotalMinutes(minutes) => {
                println!("  {}: about {minutes} minutes total", alternative.strategy);
            }
        }
    }
}
