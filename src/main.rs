use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use meal_planner::cli::{parse_args, Command, ProfileArgs};
use meal_planner::config::PlannerConfig;
use meal_planner::energy::estimate_daily_target;
use meal_planner::planner::MealPlanner;
use meal_planner::profile::{normalize, BmiCategory, Profile, RawProfile};
use meal_planner::records::MealPlanRecord;
use meal_planner::tracker::{DailyTotals, FoodLogEntry};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("meal_planner=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn profile_from(args: ProfileArgs) -> Profile {
    normalize(&RawProfile::from(args))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = parse_args();
    let config = PlannerConfig::from_env().context("Failed to load planner configuration")?;
    let config = cli.effective_config(config);
    info!(mode = ?config.mode, "starting meal planner");

    let planner = MealPlanner::new(config).context("Failed to initialize meal planner")?;

    match cli.command {
        Command::Target { profile } => {
            let profile = profile_from(profile);
            let bmi = profile.body_mass_index();
            let target = estimate_daily_target(&profile);
            print_json(&json!({
                "profile": profile,
                "bmi": bmi.map(|b| (b * 10.0).round() / 10.0),
                "bmi_category": bmi.map(BmiCategory::from_bmi),
                "daily_target_kcal": target,
            }))?;
        }
        Command::Plan { profile, output, user_id } => {
            let profile = profile_from(profile);
            let outcome = planner.generate_plan(&profile).await;
            print_json(&outcome)?;

            if let Some(path) = output {
                let record = MealPlanRecord::from_outcome(user_id, outcome, Utc::now());
                record.write_json(&path).await?;
                info!(path = %path.display(), "meal plan record written");
            }
        }
        Command::Suggest { profile, meal_type, preferences } => {
            let profile = profile_from(profile);
            let outcome = planner.generate_suggestions(&profile, &meal_type, &preferences).await;
            print_json(&outcome)?;
        }
        Command::Track { profile, log } => {
            let profile = profile_from(profile);
            let content = tokio::fs::read_to_string(&log)
                .await
                .with_context(|| format!("Failed to read food log '{}'", log.display()))?;
            let entries: Vec<FoodLogEntry> = serde_json::from_str(&content).with_context(|| {
                format!("Food log '{}' is not a JSON array of entries", log.display())
            })?;
            let totals = DailyTotals::from_entries(&entries, estimate_daily_target(&profile));
            print_json(&json!({
                "totals": totals,
                "remaining_kcal": totals.remaining(),
                "progress_percent": totals.progress_percent(),
            }))?;
        }
    }

    Ok(())
}
