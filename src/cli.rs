use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{GenerationMode, PlannerConfig};
use crate::profile::RawProfile;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Personalized meal planning from a user profile",
    long_about = None
)]
pub struct Cli {
    /// Override MEAL_PLANNER_MODE (template or remote)
    #[arg(long, global = true)]
    pub mode: Option<GenerationMode>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Applies `--mode` to `config`; commands that never generate run in template mode.
    pub fn effective_config(&self, mut config: PlannerConfig) -> PlannerConfig {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if !self.command.uses_generation() {
            config.mode = GenerationMode::Template;
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the normalized profile, BMI and daily calorie target
    Target {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Generate a weekly meal plan
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Also write the plan record to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = "local-user")]
        user_id: String,
    },
    /// Suggest meals for one meal type
    Suggest {
        #[command(flatten)]
        profile: ProfileArgs,
        /// breakfast, lunch, dinner or snack
        #[arg(short = 't', long)]
        meal_type: String,
        #[arg(long = "preference")]
        preferences: Vec<String>,
    },
    /// Sum a JSON food log against the daily target
    Track {
        #[command(flatten)]
        profile: ProfileArgs,
        /// JSON array of food log entries
        #[arg(short, long)]
        log: PathBuf,
    },
}

impl Command {
    /// Only `plan` and `suggest` reach the generation backend.
    pub fn uses_generation(&self) -> bool {
        matches!(self, Command::Plan { .. } | Command::Suggest { .. })
    }
}

/// Profile fields as typed; validation happens in the normalizer.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    #[arg(long, default_value = "")]
    pub age: String,
    /// Height in cm
    #[arg(long, default_value = "")]
    pub height: String,
    /// Weight in kg
    #[arg(long, default_value = "")]
    pub weight: String,
    /// sedentary, light, moderate, active or extra
    #[arg(long, default_value = "")]
    pub activity: String,
    #[arg(long = "goal")]
    pub goals: Vec<String>,
    #[arg(long = "restriction")]
    pub restrictions: Vec<String>,
    #[arg(long = "condition")]
    pub conditions: Vec<String>,
    #[arg(long = "culture")]
    pub cultures: Vec<String>,
}

impl From<ProfileArgs> for RawProfile {
    fn from(args: ProfileArgs) -> Self {
        RawProfile {
            age: args.age,
            height: args.height,
            weight: args.weight,
            activity_level: args.activity,
            fitness_goals: args.goals,
            dietary_restrictions: args.restrictions,
            medical_conditions: args.conditions,
            cultural_preferences: args.cultures,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerError;
    use crate::planner::MealPlanner;

    fn remote_without_key() -> PlannerConfig {
        PlannerConfig {
            mode: GenerationMode::Remote,
            ..PlannerConfig::default()
        }
    }

    #[test]
    fn test_parse_plan_command() {
        let cli = Cli::try_parse_from([
            "meal-planner",
            "--mode",
            "remote",
            "plan",
            "--age",
            "30",
            "--height",
            "170",
            "--weight",
            "70",
            "--activity",
            "moderate",
            "--restriction",
            "Vegan",
            "--restriction",
            "Keto",
            "-o",
            "plan.json",
        ])
        .unwrap();
        assert_eq!(cli.mode, Some(GenerationMode::Remote));
        match cli.command {
            Command::Plan { profile, output, user_id } => {
                let raw = RawProfile::from(profile);
                assert_eq!(raw.age, "30");
                assert_eq!(raw.dietary_restrictions, vec!["Vegan", "Keto"]);
                assert_eq!(output, Some(PathBuf::from("plan.json")));
                assert_eq!(user_id, "local-user");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_suggest_command() {
        let cli = Cli::try_parse_from([
            "meal-planner",
            "suggest",
            "-t",
            "snack",
            "--preference",
            "vegan",
        ])
        .unwrap();
        assert_eq!(cli.mode, None);
        match cli.command {
            Command::Suggest { meal_type, preferences, profile } => {
                assert_eq!(meal_type, "snack");
                assert_eq!(preferences, vec!["vegan"]);
                assert!(profile.age.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["meal-planner", "--mode", "magic", "target"]).is_err());
    }

    #[test]
    fn test_target_and_track_skip_remote_setup() {
        for args in [
            vec!["meal-planner", "--mode", "remote", "target", "--age", "30"],
            vec!["meal-planner", "track", "--log", "log.json"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(!cli.command.uses_generation());
            let config = cli.effective_config(remote_without_key());
            assert_eq!(config.mode, GenerationMode::Template);
            assert!(MealPlanner::new(config).is_ok());
        }
    }

    #[test]
    fn test_generating_commands_still_require_a_key() {
        let cli = Cli::try_parse_from(["meal-planner", "--mode", "remote", "plan"]).unwrap();
        assert!(cli.command.uses_generation());
        let config = cli.effective_config(PlannerConfig::template_only());
        assert_eq!(config.mode, GenerationMode::Remote);
        assert!(matches!(
            MealPlanner::new(config),
            Err(PlannerError::NotConfigured(_))
        ));

        let cli = Cli::try_parse_from(["meal-planner", "suggest", "-t", "lunch"]).unwrap();
        let config = cli.effective_config(remote_without_key());
        assert!(MealPlanner::new(config).is_err());
    }
}
