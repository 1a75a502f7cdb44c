pub mod cli;
pub mod toml_config;
pub mod translations;

#[cfg(feature = "cli")]
use crate::domain::model::{AgeGroup, Answers, Sex};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_language_code, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "skylux")]
#[command(about = "Shoulder injury risk scanner for skydiving guests")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Language code for labels (falls back to English when unknown)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the full assessment interactively in the terminal
    Run {
        /// Override the export directory from the config file
        #[arg(long)]
        output_path: Option<String>,

        /// Skip writing the CSV export after confirmation
        #[arg(long)]
        no_export: bool,
    },
    /// Score a set of answers without going through the flow
    Score(ScoreArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ScoreArgs {
    #[arg(long, default_value = "16-25")]
    pub age: AgeGroup,

    #[arg(long, default_value = "male")]
    pub sex: Sex,

    #[arg(long)]
    pub elbow: bool,

    #[arg(long)]
    pub thumb: bool,

    #[arg(long)]
    pub little_finger: bool,

    #[arg(long)]
    pub sublux: bool,

    #[arg(long)]
    pub dislocation: bool,

    #[arg(long)]
    pub operative: bool,

    #[arg(long)]
    pub apprehension: bool,

    #[arg(long)]
    pub skydive_test: bool,

    /// Print the CSV export record instead of the text result
    #[arg(long, conflicts_with = "json")]
    pub csv: bool,

    /// Print the score as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl ScoreArgs {
    pub fn answers(&self) -> Answers {
        Answers {
            age_group: self.age,
            sex: self.sex,
            elbow_hyperextension: self.elbow,
            thumb_to_forearm: self.thumb,
            little_finger_over90: self.little_finger,
            prior_subluxation: self.sublux,
            prior_dislocation: self.dislocation,
            operative_treatment: self.operative,
            apprehension_test_positive: self.apprehension,
            skydive_test_positive: self.skydive_test,
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(lang) = &self.lang {
            validate_language_code("lang", lang)?;
        }
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Command::Run {
            output_path: Some(output_path),
            ..
        } = &self.command
        {
            validate_path("output_path", output_path)?;
        }
        Ok(())
    }
}
