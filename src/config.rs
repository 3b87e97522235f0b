use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::Path;

use crate::cricket::MatchInput;

/// IPL live win-probability predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-win-predictor", version, about)]
pub struct Config {
    /// Path to the JSON model artifact
    #[arg(
        long,
        env = "MODEL_PATH",
        default_value = "model/ipl_win_model.json",
        global = true
    )]
    pub model_path: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict win probability for a live chase
    Predict(PredictArgs),

    /// List the teams the model knows
    Teams,

    /// List the host cities the model knows
    Cities,

    /// Serve the web dashboard
    Serve {
        /// Dashboard listen address
        #[arg(long, env = "DASHBOARD_ADDR", default_value = "127.0.0.1:8501")]
        addr: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Team chasing the target
    #[arg(long)]
    pub batting_team: String,

    /// Team defending the target
    #[arg(long)]
    pub bowling_team: String,

    /// Host city
    #[arg(long)]
    pub city: String,

    /// Target score
    #[arg(long, allow_negative_numbers = true)]
    pub target: i64,

    /// Current score of the batting side
    #[arg(long, allow_negative_numbers = true)]
    pub score: i64,

    /// Overs completed, e.g. 12.4
    #[arg(long, allow_negative_numbers = true)]
    pub overs: f64,

    /// Wickets fallen
    #[arg(long, allow_negative_numbers = true)]
    pub wickets: i64,

    /// Print the report as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,
}

impl PredictArgs {
    pub fn to_input(&self) -> MatchInput {
        MatchInput {
            batting_team: self.batting_team.clone(),
            bowling_team: self.bowling_team.clone(),
            city: self.city.clone(),
            target: self.target,
            score: self.score,
            overs: self.overs,
            wickets: self.wickets,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.needs_model() && !Path::new(&self.model_path).is_file() {
            anyhow::bail!(
                "model artifact not found at '{}'. Set --model-path or MODEL_PATH.",
                self.model_path
            );
        }
        if let Command::Serve { addr } = &self.command {
            if addr.parse::<SocketAddr>().is_err() {
                anyhow::bail!("dashboard address '{}' is not a valid socket address", addr);
            }
        }
        Ok(())
    }

    /// Listing commands work without a model artifact.
    pub fn needs_model(&self) -> bool {
        matches!(self.command, Command::Predict(_) | Command::Serve { .. })
    }
}
