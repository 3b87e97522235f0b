//! Derived chase features and the classifier input record.

use serde::Serialize;

use super::state::MatchState;
use super::teams::{City, Team};

/// Balls in a full 20-over innings.
pub const INNINGS_BALLS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedFeatures {
    pub balls_completed: u32,
    pub balls_left: u32,
    pub runs_left: i64,
    pub wickets_remaining: u8,
    pub current_run_rate: f64,
    pub required_run_rate: f64,
}

/// `floor(overs * 6)`. A fractional part is read as a decimal, not as balls.
pub fn balls_completed(overs: f64) -> u32 {
    (overs * 6.0).floor().max(0.0) as u32
}

pub fn balls_left(overs: f64) -> u32 {
    INNINGS_BALLS.saturating_sub(balls_completed(overs))
}

impl DerivedFeatures {
    pub fn from_state(state: &MatchState) -> Self {
        let balls_completed = balls_completed(state.overs);
        let balls_left = INNINGS_BALLS.saturating_sub(balls_completed);
        let runs_left = i64::from(state.target) - i64::from(state.score);
        let wickets_remaining = 10u8.saturating_sub(state.wickets);

        let current_run_rate = if state.overs > 0.0 {
            f64::from(state.score) / state.overs
        } else {
            0.0
        };
        let required_run_rate = if balls_left > 0 {
            (runs_left as f64 * 6.0) / f64::from(balls_left)
        } else {
            0.0
        };

        DerivedFeatures {
            balls_completed,
            balls_left,
            runs_left,
            wickets_remaining,
            current_run_rate,
            required_run_rate,
        }
    }
}

/// Whether a record column is one-hot encoded or passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

/// Single-row record handed to the classifier.
///
/// Field names serialize to the column names the model was fit on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub city: City,
    pub runs_left: f64,
    #[serde(rename = "ball_left")]
    pub balls_left: f64,
    #[serde(rename = "wickets")]
    pub wickets_remaining: f64,
    #[serde(rename = "total_runs_x")]
    pub target: f64,
    #[serde(rename = "curr")]
    pub current_run_rate: f64,
    #[serde(rename = "rrr")]
    pub required_run_rate: f64,
}

impl FeatureRow {
    /// Column names and kinds, in the order the model expects them.
    pub const COLUMNS: [(&'static str, ColumnKind); 9] = [
        ("batting_team", ColumnKind::Categorical),
        ("bowling_team", ColumnKind::Categorical),
        ("city", ColumnKind::Categorical),
        ("runs_left", ColumnKind::Numeric),
        ("ball_left", ColumnKind::Numeric),
        ("wickets", ColumnKind::Numeric),
        ("total_runs_x", ColumnKind::Numeric),
        ("curr", ColumnKind::Numeric),
        ("rrr", ColumnKind::Numeric),
    ];

    pub fn new(state: &MatchState, features: &DerivedFeatures) -> Self {
        FeatureRow {
            batting_team: state.batting_team,
            bowling_team: state.bowling_team,
            city: state.city,
            runs_left: features.runs_left as f64,
            balls_left: f64::from(features.balls_left),
            wickets_remaining: f64::from(features.wickets_remaining),
            target: f64::from(state.target),
            current_run_rate: features.current_run_rate,
            required_run_rate: features.required_run_rate,
        }
    }

    /// Value of a categorical column, or `None` if `column` is not categorical.
    pub fn categorical(&self, column: &str) -> Option<&'static str> {
        match column {
            "batting_team" => Some(self.batting_team.name()),
            "bowling_team" => Some(self.bowling_team.name()),
            "city" => Some(self.city.name()),
            _ => None,
        }
    }

    /// Value of a numeric column, or `None` if `column` is not numeric.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "runs_left" => Some(self.runs_left),
            "ball_left" => Some(self.balls_left),
            "wickets" => Some(self.wickets_remaining),
            "total_runs_x" => Some(self.target),
            "curr" => Some(self.current_run_rate),
            "rrr" => Some(self.required_run_rate),
            _ => None,
        }
    }

    /// Names of numeric columns holding NaN or infinity.
    pub fn non_finite_columns(&self) -> Vec<&'static str> {
        Self::COLUMNS
            .iter()
            .filter(|(_, kind)| *kind == ColumnKind::Numeric)
            .filter(|(name, _)| self.numeric(name).map_or(false, |v| !v.is_finite()))
            .map(|(name, _)| *name)
            .collect()
    }
}
