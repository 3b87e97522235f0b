use serde::{Deserialize, Serialize};
use tracing::warn;

use super::teams::{City, Team};
use crate::error::{PredictError, Result};

/// Overs in a T20 innings.
pub const MAX_OVERS: f64 = 20.0;
/// Smallest overs value the form accepts.
pub const MIN_OVERS: f64 = 0.1;
pub const MAX_WICKETS: u8 = 10;

/// Raw match values as entered by the user, before any validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub target: i64,
    pub score: i64,
    pub overs: f64,
    pub wickets: i64,
}

/// A validated snapshot of a second-innings chase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchState {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub city: City,
    pub target: u32,
    pub score: u32,
    /// Cricket notation: `12.4` means 12 overs and 4 balls.
    pub overs: f64,
    pub wickets: u8,
}

impl MatchState {
    /// Digit after the decimal point of `overs`, i.e. balls into the current over.
    pub fn ball_component(&self) -> u32 {
        ((self.overs * 10.0).round() as u32) % 10
    }

    /// True once the batting side has reached the target.
    pub fn target_reached(&self) -> bool {
        self.score >= self.target
    }
}

/// Check every field of `input` and build a [`MatchState`].
///
/// Team problems are reported before anything else; a request with an
/// invalid team pairing never reaches the range checks.
pub fn validate(input: &MatchInput) -> Result<MatchState> {
    let batting_team = Team::from_name(&input.batting_team).ok_or_else(|| {
        PredictError::InvalidTeamSelection(format!(
            "unknown batting team '{}'",
            input.batting_team
        ))
    })?;
    let bowling_team = Team::from_name(&input.bowling_team).ok_or_else(|| {
        PredictError::InvalidTeamSelection(format!(
            "unknown bowling team '{}'",
            input.bowling_team
        ))
    })?;
    if batting_team == bowling_team {
        return Err(PredictError::InvalidTeamSelection(
            "batting and bowling teams must be different".into(),
        ));
    }

    let city = City::from_name(&input.city)
        .ok_or_else(|| PredictError::range("city", format!("unknown city '{}'", input.city)))?;

    if input.target < 1 {
        return Err(PredictError::range(
            "target",
            format!("must be at least 1, got {}", input.target),
        ));
    }
    let target = u32::try_from(input.target)
        .map_err(|_| PredictError::range("target", format!("{} is too large", input.target)))?;

    if input.score < 0 {
        return Err(PredictError::range(
            "score",
            format!("must not be negative, got {}", input.score),
        ));
    }
    let score = u32::try_from(input.score)
        .map_err(|_| PredictError::range("score", format!("{} is too large", input.score)))?;

    if !input.overs.is_finite() || !(MIN_OVERS..=MAX_OVERS).contains(&input.overs) {
        return Err(PredictError::range(
            "overs",
            format!(
                "must be between {MIN_OVERS} and {MAX_OVERS}, got {}",
                input.overs
            ),
        ));
    }

    if !(0..=MAX_WICKETS as i64).contains(&input.wickets) {
        return Err(PredictError::range(
            "wickets",
            format!("must be between 0 and {MAX_WICKETS}, got {}", input.wickets),
        ));
    }

    let state = MatchState {
        batting_team,
        bowling_team,
        city,
        target,
        score,
        overs: input.overs,
        wickets: input.wickets as u8,
    };

    // Kept as entered: the ball count is derived by truncating overs * 6.
    if state.ball_component() > 5 {
        warn!(
            overs = state.overs,
            "overs value has {} balls in the current over; a legal over has at most 5 before rolling over",
            state.ball_component()
        );
    }

    Ok(state)
}
