//! Turns a validated match state into a win/loss probability pair.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cricket::features::ColumnKind;
use crate::cricket::{DerivedFeatures, FeatureRow, MatchState, Team};
use crate::error::{PredictError, Result};
use crate::model::WinClassifier;

/// Tolerance on `P(loss) + P(win) == 1` for classifier output.
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Win and loss chances for the batting side, as percentages with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub win_probability: f64,
    pub loss_probability: f64,
}

impl PredictionResult {
    /// Convert a classifier vector `[P(loss), P(win)]` to rounded percentages.
    pub fn from_proba(proba: [f64; 2]) -> Self {
        PredictionResult {
            win_probability: round_percent(proba[1]),
            loss_probability: round_percent(proba[0]),
        }
    }

    pub fn already_won() -> Self {
        PredictionResult {
            win_probability: 100.0,
            loss_probability: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Target already reached; the classifier was not consulted.
    AlreadyWon,
    Probabilities(PredictionResult),
}

impl Outcome {
    pub fn result(&self) -> PredictionResult {
        match self {
            Outcome::AlreadyWon => PredictionResult::already_won(),
            Outcome::Probabilities(r) => *r,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub balls_left: u32,
    pub outcome: Outcome,
}

fn round_percent(p: f64) -> f64 {
    (p * 100.0 * 100.0).round() / 100.0
}

/// Stateless predictor around a shared, read-only classifier.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn WinClassifier>,
}

impl Predictor {
    /// Fails if the classifier was fit on a different record schema.
    pub fn new(classifier: Arc<dyn WinClassifier>) -> Result<Self> {
        check_schema(classifier.as_ref())?;
        Ok(Predictor { classifier })
    }

    pub fn predict(&self, state: &MatchState) -> Result<PredictionReport> {
        let features = DerivedFeatures::from_state(state);
        let outcome = if state.target_reached() {
            info!(
                "{} has already won the match ({}/{})",
                state.batting_team, state.score, state.target
            );
            Outcome::AlreadyWon
        } else {
            Outcome::Probabilities(self.infer(state, &features)?)
        };

        Ok(PredictionReport {
            batting_team: state.batting_team,
            bowling_team: state.bowling_team,
            balls_left: features.balls_left,
            outcome,
        })
    }

    fn infer(&self, state: &MatchState, features: &DerivedFeatures) -> Result<PredictionResult> {
        let row = FeatureRow::new(state, features);
        debug!(
            runs_left = features.runs_left,
            balls_left = features.balls_left,
            wickets_remaining = features.wickets_remaining,
            current_run_rate = features.current_run_rate,
            required_run_rate = features.required_run_rate,
            "Invoking classifier {}",
            self.classifier.name()
        );

        check_schema(self.classifier.as_ref())?;
        let non_finite = row.non_finite_columns();
        if !non_finite.is_empty() {
            return Err(PredictError::inference(format!(
                "record has non-finite values in {:?}",
                non_finite
            )));
        }

        let proba = self.classifier.predict_proba(&row)?;
        check_proba(proba)?;

        let result = PredictionResult::from_proba(proba);
        debug!(
            "{} win {:.2}% / {} win {:.2}%",
            state.batting_team, result.win_probability, state.bowling_team, result.loss_probability
        );
        Ok(result)
    }
}

fn check_schema(classifier: &dyn WinClassifier) -> Result<()> {
    let declared = classifier.input_columns();
    let matches = declared.len() == FeatureRow::COLUMNS.len()
        && declared
            .iter()
            .zip(FeatureRow::COLUMNS.iter())
            .all(|((name, kind), (expected, expected_kind))| name == expected && kind == expected_kind);
    if matches {
        return Ok(());
    }
    let expected: Vec<(&str, ColumnKind)> = FeatureRow::COLUMNS.to_vec();
    Err(PredictError::inference(format!(
        "classifier '{}' expects columns {:?}, record provides {:?}",
        classifier.name(),
        declared,
        expected
    )))
}

fn check_proba(proba: [f64; 2]) -> Result<()> {
    if proba.iter().any(|p| !p.is_finite() || !(0.0..=1.0).contains(p)) {
        return Err(PredictError::inference(format!(
            "classifier returned invalid probabilities {:?}",
            proba
        )));
    }
    if (proba[0] + proba[1] - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(PredictError::inference(format!(
            "classifier probabilities {:?} do not sum to 1",
            proba
        )));
    }
    Ok(())
}
