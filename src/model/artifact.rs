//! JSON model artifact: one-hot encoded categoricals, passthrough numerics,
//! and a logistic-regression head.
//!
//! Layout of the encoded vector: each categorical column in declaration
//! order (minus its first category when `drop_first` is set), followed by
//! the numeric columns. `coefficients` is indexed against that layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::classifier::WinClassifier;
use crate::cricket::features::{ColumnKind, FeatureRow};
use crate::error::{PredictError, Result};

/// What to do with a categorical value that was not seen during training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategory {
    #[default]
    Error,
    /// Encode as all zeros.
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotColumn {
    pub column: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub drop_first: bool,
    #[serde(default)]
    pub handle_unknown: UnknownCategory,
}

impl OneHotColumn {
    fn width(&self) -> usize {
        if self.drop_first {
            self.categories.len().saturating_sub(1)
        } else {
            self.categories.len()
        }
    }

    fn encode_into(&self, value: &str, out: &mut Vec<f64>) -> Result<()> {
        let start = out.len();
        out.resize(start + self.width(), 0.0);

        let Some(idx) = self.categories.iter().position(|c| c == value) else {
            return match self.handle_unknown {
                UnknownCategory::Ignore => Ok(()),
                UnknownCategory::Error => Err(PredictError::inference(format!(
                    "value '{}' for column '{}' was not seen during training",
                    value, self.column
                ))),
            };
        };

        let slot = if self.drop_first {
            match idx.checked_sub(1) {
                Some(i) => i,
                None => return Ok(()),
            }
        } else {
            idx
        };
        out[start + slot] = 1.0;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    pub categorical: Vec<OneHotColumn>,
    pub numeric: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Metadata surfaced by the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub version: String,
    pub trained_at: Option<DateTime<Utc>>,
    pub columns: Vec<String>,
    pub encoded_width: usize,
}

impl ModelArtifact {
    /// Read and validate an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PredictError::inference(format!(
                "failed to read model artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(content)
            .map_err(|e| PredictError::inference(format!("failed to parse model artifact: {}", e)))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Length of the encoded feature vector.
    pub fn encoded_width(&self) -> usize {
        self.categorical.iter().map(OneHotColumn::width).sum::<usize>() + self.numeric.len()
    }

    /// Check the artifact against the record schema and its own layout.
    pub fn validate(&self) -> Result<()> {
        let declared = self.input_columns();
        let expected: Vec<(String, ColumnKind)> = FeatureRow::COLUMNS
            .iter()
            .map(|(name, kind)| (name.to_string(), *kind))
            .collect();
        if declared != expected {
            return Err(PredictError::inference(format!(
                "artifact columns {:?} do not match record schema {:?}",
                declared.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
                expected.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            )));
        }

        for col in &self.categorical {
            if col.categories.is_empty() {
                return Err(PredictError::inference(format!(
                    "categorical column '{}' has no categories",
                    col.column
                )));
            }
            let unique: HashSet<&str> = col.categories.iter().map(String::as_str).collect();
            if unique.len() != col.categories.len() {
                return Err(PredictError::inference(format!(
                    "categorical column '{}' lists a category more than once",
                    col.column
                )));
            }
        }

        let width = self.encoded_width();
        if self.coefficients.len() != width {
            return Err(PredictError::inference(format!(
                "artifact has {} coefficients but encodes {} features",
                self.coefficients.len(),
                width
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PredictError::inference(
                "artifact contains non-finite parameters",
            ));
        }
        Ok(())
    }

    /// One-hot encode `row` into the layout `coefficients` expects.
    pub fn encode(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        let mut x = Vec::with_capacity(self.encoded_width());
        for col in &self.categorical {
            let value = row.categorical(&col.column).ok_or_else(|| {
                PredictError::inference(format!("record has no categorical column '{}'", col.column))
            })?;
            col.encode_into(value, &mut x)?;
        }
        for name in &self.numeric {
            let value = row.numeric(name).ok_or_else(|| {
                PredictError::inference(format!("record has no numeric column '{}'", name))
            })?;
            if !value.is_finite() {
                return Err(PredictError::inference(format!(
                    "column '{}' is not finite ({})",
                    name, value
                )));
            }
            x.push(value);
        }
        Ok(x)
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            name: self.name.clone(),
            version: self.version.clone(),
            trained_at: self.trained_at,
            columns: self.input_columns().into_iter().map(|(n, _)| n).collect(),
            encoded_width: self.encoded_width(),
        }
    }
}

impl WinClassifier for ModelArtifact {
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2]> {
        let x = self.encode(row)?;
        if x.len() != self.coefficients.len() {
            return Err(PredictError::inference(format!(
                "encoded {} features, model expects {}",
                x.len(),
                self.coefficients.len()
            )));
        }
        let z = self.intercept
            + x.iter()
                .zip(&self.coefficients)
                .map(|(xi, wi)| xi * wi)
                .sum::<f64>();
        let p_win = sigmoid(z);
        Ok([1.0 - p_win, p_win])
    }

    fn input_columns(&self) -> Vec<(String, ColumnKind)> {
        self.categorical
            .iter()
            .map(|c| (c.column.clone(), ColumnKind::Categorical))
            .chain(self.numeric.iter().map(|n| (n.clone(), ColumnKind::Numeric)))
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cricket::{City, DerivedFeatures, MatchState, Team};
    use approx::assert_relative_eq;
    use serde_json::json;

    fn team_names() -> Vec<&'static str> {
        Team::ALL.iter().map(|t| t.name()).collect()
    }

    fn city_names() -> Vec<&'static str> {
        City::ALL.iter().map(|c| c.name()).collect()
    }

    /// Artifact with zeroed categorical weights and the given numeric weights.
    fn artifact_json(numeric_coef: [f64; 6], intercept: f64) -> serde_json::Value {
        let mut coefficients = vec![0.0; 7 + 7 + 28];
        coefficients.extend_from_slice(&numeric_coef);
        json!({
            "name": "test-model",
            "version": "1",
            "categorical": [
                {"column": "batting_team", "categories": team_names(), "drop_first": true},
                {"column": "bowling_team", "categories": team_names(), "drop_first": true},
                {"column": "city", "categories": city_names(), "drop_first": true}
            ],
            "numeric": ["runs_left", "ball_left", "wickets", "total_runs_x", "curr", "rrr"],
            "coefficients": coefficients,
            "intercept": intercept
        })
    }

    fn parse(value: serde_json::Value) -> Result<ModelArtifact> {
        ModelArtifact::from_json(&value.to_string())
    }

    fn row(batting: Team, bowling: Team, city: City, target: u32, score: u32) -> FeatureRow {
        let state = MatchState {
            batting_team: batting,
            bowling_team: bowling,
            city,
            target,
            score,
            overs: 12.4,
            wickets: 3,
        };
        FeatureRow::new(&state, &DerivedFeatures::from_state(&state))
    }

    #[test]
    fn shipped_artifact_is_valid() {
        let artifact =
            ModelArtifact::from_json(include_str!("../../model/ipl_win_model.json")).unwrap();
        assert_eq!(artifact.encoded_width(), 48);
        let p = artifact
            .predict_proba(&row(Team::MumbaiIndians, Team::DelhiCapitals, City::Mumbai, 180, 100))
            .unwrap();
        assert_relative_eq!(p[0] + p[1], 1.0, epsilon = 1e-12);
        assert!(p[1] > 0.0 && p[1] < 1.0);
    }

    #[test]
    fn zero_weights_give_even_odds() {
        let artifact = parse(artifact_json([0.0; 6], 0.0)).unwrap();
        let p = artifact
            .predict_proba(&row(Team::KingsXiPunjab, Team::RajasthanRoyals, City::Mohali, 180, 100))
            .unwrap();
        assert_relative_eq!(p[0], 0.5);
        assert_relative_eq!(p[1], 0.5);
    }

    #[test]
    fn logistic_head_matches_hand_computation() {
        // Only runs_left (-0.05) and wickets (+0.2) carry weight.
        let artifact = parse(artifact_json([-0.05, 0.0, 0.2, 0.0, 0.0, 0.0], 1.0)).unwrap();
        let p = artifact
            .predict_proba(&row(Team::MumbaiIndians, Team::DelhiCapitals, City::Mumbai, 180, 100))
            .unwrap();
        // z = 1.0 - 0.05 * 80 + 0.2 * 7 = -1.6
        let expected = 1.0 / (1.0 + 1.6f64.exp());
        assert_relative_eq!(p[1], expected, epsilon = 1e-12);
        assert_relative_eq!(p[0], 1.0 - expected, epsilon = 1e-12);
    }

    #[test]
    fn more_runs_needed_lowers_win_probability() {
        let artifact = parse(artifact_json([-0.05, 0.0, 0.0, 0.0, 0.0, 0.0], 0.0)).unwrap();
        let easy = artifact
            .predict_proba(&row(Team::MumbaiIndians, Team::DelhiCapitals, City::Pune, 120, 100))
            .unwrap();
        let hard = artifact
            .predict_proba(&row(Team::MumbaiIndians, Team::DelhiCapitals, City::Pune, 220, 100))
            .unwrap();
        assert!(easy[1] > hard[1]);
    }

    #[test]
    fn drop_first_leaves_first_category_unweighted() {
        let artifact = parse(artifact_json([0.0; 6], 0.0)).unwrap();
        // Chennai Super Kings is the first team, Abu Dhabi the first city.
        let x = artifact
            .encode(&row(Team::ChennaiSuperKings, Team::DelhiCapitals, City::AbuDhabi, 180, 100))
            .unwrap();
        assert_eq!(x.len(), 48);
        assert!(x[0..7].iter().all(|v| *v == 0.0));
        assert_eq!(x[7], 1.0); // Delhi Capitals, second bowling category
        assert!(x[14..42].iter().all(|v| *v == 0.0));
        assert_eq!(&x[42..], &[80.0, 46.0, 7.0, 180.0, 100.0 / 12.4, 480.0 / 46.0]);
    }

    #[test]
    fn unseen_category_errors_or_is_ignored() {
        let mut value = artifact_json([0.0; 6], 0.0);
        value["categorical"][2]["categories"] = json!(["Mumbai", "Pune"]);
        value["coefficients"] = json!(vec![0.0; 7 + 7 + 1 + 6]);
        let strict = parse(value.clone()).unwrap();
        let r = row(Team::MumbaiIndians, Team::DelhiCapitals, City::Sharjah, 180, 100);
        let err = strict.predict_proba(&r).unwrap_err();
        assert!(matches!(err, PredictError::ModelInference(_)));
        assert!(err.to_string().contains("Sharjah"));

        value["categorical"][2]["handle_unknown"] = json!("ignore");
        let lenient = parse(value).unwrap();
        let p = lenient.predict_proba(&r).unwrap();
        assert_relative_eq!(p[1], 0.5);
    }

    #[test]
    fn renamed_column_is_rejected() {
        let mut value = artifact_json([0.0; 6], 0.0);
        value["numeric"][1] = json!("balls_left");
        let err = parse(value).unwrap_err();
        assert!(matches!(err, PredictError::ModelInference(_)));
    }

    #[test]
    fn reordered_columns_are_rejected() {
        let mut value = artifact_json([0.0; 6], 0.0);
        value["numeric"] = json!(["ball_left", "runs_left", "wickets", "total_runs_x", "curr", "rrr"]);
        assert!(parse(value).is_err());
    }

    #[test]
    fn coefficient_count_must_match_width() {
        let mut value = artifact_json([0.0; 6], 0.0);
        value["coefficients"] = json!(vec![0.0; 47]);
        let err = parse(value).unwrap_err();
        assert!(err.to_string().contains("47 coefficients"));
    }

    #[test]
    fn duplicate_categories_are_rejected() {
        let mut value = artifact_json([0.0; 6], 0.0);
        value["categorical"][2]["categories"] = json!(["Mumbai", "Mumbai", "Pune"]);
        value["coefficients"] = json!(vec![0.0; 7 + 7 + 2 + 6]);
        assert!(parse(value).is_err());
    }

    #[test]
    fn malformed_json_is_an_inference_error() {
        assert!(matches!(
            ModelArtifact::from_json("{not json"),
            Err(PredictError::ModelInference(_))
        ));
        assert!(matches!(
            ModelArtifact::load("/definitely/not/here.json"),
            Err(PredictError::ModelInference(_))
        ));
    }

    #[test]
    fn summary_lists_columns_in_order() {
        let artifact = parse(artifact_json([0.0; 6], 0.0)).unwrap();
        let summary = artifact.summary();
        assert_eq!(summary.encoded_width, 48);
        assert_eq!(summary.columns[0], "batting_team");
        assert_eq!(summary.columns[8], "rrr");
        assert!(summary.trained_at.is_none());
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(-800.0).is_finite());
    }
}
