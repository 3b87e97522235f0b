use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::cricket::features::balls_left;
use crate::cricket::{validate, City, MatchInput, Team};
use crate::error::PredictError;
use crate::model::ModelSummary;
use crate::predictor::{PredictionReport, Predictor};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub model: ModelSummary,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/options", get(options_handler))
        .route("/api/model", get(model_handler))
        .route("/api/balls-left", get(balls_left_handler))
        .route("/api/predict", post(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

fn error_response(err: PredictError) -> ApiError {
    let status = if err.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        warn!("Prediction failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

/// Serve the dashboard HTML page.
async fn index_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

#[derive(Debug, Serialize)]
pub struct Options {
    pub teams: Vec<&'static str>,
    pub cities: Vec<&'static str>,
}

/// GET /api/options
async fn options_handler() -> Json<Options> {
    Json(Options {
        teams: Team::ALL.iter().map(|t| t.name()).collect(),
        cities: City::ALL.iter().map(|c| c.name()).collect(),
    })
}

/// GET /api/model
async fn model_handler(State(state): State<Arc<AppState>>) -> Json<ModelSummary> {
    Json(state.model.clone())
}

#[derive(Debug, Deserialize)]
pub struct BallsLeftQuery {
    pub overs: f64,
}

#[derive(Debug, Serialize)]
pub struct BallsLeft {
    pub balls_left: u32,
}

/// GET /api/balls-left?overs=12.4
async fn balls_left_handler(Query(q): Query<BallsLeftQuery>) -> Result<Json<BallsLeft>, ApiError> {
    if !q.overs.is_finite() || q.overs < 0.0 {
        return Err(error_response(PredictError::range(
            "overs",
            format!("must be a non-negative number, got {}", q.overs),
        )));
    }
    Ok(Json(BallsLeft {
        balls_left: balls_left(q.overs),
    }))
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MatchInput>,
) -> Result<Json<PredictionReport>, ApiError> {
    let match_state = validate(&input).map_err(error_response)?;
    state
        .predictor
        .predict(&match_state)
        .map(Json)
        .map_err(error_response)
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>IPL Win Probability Predictor</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { padding: 1.2rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  header p { color: var(--muted); font-size: .85rem; margin-top: .3rem; }
  main { max-width: 760px; margin: 0 auto; padding: 1.5rem 2rem; display: grid; gap: 1.5rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; display: grid; gap: 1rem; }
  .panel h2 { font-size: 1rem; font-weight: 600; }
  .row { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); }
  label { display: grid; gap: .35rem; color: var(--muted); font-size: .8rem; text-transform: uppercase; letter-spacing: .05em; }
  select, input { background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .5rem; font-size: .95rem; }
  .metric { font-size: 1.7rem; font-weight: 700; color: var(--text); }
  button { background: var(--accent); color: #fff; border: none; border-radius: 6px; padding: .75rem; font-size: 1rem; font-weight: 600; cursor: pointer; }
  .msg { padding: .8rem 1rem; border-radius: 6px; }
  .msg.error { background: rgba(255,79,106,.15); color: var(--red); }
  .msg.success { background: rgba(0,200,150,.15); color: var(--green); }
  .bar { height: 14px; background: var(--bg); border-radius: 7px; overflow: hidden; }
  .bar > div { height: 100%; }
  .bar .win { background: var(--green); }
  .bar .loss { background: var(--red); }
  .hidden { display: none; }
  footer { color: var(--muted); font-size: .75rem; text-align: center; padding: 1rem; }
</style>
</head>
<body>
<header>
  <h1>🏏 IPL Win Probability Predictor</h1>
  <p>Live match winning chances from a pre-trained classifier</p>
</header>

<main>
  <div class="panel">
    <div class="row">
      <label>🏏 Batting Team <select id="batting"></select></label>
      <label>🎯 Bowling Team <select id="bowling"></select></label>
    </div>
    <div id="team-error" class="msg error hidden">Batting and Bowling teams must be different!</div>
    <label>📍 Match City <select id="city"></select></label>
  </div>

  <div class="panel">
    <h2>📊 Match Situation</h2>
    <div class="row">
      <label>🎯 Target Score <input id="target" type="number" min="1" value="1"></label>
      <label>🏏 Current Score <input id="score" type="number" min="0" value="0"></label>
    </div>
    <div class="row">
      <label>⏱ Overs Completed <input id="overs" type="number" min="0.1" max="20" step="0.1" value="0.1"></label>
      <label>❌ Wickets Fallen <input id="wickets" type="number" min="0" max="10" value="0"></label>
      <label>🏏 Balls Left <span class="metric" id="balls-left">–</span></label>
    </div>
    <button id="predict">🔮 Predict Win Probability</button>
  </div>

  <div class="panel hidden" id="result"></div>
</main>

<footer>⚡ Built with Rust &amp; Machine Learning <span id="model-name"></span></footer>

<script>
const $ = id => document.getElementById(id);

function fill(select, values) {
  select.innerHTML = values.map(v => `<option>${v}</option>`).join('');
}

function teamsDiffer() {
  const same = $('batting').value === $('bowling').value;
  $('team-error').classList.toggle('hidden', !same);
  $('predict').disabled = same;
  return !same;
}

async function refreshBallsLeft() {
  const overs = parseFloat($('overs').value);
  if (isNaN(overs)) { $('balls-left').textContent = '–'; return; }
  const res = await fetch(`/api/balls-left?overs=${overs}`);
  if (res.ok) $('balls-left').textContent = (await res.json()).balls_left;
}

function bar(cls, pct) {
  return `<div class="bar"><div class="${cls}" style="width:${pct}%"></div></div>`;
}

async function predict() {
  if (!teamsDiffer()) return;
  const body = {
    batting_team: $('batting').value,
    bowling_team: $('bowling').value,
    city: $('city').value,
    target: parseInt($('target').value, 10),
    score: parseInt($('score').value, 10),
    overs: parseFloat($('overs').value),
    wickets: parseInt($('wickets').value, 10),
  };
  const res = await fetch('/api/predict', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const out = $('result');
  out.classList.remove('hidden');
  const data = await res.json().catch(() => ({ error: res.statusText }));
  if (!res.ok) {
    out.innerHTML = `<div class="msg error">${data.error}</div>`;
    return;
  }
  if (data.outcome.kind === 'already_won') {
    out.innerHTML = `<div class="msg success">🏆 ${data.batting_team} has already won the match!</div>`;
    return;
  }
  const win = data.outcome.win_probability, loss = data.outcome.loss_probability;
  out.innerHTML = `
    <h2>📈 Winning Chances</h2>
    <div class="msg success">🏆 ${data.batting_team}</div>
    ${bar('win', win)}<div class="metric">${win.toFixed(2)}%</div>
    <div class="msg error">💥 ${data.bowling_team}</div>
    ${bar('loss', loss)}<div class="metric">${loss.toFixed(2)}%</div>`;
}

async function init() {
  const opts = await (await fetch('/api/options')).json();
  fill($('batting'), opts.teams);
  fill($('bowling'), opts.teams);
  fill($('city'), opts.cities);
  const model = await (await fetch('/api/model')).json();
  $('model-name').textContent = `· ${model.name} v${model.version}`;
  $('batting').onchange = $('bowling').onchange = teamsDiffer;
  $('overs').oninput = refreshBallsLeft;
  $('predict').onclick = predict;
  teamsDiffer();
  refreshBallsLeft();
}

init();
</script>
</body>
</html>
"#;
