use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod config;
mod cricket;
mod dashboard;
mod display;
mod error;
mod model;
mod predictor;

use config::{Command, Config, PredictArgs};
use cricket::{City, Team};
use dashboard::AppState;
use model::ModelArtifact;
use predictor::Predictor;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    match &config.command {
        Command::Teams => {
            for team in Team::ALL {
                println!("{}", team);
            }
        }
        Command::Cities => {
            for city in City::ALL {
                println!("{}", city);
            }
        }
        Command::Predict(args) => {
            let (predictor, _) = load_predictor(&config.model_path)?;
            run_predict(&predictor, args)?;
        }
        Command::Serve { addr } => {
            let (predictor, artifact) = load_predictor(&config.model_path)?;
            let state = AppState {
                predictor,
                model: artifact.summary(),
            };
            let app = dashboard::router(state);
            let addr: SocketAddr = addr.parse()?;
            info!("Dashboard listening on http://{}", addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// Load the artifact once; the returned predictor shares it read-only.
fn load_predictor(path: &str) -> Result<(Predictor, Arc<ModelArtifact>)> {
    let artifact = Arc::new(
        ModelArtifact::load(path).with_context(|| format!("Failed to load model from {}", path))?,
    );
    info!(
        "Model loaded: {} v{} ({} encoded features)",
        artifact.name,
        artifact.version,
        artifact.encoded_width()
    );
    if let Some(trained_at) = artifact.trained_at {
        info!("Model trained at {}", trained_at.to_rfc3339());
    }
    let predictor = Predictor::new(artifact.clone())
        .context("Model artifact does not match the prediction record schema")?;
    Ok((predictor, artifact))
}

fn run_predict(predictor: &Predictor, args: &PredictArgs) -> Result<()> {
    let state = cricket::validate(&args.to_input())?;
    let report = predictor.predict(&state)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", display::render_report(&report));
    }
    Ok(())
}
