pub mod artifact;
pub mod classifier;

pub use artifact::{ModelArtifact, ModelSummary};
pub use classifier::WinClassifier;
