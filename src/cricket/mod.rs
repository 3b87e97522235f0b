pub mod features;
pub mod state;
pub mod teams;

pub use features::{DerivedFeatures, FeatureRow};
pub use state::{validate, MatchInput, MatchState};
pub use teams::{City, Team};
