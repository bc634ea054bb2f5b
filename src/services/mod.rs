// Service exports
pub mod advisor;
pub mod location;
pub mod predictor;

pub use advisor::{AdvisorClient, AdvisorError};
pub use location::{LocationClient, LocationError, season_for, select_diverse};
pub use predictor::{PredictorClient, PredictorError};
