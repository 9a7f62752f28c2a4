pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod session;

pub use error::DataLoadError;
pub use session::{DashboardView, FleetSession};
