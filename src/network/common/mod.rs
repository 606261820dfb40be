pub mod errors;
pub mod interface;
#[macro_use]
pub mod logging;
pub mod loader;
pub mod setup;

// Re-export key types
pub use errors::{InferenceError, Result};
pub use interface::RandomVariable;
pub use setup::SamplingConfig;
