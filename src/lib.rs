pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod translator;

pub use config::Config;
pub use error::{TranslatorError, TranslatorResult};
pub use state::AppState;
