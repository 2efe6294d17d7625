use std::sync::Arc;

use crate::config::Config;
use crate::translator::{TranslatorFactory, TranslatorInterface};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub translator: Arc<dyn TranslatorInterface>,
}

impl AppState {
    /// Build the shared state, loading the translation model up front.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = TranslatorFactory::create_translator(&config.model_config)?;
        Ok(Self { config, translator })
    }

    /// State with a caller-supplied engine, used by tests to avoid
    /// loading real model weights.
    pub fn with_translator(config: Config, translator: Arc<dyn TranslatorInterface>) -> Self {
        Self { config, translator }
    }
}
