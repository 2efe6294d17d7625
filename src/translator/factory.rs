use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use super::interface::TranslatorInterface;
use super::marian::MarianTranslator;
use crate::config::ModelConfig;

/// Factory for creating translation engines
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translation engine based on configuration
    ///
    /// # Arguments
    /// * `model_config` - Model configuration (id, file locations, limits)
    ///
    /// # Returns
    /// Shared TranslatorInterface implementation
    pub fn create_translator(model_config: &ModelConfig) -> Result<Arc<dyn TranslatorInterface>> {
        info!("Initializing translation engine: {}", model_config.model_id);

        let engine = MarianTranslator::load(model_config)?;
        Ok(Arc::new(engine))
    }
}
