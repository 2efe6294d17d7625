//! Translator interface - concrete engines live alongside this module

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// Translation engine trait
#[async_trait]
pub trait TranslatorInterface: Send + Sync {
    /// Translate a source-language string into the target language
    ///
    /// # Arguments
    /// * `text` - Source text, assumed to be a single passage
    ///
    /// # Returns
    /// The translated text
    async fn translate(&self, text: &str) -> Result<String, anyhow::Error>;

    /// Model id this engine was built from, for health reporting
    fn model_id(&self) -> &str;
}
