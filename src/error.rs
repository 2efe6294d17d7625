use thiserror::Error;

/// Errors surfaced by the translation engine.
#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("model file not found: {path}")]
    ModelNotFound { path: String },

    #[error("failed to load model: {message}")]
    LoadError { message: String },

    #[error("tokenizer error: {message}")]
    TokenizerError { message: String },

    #[error("inference failed: {message}")]
    InferenceError { message: String },

    #[error(transparent)]
    Tensor(#[from] candle_core::Error),
}

pub type TranslatorResult<T> = std::result::Result<T, TranslatorError>;
