//! MarianMT translation engine running natively via Candle.
//!
//! Loads the opus-mt en→es encoder/decoder weights plus the source and
//! target SentencePiece tokenizers once, then serves greedy decoding per
//! request. The decoder keeps a KV cache that is mutated during
//! generation, so the model sits behind an async mutex and requests are
//! translated one at a time.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::marian::{Config as MarianConfig, MTModel};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::interface::TranslatorInterface;
use crate::config::ModelConfig;
use crate::error::{TranslatorError, TranslatorResult};

/// Fixed seed for the logits processor. Irrelevant for greedy decoding but
/// keeps generation reproducible if sampling is ever enabled.
const GENERATION_SEED: u64 = 1337;

pub struct MarianTranslator {
    model_id: String,
    max_tokens: usize,
    device: Device,
    config: MarianConfig,
    source_tokenizer: Tokenizer,
    target_tokenizer: Tokenizer,
    // decode() advances the KV cache, so all inference is serialized here
    model: Mutex<MTModel>,
}

impl MarianTranslator {
    /// Load weights and tokenizers from the configured model directory.
    ///
    /// This is a blocking, synchronous load intended to run once during
    /// process bootstrap, before the listener starts accepting requests.
    pub fn load(model_config: &ModelConfig) -> TranslatorResult<Self> {
        info!(
            model_id = %model_config.model_id,
            model_dir = %model_config.model_dir.display(),
            use_cuda = model_config.use_cuda,
            "Loading translation model"
        );

        let device = Self::select_device(model_config.use_cuda);

        let weights_path = Self::resolve_file(&model_config.model_dir, &model_config.weights_file)?;
        let source_path =
            Self::resolve_file(&model_config.model_dir, &model_config.source_tokenizer)?;
        let target_path =
            Self::resolve_file(&model_config.model_dir, &model_config.target_tokenizer)?;

        let source_tokenizer =
            Tokenizer::from_file(&source_path).map_err(|e| TranslatorError::TokenizerError {
                message: format!("{}: {}", source_path.display(), e),
            })?;
        let target_tokenizer =
            Tokenizer::from_file(&target_path).map_err(|e| TranslatorError::TokenizerError {
                message: format!("{}: {}", target_path.display(), e),
            })?;

        let config = Self::opus_mt_en_es_config();

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device).map_err(
                |e| TranslatorError::LoadError {
                    message: format!("failed to map safetensors: {}", e),
                },
            )?
        };

        let model = MTModel::new(&config, vb).map_err(|e| TranslatorError::LoadError {
            message: format!("failed to build model: {}", e),
        })?;

        info!(device = ?device, "Translation model loaded");

        Ok(Self {
            model_id: model_config.model_id.clone(),
            max_tokens: model_config.max_tokens,
            device,
            config,
            source_tokenizer,
            target_tokenizer,
            model: Mutex::new(model),
        })
    }

    fn select_device(use_cuda: bool) -> Device {
        if !use_cuda {
            return Device::Cpu;
        }
        match Device::cuda_if_available(0) {
            Ok(dev) if dev.is_cuda() => {
                info!("CUDA device detected, using GPU acceleration");
                dev
            }
            Ok(_) => {
                warn!("CUDA requested but not available, using CPU");
                Device::Cpu
            }
            Err(e) => {
                warn!(error = %e, "Failed to initialize CUDA, using CPU");
                Device::Cpu
            }
        }
    }

    fn resolve_file(dir: &Path, name: &str) -> TranslatorResult<PathBuf> {
        let path = dir.join(name);
        if !path.exists() {
            return Err(TranslatorError::ModelNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(path)
    }

    /// Architecture constants for Helsinki-NLP/opus-mt-en-es.
    fn opus_mt_en_es_config() -> MarianConfig {
        MarianConfig {
            vocab_size: 65001,
            decoder_vocab_size: Some(65001),
            max_position_embeddings: 512,
            encoder_layers: 6,
            encoder_ffn_dim: 2048,
            encoder_attention_heads: 8,
            decoder_layers: 6,
            decoder_ffn_dim: 2048,
            decoder_attention_heads: 8,
            use_cache: true,
            is_encoder_decoder: true,
            activation_function: candle_nn::Activation::Swish,
            d_model: 512,
            decoder_start_token_id: 65000,
            scale_embedding: true,
            pad_token_id: 65000,
            eos_token_id: 0,
            forced_eos_token_id: 0,
            share_encoder_decoder_embeddings: true,
        }
    }

    fn encode_source(&self, text: &str) -> TranslatorResult<Vec<u32>> {
        let encoding = self
            .source_tokenizer
            .encode(text, true)
            .map_err(|e| TranslatorError::TokenizerError {
                message: format!("failed to encode input: {}", e),
            })?;

        let mut tokens = encoding.get_ids().to_vec();
        if tokens.last() != Some(&self.config.eos_token_id) {
            tokens.push(self.config.eos_token_id);
        }

        // The encoder has a fixed position table; keep the trailing eos
        let max_len = self.config.max_position_embeddings;
        if tokens.len() > max_len {
            tokens.truncate(max_len - 1);
            tokens.push(self.config.eos_token_id);
        }

        Ok(tokens)
    }

    async fn generate(&self, text: &str) -> TranslatorResult<String> {
        let tokens = self.encode_source(text)?;
        debug!(input_tokens = tokens.len(), "Running translation");

        let mut model = self.model.lock().await;
        model.reset_kv_cache();

        let input = Tensor::new(tokens.as_slice(), &self.device)?.unsqueeze(0)?;
        let encoder_xs = model.encoder().forward(&input, 0)?;

        // Greedy decoding: no temperature, no top-p
        let mut logits_processor = LogitsProcessor::new(GENERATION_SEED, None, None);
        let mut token_ids = vec![self.config.decoder_start_token_id];
        let max_len = self.max_tokens.min(self.config.max_position_embeddings);

        for index in 0..max_len {
            // After the first step the KV cache covers the prefix
            let context_size = if index >= 1 { 1 } else { token_ids.len() };
            let start_pos = token_ids.len().saturating_sub(context_size);
            let input_ids = Tensor::new(&token_ids[start_pos..], &self.device)?.unsqueeze(0)?;

            let logits = model.decode(&input_ids, &encoder_xs, start_pos)?;
            let logits = logits.squeeze(0)?;
            let logits = logits.get(logits.dim(0)? - 1)?;

            let token = logits_processor
                .sample(&logits)
                .map_err(|e| TranslatorError::InferenceError {
                    message: format!("sampling failed: {}", e),
                })?;
            if token == self.config.eos_token_id || token == self.config.forced_eos_token_id {
                break;
            }
            token_ids.push(token);
        }
        drop(model);

        let output = self
            .target_tokenizer
            .decode(&token_ids[1..], true)
            .map_err(|e| TranslatorError::TokenizerError {
                message: format!("failed to decode output: {}", e),
            })?;

        Ok(output.trim().to_string())
    }
}

#[async_trait]
impl TranslatorInterface for MarianTranslator {
    async fn translate(&self, text: &str) -> Result<String, anyhow::Error> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        let translated = self.generate(text).await?;
        Ok(translated)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
