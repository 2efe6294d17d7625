use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use anyhow::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub model_config: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hugging Face id of the translation model; the architecture constants
    /// compiled into the engine match this model family.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Directory holding the weights and tokenizer files.
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
    #[serde(default = "default_weights_file")]
    pub weights_file: String,
    #[serde(default = "default_source_tokenizer")]
    pub source_tokenizer: String,
    #[serde(default = "default_target_tokenizer")]
    pub target_tokenizer: String,
    /// Hard cap on generated tokens per request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default)]
    pub use_cuda: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5555
}

fn default_model_id() -> String {
    "Helsinki-NLP/opus-mt-en-es".to_string()
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models/opus-mt-en-es")
}

fn default_weights_file() -> String {
    "model.safetensors".to_string()
}

fn default_source_tokenizer() -> String {
    "tokenizer-marian-base-en.json".to_string()
}

fn default_target_tokenizer() -> String {
    "tokenizer-marian-base-es.json".to_string()
}

fn default_max_tokens() -> usize {
    512
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        }
    }
}

impl SystemConfig {
    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            model_dir: default_model_dir(),
            weights_file: default_weights_file(),
            source_tokenizer: default_source_tokenizer(),
            target_tokenizer: default_target_tokenizer(),
            max_tokens: default_max_tokens(),
            use_cuda: false,
        }
    }
}
