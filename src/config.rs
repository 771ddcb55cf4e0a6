use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Invalid configuration combination, surfaced before any stage runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("chunking.chunk_size must be > 0")]
    ZeroChunkSize,
    #[error("chunking.overlap ({overlap}) must be smaller than chunking.chunk_size ({chunk_size})")]
    OverlapTooLarge { overlap: usize, chunk_size: usize },
    #[error("retrieval.top_k must be >= 1")]
    ZeroTopK,
    #[error("embedding.model must be specified when provider is '{provider}'")]
    MissingEmbeddingModel { provider: String },
    #[error("embedding.dims must be > 0 when provider is '{provider}'")]
    MissingEmbeddingDims { provider: String },
    #[error("unknown embedding provider: '{0}'. Must be disabled or openai")]
    UnknownProvider(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// Splitter settings: segment separator, chunk size, and carried overlap,
/// all counted in characters.
#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_overlap")]
    pub overlap: usize,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_chunk_size() -> usize {
    1000
}
fn default_overlap() -> usize {
    200
}
fn default_separator() -> String {
    "\n".to_string()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
            separator: default_separator(),
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if self.chunk_size == 0 {
            return Err(ConfigurationError::ZeroChunkSize);
        }
        if self.overlap >= self.chunk_size {
            return Err(ConfigurationError::OverlapTooLarge {
                overlap: self.overlap,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dims: Option<usize>,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "disabled".to_string(),
            model: None,
            dims: None,
            max_retries: 5,
            timeout_secs: 30,
        }
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_max_retries() -> u32 {
    5
}
fn default_timeout_secs() -> u64 {
    30
}

impl EmbeddingConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        self.chunking.validate()?;

        if self.retrieval.top_k == 0 {
            return Err(ConfigurationError::ZeroTopK);
        }

        if self.embedding.is_enabled() {
            if self.embedding.model.is_none() {
                return Err(ConfigurationError::MissingEmbeddingModel {
                    provider: self.embedding.provider.clone(),
                });
            }
            if self.embedding.dims.is_none() || self.embedding.dims == Some(0) {
                return Err(ConfigurationError::MissingEmbeddingDims {
                    provider: self.embedding.provider.clone(),
                });
            }
        }

        match self.embedding.provider.as_str() {
            "disabled" | "openai" => {}
            other => return Err(ConfigurationError::UnknownProvider(other.to_string())),
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.overlap, 200);
        assert_eq!(config.chunking.separator, "\n");
        assert_eq!(config.retrieval.top_k, 5);
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk_size() {
        let chunking = ChunkingConfig {
            chunk_size: 100,
            overlap: 150,
            separator: "\n".to_string(),
        };
        assert_eq!(
            chunking.validate(),
            Err(ConfigurationError::OverlapTooLarge {
                overlap: 150,
                chunk_size: 100,
            })
        );
    }

    #[test]
    fn overlap_equal_to_chunk_size_rejected() {
        let chunking = ChunkingConfig {
            chunk_size: 100,
            overlap: 100,
            separator: "\n".to_string(),
        };
        assert!(chunking.validate().is_err());
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let chunking = ChunkingConfig {
            chunk_size: 0,
            overlap: 0,
            separator: "\n".to_string(),
        };
        assert_eq!(chunking.validate(), Err(ConfigurationError::ZeroChunkSize));
    }

    #[test]
    fn enabled_provider_requires_model_and_dims() {
        let mut config = Config::default();
        config.embedding.provider = "openai".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MissingEmbeddingModel { .. })
        ));

        config.embedding.model = Some("text-embedding-3-small".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MissingEmbeddingDims { .. })
        ));

        config.embedding.dims = Some(1536);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_provider_rejected() {
        let mut config = Config::default();
        config.embedding.provider = "cohere".to_string();
        config.embedding.model = Some("embed-v3".to_string());
        config.embedding.dims = Some(1024);
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::UnknownProvider("cohere".to_string()))
        );
    }
}
