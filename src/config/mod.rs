use std::env;
use std::fmt;
use std::path::PathBuf;

use url::Url;

const DEFAULT_PUBLIC_BASE_URL: &str = "https://plankton-app-equrn.ondigitalocean.app";
const DEFAULT_STORAGE_DIR: &str = "data/yandex-feeds";

/// Top-level configuration consumed by the feed engine.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Prefix for photo links embedded in generated feed documents.
    pub public_base_url: String,
    pub yandex: YandexPublishConfig,
}

/// Storage and retrieval settings for published Yandex feeds.
#[derive(Debug, Clone)]
pub struct YandexPublishConfig {
    pub storage_dir: PathBuf,
    pub base_url: String,
}

impl FeedConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let public_base_url = base_url_var("PUBLIC_BASE_URL", DEFAULT_PUBLIC_BASE_URL)?;

        let storage_dir = env::var("YANDEX_FEED_STORAGE_DIR")
            .unwrap_or_else(|_| DEFAULT_STORAGE_DIR.to_string());

        let default_yandex_base = format!("{}/feeds/yandex", public_base_url);
        let yandex_base_url = base_url_var("YANDEX_FEED_BASE_URL", &default_yandex_base)?;

        Ok(Self {
            public_base_url,
            yandex: YandexPublishConfig {
                storage_dir: PathBuf::from(storage_dir),
                base_url: yandex_base_url,
            },
        })
    }
}

fn base_url_var(name: &'static str, default: &str) -> Result<String, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    let trimmed = raw.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        variable: name,
        source,
    })?;
    if !parsed.has_host() {
        return Err(ConfigError::BaseUrlWithoutHost { variable: name });
    }

    Ok(trimmed.to_string())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl {
        variable: &'static str,
        source: url::ParseError,
    },
    BaseUrlWithoutHost {
        variable: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { variable, .. } => {
                write!(f, "{} must be an absolute URL", variable)
            }
            ConfigError::BaseUrlWithoutHost { variable } => {
                write!(f, "{} must include a host", variable)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidBaseUrl { source, .. } => Some(source),
            ConfigError::BaseUrlWithoutHost { .. } => None,
        }
    }
}
