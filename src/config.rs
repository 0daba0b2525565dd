use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::api_connection::ApiConnectionError;

pub const MODE_ENV_VAR: &str = "MEAL_PLANNER_MODE";
pub const API_KEY_ENV_VAR: &str = "MEAL_PLANNER_API_KEY";
pub const API_BASE_URL_ENV_VAR: &str = "MEAL_PLANNER_API_BASE_URL";
pub const MODEL_ENV_VAR: &str = "MEAL_PLANNER_MODEL";
pub const TEMPERATURE_ENV_VAR: &str = "MEAL_PLANNER_TEMPERATURE";
pub const MAX_TOKENS_ENV_VAR: &str = "MEAL_PLANNER_MAX_TOKENS";
pub const TIMEOUT_ENV_VAR: &str = "MEAL_PLANNER_TIMEOUT_SECS";

pub const DEFAULT_API_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("remote generation is enabled but not configured: {0} is missing")]
    NotConfigured(&'static str),
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build chat-completion client")]
    Client(#[from] ApiConnectionError),
}

/// Which strategy the planner uses. Never inferred from whether a key happens to be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Template,
    Remote,
}

impl FromStr for GenerationMode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(GenerationMode::Template),
            "remote" => Ok(GenerationMode::Remote),
            other => Err(PlannerError::InvalidConfig(format!(
                "unknown generation mode '{}', expected 'template' or 'remote'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSettings {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RemoteSettings {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlannerConfig {
    pub mode: GenerationMode,
    pub remote: RemoteSettings,
}

impl PlannerConfig {
    pub fn template_only() -> Self {
        Self::default()
    }

    /// Remote generation against `api_base_url` with `api_key`.
    pub fn remote(api_key: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            mode: GenerationMode::Remote,
            remote: RemoteSettings {
                api_key: Some(api_key.into()),
                api_base_url: api_base_url.into(),
                ..RemoteSettings::default()
            },
        }
    }

    /// Load configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(MODE_ENV_VAR) {
            Some(value) => value
                .parse()
                .with_context(|| format!("{} must be 'template' or 'remote'", MODE_ENV_VAR))?,
            None => GenerationMode::default(),
        };

        let timeout_secs = parse_or(&lookup, TIMEOUT_ENV_VAR, DEFAULT_TIMEOUT_SECS)?;
        let remote = RemoteSettings {
            api_key: lookup(API_KEY_ENV_VAR).filter(|k| !k.trim().is_empty()),
            api_base_url: lookup(API_BASE_URL_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            model: lookup(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: parse_or(&lookup, TEMPERATURE_ENV_VAR, DEFAULT_TEMPERATURE)?,
            max_tokens: parse_or(&lookup, MAX_TOKENS_ENV_VAR, DEFAULT_MAX_TOKENS)?,
            request_timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self { mode, remote })
    }

    /// Remote mode without an API key is an error here rather than a silent downgrade.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.mode == GenerationMode::Template {
            return Ok(());
        }

        let key_present = self
            .remote
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        if !key_present {
            return Err(PlannerError::NotConfigured(API_KEY_ENV_VAR));
        }
        if self.remote.api_base_url.trim().is_empty() {
            return Err(PlannerError::InvalidConfig("API base URL cannot be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.remote.temperature) {
            return Err(PlannerError::InvalidConfig(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.remote.temperature
            )));
        }
        if self.remote.max_tokens == 0 {
            return Err(PlannerError::InvalidConfig(
                "max tokens must be greater than 0".to_string(),
            ));
        }
        if self.remote.request_timeout.is_zero() {
            return Err(PlannerError::InvalidConfig(
                "request timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", name, value)),
        None => Ok(default),
    }
}
