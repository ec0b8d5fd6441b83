//! Application-level configuration loading, including the prompt seeded into
//! an empty store.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dao::models::{ANSWER_COUNT, PromptEntity, has_blank_answer};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "DAILY_TOP_TEN_CONFIG_PATH";
/// Environment variable that overrides the configured data directory.
const DATA_DIR_ENV: &str = "DAILY_TOP_TEN_DATA_DIR";
/// Environment variable carrying the admin access token.
const ADMIN_TOKEN_ENV: &str = "DAILY_TOP_TEN_ADMIN_TOKEN";
/// Data directory used when neither the file nor the environment sets one.
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    data_dir: PathBuf,
    default_prompt: PromptTemplate,
    admin_token: Option<String>,
}

impl AppConfig {
    /// Load the application configuration from disk and the environment,
    /// falling back to baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        if let Some(dir) = non_empty_env(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        config.admin_token = non_empty_env(ADMIN_TOKEN_ENV);
        if config.admin_token.is_none() {
            warn!("no admin token configured; admin routes are disabled");
        }

        config
    }

    /// Directory holding the durable records.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Prompt seeded when the store holds no prompts at all.
    pub fn default_prompt(&self) -> &PromptTemplate {
        &self.default_prompt
    }

    /// Token admin requests must present, if admin access is enabled.
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            default_prompt: PromptTemplate::default(),
            admin_token: None,
        }
    }
}

/// Dateless prompt content used to seed an empty store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Question text.
    pub question: String,
    /// Ranked answers, rank 1 first.
    pub answers: [String; ANSWER_COUNT],
    /// Answer pool for lookup.
    pub all_possible_answers: Vec<String>,
}

impl PromptTemplate {
    /// Materialise the template as a prompt scheduled for `date`.
    pub fn instantiate(&self, date: String) -> PromptEntity {
        PromptEntity {
            id: Uuid::new_v4(),
            question: self.question.clone(),
            answers: self.answers.clone(),
            all_possible_answers: self.all_possible_answers.clone(),
            date,
        }
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        let answers = [
            "China",
            "India",
            "United States",
            "Indonesia",
            "Pakistan",
            "Brazil",
            "Bangladesh",
            "Russia",
            "Mexico",
            "Japan",
        ]
        .map(String::from);
        let all_possible_answers = answers
            .iter()
            .cloned()
            .chain(
                [
                    "Nigeria",
                    "Germany",
                    "Philippines",
                    "Vietnam",
                    "Turkey",
                    "Iran",
                    "Thailand",
                    "United Kingdom",
                    "France",
                    "Italy",
                ]
                .map(String::from),
            )
            .collect();

        Self {
            question: "Name the top 10 most populous countries in the world".into(),
            answers,
            all_possible_answers,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    default_prompt: Option<RawPrompt>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: value.data_dir.unwrap_or(defaults.data_dir),
            default_prompt: value
                .default_prompt
                .and_then(RawPrompt::into_template)
                .unwrap_or(defaults.default_prompt),
            admin_token: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON representation of the seeded prompt inside the configuration file.
struct RawPrompt {
    question: String,
    answers: [String; ANSWER_COUNT],
    #[serde(default)]
    all_possible_answers: Vec<String>,
}

impl RawPrompt {
    /// `None` when a ranked answer is blank; the caller keeps the built-in prompt.
    fn into_template(self) -> Option<PromptTemplate> {
        if has_blank_answer(&self.answers) {
            warn!(
                question = %self.question,
                "configured default prompt has a blank answer; falling back to defaults"
            );
            return None;
        }
        let all_possible_answers = if self.all_possible_answers.is_empty() {
            self.answers.to_vec()
        } else {
            self.all_possible_answers
        };
        Some(PromptTemplate {
            question: self.question,
            answers: self.answers,
            all_possible_answers,
        })
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
