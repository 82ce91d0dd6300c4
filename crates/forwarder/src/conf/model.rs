//! Model — ForwarderConfig and related structs.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::tables;
use crate::label::modifiers::ModifierKind;
use crate::parser::DEFAULT_DELIMITER;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Directory holding the FortiGate log files.
    pub log_dir: PathBuf,
    /// File recording the name of the last processed log file.
    pub state_file: PathBuf,
    pub parser: ParserConfig,
    pub mapping: MappingConfig,
    pub event: EventDefaults,
    pub misp: MispConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Field delimiter; follows the FortiGate log setting.
    pub delimiter: char,
}

/// Lookup tables that drive labelling and attribute construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub message_labels: HashMap<String, String>,
    pub modifiers: Vec<ModifierKind>,
    pub av_message_ids: Vec<String>,
    pub ignore_keys: Vec<String>,
    pub tag_keys: Vec<String>,
    pub key_category_type: HashMap<String, CategoryType>,
    pub default_category_type: CategoryType,
    pub disable_correlation_categories: Vec<String>,
    /// Namespace for provenance and event tags; also the classification tag.
    pub tag_namespace: String,
}

/// MISP (category, type) pair. Written as a two-element array in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct CategoryType {
    pub category: String,
    pub kind: String,
}

impl CategoryType {
    pub fn new(category: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            kind: kind.into(),
        }
    }
}

impl From<(String, String)> for CategoryType {
    fn from((category, kind): (String, String)) -> Self {
        Self { category, kind }
    }
}

impl From<CategoryType> for (String, String) {
    fn from(ct: CategoryType) -> Self {
        (ct.category, ct.kind)
    }
}

/// Static metadata stamped on every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDefaults {
    /// Shown in brackets at the start of the event info line.
    pub source_label: String,
    pub distribution: String,
    pub threat_level_id: String,
    pub analysis: String,
    pub published: bool,
    pub sharing_group_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MispConfig {
    pub url: String,
    pub authkey: String,
    pub verify_tls: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total submission attempts per event, including the first.
    pub max_attempts: u32,
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("log"),
            state_file: PathBuf::from("last_file_name"),
            parser: ParserConfig::default(),
            mapping: MappingConfig::default(),
            event: EventDefaults::default(),
            misp: MispConfig::default(),
            retry: RetryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            message_labels: tables::message_labels(),
            modifiers: vec![ModifierKind::Jlist],
            av_message_ids: tables::av_message_ids(),
            ignore_keys: tables::ignore_keys(),
            tag_keys: tables::tag_keys(),
            key_category_type: tables::key_category_type(),
            default_category_type: tables::default_category_type(),
            disable_correlation_categories: tables::disable_correlation_categories(),
            tag_namespace: "fortigate".to_string(),
        }
    }
}

impl MappingConfig {
    pub fn is_av_message(&self, message_id: &str) -> bool {
        self.av_message_ids.iter().any(|id| id == message_id)
    }

    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignore_keys.iter().any(|k| k == key)
    }

    pub fn is_tag_key(&self, key: &str) -> bool {
        self.tag_keys.iter().any(|k| k == key)
    }

    /// Category/type for a field, falling back to the default pair.
    pub fn category_type(&self, key: &str) -> &CategoryType {
        self.key_category_type
            .get(key)
            .unwrap_or(&self.default_category_type)
    }

    pub fn disables_correlation(&self, category: &str) -> bool {
        self.disable_correlation_categories
            .iter()
            .any(|c| c == category)
    }

    /// Provenance tag naming a source field.
    pub fn provenance_tag(&self, key: &str) -> String {
        format!("{}:{}", self.tag_namespace, key)
    }
}

impl Default for EventDefaults {
    fn default() -> Self {
        Self {
            source_label: "FortiGate".to_string(),
            distribution: "2".to_string(),
            threat_level_id: "4".to_string(),
            analysis: "0".to_string(),
            published: true,
            sharing_group_id: None,
        }
    }
}

impl Default for MispConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            authkey: String::new(),
            verify_tls: false,
            timeout_secs: 30,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,forwarder=debug".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
