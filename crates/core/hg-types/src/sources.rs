//! Per-topic source configuration.
//!
//! The sources document maps each topic to the HDFS root directories its
//! hourly data lands under:
//!
//! ```yaml
//! clicks:
//!   input:
//!     primaryRoot: hdfs://namenode:8020/data/clicks
//!     staleRoot:
//!       - /data/clicks-stale
//!       - /data/clicks-backfill
//! ```
//!
//! `gobblin` and `gobblinStale` are accepted as aliases of the two root keys.

use hg_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::warn;

/// One root setting: a single path or a (possibly nested) list of paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RootSpec {
    /// A single directory path
    One(String),
    /// A list of paths; nulls are skipped and nested lists flattened
    Many(Vec<Option<RootSpec>>),
}

impl RootSpec {
    fn flatten_into(&self, out: &mut Vec<String>) {
        match self {
            Self::One(root) => out.push(root.clone()),
            Self::Many(roots) => {
                for root in roots.iter().flatten() {
                    root.flatten_into(out);
                }
            }
        }
    }
}

impl From<&str> for RootSpec {
    fn from(root: &str) -> Self {
        Self::One(root.to_string())
    }
}

impl From<Vec<&str>> for RootSpec {
    fn from(roots: Vec<&str>) -> Self {
        Self::Many(roots.into_iter().map(|r| Some(Self::from(r))).collect())
    }
}

/// Input roots of a topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    /// Where fresh data lands
    #[serde(rename = "primaryRoot", alias = "gobblin", default)]
    pub primary_root: Option<RootSpec>,

    /// Fallback location for late or reprocessed data
    #[serde(rename = "staleRoot", alias = "gobblinStale", default)]
    pub stale_root: Option<RootSpec>,
}

/// Configuration of a single topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    /// Input roots; required for the topic to be scannable
    #[serde(default)]
    pub input: Option<InputSpec>,
}

impl TopicConfig {
    /// Create a topic configuration with an empty input section.
    pub fn new() -> Self {
        Self {
            input: Some(InputSpec::default()),
        }
    }

    /// Set the primary root(s).
    pub fn with_primary_root(mut self, root: impl Into<RootSpec>) -> Self {
        self.input.get_or_insert_with(InputSpec::default).primary_root = Some(root.into());
        self
    }

    /// Set the stale root(s).
    pub fn with_stale_root(mut self, root: impl Into<RootSpec>) -> Self {
        self.input.get_or_insert_with(InputSpec::default).stale_root = Some(root.into());
        self
    }

    /// Resolve the topic's roots into absolute HDFS paths.
    ///
    /// Primary roots come first, then stale roots. Empty entries are dropped,
    /// scheme/authority prefixes stripped, trailing slashes trimmed, and
    /// duplicates removed keeping first-seen order.
    pub fn roots(&self, topic: &str) -> Result<Vec<String>, ConfigError> {
        let input = self.input.as_ref().ok_or_else(|| ConfigError::MalformedTopic {
            topic: topic.to_string(),
            reason: "missing input section".to_string(),
        })?;

        let mut raw = Vec::new();
        for spec in [&input.primary_root, &input.stale_root].into_iter().flatten() {
            spec.flatten_into(&mut raw);
        }

        let mut seen = HashSet::new();
        let mut roots = Vec::with_capacity(raw.len());
        for root in raw.iter().filter(|root| !root.is_empty()) {
            let path = strip_scheme(root).ok_or_else(|| ConfigError::MalformedTopic {
                topic: topic.to_string(),
                reason: format!("root '{root}' has no absolute path"),
            })?;
            let path = path.trim_end_matches('/').to_string();
            if seen.insert(path.clone()) {
                roots.push(path);
            }
        }

        Ok(roots)
    }
}

/// Strip a `scheme://authority` prefix, keeping the absolute path.
///
/// Returns `None` when no absolute path component remains.
///
/// ```
/// use hg_types::strip_scheme;
///
/// assert_eq!(strip_scheme("hdfs://nn:8020/data/t"), Some("/data/t"));
/// assert_eq!(strip_scheme("/data/t"), Some("/data/t"));
/// assert_eq!(strip_scheme("data/t"), None);
/// ```
pub fn strip_scheme(root: &str) -> Option<&str> {
    let path = match root.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => &rest[rest.find('/')?..],
        _ => root,
    };
    path.starts_with('/').then_some(path)
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// All configured topics.
///
/// Topics that fail to decode are kept with their decode error so that the
/// failure surfaces, naming the topic, only when that topic is scanned.
#[derive(Debug, Clone, Default)]
pub struct TopicSources {
    topics: BTreeMap<String, Result<TopicConfig, String>>,
}

impl TopicSources {
    /// Create an empty set of sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a topic.
    pub fn with_topic(mut self, topic: impl Into<String>, config: TopicConfig) -> Self {
        self.topics.insert(topic.into(), Ok(config));
        self
    }

    /// Parse a YAML (or JSON) sources document.
    pub fn from_yaml_str(document: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(document)
            .map_err(|e| ConfigError::Sources(format!("expected a mapping of topics: {e}")))?;

        let topics = raw
            .into_iter()
            .map(|(topic, value)| {
                let config = serde_yaml::from_value::<TopicConfig>(value).map_err(|e| e.to_string());
                if let Err(reason) = &config {
                    warn!(topic = %topic, reason = %reason, "Topic configuration is malformed");
                }
                (topic, config)
            })
            .collect();

        Ok(Self { topics })
    }

    /// Read and parse a sources document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Sources(format!("failed to read {}: {e}", path.display())))?;
        Self::from_yaml_str(&document)
    }

    /// Resolved roots of a topic.
    pub fn roots(&self, topic: &str) -> Result<Vec<String>, ConfigError> {
        match self.topics.get(topic) {
            None => Err(ConfigError::UnknownTopic(topic.to_string())),
            Some(Err(reason)) => Err(ConfigError::MalformedTopic {
                topic: topic.to_string(),
                reason: reason.clone(),
            }),
            Some(Ok(config)) => config.roots(topic),
        }
    }

    /// Configured topic names, sorted.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    /// Number of configured topics.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether no topics are configured.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
