//! Editor configuration persistence.
//!
//! Stores user preferences in `~/.config/linekit/config.yaml`, including
//! declarative token rules compiled into a [`PatternSet`] at startup.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::syntax::{Pattern, PatternError, PatternSet};

/// A declarative token recognition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRule {
    /// Regex tried against each whitespace-delimited word. Case sensitivity
    /// belongs to the pattern itself (inline `(?i)`).
    pub pattern: String,
    /// Recognize the rule only when the word is the first of the line.
    #[serde(default)]
    pub only_at_line_start: bool,
}

impl TokenRule {
    /// Compile into a [`Pattern`], attaching the host's token view factory.
    pub fn compile<V>(
        &self,
        factory: impl Fn() -> V + Send + Sync + 'static,
    ) -> Result<Pattern<V>, PatternError> {
        if self.only_at_line_start {
            Pattern::with_skip(&self.pattern, factory, |index, _| index > 0)
        } else {
            Pattern::new(&self.pattern, factory)
        }
    }
}

/// Configuration that persists across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEditorConfig {
    /// Row font size (points), forwarded to the presentation.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Show the line-number label in front of each row.
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,
    /// Interval between focus-advancement retries, in milliseconds.
    #[serde(default = "default_focus_retry_interval_ms")]
    pub focus_retry_interval_ms: u64,
    /// Default retry budget for focus requests after row insertion.
    #[serde(default = "default_focus_max_retries")]
    pub focus_max_retries: u32,
    /// Token recognition rules, tried in declaration order.
    #[serde(default)]
    pub token_rules: Vec<TokenRule>,
}

fn default_font_size() -> f32 {
    15.0
}

fn default_show_line_numbers() -> bool {
    true
}

fn default_focus_retry_interval_ms() -> u64 {
    500
}

fn default_focus_max_retries() -> u32 {
    5
}

impl Default for LineEditorConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            show_line_numbers: default_show_line_numbers(),
            focus_retry_interval_ms: default_focus_retry_interval_ms(),
            focus_max_retries: default_focus_max_retries(),
            token_rules: Vec::new(),
        }
    }
}

impl LineEditorConfig {
    /// Load config from disk, or return defaults if not found or malformed.
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk, creating the config directory if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file()
            .context("no config directory available")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("serializing config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("writing config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn focus_retry_interval(&self) -> Duration {
        Duration::from_millis(self.focus_retry_interval_ms)
    }

    /// Compile the configured token rules, in order, into a [`PatternSet`].
    /// All rules share one token view factory.
    pub fn pattern_set<V>(
        &self,
        factory: impl Fn() -> V + Clone + Send + Sync + 'static,
    ) -> Result<PatternSet<V>, PatternError> {
        let mut set = PatternSet::new();
        for rule in &self.token_rules {
            set.push(rule.compile(factory.clone())?);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LineEditorConfig::default();
        assert_eq!(config.focus_retry_interval(), Duration::from_millis(500));
        assert_eq!(config.focus_max_retries, 5);
        assert!(config.token_rules.is_empty());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = LineEditorConfig::default();
        config.token_rules.push(TokenRule {
            pattern: r"(?i)^participant\b".to_string(),
            only_at_line_start: true,
        });

        let yaml = serde_yaml::to_string(&config).expect("serializes");
        let parsed: LineEditorConfig = serde_yaml::from_str(&yaml).expect("parses");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: LineEditorConfig =
            serde_yaml::from_str("font_size: 18.0\n").expect("parses");
        assert_eq!(parsed.font_size, 18.0);
        assert_eq!(parsed.focus_retry_interval_ms, 500);
        assert!(parsed.show_line_numbers);
    }

    #[test]
    fn test_pattern_set_honors_line_start_rule() {
        let mut config = LineEditorConfig::default();
        config.token_rules.push(TokenRule {
            pattern: r"(?i)^participant\b".to_string(),
            only_at_line_start: true,
        });

        let set = config.pattern_set(|| ()).expect("compiles");
        let words = ["participant", "p1"];
        assert!(set.matches("participant", 0, &words).is_some());
        let words = ["foo", "participant"];
        assert!(set.matches("participant", 1, &words).is_none());
    }

    #[test]
    fn test_invalid_rule_surfaces_error() {
        let mut config = LineEditorConfig::default();
        config.token_rules.push(TokenRule {
            pattern: "(broken".to_string(),
            only_at_line_start: false,
        });

        assert!(config.pattern_set(|| ()).is_err());
    }
}
