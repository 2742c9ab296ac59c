//! Runtime configuration.
//!
//! Read from an optional JSON file; every field has a default so an empty
//! object is a valid config. Command-line flags override file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::format::DisplayConfig;
use crate::git::locator::DEFAULT_MARKER;
use crate::git::{CliGit, FsProbe, HostMatcher, LinkResolver, LinkRule, LinkTable, RepositoryLocator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRuleConfig {
    pub host: String,
    /// Also match subdomains of `host`
    #[serde(default)]
    pub suffix: bool,
    /// e.g. `https://{host}/{path}/-/commit/{rev}`
    pub template: String,
}

impl From<&LinkRuleConfig> for LinkRule {
    fn from(cfg: &LinkRuleConfig) -> Self {
        let matcher = if cfg.suffix {
            HostMatcher::Suffix(cfg.host.clone())
        } else {
            HostMatcher::Exact(cfg.host.clone())
        };
        LinkRule::new(matcher, cfg.template.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub git_binary: PathBuf,
    pub marker_dir: String,
    pub port: u16,
    pub display: DisplayConfig,
    pub link_rules: Vec<LinkRuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_binary: PathBuf::from("git"),
            marker_dir: DEFAULT_MARKER.to_string(),
            port: 3001,
            display: DisplayConfig::default(),
            link_rules: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents).map_err(|e| match e {
            AppError::Config(msg) => AppError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| AppError::Config(e.to_string()))?;
        config.display.validate()?;
        Ok(config)
    }

    pub fn link_table(&self) -> LinkTable {
        LinkTable::with_rules(self.link_rules.iter().map(LinkRule::from))
    }

    pub fn resolver(&self) -> LinkResolver {
        LinkResolver::new(
            CliGit::new(&self.git_binary),
            RepositoryLocator::with_probe(FsProbe, self.marker_dir.clone()),
            self.link_table(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::RemoteDescriptor;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_display_section() {
        let cfg = Config::from_json(r#"{ "display": { "date_format": "%d/%m/%Y" } }"#).unwrap();
        assert_eq!(cfg.display.date_format, "%d/%m/%Y");
        assert_eq!(cfg.display.relative_days, 5);
    }

    #[test]
    fn link_rules_extend_the_table() {
        let cfg = Config::from_json(
            r#"{ "link_rules": [
                { "host": "gitlab.com", "template": "https://{host}/{path}/-/commit/{rev}" }
            ] }"#,
        )
        .unwrap();
        let remote = RemoteDescriptor::parse("git@gitlab.com:team/proj.git").unwrap();
        assert_eq!(
            cfg.link_table().commit_link(&remote, "abc"),
            "https://gitlab.com/team/proj/-/commit/abc"
        );
    }

    #[test]
    fn bad_display_values_are_rejected() {
        let err = Config::from_json(r#"{ "display": { "date_format": "%Q" } }"#).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("date_format")));

        let json = format!(r#"{{ "display": {{ "relative_days": {} }} }}"#, i64::MAX);
        let err = Config::from_json(&json).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("relative_days")));
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        assert!(matches!(Config::from_json("{ nope"), Err(AppError::Config(_))));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
