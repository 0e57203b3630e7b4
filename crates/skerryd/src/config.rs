//! TOML configuration for the Skerry daemon.
//!
//! Every section is optional; a missing file section or key falls back to
//! its default.

use std::path::Path;

use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Listener settings.
    pub node: NodeSection,
    /// Ring sizing and initial membership.
    pub ring: RingSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[node]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NodeSection {
    /// Address the command listener binds to.
    pub listen_addr: String,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:6969".to_string(),
        }
    }
}

/// `[ring]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RingSection {
    /// Maximum number of nodes on the ring.
    pub capacity: Option<usize>,
    /// Replication factor.
    ///
    /// Recorded on the ring but not used for placement: every key has a
    /// single owner.
    pub replication_factor: Option<usize>,
    /// Node identifiers placed on the ring at startup.
    pub nodes: Vec<String>,
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or use defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Effective ring capacity (defaults to 64).
    pub fn ring_capacity(&self) -> usize {
        self.ring.capacity.unwrap_or(64)
    }

    /// Effective replication factor (defaults to 1).
    pub fn replication_factor(&self) -> usize {
        self.ring.replication_factor.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[node]
listen_addr = "127.0.0.1:7000"

[ring]
capacity = 8
replication_factor = 3
nodes = ["10.0.0.1:6969", "10.0.0.2:6969"]

[log]
level = "debug"
"#;

        let config = CliConfig::from_toml(toml).unwrap();
        assert_eq!(config.node.listen_addr, "127.0.0.1:7000");
        assert_eq!(config.ring_capacity(), 8);
        assert_eq!(config.replication_factor(), 3);
        assert_eq!(config.ring.nodes, vec!["10.0.0.1:6969", "10.0.0.2:6969"]);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config.node.listen_addr, "0.0.0.0:6969");
        assert_eq!(config.ring_capacity(), 64);
        assert_eq!(config.replication_factor(), 1);
        assert!(config.ring.nodes.is_empty());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[ring]
nodes = ["a"]
"#;
        let config = CliConfig::from_toml(toml).unwrap();
        assert_eq!(config.ring.nodes, vec!["a"]);
        // Unspecified keys get defaults.
        assert_eq!(config.ring_capacity(), 64);
        assert_eq!(config.node.listen_addr, "0.0.0.0:6969");
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(CliConfig::from_toml("[ring]\ncapacity = \"many\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skerry.toml");
        std::fs::write(
            &path,
            r#"
[node]
listen_addr = "127.0.0.1:9999"

[ring]
capacity = 2
"#,
        )
        .unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.node.listen_addr, "127.0.0.1:9999");
        assert_eq!(config.ring_capacity(), 2);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.ring_capacity(), 64);
    }
}
