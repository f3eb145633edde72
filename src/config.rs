//! Configuration management for the Nexus CLI
//!
//! Named servers live in a shared YAML file so that commands can refer to a
//! server by name instead of repeating its URL and credentials:
//!
//! - `$NEXUS_CLI_SERVERS_PATH`, when set
//! - otherwise `~/.config/nexus-cli/servers.yaml` (platform config dir)
//!
//! ## Environment Variable Expansion
//!
//! The servers file supports environment variable expansion with the following syntax:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use anyhow::{anyhow, Context};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::{env, fs, path::PathBuf};

pub const SERVERS_PATH_ENV: &str = "NEXUS_CLI_SERVERS_PATH";

/// Env var read for the password of an ad hoc `--url ... --user ...` server
pub const DEFAULT_PASSWORD_ENV: &str = "NEXUS_PASSWORD";

/// Servers configuration loaded from `servers.yaml`
///
/// # Example
///
/// ```yaml
/// defaultServer: corp
/// servers:
///   - name: corp
///     url: ${NEXUS_URL:-https://nexus.example.com/nexus}
///     auth:
///       type: basic
///       username: deployer
///       passwordEnv: NEXUS_PASSWORD
///   - name: oss
///     url: https://oss.sonatype.org
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServersConfig {
    /// Server used when neither `--url` nor `--server` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server: Option<String>,
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
}

/// Connection details for one Nexus server
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Unique name used with `--server`
    pub name: String,
    /// Base URL of the server, e.g. `https://host/nexus`
    pub url: String,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Authentication for a server
///
/// Passwords are never written to the file, only the name of the
/// environment variable holding them.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(tag = "type")]
pub enum AuthConfig {
    /// Anonymous access
    #[default]
    None,
    /// HTTP Basic authentication
    #[serde(rename_all = "camelCase")]
    Basic {
        username: String,
        /// Environment variable containing the password
        password_env: String,
    },
}

impl ServersConfig {
    pub fn find(&self, name: &str) -> Option<&ServerConfig> {
        self.servers.iter().find(|s| s.name == name)
    }

    /// Picks the server a command talks to
    ///
    /// An explicit `url` wins and builds an unnamed server (with basic auth
    /// when `username` is given). Otherwise the named `server` is used,
    /// falling back to `defaultServer`.
    pub fn resolve(
        &self,
        url: Option<&str>,
        server: Option<&str>,
        username: Option<&str>,
    ) -> anyhow::Result<ServerConfig> {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            let auth = match username {
                Some(user) => AuthConfig::Basic {
                    username: user.to_string(),
                    password_env: DEFAULT_PASSWORD_ENV.to_string(),
                },
                None => AuthConfig::None,
            };
            return Ok(ServerConfig {
                name: url.to_string(),
                url: url.to_string(),
                auth,
            });
        }

        let name = server
            .or(self.default_server.as_deref())
            .ok_or_else(|| anyhow!("No URL given: use --url or --server"))?;
        let mut found = self.find(name).cloned().ok_or_else(|| {
            let known: Vec<&str> = self.servers.iter().map(|s| s.name.as_str()).collect();
            anyhow!(
                "Server '{}' not found. Known servers: {}",
                name,
                if known.is_empty() {
                    "(none)".to_string()
                } else {
                    known.join(", ")
                }
            )
        })?;
        if let Some(user) = username {
            found.auth = match found.auth {
                AuthConfig::Basic { password_env, .. } => AuthConfig::Basic {
                    username: user.to_string(),
                    password_env,
                },
                AuthConfig::None => AuthConfig::Basic {
                    username: user.to_string(),
                    password_env: DEFAULT_PASSWORD_ENV.to_string(),
                },
            };
        }
        Ok(found)
    }
}

pub fn servers_config_path() -> PathBuf {
    env::var(SERVERS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("nexus-cli/servers.yaml");
            p
        })
}

pub fn load_servers_config() -> anyhow::Result<ServersConfig> {
    load_servers_config_from(&servers_config_path())
}

pub fn load_servers_config_from(path: &Path) -> anyhow::Result<ServersConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no servers file, using empty config");
        return Ok(ServersConfig::default());
    }
    let data = preprocess_config(path)
        .with_context(|| format!("reading servers file {}", path.display()))?;
    let cfg: ServersConfig = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing servers file {}", path.display()))?;
    Ok(cfg)
}

pub fn save_servers_config(cfg: &ServersConfig) -> anyhow::Result<PathBuf> {
    let path = servers_config_path();
    save_servers_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_servers_config_to(cfg: &ServersConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let data = serde_yaml::to_string(cfg)?;
    fs::write(path, data).with_context(|| format!("writing servers file {}", path.display()))?;
    Ok(())
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}")
            .expect("placeholder pattern is valid")
    })
}

pub fn expand_env_placeholders(input: &str) -> String {
    placeholder_regex()
        .replace_all(input, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let op = caps.get(2).map_or("", |m| m.as_str());
            let val = caps.get(3).map_or("", |m| m.as_str());
            let var = env::var(var_name).ok();

            match (var.as_deref(), op) {
                (Some(v), "") => v.to_string(),                      // ${VAR}
                (Some(v), ":-") if !v.is_empty() => v.to_string(),   // ${VAR:-default}
                (_, ":-") => val.to_string(),
                (Some(v), "-") => v.to_string(),                     // ${VAR-default}
                (None, "-") => val.to_string(),
                (Some(v), ":+") if !v.is_empty() => val.to_string(), // ${VAR:+alt}
                (Some(_), "+") => val.to_string(),                   // ${VAR+alt}
                _ => String::new(),
            }
        })
        .to_string()
}

pub fn preprocess_config(path: &Path) -> anyhow::Result<String> {
    let raw_data = fs::read_to_string(path)?;
    Ok(expand_env_placeholders(&raw_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ServersConfig {
        ServersConfig {
            default_server: Some("corp".into()),
            servers: vec![
                ServerConfig {
                    name: "corp".into(),
                    url: "https://nexus.corp".into(),
                    auth: AuthConfig::Basic {
                        username: "ci".into(),
                        password_env: "CORP_PW".into(),
                    },
                },
                ServerConfig {
                    name: "oss".into(),
                    url: "https://oss.sonatype.org".into(),
                    auth: AuthConfig::None,
                },
            ],
        }
    }

    #[test]
    fn test_expand_placeholders() {
        env::set_var("NEXUS_CLI_TEST_SET", "value");
        env::set_var("NEXUS_CLI_TEST_EMPTY", "");
        env::remove_var("NEXUS_CLI_TEST_UNSET");

        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_SET}"), "value");
        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_UNSET}"), "");
        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_UNSET:-d}"), "d");
        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_EMPTY:-d}"), "d");
        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_EMPTY-d}"), "");
        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_UNSET-d}"), "d");
        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_SET:+alt}"), "alt");
        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_EMPTY:+alt}"), "");
        assert_eq!(expand_env_placeholders("${NEXUS_CLI_TEST_EMPTY+alt}"), "alt");
        assert_eq!(
            expand_env_placeholders("url: ${NEXUS_CLI_TEST_SET}/nexus"),
            "url: value/nexus"
        );
    }

    #[test]
    fn test_resolve_explicit_url_wins() {
        let s = cfg().resolve(Some("http://localhost:8081"), Some("oss"), None).unwrap();
        assert_eq!(s.url, "http://localhost:8081");
        assert_eq!(s.auth, AuthConfig::None);
    }

    #[test]
    fn test_resolve_url_with_user() {
        let s = cfg().resolve(Some("http://localhost:8081"), None, Some("admin")).unwrap();
        assert_eq!(
            s.auth,
            AuthConfig::Basic {
                username: "admin".into(),
                password_env: DEFAULT_PASSWORD_ENV.into()
            }
        );
    }

    #[test]
    fn test_resolve_named_and_default() {
        let c = cfg();
        assert_eq!(c.resolve(None, Some("oss"), None).unwrap().url, "https://oss.sonatype.org");
        assert_eq!(c.resolve(None, None, None).unwrap().url, "https://nexus.corp");
    }

    #[test]
    fn test_resolve_user_overrides_username_only() {
        let s = cfg().resolve(None, Some("corp"), Some("someone")).unwrap();
        assert_eq!(
            s.auth,
            AuthConfig::Basic {
                username: "someone".into(),
                password_env: "CORP_PW".into()
            }
        );
    }

    #[test]
    fn test_resolve_errors() {
        let err = ServersConfig::default().resolve(None, None, None).unwrap_err();
        assert!(err.to_string().contains("No URL given"));

        let err = cfg().resolve(None, Some("missing"), None).unwrap_err();
        assert!(err.to_string().contains("Server 'missing' not found"));
        assert!(err.to_string().contains("corp, oss"));
    }

    #[test]
    fn test_auth_yaml_shape() {
        let yaml = r#"
servers:
  - name: corp
    url: https://nexus.corp
    auth:
      type: basic
      username: ci
      passwordEnv: CORP_PW
  - name: anon
    url: https://nexus.anon
"#;
        let c: ServersConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(c.default_server, None);
        assert_eq!(c.servers[0].auth, cfg().servers[0].auth);
        assert_eq!(c.servers[1].auth, AuthConfig::None);
    }
}
