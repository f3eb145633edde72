use crate::config::{load_servers_config, save_servers_config, AuthConfig, ServerConfig};
use anyhow::{anyhow, Result};
use clap::Subcommand;
use dialoguer::{Input, Select};

#[derive(Subcommand, Debug)]
pub enum ServersCommands {
    /// List all configured servers
    List,
    /// Add a new server (interactive prompts)
    Add,
    /// Remove a server by name
    Remove { name: String },
    /// Make a server the default one
    Default { name: String },
}

fn prompt(msg: &str) -> Result<String> {
    let val: String = Input::new().with_prompt(msg).interact_text()?;
    let val = val.trim().to_string();
    if val.is_empty() {
        Err(anyhow!("{} cannot be empty", msg))
    } else {
        Ok(val)
    }
}

pub fn run(cmd: ServersCommands) -> Result<()> {
    let mut cfg = load_servers_config()?;

    match cmd {
        ServersCommands::List => {
            if cfg.servers.is_empty() {
                println!("(no servers defined)");
            } else {
                for s in &cfg.servers {
                    let marker = if cfg.default_server.as_deref() == Some(s.name.as_str()) {
                        " (default)"
                    } else {
                        ""
                    };
                    println!(" - {} → {}{}", s.name, s.url, marker);
                    if let AuthConfig::Basic {
                        username,
                        password_env,
                    } = &s.auth
                    {
                        println!("     basic auth: {username} (password from ${password_env})");
                    }
                }
            }
        }
        ServersCommands::Add => {
            let name = prompt("Server name")?;
            if cfg.find(&name).is_some() {
                return Err(anyhow!("server '{}' already exists", name));
            }
            let url = prompt("Server URL")?;

            let auth_options = ["none", "basic"];
            let selection = Select::new()
                .with_prompt("Auth type")
                .items(&auth_options[..])
                .default(0)
                .interact()?;
            let auth = match auth_options[selection] {
                "basic" => AuthConfig::Basic {
                    username: prompt("Username")?,
                    password_env: prompt("Password env var")?,
                },
                _ => AuthConfig::None,
            };

            cfg.servers.push(ServerConfig {
                name: name.clone(),
                url,
                auth,
            });
            if cfg.default_server.is_none() {
                cfg.default_server = Some(name.clone());
            }
            let path = save_servers_config(&cfg)?;
            println!("Saved servers to {}", path.display());
            println!("✅ Added server '{name}' successfully");
        }
        ServersCommands::Remove { name } => {
            let before = cfg.servers.len();
            cfg.servers.retain(|s| s.name != name);
            if cfg.servers.len() == before {
                println!("no such server '{name}'");
            } else {
                if cfg.default_server.as_deref() == Some(name.as_str()) {
                    cfg.default_server = None;
                }
                save_servers_config(&cfg)?;
                println!("removed '{name}'");
            }
        }
        ServersCommands::Default { name } => {
            if cfg.find(&name).is_none() {
                return Err(anyhow!("no such server '{}'", name));
            }
            cfg.default_server = Some(name.clone());
            save_servers_config(&cfg)?;
            println!("default server is now '{name}'");
        }
    }

    Ok(())
}
