use clap::{Parser, Subcommand};

/// VaultMate — conversational assistant backend.
#[derive(Debug, Parser)]
#[command(name = "vaultmate", version, about)]
pub struct Cli {
    /// Path to the configuration file (overrides `VAULTMATE_CONFIG`).
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the gateway server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration.  Resolution order: the `--config` flag, then
/// `VAULTMATE_CONFIG`, then `vaultmate.toml` in the working directory.
/// A missing env/default file means defaults; a missing `--config` path is
/// an error, since the caller asked for that file explicitly.
/// Returns the parsed config and the path that was used.
pub fn load_config(override_path: Option<&str>) -> anyhow::Result<(vm_domain::config::Config, String)> {
    let config_path = match override_path {
        Some(path) => path.to_owned(),
        None => std::env::var("VAULTMATE_CONFIG").unwrap_or_else(|_| "vaultmate.toml".into()),
    };

    let exists = std::path::Path::new(&config_path).exists();
    if override_path.is_some() && !exists {
        anyhow::bail!("config file not found: {config_path}");
    }

    let config = if exists {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        vm_domain::config::Config::default()
    };

    Ok((config, config_path))
}

/// Parse and validate the config, printing any issues.
pub fn validate(config: &vm_domain::config::Config, config_path: &str) -> bool {
    let issues = config.validate();
    if issues.is_empty() {
        println!("Config OK ({config_path})");
        return true;
    }
    for issue in &issues {
        println!("error: {issue}");
    }
    println!("\n{} error(s) in {config_path}", issues.len());
    false
}

/// Dump the resolved config (with all defaults filled in) as TOML.
pub fn show(config: &vm_domain::config::Config) {
    match toml::to_string_pretty(config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Failed to serialize config: {e}");
            std::process::exit(1);
        }
    }
}
