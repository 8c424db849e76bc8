//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "cluster.max_zoom")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    #[arg(allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        (None, None) => show_all_config(&config),

        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("Available keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        },

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ));
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    for key in Config::available_keys() {
        let value = config.get(key).unwrap_or_default();
        if key == "store.api_key" {
            let shown = if value.is_empty() { "# not configured" } else { "*** # configured" };
            println!("{} = {}", key, shown);
        } else {
            println!("{} = {:?}", key, value);
        }
    }

    if !config.geocoder.locations.is_empty() {
        println!();
        println!("[geocoder.locations]");
        for (name, [lat, lng]) in &config.geocoder.locations {
            println!("{:?} = [{}, {}]", name, lat, lng);
        }
    }

    println!();
    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = {:?}", name, template);
    }
}
