use anyhow::Result;
use clap::{Parser, Subcommand};
use rte_config::config::{ConfigLoader, ConfigType};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Inspect resolved rich text editor configurations
///
/// Named configs come from the built-in presets and the first config file
/// found (.rte-config.toml, $RTE_CONFIG, ~/.config/rte-config/config.toml).
#[derive(Parser, Debug)]
#[command(name = "rte-config")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to read instead of the default locations
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value at a dotted path, e.g. plugins.toolbar.textActions
    Get {
        /// Path to resolve ("" for the whole config)
        path: String,

        /// Named config to read
        #[arg(short, long)]
        name: Option<String>,

        /// Which tree to read: default, user or merged
        #[arg(short = 't', long = "type", default_value = "default")]
        config_type: String,
    },

    /// Print whether a plugin is registered
    Registered {
        plugin: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short = 't', long = "type", default_value = "default")]
        config_type: String,
    },

    /// List named configs
    List,

    /// Print the built-in default config
    Defaults,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file)?;

    info!("Starting rte-config v{}", env!("CARGO_PKG_VERSION"));

    let loader = match args.config {
        Some(path) => ConfigLoader::from_paths(vec![path])?,
        None => ConfigLoader::new()?,
    };
    if let Some(path) = loader.source_path() {
        info!("Using config file: {}", path.display());
    }
    let store = loader.into_store();

    match args.command {
        Command::Get {
            path,
            name,
            config_type,
        } => {
            let config_type: ConfigType = config_type.parse()?;
            match store.get_config_for_path(&path, name.as_deref(), config_type) {
                Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                None => println!("undefined"),
            }
        }
        Command::Registered {
            plugin,
            name,
            config_type,
        } => {
            let config_type: ConfigType = config_type.parse()?;
            println!(
                "{}",
                store.plugin_is_registered(&plugin, name.as_deref(), config_type)
            );
        }
        Command::List => {
            for name in store.user_config_names() {
                println!("{}", name);
            }
        }
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&*store.default_config())?);
        }
    }

    Ok(())
}
