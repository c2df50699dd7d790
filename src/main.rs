use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use pizza_clock::config::{self, CliOverrides};
use pizza_clock::settings::{self, Settings, Theme};
use pizza_clock::{manifest, token, viewer};

#[derive(Parser)]
#[command(name = "pizza-clock", about = "A decorative pizza clock for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Settings share token (the URL-fragment form) to apply on startup
    #[arg(long, global = true)]
    settings: Option<String>,

    /// Theme name (pizza_12p or circular)
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Time readout position (circular_bottom_right or center)
    #[arg(long, global = true)]
    clock_text_position: Option<String>,

    /// Readout font size (10-100)
    #[arg(long, global = true)]
    font_size: Option<f64>,

    /// Readout letter spacing (0-20)
    #[arg(long, global = true)]
    letter_spacing: Option<f64>,

    /// Seconds indicator line width (0-10, 0 disables)
    #[arg(long, global = true)]
    seconds_indicator_line_width: Option<f64>,

    /// Directory or URL the per-theme manifests live under
    #[arg(long, global = true)]
    manifest_base: Option<String>,

    /// Log output file path (enables logging when specified)
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Build a theme manifest JSON from an asset directory
    Manifest {
        /// Directory containing the theme's asset files
        dir: PathBuf,

        /// Path prefix applied to each entry (the served asset location)
        #[arg(long, default_value = "")]
        prefix: String,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the shareable link for the effective settings
    Link,

    /// Decode and validate a settings share token
    Resolve {
        /// The token (everything after `#` in a shared link)
        token: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_path) = &cli.log {
        let file = match std::fs::File::create(log_path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: failed to open log file {}: {e}", log_path.display());
                std::process::exit(1);
            }
        };
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    } else if cli.command.is_some() {
        env_logger::init();
    }
    // viewer mode + no --log → logger not initialized (no log output)

    // Load config file and merge CLI overrides
    let mut cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    cfg.merge_cli(CliOverrides {
        theme: cli.theme,
        clock_text_position: cli.clock_text_position,
        font_size: cli.font_size,
        letter_spacing: cli.letter_spacing,
        seconds_indicator_line_width: cli.seconds_indicator_line_width,
        manifest_base: cli.manifest_base,
    });

    let mut config = match cfg.resolve() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // A share token replaces the settings wholesale. Fail-open: a bad
    // token is reported and ignored, current settings are kept.
    if let Some(raw_token) = &cli.settings {
        match apply_token(raw_token) {
            Ok(settings) => {
                info!("applied settings token");
                config.settings = settings;
            }
            Err(e) => {
                warn!("ignoring settings token: {e:#}");
                eprintln!("Warning: ignoring settings token: {e:#}");
            }
        }
    }

    let result = match cli.command {
        Some(Command::Manifest {
            dir,
            prefix,
            output,
        }) => cmd_manifest(&dir, config.settings.theme, &prefix, output),
        Some(Command::Link) => {
            println!("{}", token::share_link(&config.link_base, &config.settings));
            Ok(())
        }
        Some(Command::Resolve { token }) => cmd_resolve(&token),
        None => viewer::run(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn apply_token(raw_token: &str) -> Result<Settings> {
    let raw = token::decode(raw_token).context("token is not decodable")?;
    let settings = settings::validate(&raw).context("token failed settings validation")?;
    Ok(settings)
}

fn cmd_manifest(dir: &Path, theme: Theme, prefix: &str, output: Option<PathBuf>) -> Result<()> {
    let definition = manifest::build(dir, theme, prefix)
        .with_context(|| format!("failed to build manifest from {}", dir.display()))?;
    let json = serde_json::to_string_pretty(&definition)?;

    match output {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "wrote {} ({} file(s), theme {})",
                path.display(),
                definition.files().len(),
                theme.as_str()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_resolve(raw_token: &str) -> Result<()> {
    let settings = apply_token(raw_token)?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
