//! `artfeed` command-line front end.
//!
//! A thin presentation layer over [`Gallery`]: each subcommand issues the
//! same actions an interactive UI would, waits for the runtime to settle,
//! and prints the resulting view model.
//!
//! ```text
//! artfeed feed [--query cat]
//! artfeed create --name Alice --prompt "a cat" [--save out.png]
//! artfeed create --name Alice --surprise
//! artfeed download --id 65a1 [--out ./images]
//! artfeed surprise
//! ```
//!
//! Configuration is read from `--config <file>` (TOML), then `--set key=value`
//! pairs, then `ARTFEED_*` environment variables.

#![allow(clippy::multiple_crate_versions)]

use artfeed::domain::prompt::surprise_prompt;
use artfeed::observability::init_tracing;
use artfeed::ui::{render_create, render_feed};
use artfeed::{ArtfeedError, Config, Gallery, Phase, Result, Signal};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "artfeed", version, about = "Browse and share AI-generated images")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override a configuration key (repeatable), e.g. `--set debounce_ms=250`.
    #[arg(long = "set", value_name = "KEY=VALUE", global = true, value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    /// Render with the dark palette regardless of configuration.
    #[arg(long, global = true)]
    dark: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the community feed.
    Feed {
        /// Filter by author or prompt, case-insensitively.
        #[arg(long)]
        query: Option<String>,
    },

    /// Generate an image and share it.
    Create {
        /// Author name shown on the post.
        #[arg(long)]
        name: String,

        /// Prompt for the image service.
        #[arg(long, required_unless_present = "surprise")]
        prompt: Option<String>,

        /// Use a random example prompt.
        #[arg(long, conflicts_with = "prompt")]
        surprise: bool,

        /// Also write the generated image to this file or directory.
        #[arg(long)]
        save: Option<PathBuf>,

        /// Generate and save only; do not share.
        #[arg(long)]
        no_share: bool,
    },

    /// Download the image of a feed post.
    Download {
        /// Id of the post.
        #[arg(long)]
        id: String,

        /// File or directory to write to.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Print a random example prompt.
    Surprise {
        /// Prompt to avoid repeating.
        #[arg(long, default_value = "")]
        current: String,
    },
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let overrides: BTreeMap<String, String> = cli.overrides.iter().cloned().collect();
    let mut config = base.merge_map(&overrides).with_env();
    if cli.dark {
        config.theme = Some("dark".to_string());
    }
    Ok(config)
}

async fn show_feed(gallery: &mut Gallery, query: Option<&str>) -> Result<()> {
    if let Err(e) = gallery.load().await {
        tracing::warn!(error = %e, "feed load failed");
    }

    if let Some(query) = query {
        gallery.set_query(query)?;
        gallery.settle().await?;
    }

    let state = gallery.state();
    print!("{}", render_feed(&state.compute_feed_viewmodel(), state.theme));
    Ok(())
}

async fn download_post(gallery: &mut Gallery, id: &str, out: &Path) -> Result<()> {
    gallery.load().await?;
    let path = gallery.download_post(id, out).await?;
    println!("Saved {}", path.display());
    Ok(())
}

async fn create_post(
    gallery: &mut Gallery,
    name: &str,
    prompt: &str,
    save: Option<PathBuf>,
    share: bool,
) -> Result<()> {
    let mut signals = gallery.subscribe();

    println!("Prompt: {prompt}");
    gallery.request_generation(prompt)?;
    gallery.settle().await?;

    let state = gallery.state();
    print!("{}", render_create(&state.compute_create_viewmodel(), state.theme));
    if state.generation.phase == Phase::Failed {
        let reason = state.generation.error_reason.clone().unwrap_or_default();
        return Err(ArtfeedError::Generation(reason));
    }

    if let Some(target) = save {
        let path = gallery.save_image(&target)?;
        println!("Saved {}", path.display());
    }

    if !share {
        return Ok(());
    }

    gallery.request_submission(name)?;
    gallery.settle().await?;

    while let Ok(signal) = signals.try_recv() {
        match signal {
            Signal::Notify(message) => println!("{message}"),
            Signal::CreationComplete(post) => {
                tracing::info!(author = %post.name, "post shared");
            }
        }
    }

    let state = gallery.state();
    if state.submission.phase == Phase::Failed {
        let reason = state.submission.error_reason.clone().unwrap_or_default();
        return Err(ArtfeedError::Network(reason));
    }
    Ok(())
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    if let Command::Surprise { current } = &cli.command {
        println!("{}", surprise_prompt(current));
        return Ok(());
    }

    let mut gallery = Gallery::from_config(&config)?;

    let result = match cli.command {
        Command::Feed { query } => show_feed(&mut gallery, query.as_deref()).await,
        Command::Create {
            name,
            prompt,
            surprise,
            save,
            no_share,
        } => {
            let prompt = match prompt {
                Some(prompt) if !surprise => prompt,
                _ => surprise_prompt("").to_string(),
            };
            create_post(&mut gallery, &name, &prompt, save, !no_share).await
        }
        Command::Download { id, out } => download_post(&mut gallery, &id, &out).await,
        Command::Surprise { .. } => Ok(()),
    };

    gallery.dispose();
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("artfeed: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("artfeed: {e}");
            ExitCode::FAILURE
        }
    }
}
