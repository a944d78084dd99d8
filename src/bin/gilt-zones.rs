use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gilt_zones::app::{App, AppConfig};
use gilt_zones::config::LayoutConfig;
use gilt_zones::i18n::Catalog;
use gilt_zones::slide::ZoneCommand;
use gilt_zones::testing::compositor_to_string;

#[derive(Parser, Debug)]
#[command(name = "gilt-zones", version, about = "Render zone layouts in the terminal")]
struct Cli {
    /// Write logs to this file (`RUST_LOG` filters them).
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a layout interactively.
    Run(RunArgs),
    /// Print one rendered frame as plain text.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Layout document (JSON).
    #[arg(long)]
    layout: PathBuf,

    /// Translation catalog (JSON, nested keys).
    #[arg(long)]
    locale: Option<PathBuf>,

    /// Slide transition in milliseconds.
    #[arg(long, default_value_t = 500)]
    transition_ms: u64,

    #[arg(long, default_value_t = 60)]
    fps: u32,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Layout document (JSON).
    #[arg(long)]
    layout: PathBuf,

    #[arg(long, default_value_t = 80)]
    width: u16,

    #[arg(long, default_value_t = 24)]
    height: u16,

    /// Close this zone before rendering. Repeatable.
    #[arg(long = "close", value_name = "ZONE")]
    close: Vec<String>,

    /// Translation catalog (JSON, nested keys).
    #[arg(long)]
    locale: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.cmd, Command::Run(_));
    setup_tracing(cli.log_file.as_deref(), interactive)?;

    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

/// Logs go to `log_file` when given. Otherwise to stderr, except for the
/// interactive mode which owns the terminal and stays silent.
fn setup_tracing(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gilt_zones=info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("create log file '{}'", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn load_layout(path: &Path) -> anyhow::Result<LayoutConfig> {
    LayoutConfig::from_path(path).with_context(|| format!("load layout '{}'", path.display()))
}

fn with_locale(app: App, locale: Option<&Path>) -> anyhow::Result<App> {
    let Some(path) = locale else {
        return Ok(app);
    };
    let catalog =
        Catalog::from_path(path).with_context(|| format!("load locale '{}'", path.display()))?;
    Ok(app.with_translator(catalog))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let layout = load_layout(&args.layout)?;
    let title = format!("gilt-zones: {}", args.layout.display());
    let config = AppConfig::new()
        .with_title(title)
        .with_fps(args.fps)
        .with_transition(Duration::from_millis(args.transition_ms));

    let app = App::new(layout, config).context("open terminal")?;
    let app = with_locale(app, args.locale.as_deref())?;
    gilt_zones::runtime::run(app).context("run layout")?;
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let layout = load_layout(&args.layout)?;
    let config = AppConfig::new();
    let settle = config.transition * 2;
    let app = App::new_headless(layout, config, args.width, args.height);
    let mut app = with_locale(app, args.locale.as_deref())?;

    let start = Instant::now();
    for zone in args.close {
        app.commands().push(ZoneCommand::Close(zone));
    }
    app.update(start);
    app.render(start);

    // Let every close finish and every track settle.
    let end = start + settle;
    app.update(end);
    app.render(end);

    println!("{}", compositor_to_string(app.compositor()));
    Ok(())
}
