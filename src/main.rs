mod app;
mod bench;
mod config;
mod console;
mod fire;
mod host;
mod palette;
mod plotter;
mod settings;
mod terminal;

use clap::{Parser, Subcommand};
use config::{FireConfig, GridSize, HeadlessConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use palette::Scheme;
use settings::Settings;
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doomfire")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "doomfire: the doom fire effect on a two-bank indexed-color console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the fire interactively in the terminal
    Run {
        /// Grid width in pixels (default: fit the terminal)
        #[arg(short = 'W', long)]
        width: Option<u16>,

        /// Grid height in pixels, two per text row (default: fit the terminal)
        #[arg(short = 'H', long)]
        height: Option<u16>,

        /// Animation speed (seconds per frame)
        #[arg(short, long)]
        time: Option<f32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Color scheme: fire, ice, toxic, mono
        #[arg(short, long)]
        palette: Option<String>,

        /// Track frame timing; press z for a report
        #[arg(short, long)]
        bench: bool,
    },

    /// Burn a number of frames off-screen and print the result
    Print {
        #[arg(short = 'W', long, default_value = "80")]
        width: u16,

        #[arg(short = 'H', long, default_value = "48")]
        height: u16,

        /// Frames to simulate before printing
        #[arg(short, long, default_value = "60")]
        frames: u64,

        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(short, long)]
        palette: Option<String>,
    },

    /// Time off-screen frames and print average frame time and FPS
    Bench {
        #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
        width: u16,

        #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
        height: u16,

        #[arg(short, long, default_value = "600")]
        frames: u64,

        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DOOMFIRE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_scheme(name: Option<&str>) -> Scheme {
    match name {
        None => Scheme::Fire,
        Some(name) => Scheme::from_name(name).unwrap_or_else(|| {
            tracing::warn!("unknown palette {name:?}, using fire");
            eprintln!("Unknown palette: {}. Using fire.", name);
            eprintln!("Available: fire, ice, toxic, mono");
            Scheme::Fire
        }),
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Run {
            width,
            height,
            time,
            seed,
            palette,
            bench,
        } => {
            let file = Settings::load().fire;
            let defaults = FireConfig::default();
            let size = match (width.or(file.width), height.or(file.height)) {
                (Some(w), Some(h)) => GridSize::Fixed(w.max(1), h.max(2)),
                (Some(w), None) => GridSize::Fixed(w.max(1), DEFAULT_HEIGHT),
                (None, Some(h)) => GridSize::Fixed(DEFAULT_WIDTH, h.max(2)),
                (None, None) => GridSize::Fit,
            };
            let config = FireConfig {
                size,
                time_step: time.or(file.time).unwrap_or(defaults.time_step).max(0.0),
                seed: seed.or(file.seed),
                scheme: parse_scheme(palette.as_deref().or(file.palette.as_deref())),
                bench,
            };
            app::run(config)?;
        }
        Commands::Print {
            width,
            height,
            frames,
            seed,
            palette,
        } => {
            let config = HeadlessConfig {
                width: width.max(1),
                height: height.max(2),
                frames,
                seed,
                scheme: parse_scheme(palette.as_deref()),
            };
            app::print(config, &mut io::stdout().lock())?;
        }
        Commands::Bench {
            width,
            height,
            frames,
            seed,
        } => {
            let config = HeadlessConfig {
                width: width.max(1),
                height: height.max(2),
                frames,
                seed,
                scheme: Scheme::Fire,
            };
            app::bench(config, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}
