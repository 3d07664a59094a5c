use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use whitted_renderer::RenderConfig;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "whitted")]
#[command(about = "A Whitted-style CPU ray tracer")]
#[command(version)]
pub struct Args {
    /// JSON scene description
    #[arg(long, short = 'i')]
    pub scene: PathBuf,

    /// Output image path; the format follows the extension
    #[arg(long, short, default_value = "output.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Maximum number of surface interactions per primary ray
    #[arg(long, default_value_t = 5)]
    pub max_depth: u32,

    /// Jittered samples per pixel
    #[arg(long, short, default_value_t = 100)]
    pub samples: u32,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings described by the arguments.
    pub fn render_config(&self) -> RenderConfig {
        let config = RenderConfig::default()
            .with_resolution(self.width, self.height)
            .with_quality(self.samples, self.max_depth)
            .with_progress(!self.no_progress);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
