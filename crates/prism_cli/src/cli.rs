use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_core::{IntegratorKind, SamplerKind, SceneDescription};

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IntegratorArg {
    Whitted,
    Debug,
}

impl From<IntegratorArg> for IntegratorKind {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Whitted => IntegratorKind::Whitted,
            IntegratorArg::Debug => IntegratorKind::Debug,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SamplerArg {
    Center,
    Random,
}

impl From<SamplerArg> for SamplerKind {
    fn from(arg: SamplerArg) -> Self {
        match arg {
            SamplerArg::Center => SamplerKind::Center,
            SamplerArg::Random => SamplerKind::Random,
        }
    }
}

/// Parse a positive number of seconds; shorter intervals are raised to 10ms.
fn parse_interval(value: &str) -> Result<Duration, String> {
    let seconds: f32 = value.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(format!("interval must be positive, got {value}"));
    }
    Duration::try_from_secs_f32(seconds.max(0.01)).map_err(|e| format!("{e}"))
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "A Whitted-style ray tracer")]
pub struct Args {
    /// JSON scene file; renders the built-in demo scene when omitted
    pub scene: Option<PathBuf>,

    /// Output image path (format follows the extension)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub spp: Option<u32>,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// Maximum specular bounces
    #[arg(long)]
    pub max_bounces: Option<u32>,

    #[arg(long, value_enum)]
    pub integrator: Option<IntegratorArg>,

    #[arg(long, value_enum)]
    pub sampler: Option<SamplerArg>,

    /// Seed for the random sampler
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds between progress reports
    #[arg(long, default_value = "1", value_parser = parse_interval)]
    pub progress_interval: Duration,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command-line overrides on top of the scene file's settings.
    pub fn apply_overrides(&self, description: &mut SceneDescription) {
        let settings = &mut description.settings;
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(spp) = self.spp {
            settings.samples_per_pixel = spp;
        }
        if let Some(workers) = self.workers {
            settings.workers = Some(workers);
        }
        if let Some(max_bounces) = self.max_bounces {
            settings.max_bounces = max_bounces;
        }
        if let Some(integrator) = self.integrator {
            settings.integrator = integrator.into();
        }
        if let Some(sampler) = self.sampler {
            settings.sampler.kind = sampler.into();
        }
        if let Some(seed) = self.seed {
            settings.sampler.seed = seed;
        }
    }
}
