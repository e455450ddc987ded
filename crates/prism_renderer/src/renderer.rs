//! Parallel rendering.
//!
//! The image's pixels are shuffled and split into one partition per worker.
//! Workers run on a dedicated rayon pool, each filling its own
//! [`PartialFilm`]; the partials are merged and resolved once every worker
//! has finished. A reporter thread logs progress while the workers run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use log::{debug, info};
use prism_core::SettingsDescription;
use rayon::prelude::*;

use crate::{
    partition_pixels, Color, Film, PartialFilm, Partition, PixelAccumulator, RenderError, RenderResult,
    RenderedImage, Scene,
};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples taken for every pixel
    pub samples_per_pixel: u32,
    /// Worker count; `None` uses the available parallelism
    pub workers: Option<usize>,
    /// How often the reporter logs progress
    pub progress_interval: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            workers: None,
            progress_interval: Duration::from_secs(1),
        }
    }
}

impl RenderConfig {
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1)
    }
}

impl From<&SettingsDescription> for RenderConfig {
    fn from(settings: &SettingsDescription) -> Self {
        Self {
            samples_per_pixel: settings.samples_per_pixel,
            workers: settings.workers,
            ..Self::default()
        }
    }
}

/// Per-pixel completion markers shared by the workers and the reporter.
#[derive(Debug)]
pub struct Progress {
    completed: Vec<AtomicBool>,
}

impl Progress {
    pub fn new(pixel_count: usize) -> Self {
        Self {
            completed: (0..pixel_count).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    /// Mark a pixel as finished. Each pixel is only written by its own worker.
    pub fn mark(&self, index: usize) {
        self.completed[index].store(true, Ordering::Relaxed);
    }

    pub fn completed(&self) -> usize {
        self.completed.iter().filter(|done| done.load(Ordering::Relaxed)).count()
    }

    /// Completed fraction in [0, 1]; an empty image counts as done.
    pub fn fraction(&self) -> f32 {
        if self.completed.is_empty() {
            return 1.0;
        }
        self.completed() as f32 / self.completed.len() as f32
    }
}

/// Render the scene into a resolved image.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<RenderedImage> {
    let width = scene.camera.image_width;
    let height = scene.camera.image_height;
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidSettings(format!(
            "image size must be positive, got {width}x{height}"
        )));
    }

    let workers = config.worker_count();
    let pixel_count = scene.camera.pixel_count();
    let partitions = partition_pixels(pixel_count, workers, &mut rand::thread_rng());

    info!(
        "Rendering {}x{} @ {} spp on {} workers",
        width, height, config.samples_per_pixel, workers
    );
    let start = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("prism-worker-{i}"))
        .build()?;

    let progress = Progress::new(pixel_count);
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    let partials: Vec<PartialFilm> = std::thread::scope(|s| {
        let progress = &progress;
        let interval = config.progress_interval;
        s.spawn(move || report_progress(progress, interval, stop_rx));

        let partials = pool.install(|| {
            partitions
                .par_iter()
                .map(|partition| render_partition(scene, config, partition, progress))
                .collect::<Vec<PartialFilm>>()
        });
        drop(stop_tx);
        partials
    });

    let mut film = Film::new(width, height);
    for partial in &partials {
        film.merge(partial);
    }

    info!("Render complete in {:.2?}", start.elapsed());
    Ok(film.resolve())
}

/// Render every pixel of one partition.
pub fn render_partition(scene: &Scene, config: &RenderConfig, partition: &Partition, progress: &Progress) -> PartialFilm {
    debug!("Worker {} rendering {} pixels", partition.index, partition.len());
    let mut partial = PartialFilm::with_capacity(partition.len());
    for &index in &partition.pixels {
        partial.push(accumulate_pixel(scene, index, config.samples_per_pixel));
        progress.mark(index);
    }
    partial
}

/// Mean color of one pixel, clamped to [0, 1].
pub fn render_pixel(scene: &Scene, row: u32, col: u32, samples_per_pixel: u32) -> Color {
    let index = row as usize * scene.camera.image_width as usize + col as usize;
    accumulate_pixel(scene, index, samples_per_pixel).mean()
}

fn accumulate_pixel(scene: &Scene, index: usize, samples_per_pixel: u32) -> PixelAccumulator {
    let width = scene.camera.image_width as usize;
    let row = (index / width) as u32;
    let col = (index % width) as u32;

    let mut pixel = PixelAccumulator::new(index);
    for sample in scene.sampler.pixel_samples(index, samples_per_pixel) {
        let ray = scene.camera.make_worldspace_ray(row, col, sample);
        pixel.add(scene.integrate(&ray));
    }
    pixel
}

/// Log progress every `interval` until the sender side of `stop` is dropped.
fn report_progress(progress: &Progress, interval: Duration, stop: mpsc::Receiver<()>) {
    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => info!("Progress: {:.1}%", progress.fraction() * 100.0),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
