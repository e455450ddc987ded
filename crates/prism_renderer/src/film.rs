//! Accumulation buffers.
//!
//! Workers accumulate samples for their own pixels into a [`PartialFilm`];
//! the renderer merges every partial into a single [`Film`] once the
//! workers are done. Each pixel belongs to exactly one partial, so merging
//! never combines two workers' samples for the same pixel.

use crate::Color;
use prism_math::Interval;

/// Keeps the mean finite for pixels that received no samples.
const DIVISION_EPSILON: f32 = 1e-8;

/// Running sum of the samples taken for one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelAccumulator {
    /// Row-major pixel index
    pub index: usize,
    pub sum: Color,
    pub count: u32,
}

impl PixelAccumulator {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            sum: Color::ZERO,
            count: 0,
        }
    }

    pub fn add(&mut self, sample: Color) {
        self.sum += sample;
        self.count += 1;
    }

    /// Clamped mean of the samples so far.
    pub fn mean(&self) -> Color {
        resolve(self.sum, [self.count; 3])
    }
}

/// One worker's results.
#[derive(Debug, Clone, Default)]
pub struct PartialFilm {
    pub pixels: Vec<PixelAccumulator>,
}

impl PartialFilm {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pixels: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, pixel: PixelAccumulator) {
        self.pixels.push(pixel);
    }
}

/// Per-channel sample sums and counts, row-major.
#[derive(Debug, Clone, Default)]
struct Channel {
    sum: Vec<f32>,
    count: Vec<u32>,
}

impl Channel {
    fn new(len: usize) -> Self {
        Self {
            sum: vec![0.0; len],
            count: vec![0; len],
        }
    }

    fn add(&mut self, index: usize, value: f32, count: u32) {
        self.sum[index] += value;
        self.count[index] += count;
    }
}

/// Full-image accumulation buffers, one per color channel.
#[derive(Debug, Clone)]
pub struct Film {
    width: u32,
    height: u32,
    red: Channel,
    green: Channel,
    blue: Channel,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            red: Channel::new(len),
            green: Channel::new(len),
            blue: Channel::new(len),
        }
    }

    /// Fold a worker's results into the film.
    pub fn merge(&mut self, partial: &PartialFilm) {
        for pixel in &partial.pixels {
            self.red.add(pixel.index, pixel.sum.x, pixel.count);
            self.green.add(pixel.index, pixel.sum.y, pixel.count);
            self.blue.add(pixel.index, pixel.sum.z, pixel.count);
        }
    }

    /// Per-pixel means, clamped to [0, 1].
    pub fn resolve(&self) -> RenderedImage {
        let channel = |c: &Channel| -> Vec<f32> {
            c.sum
                .iter()
                .zip(&c.count)
                .map(|(&sum, &count)| Interval::UNIT.clamp(sum / (count as f32 + DIVISION_EPSILON)))
                .collect()
        };
        RenderedImage {
            width: self.width,
            height: self.height,
            red: channel(&self.red),
            green: channel(&self.green),
            blue: channel(&self.blue),
        }
    }
}

fn resolve(sum: Color, count: [u32; 3]) -> Color {
    let mean = Color::new(
        sum.x / (count[0] as f32 + DIVISION_EPSILON),
        sum.y / (count[1] as f32 + DIVISION_EPSILON),
        sum.z / (count[2] as f32 + DIVISION_EPSILON),
    );
    mean.clamp(Color::ZERO, Color::ONE)
}

/// Final image: three row-major channels with values in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub red: Vec<f32>,
    pub green: Vec<f32>,
    pub blue: Vec<f32>,
}

impl RenderedImage {
    /// Color at (`row`, `col`); row 0 is the top of the image.
    pub fn get(&self, row: u32, col: u32) -> Color {
        let index = row as usize * self.width as usize + col as usize;
        Color::new(self.red[index], self.green[index], self.blue[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(index: usize, samples: &[Color]) -> PartialFilm {
        let mut pixel = PixelAccumulator::new(index);
        samples.iter().for_each(|&sample| pixel.add(sample));
        let mut partial = PartialFilm::with_capacity(1);
        partial.push(pixel);
        partial
    }

    #[test]
    fn test_mean_of_samples() {
        let mut film = Film::new(2, 1);
        film.merge(&partial(1, &[Color::new(0.2, 0.4, 0.6), Color::new(0.4, 0.6, 0.8)]));
        let image = film.resolve();
        assert!((image.get(0, 1) - Color::new(0.3, 0.5, 0.7)).length() < 1e-5);
    }

    #[test]
    fn test_unsampled_pixel_is_black() {
        let film = Film::new(3, 2);
        let image = film.resolve();
        assert_eq!(image.red.len(), 6);
        assert!(image.red.iter().chain(&image.green).chain(&image.blue).all(|&v| v == 0.0));
    }

    #[test]
    fn test_values_are_clamped() {
        let mut film = Film::new(1, 1);
        film.merge(&partial(0, &[Color::new(4.0, -1.0, 0.5)]));
        let color = film.resolve().get(0, 0);
        assert_eq!(color.x, 1.0);
        assert_eq!(color.y, 0.0);
        assert!((color.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_merge_partials() {
        let mut first = PartialFilm::default();
        let mut a = PixelAccumulator::new(0);
        a.add(Color::splat(0.25));
        a.add(Color::splat(0.75));
        first.push(a);

        let mut second = PartialFilm::with_capacity(1);
        let mut b = PixelAccumulator::new(3);
        b.add(Color::new(1.0, 0.0, 0.0));
        second.push(b);

        let mut film = Film::new(2, 2);
        film.merge(&first);
        film.merge(&second);
        let image = film.resolve();

        assert!((image.get(0, 0) - Color::splat(0.5)).length() < 1e-5);
        assert!((image.get(1, 1) - Color::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(image.get(0, 1), Color::ZERO);
        assert!((a.mean() - Color::splat(0.5)).length() < 1e-5);
    }
}
