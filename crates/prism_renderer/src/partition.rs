//! Splitting the image's pixels among workers.
//!
//! Pixels are shuffled before splitting so every worker gets a similar mix
//! of cheap and expensive regions of the image.

use rand::seq::SliceRandom;
use rand::Rng;

/// The pixels one worker renders, as row-major indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Index of this partition (and of the worker that renders it)
    pub index: usize,
    pub pixels: Vec<usize>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Shuffle `0..pixel_count` and split it into `workers` near-equal groups.
///
/// The first `pixel_count % workers` groups get one extra pixel. Every
/// pixel appears in exactly one group.
pub fn partition_pixels<R: Rng + ?Sized>(pixel_count: usize, workers: usize, rng: &mut R) -> Vec<Partition> {
    let workers = workers.max(1);
    let mut pixels: Vec<usize> = (0..pixel_count).collect();
    pixels.shuffle(rng);

    let base = pixel_count / workers;
    let extra = pixel_count % workers;

    let mut remaining = pixels.as_slice();
    (0..workers)
        .map(|index| {
            let size = base + usize::from(index < extra);
            let (group, rest) = remaining.split_at(size);
            remaining = rest;
            Partition {
                index,
                pixels: group.to_vec(),
            }
        })
        .collect()
}
