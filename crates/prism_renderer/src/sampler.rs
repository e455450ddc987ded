//! Sub-pixel sample placement.

use prism_core::{SamplerDescription, SamplerKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses where inside a pixel each sample lands.
///
/// Random samples come from a generator seeded by the pixel index, so the
/// samples a pixel receives do not depend on which worker renders it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sampler {
    /// Every sample at (0.5, 0.5)
    #[default]
    Center,
    /// Uniform samples in [0, 1)²
    Random { seed: u64 },
}

impl Sampler {
    /// Sample offsets for one pixel.
    pub fn pixel_samples(&self, pixel_index: usize, count: u32) -> Vec<[f32; 2]> {
        match *self {
            Sampler::Center => vec![[0.5, 0.5]; count as usize],
            Sampler::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(pixel_seed(seed, pixel_index));
                (0..count).map(|_| [rng.gen::<f32>(), rng.gen::<f32>()]).collect()
            }
        }
    }
}

fn pixel_seed(seed: u64, pixel_index: usize) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ pixel_index as u64
}

impl From<&SamplerDescription> for Sampler {
    fn from(description: &SamplerDescription) -> Self {
        match description.kind {
            SamplerKind::Center => Sampler::Center,
            SamplerKind::Random => Sampler::Random {
                seed: description.seed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_sampler() {
        let samples = Sampler::Center.pixel_samples(7, 3);
        assert_eq!(samples, vec![[0.5, 0.5]; 3]);
    }

    #[test]
    fn test_random_sampler_is_reproducible_per_pixel() {
        let sampler = Sampler::Random { seed: 42 };
        assert_eq!(sampler.pixel_samples(10, 4), sampler.pixel_samples(10, 4));
        assert_ne!(sampler.pixel_samples(10, 4), sampler.pixel_samples(11, 4));
        for [s1, s2] in sampler.pixel_samples(3, 64) {
            assert!((0.0..1.0).contains(&s1));
            assert!((0.0..1.0).contains(&s2));
        }
    }

    #[test]
    fn test_from_description() {
        let description = SamplerDescription {
            kind: SamplerKind::Random,
            seed: 9,
        };
        assert_eq!(Sampler::from(&description), Sampler::Random { seed: 9 });
        assert_eq!(Sampler::from(&SamplerDescription::default()), Sampler::Center);
    }
}
