use crate::arr_helpers::{concat_rows, gather_rows};
use crate::error::Error;
use bincode::{deserialize_from, serialize_into};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Binomial, Distribution, Uniform};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::to_writer;
use std::ops::Range;
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

pub const NUM_GENOTYPE_STATES: usize = 3;

pub struct GenotypesBuilder {
    raw: Option<Vec<u8>>,
    num_samples: Option<usize>,
    num_markers: Option<usize>,
    rng: ChaCha20Rng,
}

impl Default for GenotypesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GenotypesBuilder {
    pub fn new() -> Self {
        Self {
            raw: None,
            num_samples: None,
            num_markers: None,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self
    }

    /// Raw genotype state codes in row major [num_samples, num_markers] order.
    pub fn with_codes(mut self, codes: &[u8], num_samples: usize, num_markers: usize) -> Self {
        assert_eq!(
            codes.len(),
            num_samples * num_markers,
            "number of genotype codes does not match the given dimensions"
        );
        self.raw = Some(codes.to_vec());
        self.num_samples = Some(num_samples);
        self.num_markers = Some(num_markers);
        self
    }

    pub fn with_random_x(
        mut self,
        num_markers: usize,
        num_samples: usize,
        mafs: Option<Vec<f32>>,
    ) -> Self {
        let mut raw = vec![0u8; num_samples * num_markers];
        for marker_ix in 0..num_markers {
            let maf = if let Some(v) = &mafs {
                assert!(v[marker_ix] != 0.0, "maf of 0 is not allowed in simulation");
                v[marker_ix]
            } else {
                Uniform::from(0.01..0.5).sample(&mut self.rng)
            };
            let binom = Binomial::new(2, maf as f64).unwrap();
            (0..num_samples).for_each(|i| {
                raw[i * num_markers + marker_ix] = binom.sample(&mut self.rng) as u8;
            });
        }
        self.raw = Some(raw);
        self.num_samples = Some(num_samples);
        self.num_markers = Some(num_markers);
        self
    }

    pub fn build(self) -> Result<Genotypes, Error> {
        if self.raw.is_none() {
            return Err(Error::MissingX);
        }
        let raw = self.raw.unwrap();
        let mut x = vec![0f32; raw.len() * NUM_GENOTYPE_STATES];
        x.par_chunks_exact_mut(NUM_GENOTYPE_STATES)
            .zip(raw.par_iter())
            .for_each(|(states, &code)| states[code as usize] = 1.0);
        Ok(Genotypes {
            x,
            num_samples: self.num_samples.unwrap(),
            num_markers: self.num_markers.unwrap(),
        })
    }
}

/// One-hot encoded genotype data in row major
/// [num_samples, num_markers, 3] order.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct Genotypes {
    x: Vec<f32>,
    num_samples: usize,
    num_markers: usize,
}

impl Genotypes {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let mut r = BufReader::new(File::open(path)?);
        Ok(deserialize_from(&mut r)?)
    }

    pub fn to_file(&self, path: &Path) {
        let mut f = BufWriter::new(File::create(path).unwrap());
        serialize_into(&mut f, self).unwrap();
    }

    pub fn to_json(&self, path: &Path) {
        to_writer(File::create(path).unwrap(), self).unwrap();
    }

    pub fn x(&self) -> &[f32] {
        &self.x
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_markers(&self) -> usize {
        self.num_markers
    }

    pub fn dims(&self) -> [usize; 3] {
        [self.num_samples, self.num_markers, NUM_GENOTYPE_STATES]
    }

    fn row_len(&self) -> usize {
        self.num_markers * NUM_GENOTYPE_STATES
    }

    /// Frequency of each genotype state per locus.
    pub fn state_frequencies(&self) -> Vec<[f32; NUM_GENOTYPE_STATES]> {
        let mut freqs = vec![[0f32; NUM_GENOTYPE_STATES]; self.num_markers];
        for sample_ix in 0..self.num_samples {
            for marker_ix in 0..self.num_markers {
                let offset = (sample_ix * self.num_markers + marker_ix) * NUM_GENOTYPE_STATES;
                for state_ix in 0..NUM_GENOTYPE_STATES {
                    freqs[marker_ix][state_ix] += self.x[offset + state_ix];
                }
            }
        }
        for locus in freqs.iter_mut() {
            for count in locus.iter_mut() {
                *count /= self.num_samples as f32;
            }
        }
        freqs
    }

    pub(crate) fn gather_rows(&self, indices: &[usize]) -> Self {
        Self {
            x: gather_rows(&self.x, self.row_len(), indices),
            num_samples: indices.len(),
            num_markers: self.num_markers,
        }
    }

    pub(crate) fn slice_rows(&self, tail: Range<usize>, head: Range<usize>) -> Self {
        Self {
            num_samples: tail.len() + head.len(),
            x: concat_rows(&self.x, self.row_len(), tail, head),
            num_markers: self.num_markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GenotypesBuilder, NUM_GENOTYPE_STATES};
    use crate::error::Error;
    use assert_approx_eq::assert_approx_eq;

    const SEED: u64 = 42;
    const N: usize = 20;
    const M: usize = 5;

    #[test]
    fn one_hot_from_codes() {
        let gt = GenotypesBuilder::new()
            .with_codes(&[0, 1, 2, 2, 1, 0], 2, 3)
            .build()
            .unwrap();
        assert_eq!(gt.dims(), [2, 3, 3]);
        assert_eq!(
            gt.x(),
            &[
                1., 0., 0., 0., 1., 0., 0., 0., 1., //
                0., 0., 1., 0., 1., 0., 1., 0., 0., //
            ]
        );
    }

    #[test]
    fn random_x_is_one_hot() {
        let gt = GenotypesBuilder::new()
            .with_seed(SEED)
            .with_random_x(M, N, None)
            .build()
            .unwrap();
        assert_eq!(gt.dims(), [N, M, NUM_GENOTYPE_STATES]);
        for states in gt.x().chunks(NUM_GENOTYPE_STATES) {
            assert_eq!(states.iter().sum::<f32>(), 1.0);
        }
    }

    #[test]
    fn random_x_seed_is_deterministic() {
        let a = GenotypesBuilder::new()
            .with_seed(SEED)
            .with_random_x(M, N, None)
            .build()
            .unwrap();
        let b = GenotypesBuilder::new()
            .with_seed(SEED)
            .with_random_x(M, N, None)
            .build()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn build_without_x_fails() {
        assert!(matches!(
            GenotypesBuilder::new().build(),
            Err(Error::MissingX)
        ));
    }

    #[test]
    fn state_frequencies_sum_to_one() {
        let gt = GenotypesBuilder::new()
            .with_seed(SEED)
            .with_random_x(M, N, Some(vec![0.3; M]))
            .build()
            .unwrap();
        for locus in gt.state_frequencies() {
            assert_approx_eq!(locus.iter().sum::<f32>(), 1.0);
        }
    }
}
