use crate::arr_helpers::{concat_rows, gather_rows};
use crate::error::Error;
use bincode::{deserialize_from, serialize_into};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};
use serde_json::to_writer;
use std::ops::Range;
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

pub const NUM_CLASS_STATES: usize = 2;
pub const NUM_LOCUS_STATES: usize = 2;

/// One-hot encoded case / control status in row major
/// [num_samples, 2] order. Column 0 is control, column 1 is case.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct StatusLabels {
    y: Vec<f32>,
    num_samples: usize,
}

impl StatusLabels {
    pub fn y(&self) -> &[f32] {
        &self.y
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_cases(&self) -> usize {
        (0..self.num_samples)
            .filter(|i| self.y[i * NUM_CLASS_STATES + 1] == 1.0)
            .count()
    }

    pub fn dims(&self) -> [usize; 2] {
        [self.num_samples, NUM_CLASS_STATES]
    }

    pub(crate) fn gather_rows(&self, indices: &[usize]) -> Self {
        Self {
            y: gather_rows(&self.y, NUM_CLASS_STATES, indices),
            num_samples: indices.len(),
        }
    }

    pub(crate) fn slice_rows(&self, tail: Range<usize>, head: Range<usize>) -> Self {
        Self {
            num_samples: tail.len() + head.len(),
            y: concat_rows(&self.y, NUM_CLASS_STATES, tail, head),
        }
    }
}

/// One-hot encoded per locus interaction labels in row major
/// [num_samples, num_markers, 2] order. Column 0 marks a noise locus,
/// column 1 a predictive one.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct LocusLabels {
    y: Vec<f32>,
    num_samples: usize,
    num_markers: usize,
}

impl LocusLabels {
    pub fn y(&self) -> &[f32] {
        &self.y
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_markers(&self) -> usize {
        self.num_markers
    }

    pub fn dims(&self) -> [usize; 3] {
        [self.num_samples, self.num_markers, NUM_LOCUS_STATES]
    }

    /// Predictive flag per locus, read off the first sample row.
    pub fn predictive(&self) -> Vec<bool> {
        (0..self.num_markers)
            .map(|marker_ix| self.y[marker_ix * NUM_LOCUS_STATES + 1] == 1.0)
            .collect()
    }

    fn row_len(&self) -> usize {
        self.num_markers * NUM_LOCUS_STATES
    }

    pub(crate) fn gather_rows(&self, indices: &[usize]) -> Self {
        Self {
            y: gather_rows(&self.y, self.row_len(), indices),
            num_samples: indices.len(),
            num_markers: self.num_markers,
        }
    }

    pub(crate) fn slice_rows(&self, tail: Range<usize>, head: Range<usize>) -> Self {
        Self {
            num_samples: tail.len() + head.len(),
            y: concat_rows(&self.y, self.row_len(), tail, head),
            num_markers: self.num_markers,
        }
    }
}

/// The label side of a data set: per sample case / control status and per
/// locus interaction labels, index aligned with the genotype rows.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct Phenotypes {
    status: StatusLabels,
    loci: LocusLabels,
}

impl Phenotypes {
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

    pub fn status(&self) -> &StatusLabels {
        &self.status
    }

    pub fn loci(&self) -> &LocusLabels {
        &self.loci
    }

    pub fn num_samples(&self) -> usize {
        self.status.num_samples
    }

    pub(crate) fn gather_rows(&self, indices: &[usize]) -> Self {
        Self {
            status: self.status.gather_rows(indices),
            loci: self.loci.gather_rows(indices),
        }
    }

    pub(crate) fn slice_rows(&self, tail: Range<usize>, head: Range<usize>) -> Self {
        Self {
            status: self.status.slice_rows(tail.clone(), head.clone()),
            loci: self.loci.slice_rows(tail, head),
        }
    }
}

pub struct PhenotypesBuilder {
    classes: Option<Vec<u8>>,
    predictive_loci: Option<Vec<usize>>,
    num_markers: Option<usize>,
    rng: ChaCha20Rng,
}

impl Default for PhenotypesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PhenotypesBuilder {
    pub fn new() -> Self {
        Self {
            classes: None,
            predictive_loci: None,
            num_markers: None,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self
    }

    /// Class codes (0 = control, 1 = case), one per sample.
    pub fn with_classes(mut self, classes: &[u8]) -> Self {
        self.classes = Some(classes.to_vec());
        self
    }

    pub fn with_predictive_loci(mut self, loci: &[usize], num_markers: usize) -> Self {
        self.predictive_loci = Some(loci.to_vec());
        self.num_markers = Some(num_markers);
        self
    }

    /// Random case / control statuses with the first `num_predictive` loci
    /// marked predictive.
    pub fn with_random_y(
        mut self,
        num_samples: usize,
        num_markers: usize,
        num_predictive: usize,
        case_fraction: f64,
    ) -> Self {
        assert!(
            num_predictive <= num_markers,
            "more predictive loci than markers"
        );
        let case_dist = Bernoulli::new(case_fraction).unwrap();
        self.classes = Some(
            (0..num_samples)
                .map(|_| case_dist.sample(&mut self.rng) as u8)
                .collect(),
        );
        self.predictive_loci = Some((0..num_predictive).collect());
        self.num_markers = Some(num_markers);
        self
    }

    pub fn build(self) -> Result<Phenotypes, Error> {
        if self.classes.is_none() {
            return Err(Error::MissingY);
        }
        let classes = self.classes.unwrap();
        let num_samples = classes.len();
        let num_markers = self.num_markers.unwrap_or(0);
        let predictive_loci = self.predictive_loci.unwrap_or_default();

        let mut status = vec![0f32; num_samples * NUM_CLASS_STATES];
        for (sample_ix, class) in classes.iter().enumerate() {
            status[sample_ix * NUM_CLASS_STATES + *class as usize] = 1.0;
        }

        let mut loci = vec![0f32; num_samples * num_markers * NUM_LOCUS_STATES];
        for sample_ix in 0..num_samples {
            for marker_ix in 0..num_markers {
                let offset = (sample_ix * num_markers + marker_ix) * NUM_LOCUS_STATES;
                if predictive_loci.contains(&marker_ix) {
                    loci[offset + 1] = 1.0;
                } else {
                    loci[offset] = 1.0;
                }
            }
        }

        Ok(Phenotypes {
            status: StatusLabels {
                y: status,
                num_samples,
            },
            loci: LocusLabels {
                y: loci,
                num_samples,
                num_markers,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PhenotypesBuilder, NUM_CLASS_STATES, NUM_LOCUS_STATES};
    use crate::error::Error;

    #[test]
    fn one_hot_status_from_classes() {
        let phen = PhenotypesBuilder::new()
            .with_classes(&[0, 1, 1])
            .with_predictive_loci(&[1], 2)
            .build()
            .unwrap();
        assert_eq!(phen.status().dims(), [3, 2]);
        assert_eq!(phen.status().y(), &[1., 0., 0., 1., 0., 1.]);
        assert_eq!(phen.status().num_cases(), 2);
    }

    #[test]
    fn locus_labels_mark_predictive() {
        let phen = PhenotypesBuilder::new()
            .with_classes(&[1, 0])
            .with_predictive_loci(&[0, 2], 3)
            .build()
            .unwrap();
        assert_eq!(phen.loci().dims(), [2, 3, 2]);
        assert_eq!(phen.loci().predictive(), vec![true, false, true]);
        // identical label row for every sample
        let row_len = 3 * NUM_LOCUS_STATES;
        assert_eq!(phen.loci().y()[..row_len], phen.loci().y()[row_len..]);
    }

    #[test]
    fn random_y_is_one_hot() {
        let phen = PhenotypesBuilder::new()
            .with_seed(42)
            .with_random_y(50, 4, 2, 0.5)
            .build()
            .unwrap();
        assert_eq!(phen.num_samples(), 50);
        for pair in phen.status().y().chunks(NUM_CLASS_STATES) {
            assert_eq!(pair.iter().sum::<f32>(), 1.0);
        }
        assert_eq!(phen.loci().predictive(), vec![true, true, false, false]);
    }

    #[test]
    fn build_without_classes_fails() {
        assert!(matches!(
            PhenotypesBuilder::new().build(),
            Err(Error::MissingY)
        ));
    }
}
