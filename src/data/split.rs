use crate::data::data::Data;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

pub struct TrainTestSplit {
    pub train: Data,
    pub test: Data,
}

/// Splits a data set into a shuffled training set of `ceil(ratio * N)` rows
/// and a shuffled test set holding the complement.
pub fn train_test_split(data: &Data, ratio: f64, rng: &mut ChaCha20Rng) -> TrainTestSplit {
    assert!(
        ratio > 0.0 && ratio <= 1.0,
        "test:train ratio must be within (0, 1]"
    );
    let num_samples = data.num_samples();
    let num_train = (ratio * num_samples as f64).ceil() as usize;
    let mut indices: Vec<usize> = (0..num_samples).collect();
    indices.shuffle(rng);
    TrainTestSplit {
        train: data.gather_rows(&indices[..num_train]),
        test: data.gather_rows(&indices[num_train..]),
    }
}

#[cfg(test)]
mod tests {
    use super::train_test_split;
    use crate::data::data::Data;
    use crate::data::genotypes::{Genotypes, GenotypesBuilder, NUM_GENOTYPE_STATES};
    use crate::data::phenotypes::PhenotypesBuilder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const SEED: u64 = 42;
    const N: usize = 10;
    const M: usize = 3;

    // marker j of sample i carries digit j of i in base 3, so every row is
    // identifiable after shuffling
    fn test_data() -> Data {
        let codes: Vec<u8> = (0..N)
            .flat_map(|i| (0..M).map(move |j| ((i / 3usize.pow(j as u32)) % 3) as u8))
            .collect();
        let classes: Vec<u8> = (0..N).map(|i| (i % 2) as u8).collect();
        let gen = GenotypesBuilder::new().with_codes(&codes, N, M).build().unwrap();
        let phen = PhenotypesBuilder::new()
            .with_classes(&classes)
            .with_predictive_loci(&[1], M)
            .build()
            .unwrap();
        Data::new(gen, phen)
    }

    fn source_ix(gen: &Genotypes, row: usize) -> usize {
        (0..M)
            .map(|j| {
                let offset = (row * M + j) * NUM_GENOTYPE_STATES;
                let state = (0..NUM_GENOTYPE_STATES)
                    .position(|s| gen.x()[offset + s] == 1.0)
                    .unwrap();
                state * 3usize.pow(j as u32)
            })
            .sum()
    }

    #[test]
    fn split_sizes() {
        let mut rng = ChaCha20Rng::seed_from_u64(SEED);
        let split = train_test_split(&test_data(), 0.8, &mut rng);
        assert_eq!(split.train.num_samples(), 8);
        assert_eq!(split.test.num_samples(), 2);
        assert_eq!(split.train.num_markers(), M);
    }

    #[test]
    fn split_covers_all_rows_once() {
        let mut rng = ChaCha20Rng::seed_from_u64(SEED);
        let split = train_test_split(&test_data(), 0.7, &mut rng);
        let mut seen: Vec<usize> = (0..split.train.num_samples())
            .map(|row| source_ix(&split.train.gen, row))
            .chain((0..split.test.num_samples()).map(|row| source_ix(&split.test.gen, row)))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..N).collect::<Vec<usize>>());
    }

    #[test]
    fn split_rows_stay_paired() {
        let mut rng = ChaCha20Rng::seed_from_u64(SEED);
        let split = train_test_split(&test_data(), 0.8, &mut rng);
        for (data, num) in [
            (&split.train, split.train.num_samples()),
            (&split.test, split.test.num_samples()),
        ] {
            for row in 0..num {
                let ix = source_ix(&data.gen, row);
                assert_eq!(data.phen.status().y()[row * 2 + 1], (ix % 2) as f32);
            }
        }
    }

    #[test]
    fn split_seed_is_deterministic() {
        let mut rng_a = ChaCha20Rng::seed_from_u64(SEED);
        let mut rng_b = ChaCha20Rng::seed_from_u64(SEED);
        let split_a = train_test_split(&test_data(), 0.8, &mut rng_a);
        let split_b = train_test_split(&test_data(), 0.8, &mut rng_b);
        assert_eq!(split_a.train, split_b.train);
        assert_eq!(split_a.test, split_b.test);
    }
}
