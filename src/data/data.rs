use crate::data::batcher::DataBatcher;
use crate::data::genotypes::{Genotypes, GenotypesBuilder};
use crate::data::phenotypes::{Phenotypes, PhenotypesBuilder};
use crate::error::Error;
use crate::io::gametes::GametesDataset;
use bincode::{deserialize_from, serialize_into};
use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// A paired data set of one-hot encoded genotypes and labels.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct Data {
    pub gen: Genotypes,
    pub phen: Phenotypes,
}

impl Data {
    pub fn new(gen: Genotypes, phen: Phenotypes) -> Self {
        Self { gen, phen }
    }

    /// Reads a GAMETES file and one-hot encodes genotypes, statuses and the
    /// predictive locus set from its header.
    pub fn from_gametes(path: &Path, max_samples: Option<usize>) -> Result<Self, Error> {
        let raw = GametesDataset::from_file(path, max_samples)?;
        let gen = GenotypesBuilder::new()
            .with_codes(raw.genotype_codes(), raw.num_samples(), raw.num_markers())
            .build()?;
        let phen = PhenotypesBuilder::new()
            .with_classes(raw.classes())
            .with_predictive_loci(&raw.header().predictive_loci(), raw.num_markers())
            .build()?;
        Ok(Self { gen, phen })
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let mut r = BufReader::new(File::open(path)?);
        Ok(deserialize_from(&mut r)?)
    }

    pub fn from_json(path: &Path) -> Result<Self, Error> {
        let r = BufReader::new(File::open(path)?);
        Ok(from_reader(r)?)
    }

    pub fn to_file(&self, path: &Path) {
        let mut f = BufWriter::new(File::create(path).unwrap());
        serialize_into(&mut f, self).unwrap();
    }

    pub fn to_json(&self, path: &Path) {
        to_writer(File::create(path).unwrap(), self).unwrap();
    }

    pub fn batcher(&self) -> Result<DataBatcher, Error> {
        DataBatcher::new(&self.gen, &self.phen)
    }

    pub fn num_samples(&self) -> usize {
        self.gen.num_samples()
    }

    pub fn num_markers(&self) -> usize {
        self.gen.num_markers()
    }

    pub(crate) fn gather_rows(&self, indices: &[usize]) -> Self {
        Self {
            gen: self.gen.gather_rows(indices),
            phen: self.phen.gather_rows(indices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Data;
    use std::env;
    use std::path::{Path, PathBuf};

    fn test_file(name: &str) -> PathBuf {
        let base_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
        Path::new(&base_dir).join("resources/test").join(name)
    }

    #[test]
    fn from_gametes() {
        let data = Data::from_gametes(&test_file("gametes_small.txt"), None).unwrap();
        assert_eq!(data.num_samples(), 8);
        assert_eq!(data.num_markers(), 4);
        assert_eq!(data.phen.status().num_cases(), 4);
        assert_eq!(
            data.phen.loci().predictive(),
            vec![false, false, true, true]
        );

        let mut batcher = data.batcher().unwrap();
        assert_eq!(batcher.input_dims(), [8, 4, 3]);
        let (x, y) = batcher.next_batch(3).unwrap();
        assert_eq!(x.num_samples(), 3);
        assert_eq!(y.num_samples(), 3);
        // first sample of the fixture is a case with genotypes 0 0 1 2
        assert_eq!(
            &x.x()[..12],
            &[1., 0., 0., 1., 0., 0., 0., 1., 0., 0., 0., 1.]
        );
        assert_eq!(&y.status().y()[..2], &[0., 1.]);
    }
}
