use crate::data::genotypes::Genotypes;
use crate::data::phenotypes::Phenotypes;
use crate::error::Error;
use std::ops::Range;

/// Cyclic minibatch cursor over paired genotype and label tensors.
///
/// Serves fixed size batches in original row order, wrapping around to the
/// start of the data once it is exhausted. A batch that straddles the end of
/// the data is the concatenation of the remaining tail rows and the required
/// number of head rows; epoch boundaries are not signalled and the data is
/// not reshuffled between passes.
pub struct DataBatcher<'data> {
    x: &'data Genotypes,
    y: &'data Phenotypes,
    num_samples: usize,
    // next unread row, in [0, num_samples)
    cursor: usize,
}

impl<'data> DataBatcher<'data> {
    pub fn new(x: &'data Genotypes, y: &'data Phenotypes) -> Result<Self, Error> {
        if x.num_samples() != y.num_samples() {
            return Err(Error::DimensionMismatch {
                num_input_samples: x.num_samples(),
                num_label_samples: y.num_samples(),
            });
        }
        Ok(Self {
            x,
            y,
            num_samples: x.num_samples(),
            cursor: 0,
        })
    }

    /// Extracts the next `batch_size` sample pairs and advances the cursor.
    ///
    /// Row i of the returned genotype batch and row i of both returned label
    /// tensors originate from the same source row.
    pub fn next_batch(&mut self, batch_size: usize) -> Result<(Genotypes, Phenotypes), Error> {
        if batch_size == 0 || batch_size > self.num_samples {
            return Err(Error::InvalidBatchSize {
                requested: batch_size,
                available: self.num_samples,
            });
        }
        let (tail, head) = self.batch_ranges(batch_size);
        let batch = (
            self.x.slice_rows(tail.clone(), head.clone()),
            self.y.slice_rows(tail, head),
        );
        self.cursor = (self.cursor + batch_size) % self.num_samples;
        Ok(batch)
    }

    fn batch_ranges(&self, batch_size: usize) -> (Range<usize>, Range<usize>) {
        if self.cursor + batch_size <= self.num_samples {
            (self.cursor..self.cursor + batch_size, 0..0)
        } else {
            let missing = batch_size - (self.num_samples - self.cursor);
            (self.cursor..self.num_samples, 0..missing)
        }
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn input_dims(&self) -> [usize; 3] {
        self.x.dims()
    }

    pub fn status_dims(&self) -> [usize; 2] {
        self.y.status().dims()
    }

    pub fn locus_dims(&self) -> [usize; 3] {
        self.y.loci().dims()
    }
}
