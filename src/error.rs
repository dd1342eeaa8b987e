use std::io;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("The input and label sets must have the same number of samples ({num_input_samples} != {num_label_samples})")]
    DimensionMismatch {
        num_input_samples: usize,
        num_label_samples: usize,
    },
    #[error("Batch size must be positive and at most the number of samples in the data set (requested {requested}, have {available})")]
    InvalidBatchSize { requested: usize, available: usize },
    #[error("No genotype data found.")]
    MissingX,
    #[error("No class label data found.")]
    MissingY,
    #[error("Missing header line in GAMETES file")]
    GametesMissingHeader,
    #[error("Unknown genotype code \"{code}\" in line {line_ix}")]
    GametesUnknownGenotypeCode { line_ix: usize, code: String },
    #[error("Unknown class code \"{code}\" in line {line_ix}")]
    GametesUnknownClassCode { line_ix: usize, code: String },
    #[error("Expected {expected} fields but found {found} in line {line_ix}")]
    GametesFieldCount {
        line_ix: usize,
        expected: usize,
        found: usize,
    },
    #[error("Failed to open source file")]
    FromFileOpeningError(#[from] io::Error),
    #[error("Failed to deserialize from file")]
    FromFileDeserializeError(#[from] bincode::Error),
    #[error("Failed to deserialize from json file")]
    FromJsonDeserializeError(#[from] serde_json::Error),
}
