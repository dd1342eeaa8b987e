use clap::{Args, Parser, Subcommand};
use log::info;
use rs_epinet::data::format::DumpFormat;
use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;
use std::{fs::File, path::Path};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub(crate) cmd: SubCmd,
}

#[derive(Subcommand)]
pub(crate) enum SubCmd {
    /// Prepare one-hot encoded train and test tensors from a GAMETES file
    Prepare(PrepareArgs),
    /// Simulate genotype and label data and prepare it the same way
    Simulate(SimulateArgs),
    /// Print per locus genotype state frequencies of a prepared data file
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub(crate) struct PrepareArgs {
    /// path to GAMETES input file (plain text or gzip compressed)
    pub infile: String,

    /// path to output dir. Will be created if it does not exist
    pub outdir: String,

    /// test:train ratio
    #[clap(long, default_value_t = 0.8)]
    pub tt_ratio: f64,

    /// read at most this many samples
    #[clap(long)]
    pub max_samples: Option<usize>,

    /// rng seed for the train test split
    #[clap(long)]
    pub seed: Option<u64>,

    /// on disk format of the tensor files
    #[clap(long, value_enum, default_value = "bincode")]
    pub format: DumpFormat,

    /// enable debug prints
    #[clap(short, long)]
    pub debug: bool,
}

impl PrepareArgs {
    pub fn to_file(&self, path: &Path) {
        info!("Creating: {:?}", path);
        to_writer_pretty(File::create(path).unwrap(), self).unwrap();
    }
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub(crate) struct SimulateArgs {
    /// path to output dir. Will be created if it does not exist
    pub outdir: String,

    /// number of markers (SNPs)
    pub num_markers: usize,

    /// number of samples (individuals)
    pub num_individuals: usize,

    /// number of predictive loci
    pub num_predictive: usize,

    /// expected fraction of case samples
    #[clap(long, default_value_t = 0.5)]
    pub case_fraction: f64,

    /// minor allele frequency used for all loci; drawn per locus from
    /// Uniform(0.01, 0.5) if not given
    #[clap(long)]
    pub maf: Option<f32>,

    /// test:train ratio
    #[clap(long, default_value_t = 0.8)]
    pub tt_ratio: f64,

    /// rng seed
    #[clap(long)]
    pub seed: Option<u64>,

    /// on disk format of the tensor files
    #[clap(long, value_enum, default_value = "bincode")]
    pub format: DumpFormat,

    /// enable debug prints
    #[clap(short, long)]
    pub debug: bool,
}

impl SimulateArgs {
    pub fn to_file(&self, path: &Path) {
        info!("Creating: {:?}", path);
        to_writer_pretty(File::create(path).unwrap(), self).unwrap();
    }
}

#[derive(Args, Debug)]
pub(crate) struct InspectArgs {
    /// path to a prepared .data file
    pub infile: String,

    /// format of the data file; read from the args.json next to it if not
    /// given
    #[clap(long, value_enum)]
    pub format: Option<DumpFormat>,
}
