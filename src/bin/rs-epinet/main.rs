mod cli;

use clap::Parser;
use cli::{Cli, InspectArgs, PrepareArgs, SimulateArgs, SubCmd};
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rs_epinet::data::{
    data::Data, format::DumpFormat, genotypes::GenotypesBuilder, phen_stats::PhenStats,
    phenotypes::PhenotypesBuilder, split::train_test_split,
};
use std::path::Path;
use std::str::FromStr;

fn main() {
    match Cli::parse().cmd {
        SubCmd::Prepare(args) => prepare(args),
        SubCmd::Simulate(args) => simulate(args),
        SubCmd::Inspect(args) => inspect(args),
    }
}

fn prepare(args: PrepareArgs) {
    if args.debug {
        simple_logger::init_with_level(log::Level::Debug).unwrap();
    } else {
        simple_logger::init_with_level(log::Level::Info).unwrap();
    }

    let inpath = Path::new(&args.infile);
    if !inpath.exists() {
        error!("Input file {:?} does not exist", inpath);
        std::process::exit(exitcode::NOINPUT);
    }
    let outdir = Path::new(&args.outdir);
    if !outdir.exists() {
        std::fs::create_dir_all(outdir).expect("Could not create output directory!");
    }
    args.to_file(&outdir.join("args.json"));

    info!("Reading GAMETES data from {:?}", inpath);
    let data = Data::from_gametes(inpath, args.max_samples).expect("Failed to read GAMETES input");
    info!(
        "Read {} samples with {} markers ({} predictive)",
        data.num_samples(),
        data.num_markers(),
        data.phen.loci().predictive().iter().filter(|e| **e).count()
    );

    split_and_write(&data, args.tt_ratio, args.seed, outdir, args.format);
}

fn simulate(args: SimulateArgs) {
    if args.debug {
        simple_logger::init_with_level(log::Level::Debug).unwrap();
    } else {
        simple_logger::init_with_level(log::Level::Info).unwrap();
    }

    let outdir = Path::new(&args.outdir);
    if !outdir.exists() {
        std::fs::create_dir_all(outdir).expect("Could not create output directory!");
    }
    args.to_file(&outdir.join("args.json"));

    info!(
        "Simulating {} samples with {} markers ({} predictive)",
        args.num_individuals, args.num_markers, args.num_predictive
    );
    let mafs = args.maf.map(|maf| vec![maf; args.num_markers]);
    let mut gen_builder = GenotypesBuilder::new();
    let mut phen_builder = PhenotypesBuilder::new();
    if let Some(seed) = args.seed {
        gen_builder = gen_builder.with_seed(seed);
        // separate stream for the label rng
        phen_builder = phen_builder.with_seed(seed.wrapping_add(1));
    }
    let gen = gen_builder
        .with_random_x(args.num_markers, args.num_individuals, mafs)
        .build()
        .expect("Failed to build genotypes");
    let phen = phen_builder
        .with_random_y(
            args.num_individuals,
            args.num_markers,
            args.num_predictive,
            args.case_fraction,
        )
        .build()
        .expect("Failed to build phenotypes");
    let data = Data::new(gen, phen);

    split_and_write(&data, args.tt_ratio, args.seed, outdir, args.format);
}

fn split_and_write(
    data: &Data,
    tt_ratio: f64,
    seed: Option<u64>,
    outdir: &Path,
    format: DumpFormat,
) {
    let mut rng = match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_entropy(),
    };
    let split = train_test_split(data, tt_ratio, &mut rng);
    write_set(&split.train, outdir, "train", format);
    write_set(&split.test, outdir, "test", format);
}

fn write_set(data: &Data, outdir: &Path, stem: &str, format: DumpFormat) {
    let stats = PhenStats::from_status(data.phen.status());
    info!(
        "The number of {} samples is {} with {} cases ({:.0} percent)",
        stem,
        stats.num_samples(),
        stats.num_cases(),
        stats.case_fraction() * 100.0
    );
    stats.to_file(&outdir.join(format!("{}_phen_stats.json", stem)));

    let mut path = outdir.join(stem);
    path.set_extension("data");
    info!("Creating: {:?} ({} format)", path, format);
    match format {
        DumpFormat::Bincode => data.to_file(&path),
        DumpFormat::Json => data.to_json(&path),
    }
}

fn read_format_from_prepare_args(path: &Path) -> DumpFormat {
    let text = std::fs::read_to_string(path).unwrap();
    let json = serde_json::from_str::<serde_json::Value>(&text).unwrap();
    DumpFormat::from_str(json["format"].as_str().unwrap()).unwrap()
}

fn inspect(args: InspectArgs) {
    let inpath = Path::new(&args.infile);
    if !inpath.exists() {
        eprintln!("Input file {:?} does not exist", inpath);
        std::process::exit(exitcode::NOINPUT);
    }
    let format = match args.format {
        Some(format) => format,
        None => read_format_from_prepare_args(
            &inpath
                .parent()
                .expect("Data file has no parent directory")
                .join("args.json"),
        ),
    };
    let data = match format {
        DumpFormat::Bincode => Data::from_file(inpath),
        DumpFormat::Json => Data::from_json(inpath),
    }
    .expect("Failed to load data file");

    // csv goes to stdout, dims to stderr
    eprintln!(
        "input dims: {:?}, status dims: {:?}, locus dims: {:?}",
        data.gen.dims(),
        data.phen.status().dims(),
        data.phen.loci().dims()
    );
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record([
        "locus",
        "double_major",
        "heterozygous",
        "double_minor",
        "predictive",
    ])
    .unwrap();
    let predictive = data.phen.loci().predictive();
    for (ix, freqs) in data.gen.state_frequencies().iter().enumerate() {
        wtr.write_record([
            ix.to_string(),
            freqs[0].to_string(),
            freqs[1].to_string(),
            freqs[2].to_string(),
            predictive[ix].to_string(),
        ])
        .unwrap();
    }
    wtr.flush().expect("Failed to flush csv writer");
}
