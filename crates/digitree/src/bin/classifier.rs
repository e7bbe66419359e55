//! Decision-tree digit classifier driver.
//!
//! Trains a tree on a binary dataset file, classifies a second one, and
//! prints the number of correct classifications. Stdout carries exactly
//! that one integer; everything else goes to stderr.
//!
//! Usage:
//!   classifier <training.bin> <testing.bin> [options]
//!
//! Options:
//!   --threshold R   Stopping threshold ratio in (0, 1] (default: 0.9)
//!   --threads N     Thread count: 0 = auto, 1 = sequential (default: 1)
//!   --verbose       Report tree shape on stderr after training

use std::path::PathBuf;
use std::process::ExitCode;

use digitree::data::io::load_dataset;
use digitree::metrics::n_correct;
use digitree::training::{build_tree, TreeConfig, Verbosity};
use digitree::utils::run_with_threads;

const USAGE: &str = "usage: classifier <training.bin> <testing.bin> \
                     [--threshold R] [--threads N] [--verbose]";

struct Args {
    training: PathBuf,
    testing: PathBuf,
    threshold_ratio: f64,
    n_threads: usize,
    verbose: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut threshold_ratio = 0.9f64;
    let mut n_threads = 1usize;
    let mut verbose = false;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--threshold" => {
                let value = it.next().ok_or("--threshold needs a value")?;
                threshold_ratio = value
                    .parse()
                    .map_err(|_| format!("invalid --threshold value: {value}"))?;
            }
            "--threads" => {
                let value = it.next().ok_or("--threads needs a value")?;
                n_threads = value
                    .parse()
                    .map_err(|_| format!("invalid --threads value: {value}"))?;
            }
            "--verbose" => verbose = true,
            "--help" => {
                eprintln!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with("--") => return Err(format!("unknown option: {other}")),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let [training, testing] = <[PathBuf; 2]>::try_from(positional)
        .map_err(|_| "expected exactly two dataset paths".to_string())?;
    Ok(Args { training, testing, threshold_ratio, n_threads, verbose })
}

fn run(args: &Args) -> Result<usize, Box<dyn std::error::Error>> {
    let training = load_dataset(&args.training)?;
    let testing = load_dataset(&args.testing)?;

    let config = TreeConfig::builder()
        .threshold_ratio(args.threshold_ratio)
        .verbosity(if args.verbose { Verbosity::Info } else { Verbosity::Silent })
        .build()?;
    let tree = build_tree(&training, &config)?;

    let correct = run_with_threads(args.n_threads, |parallelism| {
        n_correct(|image| tree.predict(image), &testing, parallelism)
    })?;
    Ok(correct)
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("classifier: {message}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(correct) => {
            println!("{correct}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("classifier: {error}");
            ExitCode::FAILURE
        }
    }
}
