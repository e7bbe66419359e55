//! k-nearest-neighbor digit classifier driver.
//!
//! Loads PGM images named in two list files (one path per line, labels
//! taken from `<index>-<label>.pgm` filenames), classifies the test set
//! against the training set, and prints the number of correct
//! classifications. Stdout carries exactly that one integer.
//!
//! Usage:
//!   knn <training_list> <testing_list> [options]
//!
//! Options:
//!   --k K           Number of neighbors to vote (default: 1)
//!   --threads N     Thread count: 0 = auto, 1 = sequential (default: 1)

use std::path::PathBuf;
use std::process::ExitCode;

use digitree::data::io::load_dataset_list;
use digitree::knn::KnnClassifier;
use digitree::metrics::n_correct;
use digitree::utils::run_with_threads;

const USAGE: &str = "usage: knn <training_list> <testing_list> [--k K] [--threads N]";

struct Args {
    training_list: PathBuf,
    testing_list: PathBuf,
    k: usize,
    n_threads: usize,
}

fn parse_args() -> Result<Args, String> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut k = 1usize;
    let mut n_threads = 1usize;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--k" => {
                let value = it.next().ok_or("--k needs a value")?;
                k = value
                    .parse()
                    .map_err(|_| format!("invalid --k value: {value}"))?;
            }
            "--threads" => {
                let value = it.next().ok_or("--threads needs a value")?;
                n_threads = value
                    .parse()
                    .map_err(|_| format!("invalid --threads value: {value}"))?;
            }
            "--help" => {
                eprintln!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with("--") => return Err(format!("unknown option: {other}")),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if k == 0 {
        return Err("--k must be at least 1".to_string());
    }
    let [training_list, testing_list] = <[PathBuf; 2]>::try_from(positional)
        .map_err(|_| "expected exactly two list paths".to_string())?;
    Ok(Args { training_list, testing_list, k, n_threads })
}

fn run(args: &Args) -> Result<usize, Box<dyn std::error::Error>> {
    let training = load_dataset_list(&args.training_list)?;
    let testing = load_dataset_list(&args.testing_list)?;

    let knn = KnnClassifier::new(&training);
    let correct = run_with_threads(args.n_threads, |parallelism| {
        n_correct(|image| knn.predict(image, args.k), &testing, parallelism)
    })?;
    Ok(correct)
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("knn: {message}");
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
            eprintln!("knn: {error}");
            ExitCode::FAILURE
        }
    }
}
