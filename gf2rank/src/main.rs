use std::env;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use gf2rank::{par_sweep, RankEstimator, DEFAULT_ITERATIONS, DEFAULT_MAX_DIMENSION};
use rand::{rngs::SmallRng, Rng, SeedableRng};

struct Config {
    max_dimension: usize,
    iterations: usize,
    seed: Option<u64>,
    parallel: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Config, String> {
    let mut config = Config {
        max_dimension: DEFAULT_MAX_DIMENSION,
        iterations: DEFAULT_ITERATIONS,
        seed: None,
        parallel: false,
    };

    let mut args = args.into_iter();
    let mut positional = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--parallel" => config.parallel = true,
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                config.seed = Some(value.parse().map_err(|_| format!("invalid seed: {value}"))?);
            }
            _ if arg.starts_with('-') => return Err(format!("unknown option: {arg}")),
            _ => positional.push(arg),
        }
    }

    if positional.len() > 2 {
        return Err(format!("unexpected argument: {}", positional[2]));
    }
    if let Some(value) = positional.first() {
        config.max_dimension = value
            .parse()
            .map_err(|_| format!("invalid max dimension: {value}"))?;
    }
    if let Some(value) = positional.get(1) {
        config.iterations = value
            .parse()
            .map_err(|_| format!("invalid iteration count: {value}"))?;
        if config.iterations == 0 {
            return Err("iteration count must be positive".into());
        }
    }

    Ok(config)
}

fn run(config: &Config) -> io::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());

    if config.parallel {
        let seed = config
            .seed
            .unwrap_or_else(|| SmallRng::from_os_rng().random());
        for (n, probability) in par_sweep(config.max_dimension, config.iterations, seed) {
            writeln!(out, "{} {}", n, probability)?;
        }
    } else {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let mut estimator = RankEstimator::new(config.max_dimension);
        for n in 0..=config.max_dimension {
            let probability = estimator.estimate(&mut rng, n, config.iterations);
            writeln!(out, "{} {}", n, probability)?;
        }
    }

    out.flush()
}

fn main() -> ExitCode {
    let config = match parse_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: gf2rank [max_dimension] [iterations] [--seed <u64>] [--parallel]");
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
