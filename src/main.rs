mod logger;

use std::process::ExitCode;

use sched_model::{Algorithm, SimConfig, SimError, sim::load_workload, simulate};

const USAGE: &str = "usage: sched_model <input_file> <algorithm: 1|sjf, 2|rr, 3|mlfq> [seed]";

fn main() -> ExitCode {
    if let Err(err) = logger::init() {
        eprintln!("failed to install logger: {err}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !(2..=3).contains(&args.len()) {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<sched_model::Report, SimError> {
    let algorithm: Algorithm = args[1].parse()?;
    let mut config = SimConfig::default();
    if let Some(raw) = args.get(2) {
        let seed = raw
            .parse()
            .map_err(|_| SimError::InvalidConfig("seed must be a non-negative integer"))?;
        config = config.with_seed(seed);
    }

    let jobs = load_workload(&args[0])?;
    simulate(algorithm, jobs, &config)
}
