//! NPL CLI
//!
//! Headless checker and runner for entity program scenarios.

use nplc::commands::{check_file, parse_run_options, run_file};

fn main() {
    nplc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let code = match command.as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: npl check <scenario.json>");
                std::process::exit(1);
            }
            check_file(&args[2])
        }
        "run" => {
            let mut path = None;
            let mut flags = Vec::new();
            for arg in args.iter().skip(2) {
                if arg.starts_with('-') {
                    flags.push(arg.clone());
                } else if path.is_none() {
                    path = Some(arg.as_str());
                }
            }

            let Some(path) = path else {
                eprintln!("error: missing scenario path");
                print_run_usage();
                std::process::exit(1);
            };

            match parse_run_options(&flags) {
                Ok(options) => run_file(path, &options),
                Err(message) => {
                    eprintln!("error: {message}");
                    print_run_usage();
                    1
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            1
        }
    };

    std::process::exit(code);
}

fn print_usage() {
    println!("NPL - entity program checker and runner");
    println!();
    println!("Usage: npl <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <scenario.json>        Check every program in a scenario");
    println!("  run <scenario.json> [opts]   Run a scenario headless");
    println!("  help                         Show this message");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=npl_eval=debug) for execution traces.");
}

fn print_run_usage() {
    eprintln!("Usage: npl run <scenario.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --ticks=<n>     Simulation ticks (default: 100)");
    eprintln!("  --budget=<n>    Steps per program per tick (default: dt / 0.001)");
    eprintln!("  --dt=<seconds>  Simulated time per tick (default: 0.1)");
    eprintln!("  --seed=<n>      Seed program random number generators");
}
