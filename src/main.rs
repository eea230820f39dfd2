use std::fmt::Display;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use eqsmt::cnf::Literal;
use eqsmt::config::SolverConfig;
use eqsmt::dimacs;
use eqsmt::dpll::Dpll;
use eqsmt::engine::{SatEngine, SolveResult};
use eqsmt::strategy::{IntegrationStrategy, Status};

const EXIT_SAT: i32 = 0;
const EXIT_UNSAT: i32 = 1;
const EXIT_UNKNOWN: i32 = 2;
const EXIT_ERROR: i32 = 254;

/// Decide problems in the theory of equality over uninterpreted
/// constants.
#[derive(Debug, Parser)]
#[command(name = "eqsmt", version)]
struct Args {
    /// Problem file; standard input is read if there is none.
    input: Option<PathBuf>,

    /// How to combine the theory with the SAT engine.
    #[arg(long, value_enum)]
    strategy: Option<IntegrationStrategy>,

    /// JSON solver configuration; other flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up after this many decisions in one engine run.
    #[arg(long)]
    decision_limit: Option<usize>,

    /// Give up after learning this many clauses in the lazy loop.
    #[arg(long)]
    refinement_limit: Option<usize>,

    /// Try 'true' first when deciding.
    #[arg(long)]
    positive_phase: bool,

    /// The input is plain DIMACS, with no theory.
    #[arg(long)]
    dimacs: bool,

    /// Also print the equivalence classes of the model.
    #[arg(long)]
    classes: bool,

    /// More logging: -v for debug, -vv for trace.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args);
    let input = read_input(args.input.as_deref());

    if args.dimacs {
        let formula = match dimacs::from_string(input) {
            Ok(formula) => formula,
            Err(e) => fail("Failed to parse DIMACS:", e),
        };
        let num_vars = formula.max_var();
        match Dpll::from_config(&config).solve(&formula, num_vars) {
            Ok(SolveResult::Sat(lits)) => print_model(&lits),
            Ok(SolveResult::Unsat) => unsat(),
            Ok(SolveResult::Unknown) => unknown(),
            Err(e) => fail("Solver failed:", e),
        }
    }

    let (session, outcome) = match eqsmt::solve_str(input, &config) {
        Ok(solved) => solved,
        Err(e) => fail("Failed to solve problem:", e),
    };

    match (outcome.status, outcome.model) {
        (Status::Sat, Some(lits)) => {
            if args.classes {
                for class in session.describe_model(&lits) {
                    if class.len() > 1 {
                        println!("c {}", class.join(" = "));
                    }
                }
            }
            print_model(&lits)
        }
        (Status::Unsat, _) => unsat(),
        _ => unknown(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {}", e);
    }
}

fn load_config(args: &Args) -> SolverConfig {
    let mut config = match &args.config {
        Some(path) => match fs::read_to_string(path) {
            Ok(json) => match SolverConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => fail("Failed to load configuration:", e),
            },
            Err(e) => fail("Failed to read configuration:", e),
        },
        None => SolverConfig::default(),
    };

    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if args.decision_limit.is_some() {
        config.decision_limit = args.decision_limit;
    }
    if args.refinement_limit.is_some() {
        config.refinement_limit = args.refinement_limit;
    }
    if args.positive_phase {
        config.phase = true;
    }

    config
}

fn read_input(path: Option<&Path>) -> String {
    let result = match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map(|_| buffer)
        }
    };

    match result {
        Ok(input) => input,
        Err(e) => fail("Failed to read input:", e),
    }
}

fn print_model(lits: &[Literal]) -> ! {
    for lit in lits {
        println!("{}", lit);
    }
    exit(EXIT_SAT);
}

fn unsat() -> ! {
    println!("Unsatisfiable!");
    exit(EXIT_UNSAT);
}

fn unknown() -> ! {
    println!("Unknown");
    exit(EXIT_UNKNOWN);
}

fn fail(context: &str, e: impl Display) -> ! {
    eprintln!("{}", context);
    eprintln!("    {}", e);
    exit(EXIT_ERROR);
}
