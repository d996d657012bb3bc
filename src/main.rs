// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! bbreverse - backward reachability search for Busy Beaver candidates.

use bb_reverse::config::SolverConfig;
use bb_reverse::engine::{ReverseSolver, SearchOutcome};
use bb_reverse::machine::{ExitPoint, Machine, RunReport, StateId};
use bb_reverse::telemetry;
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;
use std::process;

/// The two-state, two-symbol champion.
const DEFAULT_MACHINE: &str = "1RB1LB_1LA1RZ";

#[derive(Parser)]
#[command(name = "bbreverse")]
#[command(about = "Search backward from a Turing machine's halt to the blank tape")]
#[command(version)]
struct Cli {
    /// More log output: -v info, -vv debug, -vvv trace. LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reverse search from the halting transition
    Solve {
        /// Machine in standard text format, e.g. 1RB1LB_1LA1RZ
        #[arg(default_value = DEFAULT_MACHINE)]
        machine: String,

        /// Maximum chain length
        #[arg(short, long, default_value_t = SolverConfig::DEFAULT_MAX_DEPTH)]
        depth: usize,

        /// Do not keep discovered chains
        #[arg(long)]
        no_trie: bool,

        /// Consult the pruner every K states (0 never)
        #[arg(long, value_name = "K", default_value_t = SolverConfig::DEFAULT_PRUNE_INTERVAL)]
        prune_interval: usize,

        /// Halting transition to search from, e.g. B1
        #[arg(long)]
        exit: Option<ExitPoint>,

        /// Start state to search for, e.g. A
        #[arg(long, value_parser = parse_state)]
        start: Option<StateId>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the machine forward from the blank tape
    Run {
        /// Machine in standard text format
        #[arg(default_value = DEFAULT_MACHINE)]
        machine: String,

        /// Stop after this many steps
        #[arg(short = 'n', long, default_value_t = 100_000_000)]
        max_steps: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_state(text: &str) -> Result<StateId, String> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => match StateId::from_char(ch) {
            Ok(Some(state)) => Ok(state),
            _ => Err(format!("{:?} is not a state letter A-Y", text)),
        },
        _ => Err(format!("{:?} is not a single state letter", text)),
    }
}

fn main() {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let result = match cli.command {
        Commands::Solve {
            machine,
            depth,
            no_trie,
            prune_interval,
            exit,
            start,
            json,
        } => {
            let mut config = SolverConfig::new(depth)
                .with_record_chains(!no_trie)
                .with_prune_interval(prune_interval);
            if let Some(exit) = exit {
                config = config.with_exit(exit);
            }
            solve(&machine, config, start, json)
        }
        Commands::Run {
            machine,
            max_steps,
            json,
        } => run(&machine, max_steps, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn solve(
    encoding: &str,
    config: SolverConfig,
    start: Option<StateId>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut machine: Machine = encoding.parse()?;
    if let Some(start) = start {
        machine.set_start_state(start)?;
    }
    let mut solver = ReverseSolver::new(machine, config)?;
    let outcome = solver.search();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&solver, &outcome);
    }
    Ok(())
}

fn print_outcome(solver: &ReverseSolver, outcome: &SearchOutcome) {
    let machine = solver.context().machine();
    println!("Machine:  {}", machine);
    println!("Exit:     {}", solver.exit());
    match outcome.forward_chain() {
        Some(chain) => {
            let letters: String = chain.iter().map(|s| s.to_char()).collect();
            println!("Result:   start found at a depth of {}", chain.len());
            println!("Chain:    {}", letters);
            println!("Tape:     {}", solver.context().tape);
        }
        None => println!(
            "Result:   no start within a depth of {}",
            solver.config().max_depth
        ),
    }
    println!(
        "Chains:   {} recorded, {} bounded",
        outcome.result_count, outcome.bounded
    );
    if let Some(trie) = &outcome.trie {
        println!("Trie:     {} nodes, depth {}", trie.node_count(), trie.depth());
    }
    println!("Elapsed:  {:.3?}", outcome.elapsed);
    for (counter, value) in outcome.statistics.iter() {
        let name: &'static str = counter.into();
        println!("  {:<14} {}", name, value);
    }
}

fn run(encoding: &str, max_steps: u64, json: bool) -> Result<(), Box<dyn Error>> {
    let machine: Machine = encoding.parse()?;
    let report = machine.run(Some(max_steps));
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&machine, &report);
    }
    Ok(())
}

fn print_report(machine: &Machine, report: &RunReport) {
    println!("Machine:  {}", machine);
    match report.exit {
        Some(exit) => println!("Halted:   at {} after {} steps", exit, report.steps),
        None => println!("Running:  no halt within {} steps", report.steps),
    }
    println!("Sigma:    {}", report.sigma);
    println!("Width:    {}", report.width);
}
