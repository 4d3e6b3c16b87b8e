//! # crossword-solver
//!
//! A command-line crossword filler. Grids are described by a structure file
//! (`_` for a fillable cell, anything else blocked) and a vocabulary file
//! (one candidate word per line). The puzzle is modeled as a constraint
//! satisfaction problem and solved by AC-3 propagation plus backtracking
//! search with MRV/degree/LCV heuristics.
//!
//! ## Usage
//!
//! ```sh
//! # Fill one puzzle and print the grid
//! crossword-solver solve structure.txt words.txt
//!
//! # Also write the filled grid to a file
//! crossword-solver solve structure.txt words.txt --output filled.txt
//!
//! # Fill every structure file in a directory against one vocabulary
//! crossword-solver dir --path puzzles/ --words words.txt
//!
//! # Compare against the uninformed baseline ordering
//! crossword-solver solve structure.txt words.txt --no-heuristics
//!
//! # Generate shell completions
//! crossword-solver completions bash
//! ```
//!
//! `--stats` (on by default) prints a table of search statistics, timings,
//! and memory usage.

use clap::{Args, CommandFactory, Parser, Subcommand};
use crossword_solver::csp::assignment::Assignment;
use crossword_solver::csp::solver::{
    CrosswordSolver, DefaultConfig, SearchStats, SolverConfig, UninformedConfig,
};
use crossword_solver::puzzle::crossword::{Crossword, PuzzleError};
use crossword_solver::puzzle::render::Rendered;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the crossword solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "crossword-solver", version, about = "A crossword CSP solver")]
struct Cli {
    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill a single crossword puzzle.
    Solve {
        /// Path to the structure file (`_` marks a fillable cell).
        structure: PathBuf,

        /// Path to the vocabulary file (one word per line).
        words: PathBuf,

        /// If set, write the filled grid to this file as well.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Fill every structure file in a directory against one vocabulary.
    Dir {
        /// Path to the directory of structure files.
        #[arg(long)]
        path: PathBuf,

        /// Path to the vocabulary file shared by all puzzles.
        #[arg(long)]
        words: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completions.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output about the parsed puzzle before solving.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable printing of search and memory statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the filled grid when a solution is found.
    #[arg(short, long, default_value_t = true)]
    print_solution: bool,

    /// Disable the MRV/degree/LCV heuristics and search in plain positional
    /// and lexicographic order instead.
    #[arg(long, default_value_t = false)]
    no_heuristics: bool,
}

/// Main entry point: parses arguments and dispatches to the command handlers.
fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            structure,
            words,
            output,
            common,
        } => {
            if let Err(e) = solve_file(&structure, &words, output.as_deref(), &common) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Dir {
            path,
            words,
            common,
        } => {
            if let Err(e) = solve_dir(&path, &words, &common) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }
}

/// Loads one puzzle, solves it, and reports the result.
fn solve_file(
    structure: &Path,
    words: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), PuzzleError> {
    let time = std::time::Instant::now();
    let crossword = Crossword::from_files(structure, words)?;
    let parse_time = time.elapsed();

    println!("Solving: {}", structure.display());
    if common.debug {
        println!("Grid: {}x{}", crossword.height(), crossword.width());
        println!("Slots: {}", crossword.variables().len());
        println!("Words: {}", crossword.words().len());
        for var in crossword.variables() {
            println!("  {var}");
        }
    }

    let (solution, elapsed, search_stats) = solve(crossword.clone(), common);

    if let Some(assignment) = &solution {
        if common.print_solution {
            print!("{}", Rendered::new(&crossword, assignment));
        }
        if let Some(out) = output {
            let rendered = Rendered::new(&crossword, assignment).to_string();
            std::fs::write(out, rendered)?;
            println!("Solution written to: {}", out.display());
        }
    } else {
        println!("No solution.");
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &crossword,
            &search_stats,
            solution.as_ref(),
        );
    }

    Ok(())
}

/// Fills every structure file in a directory against one vocabulary.
///
/// Files without a `.txt` extension are skipped, as is the vocabulary file
/// itself if it lives in the same directory.
fn solve_dir(path: &Path, words: &Path, common: &CommonOptions) -> Result<(), PuzzleError> {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        std::process::exit(1);
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "txt") {
            eprintln!("Skipping non-structure file: {}", file_path.display());
            continue;
        }
        if is_same_file(file_path, words) {
            continue;
        }

        solve_file(file_path, words, None, common)?;
    }

    Ok(())
}

/// Whether two paths name the same file under any spelling (relative vs
/// absolute, `.` and `..` components, symlinks). Falls back to a plain path
/// comparison when either side cannot be canonicalized.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Solves a crossword with the configuration selected on the command line.
///
/// # Returns
/// A tuple containing:
/// * `Option<Assignment>`: the solution if one exists.
/// * `Duration`: the time taken by the solver.
/// * `SearchStats`: counters collected during the search.
fn solve(
    crossword: Crossword,
    common: &CommonOptions,
) -> (Option<Assignment>, Duration, SearchStats) {
    if common.no_heuristics {
        solve_with::<UninformedConfig>(crossword)
    } else {
        solve_with::<DefaultConfig>(crossword)
    }
}

fn solve_with<C: SolverConfig>(crossword: Crossword) -> (Option<Assignment>, Duration, SearchStats) {
    // Advance epoch for jemalloc stats, helps isolate memory usage for this
    // solving phase.
    epoch::advance().unwrap();

    let time = std::time::Instant::now();

    let mut solver: CrosswordSolver<C> = CrosswordSolver::new(crossword);
    let solution = solver.solve();

    let elapsed = time.elapsed();

    (solution, elapsed, solver.stats())
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {:<28} {:>18}  |", label, value);
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {:<20} {:>12} ({:>9.0}/sec)  |", label, value, rate);
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    crossword: &Crossword,
    s: &SearchStats,
    solution: Option<&Assignment>,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    // Read memory statistics using tikv_jemalloc_ctl. These are byte counts.
    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line(
        "Grid",
        format!("{}x{}", crossword.height(), crossword.width()),
    );
    stat_line("Slots", crossword.variables().len());
    stat_line("Vocabulary", crossword.words().len());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Revisions", s.revisions, elapsed_secs);
    stat_line_with_rate("Removals", s.removals, elapsed_secs);
    stat_line_with_rate("Inferences", s.inferences, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated_mib:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident_mib:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solution.is_some() {
        println!("\nSOLVED");
    } else {
        println!("\nNO SOLUTION");
    }
}

#[cfg(test)]
mod tests {
    use super::is_same_file;

    #[test]
    fn test_same_file_matches_under_any_spelling() {
        let dir = std::env::temp_dir().join("crossword-solver-is-same-file");
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        let words = dir.join("words.txt");
        std::fs::write(&words, "CAT\n").unwrap();

        let dotted = dir.join("sub").join("..").join("words.txt");
        assert_ne!(dotted, words);
        assert!(is_same_file(&dotted, &words));
        assert!(!is_same_file(&dir.join("other.txt"), &words));
    }
}
