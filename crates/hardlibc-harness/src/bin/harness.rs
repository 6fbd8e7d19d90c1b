//! CLI entrypoint for the hardlibc conformance harness.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};

use hardlibc_core::stdlib::units::UnitCategory;
use hardlibc_harness::builtin::builtin_suites;
use hardlibc_harness::dispatch::{category_from_name, execute_fixture_case};
use hardlibc_harness::report::render_markdown;
use hardlibc_harness::runner::TestRunner;
use hardlibc_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use hardlibc_harness::FixtureSet;

/// Conformance tooling for hardlibc.
#[derive(Debug, Parser)]
#[command(name = "hardlibc-harness")]
#[command(about = "Conformance testing harness for hardlibc")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the implementation against fixtures (built-in suite by default).
    Verify {
        /// Fixture JSON file, or a directory of them.
        #[arg(long)]
        fixture: Option<PathBuf>,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Run one parse and print the rendered outcome.
    Parse {
        /// Token to parse.
        text: String,
        /// Target width: u8..u64, i8..i64, f32, f64.
        #[arg(long, default_value = "u64")]
        width: String,
        /// Unit category (none, data-size, sector-type, time, power, volts,
        /// amps, temperature).
        #[arg(long, default_value = "none")]
        category: String,
    },
    /// Print the unit whitelists.
    ListUnits,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Verify { fixture, report, log } => run_verify(fixture, report, log),
        Command::Parse { text, width, category } => run_parse(&text, &width, &category),
        Command::ListUnits => {
            list_units();
            ExitCode::SUCCESS
        }
    }
}

fn run_verify(
    fixture: Option<PathBuf>,
    report: Option<PathBuf>,
    log: Option<PathBuf>,
) -> ExitCode {
    let suites = match fixture {
        Some(path) => match load_suites(&path) {
            Ok(suites) => suites,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => builtin_suites(),
    };

    let mut emitter = match log.as_deref().map(LogEmitter::to_file) {
        Some(Ok(emitter)) => Some(emitter),
        Some(Err(err)) => {
            eprintln!("error: cannot open log: {err}");
            return ExitCode::FAILURE;
        }
        None => None,
    };

    let runner = TestRunner::new("conformance");
    let mut families = Vec::new();
    let mut failed = 0usize;
    let mut total = 0usize;
    for suite in &suites {
        let results = runner.run(suite);
        for result in &results {
            total += 1;
            if !result.passed {
                failed += 1;
                println!("FAIL {}::{}", suite.family, result.case_name);
                if let Some(diff) = &result.diff {
                    println!("{diff}");
                }
            }
            if let Some(emitter) = emitter.as_mut() {
                let mut entry = LogEntry::new(unix_timestamp(), LogLevel::Info, "case_verified");
                entry.family = Some(suite.family.clone());
                entry.case = Some(result.case_name.clone());
                entry.outcome = Some(if result.passed { Outcome::Pass } else { Outcome::Fail });
                if !result.passed {
                    entry.level = LogLevel::Error;
                    entry.detail = result.diff.clone();
                }
                if let Err(err) = emitter.emit(&entry) {
                    eprintln!("error: log write failed: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        families.push((suite.family.clone(), results));
    }

    println!("{}/{} cases passed", total - failed, total);

    if let Some(path) = report {
        let md = render_markdown("conformance", &families);
        if let Err(err) = std::fs::write(&path, md) {
            eprintln!("error: cannot write report: {err}");
            return ExitCode::FAILURE;
        }
        println!("report written to {}", path.display());
    }

    if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn run_parse(text: &str, width: &str, category: &str) -> ExitCode {
    if category_from_name(category).is_none() {
        eprintln!("error: unknown category: {category}");
        return ExitCode::FAILURE;
    }
    let function = format!("parse_{width}");
    let inputs = serde_json::json!({"text": text, "category": category});
    match execute_fixture_case(&function, &inputs) {
        Ok(run) => {
            println!("{} [errno={}]", run.output, run.errno);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn list_units() {
    let categories = [
        ("data-size", UnitCategory::DataSize),
        ("sector-type", UnitCategory::SectorType),
        ("time", UnitCategory::Time),
        ("power", UnitCategory::Power),
        ("volts", UnitCategory::Volts),
        ("amps", UnitCategory::Amps),
        ("temperature", UnitCategory::Temperature),
    ];
    for (name, category) in categories {
        println!("{name}: {}", category.whitelist().join(" "));
    }
}

/// Fixture file, or every `.json` file in a directory (sorted by name).
fn load_suites(path: &std::path::Path) -> Result<Vec<FixtureSet>, Box<dyn std::error::Error>> {
    if path.is_dir() {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        let mut suites = Vec::with_capacity(paths.len());
        for p in paths {
            suites.push(FixtureSet::from_file(&p)?);
        }
        Ok(suites)
    } else {
        Ok(vec![FixtureSet::from_file(path)?])
    }
}

fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
