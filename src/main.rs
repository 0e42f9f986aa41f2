use anyhow::Context;
use clap::Parser;
use rpncalc::display::{is_name, parse_number, DEFAULT_PRECISION};
use rpncalc::keypad::Calculator;
use rpncalc::snapshot::Snapshot;
use rpncalc::{Brain, Evaluation};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Reverse-Polish calculator, e.g. `4 2 - sqrt` or `x sin 0.5 >x`
///
/// Each line holds whitespace separated keys: numbers, operations, `enter`,
/// `clear`, `>NAME` to store the display in a variable, or a NAME to push it.
/// A number is entered when the next key needs it or at the end of the line,
/// a negative number such as `-5` is entered at once.
/// An empty line quits.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// JSON file holding the program, restored at startup and saved on exit
    #[arg(long)]
    state: Option<PathBuf>,

    /// Tracing filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Most fractional digits displayed
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,
}

// ASCII spellings for keys which are hard to type
fn alias(key: &str) -> &str {
    match key {
        "sqrt" => "√",
        "pi" => "π",
        "×" => "*",
        "÷" => "/",
        _ => key,
    }
}

fn press(calc: &mut Calculator, key: &str) -> Option<Evaluation> {
    let key = alias(key);
    if key.chars().all(|c| c.is_ascii_digit() || c == '.') && parse_number(key).is_ok() {
        if calc.is_typing() {
            calc.enter();
        }
        key.chars().for_each(|c| calc.digit(c));
        return calc.display_value().map(Evaluation::Complete);
    }
    if let Some(digits) = key.strip_prefix('-') {
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            if let Ok(value) = parse_number(key) {
                return Some(calc.enter_value(value));
            }
        }
    }
    if calc.brain().registry().lookup(key).is_some() {
        return Some(calc.operation(key));
    }
    match key {
        "enter" => Some(calc.enter()),
        "clear" | "C" => Some(calc.clear()),
        _ => {
            if let Some(name) = key.strip_prefix('>').or_else(|| key.strip_prefix('→')) {
                if is_name(name) {
                    return Some(calc.store(name));
                }
            } else if is_name(key) {
                return Some(calc.recall(key));
            }
            None
        }
    }
}

fn restore(calc: &mut Calculator, path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        info!(path = %path.display(), "no saved state yet");
        return Ok(());
    }
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("Failed to restore calculator state from {}", path.display()))?;
    calc.restore(&snapshot.program);
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut calc = Calculator::with_brain(Brain::new(), args.precision);
    if let Some(path) = &args.state {
        restore(&mut calc, path)?;
        if !calc.brain().is_empty() {
            println!("{}", calc.history());
            println!("= {}", calc.display());
        }
    }

    loop {
        let mut input = String::new();

        io::stdin()
            .read_line(&mut input)
            .context("Failed to read calculator input")?;

        let line = input.trim();
        if line.is_empty() {
            break;
        }

        for key in line.split_whitespace() {
            if press(&mut calc, key).is_none() {
                warn!(key, "unrecognised key");
                eprintln!("No such key: {key}");
            }
        }
        if calc.is_typing() {
            calc.enter();
        }

        println!("{}", calc.history());
        println!("= {}", calc.display());
    }

    if let Some(path) = &args.state {
        Snapshot::capture(calc.brain())
            .save(path)
            .with_context(|| format!("Failed to save calculator state to {}", path.display()))?;
    }

    Ok(())
}
