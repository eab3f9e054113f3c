//! exprcalc CLI - evaluate and inspect arithmetic formulas

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exprcalc::{tokenize, EngineOptions, ExprParser, ExprValue};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "exprcalc")]
#[command(author, version, about = "Arithmetic formula evaluator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Compile `{...}` literally instead of stripping the outer braces
    #[arg(long, global = true)]
    no_braces: bool,

    /// Recompile formulas on every evaluation
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula and print the result
    Eval {
        /// Formula, e.g. "(price*qty)-discount"
        expr: String,

        /// Variable binding NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_binding)]
        set: Vec<(String, f64)>,
    },

    /// Print the postfix form of a formula
    Postfix {
        /// Formula to convert
        expr: String,
    },

    /// Print the tokens of a formula, one per line
    Tokens {
        /// Formula to tokenize
        expr: String,
    },

    /// Evaluate formulas read from stdin, one per line
    Repl {
        /// Variable binding NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_binding)]
        set: Vec<(String, f64)>,

        /// Print cache statistics at end of input
        #[arg(long)]
        stats: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parser = ExprParser::with_options(EngineOptions {
        unwrap_braces: !cli.no_braces,
        use_cache: !cli.no_cache,
    });

    match cli.command {
        Commands::Eval { expr, set } => eval(&parser, &expr, set),
        Commands::Postfix { expr } => {
            let postfix = parser
                .to_postfix_string(&expr)
                .with_context(|| format!("Failed to compile '{}'", expr))?;
            println!("{}", postfix);
            Ok(())
        }
        Commands::Tokens { expr } => {
            let tokens =
                tokenize(&expr).with_context(|| format!("Failed to tokenize '{}'", expr))?;
            for token in tokens {
                println!("{:?}", token);
            }
            Ok(())
        }
        Commands::Repl { set, stats } => repl(&parser, set, stats),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn eval(parser: &ExprParser, expr: &str, set: Vec<(String, f64)>) -> Result<()> {
    let vars: HashMap<String, f64> = set.into_iter().collect();
    let value = parser
        .evaluate(expr, &vars)
        .with_context(|| format!("Failed to evaluate '{}'", expr))?;
    println!("{}", value);
    Ok(())
}

fn repl(parser: &ExprParser, set: Vec<(String, f64)>, show_stats: bool) -> Result<()> {
    let vars: HashMap<String, f64> = set.into_iter().collect();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut errors = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let expr = line.trim_end_matches(['\r', '\n']);

        match parser.evaluate(expr, &vars) {
            Ok(ExprValue::Empty) => writeln!(out)?,
            Ok(value) => writeln!(out, "{}", value)?,
            Err(e) => {
                errors += 1;
                log::debug!("{:?} failed: {:?}", expr, e.kind());
                writeln!(out, "error: {}", e)?;
            }
        }
    }

    if show_stats {
        let stats = parser.cache().stats();
        eprintln!(
            "{} cached formulas, {} compilations, {} cache hits, {} errors",
            stats.entries, stats.compilations, stats.hits, errors
        );
    }

    Ok(())
}

/// Parse a `NAME=VALUE` binding
fn parse_binding(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    if name.is_empty() {
        return Err(format!("missing variable name in '{}'", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{}' for {}", value, name))?;
    Ok((name.to_string(), value))
}
