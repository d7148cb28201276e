use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use jpath_query::{compile, compile_strict, first, or_default, unique, Context, Jpath};
use serde_json::Value;
use tracing::Level;

/// Query a JSON document with a path expression.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path expression, e.g. `$..book[0:2].price`
    path: String,
    /// JSON document to read; stdin when omitted
    file: Option<PathBuf>,
    /// Reject expressions containing characters outside the path grammar
    #[arg(long)]
    strict: bool,
    /// Show only the first match
    #[arg(long)]
    first: bool,
    /// Deduplicate results
    #[arg(long)]
    unique: bool,
    /// JSON printed in place of an empty result (plain text is taken as a string)
    #[arg(long)]
    default: Option<String>,
    /// Print the compiled segments instead of querying
    #[arg(long)]
    explain: bool,
    /// Print on a single line
    #[arg(long)]
    compact: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    if args.explain {
        let path = if args.strict {
            compile_strict(&args.path)?
        } else {
            compile(&args.path)
        };
        return render(&path, args.compact);
    }

    let data = match &args.file {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let ctx = Context {
        strict: args.strict,
    };
    let doc = Jpath::from_slice(&data)?.with_context(ctx);

    // Query the path.
    let mut out = doc.try_query(&args.path)?;

    // Post-process results as requested.
    if args.unique {
        out = unique(&out);
    }
    if args.first {
        out = first(&out);
    }
    let out: Vec<Value> = match &args.default {
        Some(def) => {
            let def = serde_json::from_str::<Value>(def)
                .unwrap_or_else(|_| Value::String(def.clone()));
            or_default(&out, &def)
        }
        None => out.into_iter().cloned().collect(),
    };

    render(&out, args.compact)
}

fn render<T: serde::Serialize>(
    value: &T,
    compact: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}
