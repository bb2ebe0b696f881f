//! Benchmark driver: time the tokenizer, parser and code generator over
//! a source file.
//!
//! ```text
//! flint-bench <file> <iterations> <mode>
//! ```
//!
//! `mode` is one of `tokenize`, `parse`, `roundtrip` or `codegen`. The
//! per-iteration durations, in seconds, are printed to stdout as a JSON
//! array. Exits 0 on success and 1 on argument or I/O errors.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::str::FromStr;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use flint_python_codegen::{unparse, Style};
use flint_python_parser::{parse, tokenize, Mode};

#[derive(Copy, Clone, Debug)]
enum BenchMode {
    Tokenize,
    Parse,
    Roundtrip,
    Codegen,
}

impl FromStr for BenchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "tokenize" => BenchMode::Tokenize,
            "parse" => BenchMode::Parse,
            "roundtrip" => BenchMode::Roundtrip,
            "codegen" => BenchMode::Codegen,
            _ => bail!("unknown mode {s:?}: expected tokenize, parse, roundtrip, or codegen"),
        })
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("flint-bench: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(path), Some(iterations), Some(mode)) = (args.next(), args.next(), args.next())
    else {
        bail!("usage: flint-bench <file> <iterations> <mode>");
    };
    if args.next().is_some() {
        bail!("usage: flint-bench <file> <iterations> <mode>");
    }
    let iterations: u32 = iterations
        .parse()
        .with_context(|| format!("invalid iteration count {iterations:?}"))?;
    let mode: BenchMode = mode.parse()?;
    let source =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;

    // One warm-up pass also surfaces syntax errors before timing starts.
    run_once(&source, mode).with_context(|| format!("failed to process {path}"))?;

    let mut durations = Vec::with_capacity(iterations as usize);
    for _ in 0..iterations {
        let start = Instant::now();
        run_once(&source, mode)?;
        durations.push(start.elapsed().as_secs_f64());
    }
    println!("{}", serde_json::to_string(&durations)?);
    Ok(())
}

fn run_once(source: &str, mode: BenchMode) -> Result<()> {
    match mode {
        BenchMode::Tokenize => {
            let tokens = tokenize(source, Mode::Module)?;
            std::hint::black_box(tokens);
        }
        BenchMode::Parse => {
            let module = parse(source, Mode::Module)?;
            std::hint::black_box(module);
        }
        BenchMode::Codegen => {
            let module = parse(source, Mode::Module)?;
            let generated = unparse(&module, &Style::default());
            std::hint::black_box(generated);
        }
        BenchMode::Roundtrip => {
            let module = parse(source, Mode::Module)?;
            let generated = unparse(&module, &Style::default());
            let reparsed = parse(&generated, Mode::Module)?;
            std::hint::black_box(reparsed);
        }
    }
    Ok(())
}
