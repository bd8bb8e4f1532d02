use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use toy16_asm::format::{json_listing, listing, memory_init};
use toy16_asm::{AsmConfig, Assembler};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble a toy16 program into 16-bit words")]
struct Opts {
    /// Assembly source (one statement per line)
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Write a memory initializer block here instead of printing a listing
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Listing format when no OUTPUT is given
    #[arg(long, value_enum, default_value_t = ListingFormat::Text)]
    format: ListingFormat,
    /// JSON config file (memory_words, memory_name)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the memory size used for the zero-fill loop
    #[arg(long)]
    memory_words: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListingFormat {
    Text,
    Json,
}

fn run(opts: Opts) -> Result<()> {
    let mut cfg = match &opts.config {
        Some(path) => AsmConfig::from_json_file(path)?,
        None => AsmConfig::default(),
    };
    if let Some(n) = opts.memory_words {
        cfg.memory_words = n;
    }

    let source = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let asm = Assembler::new(cfg);
    let program = asm.assemble(&source)?;

    match &opts.output {
        Some(path) => {
            let text = memory_init(&program.instructions, &asm.cfg)?;
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            println!("Assembled {} instructions to {}", program.instructions.len(), path.display());
        }
        None => match opts.format {
            ListingFormat::Text => print!("{}", listing(&program.instructions)),
            ListingFormat::Json => println!("{}", json_listing(&program)?),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Opts::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}
