use anyhow::{Context, Result};
use arith_codegen::{frontend::parse_document_with_limit, generate, GenerateOptions, Mapping};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arith")]
#[command(about = "Generate a script with an inline source map from an arithmetics document")]
struct Args {
    /// Path to the serialized (JSON) document
    file: PathBuf,

    /// Identifier of the source, used to name it in the source map.
    /// Defaults to the document path.
    #[arg(long)]
    uri: Option<String>,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Omit the inline source map annotation
    #[arg(long)]
    no_source_map: bool,

    /// Do not attach symbol names to mappings
    #[arg(long)]
    no_symbol_names: bool,

    /// Do not map the end of identifier and literal tokens
    #[arg(long)]
    no_end_mappings: bool,

    /// Deepest expression nesting accepted
    #[arg(long, default_value_t = GenerateOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the mapping list (0-based line:column) instead of the script
    #[arg(long)]
    mappings: bool,

    /// Log lowering details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            source_map: !self.no_source_map,
            symbol_names: !self.no_symbol_names,
            end_mappings: !self.no_end_mappings,
            max_depth: self.max_depth,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("Error reading file '{}'", args.file.display()))?;
    let document = parse_document_with_limit(&content, args.max_depth)
        .with_context(|| format!("Invalid document '{}'", args.file.display()))?;

    let uri = args
        .uri
        .clone()
        .unwrap_or_else(|| args.file.to_string_lossy().replace('\\', "/"));
    let generated = generate(&uri, &document, &args.options()).context("Generation failed")?;
    tracing::debug!(%uri, mappings = generated.mappings.len(), "generated script");

    let out = if args.mappings {
        format_mappings(&generated.mappings)
    } else {
        generated.code
    };

    match &args.output {
        Some(path) => fs::write(path, out)
            .with_context(|| format!("Error writing file '{}'", path.display()))?,
        None => println!("{out}"),
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn format_mappings(mappings: &[Mapping]) -> String {
    let mut lines = Vec::with_capacity(mappings.len());
    for m in mappings {
        let mut line = format!(
            "{}:{} → {}:{}",
            m.generated.line, m.generated.character, m.original.line, m.original.character
        );
        if let Some(name) = &m.name {
            line.push_str(", ");
            line.push_str(name);
        }
        lines.push(line);
    }
    lines.join("\n")
}
