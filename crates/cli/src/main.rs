//! protoc-gen-rest
//!
//! protoc plugin that generates in-process grpc-gateway adapters for Go
//! services. protoc writes a `CodeGeneratorRequest` to stdin and reads the
//! `CodeGeneratorResponse` back from stdout; diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use protoc_gen_rest_common::{FileDefinition, GeneratedFile, PLUGIN_NAME};
use protoc_gen_rest_generator::RestGenerator;
use protoc_gen_rest_parser::{
    error_response, parse_request, read_request, success_response, write_response,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "PROTOC_GEN_REST_LOG";

#[derive(Parser)]
#[command(name = "protoc-gen-rest")]
#[command(version, about = "protoc plugin generating in-process grpc-gateway server adapters", long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
    # Run as a protoc plugin\n  \
    protoc --rest_out=paths=source_relative:. greeter.proto\n\n  \
    # Replay a captured request and inspect the parsed services\n  \
    protoc-gen-rest --request request.bin --dump-ir ir.json > response.bin")]
struct Cli {
    /// Read the CodeGeneratorRequest from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    request: Option<PathBuf>,

    /// Write the parsed file definitions as JSON
    #[arg(long, value_name = "FILE")]
    dump_ir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let response = match generate(&cli) {
        Ok(files) => {
            info!(files = files.len(), "writing response");
            success_response(files)
        }
        Err(err) => {
            eprintln!("{} {:#}", format!("protoc-gen-{}:", PLUGIN_NAME).red().bold(), err);
            error_response(format!("{:#}", err))
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_response(&response, &mut out).context("failed to write output proto")?;
    out.flush().context("failed to write output proto")?;

    Ok(())
}

/// Log to stderr only; stdout carries the protocol
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Run one plugin invocation up to, but not including, the response write
fn generate(cli: &Cli) -> Result<Vec<GeneratedFile>> {
    let request = match &cli.request {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open request {}", path.display()))?;
            read_request(file).context("failed to read input proto")?
        }
        None => read_request(io::stdin().lock()).context("failed to read input proto")?,
    };
    debug!(
        files = request.file_to_generate.len(),
        parameter = request.parameter(),
        "decoded request"
    );

    let (config, definitions) = parse_request(&request)?;

    if let Some(path) = &cli.dump_ir {
        dump_ir(path, &definitions)?;
    }

    let files = RestGenerator::new(config)?.generate(&definitions)?;
    Ok(files)
}

fn dump_ir(path: &Path, definitions: &[FileDefinition]) -> Result<()> {
    let json = serde_json::to_string_pretty(definitions).context("failed to serialize IR")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "dumped IR");
    Ok(())
}
