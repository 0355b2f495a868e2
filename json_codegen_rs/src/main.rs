//! Binary to generate data-model classes from a JSON Schema file.
//!
//! Usage: `jsoncodegen [--language python2|javascript|flow] [--prefix P] [--output FILE] schema.json`
//!
//! Without `--output`, the generated code is written to stdout followed by a newline.

use std::io::{Write, stdout};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use json_codegen_rs::{CodegenError, GenerateSettings, Language, generate, generate_from_file};
use tracing_subscriber::EnvFilter;

/// Generates code from a JSON-schema definition
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Definition of the data model as JSON schema
    schema: PathBuf,

    /// Output language: python2, javascript, or flow
    #[arg(short, long, default_value = "python2")]
    language: String,

    /// Optional prefix for generated classes
    #[arg(short, long)]
    prefix: Option<String>,

    /// Output filename for the generated code (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<(), CodegenError> {
    let language: Language = cli.language.parse()?;
    let settings = GenerateSettings {
        language,
        prefix: cli.prefix.clone(),
    };

    if let Some(output) = cli.output.as_ref() {
        return generate_from_file(&cli.schema, output, &settings);
    }

    let schema_json: String = std::fs::read_to_string(&cli.schema)?;
    let code: String = generate(&schema_json, &settings)?;
    let mut handle = stdout().lock();
    handle.write_all(code.as_bytes())?;
    writeln!(handle)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so generated code on stdout stays clean.
    let default_filter: &str = match cli.verbose {
        0 => "json_codegen_rs=warn",
        1 => "json_codegen_rs=debug",
        _ => "json_codegen_rs=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
