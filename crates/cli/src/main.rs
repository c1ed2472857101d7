mod runner;
mod tap;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sjavac_core::{
    verify_file, FileSystemProvider, Line, SourceProvider, Verdict, Verifier, VerifyError,
};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// s-Java static verifier.
#[derive(Parser)]
#[command(name = "sjavac", version, about = "s-Java static verifier")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a source file; prints 0 (legal), 1 (illegal) or 2 (I/O error)
    Check {
        /// Path to the .sjava source file
        file: PathBuf,
    },

    /// Dump every line with its kind, scope and tokens
    Tokens {
        /// Path to the .sjava source file
        file: PathBuf,
    },

    /// Run the conformance test suite
    Test {
        /// Path to the conformance suite directory
        #[arg(default_value = "conformance")]
        suite_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => cmd_check(&file, cli.output, cli.quiet),
        Commands::Tokens { file } => cmd_tokens(&file, cli.output, cli.quiet),
        Commands::Test { suite_dir } => cmd_test(&suite_dir),
    }
}

fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let verdict = verify_file(file);
    println!("{}", verdict.exit_code());
    match &verdict {
        Verdict::Valid => {}
        Verdict::Invalid(err) => report_diagnostic(file, err, output, quiet),
        Verdict::IoFailure(msg) => report_error(&format!("error: {}", msg), output, quiet),
    }
    process::exit(verdict.exit_code());
}

fn cmd_tokens(file: &Path, output: OutputFormat, quiet: bool) {
    let reader = match FileSystemProvider.open(file) {
        Ok(reader) => reader,
        Err(e) => {
            let msg = format!("error: cannot read {}: {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(2);
        }
    };

    let mut verifier = Verifier::new();
    for raw in reader.lines() {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                let msg = format!("error: cannot read {}: {}", file.display(), e);
                report_error(&msg, output, quiet);
                process::exit(2);
            }
        };
        if let Err(err) = verifier.feed(&raw) {
            report_diagnostic(file, &err, output, quiet);
            process::exit(1);
        }
    }
    let lines = verifier.into_lines();

    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&lines)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for line in &lines {
                println!("{}", render_line(line));
            }
        }
    }
}

fn cmd_test(suite_dir: &Path) {
    if !suite_dir.exists() {
        eprintln!(
            "error: conformance suite directory not found: {}",
            suite_dir.display()
        );
        process::exit(1);
    }

    let result = runner::run_suite(suite_dir);
    if result.failed > 0 {
        process::exit(1);
    }
}

/// `  3  var_declaration     global.foo  int var_name(x) equals int_val semicolon`
fn render_line(line: &Line) -> String {
    let tokens: Vec<String> = line
        .tokens
        .iter()
        .map(|t| match &t.name {
            Some(name) => format!("{}({})", label(&t.kind), name),
            None => label(&t.kind),
        })
        .collect();
    format!(
        "{:>4}  {:<22}{:<24}{}",
        line.number,
        label(&line.kind),
        line.scope.to_string(),
        tokens.join(" ")
    )
}

/// The serialized (snake_case) name of a unit enum variant.
fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::from("?"),
    }
}

/// Verification failure: `<phase> error: line N: message`, or the structured
/// diagnostic in JSON mode (always printed).
fn report_diagnostic(file: &Path, err: &VerifyError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let mut value = err.to_json_value();
            value["file"] = serde_json::Value::String(file.display().to_string());
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err));
            eprintln!("{}", pretty);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{} error: {}", err.kind.phase(), err);
            }
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}
