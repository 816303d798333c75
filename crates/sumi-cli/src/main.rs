//! Command-line interface for sumi.
//!
//! Reads a markdown file, runs it through the conversion pipeline and
//! prints the result. The intermediate stages can be dumped as JSON for
//! inspection. All file I/O failures surface here; the pipeline itself
//! never fails.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use sumi::{generate, serialize, serialize_document, tokenize, DocumentOptions};

#[derive(Parser)]
#[command(name = "sumi", version, about = "Convert extended Markdown to HTML")]
struct Cli {
    /// Markdown file to convert
    input: PathBuf,

    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit a complete HTML document instead of a fragment
    #[arg(long)]
    document: bool,

    /// Document title (defaults to the input file stem)
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Stylesheet to reference from the document head
    #[arg(long, value_name = "PATH")]
    stylesheet: Option<PathBuf>,

    /// Inline the stylesheet contents into the document
    #[arg(long, requires = "stylesheet")]
    embed_stylesheet: bool,

    /// Dump the token stream as JSON instead of rendering
    #[arg(long, conflicts_with = "dump_ast")]
    dump_tokens: bool,

    /// Dump the AST as JSON instead of rendering
    #[arg(long)]
    dump_ast: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode {stage} as JSON: {source}")]
    Json {
        stage: &'static str,
        source: serde_json::Error,
    },
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let markdown = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;

    let (tokens, footnotes) = tokenize(&markdown);

    let output = if cli.dump_tokens {
        serde_json::to_string_pretty(&tokens).map_err(|source| CliError::Json {
            stage: "tokens",
            source,
        })?
    } else {
        let nodes = generate(&tokens, &footnotes);

        if cli.dump_ast {
            serde_json::to_string_pretty(&nodes).map_err(|source| CliError::Json {
                stage: "ast",
                source,
            })?
        } else if cli.document {
            let options = DocumentOptions {
                title: cli.title.clone().unwrap_or_else(|| default_title(cli)),
                stylesheet: cli.stylesheet.clone(),
                embed_stylesheet: cli.embed_stylesheet,
            };
            serialize_document(&nodes, &footnotes, &options)
        } else {
            serialize(&nodes, &footnotes)
        }
    };

    match &cli.output {
        Some(path) => {
            let mut contents = output;
            if !contents.ends_with('\n') {
                contents.push('\n');
            }
            fs::write(path, contents).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })
        }
        None => {
            println!("{output}");
            Ok(())
        }
    }
}

fn default_title(cli: &Cli) -> String {
    cli.input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("sumi: {err}");
        process::exit(1);
    }
}
