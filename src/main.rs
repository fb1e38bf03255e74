//! stickit-parser CLI

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use stickit_parser::{
    process_binding_declaration, stickit_parse, BindError, CompileOptions, Compiler,
    ErrorPolicy, FixSuggestion, ParseOptions, RecordingEngine, UniqueIds, View,
};

#[derive(Parser)]
#[command(name = "stickit-parser")]
#[command(about = "Compile data-bind declarations into stickit bindings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile one declaration and print the result as JSON
    Compile {
        /// Declaration, e.g. "value:employee#name|+format,events:blur"
        declaration: String,

        /// Element id (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Print the canonical specification instead of stickit bindings
        #[arg(long)]
        canonical: bool,

        /// Also read `model:` payloads as data-bound operands
        #[arg(long)]
        legacy_model_fallthrough: bool,
    },

    /// Print the normalized form of a declaration
    Normalize {
        declaration: String,
    },

    /// Parse every declaration in a view document (YAML or JSON)
    Parse {
        /// Path to the view document
        file: PathBuf,

        /// Options file (optionalModel, optionalBindings, optionalBindOptions)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Attribute holding the declarations (default: data-bind)
        #[arg(long)]
        bind_attribute: Option<String>,

        /// Only elements declaring model:<NAME>
        #[arg(long)]
        model_name: Option<String>,

        /// Model to bind against (default: the view's model)
        #[arg(short, long)]
        model: Option<String>,

        /// Skip elements with bad declarations instead of failing
        #[arg(long)]
        skip_invalid: bool,

        /// Print the engine registration calls instead of the report
        #[arg(long)]
        registrations: bool,

        /// Write generated element ids back into the view document
        #[arg(long)]
        write_ids: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            declaration,
            id,
            canonical,
            legacy_model_fallthrough,
        } => compile(&declaration, id.as_deref(), canonical, legacy_model_fallthrough),
        Commands::Normalize { declaration } => normalize(&declaration),
        Commands::Parse {
            file,
            config,
            bind_attribute,
            model_name,
            model,
            skip_invalid,
            registrations,
            write_ids,
        } => {
            let overrides = Overrides {
                bind_attribute,
                model_name,
                model,
                skip_invalid,
            };
            parse_view(&file, config.as_deref(), overrides, registrations, write_ids)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.downcast_ref::<BindError>().and_then(|b| b.fix_suggestion()) {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn compile(
    declaration: &str,
    id: Option<&str>,
    canonical: bool,
    legacy_model_fallthrough: bool,
) -> anyhow::Result<()> {
    let compiler = Compiler::new(CompileOptions {
        legacy_model_fallthrough,
    });

    let json = if canonical {
        serde_json::to_string_pretty(&compiler.compile(declaration)?)?
    } else {
        let lowered = process_binding_declaration(&compiler, declaration, id, &UniqueIds::new())?;
        serde_json::to_string_pretty(&lowered.into_bindings())?
    };

    println!("{}", json);
    Ok(())
}

fn normalize(declaration: &str) -> anyhow::Result<()> {
    let spec = Compiler::default().compile(declaration)?;
    println!("{}", spec);
    Ok(())
}

/// CLI flags layered over the options file
struct Overrides {
    bind_attribute: Option<String>,
    model_name: Option<String>,
    model: Option<String>,
    skip_invalid: bool,
}

fn parse_view(
    file: &Path,
    config: Option<&Path>,
    overrides: Overrides,
    registrations: bool,
    write_ids: bool,
) -> anyhow::Result<()> {
    let mut options = match config {
        Some(path) => ParseOptions::from_yaml_file(path)?,
        None => ParseOptions::default(),
    };

    if overrides.model.is_some() {
        options.optional_model = overrides.model;
    }
    if overrides.bind_attribute.is_some() || overrides.model_name.is_some() {
        let mut bind = options.bind_options();
        if let Some(attribute) = overrides.bind_attribute {
            bind.bind_attribute = attribute;
        }
        if overrides.model_name.is_some() {
            bind.model_name = overrides.model_name;
        }
        options.optional_bind_options = Some(bind);
    }
    if overrides.skip_invalid {
        options.on_error = ErrorPolicy::Skip;
    }

    let mut view = View::from_file(file)
        .with_context(|| format!("Failed to load view document {}", file.display()))?;
    let mut engine = RecordingEngine::new();
    let report = stickit_parse(&mut view, &mut engine, &options, &UniqueIds::new())?;

    for skipped in &report.skipped {
        eprintln!(
            "{} element #{} skipped: {}",
            "⚠".yellow(),
            skipped.index,
            skipped.error
        );
    }

    if write_ids && !report.generated_ids.is_empty() {
        let content = match file.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(&view)?,
            _ => serde_yaml::to_string(&view)?,
        };
        fs::write(file, content)
            .with_context(|| format!("Failed to write view document {}", file.display()))?;
    }

    let json = if registrations {
        serde_json::to_string_pretty(&engine.registrations)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);
    Ok(())
}
