//! CLI subcommands — init, validate, plan, generate, schema, completions.

use crate::core::composer::CartesianComposer;
use crate::core::generators::{self, FieldGenerator};
use crate::core::{parser, types};
use crate::manifest::{render, writer};
use crate::schema::{crd, filter};
use clap::{CommandFactory, Parser, Subcommand};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

/// Top-level CLI.
#[derive(Parser, Debug)]
#[command(
    name = "crisol",
    version,
    about = "Combinatorial custom-resource generator — exhaustive, schema-filtered test manifests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new crisol project
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate crisol.yaml without generating anything
    Validate {
        /// Path to crisol.yaml
        #[arg(short, long, default_value = "crisol.yaml")]
        file: PathBuf,
    },

    /// Show fields in odometer order with cycle lengths and the total count
    Plan {
        /// Path to crisol.yaml
        #[arg(short, long, default_value = "crisol.yaml")]
        file: PathBuf,
    },

    /// Enumerate every combination and write one manifest per record
    Generate {
        /// Path to crisol.yaml
        #[arg(short, long, default_value = "crisol.yaml")]
        file: PathBuf,

        /// Override the configured output directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Stream manifests to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Print the JSON Schema of the crisol.yaml format
    Schema,

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Plan { file } => cmd_plan(&file),
        Commands::Generate {
            file,
            out_dir,
            stdout,
        } => cmd_generate(&file, out_dir.as_deref(), stdout),
        Commands::Schema => cmd_schema(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "crisol", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let config_path = path.join("crisol.yaml");
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()));
    }

    std::fs::create_dir_all(path)
        .map_err(|e| format!("cannot create dir {}: {}", path.display(), e))?;

    let template = r#"version: "1.0"

target:
  api_version: example.com/v1
  kind: Widget
  namespace: default

fields:
  replicas:
    type: repeat
    value: "3"
    kind: integer
    count: 1
  address:
    type: cidr
    subnet: 10.0.0.0/30

output:
  dir: manifests
"#;
    std::fs::write(&config_path, template)
        .map_err(|e| format!("cannot write {}: {}", config_path.display(), e))?;

    println!("Initialized crisol project at {}", path.display());
    println!("  Created: {}", config_path.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let fields = prepare_fields(&config, file)?;

    println!(
        "OK: {} @ {} ({} of {} configured fields usable)",
        config.target.kind,
        config.target.api_version,
        fields.len(),
        config.fields.len()
    );
    Ok(())
}

fn cmd_plan(file: &Path) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let fields = prepare_fields(&config, file)?;
    let composer = build_composer(&fields)?;

    println!(
        "Plan: {} @ {} ({} fields)",
        config.target.kind,
        config.target.api_version,
        fields.len()
    );
    println!();

    let width = fields.keys().map(|n| n.len()).max().unwrap_or(0);
    for (name, cycle) in composer.cycles() {
        let generator = match fields.get(&name) {
            Some(spec) => spec.generator.to_string(),
            None => "?".to_string(),
        };
        println!("  {:<width$}  {:<6}  cycle {}", name, generator, cycle);
    }

    println!();
    println!("Total combinations: {}", composer.cardinality());
    Ok(())
}

fn cmd_generate(file: &Path, out_dir: Option<&Path>, to_stdout: bool) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let fields = prepare_fields(&config, file)?;
    let mut composer = build_composer(&fields)?;

    tracing::info!(
        "enumerating {} combinations of {} fields",
        composer.cardinality(),
        fields.len()
    );

    let dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.dir));

    let mut written = 0u64;
    while let Some(record) = composer.next_record() {
        written += 1;
        let manifest = render::render_record(&config.target, &record, written)?;
        if to_stdout {
            let yaml = serde_yaml_ng::to_string(&manifest)
                .map_err(|e| format!("serialize error: {}", e))?;
            println!("---");
            print!("{}", yaml);
        } else {
            let path = writer::write_manifest(&dir, &manifest)?;
            tracing::debug!("wrote {}", path.display());
        }
    }

    if !to_stdout {
        println!("Generated {} manifest(s) in {}", written, dir.display());
    }
    Ok(())
}

fn cmd_schema() -> Result<(), String> {
    let schema = schemars::schema_for!(types::CrisolConfig);
    let json =
        serde_json::to_string_pretty(&schema).map_err(|e| format!("serialize error: {}", e))?;
    println!("{}", json);
    Ok(())
}

/// Parse and validate a crisol config file, returning errors if invalid.
fn parse_and_validate(file: &Path) -> Result<types::CrisolConfig, String> {
    let config = parser::parse_config_file(file)?;
    let errors = parser::validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err(format!("{} validation error(s)", errors.len()))
}

/// Resolve the usable field set: all configured fields, restricted to the
/// CRD schema when one is configured. The schema path is taken relative to
/// the config file's directory.
fn prepare_fields(
    config: &types::CrisolConfig,
    config_path: &Path,
) -> Result<IndexMap<String, types::FieldSpec>, String> {
    let schema = match &config.target.schema {
        Some(schema) => schema,
        None => return Ok(config.fields.clone()),
    };
    let version = config
        .target
        .schema_version
        .as_deref()
        .ok_or_else(|| "target.schema_version is required when target.schema is set".to_string())?;

    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    let crd = crd::load_crd(&base.join(schema))?;
    let legal: FxHashSet<String> = crd::spec_field_names(&crd, version)?.into_iter().collect();

    Ok(filter::filter_fields(config.fields.clone(), &legal))
}

/// Build one generator per field and compose them.
fn build_composer(
    fields: &IndexMap<String, types::FieldSpec>,
) -> Result<CartesianComposer, String> {
    let mut built: IndexMap<String, Box<dyn FieldGenerator>> =
        IndexMap::with_capacity(fields.len());
    for (name, spec) in fields {
        built.insert(name.clone(), generators::build_field_generator(name, spec)?);
    }
    Ok(CartesianComposer::new(built))
}

// ============================================================================
// Tests
// ============================================================================
