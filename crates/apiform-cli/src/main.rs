use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde_json::{Map, Value};

use apiform_core::catalog::{Catalog, group_by_section};
use apiform_core::config::{self, ApiformConfig, CONFIG_FILE_NAME};
use apiform_core::form::{build_endpoint_request, defaults_from_example, form_fields};
use apiform_core::parse;
use apiform_core::workflow::{WorkflowAssembler, WorkflowInputs, WorkflowLibrary, parse_assignment};

#[derive(Parser)]
#[command(
    name = "apiform",
    about = "Endpoint catalog and request builder for a Markdown API reference",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the endpoint catalog from the Markdown reference
    Build {
        /// Markdown document to read
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the catalog JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List catalog endpoints grouped by section
    Endpoints {
        /// Catalog to read
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only endpoints whose title, path, or method contain this term
        #[arg(short, long)]
        search: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: ListFormat,
    },

    /// Build the request snippet for a single endpoint
    Request {
        /// Endpoint id (see `apiform endpoints`)
        endpoint: String,

        /// Field value as key=value; may be repeated
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Catalog to read
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the form fields instead of the request
        #[arg(long)]
        fields: bool,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: SnippetFormat,
    },

    /// List the available workflows
    Workflows,

    /// Show the input fields a workflow uses
    Inputs {
        /// Workflow id (see `apiform workflows`)
        workflow: String,

        /// Catalog to read
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Build the request snippets for every step of a workflow
    Workflow {
        /// Workflow id (see `apiform workflows`)
        workflow: String,

        /// Input value as key=value; may be repeated
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Start from empty inputs instead of the built-in defaults
        #[arg(long)]
        no_defaults: bool,

        /// Catalog to read
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: SnippetFormat,
    },

    /// Initialize a new apiform configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum ListFormat {
    Text,
    Yaml,
    Json,
}

#[derive(Clone, ValueEnum)]
enum SnippetFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => cmd_build(input, output),

        Commands::Endpoints {
            catalog,
            search,
            format,
        } => cmd_endpoints(catalog, search, format),

        Commands::Request {
            endpoint,
            set,
            catalog,
            fields,
            format,
        } => cmd_request(&endpoint, &set, catalog, fields, format),

        Commands::Workflows => cmd_workflows(),

        Commands::Inputs { workflow, catalog } => cmd_inputs(&workflow, catalog),

        Commands::Workflow {
            workflow,
            set,
            no_defaults,
            catalog,
            format,
        } => cmd_workflow(&workflow, &set, no_defaults, catalog, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apiform", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the project config from the current directory, then apply env overrides.
fn load_project_config() -> Result<ApiformConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)
        .map_err(|e| anyhow::anyhow!(e))?
        .unwrap_or_default();
    Ok(cfg.with_env_overrides())
}

fn load_catalog(cfg: &ApiformConfig, path: Option<PathBuf>) -> Result<Catalog> {
    let path = path.unwrap_or_else(|| cfg.catalog_path());
    Catalog::load(&path).with_context(|| {
        format!(
            "failed to load catalog {} (run `apiform build` first)",
            path.display()
        )
    })
}

fn load_library(cfg: &ApiformConfig) -> Result<WorkflowLibrary> {
    match &cfg.workflows {
        Some(path) => {
            log::debug!("loading workflow library from {path}");
            WorkflowLibrary::load(Path::new(path))
                .with_context(|| format!("failed to load workflow library {path}"))
        }
        None => WorkflowLibrary::builtin().context("built-in workflow library is invalid"),
    }
}

fn parse_assignments(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|a| parse_assignment(a).map_err(|e| anyhow::anyhow!(e)))
        .collect()
}

fn cmd_build(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = load_project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.doc_path));
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let text = parse::read_document(&input)?;
    let catalog = Catalog::from_document(&text, &cfg.extract);
    catalog
        .write(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!(
        "Extracted {} endpoints from {} → {}",
        catalog.endpoints.len(),
        input.display(),
        output.display()
    );
    Ok(())
}

fn cmd_endpoints(catalog: Option<PathBuf>, search: Option<String>, format: ListFormat) -> Result<()> {
    let cfg = load_project_config()?;
    let catalog = load_catalog(&cfg, catalog)?;
    let endpoints = catalog.filter(search.as_deref().unwrap_or_default());

    match format {
        ListFormat::Text => {
            for (section, group) in group_by_section(endpoints.iter().copied()) {
                println!("{section}");
                for endpoint in group {
                    println!(
                        "  {:<7} {:<50} {}",
                        endpoint.method, endpoint.path, endpoint.id
                    );
                }
            }
            eprintln!("{} endpoints", endpoints.len());
        }
        ListFormat::Yaml => {
            print!("{}", serde_yaml_ng::to_string(&endpoints)?);
        }
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&endpoints)?);
        }
    }
    Ok(())
}

fn cmd_request(
    endpoint_id: &str,
    set: &[String],
    catalog: Option<PathBuf>,
    fields: bool,
    format: SnippetFormat,
) -> Result<()> {
    let cfg = load_project_config()?;
    let catalog = load_catalog(&cfg, catalog)?;
    let Some(endpoint) = catalog.get(endpoint_id) else {
        anyhow::bail!("unknown endpoint `{endpoint_id}`. Run `apiform endpoints` to list them.");
    };

    if fields {
        for field in form_fields(endpoint) {
            let marker = if field.required { "*" } else { " " };
            println!("{marker} {:<24} {}", field.name, field.hint);
        }
        return Ok(());
    }

    let mut values: Map<String, Value> = defaults_from_example(endpoint);
    for (key, value) in parse_assignments(set)? {
        values.insert(key, Value::String(value));
    }

    let rendered = build_endpoint_request(endpoint, &values).render()?;
    match format {
        SnippetFormat::Yaml => print!("{}", rendered.yaml),
        SnippetFormat::Json => println!("{}", rendered.json),
    }
    Ok(())
}

fn cmd_workflows() -> Result<()> {
    let cfg = load_project_config()?;
    let library = load_library(&cfg)?;
    for workflow in &library.workflows {
        println!("{:<32} {}", workflow.id, workflow.name);
    }
    Ok(())
}

fn cmd_inputs(workflow_id: &str, catalog: Option<PathBuf>) -> Result<()> {
    let cfg = load_project_config()?;
    let catalog = load_catalog(&cfg, catalog)?;
    let library = load_library(&cfg)?;
    let workflow = library.get(workflow_id)?;
    let assembler = WorkflowAssembler::new(&catalog, &library);

    for field in assembler.input_fields(workflow) {
        let default = library
            .default_inputs
            .get(&field)
            .map(|v| format!(" [default: {v}]"))
            .unwrap_or_default();
        let hint = assembler.input_hint(workflow, &field);
        println!("{field}{default}");
        if !hint.is_empty() {
            println!("    {hint}");
        }
    }
    Ok(())
}

fn cmd_workflow(
    workflow_id: &str,
    set: &[String],
    no_defaults: bool,
    catalog: Option<PathBuf>,
    format: SnippetFormat,
) -> Result<()> {
    let cfg = load_project_config()?;
    let catalog = load_catalog(&cfg, catalog)?;
    let library = load_library(&cfg)?;
    let workflow = library.get(workflow_id)?;

    let mut inputs = if no_defaults {
        WorkflowInputs::new()
    } else {
        library.default_inputs()
    };
    inputs.extend(parse_assignments(set)?);

    let snippets = WorkflowAssembler::new(&catalog, &library).build_snippets(workflow, &inputs)?;
    eprintln!("{}: {} steps", workflow.name, snippets.len());

    for (index, snippet) in snippets.iter().enumerate() {
        match format {
            SnippetFormat::Yaml => {
                println!("# {}. {}", index + 1, snippet.step_label);
                print!("{}", snippet.yaml);
                if index + 1 < snippets.len() {
                    println!("---");
                }
            }
            SnippetFormat::Json => {
                println!("// {}. {}", index + 1, snippet.step_label);
                println!("{}", snippet.json);
            }
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
