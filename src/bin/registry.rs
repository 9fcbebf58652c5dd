//! Schema Registry CLI
//!
//! Query the configured schema registry.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use resource_schemas::{builtin, SchemaConfig, Schemas};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-registry")]
#[command(about = "Query the resource schema registry")]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Use only the compiled-in schemas, ignoring config files
    #[arg(long, global = true, conflicts_with = "config")]
    builtin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List collection names
    List {
        /// Keep registration order instead of sorting
        #[arg(long)]
        insertion_order: bool,
    },

    /// List distinct resource kinds
    Kinds,

    /// Show a collection by name
    Find {
        /// Collection name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a kind (case-insensitive) to its collection
    Kind {
        /// Resource kind
        kind: String,
        /// Restrict to an API group (use "" for the core group)
        #[arg(short, long)]
        group: Option<String>,
    },

    /// List disabled collections
    Disabled,

    /// Validate every schema
    Validate,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load(cli: &Cli) -> anyhow::Result<Schemas> {
    if cli.builtin {
        return Ok(builtin::all().clone());
    }
    let config = SchemaConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    config.build_schemas().context("assembling schema registry")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let schemas = load(&cli)?;

    match cli.command {
        Commands::List { insertion_order } => {
            if insertion_order {
                schemas.for_each(|s| {
                    println!("{}", s.name());
                    false
                });
            } else {
                for name in &schemas.collection_names() {
                    println!("{}", name);
                }
            }
            Ok(())
        }

        Commands::Kinds => {
            for kind in schemas.kinds() {
                println!("{}", kind);
            }
            Ok(())
        }

        Commands::Find { name, json } => {
            let Some(schema) = schemas.find(&name) else {
                bail!("collection {:?} not found{}", name, did_you_mean(&schemas, &name));
            };

            if json {
                println!("{}", serde_json::to_string_pretty(schema)?);
            } else {
                let resource = schema.resource();
                println!("Name:       {}", schema.name());
                println!("APIVersion: {}", resource.api_version());
                println!("Kind:       {}", resource.kind());
                println!("Plural:     {}", resource.plural());
                println!("Proto:      {}", resource.proto());
                println!(
                    "Scope:      {}",
                    if resource.is_cluster_scoped() { "Cluster" } else { "Namespaced" }
                );
                println!("Disabled:   {}", schema.is_disabled());
            }
            Ok(())
        }

        Commands::Kind { kind, group } => {
            let found = match &group {
                Some(group) => schemas.find_by_group_and_kind(group, &kind),
                None => schemas.find_by_kind(&kind),
            };
            match found {
                Some(schema) => {
                    println!("{}", schema.name());
                    Ok(())
                }
                None => bail!("no collection for kind {:?}{}", kind, did_you_mean(&schemas, &kind)),
            }
        }

        Commands::Disabled => {
            for name in &schemas.disabled_collection_names() {
                println!("{}", name);
            }
            Ok(())
        }

        Commands::Validate => match schemas.validate() {
            Ok(()) => {
                println!("✅ {} schemas valid", schemas.len());
                Ok(())
            }
            Err(errors) => bail!("{errors}"),
        },
    }
}

fn did_you_mean(schemas: &Schemas, query: &str) -> String {
    let suggestions = schemas.suggest(query, 3);
    if suggestions.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = suggestions.iter().map(|n| n.as_str()).collect();
    format!(" (did you mean: {}?)", names.join(", "))
}
