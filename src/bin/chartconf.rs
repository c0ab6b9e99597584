//! chartconf CLI: migrate and adjust chart configurations.
//!
//! Usage:
//!   chartconf migrate <path> [--kind chart|document] [--from V] [--to V]
//!                            [--data-source-url URL] [--cube-map path]
//!   chartconf adjust <path> --to <chartType> --components <path> [--adding-cube]
//!   chartconf versions [--kind chart|document]
//!   chartconf schema

use chartconf::adjust::AdjustOutcome;
use chartconf::document::{read_document, render_document, Format};
use chartconf::migrate::{
    chart_config_chain, decode_chart_config, document_chain, CachingResolver, DataSource,
    MigrateOptions, MigrationChain, MigrationProps, MigrationResult, StaticCubeResolver,
};
use chartconf::{
    adjust_chart_type_with_report, AdjustOptions, ChartConfig, ChartType, ComponentCatalog,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "chartconf",
    version,
    about = "Chart configuration adjustment and schema migration"
)]
struct Cli {
    /// Log every step and adjuster decision
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Chart,
    Document,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate a stored document to another schema version
    Migrate {
        /// JSON or YAML document
        path: PathBuf,
        #[arg(long, value_enum, default_value = "chart")]
        kind: Kind,
        /// Version to start from, instead of the document's own
        #[arg(long)]
        from: Option<String>,
        /// Target version, the current one by default
        #[arg(long)]
        to: Option<String>,
        /// SPARQL endpoint the document's cubes live in
        #[arg(long)]
        data_source_url: Option<String>,
        /// JSON or YAML map of versioned to unversioned cube iris
        #[arg(long)]
        cube_map: Option<PathBuf>,
    },
    /// Switch a chart configuration to another chart type
    Adjust {
        /// Chart configuration at the current version
        path: PathBuf,
        #[arg(long)]
        to: ChartType,
        /// Component catalog with dimensions and measures
        #[arg(long)]
        components: PathBuf,
        /// A cube is being added in the same edit
        #[arg(long)]
        adding_cube: bool,
    },
    /// List the versions of a migration chain
    Versions {
        #[arg(long, value_enum, default_value = "chart")]
        kind: Kind,
    },
    /// Print the JSON Schema of the current chart configuration
    Schema,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn chain(kind: Kind) -> MigrationResult<MigrationChain> {
    match kind {
        Kind::Chart => chart_config_chain(),
        Kind::Document => document_chain(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match render_document(value, Format::Json) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn migration_props(
    data_source_url: Option<String>,
    cube_map: Option<&Path>,
) -> Result<MigrationProps, String> {
    let mut props = MigrationProps::new();
    if let Some(url) = data_source_url {
        props = props.with_data_source(DataSource::sparql(url));
    }
    if let Some(path) = cube_map {
        let cubes: HashMap<String, String> = read_document(path)
            .map_err(|e| format!("cannot read cube map '{}': {}", path.display(), e))?;
        let resolver: StaticCubeResolver = cubes.into_iter().collect();
        props = props.with_resolver(Arc::new(CachingResolver::new(resolver)));
    }
    Ok(props)
}

async fn cmd_migrate(
    path: &Path,
    kind: Kind,
    from: Option<String>,
    to: Option<String>,
    props: MigrationProps,
) -> i32 {
    let doc: Value = match read_document(path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path.display(), e);
            return 1;
        }
    };
    let chain = match chain(kind) {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut options = MigrateOptions::new().with_props(props);
    options.from_version = from;
    options.to_version = to;

    match chain.migrate(doc, &options).await {
        Ok(migrated) => print_json(&migrated),
        Err(e) => {
            eprintln!("Error: could not migrate '{}': {}", path.display(), e);
            1
        }
    }
}

fn cmd_adjust(path: &Path, to: ChartType, components: &Path, adding_cube: bool) -> i32 {
    let chart = match read_document::<Value>(path)
        .map_err(|e| e.to_string())
        .and_then(|doc| decode_chart_config(doc).map_err(|e| e.to_string()))
    {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error: cannot read chart '{}': {}", path.display(), e);
            return 1;
        }
    };
    let catalog: ComponentCatalog = match read_document(components) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: cannot read components '{}': {}", components.display(), e);
            return 1;
        }
    };

    let options = AdjustOptions::default().with_adding_new_cube(adding_cube);
    let (adjusted, report) = match adjust_chart_type_with_report(
        &chart,
        to,
        &catalog.dimensions,
        &catalog.measures,
        &options,
    ) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    for entry in &report.entries {
        match entry.outcome {
            AdjustOutcome::Adjusted {
                target,
                via_override,
            } => debug!(path = %entry.path, %target, via_override, "adjusted"),
            AdjustOutcome::Dropped => info!(path = %entry.path, "dropped"),
            AdjustOutcome::Unrecognized => info!(path = %entry.path, "no adjuster"),
        }
    }
    print_json::<ChartConfig>(&adjusted)
}

fn cmd_versions(kind: Kind) -> i32 {
    let chain = match chain(kind) {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    println!("{:<8}  {:<8}  {}", "FROM", "TO", "STEP");
    println!("{}", "-".repeat(48));
    for (from, to, description) in chain.steps() {
        println!("{:<8}  {:<8}  {}", from, to, description);
    }
    println!("current: {}", chain.current());
    0
}

fn cmd_schema() -> i32 {
    let schema = schemars::schema_for!(ChartConfig);
    print_json(&schema)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Migrate {
            path,
            kind,
            from,
            to,
            data_source_url,
            cube_map,
        } => match migration_props(data_source_url, cube_map.as_deref()) {
            Ok(props) => cmd_migrate(&path, kind, from, to, props).await,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::Adjust {
            path,
            to,
            components,
            adding_cube,
        } => cmd_adjust(&path, to, &components, adding_cube),
        Commands::Versions { kind } => cmd_versions(kind),
        Commands::Schema => cmd_schema(),
    };
    std::process::exit(code);
}
