//! odschema - ODISSEI schema harvester CLI
//!
//! Command-line entry point for fetching, serving and inspecting schema documents

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use odissei_schema::config::HarvestConfig;
use odissei_schema::schema::{load_snapshot, save_snapshot, SchemaAggregator, SchemaDocument, TermCollection};
use odissei_schema::uri::{local_name_of, namespace_of, namespace_short_name};
use odissei_schema::vocabulary::{classify_group, is_domain_specific_class, is_domain_specific_predicate};
use odissei_schema::{LastUpdated, RefreshOutcome, RefreshScheduler, SparqlClient};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "odschema")]
#[command(version)]
#[command(about = "ODISSEI SPARQL schema harvester", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the schema once and write it as JSON
    Fetch {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Keep the schema fresh from the live endpoint until Ctrl+C
    Serve {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print a summary of a snapshot file
    Show {
        /// Snapshot JSON file
        snapshot: PathBuf,
        /// Also list domain-specific classes and predicates
        #[arg(long)]
        terms: bool,
    },
    /// Show how a URI is decomposed and classified
    Classify {
        /// Class or predicate URI
        uri: String,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Harvester config file (YAML)
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// SPARQL endpoint (overrides config)
    #[arg(long, short)]
    endpoint: Option<String>,
    /// LIMIT for the predicate and class queries (overrides config)
    #[arg(long)]
    limit: Option<usize>,
    /// Refresh interval in seconds (overrides config)
    #[arg(long)]
    interval: Option<u64>,
}

impl SourceArgs {
    fn resolve(&self) -> Result<HarvestConfig> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::load(path)
                .with_context(|| format!("loading harvester config {}", path.display()))?,
            None => HarvestConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.spec.endpoint = endpoint.clone();
        }
        if let Some(limit) = self.limit {
            config.spec.query_limit = limit;
        }
        if let Some(interval) = self.interval {
            config.spec.refresh_interval_secs = interval;
        }

        config.validate().context("invalid harvester settings")?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Fetch { source, output } => handle_fetch(&source, output).await?,
        Commands::Serve { source } => handle_serve(&source).await?,
        Commands::Show { snapshot, terms } => handle_show(&snapshot, terms)?,
        Commands::Classify { uri } => handle_classify(&uri),
    }

    Ok(())
}

async fn handle_fetch(source: &SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let config = source.resolve()?;
    let client = SparqlClient::new(&config.spec.endpoint, config.request_timeout(), &config.spec.user_agent)?;
    let aggregator = SchemaAggregator::new(client).with_limit(config.spec.query_limit);

    let mut document = aggregator
        .build()
        .await
        .with_context(|| format!("fetching schema from {}", config.spec.endpoint))?;
    document.metadata.last_updated = Some(LastUpdated::At(chrono::Local::now()).to_string());

    match output {
        Some(path) => {
            save_snapshot(&document, &path)?;
            eprintln!(
                "✓ Wrote {} classes and {} predicates to {}",
                document.metadata.total_classes,
                document.metadata.total_predicates,
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&document)?),
    }

    Ok(())
}

async fn handle_serve(source: &SourceArgs) -> Result<()> {
    let config = source.resolve()?;
    info!("[Serve] Starting schema harvester for {}", config.spec.endpoint);

    let scheduler = RefreshScheduler::from_config(&config)?;
    let (handle, initial) = scheduler.start().await;
    report_outcome(&initial);
    info!(
        "[Serve] Serving {} classes / {} predicates (last updated: {})",
        handle.current_document().metadata.total_classes,
        handle.current_document().metadata.total_predicates,
        handle.last_updated()
    );

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::mpsc::unbounded_channel::<()>();
    ctrlc::set_handler(move || {
        eprintln!("[Serve] Received SIGTERM/SIGINT, shutting down gracefully...");
        let _ = shutdown_tx.send(());
    })?;

    shutdown_rx.recv().await;
    handle.shutdown().await;

    eprintln!("[Serve] Shutdown complete");
    Ok(())
}

fn report_outcome(outcome: &RefreshOutcome) {
    match outcome {
        RefreshOutcome::Updated { classes, predicates, at } => {
            info!("[Serve] Initial fetch: {} classes, {} predicates at {}", classes, predicates, at)
        }
        RefreshOutcome::Failed { kind, message } => {
            info!("[Serve] Initial fetch failed ({}): {}", kind, message)
        }
    }
}

fn handle_show(path: &Path, terms: bool) -> Result<()> {
    let document = load_snapshot(path).with_context(|| format!("loading snapshot {}", path.display()))?;
    print_summary(&document);

    if terms {
        print_terms("Domain Classes", &document.classes);
        print_terms("Domain Predicates", &document.predicates);
    }
    Ok(())
}

fn print_summary(document: &SchemaDocument) {
    let metadata = &document.metadata;
    println!("{}", metadata.title.bold());
    if !metadata.endpoint.is_empty() {
        println!("  Endpoint: {}", metadata.endpoint);
    }
    println!("  Last updated: {}", metadata.last_updated.as_deref().unwrap_or("Never"));
    println!();
    println!("  Total Classes:       {}", metadata.total_classes);
    println!("  Total Predicates:    {}", metadata.total_predicates);
    println!("  Domain Classes:      {}", metadata.domain_specific_classes);
    println!("  Domain Predicates:   {}", metadata.domain_specific_predicates);
    println!("  ODISSEI Namespaces:  {}", document.namespaces.odissei_namespaces.len());
    println!("  All Namespaces:      {}", document.namespaces.all_namespaces.len());

    print_namespaces("ODISSEI Namespaces", &document.namespaces.odissei_namespaces);
    print_namespaces("Dataverse Namespaces", &document.namespaces.dataverse_namespaces);
}

fn print_namespaces(heading: &str, namespaces: &[String]) {
    println!("\n{}", heading.bold());
    if namespaces.is_empty() {
        println!("  (none)");
    }
    for namespace in namespaces {
        println!("  ● {:<24} {}", namespace_short_name(namespace).cyan(), namespace.dimmed());
    }
}

fn print_terms(heading: &str, collection: &TermCollection) {
    println!("\n{} ({})", heading.bold(), collection.domain_specific.len());
    for term in &collection.domain_specific {
        let namespace = namespace_of(&term.uri);
        println!(
            "  {:<32} {:<24} {}",
            term.local_name,
            namespace_short_name(&namespace),
            term.uri.dimmed()
        );
    }
}

fn handle_classify(uri: &str) {
    let namespace = namespace_of(uri);
    println!("URI:          {}", uri);
    println!("Namespace:    {}", namespace);
    println!("Short name:   {}", namespace_short_name(&namespace));
    println!("Local name:   {}", local_name_of(uri));
    println!("Group:        {}", classify_group(&namespace));
    println!("Domain class:     {}", yes_no(is_domain_specific_class(&namespace)));
    println!("Domain predicate: {}", yes_no(is_domain_specific_predicate(&namespace)));
}

fn yes_no(flag: bool) -> colored::ColoredString {
    if flag {
        "yes".green()
    } else {
        "no".normal()
    }
}
