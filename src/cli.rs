use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use bids2nf_docs_core::config::DocumentOptions;
use bids2nf_docs_core::contract::{MetadataSource, StaticMetadata};
use bids2nf_docs_core::generate::generate;
use bids2nf_docs_core::schema::Schema;

use crate::example_data::FsExampleSource;
use crate::load_config::{load_config, DocsConfig};
use crate::metadata::{FileMetadataSource, HttpMetadataSource};
use crate::phantom::phantomize;

/// CLI for bids2nf-docs: generate the supported-suffix reference page.
#[derive(Parser)]
#[clap(
    name = "bids2nf-docs",
    version,
    about = "Generate bids2nf supported-suffix documentation from its YAML configuration"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the suffix configuration into a Markdown reference page
    Generate {
        /// Optional YAML settings file; flags override its values
        #[clap(long)]
        config: Option<PathBuf>,
        /// Suffix configuration to document [default: bids2nf.yaml]
        #[clap(long)]
        schema: Option<PathBuf>,
        /// Markdown file to write [default: docs/supported.md]
        #[clap(long)]
        output: Option<PathBuf>,
        /// URL of the published BIDS schema JSON
        #[clap(long)]
        metadata_url: Option<String>,
        /// Local BIDS schema JSON to read instead of fetching
        #[clap(long)]
        metadata_file: Option<PathBuf>,
        /// Skip external metadata entirely
        #[clap(long)]
        offline: bool,
        /// Document title
        #[clap(long)]
        title: Option<String>,
    },
    /// Copy a directory tree's layout with empty files
    Phantomize {
        /// Existing directory to mirror
        source: PathBuf,
        /// Where the empty copy is created
        phantom: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Generate {
            config,
            schema,
            output,
            metadata_url,
            metadata_file,
            offline,
            title,
        } => {
            let mut settings = match config {
                Some(path) => load_config(path)?,
                None => DocsConfig::default(),
            }
            .with_env_overrides();

            if let Some(schema) = schema {
                settings.schema = schema;
            }
            if let Some(output) = output {
                settings.output = output;
            }
            if let Some(url) = metadata_url {
                settings.metadata.url = url;
            }
            if let Some(file) = metadata_file {
                settings.metadata.file = Some(file);
            }
            if offline {
                settings.metadata.offline = true;
            }
            if let Some(title) = title {
                settings.title = Some(title);
            }

            run_generate(&settings).await?;
            println!(
                "Generated {} from {}",
                settings.output.display(),
                settings.schema.display()
            );
            Ok(())
        }
        Commands::Phantomize { source, phantom } => {
            let created = phantomize(&source, &phantom)?;
            info!(files = created, "Phantom tree written");
            println!("Phantom structure created at {}", phantom.display());
            Ok(())
        }
    }
}

fn metadata_source(config: &DocsConfig) -> Result<Box<dyn MetadataSource>> {
    let metadata = &config.metadata;
    if metadata.offline {
        info!("Offline mode: external metadata disabled");
        return Ok(Box::new(StaticMetadata::default()));
    }
    if let Some(file) = &metadata.file {
        return Ok(Box::new(FileMetadataSource::new(file.clone())));
    }
    let source = HttpMetadataSource::new(
        metadata.url.clone(),
        Duration::from_secs(metadata.timeout_secs),
    )?;
    Ok(Box::new(source))
}

/// Reads the schema, renders it and writes the output file.
pub async fn run_generate(config: &DocsConfig) -> Result<()> {
    if !config.schema.is_file() {
        anyhow::bail!("Schema file {} not found", config.schema.display());
    }
    let text = fs::read_to_string(&config.schema)
        .with_context(|| format!("Failed to read schema {}", config.schema.display()))?;
    let schema = Schema::from_yaml_str(&text)
        .with_context(|| format!("Failed to parse schema {}", config.schema.display()))?;

    let base_dir = config
        .schema
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let examples = FsExampleSource::new(base_dir);
    let metadata = metadata_source(config)?;

    let mut options = DocumentOptions {
        source_name: config
            .schema
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.schema.display().to_string()),
        ..DocumentOptions::default()
    };
    if let Some(title) = &config.title {
        options.title = title.clone();
    }

    let document = generate(&schema, metadata.as_ref(), &examples, &options).await;
    if !document.report.skipped.is_empty() {
        warn!(skipped = ?document.report.skipped, "Some entries match no set shape and were left out");
    }

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    fs::write(&config.output, &document.markdown)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    info!(
        output = %config.output.display(),
        cards = document.report.total_cards(),
        "Documentation written"
    );
    Ok(())
}
