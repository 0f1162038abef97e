use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use cfs_import::{import_into, AcceptAll, ImportFilter, ImportSummary, SkipHidden};
use cfs_store::{Backend, Capabilities, InMemoryBackend};
use cfs_tree::ContentFs;
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::cli::*;
use crate::config::CliConfig;

pub async fn run_command(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Import(args) => cmd_import(args, &config, format).await,
        Command::Ls(args) => cmd_ls(args, &config, format).await,
        Command::Cat(args) => cmd_cat(args, &config, format).await,
        Command::Hashes(args) => cmd_hashes(args, &config, format).await,
        Command::Push(args) => cmd_push(args, &config, format).await,
    }
}

/// Import `source` into a fresh in-memory store backed by `remote`.
async fn open(
    source: &SourceArgs,
    config: &CliConfig,
    remote: Arc<dyn Backend>,
) -> anyhow::Result<(ContentFs, ImportSummary)> {
    let fs = ContentFs::builder(Arc::new(InMemoryBackend::new()), remote)
        .config(config.store.clone())
        .build()?;
    let filter: &dyn ImportFilter = if config.import.skip_hidden && !source.hidden {
        &SkipHidden
    } else {
        &AcceptAll
    };
    debug!(dir = %source.dir.display(), hidden = source.hidden, "importing source directory");
    let summary = import_into(&fs, &source.dir, filter)
        .await
        .with_context(|| format!("importing {}", source.dir.display()))?;
    Ok((fs, summary))
}

fn print_json(value: serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn cmd_import(args: ImportArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (_, summary) = open(&args.source, config, Arc::new(InMemoryBackend::new())).await?;
    match format {
        OutputFormat::Json => print_json(json!({
            "root": summary.root.to_string(),
            "files": summary.files,
            "directories": summary.directories,
            "bytes": summary.bytes,
            "skipped": summary.skipped,
        })),
        OutputFormat::Text => {
            println!(
                "{} Imported {}",
                "✓".green().bold(),
                args.source.dir.display().to_string().bold()
            );
            println!("  Root: {}", summary.root.to_string().yellow());
            println!(
                "  {} files, {} directories, {} bytes",
                summary.files, summary.directories, summary.bytes
            );
            if summary.skipped > 0 {
                println!("  Skipped: {}", summary.skipped.to_string().dimmed());
            }
            Ok(())
        }
    }
}

async fn cmd_ls(args: LsArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (fs, _) = open(&args.source, config, Arc::new(InMemoryBackend::new())).await?;
    let listing = fs.ls_raw(&args.path).await?;
    match format {
        OutputFormat::Json => {
            let entries: serde_json::Map<String, serde_json::Value> = listing
                .iter()
                .map(|(name, target)| (name.to_string(), json!(target.to_string())))
                .collect();
            print_json(json!({ "path": args.path, "entries": entries }))
        }
        OutputFormat::Text => {
            for (name, target) in listing.iter() {
                let shown = if target.is_dir() {
                    format!("{name}/").blue().bold()
                } else {
                    name.normal()
                };
                if args.long {
                    println!("{}  {}", target.hash().short().dimmed(), shown);
                } else {
                    println!("{shown}");
                }
            }
            Ok(())
        }
    }
}

async fn cmd_cat(args: CatArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (fs, _) = open(&args.source, config, Arc::new(InMemoryBackend::new())).await?;
    let data = fs.get(&args.address).await?;
    match format {
        OutputFormat::Json => print_json(json!({
            "address": args.address,
            "size": data.len(),
            "content": String::from_utf8_lossy(&data),
        })),
        OutputFormat::Text => {
            let mut out = std::io::stdout().lock();
            out.write_all(&data)?;
            out.flush()?;
            Ok(())
        }
    }
}

async fn cmd_hashes(args: SourceArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (fs, summary) = open(&args, config, Arc::new(InMemoryBackend::new())).await?;
    let live = fs.active_hashes(None).await?;
    match format {
        OutputFormat::Json => print_json(json!({
            "root": summary.root.to_string(),
            "hashes": live,
        })),
        OutputFormat::Text => {
            for hash in &live {
                let marker = if hash == summary.root.hash() { " (root)".yellow() } else { "".normal() };
                println!("{hash}{marker}");
            }
            println!("{} objects", live.len().to_string().bold());
            Ok(())
        }
    }
}

async fn cmd_push(args: PushArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let capabilities = if args.no_missing {
        Capabilities::READ_WRITE
    } else {
        Capabilities::FULL
    };
    let remote = Arc::new(InMemoryBackend::new().with_capabilities(capabilities));
    let (fs, summary) = open(&args.source, config, remote.clone()).await?;
    let report = fs.push(None).await?;
    match format {
        OutputFormat::Json => print_json(json!({
            "root": summary.root.to_string(),
            "report": report,
        })),
        OutputFormat::Text => {
            println!(
                "{} Pushed {} objects ({} bytes) for root {}",
                "✓".green().bold(),
                report.objects_sent().to_string().bold(),
                report.bytes_transferred,
                summary.root.to_string().yellow()
            );
            let mode = if report.narrowed { "missing-only" } else { "full resend" };
            println!("  Mode: {}", mode.cyan());
            println!("  Remote now holds {} objects", remote.len());
            Ok(())
        }
    }
}
