//! Transaction CLI commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use super::{CliContext, FilterArgs};
use crate::display::{format_page_footer, format_reclassified, format_transaction_table};
use crate::error::{DashError, DashResult};
use crate::export::{write_export, ExportFormat, TransactionExport};
use crate::models::TransactionId;
use crate::services::TransactionFeed;

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions for a month
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Number of pages to fetch
        #[arg(short, long, default_value = "1", conflicts_with = "all")]
        pages: usize,
        /// Fetch every page
        #[arg(short, long)]
        all: bool,
    },
    /// Change a transaction's category
    Reclassify {
        /// Transaction ID
        id: String,
        /// New category
        category: String,
    },
    /// Export transactions for a month
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn handle_transaction_command(
    ctx: &mut CliContext,
    cmd: TransactionCommands,
) -> DashResult<()> {
    match cmd {
        TransactionCommands::List {
            filters,
            pages,
            all,
        } => handle_list(ctx, filters, if all { None } else { Some(pages.max(1)) }),
        TransactionCommands::Reclassify { id, category } => handle_reclassify(ctx, id, category),
        TransactionCommands::Export {
            filters,
            format,
            output,
        } => handle_export(ctx, filters, format, output),
    }
}

fn fetch(
    ctx: &mut CliContext,
    filters: FilterArgs,
    max_pages: Option<usize>,
) -> DashResult<TransactionFeed> {
    let client = ctx.authed_client()?;
    let tenant = ctx.session.require_tenant()?;
    let filters = filters.resolve(ctx.session.period())?;

    let mut feed = TransactionFeed::new(filters);
    let result = feed.load_all(&client, &tenant, max_pages);
    ctx.guard(result)?;
    Ok(feed)
}

fn handle_list(
    ctx: &mut CliContext,
    filters: FilterArgs,
    max_pages: Option<usize>,
) -> DashResult<()> {
    let feed = fetch(ctx, filters, max_pages)?;

    println!("{}", feed.filters().summary());
    print!(
        "{}",
        format_transaction_table(feed.items(), &ctx.settings.date_format)
    );
    if !feed.is_empty() {
        print!("{}", format_page_footer(feed.len(), feed.has_more()));
    }
    Ok(())
}

fn handle_reclassify(ctx: &mut CliContext, id: String, category: String) -> DashResult<()> {
    let category = category.trim().to_string();
    if category.is_empty() {
        return Err(DashError::Validation("Category cannot be empty".into()));
    }

    let client = ctx.authed_client()?;
    let tenant = ctx.session.require_tenant()?;

    let result = client.reclassify(&tenant, &TransactionId::new(id.trim()), &category);
    let updated = ctx.guard(result)?;

    print!("{}", format_reclassified(&updated));
    Ok(())
}

fn handle_export(
    ctx: &mut CliContext,
    filters: FilterArgs,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> DashResult<()> {
    let feed = fetch(ctx, filters, None)?;
    let tenant = ctx.session.require_tenant()?;
    let count = feed.len();

    let export = TransactionExport::new(
        tenant,
        feed.filters().clone(),
        feed.items().to_vec(),
        feed.is_complete(),
    );

    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                DashError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(format, &export, &mut writer)?;
            writer
                .flush()
                .map_err(|e| DashError::Export(e.to_string()))?;
            println!(
                "Exported {} transactions as {} to: {}",
                count,
                format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(format, &export, &mut writer)?;
        }
    }

    Ok(())
}
