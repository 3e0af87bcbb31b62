use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use study_cli::logging::redact_value;
use study_cli::render::{detail_text, group_candidates_line, results_table, schema_table};
use study_cli::state::StateLocation;
use study_core::{Dataset, Session, infer_schema, load_dataset};
use study_model::{Density, SortKey};
use study_persistence::{KeyValueStore, SystemClock, ViewStateStore};
use study_report::{ExportFormat, export_to_path};

use crate::cli::{
    DensityArg, ExportArgs, ExportFormatArg, InspectArgs, PayloadArgs, QueryArgs, SourceArgs,
    ViewCommand,
};

type CliSession = Session<Box<dyn KeyValueStore>, SystemClock>;

/// Message printed when the current view has no rows to pick from.
pub const NO_STUDIES_MESSAGE: &str = "No studies available (check your filters).";

pub fn run_summary(args: &SourceArgs) -> Result<()> {
    let dataset = load(&args.file)?;
    let schema = infer_schema(&dataset.records);
    println!("Source: {}", args.file.display());
    println!("Records: {}", dataset.records.len());
    if !dataset.skipped.is_empty() {
        println!("Skipped lines: {}", dataset.skipped.len());
    }
    println!("{}", schema_table(&schema));
    println!("{}", group_candidates_line(&schema));
    Ok(())
}

pub fn run_payload(args: &PayloadArgs, location: &StateLocation) -> Result<()> {
    let session = open_session(&args.source.file, location)?;
    let payload = session.payload();
    let json = if args.pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    }
    .context("serialize payload")?;
    println!("{json}");
    Ok(())
}

pub fn run_query(args: &QueryArgs, location: &StateLocation) -> Result<()> {
    let mut session = open_session(&args.source.file, location)?;
    apply_query_args(&mut session, args)?;
    let table = results_table(
        session.records(),
        session.schema(),
        session.view(),
        session.result(),
        args.limit,
    );
    println!("{table}");
    println!("{}", result_footer(&session, args.limit));
    Ok(())
}

/// Apply the query flags as view mutations; each one is persisted.
fn apply_query_args(session: &mut CliSession, args: &QueryArgs) -> Result<()> {
    let span = info_span!("apply_view");
    let _guard = span.enter();
    for filter in &args.filters {
        session
            .set_filter(&filter.field, filter.pattern.clone())
            .with_context(|| format!("apply filter on {}", filter.field))?;
    }
    if let Some(search) = &args.search {
        session.set_global_query(search.clone());
    }
    if !args.sort.is_empty() {
        session.set_sort(args.sort.clone()).context("apply sort")?;
    }
    if args.no_group {
        session.set_group_by(None).context("clear grouping")?;
    } else if let Some(field) = &args.group_by {
        session
            .set_group_by(Some(field.as_str()))
            .with_context(|| format!("group by {field}"))?;
    }
    debug!(rows = session.result().len(), "view applied");
    Ok(())
}

pub fn run_export(args: &ExportArgs, location: &StateLocation) -> Result<()> {
    let session = open_session(&args.source.file, location)?;
    let format = match args.format {
        ExportFormatArg::Csv => ExportFormat::Csv,
        ExportFormatArg::Json => ExportFormat::Json,
    };
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));
    let records = session.result_records();
    let fields = session.schema().all_fields();
    let summary = export_to_path(&path, format, &records, &fields)
        .with_context(|| format!("export {}", path.display()))?;
    println!(
        "Exported {} {} to {}",
        summary.record_count,
        noun(summary.record_count),
        summary.path.display()
    );
    Ok(())
}

pub fn run_inspect(args: &InspectArgs, location: &StateLocation) -> Result<()> {
    let session = open_session(&args.source.file, location)?;
    let detail = if args.random {
        let mut rng = rand::rng();
        match session.random_detail(&mut rng) {
            Some(detail) => detail,
            None => {
                println!("{NO_STUDIES_MESSAGE}");
                return Ok(());
            }
        }
    } else {
        let Some(index) = args.index else {
            bail!("either --index or --random is required");
        };
        if session.result().is_empty() {
            println!("{NO_STUDIES_MESSAGE}");
            return Ok(());
        }
        session.detail(index).context("select row")?
    };
    debug!(title = %redact_value(&detail.title), fields = detail.entries.len(), "inspect");
    println!("{}", detail_text(&detail));
    Ok(())
}

pub fn run_view(command: &ViewCommand, location: &StateLocation) -> Result<()> {
    let mut store = ViewStateStore::new(location.open());
    if let ViewCommand::Reset = command {
        store.reset().context("reset view state")?;
        println!("View state reset.");
        return Ok(());
    }
    let mut view = store.load();
    match command {
        ViewCommand::Show => {
            let json = serde_json::to_string_pretty(&view).context("serialize view state")?;
            println!("{json}");
            return Ok(());
        }
        ViewCommand::Reset => {}
        ViewCommand::ClearFilters => {
            view.clear_filters();
            println!("Filters cleared.");
        }
        ViewCommand::Density { density } => {
            let density = match density {
                DensityArg::Compact => Density::Compact,
                DensityArg::Comfortable => Density::Comfortable,
            };
            view.set_density(density);
            println!("Density: {density}");
        }
        ViewCommand::Hide { field } => {
            if !view.set_column_visible(field.as_str(), false) {
                warn!(field = %field, "column cannot be hidden");
                println!("{field} is always shown.");
                return Ok(());
            }
            println!("Hidden: {field}");
        }
        ViewCommand::Unhide { field } => {
            view.set_column_visible(field.as_str(), true);
            println!("Shown: {field}");
        }
        ViewCommand::Sort { field, add } => {
            view.toggle_sort(field, *add);
            println!("Sort: {}", describe_sort(&view.sort));
        }
    }
    store.save(&view).context("save view state")?;
    info!(key = store.key(), "view state saved");
    Ok(())
}

fn load(path: &Path) -> Result<Dataset> {
    let start = Instant::now();
    let dataset = load_dataset(path).with_context(|| format!("load {}", path.display()))?;
    if dataset.records.is_empty() {
        warn!(path = %path.display(), "no records loaded");
    }
    info!(
        records = dataset.records.len(),
        skipped = dataset.skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn open_session(path: &Path, location: &StateLocation) -> Result<CliSession> {
    let dataset = load(path)?;
    Ok(Session::new(
        dataset.records,
        location.open(),
        SystemClock::new(),
    ))
}

fn result_footer(session: &CliSession, limit: Option<usize>) -> String {
    let shown = session.result().len();
    let total = session.records().len();
    let mut footer = format!("{shown} of {total} {}", noun(total));
    if let Some(limit) = limit.filter(|&limit| limit < shown) {
        footer.push_str(&format!(" (first {limit} shown)"));
    }
    if let Some(field) = &session.view().group_by {
        footer.push_str(&format!(", grouped by {field}"));
    }
    footer
}

fn describe_sort(keys: &[SortKey]) -> String {
    if keys.is_empty() {
        return "(none)".to_string();
    }
    keys.iter()
        .map(|key| format!("{} {}", key.field, key.direction))
        .collect::<Vec<_>>()
        .join(", ")
}

fn noun(count: usize) -> &'static str {
    if count == 1 { "study" } else { "studies" }
}
