use clap::Args;
use club_grouper::config::{AppConfig, KeywordRules};
use club_grouper::error::AppError;
use club_grouper::export::{write_duplicate_report, write_grouped_report, write_workbook};
use club_grouper::grouping::{GroupingOutcome, TeamGrouper};
use club_grouper::import::TeamSheetImporter;
use club_grouper::telemetry;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct GroupArgs {
    /// Candidate CSV sheets; the first with a Name column is used
    #[arg(long, required = true)]
    pub(crate) input: Vec<PathBuf>,
    /// Grouped report destination (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Duplicate report destination (defaults to <output>_duplicates.csv)
    #[arg(long)]
    pub(crate) duplicates_output: Option<PathBuf>,
    /// Keyword document overriding APP_KEYWORDS_PATH
    #[arg(long)]
    pub(crate) keywords: Option<PathBuf>,
}

/// Where each report ended up.
#[derive(Debug)]
pub(crate) struct GroupRun {
    pub(crate) sheet: PathBuf,
    pub(crate) outcome: GroupingOutcome,
    pub(crate) grouped_report: Option<PathBuf>,
    pub(crate) duplicate_report: Option<PathBuf>,
}

pub(crate) fn run_group(mut args: GroupArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.keywords.take() {
        config.keywords.path = path;
    }

    telemetry::init(&config.telemetry)?;
    let rules = config.keywords.load_rules()?;
    info!(keywords = %config.keywords.path.display(), "keyword tables loaded");

    let run = execute(&rules, &args)?;
    if run.grouped_report.is_some() {
        render_summary(&run);
    }
    Ok(())
}

pub(crate) fn execute(rules: &KeywordRules, args: &GroupArgs) -> Result<GroupRun, AppError> {
    let sheet = TeamSheetImporter::select_sheet(&args.input)?;
    info!(sheet = %sheet.source.display(), rows = sheet.names.len(), "team sheet loaded");

    let outcome = TeamGrouper::new(rules).group(sheet.names);

    let Some(output) = args.output.as_deref() else {
        // Both sheets go to stdout when no destination is given.
        write_workbook(io::stdout().lock(), &outcome)?;
        return Ok(GroupRun {
            sheet: sheet.source,
            outcome,
            grouped_report: None,
            duplicate_report: None,
        });
    };

    write_grouped_report(File::create(output)?, &outcome)?;

    let duplicates_path = args
        .duplicates_output
        .clone()
        .unwrap_or_else(|| default_duplicates_path(output));
    let duplicate_report = if outcome.duplicates.has_duplicates() {
        write_duplicate_report(File::create(&duplicates_path)?, &outcome)?;
        Some(duplicates_path)
    } else {
        None
    };

    Ok(GroupRun {
        sheet: sheet.source,
        outcome,
        grouped_report: Some(output.to_path_buf()),
        duplicate_report,
    })
}

fn default_duplicates_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grouped_output".to_string());
    output.with_file_name(format!("{stem}_duplicates.csv"))
}

fn render_summary(run: &GroupRun) {
    let check = run.outcome.check();

    println!("Team grouping");
    println!("Sheet: {}", run.sheet.display());
    println!(
        "Groups: {} covering {} unique names",
        run.outcome.groups.len(),
        check.grouped_total
    );
    println!(
        "Check (grouped + duplicates): {} (original {})",
        check.summary(),
        check.original_team_count
    );
    if !check.is_balanced() {
        println!("WARNING: grouped and duplicate totals do not match the original row count");
    }

    if let Some(path) = &run.grouped_report {
        println!("\nGrouped report written to {}", path.display());
    }
    match &run.duplicate_report {
        Some(path) => println!("Duplicate report written to {}", path.display()),
        None => println!("Exact duplicates: none"),
    }
}
