use anyhow::{Context, Result};
use areashift::{
    diff, extract, fileio, infer, load_from_path, plan_tablemoves, rewrite, DiffRow, TableMove,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "areashift")]
#[command(about = "Fix storage-area assignments in OpenEdge .df schema dumps", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply area rules to a .df schema dump
    Apply {
        /// Path to the .df schema dump
        schema: PathBuf,

        /// Path to the rules file
        rules: PathBuf,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a rules file from an existing .df schema dump
    Parse {
        /// Path to the .df schema dump
        schema: PathBuf,

        /// Path to the rules file supplying version and defaults
        rules: PathBuf,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show area differences between two .df schema dumps
    Diff {
        /// The .df dump to compare from
        source: PathBuf,

        /// The .df dump to compare against
        target: PathBuf,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit proutil tablemove commands for the given database instead
        /// of the discrepancy table
        #[arg(long, value_name = "DB")]
        tablemove: Option<String>,

        /// Output format for the discrepancy rows
        #[arg(short, long, default_value = "table")]
        format: DiffFormat,
    },
}

/// Output format for diff results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum DiffFormat {
    /// Fixed-column text table.
    #[default]
    Table,
    /// JSON rows.
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Apply {
            schema,
            rules,
            output,
        } => cmd_apply(&schema, &rules, output.as_deref()),
        Commands::Parse {
            schema,
            rules,
            output,
        } => cmd_parse(&schema, &rules, output.as_deref()),
        Commands::Diff {
            source,
            target,
            output,
            tablemove,
            format,
        } => cmd_diff(&source, &target, output.as_deref(), tablemove, format),
    };

    if let Err(err) = result {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

/// Logging goes to stderr so stdout stays clean for the emitted .df or
/// rules content.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_apply(schema: &Path, rules_path: &Path, output: Option<&Path>) -> Result<()> {
    tracing::debug!(df = %schema.display(), rules = %rules_path.display(), "apply started");

    let rules = load_from_path(rules_path).context("loading rules")?.areashift;
    tracing::debug!(
        tables = rules.tables.len(),
        default_table = %rules.defaults.table,
        default_index = %rules.defaults.index,
        default_lob = %rules.defaults.lob,
        "rules loaded"
    );

    let content = read_dump(schema)?;
    let lines: Vec<&str> = content.lines().collect();
    tracing::debug!(lines = lines.len(), "df file read");

    let rewritten = rewrite(&lines, &rules, fileio::line_ending(&content));
    fileio::write_output(output, rewritten.as_bytes()).context("writing output")?;

    tracing::debug!("apply complete");
    Ok(())
}

fn cmd_parse(schema: &Path, rules_path: &Path, output: Option<&Path>) -> Result<()> {
    tracing::debug!(df = %schema.display(), rules = %rules_path.display(), "parse started");

    let rules = load_from_path(rules_path).context("loading rules")?.areashift;
    let content = read_dump(schema)?;
    let lines: Vec<&str> = content.lines().collect();

    let records = extract(&lines);
    let generated = infer(&records, rules.version, &rules.defaults);
    tracing::debug!(tables = generated.areashift.tables.len(), "parse complete");

    let text =
        toml_edit::ser::to_string_pretty(&generated).context("serializing rules document")?;
    fileio::write_output(output, text.as_bytes()).context("writing output")?;
    Ok(())
}

fn cmd_diff(
    source: &Path,
    target: &Path,
    output: Option<&Path>,
    tablemove: Option<String>,
    format: DiffFormat,
) -> Result<()> {
    tracing::debug!(source = %source.display(), target = %target.display(), "diff started");

    let source_content = read_dump(source)?;
    let target_content = read_dump(target)?;
    let source_records = extract(&source_content.lines().collect::<Vec<_>>());
    let target_records = extract(&target_content.lines().collect::<Vec<_>>());

    let rows = diff(&source_records, &target_records);
    if rows.is_empty() {
        return Ok(());
    }

    let text = match (tablemove, format) {
        (Some(db), _) => {
            let moves = plan_tablemoves(&rows, &source_records, &target_records);
            render_tablemove_commands(&moves, &db)
        }
        (None, DiffFormat::Table) => render_diff_table(&rows),
        (None, DiffFormat::Json) => {
            let mut json = serde_json::to_string_pretty(&rows).context("serializing diff rows")?;
            json.push('\n');
            json
        }
    };

    fileio::write_output(output, text.as_bytes()).context("writing output")?;
    Ok(())
}

fn read_dump(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading df file {}", path.display()))
}

const NOT_PRESENT: &str = "(not present)";

/// Render diff rows as a fixed-column table with dynamic widths.
fn render_diff_table(rows: &[DiffRow]) -> String {
    const H_CONSTRUCT: &str = "CONSTRUCT";
    const H_NAME: &str = "NAME";
    const H_SOURCE: &str = "SOURCE AREA";
    const H_TARGET: &str = "TARGET AREA";

    fn area_text(area: &Option<String>) -> &str {
        area.as_deref().unwrap_or(NOT_PRESENT)
    }

    let mut w_construct = H_CONSTRUCT.len();
    let mut w_name = H_NAME.len();
    let mut w_source = H_SOURCE.len();
    for row in rows {
        w_construct = w_construct.max(row.kind.as_str().len());
        w_name = w_name.max(row.name.len());
        w_source = w_source.max(area_text(&row.source_area).len());
    }
    w_construct += 2;
    w_name += 2;
    w_source += 2;

    let mut out = String::new();
    let mut push_row = |c: &str, n: &str, s: &str, t: &str| {
        out.push_str(&format!("{c:<w_construct$}{n:<w_name$}{s:<w_source$}{t}\n"));
    };

    push_row(H_CONSTRUCT, H_NAME, H_SOURCE, H_TARGET);
    push_row(
        &"-".repeat(w_construct - 2),
        &"-".repeat(w_name - 2),
        &"-".repeat(w_source - 2),
        &"-".repeat(H_TARGET.len()),
    );
    for row in rows {
        push_row(
            row.kind.as_str(),
            &row.name,
            area_text(&row.source_area),
            area_text(&row.target_area),
        );
    }

    out
}

/// Render one `proutil tablemove` command line per affected table.
fn render_tablemove_commands(moves: &[TableMove], db: &str) -> String {
    let mut out = String::new();
    for mv in moves {
        let mut cmd = format!(
            "proutil {db} -C tablemove {} {}",
            mv.table,
            quote_if_needed(&mv.table_area)
        );
        if let Some(area) = &mv.index_area {
            cmd.push(' ');
            cmd.push_str(&quote_if_needed(area));
        }
        if let Some(area) = &mv.lob_area {
            cmd.push(' ');
            cmd.push_str(&quote_if_needed(area));
        }
        out.push_str(&cmd);
        out.push('\n');
    }
    out
}

/// Area names containing spaces need quoting on a proutil command line.
fn quote_if_needed(area: &str) -> String {
    if area.contains(' ') {
        format!("\"{area}\"")
    } else {
        area.to_string()
    }
}
