//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{ColoredString, Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use biomodule_risk::core::config::Config;
use biomodule_risk::core::errors::BioError;
use biomodule_risk::engine::catalog::{self, CATALOG, localize};
use biomodule_risk::engine::evidence::{self, ReferenceBands};
use biomodule_risk::engine::locale::Locale;
use biomodule_risk::engine::payload::{ReportPayload, RiskEngine};
use biomodule_risk::engine::status::Status;
use biomodule_risk::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry, Severity};
use biomodule_risk::source::demo::demo_trend;
use biomodule_risk::source::{DemoSource, FileSource, MetricSnapshot, MetricSource};

/// BioModule risk engine: worst-zone status, causes and actions for two-zone farms.
#[derive(Debug, Parser)]
#[command(
    name = "bmr",
    author,
    version,
    about = "BioModule Risk - two-zone aquaculture risk report",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Label language for human output.
    #[arg(long, global = true, value_enum, default_value_t = Locale::En)]
    locale: Locale,
    /// Increase verbosity.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (headline and errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Evaluate the latest zone metrics and print the report payload.
    Evaluate(EvaluateArgs),
    /// List catalog scenarios with their causes and actions.
    Scenarios,
    /// Print the synthetic seven-day risk series for a demo scenario.
    Trend(TrendArgs),
    /// View configuration state.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct EvaluateArgs {
    /// Context label selecting the catalog entry (and demo fixture).
    #[arg(long, value_name = "LABEL")]
    scenario: Option<String>,
    /// Read zone metrics from a JSON or TOML snapshot instead of demo fixtures.
    #[arg(long, value_name = "PATH")]
    metrics: Option<PathBuf>,
    /// Override the facility name in the document metadata.
    #[arg(long, value_name = "NAME")]
    facility: Option<String>,
}

#[derive(Debug, Clone, Args, Default)]
struct TrendArgs {
    /// Demo scenario to chart.
    #[arg(long, value_name = "LABEL")]
    scenario: Option<String>,
}

#[derive(Debug, Clone, Args, Default)]
struct ConfigArgs {
    /// Config operation to run.
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigCommand {
    /// Print resolved config file path.
    Path,
    /// Print effective merged configuration.
    Show,
    /// Print the stable hash of the effective configuration.
    Hash,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Json(_) => 3,
        }
    }
}

impl From<BioError> for CliError {
    fn from(err: BioError) -> Self {
        match err {
            BioError::InvalidMetric { .. }
            | BioError::MalformedSnapshot { .. }
            | BioError::MissingConfig { .. }
            | BioError::InvalidConfig { .. }
            | BioError::ConfigParse { .. } => Self::User(err.to_string()),
            BioError::Serialization { .. } | BioError::Io { .. } => Self::Runtime(err.to_string()),
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        Command::Evaluate(args) => run_evaluate(cli, args),
        Command::Scenarios => run_scenarios(cli),
        Command::Trend(args) => run_trend(cli, args),
        Command::Config(args) => run_config(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

/// JSONL writer that is absent when logging is disabled.
struct ActivityLog {
    writer: Option<JsonlWriter>,
}

impl ActivityLog {
    fn open(config: &Config) -> Self {
        let writer = config
            .logging
            .enabled
            .then(|| JsonlWriter::open(JsonlConfig::from(&config.logging)));
        Self { writer }
    }

    fn record(&mut self, entry: &LogEntry) {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_entry(entry);
        }
    }
}

// ---------------------------------------------------------------------------
// evaluate
// ---------------------------------------------------------------------------

fn run_evaluate(cli: &Cli, args: &EvaluateArgs) -> Result<(), CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(facility) = &args.facility {
        config.meta.facility_name.clone_from(facility);
    }

    let mut log = ActivityLog::open(&config);
    let mut loaded = LogEntry::new(EventType::ConfigLoaded, Severity::Info);
    loaded.details = Some(format!(
        "path={} hash={}",
        config.paths.config_file.display(),
        config.stable_hash()?
    ));
    log.record(&loaded);

    if cli.verbose {
        eprintln!(
            "[BIO-CLI] config: {} (logging {})",
            config.paths.config_file.display(),
            if config.logging.enabled { "on" } else { "off" }
        );
    }

    let explicit = args.scenario.as_deref();
    let default_label = config.source.default_scenario.as_str();

    let snapshot = match fetch_snapshot(args, explicit.unwrap_or(default_label)) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log.record(&LogEntry::failure(&err));
            return Err(err.into());
        }
    };
    if cli.verbose
        && let Some(own) = snapshot.overridden_label(explicit)
    {
        eprintln!(
            "[BIO-CLI] --scenario {:?} overrides snapshot context label {own:?}",
            explicit.unwrap_or_default()
        );
    }
    let label = snapshot.label_for(explicit, default_label);

    let engine = RiskEngine::new(config.evidence);
    let payload = match engine.assemble(&snapshot.zone_a, &snapshot.zone_b, label, &config.meta) {
        Ok(payload) => payload,
        Err(err) => {
            log.record(&LogEntry::failure(&err));
            return Err(err.into());
        }
    };

    if payload.context_fallback {
        log.record(&LogEntry::context_fallback(label, &payload.scenario));
        if cli.verbose {
            eprintln!(
                "[BIO-CLI] unknown context label {label:?}, using {:?}",
                payload.scenario
            );
        }
    }
    log.record(&LogEntry::evaluation(&payload));

    match output_mode(cli) {
        OutputMode::Json => {
            let value = serde_json::to_value(&payload)?;
            write_json_line(&json!({
                "command": "evaluate",
                "payload": value,
            }))?;
        }
        OutputMode::Human => {
            if cli.quiet {
                println!("{}", payload.headline(cli.locale));
            } else {
                print_payload_human(&payload, engine.bands(), cli.locale);
            }
        }
    }
    Ok(())
}

fn fetch_snapshot(args: &EvaluateArgs, requested: &str) -> Result<MetricSnapshot, BioError> {
    match &args.metrics {
        Some(path) => FileSource::new(path).latest(requested),
        None => DemoSource.latest(requested),
    }
}

/// Human report. Catalog text and evidence are rendered in `locale`; the
/// payload itself keeps its English fields.
fn print_payload_human(payload: &ReportPayload, bands: &ReferenceBands, locale: Locale) {
    let meta = &payload.meta;
    println!(
        "{} {}",
        meta.facility_name.bold(),
        format!("({}, {})", meta.doc_id, payload.generated_at).dimmed()
    );
    println!(
        "  Status:     {}  risk {:.0}/100 ({})",
        colored_status(payload.status, locale),
        payload.r_max,
        payload.culprit.label(locale)
    );
    println!("  Expansion:  {}", payload.expansion_stage.label(locale));
    println!(
        "  Scenario:   {}{}",
        localize(&payload.scenario, locale),
        if payload.context_fallback {
            format!(" (fallback from {:?})", payload.context_label)
        } else {
            String::new()
        }
    );
    println!(
        "  Aggregates: shocks 24h {}  |  exposure 7d {:.0}%  |  util {:.0}%",
        payload.shock_24h, payload.exposure_7d_pct, payload.util_pct
    );

    println!("\nCauses:");
    for (rank, cause) in payload.causes.iter().enumerate() {
        println!(
            "  {}. {:<30} {:.2}",
            rank + 1,
            localize(&cause.label, locale),
            cause.weight
        );
    }

    println!("\nActions:");
    for action in &payload.actions {
        let line = format!(
            "  {} {:<45} ({})",
            action.priority,
            localize(&action.description, locale),
            localize(&action.timeframe, locale)
        );
        if action == &payload.front_action {
            println!("{}", line.bold());
        } else {
            println!("{line}");
        }
    }

    let evidence = match locale {
        Locale::En => payload.evidence.clone(),
        Locale::Ko => evidence::format_evidence_in(
            evidence::zone_readings_in(payload.culprit_metrics(), bands, locale),
            locale,
        ),
    };
    if !evidence.is_empty() {
        println!("\nEvidence ({}):", payload.culprit.label(locale));
        for line in &evidence {
            println!("  {line}");
        }
    }
}

fn colored_status(status: Status, locale: Locale) -> ColoredString {
    let label = status.label(locale);
    match status {
        Status::Normal => label.green(),
        Status::Caution => label.yellow(),
        Status::Watch => label.bright_red(),
        Status::Critical => label.red().bold(),
    }
}

// ---------------------------------------------------------------------------
// scenarios / trend
// ---------------------------------------------------------------------------

fn run_scenarios(cli: &Cli) -> Result<(), CliError> {
    match output_mode(cli) {
        OutputMode::Json => {
            let scenarios: Vec<Value> = CATALOG
                .iter()
                .map(|entry| {
                    let derivation = catalog::derive_causes_and_actions(entry.key);
                    json!({
                        "key": entry.key,
                        "aliases": entry.aliases,
                        "default": entry.key == catalog::DEFAULT_SCENARIO,
                        "causes": derivation.causes,
                        "actions": derivation.actions,
                    })
                })
                .collect();
            write_json_line(&json!({
                "command": "scenarios",
                "scenarios": scenarios,
            }))?;
        }
        OutputMode::Human => {
            for entry in &CATALOG {
                let marker = if entry.key == catalog::DEFAULT_SCENARIO {
                    " (default)"
                } else {
                    ""
                };
                println!("{}{marker}", localize(entry.key, cli.locale).bold());
                if !entry.aliases.is_empty() && !cli.quiet {
                    println!("  aliases: {}", entry.aliases.join(", "));
                }
                for (label, weight) in entry.causes {
                    println!("  cause   {:<30} {weight:.2}", localize(label, cli.locale));
                }
                for (priority, description, timeframe) in entry.actions {
                    println!(
                        "  {priority:<7} {} ({})",
                        localize(description, cli.locale),
                        localize(timeframe, cli.locale)
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_trend(cli: &Cli, args: &TrendArgs) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let scenario = args
        .scenario
        .clone()
        .unwrap_or_else(|| config.source.default_scenario.clone());

    let snapshot = DemoSource.latest(&scenario)?;
    let payload = RiskEngine::new(config.evidence).assemble(
        &snapshot.zone_a,
        &snapshot.zone_b,
        snapshot.effective_label(&scenario),
        &config.meta,
    )?;
    let series = demo_trend(payload.r_max);

    match output_mode(cli) {
        OutputMode::Json => {
            write_json_line(&json!({
                "command": "trend",
                "scenario": payload.scenario,
                "r_max": payload.r_max,
                "series": series,
            }))?;
        }
        OutputMode::Human => {
            println!(
                "{} ({})",
                localize(&payload.scenario, cli.locale).bold(),
                payload.culprit.label(cli.locale)
            );
            for (offset, value) in series.iter().enumerate() {
                let day = series.len() - 1 - offset;
                println!("  D-{day}  {value:>5.1}  {}", trend_bar(*value));
            }
        }
    }
    Ok(())
}

/// One `#` per five risk points. Series values are clamped to [0, 100].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn trend_bar(value: f64) -> String {
    "#".repeat((value.clamp(0.0, 100.0) / 5.0).round() as usize)
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    match &args.command {
        None | Some(ConfigCommand::Path) => {
            let path = cli.config.clone().unwrap_or_else(Config::default_path);
            let exists = path.exists();

            match output_mode(cli) {
                OutputMode::Human => {
                    println!("{}", path.display());
                    if !exists {
                        println!("  (file does not exist; defaults will be used)");
                    }
                }
                OutputMode::Json => {
                    write_json_line(&json!({
                        "command": "config path",
                        "path": path.to_string_lossy(),
                        "exists": exists,
                    }))?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Show) => {
            let config = Config::load(cli.config.as_deref())?;

            match output_mode(cli) {
                OutputMode::Human => println!("{}", config.to_toml()?),
                OutputMode::Json => {
                    let value = serde_json::to_value(&config)?;
                    write_json_line(&json!({
                        "command": "config show",
                        "config": value,
                    }))?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Hash) => {
            let config = Config::load(cli.config.as_deref())?;
            let hash = config.stable_hash()?;

            match output_mode(cli) {
                OutputMode::Human => println!("{hash}"),
                OutputMode::Json => {
                    write_json_line(&json!({
                        "command": "config hash",
                        "hash": hash,
                    }))?;
                }
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// output helpers
// ---------------------------------------------------------------------------

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("BIO_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        _ => fallback,
    }
}
