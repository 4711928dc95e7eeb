use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use std::fs;
use std::path::PathBuf;

use nextdrill::catalog::{load_templates, load_vocab};
use nextdrill::domain::{ExerciseType, Run, TemplateCatalog, VocabIndex};
use nextdrill::grading::ResultRecorder;
use nextdrill::presentation::{ConsolePresenter, DisplayItem, Presenter};
use nextdrill::scheduler::SchedulerEngine;
use nextdrill::storage::RunStore;

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, Outcome};
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nextdrill")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("nextdrill.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // env_logger passes everything; the global max level filters unless RUST_LOG is set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .target(env_logger::Target::Pipe(target))
        .init();
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Narrow logging to the configured level unless RUST_LOG is set.
fn apply_log_level(level: Option<&str>) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    match level.map(str::parse::<LevelFilter>) {
        Some(Ok(filter)) => log::set_max_level(filter),
        Some(Err(_)) => log::warn!("Ignoring unknown log_level {:?}", level),
        None => {}
    }
}

fn open_store(config: &Config) -> Result<RunStore> {
    let dir = &config.storage.data_dir;
    RunStore::open(dir).context(format!("Failed to open run store at {}", dir.display()))
}

fn load_catalog(config: &Config) -> Result<(TemplateCatalog, VocabIndex)> {
    let vocab = load_vocab(&config.catalog.vocab).context("Failed to load vocab")?;
    let templates = load_templates(&config.catalog.templates).context("Failed to load templates")?;
    Ok((templates, vocab))
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::New { target, support } => handle_new_command(target.as_deref(), support.as_deref(), config),
        Commands::Next { id, json } => handle_next_command(id, *json, config),
        Commands::Record { id, outcome } => handle_record_command(id, *outcome, config),
        Commands::Status { id, detailed } => handle_status_command(id, *detailed, config),
        Commands::List => handle_list_command(config),
        Commands::Reset { id } => handle_reset_command(id, config),
    }
}

fn handle_new_command(target: Option<&str>, support: Option<&str>, config: &Config) -> Result<()> {
    let languages = config.languages.pair(target, support);
    let store = open_store(config)?;
    let run = store.create_run(languages)?;
    println!(
        "{} {} ({} -> {})",
        "Created run:".green(),
        run.id.bold(),
        run.languages.support,
        run.languages.target
    );
    Ok(())
}

fn handle_next_command(id: &str, json: bool, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let (templates, vocab) = load_catalog(config)?;
    let mut run = store.load_run(id)?;

    let engine = SchedulerEngine::new();
    if engine.ensure_initialized(&mut run, &vocab) > 0 {
        store.save_run(&run)?;
    }
    let directive = engine.decide(&run, &templates, &vocab);

    if json {
        println!("{}", serde_json::to_string_pretty(&directive)?);
    } else {
        let item = DisplayItem::from_directive(&directive, &vocab, &run.languages);
        ConsolePresenter.present(&item);
    }
    Ok(())
}

fn handle_record_command(id: &str, outcome: Outcome, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let (templates, vocab) = load_catalog(config)?;
    let mut run = store.load_run(id)?;

    // Decisions are deterministic, so this is the exercise `next` showed
    let directive = SchedulerEngine::new().get_next_exercise(&mut run, &templates, &vocab);
    if directive.is_none() {
        bail!("Run {} has no exercise that can be scheduled, so there is nothing to record", id);
    }

    let recorder = ResultRecorder::new(config.grading.clone());
    let recorded = recorder.record(&mut run, &directive, outcome.into())?;
    store.save_run(&run)?;

    println!(
        "{} {:?} at step {}",
        "Recorded:".green(),
        outcome,
        recorded.step
    );
    for promotion in &recorded.promotions {
        println!(
            "  {} {} {} -> {}",
            "Promoted".cyan(),
            promotion.concept_id.bold(),
            promotion.from_level,
            promotion.to_level
        );
    }
    Ok(())
}

fn print_run_summary(run: &Run) {
    println!(
        "{} {}  {} -> {}  step {}  last active {}",
        "Run:".green(),
        run.id.bold(),
        run.languages.support,
        run.languages.target,
        run.step_counter,
        run.last_active.format("%Y-%m-%d %H:%M")
    );
}

fn handle_status_command(id: &str, detailed: bool, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let run = store.load_run(id)?;
    print_run_summary(&run);
    println!("  {} {}", "History entries:".cyan(), run.history.len());

    if detailed {
        let mut concepts: Vec<_> = run.concept_progress.iter().collect();
        concepts.sort_by(|a, b| a.0.cmp(b.0));
        for (concept_id, progress) in concepts {
            let streaks: Vec<String> = ExerciseType::LADDER
                .iter()
                .filter_map(|t| {
                    let streak = progress.streak(*t);
                    (streak > 0).then(|| format!("{}={}", t.level(), streak))
                })
                .collect();
            println!(
                "  {:<20} level {}  {}",
                concept_id,
                progress.current_exercise_level,
                streaks.join(" ").dimmed()
            );
        }
    }
    Ok(())
}

fn handle_list_command(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let runs = store.list_runs()?;
    if runs.is_empty() {
        println!("{}", "No runs yet".yellow());
    }
    for run in &runs {
        print_run_summary(run);
    }
    Ok(())
}

fn handle_reset_command(id: &str, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let run = store.reset_run(id)?;
    println!("{} {}", "Reset run:".green(), run.id.bold());
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    setup_logging().context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(config.log_level.as_deref());

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
