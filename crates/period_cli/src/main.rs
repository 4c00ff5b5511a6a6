//! Command-line front end for the period tracker.
//!
//! # Responsibility
//! - Map each subcommand to one request/response handler over `period_core`.
//! - Render tables and messages; storage and prediction rules stay in core.
//!
//! # Invariants
//! - The database is opened once per invocation and closed on exit.
//! - Storage and parse failures abort the command with a non-zero exit.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::warn;
use period_core::{
    format_date, init_logging, open_db, parse_date, CalendarRow, Config, DateParseError,
    NewSymptom, PeriodId, PeriodService, Prediction, RepoError, SqlitePeriodRepository,
    SqliteSymptomRepository, SymptomRecord, SymptomService,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::process::ExitCode;

const STORAGE_NOTICE: &str = "Your data is stored securely in a local database.";
const NO_DATA_MESSAGE: &str = "No period data recorded yet.";
const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough data to predict yet.";

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "period-tracker")]
#[command(about = "Log periods and symptoms, and predict the next period", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the database file path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Load configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a new period (dates as DD/MM/YY, default today)
    Add {
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date_arg)]
        end: Option<NaiveDate>,
    },

    /// Modify an existing period entry
    Update {
        id: PeriodId,
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date_arg)]
        end: Option<NaiveDate>,
    },

    /// Show one period entry
    Show { id: PeriodId },

    /// Show the period calendar table
    List {
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// List selectable period entries
    Records,

    /// Predict the next period start date
    Predict {
        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log symptoms for a day
    Symptom {
        /// Date text, stored as entered (default today as DD/MM/YY)
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        mood: String,
        #[arg(long, default_value = "")]
        cramps: String,
        #[arg(long, default_value = "")]
        flow: String,
    },

    /// Show logged symptoms
    Symptoms {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, DateParseError> {
    parse_date(value)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Err(err) = init_logging(&config.logging.level, &config.logging.log_dir) {
        // File logging is best-effort for an interactive tool.
        eprintln!("warning: logging disabled: {err}");
    }

    let db_path = cli.db.unwrap_or(config.data.db_path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = open_db(&db_path)?;

    match cli.command {
        Commands::Add { start, end } => cmd_add(&conn, start, end),
        Commands::Update { id, start, end } => cmd_update(&conn, id, start, end),
        Commands::Show { id } => cmd_show(&conn, id),
        Commands::List { json } => cmd_list(&conn, json),
        Commands::Records => cmd_records(&conn),
        Commands::Predict { json } => cmd_predict(&conn, json),
        Commands::Symptom {
            date,
            mood,
            cramps,
            flow,
        } => cmd_symptom(&conn, date, mood, cramps, flow),
        Commands::Symptoms { json } => cmd_symptoms(&conn, json),
    }
}

fn period_service(conn: &Connection) -> CliResult<PeriodService<SqlitePeriodRepository<'_>>> {
    Ok(PeriodService::new(SqlitePeriodRepository::try_new(conn)?))
}

fn cmd_add(conn: &Connection, start: Option<NaiveDate>, end: Option<NaiveDate>) -> CliResult<()> {
    let service = period_service(conn)?;
    let id = service.add_period(start.unwrap_or_else(today), end.unwrap_or_else(today))?;
    println!("Period dates added! (ID {id})");
    Ok(())
}

fn cmd_update(
    conn: &Connection,
    id: PeriodId,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> CliResult<()> {
    let service = period_service(conn)?;
    let record = service.update_period(id, start.unwrap_or_else(today), end.unwrap_or_else(today))?;
    println!("Period entry updated!");
    println!("{}", record.label());
    Ok(())
}

fn cmd_show(conn: &Connection, id: PeriodId) -> CliResult<()> {
    let service = period_service(conn)?;
    match service.get_period(id)? {
        Some(record) => println!("{}", record.label()),
        None => return Err(RepoError::NotFound(id).into()),
    }
    Ok(())
}

fn cmd_list(conn: &Connection, json: bool) -> CliResult<()> {
    let service = period_service(conn)?;
    let rows = service.calendar()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Your Period Calendar");
    if rows.is_empty() {
        println!("{NO_DATA_MESSAGE}");
    } else {
        print!("{}", render_calendar(&rows));
    }
    println!("{STORAGE_NOTICE}");
    Ok(())
}

fn cmd_records(conn: &Connection) -> CliResult<()> {
    let service = period_service(conn)?;
    let records = service.list_periods()?;
    if records.is_empty() {
        println!("{NO_DATA_MESSAGE}");
    }
    for record in records {
        println!("{}", record.label());
    }
    Ok(())
}

fn cmd_predict(conn: &Connection, json: bool) -> CliResult<()> {
    let service = period_service(conn)?;
    let prediction = service.predict_next_period()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    match prediction {
        Prediction::NoData => println!("{NO_DATA_MESSAGE}"),
        Prediction::InsufficientData => println!("{INSUFFICIENT_DATA_MESSAGE}"),
        Prediction::Predicted { next_start, .. } => {
            println!("Predicted Next Period: {}", format_date(next_start));
        }
    }
    Ok(())
}

fn cmd_symptom(
    conn: &Connection,
    date: Option<String>,
    mood: String,
    cramps: String,
    flow: String,
) -> CliResult<()> {
    let service = SymptomService::new(SqliteSymptomRepository::try_new(conn)?);
    let date = date.unwrap_or_else(|| format_date(today()));
    if parse_date(&date).is_err() {
        warn!("event=symptom_add module=cli status=warn reason=non_standard_date");
    }
    service.log_symptoms(&NewSymptom::new(date, mood, cramps, flow))?;
    println!("Symptoms logged!");
    Ok(())
}

fn cmd_symptoms(conn: &Connection, json: bool) -> CliResult<()> {
    let service = SymptomService::new(SqliteSymptomRepository::try_new(conn)?);
    let symptoms = service.list_symptoms()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&symptoms)?);
    } else if symptoms.is_empty() {
        println!("No symptoms recorded yet.");
    } else {
        print!("{}", render_symptoms(&symptoms));
    }
    Ok(())
}

fn render_calendar(rows: &[CalendarRow]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.start_date.clone(),
                row.end_date.clone(),
            ]
        })
        .collect();
    render_table(&["ID", "Start Date", "End Date"], &body)
}

fn render_symptoms(rows: &[SymptomRecord]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.date.clone(),
                row.mood.clone(),
                row.cramps.clone(),
                row.flow.clone(),
            ]
        })
        .collect();
    render_table(&["ID", "Date", "Mood", "Cramps", "Flow"], &body)
}

fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|title| title.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
