use anyhow::{Result, anyhow};
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing::error;

mod errors;
mod headers;
mod models;
mod render;
mod schedule;
mod store;
mod tokenizer;
mod traits;

use models::Status;
use schedule::Schedule;
use store::FileStatusStore;

const DEFAULT_STATUS_FILE: &str = "statuses.json";
const STATUS_FILE_ENV: &str = "VISIT_STATUS_FILE";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        error!(error = %err, "run failed");
        eprintln!("Could not parse the schedule. Please check the columns and try again.");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let status_file =
        env::var(STATUS_FILE_ENV).unwrap_or_else(|_| DEFAULT_STATUS_FILE.to_string());
    let mut store = FileStatusStore::load(&status_file)?;

    match args.get(1).map(String::as_str) {
        Some("mark") => {
            let usage = || anyhow!("usage: mark <sno> <status>");
            let sequence_number: u32 = args.get(2).ok_or_else(usage)?.parse()?;
            let status: Status = args.get(3).ok_or_else(usage)?.parse()?;
            store::set_status(&mut store, sequence_number, status);
            store.persist()?;
        }
        Some("clear-statuses") => {
            store::clear_all_statuses(&mut store);
            store.persist()?;
        }
        Some("json") => {
            let schedule = Schedule::from_csv(&read_input(args.get(2).map(String::as_str))?)?;
            println!("{}", schedule.to_json()?);
        }
        path => {
            let schedule = Schedule::from_csv(&read_input(path)?)?;
            print!("{}", render::render_text(&schedule, &store));
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
