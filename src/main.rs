use anyhow::Context;
use clap::Parser;
use courselist::cli::{Args, Command, QueryArgs};
use courselist::config::Config;
use courselist::data::{CourseRecord, RecordQuery, persist};
use courselist::logging::setup_logging;
use courselist::scraper::CourseScraper;
use std::process::ExitCode;
use tracing::{Dispatch, error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let dispatch = setup_logging(&config, args.tracing);
    // Only fails if a global subscriber is already installed
    let _ = tracing::dispatcher::set_global_default(dispatch.clone());

    info!(version = env!("CARGO_PKG_VERSION"), "starting courselist");

    match run(args.command, &config, dispatch).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "courselist failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config, dispatch: Dispatch) -> anyhow::Result<()> {
    match command {
        Command::Scrape {
            subject,
            term,
            json,
            csv,
        } => {
            let mut scraper = CourseScraper::from_config(config, dispatch)
                .context("Failed to create scraper")?;

            let added = scraper
                .scrape(subject.as_deref(), term.as_deref())
                .await
                .context("Scrape failed")?;
            info!(records = added, "scrape finished");

            if json.is_none() && csv.is_none() {
                println!("{}", serde_json::to_string_pretty(scraper.records())?);
            }
            if let Some(path) = json {
                scraper
                    .save_json(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            if let Some(path) = csv {
                scraper
                    .save_csv(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        Command::Subjects => {
            let mut scraper = CourseScraper::from_config(config, dispatch)
                .context("Failed to create scraper")?;
            let state = scraper.discover().await.context("Discovery failed")?;

            println!("term: {}", state.term().unwrap_or("(none)"));
            for subject in state.subjects() {
                println!("{subject}");
            }
        }
        Command::Query(query) => {
            let records = load_records(&query)?;
            let matches = select(&query, &records);
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
    }

    Ok(())
}

fn load_records(query: &QueryArgs) -> anyhow::Result<Vec<CourseRecord>> {
    match (&query.json, &query.csv) {
        (Some(path), _) => persist::load_json(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        (None, Some(path)) => persist::load_csv(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        (None, None) => anyhow::bail!("either --json or --csv is required"),
    }
}

/// CRN and course ID are single lookups; the remaining filters are intersected.
fn select<'a>(query: &QueryArgs, records: &'a [CourseRecord]) -> Vec<&'a CourseRecord> {
    let index = RecordQuery::new(records);

    if let Some(crn) = &query.crn {
        return index.find_by_crn(crn).into_iter().collect();
    }
    if let Some(course_id) = &query.course_id {
        return index.find_by_course_id(course_id).into_iter().collect();
    }

    let mut filters = Vec::new();
    if let Some(instructor) = &query.instructor {
        filters.push(index.by_instructor(instructor));
    }
    if let Some(attribute) = &query.attribute {
        filters.push(index.with_attribute(attribute));
    }
    if let Some(status) = query.status {
        filters.push(index.by_status(status));
    }

    let mut matches: Vec<&CourseRecord> = records.iter().collect();
    for hits in filters {
        matches.retain(|record| hits.iter().any(|hit| std::ptr::eq(*hit, *record)));
    }
    matches
}
