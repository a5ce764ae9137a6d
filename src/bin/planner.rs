use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use month_planner::client::Client;
use month_planner::error::SyncError;
use month_planner::storage::FileStorage;
use month_planner::utils::{print_events, print_view};
use month_planner::{EventDate, EventId, Event, Planner};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Display and edit a month calendar, stored locally and mirrored to a remote collection")]
struct Cli {
    /// Folder where events are stored (defaults to the user data folder)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// URL of the remote event collection. Without it, only the local storage is used
    #[arg(long, global = true, env = "PLANNER_API_URL")]
    api_url: Option<String>,

    /// Only use the local storage, even if an API URL is set
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar of a month, and the list of every event
    Show {
        /// Month to display, as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Add an event
    Add {
        title: String,
        /// YYYY-MM-DD
        date: String,
        /// HH:MM
        time: String,
    },
    /// Replace an event that is known by the remote collection
    Update {
        id: String,
        title: String,
        /// YYYY-MM-DD
        date: String,
        /// HH:MM
        time: String,
    },
    /// Delete an event
    Delete {
        id: String,
    },
    /// Replace the local events with the remote ones
    Pull,
}


#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(FileStorage::default_folder);
    let storage = FileStorage::new(&data_dir);

    let remote = remote_for(cli.api_url.as_deref(), cli.offline)?;

    let today = chrono::Local::now().date_naive();
    let mut planner = Planner::new(storage, remote, today);
    planner.init().await?;

    match cli.command {
        Commands::Show { month } => {
            if let Some(month) = month {
                planner.set_month(parse_month(&month)?);
            }
            print_view(&planner.render());
        },
        Commands::Add { title, date, time } => {
            planner.form_mut().fill(title, date, time);
            let event = planner.submit_form().await?;
            println!("Event added:");
            print_events(&[event]);
        },
        Commands::Update { id, title, date, time } => {
            let id = resolve_id(&planner, &id);
            let new_date = EventDate::from_inputs(&date, &time)
                .map_err(|err| format!("Invalid date {}T{}: {}", date, time, err))?;
            let event = planner.update_event(&id, Event::new_with_id(id.clone(), title, new_date)).await?;
            println!("Event updated:");
            print_events(&[event]);
        },
        Commands::Delete { id } => {
            let id = resolve_id(&planner, &id);
            planner.delete_event(&id).await?;
            println!("Event {} deleted", id);
        },
        Commands::Pull => {
            println!("{} events are stored locally", planner.store().len());
            print_events(planner.store().events());
        },
    }

    Ok(())
}

/// The client to use, if any. A remote collection is only used once its URL is given
fn remote_for(api_url: Option<&str>, offline: bool) -> Result<Option<Client>, SyncError> {
    match (api_url, offline) {
        (Some(url), false) => {
            month_planner::config::set_api_base_url(url);
            Client::from_config().map(Some)
        },
        (None, false) => {
            log::info!("No API URL is set, only the local events are used");
            Ok(None)
        },
        (_, true) => Ok(None),
    }
}

/// Parse a `YYYY-MM` month
fn parse_month(month: &str) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .map_err(|err| format!("Invalid month {:?} (expected YYYY-MM): {}", month, err).into())
}

/// Use the id of a stored event when `raw` matches it, so that numeric and textual ids are both accepted
fn resolve_id<R>(planner: &Planner<FileStorage, R>, raw: &str) -> EventId
where
    R: month_planner::traits::RemoteSource,
{
    match planner.store().id_matching(raw) {
        Some(id) => id,
        None => match raw.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_only_when_a_url_is_given() {
        assert!(remote_for(None, false).unwrap().is_none());
        assert!(remote_for(Some("http://localhost:8080/events"), true).unwrap().is_none());

        let client = remote_for(Some("http://localhost:8080/events"), false).unwrap().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/events");
        assert!(remote_for(Some("not a url"), false).is_err());
    }

    #[test]
    fn months() {
        assert_eq!(parse_month("2024-06").unwrap(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(parse_month("2024-13").is_err());
    }
}
