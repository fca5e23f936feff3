// Roster Calendar
// Command-line entry point

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use roster_calendar::models::category::EventCategory;
use roster_calendar::models::event::{DisplayEvent, EventDraft};
use roster_calendar::models::session::{Role, Session};
use roster_calendar::models::settings::{AppConfig, Settings};
use roster_calendar::models::ui::ViewType;
use roster_calendar::services::calendar_grid::{build_month_grid, build_week_dates};
use roster_calendar::services::schedule::ScheduleService;
use roster_calendar::services::settings::SettingsService;
use roster_calendar::services::store::SqliteStore;
use roster_calendar::ui::{render_month, render_week};
use roster_calendar::utils::date::{parse_calendar_date, start_sort_key};

#[derive(Parser)]
#[command(name = "roster-calendar")]
#[command(about = "Schedule roster events and keep attendance hours in step")]
struct Cli {
    /// User the commands run as
    #[arg(long, global = true, env = "ROSTER_USER", default_value = "admin")]
    user: String,

    /// Role of that user (admin, coordinator, participant)
    #[arg(long, global = true, env = "ROSTER_ROLE", default_value = "participant")]
    role: Role,

    /// SQLite database, overriding the configured path
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid with its events
    Month {
        /// Year, defaults to the current one
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12, defaults to the current one
        #[arg(long)]
        month: Option<u32>,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Show the week containing a date
    Week {
        /// Any date in the week, defaults to today
        #[arg(long)]
        date: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Schedule an event with its attendees
    Add(AddArgs),
    /// Delete an event and revoke its attendees' hours
    Delete {
        /// Date of the event
        #[arg(long)]
        date: String,

        /// Event name
        #[arg(long)]
        name: String,

        /// Start time, to pick between events sharing a name
        #[arg(long)]
        start: Option<String>,
    },
}

#[derive(Args)]
struct DisplayArgs {
    /// Include Saturday and Sunday, and remember the choice
    #[arg(long, conflicts_with = "workweek")]
    weekends: bool,

    /// Show Monday to Friday only, and remember the choice
    #[arg(long)]
    workweek: bool,

    /// Print the grouped events as JSON instead of a text view
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    date: String,

    #[arg(long)]
    name: String,

    /// Comida, Taller, "Visita cultural" or Charla
    #[arg(long)]
    category: EventCategory,

    #[arg(long)]
    start: Option<String>,

    #[arg(long)]
    end: Option<String>,

    #[arg(long)]
    certification: Option<String>,

    #[arg(long)]
    promotion: Option<String>,

    #[arg(long)]
    menu: Option<String>,

    #[arg(long)]
    venue: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    /// Attendee user id, repeatable
    #[arg(long = "attendee")]
    attendees: Vec<String>,
}

impl DisplayArgs {
    fn weekend_override(&self) -> Option<bool> {
        match (self.weekends, self.workweek) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

impl AddArgs {
    fn into_draft(self) -> EventDraft {
        EventDraft {
            start_time: self.start,
            end_time: self.end,
            certification: self.certification,
            promotion: self.promotion,
            menu: self.menu,
            venue: self.venue,
            notes: self.notes,
            attendees: self.attendees,
            ..EventDraft::new(self.date, self.name, self.category)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let db_path = match cli.database {
        Some(path) => path,
        None => config
            .resolve_database_path()?
            .to_str()
            .ok_or_else(|| anyhow!("Database path is not valid UTF-8"))?
            .to_string(),
    };

    log::info!("Starting Roster Calendar as {} ({})", cli.user, cli.role);
    let store = SqliteStore::open(&db_path)?;
    let session = Session::new(cli.user, cli.role);
    let schedule = ScheduleService::new(&store, &store);

    match cli.command {
        Commands::Month { year, month, display } => {
            let today = Local::now().date_naive();
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            let weekends = weekend_policy(&store, &config, &display, ViewType::Month)?;

            let grid = build_month_grid(year, month, weekends)
                .ok_or_else(|| anyhow!("Invalid month {}", month))?;
            let days = match grid.date_range() {
                Some((start, end)) => schedule.load_days(&session, start, end).await?,
                None => BTreeMap::new(),
            };

            if display.json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else {
                print!("{}", render_month(&grid, &days));
            }
        }
        Commands::Week { date, display } => {
            let anchor = match date {
                Some(raw) => parse_date_arg(&raw)?,
                None => Local::now().date_naive(),
            };
            let weekends = weekend_policy(&store, &config, &display, ViewType::Week)?;

            let dates = build_week_dates(anchor, weekends);
            let days = match (dates.first(), dates.last()) {
                (Some(&start), Some(&end)) => schedule.load_days(&session, start, end).await?,
                _ => BTreeMap::new(),
            };

            if display.json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else {
                print!("{}", render_week(&dates, &days));
            }
        }
        Commands::Add(args) => {
            let draft = args.into_draft();
            let rows = schedule.create_event(&session, &draft).await?;
            println!("Scheduled {:?} on {} ({} row(s))", draft.name, draft.date, rows.len());
        }
        Commands::Delete { date, name, start } => {
            let day = parse_date_arg(&date)?;
            let days = schedule.load_days(&session, day, day).await?;
            let events = days.get(&day).map(Vec::as_slice).unwrap_or_default();
            let event = pick_event(events, &name, start.as_deref())?;

            let deleted = schedule.delete_event(&session, event).await?;
            println!("Deleted {:?} on {} ({} row(s))", event.name, day, deleted);
        }
    }

    Ok(())
}

/// Resolve the weekend policy for a view. An explicit flag is saved as the
/// stored setting; the view shown is saved as current.
fn weekend_policy(
    store: &SqliteStore,
    config: &AppConfig,
    display: &DisplayArgs,
    view: ViewType,
) -> Result<bool> {
    store.with_db(|db| {
        let service = SettingsService::new(db);
        let stored = service.get()?;
        let requested = display.weekend_override();
        let weekends = config.weekend_policy(requested, &stored);

        let updated = Settings {
            include_weekends: requested.unwrap_or(stored.include_weekends),
            current_view: view,
            ..stored.clone()
        };
        if updated != stored {
            service.update(&updated)?;
        }
        Ok(weekends)
    })
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    parse_calendar_date(raw).with_context(|| format!("Could not parse date {:?}", raw))
}

fn pick_event<'e>(
    events: &'e [DisplayEvent],
    name: &str,
    start: Option<&str>,
) -> Result<&'e DisplayEvent> {
    let wanted = name.trim();
    let matches: Vec<&DisplayEvent> = events
        .iter()
        .filter(|event| event.name.trim() == wanted)
        .filter(|event| match start {
            Some(start) => event
                .start_time
                .as_deref()
                .is_some_and(|time| start_sort_key(time) == start_sort_key(start)),
            None => true,
        })
        .collect();

    match matches.as_slice() {
        [event] => Ok(*event),
        [] => bail!("No event named {:?} on that day", wanted),
        many => bail!(
            "{} events named {:?} on that day, pass --start to pick one",
            many.len(),
            wanted
        ),
    }
}
