//! Pet Reminders CLI Entry Point

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use pet_reminders::commands::{self, NewReminder, ReminderEdit, WeekDay};
use pet_reminders::config::APP_NAME;
use pet_reminders::domain::{format_time_12h, Category, Frequency, Pet, Reminder, TimeSlot};
use pet_reminders::views::{Agenda, ReminderOverview, ViewMode};
use pet_reminders::{Config, ReminderStore, StorageKind};

#[derive(Debug, Parser)]
#[command(name = "pet-reminders", version, about = "Pet-care reminders grouped by time of day")]
struct Cli {
    /// Directory holding the reminder store
    #[arg(long, env = "PET_REMINDERS_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[arg(long, env = "PET_REMINDERS_STORAGE", value_enum, default_value_t = StorageKind::Json, global = true)]
    storage: StorageKind,

    #[arg(long, env = "PET_REMINDERS_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Do not seed sample data into an empty store
    #[arg(long, global = true)]
    no_seed: bool,

    /// Only show reminders for this pet id
    #[arg(long = "filter-pet", global = true)]
    filter_pet: Option<String>,

    #[arg(long = "filter-category", global = true)]
    filter_category: Option<Category>,

    #[arg(long = "filter-slot", global = true)]
    filter_slot: Option<TimeSlot>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Today's reminders grouped by time of day
    Agenda {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Every reminder, grouped by frequency
    List {
        #[arg(long, default_value = "all")]
        view: ViewMode,
    },
    /// Add a reminder
    Add {
        title: String,
        #[arg(long)]
        pet: String,
        /// HH:MM, 24-hour
        #[arg(long)]
        time: String,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit a reminder
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        pet: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        #[arg(long)]
        clear_notes: bool,
    },
    /// Mark a reminder done, or undo it
    Toggle { id: String },
    Delete { id: String },
    Pets,
    /// Calendar strip for the week containing a date
    Week {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Streak { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::new(cli.data_dir.clone(), cli.log_dir.clone(), cli.storage, !cli.no_seed);

    if let Err(e) = rolling_logger::init_logger(&config.log_dir, APP_NAME) {
        eprintln!("Logging disabled: {}", e);
    }
    let _ = rolling_logger::info(&format!("Starting with data dir {}", config.data_dir.display()));

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = rolling_logger::error(&e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &Config) -> Result<(), String> {
    let today = Local::now().date_naive();
    let repo = config.open_repository().map_err(|e| e.to_string())?;
    let mut store = ReminderStore::load(repo, today).map_err(|e| e.to_string())?;
    if config.seed {
        store.initialize_data(today).map_err(|e| e.to_string())?;
    }
    commands::set_filters(&mut store, cli.filter_pet, cli.filter_category, cli.filter_slot)?;

    match cli.command {
        Command::Agenda { date } => {
            let agenda = commands::get_agenda(&mut store, date);
            print_agenda(&agenda);
        }
        Command::List { view } => print_overview(&commands::list_reminders(&store, view)),
        Command::Add {
            title,
            pet,
            time,
            category,
            frequency,
            start,
            notes,
        } => {
            let input = NewReminder {
                title,
                pet_id: pet,
                category,
                notes,
                start_date: start,
                time,
                frequency,
            };
            let created = commands::create_reminder(&mut store, input, today)?;
            println!("Added {}", created.id);
            println!("{}", reminder_line(&created));
        }
        Command::Edit {
            id,
            title,
            pet,
            time,
            category,
            frequency,
            start,
            notes,
            clear_notes,
        } => {
            let edit = ReminderEdit {
                title,
                pet_id: pet,
                category,
                notes,
                clear_notes,
                start_date: start,
                time,
                frequency,
            };
            let updated = commands::update_reminder(&mut store, &id, edit)?;
            println!("{}", reminder_line(&updated));
        }
        Command::Toggle { id } => {
            let toggled = commands::toggle_reminder(&mut store, &id)?;
            let state = if toggled.is_completed { "Completed" } else { "Reopened" };
            println!("{}: {} (streak {})", state, toggled.title, toggled.streak);
        }
        Command::Delete { id } => {
            let removed = commands::delete_reminder(&mut store, &id)?;
            println!("Deleted {}", removed.title);
        }
        Command::Pets => print_pets(&commands::list_pets(&store)),
        Command::Week { date } => print_week(&commands::get_week(&store, date.unwrap_or(today), today)),
        Command::Streak { id } => println!("{}", commands::get_streak(&store, &id)?),
    }
    Ok(())
}

fn reminder_line(r: &Reminder) -> String {
    let mark = if r.is_completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{} {:>8}  {}  ({}, {}, {})",
        mark,
        format_time_12h(&r.time),
        r.title,
        r.pet_name,
        r.category,
        r.frequency
    );
    if r.streak > 0 && r.frequency.is_recurring() {
        line.push_str(&format!("  streak {}", r.streak));
    }
    line.push_str(&format!("  #{}", r.id));
    line
}

fn print_agenda(agenda: &Agenda<'_>) {
    if agenda.all_caught_up() {
        println!("All caught up!");
    }
    for (slot, members) in &agenda.pending {
        println!("{} {} ({})", slot.icon(), slot.label(), members.len());
        for r in members {
            println!("  {}", reminder_line(r));
        }
    }
    if !agenda.completed.is_empty() {
        println!("Completed ({})", agenda.completed.len());
        for r in &agenda.completed {
            println!("  {}", reminder_line(r));
        }
    }
}

fn print_overview(overview: &ReminderOverview<'_>) {
    let counts = overview.counts;
    println!(
        "All {} | Pending {} | Completed {}",
        counts.all, counts.pending, counts.completed
    );
    if overview.is_empty() {
        println!("No {} reminders", overview.mode);
        return;
    }
    for (frequency, members) in &overview.by_frequency {
        println!("{} ({})", frequency, members.len());
        for r in members {
            println!("  {}", reminder_line(r));
        }
    }
}

fn print_pets(pets: &[Pet]) {
    for pet in pets {
        println!("{} {}  #{}", pet.avatar.as_deref().unwrap_or("-"), pet.name, pet.id);
    }
}

fn print_week(week: &[WeekDay]) {
    let mut days = String::new();
    let mut marks = String::new();
    for cell in week {
        let day = if cell.date.is_today {
            format!("[{} {:>2}]", cell.date.day_name, cell.date.day)
        } else {
            format!(" {} {:>2} ", cell.date.day_name, cell.date.day)
        };
        days.push_str(&day);
        let dot = if cell.has_completions { "   *" } else { "    " };
        let link = if cell.connects_next { "----" } else { "    " };
        marks.push_str(dot);
        marks.push_str(link);
    }
    println!("{}", days);
    println!("{}", marks);
}
