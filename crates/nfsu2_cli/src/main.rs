mod edits;
mod prompt;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use nfsu2_core::backup::{backup_path_for, copy_file};
use nfsu2_core::layout::CAR_SLOT_COUNT;
use nfsu2_core::{CoreError, CoreErrorCode, PerformanceMode, SaveRecord, SaveSession, Snapshot};
use nfsu2_render::{
    TextRenderOptions, render_json_full, render_layout_json, render_layout_text,
    render_summary_text,
};
use serde_json::Value as JsonValue;

use edits::{EditPlan, money_edit};

const EXIT_USAGE: i32 = 1;
const EXIT_UNREADABLE: i32 = 2;
const EXIT_INVALID: i32 = 3;
const EXIT_CORRUPT: i32 = 4;
const EXIT_SAVE_FAILED: i32 = 5;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE")]
    path: PathBuf,
    /// Copy the save to SAVE.bak before touching it.
    #[arg(short = 'b', long)]
    backup: bool,
    #[arg(long = "set-money", value_name = "AMOUNT", allow_hyphen_values = true)]
    set_money: Option<i64>,
    #[arg(long = "max-car", value_name = "1-5", value_parser = parse_car_number)]
    max_car: Vec<usize>,
    #[arg(long = "nill-car", value_name = "1-5", value_parser = parse_car_number)]
    nill_car: Vec<usize>,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    layout: bool,
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn has_edits(&self) -> bool {
        self.set_money.is_some() || !self.max_car.is_empty() || !self.nill_car.is_empty()
    }

    fn edit_plan(&self) -> EditPlan {
        let mut cars = Vec::new();
        cars.extend(self.nill_car.iter().map(|&slot| (slot, PerformanceMode::Nill)));
        cars.extend(self.max_car.iter().map(|&slot| (slot, PerformanceMode::Max)));
        EditPlan {
            money: self.set_money.and_then(money_edit),
            cars,
        }
    }

    fn text_options(&self) -> TextRenderOptions {
        TextRenderOptions {
            verbose: self.verbose,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
        let _ = e.print();
        process::exit(code);
    });

    if let Some(slot) = cli.max_car.iter().find(|slot| cli.nill_car.contains(slot)) {
        eprintln!("car {} cannot be both maxed and nilled in one run", slot + 1);
        process::exit(EXIT_USAGE);
    }

    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    if !cli.path.is_file() {
        eprintln!("File \"{}\" cannot be opened for reading", cli.path.display());
        return EXIT_UNREADABLE;
    }

    if cli.backup {
        let backup = backup_path_for(&cli.path);
        if let Err(e) = copy_file(&cli.path, &backup) {
            eprintln!("Error creating backup {}: {}", backup.display(), e.message);
            return EXIT_UNREADABLE;
        }
    }

    if !cli.has_edits() && (cli.json || cli.layout) {
        return inspect(cli);
    }

    let mut session = match SaveSession::open(&cli.path) {
        Ok(session) => session,
        Err(e) => return report(cli, &e),
    };

    let result = if cli.has_edits() {
        edit_from_flags(cli, &mut session)
    } else {
        edit_interactively(cli, &mut session)
    };
    if let Err(e) = result {
        return report(cli, &e);
    }

    match session.close() {
        Ok(()) => {
            if !cli.json {
                println!("Changes saved...");
            }
            0
        }
        Err(e) => {
            eprintln!("Warning: changes were not saved: {}", e.message);
            EXIT_SAVE_FAILED
        }
    }
}

fn inspect(cli: &Cli) -> i32 {
    let record = match SaveRecord::load(&cli.path) {
        Ok(record) => record,
        Err(e) => return report(cli, &e),
    };

    let layout = record.layout();
    if cli.layout && !cli.json {
        println!("{}", render_layout_text(&layout));
        return 0;
    }

    let json = if cli.layout {
        render_layout_json(&layout)
    } else {
        match record.snapshot() {
            Ok(snapshot) => render_json_full(&snapshot),
            Err(e) => return report(cli, &e),
        }
    };
    print_json(&json)
}

fn edit_from_flags(cli: &Cli, session: &mut SaveSession) -> Result<(), CoreError> {
    if let Some(requested) = cli.set_money
        && money_edit(requested).is_none()
    {
        eprintln!("Money {requested} is not a positive 32-bit amount; leaving it unchanged");
    }

    // Every field must decode before anything is changed.
    session.record().snapshot()?;

    let plan = cli.edit_plan();
    if plan.is_empty() {
        log::info!("no applicable edits for {}", session.path().display());
    }
    let skipped = plan.apply(session.record_mut())?;
    for slot in skipped {
        eprintln!("Car slot {} is empty; performance not changed", slot + 1);
    }

    let snapshot = session.record().snapshot()?;
    print_snapshot(cli, &snapshot);
    Ok(())
}

fn edit_interactively(cli: &Cli, session: &mut SaveSession) -> Result<(), CoreError> {
    let snapshot = session.record().snapshot()?;
    print_snapshot(cli, &snapshot);

    let used_slots = session.record().used_slot_indices()?;
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let plan = prompt::collect_edits(&mut input, &mut output, &used_slots)
        .map_err(|e| CoreError::io("reading answers from stdin", e))?;
    if plan.is_empty() {
        log::info!("no changes requested for {}", session.path().display());
        return Ok(());
    }
    plan.apply(session.record_mut())?;
    Ok(())
}

fn print_snapshot(cli: &Cli, snapshot: &Snapshot) {
    if cli.json {
        print_json(&render_json_full(snapshot));
    } else {
        println!("{}", render_summary_text(snapshot, cli.text_options()));
    }
}

fn print_json(json: &JsonValue) -> i32 {
    match serde_json::to_string_pretty(json) {
        Ok(rendered) => {
            println!("{rendered}");
            0
        }
        Err(e) => {
            eprintln!("Error rendering JSON output: {e}");
            EXIT_USAGE
        }
    }
}

fn report(cli: &Cli, e: &CoreError) -> i32 {
    match e.code {
        CoreErrorCode::Io => {
            eprintln!("Error reading {}: {}", cli.path.display(), e.message);
            EXIT_UNREADABLE
        }
        CoreErrorCode::Format => {
            eprintln!("File \"{}\" not a valid save file", cli.path.display());
            eprintln!("  {}", e.message);
            EXIT_INVALID
        }
        CoreErrorCode::CorruptData => {
            eprintln!("Error parsing save file: {}", cli.path.display());
            eprintln!("  {}", e.message);
            EXIT_CORRUPT
        }
    }
}

fn parse_car_number(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if (1..=CAR_SLOT_COUNT).contains(&n) => Ok(n - 1),
        _ => Err(format!("invalid car number '{value}', expected 1..={CAR_SLOT_COUNT}")),
    }
}
