//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `planboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use planboard_core::db::open_db_in_memory;
use planboard_core::{AppController, SqliteSlotRepository, User};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("planboard smoke probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteSlotRepository::try_new(&conn)?;
    let mut controller = AppController::start(repo)?;

    println!("planboard_core version={}", planboard_core::core_version());
    println!("screen={:?}", controller.screen());

    controller.log_in(User::new("Smoke", "smoke@local", "-"))?;
    println!("screen={:?}", controller.screen());

    controller.open_new_project();
    if let Some(draft) = controller.modal_draft_mut() {
        draft.title = "Smoke check".to_string();
    }
    controller.save_draft()?;

    println!(
        "projects={} filtered={}",
        controller.projects().len(),
        controller.filtered_projects().len()
    );

    let report = controller.report_as_of("1970-01-01");
    println!(
        "report total={} upcoming={} overdue={}",
        report.total, report.upcoming, report.overdue
    );

    controller.shutdown()?;
    Ok(())
}
