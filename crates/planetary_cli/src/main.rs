//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `planetary_core` linkage against a real database file.
//! - Walk one create/serialize/cascade-delete cycle and print the results.

use log::info;
use planetary_core::db::open_db;
use planetary_core::{
    init_logging_from_config, CoreConfig, MissionDraft, Planet, RecordService, ScientistDraft,
    ServiceError, SqliteRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("planetary_core ping={}", planetary_core::ping());
    println!("planetary_core version={}", planetary_core::core_version());

    let config = CoreConfig::from_env();
    if let Err(err) = init_logging_from_config(&config) {
        // Logging is optional for the smoke run.
        eprintln!("logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("smoke run failed: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CoreConfig) -> Result<(), String> {
    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let repo = SqliteRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = RecordService::new(repo);
    info!(
        "event=cli_smoke module=cli status=start db_path={}",
        config.db_path.display()
    );

    smoke_cycle(&service).map_err(|err| err.to_string())
}

fn smoke_cycle(service: &RecordService<SqliteRepository<'_>>) -> Result<(), ServiceError> {
    let mut mars = Planet::named("Mars");
    mars.distance_from_earth = Some(225);
    mars.nearest_star = Some("Sun".to_string());
    let mars = service.create_planet(&mars)?;

    let ada = service.create_scientist(ScientistDraft {
        name: Some("Ada".to_string()),
        field_of_study: Some("Astrophysics".to_string()),
    })?;
    let survey = service.create_mission(MissionDraft {
        name: Some("Survey".to_string()),
        planet_id: mars.id(),
        scientist_id: ada.id(),
    })?;

    println!("planet={}", service.to_json(&mars)?);
    println!("mission={}", service.to_json(&survey)?);

    let Some(mars_id) = mars.id() else {
        return Ok(());
    };
    let report = service.delete_planet(mars_id)?;
    println!(
        "deleted planet={} missions={:?}",
        mars_id, report.deleted_missions
    );

    // Leave the database as it was, minus the sequence advance.
    if let Some(ada_id) = ada.id() {
        service.delete_scientist(ada_id)?;
    }

    info!("event=cli_smoke module=cli status=ok");
    Ok(())
}
