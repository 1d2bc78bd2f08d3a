use planetary_core::db::open_db_in_memory;
use planetary_core::{
    Mission, MissionListQuery, MissionRepository, Planet, PlanetRepository, RepoError, Scientist,
    ScientistRepository, SqliteRepository,
};
use rusqlite::Connection;

struct Seeded {
    planet_id: i64,
    other_planet_id: i64,
    scientist_id: i64,
    planet_missions: Vec<i64>,
    other_missions: Vec<i64>,
}

fn seed(repo: &SqliteRepository<'_>) -> Seeded {
    let planet_id = repo.create_planet(&Planet::named("Mars")).unwrap();
    let other_planet_id = repo.create_planet(&Planet::named("Venus")).unwrap();
    let scientist_id = repo
        .create_scientist(&Scientist::new("Ada", "Astrophysics").unwrap())
        .unwrap();

    let planet_missions = ["Survey", "Sample Return", "Orbiter"]
        .into_iter()
        .map(|name| {
            let mission = Mission::new(name, Some(planet_id), Some(scientist_id)).unwrap();
            repo.create_mission(&mission).unwrap()
        })
        .collect();
    let flyby = Mission::new("Flyby", Some(other_planet_id), Some(scientist_id)).unwrap();
    let other_missions = vec![repo.create_mission(&flyby).unwrap()];

    Seeded {
        planet_id,
        other_planet_id,
        scientist_id,
        planet_missions,
        other_missions,
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn deleting_planet_removes_exactly_its_missions() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::try_new(&conn).unwrap();
    let seeded = seed(&repo);

    let deleted = repo.delete_planet(seeded.planet_id).unwrap();
    assert_eq!(deleted, seeded.planet_missions);

    assert!(repo.get_planet(seeded.planet_id).unwrap().is_none());
    for id in &seeded.planet_missions {
        assert!(repo.get_mission(*id).unwrap().is_none());
    }

    let remaining = repo.list_missions(&MissionListQuery::default()).unwrap();
    let remaining: Vec<_> = remaining.iter().filter_map(Mission::id).collect();
    assert_eq!(remaining, seeded.other_missions);
    assert!(repo.get_planet(seeded.other_planet_id).unwrap().is_some());
    assert!(repo.get_scientist(seeded.scientist_id).unwrap().is_some());
}

#[test]
fn deleting_scientist_removes_missions_on_every_planet() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::try_new(&conn).unwrap();
    let seeded = seed(&repo);

    let deleted = repo.delete_scientist(seeded.scientist_id).unwrap();
    let mut expected = seeded.planet_missions.clone();
    expected.extend(&seeded.other_missions);
    assert_eq!(deleted, expected);

    assert_eq!(count(&conn, "missions"), 0);
    assert_eq!(count(&conn, "planets"), 2);
    assert_eq!(count(&conn, "scientists"), 0);
}

#[test]
fn deleting_planet_without_missions_reports_empty_cascade() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::try_new(&conn).unwrap();
    let id = repo.create_planet(&Planet::named("Pluto")).unwrap();

    assert!(repo.delete_planet(id).unwrap().is_empty());
    assert_eq!(count(&conn, "planets"), 0);
}

#[test]
fn deleting_missing_parent_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.delete_planet(42),
        Err(RepoError::NotFound {
            entity: "planet",
            id: 42
        })
    ));
    assert!(matches!(
        repo.delete_scientist(7),
        Err(RepoError::NotFound {
            entity: "scientist",
            id: 7
        })
    ));
}

#[test]
fn failed_parent_delete_rolls_back_mission_deletes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::try_new(&conn).unwrap();
    let seeded = seed(&repo);
    conn.execute_batch(
        "CREATE TRIGGER planets_locked
         BEFORE DELETE ON planets
         BEGIN
             SELECT RAISE(ABORT, 'planet is locked');
         END;",
    )
    .unwrap();

    let err = repo.delete_planet(seeded.planet_id).unwrap_err();
    assert!(matches!(err, RepoError::Integrity(_)), "unexpected error: {err}");

    assert!(repo.get_planet(seeded.planet_id).unwrap().is_some());
    let missions = repo
        .list_missions(&MissionListQuery {
            planet_id: Some(seeded.planet_id),
            ..MissionListQuery::default()
        })
        .unwrap();
    let ids: Vec<_> = missions.iter().filter_map(Mission::id).collect();
    assert_eq!(ids, seeded.planet_missions);
    assert_eq!(count(&conn, "missions"), 4);
}

#[test]
fn storage_cascade_backs_up_raw_deletes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::try_new(&conn).unwrap();
    let seeded = seed(&repo);

    conn.execute("DELETE FROM planets WHERE id = ?1;", [seeded.planet_id])
        .unwrap();

    assert_eq!(count(&conn, "missions"), seeded.other_missions.len() as i64);
}

#[test]
fn cascade_survives_reopen_of_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planetary.sqlite3");

    let (planet_id, mission_ids) = {
        let conn = planetary_core::db::open_db(&path).unwrap();
        let repo = SqliteRepository::try_new(&conn).unwrap();
        let seeded = seed(&repo);
        (seeded.planet_id, seeded.planet_missions)
    };

    let conn = planetary_core::db::open_db(&path).unwrap();
    let repo = SqliteRepository::try_new(&conn).unwrap();
    assert_eq!(repo.delete_planet(planet_id).unwrap(), mission_ids);
    assert_eq!(count(&conn, "missions"), 1);
}
