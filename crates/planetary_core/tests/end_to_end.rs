use planetary_core::db::open_db_in_memory;
use planetary_core::{
    parse_payload, ListQuery, MissionDraft, MissionListQuery, MissionPatch, Planet, PlanetPatch,
    RecordService, ScientistDraft, ScientistPatch, ServiceError, SqliteRepository,
    ValidationError,
};
use serde_json::json;

#[test]
fn mars_survey_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRepository::try_new(&conn).unwrap());

    let mars = service.create_planet(&Planet::named("Mars")).unwrap();
    let ada = service
        .create_scientist(parse_payload(json!({ "name": "Ada", "field_of_study": "Astrophysics" })).unwrap())
        .unwrap();
    let survey = service
        .create_mission(MissionDraft {
            name: Some("Survey".to_string()),
            planet_id: mars.id(),
            scientist_id: ada.id(),
        })
        .unwrap();
    let survey_id = survey.id().unwrap();

    let value = service.to_json(&survey).unwrap();
    assert_eq!(value["planet"]["name"], json!("Mars"));
    assert_eq!(value["scientist"]["field_of_study"], json!("Astrophysics"));

    let report = service.delete_planet(mars.id().unwrap()).unwrap();
    assert_eq!(report.deleted_missions, vec![survey_id]);

    assert!(matches!(
        service.get_mission(survey_id),
        Err(ServiceError::NotFound {
            entity: "mission",
            ..
        })
    ));
    assert!(service.get_scientist(ada.id().unwrap()).is_ok());
}

#[test]
fn create_reports_first_invalid_field() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRepository::try_new(&conn).unwrap());

    let err = service
        .create_scientist(ScientistDraft {
            name: Some(String::new()),
            field_of_study: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::ScientistNameRequired)
    ));
    assert_eq!(err.to_string(), "Scientist must have a name.");

    let err = service.create_mission(MissionDraft::default()).unwrap_err();
    assert_eq!(err.to_string(), "Mission must have name.");

    let err = service
        .create_mission(MissionDraft {
            name: Some("Survey".to_string()),
            planet_id: Some(0),
            scientist_id: None,
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Mission must have scientist ID.");

    assert!(service
        .list_missions(&MissionListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn dangling_mission_reference_is_an_integrity_error() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRepository::try_new(&conn).unwrap());

    let err = service
        .create_mission(MissionDraft {
            name: Some("Ghost".to_string()),
            planet_id: Some(12),
            scientist_id: Some(34),
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Integrity(_)), "unexpected error: {err}");
}

#[test]
fn patches_update_only_present_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRepository::try_new(&conn).unwrap());

    let mut planet = Planet::named("Mars");
    planet.nearest_star = Some("Sun".to_string());
    let id = service.create_planet(&planet).unwrap().id().unwrap();

    let patch: PlanetPatch =
        parse_payload(json!({ "distance_from_earth": 225, "nearest_star": null })).unwrap();
    let updated = service.update_planet(id, patch).unwrap();
    assert_eq!(updated.name.as_deref(), Some("Mars"));
    assert_eq!(updated.distance_from_earth, Some(225));
    assert_eq!(updated.nearest_star, None);
    assert_eq!(service.get_planet(id).unwrap(), updated);
}

#[test]
fn rejected_patch_leaves_stored_record_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRepository::try_new(&conn).unwrap());
    let ada = service
        .create_scientist(ScientistDraft {
            name: Some("Ada".to_string()),
            field_of_study: Some("Astrophysics".to_string()),
        })
        .unwrap();
    let id = ada.id().unwrap();

    let patch: ScientistPatch =
        parse_payload(json!({ "name": "Grace", "field_of_study": null })).unwrap();
    let err = service.update_scientist(id, patch).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::ScientistFieldOfStudyRequired)
    ));
    assert_eq!(service.get_scientist(id).unwrap(), ada);
}

#[test]
fn mission_can_move_between_planets() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRepository::try_new(&conn).unwrap());
    let mars = service.create_planet(&Planet::named("Mars")).unwrap();
    let venus = service.create_planet(&Planet::named("Venus")).unwrap();
    let ada = service
        .create_scientist(ScientistDraft {
            name: Some("Ada".to_string()),
            field_of_study: Some("Astrophysics".to_string()),
        })
        .unwrap();
    let survey = service
        .create_mission(MissionDraft {
            name: Some("Survey".to_string()),
            planet_id: mars.id(),
            scientist_id: ada.id(),
        })
        .unwrap();

    let moved = service
        .update_mission(
            survey.id().unwrap(),
            MissionPatch {
                planet_id: Some(venus.id()),
                ..MissionPatch::default()
            },
        )
        .unwrap();
    assert_eq!(Some(moved.planet_id()), venus.id());

    let report = service.delete_planet(mars.id().unwrap()).unwrap();
    assert!(report.deleted_missions.is_empty());
    assert!(service.get_mission(survey.id().unwrap()).is_ok());
}

#[test]
fn updates_and_deletes_of_missing_records_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRepository::try_new(&conn).unwrap());

    assert!(matches!(
        service.update_planet(5, PlanetPatch::default()),
        Err(ServiceError::NotFound { entity: "planet", id: 5 })
    ));
    assert!(matches!(
        service.delete_scientist(9),
        Err(ServiceError::NotFound { entity: "scientist", id: 9 })
    ));
    assert!(matches!(
        service.delete_mission(3),
        Err(ServiceError::NotFound { entity: "mission", id: 3 })
    ));
}

#[test]
fn malformed_payloads_are_rejected_before_validation() {
    let unknown = parse_payload::<PlanetPatch>(json!({ "moons": 2 })).unwrap_err();
    assert!(matches!(unknown, ServiceError::Payload(_)));

    let wrong_type =
        parse_payload::<MissionDraft>(json!({ "name": "Survey", "planet_id": "one" })).unwrap_err();
    assert!(matches!(wrong_type, ServiceError::Payload(_)));
}

#[test]
fn serialize_accepts_caller_rules_and_rejects_malformed_ones() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRepository::try_new(&conn).unwrap());
    let mars = service.create_planet(&Planet::named("Mars")).unwrap();

    let value = service.serialize(&mars, &["-missions"]).unwrap();
    assert!(value.get("missions").is_none());

    let err = service.serialize(&mars, &["missions"]).unwrap_err();
    assert!(matches!(err, ServiceError::Rules(_)));

    let planets = service.list_planets(&ListQuery::default()).unwrap();
    assert_eq!(planets, vec![mars]);
}
