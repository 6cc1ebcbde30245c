//! Content loading integration tests
//!
//! Worlds read from JSON files and played through.

use std::fs;
use std::rc::Rc;

use serde_json::{Value, json};
use textgame_engine::words::{action, descriptions, fighting, info};
use textgame_engine::{ItemInfo, PlayerStatus, Registries, ThingKind};
use textgame_foundation::ErrorKind;
use textgame_runtime::{Factory, GameConfig, StateBuilder, load_resources};

use crate::world::{creatures, items, load_game, rooms, write_world};

// =============================================================================
// Playthrough
// =============================================================================

#[test]
fn playing_the_shipped_world() {
    let dir = tempfile::tempdir().unwrap();
    write_world(dir.path());
    let mut game = load_game(dir.path(), &GameConfig::new().with_seed(1));
    assert_eq!(game.state().player_location(), "kitchen");

    assert_eq!(game.play("d").unwrap(), descriptions::DARK_L);
    assert_eq!(game.play("take key").unwrap(), descriptions::DARK_S);
    assert_eq!(game.state().score, 0);

    assert!(game.play("u").unwrap().contains("An oil lamp stands on the table."));
    assert_eq!(game.play("get lamp").unwrap(), action::succ_take("oil lamp"));

    let out = game.play("down").unwrap();
    assert!(out.as_str().starts_with("A damp cellar."));
    assert!(out.contains("A brass key glints in the dark."));
    assert_eq!(game.state().score, 20);
    assert_eq!(game.play("take key").unwrap(), action::succ_take("brass key"));

    game.play("up").unwrap();
    assert!(game.play("e").unwrap().contains("A walled garden."));
    assert_eq!(game.state().score, 25);
    assert_eq!(game.play("hear").unwrap(), "Bees are humming.");
    assert_eq!(game.play("open n").unwrap(), action::now_open("open"));

    let out = game.play("n").unwrap();
    assert!(out.contains("A tool shed."));
    assert!(out.contains("A big rat hisses at you."));
    assert!(out.as_str().ends_with("The rat bites you."));
    assert_eq!(game.state().player_status, PlayerStatus::Fighting);
    assert_eq!(game.state().score, 33);

    game.play("take spade").unwrap();
    assert_eq!(
        game.play("kill rat").unwrap(),
        format!("{}\nThe rat flees squeaking.", fighting::use_weapon("spade", "rat"))
    );
    assert_eq!(game.state().player_status, PlayerStatus::Normal);
    assert!((game.state().health - 90.0).abs() < 1e-9);
    assert_eq!(game.play("score").unwrap(), info::score(33));
    assert!(!game.over());
}

#[test]
fn content_only_needs_rooms() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("rooms.json"), rooms().to_string()).unwrap();
    let resources = load_resources(dir.path()).unwrap();
    assert!(resources.items.is_empty());
    assert!(resources.creatures.is_empty());
    assert_eq!(resources.first_room(), Some("kitchen"));

    let state = StateBuilder::new()
        .build_resources(&resources, &Registries::new().behaviours)
        .unwrap();
    assert!(state.things_here().is_empty());
}

#[test]
fn settings_change_the_game() {
    let dir = tempfile::tempdir().unwrap();
    write_world(dir.path());
    let settings = dir.path().join("settings.json");
    fs::write(
        &settings,
        r#"{"seed": 9, "inventory_limit": 1, "synonyms": {"take": ["pick"]}, "fights": false}"#,
    )
    .unwrap();
    let config = GameConfig::from_json_file(&settings).unwrap();
    let mut game = load_game(dir.path(), &config);

    assert_eq!(game.play("pick lamp").unwrap(), action::succ_take("oil lamp"));
    game.play("down").unwrap();
    assert_eq!(game.play("take key").unwrap(), action::FAIL_INVENTORY_FULL);
    assert!(!game.registries().post_hooks.contains("fights"));
}

// =============================================================================
// Validation
// =============================================================================

fn build(rooms: &Value, items: &Value, creatures: &Value) -> textgame_foundation::Result<()> {
    let registries = GameConfig::new().registries();
    let list = |value: &Value| value.as_array().cloned().unwrap_or_default();
    StateBuilder::new()
        .build(
            "kitchen",
            &list(rooms),
            &list(items),
            &list(creatures),
            &registries.behaviours,
        )
        .map(|_| ())
}

#[test]
fn missing_rooms_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_resources(dir.path()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

#[test]
fn malformed_files_name_their_source() {
    let dir = tempfile::tempdir().unwrap();
    write_world(dir.path());
    fs::write(dir.path().join("items.json"), "{\"id\": ").unwrap();
    let err = load_resources(dir.path()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Configuration(_)));
    let context = err.context.as_ref().unwrap();
    assert!(context.to_string().contains("items.json"));
}

#[test]
fn doors_must_lead_somewhere() {
    let mut bad = rooms();
    bad[0]["doors"]["west"] = json!("attic");
    let err = build(&bad, &items(), &creatures()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Configuration(ref msg) if msg.contains("attic")));
}

#[test]
fn locked_doors_need_a_key() {
    let mut bad = rooms();
    bad[2]["locked"]["north"] = json!({"closed": true});
    assert!(build(&bad, &items(), &creatures()).is_err());
}

#[test]
fn unknown_room_fields_are_rejected() {
    let mut bad = rooms();
    bad[1]["colour"] = json!("green");
    let err = build(&bad, &items(), &creatures()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Configuration(_)));
}

#[test]
fn ids_are_unique() {
    let mut bad = rooms();
    bad[3]["id"] = json!("kitchen");
    assert!(build(&bad, &items(), &creatures()).is_err());

    let mut bad = items();
    bad[1]["id"] = json!("lamp");
    assert!(build(&rooms(), &bad, &creatures()).is_err());
}

#[test]
fn things_start_in_known_rooms() {
    let mut bad = items();
    bad[0]["initlocation"] = json!("attic");
    let err = build(&rooms(), &bad, &creatures()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Configuration(ref msg) if msg.contains("attic")));
    // named by id, the name is "oil lamp"
    assert!(matches!(err.kind, ErrorKind::Configuration(ref msg) if msg.contains("\"lamp\"")));
}

#[test]
fn unknown_types_and_behaviours() {
    let mut bad = items();
    bad[0]["type"] = json!("potion");
    let err = build(&rooms(), &bad, &creatures()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::FactoryNotFound(ref name) if name == "potion"));

    let mut bad = creatures();
    bad[1]["behaviours"] = json!({"fly": {}});
    let err = build(&rooms(), &items(), &bad).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::BehaviourNotRegistered(ref name) if name == "fly"));

    let mut bad = items();
    bad[2]["behaviours"] = json!({"randomwalk": {"mobility": 1.0}});
    let err = build(&rooms(), &bad, &creatures()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Configuration(_)));
}

#[test]
fn hosts_add_thing_types() {
    let mut factory = Factory::new();
    factory.register(
        "potion",
        Rc::new(|fields: Value| serde_json::from_value::<ItemInfo>(fields).map(ThingKind::Item)),
    );
    let mut potions = items();
    potions[0]["type"] = json!("potion");
    potions[0]["value"] = json!(4);

    let registries = GameConfig::new().registries();
    let state = StateBuilder::new()
        .with_factory(factory)
        .build(
            "kitchen",
            rooms().as_array().unwrap(),
            potions.as_array().unwrap(),
            &[],
            &registries.behaviours,
        )
        .unwrap();
    assert_eq!(state.thing("lamp").unwrap().value(), 4);
    assert!(!state.thing("lamp").unwrap().is_lightsource());
}
