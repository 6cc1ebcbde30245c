//! Playthrough integration tests
//!
//! Short sessions with the stock commands and hooks.

use textgame_engine::defaults::hooks;
use textgame_engine::words::{action, descriptions, fighting, info, moving};
use textgame_engine::{
    CreatureInfo, Game, MonsterInfo, PlayerStatus, Room, State, Strength, Thing, ThingKind, Timer,
    Trigger,
};
use textgame_foundation::Direction;

use crate::world::{manor, manor_game, stock_registries};

// =============================================================================
// Doors and Scoring
// =============================================================================

#[test]
fn locked_door_needs_the_key() {
    let mut game = manor_game();

    assert_eq!(game.play("north").unwrap(), moving::FAIL_DOOR_LOCKED);
    assert_eq!(game.play("open north").unwrap(), action::FAIL_NO_KEY);
    assert_eq!(game.play("open").unwrap(), action::fail_opendir("open"));

    assert_eq!(game.play("get key").unwrap(), action::succ_take("rusty key"));
    assert_eq!(game.play("open n").unwrap(), action::now_open("open"));
    assert_eq!(game.play("open north").unwrap(), action::ALREADY_OPEN);

    assert_eq!(game.play("n").unwrap(), "Gold glitters everywhere.");
    assert_eq!(game.state().player_location(), "vault");
}

#[test]
fn locking_the_door_again() {
    let mut game = manor_game();
    game.play("take key").unwrap();
    game.play("open north").unwrap();
    game.play("north").unwrap();
    game.play("back").unwrap();

    assert_eq!(game.state().player_location(), "hall");
    assert_eq!(game.play("lock north").unwrap(), action::now_open("lock"));
    assert_eq!(game.play("close north").unwrap(), action::ALREADY_CLOSED);
    assert_eq!(game.play("north").unwrap(), moving::FAIL_DOOR_LOCKED);
}

#[test]
fn wrong_keys_do_not_fit() {
    let mut game = manor_game();
    game.state_mut()
        .things
        .insert_thing(Thing::new("pin", ThingKind::key(8)));
    game.state_mut().add_to_inventory("pin").unwrap();
    assert_eq!(game.play("open north").unwrap(), action::FAIL_OPEN);
    assert_eq!(game.play("open west").unwrap(), moving::FAIL_NO_DOOR);
}

#[test]
fn rooms_score_on_the_first_visit_only() {
    let mut game = manor_game();
    game.play("take key").unwrap();
    game.play("open north").unwrap();

    game.play("north").unwrap();
    assert_eq!(game.state().score, 10);
    assert_eq!(game.play("south").unwrap(), "Hall.");
    assert_eq!(game.play("north").unwrap(), "Vault.");
    assert_eq!(game.state().score, 10);

    game.play("south").unwrap();
    game.play("east").unwrap();
    assert_eq!(game.state().score, 10 + Room::DEFAULT_VALUE);
    assert_eq!(game.play("score").unwrap(), info::score(15));
}

#[test]
fn bad_directions() {
    let mut game = manor_game();
    assert_eq!(game.play("go").unwrap(), moving::FAIL_WHERE);
    assert_eq!(game.play("go sideways").unwrap(), moving::FAIL_NOT_DIRECTION);
    assert_eq!(game.play("west").unwrap(), moving::FAIL_CANT_GO);
    assert_eq!(game.play("back").unwrap(), moving::FAIL_NO_MEMORY);
    assert_eq!(game.state().player_location(), "hall");
}

// =============================================================================
// Inventory
// =============================================================================

#[test]
fn carrying_things_around() {
    let mut game = manor_game();
    assert_eq!(game.play("inventory").unwrap(), action::NO_INVENTORY);
    assert_eq!(game.play("take").unwrap(), action::which_item("take"));
    assert_eq!(game.play("take lamp").unwrap(), action::no_such_item("lamp"));

    game.play("take key").unwrap();
    assert_eq!(game.play("take key").unwrap(), action::OWN_ALREADY);
    assert_eq!(game.play("inventory").unwrap(), "You are now carrying:\nA rusty key");

    game.play("east").unwrap();
    assert_eq!(game.play("drop key").unwrap(), action::SUCC_DROP);
    assert_eq!(game.play("drop key").unwrap(), action::FAIL_DROP);
    assert_eq!(game.state().room_of("key"), Some("yard"));
    assert_eq!(
        game.play("look").unwrap(),
        "Weeds grow in the yard.\nA rusty key lies on the floor."
    );
}

#[test]
fn full_inventories_refuse_more() {
    let mut game = manor_game();
    game.state_mut().set_inventory_limit(Some(0));
    assert_eq!(game.play("take key").unwrap(), action::FAIL_INVENTORY_FULL);
    assert_eq!(game.state().room_of("key"), Some("hall"));
}

// =============================================================================
// Day and Night
// =============================================================================

fn daylight_game(with_lamp: bool) -> Game {
    let mut state = manor();
    if with_lamp {
        state
            .things
            .insert_thing(Thing::new("lamp", ThingKind::lightsource()));
        state.add_to_inventory("lamp").unwrap();
    }
    let mut registries = stock_registries();
    registries
        .register_pre_hook("daylight", hooks::daylight(2, 1))
        .register_post_hook("time", hooks::time);
    Game::new(state, registries)
}

#[test]
fn night_falls_and_lifts() {
    let mut game = daylight_game(false);
    assert!(game.play("look").unwrap().as_str().starts_with("You stand in a draughty hall."));
    game.play("look").unwrap();

    assert_eq!(
        game.play("look").unwrap(),
        format!("{}\n{}", info::SUNSET, descriptions::DARK_L)
    );
    assert!(game.state().is_dark_here());

    let out = game.play("take key").unwrap();
    assert!(out.as_str().starts_with(info::SUNRISE));
    assert!(out.contains(&action::succ_take("rusty key")));
}

#[test]
fn dark_rooms_hide_things() {
    let mut game = daylight_game(false);
    game.play("look").unwrap();
    game.play("look").unwrap();
    assert_eq!(
        game.play("take key").unwrap(),
        format!("{}\n{}", info::SUNSET, descriptions::DARK_S)
    );
    assert!(!game.state().inventory_has("key"));
}

#[test]
fn lamps_light_the_night() {
    let mut game = daylight_game(true);
    game.play("look").unwrap();
    game.play("look").unwrap();
    let out = game.play("look").unwrap();
    assert!(out.as_str().starts_with(info::SUNSET));
    assert!(out.contains("You stand in a draughty hall."));
    assert!(!game.state().is_dark_here());
}

// =============================================================================
// Fights
// =============================================================================

fn arena(dark: bool) -> Game {
    let mut arena = Room::new("arena")
        .with_description("Sand and blood.", "Arena.")
        .with_door(Direction::North, "gate");
    if dark {
        arena = arena.always_dark();
    }
    let rooms = vec![arena, Room::new("gate").with_door(Direction::South, "arena")];
    let troll = Thing::new(
        "troll",
        ThingKind::Monster(MonsterInfo {
            creature: CreatureInfo {
                health: 30.0,
                ..CreatureInfo::default()
            },
            strength: Strength::new(10.0, 0.0),
            fight_message: "The troll swings its club.".to_string(),
            win_message: "The troll collapses.".to_string(),
            loss_message: "The troll roars in triumph.".to_string(),
            ..MonsterInfo::default()
        }),
    )
    .with_initlocation("arena");
    let sword = Thing::new("sword", ThingKind::weapon(Strength::new(20.0, 0.0)))
        .with_name("old sword")
        .with_initlocation("arena");
    let state = State::new(rooms, "arena", vec![troll, sword], 11).unwrap();

    let mut registries = stock_registries();
    registries.register_post_hook("fights", hooks::manage_fights);
    Game::new(state, registries)
}

#[test]
fn fighting_a_troll() {
    let mut game = arena(false);

    assert_eq!(
        game.play("fight troll").unwrap(),
        format!("{}\nThe troll swings its club.", action::NO_WEAPONS)
    );
    assert_eq!(game.state().player_status, PlayerStatus::Fighting);

    game.play("take sword").unwrap();
    assert_eq!(
        game.play("attack troll").unwrap(),
        format!(
            "{}\n{}\nThe troll swings its club.",
            fighting::use_weapon("old sword", "troll"),
            fighting::survived_attack("troll")
        )
    );
    assert_eq!(
        game.play("kill troll").unwrap(),
        format!("{}\nThe troll collapses.", fighting::use_weapon("old sword", "troll"))
    );
    assert_eq!(game.state().player_status, PlayerStatus::Normal);
    assert!((game.state().health - 70.0).abs() < 1e-9);

    assert_eq!(game.play("fight troll").unwrap(), fighting::already_dead("troll"));
    assert_eq!(game.play("fight dragon").unwrap(), action::no_such_fight("dragon"));
    game.play("north").unwrap();
    assert!(!game.over());
}

#[test]
fn running_away_is_deadly() {
    let mut game = arena(false);
    game.play("take sword").unwrap();
    assert_eq!(game.play("north").unwrap(), moving::DEATH_BY_COWARDICE);
    assert_eq!(game.state().player_status, PlayerStatus::Dead);
    assert!(game.over());
}

#[test]
fn monsters_win_in_the_dark() {
    let mut game = arena(true);
    let out = game.play("listen").unwrap();
    assert!(out.as_str().ends_with(&fighting::dark_death("troll")));
    assert!(game.over());
}

// =============================================================================
// Events
// =============================================================================

fn eventful_game() -> Game {
    let mut registries = stock_registries();
    registries
        .register_post_hook("events", hooks::ready_events)
        .register_post_hook("time", hooks::time);
    Game::new(manor(), registries)
}

#[test]
fn timers_go_off_once() {
    let mut game = eventful_game();
    game.state_mut()
        .set_event(Timer::new(2, |_| Some("A bell tolls.".into())));

    assert!(!game.play("look").unwrap().contains("bell"));
    assert!(!game.play("look").unwrap().contains("bell"));
    assert!(game.play("look").unwrap().as_str().ends_with("A bell tolls."));
    assert_eq!(game.state().scheduled_events(), 0);
    assert!(!game.play("look").unwrap().contains("bell"));
}

#[test]
fn triggers_watch_the_state() {
    let mut game = eventful_game();
    game.state_mut().set_event(Trigger::new(
        |state: &State| state.player_location() == "yard",
        |state: &mut State| {
            state.score += 1;
            Some("A crow caws.".into())
        },
    ));

    assert!(!game.play("look").unwrap().contains("crow"));
    assert_eq!(game.play("east").unwrap(), "Weeds grow in the yard.\nA crow caws.");
    assert_eq!(game.state().score, Room::DEFAULT_VALUE + 1);
    game.play("west").unwrap();
    assert!(!game.play("east").unwrap().contains("crow"));
}
