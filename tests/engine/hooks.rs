//! Hook ordering integration tests

use textgame_engine::defaults::hooks;
use textgame_engine::words::info;
use textgame_engine::{Game, HookSkip, SkipHooks, State};

use crate::world::{manor, stock_registries};

fn traced_game() -> Game {
    let mut registries = stock_registries();
    registries
        .register_pre_hook("clock", |state: &mut State| format!("[pre clock {}]", state.time))
        .register_pre_hook("weather", |_| "[pre weather]")
        .register_room_hook("yard", |_| "[room yard]")
        .register_post_hook("birds", |_| "[post birds]")
        .register_post_hook("time", hooks::time);
    Game::new(manor(), registries)
}

#[test]
fn hooks_wrap_the_command() {
    let mut game = traced_game();
    let out = game.play("east").unwrap();
    assert_eq!(
        out,
        "[pre clock 0]\n[pre weather]\nWeeds grow in the yard.\n[room yard]\n[post birds]"
    );
    assert_eq!(game.state().time, 1);
}

#[test]
fn room_hooks_need_a_move() {
    let mut game = traced_game();
    game.play("east").unwrap();
    let out = game.play("look").unwrap();
    assert!(!out.contains("[room yard]"));
    assert!(out.contains("[post birds]"));

    let out = game.play("east").unwrap();
    assert!(out.contains("A wall blocks the way."));
    assert!(!out.contains("[room yard]"));
}

#[test]
fn unknown_verbs_skip_all_hooks() {
    let mut game = traced_game();
    assert_eq!(game.play("dance").unwrap(), info::NOT_UNDERSTOOD);
    assert_eq!(game.play("take the key").unwrap(), info::TOO_MANY_ARGUMENTS);
    assert_eq!(game.state().time, 0);
}

#[test]
fn score_skips_every_hook() {
    let mut game = traced_game();
    assert_eq!(game.play("score").unwrap(), info::score(0));
    assert_eq!(game.state().time, 0);
}

#[test]
fn commands_can_skip_some_hooks() {
    let mut game = traced_game();
    assert!(game.registries_mut().set_skip_hooks(
        "look",
        SkipHooks::new()
            .pre(HookSkip::only(["weather"]))
            .post(HookSkip::only(["time"])),
    ));
    let out = game.play("look").unwrap();
    assert!(out.contains("[pre clock 0]"));
    assert!(!out.contains("[pre weather]"));
    assert!(out.contains("[post birds]"));
    assert_eq!(game.state().time, 0);

    assert!(!game.registries_mut().set_skip_hooks("dance", SkipHooks::all()));
}

#[test]
fn reregistering_keeps_the_position() {
    let mut game = traced_game();
    game.registries_mut()
        .register_pre_hook("clock", |_| "[pre clock again]");
    let out = game.play("look").unwrap();
    assert!(out.as_str().starts_with("[pre clock again]\n[pre weather]"));
}

#[test]
fn unregistering_twice_is_harmless() {
    let mut game = traced_game();
    for _ in 0..2 {
        let registries = game.registries_mut();
        registries.unregister_pre_hook("weather");
        registries.unregister_post_hook("birds");
        registries.unregister_room_hook("yard");
        registries.unregister_command("listen");
        registries.unregister_behaviour("nothing");
    }
    let out = game.play("east").unwrap();
    assert_eq!(out, "[pre clock 0]\nWeeds grow in the yard.");
    assert_eq!(game.play("listen").unwrap(), info::NOT_UNDERSTOOD);
}

#[test]
fn hooks_can_change_the_state() {
    let mut game = traced_game();
    game.registries_mut()
        .register_pre_hook("jail", |state: &mut State| {
            state.player_status = textgame_engine::PlayerStatus::Trapped;
            ""
        });
    let out = game.play("east").unwrap();
    assert!(out.contains(textgame_engine::words::moving::FAIL_TRAPPED));
    assert_eq!(game.state().player_location(), "hall");
}
