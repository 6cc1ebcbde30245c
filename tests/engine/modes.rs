//! Question mode integration tests

use textgame_engine::words::info;
use textgame_engine::{
    Branch, CustomReply, Mode, ModeHandler, MultipleChoiceQuestion, Registries, Response, State,
    YesNoQuestion,
};
use textgame_foundation::{ErrorKind, Result};

use crate::world::manor_game;

// =============================================================================
// Yes/No
// =============================================================================

#[test]
fn hints_cost_points_when_accepted() {
    let mut game = manor_game();
    game.state_mut().score = 5;

    assert_eq!(game.play("hint").unwrap(), info::hint_warning(2));
    assert_eq!(game.caller().mode(), &Mode::YesNo);

    assert_eq!(game.play("perhaps").unwrap(), info::YES_NO);
    assert_eq!(game.caller().mode(), &Mode::YesNo);

    assert_eq!(game.play("y").unwrap(), "The key opens the vault.");
    assert_eq!(game.caller().mode(), &Mode::Normal);
    assert_eq!(game.state().score, 3);
}

#[test]
fn declined_hints_are_free() {
    let mut game = manor_game();
    game.play("hint").unwrap();
    assert_eq!(game.play("no").unwrap(), info::OK);
    assert_eq!(game.state().score, 0);
}

#[test]
fn answers_are_not_commands() {
    let mut game = manor_game();
    game.play("hint").unwrap();
    assert_eq!(game.play("take key").unwrap(), info::YES_NO);
    assert!(!game.state().inventory_has("key"));
    game.play("no").unwrap();
    assert_eq!(game.play("yes").unwrap(), info::NOT_UNDERSTOOD);
}

#[test]
fn questions_can_nest() {
    let mut game = manor_game();
    game.registries_mut().register_command("jump", |_, _| {
        YesNoQuestion::new(
            "Jump into the well?",
            YesNoQuestion::new(
                "Really?",
                Branch::deferred(|state: &mut State| {
                    state.score -= 100;
                    "Splash."
                }),
                "Wise.",
            ),
            "Fine.",
        )
    });

    assert_eq!(game.play("jump").unwrap(), "Jump into the well?");
    assert_eq!(game.play("yes").unwrap(), "Really?");
    assert_eq!(game.caller().mode(), &Mode::YesNo);
    assert_eq!(game.play("yes").unwrap(), "Splash.");
    assert_eq!(game.state().score, -100);
    assert_eq!(game.caller().mode(), &Mode::Normal);
}

// =============================================================================
// Multiple Choice
// =============================================================================

fn shop(registries: &mut Registries) {
    registries.register_command("buy", |_, _| {
        MultipleChoiceQuestion::new(
            "The merchant shows you his wares.",
            [
                ("a lantern", Branch::deferred(|state: &mut State| {
                    state.score -= 3;
                    "You buy a lantern."
                })),
                ("a riddle", Branch::from(YesNoQuestion::new("Want to hear it?", "Ha.", "Pity."))),
            ],
        )
    });
}

#[test]
fn choices_are_numbered() {
    let mut game = manor_game();
    shop(game.registries_mut());

    let question = game.play("buy").unwrap();
    assert_eq!(
        question,
        "The merchant shows you his wares.\n (1) a lantern\n (2) a riddle\n (3) Cancel"
    );
    assert_eq!(game.caller().mode(), &Mode::MultipleChoice);

    assert_eq!(
        game.play("lantern").unwrap(),
        info::no_valid_answer(&["1".to_string(), "2".to_string(), "3".to_string()])
    );
    assert_eq!(game.play("1").unwrap(), "You buy a lantern.");
    assert_eq!(game.state().score, -3);
    assert_eq!(game.caller().mode(), &Mode::Normal);
}

#[test]
fn cancel_and_follow_up_questions() {
    let mut game = manor_game();
    shop(game.registries_mut());

    game.play("buy").unwrap();
    assert_eq!(game.play("3").unwrap(), "Ok.");
    assert_eq!(game.caller().mode(), &Mode::Normal);

    game.play("buy").unwrap();
    assert_eq!(game.play("2").unwrap(), "Want to hear it?");
    assert_eq!(game.caller().mode(), &Mode::YesNo);
    assert_eq!(game.play("no").unwrap(), "Pity.");
}

// =============================================================================
// Custom Modes
// =============================================================================

struct Riddle {
    tries: u32,
}

impl ModeHandler for Riddle {
    fn handle(&mut self, input: &str, state: &mut State, _: &Registries) -> Result<Response> {
        self.tries += 1;
        if input.trim() == "echo" {
            state.score += 10;
            Ok(Response::new(format!("Right after {} tries.", self.tries)))
        } else {
            Ok(Response::failure("Wrong, try again."))
        }
    }

    fn backup_result(&mut self, _: Response) {
        self.tries = 0;
    }
}

#[test]
fn host_modes_take_over_input() {
    let mut game = manor_game();
    game.registries_mut().register_command("sphinx", |_, _| {
        CustomReply::new("riddle", "What answers without a mouth?", ())
    });
    game.caller_mut()
        .set_mode(Mode::Custom("riddle".to_string()), Box::new(Riddle { tries: 0 }));

    assert_eq!(game.play("sphinx").unwrap(), "What answers without a mouth?");
    assert!(game.caller().has_pending_question());
    assert_eq!(game.play("wind").unwrap(), "Wrong, try again.");
    assert_eq!(game.play("echo").unwrap(), "Right after 2 tries.");
    assert_eq!(game.state().score, 10);
    assert_eq!(game.caller().mode(), &Mode::Normal);
}

#[test]
fn unregistered_modes_are_errors() {
    let mut game = manor_game();
    game.registries_mut()
        .register_command("sphinx", |_, _| CustomReply::new("riddle", "?", ()));
    let err = game.play("sphinx").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ModeNotFound(_)));
    assert!(!game.caller().has_pending_question());
}
