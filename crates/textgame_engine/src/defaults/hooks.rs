//! Stock hooks.
//!
//! | Hook                     | Runs | Does                                          |
//! |--------------------------|------|-----------------------------------------------|
//! | [`time`]                 | post | advances the clock                            |
//! | [`daylight`]             | pre  | switches day and night, darkens rooms at night |
//! | [`single_behaviour_hook`] | any  | runs one behaviour of every creature          |
//! | [`manage_fights`]        | post | lets living monsters attack the player        |
//! | [`ready_events`]         | post | runs due events                               |

use log::{debug, info, warn};
use textgame_foundation::Message;

use crate::state::{Daytime, PlayerStatus, State};
use crate::words::{fighting, info as words};

/// Advances the clock by one turn.
pub fn time(state: &mut State) -> Message {
    state.time += 1;
    Message::empty()
}

/// Builds a hook cycling `day` turns of daylight and `night` turns of
/// darkness. Announces sunset and sunrise.
pub fn daylight(day: u64, night: u64) -> impl Fn(&mut State) -> Message + 'static {
    move |state| {
        let cycle = day + night;
        if cycle == 0 {
            return Message::empty();
        }
        let daytime = if state.time % cycle < day {
            Daytime::Day
        } else {
            Daytime::Night
        };
        if daytime == state.daytime {
            return Message::empty();
        }
        info!("{daytime:?} begins at time {}", state.time);
        state.daytime = daytime;
        state.refresh_all_darkness();
        match daytime {
            Daytime::Day => words::SUNRISE.into(),
            Daytime::Night => words::SUNSET.into(),
        }
    }
}

/// Builds a hook running the behaviour `name` of every creature that has it.
pub fn single_behaviour_hook(name: impl Into<String>) -> impl Fn(&mut State) -> Message + 'static {
    let name = name.into();
    move |state| {
        let mut message = Message::empty();
        for creature in state.creature_ids() {
            let has_it = state
                .thing(&creature)
                .and_then(|thing| thing.creature())
                .is_some_and(|info| info.behaviours.contains(&name));
            if !has_it {
                continue;
            }
            match state.call_behaviour(&creature, &name) {
                Ok(output) => message += output,
                Err(err) => warn!("behaviour {name:?} of {creature:?} failed: {err}"),
            }
        }
        message
    }
}

/// Lets every living monster in the player's room attack.
///
/// Attacked players are fighting; monsters kill instantly in the dark.
pub fn manage_fights(state: &mut State) -> Message {
    if state.player_status == PlayerStatus::Dead {
        return Message::empty();
    }
    let monsters: Vec<String> = state
        .things_here()
        .into_iter()
        .filter(|id| {
            state
                .thing(id)
                .is_some_and(|thing| thing.monster().is_some() && thing.is_alive())
        })
        .collect();
    if monsters.is_empty() {
        if state.player_status == PlayerStatus::Fighting {
            debug!("no monsters left, the fight is over");
            state.player_status = PlayerStatus::Normal;
        }
        return Message::empty();
    }

    let mut message = Message::empty();
    for id in monsters {
        let Some(monster) = state.thing(&id).and_then(|thing| {
            thing.monster().map(|monster| {
                (
                    thing.name.clone(),
                    monster.strength,
                    monster.fight_message.clone(),
                    monster.loss_message.clone(),
                )
            })
        }) else {
            continue;
        };
        let (name, strength, fight_message, loss_message) = monster;
        if state.is_dark_here() {
            info!("{id:?} kills the player in the dark");
            state.player_status = PlayerStatus::Dead;
            state.health = 0.0;
            return message + fighting::dark_death(&name);
        }
        state.player_status = PlayerStatus::Fighting;
        let damage = state.roll_damage(strength);
        state.health -= damage;
        debug!("{id:?} deals {damage:.1} damage, health is {:.1}", state.health);
        message += fight_message;
        if state.health <= 0.0 {
            info!("{id:?} kills the player");
            state.player_status = PlayerStatus::Dead;
            return message + loss_message;
        }
    }
    message
}

/// Runs every event whose condition holds.
pub fn ready_events(state: &mut State) -> Message {
    let mut message = Message::empty();
    for event in state.pop_ready_events() {
        message += event.call(state);
    }
    message
}
