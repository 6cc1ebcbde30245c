//! Stock commands.
//!
//! Every command has the handler signature `(noun, state) -> reply`, so they
//! can also be called from host commands.

use log::{debug, warn};
use textgame_foundation::{Direction, Message};

use crate::registry::{Registries, SkipHooks};
use crate::reply::{Branch, Reply, YesNoQuestion};
use crate::state::{INVENTORY, PlayerStatus, State};
use crate::words::{action, descriptions, fighting, info, moving};

/// Registers every stock command.
pub fn use_default_commands(registries: &mut Registries) {
    registries
        .register_command("go", go)
        .register_command("back", |_, state| go_back(state))
        .register_command("open", open)
        .register_command("close", close)
        .register_command("look", look)
        .register_command("listen", listen)
        .register_command("take", take)
        .register_command("drop", drop)
        .register_command("inventory", inventory)
        .register_command_with("score", score, SkipHooks::all())
        .register_command("hint", hint)
        .register_command("fight", fight);
    for dir in Direction::ALL {
        registries.register_command(dir.as_str(), move |_, state| go_to(dir, state));
    }
}

// ===== Moving =====

/// Walks through the door in the direction `noun`, or back where the player
/// came from for `back`.
pub fn go(noun: &str, state: &mut State) -> Message {
    if noun == "back" {
        return go_back(state);
    }
    if noun.is_empty() {
        return moving::FAIL_WHERE.into();
    }
    match noun.parse::<Direction>() {
        Ok(dir) => go_to(dir, state),
        Err(_) => moving::FAIL_NOT_DIRECTION.into(),
    }
}

/// Walks through the door in `dir`. Leaving a fight is deadly.
pub fn go_to(dir: Direction, state: &mut State) -> Message {
    match state.player_status {
        PlayerStatus::Trapped => return moving::FAIL_TRAPPED.into(),
        PlayerStatus::Fighting => {
            state.player_status = PlayerStatus::Dead;
            return moving::DEATH_BY_COWARDICE.into();
        }
        PlayerStatus::Normal | PlayerStatus::Dead => {}
    }
    let room = state.location();
    let Some(destination) = room.connection(dir).map(str::to_string) else {
        return room.describe_error(dir);
    };
    if room.is_locked(dir) {
        return moving::FAIL_DOOR_LOCKED.into();
    }
    let way = room.describe_way_to(dir);
    if let Err(err) = state.move_player(&destination) {
        warn!("the door {dir} of {:?} is broken: {err}", state.player_location());
        return state.location().describe_error(dir);
    }
    let mut message = if state.is_dark_here() {
        Message::empty()
    } else {
        way
    };
    message += state.describe_location(false);
    let points = state.location_mut().visit();
    if points != 0 {
        debug!("first visit of {destination:?} earns {points} points");
        state.score += points;
    }
    message
}

/// Walks back to the previous room if a door leads there.
pub fn go_back(state: &mut State) -> Message {
    let Some(old) = state
        .player_location_old()
        .filter(|old| *old != state.player_location())
        .map(str::to_string)
    else {
        return moving::FAIL_NO_MEMORY.into();
    };
    match state.location().direction_to(&old) {
        Some(dir) => go_to(dir, state),
        None => moving::FAIL_NO_WAY_BACK.into(),
    }
}

// ===== Doors =====

/// Unlocks the door in the direction `noun` with a matching key.
pub fn open(noun: &str, state: &mut State) -> Message {
    open_or_lock("open", false, noun, state)
}

/// Locks the door in the direction `noun` with a matching key.
pub fn close(noun: &str, state: &mut State) -> Message {
    open_or_lock("lock", true, noun, state)
}

fn open_or_lock(verb: &str, lock: bool, noun: &str, state: &mut State) -> Message {
    let Ok(dir) = noun.parse::<Direction>() else {
        return action::fail_opendir(verb).into();
    };
    let room = state.location();
    if !room.has_connection(dir) {
        return moving::FAIL_NO_DOOR.into();
    }
    match (lock, room.is_locked(dir)) {
        (false, false) => return action::ALREADY_OPEN.into(),
        (true, true) => return action::ALREADY_CLOSED.into(),
        _ => {}
    }
    let code = room.door_code(dir);
    let keys: Vec<i64> = state
        .things
        .things_in(INVENTORY)
        .values()
        .filter_map(|thing| thing.key_code())
        .collect();
    if keys.is_empty() {
        return action::FAIL_NO_KEY.into();
    }
    if code.is_some_and(|code| keys.contains(&code)) {
        state.location_mut().set_locked(dir, lock);
        action::now_open(verb).into()
    } else {
        action::FAIL_OPEN.into()
    }
}

// ===== Looking around =====

/// Describes the room in full.
pub fn look(_: &str, state: &mut State) -> Message {
    state.describe_location(true)
}

/// Tells what the room sounds like.
pub fn listen(_: &str, state: &mut State) -> Message {
    state.location().sound.as_str().into()
}

/// Reports the score.
pub fn score(_: &str, state: &mut State) -> Message {
    info::score(state.score).into()
}

/// Offers the room's hint for its price.
pub fn hint(_: &str, state: &mut State) -> Reply {
    let room = state.location();
    let Some((warning, hint)) = room.hint() else {
        return info::NO_HINT.into();
    };
    let cost = room.hint_value;
    YesNoQuestion::new(
        warning,
        Branch::deferred(move |state: &mut State| {
            state.score -= cost;
            hint
        }),
        info::OK,
    )
    .into()
}

// ===== Things =====

/// Picks up the thing `noun`, or everything for `all`.
pub fn take(noun: &str, state: &mut State) -> Message {
    if noun.is_empty() {
        return action::which_item("take").into();
    }
    if noun == "all" {
        return take_all(state);
    }
    if state.is_dark_here() {
        return descriptions::DARK_S.into();
    }
    if state.inventory_has(noun) {
        return action::OWN_ALREADY.into();
    }
    let Some(thing) = state.things.get_from(noun, state.player_location()) else {
        if state.location().description.contains(noun) {
            return action::FAIL_TAKE.into();
        }
        return action::no_such_item(noun).into();
    };
    if !thing.is_takable() {
        return action::FAIL_TAKE.into();
    }
    let name = thing.name.clone();
    match state.add_to_inventory(noun) {
        Ok(_) => action::succ_take(&name).into(),
        Err(err) if err.is_store_limit_exceeded() => action::FAIL_INVENTORY_FULL.into(),
        Err(err) => {
            warn!("cannot take {noun:?}: {err}");
            action::FAIL_TAKE.into()
        }
    }
}

fn take_all(state: &mut State) -> Message {
    let ids: Vec<String> = state
        .things_here()
        .into_iter()
        .filter(|id| !state.thing(id).is_some_and(|thing| thing.is_alive()))
        .collect();
    if ids.is_empty() {
        return descriptions::NOTHING_THERE.into();
    }
    if state.is_dark_here() {
        return descriptions::DARK_S.into();
    }
    let mut message = Message::empty();
    for id in ids {
        message += take(&id, state);
    }
    message
}

/// Drops the thing `noun`, or everything for `all`.
pub fn drop(noun: &str, state: &mut State) -> Message {
    if noun.is_empty() {
        return action::which_item("drop").into();
    }
    if noun == "all" {
        return drop_all(state);
    }
    if !state.inventory_has(noun) {
        return action::FAIL_DROP.into();
    }
    let here = state.player_location().to_string();
    if let Err(err) = state.place(noun, &here) {
        warn!("cannot drop {noun:?}: {err}");
    }
    action::SUCC_DROP.into()
}

fn drop_all(state: &mut State) -> Message {
    let ids = state.inventory_ids();
    if ids.is_empty() {
        return action::NO_INVENTORY.into();
    }
    let here = state.player_location().to_string();
    for id in ids {
        if let Err(err) = state.place(&id, &here) {
            warn!("cannot drop {id:?}: {err}");
        }
    }
    action::SUCC_DROP.into()
}

/// Lists what the player carries.
pub fn inventory(_: &str, state: &mut State) -> Message {
    let things = state.things.things_in(INVENTORY);
    if things.is_empty() {
        return action::NO_INVENTORY.into();
    }
    let mut message = Message::new(action::CARRYING);
    for thing in things.values() {
        message += format!("A {}", thing.name);
    }
    message
}

// ===== Fighting =====

/// Attacks the monster `noun` with the strongest weapon carried.
pub fn fight(noun: &str, state: &mut State) -> Message {
    if noun.is_empty() {
        return fighting::WHAT.into();
    }
    let Some(monster) = state
        .things
        .get_from(noun, state.player_location())
        .filter(|thing| thing.monster().is_some())
    else {
        return action::no_such_fight(noun).into();
    };
    if !monster.is_alive() {
        return fighting::already_dead(&monster.name).into();
    }
    let monster_name = monster.name.clone();
    let weapon = state
        .things
        .things_in(INVENTORY)
        .values()
        .filter(|thing| thing.is_weapon())
        .filter_map(|thing| thing.strength().map(|strength| (thing.name.clone(), strength)))
        .max_by(|a, b| a.1.strength.total_cmp(&b.1.strength));
    let Some((weapon_name, strength)) = weapon else {
        return action::NO_WEAPONS.into();
    };

    let mut message = Message::new(fighting::use_weapon(&weapon_name, &monster_name));
    let damage = state.roll_damage(strength);
    let Some(thing) = state.thing_mut(noun) else {
        return message;
    };
    let Some(monster) = thing.monster_mut() else {
        return message;
    };
    monster.creature.health -= damage;
    debug!(
        "{noun:?} takes {damage:.1} damage, health is {:.1}",
        monster.creature.health
    );
    if monster.creature.alive() {
        state.player_status = PlayerStatus::Fighting;
        message += fighting::survived_attack(&monster_name);
    } else {
        let win_message = monster.win_message.clone();
        thing.die();
        state.player_status = PlayerStatus::Normal;
        message += win_message;
    }
    message
}
