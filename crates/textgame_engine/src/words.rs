//! Canned messages shown to the player.
//!
//! Plain texts are constants. Texts with a placeholder are functions.

/// General game information.
pub mod info {
    /// Shown for verbs without a registered command.
    pub const NOT_UNDERSTOOD: &str = "I don't understand that.";
    /// Shown for inputs of more than two words.
    pub const TOO_MANY_ARGUMENTS: &str = "Please restrict your command to two words.";
    /// Shown for an invalid answer to a yes/no question.
    pub const YES_NO: &str = "Please answer yes or no.";
    /// Shown by the daylight hook at dusk.
    pub const SUNSET: &str = "The sun has set. Night comes in.";
    /// Shown by the daylight hook at dawn.
    pub const SUNRISE: &str = "The sun is rising! A new day begins";
    /// Shown when the current room has no hint.
    pub const NO_HINT: &str = "I don't have any special hints for you.";
    /// Generic nothing-happened answer.
    pub const NOTHING: &str = "Nothing happens.";
    /// Confirms a saved game.
    pub const SAVED: &str = "Game saved!";
    /// Confirms a loaded game.
    pub const LOADED: &str = "Game loaded!";
    /// Answer to declining a hint.
    pub const OK: &str = "ok.";

    /// Asks whether the player wants to pay for a hint.
    #[must_use]
    pub fn hint_warning(cost: i64) -> String {
        format!("I have a hint for you, but it will cost you {cost} points. Do you want to hear it?")
    }

    /// Lists the valid keys of a multiple choice question.
    #[must_use]
    pub fn no_valid_answer(possible: &[String]) -> String {
        format!(
            "That's not a valid answer to the question. Possible answers are: {}",
            possible.join(", ")
        )
    }

    /// Reports the score.
    #[must_use]
    pub fn score(score: i64) -> String {
        format!("Your score is {score}.")
    }
}

/// Messages about moving between rooms.
pub mod moving {
    /// Running away from a fight.
    pub const DEATH_BY_COWARDICE: &str = "Coward! Running away from a fight is generally not a good idea. Your back doesn't defend itself.";
    /// Default error for directions without a door.
    pub const FAIL_CANT_GO: &str = "You can't go in this direction.";
    /// The door is locked.
    pub const FAIL_DOOR_LOCKED: &str = "The door is locked.";
    /// Opening or closing where there is no door.
    pub const FAIL_NO_DOOR: &str = "There is no door in this direction.";
    /// `go back` without a previous location.
    pub const FAIL_NO_MEMORY: &str = "I can't remember where you came from.";
    /// `go back` when the previous room is not adjacent.
    pub const FAIL_NO_WAY_BACK: &str = "There is no direct way to go back.";
    /// The noun of `go` is not a direction.
    pub const FAIL_NOT_DIRECTION: &str = "That's not a direction.";
    /// The player is trapped.
    pub const FAIL_TRAPPED: &str = "You're trapped! You can't leave this room for now.";
    /// `go` without a noun.
    pub const FAIL_WHERE: &str = "Tell me where to go!";
}

/// Room descriptions.
pub mod descriptions {
    /// Long description of a dark room.
    pub const DARK_L: &str = "It's pitch dark here. You can't see anything. Anytime soon, you'll probably get attacked by some night creature.";
    /// Short answer for actions needing light.
    pub const DARK_S: &str = "I can't see anything!";
    /// Default sound of a room.
    pub const NO_SOUND: &str = "It's all quiet.";
    /// The room is empty.
    pub const NOTHING_THERE: &str = "There's nothing here.";
}

/// Messages about handling things.
pub mod action {
    /// Taking something already in the inventory.
    pub const OWN_ALREADY: &str = "You already have it!";
    /// A thing was dropped.
    pub const SUCC_DROP: &str = "Dropped.";
    /// Dropping something not carried.
    pub const FAIL_DROP: &str = "You don't have one.";
    /// The thing is not takable.
    pub const FAIL_TAKE: &str = "You can't take that.";
    /// The inventory is full.
    pub const FAIL_INVENTORY_FULL: &str = "You can't carry any more.";
    /// The inventory is empty.
    pub const NO_INVENTORY: &str = "You don't have anything with you.";
    /// Fighting without a weapon.
    pub const NO_WEAPONS: &str = "You don't have any weapons!";
    /// Opening a door without a key.
    pub const FAIL_NO_KEY: &str = "You have no keys!";
    /// Opening an unlocked door.
    pub const ALREADY_OPEN: &str = "The door is already open.";
    /// Locking a locked door.
    pub const ALREADY_CLOSED: &str = "The door is already closed.";
    /// No key in the inventory fits.
    pub const FAIL_OPEN: &str = "None of your keys fit.";
    /// Header of the inventory listing.
    pub const CARRYING: &str = "You are now carrying:";

    /// Asks which thing to act on.
    #[must_use]
    pub fn which_item(verb: &str) -> String {
        format!("Please specify an item you want to {verb}.")
    }

    /// Confirms taking a thing.
    #[must_use]
    pub fn succ_take(name: &str) -> String {
        format!("You carry now a {name}.")
    }

    /// The thing is not here.
    #[must_use]
    pub fn no_such_item(id: &str) -> String {
        format!("I see no {id} here.")
    }

    /// Nothing of that name wants to fight.
    #[must_use]
    pub fn no_such_fight(name: &str) -> String {
        format!("There is no {name} that wants to fight with you.")
    }

    /// Opening or closing needs a direction.
    #[must_use]
    pub fn fail_opendir(verb: &str) -> String {
        format!("I can only {verb} doors if you tell me the direction. Eg. '{verb} west'.")
    }

    /// A key fit.
    #[must_use]
    pub fn now_open(verb: &str) -> String {
        format!("You take the key and {verb} the door.")
    }
}

/// Messages about fights.
pub mod fighting {
    /// `fight` without a noun.
    pub const WHAT: &str = "Attack what?";

    /// Attacked in the dark.
    #[must_use]
    pub fn dark_death(name: &str) -> String {
        format!(
            "A {name} certainly has better night vision than you do. At least this was a fast and painless death for you."
        )
    }

    /// The monster is already dead.
    #[must_use]
    pub fn already_dead(name: &str) -> String {
        format!("The {name} is already dead!")
    }

    /// Announces the weapon used.
    #[must_use]
    pub fn use_weapon(weapon: &str, monster: &str) -> String {
        format!("You use the {weapon} against the {monster}")
    }

    /// The monster survived the attack.
    #[must_use]
    pub fn survived_attack(name: &str) -> String {
        format!("The {name} has survived your attack and is very angry at you!")
    }
}
