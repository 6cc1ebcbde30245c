//! Things that can be placed in rooms, containers or the inventory.
//!
//! Every thing shares an id, a name, a description and the room it starts in.
//! What else it can do is decided by its [`ThingKind`]:
//!
//! | Kind          | Takable          | Value | Strength | Behaviours |
//! |---------------|------------------|-------|----------|------------|
//! | `Item`        | per item         | yes   |          |            |
//! | `Key`         | per item         | yes   |          |            |
//! | `Weapon`      | per item         | yes   | yes      |            |
//! | `Lightsource` | per item         | yes   |          |            |
//! | `Container`   | per item         | yes   |          |            |
//! | `Creature`    | no               |       |          | yes        |
//! | `Monster`     | when dead, maybe |       | yes      | yes        |

use rand::Rng;
use serde::{Deserialize, Serialize};
use textgame_foundation::Message;
use textgame_storage::Identify;

use crate::behaviour::Behaviours;

fn yes() -> bool {
    true
}

fn full_health() -> f64 {
    100.0
}

// =============================================================================
// Capability records
// =============================================================================

/// Data shared by everything the player can pick up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Whether `take` works on it.
    #[serde(default = "yes")]
    pub takable: bool,
    /// Points the thing is worth.
    #[serde(default)]
    pub value: i64,
}

impl Default for ItemInfo {
    fn default() -> Self {
        Self {
            takable: true,
            value: 0,
        }
    }
}

/// A key opening doors with the same code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyInfo {
    /// Item data.
    #[serde(flatten)]
    pub item: ItemInfo,
    /// Code matched against door codes.
    pub key_id: i64,
}

/// Base damage and how much it varies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    /// Base damage.
    #[serde(default)]
    pub strength: f64,
    /// Relative variation of the damage, 0 for none.
    #[serde(default, alias = "strength_variation")]
    pub variation: f64,
}

impl Strength {
    /// Creates a strength.
    #[must_use]
    pub const fn new(strength: f64, variation: f64) -> Self {
        Self {
            strength,
            variation,
        }
    }

    /// Rolls `|strength * (1 - u * variation)|` with `u` uniform in `[-1, 1)`.
    pub fn calculate_damage<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let variation = rng.gen_range(-1.0..1.0) * self.variation;
        (self.strength * (1.0 - variation)).abs()
    }
}

/// A weapon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponInfo {
    /// Item data.
    #[serde(flatten)]
    pub item: ItemInfo,
    /// Damage dealt.
    #[serde(flatten)]
    pub strength: Strength,
}

/// A container, which is also a store named after its id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Item data.
    #[serde(flatten)]
    pub item: ItemInfo,
    /// Maximum number of things inside.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Something alive.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatureInfo {
    /// Dead at zero or below.
    #[serde(default = "full_health")]
    pub health: f64,
    /// Replaces the description once dead. Empty keeps the old one.
    #[serde(default)]
    pub dead_description: String,
    /// Behaviours by name, run by hooks.
    #[serde(default)]
    pub behaviours: Behaviours,
}

impl Default for CreatureInfo {
    fn default() -> Self {
        Self {
            health: full_health(),
            dead_description: String::new(),
            behaviours: Behaviours::new(),
        }
    }
}

impl CreatureInfo {
    /// Returns true while health is above zero.
    #[must_use]
    pub fn alive(&self) -> bool {
        self.health > 0.0
    }

    /// Sets health to -1 and switches all behaviours off.
    pub fn die(&mut self) {
        self.health = -1.0;
        self.behaviours.switch_all_off();
    }
}

/// A creature that fights the player.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MonsterInfo {
    /// Creature data.
    #[serde(flatten)]
    pub creature: CreatureInfo,
    /// Damage dealt per attack.
    #[serde(flatten)]
    pub strength: Strength,
    /// Shown when the monster attacks.
    #[serde(default)]
    pub fight_message: String,
    /// Shown when the player kills the monster.
    #[serde(default)]
    pub win_message: String,
    /// Shown when the monster kills the player.
    #[serde(default)]
    pub loss_message: String,
    /// The corpse can be taken.
    #[serde(default)]
    pub takable_when_dead: bool,
}

// =============================================================================
// Thing
// =============================================================================

/// What a thing is.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThingKind {
    /// Something with a value.
    Item(ItemInfo),
    /// Opens doors.
    Key(KeyInfo),
    /// Used in fights.
    Weapon(WeaponInfo),
    /// Lights up dark rooms.
    Lightsource(ItemInfo),
    /// Holds other things.
    Container(ContainerInfo),
    /// Alive and behaving.
    Creature(CreatureInfo),
    /// Alive and hostile.
    Monster(MonsterInfo),
}

impl ThingKind {
    /// A plain takable item worth `value` points.
    #[must_use]
    pub fn item(value: i64) -> Self {
        Self::Item(ItemInfo {
            value,
            ..ItemInfo::default()
        })
    }

    /// A key with the given code.
    #[must_use]
    pub fn key(key_id: i64) -> Self {
        Self::Key(KeyInfo {
            key_id,
            ..KeyInfo::default()
        })
    }

    /// A weapon.
    #[must_use]
    pub fn weapon(strength: Strength) -> Self {
        Self::Weapon(WeaponInfo {
            strength,
            ..WeaponInfo::default()
        })
    }

    /// A lamp or torch.
    #[must_use]
    pub fn lightsource() -> Self {
        Self::Lightsource(ItemInfo::default())
    }

    /// A container.
    #[must_use]
    pub fn container(limit: Option<usize>) -> Self {
        Self::Container(ContainerInfo {
            limit,
            ..ContainerInfo::default()
        })
    }

    /// A creature with full health and no behaviours.
    #[must_use]
    pub fn creature() -> Self {
        Self::Creature(CreatureInfo::default())
    }

    /// The item data, for everything takable.
    fn item_info(&self) -> Option<&ItemInfo> {
        match self {
            Self::Item(info) | Self::Lightsource(info) => Some(info),
            Self::Key(key) => Some(&key.item),
            Self::Weapon(weapon) => Some(&weapon.item),
            Self::Container(container) => Some(&container.item),
            Self::Creature(_) | Self::Monster(_) => None,
        }
    }
}

/// Anything that can be placed somewhere.
#[derive(Debug, Serialize, Deserialize)]
pub struct Thing {
    /// Unique id, also what the player types.
    pub id: String,
    /// Name used in messages.
    pub name: String,
    /// Shown when the room is described.
    pub description: String,
    /// Id of the room the thing starts in.
    pub initlocation: String,
    /// What the thing is.
    pub kind: ThingKind,
}

impl Identify for Thing {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Thing {
    /// Creates a thing named after its id.
    pub fn new(id: impl Into<String>, kind: ThingKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            initlocation: String::new(),
            kind,
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the room the thing starts in.
    #[must_use]
    pub fn with_initlocation(mut self, initlocation: impl Into<String>) -> Self {
        self.initlocation = initlocation.into();
        self
    }

    /// Returns the description.
    #[must_use]
    pub fn describe(&self) -> Message {
        Message::new(self.description.as_str())
    }

    /// Returns true if the player may pick it up.
    #[must_use]
    pub fn is_takable(&self) -> bool {
        match &self.kind {
            ThingKind::Monster(monster) => monster.takable_when_dead && !monster.creature.alive(),
            kind => kind.item_info().is_some_and(|info| info.takable),
        }
    }

    /// Returns the points the thing is worth.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.kind.item_info().map_or(0, |info| info.value)
    }

    /// Returns the door code of a key.
    #[must_use]
    pub fn key_code(&self) -> Option<i64> {
        match &self.kind {
            ThingKind::Key(key) => Some(key.key_id),
            _ => None,
        }
    }

    /// Returns the strength of weapons and monsters.
    #[must_use]
    pub fn strength(&self) -> Option<Strength> {
        match &self.kind {
            ThingKind::Weapon(weapon) => Some(weapon.strength),
            ThingKind::Monster(monster) => Some(monster.strength),
            _ => None,
        }
    }

    /// Returns true for weapons.
    #[must_use]
    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ThingKind::Weapon(_))
    }

    /// Returns true for light sources.
    #[must_use]
    pub fn is_lightsource(&self) -> bool {
        matches!(self.kind, ThingKind::Lightsource(_))
    }

    /// Returns the capacity of a container, `None` for anything else.
    #[must_use]
    pub fn container_limit(&self) -> Option<Option<usize>> {
        match &self.kind {
            ThingKind::Container(container) => Some(container.limit),
            _ => None,
        }
    }

    /// Returns the creature data of creatures and monsters.
    #[must_use]
    pub fn creature(&self) -> Option<&CreatureInfo> {
        match &self.kind {
            ThingKind::Creature(creature) => Some(creature),
            ThingKind::Monster(monster) => Some(&monster.creature),
            _ => None,
        }
    }

    /// Mutable version of [`Thing::creature`].
    pub fn creature_mut(&mut self) -> Option<&mut CreatureInfo> {
        match &mut self.kind {
            ThingKind::Creature(creature) => Some(creature),
            ThingKind::Monster(monster) => Some(&mut monster.creature),
            _ => None,
        }
    }

    /// Returns the monster data.
    #[must_use]
    pub fn monster(&self) -> Option<&MonsterInfo> {
        match &self.kind {
            ThingKind::Monster(monster) => Some(monster),
            _ => None,
        }
    }

    /// Mutable version of [`Thing::monster`].
    pub fn monster_mut(&mut self) -> Option<&mut MonsterInfo> {
        match &mut self.kind {
            ThingKind::Monster(monster) => Some(monster),
            _ => None,
        }
    }

    /// Returns true for living creatures.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.creature().is_some_and(CreatureInfo::alive)
    }

    /// Kills a creature and swaps in its dead description. Does nothing to
    /// other things.
    pub fn die(&mut self) {
        let dead_description = match self.creature_mut() {
            Some(creature) => {
                creature.die();
                creature.dead_description.clone()
            }
            None => return,
        };
        if !dead_description.is_empty() {
            self.description = dead_description;
        }
    }
}
