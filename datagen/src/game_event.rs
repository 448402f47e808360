//! The game-event registry and its tag provider.
//!
//! Game events are world happenings (a block opening, an entity landing)
//! that listeners such as vibration sensors subscribe to by tag.

use crit::{Ident, Registry, RegistryBuilder};

use crate::{TagOutput, TagProvider};

/// A game-event definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEvent {
    notification_radius: u16,
}

impl GameEvent {
    /// An event heard at the default radius.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An event heard at a custom radius.
    #[must_use]
    pub fn with_radius(notification_radius: u16) -> Self {
        Self {
            notification_radius,
        }
    }

    /// How far away listeners are notified, in blocks.
    #[must_use]
    pub fn notification_radius(&self) -> u16 {
        self.notification_radius
    }
}

impl Default for GameEvent {
    fn default() -> Self {
        Self {
            notification_radius: 16,
        }
    }
}

/// Tag ids emitted for the game-event category.
pub mod tags {
    /// Events that vibration listeners react to.
    pub const VIBRATIONS: &str = "vibrations";
    /// Vibration events suppressed while the source entity sneaks.
    pub const IGNORE_VIBRATIONS_SNEAKING: &str = "ignore_vibrations_sneaking";
}

const EVENTS: &[&str] = &[
    "block_attach",
    "block_change",
    "block_close",
    "block_destroy",
    "block_detach",
    "block_open",
    "block_place",
    "block_press",
    "block_switch",
    "block_unpress",
    "block_unswitch",
    "cart_moving",
    "container_close",
    "container_open",
    "dispense_fail",
    "drinking_finish",
    "eat",
    "entity_damaged",
    "entity_killed",
    "entity_place",
    "equip",
    "explode",
    "fishing_rod_cast",
    "fishing_rod_reel_in",
    "flap",
    "fluid_pickup",
    "fluid_place",
    "glide",
    "hit_ground",
    "lightning_strike",
    "mob_interact",
    "mob_roar",
    "piston_contract",
    "piston_extend",
    "prime_fuse",
    "projectile_land",
    "projectile_shoot",
    "ring_bell",
    "shake_dry",
    "shear",
    "shell_close",
    "shell_open",
    "splash",
    "step",
    "swim",
];

/// The built-in game-event registry. Every event uses the default
/// notification radius.
#[must_use]
pub fn game_event_registry() -> Registry<GameEvent> {
    EVENTS
        .iter()
        .fold(RegistryBuilder::new("game event"), |builder, path| {
            builder.insert(ev(path), GameEvent::new())
        })
        .build()
}

/// Emits the static tag files for the game-event category.
#[derive(Debug)]
pub struct GameEventTagProvider {
    registry: Registry<GameEvent>,
}

impl GameEventTagProvider {
    /// A provider over the built-in game-event registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: game_event_registry(),
        }
    }
}

impl Default for GameEventTagProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TagProvider for GameEventTagProvider {
    fn name(&self) -> &'static str {
        "Game Event Tags"
    }

    fn category(&self) -> &'static str {
        "game_events"
    }

    fn registry_name(&self) -> &'static str {
        "game event"
    }

    fn contains(&self, id: &Ident) -> bool {
        self.registry.contains(id)
    }

    fn add_tags(&self, out: &mut TagOutput) {
        out.tag(ev(tags::VIBRATIONS))
            .add_all(EVENTS.iter().map(|path| ev(path)));

        out.tag(ev(tags::IGNORE_VIBRATIONS_SNEAKING)).add_all([
            ev("hit_ground"),
            ev("projectile_shoot"),
            ev("step"),
            ev("swim"),
        ]);
    }
}

fn ev(path: &str) -> Ident {
    // EVENTS and the tag names are fixed lowercase literals
    Ident::parse(path).unwrap_or_else(|e| unreachable!("bad built-in event id {path:?}: {e}"))
}
