//! Closed catalog of entity kinds and their blueprints.
//!
//! The kind's name is the `type` discriminator of saved entities, so
//! renaming a variant breaks existing saves.

use strum::IntoEnumIterator;

use super::{
    Entity, EquipSlot, Fighter, Holder, ItemData, ItemPower, Position, Progression, RingBonus, Stat,
};
use crate::env::Dice;

/// Behaviour family of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Hero,
    Monster,
    Familiar,
    Friendly,
    Item,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum EntityKind {
    Player,
    // monsters
    Tiger,
    Hedgehog,
    Rabbit,
    TeddyBear,
    GiantSeaEagle,
    // familiars
    Trumpet,
    // friendly
    Sunflower,
    Merchant,
    Chest,
    // items
    Heart,
    Bomb,
    Explosion,
    Sword,
    Ruler,
    Bow,
    FireBallStaff,
    Shield,
    Helmet,
    Chestplate,
    RingCritical,
    RingXP,
    ScrollofDamage,
    ScrollofWeakening,
    BodySnatchPotion,
    Monocle,
}

const SUNFLOWER_LINES: [&str; 3] = [
    "Flower power!!",
    "The sun is warm today",
    "Have you seen the bees lately?",
];

impl EntityKind {
    pub fn role(self) -> Role {
        use EntityKind::*;
        match self {
            Player => Role::Hero,
            Tiger | Hedgehog | Rabbit | TeddyBear | GiantSeaEagle => Role::Monster,
            Trumpet => Role::Familiar,
            Sunflower | Merchant | Chest => Role::Friendly,
            _ => Role::Item,
        }
    }

    /// Discriminator string used in saves.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Lower-case name used in log messages.
    pub fn name(self) -> &'static str {
        use EntityKind::*;
        match self {
            Player => "player",
            Tiger => "tiger",
            Hedgehog => "hedgehog",
            Rabbit => "rabbit",
            TeddyBear => "teddy bear",
            GiantSeaEagle => "giant sea eagle",
            Trumpet => "trumpet",
            Sunflower => "sunflower",
            Merchant => "merchant",
            Chest => "chest",
            Heart => "heart",
            Bomb => "bomb",
            Explosion => "explosion",
            Sword => "sword",
            Ruler => "ruler",
            Bow => "bow",
            FireBallStaff => "fire ball staff",
            Shield => "shield",
            Helmet => "helmet",
            Chestplate => "chestplate",
            RingCritical => "ring of critical damage",
            RingXP => "ring of more experience",
            ScrollofDamage => "scroll of damage",
            ScrollofWeakening => "scroll of weakening",
            BodySnatchPotion => "body snatch potion",
            Monocle => "monocle",
        }
    }

    pub fn is_immortal(self) -> bool {
        matches!(self, EntityKind::Chest)
    }

    pub fn dialogue(self) -> &'static [&'static str] {
        match self {
            EntityKind::Sunflower => &SUNFLOWER_LINES,
            _ => &[],
        }
    }

    pub fn equip_slot(self) -> EquipSlot {
        use EntityKind::*;
        match self {
            Sword | Ruler | Bow | FireBallStaff => EquipSlot::Main,
            Helmet => EquipSlot::Helmet,
            Chestplate => EquipSlot::Armor,
            _ => EquipSlot::Secondary,
        }
    }

    /// Kinds a merchant or chest may be stocked with.
    pub fn stock() -> Vec<EntityKind> {
        EntityKind::iter()
            .filter(|kind| kind.role() == Role::Item && *kind != EntityKind::Explosion)
            .collect()
    }

    /// Builds a fresh entity of this kind at `position`.
    pub fn spawn(self, position: Position) -> Entity {
        use EntityKind::*;
        let mut entity = Entity::bare(self, position);
        match self {
            Player => {
                entity.fighter = Some(
                    Fighter::new(20, 5)
                        .with_stat(Stat::Intelligence, 1)
                        .with_stat(Stat::Charisma, 1)
                        .with_stat(Stat::Dexterity, 1)
                        .with_stat(Stat::Constitution, 1)
                        .with_stat(Stat::Critical, 5),
                );
                entity.holder = Some(Holder::new(42));
                entity.progression = Some(Progression::default());
                entity.paths = Some(Default::default());
            }
            Tiger => entity.fighter = Some(Fighter::new(30, 5)),
            Hedgehog => entity.fighter = Some(Fighter::new(10, 3)),
            Rabbit => entity.fighter = Some(Fighter::new(15, 1).with_stat(Stat::Critical, 30)),
            TeddyBear => entity.fighter = Some(Fighter::new(50, 0)),
            GiantSeaEagle => entity.fighter = Some(Fighter::new(5000, 1000)),
            Trumpet => entity.fighter = Some(Fighter::new(20, 3)),
            Sunflower => entity.fighter = Some(Fighter::new(15, 0)),
            Merchant => {
                entity.fighter = Some(Fighter::new(25, 0));
                entity.holder = Some(Holder::new(75));
            }
            Chest => {
                entity.fighter = Some(Fighter::new(1, 0));
                entity.holder = Some(Holder::new(0));
            }
            _ => entity.item = Some(self.item_blueprint()),
        }
        entity
    }

    /// Like [`spawn`](Self::spawn), stocking merchants and chests from `dice`.
    pub fn spawn_stocked(self, position: Position, dice: &mut Dice) -> Entity {
        let mut entity = self.spawn(position);
        let count = match self {
            EntityKind::Merchant => 5,
            EntityKind::Chest => 3,
            _ => 0,
        };
        let stock = Self::stock();
        if let Some(holder) = entity.holder.as_mut() {
            for _ in 0..count {
                if let Some(kind) = dice.choose(&stock) {
                    holder.inventory.push(kind.spawn(position));
                }
            }
        }
        entity
    }

    fn item_blueprint(self) -> ItemData {
        use EntityKind::*;
        let (price, power) = match self {
            Heart => (3, ItemPower::Heal { amount: 5 }),
            Bomb => (
                4,
                ItemPower::Explosive {
                    damage: 5,
                    armed: false,
                    fuse: 4,
                },
            ),
            Sword => (20, ItemPower::Melee { damage: 3 }),
            Ruler => (2, ItemPower::Melee { damage: 1 }),
            Bow => (
                22,
                ItemPower::Ranged {
                    damage: 4,
                    range: 3,
                    stat: Stat::Dexterity,
                },
            ),
            FireBallStaff => (
                36,
                ItemPower::Ranged {
                    damage: 6,
                    range: 4,
                    stat: Stat::Intelligence,
                },
            ),
            Shield => (16, ItemPower::Armor { constitution: 2 }),
            Helmet => (18, ItemPower::Armor { constitution: 2 }),
            Chestplate => (30, ItemPower::Armor { constitution: 4 }),
            RingCritical => (
                15,
                ItemPower::Ring(RingBonus {
                    critical: 20,
                    ..RingBonus::default()
                }),
            ),
            RingXP => (
                25,
                ItemPower::Ring(RingBonus {
                    experience: 200,
                    ..RingBonus::default()
                }),
            ),
            ScrollofDamage => (18, ItemPower::Inert),
            ScrollofWeakening => (13, ItemPower::Inert),
            BodySnatchPotion => (14, ItemPower::Inert),
            Monocle => (10, ItemPower::Inert),
            _ => (2, ItemPower::Inert),
        };
        ItemData::new(price, power)
    }
}
