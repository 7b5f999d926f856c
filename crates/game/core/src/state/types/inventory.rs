//! Inventory and item capabilities.

use super::{Entity, Stat};

/// Equipment slot an item occupies while equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlot {
    Main,
    Secondary,
    Armor,
    Helmet,
}

/// Flat stat bonuses granted by a ring while equipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingBonus {
    pub max_health: i32,
    pub strength: i32,
    pub intelligence: i32,
    pub charisma: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub critical: i32,
    /// Extra experience percentage.
    pub experience: i32,
}

/// What an item does, with its tunable numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemPower {
    Inert,
    Heal { amount: i32 },
    Explosive { damage: i32, armed: bool, fuse: i32 },
    Melee { damage: i32 },
    /// Thrown or cast along a straight line; adds the holder's `stat`.
    Ranged { damage: i32, range: i32, stat: Stat },
    Armor { constitution: i32 },
    Ring(RingBonus),
}

impl ItemPower {
    /// Stat deltas applied on equip and reverted on unequip.
    pub fn bonuses(&self) -> Vec<(Stat, i32)> {
        match *self {
            ItemPower::Melee { damage } | ItemPower::Ranged { damage, .. } => {
                vec![(Stat::Strength, damage)]
            }
            ItemPower::Armor { constitution } => vec![(Stat::Constitution, constitution)],
            ItemPower::Ring(bonus) => vec![
                (Stat::MaxHealth, bonus.max_health),
                (Stat::Strength, bonus.strength),
                (Stat::Intelligence, bonus.intelligence),
                (Stat::Charisma, bonus.charisma),
                (Stat::Dexterity, bonus.dexterity),
                (Stat::Constitution, bonus.constitution),
                (Stat::Critical, bonus.critical),
            ],
            ItemPower::Inert | ItemPower::Heal { .. } | ItemPower::Explosive { .. } => Vec::new(),
        }
    }

    /// Extra experience percentage granted while equipped.
    pub fn experience_bonus(&self) -> i32 {
        match self {
            ItemPower::Ring(bonus) => bonus.experience,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemData {
    pub price: i32,
    pub equipped: bool,
    pub power: ItemPower,
}

impl ItemData {
    pub fn new(price: i32, power: ItemPower) -> Self {
        Self {
            price,
            equipped: false,
            power,
        }
    }
}

/// Hazel purse plus carried items. Carried items live here, not on the map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Holder {
    pub hazel: i32,
    pub inventory: Vec<Entity>,
}

impl Holder {
    pub fn new(hazel: i32) -> Self {
        Self {
            hazel,
            inventory: Vec::new(),
        }
    }

    /// Index of the equipped item occupying `slot`, if any.
    pub fn equipped_in(&self, slot: EquipSlot) -> Option<usize> {
        self.inventory.iter().position(|entity| {
            entity.kind.equip_slot() == slot
                && entity.item.as_ref().is_some_and(|item| item.equipped)
        })
    }

    /// Ranged power of the equipped main-hand item.
    pub fn ranged_weapon(&self) -> Option<(usize, i32, i32, Stat)> {
        let index = self.equipped_in(EquipSlot::Main)?;
        match self.inventory[index].item.as_ref()?.power {
            ItemPower::Ranged { damage, range, stat } => Some((index, damage, range, stat)),
            _ => None,
        }
    }
}
