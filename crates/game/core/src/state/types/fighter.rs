//! Combat capability: health, the seven stats and timed effects.
//!
//! # Effect lifecycle
//!
//! An [`Effect`] is applied immediately and remembered with a countdown.
//! At the start of the owner's turn every countdown is decremented; effects
//! that reach zero are reverted and dropped.

/// Numeric attribute of a [`Fighter`] that effects and body swaps address by name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stat {
    Health,
    MaxHealth,
    Level,
    Strength,
    Intelligence,
    Charisma,
    Dexterity,
    Constitution,
    Critical,
    /// Non-zero while confused.
    Confused,
}

/// Stats exchanged by a body swap. Position is swapped separately.
pub const SWAPPED_STATS: [Stat; 9] = [
    Stat::Health,
    Stat::MaxHealth,
    Stat::Level,
    Stat::Strength,
    Stat::Intelligence,
    Stat::Charisma,
    Stat::Dexterity,
    Stat::Constitution,
    Stat::Critical,
];

/// Timed, signed modification of one stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub stat: Stat,
    pub delta: i32,
    pub remaining: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub health: i32,
    pub max_health: i32,
    pub level: i32,
    pub strength: i32,
    pub intelligence: i32,
    pub charisma: i32,
    pub dexterity: i32,
    pub constitution: i32,
    /// Percent chance that a hit is critical.
    pub critical: i32,
    pub confused: i32,
    pub effects: Vec<Effect>,
}

impl Fighter {
    /// Full-health fighter with every other stat at zero and level 1.
    pub fn new(max_health: i32, strength: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            level: 1,
            strength,
            intelligence: 0,
            charisma: 0,
            dexterity: 0,
            constitution: 0,
            critical: 0,
            confused: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_stat(mut self, stat: Stat, value: i32) -> Self {
        *self.stat_mut(stat) = value;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_confused(&self) -> bool {
        self.confused > 0
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Health => self.health,
            Stat::MaxHealth => self.max_health,
            Stat::Level => self.level,
            Stat::Strength => self.strength,
            Stat::Intelligence => self.intelligence,
            Stat::Charisma => self.charisma,
            Stat::Dexterity => self.dexterity,
            Stat::Constitution => self.constitution,
            Stat::Critical => self.critical,
            Stat::Confused => self.confused,
        }
    }

    pub fn stat_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Health => &mut self.health,
            Stat::MaxHealth => &mut self.max_health,
            Stat::Level => &mut self.level,
            Stat::Strength => &mut self.strength,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Charisma => &mut self.charisma,
            Stat::Dexterity => &mut self.dexterity,
            Stat::Constitution => &mut self.constitution,
            Stat::Critical => &mut self.critical,
            Stat::Confused => &mut self.confused,
        }
    }

    /// Restores up to `amount` health without exceeding the maximum.
    /// Returns the health actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }

    /// Applies `delta` to `stat` now and schedules its reversal.
    pub fn apply_effect(&mut self, stat: Stat, delta: i32, ticks: i32) {
        *self.stat_mut(stat) += delta;
        self.effects.push(Effect {
            stat,
            delta,
            remaining: ticks,
        });
    }

    /// Start-of-turn bookkeeping. Returns how many effects expired.
    pub fn tick_effects(&mut self) -> usize {
        for effect in &mut self.effects {
            effect.remaining -= 1;
        }
        let (expired, active): (Vec<Effect>, Vec<Effect>) = self
            .effects
            .drain(..)
            .partition(|effect| effect.remaining <= 0);
        self.effects = active;
        for effect in &expired {
            *self.stat_mut(effect.stat) -= effect.delta;
        }
        expired.len()
    }

    /// Exchanges one named stat with another fighter.
    pub fn swap_stat(&mut self, other: &mut Fighter, stat: Stat) {
        std::mem::swap(self.stat_mut(stat), other.stat_mut(stat));
    }
}
