//! Combat reports, rendered as log lines through `Display`.

use std::fmt;

use crate::state::EntityKind;

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Effect of damage on one defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReport {
    pub defender: EntityKind,
    pub damage: i32,
    pub killed: bool,
    /// Defender cannot be hurt at all.
    pub immune: bool,
}

impl fmt::Display for DamageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = capitalized(self.defender.name());
        if self.immune {
            return write!(f, "{name} is not damaged.");
        }
        write!(f, "{name} takes {} damage.", self.damage)?;
        if self.killed {
            write!(f, " {name} dies.")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    Confused,
    Hit { critical: bool, damage: DamageReport },
}

/// One melee exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: EntityKind,
    pub defender: EntityKind,
    pub outcome: AttackOutcome,
}

impl AttackReport {
    pub fn killed(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Hit { damage, .. } if damage.killed)
    }
}

impl fmt::Display for AttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attacker = capitalized(self.attacker.name());
        match self.outcome {
            AttackOutcome::Confused => {
                write!(f, "{attacker} is confused, it can not hit {}.", self.defender.name())
            }
            AttackOutcome::Hit { critical, damage } => {
                write!(f, "{attacker} hits {}. ", self.defender.name())?;
                if critical {
                    write!(f, "It's a critical hit! ")?;
                }
                write!(f, "{damage}")
            }
        }
    }
}
