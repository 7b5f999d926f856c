//! Combat resolution.
//!
//! `hit` and `damage` are pure rules; the functions here apply them to a
//! [`Map`], rolling from its dice and removing whoever dies.

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::effective_damage;
pub use hit::{Strike, roll_strike};
pub use result::{AttackOutcome, AttackReport, DamageReport};

use crate::state::{EntityId, Map};

/// Deals `amount` damage to `defender`.
///
/// Returns `None` when the defender is gone or cannot fight, so hitting an
/// entity twice after it died is a no-op.
pub fn take_damage(map: &mut Map, defender: EntityId, amount: i32) -> Option<DamageReport> {
    let entity = map.get_mut(defender)?;
    let kind = entity.kind;
    let fighter = entity.fighter.as_mut()?;

    if kind.is_immortal() {
        return Some(DamageReport {
            defender: kind,
            damage: 0,
            killed: false,
            immune: true,
        });
    }

    let damage = effective_damage(amount, fighter.constitution);
    fighter.health = (fighter.health - damage).max(0);
    let killed = fighter.is_dead();
    if killed {
        tracing::debug!(
            target: "dungeon::combat",
            entity = %defender,
            kind = kind.as_str(),
            "entity died"
        );
        map.remove_entity(defender);
    }

    Some(DamageReport {
        defender: kind,
        damage,
        killed,
        immune: false,
    })
}

/// Melee attack of `attacker` against `defender`.
pub fn hit(map: &mut Map, attacker: EntityId, defender: EntityId) -> Option<AttackReport> {
    let defender_kind = map.get(defender)?.kind;
    let attacker_entity = map.get(attacker)?;
    let attacker_kind = attacker_entity.kind;
    let confused = attacker_entity.fighter.as_ref()?.is_confused();

    let strike = if confused {
        Strike::Confused
    } else {
        let roll = map.dice_mut().roll_d100();
        let fighter = map.get(attacker)?.fighter.as_ref()?;
        roll_strike(fighter, roll)
    };

    let outcome = match strike {
        Strike::Confused => AttackOutcome::Confused,
        Strike::Normal(amount) | Strike::Critical(amount) => AttackOutcome::Hit {
            critical: matches!(strike, Strike::Critical(_)),
            damage: take_damage(map, defender, amount)?,
        },
    };

    Some(AttackReport {
        attacker: attacker_kind,
        defender: defender_kind,
        outcome,
    })
}
