//! Combat resolution.
//!
//! Combat is deterministic. Both sides' strength scales with their
//! remaining health, the defender's strength with its terrain bonus:
//!
//! ```text
//! attack_force  = attack  * hp / max_hp
//! defence_force = defence * hp / max_hp * bonus
//! damage        = round(attack_force  / total * attack  * 4.5)
//! retaliation   = round(defence_force / total * defence * 4.5)
//! ```
//!
//! Both values come from pre-combat health. Retaliation only lands when the
//! defender survives and the attacker stands within its range.

use crate::actors::Unit;
use crate::core::constants::{ATTACK_MODIFIER, DEFENCE_BONUS, DEFENCE_IN_WALLS};
use crate::core::{Technology, Terrain};
use crate::game::GameState;

/// Damage exchanged in one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatOutcome {
    /// Damage dealt to the defender.
    pub damage: u32,
    /// Damage the defender deals back if it survives and is in range.
    pub retaliation: u32,
}

/// Defence multiplier of `defender` where it currently stands.
#[must_use]
pub fn defence_bonus(gs: &GameState, defender: &Unit) -> f64 {
    let Ok(tile) = gs.board().tile(defender.position) else {
        return 1.0;
    };
    let own_city = tile
        .city
        .and_then(|c| gs.city(c))
        .filter(|c| c.tribe == defender.tribe && c.position == defender.position);
    if let Some(city) = own_city {
        return if city.has_walls {
            DEFENCE_IN_WALLS
        } else {
            DEFENCE_BONUS
        };
    }
    let Some(tribe) = gs.tribe(defender.tribe) else {
        return 1.0;
    };
    let knows = |tech| tribe.tech.is_researched(tech);
    let protected = match tile.terrain {
        Terrain::Forest => knows(Technology::Archery),
        Terrain::Mountain => knows(Technology::Climbing),
        Terrain::ShallowWater | Terrain::DeepWater => knows(Technology::Aquatism),
        _ => false,
    };
    if protected {
        DEFENCE_BONUS
    } else {
        1.0
    }
}

/// Damage exchanged when `attacker` hits `defender` with the given bonus.
#[must_use]
pub fn resolve(attacker: &Unit, defender: &Unit, bonus: f64) -> CombatOutcome {
    let health = |u: &Unit| {
        if u.max_hp == 0 {
            0.0
        } else {
            f64::from(u.hp) / f64::from(u.max_hp)
        }
    };
    let attack_force = attacker.attack() * health(attacker);
    let defence_force = defender.defence() * health(defender) * bonus;
    let total = attack_force + defence_force;
    if total <= 0.0 {
        return CombatOutcome {
            damage: 0,
            retaliation: 0,
        };
    }
    let damage = (attack_force / total * attacker.attack() * ATTACK_MODIFIER).round();
    let retaliation = (defence_force / total * defender.defence() * ATTACK_MODIFIER).round();
    CombatOutcome {
        damage: damage.max(0.0) as u32,
        retaliation: retaliation.max(0.0) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::UnitType;
    use crate::core::{ActorId, Position, TribeId};

    fn unit(kind: UnitType) -> Unit {
        Unit::new(ActorId::new(1), kind, TribeId::new(0), Position::new(0, 0), None)
    }

    #[test]
    fn test_even_warriors() {
        let out = resolve(&unit(UnitType::Warrior), &unit(UnitType::Warrior), 1.0);
        // 2 / 4 * 2 * 4.5 = 4.5, rounded half away from zero
        assert_eq!(out.damage, 5);
        assert_eq!(out.retaliation, 5);
    }

    #[test]
    fn test_defence_bonus_shifts_damage() {
        let plain = resolve(&unit(UnitType::Warrior), &unit(UnitType::Defender), 1.0);
        let walls = resolve(
            &unit(UnitType::Warrior),
            &unit(UnitType::Defender),
            DEFENCE_IN_WALLS,
        );
        assert!(walls.damage < plain.damage);
        assert!(walls.retaliation > plain.retaliation);
    }

    #[test]
    fn test_zero_strength_deals_nothing() {
        let mut wounded = unit(UnitType::Catapult);
        wounded.hp = 0;
        let out = resolve(&unit(UnitType::MindBender), &wounded, 1.0);
        assert_eq!(out.damage, 0);
        assert_eq!(out.retaliation, 0);
    }
}
