// Character roster - every duelist is built from one of these rows
// Differentiation comes from the stat line, not from separate types

use crate::core::config::ConfigError;

/// Fixed stat line of a playable character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub name: &'static str,
    /// Starting health points
    pub health: i32,
    /// Damage dealt by a basic attack
    pub attack: i32,
    /// Damage shaved off a basic attack when guarding
    pub defense: i32,
    /// Display name of the special attack
    pub special_attack_name: &'static str,
    /// Base special attack damage
    pub special_attack_damage: f32,
}

/// The nine playable characters
pub const ROSTER: [Archetype; 9] = [
    Archetype {
        name: "Draco",
        health: 120,
        attack: 25,
        defense: 5,
        special_attack_name: "Fireball",
        special_attack_damage: 35.0,
    },
    Archetype {
        name: "Hydra",
        health: 140,
        attack: 30,
        defense: 1,
        special_attack_name: "Venom",
        special_attack_damage: 35.0,
    },
    Archetype {
        name: "Phoenix",
        health: 160,
        attack: 15,
        defense: 25,
        special_attack_name: "Rebirth",
        special_attack_damage: 45.0,
    },
    Archetype {
        name: "Lyra",
        health: 60,
        attack: 40,
        defense: 20,
        special_attack_name: "Heal",
        special_attack_damage: 50.0,
    },
    Archetype {
        name: "Orion",
        health: 110,
        attack: 28,
        defense: 8,
        special_attack_name: "Arrow Storm",
        special_attack_damage: 38.0,
    },
    Archetype {
        name: "Pegasus",
        health: 90,
        attack: 32,
        defense: 12,
        special_attack_name: "Wing Slash",
        special_attack_damage: 42.0,
    },
    Archetype {
        name: "Andromeda",
        health: 70,
        attack: 37,
        defense: 17,
        special_attack_name: "Chain Strike",
        special_attack_damage: 47.0,
    },
    Archetype {
        name: "Centaurus",
        health: 85,
        attack: 33,
        defense: 13,
        special_attack_name: "Trample",
        special_attack_damage: 43.0,
    },
    Archetype {
        name: "Cassiopeia",
        health: 75,
        attack: 36,
        defense: 18,
        special_attack_name: "Poison Fang",
        special_attack_damage: 46.0,
    },
];

impl Archetype {
    /// Look up a roster row by name, ignoring case
    pub fn by_name(name: &str) -> Result<&'static Archetype, ConfigError> {
        ROSTER
            .iter()
            .find(|archetype| archetype.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownArchetype(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_size() {
        assert_eq!(ROSTER.len(), 9);
    }

    #[test]
    fn test_lookup() {
        let hydra = Archetype::by_name("Hydra").unwrap();
        assert_eq!(hydra.health, 140);
        assert_eq!(hydra.attack, 30);
        assert_eq!(hydra.defense, 1);
        assert_eq!(hydra.special_attack_name, "Venom");
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert!(Archetype::by_name("arrow storm").is_err());
        assert_eq!(Archetype::by_name("orion").unwrap().special_attack_name, "Arrow Storm");
        assert_eq!(Archetype::by_name(" DRACO ").unwrap().name, "Draco");
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            Archetype::by_name("Medusa"),
            Err(ConfigError::UnknownArchetype(name)) if name == "Medusa"
        ));
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<_> = ROSTER.iter().map(|archetype| archetype.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ROSTER.len());
    }
}
