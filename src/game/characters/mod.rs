// Character system
//
// This module contains everything related to the duelists:
// - The fixed roster of archetypes
// - Combatant records created from it for a match

pub mod combatant;
pub mod roster;

// Re-export commonly used types
pub use combatant::Combatant;
pub use roster::Archetype;
