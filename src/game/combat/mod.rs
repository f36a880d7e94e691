// Combat system
//
// - `event`: Narrated turn events and the match log
// - `resolver`: Applies a turn's two moves to the combatants

pub mod event;
pub mod resolver;

// Re-export commonly used types
pub use event::{CombatLog, TurnEvent};
pub use resolver::resolve_turn;
