// Game modules: action vocabulary, combatants, combat, bot and duel flow

pub mod action;
pub mod bot;
pub mod characters;
pub mod combat;
pub mod duel;
