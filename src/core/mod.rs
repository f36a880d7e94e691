// Core utilities: math helpers, configuration and the random source

pub mod config;
pub mod dice;
pub mod math;
