// Engine modules: pose input and turn timing

pub mod pose;
pub mod turn_clock;
