pub mod catalog;
pub mod clue_deriver;
pub mod game_engine;
pub mod game_state;
pub mod generator;
pub mod progress;
pub mod settings;
pub mod stats_manager;

pub use game_engine::{EngineError, GameEngine};
pub use game_state::{GameState, Transition};
pub use generator::{generate, generate_with_seed};
pub use settings::Settings;
pub use stats_manager::StatsManager;
