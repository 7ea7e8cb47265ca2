mod cell_state;
mod difficulty;
mod game_engine_command;
mod game_engine_event;
mod game_stats;
mod game_status;
mod grid_size;
mod model_error;
mod player_grid;
mod puzzle;
mod puzzle_pack;
mod timer_state;

pub use cell_state::{CellState, Tool};
pub use difficulty::Difficulty;
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::GameEngineEvent;
pub use game_stats::{PuzzleStats, UserStats, RECENT_PUZZLES_LIMIT};
pub use game_status::GameStatus;
pub use grid_size::GridSize;
pub use model_error::ModelError;
pub use player_grid::PlayerGrid;
pub use puzzle::{parse_pattern, Puzzle, PuzzleOrigin};
pub use puzzle_pack::PuzzlePack;
pub use timer_state::TimerState;
