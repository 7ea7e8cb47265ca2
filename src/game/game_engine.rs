use log::{debug, info, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;

use super::catalog;
use super::game_state::{GameState, Transition};
use super::generator;
use crate::events::{EventEmitter, EventObserver, SubscriptionId};
use crate::model::{
    CellState, Difficulty, GameEngineCommand, GameEngineEvent, GridSize, Puzzle, Tool,
};
use crate::storage::{load_record, remove_record, save_record, KeyValueStore, CURRENT_GAME_KEY};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    #[display("puzzle {_0:?} not found")]
    PuzzleNotFound(#[error(not(source))] String),
}

/// Owns the active play session, persisting it after every accepted change
/// and announcing the new state on the event channel.
pub struct GameEngine<S: KeyValueStore> {
    session: Option<GameState>,
    store: S,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
}

impl<S: KeyValueStore + 'static> GameEngine<S> {
    pub fn new(store: S, game_engine_event_emitter: EventEmitter<GameEngineEvent>) -> Self {
        Self {
            session: None,
            store,
            game_engine_event_emitter,
        }
    }

    /// Routes commands from `observer` into `engine`.
    pub fn wire_commands(
        engine: &Rc<RefCell<Self>>,
        observer: &EventObserver<GameEngineCommand>,
    ) -> SubscriptionId {
        let engine = Rc::clone(engine);
        observer.subscribe(move |command| match engine.try_borrow_mut() {
            Ok(mut engine) => {
                if let Err(err) = engine.handle_command(command.clone()) {
                    warn!(target: "game_state", "Command {:?} failed: {}", command, err);
                }
            }
            Err(_) => warn!(target: "game_state", "Engine busy; dropped command {:?}", command),
        })
    }

    pub fn current(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn start_puzzle(&mut self, puzzle: Puzzle) {
        info!(
            target: "game_state",
            "New game; puzzle: {}; size: {}; difficulty: {}",
            puzzle.id(),
            puzzle.size(),
            puzzle.difficulty()
        );
        self.set_session(GameState::start(Rc::new(puzzle)));
    }

    pub fn start_generated(&mut self, size: GridSize, difficulty: Difficulty, seed: Option<u64>) {
        let puzzle = match seed {
            Some(seed) => generator::generate_with_seed(size, difficulty, seed),
            None => generator::generate(size, difficulty),
        };
        self.start_puzzle(puzzle);
    }

    /// The current session is left untouched when the id is unknown.
    pub fn start_catalog_puzzle(&mut self, puzzle_id: &str) -> Result<(), EngineError> {
        let puzzle = catalog::get_puzzle_by_id(puzzle_id)
            .ok_or_else(|| EngineError::PuzzleNotFound(puzzle_id.to_string()))?;
        self.start_puzzle(puzzle.clone());
        Ok(())
    }

    pub fn edit_cell(&mut self, row: usize, col: usize, state: CellState) -> Transition {
        self.apply(|session| session.edit_cell(row, col, state))
    }

    /// Resolves `tool` against the cell's current state, then edits.
    pub fn apply_tool(&mut self, row: usize, col: usize, tool: Tool) -> Transition {
        let current = match self.session.as_ref().and_then(|s| s.grid().get(row, col)) {
            Some(current) => current,
            None => return Transition::Ignored,
        };
        self.edit_cell(row, col, tool.apply(current))
    }

    pub fn undo(&mut self) -> Transition {
        self.apply(GameState::undo)
    }

    pub fn redo(&mut self) -> Transition {
        self.apply(GameState::redo)
    }

    pub fn use_hint(&mut self) -> Transition {
        self.apply(GameState::use_hint)
    }

    pub fn toggle_pause(&mut self) -> Transition {
        self.apply(GameState::toggle_pause)
    }

    /// Restores the persisted session, if any. Returns whether one was loaded.
    pub fn load_progress(&mut self) -> bool {
        match load_record::<_, GameState>(&self.store, CURRENT_GAME_KEY) {
            Some(session) => {
                trace!(target: "game_state", "Loading saved session {:?}", session);
                self.set_session(session);
                true
            }
            None => false,
        }
    }

    /// Drops the session and its persisted record.
    pub fn reset(&mut self) {
        self.session = None;
        remove_record(&mut self.store, CURRENT_GAME_KEY);
        self.game_engine_event_emitter
            .emit(GameEngineEvent::SessionCleared);
    }

    pub fn handle_command(&mut self, command: GameEngineCommand) -> Result<(), EngineError> {
        trace!(target: "game_state", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::StartPuzzle(puzzle) => self.start_puzzle(puzzle),
            GameEngineCommand::StartGenerated(size, difficulty, seed) => {
                self.start_generated(size, difficulty, seed)
            }
            GameEngineCommand::StartCatalogPuzzle(puzzle_id) => {
                self.start_catalog_puzzle(&puzzle_id)?
            }
            GameEngineCommand::EditCell(row, col, state) => {
                self.edit_cell(row, col, state);
            }
            GameEngineCommand::ApplyTool(row, col, tool) => {
                self.apply_tool(row, col, tool);
            }
            GameEngineCommand::Undo => {
                self.undo();
            }
            GameEngineCommand::Redo => {
                self.redo();
            }
            GameEngineCommand::UseHint => {
                self.use_hint();
            }
            GameEngineCommand::TogglePause => {
                self.toggle_pause();
            }
            GameEngineCommand::LoadProgress => {
                self.load_progress();
            }
            GameEngineCommand::Reset => self.reset(),
        }
        Ok(())
    }

    fn set_session(&mut self, session: GameState) {
        self.game_engine_event_emitter
            .emit(GameEngineEvent::SessionStarted(Rc::clone(session.puzzle())));
        self.session = Some(session);
        self.persist();
        self.sync_session_display();
    }

    fn apply<F>(&mut self, operation: F) -> Transition
    where
        F: FnOnce(&mut GameState) -> Transition,
    {
        let Some(session) = self.session.as_mut() else {
            trace!(target: "game_state", "No active session");
            return Transition::Ignored;
        };
        let transition = operation(session);
        if transition.is_ignored() {
            return transition;
        }

        self.persist();
        self.sync_session_display();
        if let Transition::Completed(stats) = &transition {
            debug!(target: "game_state", "Announcing completion of {}", stats.puzzle_id);
            self.game_engine_event_emitter
                .emit(GameEngineEvent::PuzzleCompleted(stats.clone()));
        }
        transition
    }

    fn persist(&mut self) {
        if let Some(session) = &self.session {
            save_record(&mut self.store, CURRENT_GAME_KEY, session);
        }
    }

    fn sync_session_display(&self) {
        let Some(session) = &self.session else {
            return;
        };
        let emitter = &self.game_engine_event_emitter;
        emitter.emit(GameEngineEvent::GridUpdated(session.grid().clone()));
        emitter.emit(GameEngineEvent::HistoryChanged {
            undo_depth: session.undo_depth(),
            redo_depth: session.redo_depth(),
        });
        emitter.emit(GameEngineEvent::ErrorCountChanged(session.errors()));
        emitter.emit(GameEngineEvent::HintUsageChanged(session.hints_used()));
        emitter.emit(GameEngineEvent::StatusChanged(session.status()));
        emitter.emit(GameEngineEvent::TimerStateChanged(
            session.timer_state().clone(),
        ));
    }
}
