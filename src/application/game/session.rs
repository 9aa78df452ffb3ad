use crate::domain::error::GameError;
use crate::domain::services::apply_throw;
use crate::domain::value_objects::GameState;

/// The game being played plus the snapshots needed to undo throws
///
/// Owned by the caller; the rules engine itself never holds state.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    undo_stack: Vec<GameState>,
}

impl GameSession {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            undo_stack: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply a throw, keeping the previous state for undo
    pub fn apply_throw(&mut self, points: u8) -> Result<&GameState, GameError> {
        let next = apply_throw(&self.state, points)?;
        self.commit(next);
        Ok(&self.state)
    }

    /// Move to a state already computed from the current one
    pub fn commit(&mut self, next: GameState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.undo_stack.push(previous);
    }

    /// State `undo` would restore
    pub fn previous(&self) -> Option<&GameState> {
        self.undo_stack.last()
    }

    /// Restore the state before the last throw; false when nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.state = previous;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Start over with a different game
    pub fn replace(&mut self, state: GameState) {
        self.state = state;
        self.undo_stack.clear();
    }
}
