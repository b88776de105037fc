//! Persistence seam for the activity board.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::DailyActivityBoard;
use crate::error::{DatabaseError, Result};
use crate::storage::Database;

/// Key of the single persisted slot holding the whole board.
pub const BOARD_KEY: &str = "dailyActivities";

/// Where the board lives between runs. Writes are whole-board, last write wins.
pub trait BoardStore {
    /// Load the saved board, `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<DailyActivityBoard>>;

    /// Replace the saved board.
    fn save(&self, board: &DailyActivityBoard) -> Result<()>;
}

fn decode(raw: &str) -> Result<DailyActivityBoard> {
    serde_json::from_str(raw).map_err(|e| {
        DatabaseError::CorruptValue {
            key: BOARD_KEY.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

impl BoardStore for Database {
    fn load(&self) -> Result<Option<DailyActivityBoard>> {
        match self.kv_get(BOARD_KEY)? {
            Some(raw) => Ok(Some(decode(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, board: &DailyActivityBoard) -> Result<()> {
        let raw = serde_json::to_string(board)?;
        self.kv_set(BOARD_KEY, &raw)?;
        Ok(())
    }
}

impl<S: BoardStore + ?Sized> BoardStore for Rc<S> {
    fn load(&self) -> Result<Option<DailyActivityBoard>> {
        (**self).load()
    }

    fn save(&self, board: &DailyActivityBoard) -> Result<()> {
        (**self).save(board)
    }
}

/// In-memory slot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryBoardStore {
    slot: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON currently held in the slot.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Make subsequent saves fail, for exercising rollback paths.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl BoardStore for MemoryBoardStore {
    fn load(&self) -> Result<Option<DailyActivityBoard>> {
        self.slot.borrow().as_deref().map(decode).transpose()
    }

    fn save(&self, board: &DailyActivityBoard) -> Result<()> {
        if self.fail_writes.get() {
            return Err(DatabaseError::QueryFailed("write rejected".into()).into());
        }
        *self.slot.borrow_mut() = Some(serde_json::to_string(board)?);
        Ok(())
    }
}
