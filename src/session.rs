use std::collections::HashMap;
use std::sync::Mutex;

use crate::internal_error::InternalResult;
use crate::records::data::UserID;

/// Which record kind the next free-text message from a user should be
/// parsed as. A user with no entry in the map is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwaitMode {
    Task,
    Study,
    Goal,
}

#[derive(Debug, Default)]
pub struct SessionMap {
    awaiting: Mutex<HashMap<UserID, AwaitMode>>,
}

impl SessionMap {
    pub fn new() -> SessionMap {
        SessionMap::default()
    }

    /// Marks the user as awaiting input, replacing any previous mode.
    pub fn set_awaiting(&self, user_id: UserID, mode: AwaitMode) -> InternalResult<()> {
        self.awaiting.lock()?.insert(user_id, mode);
        Ok(())
    }

    pub fn get_awaiting(&self, user_id: UserID) -> InternalResult<Option<AwaitMode>> {
        Ok(self.awaiting.lock()?.get(&user_id).copied())
    }

    pub fn clear_awaiting(&self, user_id: UserID) -> InternalResult<()> {
        self.awaiting.lock()?.remove(&user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_start_idle() {
        let sessions = SessionMap::new();
        assert_eq!(sessions.get_awaiting(1).unwrap(), None);
    }

    #[test]
    fn setting_a_mode_replaces_the_previous_one() {
        let sessions = SessionMap::new();
        sessions.set_awaiting(1, AwaitMode::Task).unwrap();
        sessions.set_awaiting(1, AwaitMode::Goal).unwrap();

        assert_eq!(sessions.get_awaiting(1).unwrap(), Some(AwaitMode::Goal));
    }

    #[test]
    fn modes_are_tracked_per_user() {
        let sessions = SessionMap::new();
        sessions.set_awaiting(1, AwaitMode::Task).unwrap();
        sessions.set_awaiting(2, AwaitMode::Study).unwrap();

        sessions.clear_awaiting(1).unwrap();

        assert_eq!(sessions.get_awaiting(1).unwrap(), None);
        assert_eq!(sessions.get_awaiting(2).unwrap(), Some(AwaitMode::Study));
    }

    #[test]
    fn clearing_an_idle_user_is_a_no_op() {
        let sessions = SessionMap::new();
        sessions.clear_awaiting(7).unwrap();
        assert_eq!(sessions.get_awaiting(7).unwrap(), None);
    }
}
