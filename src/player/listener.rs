//! State-change subscriptions.

use super::state::PlaybackState;

/// One lifecycle transition of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: PlaybackState,
    pub to: PlaybackState,
    /// Index of the last dispatched frame, `None` before the first
    pub cursor: Option<usize>,
}

/// Observer notified on every state transition.
pub trait StateListener {
    fn on_state_change(&mut self, change: &StateChange);
}

impl<F> StateListener for F
where
    F: FnMut(&StateChange),
{
    fn on_state_change(&mut self, change: &StateChange) {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn StateListener>)>,
}

impl Listeners {
    pub fn add(&mut self, listener: Box<dyn StateListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, change: &StateChange) {
        for (_, listener) in &mut self.entries {
            listener.on_state_change(change);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
