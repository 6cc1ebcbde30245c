//! Events scheduled on the state and run by the `ready_events` hook.
//!
//! An event waits in the pending list until its condition holds, then moves
//! to the ready list. Events hold closures and are not part of snapshots.

use std::fmt;

use textgame_foundation::Message;

use crate::state::State;

/// Something that happens once its condition holds.
pub trait Event {
    /// Returns true once the event should happen.
    fn condition(&self, state: &State) -> bool;

    /// Runs the event.
    fn call(self: Box<Self>, state: &mut State) -> Option<Message>;
}

type Then = Box<dyn FnOnce(&mut State) -> Option<Message>>;

/// An event with an arbitrary condition.
pub struct Trigger {
    when: Box<dyn Fn(&State) -> bool>,
    then: Then,
}

impl Trigger {
    /// Creates a trigger running `then` once `when` holds.
    pub fn new<W, T>(when: W, then: T) -> Self
    where
        W: Fn(&State) -> bool + 'static,
        T: FnOnce(&mut State) -> Option<Message> + 'static,
    {
        Self {
            when: Box::new(when),
            then: Box::new(then),
        }
    }
}

impl Event for Trigger {
    fn condition(&self, state: &State) -> bool {
        (self.when)(state)
    }

    fn call(self: Box<Self>, state: &mut State) -> Option<Message> {
        (self.then)(state)
    }
}

/// An event that happens once the game time reaches `time`.
pub struct Timer {
    time: u64,
    then: Then,
}

impl Timer {
    /// Creates a timer.
    pub fn new<T>(time: u64, then: T) -> Self
    where
        T: FnOnce(&mut State) -> Option<Message> + 'static,
    {
        Self {
            time,
            then: Box::new(then),
        }
    }

    /// Returns the time the timer goes off.
    #[must_use]
    pub fn time(&self) -> u64 {
        self.time
    }
}

impl Event for Timer {
    fn condition(&self, state: &State) -> bool {
        state.time >= self.time
    }

    fn call(self: Box<Self>, state: &mut State) -> Option<Message> {
        (self.then)(state)
    }
}

/// Ready and pending events of a state.
#[derive(Default)]
pub(crate) struct Events {
    pub(crate) ready: Vec<Box<dyn Event>>,
    pub(crate) pending: Vec<Box<dyn Event>>,
}

impl Events {
    pub(crate) fn len(&self) -> usize {
        self.ready.len() + self.pending.len()
    }
}

impl fmt::Debug for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Events")
            .field("ready", &self.ready.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}
