use std::cell::{Cell, RefCell};
use std::fmt;
use std::str::FromStr;

use crate::error::DeckError;

/// Logical key actions a deck can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Left,
    Right,
    PageUp,
    PageDown,
}

impl KeyAction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::PageUp => "page up",
            Self::PageDown => "page down",
        }
    }

    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::Left,
            KeyAction::Right,
            KeyAction::PageUp,
            KeyAction::PageDown,
        ]
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyAction {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "page up" => Ok(Self::PageUp),
            "page down" => Ok(Self::PageDown),
            other => Err(DeckError::UnknownKeyAction(other.to_string())),
        }
    }
}

/// Handle returned by [`KeyboardRouter::register`], needed to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type KeyCallback = Box<dyn FnMut()>;

/// Dispatches logical key actions to registered listeners.
///
/// A router outlives the decks that register with it, so every registration
/// must be paired with an `unregister`. Routers are shared behind an `Rc` and
/// take `&self`, so a listener may register or unregister others (or drop a
/// whole deck) while a dispatch is running.
pub trait KeyboardRouter {
    fn register(&self, action: KeyAction, callback: KeyCallback) -> ListenerId;

    /// Returns false when the handle was not (or no longer) registered.
    fn unregister(&self, id: ListenerId) -> bool;

    /// Invokes every listener for `action` in registration order and returns
    /// how many were called.
    fn dispatch(&self, action: KeyAction) -> usize;

    fn listener_count(&self) -> usize;
}

struct Listener {
    id: ListenerId,
    action: KeyAction,
    callback: KeyCallback,
}

/// In-process [`KeyboardRouter`].
///
/// No borrow is held while a callback runs. Listeners being dispatched are
/// moved out of the registry for the duration; removing one of them queues
/// the id, and the queue is applied when the dispatch finishes.
#[derive(Default)]
pub struct Keyboard {
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
    in_flight: RefCell<Vec<ListenerId>>,
    pending_removal: RefCell<Vec<ListenerId>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops queued listeners that are back in the registry.
    fn release_pending(&self) {
        let released: Vec<Listener> = {
            let in_flight = self.in_flight.borrow();
            let mut pending = self.pending_removal.borrow_mut();
            let mut listeners = self.listeners.borrow_mut();
            let mut released = Vec::new();
            pending.retain(|id| {
                if in_flight.contains(id) {
                    return true;
                }
                if let Some(i) = listeners.iter().position(|l| l.id == *id) {
                    released.push(listeners.remove(i));
                }
                false
            });
            released
        };
        if !released.is_empty() {
            tracing::trace!(count = released.len(), "queued key listeners released");
        }
    }
}

/// Listeners taken out of the registry for one dispatch, returned on drop
/// (also when a callback panics).
struct Batch<'a> {
    keyboard: &'a Keyboard,
    listeners: Vec<Listener>,
}

impl<'a> Batch<'a> {
    fn take(keyboard: &'a Keyboard) -> Self {
        let listeners = keyboard.listeners.take();
        keyboard
            .in_flight
            .borrow_mut()
            .extend(listeners.iter().map(|l| l.id));
        Self {
            keyboard,
            listeners,
        }
    }
}

impl Drop for Batch<'_> {
    fn drop(&mut self) {
        let keyboard = self.keyboard;
        let ids: Vec<ListenerId> = self.listeners.iter().map(|l| l.id).collect();
        keyboard.in_flight.borrow_mut().retain(|id| !ids.contains(id));

        // listeners registered during the dispatch go after the batch
        let added = keyboard.listeners.replace(std::mem::take(&mut self.listeners));
        keyboard.listeners.borrow_mut().extend(added);
        keyboard.release_pending();
    }
}

impl KeyboardRouter for Keyboard {
    fn register(&self, action: KeyAction, callback: KeyCallback) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            action,
            callback,
        });
        tracing::trace!(%action, ?id, "key listener registered");
        id
    }

    fn unregister(&self, id: ListenerId) -> bool {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|l| l.id == id)
                .map(|i| listeners.remove(i))
        };
        if removed.is_some() {
            tracing::trace!(?id, "key listener unregistered");
            return true;
        }

        let mut pending = self.pending_removal.borrow_mut();
        if self.in_flight.borrow().contains(&id) && !pending.contains(&id) {
            pending.push(id);
            tracing::trace!(?id, "key listener removal queued until dispatch ends");
            return true;
        }
        tracing::trace!(?id, "key listener was not registered");
        false
    }

    fn dispatch(&self, action: KeyAction) -> usize {
        self.release_pending();
        let mut batch = Batch::take(self);
        let mut called = 0;
        for listener in batch.listeners.iter_mut().filter(|l| l.action == action) {
            if self.pending_removal.borrow().contains(&listener.id) {
                continue;
            }
            (listener.callback)();
            called += 1;
        }
        drop(batch);
        called
    }

    fn listener_count(&self) -> usize {
        let registered = self.listeners.borrow().len() + self.in_flight.borrow().len();
        registered.saturating_sub(self.pending_removal.borrow().len())
    }
}
