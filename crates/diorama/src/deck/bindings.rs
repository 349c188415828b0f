use std::rc::Rc;

use super::navigator::{Navigation, Navigator};
use crate::keyboard::{KeyAction, KeyboardRouter, ListenerId};

const KEY_BINDINGS: [(KeyAction, Navigation); 4] = [
    (KeyAction::Left, Navigation::Previous),
    (KeyAction::Right, Navigation::Next),
    (KeyAction::PageUp, Navigation::Previous),
    (KeyAction::PageDown, Navigation::Next),
];

/// Key listeners a deck holds on a shared router.
///
/// Registered on construction and unregistered on drop, so a deck that goes
/// away for any reason leaves nothing behind on the router.
pub(crate) struct KeyBindings {
    router: Rc<dyn KeyboardRouter>,
    listeners: Vec<ListenerId>,
}

impl KeyBindings {
    pub fn bind(router: Rc<dyn KeyboardRouter>, navigator: &Navigator) -> Self {
        let listeners = KEY_BINDINGS
            .iter()
            .map(|&(action, navigation)| {
                let navigator = navigator.clone();
                router.register(action, Box::new(move || navigator.send(navigation)))
            })
            .collect();
        Self { router, listeners }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for KeyBindings {
    fn drop(&mut self) {
        for id in self.listeners.drain(..) {
            if !self.router.unregister(id) {
                tracing::warn!(?id, "key listener already gone from router");
            }
        }
    }
}
