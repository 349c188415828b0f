use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A navigation request waiting to be applied by the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    GoTo(usize),
}

/// Cheap, cloneable handle that queues navigation requests for a deck.
///
/// Key listeners, swipe handlers, navigation buttons and links inside slides
/// all hold one of these instead of a reference to the deck. Requests are
/// applied in arrival order by [`Deck::process_events`](super::Deck::process_events).
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    queue: Rc<RefCell<VecDeque<Navigation>>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) {
        self.send(Navigation::Previous);
    }

    pub fn next(&self) {
        self.send(Navigation::Next);
    }

    pub fn go_to(&self, index: usize) {
        self.send(Navigation::GoTo(index));
    }

    pub fn send(&self, navigation: Navigation) {
        self.queue.borrow_mut().push_back(navigation);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub(crate) fn pop(&self) -> Option<Navigation> {
        self.queue.borrow_mut().pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_queue_in_order() {
        let navigator = Navigator::new();
        let link = navigator.clone();

        navigator.next();
        link.go_to(3);
        navigator.previous();

        assert_eq!(navigator.pending(), 3);
        assert_eq!(link.pop(), Some(Navigation::Next));
        assert_eq!(navigator.pop(), Some(Navigation::GoTo(3)));
        assert_eq!(navigator.pop(), Some(Navigation::Previous));
        assert_eq!(navigator.pop(), None);
    }
}
