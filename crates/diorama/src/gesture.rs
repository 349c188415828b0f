use eframe::egui::Pos2;

/// Minimum horizontal travel, in logical points, for a drag to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Callbacks a container hands to the recognizer.
pub struct SwipeHandlers {
    pub on_swipe_left: Box<dyn FnMut()>,
    pub on_swipe_right: Box<dyn FnMut()>,
}

/// Tracks an in-progress pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    Pressed { origin: Pos2, current: Pos2 },
}

/// Turns pointer press/move/release sequences into horizontal swipes.
///
/// With no handlers attached the recognizer still tracks pointers but never
/// calls anything.
pub struct SwipeRecognizer {
    threshold: f32,
    tracking: Tracking,
    handlers: Option<SwipeHandlers>,
}

impl Default for SwipeRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeRecognizer {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            tracking: Tracking::Idle,
            handlers: None,
        }
    }

    /// Replaces the attached handlers; `None` detaches everything.
    pub fn attach(&mut self, handlers: Option<SwipeHandlers>) {
        self.handlers = handlers;
    }

    pub fn has_handlers(&self) -> bool {
        self.handlers.is_some()
    }

    pub fn press(&mut self, pos: Pos2) {
        self.tracking = Tracking::Pressed {
            origin: pos,
            current: pos,
        };
    }

    pub fn move_to(&mut self, pos: Pos2) {
        if let Tracking::Pressed { current, .. } = &mut self.tracking {
            *current = pos;
        }
    }

    pub fn cancel(&mut self) {
        self.tracking = Tracking::Idle;
    }

    /// Ends the interaction. Returns the recognized swipe, if any, after
    /// invoking the matching handler.
    pub fn release(&mut self, pos: Pos2) -> Option<SwipeDirection> {
        let Tracking::Pressed { origin, .. } =
            std::mem::replace(&mut self.tracking, Tracking::Idle)
        else {
            return None;
        };

        let direction = self.classify(origin, pos)?;
        if let Some(handlers) = &mut self.handlers {
            match direction {
                SwipeDirection::Left => (handlers.on_swipe_left)(),
                SwipeDirection::Right => (handlers.on_swipe_right)(),
            }
        }
        Some(direction)
    }

    fn classify(&self, from: Pos2, to: Pos2) -> Option<SwipeDirection> {
        let delta = to - from;
        if delta.x.abs() < self.threshold || delta.x.abs() <= delta.y.abs() {
            return None;
        }
        if delta.x < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            Some(SwipeDirection::Right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_handlers() -> (SwipeHandlers, Rc<RefCell<Vec<SwipeDirection>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let left = log.clone();
        let right = log.clone();
        let handlers = SwipeHandlers {
            on_swipe_left: Box::new(move || left.borrow_mut().push(SwipeDirection::Left)),
            on_swipe_right: Box::new(move || right.borrow_mut().push(SwipeDirection::Right)),
        };
        (handlers, log)
    }

    fn swipe(recognizer: &mut SwipeRecognizer, from: Pos2, to: Pos2) -> Option<SwipeDirection> {
        recognizer.press(from);
        recognizer.move_to(pos2((from.x + to.x) / 2.0, (from.y + to.y) / 2.0));
        recognizer.release(to)
    }

    #[test]
    fn test_left_and_right_swipes() {
        let mut recognizer = SwipeRecognizer::default();
        let (handlers, log) = recording_handlers();
        recognizer.attach(Some(handlers));

        assert_eq!(
            swipe(&mut recognizer, pos2(300.0, 100.0), pos2(100.0, 110.0)),
            Some(SwipeDirection::Left)
        );
        assert_eq!(
            swipe(&mut recognizer, pos2(100.0, 100.0), pos2(300.0, 90.0)),
            Some(SwipeDirection::Right)
        );
        assert_eq!(
            *log.borrow(),
            vec![SwipeDirection::Left, SwipeDirection::Right]
        );
    }

    #[test]
    fn test_short_or_vertical_drag_is_not_a_swipe() {
        let mut recognizer = SwipeRecognizer::default();
        let (handlers, log) = recording_handlers();
        recognizer.attach(Some(handlers));

        assert_eq!(swipe(&mut recognizer, pos2(100.0, 100.0), pos2(120.0, 100.0)), None);
        assert_eq!(swipe(&mut recognizer, pos2(100.0, 100.0), pos2(180.0, 300.0)), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_release_without_press() {
        let mut recognizer = SwipeRecognizer::default();
        assert_eq!(recognizer.release(pos2(0.0, 0.0)), None);
    }

    #[test]
    fn test_cancel_discards_interaction() {
        let mut recognizer = SwipeRecognizer::default();
        recognizer.press(pos2(300.0, 0.0));
        recognizer.cancel();
        assert_eq!(recognizer.release(pos2(0.0, 0.0)), None);
    }

    #[test]
    fn test_detached_recognizer_calls_nothing() {
        let mut recognizer = SwipeRecognizer::default();
        let (handlers, log) = recording_handlers();
        recognizer.attach(Some(handlers));
        recognizer.attach(None);
        assert!(!recognizer.has_handlers());

        assert_eq!(
            swipe(&mut recognizer, pos2(300.0, 0.0), pos2(0.0, 0.0)),
            Some(SwipeDirection::Left)
        );
        assert!(log.borrow().is_empty());
    }
}
