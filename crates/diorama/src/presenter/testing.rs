//! Recording window host for tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::{PresenterPayload, PresenterProps, PresenterWindow, WindowFeatures, WindowHost};
use crate::theme::Theme;

#[derive(Debug, Default)]
pub(crate) struct HostLog {
    pub opened: Vec<(String, String)>,
    pub alerts: Vec<String>,
    pub mounts: Vec<PresenterProps>,
    pub updates: Vec<PresenterPayload>,
    pub titles: Vec<String>,
    pub styles: Vec<Theme>,
    pub close_calls: usize,
    /// Simulates the user closing the window out of band.
    pub user_closed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Allow,
    Block,
    CloseOnOpen,
}

pub(crate) struct RecordingWindowHost {
    behavior: Behavior,
    log: Rc<RefCell<HostLog>>,
}

impl RecordingWindowHost {
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Allow)
    }

    pub fn blocked() -> Self {
        Self::with_behavior(Behavior::Block)
    }

    pub fn closed_on_open() -> Self {
        Self::with_behavior(Behavior::CloseOnOpen)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            log: Rc::new(RefCell::new(HostLog::default())),
        }
    }

    pub fn log(&self) -> Rc<RefCell<HostLog>> {
        self.log.clone()
    }
}

impl WindowHost for RecordingWindowHost {
    fn open_window(
        &mut self,
        name: &str,
        features: &WindowFeatures,
    ) -> Option<Box<dyn PresenterWindow>> {
        self.log
            .borrow_mut()
            .opened
            .push((name.to_string(), features.to_string()));
        match self.behavior {
            Behavior::Block => None,
            Behavior::Allow | Behavior::CloseOnOpen => Some(Box::new(RecordingWindow {
                closed: self.behavior == Behavior::CloseOnOpen,
                log: self.log.clone(),
            })),
        }
    }

    fn alert(&mut self, message: &str) {
        self.log.borrow_mut().alerts.push(message.to_string());
    }

    fn title(&self) -> String {
        "Test deck".to_string()
    }

    fn style_sheets(&self) -> Theme {
        Theme::dark()
    }
}

struct RecordingWindow {
    closed: bool,
    log: Rc<RefCell<HostLog>>,
}

impl PresenterWindow for RecordingWindow {
    fn is_closed(&self) -> bool {
        self.closed || self.log.borrow().user_closed
    }

    fn adopt_styles(&mut self, styles: &Theme) {
        self.log.borrow_mut().styles.push(styles.clone());
    }

    fn mount(&mut self, props: PresenterProps) {
        self.log.borrow_mut().mounts.push(props);
    }

    fn update(&mut self, payload: PresenterPayload) {
        self.log.borrow_mut().updates.push(payload);
    }

    fn set_title(&mut self, title: &str) {
        self.log.borrow_mut().titles.push(title.to_string());
    }

    fn close(&mut self) {
        self.closed = true;
        self.log.borrow_mut().close_calls += 1;
    }
}
