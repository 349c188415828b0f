//! The presenter window: a second top-level window showing the current slide,
//! its notes and the slide coming next.
//!
//! The deck pushes state into the window through [`PresenterBridge`]; nothing
//! flows back. The window is rendered by its own pass and may trail the deck
//! by one frame.

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use crate::slide::{SlideSequence, SlideUnit};
use crate::theme::Theme;

pub const PRESENTER_WINDOW_NAME: &str = "Presenter notes";
pub const POPUP_BLOCKED_MESSAGE: &str = "Please allow popups to open the presenter window.";

/// Chrome and size requested for the presenter window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFeatures {
    pub toolbar: bool,
    pub location: bool,
    pub directories: bool,
    pub status: bool,
    pub menubar: bool,
    pub scrollbars: bool,
    pub width: u32,
    pub height: u32,
}

impl WindowFeatures {
    /// Chrome-less, fixed 1000x600.
    pub fn presenter() -> Self {
        Self {
            toolbar: false,
            location: false,
            directories: false,
            status: false,
            menubar: false,
            scrollbars: false,
            width: 1000,
            height: 600,
        }
    }
}

impl fmt::Display for WindowFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |on: bool| if on { "yes" } else { "no" };
        write!(
            f,
            "toolbar={},location={},directories={},status={},menubar={},scrollbars={},width={},height={}",
            flag(self.toolbar),
            flag(self.location),
            flag(self.directories),
            flag(self.status),
            flag(self.menubar),
            flag(self.scrollbars),
            self.width,
            self.height,
        )
    }
}

/// What the presenter sees for one deck position.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenterPayload {
    pub current_slide: SlideUnit,
    /// 1-based position of `current_slide`.
    pub current: usize,
    pub notes: Option<String>,
    pub next_slide: Option<SlideUnit>,
    pub total: usize,
}

impl PresenterPayload {
    /// Payload for the slide at `index`, `None` when out of range.
    pub fn for_index(slides: &SlideSequence, index: usize) -> Option<Self> {
        let current_slide = slides.get(index)?.clone();
        Some(Self {
            notes: current_slide.notes.clone(),
            current_slide,
            current: index + 1,
            next_slide: slides.get(index + 1).cloned(),
            total: slides.len(),
        })
    }
}

/// Everything the presenter view needs when it is first mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenterProps {
    pub payload: PresenterPayload,
    /// Style copied from the deck window so both render alike.
    pub parent_styles: Theme,
    /// `scheme://host[:port]` of the deck's location.
    pub origin: String,
}

pub fn presenter_title(current: usize, total: usize, host_title: &str) -> String {
    format!("[ Presenter notes - slide {current}/{total} ] - {host_title}")
}

/// A window opened by a [`WindowHost`].
pub trait PresenterWindow {
    /// True once the window was closed, by us or by the user.
    fn is_closed(&self) -> bool;

    /// Installs the deck window's styles into this window's blank document.
    fn adopt_styles(&mut self, styles: &Theme);

    /// Mounts the presenter view. Called once per window.
    fn mount(&mut self, props: PresenterProps);

    /// Refreshes the mounted view in place.
    fn update(&mut self, payload: PresenterPayload);

    fn set_title(&mut self, title: &str);

    fn close(&mut self);
}

/// The environment the deck runs in, as seen by the presenter bridge.
pub trait WindowHost {
    /// Opens a new top-level window. `None` means the request was refused.
    fn open_window(
        &mut self,
        name: &str,
        features: &WindowFeatures,
    ) -> Option<Box<dyn PresenterWindow>>;

    /// Shows a notice the user has to dismiss.
    fn alert(&mut self, message: &str);

    /// Title of the deck window.
    fn title(&self) -> String;

    /// Styles currently applied to the deck window.
    fn style_sheets(&self) -> Theme;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterStatus {
    Closed,
    Opening,
    Open,
}

/// Owns the presenter window handle and keeps it in step with the deck.
pub struct PresenterBridge {
    host: Box<dyn WindowHost>,
    window: Option<Box<dyn PresenterWindow>>,
    status: PresenterStatus,
}

impl PresenterBridge {
    pub fn new(host: Box<dyn WindowHost>) -> Self {
        Self {
            host,
            window: None,
            status: PresenterStatus::Closed,
        }
    }

    /// Current status. A window the user closed reports `Closed` even before
    /// the next push notices it.
    pub fn status(&self) -> PresenterStatus {
        match (&self.window, self.status) {
            (Some(window), PresenterStatus::Open) if window.is_closed() => PresenterStatus::Closed,
            (_, status) => status,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == PresenterStatus::Open
    }

    /// Opens the window and mounts the presenter view into it.
    ///
    /// Returns false when the host refused the window; the user has been
    /// alerted and nothing is retried.
    pub fn open(&mut self, payload: PresenterPayload, origin: String) -> bool {
        if self.is_open() {
            tracing::debug!("presenter window already open");
            return true;
        }
        self.window = None;
        self.status = PresenterStatus::Opening;
        tracing::debug!(status = ?self.status, "opening presenter window");

        let features = WindowFeatures::presenter();
        let mut window = match self.host.open_window(PRESENTER_WINDOW_NAME, &features) {
            Some(window) if !window.is_closed() => window,
            _ => {
                tracing::warn!("presenter window was blocked");
                self.status = PresenterStatus::Closed;
                self.host.alert(POPUP_BLOCKED_MESSAGE);
                return false;
            }
        };

        let title = presenter_title(payload.current, payload.total, &self.host.title());
        let parent_styles = self.host.style_sheets();
        window.adopt_styles(&parent_styles);
        window.mount(PresenterProps {
            payload,
            parent_styles,
            origin,
        });
        window.set_title(&title);

        self.window = Some(window);
        self.status = PresenterStatus::Open;
        tracing::info!(%title, "presenter window open");
        true
    }

    /// Pushes a new payload into the open window. Without an open window this
    /// does nothing.
    pub fn push(&mut self, payload: PresenterPayload) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        if window.is_closed() {
            tracing::debug!("presenter window was closed; dropping handle");
            self.window = None;
            self.status = PresenterStatus::Closed;
            return;
        }

        let title = presenter_title(payload.current, payload.total, &self.host.title());
        window.update(payload);
        window.set_title(&title);
    }

    /// Closes the window if it is still open.
    pub fn close(&mut self) {
        if let Some(mut window) = self.window.take() {
            if !window.is_closed() {
                window.close();
                tracing::info!("presenter window closed");
            }
        }
        self.status = PresenterStatus::Closed;
    }
}

impl Drop for PresenterBridge {
    fn drop(&mut self) {
        self.close();
    }
}
