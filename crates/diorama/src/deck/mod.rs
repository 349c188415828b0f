//! The deck controller: the one owner of "which slide is showing".

mod bindings;
mod navigator;

use std::rc::Rc;

use crate::gesture::SwipeHandlers;
use crate::history::{self, History};
use crate::keyboard::KeyboardRouter;
use crate::presenter::{PresenterBridge, PresenterPayload, PresenterStatus, WindowHost};
use crate::slide::{SlideSequence, SlideUnit};

use bindings::KeyBindings;
pub use navigator::{Navigation, Navigator};

/// Options recognized by a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckOptions {
    /// Extra classes for the deck container. `dark` / `light` pick the theme.
    pub class_name: String,
    /// Text drawn along the bottom of every slide.
    pub footer: Option<String>,
    /// Show previous/next buttons.
    pub navigation: bool,
    pub swipe_to_change: bool,
    /// Open the presenter window as soon as the deck is mounted.
    pub presenter_notes: bool,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            footer: None,
            navigation: false,
            swipe_to_change: true,
            presenter_notes: false,
        }
    }
}

/// The active slide as handed to a slide renderer.
pub struct RenderedSlide<'a> {
    pub slide: &'a SlideUnit,
    pub index: usize,
    /// Lets slide content jump to another slide.
    pub navigate: Navigator,
}

pub struct Deck {
    slides: SlideSequence,
    options: DeckOptions,
    active: usize,
    history: Box<dyn History>,
    presenter: PresenterBridge,
    navigator: Navigator,
    key_bindings: KeyBindings,
}

impl Deck {
    /// Mounts a deck: reads the start slide from the history location, binds
    /// the navigation keys and, if requested, opens the presenter window.
    pub fn mount(
        slides: SlideSequence,
        options: DeckOptions,
        keyboard: Rc<dyn KeyboardRouter>,
        history: Box<dyn History>,
        host: Box<dyn WindowHost>,
    ) -> Self {
        let active = history::initial_index(history.location(), slides.len());
        let navigator = Navigator::new();
        let key_bindings = KeyBindings::bind(keyboard, &navigator);
        tracing::debug!(
            slides = slides.len(),
            active,
            location = %history.location(),
            "deck mounted"
        );

        let mut deck = Self {
            slides,
            options,
            active,
            history,
            presenter: PresenterBridge::new(host),
            navigator,
            key_bindings,
        };
        if deck.options.presenter_notes {
            deck.open_presenter_notes();
        }
        deck
    }

    /// Releases the key listeners and closes the presenter window.
    ///
    /// Dropping a deck does the same; this just makes the intent explicit.
    pub fn unmount(self) {
        tracing::debug!(active = self.active, "deck unmounted");
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn slides(&self) -> &SlideSequence {
        &self.slides
    }

    pub fn options(&self) -> &DeckOptions {
        &self.options
    }

    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    /// A handle for queueing navigation from outside the deck.
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn key_listener_count(&self) -> usize {
        self.key_bindings.len()
    }

    pub fn presenter_status(&self) -> PresenterStatus {
        self.presenter.status()
    }

    /// Moves one slide back. Does nothing on the first slide.
    pub fn previous(&mut self) -> bool {
        if self.active == 0 {
            tracing::debug!("already on the first slide");
            return false;
        }
        self.transition(self.active - 1);
        true
    }

    /// Moves one slide forward. Does nothing on the last slide.
    pub fn next(&mut self) -> bool {
        if self.active == self.slides.last_index() {
            tracing::debug!("already on the last slide");
            return false;
        }
        self.transition(self.active + 1);
        true
    }

    /// Jumps to `index`. Indices outside the deck are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if !self.slides.contains_index(index) {
            tracing::warn!(index, slides = self.slides.len(), "ignoring jump outside the deck");
            return false;
        }
        self.transition(index);
        true
    }

    pub fn apply(&mut self, navigation: Navigation) -> bool {
        match navigation {
            Navigation::Previous => self.previous(),
            Navigation::Next => self.next(),
            Navigation::GoTo(index) => self.go_to(index),
        }
    }

    /// Applies queued navigation requests in arrival order. Returns how many
    /// changed the active slide.
    pub fn process_events(&mut self) -> usize {
        let mut changed = 0;
        while let Some(navigation) = self.navigator.pop() {
            if self.apply(navigation) {
                changed += 1;
            }
        }
        changed
    }

    fn transition(&mut self, index: usize) {
        tracing::debug!(from = self.active, to = index, "slide change");
        self.active = index;
        self.history.push_state(&history::slide_path(index));
        if let Some(payload) = PresenterPayload::for_index(&self.slides, index) {
            self.presenter.push(payload);
        }
    }

    /// The active slide together with its index and a navigation handle.
    pub fn render(&self) -> RenderedSlide<'_> {
        RenderedSlide {
            slide: &self.slides[self.active],
            index: self.active,
            navigate: self.navigator.clone(),
        }
    }

    /// Handlers for the swipe recognizer, or `None` when swiping is disabled.
    pub fn swipe_handlers(&self) -> Option<SwipeHandlers> {
        if !self.options.swipe_to_change {
            return None;
        }
        let left = self.navigator.clone();
        let right = self.navigator.clone();
        Some(SwipeHandlers {
            on_swipe_left: Box::new(move || left.next()),
            on_swipe_right: Box::new(move || right.previous()),
        })
    }

    /// Opens the presenter window for the active slide. Returns false when the
    /// window could not be opened.
    pub fn open_presenter_notes(&mut self) -> bool {
        let origin = self.history.location().origin();
        match PresenterPayload::for_index(&self.slides, self.active) {
            Some(payload) => self.presenter.open(payload, origin),
            None => false,
        }
    }
}
