//! Loading screen teardown.
//!
//! The page ships a `#loading` overlay that covers the app until startup is
//! done. After mount, a timer fades it to transparent and a second timer
//! removes the node. The transition runs at most once per page load; a
//! missing node makes it a silent no-op with no retry.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::page::Page;

#[cfg(test)]
#[path = "loading_test.rs"]
mod loading_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadingPhase {
    #[default]
    Visible,
    /// Opacity set to zero; removal pending.
    Fading,
    Removed,
}

pub struct LoadingScreen<P: Page> {
    page: Rc<P>,
    element_id: String,
    fade: Duration,
    phase: Rc<Cell<LoadingPhase>>,
}

impl<P: Page> Clone for LoadingScreen<P> {
    fn clone(&self) -> Self {
        Self {
            page: Rc::clone(&self.page),
            element_id: self.element_id.clone(),
            fade: self.fade,
            phase: Rc::clone(&self.phase),
        }
    }
}

impl<P: Page> LoadingScreen<P> {
    pub fn new(page: Rc<P>, element_id: &str, fade: Duration) -> Self {
        Self { page, element_id: element_id.to_owned(), fade, phase: Rc::default() }
    }

    #[must_use]
    pub fn phase(&self) -> LoadingPhase {
        self.phase.get()
    }

    /// Run [`hide`](Self::hide) once after `delay`.
    pub fn schedule(&self, delay: Duration) {
        let screen = self.clone();
        self.page.set_timeout(delay, Box::new(move || screen.hide()));
    }

    /// Fade the loading node out now and remove it after the fade delay.
    pub fn hide(&self) {
        if self.phase.get() != LoadingPhase::Visible {
            return;
        }
        let Some(node) = self.page.element_by_id(&self.element_id) else {
            return;
        };

        self.page.set_style(&node, "opacity", "0");
        self.phase.set(LoadingPhase::Fading);

        let page = Rc::clone(&self.page);
        let phase = Rc::clone(&self.phase);
        self.page.set_timeout(
            self.fade,
            Box::new(move || {
                page.remove(&node);
                phase.set(LoadingPhase::Removed);
            }),
        );
    }
}
