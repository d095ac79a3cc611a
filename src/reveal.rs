//! Reveal-on-scroll observer.
//!
//! Marked elements are registered once; the first visibility sample
//! at or above the threshold adds the `active` class and drops the
//! registration, so each element reveals exactly once per page load.
//! The typing host additionally starts the typewriter loop, which
//! guards its own started flag.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::page::{ElementId, Page};
use crate::schedule::TimerQueue;
use crate::typing::TypingEffect;

/// Fraction of an element that must be visible to reveal it.
pub const REVEAL_THRESHOLD: f64 = 0.12;

/// Class added when an element reveals. One-way for the page's life.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug)]
pub struct RevealController {
    observed: BTreeSet<ElementId>,
    typing_host: Option<ElementId>,
}

impl RevealController {
    pub fn new(typing_host: Option<ElementId>) -> Self {
        RevealController {
            observed: BTreeSet::new(),
            typing_host,
        }
    }

    /// Register an element for one-shot observation.
    pub fn observe(&mut self, el: ElementId) {
        self.observed.insert(el);
    }

    pub fn is_observed(&self, el: ElementId) -> bool {
        self.observed.contains(&el)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Feed one visibility sample (0.0 to 1.0) for `el`.
    ///
    /// Below-threshold samples and samples for unobserved elements
    /// are ignored. A qualifying sample reveals the element,
    /// deregisters it, and kicks off typing when `el` is the host.
    pub fn on_visibility(
        &mut self,
        page: &mut Page,
        typing: &mut TypingEffect,
        timers: &mut TimerQueue,
        now: Duration,
        el: ElementId,
        fraction: f64,
    ) {
        if fraction < REVEAL_THRESHOLD {
            return;
        }
        if !self.observed.remove(&el) {
            return;
        }

        page.add_class(el, ACTIVE_CLASS);

        if self.typing_host == Some(el) {
            typing.start(timers, now);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
