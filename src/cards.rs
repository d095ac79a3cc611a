//! Project card read-more toggles.
//!
//! Each card pairs a trigger button with an expandable content
//! region. Expansion state lives on the region's `data-open`
//! attribute (absent reads as closed); the button label and its
//! `aria-expanded` attribute track it. Cards are fully independent.

use crate::page::{ElementId, Page};

/// Attribute on the content region carrying expansion state.
pub const OPEN_ATTR: &str = "data-open";

/// Button label while collapsed.
pub const LABEL_MORE: &str = "Read more";

/// Button label while expanded.
pub const LABEL_LESS: &str = "Read less";

/// Class names the controller binds against.
pub const CARD_CLASS: &str = "project-card";
pub const BUTTON_CLASS: &str = "read-more";
pub const MORE_CLASS: &str = "more";

/// One bound card: its trigger and its expandable region.
#[derive(Debug, Clone, Copy)]
pub struct CardBinding {
    pub button: ElementId,
    pub more: ElementId,
}

#[derive(Debug)]
pub struct ProjectCardController {
    cards: Vec<CardBinding>,
}

impl ProjectCardController {
    /// Discover `.project-card` elements holding both a `.read-more`
    /// button and a `.more` region. Cards missing either are skipped.
    pub fn bind(page: &Page) -> Self {
        let cards = page
            .by_class(CARD_CLASS)
            .into_iter()
            .filter_map(|card| {
                let button = page.find_within(card, BUTTON_CLASS)?;
                let more = page.find_within(card, MORE_CLASS)?;
                Some(CardBinding { button, more })
            })
            .collect();
        ProjectCardController { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card whose trigger is `button`, if any.
    pub fn card_for_button(&self, button: ElementId) -> Option<usize> {
        self.cards.iter().position(|c| c.button == button)
    }

    /// The trigger button of the card at `index`.
    pub fn button(&self, index: usize) -> Option<ElementId> {
        self.cards.get(index).map(|c| c.button)
    }

    pub fn is_expanded(&self, page: &Page, index: usize) -> bool {
        self.cards
            .get(index)
            .is_some_and(|c| page.attr(c.more, OPEN_ATTR) == Some("true"))
    }

    /// Flip one card: attribute, button label and aria state move
    /// together. Other cards are untouched.
    pub fn toggle(&self, page: &mut Page, index: usize) {
        let Some(card) = self.cards.get(index) else {
            return;
        };

        let open = page.attr(card.more, OPEN_ATTR) == Some("true");
        let now_open = !open;

        page.set_attr(card.more, OPEN_ATTR, if now_open { "true" } else { "false" });
        page.set_text(card.button, if now_open { LABEL_LESS } else { LABEL_MORE });
        page.set_attr(
            card.button,
            "aria-expanded",
            if now_open { "true" } else { "false" },
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
