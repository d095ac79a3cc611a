//! Sidebar panel controller.
//!
//! Open/close is pure toggle parity: the panel's `open` class, its
//! `aria-hidden` attribute, the trigger's `aria-expanded` attribute,
//! the body marker class and the body scroll lock all move together.
//! Outside clicks and Escape close through the same toggle path, so
//! the mirrored state can never diverge.
//!
//! A page without a panel or trigger gets a controller whose every
//! operation is a silent no-op.

use crate::page::{ElementId, Page};

/// Marker class on the panel while open.
pub const OPEN_CLASS: &str = "open";

/// Marker class on the body while the panel is open.
pub const BODY_OPEN_CLASS: &str = "sidebar-open";

/// Marker class hiding the corner trigger while the panel is open.
pub const TRIGGER_HIDDEN_CLASS: &str = "hidden";

#[derive(Debug)]
pub struct SidebarController {
    panel: Option<ElementId>,
    trigger: Option<ElementId>,
    open: bool,
}

impl SidebarController {
    /// Bind to the panel and its corner trigger. Either may be
    /// absent; the controller then does nothing.
    pub fn new(panel: Option<ElementId>, trigger: Option<ElementId>) -> Self {
        SidebarController {
            panel,
            trigger,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Sync the closed initial state into the page. Called once at
    /// startup so attributes match before any interaction.
    pub fn init(&self, page: &mut Page) {
        let (Some(panel), Some(trigger)) = (self.panel, self.trigger) else {
            return;
        };
        page.set_attr(panel, "aria-hidden", "true");
        page.set_attr(trigger, "aria-expanded", "false");
        page.set_class(trigger, TRIGGER_HIDDEN_CLASS, false);
    }

    /// Flip open/closed and mirror every piece of dependent state.
    pub fn toggle(&mut self, page: &mut Page) {
        let (Some(panel), Some(trigger)) = (self.panel, self.trigger) else {
            return;
        };

        self.open = !self.open;
        let open = self.open;

        page.set_class(panel, OPEN_CLASS, open);
        page.set_attr(panel, "aria-hidden", if open { "false" } else { "true" });
        page.set_attr(trigger, "aria-expanded", if open { "true" } else { "false" });
        page.set_class(page.body(), BODY_OPEN_CLASS, open);
        page.set_class(trigger, TRIGGER_HIDDEN_CLASS, open);

        if open {
            page.lock_scroll();
            if let Some(first) = page.first_focusable_descendant(panel) {
                page.focus(first);
            }
        } else {
            page.unlock_scroll();
            page.focus(trigger);
        }
    }

    /// Document-level click handler: a click outside both the panel
    /// and its trigger closes an open panel.
    pub fn handle_document_click(&mut self, page: &mut Page, target: ElementId) {
        if !self.open {
            return;
        }
        let (Some(panel), Some(trigger)) = (self.panel, self.trigger) else {
            return;
        };
        if page.contains(panel, target) || page.contains(trigger, target) {
            return;
        }
        self.toggle(page);
    }

    /// Document-level key handler: Escape closes an open panel.
    pub fn handle_escape(&mut self, page: &mut Page) {
        if self.open {
            self.toggle(page);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Page with a sidebar panel (holding one focusable link), a
    /// corner trigger, and an unrelated outside element.
    fn fixture() -> (Page, SidebarController, ElementId, ElementId, ElementId) {
        let mut page = Page::new();
        let panel = page.create_in(page.body());
        let link = page.create_in(panel);
        page.set_focusable(link, true);
        let trigger = page.create_in(page.body());
        page.set_focusable(trigger, true);
        let outside = page.create_in(page.body());

        let mut controller = SidebarController::new(Some(panel), Some(trigger));
        controller.init(&mut page);
        (page, controller, panel, trigger, outside)
    }

    #[test]
    fn open_state_equals_toggle_parity() {
        let (mut page, mut sidebar, _, _, _) = fixture();
        for i in 1..=7 {
            sidebar.toggle(&mut page);
            assert_eq!(sidebar.is_open(), i % 2 == 1);
        }
    }

    #[test]
    fn aria_hidden_is_always_the_negation_of_open() {
        let (mut page, mut sidebar, panel, _, _) = fixture();
        for _ in 0..4 {
            sidebar.toggle(&mut page);
            let hidden = page.attr(panel, "aria-hidden").unwrap();
            assert_eq!(hidden, if sidebar.is_open() { "false" } else { "true" });
        }
    }

    #[test]
    fn open_mirrors_trigger_body_and_scroll_state() {
        let (mut page, mut sidebar, panel, trigger, _) = fixture();

        sidebar.toggle(&mut page);
        assert!(page.has_class(panel, OPEN_CLASS));
        assert_eq!(page.attr(trigger, "aria-expanded"), Some("true"));
        assert!(page.has_class(page.body(), BODY_OPEN_CLASS));
        assert!(page.has_class(trigger, TRIGGER_HIDDEN_CLASS));
        assert!(page.scroll_locked());

        sidebar.toggle(&mut page);
        assert!(!page.has_class(panel, OPEN_CLASS));
        assert_eq!(page.attr(trigger, "aria-expanded"), Some("false"));
        assert!(!page.has_class(page.body(), BODY_OPEN_CLASS));
        assert!(!page.has_class(trigger, TRIGGER_HIDDEN_CLASS));
        assert!(!page.scroll_locked());
    }

    #[test]
    fn open_moves_focus_into_the_panel_and_close_returns_it() {
        let (mut page, mut sidebar, panel, trigger, _) = fixture();

        sidebar.toggle(&mut page);
        let focused = page.focused().unwrap();
        assert!(page.contains(panel, focused));

        sidebar.toggle(&mut page);
        assert_eq!(page.focused(), Some(trigger));
    }

    #[test]
    fn outside_click_closes_but_inside_clicks_do_not() {
        let (mut page, mut sidebar, panel, trigger, outside) = fixture();
        sidebar.toggle(&mut page);

        let link = page.first_focusable_descendant(panel).unwrap();
        sidebar.handle_document_click(&mut page, link);
        assert!(sidebar.is_open());

        sidebar.handle_document_click(&mut page, trigger);
        assert!(sidebar.is_open());

        sidebar.handle_document_click(&mut page, outside);
        assert!(!sidebar.is_open());
        assert_eq!(page.attr(panel, "aria-hidden"), Some("true"));
    }

    #[test]
    fn outside_click_when_closed_is_a_noop() {
        let (mut page, mut sidebar, _, _, outside) = fixture();
        sidebar.handle_document_click(&mut page, outside);
        assert!(!sidebar.is_open());
    }

    #[test]
    fn escape_closes_only_an_open_panel() {
        let (mut page, mut sidebar, _, _, _) = fixture();
        sidebar.handle_escape(&mut page);
        assert!(!sidebar.is_open());

        sidebar.toggle(&mut page);
        sidebar.handle_escape(&mut page);
        assert!(!sidebar.is_open());
    }

    #[test]
    fn missing_elements_make_every_operation_a_noop() {
        let mut page = Page::new();
        let lone = page.create_in(page.body());

        let mut none = SidebarController::new(None, None);
        none.init(&mut page);
        none.toggle(&mut page);
        none.handle_document_click(&mut page, lone);
        none.handle_escape(&mut page);
        assert!(!none.is_open());

        let mut half = SidebarController::new(Some(lone), None);
        half.toggle(&mut page);
        assert!(!half.is_open());
    }
}
