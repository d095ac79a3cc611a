//! The page element tree.
//!
//! A small arena of elements carrying the state the controllers
//! manipulate: string ids, class sets, attributes, text content and
//! focusability, plus page-level focus and a body scroll lock.
//! Controllers receive `ElementId` handles explicitly, so each one is
//! testable against a synthetic page.
//!
//! The tree is the only shared mutable resource in the application.
//! All mutation happens on the event-loop thread; there is no
//! interior mutability and no locking.

use std::collections::{BTreeMap, BTreeSet};

/// Handle to one element. Only valid for the page that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Default)]
struct Element {
    /// DOM-style string id, unique per page by convention.
    id: Option<String>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    focusable: bool,
}

/// The element arena plus page-level state.
#[derive(Debug)]
pub struct Page {
    nodes: Vec<Element>,
    root: ElementId,
    body: ElementId,
    focused: Option<ElementId>,
    scroll_locked: bool,
}

impl Page {
    /// Create a page with a root element and a body child.
    pub fn new() -> Self {
        let mut page = Page {
            nodes: Vec::new(),
            root: ElementId(0),
            body: ElementId(0),
            focused: None,
            scroll_locked: false,
        };
        page.root = page.alloc(None);
        page.body = page.alloc(Some(page.root));
        page
    }

    /// The document root. Carries the `data-theme` attribute.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The body element. Carries page-level marker classes.
    pub fn body(&self) -> ElementId {
        self.body
    }

    fn alloc(&mut self, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Element {
            parent,
            ..Element::default()
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    /// Create a new element as the last child of `parent`.
    pub fn create_in(&mut self, parent: ElementId) -> ElementId {
        self.alloc(Some(parent))
    }

    // ------------------------------------------------------------------
    // Identity and structure
    // ------------------------------------------------------------------

    /// Assign a DOM-style string id.
    pub fn set_id(&mut self, el: ElementId, id: &str) {
        self.nodes[el.0].id = Some(id.to_owned());
    }

    /// Look an element up by its string id.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(ElementId)
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes[el.0].parent
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        &self.nodes[el.0].children
    }

    /// True when `node` is `ancestor` or one of its descendants.
    ///
    /// Matches Node.contains: an element contains itself.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cursor = Some(node);
        while let Some(el) = cursor {
            if el == ancestor {
                return true;
            }
            cursor = self.nodes[el.0].parent;
        }
        false
    }

    /// Preorder walk of a subtree, including `from` itself.
    fn subtree(&self, from: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(el) = stack.pop() {
            out.push(el);
            // Reverse so document order comes off the stack first.
            for &child in self.nodes[el.0].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// All elements carrying `class`, in document order.
    pub fn by_class(&self, class: &str) -> Vec<ElementId> {
        self.subtree(self.root)
            .into_iter()
            .filter(|el| self.has_class(*el, class))
            .collect()
    }

    /// First element carrying `class` within the subtree of `scope`.
    pub fn find_within(&self, scope: ElementId, class: &str) -> Option<ElementId> {
        self.subtree(scope)
            .into_iter()
            .find(|el| *el != scope && self.has_class(*el, class))
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.nodes[el.0].classes.contains(class)
    }

    pub fn add_class(&mut self, el: ElementId, class: &str) {
        self.nodes[el.0].classes.insert(class.to_owned());
    }

    pub fn remove_class(&mut self, el: ElementId, class: &str) {
        self.nodes[el.0].classes.remove(class);
    }

    /// classList.toggle with a forced value.
    pub fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(el, class);
        } else {
            self.remove_class(el, class);
        }
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn attr(&self, el: ElementId, name: &str) -> Option<&str> {
        self.nodes[el.0].attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, el: ElementId, name: &str, value: &str) {
        self.nodes[el.0]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn remove_attr(&mut self, el: ElementId, name: &str) {
        self.nodes[el.0].attrs.remove(name);
    }

    // ------------------------------------------------------------------
    // Text content
    // ------------------------------------------------------------------

    pub fn text(&self, el: ElementId) -> &str {
        &self.nodes[el.0].text
    }

    pub fn set_text(&mut self, el: ElementId, text: &str) {
        self.nodes[el.0].text.clear();
        self.nodes[el.0].text.push_str(text);
    }

    pub fn push_text_char(&mut self, el: ElementId, ch: char) {
        self.nodes[el.0].text.push(ch);
    }

    /// Remove the last character, character-boundary aware.
    pub fn pop_text_char(&mut self, el: ElementId) -> Option<char> {
        self.nodes[el.0].text.pop()
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    pub fn set_focusable(&mut self, el: ElementId, focusable: bool) {
        self.nodes[el.0].focusable = focusable;
    }

    pub fn is_focusable(&self, el: ElementId) -> bool {
        self.nodes[el.0].focusable
    }

    /// Move page focus. Non-focusable targets are ignored.
    pub fn focus(&mut self, el: ElementId) {
        if self.nodes[el.0].focusable {
            self.focused = Some(el);
        }
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// First focusable element inside `scope`, in document order.
    pub fn first_focusable_descendant(&self, scope: ElementId) -> Option<ElementId> {
        self.subtree(scope)
            .into_iter()
            .find(|el| *el != scope && self.nodes[el.0].focusable)
    }

    /// All focusable elements inside `scope`, in document order.
    pub fn focusables_within(&self, scope: ElementId) -> Vec<ElementId> {
        self.subtree(scope)
            .into_iter()
            .filter(|el| self.nodes[el.0].focusable)
            .collect()
    }

    // ------------------------------------------------------------------
    // Body scroll lock
    // ------------------------------------------------------------------

    pub fn lock_scroll(&mut self) {
        self.scroll_locked = true;
    }

    pub fn unlock_scroll(&mut self) {
        self.scroll_locked = false;
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_page_has_root_and_body() {
        let page = Page::new();
        assert_eq!(page.parent(page.body()), Some(page.root()));
        assert!(page.contains(page.root(), page.body()));
    }

    #[test]
    fn contains_is_inclusive_and_follows_ancestry() {
        let mut page = Page::new();
        let a = page.create_in(page.body());
        let b = page.create_in(a);
        let c = page.create_in(page.body());

        assert!(page.contains(a, a));
        assert!(page.contains(a, b));
        assert!(!page.contains(a, c));
        assert!(!page.contains(b, a));
    }

    #[test]
    fn class_set_and_forced_toggle() {
        let mut page = Page::new();
        let el = page.create_in(page.body());

        page.add_class(el, "open");
        assert!(page.has_class(el, "open"));
        page.add_class(el, "open");
        assert!(page.has_class(el, "open"));

        page.set_class(el, "open", false);
        assert!(!page.has_class(el, "open"));
        page.set_class(el, "open", true);
        assert!(page.has_class(el, "open"));
    }

    #[test]
    fn attributes_set_read_remove() {
        let mut page = Page::new();
        let el = page.create_in(page.body());

        assert_eq!(page.attr(el, "aria-hidden"), None);
        page.set_attr(el, "aria-hidden", "true");
        assert_eq!(page.attr(el, "aria-hidden"), Some("true"));
        page.set_attr(el, "aria-hidden", "false");
        assert_eq!(page.attr(el, "aria-hidden"), Some("false"));
        page.remove_attr(el, "aria-hidden");
        assert_eq!(page.attr(el, "aria-hidden"), None);
    }

    #[test]
    fn text_push_and_pop_respect_char_boundaries() {
        let mut page = Page::new();
        let el = page.create_in(page.body());

        page.push_text_char(el, 'é');
        page.push_text_char(el, '!');
        assert_eq!(page.text(el), "é!");
        assert_eq!(page.pop_text_char(el), Some('!'));
        assert_eq!(page.pop_text_char(el), Some('é'));
        assert_eq!(page.pop_text_char(el), None);
        assert_eq!(page.text(el), "");
    }

    #[test]
    fn element_lookup_by_string_id() {
        let mut page = Page::new();
        let el = page.create_in(page.body());
        page.set_id(el, "sidebar");

        assert_eq!(page.element_by_id("sidebar"), Some(el));
        assert_eq!(page.element_by_id("missing"), None);
    }

    #[test]
    fn by_class_returns_document_order() {
        let mut page = Page::new();
        let first = page.create_in(page.body());
        let nested = page.create_in(first);
        let second = page.create_in(page.body());
        for el in [first, nested, second] {
            page.add_class(el, "reveal");
        }

        assert_eq!(page.by_class("reveal"), vec![first, nested, second]);
    }

    #[test]
    fn find_within_scopes_to_the_subtree() {
        let mut page = Page::new();
        let card_a = page.create_in(page.body());
        let btn_a = page.create_in(card_a);
        let card_b = page.create_in(page.body());
        let btn_b = page.create_in(card_b);
        page.add_class(btn_a, "read-more");
        page.add_class(btn_b, "read-more");

        assert_eq!(page.find_within(card_a, "read-more"), Some(btn_a));
        assert_eq!(page.find_within(card_b, "read-more"), Some(btn_b));
    }

    #[test]
    fn focus_ignores_non_focusable_targets() {
        let mut page = Page::new();
        let plain = page.create_in(page.body());
        let button = page.create_in(page.body());
        page.set_focusable(button, true);

        page.focus(plain);
        assert_eq!(page.focused(), None);
        page.focus(button);
        assert_eq!(page.focused(), Some(button));
        page.blur();
        assert_eq!(page.focused(), None);
    }

    #[test]
    fn first_focusable_descendant_skips_the_scope_itself() {
        let mut page = Page::new();
        let panel = page.create_in(page.body());
        page.set_focusable(panel, true);
        let link_one = page.create_in(panel);
        let link_two = page.create_in(panel);
        page.set_focusable(link_one, true);
        page.set_focusable(link_two, true);

        assert_eq!(page.first_focusable_descendant(panel), Some(link_one));
    }

    #[test]
    fn scroll_lock_flips() {
        let mut page = Page::new();
        assert!(!page.scroll_locked());
        page.lock_scroll();
        assert!(page.scroll_locked());
        page.unlock_scroll();
        assert!(!page.scroll_locked());
    }
}
