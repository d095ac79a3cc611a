//! Event handling: key mapping, action application, click dispatch,
//! timer and submission plumbing.
//!
//! Everything here mutates only the App model; the run loop owns the
//! terminal and the worker threads. A click behaves like the
//! browser's: the document-level outside-click handler runs first,
//! then the handler of whatever element was hit.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::content;
use crate::page::ElementId;
use crate::schedule::TimerEvent;
use crate::types::SubmitOutcome;

use super::layout;
use super::state::{Action, App, SCROLL_STEP};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a key event to a semantic action.
///
/// `editing` is true while a form field has focus; printable keys
/// then feed the field instead of triggering page shortcuts.
pub fn map_key(key: KeyEvent, editing: bool) -> Option<Action> {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if editing {
        return match key.code {
            KeyCode::Char(c) => Some(Action::Input(c)),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Esc => Some(Action::CloseOverlay),
            KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Down => Some(Action::ScrollDown),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('m') => Some(Action::ToggleSidebar),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Esc => Some(Action::CloseOverlay),
        _ => None,
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Apply one semantic action to the model.
pub fn apply(app: &mut App, action: Action, now: Duration) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::ToggleSidebar => {
            app.sidebar.toggle(&mut app.page);
            if app.sidebar.is_open() {
                app.nav_cursor = 0;
            }
        }
        Action::ToggleTheme => app.theme.toggle(&mut app.page, &app.store),
        Action::CloseOverlay => {
            if app.sidebar.is_open() {
                app.sidebar.handle_escape(&mut app.page);
            } else {
                app.page.blur();
            }
        }
        Action::ScrollUp => scroll_or_nav(app, now, -1),
        Action::ScrollDown => scroll_or_nav(app, now, 1),
        Action::FocusNext => move_focus(app, 1),
        Action::FocusPrev => move_focus(app, -1),
        Action::Activate => {
            if let Some(el) = app.page.focused() {
                activate(app, el, now);
            }
        }
        Action::Input(c) => {
            if let Some(el) = app.page.focused() {
                if app.page.has_class(el, content::FIELD_CLASS) {
                    app.page.push_text_char(el, c);
                }
            }
        }
        Action::Backspace => {
            if let Some(el) = app.page.focused() {
                if app.page.has_class(el, content::FIELD_CLASS) {
                    app.page.pop_text_char(el);
                }
            }
        }
    }
}

/// Up/Down: move the nav cursor while the sidebar is open, scroll
/// the page otherwise. The body scroll lock gates real scrolling.
fn scroll_or_nav(app: &mut App, now: Duration, dir: i64) {
    if app.sidebar.is_open() {
        // Row 0 is the close control, rows 1.. are the nav links.
        let last = app.handles.nav_links.len();
        let next = if dir < 0 {
            app.nav_cursor.saturating_sub(1)
        } else {
            (app.nav_cursor + 1).min(last)
        };
        app.nav_cursor = next;
        let target = if next == 0 {
            app.handles.close_btn
        } else {
            app.handles.nav_links.get(next - 1).copied()
        };
        if let Some(el) = target {
            app.page.focus(el);
        }
        return;
    }

    if app.page.scroll_locked() {
        return;
    }

    let total = layout::rows(app).len();
    let max = layout::max_scroll(total, app.viewport_height);
    app.scroll = if dir < 0 {
        app.scroll.saturating_sub(SCROLL_STEP)
    } else {
        (app.scroll + SCROLL_STEP).min(max)
    };
    refresh_reveals(app, now);
}

/// The focus ring: sidebar contents while the panel is open,
/// everything outside it otherwise.
fn focus_ring(app: &App) -> Vec<ElementId> {
    let all = app.page.focusables_within(app.page.body());
    match app.handles.sidebar {
        Some(panel) if app.sidebar.is_open() => all
            .into_iter()
            .filter(|el| app.page.contains(panel, *el))
            .collect(),
        Some(panel) => all
            .into_iter()
            .filter(|el| !app.page.contains(panel, *el))
            .collect(),
        None => all,
    }
}

fn move_focus(app: &mut App, delta: i64) {
    let ring = focus_ring(app);
    if ring.is_empty() {
        return;
    }
    let next = match app.page.focused().and_then(|el| ring.iter().position(|r| *r == el)) {
        Some(i) => {
            let len = ring.len() as i64;
            ((i as i64 + delta).rem_euclid(len)) as usize
        }
        None if delta < 0 => ring.len() - 1,
        None => 0,
    };
    app.page.focus(ring[next]);
}

/// Dispatch activation of an interactive element, whatever focused
/// or clicked it.
fn activate(app: &mut App, el: ElementId, now: Duration) {
    if app.handles.corner_btn == Some(el) {
        app.sidebar.toggle(&mut app.page);
        if app.sidebar.is_open() {
            app.nav_cursor = 0;
        }
    } else if app.handles.close_btn == Some(el) {
        if app.sidebar.is_open() {
            app.sidebar.toggle(&mut app.page);
        }
    } else if app.handles.nav_links.contains(&el) {
        nav_jump(app, el, now);
    } else if app
        .handles
        .theme_btn
        .is_some_and(|btn| app.page.contains(btn, el))
    {
        app.theme.toggle(&mut app.page, &app.store);
    } else if let Some(index) = app.cards.card_for_button(el) {
        app.cards.toggle(&mut app.page, index);
        clamp_scroll(app);
        refresh_reveals(app, now);
    } else if app.handles.form.is_some_and(|b| {
        el == b.submit || el == b.name || el == b.email || el == b.message
    }) {
        start_submit(app);
    }
}

/// Jump the viewport to a nav link's target section and close the
/// panel through the regular toggle path.
fn nav_jump(app: &mut App, link: ElementId, now: Duration) {
    let Some(slug) = app.page.attr(link, content::NAV_TARGET_ATTR).map(str::to_owned) else {
        return;
    };
    if app.sidebar.is_open() {
        app.sidebar.toggle(&mut app.page);
    }
    let plan = layout::rows(app);
    if let Some(start) = layout::section_start(app, &plan, &slug) {
        let max = layout::max_scroll(plan.len(), app.viewport_height);
        app.scroll = start.min(max);
        refresh_reveals(app, now);
    }
}

/// Re-clamp after the plan shrinks (card collapse, resize).
pub fn clamp_scroll(app: &mut App) {
    let total = layout::rows(app).len();
    app.scroll = app.scroll.min(layout::max_scroll(total, app.viewport_height));
}

// ============================================================================
// CLICKS
// ============================================================================

/// Dispatch a click resolved to `target` (None means the click hit
/// no registered element and counts as a plain document click).
pub fn apply_click(app: &mut App, target: Option<ElementId>, now: Duration) {
    // Document-level listener first, like the browser: it ignores
    // clicks inside the panel or on its trigger.
    let doc_target = target.unwrap_or(app.page.body());
    app.sidebar.handle_document_click(&mut app.page, doc_target);

    let Some(el) = target else {
        return;
    };
    if app.page.has_class(el, content::FIELD_CLASS) {
        app.page.focus(el);
    } else {
        activate(app, el, now);
    }
}

// ============================================================================
// TIMERS AND SUBMISSIONS
// ============================================================================

/// Run one due timer event.
pub fn handle_timer(app: &mut App, event: TimerEvent, now: Duration) {
    match event {
        TimerEvent::TypingStep => {
            app.typing.step(&mut app.page, &mut app.timers, now);
        }
    }
}

/// Begin a form submission; the run loop posts the payload from a
/// worker thread.
pub fn start_submit(app: &mut App) {
    if let Some(payload) = app.form.begin_submit(&mut app.page) {
        app.pending_submit = Some(payload);
    }
}

/// A submission worker reported its terminal outcome.
pub fn handle_form_result(app: &mut App, outcome: &SubmitOutcome) {
    app.form.finish(&mut app.page, outcome);
}

// ============================================================================
// REVEAL FEEDING
// ============================================================================

/// Feed current visibility fractions to the reveal observer.
///
/// Safe to call every frame: revealed sections are deregistered, so
/// repeated samples cannot double-fire.
pub fn refresh_reveals(app: &mut App, now: Duration) {
    if app.viewport_height == 0 {
        return;
    }
    let plan = layout::rows(app);
    let spans = layout::section_spans(&plan);
    for (el, span) in spans {
        if !app.reveal.is_observed(el) {
            continue;
        }
        let fraction = layout::visible_fraction(&span, app.scroll, app.viewport_height);
        app.reveal.on_visibility(
            &mut app.page,
            &mut app.typing,
            &mut app.timers,
            now,
            el,
            fraction,
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::form::{LOADING_CLASS, MSG_SENT};
    use crate::reveal::ACTIVE_CLASS;
    use crate::storage::ThemeStore;
    use crate::types::Theme;
    use crate::typing::START_DELAY;

    const NOW: Duration = Duration::ZERO;

    fn app() -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path());
        let mut app = App::new(content::default_site(), store, 2026);
        app.viewport_height = 12;
        (app, dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // -- key mapping --

    #[test]
    fn ctrl_c_quits_in_both_modes() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, false), Some(Action::Quit));
        assert_eq!(map_key(ctrl_c, true), Some(Action::Quit));
    }

    #[test]
    fn browse_keys_map_to_page_actions() {
        assert_eq!(map_key(key(KeyCode::Char('q')), false), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Char('m')), false), Some(Action::ToggleSidebar));
        assert_eq!(map_key(key(KeyCode::Char('t')), false), Some(Action::ToggleTheme));
        assert_eq!(map_key(key(KeyCode::Char('j')), false), Some(Action::ScrollDown));
        assert_eq!(map_key(key(KeyCode::Char('k')), false), Some(Action::ScrollUp));
        assert_eq!(map_key(key(KeyCode::Esc), false), Some(Action::CloseOverlay));
        assert_eq!(map_key(key(KeyCode::Char('x')), false), None);
    }

    #[test]
    fn editing_routes_printables_into_the_field() {
        assert_eq!(map_key(key(KeyCode::Char('q')), true), Some(Action::Input('q')));
        assert_eq!(map_key(key(KeyCode::Char('t')), true), Some(Action::Input('t')));
        assert_eq!(map_key(key(KeyCode::Backspace), true), Some(Action::Backspace));
        assert_eq!(map_key(key(KeyCode::Enter), true), Some(Action::Activate));
    }

    // -- sidebar --

    #[test]
    fn sidebar_toggle_and_escape_round_trip() {
        let (mut app, _dir) = app();
        apply(&mut app, Action::ToggleSidebar, NOW);
        assert!(app.sidebar.is_open());
        assert!(app.page.scroll_locked());

        apply(&mut app, Action::CloseOverlay, NOW);
        assert!(!app.sidebar.is_open());
        assert!(!app.page.scroll_locked());
    }

    #[test]
    fn scrolling_is_blocked_while_the_sidebar_is_open() {
        let (mut app, _dir) = app();
        apply(&mut app, Action::ToggleSidebar, NOW);
        apply(&mut app, Action::ScrollDown, NOW);
        assert_eq!(app.scroll, 0);
        // The same key moved the nav cursor instead.
        assert_eq!(app.nav_cursor, 1);
    }

    #[test]
    fn outside_click_closes_the_open_sidebar() {
        let (mut app, _dir) = app();
        apply(&mut app, Action::ToggleSidebar, NOW);
        apply_click(&mut app, None, NOW);
        assert!(!app.sidebar.is_open());
    }

    #[test]
    fn nav_link_jump_scrolls_and_closes() {
        let (mut app, _dir) = app();
        apply(&mut app, Action::ToggleSidebar, NOW);

        let contact_link = *app
            .handles
            .nav_links
            .iter()
            .find(|l| app.page.attr(**l, content::NAV_TARGET_ATTR) == Some("contact"))
            .unwrap();
        apply_click(&mut app, Some(contact_link), NOW);

        assert!(!app.sidebar.is_open());
        assert!(app.scroll > 0);
    }

    // -- theme --

    #[test]
    fn theme_key_toggles_and_persists() {
        let (mut app, _dir) = app();
        assert_eq!(app.theme.current(&app.page), Theme::Dark);

        apply(&mut app, Action::ToggleTheme, NOW);
        assert_eq!(app.theme.current(&app.page), Theme::Light);
        assert_eq!(app.store.load(), Some(Theme::Light));
    }

    // -- reveal + typing --

    #[test]
    fn initial_viewport_reveals_the_hero_and_starts_typing() {
        let (mut app, _dir) = app();
        refresh_reveals(&mut app, NOW);

        let hero = app.page.element_by_id("hero").unwrap();
        assert!(app.page.has_class(hero, ACTIVE_CLASS));
        assert!(app.typing.started());
        assert_eq!(app.timers.next_due(), Some(NOW + START_DELAY));
    }

    #[test]
    fn full_scroll_sweep_reveals_every_section_exactly_once() {
        let (mut app, _dir) = app();
        refresh_reveals(&mut app, NOW);

        let total = layout::rows(&app).len();
        for _ in 0..total {
            apply(&mut app, Action::ScrollDown, NOW);
        }

        for &el in &app.handles.reveal_set {
            assert!(app.page.has_class(el, ACTIVE_CLASS));
        }
        assert_eq!(app.reveal.observed_count(), 0);

        // Scrolling back does not revert anything.
        for _ in 0..total {
            apply(&mut app, Action::ScrollUp, NOW);
        }
        for &el in &app.handles.reveal_set {
            assert!(app.page.has_class(el, ACTIVE_CLASS));
        }
    }

    #[test]
    fn typing_advances_through_timer_events() {
        let (mut app, _dir) = app();
        refresh_reveals(&mut app, NOW);

        let due = app.timers.next_due().unwrap();
        let event = app.timers.pop_due(due).unwrap();
        handle_timer(&mut app, event, due);

        let host = app.handles.typing.unwrap();
        assert_eq!(app.page.text(host), "F"); // "Full Stack Developer"
    }

    // -- cards --

    #[test]
    fn activating_a_card_button_expands_it() {
        let (mut app, _dir) = app();
        let button = app.cards.button(0).unwrap();
        app.page.focus(button);
        apply(&mut app, Action::Activate, NOW);

        assert!(app.cards.is_expanded(&app.page, 0));
        assert_eq!(app.page.text(button), crate::cards::LABEL_LESS);

        apply(&mut app, Action::Activate, NOW);
        assert!(!app.cards.is_expanded(&app.page, 0));
    }

    // -- focus --

    #[test]
    fn tab_cycles_page_focus_skipping_the_closed_sidebar() {
        let (mut app, _dir) = app();
        let panel = app.handles.sidebar.unwrap();

        apply(&mut app, Action::FocusNext, NOW);
        let first = app.page.focused().unwrap();
        assert!(!app.page.contains(panel, first));

        let ring_len = super::focus_ring(&app).len();
        for _ in 0..ring_len {
            apply(&mut app, Action::FocusNext, NOW);
        }
        assert_eq!(app.page.focused(), Some(first));
    }

    #[test]
    fn open_sidebar_traps_the_focus_ring() {
        let (mut app, _dir) = app();
        apply(&mut app, Action::ToggleSidebar, NOW);
        let panel = app.handles.sidebar.unwrap();

        for _ in 0..10 {
            apply(&mut app, Action::FocusNext, NOW);
            let focused = app.page.focused().unwrap();
            assert!(app.page.contains(panel, focused));
        }
    }

    // -- form --

    #[test]
    fn typed_fields_flow_into_the_submission_payload() {
        let (mut app, _dir) = app();
        let b = app.handles.form.unwrap();

        app.page.focus(b.name);
        for c in "Ada".chars() {
            apply(&mut app, Action::Input(c), NOW);
        }
        apply(&mut app, Action::Backspace, NOW);
        apply(&mut app, Action::Input('a'), NOW);

        app.page.focus(b.email);
        for c in "ada@example.com".chars() {
            apply(&mut app, Action::Input(c), NOW);
        }

        // Enter inside a field submits the form.
        apply(&mut app, Action::Activate, NOW);

        let (endpoint, fields) = app.pending_submit.take().unwrap();
        assert_eq!(endpoint, app.content.form_endpoint);
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.email, "ada@example.com");
        assert!(app.form.is_submitting());
        assert!(app.page.has_class(b.submit, LOADING_CLASS));
    }

    #[test]
    fn form_result_renders_and_releases_the_submit_control() {
        let (mut app, _dir) = app();
        let b = app.handles.form.unwrap();
        app.page.focus(b.submit);
        apply(&mut app, Action::Activate, NOW);
        assert!(app.pending_submit.is_some());

        handle_form_result(&mut app, &SubmitOutcome::Sent);
        assert_eq!(app.page.text(b.status), MSG_SENT);
        assert!(!app.form.is_submitting());
        assert_eq!(app.page.attr(b.submit, "disabled"), None);
    }

    #[test]
    fn activate_while_in_flight_does_not_queue_a_second_post() {
        let (mut app, _dir) = app();
        let b = app.handles.form.unwrap();
        app.page.focus(b.submit);

        apply(&mut app, Action::Activate, NOW);
        let first = app.pending_submit.take();
        assert!(first.is_some());

        apply(&mut app, Action::Activate, NOW);
        assert!(app.pending_submit.is_none());
    }
}
