//! TUI application state.
//!
//! `App` owns the page, the bound controllers and the timer queue.
//! Controllers receive their element handles at construction from
//! the load-time binding pass; an element missing from the page
//! leaves its feature disabled without touching the others.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::cards::ProjectCardController;
use crate::content::{self, PageHandles};
use crate::form::ContactFormController;
use crate::page::Page;
use crate::reveal::RevealController;
use crate::schedule::TimerQueue;
use crate::sidebar::SidebarController;
use crate::storage::ThemeStore;
use crate::theme::ThemeController;
use crate::types::{ContactFields, SiteContent, SubmitOutcome};
use crate::typing::TypingEffect;

/// Rows scrolled per scroll action.
pub const SCROLL_STEP: usize = 3;

/// Everything the event loop can receive from its channel.
///
/// Two producers feed a single mpsc channel: the terminal reader
/// thread (keys, clicks, resizes) and the submission worker spawned
/// per contact form POST.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Click(MouseEvent),
    Resize,
    /// The in-flight form submission finished.
    FormResult(SubmitOutcome),
}

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Corner trigger: open or close the sidebar.
    ToggleSidebar,
    ToggleTheme,
    /// Escape: close whatever overlay is open.
    CloseOverlay,
    ScrollUp,
    ScrollDown,
    FocusNext,
    FocusPrev,
    /// Enter/Space on the focused control.
    Activate,
    /// Printable input into the focused form field.
    Input(char),
    Backspace,
}

/// Top-level TUI model.
pub struct App {
    pub content: SiteContent,
    pub page: Page,
    pub handles: PageHandles,
    pub store: ThemeStore,

    pub sidebar: SidebarController,
    pub theme: ThemeController,
    pub reveal: RevealController,
    pub typing: TypingEffect,
    pub cards: ProjectCardController,
    pub form: ContactFormController,

    pub timers: TimerQueue,

    /// Top page row currently at the top of the viewport.
    pub scroll: usize,
    /// Content rows available in the viewport, set before each frame.
    pub viewport_height: usize,
    /// Selected row in the open sidebar (0 = close control).
    pub nav_cursor: usize,

    /// Payload handed to the run loop to POST on a worker thread.
    pub pending_submit: Option<(String, ContactFields)>,
    pub should_quit: bool,
}

impl App {
    /// Build the page from `content`, bind every controller, and run
    /// the startup passes (closed sidebar sync, persisted theme,
    /// footer year, reveal registration).
    pub fn new(content: SiteContent, store: ThemeStore, year: i32) -> Self {
        let mut page = content::build_page(&content);
        let handles = content::bind_handles(&page);

        let sidebar = SidebarController::new(handles.sidebar, handles.corner_btn);
        let theme = ThemeController::new(handles.theme_icon);
        let typing = TypingEffect::new(handles.typing, content.roles.clone());
        let mut reveal = RevealController::new(handles.typing);
        for &el in &handles.reveal_set {
            reveal.observe(el);
        }
        let cards = ProjectCardController::bind(&page);
        let form = ContactFormController::new(handles.form);

        sidebar.init(&mut page);
        theme.init(&mut page, &store);
        content::set_footer_year(&mut page, &handles, year);

        App {
            content,
            page,
            handles,
            store,
            sidebar,
            theme,
            reveal,
            typing,
            cards,
            form,
            timers: TimerQueue::new(),
            scroll: 0,
            viewport_height: 0,
            nav_cursor: 0,
            pending_submit: None,
            should_quit: false,
        }
    }

    /// True when the focused element is an editable form field.
    pub fn is_editing(&self) -> bool {
        self.page
            .focused()
            .is_some_and(|el| self.page.has_class(el, content::FIELD_CLASS))
    }
}

// ============================================================================
// TESTS
// ============================================================================
