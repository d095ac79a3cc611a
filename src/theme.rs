//! Theme controller.
//!
//! The selected theme lives on the root element's `data-theme`
//! attribute and is mirrored into the settings store on every
//! change. Elements carrying the `themed` class hold per-theme
//! source variants (`data-src-dark` / `data-src-light`) that are
//! copied into their `src` attribute, and a dedicated indicator
//! icon shows the current mode.

use crate::page::{ElementId, Page};
use crate::storage::ThemeStore;
use crate::types::Theme;

/// Root attribute carrying the active theme.
pub const THEME_ATTR: &str = "data-theme";

/// Class marking elements with per-theme source variants.
pub const THEMED_CLASS: &str = "themed";

/// Indicator glyph per theme.
pub const DARK_ICON: &str = "🌙";
pub const LIGHT_ICON: &str = "☀";

#[derive(Debug)]
pub struct ThemeController {
    icon: Option<ElementId>,
}

impl ThemeController {
    /// Bind to the theme-indicator icon. An absent icon is skipped.
    pub fn new(icon: Option<ElementId>) -> Self {
        ThemeController { icon }
    }

    /// The active theme, read from the root attribute. Unset or
    /// unknown reads as dark.
    pub fn current(&self, page: &Page) -> Theme {
        page.attr(page.root(), THEME_ATTR)
            .and_then(Theme::parse)
            .unwrap_or(Theme::Dark)
    }

    /// Apply `theme`: root attribute, persisted key, themed image
    /// sources and the indicator icon, in that order.
    pub fn set_theme(&self, page: &mut Page, store: &ThemeStore, theme: Theme) {
        page.set_attr(page.root(), THEME_ATTR, theme.as_str());

        // Storage mirrors the attribute; a failed write is silent,
        // the page itself stays consistent.
        let _ = store.save(theme);

        let variant_attr = match theme {
            Theme::Dark => "data-src-dark",
            Theme::Light => "data-src-light",
        };
        for el in page.by_class(THEMED_CLASS) {
            if let Some(src) = page.attr(el, variant_attr).map(str::to_owned) {
                page.set_attr(el, "src", &src);
            }
        }

        if let Some(icon) = self.icon {
            let glyph = match theme {
                Theme::Dark => DARK_ICON,
                Theme::Light => LIGHT_ICON,
            };
            page.set_text(icon, glyph);
        }
    }

    /// Switch to the opposite of the current theme.
    pub fn toggle(&self, page: &mut Page, store: &ThemeStore) {
        let next = self.current(page).opposite();
        self.set_theme(page, store, next);
    }

    /// Startup: apply the persisted theme, or dark when none is
    /// stored. Runs through `set_theme`, so an empty store is
    /// populated implicitly.
    pub fn init(&self, page: &mut Page, store: &ThemeStore) {
        let theme = store.load().unwrap_or(Theme::Dark);
        self.set_theme(page, store, theme);
    }
}

// ============================================================================
// TESTS
// ============================================================================
