//! Static site content and page construction.
//!
//! `default_site` is the terminal stand-in for the portfolio's
//! markup; `build_page` turns it into the element tree the
//! controllers operate on; `bind_handles` performs the load-time
//! element lookup, tolerating absence so that missing optional
//! elements degrade to disabled features instead of failures.

use crate::cards;
use crate::form::FormBinding;
use crate::page::{ElementId, Page};
use crate::theme;
use crate::types::{ProjectContent, SectionContent, SiteContent};

// ============================================================================
// ELEMENT IDS AND CLASSES
// ============================================================================

pub const SIDEBAR_ID: &str = "sidebar";
pub const CORNER_BTN_ID: &str = "cornerBtn";
pub const THEME_BTN_ID: &str = "themeToggle";
pub const FORM_ID: &str = "contactForm";
pub const STATUS_ID: &str = "formStatus";
pub const YEAR_ID: &str = "year";

pub const NAV_LINK_CLASS: &str = "nav-link";
pub const CLOSE_SIDEBAR_CLASS: &str = "close-sidebar";
pub const TYPING_CLASS: &str = "typing";
pub const FIELD_CLASS: &str = "field";
pub const SUBMIT_CLASS: &str = "submit";
pub const REVEAL_CLASS: &str = "reveal";

/// Nav target attribute on sidebar links.
pub const NAV_TARGET_ATTR: &str = "data-target";

/// Hero banner art keys, stored as per-theme source variants.
pub const BANNER_DARK_SRC: &str = "banner-dark";
pub const BANNER_LIGHT_SRC: &str = "banner-light";

const BANNER_DARK_ART: [&str; 3] = [
    "█████╗ ██╗     ███████╗██╗  ██╗",
    "██╔══██╗██║    ██╔════╝╚██╗██╔╝",
    "██║  ██║███████╗███████╗██╔╝██╗",
];

const BANNER_LIGHT_ART: [&str; 3] = [
    "░░░░░╗ ░░╗     ░░░░░░░╗░░╗  ░░╗",
    "░░╔══░░╗░░║    ░░╔════╝╚░░╗░░╔╝",
    "░░║  ░░║░░░░░░░╗░░░░░░░╗░░╔╝░░╗",
];

/// Resolve a banner `src` value to its art lines.
pub fn banner_art(src: &str) -> Option<&'static [&'static str]> {
    match src {
        BANNER_DARK_SRC => Some(&BANNER_DARK_ART),
        BANNER_LIGHT_SRC => Some(&BANNER_LIGHT_ART),
        _ => None,
    }
}

// ============================================================================
// DEFAULT CONTENT
// ============================================================================

/// The built-in portfolio content.
pub fn default_site() -> SiteContent {
    SiteContent {
        title: "Alex Doe",
        roles: vec![
            "Full Stack Developer".to_owned(),
            "Problem Solver".to_owned(),
            "Quick Learner".to_owned(),
        ],
        intro: vec![
            "Hi, I'm Alex. I build small, sharp tools for the web",
            "and the terminal.",
        ],
        sections: vec![
            SectionContent {
                slug: "about",
                heading: "About",
                lines: vec![
                    "Self-taught developer with a taste for simple systems",
                    "that stay simple. Currently freelancing and open to",
                    "interesting work.",
                ],
            },
            SectionContent {
                slug: "skills",
                heading: "Skills",
                lines: vec![
                    "Rust, TypeScript, Python",
                    "PostgreSQL, Redis",
                    "CI pipelines, observability, too much regex",
                ],
            },
        ],
        projects: vec![
            ProjectContent {
                title: "linkbox",
                summary: vec!["A self-hosted bookmark manager with full-text search."],
                details: vec![
                    "Single static binary, SQLite storage, keyboard-first UI.",
                    "Imports browser exports and dead-link-checks on a schedule.",
                ],
            },
            ProjectContent {
                title: "wharf",
                summary: vec!["Container log viewer for day-two debugging."],
                details: vec![
                    "Streams from multiple hosts, merges by timestamp and",
                    "highlights anomalies against a rolling baseline.",
                ],
            },
            ProjectContent {
                title: "tidepool",
                summary: vec!["Generative shoreline art in the browser."],
                details: vec![
                    "Canvas simulation of waves and sediment; every refresh",
                    "is a new coastline. Written for a 1k JS contest.",
                ],
            },
        ],
        form_endpoint: "https://formspree.io/f/portfolio-demo".to_owned(),
    }
}

// ============================================================================
// PAGE CONSTRUCTION
// ============================================================================

/// Build the element tree for `content`.
///
/// Document order matches render order: header, sidebar panel, hero,
/// prose sections, projects, contact, footer.
pub fn build_page(content: &SiteContent) -> Page {
    let mut page = Page::new();
    let body = page.body();

    // Header: title, theme toggle with its indicator icon, corner
    // trigger for the sidebar.
    let header = page.create_in(body);
    let title = page.create_in(header);
    page.set_text(title, content.title);

    let theme_btn = page.create_in(header);
    page.set_id(theme_btn, THEME_BTN_ID);
    page.set_focusable(theme_btn, true);
    let theme_icon = page.create_in(theme_btn);
    page.add_class(theme_icon, "theme-icon");

    let corner_btn = page.create_in(header);
    page.set_id(corner_btn, CORNER_BTN_ID);
    page.add_class(corner_btn, "corner-btn");
    page.set_focusable(corner_btn, true);

    // Sidebar panel: close control plus one nav link per section.
    let sidebar = page.create_in(body);
    page.set_id(sidebar, SIDEBAR_ID);
    page.add_class(sidebar, "sidebar");

    let close_btn = page.create_in(sidebar);
    page.add_class(close_btn, CLOSE_SIDEBAR_CLASS);
    page.set_focusable(close_btn, true);
    page.set_text(close_btn, "✕");

    let mut nav_targets: Vec<(&str, &str)> = vec![("hero", "Home")];
    for section in &content.sections {
        nav_targets.push((section.slug, section.heading));
    }
    nav_targets.push(("projects", "Projects"));
    nav_targets.push(("contact", "Contact"));
    for (slug, label) in nav_targets {
        let link = page.create_in(sidebar);
        page.add_class(link, NAV_LINK_CLASS);
        page.set_attr(link, NAV_TARGET_ATTR, slug);
        page.set_text(link, label);
        page.set_focusable(link, true);
    }

    // Hero: themed banner and the typing host.
    let hero = page.create_in(body);
    page.set_id(hero, "hero");
    page.add_class(hero, REVEAL_CLASS);

    let banner = page.create_in(hero);
    page.add_class(banner, theme::THEMED_CLASS);
    page.set_attr(banner, "data-src-dark", BANNER_DARK_SRC);
    page.set_attr(banner, "data-src-light", BANNER_LIGHT_SRC);
    page.set_attr(banner, "src", BANNER_DARK_SRC);

    let typing = page.create_in(hero);
    page.add_class(typing, TYPING_CLASS);

    // Prose sections.
    for section in &content.sections {
        let el = page.create_in(body);
        page.set_id(el, section.slug);
        page.add_class(el, REVEAL_CLASS);
    }

    // Projects: one card per project, each with its toggle pair.
    let projects = page.create_in(body);
    page.set_id(projects, "projects");
    page.add_class(projects, REVEAL_CLASS);

    for _ in &content.projects {
        let card = page.create_in(projects);
        page.add_class(card, cards::CARD_CLASS);

        let more = page.create_in(card);
        page.add_class(more, cards::MORE_CLASS);

        let button = page.create_in(card);
        page.add_class(button, cards::BUTTON_CLASS);
        page.set_text(button, cards::LABEL_MORE);
        page.set_attr(button, "aria-expanded", "false");
        page.set_focusable(button, true);
    }

    // Contact: the form, its fields and the status region.
    let contact = page.create_in(body);
    page.set_id(contact, "contact");
    page.add_class(contact, REVEAL_CLASS);

    let form = page.create_in(contact);
    page.set_id(form, FORM_ID);
    page.set_attr(form, "action", &content.form_endpoint);

    for (field_name, placeholder) in [
        ("name", "Your name"),
        ("email", "Your email"),
        ("message", "Your message"),
    ] {
        let field = page.create_in(form);
        page.add_class(field, FIELD_CLASS);
        page.set_attr(field, "name", field_name);
        page.set_attr(field, "placeholder", placeholder);
        page.set_focusable(field, true);
    }

    let submit = page.create_in(form);
    page.add_class(submit, SUBMIT_CLASS);
    page.set_text(submit, "Send message");
    page.set_focusable(submit, true);

    let status = page.create_in(contact);
    page.set_id(status, STATUS_ID);
    page.add_class(status, "status");

    // Footer year region.
    let footer = page.create_in(body);
    let year = page.create_in(footer);
    page.set_id(year, YEAR_ID);

    page
}

// ============================================================================
// LOAD-TIME BINDING
// ============================================================================

/// Handles to the fixed element set the controllers depend on.
///
/// Every handle is optional: a page missing an element yields a
/// None, and the corresponding feature no-ops.
#[derive(Debug)]
pub struct PageHandles {
    pub sidebar: Option<ElementId>,
    pub corner_btn: Option<ElementId>,
    pub close_btn: Option<ElementId>,
    pub theme_btn: Option<ElementId>,
    pub theme_icon: Option<ElementId>,
    pub nav_links: Vec<ElementId>,
    /// Reveal-marked elements in document order.
    pub reveal_set: Vec<ElementId>,
    pub typing: Option<ElementId>,
    pub form: Option<FormBinding>,
    pub year: Option<ElementId>,
}

/// Look up the fixed element set, once, at startup.
pub fn bind_handles(page: &Page) -> PageHandles {
    let form = page.element_by_id(FORM_ID).and_then(|form_el| {
        let fields = page.by_class(FIELD_CLASS);
        let field = |name: &str| {
            fields
                .iter()
                .copied()
                .find(|f| page.contains(form_el, *f) && page.attr(*f, "name") == Some(name))
        };
        Some(FormBinding {
            form: form_el,
            status: page.element_by_id(STATUS_ID)?,
            submit: page.find_within(form_el, SUBMIT_CLASS)?,
            name: field("name")?,
            email: field("email")?,
            message: field("message")?,
        })
    });

    let theme_btn = page.element_by_id(THEME_BTN_ID);

    PageHandles {
        sidebar: page.element_by_id(SIDEBAR_ID),
        corner_btn: page.element_by_id(CORNER_BTN_ID),
        close_btn: page.by_class(CLOSE_SIDEBAR_CLASS).first().copied(),
        theme_btn,
        theme_icon: theme_btn.and_then(|btn| page.find_within(btn, "theme-icon")),
        nav_links: page.by_class(NAV_LINK_CLASS),
        reveal_set: page.by_class(REVEAL_CLASS),
        typing: page.by_class(TYPING_CLASS).first().copied(),
        form,
        year: page.element_by_id(YEAR_ID),
    }
}

/// Stamp the footer year region.
pub fn set_footer_year(page: &mut Page, handles: &PageHandles, year: i32) {
    if let Some(el) = handles.year {
        page.set_text(el, &year.to_string());
    }
}

// ============================================================================
// TESTS
// ============================================================================
