//! Domain types for termfolio.
//!
//! Pure data: the theme enumeration, the contact form payload, the
//! outcome of a relay submission, and the static site content that
//! the page is built from.

use serde::{Deserialize, Serialize};

// ============================================================================
// THEME
// ============================================================================

/// The two color themes the page can render in.
///
/// Mirrored into the root element's `data-theme` attribute and into
/// persistent storage under the `site-theme` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Attribute / storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse the attribute / storage representation.
    ///
    /// Unknown values return None; callers fall back to dark.
    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// The other theme.
    pub fn opposite(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CONTACT FORM
// ============================================================================

/// The serialized contact form field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Terminal outcome of one contact form submission.
///
/// Every submission ends in exactly one of these; there is no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay answered with a success status.
    Sent,
    /// The relay rejected the submission. Carries the joined
    /// server-provided messages when the error body parsed.
    Rejected(Option<String>),
    /// The request never completed.
    NetworkFailed,
}

// ============================================================================
// SITE CONTENT
// ============================================================================

/// A prose section of the page (about, skills, ...).
#[derive(Debug, Clone)]
pub struct SectionContent {
    /// Element id, also the nav link target.
    pub slug: &'static str,
    /// Heading shown above the body and in the sidebar nav.
    pub heading: &'static str,
    /// Body lines, rendered as-is.
    pub lines: Vec<&'static str>,
}

/// One expandable project card.
#[derive(Debug, Clone)]
pub struct ProjectContent {
    pub title: &'static str,
    /// Always-visible summary lines.
    pub summary: Vec<&'static str>,
    /// Lines revealed by the read-more toggle.
    pub details: Vec<&'static str>,
}

/// Everything the page is built from.
///
/// This is the terminal stand-in for the portfolio's markup: a fixed
/// set of identified elements and class-marked groups.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub title: &'static str,
    /// Strings the typewriter headline cycles through.
    pub roles: Vec<String>,
    pub intro: Vec<&'static str>,
    pub sections: Vec<SectionContent>,
    pub projects: Vec<ProjectContent>,
    /// Form relay URL, stored on the form element's `action` attribute.
    pub form_endpoint: String,
}

// ============================================================================
// TESTS
// ============================================================================
