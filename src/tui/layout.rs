//! Pure page layout: App state to a flat plan of content rows.
//!
//! The row plan is the one source of truth for geometry. The view
//! styles and prints it; the update layer derives section spans from
//! it to compute the visible fraction that drives reveal-on-scroll.
//! Card expansion changes the plan, so both sides always agree.

use std::ops::Range;

use crate::page::ElementId;

use super::state::App;

/// What a single content row holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Blank,
    /// Hero banner art line, by index into the art block.
    Banner(usize),
    Heading(String),
    Text(String),
    /// The typewriter line.
    Typing,
    /// A project card's read-more button, by card index.
    CardButton(usize),
    /// An editable form field row.
    Field,
    Submit,
    /// The form status region.
    Status,
    Footer,
}

/// One content row of the page.
#[derive(Debug, Clone)]
pub struct Row {
    pub kind: RowKind,
    /// The reveal-marked section this row belongs to.
    pub section: Option<ElementId>,
    /// Interactive element rendered on this row.
    pub element: Option<ElementId>,
}

impl Row {
    fn plain(kind: RowKind, section: Option<ElementId>) -> Self {
        Row {
            kind,
            section,
            element: None,
        }
    }
}

/// Build the full row plan for the current app state.
pub fn rows(app: &App) -> Vec<Row> {
    let page = &app.page;
    let mut out = Vec::new();

    // Hero: banner, intro, typewriter line.
    let hero = page.element_by_id("hero");
    for i in 0..3 {
        out.push(Row::plain(RowKind::Banner(i), hero));
    }
    out.push(Row::plain(RowKind::Blank, hero));
    for line in &app.content.intro {
        out.push(Row::plain(RowKind::Text((*line).to_owned()), hero));
    }
    out.push(Row::plain(RowKind::Blank, hero));
    out.push(Row {
        kind: RowKind::Typing,
        section: hero,
        element: app.handles.typing,
    });
    out.push(Row::plain(RowKind::Blank, hero));

    // Prose sections.
    for section in &app.content.sections {
        let el = page.element_by_id(section.slug);
        out.push(Row::plain(RowKind::Heading(section.heading.to_owned()), el));
        for line in &section.lines {
            out.push(Row::plain(RowKind::Text((*line).to_owned()), el));
        }
        out.push(Row::plain(RowKind::Blank, el));
    }

    // Projects: heading, then one block per card.
    let projects = page.element_by_id("projects");
    out.push(Row::plain(RowKind::Heading("Projects".to_owned()), projects));
    for (i, project) in app.content.projects.iter().enumerate() {
        out.push(Row::plain(
            RowKind::Heading(project.title.to_owned()),
            projects,
        ));
        for line in &project.summary {
            out.push(Row::plain(RowKind::Text((*line).to_owned()), projects));
        }
        if app.cards.is_expanded(page, i) {
            for line in &project.details {
                out.push(Row::plain(RowKind::Text((*line).to_owned()), projects));
            }
        }
        out.push(Row {
            kind: RowKind::CardButton(i),
            section: projects,
            element: card_button(app, i),
        });
        out.push(Row::plain(RowKind::Blank, projects));
    }

    // Contact: heading, fields, submit, status.
    let contact = page.element_by_id("contact");
    out.push(Row::plain(RowKind::Heading("Contact".to_owned()), contact));
    if let Some(binding) = app.form.binding() {
        for field in [binding.name, binding.email, binding.message] {
            out.push(Row {
                kind: RowKind::Field,
                section: contact,
                element: Some(field),
            });
        }
        out.push(Row {
            kind: RowKind::Submit,
            section: contact,
            element: Some(binding.submit),
        });
        out.push(Row {
            kind: RowKind::Status,
            section: contact,
            element: Some(binding.status),
        });
    }
    out.push(Row::plain(RowKind::Blank, contact));

    // Footer.
    out.push(Row::plain(RowKind::Footer, None));

    out
}

fn card_button(app: &App, index: usize) -> Option<ElementId> {
    // Bound cards are in document order, same as content order.
    app.cards.button(index)
}

/// Contiguous row span of each reveal-marked section, in order.
pub fn section_spans(rows: &[Row]) -> Vec<(ElementId, Range<usize>)> {
    let mut spans: Vec<(ElementId, Range<usize>)> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let Some(el) = row.section else { continue };
        match spans.last_mut() {
            Some((last, range)) if *last == el => range.end = i + 1,
            _ => spans.push((el, i..i + 1)),
        }
    }
    spans
}

/// Fraction of a section span visible in the scrolled viewport.
pub fn visible_fraction(span: &Range<usize>, scroll: usize, viewport: usize) -> f64 {
    if span.is_empty() || viewport == 0 {
        return 0.0;
    }
    let view_end = scroll + viewport;
    let start = span.start.max(scroll);
    let end = span.end.min(view_end);
    if end <= start {
        return 0.0;
    }
    (end - start) as f64 / span.len() as f64
}

/// First row of the section with the given slug.
pub fn section_start(app: &App, rows: &[Row], slug: &str) -> Option<usize> {
    let el = app.page.element_by_id(slug)?;
    rows.iter().position(|r| r.section == Some(el))
}

/// Largest valid scroll offset for a plan of `total` rows.
pub fn max_scroll(total: usize, viewport: usize) -> usize {
    total.saturating_sub(viewport)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::storage::ThemeStore;

    fn app() -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path());
        (App::new(content::default_site(), store, 2026), dir)
    }

    #[test]
    fn plan_covers_every_section_in_order() {
        let (app, _dir) = app();
        let rows = rows(&app);
        let spans = section_spans(&rows);

        // hero, prose sections, projects, contact
        assert_eq!(spans.len(), app.content.sections.len() + 3);
        for window in spans.windows(2) {
            assert!(window[0].1.end <= window[1].1.start);
        }
        assert_eq!(spans[0].0, app.page.element_by_id("hero").unwrap());
    }

    #[test]
    fn expanding_a_card_grows_the_plan() {
        let (mut app, _dir) = app();
        let before = rows(&app).len();

        app.cards.toggle(&mut app.page, 0);
        let after = rows(&app).len();
        assert_eq!(after, before + app.content.projects[0].details.len());
    }

    #[test]
    fn visible_fraction_is_overlap_over_height() {
        let span = 10..20;
        assert_eq!(visible_fraction(&span, 0, 30), 1.0);
        assert_eq!(visible_fraction(&span, 15, 30), 0.5);
        assert_eq!(visible_fraction(&span, 20, 30), 0.0);
        assert_eq!(visible_fraction(&span, 0, 11), 0.1);
        assert_eq!(visible_fraction(&span, 0, 0), 0.0);
    }

    #[test]
    fn section_start_finds_each_slug() {
        let (app, _dir) = app();
        let plan = rows(&app);

        assert_eq!(section_start(&app, &plan, "hero"), Some(0));
        let about = section_start(&app, &plan, "about").unwrap();
        let contact = section_start(&app, &plan, "contact").unwrap();
        assert!(about < contact);
        assert_eq!(section_start(&app, &plan, "nope"), None);
    }

    #[test]
    fn max_scroll_saturates() {
        assert_eq!(max_scroll(100, 30), 70);
        assert_eq!(max_scroll(10, 30), 0);
    }

    #[test]
    fn field_rows_carry_their_elements() {
        let (app, _dir) = app();
        let plan = rows(&app);
        let fields: Vec<_> = plan
            .iter()
            .filter(|r| r.kind == RowKind::Field)
            .collect();
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|r| r.element.is_some()));
    }
}
