//! Pure rendering: App state to ratatui widgets.
//!
//! `render` paints the header bar, the scrolled row plan, the help
//! line and, when open, the sidebar overlay. It also returns the
//! frame's hit map: every interactive element's screen rectangle,
//! so the run loop can resolve mouse clicks back to elements. The
//! overlay registers after the page, and resolution prefers the
//! last match, so the panel shadows what it covers.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::content;
use crate::form::{ERROR_CLASS, LOADING_CLASS};
use crate::page::ElementId;
use crate::reveal::ACTIVE_CLASS;
use crate::sidebar::TRIGGER_HIDDEN_CLASS;

use super::layout::{self, Row, RowKind};
use super::state::App;
use super::theme::{palette_for, Palette};

/// Sidebar overlay width in columns.
const PANEL_WIDTH: u16 = 26;

/// Screen rectangles of interactive elements, most recent last.
#[derive(Debug, Default)]
pub struct HitMap {
    rects: Vec<(Rect, ElementId)>,
}

impl HitMap {
    fn push(&mut self, rect: Rect, el: ElementId) {
        self.rects.push((rect, el));
    }

    /// The element under a screen position, preferring whatever was
    /// registered last (overlays shadow the page).
    pub fn resolve(&self, x: u16, y: u16) -> Option<ElementId> {
        self.rects
            .iter()
            .rev()
            .find(|(r, _)| {
                x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
            })
            .map(|(_, el)| *el)
    }
}

/// Render one frame and return its hit map.
pub fn render(app: &App, frame: &mut Frame) -> HitMap {
    let palette = palette_for(app.theme.current(&app.page));
    let mut hits = HitMap::default();
    let area = frame.area();

    frame.render_widget(Block::new().style(palette.base()), area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // header bar
        Constraint::Min(0),   // page content
        Constraint::Length(1), // help line
    ])
    .split(area);

    render_header(app, palette, frame, chunks[0], &mut hits);
    render_content(app, palette, frame, chunks[1], &mut hits);
    render_help(palette, frame, chunks[2]);

    if app.sidebar.is_open() {
        render_sidebar(app, palette, frame, chunks[1], &mut hits);
    }

    hits
}

// ============================================================================
// HEADER
// ============================================================================

fn render_header(
    app: &App,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    hits: &mut HitMap,
) {
    let title = Paragraph::new(Span::styled(app.content.title, palette.heading()));
    frame.render_widget(title, area);

    // Right side: theme indicator, then the corner trigger unless
    // the open sidebar hid it.
    let icon = app
        .handles
        .theme_icon
        .map(|el| app.page.text(el).to_owned())
        .unwrap_or_default();
    let corner_visible = app
        .handles
        .corner_btn
        .is_some_and(|el| !app.page.has_class(el, TRIGGER_HIDDEN_CLASS));
    let corner = if corner_visible { "☰" } else { " " };

    let right = Paragraph::new(Line::from(vec![
        Span::styled(icon, palette.base()),
        Span::raw("  "),
        Span::styled(corner, palette.heading()),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(right, area);

    // Generous hit targets on the right edge.
    if area.width >= 8 {
        if let Some(btn) = app.handles.theme_btn {
            hits.push(Rect::new(area.right() - 8, area.y, 4, 1), btn);
        }
        if corner_visible {
            if let Some(btn) = app.handles.corner_btn {
                hits.push(Rect::new(area.right() - 3, area.y, 3, 1), btn);
            }
        }
    }
}

// ============================================================================
// PAGE CONTENT
// ============================================================================

fn render_content(
    app: &App,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    hits: &mut HitMap,
) {
    let plan = layout::rows(app);
    let height = area.height as usize;
    let end = (app.scroll + height).min(plan.len());

    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for (offset, row) in plan[app.scroll.min(plan.len())..end].iter().enumerate() {
        let revealed = row
            .section
            .map(|el| app.page.has_class(el, ACTIVE_CLASS))
            .unwrap_or(true);
        lines.push(render_row(app, palette, row, revealed));

        if let Some(el) = row.element {
            let y = area.y + offset as u16;
            hits.push(Rect::new(area.x, y, area.width, 1), el);
        }
    }

    frame.render_widget(Paragraph::new(lines).style(palette.base()), area);
}

fn render_row<'a>(app: &'a App, palette: &Palette, row: &Row, revealed: bool) -> Line<'a> {
    // Sections wait dimmed until they reveal.
    if !revealed {
        return Line::from(Span::styled(plain_text(app, row), palette.dimmed()));
    }

    let focused = row.element.is_some() && row.element == app.page.focused();

    match &row.kind {
        RowKind::Blank => Line::default(),
        RowKind::Banner(i) => {
            let art = banner_line(app, *i);
            Line::from(Span::styled(art, palette.heading()))
        }
        RowKind::Heading(text) => Line::from(vec![
            Span::styled("▍ ", palette.heading()),
            Span::styled(text.clone(), palette.heading()),
        ]),
        RowKind::Text(text) => Line::from(Span::styled(text.clone(), palette.base())),
        RowKind::Typing => {
            let text = app
                .handles
                .typing
                .map(|el| app.page.text(el))
                .unwrap_or_default();
            let width = app.typing.max_role_width();
            Line::from(vec![
                Span::styled("❯ ", palette.heading()),
                Span::styled(format!("{text}▌"), palette.focused()),
                // Reserve the longest role's width so layout is stable.
                Span::raw(" ".repeat(width.saturating_sub(text.chars().count()))),
            ])
        }
        RowKind::CardButton(_) => {
            let label = row
                .element
                .map(|el| app.page.text(el))
                .unwrap_or_default();
            let style = if focused { palette.focused() } else { palette.heading() };
            Line::from(Span::styled(format!("  [ {label} ]"), style))
        }
        RowKind::Field => field_line(app, palette, row.element, focused),
        RowKind::Submit => {
            let el = row.element;
            let loading = el.is_some_and(|e| app.page.has_class(e, LOADING_CLASS));
            let label = el.map(|e| app.page.text(e)).unwrap_or_default();
            let style = if loading {
                palette.dimmed()
            } else if focused {
                palette.focused()
            } else {
                palette.heading()
            };
            let text = if loading {
                format!("  [ {label}… ]")
            } else {
                format!("  [ {label} ]")
            };
            Line::from(Span::styled(text, style))
        }
        RowKind::Status => {
            let Some(el) = row.element else {
                return Line::default();
            };
            let text = app.page.text(el);
            let style = if app.page.has_class(el, ERROR_CLASS) {
                palette.status_err()
            } else {
                palette.status_ok()
            };
            Line::from(Span::styled(format!("  {text}"), style))
        }
        RowKind::Footer => {
            let year = app
                .handles
                .year
                .map(|el| app.page.text(el))
                .unwrap_or_default();
            Line::from(Span::styled(
                format!("© {year} {}", app.content.title),
                palette.dimmed(),
            ))
        }
    }
}

/// Unstyled text of a row, for the pre-reveal dimmed state.
fn plain_text(app: &App, row: &Row) -> String {
    match &row.kind {
        RowKind::Blank => String::new(),
        RowKind::Banner(i) => banner_line(app, *i).to_owned(),
        RowKind::Heading(text) => format!("▍ {text}"),
        RowKind::Text(text) => text.clone(),
        RowKind::Typing => "❯ ".to_owned(),
        RowKind::CardButton(_) => {
            let label = row.element.map(|el| app.page.text(el)).unwrap_or_default();
            format!("  [ {label} ]")
        }
        RowKind::Field => field_text(app, row.element).0,
        RowKind::Submit => {
            let label = row.element.map(|el| app.page.text(el)).unwrap_or_default();
            format!("  [ {label} ]")
        }
        RowKind::Status => String::new(),
        RowKind::Footer => String::new(),
    }
}

fn banner_line(app: &App, index: usize) -> &'static str {
    let src = app
        .page
        .by_class(crate::theme::THEMED_CLASS)
        .first()
        .and_then(|el| app.page.attr(*el, "src").map(str::to_owned));
    src.as_deref()
        .and_then(content::banner_art)
        .and_then(|art| art.get(index))
        .copied()
        .unwrap_or("")
}

/// A form field row: "Label    │ value" with the placeholder shown
/// dim while empty and a cursor mark while focused.
fn field_line<'a>(
    app: &'a App,
    palette: &Palette,
    element: Option<ElementId>,
    focused: bool,
) -> Line<'a> {
    let (text, empty) = field_text(app, element);
    let value_style = if empty {
        palette.dimmed()
    } else if focused {
        palette.focused()
    } else {
        palette.base()
    };
    let mut spans = vec![Span::styled(text, value_style)];
    if focused {
        spans.push(Span::styled("▏", palette.focused()));
    }
    Line::from(spans)
}

/// Returns the printable field row and whether the value is empty.
fn field_text(app: &App, element: Option<ElementId>) -> (String, bool) {
    let Some(el) = element else {
        return (String::new(), true);
    };
    let label = match app.page.attr(el, "name") {
        Some("name") => "Name",
        Some("email") => "Email",
        Some("message") => "Message",
        _ => "",
    };
    let value = app.page.text(el);
    if value.is_empty() {
        let placeholder = app.page.attr(el, "placeholder").unwrap_or_default();
        (format!("  {label:<8}│ {placeholder}"), true)
    } else {
        (format!("  {label:<8}│ {value}"), false)
    }
}

// ============================================================================
// SIDEBAR OVERLAY
// ============================================================================

fn render_sidebar(
    app: &App,
    palette: &Palette,
    frame: &mut Frame,
    content_area: Rect,
    hits: &mut HitMap,
) {
    let Some(panel_el) = app.handles.sidebar else {
        return;
    };

    let width = PANEL_WIDTH.min(content_area.width);
    let panel = Rect::new(
        content_area.right().saturating_sub(width),
        content_area.y,
        width,
        content_area.height,
    );

    frame.render_widget(Clear, panel);
    let block = Block::bordered().title(" Menu ").style(palette.panel());
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    // The whole panel is a hit target first, so stray clicks inside
    // it resolve to the panel and never count as outside clicks.
    hits.push(panel, panel_el);

    let mut lines: Vec<Line> = Vec::new();

    let close_focused = app.handles.close_btn == app.page.focused();
    let close_style = if app.nav_cursor == 0 || close_focused {
        palette.focused()
    } else {
        palette.dimmed()
    };
    lines.push(Line::from(Span::styled("✕  close", close_style)));
    if let Some(close) = app.handles.close_btn {
        if inner.height > 0 {
            hits.push(Rect::new(inner.x, inner.y, inner.width, 1), close);
        }
    }

    for (i, &link) in app.handles.nav_links.iter().enumerate() {
        let selected = app.nav_cursor == i + 1 || app.page.focused() == Some(link);
        let style = if selected {
            palette.focused()
        } else {
            palette.base()
        };
        let marker = if selected { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(app.page.text(link), style),
        ]));

        let y = inner.y + 1 + i as u16;
        if y < inner.bottom() {
            hits.push(Rect::new(inner.x, y, inner.width, 1), link);
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

// ============================================================================
// HELP LINE
// ============================================================================

fn render_help(palette: &Palette, frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Span::styled(
        " q quit · m menu · t theme · ↑/↓ scroll · tab focus · enter activate",
        palette.dimmed(),
    ));
    frame.render_widget(help, area);
}

// ============================================================================
// TESTS
// ============================================================================
