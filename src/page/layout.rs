use super::wrap::{display_width, hard_wrap, wrap};
use crate::contact::FormField;
use crate::content::{self, AssetStatus, Link, SectionId};
use crate::reveal::{ElementId, ElementSource, Rect, RegionId};
use std::collections::HashMap;

pub const HERO_ELEMENT: ElementId = ElementId(1);
pub const ABOUT_ELEMENT: ElementId = ElementId(2);

const MARGIN: usize = 2;
const MAX_CONTENT_WIDTH: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Normal,
    Heading,
    Subheading,
    Accent,
    Muted,
    Badge,
    Tag,
    Link,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
    /// Index into [`PageLayout::focusables`] when this span is interactive.
    pub focus: Option<usize>,
}

impl Span {
    fn plain(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            focus: None,
        }
    }
}

/// One laid-out page row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Line(Vec<Span>),
    /// `line` of the region's wrapped typewriter text.
    Typewriter { region: RegionId, line: usize },
    /// `line` of a form field's input box.
    Field { field: FormField, line: usize, focus: usize },
}

/// What activating a focusable does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Href(&'static str),
    Field(FormField),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focusable {
    pub target: Target,
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Focusable {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.row + self.height && col >= self.col && col < self.col + self.width
    }
}

/// A block of rows in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width_px: f64,
    pub height_px: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 10.0,
            height_px: 20.0,
        }
    }
}

impl CellMetrics {
    pub fn to_px(&self, rect: &CellRect) -> Rect {
        Rect::new(
            rect.col as f64 * self.width_px,
            rect.row as f64 * self.height_px,
            rect.width as f64 * self.width_px,
            rect.height as f64 * self.height_px,
        )
    }
}

/// The whole page laid out at one width.
#[derive(Debug, Clone)]
pub struct PageLayout {
    width: usize,
    text_width: usize,
    rows: Vec<Row>,
    anchors: HashMap<SectionId, usize>,
    focusables: Vec<Focusable>,
    elements: HashMap<ElementId, (RegionId, CellRect)>,
}

impl PageLayout {
    pub fn build(width: u16, profile: &AssetStatus) -> Self {
        let mut builder = Builder::new(width as usize);
        builder.hero(profile);
        builder.about();
        builder.skills();
        builder.projects();
        builder.contact();
        builder.footer();
        builder.finish()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Columns available to wrapped body text.
    #[cfg(test)]
    pub fn text_width(&self) -> usize {
        self.text_width
    }

    pub fn margin(&self) -> usize {
        MARGIN
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn anchor_row(&self, section: SectionId) -> Option<usize> {
        self.anchors.get(&section).copied()
    }

    /// Section containing `row`: the last anchor at or above it.
    pub fn section_at(&self, row: usize) -> Option<SectionId> {
        self.anchors
            .iter()
            .filter(|(_, start)| **start <= row)
            .max_by_key(|(_, start)| **start)
            .map(|(section, _)| *section)
    }

    pub fn focusables(&self) -> &[Focusable] {
        &self.focusables
    }

    pub fn focusable_at(&self, row: usize, col: usize) -> Option<usize> {
        self.focusables.iter().position(|f| f.contains(row, col))
    }

    pub fn focus_index_of(&self, target: Target) -> Option<usize> {
        self.focusables.iter().position(|f| f.target == target)
    }

    pub fn element_for(&self, region: RegionId) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, (r, _))| *r == region)
            .map(|(id, _)| *id)
    }

    pub fn element_cells(&self, id: ElementId) -> Option<CellRect> {
        self.elements.get(&id).map(|(_, rect)| *rect)
    }

    /// Largest scroll offset that still fills a viewport of `view_rows`.
    pub fn max_scroll(&self, view_rows: usize) -> usize {
        self.rows.len().saturating_sub(view_rows)
    }

    /// Pixel view of this layout for the visibility watcher.
    pub fn geometry(&self, metrics: CellMetrics) -> LayoutGeometry<'_> {
        LayoutGeometry {
            layout: self,
            metrics,
        }
    }

    pub fn typewriter_lines(&self, text: &str) -> Vec<String> {
        wrap(text, self.text_width)
    }

    fn field_inner_width(&self) -> usize {
        self.text_width.saturating_sub(2).max(1)
    }

    /// Exactly `field.rows()` lines of `value`, keeping the tail visible.
    pub fn field_lines(&self, field: FormField, value: &str) -> Vec<String> {
        let mut lines = hard_wrap(value, self.field_inner_width());
        if lines.len() > field.rows() {
            lines.drain(..lines.len() - field.rows());
        }
        lines.resize(field.rows(), String::new());
        lines
    }

    /// Line within the field box and column within that line where typing continues.
    pub fn field_cursor(&self, field: FormField, value: &str) -> (usize, usize) {
        let lines = hard_wrap(value, self.field_inner_width());
        let line = lines.len().min(field.rows()) - 1;
        let col = lines.last().map_or(0, |l| display_width(l));
        (line, col)
    }

    /// Plain-text rendering, typewriter rows showing `text_for(region)`.
    pub fn to_plain_lines(
        &self,
        text_for: impl Fn(RegionId) -> String,
        field_value: impl Fn(FormField) -> String,
    ) -> Vec<String> {
        let pad = " ".repeat(MARGIN);
        let mut typed: HashMap<RegionId, Vec<String>> = HashMap::new();

        self.rows
            .iter()
            .map(|row| match row {
                Row::Line(spans) => spans.iter().map(|s| s.text.as_str()).collect::<String>(),
                Row::Typewriter { region, line } => {
                    let lines = typed
                        .entry(*region)
                        .or_insert_with(|| self.typewriter_lines(&text_for(*region)));
                    format!("{pad}{}", lines.get(*line).map_or("", String::as_str))
                }
                Row::Field { field, line, .. } => {
                    let lines = self.field_lines(*field, &field_value(*field));
                    format!("{pad}| {}", lines.get(*line).map_or("", String::as_str))
                }
            })
            .map(|line| line.trim_end().to_string())
            .collect()
    }
}

/// One entry of the sticky navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub link: Link,
    pub col: usize,
    pub width: usize,
}

/// Nav bar entries, laid out after the logo on the top screen row.
pub fn nav_bar_items() -> Vec<NavItem> {
    let mut col = MARGIN + display_width(content::LOGO) + 4;
    content::NAV_LINKS
        .iter()
        .map(|link| {
            let width = display_width(link.label);
            let item = NavItem {
                link: *link,
                col,
                width,
            };
            col += width + 2;
            item
        })
        .collect()
}

/// Nav bar entry under column `col`, if any.
pub fn nav_item_at(col: usize) -> Option<NavItem> {
    nav_bar_items()
        .into_iter()
        .find(|item| col >= item.col && col < item.col + item.width)
}

/// Layout rows exposed in pixels.
pub struct LayoutGeometry<'a> {
    layout: &'a PageLayout,
    metrics: CellMetrics,
}

impl LayoutGeometry<'_> {
    /// Pixel rect of a viewport showing `view_rows` rows from `scroll`.
    pub fn viewport(&self, scroll: usize, view_rows: usize) -> Rect {
        self.metrics.to_px(&CellRect {
            row: scroll,
            col: 0,
            width: self.layout.width,
            height: view_rows,
        })
    }
}

impl ElementSource for LayoutGeometry<'_> {
    fn element_bounds(&self, id: ElementId) -> Option<Rect> {
        self.layout
            .element_cells(id)
            .map(|cells| self.metrics.to_px(&cells))
    }
}

struct Builder {
    width: usize,
    text_width: usize,
    rows: Vec<Row>,
    anchors: HashMap<SectionId, usize>,
    focusables: Vec<Focusable>,
    elements: HashMap<ElementId, (RegionId, CellRect)>,
}

impl Builder {
    fn new(width: usize) -> Self {
        let width = width.max(MARGIN * 2 + 10);
        let text_width = (width - MARGIN * 2).min(MAX_CONTENT_WIDTH);
        Self {
            width,
            text_width,
            rows: Vec::new(),
            anchors: HashMap::new(),
            focusables: Vec::new(),
            elements: HashMap::new(),
        }
    }

    fn finish(self) -> PageLayout {
        PageLayout {
            width: self.width,
            text_width: self.text_width,
            rows: self.rows,
            anchors: self.anchors,
            focusables: self.focusables,
            elements: self.elements,
        }
    }

    fn row(&self) -> usize {
        self.rows.len()
    }

    fn section(&mut self, id: SectionId) {
        self.anchors.insert(id, self.row());
    }

    fn blank(&mut self) {
        self.rows.push(Row::Line(Vec::new()));
    }

    fn line(&mut self, spans: Vec<Span>) {
        let mut with_margin = vec![Span::plain(" ".repeat(MARGIN), Style::Normal)];
        with_margin.extend(spans);
        self.rows.push(Row::Line(with_margin));
    }

    fn text(&mut self, text: &str, style: Style) {
        for line in wrap(text, self.text_width) {
            self.line(vec![Span::plain(line, style)]);
        }
    }

    fn rule(&mut self) {
        let width = self.text_width;
        self.line(vec![Span::plain("\u{2500}".repeat(width), Style::Rule)]);
    }

    fn section_header(&mut self, id: SectionId, title: &str, subtitle: &str) {
        self.section(id);
        self.blank();
        self.rule();
        self.text(title, Style::Heading);
        self.text(subtitle, Style::Subheading);
        self.blank();
    }

    /// Lay links out left to right, wrapping when a row fills up.
    fn links(&mut self, links: &[Link]) {
        let mut spans = Vec::new();
        let mut used = 0;

        for link in links {
            let label = format!("[ {} ]", link.label);
            let label_width = display_width(&label);
            if used > 0 && used + 1 + label_width > self.text_width {
                self.line(std::mem::take(&mut spans));
                used = 0;
            }
            if used > 0 {
                spans.push(Span::plain(" ", Style::Normal));
                used += 1;
            }

            let focus = self.focusables.len();
            self.focusables.push(Focusable {
                target: Target::Href(link.href),
                row: self.row(),
                col: MARGIN + used,
                width: label_width,
                height: 1,
            });
            spans.push(Span {
                text: label,
                style: Style::Link,
                focus: Some(focus),
            });
            used += label_width;
        }

        if !spans.is_empty() {
            self.line(spans);
        }
    }

    /// Reserve rows for the full typewriter text and register the element.
    fn typewriter(&mut self, region: RegionId, element: ElementId, full_text: &str) {
        let height = wrap(full_text, self.text_width).len();
        let top = self.row();
        for line in 0..height {
            self.rows.push(Row::Typewriter { region, line });
        }
        self.elements.insert(
            element,
            (
                region,
                CellRect {
                    row: top,
                    col: MARGIN,
                    width: self.text_width,
                    height,
                },
            ),
        );
    }

    fn hero(&mut self, profile: &AssetStatus) {
        self.section(SectionId::Hero);
        self.blank();
        for title in content::HERO_TITLE {
            self.text(title, Style::Heading);
        }
        self.blank();

        let picture = match profile {
            AssetStatus::Found(path) => format!(
                "[ photo: {} ]",
                path.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(content::PROFILE_PICTURE.path)
            ),
            AssetStatus::Missing => format!("[ {} ]", content::PROFILE_PICTURE.alt),
        };
        self.text(&picture, Style::Muted);
        self.blank();

        self.text(content::HERO_SUBTITLE, Style::Subheading);
        self.blank();
        self.typewriter(RegionId::Hero, HERO_ELEMENT, content::HERO_FULL_TEXT);
        self.blank();
        self.links(&[content::HERO_CTA]);
        self.blank();
    }

    fn about(&mut self) {
        self.section_header(SectionId::About, content::ABOUT_TITLE, content::ABOUT_SUBTITLE);
        self.typewriter(RegionId::About, ABOUT_ELEMENT, content::ABOUT_FULL_TEXT);
        self.blank();
        self.text(content::ABOUT_EXTRA, Style::Normal);
        self.blank();

        let number_width = content::STATS
            .iter()
            .map(|s| display_width(s.number))
            .max()
            .unwrap_or(0);
        for stat in content::STATS {
            let pad = number_width - display_width(stat.number);
            self.line(vec![
                Span::plain(format!("{}{}", " ".repeat(pad), stat.number), Style::Accent),
                Span::plain(format!("  {}", stat.label), Style::Muted),
            ]);
        }
        self.blank();
    }

    fn skills(&mut self) {
        self.section_header(SectionId::Skills, content::SKILLS_TITLE, content::SKILLS_SUBTITLE);
        for category in content::SKILL_CATEGORIES {
            self.text(category.title, Style::Accent);
            self.text(&category.tags.join(" \u{b7} "), Style::Tag);
            self.blank();
        }
    }

    fn projects(&mut self) {
        self.section_header(SectionId::Projects, content::PROJECTS_TITLE, content::PROJECTS_SUBTITLE);
        for project in content::PROJECTS {
            self.text(project.badge, Style::Badge);
            self.text(project.title, Style::Accent);
            self.text(project.description, Style::Normal);
            self.text(&project.tech.join(" \u{b7} "), Style::Tag);
            self.links(project.links);
            self.blank();
        }
    }

    fn contact(&mut self) {
        self.section_header(SectionId::Contact, content::CONTACT_TITLE, content::CONTACT_SUBTITLE);
        for field in FormField::ALL {
            self.text(field.label(), Style::Muted);
            let focus = self.focusables.len();
            self.focusables.push(Focusable {
                target: Target::Field(field),
                row: self.row(),
                col: MARGIN,
                width: self.text_width,
                height: field.rows(),
            });
            for line in 0..field.rows() {
                self.rows.push(Row::Field { field, line, focus });
            }
            self.blank();
        }

        let label = format!("[ {} ]", content::SUBMIT_LABEL);
        let focus = self.focusables.len();
        self.focusables.push(Focusable {
            target: Target::Submit,
            row: self.row(),
            col: MARGIN,
            width: display_width(&label),
            height: 1,
        });
        self.line(vec![Span {
            text: label,
            style: Style::Link,
            focus: Some(focus),
        }]);
        self.blank();
    }

    fn footer(&mut self) {
        self.rule();
        self.links(&content::SOCIAL_LINKS);
        self.text(content::FOOTER_NOTE, Style::Muted);
        self.blank();
    }
}
