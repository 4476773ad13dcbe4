//! Pagination controls: windowed page links with gaps and previous/next.
//!
//! Rendering is split in two steps. [`PaginationLinkRenderer::elements`]
//! turns a [`PaginatedResult`] into a sequence of [`LinkElement`]s, and
//! [`to_markup`] joins them into HTML. Neither step touches the store.
//!
//! The numbered run is the union of three windows, clamped to the page range:
//!
//! ```text
//! 1..=outer   current-inner..=current+inner   total-outer+1..=total
//! ```
//!
//! A gap marker separates two visible numbers that are not adjacent. Output
//! is never wrapped in a container element.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::paginated::PaginatedResult;
use crate::route::RouteSegment;

pub const DEFAULT_PREV_LABEL: &str = "« Previous";
pub const DEFAULT_NEXT_LABEL: &str = "Next »";
pub const DEFAULT_INNER_WINDOW: u32 = 4;
pub const DEFAULT_OUTER_WINDOW: u32 = 1;
pub const DEFAULT_SEPARATOR: &str = " ";

/// Markup for a gap between non-adjacent page numbers.
pub const GAP_MARKUP: &str = r#"<span class="gap">&#8230;</span>"#;

/// Options controlling how pagination controls are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkRenderOptions {
    /// Container id. Accepted but never rendered.
    pub id: Option<String>,
    /// Container class. Accepted but never rendered.
    pub class: Option<String>,
    pub prev_label: String,
    pub next_label: String,
    /// Numbered links shown on each side of the current page.
    pub inner_window: u32,
    /// Numbered links always shown at the very start and end.
    pub outer_window: u32,
    pub separator: String,
    /// When false only previous/next are rendered.
    pub page_links: bool,
    /// When false the previous label is blanked on the first page and the
    /// next label on the last page.
    pub show_endcap_link: bool,
    /// Target of the page-1 link, overriding the synthetic address.
    pub first_page_url: Option<String>,
}

impl Default for LinkRenderOptions {
    fn default() -> Self {
        Self {
            id: None,
            class: None,
            prev_label: DEFAULT_PREV_LABEL.to_string(),
            next_label: DEFAULT_NEXT_LABEL.to_string(),
            inner_window: DEFAULT_INNER_WINDOW,
            outer_window: DEFAULT_OUTER_WINDOW,
            separator: DEFAULT_SEPARATOR.to_string(),
            page_links: true,
            show_endcap_link: true,
            first_page_url: None,
        }
    }
}

impl LinkRenderOptions {
    /// Reads options from tag attributes.
    ///
    /// Blank values are ignored so defaults apply. `page_links` and
    /// `show_endcap_link` turn off only for the literal `false`.
    pub fn from_attrs(attrs: &BTreeMap<String, String>) -> ValidationResult<Self> {
        let present = |name: &str| {
            attrs
                .get(name)
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty())
        };

        let mut options = Self::default();
        options.id = present("id").map(str::to_string);
        options.class = present("class").map(str::to_string);
        options.first_page_url = present("first_page_url").map(str::to_string);
        if let Some(label) = present("prev_label") {
            options.prev_label = label.to_string();
        }
        if let Some(label) = present("next_label") {
            options.next_label = label.to_string();
        }
        if let Some(separator) = present("separator") {
            options.separator = separator.to_string();
        }
        if let Some(value) = present("inner_window") {
            options.inner_window = parse_window("inner_window", value)?;
        }
        if let Some(value) = present("outer_window") {
            options.outer_window = parse_window("outer_window", value)?;
        }
        options.page_links = attrs.get("page_links").map(String::as_str) != Some("false");
        options.show_endcap_link =
            attrs.get("show_endcap_link").map(String::as_str) != Some("false");

        Ok(options)
    }
}

fn parse_window(name: &str, value: &str) -> ValidationResult<u32> {
    value.trim().parse().map_err(|_| {
        ValidationError::invalid_attribute(name, value, "expected a non-negative integer")
    })
}

/// One renderable piece of the pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkElement {
    Link {
        href: String,
        text: String,
        rel: Option<String>,
        class: Option<String>,
    },
    Span {
        text: String,
        class: Option<String>,
    },
    Gap,
}

impl LinkElement {
    /// HTML for this element. The href is attribute-escaped; text is verbatim.
    pub fn to_markup(&self) -> String {
        match self {
            Self::Link {
                href,
                text,
                rel,
                class,
            } => format!(
                r#"<a href="{}"{}{}>{}</a>"#,
                escape_attr(href),
                attribute("rel", rel.as_deref()),
                attribute("class", class.as_deref()),
                text
            ),
            Self::Span { text, class } => {
                format!("<span{}>{}</span>", attribute("class", class.as_deref()), text)
            }
            Self::Gap => GAP_MARKUP.to_string(),
        }
    }

    /// Whether the element can be followed.
    #[must_use]
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Link { text, .. } | Self::Span { text, .. } => text,
            Self::Gap => "\u{2026}",
        }
    }
}

/// Joins elements with `separator`.
pub fn to_markup(elements: &[LinkElement], separator: &str) -> String {
    elements
        .iter()
        .map(LinkElement::to_markup)
        .collect::<Vec<_>>()
        .join(separator)
}

/// An entry of the numbered run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEntry {
    Page(u32),
    Gap,
}

/// Page numbers visible for `current` of `total`, with gaps between breaks.
///
/// `current` is clamped into range. An empty range yields no entries.
pub fn windowed_page_numbers(current: u32, total: u32, inner: u32, outer: u32) -> Vec<WindowEntry> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let mut visible = BTreeSet::new();
    visible.extend(1..=outer.min(total));
    visible.extend(current.saturating_sub(inner).max(1)..=current.saturating_add(inner).min(total));
    if outer > 0 {
        visible.extend(total.saturating_sub(outer).saturating_add(1).max(1)..=total);
    }

    let mut entries = Vec::with_capacity(visible.len() + 2);
    let mut previous: Option<u32> = None;
    for n in visible {
        if previous.is_some_and(|p| n > p + 1) {
            entries.push(WindowEntry::Gap);
        }
        entries.push(WindowEntry::Page(n));
        previous = Some(n);
    }
    entries
}

/// Renders pagination controls for one page's paginated children.
#[derive(Debug, Clone)]
pub struct PaginationLinkRenderer {
    page_address: String,
    segment: RouteSegment,
    options: LinkRenderOptions,
}

impl PaginationLinkRenderer {
    /// `page_address` is the canonical address numbered links hang off.
    pub fn new(
        page_address: impl Into<String>,
        segment: RouteSegment,
        options: LinkRenderOptions,
    ) -> Self {
        Self {
            page_address: page_address.into(),
            segment,
            options,
        }
    }

    pub fn options(&self) -> &LinkRenderOptions {
        &self.options
    }

    /// Address the link for page `number` points to.
    pub fn href_for(&self, number: u32) -> String {
        match self.options.first_page_url.as_deref() {
            Some(url) if number == 1 && !url.is_empty() => url.to_string(),
            _ => self.segment.page_address(&self.page_address, number),
        }
    }

    /// Previous link, numbered run, next link, left to right.
    pub fn elements<T>(&self, result: &PaginatedResult<T>) -> Vec<LinkElement> {
        // With one page or none there is nowhere to go, so both labels blank.
        let single = result.total_pages <= 1;
        let blank_prev = single || (!self.options.show_endcap_link && result.previous_page.is_none());
        let blank_next = single || (!self.options.show_endcap_link && result.next_page.is_none());
        let prev_label = if blank_prev { "" } else { self.options.prev_label.as_str() };
        let next_label = if blank_next { "" } else { self.options.next_label.as_str() };

        let mut elements = Vec::new();
        elements.push(self.link_or_span(result, result.previous_page, "disabled prev_page", prev_label));

        if self.options.page_links {
            let run = windowed_page_numbers(
                result.current_page,
                result.total_pages,
                self.options.inner_window,
                self.options.outer_window,
            );
            for entry in run {
                elements.push(match entry {
                    WindowEntry::Gap => LinkElement::Gap,
                    WindowEntry::Page(n) => {
                        self.link_or_span(result, Some(n), "current", &n.to_string())
                    }
                });
            }
        }

        elements.push(self.link_or_span(result, result.next_page, "disabled next_page", next_label));
        elements
    }

    /// Markup for the controls, joined by the configured separator.
    pub fn render<T>(&self, result: &PaginatedResult<T>) -> String {
        to_markup(&self.elements(result), &self.options.separator)
    }

    /// A link to `page` unless it is absent or current, in which case a span.
    ///
    /// A multi-word `span_class` lends its last word to the link.
    fn link_or_span<T>(
        &self,
        result: &PaginatedResult<T>,
        page: Option<u32>,
        span_class: &str,
        text: &str,
    ) -> LinkElement {
        match page {
            Some(n) if n != result.current_page => LinkElement::Link {
                href: self.href_for(n),
                text: text.to_string(),
                rel: rel_value(result, n).map(str::to_string),
                class: span_class
                    .split_once(' ')
                    .map(|(_, rest)| rest.to_string()),
            },
            _ => LinkElement::Span {
                text: text.to_string(),
                class: Some(span_class.to_string()),
            },
        }
    }
}

fn rel_value<T>(result: &PaginatedResult<T>, page: u32) -> Option<&'static str> {
    if result.previous_page == Some(page) {
        Some(if page == 1 { "prev start" } else { "prev" })
    } else if result.next_page == Some(page) {
        Some("next")
    } else if page == 1 {
        Some("start")
    } else {
        None
    }
}

fn attribute(name: &str, value: Option<&str>) -> String {
    value
        .map(|v| format!(r#" {name}="{}""#, escape_attr(v)))
        .unwrap_or_default()
}

/// Escapes a value for use inside a double-quoted attribute or element text.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
