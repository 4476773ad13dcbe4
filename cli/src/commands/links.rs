//! LINKS command - Render pagination controls offline.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_core::{
    LinkElement, LinkRenderOptions, PaginatedResult, PaginationLinkRenderer, RouteSegment,
};
use serde::Serialize;

use super::{HumanReadable, output};

/// Arguments for the links command.
#[derive(Args)]
pub struct LinksArgs {
    /// Current page number
    #[arg(long)]
    pub current: u32,

    /// Total number of pages
    #[arg(long)]
    pub total: u32,

    /// Canonical address the links hang off
    #[arg(long, default_value = "/")]
    pub base: String,

    /// Pagination route segment
    #[arg(long, env = "PAGINATION_URL_ROUTE", default_value = "page/")]
    pub route: String,

    /// Links on each side of the current page
    #[arg(long)]
    pub inner_window: Option<u32>,

    /// Links always shown at each end
    #[arg(long)]
    pub outer_window: Option<u32>,

    /// Markup placed between elements
    #[arg(long)]
    pub separator: Option<String>,

    /// Render only previous and next
    #[arg(long)]
    pub no_page_links: bool,

    /// Blank previous on the first page and next on the last
    #[arg(long)]
    pub hide_endcaps: bool,

    /// Target of the page 1 link
    #[arg(long)]
    pub first_page_url: Option<String>,

    /// Previous link label
    #[arg(long)]
    pub prev_label: Option<String>,

    /// Next link label
    #[arg(long)]
    pub next_label: Option<String>,
}

impl LinksArgs {
    fn options(&self) -> LinkRenderOptions {
        let defaults = LinkRenderOptions::default();
        LinkRenderOptions {
            prev_label: self.prev_label.clone().unwrap_or(defaults.prev_label),
            next_label: self.next_label.clone().unwrap_or(defaults.next_label),
            inner_window: self.inner_window.unwrap_or(defaults.inner_window),
            outer_window: self.outer_window.unwrap_or(defaults.outer_window),
            separator: self.separator.clone().unwrap_or(defaults.separator),
            page_links: !self.no_page_links,
            show_endcap_link: !self.hide_endcaps,
            first_page_url: self.first_page_url.clone(),
            ..defaults
        }
    }
}

/// Rendered controls.
#[derive(Debug, Serialize)]
pub struct LinksOutput {
    pub current_page: u32,
    pub total_pages: u32,
    pub elements: Vec<LinkElement>,
    pub html: String,
}

impl HumanReadable for LinksOutput {
    fn print_human(&self) {
        println!(
            "{} {} of {}",
            "Page".green().bold(),
            self.current_page,
            self.total_pages
        );
        println!("{}", "-".repeat(70));
        for element in &self.elements {
            match element {
                LinkElement::Link { href, text, .. } => {
                    println!("  {} {}", text.bold(), href.dimmed())
                }
                LinkElement::Span { text, .. } => println!("  {}", text.yellow()),
                LinkElement::Gap => println!("  {}", element.text().dimmed()),
            }
        }
        println!();
        println!("{}", self.html);
    }
}

/// Render controls for a synthetic result of `total` single-item pages.
fn render(args: &LinksArgs) -> LinksOutput {
    let result: PaginatedResult<()> =
        PaginatedResult::new(Vec::new(), args.current, 1, u64::from(args.total));
    let renderer = PaginationLinkRenderer::new(
        args.base.clone(),
        RouteSegment::new(args.route.clone()),
        args.options(),
    );
    let elements = renderer.elements(&result);
    let html = folio_core::to_markup(&elements, &renderer.options().separator);
    LinksOutput {
        current_page: result.current_page,
        total_pages: result.total_pages,
        elements,
        html,
    }
}

/// Execute the links command.
pub fn execute(human: bool, args: LinksArgs) -> Result<()> {
    output(&render(&args), human)
}
