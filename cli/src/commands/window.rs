//! WINDOW command - Fetch the paginated window of a page.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use folio_core::AddressMatch;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, format_timestamp, make_request, output};

/// Arguments for the window command.
#[derive(Args)]
pub struct WindowArgs {
    /// Address to render, e.g. /blog/ or /blog/page/2/
    pub path: String,

    /// Items per page
    #[arg(long)]
    pub per_page: Option<String>,

    /// Field to order by (default: published_at)
    #[arg(long)]
    pub by: Option<String>,

    /// Order direction: asc or desc
    #[arg(long)]
    pub order: Option<String>,

    /// Comma-separated part names; pages having any are left out
    #[arg(long)]
    pub excludes: Option<String>,

    /// 1 for children, 2 for grandchildren
    #[arg(long)]
    pub level: Option<String>,

    /// Paginate the children of this page instead
    #[arg(long = "page-url")]
    pub page_url: Option<String>,

    /// Explicit page number, overriding the address
    #[arg(long)]
    pub page: Option<String>,
}

impl WindowArgs {
    fn query(&self) -> Vec<(&'static str, &str)> {
        [
            ("per_page", &self.per_page),
            ("by", &self.by),
            ("order", &self.order),
            ("excludes", &self.excludes),
            ("level", &self.level),
            ("url", &self.page_url),
            ("page", &self.page),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .chain(std::iter::once(("path", self.path.as_str())))
        .collect()
    }
}

/// A page as listed in the window.
#[derive(Debug, Deserialize, Serialize)]
pub struct PageSummary {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Response from the window endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct WindowResponse {
    pub page: PageSummary,
    pub address_match: AddressMatch,
    pub current_page: u32,
    pub requested_page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
    pub items: Vec<PageSummary>,
    pub pagination_html: String,
}

impl HumanReadable for WindowResponse {
    fn print_human(&self) {
        println!("{} {}", self.page.title.green().bold(), self.page.url.dimmed());
        println!("{}", "=".repeat(70));

        let matched = match self.address_match {
            AddressMatch::Canonical => "canonical".to_string(),
            AddressMatch::PaginatedSelf { page_number } => format!("paginated, page {page_number}"),
            AddressMatch::PaginatedArchive {
                page_number,
                archive,
            } => format!("archive {}, page {page_number}", archive.year),
        };
        println!("  {} {}", "Address:".cyan(), matched);
        println!(
            "  {} {} of {} ({} items, {} per page)",
            "Page:".cyan(),
            self.current_page,
            self.total_pages,
            self.total_items,
            self.per_page
        );
        if self.requested_page != self.current_page {
            println!(
                "  {} page {} is out of range",
                "Note:".yellow(),
                self.requested_page
            );
        }
        println!();

        for item in &self.items {
            let when = item
                .published_at
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_else(|| "-".to_string());
            println!("  {} {}  {}", ">>".blue().bold(), item.title.bold(), when.dimmed());
            println!("     {}", item.url);
        }
        if self.items.is_empty() {
            println!("  {}", "(No pages in this window)".dimmed());
        }

        println!();
        let prev = self.previous_page.map_or("-".to_string(), |n| n.to_string());
        let next = self.next_page.map_or("-".to_string(), |n| n.to_string());
        println!("  {} {}  {} {}", "Previous:".dimmed(), prev, "Next:".dimmed(), next);
    }
}

/// Execute the window command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: WindowArgs,
) -> Result<()> {
    let url = format!("{}/api/window", base_url.trim_end_matches('/'));
    let request = client.get(&url).query(&args.query());

    let response: WindowResponse = make_request(request).await?;

    output(&response, human)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_carries_only_given_attributes() {
        let args = WindowArgs {
            path: "/blog/page/2/".into(),
            per_page: Some("5".into()),
            by: None,
            order: Some("desc".into()),
            excludes: None,
            level: None,
            page_url: Some("/news/".into()),
            page: None,
        };
        assert_eq!(
            args.query(),
            vec![
                ("per_page", "5"),
                ("order", "desc"),
                ("url", "/news/"),
                ("path", "/blog/page/2/"),
            ]
        );
    }

    #[test]
    fn response_decodes_server_json() {
        let json = r#"{
            "page": {"id": 2, "title": "Blog", "url": "/blog/"},
            "address_match": {"kind": "paginated_self", "page_number": 2},
            "current_page": 2, "requested_page": 2, "per_page": 3,
            "total_pages": 4, "total_items": 12,
            "previous_page": 1, "next_page": 3,
            "items": [{"id": 104, "title": "Post 4", "url": "/blog/post-4/",
                       "published_at": "2024-06-05T09:00:00Z"}],
            "pagination_html": "<span class=\"current\">2</span>"
        }"#;
        let response: WindowResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.address_match.page_number(), Some(2));
        assert_eq!(response.items[0].title, "Post 4");
        assert!(response.items[0].published_at.is_some());
    }
}
