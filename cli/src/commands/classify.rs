//! CLASSIFY command - Classify an address against a page address.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_core::{AddressForm, AddressMatch, AddressMatcher, RouteSegment};
use serde::Serialize;

use super::{HumanReadable, output};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Incoming address
    pub address: String,

    /// Canonical address of the page to classify against
    #[arg(long)]
    pub base: String,

    /// Pagination route segment
    #[arg(long, env = "PAGINATION_URL_ROUTE", default_value = "page/")]
    pub route: String,

    /// Treat the address as a flat url (archive addresses never match)
    #[arg(long)]
    pub url_form: bool,
}

/// Classification of one address.
#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    pub address: String,
    pub base: String,
    pub form: AddressForm,
    #[serde(rename = "match")]
    pub matched: AddressMatch,
}

impl HumanReadable for ClassifyOutput {
    fn print_human(&self) {
        println!("{} {}", "Address:".cyan(), self.address);
        println!("{} {}", "Page:".cyan(), self.base);
        match self.matched {
            AddressMatch::Canonical => println!("{}", "canonical".green().bold()),
            AddressMatch::PaginatedSelf { page_number } => {
                println!("{} page {}", "paginated".green().bold(), page_number)
            }
            AddressMatch::PaginatedArchive {
                page_number,
                archive,
            } => {
                let month = archive.month.map_or("--".to_string(), |m| format!("{m:02}"));
                let day = archive.day.map_or("--".to_string(), |d| format!("{d:02}"));
                println!(
                    "{} {}-{}-{} page {}",
                    "archive".green().bold(),
                    archive.year,
                    month,
                    day,
                    page_number
                );
            }
        }
    }
}

fn classify(args: &ClassifyArgs) -> ClassifyOutput {
    let matcher = AddressMatcher::new(RouteSegment::new(args.route.clone()));
    let form = if args.url_form {
        AddressForm::Url
    } else {
        AddressForm::Path
    };
    ClassifyOutput {
        address: args.address.clone(),
        base: args.base.clone(),
        form,
        matched: matcher.classify_as(&args.address, &args.base, form),
    }
}

/// Execute the classify command.
pub fn execute(human: bool, args: ClassifyArgs) -> Result<()> {
    output(&classify(&args), human)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(address: &str, url_form: bool) -> ClassifyArgs {
        ClassifyArgs {
            address: address.into(),
            base: "/blog/".into(),
            route: "page/".into(),
            url_form,
        }
    }

    #[test]
    fn archive_addresses_depend_on_form() {
        let path = classify(&args("/blog/2008/01/page/2/", false));
        assert_eq!(path.matched.page_number(), Some(2));

        let url = classify(&args("/blog/2008/01/page/2/", true));
        assert_eq!(url.matched, AddressMatch::Canonical);
    }

    #[test]
    fn output_serializes_match_kind() {
        let json = serde_json::to_value(classify(&args("/blog/page/3/", false))).unwrap();
        assert_eq!(json["match"]["kind"], "paginated_self");
        assert_eq!(json["form"], "path");
    }
}
