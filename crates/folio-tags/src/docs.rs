//! Usage documentation for each pagination tag.

use serde::Serialize;

/// Documentation for one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagDoc {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
}

/// Every tag, outermost first.
pub const TAGS: &[TagDoc] = &[
    TagDoc {
        name: "paginate",
        summary: "Wrapper for pagination content. `paginate:each` and `paginate:pages` \
                  must be nested inside.",
        usage: r#"<r:paginate [per_page="10"] [order="asc|desc"] [by="attribute"]
            [excludes="part-name[,part-name]"] [level="1|2"] [url="/page/"] [page="n"]>
  ...
  <r:each>...</r:each>
  ...
  <r:pages />
</r:paginate>"#,
    },
    TagDoc {
        name: "paginate:each",
        summary: "Renders its content once for each page in the current window. \
                  Must be placed inside `paginate`.",
        usage: r#"<r:paginate>
  <r:each>
    <r:link />
  </r:each>
</r:paginate>"#,
    },
    TagDoc {
        name: "paginate:each:if_first",
        summary: "Expands when this is the first page of the window in `paginate:each`.",
        usage: r#"<r:each><r:if_first>...</r:if_first></r:each>"#,
    },
    TagDoc {
        name: "paginate:each:unless_first",
        summary: "Expands unless this is the first page of the window in `paginate:each`.",
        usage: r#"<r:each><r:unless_first>...</r:unless_first></r:each>"#,
    },
    TagDoc {
        name: "paginate:pages",
        summary: "Renders pagination controls. Optional attributes: id, class (accepted, \
                  no container is rendered), prev_label (default \"« Previous\"), next_label \
                  (default \"Next »\"), inner_window (links around the current page, default 4), \
                  outer_window (links at each end, default 1), separator (default single space), \
                  page_links (false renders only previous/next), show_endcap_link (false blanks \
                  previous on the first page and next on the last), first_page_url (target of \
                  the page 1 link).",
        usage: r#"<r:paginate>
  <r:pages [id=""] [class="pagination"]
    [prev_label="&laquo; Previous"] [next_label="Next &raquo;"]
    [inner_window="4"] [outer_window="1"]
    [separator=" "] [page_links="true"]
    [show_endcap_link="true"] [first_page_url=""] />
</r:paginate>"#,
    },
];

/// Looks up a tag by its full name.
pub fn describe(name: &str) -> Option<&'static TagDoc> {
    TAGS.iter().find(|doc| doc.name == name)
}
