//! A small blog tree shared by the store tests.

use chrono::{Duration, TimeZone, Utc};
use folio_core::{FieldValue, Page, PageId, PageStatus};

use crate::memory::MemoryPageStore;

pub const ROOT: PageId = PageId::new(1);
pub const BLOG: PageId = PageId::new(2);
pub const ABOUT: PageId = PageId::new(3);
pub const FIRST_POST: i64 = 100;
pub const POST_COUNT: u64 = 25;

/// `/`, `/about/` and `/blog/` with 25 published posts, one unpublished
/// draft and one virtual page. Posts are published a day apart in id order;
/// the first post carries a `sticky` part.
pub fn blog() -> MemoryPageStore {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let mut pages = vec![
        Page::builder(ROOT, "/").title("Home").build(),
        Page::builder(ABOUT, "/about/").parent(ROOT).title("About").build(),
        Page::builder(BLOG, "/blog/")
            .parent(ROOT)
            .title("Blog")
            .field("rank", FieldValue::Integer(0))
            .build(),
    ];

    for i in 0..POST_COUNT as i64 {
        let id = FIRST_POST + i;
        let mut post = Page::builder(id, format!("/blog/post-{id}/"))
            .parent(BLOG)
            .title(format!("Post {id}"))
            .slug(format!("post-{id}"))
            .published_at(Some(base + Duration::days(i)))
            .field("rank", FieldValue::Integer(POST_COUNT as i64 - i))
            .part("body", format!("Body of post {id}"));
        if i == 0 {
            post = post.part("sticky", "pinned");
        }
        pages.push(post.build());
    }

    pages.push(
        Page::builder(200, "/blog/unfinished/")
            .parent(BLOG)
            .status(PageStatus::Draft)
            .build(),
    );
    pages.push(
        Page::builder(201, "/blog/feed/")
            .parent(BLOG)
            .is_virtual(true)
            .build(),
    );

    MemoryPageStore::from_pages(pages)
}
