//! Markup parsers for the investing.com news pages.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Indexing** ([`listing`]): discover article links and their displayed
//!    titles on the latest-news listing page
//! 2. **Extraction** ([`article`]): turn one article page into an
//!    [`ArticleRecord`](crate::models::ArticleRecord)
//!
//! Both phases are synchronous functions over already-fetched markup; the
//! network side lives in [`crate::http`].

pub mod article;
pub mod listing;
