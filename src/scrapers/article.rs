//! Article page extraction.
//!
//! Article markup on investing.com is not uniform: templates differ between
//! sections and over time. Each field is therefore resolved through an
//! ordered list of independent strategies, tried in turn until one yields a
//! value:
//!
//! | Field | Strategies, in order | Fallback |
//! |-------|----------------------|----------|
//! | headline | first `h1`, first `h1` with a `text-*` class | `"Unknown headline"` |
//! | category | last breadcrumb, URL path, first news link in `nav` | `"Unknown Category"` |
//! | body | `#article p`, then the first matching content selector | empty string |
//!
//! A category of `"news"` is too generic to keep, so the category chain
//! keeps going past it.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use crate::models::ArticleRecord;
use crate::utils::{title_case, truncate_for_log, utc_timestamp};

pub const UNKNOWN_HEADLINE: &str = "Unknown headline";
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Paragraphs this short or shorter are dropped from the body.
const MIN_PARAGRAPH_CHARS: usize = 20;

type HeadlineStrategy = fn(&Html) -> Option<String>;
type CategoryStrategy = fn(&Html, &str) -> Option<String>;

const HEADLINE_STRATEGIES: &[(&str, HeadlineStrategy)] = &[
    ("h1", headline_from_h1),
    ("styled h1", headline_from_styled_h1),
];

const CATEGORY_STRATEGIES: &[(&str, CategoryStrategy)] = &[
    ("breadcrumbs", category_from_breadcrumbs),
    ("url path", category_from_url_path),
    ("nav", category_from_nav),
];

static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static STYLED_H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h1[class*="text-"]"#).unwrap());
static BREADCRUMB_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.breadcrumbs").unwrap());
static NAV_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("nav a").unwrap());
static ARTICLE_CONTAINER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#article").unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

static BODY_SELECTORS: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    [
        "div.articlePage p",
        "div.WYSIWYG p",
        "div.articleText p",
        "div.content-section p",
        "article p",
        "p",
    ]
    .into_iter()
    .map(|css| (css, Selector::parse(css).unwrap()))
    .collect()
});

/// Visible text of `element` with every whitespace run, newlines and
/// indentation included, collapsed to a single space.
fn collapsed_text(element: ElementRef) -> String {
    element.text().collect::<String>().split_whitespace().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// Text of the first `h1`.
///
/// A first `h1` with no visible text yields no result rather than an empty
/// headline, so a later `text-*` styled `h1` can still supply one.
fn headline_from_h1(document: &Html) -> Option<String> {
    document
        .select(&H1_SELECTOR)
        .next()
        .and_then(|h1| non_empty(collapsed_text(h1)))
}

fn headline_from_styled_h1(document: &Html) -> Option<String> {
    document
        .select(&STYLED_H1_SELECTOR)
        .next()
        .and_then(|h1| non_empty(collapsed_text(h1)))
}

/// Text of the last breadcrumb link, even when blank.
fn category_from_breadcrumbs(document: &Html, _url: &str) -> Option<String> {
    document.select(&BREADCRUMB_SELECTOR).last().map(collapsed_text)
}

fn category_from_url_path(_document: &Html, url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if segments.len() < 2 {
        return None;
    }

    if path.contains("economy-news") {
        return Some("Economy".to_string());
    }
    match segments[1] {
        "" | "news" => None,
        segment => Some(title_case(&segment.replace('-', " "))),
    }
}

fn category_from_nav(document: &Html, _url: &str) -> Option<String> {
    document.select(&NAV_LINK_SELECTOR).find_map(|link| {
        let href = link.value().attr("href").unwrap_or_default();
        if !href.to_lowercase().contains("news") {
            return None;
        }
        non_empty(collapsed_text(link))
    })
}

/// Whether the category chain should try its next strategy.
fn category_unresolved(category: &str) -> bool {
    category == UNKNOWN_CATEGORY || category.eq_ignore_ascii_case("news")
}

/// Join candidate body paragraphs into the article text.
///
/// The last paragraph is always dropped. On article pages it is usually a
/// trailing attribution or disclaimer, but this is a heuristic and will
/// occasionally discard real content. Of the rest, paragraphs whose trimmed
/// text is 20 characters or shorter are discarded.
pub fn join_body(paragraphs: &[String]) -> String {
    let Some((_, kept)) = paragraphs.split_last() else {
        return String::new();
    };
    kept.iter()
        .map(|p| p.trim())
        .filter(|p| p.chars().count() > MIN_PARAGRAPH_CHARS)
        .join(" ")
}

/// Turns article markup into an [`ArticleRecord`].
///
/// With `debug` set, every strategy decision is traced at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleExtractor {
    debug: bool,
}

impl ArticleExtractor {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Extract all fields from `html`, fetched from `url`.
    ///
    /// # Arguments
    ///
    /// * `html` - Article page markup
    /// * `url` - Address the page was fetched from; feeds the URL-path
    ///   category strategy and becomes the record's key
    ///
    /// # Returns
    ///
    /// A complete [`ArticleRecord`] stamped with the current UTC time. Never
    /// fails: fields whose strategies all miss fall back to their sentinel
    /// (headline, category) or to an empty string (body).
    #[instrument(level = "debug", skip_all, fields(%url))]
    pub fn extract(&self, html: &str, url: &str) -> ArticleRecord {
        let document = Html::parse_document(html);
        ArticleRecord {
            headline: self.headline(&document),
            category: self.category(&document, url),
            full_text: self.full_text(&document),
            url: url.to_string(),
            scraped_at: utc_timestamp(),
        }
    }

    fn headline(&self, document: &Html) -> String {
        for (name, strategy) in HEADLINE_STRATEGIES {
            if let Some(headline) = strategy(document) {
                if self.debug {
                    debug!(strategy = name, %headline, "Found headline");
                }
                return headline;
            }
        }
        if self.debug {
            debug!("No headline found");
        }
        UNKNOWN_HEADLINE.to_string()
    }

    fn category(&self, document: &Html, url: &str) -> String {
        let mut category = UNKNOWN_CATEGORY.to_string();
        for (name, strategy) in CATEGORY_STRATEGIES {
            if !category_unresolved(&category) {
                break;
            }
            if let Some(found) = strategy(document, url) {
                if self.debug {
                    debug!(strategy = name, category = %found, "Found category");
                }
                category = found;
            }
        }
        category
    }

    fn body_paragraphs(&self, document: &Html) -> Vec<String> {
        if let Some(container) = document.select(&ARTICLE_CONTAINER_SELECTOR).next() {
            let paragraphs: Vec<String> = container
                .select(&PARAGRAPH_SELECTOR)
                .map(collapsed_text)
                .collect();
            if self.debug {
                debug!(count = paragraphs.len(), "Found paragraphs inside #article container");
            }
            return paragraphs;
        }

        for (css, selector) in BODY_SELECTORS.iter() {
            let paragraphs: Vec<String> = document.select(selector).map(collapsed_text).collect();
            if !paragraphs.is_empty() {
                if self.debug {
                    debug!(count = paragraphs.len(), selector = css, "Found paragraphs");
                }
                return paragraphs;
            }
        }
        Vec::new()
    }

    fn full_text(&self, document: &Html) -> String {
        let text = join_body(&self.body_paragraphs(document));
        if self.debug {
            debug!(
                chars = text.chars().count(),
                preview = %truncate_for_log(&text, 120),
                "Assembled article body"
            );
        }
        text
    }
}
