//! Latest-news listing page indexer.
//!
//! Article cards on the listing are `li` elements styled with a fixed set of
//! utility classes. Each card links to one article; relative links are
//! resolved against the site origin.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use crate::models::ListingCandidate;

/// Class tokens every article card carries.
const CARD_CLASSES: &[&str] = &[
    "flex",
    "items-center",
    "!mt-0",
    "border-t",
    "border-solid",
    "border-[#E6E9EB]",
    "py-6",
];

static LI_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

fn is_article_card(element: &ElementRef) -> bool {
    let classes: Vec<&str> = element.value().classes().collect();
    CARD_CLASSES.iter().all(|c| classes.contains(c))
}

fn candidate_from_card(card: ElementRef, base: &Url) -> Option<ListingCandidate> {
    let anchor = card.select(&ANCHOR_SELECTOR).find(|a| {
        a.value()
            .attr("href")
            .is_some_and(|href| !href.trim().is_empty())
    })?;
    let href = anchor.value().attr("href")?.trim();
    let url = base.join(href).ok()?;

    let title = anchor.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        return None;
    }
    Some(ListingCandidate {
        url: url.to_string(),
        title,
    })
}

/// Extract article candidates from listing markup, in page order.
///
/// # Arguments
///
/// * `html` - Markup of the latest-news listing page
/// * `base` - Origin that relative card links are resolved against
///
/// # Returns
///
/// One [`ListingCandidate`] per article card. Cards without a usable link or
/// with an empty title are dropped, and duplicates are kept.
#[instrument(level = "info", skip_all, fields(%base))]
pub fn parse_listing(html: &str, base: &Url) -> Vec<ListingCandidate> {
    let document = Html::parse_document(html);
    let mut cards = 0usize;
    let candidates: Vec<ListingCandidate> = document
        .select(&LI_SELECTOR)
        .filter(is_article_card)
        .inspect(|_| cards += 1)
        .filter_map(|card| candidate_from_card(card, base))
        .collect();

    info!(
        cards,
        candidates = candidates.len(),
        "Indexed listing page"
    );
    let urls: Vec<&str> = candidates.iter().map(|c| c.url.as_str()).collect();
    debug!(?urls, "Listing URLs");
    candidates
}
