//! Per-field decoders.
//!
//! Each extractor looks at one region of an item and returns `None` when its
//! target is missing or undecodable. None of them can fail the record.

use chrono::{DateTime, NaiveDate, Utc};
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::extractor::model::{Creator, normalize_whitespace};

/// Publication dates on the catalog are day-first.
pub const DATE_FORMAT: &str = "%d/%m/%Y";
/// Ratings are out of five.
pub const MAX_RATING: f32 = 5.0;
/// Spans in a legend block: date, rating, downloads, plays, license.
pub const LEGEND_SPAN_COUNT: usize = 5;
/// Marker preceding the license code in a license link.
pub const LICENSE_MARKER: &str = "license=";

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("b").unwrap());
static CREATOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong a[href]").unwrap());
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static DIV_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());
static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static PLAYER_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".mp3player .sm2-playlist-bd a").unwrap());
static LEGEND_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".legenddata").unwrap());
static SPAN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

fn text_of(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

fn not_found<T>(field: &'static str) -> Option<T> {
    debug!(field, "field not found");
    None
}

fn undecodable<T>(field: &'static str, text: &str) -> Option<T> {
    warn!(field, text, "could not decode field");
    None
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Text of the first bold element in the info region.
pub fn title(info: ElementRef<'_>) -> Option<String> {
    let Some(tag) = info.select(&TITLE_SELECTOR).next() else {
        return not_found("title");
    };
    non_empty(&text_of(tag)).or_else(|| not_found("title"))
}

/// Creator name and profile link from the info region.
///
/// The creator link sits inside a `strong`; any first link is the fallback.
pub fn creator(info: ElementRef<'_>) -> Option<Creator> {
    let link = info
        .select(&CREATOR_SELECTOR)
        .next()
        .or_else(|| info.select(&LINK_SELECTOR).next());
    let Some(link) = link else {
        return not_found("artist");
    };

    Some(Creator {
        name: text_of(link),
        profile_url: link.value().attr("href").unwrap_or_default().trim().to_string(),
    })
}

/// Category tags: the spans of the first block in the info region made only
/// of spans. Document order, empty when there is no such block.
pub fn genres(info: ElementRef<'_>) -> Vec<String> {
    let tag_block = info.select(&DIV_SELECTOR).find(|div| {
        let mut children = div.children().filter_map(ElementRef::wrap).peekable();
        children.peek().is_some() && children.all(|child| child.value().name() == "span")
    });

    match tag_block {
        Some(block) => block
            .children()
            .filter_map(ElementRef::wrap)
            .filter_map(|span| non_empty(&text_of(span)))
            .collect(),
        None => {
            debug!(field = "genres", "no tag block");
            Vec::new()
        }
    }
}

/// Source of the first image in the cover region.
pub fn cover_art_url(cover: ElementRef<'_>) -> Option<String> {
    let Some(img) = cover.select(&IMG_SELECTOR).next() else {
        return not_found("cover_art_url");
    };
    let value = img.value();
    value
        .attr("src")
        .or_else(|| value.attr("data-src"))
        .and_then(non_empty)
        .or_else(|| not_found("cover_art_url"))
}

/// Target of the player's playlist link. Looked up from the container's
/// parent since the player is a sibling of the container.
pub fn download_url(parent: ElementRef<'_>) -> Option<String> {
    parent
        .select(&PLAYER_LINK_SELECTOR)
        .next()
        .and_then(|link| link.value().attr("href"))
        .and_then(non_empty)
        .or_else(|| not_found("download_url"))
}

/// The legend block's spans, named by their slot.
#[derive(Debug, Clone, Copy)]
pub struct LegendSlots<'a> {
    pub date: ElementRef<'a>,
    pub rating: ElementRef<'a>,
    pub downloads: ElementRef<'a>,
    pub plays: ElementRef<'a>,
    pub license: ElementRef<'a>,
}

impl<'a> LegendSlots<'a> {
    /// Find the legend next to a container. Only top-level spans count;
    /// spans nested in another span belong to it.
    pub fn find(parent: ElementRef<'a>) -> Option<Self> {
        let Some(legend) = parent.select(&LEGEND_SELECTOR).next() else {
            return not_found("legend");
        };

        let spans: Vec<_> = legend
            .select(&SPAN_SELECTOR)
            .filter(|span| {
                !span
                    .ancestors()
                    .take_while(|node| node.id() != legend.id())
                    .filter_map(ElementRef::wrap)
                    .any(|el| el.value().name() == "span")
            })
            .collect();

        match spans.as_slice() {
            [date, rating, downloads, plays, license] => Some(Self {
                date: *date,
                rating: *rating,
                downloads: *downloads,
                plays: *plays,
                license: *license,
            }),
            _ => {
                warn!(
                    found = spans.len(),
                    expected = LEGEND_SPAN_COUNT,
                    "legend has an unexpected number of spans"
                );
                None
            }
        }
    }
}

pub fn published(span: ElementRef<'_>) -> Option<DateTime<Utc>> {
    let text = text_of(span);
    if text.is_empty() {
        return not_found("published_date");
    }
    parse_date(&text).or_else(|| undecodable("published_date", &text))
}

pub fn rating(span: ElementRef<'_>) -> Option<f32> {
    let text = text_of(span);
    if text.is_empty() {
        return not_found("rating");
    }
    parse_rating(&text).or_else(|| undecodable("rating", &text))
}

pub fn count(span: ElementRef<'_>, field: &'static str) -> Option<u64> {
    let text = text_of(span);
    if text.is_empty() {
        return not_found(field);
    }
    parse_count(&text).or_else(|| undecodable(field, &text))
}

pub fn license(span: ElementRef<'_>) -> Option<String> {
    let Some(href) = span
        .select(&LINK_SELECTOR)
        .next()
        .and_then(|link| link.value().attr("href"))
    else {
        return not_found("license");
    };
    license_from_href(href).or_else(|| undecodable("license", href))
}

/// `02/01/2017` → 2017-01-02T00:00:00Z
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

/// `4,5 / 5` → 4.5
pub fn parse_rating(text: &str) -> Option<f32> {
    let value = text.split('/').next()?.trim().replace(',', ".");
    let rating: f32 = value.parse().ok()?;
    rating.is_finite().then(|| rating.clamp(0.0, MAX_RATING))
}

/// `12 345` → 12345
pub fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    digits.parse().ok()
}

/// `index.php?license=cc-byncnd&page=2` → `cc-byncnd`
pub fn license_from_href(href: &str) -> Option<String> {
    let (_, rest) = href.split_once(LICENSE_MARKER)?;
    let code = rest.split(['&', '#']).next().unwrap_or_default();
    non_empty(code)
}
