//! Finds the repeated item containers on a listing page.
//!
//! A container is recognised by its structural signature rather than by its
//! position in the tree: a `div` carrying [`MARKER_CLASS`] that holds exactly
//! one info region and one cover region. The player and the legend that
//! belong to an item are siblings of the container, so they are reached
//! through its parent.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::warn;

use crate::extractor::errors::ExtractError;

/// Class token marking one listed item.
pub const MARKER_CLASS: &str = "audio-wrapper";
/// Region holding title, creator and tags.
pub const INFO_REGION_CLASS: &str = "pure-u-2-3";
/// Region holding the cover image.
pub const COVER_REGION_CLASS: &str = "pure-u-1-3";
/// Number of distinguishable content regions a container must hold.
pub const EXPECTED_CONTENT_REGIONS: usize = 2;

static MARKER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("div.{MARKER_CLASS}")).unwrap());
static INFO_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("div.{INFO_REGION_CLASS}")).unwrap());
static COVER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("div.{COVER_REGION_CLASS}")).unwrap());
static REGION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("div.{INFO_REGION_CLASS}, div.{COVER_REGION_CLASS}")).unwrap()
});

/// One item container and the named regions the field extractors work on.
#[derive(Debug, Clone, Copy)]
pub struct ItemContainer<'a> {
    pub node: ElementRef<'a>,
    pub info: ElementRef<'a>,
    pub cover: ElementRef<'a>,
    /// Holds the sibling player and legend blocks.
    pub parent: ElementRef<'a>,
}

impl<'a> ItemContainer<'a> {
    /// Check the structural signature of a marker node.
    pub fn from_marker(node: ElementRef<'a>) -> Option<Self> {
        let parent = node.parent().and_then(ElementRef::wrap)?;

        if node.select(&REGION_SELECTOR).count() != EXPECTED_CONTENT_REGIONS {
            return None;
        }

        let info = node.select(&INFO_SELECTOR).next()?;
        let cover = node.select(&COVER_SELECTOR).next()?;
        if info.id() == cover.id() {
            return None;
        }

        Some(Self {
            node,
            info,
            cover,
            parent,
        })
    }
}

/// Locate every item container in `document`.
///
/// A page without any marker is a valid empty listing. A page with markers
/// where none has the expected shape means the markup drifted, which is an
/// error.
pub fn locate(document: &Html) -> Result<Vec<ItemContainer<'_>>, ExtractError> {
    let markers: Vec<_> = document.select(&MARKER_SELECTOR).collect();
    let candidates = markers.len();

    let containers: Vec<_> = markers
        .into_iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let container = ItemContainer::from_marker(node);
            if container.is_none() {
                warn!(index, "skipping item container with unexpected structure");
            }
            container
        })
        .collect();

    if candidates > 0 && containers.is_empty() {
        return Err(ExtractError::Structure { candidates });
    }

    Ok(containers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(inner: &str) -> String {
        format!(r#"<div class="audio-item"><div class="audio-wrapper pure-g">{inner}</div></div>"#)
    }

    const REGIONS: &str = r#"<div class="pure-u-1-3"><img src="a.jpg"></div><div class="pure-u-2-3"><b>T</b></div>"#;

    #[test]
    fn test_locates_every_well_formed_container() {
        let html = format!("<html><body>{}{}</body></html>", item(REGIONS), item(REGIONS));
        let document = Html::parse_document(&html);

        let containers = locate(&document).unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].parent.value().attr("class"), Some("audio-item"));
    }

    #[test]
    fn test_page_without_markers_is_empty_not_an_error() {
        let document = Html::parse_document("<html><body><p>Aucun résultat</p></body></html>");
        assert!(locate(&document).unwrap().is_empty());
    }

    #[test]
    fn test_marker_substring_is_not_a_marker() {
        let html = item(REGIONS).replace("audio-wrapper", "audio-wrapper-old");
        let document = Html::parse_document(&html);
        assert!(locate(&document).unwrap().is_empty());
    }

    #[test]
    fn test_all_containers_drifted_is_an_error() {
        let html = item(r#"<div class="pure-u-1-1"><b>T</b></div>"#);
        let document = Html::parse_document(&html);

        match locate(&document) {
            Err(ExtractError::Structure { candidates }) => assert_eq!(candidates, 1),
            other => panic!("expected structure error, got {other:?}"),
        }
    }

    #[test]
    fn test_drifted_container_is_skipped_among_good_ones() {
        let duplicated = format!("{REGIONS}{REGIONS}");
        let html = format!("{}{}", item(REGIONS), item(&duplicated));
        let document = Html::parse_document(&html);

        assert_eq!(locate(&document).unwrap().len(), 1);
    }

    #[test]
    fn test_regions_must_be_one_info_and_one_cover() {
        let two_infos = r#"<div class="pure-u-2-3"><b>A</b></div><div class="pure-u-2-3"><b>B</b></div>"#;
        let shared = r#"<div class="pure-u-1-3 pure-u-2-3"><b>A</b></div><div class="pure-u-1-3"></div>"#;
        let html = format!("{}{}{}", item(two_infos), item(shared), item(REGIONS));
        let document = Html::parse_document(&html);

        let containers = locate(&document).unwrap();
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].info.value().attr("class"), Some("pure-u-2-3"));
    }
}
