use url::form_urlencoded;
use utoipa::IntoParams;

use crate::request::{
    errors::NormalizeError,
    filters::{FilterSet, SortMode},
    vocabulary::{canonical_license, canonical_mood},
};

/// Filters accepted as query parameters. Path segments override them.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueryFilters {
    /// Category tag, e.g. `acoustic`.
    pub genre: Option<String>,
    pub mood: Option<String>,
    /// License code or alias, e.g. `cc-by` or `by-nc-nd`.
    pub license: Option<String>,
    /// 1-based page number; anything unparseable means page 1.
    pub page: Option<String>,
}

impl QueryFilters {
    /// Read filters from a raw query string. Unknown keys are ignored and a
    /// repeated key keeps its first value.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut filters = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "genre" => &mut filters.genre,
                "mood" => &mut filters.mood,
                "license" => &mut filters.license,
                "page" => &mut filters.page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        filters
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterKey {
    License,
    Mood,
    Genre,
}

impl FilterKey {
    fn parse(segment: &str) -> Option<Self> {
        match segment {
            "license" => Some(Self::License),
            "mood" => Some(Self::Mood),
            "genre" => Some(Self::Genre),
            _ => None,
        }
    }
}

#[derive(Default)]
struct PathFilters {
    genre: Option<String>,
    mood: Option<String>,
    license: Option<String>,
}

fn decode_segment(segment: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned()
}

fn parse_path_filters(segments: &[String]) -> Result<PathFilters, NormalizeError> {
    if segments.len() % 2 != 0 {
        return Err(NormalizeError::OddSegments(segments.len()));
    }

    let mut filters = PathFilters::default();
    for pair in segments.chunks_exact(2) {
        let (key, value) = (&pair[0], &pair[1]);
        let key = FilterKey::parse(key).ok_or_else(|| NormalizeError::UnknownFilter(key.clone()))?;
        if value.is_empty() {
            return Err(NormalizeError::EmptyValue(pair[0].clone()));
        }

        // A repeated key keeps its last value.
        let slot = match key {
            FilterKey::License => &mut filters.license,
            FilterKey::Mood => &mut filters.mood,
            FilterKey::Genre => &mut filters.genre,
        };
        *slot = Some(value.clone());
    }

    Ok(filters)
}

/// Missing, unparseable and zero pages all mean the first page.
fn parse_page(page: Option<&str>) -> u32 {
    page.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}

/// Build the canonical filter set for a request.
///
/// `path` is the request path, e.g. `/latest/genre/acoustic/mood/calme`. Its
/// first segment picks the sort mode; the rest are key/value filter pairs.
pub fn normalize(path: &str, query: &QueryFilters) -> Result<FilterSet, NormalizeError> {
    let mut segments = path.trim_matches('/').split('/').map(decode_segment);

    let route = segments.next().unwrap_or_default();
    let sort = SortMode::from_route(&route).ok_or(NormalizeError::UnknownRoute(route))?;

    let rest: Vec<String> = segments.collect();
    let from_path = parse_path_filters(&rest)?;

    let genre = from_path.genre.or_else(|| query.genre.clone());
    let mood = from_path.mood.or_else(|| query.mood.clone());
    let license = from_path.license.or_else(|| query.license.clone());

    let mut filters = FilterSet::new(sort).with_page(parse_page(query.page.as_deref()));
    if let Some(genre) = genre {
        filters = filters.with_genre(genre.trim());
    }
    if let Some(mood) = mood {
        filters = filters.with_mood(canonical_mood(mood.trim()));
    }
    if let Some(license) = license {
        filters = filters.with_license(canonical_license(license.trim()));
    }

    Ok(filters)
}
