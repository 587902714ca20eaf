use url::Url;

/// Listing order offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortMode {
    Newest,
    TopRated,
    MostDownloaded,
    MostPlayed,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Newest,
        SortMode::TopRated,
        SortMode::MostDownloaded,
        SortMode::MostPlayed,
    ];

    /// First path segment of the API route serving this order.
    pub fn route(self) -> &'static str {
        match self {
            SortMode::Newest => "latest",
            SortMode::TopRated => "best",
            SortMode::MostDownloaded => "downloads",
            SortMode::MostPlayed => "plays",
        }
    }

    pub fn from_route(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.route() == segment)
    }

    /// Value of the catalog's `sort` query parameter.
    pub fn upstream_code(self) -> &'static str {
        match self {
            SortMode::Newest => "posted",
            SortMode::TopRated => "note",
            SortMode::MostDownloaded => "countweb",
            SortMode::MostPlayed => "countfla",
        }
    }
}

/// Canonical, request-scoped listing criteria.
///
/// Empty strings are not meaningful filters; [`FilterSet::new`] and the
/// setters fold them into `None` so equal requests compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterSet {
    pub sort: SortMode,
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub license: Option<String>,
    /// 1-based.
    pub page: u32,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FilterSet {
    pub fn new(sort: SortMode) -> Self {
        Self {
            sort,
            genre: None,
            mood: None,
            license: None,
            page: 1,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = present(Some(genre.into()));
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = present(Some(mood.into()));
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = present(Some(license.into()));
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Deterministic cache key. Fields always appear in the same order and
    /// values are percent-encoded, so no value can imitate a separator.
    /// `None` and `Some("")` share a key; both mean "no filter".
    pub fn cache_key(&self) -> String {
        fn encoded(value: &Option<String>) -> String {
            value
                .as_deref()
                .map(|v| urlencoding::encode(v).into_owned())
                .unwrap_or_default()
        }

        format!(
            "sort={}&genre={}&mood={}&license={}&page={}",
            self.sort.upstream_code(),
            encoded(&self.genre),
            encoded(&self.mood),
            encoded(&self.license),
            self.page
        )
    }

    /// The catalog page holding this listing.
    pub fn upstream_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("sort", self.sort.upstream_code());
            if let Some(license) = present(self.license.clone()) {
                query.append_pair("license", &license);
            }
            if let Some(mood) = present(self.mood.clone()) {
                query.append_pair("mood", &mood);
            }
            if let Some(genre) = present(self.genre.clone()) {
                query.append_pair("tag", &genre);
            }
            query.append_pair("page", &self.page.to_string());
        }
        url
    }
}
