//! Translation of caller-facing filter slugs into the catalog's own values.
//!
//! Lookups are case-insensitive. Anything unknown is passed through as given:
//! the catalog ignores filters it does not understand.

/// License codes understood by the catalog.
pub const LICENSES: &[&str] = &[
    "cc-by", "cc-bysa", "cc-bynd", "cc-bync", "cc-byncsa", "cc-byncnd", "cc0", "artlibre",
];

const LICENSE_ALIASES: &[(&str, &str)] = &[
    ("by", "cc-by"),
    ("by-sa", "cc-bysa"),
    ("cc-by-sa", "cc-bysa"),
    ("by-nd", "cc-bynd"),
    ("cc-by-nd", "cc-bynd"),
    ("by-nc", "cc-bync"),
    ("cc-by-nc", "cc-bync"),
    ("by-nc-sa", "cc-byncsa"),
    ("cc-by-nc-sa", "cc-byncsa"),
    ("by-nc-nd", "cc-byncnd"),
    ("cc-by-nc-nd", "cc-byncnd"),
    ("zero", "cc0"),
    ("cc-zero", "cc0"),
    ("public-domain", "cc0"),
    ("lal", "artlibre"),
    ("art-libre", "artlibre"),
    ("free-art", "artlibre"),
];

/// Moods understood by the catalog.
pub const MOODS: &[&str] = &[
    "calm", "sad", "happy", "energetic", "dark", "romantic", "epic", "dreamy",
];

const MOOD_ALIASES: &[(&str, &str)] = &[
    ("calme", "calm"),
    ("relax", "calm"),
    ("triste", "sad"),
    ("melancholic", "sad"),
    ("joyeux", "happy"),
    ("joyeuse", "happy"),
    ("energique", "energetic"),
    ("énergique", "energetic"),
    ("sombre", "dark"),
    ("romantique", "romantic"),
    ("epique", "epic"),
    ("épique", "epic"),
    ("reveur", "dreamy"),
    ("rêveur", "dreamy"),
];

fn translate(value: &str, canonical: &[&'static str], aliases: &[(&str, &'static str)]) -> String {
    let key = value.trim().to_lowercase();

    canonical
        .iter()
        .copied()
        .find(|code| *code == key)
        .or_else(|| {
            aliases
                .iter()
                .find(|(alias, _)| *alias == key)
                .map(|(_, code)| *code)
        })
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

pub fn canonical_license(value: &str) -> String {
    translate(value, LICENSES, LICENSE_ALIASES)
}

pub fn canonical_mood(value: &str) -> String {
    translate(value, MOODS, MOOD_ALIASES)
}
