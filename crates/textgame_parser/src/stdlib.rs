//! Default vocabulary.

/// Canonical affirmative answer.
pub const YES: &str = "yes";

/// Canonical negative answer.
pub const NO: &str = "no";

/// Default verb synonyms, `word → [synonyms]`.
pub const VERB_SYNONYMS: &[(&str, &[&str])] = &[
    ("go", &["enter", "walk"]),
    ("take", &["grab", "get"]),
    ("listen", &["hear"]),
    ("fight", &["kill", "attack"]),
    ("close", &["lock"]),
    ("north", &["n"]),
    ("east", &["e"]),
    ("south", &["s"]),
    ("west", &["w"]),
    ("up", &["u"]),
    ("down", &["d"]),
];

/// Default noun synonyms, `word → [synonyms]`.
pub const NOUN_SYNONYMS: &[(&str, &[&str])] = &[
    ("north", &["n"]),
    ("east", &["e"]),
    ("south", &["s"]),
    ("west", &["w"]),
    ("up", &["u"]),
    ("down", &["d"]),
    (YES, &["y"]),
];
