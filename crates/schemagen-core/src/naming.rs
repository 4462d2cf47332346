//! Naming rules: case conversion, inflection and suffix stripping.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `following_user_id` | [`humanize`] | `FollowingUserId` |
//! | `FollowingUserId` | [`strip_conventional_suffix`] | `FollowingUser` |
//! | `TaskDependency` | [`Inflector::pluralize`] | `TaskDependencies` |
//! | `TaskResults` | [`Inflector::singularize`] | `TaskResult` |
//!
//! Everything here is deterministic: identical input always yields identical
//! output, so generated files can be cached and diffed.

use crate::config::InflectionConfig;
use std::collections::{BTreeMap, BTreeSet};

/// Convert a schema identifier to a PascalCase token.
///
/// Words are split on any non-alphanumeric character and on case boundaries,
/// then each word is capitalized. A leading digit is prefixed with `_` so the
/// result is always a valid identifier.
///
/// # Examples
///
/// ```
/// use schemagen_core::naming::humanize;
///
/// assert_eq!(humanize("following_user_id"), "FollowingUserId");
/// assert_eq!(humanize("order items"), "OrderItems");
/// assert_eq!(humanize("TaskResults"), "TaskResults");
/// ```
pub fn humanize(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len());

    for word in split_words(identifier) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(&chars.as_str().to_lowercase());
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    result
}

/// Split an identifier into words on separators and case boundaries.
fn split_words(identifier: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = identifier.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(pos, c)) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if let Some(s) = start.take() {
                words.push(&identifier[s..pos]);
            }
            continue;
        }

        let Some(s) = start else {
            start = Some(pos);
            continue;
        };

        // start is only set after an alphanumeric character, so i > 0 here
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_lowercase());
        let boundary = c.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower));

        if boundary {
            words.push(&identifier[s..pos]);
            start = Some(pos);
        }
    }

    if let Some(s) = start {
        words.push(&identifier[s..]);
    }

    words
}

/// Remove a trailing `Id`, `Fk` or `Pk` (case-insensitive) when the token is
/// longer than two characters.
///
/// # Examples
///
/// ```
/// use schemagen_core::naming::strip_conventional_suffix;
///
/// assert_eq!(strip_conventional_suffix("UserId"), "User");
/// assert_eq!(strip_conventional_suffix("ParentFK"), "Parent");
/// assert_eq!(strip_conventional_suffix("Id"), "Id");
/// ```
pub fn strip_conventional_suffix(token: &str) -> String {
    const SUFFIXES: [&str; 3] = ["id", "fk", "pk"];

    if token.chars().count() > 2 {
        let lower = token.to_ascii_lowercase();
        if SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
            // the suffix is two ASCII bytes, so this is a char boundary
            return token[..token.len() - 2].to_string();
        }
    }

    token.to_string()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Inflection and suffix-stripping rules used to derive entity and
/// navigation names.
///
/// Implement this to plug in naming conventions for another language; the
/// classification and emission logic only ever goes through this trait.
pub trait Inflector: Send + Sync {
    /// Singular form of a (possibly compound PascalCase) word.
    fn singularize(&self, word: &str) -> String;

    /// Plural form of a singular (possibly compound PascalCase) word.
    fn pluralize(&self, word: &str) -> String;

    /// Recover a semantic qualifier from a foreign-key token.
    fn strip_conventional_suffix(&self, token: &str) -> String {
        strip_conventional_suffix(token)
    }
}

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("ox", "oxen"),
    ("criterion", "criteria"),
    ("leaf", "leaves"),
    ("loaf", "loaves"),
    ("wolf", "wolves"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("life", "lives"),
    ("thief", "thieves"),
    ("calf", "calves"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("echo", "echoes"),
    ("movie", "movies"),
    ("cookie", "cookies"),
    ("zombie", "zombies"),
    ("cache", "caches"),
    ("quiz", "quizzes"),
];

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
    "data",
    "metadata",
    "feedback",
    "software",
    "hardware",
    "staff",
    "audio",
    "media",
];

/// Whole-word endings whose plural is not a plain suffix rule.
const PLURAL_ENDINGS: &[(&str, &str)] = &[
    ("status", "statuses"),
    ("alias", "aliases"),
    ("campus", "campuses"),
    ("virus", "viruses"),
    ("census", "censuses"),
    ("bus", "buses"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("index", "indices"),
    ("appendix", "appendices"),
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("thesis", "theses"),
    ("diagnosis", "diagnoses"),
    ("synopsis", "synopses"),
    ("parenthesis", "parentheses"),
];

/// English inflection rules with an overridable exception table.
#[derive(Debug, Clone)]
pub struct EnglishInflector {
    /// singular → plural
    plurals: BTreeMap<String, String>,
    /// plural → singular
    singulars: BTreeMap<String, String>,
    uncountable: BTreeSet<String>,
}

impl EnglishInflector {
    /// Create an inflector with the built-in English exception tables.
    pub fn new() -> Self {
        let mut inflector = Self {
            plurals: BTreeMap::new(),
            singulars: BTreeMap::new(),
            uncountable: UNCOUNTABLE.iter().map(|w| (*w).to_string()).collect(),
        };
        for (singular, plural) in IRREGULAR {
            inflector.insert_irregular(singular, plural);
        }
        inflector
    }

    /// Create an inflector with configured exceptions layered over the defaults.
    pub fn from_config(config: &InflectionConfig) -> Self {
        let mut inflector = Self::new();
        for (singular, plural) in &config.irregular {
            inflector.insert_irregular(singular, plural);
        }
        for word in &config.uncountable {
            inflector.uncountable.insert(word.to_lowercase());
        }
        inflector
    }

    /// Add or replace an irregular singular/plural pair.
    pub fn with_irregular(mut self, singular: &str, plural: &str) -> Self {
        self.insert_irregular(singular, plural);
        self
    }

    /// Mark a word as having the same singular and plural form.
    pub fn with_uncountable(mut self, word: &str) -> Self {
        self.uncountable.insert(word.to_lowercase());
        self
    }

    fn insert_irregular(&mut self, singular: &str, plural: &str) {
        let singular = singular.to_lowercase();
        let plural = plural.to_lowercase();
        self.plurals.insert(singular.clone(), plural.clone());
        self.singulars.insert(plural, singular);
    }

    fn pluralize_word(&self, word: &str) -> String {
        if self.uncountable.contains(word) {
            return word.to_string();
        }
        if let Some(plural) = self.plurals.get(word) {
            return plural.clone();
        }
        for (ending, plural) in PLURAL_ENDINGS {
            if let Some(stem) = word.strip_suffix(ending) {
                return format!("{stem}{plural}");
            }
        }
        if ["x", "ch", "sh", "ss", "zz"].iter().any(|e| word.ends_with(e)) {
            return format!("{word}es");
        }
        if word.ends_with('s') {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix('y') {
            if ends_with_consonant(stem) || stem.ends_with("qu") {
                return format!("{stem}ies");
            }
        }
        format!("{word}s")
    }

    fn singularize_word(&self, word: &str) -> String {
        if self.uncountable.contains(word) {
            return word.to_string();
        }
        if let Some(singular) = self.singulars.get(word) {
            return singular.clone();
        }
        if self.plurals.contains_key(word) {
            return word.to_string();
        }
        for (singular, ending) in PLURAL_ENDINGS {
            if let Some(stem) = word.strip_suffix(ending) {
                return format!("{stem}{singular}");
            }
        }
        if ["ss", "us", "is"].iter().any(|e| word.ends_with(e)) {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix("ies") {
            if ends_with_consonant(stem) || stem.ends_with("qu") {
                return format!("{stem}y");
            }
        }
        for ending in ["xes", "ches", "shes", "sses", "zzes"] {
            if word.ends_with(ending) {
                return word[..word.len() - 2].to_string();
            }
        }
        match word.strip_suffix('s') {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => word.to_string(),
        }
    }

    fn inflect(&self, word: &str, rule: impl Fn(&Self, &str) -> String) -> String {
        let (prefix, last) = split_last_word(word);
        if last.is_empty() {
            return word.to_string();
        }
        let inflected = rule(self, &last.to_lowercase());
        format!("{prefix}{}", match_case(last, &inflected))
    }
}

impl Default for EnglishInflector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        self.inflect(word, Self::singularize_word)
    }

    fn pluralize(&self, word: &str) -> String {
        self.inflect(word, Self::pluralize_word)
    }
}

fn ends_with_consonant(stem: &str) -> bool {
    stem.chars()
        .last()
        .is_some_and(|c| c.is_alphabetic() && !"aeiouy".contains(c))
}

/// Split a compound PascalCase word into everything before its last word and
/// the last word itself.
fn split_last_word(word: &str) -> (&str, &str) {
    let mut split = 0;
    let mut prev: Option<char> = None;

    for (i, c) in word.char_indices() {
        if i > 0 && c.is_uppercase() && !prev.is_some_and(char::is_uppercase) {
            split = i;
        }
        prev = Some(c);
    }

    word.split_at(split)
}

/// Re-apply the casing of `template` to an inflected lowercase word.
fn match_case(template: &str, inflected: &str) -> String {
    let all_upper = template.chars().count() > 1 && !template.chars().any(char::is_lowercase);

    if all_upper {
        inflected.to_uppercase()
    } else if template.starts_with(char::is_uppercase) {
        capitalize(inflected)
    } else {
        inflected.to_string()
    }
}

/// Entity class name for a table: singular PascalCase.
pub fn entity_name(inflector: &dyn Inflector, table: &str) -> String {
    inflector.singularize(&humanize(table))
}
