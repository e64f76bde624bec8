//! Extraction policy: the site-specific heuristics as data.
//!
//! An [`ExtractionPolicy`] names which elements count as the title, the body
//! region and the tag container, which words are ignored when picking the
//! most common word, and how short a token may be. The [`Default`] policy is
//! tuned for The National's travel pages; other sites can be targeted by
//! loading a YAML file with the same shape:
//!
//! ```yaml
//! title_tag: h1
//! body_rules:
//!   - kind: tag
//!     tag: article
//!   - kind: class_pattern
//!     tag: div
//!     pattern: "article|content|body"
//! tag_container_rules:
//!   - kind: class
//!     tag: ul
//!     class: c-meta__list
//! stop_words: [the, and]
//! min_word_length: 3
//! ```
//!
//! Keys left out of the file keep their default values. A policy is
//! [compiled](ExtractionPolicy::compile) once per run into a
//! [`CompiledPolicy`] holding parsed selectors and regexes.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::PolicyError;

/// Stop words ignored when choosing the most common word.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "and", "to", "of", "in", "a", "is", "for", "on", "with", "that", "by", "as", "it",
    "at", "from", "this", "are", "be", "was", "were", "have", "has", "had", "but", "not", "you",
    "they", "we", "she", "he", "his", "her", "our", "your", "my", "their", "will", "would",
    "can", "could", "been", "being",
];

/// How to recognize one kind of element in a document.
///
/// Rules are tried in order; the first rule that matches anything wins, and
/// within a rule the first match in document order is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementRule {
    /// Any element with this tag name.
    Tag { tag: String },
    /// An element with this tag name carrying `class` as one of its classes.
    Class { tag: String, class: String },
    /// An element with this tag name whose class attribute contains a match
    /// for the case-sensitive regex `pattern`.
    ClassPattern { tag: String, pattern: String },
}

impl ElementRule {
    fn tag(&self) -> &str {
        match self {
            ElementRule::Tag { tag }
            | ElementRule::Class { tag, .. }
            | ElementRule::ClassPattern { tag, .. } => tag,
        }
    }

    fn compile(&self) -> Result<CompiledRule, PolicyError> {
        let selector = parse_selector(self.tag(), &self.to_string())?;
        let class = match self {
            ElementRule::Tag { .. } => ClassFilter::Any,
            ElementRule::Class { class, .. } => ClassFilter::Token(class.clone()),
            ElementRule::ClassPattern { pattern, .. } => ClassFilter::Pattern(Regex::new(pattern)?),
        };
        Ok(CompiledRule { selector, class })
    }
}

impl fmt::Display for ElementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRule::Tag { tag } => write!(f, "{tag}"),
            ElementRule::Class { tag, class } => write!(f, "{tag}.{class}"),
            ElementRule::ClassPattern { tag, pattern } => write!(f, "{tag}[class~/{pattern}/]"),
        }
    }
}

/// Site heuristics used by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionPolicy {
    /// Tag whose first occurrence supplies the title.
    pub title_tag: String,
    /// Rules locating the body region, in priority order.
    pub body_rules: Vec<ElementRule>,
    /// Rules locating the tag container, in priority order.
    pub tag_container_rules: Vec<ElementRule>,
    /// Tokens excluded when picking the most common word.
    pub stop_words: Vec<String>,
    /// Minimum length of a word token.
    pub min_word_length: usize,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            title_tag: "h1".to_string(),
            body_rules: vec![
                ElementRule::Tag {
                    tag: "article".to_string(),
                },
                ElementRule::ClassPattern {
                    tag: "div".to_string(),
                    pattern: "article|content|body".to_string(),
                },
            ],
            tag_container_rules: vec![
                ElementRule::Class {
                    tag: "ul".to_string(),
                    class: "c-meta__list".to_string(),
                },
                ElementRule::Class {
                    tag: "ul".to_string(),
                    class: "tags".to_string(),
                },
                ElementRule::Class {
                    tag: "div".to_string(),
                    class: "tags".to_string(),
                },
                ElementRule::ClassPattern {
                    tag: "div".to_string(),
                    pattern: "tag|label".to_string(),
                },
            ],
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            min_word_length: 3,
        }
    }
}

impl ExtractionPolicy {
    /// Parse a policy from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PolicyError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a policy from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| PolicyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = Self::from_yaml_str(&yaml)?;
        info!(
            body_rules = policy.body_rules.len(),
            tag_container_rules = policy.tag_container_rules.len(),
            stop_words = policy.stop_words.len(),
            "Loaded extraction policy"
        );
        Ok(policy)
    }

    /// Pre-build every selector and regex this policy needs.
    pub fn compile(&self) -> Result<CompiledPolicy, PolicyError> {
        let title = parse_selector(&self.title_tag, "title_tag")?;
        let body = self
            .body_rules
            .iter()
            .map(ElementRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let tag_containers = self
            .tag_container_rules
            .iter()
            .map(ElementRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let word = Regex::new(&format!(r"\b[a-z]{{{},}}\b", self.min_word_length.max(1)))?;
        let stop_words = self.stop_words.iter().map(|w| w.to_lowercase()).collect();

        debug!(title_tag = %self.title_tag, "Compiled extraction policy");
        Ok(CompiledPolicy {
            title,
            body,
            tag_containers,
            stop_words,
            word,
        })
    }
}

fn parse_selector(css: &str, rule: &str) -> Result<Selector, PolicyError> {
    Selector::parse(css).map_err(|e| PolicyError::Selector {
        rule: rule.to_string(),
        message: e.to_string(),
    })
}

#[derive(Debug)]
enum ClassFilter {
    Any,
    Token(String),
    Pattern(Regex),
}

/// An [`ElementRule`] ready to run against a document.
#[derive(Debug)]
pub struct CompiledRule {
    selector: Selector,
    class: ClassFilter,
}

impl CompiledRule {
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        match &self.class {
            ClassFilter::Any => true,
            ClassFilter::Token(class) => value.classes().any(|c| c == class),
            // Each class token first, then the attribute as written.
            ClassFilter::Pattern(pattern) => {
                value.classes().any(|c| pattern.is_match(c))
                    || value.attr("class").is_some_and(|c| pattern.is_match(c))
            }
        }
    }

    /// First element in document order satisfying this rule.
    pub fn find_first<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&self.selector).find(|el| self.matches(el))
    }
}

/// A compiled [`ExtractionPolicy`].
#[derive(Debug)]
pub struct CompiledPolicy {
    pub(crate) title: Selector,
    pub(crate) body: Vec<CompiledRule>,
    pub(crate) tag_containers: Vec<CompiledRule>,
    pub(crate) stop_words: HashSet<String>,
    pub(crate) word: Regex,
}

impl CompiledPolicy {
    /// First match of the highest-priority rule that matches anything.
    pub fn first_match<'a>(rules: &[CompiledRule], document: &'a Html) -> Option<ElementRef<'a>> {
        rules.iter().find_map(|rule| rule.find_first(document))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}
