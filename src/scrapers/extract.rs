//! Metadata extraction from a parsed article page.
//!
//! Extraction never fails. Missing structure degrades the record instead:
//! no heading gives [`NO_TITLE`], no body region gives a zeroed record with
//! tags set to [`NOT_FOUND`](crate::models::NOT_FOUND), and no tag container
//! gives [`NO_TAGS`].

use std::collections::HashMap;

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use super::policy::CompiledPolicy;
use crate::models::{ArticleRecord, NO_TAGS, NO_TITLE, NOT_AVAILABLE};

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Parse `html` and extract its record.
pub fn extract_from_html(html: &str, url: &str, policy: &CompiledPolicy) -> ArticleRecord {
    let document = Html::parse_document(html);
    extract_record(&document, url, policy)
}

/// Build the record for one parsed page.
#[instrument(level = "debug", skip_all, fields(%url))]
pub fn extract_record(document: &Html, url: &str, policy: &CompiledPolicy) -> ArticleRecord {
    let title = document
        .select(&policy.title)
        .next()
        .map(|heading| stripped_text(&heading))
        .unwrap_or_else(|| NO_TITLE.to_string());

    let Some(body) = CompiledPolicy::first_match(&policy.body, document) else {
        debug!(%title, "No body region found");
        return ArticleRecord::body_not_found(title, url);
    };

    let paragraphs = body
        .select(&PARAGRAPH)
        .filter(|p| !stripped_text(p).is_empty())
        .collect::<Vec<_>>();
    let text = paragraphs
        .iter()
        .map(|p| p.text().collect::<String>())
        .join(" ");

    let words = tokenize(&text, policy);
    let common_word = most_common(
        words
            .iter()
            .map(String::as_str)
            .filter(|w| !policy.is_stop_word(w)),
    )
    .unwrap_or(NOT_AVAILABLE)
    .to_string();

    let image_count = body.select(&IMAGE).count();
    let tags = tag_labels(document, policy);

    debug!(
        words = words.len(),
        paragraphs = paragraphs.len(),
        images = image_count,
        tags = tags.len(),
        "Extracted article metadata"
    );

    ArticleRecord {
        title,
        url: url.to_string(),
        word_count: words.len(),
        paragraph_count: paragraphs.len(),
        image_count,
        common_word,
        tags: if tags.is_empty() {
            NO_TAGS.to_string()
        } else {
            tags.join(", ")
        },
    }
}

/// Text of every descendant text node, each trimmed, empty ones dropped,
/// concatenated without a separator.
pub fn stripped_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercase `text` and return every run of at least the policy's minimum
/// number of ASCII letters bounded by word boundaries.
pub fn tokenize(text: &str, policy: &CompiledPolicy) -> Vec<String> {
    let lowered = text.to_lowercase();
    policy
        .word
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Most frequent word; ties go to the word seen first.
pub fn most_common<'a>(words: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, word) in words.into_iter().enumerate() {
        counts.entry(word).or_insert((0, idx)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(word, _)| word)
}

fn tag_labels(document: &Html, policy: &CompiledPolicy) -> Vec<String> {
    let Some(container) = CompiledPolicy::first_match(&policy.tag_containers, document) else {
        return Vec::new();
    };
    container
        .select(&LINK)
        .filter(|a| a.value().attr("href").is_some_and(|href| !href.is_empty()))
        .map(|a| stripped_text(&a))
        .filter(|label| !label.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::policy::ExtractionPolicy;

    const URL: &str = "https://example.com/travel/story";

    fn default_policy() -> CompiledPolicy {
        ExtractionPolicy::default().compile().unwrap()
    }

    fn policy_with_stop_words(words: &[&str]) -> CompiledPolicy {
        ExtractionPolicy {
            stop_words: words.iter().map(|w| w.to_string()).collect(),
            ..ExtractionPolicy::default()
        }
        .compile()
        .unwrap()
    }

    #[test]
    fn test_full_article_page() {
        let html = r#"
            <html><body>
              <h1>  Anandes Hotel <em>Mykonos</em> review </h1>
              <article>
                <p>The island hotel overlooks the bay.</p>
                <p>Every hotel room has a view of the island.</p>
                <img src="a.jpg"><figure><img src="b.jpg"></figure>
              </article>
              <ul class="c-meta__list">
                <li><a href="/travel">Travel</a></li>
                <li><a href="/greece"> Greece </a></li>
                <li><a href="/empty"></a></li>
              </ul>
            </body></html>"#;
        let record = extract_from_html(html, URL, &default_policy());

        assert_eq!(record.title, "Anandes HotelMykonosreview");
        assert_eq!(record.url, URL);
        assert_eq!(record.paragraph_count, 2);
        assert_eq!(record.image_count, 2);
        // the island hotel overlooks the bay every hotel room has view the island
        assert_eq!(record.word_count, 13);
        assert_eq!(record.common_word, "island");
        assert_eq!(record.tags, "Travel, Greece");
    }

    #[test]
    fn test_missing_heading_uses_placeholder() {
        let html = "<article><p>Some words here.</p></article>";
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.title, "No title");
        assert_eq!(record.paragraph_count, 1);
    }

    #[test]
    fn test_missing_body_short_circuits() {
        let html = r#"<h1>Only a heading</h1><div class="sidebar"><p>Text text</p></div>
                      <div class="tags"><a href="/x">X</a></div>"#;
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record, ArticleRecord::body_not_found("Only a heading", URL));
        assert_eq!(record.tags, "Not found");
    }

    #[test]
    fn test_missing_body_and_heading() {
        let record = extract_from_html("<p>loose</p>", URL, &default_policy());
        assert_eq!(record.title, "No title");
        assert_eq!(record.common_word, "N/A");
        assert_eq!(record.tags, "Not found");
    }

    #[test]
    fn test_body_falls_back_to_class_pattern_div() {
        let html = r#"<div class="nav"><p>menu entry</p></div>
                      <div class="story-content"><p>Desert safari tours</p><img src="x"></div>"#;
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.paragraph_count, 1);
        assert_eq!(record.image_count, 1);
        assert_eq!(record.word_count, 3);
        assert_eq!(record.common_word, "desert");
    }

    #[test]
    fn test_article_tag_beats_earlier_content_div() {
        let html = r#"<div class="content"><p>wrong region</p></div>
                      <article><p>right region words</p></article>"#;
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.common_word, "right");
    }

    #[test]
    fn test_empty_paragraphs_are_not_counted() {
        let html = r#"<article>
            <p>One.</p><p>   </p><p>Two.</p><p></p><p>Three.</p>
        </article>"#;
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.paragraph_count, 3);
        assert_eq!(record.word_count, 3);
    }

    #[test]
    fn test_stop_words_change_common_word_not_word_count() {
        let html = "<article><p>the cat and the cat sat</p></article>";
        let record = extract_from_html(html, URL, &policy_with_stop_words(&["the", "and"]));
        assert_eq!(record.word_count, 6);
        assert_eq!(record.common_word, "cat");

        let unfiltered = extract_from_html(html, URL, &policy_with_stop_words(&[]));
        assert_eq!(unfiltered.word_count, 6);
        assert_eq!(unfiltered.common_word, "the");
    }

    #[test]
    fn test_only_stop_words_gives_placeholder() {
        let html = "<article><p>The and the was were.</p></article>";
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.word_count, 5);
        assert_eq!(record.common_word, "N/A");
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let html = "<h1>T</h1><article><p>Sun sand sea sun.</p><p>Sea sun.</p></article>";
        let policy = default_policy();
        let first = extract_from_html(html, URL, &policy);
        let second = extract_from_html(html, URL, &policy);
        assert_eq!(first, second);
        assert_eq!(first.common_word, "sun");
    }

    #[test]
    fn test_no_tag_container_gives_no_tags() {
        let html = "<article><p>Plain story</p></article>";
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.tags, "No tags");
    }

    #[test]
    fn test_tag_container_without_labels_gives_no_tags() {
        let html = r#"<article><p>Plain story</p></article>
                      <ul class="tags"><li><a href="">Blank href</a></li><li><a>No href</a></li></ul>"#;
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.tags, "No tags");
    }

    #[test]
    fn test_tag_container_priority_order() {
        let html = r#"<article><p>Story</p></article>
                      <div class="tags"><a href="/a">FromDiv</a></div>
                      <ul class="tags"><li><a href="/b">FromList</a></li></ul>"#;
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.tags, "FromList");
    }

    #[test]
    fn test_tag_container_pattern_fallback() {
        let html = r#"<article><p>Story</p></article>
                      <div class="article-labels"><a href="/uae">UAE</a><a href="/summer">Summer</a></div>"#;
        let record = extract_from_html(html, URL, &default_policy());
        assert_eq!(record.tags, "UAE, Summer");
    }

    #[test]
    fn test_tokenize_respects_word_boundaries() {
        let policy = default_policy();
        let words = tokenize("Café owners' 2025 plans: re-opening, AI, x86 spa", &policy);
        assert_eq!(words, vec!["owners", "plans", "opening", "spa"]);
    }

    #[test]
    fn test_most_common_ties_go_to_first_seen() {
        assert_eq!(most_common(["sea", "sun", "sun", "sea"]), Some("sea"));
        assert_eq!(most_common(["sea", "sun", "sun"]), Some("sun"));
        assert_eq!(most_common(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_stripped_text_joins_without_separator() {
        let doc = Html::parse_fragment("<span> a <b> b </b>\n c </span>");
        let sel = Selector::parse("span").unwrap();
        let span = doc.select(&sel).next().unwrap();
        assert_eq!(stripped_text(&span), "abc");
    }
}
