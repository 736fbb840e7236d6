// src/crawl/text.rs
// =============================================================================
// Turns a page's HTML into plain text.
//
// All tags are stripped, text inside <script>/<style>/<noscript>/<template>
// is dropped (it's code, not content), and every run of whitespace becomes a
// single space. The result is trimmed.
// =============================================================================

use scraper::{Html, Node};

// Elements whose text content is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts whitespace-normalized visible text from `html`.
///
/// Never fails: malformed markup is repaired by the HTML parser and whatever
/// text survives is returned (possibly an empty string).
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        // Text nodes are treated as separate runs, so "<p>a</p><p>b</p>"
        // reads "a b" rather than "ab"
        words.extend(text.split_whitespace());
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_stripped() {
        let html = "<html><body><h1>Welcome</h1><p>Hello <b>there</b>!</p></body></html>";
        assert_eq!(extract_text(html), "Welcome Hello there !");
    }

    #[test]
    fn test_whitespace_is_collapsed_and_trimmed() {
        let html = "<p>\n\n   lots   of\n\tspace   </p>\n";
        assert_eq!(extract_text(html), "lots of space");
    }

    #[test]
    fn test_scripts_and_styles_are_dropped() {
        let html = r#"
            <head><title>Title</title><style>body { color: red; }</style></head>
            <body><script>var x = 1;</script><p>Visible</p></body>
        "#;
        assert_eq!(extract_text(html), "Title Visible");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(extract_text("<p>Fish &amp; Chips</p>"), "Fish & Chips");
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("<div><p>unclosed"), "unclosed");
    }

    #[test]
    fn test_non_ascii_text_survives() {
        assert_eq!(extract_text("<p>税理士 事務所</p>"), "税理士 事務所");
    }
}
