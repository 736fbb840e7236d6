// src/crawl/corpus.rs
// =============================================================================
// Glues per-page text together and cuts it down to the character budget.
//
// Rust strings are UTF-8 bytes, and slicing in the middle of a multi-byte
// character panics. So the budget is counted in chars (Unicode scalar
// values), and we cut at the byte offset where the N-th char begins.
// =============================================================================

/// Separator placed between two pages' text (one blank line).
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Joins page texts in visitation order and truncates to `max_chars` chars.
///
/// Pages with no text are skipped so the corpus never starts or ends with a
/// dangling separator.
pub fn assemble<I, S>(page_texts: I, max_chars: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut corpus = String::new();

    for text in page_texts {
        let text = text.as_ref();
        if text.is_empty() {
            continue;
        }
        if !corpus.is_empty() {
            corpus.push_str(PAGE_SEPARATOR);
        }
        corpus.push_str(text);
    }

    truncate_chars(&mut corpus, max_chars);
    corpus
}

/// Cuts `text` to at most `max_chars` chars, even mid-word.
///
/// Returns true if anything was removed.
pub fn truncate_chars(text: &mut String, max_chars: usize) -> bool {
    match text.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => {
            text.truncate(byte_offset);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_separated_by_blank_line() {
        let corpus = assemble(["first page", "second page"], 1000);
        assert_eq!(corpus, "first page\n\nsecond page");
    }

    #[test]
    fn test_empty_pages_are_skipped() {
        let corpus = assemble(["", "only", ""], 1000);
        assert_eq!(corpus, "only");
    }

    #[test]
    fn test_no_pages_gives_empty_corpus() {
        let corpus = assemble(Vec::<String>::new(), 1000);
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_long_corpus_is_cut_to_exact_length() {
        let text = "a".repeat(15_000);
        let corpus = assemble([text], 12_000);
        assert_eq!(corpus.chars().count(), 12_000);
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let pages = vec!["alpha beta gamma".to_string(), "delta epsilon".to_string()];
        let once = assemble(&pages, 20);
        let twice = assemble([&once], 20);
        assert_eq!(once, twice);
        assert_eq!(once.chars().count(), 20);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        // each of these is 3 bytes in UTF-8
        let corpus = assemble(["税理士事務所"], 4);
        assert_eq!(corpus, "税理士事");
    }

    #[test]
    fn test_truncation_may_cut_mid_word() {
        let corpus = assemble(["hello world"], 7);
        assert_eq!(corpus, "hello w");
    }

    #[test]
    fn test_zero_budget_gives_empty_corpus() {
        assert_eq!(assemble(["something"], 0), "");
    }

    #[test]
    fn test_truncate_reports_whether_it_cut() {
        let mut short = "abc".to_string();
        assert!(!truncate_chars(&mut short, 3));
        let mut long = "abcdef".to_string();
        assert!(truncate_chars(&mut long, 3));
        assert_eq!(long, "abc");
    }
}
