//! Word tokenizer and n-gram expansion.

use regex::Regex;
use std::sync::OnceLock;

static WORD: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    // Runs of two or more word characters; single characters and punctuation are dropped.
    WORD.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token pattern"))
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    ngram_min: usize,
    ngram_max: usize,
    lowercase: bool,
}

impl Tokenizer {
    pub fn new(ngram_min: usize, ngram_max: usize, lowercase: bool) -> Self {
        Self {
            ngram_min: ngram_min.max(1),
            ngram_max: ngram_max.max(ngram_min.max(1)),
            lowercase,
        }
    }

    pub fn tokens(&self, text: &str) -> Vec<String> {
        let folded;
        let text = if self.lowercase {
            folded = text.to_lowercase();
            folded.as_str()
        } else {
            text
        };
        word_regex()
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// All contiguous n-grams for n in the configured range, tokens joined by a single space.
    pub fn ngrams(&self, text: &str) -> Vec<String> {
        let tokens = self.tokens(text);
        let mut out = Vec::new();
        for n in self.ngram_min..=self.ngram_max {
            if n == 1 {
                out.extend(tokens.iter().cloned());
            } else {
                out.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_single_chars_and_punctuation() {
        let t = Tokenizer::new(1, 1, true);
        assert_eq!(t.tokens("' OR 1=1 --"), vec!["or"]);
        assert_eq!(t.tokens("SELECT * FROM users"), vec!["select", "from", "users"]);
    }

    #[test]
    fn bigrams_follow_unigrams() {
        let t = Tokenizer::new(1, 2, true);
        assert_eq!(
            t.ngrams("SELECT name FROM products"),
            vec![
                "select",
                "name",
                "from",
                "products",
                "select name",
                "name from",
                "from products",
            ]
        );
    }

    #[test]
    fn empty_text_has_no_ngrams() {
        let t = Tokenizer::new(1, 2, true);
        assert!(t.ngrams("").is_empty());
        assert!(t.ngrams("' = -- ;").is_empty());
    }

    #[test]
    fn case_kept_when_lowercase_disabled() {
        let t = Tokenizer::new(1, 1, false);
        assert_eq!(t.tokens("Union SELECT"), vec!["Union", "SELECT"]);
    }
}
