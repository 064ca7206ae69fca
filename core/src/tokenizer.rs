use lazy_static::lazy_static;
use regex::Regex;

use crate::Position;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[A-Za-z0-9_]+").expect("valid regex");
}

/// A raw token and its 1-based ordinal in the document's token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub position: Position,
}

/// Split text on runs of non-word characters. Case is left untouched.
///
/// The iterator is lazy; calling `words` again on the same text restarts it.
pub fn words(text: &str) -> impl Iterator<Item = &str> + '_ {
    WORD.find_iter(text).map(|m| m.as_str())
}

/// Like [`words`], but numbers every token starting at 1.
pub fn tokenize(text: &str) -> impl Iterator<Item = Token<'_>> + '_ {
    words(text).zip(1..).map(|(text, position)| Token { text, position })
}

/// Owned raw token stream, indexed by `position - 1`.
pub fn raw_tokens(text: &str) -> Vec<String> {
    words(text).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_word_runs() {
        let w: Vec<&str> = words("  Hello, world!! foo_bar-42 ").collect();
        assert_eq!(w, vec!["Hello", "world", "foo_bar", "42"]);
    }

    #[test]
    fn positions_are_one_based() {
        let t: Vec<Token> = tokenize("The cat sat").collect();
        assert_eq!(t[0], Token { text: "The", position: 1 });
        assert_eq!(t[2].position, 3);
    }

    #[test]
    fn non_ascii_letters_are_delimiters() {
        let w: Vec<&str> = words("café naïve").collect();
        assert_eq!(w, vec!["caf", "na", "ve"]);
    }
}
