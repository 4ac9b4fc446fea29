//! Sentence splitting and word normalisation for transcribed dialogue.
//!
//! Transcripts use `[...]` annotations and apostrophes inconsistently, so
//! words are produced by a blunt normaliser rather than a general tokenizer.

/// Characters replaced by whitespace before splitting into words
const WORD_SEPARATORS: [char; 7] = ['.', ',', '!', '?', '\'', '[', ']'];

/// Split a turn into sentence-like spans on `.`, `!` and `?`.
///
/// Empty spans are kept; callers skip them.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?']).collect()
}

/// Lowercase a span, blank out punctuation and brackets, split on whitespace
pub fn normalize_words(span: &str) -> Vec<String> {
    span.to_lowercase()
        .replace(WORD_SEPARATORS, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
