//! Deterministic lexicon tagger.
//!
//! Closed-class English words are listed exhaustively; open-class words are
//! covered by curated lists plus suffix rules, with NOUN as the fallback.
//! Tags follow the Universal POS inventory.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use tracing::debug;

use super::{normalize_words, TaggedSentence, Tagger};
use crate::error::PipelineResult;

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "no", "every", "each", "all", "both", "either", "neither", "another",
    "which", "whose", "such", "what", "whatever", "whichever",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "yourselves", "themselves", "mine", "yours",
    "hers", "ours", "theirs", "who", "whom", "someone", "somebody", "something", "anyone",
    "anybody", "anything", "everyone", "everybody", "everything", "nobody", "nothing", "none",
    "one", "ones", "y", "ya",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "from", "up", "down", "off", "over", "under",
    "around", "without", "within", "across", "behind", "near", "toward", "towards", "upon",
    "onto", "among", "along", "beside", "besides", "beyond", "per", "via", "despite", "except",
    "inside", "outside", "like",
];

const COORDINATORS: &[&str] = &["and", "but", "or", "nor", "yet", "plus"];

const SUBORDINATORS: &[&str] = &[
    "if", "because", "while", "although", "though", "unless", "whether", "than", "as", "since",
    "until", "till", "whereas", "once", "cause", "cos",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "ca", "wo",
    "s", "m", "re", "ve", "ll", "d",
];

const PARTICLES: &[&str] = &["not", "to", "t", "n"];

const INTERJECTIONS: &[&str] = &[
    "yeah", "yes", "yep", "yup", "nope", "ok", "okay", "oh", "ah", "aha", "uh", "um", "umm",
    "er", "erm", "eh", "hm", "hmm", "mhm", "mm", "wow", "hi", "hello", "hey", "bye", "goodbye",
    "please", "thanks", "alright", "huh", "oops", "ooh", "aw", "well", "laugh",
];

const NUMERALS: &[&str] = &[
    "zero", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
];

const ADVERBS: &[&str] = &[
    "very", "really", "just", "also", "too", "now", "then", "here", "there", "maybe", "perhaps",
    "always", "never", "often", "sometimes", "quite", "still", "already", "again", "so", "even",
    "only", "much", "more", "most", "less", "least", "almost", "soon", "today", "tomorrow",
    "yesterday", "ago", "away", "back", "else", "ever", "rather", "anyway", "how", "when",
    "where", "why", "together", "indeed", "instead", "otherwise", "however", "therefore",
    "out", "later", "once", "yet", "enough", "pretty", "kind", "sort",
];

const VERBS: &[&str] = &[
    "think", "thought", "know", "knew", "known", "go", "goes", "went", "gone", "get", "gets",
    "got", "say", "says", "said", "see", "saw", "seen", "make", "makes", "made", "take", "took",
    "taken", "come", "came", "want", "wants", "look", "use", "find", "found", "give", "gave",
    "given", "tell", "told", "work", "call", "try", "tried", "ask", "need", "needs", "feel",
    "felt", "mean", "meant", "keep", "kept", "let", "put", "seem", "leave", "left", "begin",
    "began", "show", "hear", "heard", "play", "run", "ran", "move", "live", "believe", "bring",
    "brought", "happen", "write", "wrote", "sit", "sat", "stand", "stood", "lose", "lost", "pay",
    "paid", "meet", "met", "include", "continue", "set", "learn", "change", "lead", "led",
    "understand", "understood", "watch", "follow", "stop", "create", "speak", "spoke", "read",
    "spend", "spent", "grow", "grew", "open", "walk", "win", "won", "teach", "taught", "offer",
    "remember", "love", "consider", "appear", "buy", "bought", "wait", "serve", "die", "send",
    "sent", "expect", "build", "built", "stay", "fall", "fell", "cut", "reach", "kill", "remain",
    "agree", "guess", "suppose", "choose", "chose", "pick", "help", "like", "likes", "liked",
    "start", "talk", "eat", "ate", "drink", "sleep", "hope", "wish", "prefer", "sing", "sang",
    "draw", "drew", "drive", "drove", "fly", "flew", "swim", "swam",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "big", "small", "new", "old", "great", "nice", "little", "long", "short",
    "high", "low", "large", "young", "important", "different", "same", "right", "wrong", "true",
    "false", "sure", "hard", "easy", "early", "late", "real", "best", "better", "worse", "worst",
    "able", "free", "full", "whole", "possible", "happy", "sad", "fine", "cool", "hot", "cold",
    "strong", "weak", "clear", "funny", "interesting", "difficult", "simple", "other", "last",
    "next", "first", "second", "third", "many", "few", "several", "own", "certain", "ready",
    "favourite", "favorite", "correct", "main", "open", "close", "black", "white", "red", "blue",
    "green",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "less", "ical", "ish", "ary", "ic",
];

/// Built-in word -> tag table; earlier lists win over later ones
static BUILTIN_LEXICON: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let lists: [(&[&str], &str); 12] = [
        (INTERJECTIONS, "INTJ"),
        (DETERMINERS, "DET"),
        (PRONOUNS, "PRON"),
        (AUXILIARIES, "AUX"),
        (PARTICLES, "PART"),
        (COORDINATORS, "CCONJ"),
        (SUBORDINATORS, "SCONJ"),
        (ADPOSITIONS, "ADP"),
        (NUMERALS, "NUM"),
        (VERBS, "VERB"),
        (ADVERBS, "ADV"),
        (ADJECTIVES, "ADJ"),
    ];

    let mut map = HashMap::new();
    for (words, tag) in lists {
        for word in words {
            map.entry(*word).or_insert(tag);
        }
    }
    map
});

/// Lexicon-backed tagger with optional user overrides
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    overrides: HashMap<String, String>,
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add user entries; they take precedence over the built-in lexicon
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides.extend(
            overrides
                .into_iter()
                .map(|(word, tag)| (word.to_lowercase(), tag.to_uppercase())),
        );
        self
    }

    /// Load user entries from a JSON object of `word -> POS tag`
    pub fn from_json_file(path: &Path) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let overrides: HashMap<String, String> = serde_json::from_str(&content)?;
        debug!("Loaded {} lexicon entries from {:?}", overrides.len(), path);
        Ok(Self::new().with_overrides(overrides))
    }

    /// Tag a single normalised word
    pub fn tag_word(&self, word: &str) -> String {
        if let Some(tag) = self.overrides.get(word) {
            return tag.clone();
        }
        if word.chars().any(|c| c.is_ascii_digit()) {
            return "NUM".to_string();
        }
        if !word.chars().any(char::is_alphanumeric) {
            return "PUNCT".to_string();
        }
        if let Some(tag) = BUILTIN_LEXICON.get(word) {
            return (*tag).to_string();
        }
        suffix_tag(word).to_string()
    }
}

/// Guess an open-class tag from the word's ending
fn suffix_tag(word: &str) -> &'static str {
    let len = word.chars().count();
    if len > 3 && word.ends_with("ly") {
        return "ADV";
    }
    if len > 4 && (word.ends_with("ing") || word.ends_with("ed")) {
        return "VERB";
    }
    // at least four letters of stem, so "table" and "music" stay nouns
    if ADJECTIVE_SUFFIXES
        .iter()
        .any(|s| word.ends_with(s) && len >= s.chars().count() + 4)
    {
        return "ADJ";
    }
    "NOUN"
}

impl Tagger for LexiconTagger {
    fn tag(&self, sentence: &str) -> TaggedSentence {
        let words = normalize_words(sentence);
        if words.is_empty() {
            return TaggedSentence::unanalyzed();
        }
        let tokens = words
            .into_iter()
            .map(|word| {
                let tag = self.tag_word(&word);
                (word, tag)
            })
            .collect();
        TaggedSentence::analyzed(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(tagger: &LexiconTagger, sentence: &str) -> Vec<String> {
        tagger
            .tag(sentence)
            .tokens
            .into_iter()
            .map(|(_, tag)| tag)
            .collect()
    }

    #[test]
    fn test_simple_sentence() {
        let tagger = LexiconTagger::new();
        assert_eq!(tags(&tagger, "The cat sat"), vec!["DET", "NOUN", "VERB"]);
        assert_eq!(tags(&tagger, "the cat ran"), vec!["DET", "NOUN", "VERB"]);
    }

    #[test]
    fn test_suffix_rules() {
        let tagger = LexiconTagger::new();
        assert_eq!(tagger.tag_word("quickly"), "ADV");
        assert_eq!(tagger.tag_word("jumping"), "VERB");
        assert_eq!(tagger.tag_word("wonderful"), "ADJ");
        assert_eq!(tagger.tag_word("table"), "NOUN");
        assert_eq!(tagger.tag_word("music"), "NOUN");
        assert_eq!(tagger.tag_word("topic"), "NOUN");
        assert_eq!(tagger.tag_word("historic"), "ADJ");
        assert_eq!(tagger.tag_word("42"), "NUM");
        assert_eq!(tagger.tag_word("+"), "PUNCT");
    }

    #[test]
    fn test_empty_span_is_unanalyzed() {
        let tagger = LexiconTagger::new();
        let tagged = tagger.tag("  , ");
        assert!(!tagged.analyzed);
        assert!(tagged.tokens.is_empty());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = HashMap::from([("Cat".to_string(), "propn".to_string())]);
        let tagger = LexiconTagger::new().with_overrides(overrides);
        assert_eq!(tagger.tag_word("cat"), "PROPN");
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"multisimo": "PROPN"}"#).unwrap();

        let tagger = LexiconTagger::from_json_file(&path).unwrap();
        assert_eq!(tagger.tag_word("multisimo"), "PROPN");
    }
}
