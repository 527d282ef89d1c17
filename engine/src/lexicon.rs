use std::collections::HashMap;

use crate::tags::Tags;
use crate::word::Word;

/// Two-tier index over one language's canonical `Word`s: a `Word`'s derived
/// hash agrees with its strict equality, but the lookup callers actually
/// want ("does this lemma, under-specified or not, match a stored
/// reading?") is the looser `Word::loosely_matches`, which a hash table
/// cannot serve for multi-variant entries. Single-variant words go in the
/// hash tier; everything else falls back to a linear scan.
#[derive(Debug, Default)]
pub struct Lexicon {
    lang: String,
    exact: HashMap<Word, Word>,
    multi: Vec<Word>,
}

impl Lexicon {
    pub fn new(lang: impl Into<String>) -> Self {
        Lexicon {
            lang: lang.into(),
            exact: HashMap::new(),
            multi: Vec::new(),
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.multi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a canonical `Word` (normally the output of `UnifiedLemma::to_word`)
    /// into whichever tier its variant count calls for.
    pub fn insert(&mut self, word: Word) {
        if word.variants.len() > 1 {
            self.multi.push(word);
        } else {
            self.exact.insert(word.clone(), word);
        }
    }

    /// Iterates every canonical `Word` across both tiers, in no particular
    /// order. Used by callers that need to sweep a whole lexicon (the `eval`
    /// and `preview` CLI subcommands), rather than resolve one occurrence.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.exact.values().chain(self.multi.iter())
    }

    /// Resolves a raw occurrence `(lemma, tagsQuery)` to its canonical
    /// `Word`, trying an exact match, then an unspecified-tags entry, then
    /// falling back to a loose subset match.
    pub fn find(&self, lemma: &str, tags_query: &Tags) -> Option<&Word> {
        let exact_query = Word::new(self.lang.clone(), lemma, vec![tags_query.clone()]);
        if let Some(hit) = self.exact.get(&exact_query) {
            return Some(hit);
        }

        let unspecified_query = Word::new(self.lang.clone(), lemma, vec![Tags::empty()]);
        if let Some(hit) = self.exact.get(&unspecified_query) {
            return Some(hit);
        }

        self.multi.iter().find(|candidate| candidate.loosely_matches(&exact_query))
    }
}

/// Per-language map of `Lexicon`s, keyed by language code.
#[derive(Debug, Default)]
pub struct LexiconSet(HashMap<String, Lexicon>);

impl LexiconSet {
    pub fn new() -> Self {
        LexiconSet(HashMap::new())
    }

    pub fn entry(&mut self, lang: &str) -> &mut Lexicon {
        self.0.entry(lang.to_string()).or_insert_with(|| Lexicon::new(lang))
    }

    pub fn get(&self, lang: &str) -> Option<&Lexicon> {
        self.0.get(lang)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::parse_tags;

    #[test]
    fn exact_tier_hits_single_variant_word() {
        let mut lex = Lexicon::new("rus");
        lex.insert(Word::new("rus", "dom", vec![parse_tags("n-m-sg")]));
        let found = lex.find("dom", &parse_tags("n-m-sg")).unwrap();
        assert_eq!(found.lemma, "dom");
    }

    #[test]
    fn multi_tier_matches_subset_query() {
        let mut lex = Lexicon::new("rus");
        lex.insert(Word::new("rus", "stol", vec![parse_tags("n-m-sg"), parse_tags("n-f-sg")]));
        let found = lex.find("stol", &parse_tags("n")).unwrap();
        assert_eq!(found.variants.len(), 2);
    }

    #[test]
    fn unspecified_tier_matches_empty_tags_entry() {
        let mut lex = Lexicon::new("eng");
        lex.insert(Word::new("eng", "sheep", vec![Tags::empty()]));
        let found = lex.find("sheep", &parse_tags("n-pl")).unwrap();
        assert!(found.has_empty_variant());
    }

    #[test]
    fn absent_lemma_returns_none() {
        let lex = Lexicon::new("rus");
        assert!(lex.find("nikogda", &parse_tags("adv")).is_none());
    }

    #[test]
    fn lexicon_set_tracks_languages() {
        let mut set = LexiconSet::new();
        set.entry("rus").insert(Word::new("rus", "stol", vec![parse_tags("n-m")]));
        set.entry("eng").insert(Word::new("eng", "table", vec![parse_tags("n")]));
        let mut langs: Vec<&str> = set.languages().collect();
        langs.sort_unstable();
        assert_eq!(langs, vec!["eng", "rus"]);
    }
}
