use indexmap::IndexMap;

use crate::tags::Tags;
use crate::word::Word;

/// Direct output of the monolingual unifier for one lemma: one or more
/// tag-variant groups, each a chain of mutually comparable `Tags` ordered by
/// the frequency-then-specificity sweep that built it. Mirrors the external
/// monodix file's `$`-separated list of `_`-joined chains (engine::io::monodix),
/// which is why the chain is kept intact here rather than collapsed eagerly.
#[derive(Clone, Debug, PartialEq)]
pub struct UnifiedLemma {
    pub lemma: String,
    pub groups: Vec<Vec<Tags>>,
}

impl UnifiedLemma {
    /// Collapses each tag-variant group down to its most specific member,
    /// producing the flat canonical `Word` used by the lexicon and
    /// translation graph. Any query `Tags` below a group's smaller members is
    /// also below its maximum (chain transitivity), so the collapse loses no
    /// lookups even though the intermediate rungs are dropped.
    pub fn to_word(&self, lang: &str) -> Word {
        let variants = self
            .groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .cloned()
                    .reduce(|a, b| if b > a { b } else { a })
                    .unwrap_or_else(Tags::empty)
            })
            .collect();
        Word::new(lang, self.lemma.clone(), variants)
    }
}

/// Folds every `(lemma, Tags)` observation for one language into one
/// `UnifiedLemma` per distinct lemma, grounded in the source corpus's
/// `shorten()` routine: count occurrences of each distinct reading, visit
/// them most-frequent-first (shorter reading breaking ties), and place each
/// into the first existing group it is comparable with, else start a new
/// group. Deterministic for a fixed input order — ties preserve the order in
/// which the readings were first observed.
pub fn unify_language(observations: impl IntoIterator<Item = (String, Tags)>) -> Vec<UnifiedLemma> {
    let mut by_lemma: IndexMap<String, Vec<(Tags, u32)>> = IndexMap::new();

    for (lemma, tags) in observations {
        let counts = by_lemma.entry(lemma).or_default();
        match counts.iter_mut().find(|(t, _)| *t == tags) {
            Some((_, count)) => *count += 1,
            None => counts.push((tags, 1)),
        }
    }

    by_lemma
        .into_iter()
        .map(|(lemma, mut distinct)| {
            distinct.sort_by(|(a_tags, a_count), (b_tags, b_count)| {
                b_count.cmp(a_count).then(a_tags.len().cmp(&b_tags.len()))
            });
            UnifiedLemma {
                lemma,
                groups: group_by_comparability(distinct.into_iter().map(|(t, _)| t)),
            }
        })
        .collect()
}

fn group_by_comparability(sorted: impl IntoIterator<Item = Tags>) -> Vec<Vec<Tags>> {
    let mut groups: Vec<Vec<Tags>> = Vec::new();
    'next_tag: for tags in sorted {
        for group in groups.iter_mut() {
            if group.iter().all(|member| member.is_comparable_to(&tags)) {
                group.push(tags);
                continue 'next_tag;
            }
        }
        groups.push(vec![tags]);
    }
    groups
}
