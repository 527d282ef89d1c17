use log::debug;

use crate::lexicon::Lexicon;
use crate::tags::{format_tag_groups, Tags};
use crate::word::Word;

/// Direction restriction carried by a bilingual source record. `Both`
/// normalizes to edges in both directions when the graph is built;
/// `Lr`/`Rl` restrict to a single direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Both,
    Lr,
    Rl,
}

/// One raw bilingual source tuple before lexicon resolution: a lemma plus
/// its declared tag-variant groups on each side (spec §6: "tagsL and tagsR
/// encode Tags chains exactly as in the lexicon file"), not yet a canonical
/// `Word`.
#[derive(Clone, Debug)]
pub struct BilingualRecord {
    pub side: Side,
    pub lemma_left: String,
    pub tags_left: Vec<Vec<Tags>>,
    pub lemma_right: String,
    pub tags_right: Vec<Vec<Tags>>,
}

/// A bilingual source tuple after both endpoints resolved to canonical
/// `Word`s drawn from their respective lexicons.
#[derive(Clone, Debug)]
pub struct ResolvedEdge {
    pub side: Side,
    pub left: Word,
    pub right: Word,
}

/// Resolves every raw record against the left/right lexicons. Records whose
/// either side fails to resolve are dropped silently; the second return
/// value is the drop count.
pub fn build_edge_list(
    left_lexicon: &Lexicon,
    right_lexicon: &Lexicon,
    raw: &[BilingualRecord],
) -> (Vec<ResolvedEdge>, usize) {
    let mut resolved = Vec::with_capacity(raw.len());
    let mut dropped = 0;

    for record in raw {
        let left = resolve(left_lexicon, &record.lemma_left, &record.tags_left);
        let right = resolve(right_lexicon, &record.lemma_right, &record.tags_right);
        match (left, right) {
            (Some(left), Some(right)) => resolved.push(ResolvedEdge {
                side: record.side,
                left,
                right,
            }),
            _ => {
                debug!(
                    "dropping unresolvable record {}/{} <-> {}/{}",
                    record.lemma_left,
                    format_tag_groups(&record.tags_left),
                    record.lemma_right,
                    format_tag_groups(&record.tags_right)
                );
                dropped += 1;
            }
        }
    }

    (resolved, dropped)
}

/// Tries every declared reading, flattened across all of a record's
/// tag-variant groups, against the lexicon in turn and returns the first
/// that resolves. A record's tags field can carry more than one candidate
/// reading (spec §6), so any one of them resolving is enough to place the
/// occurrence.
fn resolve(lexicon: &Lexicon, lemma: &str, groups: &[Vec<Tags>]) -> Option<Word> {
    groups.iter().flatten().find_map(|tags| lexicon.find(lemma, tags).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::parse_tags;

    #[test]
    fn resolves_both_sides_and_drops_unresolvable() {
        let mut left = Lexicon::new("rus");
        left.insert(Word::new("rus", "stol", vec![parse_tags("n-m")]));
        let mut right = Lexicon::new("eng");
        right.insert(Word::new("eng", "table", vec![parse_tags("n")]));

        let raw = vec![
            BilingualRecord {
                side: Side::Both,
                lemma_left: "stol".to_string(),
                tags_left: vec![vec![parse_tags("n-m")]],
                lemma_right: "table".to_string(),
                tags_right: vec![vec![parse_tags("n")]],
            },
            BilingualRecord {
                side: Side::Lr,
                lemma_left: "ghost".to_string(),
                tags_left: vec![vec![parse_tags("n")]],
                lemma_right: "table".to_string(),
                tags_right: vec![vec![parse_tags("n")]],
            },
        ];

        let (resolved, dropped) = build_edge_list(&left, &right, &raw);
        assert_eq!(resolved.len(), 1);
        assert_eq!(dropped, 1);
        assert_eq!(resolved[0].left.lemma, "stol");
        assert_eq!(resolved[0].right.lemma, "table");
    }

    #[test]
    fn resolves_using_any_declared_reading_across_groups() {
        let mut left = Lexicon::new("rus");
        left.insert(Word::new("rus", "stol", vec![parse_tags("n-m-sg")]));
        let mut right = Lexicon::new("eng");
        right.insert(Word::new("eng", "table", vec![parse_tags("n")]));

        // Declares two alternative readings ($-separated); only the second
        // ("n-m-sg") actually resolves against the lexicon.
        let raw = vec![BilingualRecord {
            side: Side::Both,
            lemma_left: "stol".to_string(),
            tags_left: vec![vec![parse_tags("n-f")], vec![parse_tags("n-m-sg")]],
            lemma_right: "table".to_string(),
            tags_right: vec![vec![parse_tags("n")]],
        }];

        let (resolved, dropped) = build_edge_list(&left, &right, &raw);
        assert_eq!(dropped, 0);
        assert_eq!(resolved[0].left.variants, vec![parse_tags("n-m-sg")]);
    }
}
