use petgraph::algo::all_simple_paths;

use crate::graph::TranslationGraph;
use crate::word::Word;

/// Sums `exp(-|p|)` over every simple path from `source` to `candidate`
/// with edge count `|p| <= cutoff`. Zero if either endpoint is absent from
/// the graph, or if no such path exists.
///
/// Uses `petgraph::algo::all_simple_paths`, which ships in the same
/// `petgraph` version already pinned for `TranslationGraph`/`LanguageMetaGraph`
/// — no extra dependency needed for full simple-path enumeration.
pub fn metric(graph: &TranslationGraph, source: &Word, candidate: &Word, cutoff: u32) -> f64 {
    let (Some(source_idx), Some(candidate_idx)) = (graph.index_of(source), graph.index_of(candidate)) else {
        return 0.0;
    };
    if cutoff == 0 {
        return 0.0;
    }
    let max_intermediate = (cutoff as usize) - 1;
    all_simple_paths::<Vec<_>, _>(graph.inner(), source_idx, candidate_idx, 0, Some(max_intermediate))
        .map(|path| (-((path.len() - 1) as f64)).exp())
        .sum()
}

/// Candidate-selection policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectionPolicy {
    TopN(usize),
    Auto,
}

/// Applies a selection policy to (candidate, score) pairs. Sorts descending
/// by score first so callers don't need to pre-sort. `cutoff` feeds `Auto`'s
/// padding term, which penalizes candidate lists shorter than 10.
pub fn select(mut scored: Vec<(Word, f64)>, policy: SelectionPolicy, cutoff: u32) -> Vec<(Word, f64)> {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    match policy {
        SelectionPolicy::TopN(n) => scored.into_iter().take(n).collect(),
        SelectionPolicy::Auto => {
            let top10: Vec<(Word, f64)> = scored.into_iter().take(10).collect();
            let sum: f64 = top10.iter().map(|(_, s)| s).sum();
            let padding = (-((cutoff as f64) + 1.0)).exp() * (10usize.saturating_sub(top10.len())) as f64;
            let mean = (sum + padding) / 10.0;
            top10.into_iter().filter(|(_, s)| *s > mean).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{ResolvedEdge, Side};
    use crate::tags::parse_tags;

    fn word(lang: &str, lemma: &str, tag: &str) -> Word {
        Word::new(lang, lemma, vec![parse_tags(tag)])
    }

    #[test]
    fn metric_sums_exp_of_each_path_length() {
        let edges = vec![
            ResolvedEdge {
                side: Side::Lr,
                left: word("eng", "cat", "n"),
                right: word("fra", "chat", "n-m"),
            },
            ResolvedEdge {
                side: Side::Lr,
                left: word("fra", "chat", "n-m"),
                right: word("spa", "gato", "n-m"),
            },
            ResolvedEdge {
                side: Side::Lr,
                left: word("eng", "cat", "n"),
                right: word("ita", "gatto", "n-m"),
            },
            ResolvedEdge {
                side: Side::Lr,
                left: word("ita", "gatto", "n-m"),
                right: word("spa", "gato", "n-m"),
            },
        ];
        let g = TranslationGraph::from_edges(&edges);
        let score = metric(&g, &word("eng", "cat", "n"), &word("spa", "gato", "n-m"), 4);
        assert!((score - 0.271).abs() < 0.01);
    }

    #[test]
    fn metric_is_zero_for_unreachable_candidate() {
        let edges = vec![ResolvedEdge {
            side: Side::Lr,
            left: word("eng", "cat", "n"),
            right: word("fra", "chat", "n-m"),
        }];
        let g = TranslationGraph::from_edges(&edges);
        let score = metric(&g, &word("eng", "cat", "n"), &word("spa", "gato", "n-m"), 4);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn auto_selection_matches_worked_example() {
        let scored = vec![
            (word("spa", "a", "n"), 0.6),
            (word("spa", "b", "n"), 0.1),
            (word("spa", "c", "n"), 0.05),
        ];
        let selected = select(scored, SelectionPolicy::Auto, 4);
        let scores: Vec<f64> = selected.iter().map(|(_, s)| *s).collect();
        assert_eq!(scores, vec![0.6, 0.1]);
    }

    #[test]
    fn topn_policy_truncates_sorted_list() {
        let scored = vec![(word("spa", "a", "n"), 0.2), (word("spa", "b", "n"), 0.9)];
        let selected = select(scored, SelectionPolicy::TopN(1), 4);
        assert_eq!(selected, vec![(word("spa", "b", "n"), 0.9)]);
    }
}
