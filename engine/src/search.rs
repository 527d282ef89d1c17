use std::collections::HashSet;

use log::{debug, trace};
use petgraph::graph::NodeIndex;

use crate::errors::EngineError;
use crate::graph::TranslationGraph;
use crate::word::Word;

/// Bounded level-by-level BFS from `source`, returning every node reached
/// whose language is `target_lang`. A target-language node is a *sink*: its
/// own out-neighbors are never followed, so the search never continues
/// "through" an already-found candidate. `cutoff = None` is the
/// `cutoff = ∞` sentinel.
pub fn candidates(
    graph: &TranslationGraph,
    source: &Word,
    target_lang: &str,
    cutoff: Option<u32>,
) -> Result<Vec<Word>, EngineError> {
    let source_idx = graph.index_of(source).ok_or_else(|| EngineError::NodeNotFound(source.clone()))?;

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut results: Vec<Word> = Vec::new();
    let mut current_level: Vec<NodeIndex> = vec![source_idx];
    let mut level: u32 = 0;

    loop {
        let mut next_level: Vec<NodeIndex> = Vec::new();

        for node in &current_level {
            if visited.contains(node) {
                continue;
            }
            visited.insert(*node);

            let word = graph.word_at(*node);
            if word.lang == target_lang {
                trace!("candidate {} reached at level {}", word, level);
                results.push(word.clone());
                if results.len() >= 10 {
                    debug!("candidate search for {} stopped at the 10-result cap", source);
                    return Ok(results);
                }
            } else {
                for neighbor in graph.out_neighbors(*node) {
                    if !visited.contains(&neighbor) {
                        next_level.push(neighbor);
                    }
                }
            }
        }

        if next_level.is_empty() {
            break;
        }
        let next_level_num = level + 1;
        if let Some(c) = cutoff {
            if next_level_num > c {
                break;
            }
        }
        current_level = next_level;
        level = next_level_num;
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{ResolvedEdge, Side};
    use crate::tags::parse_tags;

    fn word(lang: &str, lemma: &str, tag: &str) -> Word {
        Word::new(lang, lemma, vec![parse_tags(tag)])
    }

    fn chained_graph() -> TranslationGraph {
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
        TranslationGraph::from_edges(&edges)
    }

    #[test]
    fn finds_sink_candidate_through_two_routes() {
        let g = chained_graph();
        let found = candidates(&g, &word("eng", "cat", "n"), "spa", Some(4)).unwrap();
        assert_eq!(found, vec![word("spa", "gato", "n-m")]);
    }

    #[test]
    fn missing_source_is_node_not_found() {
        let g = chained_graph();
        let result = candidates(&g, &word("rus", "koshka", "n-f"), "spa", Some(4));
        assert!(matches!(result, Err(EngineError::NodeNotFound(_))));
    }

    #[test]
    fn cutoff_zero_returns_only_source_if_matching() {
        let g = chained_graph();
        let found = candidates(&g, &word("eng", "cat", "n"), "eng", Some(0)).unwrap();
        assert_eq!(found, vec![word("eng", "cat", "n")]);
    }

    #[test]
    fn shallow_cutoff_excludes_far_candidates() {
        let g = chained_graph();
        let found = candidates(&g, &word("eng", "cat", "n"), "spa", Some(1)).unwrap();
        assert!(found.is_empty());
    }
}
