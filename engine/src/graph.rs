use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::edges::{ResolvedEdge, Side};
use crate::word::Word;

/// Directed graph of canonical `Word` nodes, pairing a `petgraph` graph with
/// a node-lookup-by-id side table. The side table is keyed by the
/// canonical, fully-specified `Word` only (the form every node is actually
/// inserted as) — never by an under-specified query, since `Word` equality
/// is not transitive enough to be trusted inside a hashed set.
#[derive(Debug, Default)]
pub struct TranslationGraph {
    graph: DiGraph<Word, ()>,
    index: HashMap<Word, NodeIndex>,
}

impl TranslationGraph {
    pub fn new() -> Self {
        TranslationGraph {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    fn node_index(&mut self, word: &Word) -> NodeIndex {
        if let Some(idx) = self.index.get(word) {
            return *idx;
        }
        let idx = self.graph.add_node(word.clone());
        self.index.insert(word.clone(), idx);
        idx
    }

    /// Builds a graph from resolved edges: BOTH adds both directions, LR
    /// adds only left->right, RL adds only right->left. Only words that
    /// appear in at least one edge become nodes — no floating nodes.
    pub fn from_edges(edges: &[ResolvedEdge]) -> Self {
        let mut g = TranslationGraph::new();
        for edge in edges {
            let l = g.node_index(&edge.left);
            let r = g.node_index(&edge.right);
            match edge.side {
                Side::Both => {
                    g.graph.update_edge(l, r, ());
                    g.graph.update_edge(r, l, ());
                }
                Side::Lr => {
                    g.graph.update_edge(l, r, ());
                }
                Side::Rl => {
                    g.graph.update_edge(r, l, ());
                }
            }
        }
        g
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(word)
    }

    pub fn index_of(&self, word: &Word) -> Option<NodeIndex> {
        self.index.get(word).copied()
    }

    pub fn word_at(&self, idx: NodeIndex) -> &Word {
        &self.graph[idx]
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    pub fn out_neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn inner(&self) -> &DiGraph<Word, ()> {
        &self.graph
    }

    /// Removes both directed edges between two resolved nodes, if present.
    /// Used only by the evaluator's temporary-removal discipline; the graph
    /// is never mutated outside of that one workflow.
    pub fn remove_edge_pair(&mut self, a: NodeIndex, b: NodeIndex) {
        if let Some(e) = self.graph.find_edge(a, b) {
            self.graph.remove_edge(e);
        }
        if let Some(e) = self.graph.find_edge(b, a) {
            self.graph.remove_edge(e);
        }
    }
}
