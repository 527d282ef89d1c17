use std::path::Path;

use crate::errors::EngineError;
use crate::langgraph::LanguageMetaGraph;

/// One row of `stats.csv` (tab-separated despite the `.csv` name): a
/// language pair plus its bilingual-dictionary evidence counts.
#[derive(Clone, Debug, PartialEq)]
pub struct PairStats {
    pub lang_a: String,
    pub lang_b: String,
    pub both: u32,
    pub lr: u32,
    pub rl: u32,
}

/// Reads `stats.csv`. Malformed rows are skipped with a running counter.
pub fn read(path: impl AsRef<Path>) -> Result<(Vec<PairStats>, usize), EngineError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut stats = Vec::new();
    let mut malformed = 0;
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(row) => stats.push(row),
            None => malformed += 1,
        }
    }
    Ok((stats, malformed))
}

fn parse_line(line: &str) -> Option<PairStats> {
    let mut fields = line.split('\t');
    let lang_a = fields.next()?.to_string();
    let lang_b = fields.next()?.to_string();
    let both = fields.next()?.parse().ok()?;
    let lr = fields.next()?.parse().ok()?;
    let rl = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(PairStats { lang_a, lang_b, both, lr, rl })
}

/// Builds the language-pair meta-graph straight from parsed rows — the one
/// place `stats.csv` feeds `engine::langgraph`.
pub fn build_meta_graph(stats: &[PairStats]) -> LanguageMetaGraph {
    let mut graph = LanguageMetaGraph::new();
    for row in stats {
        graph.add_pair(&row.lang_a, &row.lang_b, row.both, row.lr, row.rl);
    }
    graph
}

pub fn write(path: impl AsRef<Path>, stats: &[PairStats]) -> Result<(), EngineError> {
    let path = path.as_ref();
    let mut text = String::new();
    for row in stats {
        text.push_str(&format!("{}\t{}\t{}\t{}\t{}\n", row.lang_a, row.lang_b, row.both, row.lr, row.rl));
    }
    std::fs::write(path, text).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_builds_meta_graph() {
        let (stats, malformed) = {
            let mut s = Vec::new();
            let mut m = 0;
            for line in ["eng\tspa\t100\t0\t0", "bogus-row"] {
                match parse_line(line) {
                    Some(row) => s.push(row),
                    None => m += 1,
                }
            }
            (s, m)
        };
        assert_eq!(malformed, 1);
        let graph = build_meta_graph(&stats);
        assert!(graph.contains("eng"));
        assert!(graph.contains("spa"));
    }

    #[test]
    fn rejects_non_numeric_counts() {
        assert!(parse_line("eng\tspa\tmany\t0\t0").is_none());
    }
}
