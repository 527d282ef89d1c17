use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lexigraph_core::edges::{build_edge_list, ResolvedEdge};
use lexigraph_core::graph::TranslationGraph;
use lexigraph_core::io::{edgelist, monodix, stats};
use lexigraph_core::langgraph::LanguageMetaGraph;
use lexigraph_core::lexicon::Lexicon;

/// Reads `<monodix_dir>/<lang>.dix` and resolves every entry to its
/// canonical `Word`, following the same collapse the monolingual unifier
/// uses.
pub fn load_lexicon(monodix_dir: &Path, lang: &str) -> Result<(Lexicon, usize)> {
    let path = monodix_dir.join(format!("{lang}.dix"));
    debug!("reading monodix file {}", path.display());
    let (entries, malformed) = monodix::read(&path).context(format!("error reading monodix file {}", path.display()))?;

    let mut lexicon = Lexicon::new(lang);
    for entry in &entries {
        lexicon.insert(entry.to_word(lang));
    }
    Ok((lexicon, malformed))
}

/// Reads `<parsed_dir>/<lang_left>-<lang_right>` and resolves every raw
/// record against the two lexicons. Returns the resolved edges plus a
/// `(malformed_lines, dropped_records)` pair so callers can report both
/// failure modes.
pub fn load_resolved_edges(
    parsed_dir: &Path,
    lang_left: &str,
    lang_right: &str,
    left_lexicon: &Lexicon,
    right_lexicon: &Lexicon,
) -> Result<(Vec<ResolvedEdge>, usize, usize)> {
    let path = parsed_dir.join(format!("{lang_left}-{lang_right}"));
    debug!("reading edge-list file {}", path.display());
    let (raw, malformed) = edgelist::read(&path).context(format!("error reading edge-list file {}", path.display()))?;
    let (resolved, dropped) = build_edge_list(left_lexicon, right_lexicon, &raw);
    Ok((resolved, malformed, dropped))
}

/// Loads the language-pair meta-graph from `stats.csv`.
pub fn load_meta_graph(stats_path: &Path) -> Result<LanguageMetaGraph> {
    debug!("reading stats file {}", stats_path.display());
    let (rows, malformed) = stats::read(stats_path).context(format!("error reading stats file {}", stats_path.display()))?;
    if malformed > 0 {
        warn!("{} malformed rows skipped in {}", malformed, stats_path.display());
    }
    Ok(stats::build_meta_graph(&rows))
}

/// Reads a previously written `<L1>-<L2>-config` recommendation file and
/// returns the top-N language codes (source/target always included),
/// matching the original `load_file`'s top-N-plus-endpoints selection.
pub fn shortlisted_languages(config_path: &Path, lang1: &str, lang2: &str, n: usize) -> Result<Vec<String>> {
    let (entries, _) = lexigraph_core::io::config::read_shortlist(config_path)
        .context(format!("error reading recommendation file {}", config_path.display()))?;
    let mut langs: Vec<String> = entries.into_iter().take(n).map(|e| e.lang).collect();
    for required in [lang1, lang2] {
        if !langs.iter().any(|l| l == required) {
            langs.push(required.to_string());
        }
    }
    Ok(langs)
}

pub fn default_monodix_dir() -> PathBuf {
    PathBuf::from("monodix")
}

pub fn default_parsed_dir() -> PathBuf {
    PathBuf::from("parsed")
}

pub fn default_stats_path() -> PathBuf {
    PathBuf::from("stats.csv")
}

pub fn default_config_path(lang1: &str, lang2: &str) -> PathBuf {
    PathBuf::from(format!("{lang1}-{lang2}-config"))
}

/// Report of one `build_translation_graph` run: total malformed lines and
/// dropped (unresolvable) records across every pair file that was present.
#[derive(Clone, Debug, Default)]
pub struct BuildReport {
    pub malformed_lines: usize,
    pub dropped_records: usize,
    pub missing_pairs: usize,
}

/// Builds a `TranslationGraph` restricted to `languages`: loads every
/// language's lexicon, then for each unordered pair with both languages in
/// the shortlist, reads its edge-list file if present (pairs with no
/// bilingual evidence simply have no file) and folds its resolved edges
/// into one combined edge list.
pub fn build_translation_graph(
    monodix_dir: &Path,
    parsed_dir: &Path,
    languages: &[String],
) -> Result<(TranslationGraph, BuildReport)> {
    let mut lexicons: HashMap<&str, Lexicon> = HashMap::new();
    for lang in languages {
        let (lexicon, malformed) = load_lexicon(monodix_dir, lang)?;
        if malformed > 0 {
            warn!("{} malformed lines skipped in monodix/{}.dix", malformed, lang);
        }
        lexicons.insert(lang.as_str(), lexicon);
    }

    let mut report = BuildReport::default();
    let mut all_edges: Vec<ResolvedEdge> = Vec::new();

    for (i, a) in languages.iter().enumerate() {
        for b in &languages[i + 1..] {
            let path = parsed_dir.join(format!("{a}-{b}"));
            if !path.exists() {
                report.missing_pairs += 1;
                continue;
            }
            let (resolved, malformed, dropped) =
                load_resolved_edges(parsed_dir, a, b, &lexicons[a.as_str()], &lexicons[b.as_str()])?;
            report.malformed_lines += malformed;
            report.dropped_records += dropped;
            all_edges.extend(resolved);
        }
    }

    Ok((TranslationGraph::from_edges(&all_edges), report))
}
