use std::path::Path;

use crate::errors::EngineError;
use crate::langgraph::Recommendation;

/// Writes the `<L1>-<L2>-config` recommendation file:
/// `pathLen\tlang\t:\tspace-separated-path`, sorted ascending by path
/// weight. `engine::langgraph::recommend` already returns its entries in
/// that order, so this is a direct serialization: same `stats.csv` in, same
/// bytes out.
pub fn write(path: impl AsRef<Path>, recommendations: &[Recommendation]) -> Result<(), EngineError> {
    let path = path.as_ref();
    let mut text = String::new();
    for (lang, path_len, lang_path) in recommendations {
        text.push_str(&format!("{path_len}\t{lang}\t:\t{}\n", lang_path.join(" ")));
    }
    std::fs::write(path, text).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// One shortlist entry read back from a config file: a language and the
/// weight of the first path it appeared in. The `build` CLI subcommand only
/// needs this much to pick top-N intermediate languages; the full path
/// column is dropped on read.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigEntry {
    pub path_len: f64,
    pub lang: String,
}

pub fn read_shortlist(path: impl AsRef<Path>) -> Result<(Vec<ConfigEntry>, usize), EngineError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut entries = Vec::new();
    let mut malformed = 0;
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => malformed += 1,
        }
    }
    Ok((entries, malformed))
}

fn parse_line(line: &str) -> Option<ConfigEntry> {
    let mut fields = line.split('\t');
    let path_len: f64 = fields.next()?.parse().ok()?;
    let lang = fields.next()?.to_string();
    let sep = fields.next()?;
    if sep != ":" {
        return None;
    }
    let _path = fields.next()?;
    Some(ConfigEntry { path_len, lang })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_worked_example_line() {
        let entry = parse_line("0.22082497988083025\teng\t:\teng spa").unwrap();
        assert!((entry.path_len - 0.22082497988083025).abs() < 1e-12);
        assert_eq!(entry.lang, "eng");
    }

    #[test]
    fn round_trips_sorted_recommendations() {
        let recs: Vec<Recommendation> = vec![
            ("eng".to_string(), 0.489, vec!["eng".to_string()]),
            ("spa".to_string(), 0.75, vec!["eng".to_string(), "spa".to_string()]),
        ];
        let mut text = String::new();
        for (lang, len, path) in &recs {
            text.push_str(&format!("{len}\t{lang}\t:\t{}\n", path.join(" ")));
        }
        let mut entries = Vec::new();
        for line in text.lines() {
            entries.push(parse_line(line).unwrap());
        }
        assert_eq!(entries[0].lang, "eng");
        assert!((entries[1].path_len - 0.75).abs() < 1e-12);
    }
}
