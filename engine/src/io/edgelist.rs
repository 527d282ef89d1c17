use std::path::Path;

use crate::edges::{BilingualRecord, Side};
use crate::errors::EngineError;
use crate::tags::{format_tag_groups, parse_tag_groups};

/// Reads a bilingual edge-list file (`<L1>-<L2>`, UTF-8): one
/// `side\tlangL\tlemmaL\ttagsL\tlangR\tlemmaR\ttagsR` record per line.
/// `tagsL`/`tagsR` use the same `$`-separated/`_`-joined tag-variant-group
/// wire shape as `io::monodix` (spec §6: "tagsL and tagsR encode Tags chains
/// exactly as in the lexicon file"). The left/right language columns are
/// read but not threaded through `BilingualRecord` — the caller already
/// knows which lexicons to resolve against. Malformed lines are skipped with
/// a running counter.
pub fn read(path: impl AsRef<Path>) -> Result<(Vec<BilingualRecord>, usize), EngineError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut records = Vec::new();
    let mut malformed = 0;
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(record) => records.push(record),
            None => malformed += 1,
        }
    }
    Ok((records, malformed))
}

fn parse_line(line: &str) -> Option<BilingualRecord> {
    let mut fields = line.split('\t');
    let side = parse_side(fields.next()?)?;
    let _lang_left = fields.next()?;
    let lemma_left = fields.next()?.to_string();
    let tags_left = parse_tag_groups(fields.next()?);
    let _lang_right = fields.next()?;
    let lemma_right = fields.next()?.to_string();
    let tags_right = parse_tag_groups(fields.next()?);
    if fields.next().is_some() {
        return None;
    }
    Some(BilingualRecord {
        side,
        lemma_left,
        tags_left,
        lemma_right,
        tags_right,
    })
}

fn parse_side(raw: &str) -> Option<Side> {
    match raw {
        "" => Some(Side::Both),
        "LR" => Some(Side::Lr),
        "RL" => Some(Side::Rl),
        _ => None,
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Both => "",
        Side::Lr => "LR",
        Side::Rl => "RL",
    }
}

/// Writes an edge-list file for the `(lang_left, lang_right)` pair.
/// `lang_left`/`lang_right` are supplied by the caller since
/// `BilingualRecord` itself doesn't carry them (see `read` above).
pub fn write(path: impl AsRef<Path>, lang_left: &str, lang_right: &str, records: &[BilingualRecord]) -> Result<(), EngineError> {
    let path = path.as_ref();
    let mut text = String::new();
    for record in records {
        text.push_str(&format!(
            "{side}\t{lang_left}\t{lemma_left}\t{tags_left}\t{lang_right}\t{lemma_right}\t{tags_right}\n",
            side = side_label(record.side),
            lemma_left = record.lemma_left,
            tags_left = format_tag_groups(&record.tags_left),
            lemma_right = record.lemma_right,
            tags_right = format_tag_groups(&record.tags_right),
        ));
    }
    std::fs::write(path, text).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::parse_tags;

    #[test]
    fn parses_both_and_directional_sides() {
        let both = parse_line("\trus\tstol\tn-m\teng\ttable\tn").unwrap();
        assert_eq!(both.side, Side::Both);
        let lr = parse_line("LR\trus\tghost\tn\teng\ttable\tn").unwrap();
        assert_eq!(lr.side, Side::Lr);
    }

    #[test]
    fn malformed_line_missing_field_is_skipped() {
        assert!(parse_line("LR\trus\tstol\tn-m").is_none());
    }

    #[test]
    fn parses_multi_group_tag_field() {
        let record = parse_line("\trus\tstol\tn-m_n-m-sg$n-f-sg\teng\ttable\tn").unwrap();
        assert_eq!(
            record.tags_left,
            vec![
                vec![parse_tags("n-m"), parse_tags("n-m-sg")],
                vec![parse_tags("n-f-sg")],
            ]
        );
    }

    #[test]
    fn round_trips_through_write_and_read() {
        let records = vec![BilingualRecord {
            side: Side::Rl,
            lemma_left: "stol".to_string(),
            tags_left: vec![vec![parse_tags("n-m"), parse_tags("n-m-sg")], vec![parse_tags("n-f-sg")]],
            lemma_right: "table".to_string(),
            tags_right: vec![vec![parse_tags("n")]],
        }];
        let mut text = String::new();
        for r in &records {
            text.push_str(&format!(
                "{}\trus\t{}\t{}\teng\t{}\t{}\n",
                side_label(r.side),
                r.lemma_left,
                format_tag_groups(&r.tags_left),
                r.lemma_right,
                format_tag_groups(&r.tags_right)
            ));
        }
        let reparsed = parse_line(text.trim_end()).unwrap();
        assert_eq!(reparsed.side, Side::Rl);
        assert_eq!(reparsed.lemma_left, "stol");
        assert_eq!(reparsed.tags_left, records[0].tags_left);
    }
}
