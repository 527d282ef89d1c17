use std::path::Path;

use crate::errors::EngineError;
use crate::word::Word;

/// One `<L1>-<L2>-preview` row: a candidate translation pair plus its
/// per-direction scores. A score of `0` means no evidence in that
/// direction.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewEntry {
    pub left: Word,
    pub right: Word,
    pub score_lr: f64,
    pub score_rl: f64,
}

/// Writes the preview file. `score_lr` carries the score from the L1->L2
/// search pass (an L1 word with no existing L2 translation, scored against
/// its L2 candidates) and `score_rl` the L2->L1 pass's score; a pair found
/// by only one direction's search gets `0` in the other slot, it is not
/// backfilled from the other direction. Nothing downstream reads a preview
/// file back, so this module has no corresponding reader.
pub fn write(path: impl AsRef<Path>, entries: &[PreviewEntry]) -> Result<(), EngineError> {
    let path = path.as_ref();
    let mut text = String::new();
    for entry in entries {
        let tag_l = entry.left.variants.first().cloned().unwrap_or_default();
        let tag_r = entry.right.variants.first().cloned().unwrap_or_default();
        text.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            entry.left.lemma, tag_l, entry.right.lemma, tag_r, entry.score_lr, entry.score_rl
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
    fn writes_zero_for_missing_direction() {
        let entries = vec![PreviewEntry {
            left: Word::new("rus", "stol", vec![parse_tags("n-m")]),
            right: Word::new("eng", "table", vec![parse_tags("n")]),
            score_lr: 0.271,
            score_rl: 0.0,
        }];
        let dir = std::env::temp_dir().join("lexigraph-preview-test.tmp");
        write(&dir, &entries).unwrap();
        let contents = std::fs::read_to_string(&dir).unwrap();
        assert_eq!(contents, "stol\tn-m\ttable\tn\t0.271\t0\n");
        std::fs::remove_file(&dir).ok();
    }
}
