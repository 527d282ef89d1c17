use std::path::Path;

use crate::errors::EngineError;
use crate::tags::{format_tag_groups, parse_tag_groups, Tags};
use crate::unify::UnifiedLemma;
use crate::word::Word;

/// One line of a `monodix/<lang>.dix` file: a lemma plus its tag-variant
/// groups, each group a chain of mutually comparable `Tags` in the order
/// the unifier (`engine::unify`) produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct MonodixEntry {
    pub lemma: String,
    pub groups: Vec<Vec<Tags>>,
}

impl MonodixEntry {
    /// Resolves this entry to the canonical `Word` a lexicon stores, reusing
    /// the unifier's own group-collapse rule so a `.dix` file round-trips
    /// through the same logic that produced it.
    pub fn to_word(&self, lang: &str) -> Word {
        UnifiedLemma {
            lemma: self.lemma.clone(),
            groups: self.groups.clone(),
        }
        .to_word(lang)
    }
}

/// Reads a UTF-16 `monodix/<lang>.dix` file. Returns parsed entries
/// alongside a count of malformed lines skipped silently (never fatal). A
/// missing file surfaces as `EngineError::Io`.
pub fn read(path: impl AsRef<Path>) -> Result<(Vec<MonodixEntry>, usize), EngineError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = decode_utf16(&bytes);

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

fn parse_line(line: &str) -> Option<MonodixEntry> {
    let (lemma, variants) = line.split_once('\t')?;
    if lemma.is_empty() {
        return None;
    }
    Some(MonodixEntry {
        lemma: lemma.to_string(),
        groups: parse_tag_groups(variants),
    })
}

fn decode_utf16(bytes: &[u8]) -> String {
    let (encoding, bom_len) = encoding_rs::Encoding::for_bom(bytes).unwrap_or((encoding_rs::UTF_16LE, 0));
    let (text, _, _) = encoding.decode(&bytes[bom_len..]);
    text.into_owned()
}

/// Writes entries as a UTF-16LE `monodix/<lang>.dix` file with a leading
/// BOM.
pub fn write(path: impl AsRef<Path>, entries: &[MonodixEntry]) -> Result<(), EngineError> {
    let path = path.as_ref();
    let mut text = String::new();
    for entry in entries {
        text.push_str(&entry.lemma);
        text.push('\t');
        text.push_str(&format_tag_groups(&entry.groups));
        text.push('\n');
    }

    let mut bytes: Vec<u8> = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    std::fs::write(path, bytes).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })
}
