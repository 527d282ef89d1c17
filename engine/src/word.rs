use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tags::Tags;

/// A canonical lexical item: a language, a lemma, and one or more tag-variant
/// readings. `variants` always holds at least one `Tags` once a `Word` has
/// passed through the unifier (engine::unify); an empty tag list is still a
/// valid `Tags` (representing "unknown/unspecified reading").
///
/// `Word`'s derived `PartialEq`/`Eq`/`Hash` are STRICT (structural):
/// same `lang`, same `lemma`, same `variants` in the same order. This is
/// the "exact-match" identity used as a `HashMap` key (engine::lexicon's
/// hash tier, engine::graph's node side table).
///
/// The source system's notion of Word equality is looser: two Words are
/// considered equal if one's tag list is a subset entry of the other's
/// variants. That relation is not transitive (it depends on which side is
/// under-specified) and cannot be a `HashMap`-compatible `Eq` impl, so it is
/// exposed instead as the explicit `Word::loosely_matches` method. Do not
/// attempt to store Words in a hashed set keyed by that looser relation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    pub lang: String,
    pub lemma: String,
    pub variants: Vec<Tags>,
}

impl Word {
    pub fn new(lang: impl Into<String>, lemma: impl Into<String>, variants: Vec<Tags>) -> Self {
        Word {
            lang: lang.into(),
            lemma: lemma.into(),
            variants,
        }
    }

    /// Spec §3 "Word equality": same lang, same lemma, and the tag sets
    /// either match exactly or one is contained as a variant of the other.
    /// Used by the lexicon's linear-scan tier and by consumers that supply
    /// an under-specified occurrence to resolve against a fully-tagged
    /// canonical node.
    pub fn loosely_matches(&self, other: &Word) -> bool {
        if self.lang != other.lang || self.lemma != other.lemma {
            return false;
        }
        if self.variants == other.variants {
            return true;
        }
        // Subset match, not exact containment: either side's reading may be
        // under-specified relative to the other.
        self.variants
            .iter()
            .any(|a| other.variants.iter().any(|b| a <= b || b <= a))
    }

    /// Spec §3 "Word strict partial order": `self < other` iff same
    /// lang/lemma and `self`'s tag set is a proper subset of `other`'s.
    /// Only meaningful when both Words carry a single Tags variant (the
    /// order is defined over the variant sets, not over multi-variant
    /// chains); callers comparing multi-variant Words should compare the
    /// relevant `Tags` directly instead.
    pub fn is_more_specific_than(&self, other: &Word) -> bool {
        if self.lang != other.lang || self.lemma != other.lemma {
            return false;
        }
        match (self.variants.as_slice(), other.variants.as_slice()) {
            ([a], [b]) => a < b,
            _ => false,
        }
    }

    /// `true` if any variant carries no atoms at all.
    pub fn has_empty_variant(&self) -> bool {
        self.variants.iter().any(Tags::is_empty)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags = if self.variants.is_empty() {
            "-".to_string()
        } else if self.variants.len() == 1 {
            self.variants[0].to_string()
        } else {
            format!(
                "[{}]",
                self.variants
                    .iter()
                    .map(Tags::to_string)
                    .collect::<Vec<_>>()
                    .join("_")
            )
        };
        write!(f, "{}${}${}", self.lang, self.lemma, tags)
    }
}
