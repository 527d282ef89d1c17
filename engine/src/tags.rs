use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{de::Visitor, Deserialize, Serialize};

/// An ordered set of atomic morphological tags annotating one reading of a
/// word (e.g. `n-m-sg`). Order is preserved for emission but is semantically
/// irrelevant for comparison: two `Tags` with the same atoms in a different
/// order are equal.
#[derive(Clone, Debug, Default, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new(atoms: Vec<String>) -> Self {
        Tags(atoms)
    }

    pub fn empty() -> Self {
        Tags(Vec::new())
    }

    pub fn atoms(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_set(&self) -> HashSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    /// `true` iff `self` and `other`, read as sets, are comparable at all
    /// (equal, subset, or superset) under the partial order.
    pub fn is_comparable_to(&self, other: &Tags) -> bool {
        self.partial_cmp(other).is_some()
    }
}

impl From<Vec<String>> for Tags {
    fn from(atoms: Vec<String>) -> Self {
        Tags(atoms)
    }
}

impl FromIterator<String> for Tags {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Tags(iter.into_iter().collect())
    }
}

impl PartialEq for Tags {
    fn eq(&self, other: &Self) -> bool {
        self.as_set() == other.as_set()
    }
}

impl std::hash::Hash for Tags {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Hash must agree with Eq (set equality), so hash the sorted atoms
        // rather than the Vec's insertion order.
        let mut sorted: Vec<&str> = self.0.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.hash(state);
    }
}

impl PartialOrd for Tags {
    /// `A <= B` iff `A` is a subset of `B`; `A < B` iff a proper subset;
    /// `A == B` iff equal as sets; otherwise the two are incomparable
    /// (conflicting information), returning `None`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let a = self.as_set();
        let b = other.as_set();
        if a == b {
            Some(Ordering::Equal)
        } else if a.is_subset(&b) {
            Some(Ordering::Less)
        } else if b.is_subset(&a) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("-"))
    }
}

impl Serialize for Tags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(TagsVisitor)
    }
}

struct TagsVisitor;

impl<'de> Visitor<'de> for TagsVisitor {
    type Value = Tags;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a '-'-joined tag string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(parse_tags(v))
    }
}

/// Parses a single `-`-joined chain such as `n-m-sg`, dropping empty atoms
/// (an empty string parses to the empty Tags).
pub fn parse_tags(s: &str) -> Tags {
    Tags(s.split('-').filter(|a| !a.is_empty()).map(str::to_owned).collect())
}

/// Parses spec §6's common tag-variant-group wire shape, shared by
/// `io::monodix` and `io::edgelist`: a `$`-separated list of groups, each
/// group a `_`-joined list of `-`-joined `Tags` chains.
pub fn parse_tag_groups(s: &str) -> Vec<Vec<Tags>> {
    s.split('$').map(|group| group.split('_').map(parse_tags).collect()).collect()
}

/// Inverse of `parse_tag_groups`.
pub fn format_tag_groups(groups: &[Vec<Tags>]) -> String {
    groups
        .iter()
        .map(|group| group.iter().map(Tags::to_string).collect::<Vec<_>>().join("_"))
        .collect::<Vec<_>>()
        .join("$")
}

#[cfg(test)]
mod tag_group_tests {
    use super::*;

    #[test]
    fn parses_multi_group_chain_field() {
        let groups = parse_tag_groups("n-m_n-m-sg$n-f-sg");
        assert_eq!(
            groups,
            vec![vec![parse_tags("n-m"), parse_tags("n-m-sg")], vec![parse_tags("n-f-sg")]]
        );
    }

    #[test]
    fn format_round_trips_parse() {
        let groups = vec![vec![parse_tags("n-m"), parse_tags("n-m-sg")], vec![parse_tags("n-f-sg")]];
        assert_eq!(parse_tag_groups(&format_tag_groups(&groups)), groups);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_ordering() {
        let nm = parse_tags("n-m");
        let nmsg = parse_tags("n-m-sg");
        assert!(nm < nmsg);
        assert!(nm <= nmsg);
        assert_ne!(nm, nmsg);
    }

    #[test]
    fn incomparable_sets_return_none() {
        let nm = parse_tags("n-m");
        let nfsg = parse_tags("n-f-sg");
        assert_eq!(nm.partial_cmp(&nfsg), None);
        assert!(!nm.is_comparable_to(&nfsg));
    }

    #[test]
    fn order_irrelevant_to_equality() {
        let a = Tags::new(vec!["n".into(), "m".into(), "sg".into()]);
        let b = Tags::new(vec!["sg".into(), "n".into(), "m".into()]);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_tags_is_valid() {
        let empty = parse_tags("");
        assert!(empty.is_empty());
        assert_eq!(empty, Tags::empty());
    }
}
