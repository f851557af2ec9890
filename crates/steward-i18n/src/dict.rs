//! [`DictNode`] — one locale's dictionary as a tree of string leaves.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DictNode {
  Leaf(String),
  Branch(BTreeMap<String, DictNode>),
}

/// Why a path walk stopped before reaching its last segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMiss {
  /// No entry named by the segment at `depth`.
  Missing { depth: usize },
  /// The segment at `depth` tried to descend into a leaf.
  NotTraversable { depth: usize },
}

impl DictNode {
  pub fn empty() -> Self { Self::Branch(BTreeMap::new()) }

  /// Follow `segments` from this node.
  pub fn walk<'a, I>(&self, segments: I) -> Result<&DictNode, WalkMiss>
  where
    I: IntoIterator<Item = &'a str>,
  {
    let mut node = self;
    for (depth, segment) in segments.into_iter().enumerate() {
      node = match node {
        Self::Branch(children) => {
          children.get(segment).ok_or(WalkMiss::Missing { depth })?
        }
        Self::Leaf(_) => return Err(WalkMiss::NotTraversable { depth }),
      };
    }
    Ok(node)
  }

  pub fn as_leaf(&self) -> Option<&str> {
    match self {
      Self::Leaf(text) => Some(text),
      Self::Branch(_) => None,
    }
  }

  /// Dotted paths of every leaf below this node, in sorted order.
  pub fn leaf_keys(&self) -> Vec<String> {
    let mut keys = Vec::new();
    self.collect_leaf_keys(&mut String::new(), &mut keys);
    keys
  }

  fn collect_leaf_keys(&self, prefix: &mut String, out: &mut Vec<String>) {
    match self {
      Self::Leaf(_) => out.push(prefix.clone()),
      Self::Branch(children) => {
        for (name, child) in children {
          let len = prefix.len();
          if !prefix.is_empty() {
            prefix.push('.');
          }
          prefix.push_str(name);
          child.collect_leaf_keys(prefix, out);
          prefix.truncate(len);
        }
      }
    }
  }
}

/// A leaf renders as its text; a branch as compact JSON.
impl fmt::Display for DictNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Leaf(text) => f.write_str(text),
      Self::Branch(_) => {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
      }
    }
  }
}

impl From<&str> for DictNode {
  fn from(text: &str) -> Self { Self::Leaf(text.to_owned()) }
}

impl<K: Into<String>, const N: usize> From<[(K, DictNode); N]> for DictNode {
  fn from(children: [(K, DictNode); N]) -> Self {
    Self::Branch(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> DictNode {
    serde_json::from_str(r#"{"a": {"b": "hello", "c": {"d": "deep"}}, "top": "t"}"#)
      .unwrap()
  }

  #[test]
  fn walk_reaches_leaves_and_branches() {
    let dict = sample();
    assert_eq!(dict.walk(["a", "b"]).unwrap().as_leaf(), Some("hello"));
    assert_eq!(dict.walk(["a", "c", "d"]).unwrap().as_leaf(), Some("deep"));
    assert!(dict.walk(["a"]).unwrap().as_leaf().is_none());
    assert_eq!(dict.walk([]).unwrap(), &dict);
  }

  #[test]
  fn walk_distinguishes_missing_from_untraversable() {
    let dict = sample();
    assert_eq!(dict.walk(["a", "x"]), Err(WalkMiss::Missing { depth: 1 }));
    assert_eq!(
      dict.walk(["top", "more"]),
      Err(WalkMiss::NotTraversable { depth: 1 })
    );
  }

  #[test]
  fn branch_displays_as_json() {
    let dict = sample();
    let node = dict.walk(["a", "c"]).unwrap();
    assert_eq!(node.to_string(), r#"{"d":"deep"}"#);
  }

  #[test]
  fn leaf_keys_are_dotted_and_sorted() {
    assert_eq!(sample().leaf_keys(), vec!["a.b", "a.c.d", "top"]);
    assert!(DictNode::empty().leaf_keys().is_empty());
  }

  #[test]
  fn non_string_values_are_rejected() {
    assert!(serde_json::from_str::<DictNode>(r#"{"n": 3}"#).is_err());
  }

  #[test]
  fn builds_from_literals() {
    let dict = DictNode::from([("a", DictNode::from([("b", DictNode::from("hello"))]))]);
    assert_eq!(dict, serde_json::from_str(r#"{"a":{"b":"hello"}}"#).unwrap());
  }
}
