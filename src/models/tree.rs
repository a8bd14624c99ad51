//! The canonical token tree.
//!
//! A tree maps path segments to either a nested group or a terminal token.
//! Children keep insertion order so that flattening, and therefore every
//! rendered artifact, is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::token::Token;

/// Error loading or saving a token tree
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid token JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid token JSON5: {0}")]
    Json5(#[from] json5::Error),
}

/// A node is either a token (it has a `value`) or a group of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    Token(Token),
    Group(TokenTree),
}

/// Ordered tree of tokens keyed by path segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTree {
    nodes: IndexMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self { nodes: IndexMap::new() }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a token at `path`, overwriting whatever is there.
    ///
    /// Returns the node that was displaced: the previous node at `path`, or
    /// a token that sat where a group is now needed. An empty path is
    /// ignored.
    pub fn insert(&mut self, path: &[String], mut token: Token) -> Option<TokenNode> {
        let (last, parents) = path.split_last()?;
        token.path = path.to_vec();

        let mut displaced = None;
        let mut current = self;
        for segment in parents {
            let node = current
                .nodes
                .entry(segment.clone())
                .or_insert_with(|| TokenNode::Group(TokenTree::new()));
            if matches!(node, TokenNode::Token(_)) {
                let old = std::mem::replace(node, TokenNode::Group(TokenTree::new()));
                displaced.get_or_insert(old);
            }
            current = match node {
                TokenNode::Group(group) => group,
                TokenNode::Token(_) => return displaced,
            };
        }

        let previous = current.nodes.insert(last.clone(), TokenNode::Token(token));
        displaced.or(previous)
    }

    /// Look up a token by path segments.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Token> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for segment in parents {
            match current.nodes.get(segment.as_ref())? {
                TokenNode::Group(group) => current = group,
                TokenNode::Token(_) => return None,
            }
        }
        match current.nodes.get(last.as_ref())? {
            TokenNode::Token(token) => Some(token),
            TokenNode::Group(_) => None,
        }
    }

    /// Look up a token by dot-joined path (`"colors.primary.500"`).
    pub fn get_by_key(&self, key: &str) -> Option<&Token> {
        let segments: Vec<&str> = key.split('.').collect();
        self.get(&segments)
    }

    /// All tokens, depth-first, in insertion order.
    pub fn flatten(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for node in self.nodes.values() {
            match node {
                TokenNode::Token(token) => out.push(token),
                TokenNode::Group(group) => group.collect_tokens(out),
            }
        }
    }

    /// Total number of terminal tokens.
    pub fn token_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node| match node {
                TokenNode::Token(_) => 1,
                TokenNode::Group(group) => group.token_count(),
            })
            .sum()
    }

    /// Deep-merge `other` into this tree. Tokens from `other` win; the
    /// dot-joined paths of overwritten nodes are returned.
    pub fn merge(&mut self, other: TokenTree) -> Vec<String> {
        let mut collisions = Vec::new();
        self.merge_at(other, &mut Vec::new(), &mut collisions);
        collisions
    }

    fn merge_at(&mut self, other: TokenTree, prefix: &mut Vec<String>, collisions: &mut Vec<String>) {
        for (key, incoming) in other.nodes {
            prefix.push(key.clone());
            match (self.nodes.get_mut(&key), incoming) {
                (Some(TokenNode::Group(existing)), TokenNode::Group(group)) => {
                    existing.merge_at(group, prefix, collisions);
                }
                (Some(existing), incoming) => {
                    collisions.push(prefix.join("."));
                    *existing = incoming;
                }
                (None, incoming) => {
                    self.nodes.insert(key, incoming);
                }
            }
            prefix.pop();
        }
    }

    /// Re-derive every token's path from the keys of its ancestors.
    pub fn rebuild_paths(&mut self) {
        self.rebuild_paths_at(&mut Vec::new());
    }

    fn rebuild_paths_at(&mut self, prefix: &mut Vec<String>) {
        for (key, node) in self.nodes.iter_mut() {
            prefix.push(key.clone());
            match node {
                TokenNode::Token(token) => token.path = prefix.clone(),
                TokenNode::Group(group) => group.rebuild_paths_at(prefix),
            }
            prefix.pop();
        }
    }

    /// Parse a token file in JSON form.
    pub fn from_json(source: &str) -> Result<Self, TreeError> {
        let mut tree: TokenTree = serde_json::from_str(source)?;
        tree.rebuild_paths();
        Ok(tree)
    }

    /// Parse a token file in JSON5 form.
    pub fn from_json5(source: &str) -> Result<Self, TreeError> {
        let mut tree: TokenTree = json5::from_str(source)?;
        tree.rebuild_paths();
        Ok(tree)
    }

    /// Load a token file, choosing the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let source = std::fs::read_to_string(path)
            .map_err(|source| TreeError::Io { path: path.to_path_buf(), source })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json5") => Self::from_json5(&source),
            _ => Self::from_json(&source),
        }
    }

    /// Pretty-printed JSON token file.
    pub fn to_json_pretty(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
