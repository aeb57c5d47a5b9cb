//! Source-position side-table.
//!
//! Nodes never carry their own source ranges. The parser records one
//! [`NodePosition`] per node in a [`PositionTable`] keyed by [`NodeId`];
//! stripping positions removes the entries and leaves the tree untouched.

use crate::token::Token;
use crate::types::NodeId;
use serde::Serialize;
use xmlui_core::text::TextPos;
use xmlui_core::FxHashMap;

/// Where a node starts and ends, with the tokens that delimit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePosition {
    pub start_position: TextPos,
    pub end_position: TextPos,
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
    pub start_token: Token,
    pub end_token: Token,
}

impl NodePosition {
    pub fn from_tokens(start: &Token, end: &Token) -> Self {
        Self {
            start_position: start.start_position,
            end_position: end.end_position,
            start_line: start.start_line,
            end_line: end.end_line,
            start_column: start.start_column,
            end_column: end.end_column,
            start_token: start.clone(),
            end_token: end.clone(),
        }
    }
}

/// Positions of parsed nodes, keyed by node identity.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PositionTable {
    entries: FxHashMap<NodeId, NodePosition>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, position: NodePosition) {
        self.entries.insert(id, position);
    }

    pub fn get(&self, id: NodeId) -> Option<&NodePosition> {
        self.entries.get(&id)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<NodePosition> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move every entry of `other` into this table.
    pub fn merge(&mut self, other: PositionTable) {
        self.entries.extend(other.entries);
    }

    /// Keep only the entries whose IDs satisfy `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        self.entries.retain(|id, _| keep(*id));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodePosition)> {
        self.entries.iter()
    }
}
