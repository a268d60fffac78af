use alloc::vec::Vec;
use core::fmt;

use crate::{ConstructionError, NodeRef};

/// The index of a completed node within the current document.
///
/// Indices are assigned sequentially from 0 as nodes complete, and are only
/// meaningful within the document that produced them.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn new(index: usize) -> SymbolId {
        SymbolId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only log of the nodes completed so far in one document.
///
/// A node is pushed only once it is fully built, so every index handed out
/// refers to a finished node.
#[derive(Default, Debug)]
pub struct SymbolTable {
    nodes: Vec<NodeRef>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            nodes: Vec::with_capacity(16),
        }
    }

    /// Append a completed node and return its index.
    pub fn push(&mut self, node: NodeRef) -> SymbolId {
        self.nodes.push(node);
        SymbolId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: SymbolId) -> Option<&NodeRef> {
        self.nodes.get(id.0)
    }

    /// Resolve an index to a new reference to its node.
    ///
    /// An index that was never handed out is an internal consistency failure.
    pub fn resolve(&self, id: SymbolId) -> Result<NodeRef, ConstructionError> {
        self.get(id)
            .cloned()
            .ok_or(ConstructionError::UnknownSymbol {
                index: id.0,
                len: self.nodes.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Discard the table, keeping only the node at `root`.
    pub fn into_root(mut self, root: SymbolId) -> Result<NodeRef, ConstructionError> {
        if root.0 >= self.nodes.len() {
            return Err(ConstructionError::UnknownSymbol {
                index: root.0,
                len: self.nodes.len(),
            });
        }
        Ok(self.nodes.swap_remove(root.0))
    }
}
