use alloc::collections::TryReserveError;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::ValidationError;

/// A shared reference to a completed node.
///
/// A node reachable through an anchor may have several parents, so children
/// are held by reference count rather than owned outright. Nodes are immutable
/// once shared; use [`Rc::make_mut`] to edit one in place.
pub type NodeRef = Rc<Node>;

/// The node kind, fixed by the variant.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum NodeKind {
    /// A scalar node.
    Scalar,
    /// A sequence node.
    Sequence,
    /// A mapping node.
    Mapping,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "seq",
            NodeKind::Mapping => "map",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar styles.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum ScalarStyle {
    /// Let the emitter choose the style.
    #[default]
    Any,
    /// The single-quoted scalar style.
    SingleQuoted,
    /// The double-quoted scalar style.
    DoubleQuoted,
    /// The folded scalar style.
    Folded,
    /// The literal scalar style.
    Literal,
    /// The plain scalar style.
    Plain,
}

impl ScalarStyle {
    /// The textual name of the style, `None` for [`ScalarStyle::Any`].
    pub fn name(self) -> Option<&'static str> {
        match self {
            ScalarStyle::Any => None,
            ScalarStyle::SingleQuoted => Some("1quote"),
            ScalarStyle::DoubleQuoted => Some("2quote"),
            ScalarStyle::Folded => Some("fold"),
            ScalarStyle::Literal => Some("literal"),
            ScalarStyle::Plain => Some("plain"),
        }
    }

    /// Literal and folded scalars are block scalars; only they use `indent`
    /// and `chomp`.
    pub fn is_block(self) -> bool {
        matches!(self, ScalarStyle::Literal | ScalarStyle::Folded)
    }
}

impl FromStr for ScalarStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1quote" => Ok(ScalarStyle::SingleQuoted),
            "2quote" => Ok(ScalarStyle::DoubleQuoted),
            "fold" => Ok(ScalarStyle::Folded),
            "literal" => Ok(ScalarStyle::Literal),
            "plain" => Ok(ScalarStyle::Plain),
            _ => Err(ValidationError::UnknownStyle(s.to_string())),
        }
    }
}

/// Trailing line break handling for block scalars.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Chomp {
    /// Keep a single trailing line break.
    #[default]
    Clip,
    /// Remove all trailing line breaks (`-`).
    Strip,
    /// Keep all trailing line breaks (`+`).
    Keep,
}

impl Chomp {
    /// The block indicator for this chomping method, `None` for
    /// [`Chomp::Clip`].
    pub fn name(self) -> Option<&'static str> {
        match self {
            Chomp::Clip => None,
            Chomp::Strip => Some("-"),
            Chomp::Keep => Some("+"),
        }
    }
}

impl FromStr for Chomp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Chomp::Strip),
            "+" => Ok(Chomp::Keep),
            _ => Err(ValidationError::UnknownChomp(s.to_string())),
        }
    }
}

/// A scalar node body: a single string value plus its presentation.
///
/// The value is kept as raw bytes. Scanners report scalar content by length,
/// so it may contain embedded NUL bytes.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Scalar {
    value: Vec<u8>,
    style: ScalarStyle,
    indent: u32,
    width: u32,
    chomp: Chomp,
}

impl Scalar {
    pub fn new(value: impl Into<Vec<u8>>) -> Scalar {
        Scalar {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The value as text, or `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.value).ok()
    }

    pub fn set_value(&mut self, value: impl Into<Vec<u8>>) {
        self.value = value.into();
    }

    pub fn into_value(self) -> Vec<u8> {
        self.value
    }

    pub fn style(&self) -> ScalarStyle {
        self.style
    }

    pub fn set_style(&mut self, style: ScalarStyle) {
        self.style = style;
    }

    /// Set the style by name. `None` resets it to [`ScalarStyle::Any`].
    ///
    /// An unknown name is rejected and the current style is kept.
    pub fn set_style_name(&mut self, name: Option<&str>) -> Result<(), ValidationError> {
        self.style = match name {
            None => ScalarStyle::Any,
            Some(name) => name.parse()?,
        };
        Ok(())
    }

    /// Indentation of a block scalar; meaningless for other styles.
    pub fn indent(&self) -> u32 {
        self.indent
    }

    pub fn set_indent(&mut self, indent: u32) {
        self.indent = indent;
    }

    /// Preferred wrap width, 0 if unspecified.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn chomp(&self) -> Chomp {
        self.chomp
    }

    pub fn set_chomp(&mut self, chomp: Chomp) {
        self.chomp = chomp;
    }

    /// Set the chomping method by indicator: `"-"`, `"+"`, or `None` for
    /// clip. Anything else is rejected and the current method is kept.
    pub fn set_chomp_name(&mut self, name: Option<&str>) -> Result<(), ValidationError> {
        self.chomp = match name {
            None => Chomp::Clip,
            Some(name) => name.parse()?,
        };
        Ok(())
    }

    #[must_use]
    pub fn with_style(mut self, style: ScalarStyle) -> Scalar {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: u32) -> Scalar {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Scalar {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_chomp(mut self, chomp: Chomp) -> Scalar {
        self.chomp = chomp;
        self
    }
}

/// A sequence node body: an ordered list of child nodes.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Sequence {
    items: Vec<NodeRef>,
    inline: bool,
}

impl Sequence {
    pub fn new(items: Vec<NodeRef>) -> Sequence {
        Sequence {
            items,
            inline: false,
        }
    }

    pub fn value(&self) -> &[NodeRef] {
        &self.items
    }

    pub fn value_mut(&mut self) -> &mut Vec<NodeRef> {
        &mut self.items
    }

    pub fn set_value(&mut self, items: Vec<NodeRef>) {
        self.items = items;
    }

    pub fn push(&mut self, item: NodeRef) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&NodeRef> {
        self.items.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, NodeRef> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flow style (`[a, b]`) if true, block style otherwise.
    pub fn inline(&self) -> bool {
        self.inline
    }

    pub fn set_inline(&mut self, inline: bool) {
        self.inline = inline;
    }

    #[must_use]
    pub fn with_inline(mut self, inline: bool) -> Sequence {
        self.inline = inline;
        self
    }

    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.items.try_reserve_exact(additional)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a NodeRef;
    type IntoIter = core::slice::Iter<'a, NodeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A mapping node body: key/value pairs in encounter order.
///
/// Keys are arbitrary nodes. Two keys are the same entry only if they are the
/// same node instance; equal-looking keys from different nodes are kept apart,
/// since the emitter must reproduce them as written.
#[derive(Clone, Default)]
pub struct Mapping {
    pairs: Vec<(NodeRef, NodeRef)>,
    /// Position of each key in `pairs`, by node identity. Every key is held by
    /// `pairs`, so no address is reused while it is in the index.
    index: HashMap<*const Node, usize>,
    inline: bool,
}

impl Mapping {
    pub fn new() -> Mapping {
        Mapping::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (NodeRef, NodeRef)>) -> Mapping {
        let mut mapping = Mapping::new();
        for (key, value) in pairs {
            mapping.insert(key, value);
        }
        mapping
    }

    /// The pairs, in insertion order.
    pub fn value(&self) -> &[(NodeRef, NodeRef)] {
        &self.pairs
    }

    /// Replace every pair at once.
    pub fn set_value(&mut self, pairs: impl IntoIterator<Item = (NodeRef, NodeRef)>) {
        self.pairs.clear();
        self.index.clear();
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// Insert a pair, returning the previous value if `key` is already present
    /// as a key. The position of an existing entry is kept.
    pub fn insert(&mut self, key: NodeRef, value: NodeRef) -> Option<NodeRef> {
        match self.index.entry(Rc::as_ptr(&key)) {
            Entry::Occupied(entry) => {
                let slot = &mut self.pairs[*entry.get()].1;
                Some(core::mem::replace(slot, value))
            }
            Entry::Vacant(entry) => {
                entry.insert(self.pairs.len());
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Look up the value of the first key equal to `key`.
    pub fn get(&self, key: &Node) -> Option<&NodeRef> {
        self.pairs
            .iter()
            .find(|(k, _)| **k == *key)
            .map(|(_, v)| v)
    }

    /// Look up the value of the first scalar key whose value is `key`.
    pub fn get_str(&self, key: &str) -> Option<&NodeRef> {
        self.pairs
            .iter()
            .find(|(k, _)| k.as_scalar().is_some_and(|s| s.value() == key.as_bytes()))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeRef, &NodeRef)> + '_ {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &NodeRef> + '_ {
        self.pairs.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &NodeRef> + '_ {
        self.pairs.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Flow style (`{a: b}`) if true, block style otherwise.
    pub fn inline(&self) -> bool {
        self.inline
    }

    pub fn set_inline(&mut self, inline: bool) {
        self.inline = inline;
    }

    #[must_use]
    pub fn with_inline(mut self, inline: bool) -> Mapping {
        self.inline = inline;
        self
    }

    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.pairs.try_reserve_exact(additional)?;
        self.index.try_reserve(additional)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Mapping) -> bool {
        self.inline == other.inline && self.pairs == other.pairs
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("pairs", &self.pairs)
            .field("inline", &self.inline)
            .finish()
    }
}

/// Node types.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
    /// A scalar node.
    Scalar(Scalar),
    /// A sequence node.
    Sequence(Sequence),
    /// A mapping node.
    Mapping(Mapping),
}

/// The node structure.
///
/// The variant is chosen at construction and never changes; only the
/// contents of that variant, the tag and the anchor can be edited.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    data: NodeData,
    tag: Option<String>,
    anchor: Option<String>,
}

impl Node {
    /// Create an empty node of the given kind: an empty string, an empty
    /// sequence or an empty mapping.
    pub fn new(kind: NodeKind) -> Node {
        match kind {
            NodeKind::Scalar => Scalar::default().into(),
            NodeKind::Sequence => Sequence::default().into(),
            NodeKind::Mapping => Mapping::default().into(),
        }
    }

    pub fn scalar(value: impl Into<Vec<u8>>) -> Node {
        Scalar::new(value).into()
    }

    pub fn sequence(items: Vec<NodeRef>) -> Node {
        Sequence::new(items).into()
    }

    pub fn mapping(pairs: impl IntoIterator<Item = (NodeRef, NodeRef)>) -> Node {
        Mapping::from_pairs(pairs).into()
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Scalar(_) => NodeKind::Scalar,
            NodeData::Sequence(_) => NodeKind::Sequence,
            NodeData::Mapping(_) => NodeKind::Mapping,
        }
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.data {
            NodeData::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_scalar_mut(&mut self) -> Option<&mut Scalar> {
        match &mut self.data {
            NodeData::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match &self.data {
            NodeData::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match &mut self.data {
            NodeData::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match &self.data {
            NodeData::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match &mut self.data {
            NodeData::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// The node tag, `None` if untyped.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Set or clear the tag. An empty tag is rejected.
    pub fn set_tag(&mut self, tag: Option<&str>) -> Result<(), ValidationError> {
        self.tag = match tag {
            None => None,
            Some("") => return Err(ValidationError::EmptyTag),
            Some(tag) => Some(String::from(tag)),
        };
        Ok(())
    }

    /// The node anchor, `None` if the node is not anchored.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Set or clear the anchor. An empty anchor is rejected.
    pub fn set_anchor(&mut self, anchor: Option<&str>) -> Result<(), ValidationError> {
        self.anchor = match anchor {
            None => None,
            Some("") => return Err(ValidationError::EmptyAnchor),
            Some(anchor) => Some(String::from(anchor)),
        };
        Ok(())
    }

    /// Wrap the node in a shared reference.
    pub fn into_ref(self) -> NodeRef {
        Rc::new(self)
    }
}

impl NodeData {
    /// Move the children of a composite body into `out`, leaving it empty.
    fn take_children(&mut self, out: &mut Vec<NodeRef>) {
        match self {
            NodeData::Scalar(_) => {}
            NodeData::Sequence(sequence) => out.append(&mut sequence.items),
            NodeData::Mapping(mapping) => {
                mapping.index.clear();
                for (key, value) in mapping.pairs.drain(..) {
                    out.push(key);
                    out.push(value);
                }
            }
        }
    }
}

/// Children are released through a work list, so dropping a deeply nested
/// document does not recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.data.take_children(&mut pending);
        while let Some(child) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(child) {
                node.data.take_children(&mut pending);
            }
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Node {
        Node {
            data: NodeData::Scalar(scalar),
            tag: None,
            anchor: None,
        }
    }
}

impl From<Sequence> for Node {
    fn from(sequence: Sequence) -> Node {
        Node {
            data: NodeData::Sequence(sequence),
            tag: None,
            anchor: None,
        }
    }
}

impl From<Mapping> for Node {
    fn from(mapping: Mapping) -> Node {
        Node {
            data: NodeData::Mapping(mapping),
            tag: None,
            anchor: None,
        }
    }
}
