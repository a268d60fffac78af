use crate::{Chomp, NodeKind, ScalarStyle, SymbolId};

/// A completed node, as reported by the scanner to the graph builder.
///
/// Children are named by the symbol indices the builder returned for them.
/// An alias is reported by repeating the index of the anchored node.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct NodeEvent<'a> {
    /// The event data.
    pub data: NodeEventData<'a>,
    /// The resolved tag, if any.
    pub tag: Option<&'a str>,
    /// The anchor, if any.
    pub anchor: Option<&'a str>,
}

#[derive(Clone, Debug)]
pub enum NodeEventData<'a> {
    /// The scalar parameters.
    Scalar {
        /// The exact scalar content.
        value: &'a [u8],
        /// The scalar style.
        style: ScalarStyle,
        /// The block indentation.
        indent: u32,
        /// The preferred wrap width.
        width: u32,
        /// The chomping method.
        chomp: Chomp,
    },
    /// The sequence parameters.
    Sequence {
        /// The items, in order.
        items: &'a [SymbolId],
        /// Is this a flow sequence?
        inline: bool,
    },
    /// The mapping parameters.
    Mapping {
        /// The (key, value) pairs, in order.
        pairs: &'a [(SymbolId, SymbolId)],
        /// Is this a flow mapping?
        inline: bool,
    },
}

impl<'a> NodeEvent<'a> {
    /// Create a SCALAR event with the default presentation.
    pub fn scalar(value: &'a [u8]) -> Self {
        NodeEvent {
            data: NodeEventData::Scalar {
                value,
                style: ScalarStyle::Any,
                indent: 0,
                width: 0,
                chomp: Chomp::Clip,
            },
            tag: None,
            anchor: None,
        }
    }

    /// Create a SEQUENCE event.
    pub fn sequence(items: &'a [SymbolId]) -> Self {
        NodeEvent {
            data: NodeEventData::Sequence {
                items,
                inline: false,
            },
            tag: None,
            anchor: None,
        }
    }

    /// Create a MAPPING event.
    pub fn mapping(pairs: &'a [(SymbolId, SymbolId)]) -> Self {
        NodeEvent {
            data: NodeEventData::Mapping {
                pairs,
                inline: false,
            },
            tag: None,
            anchor: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: &'a str) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Set the scalar style. Ignored for composite events.
    #[must_use]
    pub fn with_style(mut self, new_style: ScalarStyle) -> Self {
        if let NodeEventData::Scalar { style, .. } = &mut self.data {
            *style = new_style;
        }
        self
    }

    /// Set the block scalar layout. Ignored for composite events.
    #[must_use]
    pub fn with_block(mut self, new_indent: u32, new_width: u32, new_chomp: Chomp) -> Self {
        if let NodeEventData::Scalar {
            indent,
            width,
            chomp,
            ..
        } = &mut self.data
        {
            *indent = new_indent;
            *width = new_width;
            *chomp = new_chomp;
        }
        self
    }

    /// Mark a sequence or mapping as flow style. Ignored for scalars.
    #[must_use]
    pub fn with_inline(mut self, flow: bool) -> Self {
        match &mut self.data {
            NodeEventData::Sequence { inline, .. } | NodeEventData::Mapping { inline, .. } => {
                *inline = flow;
            }
            NodeEventData::Scalar { .. } => {}
        }
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeEventData::Scalar { .. } => NodeKind::Scalar,
            NodeEventData::Sequence { .. } => NodeKind::Sequence,
            NodeEventData::Mapping { .. } => NodeKind::Mapping,
        }
    }
}
