use crate::{
    ConstructionError, Mapping, Node, NodeEvent, NodeEventData, Scalar, Sequence, SymbolId,
    SymbolTable,
};

/// Build the node described by `event` and append it to the symbol table.
///
/// Children must already be in the table; they are linked, not copied, so a
/// node repeated through an alias ends up shared between its parents. On
/// failure nothing is appended and the partially built node is dropped.
pub(crate) fn build_node(
    symbols: &mut SymbolTable,
    event: &NodeEvent<'_>,
) -> Result<SymbolId, ConstructionError> {
    let mut node: Node = match &event.data {
        NodeEventData::Scalar {
            value,
            style,
            indent,
            width,
            chomp,
        } => Scalar::new(*value)
            .with_style(*style)
            .with_indent(*indent)
            .with_width(*width)
            .with_chomp(*chomp)
            .into(),
        NodeEventData::Sequence { items, inline } => {
            let mut sequence = Sequence::default().with_inline(*inline);
            sequence.reserve(items.len())?;
            for item in items.iter() {
                sequence.push(symbols.resolve(*item)?);
            }
            sequence.into()
        }
        NodeEventData::Mapping { pairs, inline } => {
            let mut mapping = Mapping::default().with_inline(*inline);
            mapping.reserve(pairs.len())?;
            for (key, value) in pairs.iter() {
                let key = symbols.resolve(*key)?;
                let value = symbols.resolve(*value)?;
                mapping.insert(key, value);
            }
            mapping.into()
        }
    };

    if let Some(tag) = event.tag {
        node.set_tag(Some(tag))?;
    }
    if let Some(anchor) = event.anchor {
        node.set_anchor(Some(anchor))?;
    }

    let kind = node.kind();
    let id = symbols.push(node.into_ref());
    tracing::trace!(%kind, index = id.index(), "built node");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chomp, ScalarStyle, ValidationError};
    use alloc::rc::Rc;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar_keeps_exact_bytes() {
        let mut symbols = SymbolTable::new();
        let id = build_node(&mut symbols, &NodeEvent::scalar(b"a\0b\n")).unwrap();
        let node = symbols.get(id).unwrap();
        assert_eq!(node.as_scalar().unwrap().value(), b"a\0b\n");
    }

    #[test]
    fn empty_scalar_is_present() {
        let mut symbols = SymbolTable::new();
        let id = build_node(&mut symbols, &NodeEvent::scalar(b"")).unwrap();
        assert_eq!(symbols.get(id).unwrap().as_scalar().unwrap().value(), b"");
    }

    #[test]
    fn scalar_presentation() {
        let mut symbols = SymbolTable::new();
        let event = NodeEvent::scalar(b"text\n")
            .with_style(ScalarStyle::Literal)
            .with_block(2, 80, Chomp::Keep);
        let id = build_node(&mut symbols, &event).unwrap();
        let scalar = symbols.get(id).unwrap().as_scalar().unwrap().clone();
        assert_eq!(scalar.style(), ScalarStyle::Literal);
        assert_eq!(scalar.indent(), 2);
        assert_eq!(scalar.width(), 80);
        assert_eq!(scalar.chomp(), Chomp::Keep);
    }

    #[test]
    fn empty_composites() {
        let mut symbols = SymbolTable::new();
        let seq = build_node(&mut symbols, &NodeEvent::sequence(&[]).with_inline(true)).unwrap();
        let map = build_node(&mut symbols, &NodeEvent::mapping(&[])).unwrap();
        let seq = symbols.get(seq).unwrap().as_sequence().unwrap();
        assert!(seq.is_empty());
        assert!(seq.inline());
        let map = symbols.get(map).unwrap().as_mapping().unwrap();
        assert!(map.is_empty());
        assert!(!map.inline());
    }

    #[test]
    fn alias_links_the_same_instance() {
        let mut symbols = SymbolTable::new();
        let anchored = build_node(
            &mut symbols,
            &NodeEvent::scalar(b"v").with_tag("t").with_anchor("x"),
        )
        .unwrap();
        let seq = build_node(&mut symbols, &NodeEvent::sequence(&[anchored, anchored])).unwrap();

        let scalar = symbols.get(anchored).unwrap();
        let seq = symbols.get(seq).unwrap().as_sequence().unwrap();
        assert_eq!(seq.len(), 2);
        for item in seq {
            assert!(Rc::ptr_eq(item, scalar));
            assert_eq!(item.anchor(), Some("x"));
            assert_eq!(item.tag(), Some("t"));
        }
    }

    #[test]
    fn mapping_pairs_in_event_order() {
        let mut symbols = SymbolTable::new();
        let mut ids = Vec::new();
        for text in ["k1", "v1", "k2", "v2"] {
            ids.push(build_node(&mut symbols, &NodeEvent::scalar(text.as_bytes())).unwrap());
        }
        let pairs = [(ids[2], ids[3]), (ids[0], ids[1])];
        let map = build_node(&mut symbols, &NodeEvent::mapping(&pairs)).unwrap();
        let map = symbols.get(map).unwrap().as_mapping().unwrap();
        let keys: Vec<_> = map
            .keys()
            .map(|k| k.as_scalar().unwrap().as_str().unwrap())
            .collect();
        assert_eq!(keys, ["k2", "k1"]);
    }

    #[test]
    fn unknown_child_appends_nothing() {
        let mut symbols = SymbolTable::new();
        let a = build_node(&mut symbols, &NodeEvent::scalar(b"a")).unwrap();
        let items = [a, SymbolId::new(7)];
        let err = build_node(&mut symbols, &NodeEvent::sequence(&items)).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::UnknownSymbol { index: 7, len: 1 }
        ));
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn empty_tag_is_invalid() {
        let mut symbols = SymbolTable::new();
        let err = build_node(&mut symbols, &NodeEvent::scalar(b"a").with_tag("")).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::InvalidNode(ValidationError::EmptyTag)
        ));
        assert!(symbols.is_empty());
    }
}
