use criterion::{criterion_group, criterion_main, Criterion};
use yaml_graph::{NodeEvent, NodeRef, Parser, Session, SymbolId};

const ENTRIES: usize = 10_000;

/// Reports a mapping of `ENTRIES` keys, each holding a flow sequence of three
/// scalars, the last of which is an alias of a single anchored scalar.
fn large_document(session: &mut Session<'_, '_>) -> Option<SymbolId> {
    let shared = session.node(&NodeEvent::scalar(b"shared").with_anchor("s"))?;
    let mut pairs = Vec::with_capacity(ENTRIES);
    for i in 0..ENTRIES {
        let key = format!("key{i}");
        let key = session.node(&NodeEvent::scalar(key.as_bytes()))?;
        let a = session.node(&NodeEvent::scalar(b"a"))?;
        let b = session.node(&NodeEvent::scalar(b"b").with_tag("tag:yaml.org,2002:str"))?;
        let value = session.node(&NodeEvent::sequence(&[a, b, shared]).with_inline(true))?;
        pairs.push((key, value));
    }
    session.node(&NodeEvent::mapping(&pairs))
}

const WIDE: usize = 200_000;

/// Reports one flat mapping of `WIDE` distinct scalar keys.
fn wide_mapping(session: &mut Session<'_, '_>) -> Option<SymbolId> {
    let mut pairs = Vec::with_capacity(WIDE);
    for i in 0..WIDE {
        let key = format!("{i}");
        let key = session.node(&NodeEvent::scalar(key.as_bytes()))?;
        let value = session.node(&NodeEvent::scalar(b"v"))?;
        pairs.push((key, value));
    }
    session.node(&NodeEvent::mapping(&pairs))
}

fn run_once(scanner: fn(&mut Session<'_, '_>) -> Option<SymbolId>) -> Option<NodeRef> {
    let mut built = false;
    let mut parser = Parser::new(|session: &mut Session<'_, '_>| -> Option<SymbolId> {
        if std::mem::replace(&mut built, true) {
            return None;
        }
        scanner(session)
    });
    parser.parse().unwrap()
}

pub fn builder(c: &mut Criterion) {
    c.bench_function("build large document", |b| {
        b.iter(|| run_once(large_document));
    });
    c.bench_function("build wide mapping", |b| {
        b.iter(|| run_once(wide_mapping));
    });
}

criterion_group!(benches, builder);
criterion_main!(benches);
