#![no_main]

use libfuzzer_sys::fuzz_target;
use yaml_graph::{NodeEvent, Parser, Session, SymbolId};

fuzz_target!(|data: &[u8]| fuzz_target(data));

/// Interprets the input as a stream of node events, one byte at a time. A
/// newline ends the document; the last node built is its root.
fn scan(session: &mut Session<'_, '_>) -> Option<SymbolId> {
    let mut buf = [0; 16];
    let mut root = None;
    let mut read_any = false;
    loop {
        let n = session.read(&mut buf, 0);
        if n == 0 {
            break;
        }
        read_any = true;
        for &byte in &buf[..n] {
            if byte == b'\n' {
                return root;
            }
            let last = root.map_or(0, SymbolId::index);
            let child = SymbolId::new(usize::from(byte >> 2));
            root = match byte & 3 {
                0 => session.node(&NodeEvent::scalar(&[byte])),
                1 => session.node(&NodeEvent::sequence(&[child, SymbolId::new(last)])),
                2 => session.node(&NodeEvent::mapping(&[(SymbolId::new(last), child)])),
                _ => {
                    session.error("fuzz", last, usize::from(byte));
                    None
                }
            };
            if session.is_halted() {
                return None;
            }
        }
    }
    if read_any {
        root
    } else {
        None
    }
}

fn fuzz_target(mut data: &[u8]) {
    let mut parser = Parser::new(scan);
    parser.set_input(&mut data);
    for document in parser {
        if document.is_err() {
            break;
        }
    }
}
