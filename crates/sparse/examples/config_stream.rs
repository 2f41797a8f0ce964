//! Demonstrates reacting to settings **as they arrive** while a configuration
//! document is streamed in small, irregular chunks, as it would be when read
//! from a socket or a slow pipe.
//!
//! Two things happen while the payload arrives:
//!
//! 1. Every value is printed with its full dotted path (`http.tls.cert`) the
//!    moment its statement ends, long before the document is complete.
//! 2. If `maintenance on` appears, parsing is abandoned right away and the
//!    remaining chunks are never fed.
//!
//! Afterwards the same chunks are folded into a tree with
//! `sparse::tree::parse_chunks`.
//!
//! Run with
//!
//! ```bash
//! cargo run -p sparse --example config_stream
//! ```

use sparse::{EventKind, Handler, Parser, ParserOptions, Position, tree::parse_chunks};

/// Prints each value under its dotted path and watches for a drain request.
#[derive(Default)]
struct Watcher {
    path: Vec<String>,
    name: String,
    drain: bool,
}

impl Handler for Watcher {
    fn event(&mut self, kind: EventKind, text: &str, position: Position) {
        match kind {
            EventKind::Name => text.clone_into(&mut self.name),
            EventKind::OpenNode => self.path.push(text.to_owned()),
            EventKind::CloseNode => {
                self.path.pop();
            }
            EventKind::Value => {
                let mut key = self.path.join(".");
                if !key.is_empty() {
                    key.push('.');
                }
                key.push_str(&self.name);
                println!("{position}\t{key} = {text:?}");
                if key == "http.maintenance" && text == "on" {
                    self.drain = true;
                }
            }
            EventKind::Done => println!("{position}\t<done>"),
            EventKind::Error => eprintln!("{position}\terror: {text}"),
        }
    }
}

fn main() {
    let chunks = [
        "# served by the edge tier\nhttp {\n  lis",
        "ten 8080; workers 4\n  tls { cert \"/etc/ssl/",
        "edge.pem\"; key '/etc/ssl/edge.key' }\n",
        "  maint",
        "enance off   // flip to `on` to drain\n}\n",
        "log { level info /* or debug */ }\n",
    ];

    let mut parser = Parser::new(ParserOptions::default(), Watcher::default());
    for chunk in chunks {
        parser.feed(chunk);
        if parser.handler().drain {
            println!("maintenance requested; not reading further");
            return;
        }
    }
    parser.finish();

    match parse_chunks(chunks, ParserOptions::default()) {
        Ok(nodes) => {
            for node in &nodes {
                println!("{} ({} children)", node.name, node.children.len());
            }
        }
        Err(err) => eprintln!("rejected: {err}"),
    }
}
