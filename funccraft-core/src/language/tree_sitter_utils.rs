use anyhow::{Context, Result};
use std::cell::RefCell;
use tree_sitter::Parser;

// ---------------------------------------------------------------------------
// Per-thread parser reuse
//
// Building a tree-sitter parser and loading the grammar is far more expensive
// than parsing a single function. Each thread keeps one Python parser and
// hands it out to whoever is parsing a row on that thread, so a rayon pool
// never shares a parser between workers and never rebuilds one per row.
//
// The callback pattern (`with_python_parser`) keeps the mutable borrow of the
// parser confined to the closure. The parser is taken out of the slot while
// in use and put back afterwards, so a panicking closure just drops it and
// the next call builds a fresh one.
// ---------------------------------------------------------------------------

thread_local! {
    static PYTHON_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

fn new_python_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .context("Failed to set Python language for parser")?;
    Ok(parser)
}

/// Call `f` with this thread's Python parser, creating it on first use.
pub fn with_python_parser<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&mut Parser) -> R,
{
    PYTHON_PARSER.with(|slot| {
        let cached = slot.borrow_mut().take();
        let mut parser = match cached {
            Some(parser) => parser,
            None => new_python_parser()?,
        };
        let result = f(&mut parser);
        *slot.borrow_mut() = Some(parser);
        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_is_reused_on_same_thread() {
        let first = with_python_parser(|parser| parser.parse("x = 1\n", None).is_some());
        assert!(matches!(first, Ok(true)));

        // Second call must find the cached parser and still work
        let second = with_python_parser(|parser| {
            parser
                .parse("def f():\n    pass\n", None)
                .map(|tree| tree.root_node().child_count())
        });
        assert_eq!(second.unwrap(), Some(1));
    }

    #[test]
    fn test_parser_available_on_worker_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let source = format!("def f{}():\n    return {}\n", i, i);
                    with_python_parser(|parser| parser.parse(&source, None).is_some())
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().unwrap());
        }
    }
}
