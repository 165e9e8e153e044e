#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::ast::Stmt;
use rox::ast_printer::AstPrinter;
use rox::error::CollectingReporter;
use rox::parser::Parser;
use rox::scanner::scan;
use rox::{Lox, RunStatus};

/// In‑memory sink for `print` output, shared with the test body.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Session collecting diagnostics and capturing output.
pub fn session() -> (Lox<CollectingReporter>, Capture) {
    let capture = Capture::default();
    let lox = Lox::with_output(CollectingReporter::new(), Box::new(capture.clone()));
    (lox, capture)
}

/// Everything a single run produced.
pub struct Outcome {
    pub status: RunStatus,
    pub output: Vec<String>,
    pub errors: Vec<String>,
}

pub fn run(source: &str) -> Outcome {
    let (mut lox, capture) = session();
    let status = lox.run(source);

    Outcome {
        status,
        output: capture.lines(),
        errors: lox.reporter().messages(),
    }
}

/// Parse `source` and render each statement with the AST printer.
pub fn parse(source: &str) -> (Vec<String>, Vec<String>) {
    let mut reporter = CollectingReporter::new();
    let tokens = scan(source, &mut reporter);
    let statements: Vec<Stmt> = Parser::new(&tokens, &mut reporter).parse();

    let printed = statements.iter().map(AstPrinter::print_stmt).collect();
    (printed, reporter.messages())
}
