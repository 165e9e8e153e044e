//! Session driver: runs source text through every stage against one
//! long‑lived [`Interpreter`].
//!
//! A [`Lox`] keeps its interpreter between [`Lox::run`] calls, so globals
//! defined by one call are visible to the next.  The REPL feeds it one line
//! at a time; a script run is a single call.

use std::io::Write;

use log::{debug, info};

use crate::ast::Stmt;
use crate::error::{ConsoleReporter, LoxError, Reporter};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner;
use crate::token::Token;

/// What went wrong during one [`Lox::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// A scan, parse, or resolve error was reported; nothing was executed.
    pub had_compile_error: bool,

    /// Execution started and stopped at a runtime error.
    pub had_runtime_error: bool,
}

impl RunStatus {
    pub fn is_ok(&self) -> bool {
        !self.had_compile_error && !self.had_runtime_error
    }
}

/// Forwards to the session's reporter while counting what passed through.
struct Counting<'r> {
    inner: &'r mut dyn Reporter,
    compile_errors: usize,
}

impl Reporter for Counting<'_> {
    fn report(&mut self, error: LoxError) {
        if error.is_compile_error() {
            self.compile_errors += 1;
        }

        self.inner.report(error);
    }
}

pub struct Lox<R: Reporter> {
    interpreter: Interpreter,
    reporter: R,
}

impl<R: Reporter> Lox<R> {
    /// Session printing to stdout.
    pub fn new(reporter: R) -> Self {
        Self {
            interpreter: Interpreter::new(),
            reporter,
        }
    }

    /// Session whose `print` output goes to `out`.
    pub fn with_output(reporter: R, out: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
            reporter,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Scan, parse, resolve and execute `source`.
    ///
    /// Scanning and parsing always run to completion; if either reported an
    /// error, resolution is skipped.  Execution is skipped if resolution
    /// reported anything.  A runtime error is reported once and ends the run.
    pub fn run(&mut self, source: &str) -> RunStatus {
        info!("Running {} bytes of source", source.len());

        let mut status: RunStatus = RunStatus::default();
        let mut counting: Counting<'_> = Counting {
            inner: &mut self.reporter,
            compile_errors: 0,
        };

        let tokens: Vec<Token> = scanner::scan(source, &mut counting);
        let statements: Vec<Stmt> = Parser::new(&tokens, &mut counting).parse();

        if counting.compile_errors > 0 {
            debug!("Stopping before resolution: {} error(s)", counting.compile_errors);
            status.had_compile_error = true;
            return status;
        }

        Resolver::new(&mut self.interpreter, &mut counting).resolve(&statements);

        if counting.compile_errors > 0 {
            debug!("Stopping before execution: {} error(s)", counting.compile_errors);
            status.had_compile_error = true;
            return status;
        }

        if let Err(e) = self.interpreter.interpret(&statements) {
            status.had_runtime_error = true;
            counting.report(e);
        }

        status
    }
}

/// Run `source` once in a fresh session, printing to stdout and reporting to
/// stderr.
pub fn run(source: &str) -> RunStatus {
    Lox::new(ConsoleReporter::new()).run(source)
}
