//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! All pipeline stages (scanner, parser, resolver, runtime) convert their
//! failure modes into one of the variants defined here.  This enables a
//! uniform `Result<T>` alias throughout the crate and ergonomic inter‑operation
//! with `anyhow` at the CLI boundary, while still preserving rich diagnostic
//! detail.
//!
//! The module **does not** decide what happens to a diagnostic.  Stages that
//! recover from errors (scanner, parser, resolver) hand each one to a
//! [`Reporter`] supplied by the caller and keep going; the caller decides how
//! to print, count, or halt.

use std::io;
use thiserror::Error;

use log::{info, warn};

use crate::token::Token;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,
        /// ` at end`, ` at 'lexeme'`, or empty.
        location: String,
    },

    /// Static‑analysis failure found by the resolver (bad scoping, misplaced
    /// `this` / `super` / `return`).
    #[error("[line {line}] Error{location}: {message}")]
    Resolve {
        message: String,
        line: usize,
        location: String,
    },

    /// Runtime evaluation error, reported with the offending token's line.
    #[error("{message}\n[line {line}]")]
    Runtime { message: String, line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on the
    /// interpreter's output writer.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", token.line, message);

        LoxError::Parse {
            message,
            line: token.line,
            location: token.location(),
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Resolve error: line={}, msg={}",
            token.line, message
        );

        LoxError::Resolve {
            message,
            line: token.line,
            location: token.location(),
        }
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Runtime error: line={}, msg={}",
            token.line, message
        );

        LoxError::Runtime {
            message,
            line: token.line,
        }
    }

    /// `true` for the error kinds that stop a run before execution starts.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            LoxError::Lex { .. } | LoxError::Parse { .. } | LoxError::Resolve { .. }
        )
    }

    /// Bare message without the line/location decoration.
    pub fn message(&self) -> String {
        match self {
            LoxError::Lex { message, .. }
            | LoxError::Parse { message, .. }
            | LoxError::Resolve { message, .. }
            | LoxError::Runtime { message, .. } => message.clone(),
            LoxError::Io(e) => e.to_string(),
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics sink
// ─────────────────────────────────────────────────────────────────────────────

/// Receiver for every diagnostic the pipeline produces.
///
/// Scanner, parser and resolver take a `&mut dyn Reporter` at construction and
/// report through it instead of aborting, so one pass can surface several
/// independent errors.
pub trait Reporter {
    fn report(&mut self, error: LoxError);
}

/// Prints diagnostics to stderr as they arrive.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    had_compile_error: bool,
    had_runtime_error: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_compile_error(&self) -> bool {
        self.had_compile_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Forget previous errors; the REPL calls this between lines.
    pub fn reset(&mut self) {
        self.had_compile_error = false;
        self.had_runtime_error = false;
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, error: LoxError) {
        warn!("Reporting diagnostic: {}", error);

        if error.is_compile_error() {
            self.had_compile_error = true;
        } else {
            self.had_runtime_error = true;
        }

        eprintln!("{}", error);
    }
}

/// Keeps every diagnostic in memory, in report order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub errors: Vec<LoxError>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rendered diagnostics, one string per error.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, error: LoxError) {
        self.errors.push(error);
    }
}
