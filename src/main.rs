use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::AstPrinter;
use rox::error::ConsoleReporter;
use rox::parser::Parser;
use rox::scanner::Scanner;
use rox::token::Token;
use rox::{Lox, RunStatus};

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file (or stdin), printing each token
    Tokenize {
        filename: Option<PathBuf>,

        /// Print one JSON object per token instead of `TYPE lexeme literal`
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file (or stdin) and prints every statement's AST
    Parse { filename: Option<PathBuf> },

    /// Runs a Lox program; starts the REPL when no file is given
    Run { filename: Option<PathBuf> },
}

/// Reads the contents of a file, or all of stdin when no file is given.
fn read_source(filename: Option<PathBuf>) -> Result<String> {
    let mut buf = String::new();

    match filename {
        Some(filename) => {
            info!("Reading file: {:?}", filename);
            let file =
                File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
            let mut reader = BufReader::new(file);

            let bytes = reader
                .read_to_string(&mut buf)
                .context(format!("Failed to read file {:?}", filename))?;

            info!("Read {} bytes from {:?}", bytes, filename);
        }
        None => {
            info!("Reading source from stdin");
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
        }
    }

    Ok(buf)
}

/// sysexits: 65 for bad input (compile errors), 70 for internal failure
/// (runtime errors).
fn exit_code(status: &RunStatus) -> i32 {
    if status.had_compile_error {
        65
    } else if status.had_runtime_error {
        70
    } else {
        0
    }
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'rox::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(source: &str, json: bool) -> Result<bool> {
    let mut tokenized = true;

    for item in Scanner::new(source) {
        match item {
            Ok(token) => {
                debug!("Scanned token: {}", token);

                if json {
                    let line = serde_json::to_string(&token).context("Failed to encode token")?;
                    println!("{}", line);
                } else {
                    println!("{}", token);
                }
            }

            Err(e) => {
                tokenized = false;

                debug!("Tokenization debug: {}", e);

                eprintln!("{}", e);
            }
        }
    }

    Ok(tokenized)
}

fn parse(source: &str) -> bool {
    let mut reporter = ConsoleReporter::new();

    let tokens: Vec<Token> = rox::scanner::scan(source, &mut reporter);
    let statements = Parser::new(&tokens, &mut reporter).parse();

    if reporter.had_compile_error() {
        return false;
    }

    for stmt in &statements {
        let ast_str = AstPrinter::print_stmt(stmt);

        debug!("AST: {}", ast_str);
        println!("{}", ast_str);
    }

    true
}

/// Read‑eval‑print loop over one persistent session.  Errors are reported
/// and the loop carries on; end of input exits.
fn run_prompt() -> Result<()> {
    let mut lox = Lox::new(ConsoleReporter::new());
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read line")?;

        if read == 0 {
            println!();
            break;
        }

        let status = lox.run(&input);
        debug!(
            "REPL line finished: {:?} (runtime error reported: {})",
            status,
            lox.reporter().had_runtime_error()
        );

        lox.reporter_mut().reset();
    }

    info!("REPL exited");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => {
            info!("Running Tokenize subcommand");
            let source = read_source(filename)?;

            if !tokenize(&source, json)? {
                debug!("Tokenization failed, exiting with code 65");
                std::process::exit(65);
            }

            info!("Tokenization completed successfully");
        }

        Commands::Parse { filename } => {
            info!("Running Parse subcommand");
            let source = read_source(filename)?;

            if !parse(&source) {
                debug!("Parse failed, exiting with code 65");
                std::process::exit(65);
            }

            info!("Parse subcommand completed");
        }

        Commands::Run {
            filename: Some(filename),
        } => {
            info!("Running Run subcommand");
            let source = read_source(Some(filename))?;

            info!("Provided input:\n {}", source);

            let status = Lox::new(ConsoleReporter::new()).run(&source);

            if !status.is_ok() {
                debug!("Run failed: {:?}", status);
                std::process::exit(exit_code(&status));
            }

            info!("Program executed successfully");
        }

        Commands::Run { filename: None } => {
            info!("Starting REPL");
            run_prompt()?;
        }
    }

    Ok(())
}
