//! xmlui: Command-line front end for XMLUI markup and scripts.
//!
//! Usage:
//!   xmlui markup <FILE>
//!   xmlui script <FILE> [--restrictive]
//!   xmlui tokens <FILE> [--markup] [--trivia]
//!   xmlui check <FILE>...

mod resolver;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser as ClapParser, Subcommand};
use log::debug;
use serde::Serialize;
use xmlui_ast::syntax_kind::SyntaxKind;
use xmlui_compiler::{Compiler, SourceFile};
use xmlui_diagnostics::Diagnostic;
use xmlui_markup::{MarkupLexer, MarkupTokenKind};
use xmlui_options::{find_config_file, load_config_file, FrontEndOptions};
use xmlui_scanner::Lexer;

use crate::resolver::FileSystemResolver;

/// Worker stack size; parsing deeply nested input recurses.
const STACK_SIZE: usize = 16 * 1024 * 1024;

#[derive(ClapParser, Debug)]
#[command(name = "xmlui", about = "XMLUI markup and script front end", version)]
struct Cli {
    /// Path to xmlui.config.json. Looked up from the current directory
    /// when omitted.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log stage boundaries.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform a markup file and print its component definition.
    Markup {
        file: PathBuf,
    },
    /// Resolve a script file with its imports and print its declarations.
    Script {
        file: PathBuf,
        /// Reject statements other than declarations at the top level.
        #[arg(long)]
        restrictive: bool,
    },
    /// Print the tokens of a script or markup file.
    Tokens {
        file: PathBuf,
        /// Scan the file as markup.
        #[arg(long)]
        markup: bool,
        /// Include whitespace and comments.
        #[arg(long)]
        trivia: bool,
    },
    /// Check markup files and report every diagnostic.
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let pool = match rayon::ThreadPoolBuilder::new().stack_size(STACK_SIZE).build() {
        Ok(pool) => pool,
        Err(e) => {
            print_error(&format!("cannot start worker threads: {}", e));
            process::exit(1);
        }
    };
    let exit_code = pool.install(|| run(&cli));
    process::exit(exit_code);
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> i32 {
    let Some(mut options) = load_options(cli.config.as_deref()) else {
        return 1;
    };
    match &cli.command {
        Command::Markup { file } => run_markup(file, options),
        Command::Script { file, restrictive } => {
            options.restrictive_mode |= *restrictive;
            run_script(file, options)
        }
        Command::Tokens {
            file,
            markup,
            trivia,
        } => run_tokens(file, *markup, *trivia),
        Command::Check { files } => run_check(files, options),
    }
}

fn load_options(config: Option<&Path>) -> Option<FrontEndOptions> {
    let path = match config {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::current_dir().ok().and_then(|dir| find_config_file(&dir)),
    };
    let Some(path) = path else {
        return Some(FrontEndOptions::default());
    };
    match load_config_file(&path) {
        Ok(config) => {
            for warning in &config.warnings {
                print_diagnostic(warning);
            }
            debug!("using config {}", path.display());
            Some(config.options)
        }
        Err(e) => {
            print_error(&e.to_string());
            None
        }
    }
}

fn run_markup(file: &Path, options: FrontEndOptions) -> i32 {
    let Some(source) = read_source(file) else {
        return 1;
    };
    let resolver = FileSystemResolver::for_file(file);
    let compiler = Compiler::new(options, &resolver);
    match compiler.compile_markup(&source) {
        Ok(result) => print_json(&result),
        Err(diagnostic) => {
            print_diagnostic(&diagnostic);
            2
        }
    }
}

fn run_script(file: &Path, options: FrontEndOptions) -> i32 {
    let Some(mut source) = read_source(file) else {
        return 1;
    };
    // Module names are paths relative to the root file's directory.
    source.name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(source.name);
    let resolver = FileSystemResolver::for_file(file);
    let compiler = Compiler::new(options, &resolver);
    match compiler.compile_script(&source) {
        Ok(collected) => match &collected.module_errors {
            Some(errors) => {
                for (module, diagnostics) in errors {
                    for diagnostic in diagnostics {
                        print_diagnostic(&diagnostic.clone().with_file(module));
                    }
                }
                2
            }
            None => print_json(&collected),
        },
        Err(diagnostic) => {
            print_diagnostic(&diagnostic);
            2
        }
    }
}

fn run_tokens(file: &Path, markup: bool, trivia: bool) -> i32 {
    let Some(source) = read_source(file) else {
        return 1;
    };
    if markup {
        let mut lexer = MarkupLexer::new(&source.text);
        loop {
            let token = lexer.get(trivia);
            if token.kind == MarkupTokenKind::EndOfFile {
                break;
            }
            println!(
                "{}:{}\t{:?}\t{:?}",
                token.start_line + 1,
                token.start_column + 1,
                token.kind,
                token.text
            );
        }
    } else {
        let mut lexer = Lexer::new(&source.text);
        loop {
            let token = lexer.get(trivia);
            if token.kind == SyntaxKind::EndOfFileToken {
                break;
            }
            println!(
                "{}:{}\t{}\t{:?}",
                token.start_line + 1,
                token.start_column + 1,
                token.kind,
                token.text
            );
        }
    }
    0
}

fn run_check(files: &[PathBuf], options: FrontEndOptions) -> i32 {
    let mut sources = Vec::with_capacity(files.len());
    let mut unreadable = 0;
    for file in files {
        match read_source(file) {
            Some(source) => sources.push(source),
            None => unreadable += 1,
        }
    }

    // Imports resolve relative to the current directory.
    let resolver = FileSystemResolver::new(".");
    let compiler = Compiler::new(options, &resolver);
    let reports = compiler.check_files(&sources);

    let mut error_count = 0;
    let mut failed_files = unreadable;
    for report in &reports {
        for diagnostic in &report.diagnostics {
            print_diagnostic(diagnostic);
        }
        let errors = report.diagnostics.iter().filter(|d| d.is_error()).count();
        if errors > 0 {
            error_count += errors;
            failed_files += 1;
        }
    }

    if error_count == 0 && unreadable == 0 {
        eprintln!("Checked {} file{}.", reports.len(), plural(reports.len()));
        return 0;
    }
    let summary = format!(
        "Found {} error{} in {} file{}.",
        error_count,
        plural(error_count),
        failed_files,
        plural(failed_files)
    );
    if use_color() {
        eprintln!("\n{}{}{}", RED, summary, RESET);
    } else {
        eprintln!("\n{}", summary);
    }
    2
}

fn read_source(file: &Path) -> Option<SourceFile> {
    match SourceFile::read(file) {
        Ok(source) => Some(source),
        Err(e) => {
            print_error(&e.to_string());
            None
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            print_error(&format!("cannot serialize output: {}", e));
            1
        }
    }
}

fn print_diagnostic(diag: &Diagnostic) {
    if !use_color() {
        eprintln!("{}", diag);
        return;
    }
    let color = if diag.is_error() { RED } else { YELLOW };
    let category = if diag.is_error() { "error" } else { "warning" };
    if let Some(ref file) = diag.file {
        eprint!("{}{}{}({},{}): ", CYAN, file, RESET, diag.line + 1, diag.column + 1);
    }
    eprintln!(
        "{}{}{}{} {}{}{}: {}",
        BOLD, color, category, RESET, CYAN, diag.code, RESET, diag.text
    );
}

fn print_error(msg: &str) {
    if use_color() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn use_color() -> bool {
    std::io::stderr().is_terminal()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
