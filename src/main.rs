// Grapher: token browser for the Grapher language

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use grapher::history::{collect_tokens, TokenHistory, DEFAULT_TOKEN_LIMIT};
use grapher::syntax::Lexer;
use grapher::ui::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grapher source file to tokenize
    input: PathBuf,

    /// Print the token stream as `<kind, text>` lines instead of opening the browser
    #[arg(short, long)]
    dump: bool,

    /// Give up if the file produces more tokens than this
    #[arg(long, default_value_t = DEFAULT_TOKEN_LIMIT)]
    max_tokens: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !args.input.exists() {
        eprintln!("Error: File '{}' not found", args.input.display());
        std::process::exit(1);
    }

    if args.dump {
        let had_errors = dump_tokens(&args)?;
        if had_errors {
            std::process::exit(1);
        }
        return Ok(());
    }

    let source = fs::read_to_string(&args.input)?;

    eprintln!("Lexing {}...", args.input.display());
    let history = match TokenHistory::record(Lexer::new(&source), args.max_tokens) {
        Ok(history) => history,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Recorded {} tokens ({} diagnostics).",
        history.len(),
        history.diagnostics().len()
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(history, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

/// Print every token before end of input, then the diagnostics.
///
/// Uses the same token limit as the browser. Returns whether anything went
/// wrong.
fn dump_tokens(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let mut lexer = Lexer::from_path(&args.input)?;
    let collected = collect_tokens(&mut lexer, args.max_tokens);

    for diagnostic in lexer.diagnostics() {
        eprintln!("{}", diagnostic);
    }

    let tokens = match collected {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(true);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut had_errors = false;

    for token in tokens.iter().filter(|t| !t.is_end()) {
        had_errors |= token.is_error();
        writeln!(out, "{}", token)?;
    }

    Ok(had_errors)
}
