// SanskritLang: Sanskrit-keyword teaching language with a terminal IDE

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use sanskritlang::console::OutputSink;
use sanskritlang::execute::{runtime_message, SUCCESS_MESSAGE};
use sanskritlang::gallery::{self, EXAMPLES};
use sanskritlang::interpreter::constants::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_STEPS};
use sanskritlang::parser::tokenize;
use sanskritlang::ui::App;
use sanskritlang::{ExecutionError, ExecutionLimits};

#[derive(Parser)]
#[command(name = "sanskritlang")]
#[command(about = "Run, inspect and transpile SanskritLang programs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program, printing its output to stdout
    Run {
        /// Source file
        file: PathBuf,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Translate a program into JavaScript
    Transpile {
        /// Source file
        file: PathBuf,

        /// Write the JavaScript here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dump the token stream
    Tokens {
        /// Source file
        file: PathBuf,
    },

    /// Dump the parsed AST
    Ast {
        /// Source file
        file: PathBuf,
    },

    /// List the built-in examples, or run one by id
    Examples {
        /// Example id
        id: Option<String>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Open the terminal IDE
    Tui {
        /// Source file; the first example is opened when omitted
        file: Option<PathBuf>,

        #[command(flatten)]
        limits: LimitArgs,
    },
}

/// Execution budget flags shared by the commands that run code
#[derive(Args, Clone)]
struct LimitArgs {
    /// Statements, loop iterations and calls allowed
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Maximum nesting of function calls
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Wall-clock limit in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl LimitArgs {
    fn to_limits(&self) -> ExecutionLimits {
        ExecutionLimits {
            max_steps: self.max_steps,
            max_call_depth: self.max_depth,
            time_limit: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Streams each print straight to stdout
struct StdoutSink {
    out: io::Stdout,
    error: Option<io::Error>,
}

impl StdoutSink {
    fn new() -> Self {
        StdoutSink {
            out: io::stdout(),
            error: None,
        }
    }

    /// Flush and surface the first write error, if any
    fn finish(mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }
}

impl OutputSink for StdoutSink {
    fn print(&mut self, text: String) {
        if self.error.is_none() {
            if let Err(err) = writeln!(self.out, "{}", text) {
                self.error = Some(err);
            }
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, limits } => {
            let source = read_source(&file)?;
            run_source(&source, &file.display().to_string(), &limits.to_limits())
        }

        Commands::Transpile { file, output } => {
            let source = read_source(&file)?;
            let code = match sanskritlang::transpile(&source) {
                Ok(code) => code,
                Err(err) => {
                    eprintln!("{}", err.console_message());
                    return Ok(ExitCode::FAILURE);
                }
            };

            match output {
                Some(path) => {
                    fs::write(&path, format!("{}\n", code))
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{}", code),
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Tokens { file } => {
            let source = read_source(&file)?;
            let tokens = tokenize(&source)?;
            for token in &tokens {
                println!(
                    "{:>4}:{:<4} {:<12} {}",
                    token.location.line,
                    token.location.column,
                    format!("{:?}", token.kind),
                    token.text.escape_debug()
                );
            }
            eprintln!("{} tokens", tokens.len());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Ast { file } => {
            let source = read_source(&file)?;
            let program = sanskritlang::compile(&source)?;
            println!("{:#?}", program);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Examples { id: None, .. } => {
            for example in EXAMPLES {
                println!("{:<14} {:<26} {}", example.id, example.title, example.description);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Examples {
            id: Some(id),
            limits,
        } => {
            let Some(example) = gallery::find(&id) else {
                bail!("unknown example '{}' (run `sanskritlang examples` for the list)", id);
            };
            run_source(example.code, example.id, &limits.to_limits())
        }

        Commands::Tui { file, limits } => {
            let app = match file {
                Some(path) => {
                    let source = read_source(&path)?;
                    App::new(path.display().to_string(), source, limits.to_limits())
                }
                None => match EXAMPLES.first() {
                    Some(example) => App::with_example(example, limits.to_limits()),
                    None => App::new("untitled".to_string(), String::new(), limits.to_limits()),
                },
            };
            run_tui(app)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Run a program, streaming output; diagnostics go to stderr
fn run_source(source: &str, name: &str, limits: &ExecutionLimits) -> Result<ExitCode> {
    eprintln!("Running {}...", name);

    let mut sink = StdoutSink::new();
    let result = sanskritlang::run(source, limits, &mut sink);
    sink.finish().context("failed to write program output")?;

    match result {
        Ok(()) => {
            eprintln!("{}", SUCCESS_MESSAGE);
            Ok(ExitCode::SUCCESS)
        }
        Err(ExecutionError::Compile(err)) => {
            eprintln!("{}", err.console_message());
            Ok(ExitCode::FAILURE)
        }
        Err(ExecutionError::Runtime(err)) => {
            eprintln!("{}", runtime_message(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_tui(mut app: App) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}
