mod animations;
mod app;
mod logging;
mod render;
mod settings;
mod theme;

use app::App;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossword_core::{Position, Puzzle, PuzzleConfig, Verifier};
use logging::LogLevel;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};
use theme::ThemeName;

/// Terminal crossword.
#[derive(Debug, Parser)]
#[command(name = "crossword", version, about)]
struct Cli {
    /// Puzzle definition (JSON). Defaults to the per-user puzzle file if
    /// present, otherwise the built-in puzzle.
    #[arg(short, long, global = true)]
    puzzle: Option<PathBuf>,

    /// Color theme
    #[arg(short, long, value_enum, default_value_t = ThemeName::Dark)]
    theme: ThemeName,

    /// Where to write the JSON-lines log
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play the puzzle in the terminal (default)
    Play,
    /// Check a verification request and print the response JSON.
    /// Exits with status 1 when the submission is rejected.
    Verify {
        /// Request file containing `{"grid": {...}}`; `-` or omitted reads stdin
        request: Option<PathBuf>,
    },
    /// Print the solution grid and expanded entries
    Show,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(settings::default_log_path);
    if let Err(e) = logging::init(&log_path, cli.log_level) {
        eprintln!("Warning: logging disabled ({}): {}", log_path.display(), e);
    }

    let config = match settings::load_puzzle(cli.puzzle.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(config, cli.theme),
        Command::Verify { request } => verify(&config, request),
        Command::Show => {
            show(config);
            Ok(())
        }
    }
}

fn play(config: PuzzleConfig, theme: ThemeName) -> io::Result<()> {
    // The verifier gets its own index, built from the same definition
    let verifier = Verifier::new(&config);
    let puzzle = match Puzzle::new(config) {
        Ok(puzzle) => Arc::new(puzzle),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };
    let mut app = App::new(puzzle, verifier, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Tick animations and timer
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn verify(config: &PuzzleConfig, request: Option<PathBuf>) -> io::Result<()> {
    let body = match request {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            body
        }
    };

    let response = Verifier::new(config).handle_request(&body);
    println!("{}", response.to_json());

    if !response.ok {
        process::exit(1);
    }
    Ok(())
}

fn show(config: PuzzleConfig) {
    let puzzle = match Puzzle::new(config) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };
    let index = puzzle.index();
    let size = index.size();

    println!("{} ({}x{})\n", puzzle.config().title, size.rows, size.cols);
    for row in 0..size.rows {
        let line: String = (0..size.cols)
            .map(|col| index.solution_at(Position::new(row, col)).unwrap_or('#'))
            .collect();
        println!("{}", line);
    }

    println!();
    for entry in index.entries() {
        let word: String = entry.letters.iter().collect();
        let cells: Vec<String> = entry.cells.iter().map(|p| p.key()).collect();
        let note = if entry.is_truncated() { " (truncated)" } else { "" };
        println!("{:>2} {:<10} {}{}", entry.id, word, cells.join(" "), note);
        if let Some(clue) = puzzle.config().clue(entry.id) {
            println!("   {}", clue);
        }
    }
}
