use crate::app::{App, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use crossword_core::Position;
use std::io;

/// Each cell is 4 chars wide plus a border column
const CELL_WIDTH: u16 = 5;
/// Width of the clue panel when it fits beside the grid
const PANEL_WIDTH: u16 = 40;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;

    match app.screen_state {
        // Redrawn in full every frame, no clear needed
        ScreenState::Unlocked => render_unlocked_screen(stdout, app, term_width, term_height)?,
        ScreenState::Playing => {
            execute!(stdout, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;
            render_game_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

/// Screen coordinate, clamped to the terminal's range
fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn grid_dimensions(app: &App) -> (u16, u16) {
    let size = app.session.puzzle().index().size();
    let width = to_u16(size.cols).saturating_mul(CELL_WIDTH).saturating_add(1);
    let height = to_u16(size.rows).saturating_mul(2).saturating_add(1);
    (width, height)
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let (grid_width, grid_height) = grid_dimensions(app);

    // Clues go beside the grid when there is room, below it otherwise
    let side_panel = term_width >= grid_width.saturating_add(PANEL_WIDTH + 4);
    let total_width = if side_panel {
        grid_width + 3 + PANEL_WIDTH
    } else {
        grid_width
    };
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height.saturating_add(12) { 2 } else { 1 };

    render_title(stdout, app, start_x, start_y)?;
    render_grid(stdout, app, start_x, start_y + 2)?;

    let controls_y = grid_height.saturating_add(start_y + 3);
    render_controls(stdout, app, start_x, controls_y)?;

    if side_panel {
        render_info_panel(stdout, app, start_x + grid_width + 3, start_y + 2, PANEL_WIDTH)?;
    } else {
        render_info_panel(
            stdout,
            app,
            start_x,
            controls_y.saturating_add(3),
            grid_width.max(30),
        )?;
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_title(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let title = &app.session.puzzle().config().title;
    let title = if title.is_empty() { "CROSSWORD" } else { title };

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.key),
        Print(format!("═══ {} ═══", title))
    )?;
    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let size = app.session.puzzle().index().size();

    // +----+----+
    // |1 L |    |
    // +----+----+
    let separator = format!("+{}", "----+".repeat(size.cols));

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        MoveTo(x, y),
        Print(&separator)
    )?;

    for row in 0..size.rows {
        let cell_y = y.saturating_add(1).saturating_add(to_u16(row).saturating_mul(2));
        execute!(stdout, MoveTo(x, cell_y))?;

        for col in 0..size.cols {
            execute!(
                stdout,
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|")
            )?;
            render_cell(stdout, app, Position::new(row, col))?;
        }

        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|"),
            MoveTo(x, cell_y.saturating_add(1)),
            Print(&separator)
        )?;
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let view = app.session.cell(pos);

    if !view.active {
        execute!(
            stdout,
            SetBackgroundColor(theme.block),
            SetForegroundColor(theme.block),
            Print("    ")
        )?;
        return Ok(());
    }

    let bg = if view.focused && app.screen_state == ScreenState::Playing {
        theme.selected_bg
    } else if view.highlighted {
        theme.highlight_bg
    } else {
        theme.cell_bg
    };

    let number = view.number.map(|n| n.to_string()).unwrap_or_default();
    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(theme.number),
        Print(format!("{:<2}", number))
    )?;

    // Letter
    match view.value {
        Some(c) => execute!(stdout, SetForegroundColor(theme.filled), Print(format!("{} ", c)))?,
        None => execute!(stdout, SetForegroundColor(theme.empty), Print("· "))?,
    }

    Ok(())
}

fn render_info_panel(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let config = session.puzzle().config();
    let mut line = y;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, line),
        SetForegroundColor(theme.info),
        Print(format!(
            "Filled {}/{}   Focus {}",
            session.filled_count(),
            session.active_count(),
            session.focus()
        ))
    )?;
    line = line.saturating_add(1);

    let (status, color) = if session.is_solved() {
        ("Solved", theme.success)
    } else {
        ("Solving", theme.info)
    };
    execute!(
        stdout,
        MoveTo(x, line),
        SetForegroundColor(color),
        Print(format!("Status: {}", status))
    )?;
    line = line.saturating_add(1);

    if let Some(ref err) = app.verify_error {
        execute!(
            stdout,
            MoveTo(x, line),
            SetForegroundColor(theme.error),
            Print(err)
        )?;
        line = line.saturating_add(1);
        execute!(
            stdout,
            MoveTo(x, line),
            SetForegroundColor(theme.info),
            Print("Tip: fill every white cell, then Ctrl+S")
        )?;
        line = line.saturating_add(1);
    }

    for (heading, clues) in [("ACROSS", &config.clues.across), ("DOWN", &config.clues.down)] {
        if clues.is_empty() {
            continue;
        }
        line = line.saturating_add(1);
        execute!(
            stdout,
            MoveTo(x, line),
            SetForegroundColor(theme.key),
            Print(heading)
        )?;
        line = line.saturating_add(1);

        for (id, text) in clues {
            let prefix = format!("{:>2}. ", id);
            let wrapped = wrap_text(text, (width as usize).saturating_sub(prefix.len()).max(10));
            for (i, part) in wrapped.iter().enumerate() {
                let lead = if i == 0 {
                    prefix.clone()
                } else {
                    " ".repeat(prefix.len())
                };
                execute!(
                    stdout,
                    MoveTo(x, line),
                    SetForegroundColor(theme.number),
                    Print(lead),
                    SetForegroundColor(theme.fg),
                    Print(part)
                )?;
                line = line.saturating_add(1);
            }
        }
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("A-Z", "Type"),
        ("Bksp/Del", "Delete"),
        ("Arrows", "Move"),
        ("Enter", "Right"),
        ("Ctrl+S", "Submit"),
        ("Ctrl+T", "Theme"),
        ("Esc", "Quit"),
    ];

    // Display in columns of 2
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 2;
        let row = i % 2;
        let cx = x.saturating_add(col as u16 * 16);
        let cy = y.saturating_add(row as u16);

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>8}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded)
    )?;

    Ok(())
}

fn render_unlocked_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    app.confetti.set_bounds(term_width, term_height);
    let theme = app.theme.clone();

    execute!(stdout, SetBackgroundColor(theme.bg), Clear(ClearType::All))?;

    for p in app.confetti.particles() {
        if p.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(p.color),
                Print(p.char)
            )?;
        }
    }

    let letters: Vec<String> = app
        .highlighted_letters()
        .iter()
        .map(|c| c.to_string())
        .collect();

    let mut lines = vec![
        ("═══ PUZZLE VERIFIED ═══".to_string(), theme.success),
        (String::new(), theme.fg),
        ("You solved the crossword. The hunt continues…".to_string(), theme.fg),
    ];
    if !letters.is_empty() {
        lines.push((String::new(), theme.fg));
        lines.push((format!("Marked letters: {}", letters.join(" ")), theme.key));
    }
    lines.push((String::new(), theme.fg));
    lines.push(("Esc: back to grid   q/Enter: quit".to_string(), theme.info));

    let top = (term_height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        let x = term_width.saturating_sub(text.chars().count() as u16) / 2;
        execute!(
            stdout,
            MoveTo(x, top + i as u16),
            SetForegroundColor(*color),
            Print(text)
        )?;
    }

    Ok(())
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_width && !current.is_empty() {
            lines.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("War: Logistics, Business: ?", 12);
        assert_eq!(lines, vec!["War:", "Logistics,", "Business: ?"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_grid_dimensions_for_largest_grid() {
        use crate::theme::ThemeName;
        use crossword_core::{Entry, Puzzle, PuzzleConfig, Verifier};
        use std::sync::Arc;

        let max = PuzzleConfig::MAX_DIMENSION;
        let config = PuzzleConfig {
            title: String::new(),
            rows: max,
            cols: max,
            entries: vec![Entry::new(1, "HI", [0, 0], [0, 1])],
            clues: Default::default(),
            highlight: Vec::new(),
        };
        let verifier = Verifier::new(&config);
        let app = App::new(Arc::new(Puzzle::new(config).unwrap()), verifier, ThemeName::Dark);
        assert_eq!(
            grid_dimensions(&app),
            (max as u16 * CELL_WIDTH + 1, max as u16 * 2 + 1)
        );
    }

    #[test]
    fn test_screen_coordinates_clamp() {
        assert_eq!(to_u16(12), 12);
        assert_eq!(to_u16(20_000 * 5), u16::MAX);
    }
}
