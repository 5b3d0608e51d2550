//! Basic example of using the crossword engine

use crossword_core::{InputEvent, Nav, Puzzle, Session, Verifier};
use std::sync::Arc;

fn main() {
    let puzzle = Arc::new(Puzzle::default());
    let config = puzzle.config();
    let size = config.size();

    println!("{} ({}x{})\n", config.title, size.rows, size.cols);

    // Show the expanded entries
    for entry in puzzle.index().entries() {
        let word: String = entry.letters.iter().collect();
        let cells: Vec<String> = entry.cells.iter().map(|p| p.key()).collect();
        println!("{:>2} {:<10} {}", entry.id, word, cells.join(" "));
    }

    // Print the solution grid
    println!();
    for row in 0..size.rows {
        let line: String = (0..size.cols)
            .map(|col| {
                puzzle
                    .index()
                    .solution_at(crossword_core::Position::new(row, col))
                    .unwrap_or('#')
            })
            .collect();
        println!("{}", line);
    }

    // Play a few keys
    let mut session = Session::new(puzzle.clone());
    println!("\nFocus starts at {}", session.focus());
    session.apply(InputEvent::Text("s".to_string()));
    session.apply(InputEvent::Text("t".to_string()));
    println!("After typing 'st' focus is at {}", session.focus());
    session.apply(InputEvent::Nav(Nav::Right));
    println!("After moving right focus is at {}", session.focus());

    // Fill in the rest from the solution
    for (pos, letter) in puzzle.index().solution() {
        session.type_text(*pos, &letter.to_string());
    }
    println!("\nSolved: {}", session.is_solved());
    let highlights: Vec<String> = session.highlights().iter().map(|p| p.key()).collect();
    println!("Highlighted: {}", highlights.join(", "));

    // Check the snapshot against an independent verifier
    let verifier = Verifier::new(config);
    let response = verifier.handle_request(&session.request_json());
    println!("Verification response: {}", response.to_json());
}
