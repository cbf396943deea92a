//! The ant: position, heading and a move budget on a wrapping trail.

use crate::ant::trail::{Cell, Trail};

/// Direction the ant faces.
///
/// North increases the row index, East the column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Row + 1.
    North,
    /// Column + 1.
    East,
    /// Row - 1.
    South,
    /// Column - 1.
    West,
}

impl Heading {
    /// Heading after a quarter turn counter-clockwise.
    #[must_use]
    pub fn left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::East => Heading::North,
            Heading::South => Heading::East,
            Heading::West => Heading::South,
        }
    }

    /// Heading after a quarter turn clockwise.
    #[must_use]
    pub fn right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }
}

/// Agent walking a [`Trail`], eating the food it steps on.
///
/// Every action costs one move; once the budget is spent further actions do
/// nothing. Moving off an edge wraps to the opposite edge.
#[derive(Debug, Clone)]
pub struct Ant {
    max_moves: usize,
    moves: usize,
    eaten: usize,
    row: usize,
    col: usize,
    heading: Heading,
    trail: Trail,
    pristine: Trail,
}

impl Ant {
    /// Ant at the trail's start, facing East, with `max_moves` to spend.
    #[must_use]
    pub fn new(max_moves: usize, trail: Trail) -> Self {
        let (row, col) = trail.start();
        Self {
            max_moves,
            moves: 0,
            eaten: 0,
            row,
            col,
            heading: Heading::East,
            pristine: trail.clone(),
            trail,
        }
    }

    /// Restore the untouched trail and the starting state.
    pub fn reset(&mut self) {
        (self.row, self.col) = self.pristine.start();
        self.heading = Heading::East;
        self.moves = 0;
        self.eaten = 0;
        self.trail.clone_from(&self.pristine);
    }

    /// Current `(row, col, heading)`.
    #[must_use]
    pub fn position(&self) -> (usize, usize, Heading) {
        (self.row, self.col, self.heading)
    }

    /// Moves spent so far.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Move budget.
    #[must_use]
    pub fn max_moves(&self) -> usize {
        self.max_moves
    }

    /// Food cells eaten so far.
    #[must_use]
    pub fn eaten(&self) -> usize {
        self.eaten
    }

    /// Whether the move budget is spent.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.moves >= self.max_moves
    }

    /// The trail as walked, with visited cells marked.
    #[must_use]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Whether the cell in front holds food. Free.
    #[must_use]
    pub fn sense_food(&self) -> bool {
        let (row, col) = self.ahead();
        self.trail.get(row, col) == Some(Cell::Food)
    }

    /// Turn counter-clockwise.
    pub fn turn_left(&mut self) {
        if self.spend_move() {
            self.heading = self.heading.left();
        }
    }

    /// Turn clockwise.
    pub fn turn_right(&mut self) {
        if self.spend_move() {
            self.heading = self.heading.right();
        }
    }

    /// Step into the cell in front, eating any food there.
    pub fn move_forward(&mut self) {
        if !self.spend_move() {
            return;
        }
        (self.row, self.col) = self.ahead();
        if self.trail.get(self.row, self.col) == Some(Cell::Food) {
            self.eaten += 1;
        }
        self.trail.set(self.row, self.col, Cell::Passed);
    }

    fn spend_move(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.moves += 1;
        true
    }

    /// Cell in front, wrapping around the edges (floor modulo).
    fn ahead(&self) -> (usize, usize) {
        let rows = self.trail.rows();
        let cols = self.trail.cols();
        match self.heading {
            Heading::North => ((self.row + 1) % rows, self.col),
            Heading::South => ((self.row + rows - 1) % rows, self.col),
            Heading::East => (self.row, (self.col + 1) % cols),
            Heading::West => (self.row, (self.col + cols - 1) % cols),
        }
    }
}
