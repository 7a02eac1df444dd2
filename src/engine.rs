//! Core rules engine for the 2048 sliding-tile puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Tile`: A single cell value (0 for empty) with the doubling merge operation.
//! - `Direction`: The four move directions and their travel order over the grid.
//! - `Board`: The 4x4 grid plus the slide and merge passes that read and mutate it.
//! - `Game`: Turn orchestration (slide, merge, slide), tile spawning, score,
//!   move counting and the game-over check.
use crate::error::EngineError;
use crate::movement::{Movement, MovementCollector, Position};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::any::Any;
use std::fmt;
use std::str::FromStr;

/// Width and height of the board. The board is always square.
pub const BOARD_SIZE: usize = 4;

/// Probability that a spawned tile is a 4 rather than a 2.
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

/// The content of one board cell.
///
/// A value of 0 means the cell is empty; any other value is a power of two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    value: u32,
}

impl Tile {
    /// The empty cell.
    pub const EMPTY: Tile = Tile { value: 0 };

    pub fn new(value: u32) -> Self {
        Tile { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Doubles the tile in place, as happens to the surviving tile of a merge.
    ///
    /// # Returns
    /// The new value, which is also the score earned by the merge.
    ///
    /// # Examples
    /// ```
    /// use twenty48::engine::Tile;
    /// let mut tile = Tile::new(8);
    /// assert_eq!(tile.double(), 16);
    /// assert_eq!(tile.value(), 16);
    /// ```
    pub fn double(&mut self) -> u32 {
        self.value *= 2;
        self.value
    }

    /// Compares the tile by value against another `Tile` or a bare integer.
    ///
    /// Accepted operand types are `Tile` and the primitive integer types
    /// (`u8`, `u16`, `u32`, `u64`, `usize`, `i32`, `i64`). A negative integer
    /// never equals a tile.
    ///
    /// # Errors
    /// Returns `EngineError::TypeMismatch` naming the operand type for anything else.
    ///
    /// # Examples
    /// ```
    /// use twenty48::engine::Tile;
    /// let tile = Tile::new(4);
    /// assert_eq!(tile.try_eq(&Tile::new(4)), Ok(true));
    /// assert_eq!(tile.try_eq(&4u32), Ok(true));
    /// assert_eq!(tile.try_eq(&2i64), Ok(false));
    /// assert!(tile.try_eq(&"4").is_err());
    /// ```
    pub fn try_eq<T: Any>(&self, other: &T) -> Result<bool, EngineError> {
        let other = other as &dyn Any;
        let value = u64::from(self.value);

        if let Some(tile) = other.downcast_ref::<Tile>() {
            return Ok(self.value == tile.value);
        }
        if let Some(&v) = other.downcast_ref::<u32>() {
            return Ok(self.value == v);
        }
        if let Some(&v) = other.downcast_ref::<u8>() {
            return Ok(value == u64::from(v));
        }
        if let Some(&v) = other.downcast_ref::<u16>() {
            return Ok(value == u64::from(v));
        }
        if let Some(&v) = other.downcast_ref::<u64>() {
            return Ok(value == v);
        }
        if let Some(&v) = other.downcast_ref::<usize>() {
            return Ok(u64::try_from(v).map_or(false, |v| v == value));
        }
        if let Some(&v) = other.downcast_ref::<i32>() {
            return Ok(i64::from(v) == value as i64);
        }
        if let Some(&v) = other.downcast_ref::<i64>() {
            return Ok(v == value as i64);
        }
        Err(EngineError::TypeMismatch(std::any::type_name::<T>()))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A move direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the game-over check probes them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The lowercase name accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Returns the cells of one line in travel order.
    ///
    /// For `Up` and `Down` a line is a column, for `Left` and `Right` a row.
    /// The first cell returned is the edge tiles travel towards.
    ///
    /// # Examples
    /// ```
    /// use twenty48::engine::Direction;
    /// assert_eq!(Direction::Up.line(2), [(0, 2), (1, 2), (2, 2), (3, 2)]);
    /// assert_eq!(Direction::Right.line(1), [(1, 3), (1, 2), (1, 1), (1, 0)]);
    /// ```
    pub fn line(self, line: usize) -> [Position; BOARD_SIZE] {
        let mut cells = [(0, 0); BOARD_SIZE];
        for (step, cell) in cells.iter_mut().enumerate() {
            let k = match self {
                Direction::Up | Direction::Left => step,
                Direction::Down | Direction::Right => BOARD_SIZE - 1 - step,
            };
            *cell = match self {
                Direction::Up | Direction::Down => (k, line),
                Direction::Left | Direction::Right => (line, k),
            };
        }
        cells
    }

    /// Moves `pos` by `by` cells in this direction.
    ///
    /// # Panics
    /// Panics on underflow when shifting past row or column 0. The slide pass
    /// never shifts by more than the number of empty cells behind a tile.
    pub fn shift(self, pos: Position, by: usize) -> Position {
        let (r, c) = pos;
        match self {
            Direction::Up => (r - by, c),
            Direction::Down => (r + by, c),
            Direction::Left => (r, c - by),
            Direction::Right => (r, c + by),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Parses one of the case-sensitive names `up`, `down`, `left`, `right`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The 4x4 game grid, stored row-major.
///
/// Every cell always holds a `Tile`; emptiness is a value of 0. The passes
/// (`slide_movements`, `merge_movements`) only compute movements from a
/// shared reference, so probing a direction can never alter the board.
/// Movements are committed with `apply_movements`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Tile; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board where every cell is empty.
    ///
    /// # Examples
    /// ```
    /// use twenty48::engine::{Board, Tile};
    /// let board = Board::new_empty();
    /// assert_eq!(board.get_tile(0, 0), Tile::EMPTY);
    /// ```
    pub fn new_empty() -> Self {
        Board {
            grid: [[Tile::EMPTY; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn from_grid(grid: [[Tile; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board { grid }
    }

    /// Creates a board from raw cell values, 0 meaning empty.
    pub fn from_values(values: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board {
            grid: values.map(|row| row.map(Tile::new)),
        }
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `BOARD_SIZE`.
    pub fn get_tile(&self, r: usize, c: usize) -> Tile {
        self.grid[r][c]
    }

    pub(crate) fn set_tile(&mut self, r: usize, c: usize, tile: Tile) {
        self.grid[r][c] = tile;
    }

    pub fn get_grid(&self) -> &[[Tile; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Returns the grid as plain values, 0 meaning empty.
    pub fn values(&self) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
        self.grid.map(|row| row.map(|tile| tile.value()))
    }

    /// Returns the coordinates of all empty cells in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if self.grid[r][c].is_empty() {
                    positions.push((r, c));
                }
            }
        }
        positions
    }

    /// Sum of all tile values. Sliding and merging leave it unchanged.
    pub fn tile_sum(&self) -> u64 {
        self.grid
            .iter()
            .flatten()
            .map(|tile| u64::from(tile.value()))
            .sum()
    }

    fn tile_at(&self, pos: Position) -> Tile {
        self.grid[pos.0][pos.1]
    }

    /// Computes the slide pass for `direction` without merging anything.
    ///
    /// Each line is scanned in travel order while counting the empty cells
    /// seen so far; a tile found after `n` empty cells moves `n` cells towards
    /// the edge.
    ///
    /// # Returns
    /// The movements in scan order, none of them flagged as merged. Applying
    /// them in that order leaves every line compacted against its edge.
    pub fn slide_movements(&self, direction: Direction) -> Vec<Movement> {
        let mut movements = Vec::new();

        for line in 0..BOARD_SIZE {
            let mut gaps = 0;
            for pos in direction.line(line) {
                if self.tile_at(pos).is_empty() {
                    gaps += 1;
                } else if gaps != 0 {
                    movements.push(Movement::new(pos, direction.shift(pos, gaps), false));
                }
            }
        }
        movements
    }

    /// Computes the merge pass for `direction`.
    ///
    /// Adjacent cells of each line are compared in travel order. When two
    /// equal non-empty tiles meet, the one further from the edge merges into
    /// the nearer one. A tile taking part in a merge cannot take part in a
    /// second one in the same pass, so `2 2 2` merges only its leading pair.
    /// The pass does not close the holes it leaves behind.
    pub fn merge_movements(&self, direction: Direction) -> Vec<Movement> {
        let mut movements = Vec::new();

        for line in 0..BOARD_SIZE {
            let cells = direction.line(line);
            let mut just_merged = false;
            for pair in cells.windows(2) {
                let (prev, curr) = (pair[0], pair[1]);
                let prev_tile = self.tile_at(prev);
                if !just_merged && !prev_tile.is_empty() && prev_tile == self.tile_at(curr) {
                    movements.push(Movement::new(curr, prev, true));
                    just_merged = true;
                } else {
                    just_merged = false;
                }
            }
        }
        movements
    }

    /// Returns `true` if either pass would move a tile in `direction`.
    pub fn can_move(&self, direction: Direction) -> bool {
        !self.slide_movements(direction).is_empty() || !self.merge_movements(direction).is_empty()
    }

    /// Applies movements in order.
    ///
    /// A merged movement doubles the destination tile; any other movement
    /// copies the source tile to the destination. Either way the source cell
    /// is emptied.
    ///
    /// # Returns
    /// The score earned, i.e. the sum of the post-merge values.
    pub fn apply_movements(&mut self, movements: &[Movement]) -> u32 {
        let mut gained = 0;
        for movement in movements {
            let (fr, fc) = movement.from();
            let (tr, tc) = movement.to();
            if movement.merged() {
                gained += self.grid[tr][tc].double();
            } else {
                self.grid[tr][tc] = self.grid[fr][fc];
            }
            self.grid[fr][fc] = Tile::EMPTY;
        }
        gained
    }
}

impl fmt::Display for Board {
    /// Draws the boxed table of the console game, empty cells left blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "|-------------------------------|";

        writeln!(f, "{}", SEPARATOR)?;
        for (r, row) in self.grid.iter().enumerate() {
            for tile in row {
                if tile.is_empty() {
                    write!(f, "| {:^5} ", "")?;
                } else {
                    write!(f, "| {:^5} ", tile.value())?;
                }
            }
            writeln!(f, "|")?;
            write!(f, "{}", SEPARATOR)?;
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Manages a 2048 game session: the board, the score, the move counter and
/// the random source used for spawning tiles.
///
/// # Examples
/// ```
/// use twenty48::engine::{Direction, Game};
/// let mut game = Game::with_seed(42);
/// assert_eq!(game.board().empty_positions().len(), 15);
///
/// let movements = game.play(Direction::Left);
/// for movement in &movements {
///     println!("{}", movement);
/// }
/// println!("Score: {}, moves: {}", game.score(), game.moves());
///
/// assert!(game.play_str("sideways").is_err());
/// if game.is_over() {
///     println!("Game over!");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Game<R = SmallRng> {
    board: Board,
    score: u32,
    moves: u32,
    rng: R,
}

impl Game<SmallRng> {
    /// Creates a new game seeded from system entropy, with one tile spawned.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Creates a new game whose spawns are fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl Default for Game<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// Creates a new game drawing spawns from `rng`.
    ///
    /// The game is reset and then exactly one tile is spawned.
    pub fn with_rng(rng: R) -> Self {
        let mut game = Game {
            board: Board::new_empty(),
            score: 0,
            moves: 0,
            rng,
        };
        game.reset();
        game.spawn_tile();
        game
    }

    /// Creates a game starting from `board`, with score and moves at 0.
    ///
    /// No tile is spawned, so the position is exactly the one given.
    pub fn with_board(board: Board, rng: R) -> Self {
        Game {
            board,
            score: 0,
            moves: 0,
            rng,
        }
    }

    /// Clears score, moves and the board. Spawning the first tile is left to the caller.
    pub fn reset(&mut self) {
        self.score = 0;
        self.moves = 0;
        self.board = Board::new_empty();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Total of the post-merge values of every merge so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of turns that changed the board.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Places a new tile on a uniformly chosen empty cell.
    ///
    /// The tile is a 4 with probability `SPAWN_FOUR_PROBABILITY`, else a 2.
    ///
    /// # Returns
    /// The position filled, or `None` (and no change) if the board is full.
    pub fn spawn_tile(&mut self) -> Option<Position> {
        let empty = self.board.empty_positions();
        let Some(&(r, c)) = empty.choose(&mut self.rng) else {
            log::warn!("spawn requested on a full board, skipping");
            return None;
        };
        let value = if self.rng.gen_bool(SPAWN_FOUR_PROBABILITY) {
            4
        } else {
            2
        };
        self.board.set_tile(r, c, Tile::new(value));
        Some((r, c))
    }

    /// Plays one turn in `direction`.
    ///
    /// The turn runs a slide pass, a merge pass and a second slide pass,
    /// applying each to the board before computing the next. Their movements
    /// are folded by a `MovementCollector` into one net movement per tile.
    /// If anything moved, the move counter is incremented and a new tile is
    /// spawned; otherwise the game is left untouched.
    ///
    /// # Returns
    /// The net movements, in the order tiles were first seen moving.
    pub fn play(&mut self, direction: Direction) -> Vec<Movement> {
        let mut collector = MovementCollector::new();

        let first_slide = self.board.slide_movements(direction);
        self.board.apply_movements(&first_slide);
        let merges = self.board.merge_movements(direction);
        let gained = self.board.apply_movements(&merges);
        let second_slide = self.board.slide_movements(direction);
        self.board.apply_movements(&second_slide);

        log::trace!(
            "{}: slide {} / merge {} / slide {} raw movements",
            direction,
            first_slide.len(),
            merges.len(),
            second_slide.len()
        );

        collector.add_all(first_slide);
        collector.add_all(merges);
        collector.add_all(second_slide);

        self.score += gained;
        if !collector.is_empty() {
            self.moves += 1;
            self.spawn_tile();
        }

        log::debug!(
            "played {}: {} movements, +{} score, {} moves",
            direction,
            collector.len(),
            gained,
            self.moves
        );
        collector.into_movements()
    }

    /// Plays one turn given a direction name (`"up"`, `"down"`, `"left"` or `"right"`).
    ///
    /// # Errors
    /// Returns `EngineError::InvalidDirection` for any other name, before
    /// anything is changed.
    pub fn play_str(&mut self, direction: &str) -> Result<Vec<Movement>, EngineError> {
        let direction: Direction = direction.parse()?;
        Ok(self.play(direction))
    }

    /// Returns `true` when no direction can slide or merge any tile.
    pub fn is_over(&self) -> bool {
        Direction::ALL
            .iter()
            .all(|&direction| !self.board.can_move(direction))
    }
}

impl<R> fmt::Display for Game<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score : {}", self.score)?;
        write!(f, "{}", self.board)
    }
}
