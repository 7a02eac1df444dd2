//! Movement records produced by a turn, and the collector that folds the raw
//! per-pass movements into one net movement per tile.
use std::collections::HashMap;
use std::fmt;

/// A `(row, column)` coordinate on the board.
pub type Position = (usize, usize);

/// The relocation of a single tile within one turn.
///
/// `from` is the cell the tile started in and `to` the cell it ended in.
/// `merged` is set when the tile was absorbed into the tile at `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Movement {
    from: Position,
    to: Position,
    merged: bool,
}

impl Movement {
    /// Creates a movement record.
    ///
    /// # Examples
    /// ```
    /// use twenty48::movement::Movement;
    /// let m = Movement::new((0, 3), (0, 0), false);
    /// assert_eq!(m.from(), (0, 3));
    /// assert_eq!(m.to(), (0, 0));
    /// assert!(!m.merged());
    /// ```
    pub fn new(from: Position, to: Position, merged: bool) -> Self {
        Movement { from, to, merged }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn merged(&self) -> bool {
        self.merged
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) move to ({}, {}). Merged: {}",
            self.from.0, self.from.1, self.to.0, self.to.1, self.merged
        )
    }
}

/// Accumulates the movements of the slide, merge and slide passes of a turn.
///
/// When a movement starts where an earlier recorded movement ended, it is the
/// same physical tile moving on, so the earlier entry is extended in place
/// instead of recording a second movement. Iteration order is the order in
/// which tiles were first seen moving.
#[derive(Clone, Debug, Default)]
pub struct MovementCollector {
    movements: Vec<Movement>,
    // Destination recorded at append time -> index into `movements`.
    by_destination: HashMap<Position, usize>,
}

impl MovementCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one raw movement, collapsing it into an existing entry when it
    /// continues that entry's tile.
    ///
    /// # Examples
    /// ```
    /// use twenty48::movement::{Movement, MovementCollector};
    /// let mut collector = MovementCollector::new();
    /// collector.add(Movement::new((0, 3), (0, 2), false));
    /// collector.add(Movement::new((0, 2), (0, 1), true));
    /// assert_eq!(collector.movements(), &[Movement::new((0, 3), (0, 1), true)]);
    /// ```
    pub fn add(&mut self, movement: Movement) {
        if let Some(&idx) = self.by_destination.get(&movement.from) {
            let entry = &mut self.movements[idx];
            entry.to = movement.to;
            entry.merged = movement.merged;
        } else {
            self.by_destination.insert(movement.to, self.movements.len());
            self.movements.push(movement);
        }
    }

    /// Records every movement of `movements`, in order. See [`MovementCollector::add`].
    pub fn add_all<I>(&mut self, movements: I)
    where
        I: IntoIterator<Item = Movement>,
    {
        for movement in movements {
            self.add(movement);
        }
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn into_movements(self) -> Vec<Movement> {
        self.movements
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }
}

impl fmt::Display for MovementCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, movement) in self.movements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", movement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collector_is_empty() {
        let collector = MovementCollector::new();
        assert!(collector.is_empty());
        assert_eq!(collector.len(), 0);
        assert!(collector.movements().is_empty());
    }

    #[test]
    fn test_unrelated_movements_are_appended_in_order() {
        let mut collector = MovementCollector::new();
        collector.add(Movement::new((0, 1), (0, 0), false));
        collector.add(Movement::new((1, 3), (1, 0), false));
        collector.add(Movement::new((2, 2), (2, 1), true));
        assert_eq!(
            collector.movements(),
            &[
                Movement::new((0, 1), (0, 0), false),
                Movement::new((1, 3), (1, 0), false),
                Movement::new((2, 2), (2, 1), true),
            ]
        );
    }

    #[test]
    fn test_chained_movement_collapses_into_first_entry() {
        let mut collector = MovementCollector::new();
        collector.add(Movement::new((3, 0), (1, 0), false));
        collector.add(Movement::new((2, 2), (2, 1), false));
        // Same tile as the first entry, moving on from (1, 0).
        collector.add(Movement::new((1, 0), (0, 0), true));

        assert_eq!(collector.len(), 2, "Chained movement should not be appended");
        assert_eq!(collector.movements()[0], Movement::new((3, 0), (0, 0), true));
        assert_eq!(collector.movements()[1], Movement::new((2, 2), (2, 1), false));
    }

    #[test]
    fn test_chain_overwrites_merged_flag() {
        let mut collector = MovementCollector::new();
        collector.add(Movement::new((0, 3), (0, 2), true));
        collector.add(Movement::new((0, 2), (0, 1), false));
        assert_eq!(collector.movements(), &[Movement::new((0, 3), (0, 1), false)]);
    }

    #[test]
    fn test_three_pass_chain_yields_single_movement() {
        let mut collector = MovementCollector::new();
        collector.add_all([Movement::new((0, 3), (0, 2), false)]);
        collector.add_all([Movement::new((0, 2), (0, 1), true)]);
        collector.add_all(Vec::new());
        assert_eq!(collector.into_movements(), vec![Movement::new((0, 3), (0, 1), true)]);
    }

    #[test]
    fn test_later_append_to_same_destination_takes_over_index() {
        let mut collector = MovementCollector::new();
        collector.add(Movement::new((0, 1), (0, 0), false));
        collector.add(Movement::new((0, 2), (0, 0), true));
        collector.add(Movement::new((0, 0), (1, 0), false));
        assert_eq!(collector.movements()[0], Movement::new((0, 1), (0, 0), false));
        assert_eq!(collector.movements()[1], Movement::new((0, 2), (1, 0), false));
    }

    #[test]
    fn test_display() {
        let mut collector = MovementCollector::new();
        collector.add(Movement::new((0, 3), (0, 0), false));
        collector.add(Movement::new((1, 1), (1, 0), true));
        assert_eq!(
            collector.to_string(),
            "(0, 3) move to (0, 0). Merged: false\n(1, 1) move to (1, 0). Merged: true"
        );
    }
}
