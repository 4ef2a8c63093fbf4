use super::direction::Direction;
use crate::constants::{CANVAS_PADDING, CANVAS_WIDTH, DESCENT_STEP, ROW_SPAN, SWEEP_SPAN};

/// What the formation does this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepStep {
    /// Direction every enemy moves in
    pub direction: Direction,
    /// The formation is dropping toward the ship, so the front row must be checked
    pub descending: bool,
    /// A fresh row should enter at the top-left before enemies move
    pub spawn_row: bool,
}

/// Sweep-and-descend state machine shared by every enemy on the field.
///
/// The formation sweeps across the field, drops half a row, sweeps back,
/// drops again, and so on. A new row is spawned each time it finishes a
/// descent that followed a leftward sweep, i.e. once per full cycle.
#[derive(Debug, Clone)]
pub struct Formation {
    pub direction: Direction,
    pub previous_direction: Direction,
    /// Distance covered in the current leg
    pub timer: f32,
    /// Length of the current leg
    pub limit: f32,
}

impl Default for Formation {
    fn default() -> Self {
        Self::new()
    }
}

impl Formation {
    /// Starts centered on the field, heading right
    pub fn new() -> Self {
        Self {
            direction: Direction::Right,
            previous_direction: Direction::Left,
            timer: (CANVAS_WIDTH - 2.0 * CANVAS_PADDING) / 2.0 - ROW_SPAN / 2.0,
            limit: SWEEP_SPAN,
        }
    }

    /// Advances the state machine by the distance enemies are about to move
    pub fn advance(&mut self, moved: f32) -> SweepStep {
        let mut spawn_row = false;

        if self.direction.is_horizontal() && self.timer >= self.limit {
            self.limit = DESCENT_STEP;
            self.timer = 0.0;
            self.previous_direction = self.direction;
            self.direction = Direction::Down;
        }

        let descending = self.direction == Direction::Down;
        if descending && self.timer >= self.limit {
            self.limit = SWEEP_SPAN;
            self.timer = 0.0;

            match self.previous_direction {
                Direction::Left => {
                    self.direction = Direction::Right;
                    spawn_row = true;
                }
                Direction::Right => self.direction = Direction::Left,
                Direction::Up | Direction::Down => {}
            }
        }

        self.timer += moved;

        SweepStep {
            direction: self.direction,
            descending,
            spawn_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives the formation until the direction changes, returning the steps taken
    fn run_leg(formation: &mut Formation, moved: f32) -> Vec<SweepStep> {
        let start = formation.direction;
        let mut steps = Vec::new();
        loop {
            let step = formation.advance(moved);
            steps.push(step);
            if step.direction != start {
                return steps;
            }
        }
    }

    #[test]
    fn test_formation_new() {
        let formation = Formation::new();
        assert_eq!(formation.direction, Direction::Right);
        assert_eq!(formation.previous_direction, Direction::Left);
        assert_eq!(formation.timer, 280.0);
        assert_eq!(formation.limit, 560.0);
    }

    #[test]
    fn test_first_sweep_covers_half_the_span() {
        let mut formation = Formation::new();
        let steps = run_leg(&mut formation, 10.0);
        // 28 frames moving right, the 29th already heads down
        assert_eq!(steps.len(), 29);
        assert!(steps[..28].iter().all(|s| s.direction == Direction::Right));
        assert_eq!(formation.direction, Direction::Down);
        assert_eq!(formation.previous_direction, Direction::Right);
        assert_eq!(formation.limit, 34.0);
    }

    #[test]
    fn test_descent_after_right_sweep_turns_left_without_spawning() {
        let mut formation = Formation::new();
        run_leg(&mut formation, 10.0);
        let steps = run_leg(&mut formation, 10.0);

        let last = steps.last().copied().unwrap();
        assert_eq!(last.direction, Direction::Left);
        assert!(!last.spawn_row);
        assert!(last.descending);
        assert!(steps.iter().all(|s| s.descending));
    }

    #[test]
    fn test_descent_after_left_sweep_spawns_row() {
        let mut formation = Formation::new();
        run_leg(&mut formation, 10.0); // right
        run_leg(&mut formation, 10.0); // down
        let left = run_leg(&mut formation, 10.0); // left
        assert!(left.iter().all(|s| !s.spawn_row));
        assert_eq!(formation.previous_direction, Direction::Left);

        let down = run_leg(&mut formation, 10.0);
        let last = down.last().copied().unwrap();
        assert_eq!(last.direction, Direction::Right);
        assert!(last.spawn_row);
        assert_eq!(down.iter().filter(|s| s.spawn_row).count(), 1);
    }

    #[test]
    fn test_full_sweep_distance() {
        let mut formation = Formation::new();
        run_leg(&mut formation, 10.0);
        run_leg(&mut formation, 10.0);
        let left = run_leg(&mut formation, 10.0);
        // The turning frame already covered 10 of the 560 units
        assert_eq!(left.len(), 56);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_rows_spawn_once_per_cycle(moved in 1f32..20.0) {
                let mut formation = Formation::new();
                let mut spawned = 0;
                let mut turns_right = 0;
                let mut last = formation.direction;
                for _ in 0..5_000 {
                    let step = formation.advance(moved);
                    if step.spawn_row {
                        spawned += 1;
                    }
                    if step.direction == Direction::Right && last != Direction::Right {
                        turns_right += 1;
                    }
                    last = step.direction;
                }
                prop_assert_eq!(spawned, turns_right);
            }

            #[test]
            fn test_never_moves_up(moved in 0.5f32..40.0) {
                let mut formation = Formation::new();
                for _ in 0..2_000 {
                    let step = formation.advance(moved);
                    prop_assert!(step.direction != Direction::Up);
                    if step.spawn_row {
                        prop_assert!(step.descending);
                        prop_assert_eq!(step.direction, Direction::Right);
                    }
                }
            }
        }
    }
}
