#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pursuit system that walks the enemy along its route.

use std::time::Duration;

use maze_chase_core::{CellCoord, Command, Direction, Event};

const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration parameters required to construct the pursuit system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    step_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided step cadence.
    #[must_use]
    pub const fn new(step_interval: Duration) -> Self {
        Self { step_interval }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_INTERVAL)
    }
}

/// Pure system that deterministically emits enemy step commands.
///
/// The system accumulates simulated time from [`Event::TimeAdvanced`] and,
/// once a full step interval has elapsed, proposes the next moves along the
/// world's stored pursuit route. The world remains the authority: a proposed
/// step that no longer matches the route head is simply discarded there.
#[derive(Debug)]
pub struct Pursuit {
    step_interval: Duration,
    accumulator: Duration,
}

impl Pursuit {
    /// Creates a new pursuit system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            step_interval: config.step_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes events and immutable views to emit enemy step commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemy_cell: CellCoord,
        route: &[CellCoord],
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if matches!(
                event,
                Event::LevelBegan { .. }
                    | Event::GoalReached { .. }
                    | Event::TimeExpired { .. }
                    | Event::PlayerCaught { .. }
            ) {
                self.accumulator = Duration::ZERO;
            }
        }

        if self.step_interval.is_zero() || route.is_empty() {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let attempts = self.resolve_step_attempts();

        let mut current = enemy_cell;
        for cell in route.iter().copied().take(attempts) {
            let Some(direction) = Direction::between(current, cell) else {
                break;
            };
            out.push(Command::StepEnemy { direction });
            current = cell;
        }
    }

    fn resolve_step_attempts(&mut self) -> usize {
        if self.step_interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= self.step_interval {
            self.accumulator -= self.step_interval;
            attempts += 1;
        }
        attempts
    }
}

impl Default for Pursuit {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
