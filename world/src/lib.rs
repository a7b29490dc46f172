#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.
//!
//! The world owns the maze, the entity placements, the pursuit route, and the
//! session's progression counters. All mutation flows through [`apply`];
//! adapters and systems observe state exclusively through the [`query`]
//! functions, and every level layout is derived from the session seed so the
//! same command script always reproduces the same run.

use std::{
    collections::{HashSet, VecDeque},
    time::Duration,
};

use maze_chase_core::{
    CellCoord, Command, DifficultyTier, Direction, Event, LevelPhase, MazeGrid, WELCOME_BANNER,
};
use maze_chase_system_placement::SelectionError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

const DEFAULT_SESSION_SEED: u64 = 0x51c7_3a9d_8e24_b0f1;
const LEVEL_SEED_DOMAIN: &str = "maze-chase.level";

const SCORE_PER_WIN: u32 = 1_000;
const SCORE_PER_PICKUP: u32 = 400;

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tier: DifficultyTier,
    session_seed: u64,
    wins: u32,
    losses: u32,
    score: u32,
    level: Level,
}

impl World {
    /// Creates a new Maze Chase world ready for simulation.
    ///
    /// The default session runs the easy tier from a fixed seed; adapters
    /// issue [`Command::ConfigureSession`] to select their own.
    #[must_use]
    pub fn new() -> Self {
        let tier = DifficultyTier::Easy;
        Self {
            banner: WELCOME_BANNER,
            tier,
            session_seed: DEFAULT_SESSION_SEED,
            wins: 0,
            losses: 0,
            score: 0,
            level: Level::build(tier, DEFAULT_SESSION_SEED, 0, 0),
        }
    }

    fn begin_level(&mut self, out_events: &mut Vec<Event>) {
        let level = Level::build(self.tier, self.session_seed, self.wins, self.losses);
        out_events.push(Event::LevelBegan {
            wins: self.wins,
            size: level.maze.size(),
            cell_size: level.cell_size,
            pickups: level.pickups.len() as u32,
            time_budget: level.time_budget,
            route_length: level.route.len() as u32,
        });
        self.level = level;
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.level.phase != LevelPhase::Active {
            return;
        }

        out_events.push(Event::TimeAdvanced { dt });
        self.level.time_remaining = self.level.time_remaining.saturating_sub(dt);

        if self.level.time_remaining.is_zero() {
            self.level.phase = LevelPhase::Failed;
            self.losses = self.losses.saturating_add(1);
            out_events.push(Event::TimeExpired {
                losses: self.losses,
            });
        }
    }

    fn step_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.level.phase != LevelPhase::Active {
            return;
        }

        let Some(next) = direction.step(self.level.player) else {
            return;
        };
        if !self.level.maze.is_open(next) {
            return;
        }

        let from = self.level.player;
        self.level.player = next;
        out_events.push(Event::PlayerMoved { from, to: next });

        if let Some(index) = self.level.pickups.iter().position(|cell| *cell == next) {
            let _ = self.level.pickups.remove(index);
            self.score = self.score.saturating_add(SCORE_PER_PICKUP);
            let bonus = maze_chase_system_progression::pickup_time_bonus(self.tier, self.wins);
            self.level.time_remaining = self.level.time_remaining.saturating_add(bonus);
            out_events.push(Event::PickupCollected {
                cell: next,
                bonus,
                score: self.score,
            });
        }

        if next == self.level.goal {
            self.wins = self.wins.saturating_add(1);
            self.score = self.score.saturating_add(SCORE_PER_WIN);
            self.level.phase = LevelPhase::Cleared;
            out_events.push(Event::GoalReached {
                wins: self.wins,
                score: self.score,
            });
            return;
        }

        if next == self.level.enemy {
            self.record_capture(next, out_events);
        }
    }

    fn step_enemy(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.level.phase != LevelPhase::Active {
            return;
        }

        let Some(next) = self.level.route.front().copied() else {
            return;
        };
        let Some(expected_direction) = Direction::between(self.level.enemy, next) else {
            return;
        };
        if direction != expected_direction || !self.level.maze.is_open(next) {
            return;
        }

        let from = self.level.enemy;
        self.level.enemy = next;
        let _ = self.level.route.pop_front();
        out_events.push(Event::EnemyAdvanced { from, to: next });

        if next == self.level.player {
            self.record_capture(next, out_events);
        }
    }

    fn record_capture(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        self.level.phase = LevelPhase::Failed;
        self.losses = self.losses.saturating_add(1);
        out_events.push(Event::PlayerCaught { cell });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureSession { tier, seed } => {
            world.tier = tier;
            world.session_seed = seed;
            world.wins = 0;
            world.losses = 0;
            world.score = 0;
            out_events.push(Event::SessionConfigured { tier, seed });
            world.begin_level(out_events);
        }
        Command::BeginLevel => world.begin_level(out_events),
        Command::Tick { dt } => world.advance_clock(dt, out_events),
        Command::StepPlayer { direction } => world.step_player(direction, out_events),
        Command::StepEnemy { direction } => world.step_enemy(direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use maze_chase_core::{CellCoord, DifficultyTier, GridSize, LevelPhase, MazeGrid};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Difficulty tier fixed for the current session.
    #[must_use]
    pub fn tier(world: &World) -> DifficultyTier {
        world.tier
    }

    /// Lifecycle state of the active level.
    #[must_use]
    pub fn phase(world: &World) -> LevelPhase {
        world.level.phase
    }

    /// Number of levels cleared in the current session.
    #[must_use]
    pub fn wins(world: &World) -> u32 {
        world.wins
    }

    /// Number of levels lost in the current session.
    #[must_use]
    pub fn losses(world: &World) -> u32 {
        world.losses
    }

    /// Score banked in the current session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Provides read-only access to the active maze.
    #[must_use]
    pub fn maze(world: &World) -> &MazeGrid {
        &world.level.maze
    }

    /// Dimension of the active maze.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.level.maze.size()
    }

    /// Rendered cell edge length for the active level.
    #[must_use]
    pub fn cell_size(world: &World) -> u32 {
        world.level.cell_size
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.level.player
    }

    /// Cell holding the level's goal.
    #[must_use]
    pub fn goal_cell(world: &World) -> CellCoord {
        world.level.goal
    }

    /// Cell currently occupied by the enemy.
    #[must_use]
    pub fn enemy_cell(world: &World) -> CellCoord {
        world.level.enemy
    }

    /// Cells still holding uncollected time-bonus pickups.
    #[must_use]
    pub fn pickup_cells(world: &World) -> &[CellCoord] {
        &world.level.pickups
    }

    /// Remaining cells of the enemy's route to the goal.
    ///
    /// The same sequence serves as the debug trail while playing and as the
    /// revealed path after a loss.
    #[must_use]
    pub fn pursuit_route(world: &World) -> Vec<CellCoord> {
        world.level.route.iter().copied().collect()
    }

    /// Time allotted to the active level.
    #[must_use]
    pub fn time_budget(world: &World) -> Duration {
        world.level.time_budget
    }

    /// Time left on the active level's clock.
    #[must_use]
    pub fn time_remaining(world: &World) -> Duration {
        world.level.time_remaining
    }
}

#[derive(Debug)]
struct Level {
    maze: MazeGrid,
    player: CellCoord,
    goal: CellCoord,
    enemy: CellCoord,
    pickups: Vec<CellCoord>,
    route: VecDeque<CellCoord>,
    phase: LevelPhase,
    cell_size: u32,
    time_budget: Duration,
    time_remaining: Duration,
}

impl Level {
    fn build(tier: DifficultyTier, session_seed: u64, wins: u32, losses: u32) -> Self {
        let size = maze_chase_system_progression::grid_size(tier, wins);
        let cell_size = maze_chase_system_progression::cell_size(size);
        let level_seed = derive_level_seed(session_seed, tier, wins, losses);
        let mut rng = ChaCha8Rng::seed_from_u64(level_seed);

        let maze = maze_chase_system_maze_generation::generate(size, &mut rng);

        let mut claimed = HashSet::new();
        let player = place_entity(&maze, &claimed, &mut rng);
        let _ = claimed.insert(player);
        let goal = place_entity(&maze, &claimed, &mut rng);
        let _ = claimed.insert(goal);
        let enemy = place_entity(&maze, &claimed, &mut rng);
        let _ = claimed.insert(enemy);

        let route: VecDeque<CellCoord> =
            maze_chase_system_pathfinding::solve(&maze, enemy, goal).into();
        claimed.extend(route.iter().copied());

        let mut pickups = Vec::new();
        for _ in 0..maze_chase_system_progression::pickup_count(wins) {
            match maze_chase_system_placement::random_free_spot(&maze, &claimed, &mut rng) {
                Ok(cell) => {
                    let _ = claimed.insert(cell);
                    pickups.push(cell);
                }
                // A crowded maze simply holds fewer pickups.
                Err(SelectionError::Exhausted) => break,
            }
        }

        let time_budget =
            maze_chase_system_progression::time_budget(tier, wins, route.len() as u32);

        Self {
            maze,
            player,
            goal,
            enemy,
            pickups,
            route,
            phase: LevelPhase::Active,
            cell_size,
            time_budget,
            time_remaining: time_budget,
        }
    }
}

fn place_entity(maze: &MazeGrid, claimed: &HashSet<CellCoord>, rng: &mut ChaCha8Rng) -> CellCoord {
    maze_chase_system_placement::random_free_spot(maze, claimed, rng)
        .expect("a freshly carved maze cannot exhaust entity placements")
}

fn derive_level_seed(session_seed: u64, tier: DifficultyTier, wins: u32, losses: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(LEVEL_SEED_DOMAIN.as_bytes());
    hasher.update(session_seed.to_le_bytes());
    hasher.update([match tier {
        DifficultyTier::Easy => 0,
        DifficultyTier::Hard => 1,
    }]);
    hasher.update(wins.to_le_bytes());
    hasher.update(losses.to_le_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::GridSize;

    fn configure(tier: DifficultyTier, seed: u64) -> (World, Vec<Event>) {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureSession { tier, seed },
            &mut events,
        );
        (world, events)
    }

    fn walk_player(world: &mut World, path: &[CellCoord]) -> Vec<Event> {
        let mut current = query::player_cell(world);
        let mut log = Vec::new();
        for cell in path {
            let direction =
                Direction::between(current, *cell).expect("solver paths step one cell at a time");
            apply(world, Command::StepPlayer { direction }, &mut log);
            if query::phase(world) != LevelPhase::Active {
                break;
            }
            current = *cell;
        }
        log
    }

    #[test]
    fn configure_session_builds_a_playable_level() {
        let (world, events) = configure(DifficultyTier::Easy, 1234);

        assert!(matches!(
            events.first(),
            Some(Event::SessionConfigured { seed: 1234, .. })
        ));
        assert!(matches!(
            events.get(1),
            Some(Event::LevelBegan { wins: 0, .. })
        ));

        let maze = query::maze(&world);
        assert_eq!(maze.size(), GridSize::new(10));

        let player = query::player_cell(&world);
        let goal = query::goal_cell(&world);
        let enemy = query::enemy_cell(&world);
        assert!(maze.is_open(player));
        assert!(maze.is_open(goal));
        assert!(maze.is_open(enemy));
        assert_ne!(player, goal);
        assert_ne!(player, enemy);
        assert_ne!(goal, enemy);

        let route = query::pursuit_route(&world);
        assert!(!route.is_empty());
        assert_eq!(route.last(), Some(&goal));
        let mut current = enemy;
        for cell in &route {
            assert!(maze.is_open(*cell));
            assert!(Direction::between(current, *cell).is_some());
            current = *cell;
        }

        for pickup in query::pickup_cells(&world) {
            assert!(maze.is_open(*pickup));
            assert_ne!(*pickup, player);
            assert_ne!(*pickup, goal);
            assert_ne!(*pickup, enemy);
            assert!(!route.contains(pickup));
        }

        assert_eq!(query::phase(&world), LevelPhase::Active);
        assert_eq!(query::time_remaining(&world), query::time_budget(&world));
    }

    #[test]
    fn session_layout_is_deterministic_for_same_seed() {
        let (first_world, first_events) = configure(DifficultyTier::Hard, 42);
        let (second_world, second_events) = configure(DifficultyTier::Hard, 42);

        assert_eq!(first_events, second_events);
        assert_eq!(query::maze(&first_world), query::maze(&second_world));
        assert_eq!(
            query::player_cell(&first_world),
            query::player_cell(&second_world)
        );
        assert_eq!(
            query::goal_cell(&first_world),
            query::goal_cell(&second_world)
        );
        assert_eq!(
            query::enemy_cell(&first_world),
            query::enemy_cell(&second_world)
        );
        assert_eq!(
            query::pickup_cells(&first_world),
            query::pickup_cells(&second_world)
        );
        assert_eq!(
            query::pursuit_route(&first_world),
            query::pursuit_route(&second_world)
        );
    }

    #[test]
    fn stepping_into_a_wall_is_silently_ignored() {
        let mut exercised = false;

        for seed in 0..4 {
            let (mut world, _) = configure(DifficultyTier::Easy, seed);
            let player = query::player_cell(&world);
            let maze = query::maze(&world).clone();

            let blocked = Direction::ALL.into_iter().find(|direction| {
                direction
                    .step(player)
                    .map_or(true, |cell| !maze.is_open(cell))
            });

            if let Some(direction) = blocked {
                let mut events = Vec::new();
                apply(&mut world, Command::StepPlayer { direction }, &mut events);
                assert!(events.is_empty());
                assert_eq!(query::player_cell(&world), player);
                exercised = true;
            }
        }

        assert!(exercised, "no seed produced a blocked neighbor");
    }

    #[test]
    fn reaching_the_goal_clears_the_level() {
        let mut cleared = false;

        for seed in 0..6 {
            let (mut world, _) = configure(DifficultyTier::Easy, 100 + seed);
            let maze = query::maze(&world).clone();
            let path = maze_chase_system_pathfinding::solve(
                &maze,
                query::player_cell(&world),
                query::goal_cell(&world),
            );
            assert!(!path.is_empty(), "goal placement is always reachable");

            let log = walk_player(&mut world, &path);

            if log
                .iter()
                .any(|event| matches!(event, Event::PlayerCaught { .. }))
            {
                // The only tree path to the goal ran through the enemy.
                assert_eq!(query::phase(&world), LevelPhase::Failed);
                continue;
            }

            assert!(log
                .iter()
                .any(|event| matches!(event, Event::GoalReached { wins: 1, .. })));
            assert_eq!(query::phase(&world), LevelPhase::Cleared);
            assert_eq!(query::wins(&world), 1);
            assert!(query::score(&world) >= 1_000);

            let mut events = Vec::new();
            apply(&mut world, Command::BeginLevel, &mut events);
            assert!(matches!(
                events.first(),
                Some(Event::LevelBegan { wins: 1, .. })
            ));
            assert_eq!(query::phase(&world), LevelPhase::Active);
            cleared = true;
            break;
        }

        assert!(cleared, "every seed ended in a capture");
    }

    #[test]
    fn walking_toward_a_pickup_banks_its_bonus() {
        let (mut world, _) = configure(DifficultyTier::Easy, 77);
        let maze = query::maze(&world).clone();
        let target = query::pickup_cells(&world)
            .first()
            .copied()
            .expect("levels place at least one pickup");
        let path =
            maze_chase_system_pathfinding::solve(&maze, query::player_cell(&world), target);
        assert!(!path.is_empty());

        let budget = query::time_budget(&world);
        let log = walk_player(&mut world, &path);

        let collected = log.iter().find_map(|event| match event {
            Event::PickupCollected { cell, bonus, score } => Some((*cell, *bonus, *score)),
            _ => None,
        });

        match collected {
            Some((cell, bonus, score)) => {
                assert!(bonus > Duration::ZERO);
                assert!(score >= SCORE_PER_PICKUP);
                assert!(query::time_remaining(&world) > budget);
                assert!(!query::pickup_cells(&world).contains(&cell));
            }
            None => {
                // The tree path crossed the goal or the enemy first; either
                // outcome must have closed the level.
                assert_ne!(query::phase(&world), LevelPhase::Active);
            }
        }
    }

    #[test]
    fn clock_expiry_fails_the_level() {
        let (mut world, _) = configure(DifficultyTier::Easy, 5);
        let budget = query::time_budget(&world);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: budget + Duration::from_secs(1),
            },
            &mut events,
        );

        assert!(matches!(events.first(), Some(Event::TimeAdvanced { .. })));
        assert!(matches!(
            events.get(1),
            Some(Event::TimeExpired { losses: 1 })
        ));
        assert_eq!(query::phase(&world), LevelPhase::Failed);
        assert_eq!(query::losses(&world), 1);

        let mut after = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut after,
        );
        apply(
            &mut world,
            Command::StepPlayer {
                direction: Direction::North,
            },
            &mut after,
        );
        assert!(after.is_empty());

        apply(&mut world, Command::BeginLevel, &mut after);
        assert!(matches!(
            after.first(),
            Some(Event::LevelBegan { wins: 0, .. })
        ));
        assert_eq!(query::phase(&world), LevelPhase::Active);
    }

    #[test]
    fn partial_ticks_drain_the_clock() {
        let (mut world, _) = configure(DifficultyTier::Easy, 6);
        let budget = query::time_budget(&world);
        let dt = Duration::from_secs(1);

        let mut events = Vec::new();
        apply(&mut world, Command::Tick { dt }, &mut events);

        assert_eq!(query::time_remaining(&world), budget - dt);
        assert_eq!(query::phase(&world), LevelPhase::Active);
    }

    #[test]
    fn enemy_follows_its_route() {
        let (mut world, _) = configure(DifficultyTier::Easy, 7);
        let route = query::pursuit_route(&world);
        let head = route.first().copied().expect("route starts non-empty");
        let enemy = query::enemy_cell(&world);
        let direction = Direction::between(enemy, head).expect("route head is adjacent");

        let mut events = Vec::new();
        apply(&mut world, Command::StepEnemy { direction }, &mut events);

        assert!(matches!(
            events.first(),
            Some(Event::EnemyAdvanced { to, .. }) if *to == head
        ));
        assert_eq!(query::enemy_cell(&world), head);
        assert_eq!(query::pursuit_route(&world).len(), route.len() - 1);
    }

    #[test]
    fn enemy_ignores_steps_off_its_route() {
        let (mut world, _) = configure(DifficultyTier::Easy, 8);
        let route = query::pursuit_route(&world);
        let head = route.first().copied().expect("route starts non-empty");
        let enemy = query::enemy_cell(&world);
        let expected = Direction::between(enemy, head).expect("route head is adjacent");
        let wrong = Direction::ALL
            .into_iter()
            .find(|direction| *direction != expected)
            .expect("another direction exists");

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StepEnemy { direction: wrong },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::enemy_cell(&world), enemy);
        assert_eq!(query::pursuit_route(&world), route);
    }

    #[test]
    fn retry_after_loss_reshuffles_the_layout_seed() {
        let (mut world, _) = configure(DifficultyTier::Easy, 9);
        let budget = query::time_budget(&world);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: budget + Duration::from_secs(1),
            },
            &mut events,
        );
        apply(&mut world, Command::BeginLevel, &mut events);

        assert_eq!(query::wins(&world), 0);
        assert_eq!(query::losses(&world), 1);
        assert_eq!(query::phase(&world), LevelPhase::Active);
        assert_eq!(query::grid_size(&world), GridSize::new(10));
    }
}
