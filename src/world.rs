//! Game state and rules: the player, the shards, and what they do.
//!
//! Everything here is pure with respect to the terminal — the world is
//! mutated by update calls and rendered by [`World::draw`], which builds
//! a fresh grid every time. The tui layer owns all I/O.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::geometry::{line, Point};
use crate::grid::{Cell, Grid, StyleKey, GRID_HEIGHT, GRID_WIDTH};
use crate::map::TileMap;

/// Glyph for the player.
pub const PLAYER_GLYPH: char = '@';

/// Glyph for an uncarried shard (CP437 15).
pub const SHARD_GLYPH: char = '☼';

/// Glyph for an etched connection point (CP437 7).
pub const CONNECTION_GLYPH: char = '•';

/// Shards spawned in a fresh world.
pub const DEFAULT_SHARD_COUNT: usize = 5;

/// Messages kept in the log before the oldest are discarded.
const MESSAGE_CAP: usize = 64;

// ============================================================================
// ENTITIES
// ============================================================================

/// Identity used for carry and connection attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerId(pub u8);

/// The player's owner id.
pub const PLAYER_OWNER: OwnerId = OwnerId(1);

/// A collectable cipher shard.
///
/// Carried shards keep their last ground position until dropped; they are
/// not drawn while carried. `connector` marks a pending connection to an
/// owner; `active` marks a shard waiting to be paired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shard {
    pub name: String,
    /// What the player sees — the shard's name in cipher.
    pub display_name: String,
    pub pos: Point,
    pub carried_by: Option<OwnerId>,
    pub connector: Option<OwnerId>,
    pub active: bool,
}

impl Shard {
    /// A fresh, inert cipher shard at the given position.
    pub fn cipher_shard(pos: Point) -> Self {
        Shard {
            name: "cipher_shard".to_string(),
            display_name: "ƆıdɥǝɹSɥɐɹp".to_string(),
            pos,
            carried_by: None,
            connector: None,
            active: false,
        }
    }
}

// ============================================================================
// WORLD
// ============================================================================

/// Complete game state.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub map: TileMap,
    pub player: Point,
    pub shards: Vec<Shard>,
    /// Etched connection lines, accumulated across the session.
    pub connections: Vec<Point>,
    /// Recent event messages, oldest first.
    pub messages: Vec<String>,
    /// Seed the world was generated from.
    pub seed: u64,
}

impl World {
    /// Generate a fresh world: open 80×50 floor, player at the center,
    /// shards scattered at seeded-random positions.
    pub fn new(seed: u64, shard_count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let shards = (0..shard_count)
            .map(|_| {
                let pos = Point::new(
                    rng.random_range(0..GRID_WIDTH),
                    rng.random_range(0..GRID_HEIGHT),
                );
                Shard::cipher_shard(pos)
            })
            .collect();

        World {
            map: TileMap::open(GRID_WIDTH, GRID_HEIGHT),
            player: Point::new(39, 24),
            shards,
            connections: Vec::new(),
            messages: Vec::new(),
            seed,
        }
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Move the player by one step, axis-clamped to the map bounds.
    /// The move is refused if the destination tile is not walkable.
    pub fn move_player(&mut self, dx: i32, dy: i32) {
        let raw = self.player.offset(dx, dy);
        let dest = Point::new(
            raw.x.clamp(0, self.map.width() - 1),
            raw.y.clamp(0, self.map.height() - 1),
        );
        if self.map.is_walkable(dest) {
            self.player = dest;
        }
    }

    // ------------------------------------------------------------------
    // Shard actions
    // ------------------------------------------------------------------

    /// Pick up every uncarried shard on the player's tile.
    pub fn grab(&mut self) {
        let mut collected = Vec::new();
        for shard in &mut self.shards {
            if shard.carried_by.is_none() && shard.pos == self.player {
                shard.carried_by = Some(PLAYER_OWNER);
                collected.push(shard.display_name.clone());
            }
        }
        for name in collected {
            self.push_message(format!("Collected {}", name));
        }
    }

    /// Drop the first carried shard at the player's tile.
    pub fn drop_carried(&mut self) {
        let player = self.player;
        let dropped = self.shards.iter_mut().find_map(|shard| {
            if shard.carried_by == Some(PLAYER_OWNER) {
                shard.pos = player;
                shard.carried_by = None;
                Some(shard.display_name.clone())
            } else {
                None
            }
        });
        if let Some(name) = dropped {
            self.push_message(format!("Dropped {}", name));
        }
    }

    /// Mark every shard on the player's tile as connected to the player.
    pub fn connect(&mut self) {
        let player = self.player;
        let mut connected = 0;
        for shard in &mut self.shards {
            if shard.pos == player {
                shard.connector = Some(PLAYER_OWNER);
                connected += 1;
            }
        }
        for _ in 0..connected {
            self.push_message("Connected");
        }
    }

    /// Activate every shard connected to the player, consuming the
    /// connection.
    pub fn activate(&mut self) {
        let mut activated = 0;
        for shard in &mut self.shards {
            if shard.connector == Some(PLAYER_OWNER) {
                shard.connector = None;
                shard.active = true;
                activated += 1;
            }
        }
        for _ in 0..activated {
            self.push_message("Activated");
        }
    }

    /// Pair off active shards: while at least two are active, deactivate
    /// the first two and etch the traced line between them.
    pub fn resolve_connections(&mut self) {
        loop {
            let active: Vec<usize> = self
                .shards
                .iter()
                .enumerate()
                .filter(|(_, s)| s.active)
                .map(|(i, _)| i)
                .take(2)
                .collect();
            if active.len() < 2 {
                break;
            }

            let (a, b) = (active[0], active[1]);
            self.shards[a].active = false;
            self.shards[b].active = false;
            let segment = line(self.shards[a].pos, self.shards[b].pos);
            self.connections.extend(segment);
        }
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    /// Append to the message log, discarding the oldest past the cap.
    pub fn push_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.messages.push(message);
        if self.messages.len() > MESSAGE_CAP {
            let excess = self.messages.len() - MESSAGE_CAP;
            self.messages.drain(..excess);
        }
    }

    /// Most recent message, if any.
    pub fn latest_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Build the frame grid: tile layer first, then connection points,
    /// then uncarried shards, then the player. Fresh grid every call.
    pub fn draw(&self) -> Grid {
        let mut grid = Grid::new(self.map.width(), self.map.height());
        self.map.render_into(&mut grid);

        for point in &self.connections {
            grid.set(*point, Cell::styled(CONNECTION_GLYPH, StyleKey::Connection));
        }
        for shard in self.shards.iter().filter(|s| s.carried_by.is_none()) {
            grid.set(shard.pos, Cell::styled(SHARD_GLYPH, StyleKey::Shard));
        }
        grid.set(self.player, Cell::styled(PLAYER_GLYPH, StyleKey::Player));

        grid
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Tile, FLOOR_GLYPH};

    /// A world with no shards — the bare bootstrap state.
    fn bare_world() -> World {
        World::new(0, 0)
    }

    /// A world with a single shard at a known position.
    fn world_with_shard_at(pos: Point) -> World {
        let mut world = bare_world();
        world.shards.push(Shard::cipher_shard(pos));
        world
    }

    // -- Generation --

    #[test]
    fn fresh_world_centers_player() {
        let world = World::new(0, DEFAULT_SHARD_COUNT);
        assert_eq!(world.player, Point::new(39, 24));
    }

    #[test]
    fn fresh_world_spawns_requested_shards_in_bounds() {
        let world = World::new(42, DEFAULT_SHARD_COUNT);
        assert_eq!(world.shards.len(), 5);
        for shard in &world.shards {
            assert!(shard.pos.x >= 0 && shard.pos.x < GRID_WIDTH);
            assert!(shard.pos.y >= 0 && shard.pos.y < GRID_HEIGHT);
            assert!(shard.carried_by.is_none());
            assert!(shard.connector.is_none());
            assert!(!shard.active);
        }
    }

    #[test]
    fn same_seed_same_world() {
        assert_eq!(World::new(7, 5), World::new(7, 5));
    }

    #[test]
    fn different_seeds_differ() {
        let a = World::new(1, 5);
        let b = World::new(2, 5);
        let positions = |w: &World| w.shards.iter().map(|s| s.pos).collect::<Vec<_>>();
        assert_ne!(positions(&a), positions(&b));
    }

    // -- Movement --

    #[test]
    fn movement_steps_one_tile() {
        let mut world = bare_world();
        world.move_player(1, 0);
        assert_eq!(world.player, Point::new(40, 24));
        world.move_player(0, -1);
        assert_eq!(world.player, Point::new(40, 23));
        world.move_player(-1, 1);
        assert_eq!(world.player, Point::new(39, 24));
    }

    #[test]
    fn movement_clamps_at_edges() {
        let mut world = bare_world();
        world.player = Point::new(0, 0);
        world.move_player(-1, 0);
        assert_eq!(world.player, Point::new(0, 0));
        world.move_player(0, -1);
        assert_eq!(world.player, Point::new(0, 0));

        world.player = Point::new(GRID_WIDTH - 1, GRID_HEIGHT - 1);
        world.move_player(1, 0);
        assert_eq!(world.player, Point::new(GRID_WIDTH - 1, GRID_HEIGHT - 1));
        world.move_player(0, 1);
        assert_eq!(world.player, Point::new(GRID_WIDTH - 1, GRID_HEIGHT - 1));
    }

    #[test]
    fn diagonal_at_edge_clamps_per_axis() {
        let mut world = bare_world();
        world.player = Point::new(5, 0);
        world.move_player(1, -1);
        // y clamps at the top, x still advances
        assert_eq!(world.player, Point::new(6, 0));
    }

    #[test]
    fn walls_block_movement() {
        let mut world = bare_world();
        world.map.set(Point::new(40, 24), Tile::Wall);
        world.move_player(1, 0);
        assert_eq!(world.player, Point::new(39, 24));
    }

    // -- Grab / drop --

    #[test]
    fn grab_picks_up_shard_on_tile() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.grab();
        assert_eq!(world.shards[0].carried_by, Some(PLAYER_OWNER));
        assert_eq!(world.latest_message(), Some("Collected ƆıdɥǝɹSɥɐɹp"));
    }

    #[test]
    fn grab_ignores_shards_elsewhere() {
        let mut world = world_with_shard_at(Point::new(0, 0));
        world.grab();
        assert_eq!(world.shards[0].carried_by, None);
        assert!(world.messages.is_empty());
    }

    #[test]
    fn grab_is_idempotent_for_carried_shards() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.grab();
        world.grab();
        assert_eq!(world.messages.len(), 1);
    }

    #[test]
    fn grab_collects_every_shard_on_tile() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.shards.push(Shard::cipher_shard(Point::new(39, 24)));
        world.grab();
        assert!(world.shards.iter().all(|s| s.carried_by == Some(PLAYER_OWNER)));
        assert_eq!(world.messages.len(), 2);
    }

    #[test]
    fn drop_places_first_carried_shard_at_player() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.grab();
        world.move_player(1, 0);
        world.drop_carried();
        assert_eq!(world.shards[0].carried_by, None);
        assert_eq!(world.shards[0].pos, Point::new(40, 24));
        assert_eq!(world.latest_message(), Some("Dropped ƆıdɥǝɹSɥɐɹp"));
    }

    #[test]
    fn drop_releases_one_shard_at_a_time() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.shards.push(Shard::cipher_shard(Point::new(39, 24)));
        world.grab();
        world.drop_carried();
        let carried = world.shards.iter().filter(|s| s.carried_by.is_some()).count();
        assert_eq!(carried, 1);
    }

    #[test]
    fn drop_with_nothing_carried_is_silent() {
        let mut world = bare_world();
        world.drop_carried();
        assert!(world.messages.is_empty());
    }

    // -- Connect / activate --

    #[test]
    fn connect_marks_shard_on_tile() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.connect();
        assert_eq!(world.shards[0].connector, Some(PLAYER_OWNER));
        assert_eq!(world.latest_message(), Some("Connected"));
    }

    #[test]
    fn connect_ignores_shards_elsewhere() {
        let mut world = world_with_shard_at(Point::new(10, 10));
        world.connect();
        assert_eq!(world.shards[0].connector, None);
    }

    #[test]
    fn activate_consumes_connection_and_sets_active() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.connect();
        world.activate();
        assert_eq!(world.shards[0].connector, None);
        assert!(world.shards[0].active);
        assert_eq!(world.latest_message(), Some("Activated"));
    }

    #[test]
    fn activate_without_connection_does_nothing() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.activate();
        assert!(!world.shards[0].active);
        assert!(world.messages.is_empty());
    }

    // -- Connection resolution --

    #[test]
    fn single_active_shard_stays_active() {
        let mut world = world_with_shard_at(Point::new(5, 5));
        world.shards[0].active = true;
        world.resolve_connections();
        assert!(world.shards[0].active);
        assert!(world.connections.is_empty());
    }

    #[test]
    fn two_active_shards_etch_a_line_and_deactivate() {
        let mut world = world_with_shard_at(Point::new(2, 5));
        world.shards.push(Shard::cipher_shard(Point::new(6, 5)));
        world.shards[0].active = true;
        world.shards[1].active = true;

        world.resolve_connections();

        assert!(!world.shards[0].active);
        assert!(!world.shards[1].active);
        assert_eq!(world.connections.first(), Some(&Point::new(2, 5)));
        assert_eq!(world.connections.last(), Some(&Point::new(6, 5)));
        assert_eq!(world.connections.len(), 5);
    }

    #[test]
    fn four_active_shards_resolve_into_two_lines() {
        let mut world = bare_world();
        for i in 0..4 {
            let mut shard = Shard::cipher_shard(Point::new(i * 10, 0));
            shard.active = true;
            world.shards.push(shard);
        }
        world.resolve_connections();
        assert!(world.shards.iter().all(|s| !s.active));
        // 0–10 and 20–30, endpoint-inclusive
        assert_eq!(world.connections.len(), 22);
    }

    #[test]
    fn connections_accumulate_across_resolutions() {
        let mut world = world_with_shard_at(Point::new(0, 0));
        world.shards.push(Shard::cipher_shard(Point::new(3, 0)));
        world.shards[0].active = true;
        world.shards[1].active = true;
        world.resolve_connections();
        let first = world.connections.len();

        world.shards[0].active = true;
        world.shards[1].active = true;
        world.resolve_connections();
        assert_eq!(world.connections.len(), first * 2);
    }

    // -- Messages --

    #[test]
    fn message_log_is_bounded() {
        let mut world = bare_world();
        for i in 0..200 {
            world.push_message(format!("message {}", i));
        }
        assert_eq!(world.messages.len(), MESSAGE_CAP);
        assert_eq!(world.latest_message(), Some("message 199"));
        assert_eq!(world.messages.first().map(String::as_str), Some("message 136"));
    }

    // -- Drawing --

    #[test]
    fn draw_is_fresh_and_deterministic() {
        let world = World::new(3, DEFAULT_SHARD_COUNT);
        let first = world.draw();
        let second = world.draw();
        assert_eq!(first, second);
    }

    #[test]
    fn draw_dimensions_match_grid_constants() {
        let grid = bare_world().draw();
        assert_eq!(grid.width(), GRID_WIDTH);
        assert_eq!(grid.height(), GRID_HEIGHT);
    }

    #[test]
    fn bare_world_draw_is_floor_plus_player() {
        let world = bare_world();
        let grid = world.draw();
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                let point = Point::new(x, y);
                let cell = grid.get(point).unwrap();
                if point == world.player {
                    assert_eq!(cell.glyph, PLAYER_GLYPH);
                    assert_eq!(cell.style, StyleKey::Player);
                } else {
                    assert_eq!(cell.glyph, FLOOR_GLYPH);
                    assert_eq!(cell.style, StyleKey::Floor);
                }
            }
        }
    }

    #[test]
    fn carried_shards_are_not_drawn() {
        let mut world = world_with_shard_at(Point::new(10, 10));
        let before = world.draw();
        assert_eq!(before.get(Point::new(10, 10)).unwrap().glyph, SHARD_GLYPH);

        world.player = Point::new(10, 10);
        world.grab();
        world.player = Point::new(39, 24);
        let after = world.draw();
        assert_eq!(after.get(Point::new(10, 10)).unwrap().glyph, FLOOR_GLYPH);
    }

    #[test]
    fn player_draws_over_shards_and_connections() {
        let mut world = world_with_shard_at(Point::new(39, 24));
        world.connections.push(Point::new(39, 24));
        let grid = world.draw();
        assert_eq!(grid.get(Point::new(39, 24)).unwrap().glyph, PLAYER_GLYPH);
    }

    #[test]
    fn connections_draw_over_floor() {
        let mut world = bare_world();
        world.connections.push(Point::new(1, 1));
        let grid = world.draw();
        let cell = grid.get(Point::new(1, 1)).unwrap();
        assert_eq!(cell.glyph, CONNECTION_GLYPH);
        assert_eq!(cell.style, StyleKey::Connection);
    }
}
