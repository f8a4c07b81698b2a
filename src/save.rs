//! Saved-game persistence.
//!
//! One versioned JSON snapshot in the platform data directory.
//!
//! Structure:
//! - Pure functions: path computation, world ↔ snapshot conversion
//! - Effect functions: snapshot I/O

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::map::TileMap;
use crate::world::{Shard, World};

/// Current save format version.
const SAVE_VERSION: u32 = 1;

/// Save filename within the data directory.
const SAVE_FILENAME: &str = "save.json";

/// Snapshot of a game in progress. The message log is transient and
/// deliberately not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub seed: u64,
    pub map: TileMap,
    pub player: Point,
    pub shards: Vec<Shard>,
    pub connections: Vec<Point>,
}

// ============================================================================
// PURE FUNCTIONS (Computations)
// ============================================================================

/// Returns the default save file location.
///
/// `<platform data dir>/ciphershards/save.json`
pub fn save_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ciphershards")
        .join(SAVE_FILENAME)
}

impl SaveGame {
    /// Snapshot a world.
    pub fn from_world(world: &World) -> Self {
        SaveGame {
            version: SAVE_VERSION,
            seed: world.seed,
            map: world.map.clone(),
            player: world.player,
            shards: world.shards.clone(),
            connections: world.connections.clone(),
        }
    }

    /// Rebuild a world from a snapshot. The message log starts empty.
    pub fn into_world(self) -> World {
        World {
            map: self.map,
            player: self.player,
            shards: self.shards,
            connections: self.connections,
            messages: Vec::new(),
            seed: self.seed,
        }
    }
}

// ============================================================================
// EFFECT FUNCTIONS (Actions)
// ============================================================================

/// Write a snapshot, creating the parent directory if needed.
pub fn write_save(save: &SaveGame, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(save).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Failed to serialize save: {}", e))
    })?;
    fs::write(path, contents)
}

/// Load a snapshot from disk.
///
/// # Errors
/// I/O errors pass through; malformed JSON and version mismatches are
/// reported as `InvalidData`.
pub fn load_save(path: &Path) -> io::Result<SaveGame> {
    let contents = fs::read_to_string(path)?;
    let save: SaveGame = serde_json::from_str(&contents).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Invalid save file: {}", e))
    })?;

    if save.version != SAVE_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Unsupported save version {} (expected {})", save.version, SAVE_VERSION),
        ));
    }

    Ok(save)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn played_world() -> World {
        let mut world = World::new(11, 5);
        world.move_player(1, 0);
        world.player = world.shards[0].pos;
        world.grab();
        world.connections.push(Point::new(3, 3));
        world.push_message("transient");
        world
    }

    #[test]
    fn save_path_is_under_app_dir() {
        let path = save_path();
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("ciphershards"));
        assert!(path_str.ends_with("save.json"));
    }

    #[test]
    fn snapshot_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("save.json");

        let world = played_world();
        let save = SaveGame::from_world(&world);
        write_save(&save, &path).unwrap();

        let loaded = load_save(&path).unwrap();
        assert_eq!(loaded, save);

        let restored = loaded.into_world();
        assert_eq!(restored.player, world.player);
        assert_eq!(restored.shards, world.shards);
        assert_eq!(restored.connections, world.connections);
        assert_eq!(restored.seed, world.seed);
    }

    #[test]
    fn message_log_is_not_persisted() {
        let world = played_world();
        let restored = SaveGame::from_world(&world).into_world();
        assert!(restored.messages.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_save(&dir.path().join("absent.json"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "not json").unwrap();

        let err = load_save(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");

        let mut save = SaveGame::from_world(&World::new(0, 0));
        save.version = 99;
        let contents = serde_json::to_string(&save).unwrap();
        fs::write(&path, contents).unwrap();

        let err = load_save(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("version"));
    }
}
