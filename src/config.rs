//! Game Configuration
//!
//! Every gameplay tunable lives here, loaded from a RON file when one is
//! present. Missing fields fall back to their defaults, so a config file
//! only needs the values it changes:
//!
//! ```ron
//! (
//!   enemy: (max_concurrent: 8, spawn_interval_ms: 2000.0),
//!   powerup: (drop_chance: 0.6),
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "TANK_BATTLE_CONFIG";

/// Errors from loading or saving a config file
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Settings Groups
// ============================================================================

/// Playfield dimensions and tick rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Tile edge in pixels
    pub tile_size: f32,
    /// Playfield width in tiles
    pub grid_width: u32,
    /// Playfield height in tiles
    pub grid_height: u32,
    /// Simulation ticks per second
    pub target_fps: u32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            grid_width: 20,
            grid_height: 15,
            target_fps: 60,
        }
    }
}

impl ArenaSettings {
    pub fn width(&self) -> f32 {
        self.grid_width as f32 * self.tile_size
    }

    pub fn height(&self) -> f32 {
        self.grid_height as f32 * self.tile_size
    }

    /// Milliseconds per simulation tick
    pub fn frame_time_ms(&self) -> f64 {
        1000.0 / self.target_fps as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Pixels per frame
    pub speed: f32,
    pub shoot_cooldown_ms: f64,
    /// Starting (and maximum) lives
    pub max_health: i32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: 3.0,
            shoot_cooldown_ms: 300.0,
            max_health: 3,
            color: 0x4CAF50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub color: u32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub direction_change_min_ms: f64,
    pub direction_change_max_ms: f64,
    pub shoot_cooldown_min_ms: f64,
    pub shoot_cooldown_max_ms: f64,
    pub spawn_interval_ms: f64,
    /// Cap on enemies alive at once
    pub max_concurrent: usize,
    /// Enemies spawned during level 0
    pub per_level: u32,
    /// Extra enemies per level index
    pub per_level_growth: u32,
    pub max_health: i32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            color: 0xF44336,
            speed_min: 1.0,
            speed_max: 1.5,
            direction_change_min_ms: 1000.0,
            direction_change_max_ms: 3000.0,
            shoot_cooldown_min_ms: 1500.0,
            shoot_cooldown_max_ms: 3000.0,
            spawn_interval_ms: 3000.0,
            max_concurrent: 5,
            per_level: 10,
            per_level_growth: 2,
            max_health: 1,
        }
    }
}

impl EnemySettings {
    /// Spawn quota for a level
    pub fn quota(&self, level: u32) -> u32 {
        self.per_level
            .saturating_add(level.saturating_mul(self.per_level_growth))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSettings {
    pub size: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub damage: i32,
}

impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            size: 8.0,
            player_speed: 5.0,
            enemy_speed: 4.0,
            damage: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupSettings {
    /// Chance an enemy kill drops a pickup
    pub drop_chance: f64,
    /// How long a pickup stays on the ground
    pub lifetime_ms: f64,
    /// Helmet invincibility window
    pub invincibility_ms: f64,
    /// Floor for the star's cooldown halving
    pub min_shoot_cooldown_ms: f64,
}

impl Default for PowerupSettings {
    fn default() -> Self {
        Self {
            drop_chance: 0.4,
            lifetime_ms: 10_000.0,
            invincibility_ms: 10_000.0,
            min_shoot_cooldown_ms: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub explosion_frame_ms: f64,
    pub small_explosion_frames: u32,
    pub large_explosion_frames: u32,
    /// Delay between the lethal hit and the player's removal
    pub death_delay_ms: f64,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            explosion_frame_ms: 80.0,
            small_explosion_frames: 8,
            large_explosion_frames: 12,
            death_delay_ms: 2000.0,
        }
    }
}

/// Random obstacle layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    /// Placement attempts on level 0
    pub base_obstacles: u32,
    /// Extra attempts per level index
    pub obstacles_per_level: u32,
    /// Probability an obstacle is brick
    pub brick_weight: f64,
    /// Tiles around the player kept clear
    pub safe_radius_tiles: f32,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            base_obstacles: 40,
            obstacles_per_level: 5,
            brick_weight: 0.7,
            safe_radius_tiles: 2.0,
        }
    }
}

impl LevelSettings {
    pub fn attempts(&self, level: u32) -> u32 {
        self.base_obstacles
            .saturating_add(level.saturating_mul(self.obstacles_per_level))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSettings {
    pub enemy_kill: u32,
    pub level_clear: u32,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            enemy_kill: 100,
            level_clear: 500,
        }
    }
}

/// All gameplay tunables
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaSettings,
    pub player: PlayerSettings,
    pub enemy: EnemySettings,
    pub bullet: BulletSettings,
    pub powerup: PowerupSettings,
    pub effects: EffectSettings,
    pub level: LevelSettings,
    pub score: ScoreSettings,
}

impl GameConfig {
    /// Load from `$TANK_BATTLE_CONFIG` or the user config dir, falling back
    /// to defaults. A missing file is normal; a broken one is logged.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match load_config(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load_or_default() -> Self {
        Self::default()
    }
}

/// Config file location: env override first, then `<config_dir>/tank-battle/config.ron`
#[cfg(not(target_arch = "wasm32"))]
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("tank-battle").join("config.ron"))
}

#[cfg(target_arch = "wasm32")]
pub fn default_config_path() -> Option<PathBuf> {
    None
}

/// Finite and not negative
fn is_valid_amount(f: f64) -> bool {
    f.is_finite() && f >= 0.0
}

/// Reject configs the simulation cannot run with
pub fn validate_config(config: &GameConfig) -> Result<(), ConfigError> {
    let fail = |msg: String| Err(ConfigError::ValidationError(msg));

    let arena = &config.arena;
    if !(arena.tile_size.is_finite() && arena.tile_size > 0.0) {
        return fail(format!("tile_size must be positive (got {})", arena.tile_size));
    }
    if arena.grid_width < 5 || arena.grid_height < 5 {
        return fail(format!(
            "grid must be at least 5x5 (got {}x{})",
            arena.grid_width, arena.grid_height
        ));
    }
    if arena.target_fps == 0 {
        return fail("target_fps must be non-zero".to_string());
    }

    let enemy = &config.enemy;
    let player = &config.player;
    let amounts = [
        ("player speed", player.speed as f64),
        ("player shoot_cooldown_ms", player.shoot_cooldown_ms),
        ("enemy speed_min", enemy.speed_min as f64),
        ("enemy speed_max", enemy.speed_max as f64),
        ("enemy direction_change_min_ms", enemy.direction_change_min_ms),
        ("enemy direction_change_max_ms", enemy.direction_change_max_ms),
        ("enemy shoot_cooldown_min_ms", enemy.shoot_cooldown_min_ms),
        ("enemy shoot_cooldown_max_ms", enemy.shoot_cooldown_max_ms),
        ("enemy spawn_interval_ms", enemy.spawn_interval_ms),
        ("bullet player_speed", config.bullet.player_speed as f64),
        ("bullet enemy_speed", config.bullet.enemy_speed as f64),
        ("powerup lifetime_ms", config.powerup.lifetime_ms),
        ("powerup invincibility_ms", config.powerup.invincibility_ms),
        ("powerup min_shoot_cooldown_ms", config.powerup.min_shoot_cooldown_ms),
        ("effects explosion_frame_ms", config.effects.explosion_frame_ms),
        ("effects death_delay_ms", config.effects.death_delay_ms),
        ("level safe_radius_tiles", config.level.safe_radius_tiles as f64),
    ];
    for (name, value) in amounts {
        if !is_valid_amount(value) {
            return fail(format!("{} must be finite and non-negative (got {})", name, value));
        }
    }

    if enemy.speed_min > enemy.speed_max {
        return fail("enemy speed_min exceeds speed_max".to_string());
    }
    if enemy.direction_change_min_ms > enemy.direction_change_max_ms {
        return fail("enemy direction_change_min_ms exceeds direction_change_max_ms".to_string());
    }
    if enemy.shoot_cooldown_min_ms > enemy.shoot_cooldown_max_ms {
        return fail("enemy shoot_cooldown_min_ms exceeds shoot_cooldown_max_ms".to_string());
    }

    for (name, p) in [
        ("powerup drop_chance", config.powerup.drop_chance),
        ("level brick_weight", config.level.brick_weight),
    ] {
        if !(0.0..=1.0).contains(&p) {
            return fail(format!("{} must be within [0, 1] (got {})", name, p));
        }
    }

    if config.player.max_health <= 0 || enemy.max_health <= 0 {
        return fail("max_health must be positive".to_string());
    }
    if !(config.bullet.size > 0.0) {
        return fail("bullet size must be positive".to_string());
    }
    if config.effects.small_explosion_frames == 0 || config.effects.large_explosion_frames == 0 {
        return fail("explosion frame counts must be non-zero".to_string());
    }

    Ok(())
}

/// Parse and validate a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(s)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Save a config as pretty RON, creating parent dirs as needed
pub fn save_config<P: AsRef<Path>>(config: &GameConfig, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());
    let ron_string = ron::ser::to_string_pretty(config, pretty)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, ron_string)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arena() {
        let config = GameConfig::default();
        assert_eq!(config.arena.width(), 640.0);
        assert_eq!(config.arena.height(), 480.0);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = load_config_from_str("(enemy: (max_concurrent: 8))").unwrap();
        assert_eq!(config.enemy.max_concurrent, 8);
        assert_eq!(config.enemy.spawn_interval_ms, 3000.0);
        assert_eq!(config.player, PlayerSettings::default());
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = load_config_from_str("(powerup: (drop_chance: 1.5))").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_non_finite() {
        for ron in [
            "(enemy: (speed_min: NaN))",
            "(enemy: (shoot_cooldown_max_ms: inf))",
            "(enemy: (spawn_interval_ms: NaN))",
            "(powerup: (min_shoot_cooldown_ms: -inf))",
            "(player: (speed: NaN))",
        ] {
            assert!(
                matches!(load_config_from_str(ron), Err(ConfigError::ValidationError(_))),
                "accepted {}",
                ron
            );
        }
    }

    #[test]
    fn test_rejects_negative_timers() {
        let result = load_config_from_str("(effects: (death_delay_ms: -1.0))");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let err = load_config_from_str("(arena: (grid_width: 3))").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = load_config_from_str("(arena: (").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ron");

        let mut config = GameConfig::default();
        config.score.enemy_kill = 250;
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("absent.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_quota_and_attempts_grow_with_level() {
        let config = GameConfig::default();
        assert_eq!(config.enemy.quota(0), 10);
        assert_eq!(config.enemy.quota(3), 16);
        assert_eq!(config.level.attempts(0), 40);
        assert_eq!(config.level.attempts(2), 50);
    }
}
