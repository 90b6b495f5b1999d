//! Game Runtime
//!
//! Owns the world and session for one run of the game and drives the
//! systems in a fixed order at the configured tick rate:
//!
//! 1. due removals (queued deaths)
//! 2. movement
//! 3. combat (bullets, then enemy AI and contact)
//! 4. shooting
//! 5. powerups
//! 6. enemy spawning / level progression
//! 7. explosion animation
//!
//! Paused time is subtracted from the clock handed to systems, so
//! cooldowns and lifetimes do not run out while the game is paused.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::components::{Health, Score};
use super::director::start_game;
use super::event::Events;
use super::session::Session;
use super::systems::{self, EnemySpawner};
use super::world::World;
use crate::config::GameConfig;
use crate::input::{apply_player_input, Action, InputState};

/// Elapsed frames handed to a single tick are capped at this
const MAX_CATCHUP_FRAMES: f64 = 3.0;

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Title,
    Playing,
    Paused,
    GameOver,
}

/// Fixed-cadence tick gate.
///
/// A tick is due once a full frame interval has elapsed since the last
/// one. The leftover fraction carries into the next interval.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frame_time: f64,
    last: f64,
}

impl FrameClock {
    pub fn new(frame_time: f64) -> Self {
        Self { frame_time, last: 0.0 }
    }

    pub fn reset(&mut self, now: f64) {
        self.last = now;
    }

    /// When a tick is due, returns the whole frame intervals it consumes
    /// in ms. The leftover fraction stays on the clock for the next tick.
    pub fn advance(&mut self, now: f64) -> Option<f64> {
        let delta = now - self.last;
        if delta < self.frame_time {
            return None;
        }
        let leftover = delta % self.frame_time;
        self.last = now - leftover;
        Some(delta - leftover)
    }

    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }
}

/// Read-only numbers for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u32,
    /// 1-based for display
    pub level: u32,
    pub lives: i32,
}

pub struct GameRuntime {
    pub config: GameConfig,
    pub status: GameStatus,
    pub world: World,
    pub session: Session,
    pub events: Events,
    spawner: EnemySpawner,
    clock: FrameClock,
    rng: SmallRng,
    /// Host time when pause began
    paused_at: Option<f64>,
    /// Total host time spent paused
    paused_total: f64,
    /// Last HUD values while the player was alive
    last_hud: HudSnapshot,
}

impl GameRuntime {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let world = World::new(config.arena.width(), config.arena.height());
        let clock = FrameClock::new(config.arena.frame_time_ms());
        Self {
            config,
            status: GameStatus::Title,
            world,
            session: Session::default(),
            events: Events::new(),
            spawner: EnemySpawner::new(0.0),
            clock,
            rng: SmallRng::seed_from_u64(seed),
            paused_at: None,
            paused_total: 0.0,
            last_hud: HudSnapshot::default(),
        }
    }

    /// Throw away any running game and start a new one at host time `now`.
    pub fn start(&mut self, now: f64) {
        self.world = World::new(self.config.arena.width(), self.config.arena.height());
        self.events.clear_all();
        self.paused_at = None;
        self.paused_total = 0.0;

        self.session = start_game(&mut self.world, &self.config, &mut self.rng);
        self.spawner = EnemySpawner::new(now);
        self.clock.reset(now);
        self.status = GameStatus::Playing;
        self.refresh_hud();
    }

    pub fn pause(&mut self, now: f64) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: f64) {
        if self.status != GameStatus::Paused {
            return;
        }
        if let Some(at) = self.paused_at.take() {
            self.paused_total += now - at;
        }
        self.clock.reset(now);
        self.status = GameStatus::Playing;
    }

    /// Host time minus time spent paused
    pub fn game_time(&self, now: f64) -> f64 {
        now - self.paused_total
    }

    /// One host frame: menu keys, then a simulation tick if one is due.
    /// Returns true if the simulation advanced.
    pub fn frame(&mut self, now: f64, input: &InputState) -> bool {
        match self.status {
            GameStatus::Title | GameStatus::GameOver => {
                if input.action_pressed(Action::Start) {
                    self.start(now);
                }
                return false;
            }
            GameStatus::Paused => {
                if input.action_pressed(Action::Pause) {
                    self.resume(now);
                }
                return false;
            }
            GameStatus::Playing => {
                if input.action_pressed(Action::Pause) {
                    self.pause(now);
                    return false;
                }
            }
        }

        let Some(delta) = self.clock.advance(now) else {
            return false;
        };
        let frames = (delta / self.clock.frame_time()).min(MAX_CATCHUP_FRAMES) as f32;

        apply_player_input(&mut self.world, &self.session, input);
        self.tick(self.game_time(now), frames);
        true
    }

    /// Run every system once at game time `now`.
    pub fn tick(&mut self, now: f64, frames: f32) {
        for entity in self.world.flush_due_removals(now) {
            log::debug!("removed {} after delay", entity);
        }
        if !self.world.is_alive(self.session.player) {
            self.status = GameStatus::GameOver;
            log::info!(
                "game over: score {}, level {} ({} entities left)",
                self.last_hud.score,
                self.last_hud.level,
                self.world.entity_count()
            );
            return;
        }

        let config = &self.config;
        systems::movement::update(&mut self.world, frames);
        systems::combat::update(
            &mut self.world,
            &self.session,
            config,
            &mut self.events,
            now,
            frames,
            &mut self.rng,
        );
        systems::shooting::update(&mut self.world, &self.session, config, now);
        systems::powerup::update(&mut self.world, &self.session, config, &mut self.events, now);
        self.spawner.update(
            &mut self.world,
            &mut self.session,
            config,
            &mut self.events,
            now,
            &mut self.rng,
        );
        systems::explosion::update(&mut self.world, now);

        self.drain_events();
        self.refresh_hud();
    }

    fn drain_events(&mut self) {
        for e in self.events.enemy_destroyed.drain() {
            log::debug!("enemy {} destroyed ({:?}, drop: {})", e.enemy, e.cause, e.dropped_powerup);
        }
        for e in self.events.player_hit.drain() {
            log::debug!("player hit by {}, {} lives left", e.source, e.remaining);
        }
        for e in self.events.powerup_collected.drain() {
            log::debug!("powerup {}", e.kind.label());
        }
        for e in self.events.enemy_spawned.drain() {
            log::debug!("enemy {} entered at spawn point {}", e.enemy, e.spawn_point);
        }
        for e in self.events.level_advanced.drain() {
            log::info!("level {} reached, {} entities", e.level + 1, self.world.entity_count());
        }
        self.events.clear_all();
    }

    fn refresh_hud(&mut self) {
        let player = self.session.player;
        if let (Some(score), Some(health)) = (
            self.world.get::<Score>(player),
            self.world.get::<Health>(player),
        ) {
            self.last_hud = HudSnapshot {
                score: score.value,
                level: self.session.level + 1,
                lives: health.current,
            };
        }
    }

    /// Score, level and lives for display. Holds the final values once the
    /// player is gone.
    pub fn hud(&self) -> HudSnapshot {
        self.last_hud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{Invincible, Position, Tank, Wall};

    fn runtime() -> GameRuntime {
        GameRuntime::new(GameConfig::default(), 1234)
    }

    #[test]
    fn test_frame_clock_carries_remainder() {
        let mut clock = FrameClock::new(10.0);
        clock.reset(0.0);
        assert_eq!(clock.advance(5.0), None);
        assert_eq!(clock.advance(13.0), Some(10.0));
        // 3ms left over, next tick is due at 20
        assert_eq!(clock.advance(19.0), None);
        assert_eq!(clock.advance(20.0), Some(10.0));
        assert_eq!(clock.advance(45.0), Some(20.0));
    }

    #[test]
    fn test_simulated_time_tracks_host_time() {
        let frame_time = 1000.0 / 60.0;
        for hz in [60.0, 75.0, 100.0, 144.0, 165.0, 240.0] {
            let mut clock = FrameClock::new(frame_time);
            clock.reset(0.0);
            let step = 1000.0 / hz;
            let mut simulated = 0.0;
            let mut now = 0.0;
            while now < 10_000.0 {
                now += step;
                if let Some(consumed) = clock.advance(now) {
                    simulated += consumed;
                }
                assert!(simulated <= now + 1e-6, "{}Hz ran ahead of the host", hz);
            }
            let frames = simulated / frame_time;
            assert!((frames - 600.0).abs() < 2.0, "{}Hz simulated {} frames", hz, frames);
        }
    }

    #[test]
    fn test_title_waits_for_start() {
        let mut rt = runtime();
        let mut input = InputState::new();
        assert!(!rt.frame(100.0, &input));
        assert_eq!(rt.status, GameStatus::Title);

        input.keys.key_down("enter");
        rt.frame(200.0, &input);
        assert_eq!(rt.status, GameStatus::Playing);
        assert_eq!(rt.hud(), HudSnapshot { score: 0, level: 1, lives: 3 });
    }

    #[test]
    fn test_ticks_at_frame_rate() {
        let mut rt = runtime();
        rt.start(0.0);
        let input = InputState::new();
        assert!(!rt.frame(10.0, &input));
        assert!(rt.frame(17.0, &input));
        assert!(!rt.frame(20.0, &input));
    }

    #[test]
    fn test_level_advance_end_to_end() {
        let mut rt = runtime();
        rt.start(0.0);
        let walls_before = rt.world.entities_with::<Wall>();

        rt.tick(6001.0, 1.0);

        assert_eq!(rt.session.level, 1);
        assert_eq!(rt.hud(), HudSnapshot { score: 500, level: 2, lives: 3 });
        assert!(walls_before.iter().all(|w| !rt.world.is_alive(*w)));
        assert!(rt.world.count::<Wall>() >= 48);
    }

    #[test]
    fn test_game_over_after_death_delay() {
        let mut rt = runtime();
        rt.start(0.0);
        let player = rt.session.player;
        rt.world.schedule_removal(player, 500.0);

        rt.tick(400.0, 1.0);
        assert_eq!(rt.status, GameStatus::Playing);
        rt.tick(500.0, 1.0);
        assert!(!rt.world.is_alive(player));
        assert_eq!(rt.status, GameStatus::GameOver);
        // HUD keeps the last values
        assert_eq!(rt.hud().level, 1);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut rt = runtime();
        rt.start(0.0);
        let old_player = rt.session.player;
        rt.world.remove_entity(old_player);
        rt.tick(100.0, 1.0);
        assert_eq!(rt.status, GameStatus::GameOver);

        let mut input = InputState::new();
        input.keys.key_down("enter");
        rt.frame(200.0, &input);
        assert_eq!(rt.status, GameStatus::Playing);
        assert!(rt.world.is_alive(rt.session.player));
        assert_eq!(rt.world.count::<Tank>(), 1);
        assert_eq!(rt.hud(), HudSnapshot { score: 0, level: 1, lives: 3 });
    }

    #[test]
    fn test_pause_freezes_game_clock() {
        let mut rt = runtime();
        rt.start(0.0);
        let player = rt.session.player;
        rt.world.add_component(player, Invincible { duration: 1000.0, spawned_at: 0.0 });

        let mut input = InputState::new();
        input.keys.key_down("p");
        rt.frame(500.0, &input);
        assert_eq!(rt.status, GameStatus::Paused);
        input.end_frame();
        input.keys.key_up("p");
        input.end_frame();

        // Ten seconds paused
        input.keys.key_down("p");
        rt.frame(10_500.0, &input);
        assert_eq!(rt.status, GameStatus::Playing);
        input.end_frame();

        assert!(rt.frame(10_600.0, &input));
        // Game time is 600ms, invincibility still up
        assert!(rt.world.has::<Invincible>(player));
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut rt = runtime();
        rt.start(0.0);
        let player = rt.session.player;
        let start = *rt.world.get::<Position>(player).unwrap();

        let mut input = InputState::new();
        input.keys.key_down("w");
        rt.frame(17.0, &input);

        let now = rt.world.get::<Position>(player).unwrap();
        assert!(now.y < start.y);
    }
}
