//! Powerups
//!
//! Expires pickups left on the ground too long, applies the ones the player
//! drives over, and owns the lifetime of `Invincible`.

use crate::config::GameConfig;
use crate::game::collision::overlaps;
use crate::game::components::{Health, Invincible, Position, Powerup, PowerupKind, Tank};
use crate::game::event::{Events, PowerupCollectedEvent};
use crate::game::session::Session;
use crate::game::world::World;

pub fn update(
    world: &mut World,
    session: &Session,
    config: &GameConfig,
    events: &mut Events,
    now: f64,
) {
    expire_invincibility(world, session, now);

    let player_pos = world.get::<Position>(session.player).copied();

    for pickup in world.entities_with::<Powerup>() {
        let Some(powerup) = world.get::<Powerup>(pickup).copied() else {
            continue;
        };
        if now - powerup.spawned_at > powerup.duration {
            world.remove_entity(pickup);
            continue;
        }

        let (Some(player_pos), Some(pos)) = (player_pos, world.get::<Position>(pickup)) else {
            continue;
        };
        if overlaps(pos, &player_pos) {
            apply(world, session, config, powerup.kind, now);
            world.remove_entity(pickup);
            events.powerup_collected.send(PowerupCollectedEvent { kind: powerup.kind });
            log::debug!("collected {} powerup", powerup.kind.label());
        }
    }
}

fn apply(world: &mut World, session: &Session, config: &GameConfig, kind: PowerupKind, now: f64) {
    let player = session.player;
    match kind {
        PowerupKind::Helmet => {
            world.add_component(
                player,
                Invincible {
                    duration: config.powerup.invincibility_ms,
                    spawned_at: now,
                },
            );
        }
        PowerupKind::Star => {
            if let Some(tank) = world.get_mut::<Tank>(player) {
                tank.shoot_cooldown = (tank.shoot_cooldown * 0.5).max(config.powerup.min_shoot_cooldown_ms);
            }
        }
        PowerupKind::Tank => {
            if let Some(health) = world.get_mut::<Health>(player) {
                health.heal(1);
            }
        }
    }
}

fn expire_invincibility(world: &mut World, session: &Session, now: f64) {
    let expired = world
        .get::<Invincible>(session.player)
        .is_some_and(|inv| inv.expired(now));
    if expired {
        world.remove_component::<Invincible>(session.player);
        log::debug!("invincibility expired");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::Entity;
    use crate::game::prefabs::spawn_player;

    fn setup() -> (World, Session, GameConfig, Events) {
        let config = GameConfig::default();
        let mut world = World::new(config.arena.width(), config.arena.height());
        let player = spawn_player(&mut world, &config);
        (world, Session::new(player), config, Events::new())
    }

    fn drop_on_player(world: &mut World, session: &Session, kind: PowerupKind, at: f64) -> Entity {
        let pos = *world.get::<Position>(session.player).unwrap();
        world.spawn((pos, Powerup { kind, duration: 10_000.0, spawned_at: at }))
    }

    #[test]
    fn test_uncollected_powerup_expires() {
        let (mut world, session, config, mut events) = setup();
        let pickup = world.spawn((
            Position::new(64.0, 64.0, 32.0, 32.0),
            Powerup { kind: PowerupKind::Star, duration: 10_000.0, spawned_at: 0.0 },
        ));

        update(&mut world, &session, &config, &mut events, 10_000.0);
        assert!(world.is_alive(pickup));
        update(&mut world, &session, &config, &mut events, 10_001.0);
        assert!(!world.is_alive(pickup));
        assert!(events.powerup_collected.is_empty());
    }

    #[test]
    fn test_helmet_grants_invincibility_until_expiry() {
        let (mut world, session, config, mut events) = setup();
        let pickup = drop_on_player(&mut world, &session, PowerupKind::Helmet, 0.0);

        update(&mut world, &session, &config, &mut events, 100.0);
        assert!(!world.is_alive(pickup));
        assert!(world.has::<Invincible>(session.player));

        update(&mut world, &session, &config, &mut events, 10_100.0);
        assert!(world.has::<Invincible>(session.player));
        update(&mut world, &session, &config, &mut events, 10_101.0);
        assert!(!world.has::<Invincible>(session.player));
    }

    #[test]
    fn test_star_halves_cooldown_with_floor() {
        let (mut world, session, config, mut events) = setup();
        for _ in 0..5 {
            drop_on_player(&mut world, &session, PowerupKind::Star, 0.0);
            update(&mut world, &session, &config, &mut events, 100.0);
        }
        // 300 -> 150 -> 75 -> 50 -> 50 -> 50
        let tank = world.get::<Tank>(session.player).unwrap();
        assert_eq!(tank.shoot_cooldown, 50.0);
        assert_eq!(events.powerup_collected.len(), 5);
    }

    #[test]
    fn test_extra_life_clamped_at_max() {
        let (mut world, session, config, mut events) = setup();
        drop_on_player(&mut world, &session, PowerupKind::Tank, 0.0);
        update(&mut world, &session, &config, &mut events, 100.0);
        assert_eq!(world.get::<Health>(session.player).unwrap().current, 3);

        world.get_mut::<Health>(session.player).unwrap().current = 1;
        drop_on_player(&mut world, &session, PowerupKind::Tank, 0.0);
        update(&mut world, &session, &config, &mut events, 200.0);
        assert_eq!(world.get::<Health>(session.player).unwrap().current, 2);
    }

    #[test]
    fn test_enemies_cannot_collect() {
        let (mut world, session, config, mut events) = setup();
        let pos = Position::new(64.0, 64.0, 32.0, 32.0);
        world.spawn((pos, Tank::new(0xF44336, 1500.0)));
        let pickup = world.spawn((pos, Powerup { kind: PowerupKind::Tank, duration: 10_000.0, spawned_at: 0.0 }));

        update(&mut world, &session, &config, &mut events, 100.0);
        assert!(world.is_alive(pickup));
    }
}
