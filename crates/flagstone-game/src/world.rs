use flagstone_core::input::InputFrame;

use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::goal::Goal;
use crate::hero::{DamageOutcome, Hero};
use crate::level::LevelSpec;
use crate::platform::Platform;

/// What happened during one world tick, for the session to act on.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickEvents {
    /// Hero overlapped the active goal this tick.
    pub reached_goal: bool,
    /// Hero health hit zero this tick (combat or fall).
    pub hero_died: bool,
    /// Enemies stomped this tick.
    pub enemies_defeated: u32,
    /// Hero took a non-fatal hit this tick.
    pub hero_hurt: bool,
    /// Hero left the ground via a jump this tick.
    pub jumped: bool,
}

/// The live entity set for the level being played.
#[derive(Debug, Clone)]
pub struct World {
    pub background: String,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub goal: Goal,
    pub hero: Hero,
}

impl World {
    /// Instantiate a fresh world from a validated level spec. The hero
    /// spawns at the exact start position with full health.
    pub fn from_level(spec: &LevelSpec, cfg: &GameConfig) -> Self {
        Self {
            background: spec.background.clone(),
            platforms: spec.platforms.iter().map(Platform::from_spec).collect(),
            enemies: spec.enemies.iter().map(Enemy::from_spec).collect(),
            goal: Goal::new(spec.goal.0, spec.goal.1),
            hero: Hero::new(spec.start.0, spec.start.1, cfg),
        }
    }

    /// One simulation tick. The order is load-bearing: hero movement and
    /// collision, fall-death check, hero-enemy contacts, goal animation,
    /// then the moving-platform/enemy sweep.
    pub fn tick(&mut self, input: &InputFrame, cfg: &GameConfig) -> TickEvents {
        let mut events = TickEvents::default();

        if input.jump_pressed {
            events.jumped = self.hero.jump(cfg);
        }
        events.reached_goal = self.hero.update(input, &self.platforms, &self.goal, cfg);

        // Falling out of the playfield is instantly fatal.
        if self.hero.rect.top() > cfg.playfield_height + cfg.fall_kill_margin {
            self.hero.health = 0;
        }

        // Every overlapping alive enemy resolves independently; defeat and
        // damage are both idempotent within the tick. Damage makes the hero
        // invincible, which skips the remaining contacts.
        for enemy in &mut self.enemies {
            if !enemy.alive || self.hero.invincible || !self.hero.rect.intersects(&enemy.rect) {
                continue;
            }
            let stomp = self.hero.vy > 0.0
                && self.hero.rect.bottom() < enemy.rect.center_y() + cfg.stomp_tolerance;
            if stomp {
                enemy.defeat();
                events.enemies_defeated += 1;
                self.hero.vy = -cfg.jump_power * cfg.stomp_bounce;
                self.hero.on_ground = false;
            } else {
                match self.hero.take_damage(cfg) {
                    DamageOutcome::Hurt => events.hero_hurt = true,
                    DamageOutcome::Dead | DamageOutcome::Ignored => {},
                }
            }
        }

        self.goal.tick();

        for platform in &mut self.platforms {
            platform.tick();
        }
        for enemy in &mut self.enemies {
            enemy.tick();
        }

        events.hero_died = self.hero.health <= 0;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagstone_core::geometry::Rect;
    use flagstone_core::test_helpers::hold_dir;
    use flagstone_core::view::EnemyKind;

    use crate::level::{EnemySpec, PlatformKind, PlatformSpec, builtin_levels};

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    /// A minimal level: one full-width floor, one enemy, a far-away goal.
    fn test_level(cfg: &GameConfig, enemies: Vec<EnemySpec>) -> LevelSpec {
        LevelSpec {
            background: "bg_test".to_string(),
            platforms: vec![PlatformSpec {
                x: 0.0,
                y: cfg.playfield_height - 32.0,
                w: cfg.playfield_width,
                h: 32.0,
                texture: "ground_dirt".to_string(),
                kind: PlatformKind::Static,
            }],
            enemies,
            start: (32.0, cfg.playfield_height - 64.0),
            goal: (cfg.playfield_width - 64.0, cfg.playfield_height - 96.0),
        }
    }

    fn ground_enemy(cfg: &GameConfig, x: f32) -> EnemySpec {
        EnemySpec {
            x,
            y: cfg.playfield_height - 64.0,
            patrol_min: x - 64.0,
            patrol_max: x + 64.0,
            enemy_kind: EnemyKind::Zombie,
        }
    }

    fn settle(world: &mut World, cfg: &GameConfig) {
        let idle = InputFrame::default();
        for _ in 0..30 {
            world.tick(&idle, cfg);
            if world.hero.on_ground {
                return;
            }
        }
        panic!("hero never settled on the floor");
    }

    #[test]
    fn builds_fresh_world_from_level() {
        let cfg = cfg();
        let level = &builtin_levels(&cfg)[0];
        let world = World::from_level(level, &cfg);
        assert_eq!(world.platforms.len(), level.platforms.len());
        assert_eq!(world.enemies.len(), level.enemies.len());
        assert_eq!(world.hero.health, 3);
        assert!(!world.hero.invincible);
        assert_eq!(world.hero.rect.x, level.start.0);
        assert_eq!(world.hero.rect.y, level.start.1);
    }

    #[test]
    fn stomp_defeats_enemy_and_bounces() {
        let cfg = cfg();
        let level = test_level(&cfg, vec![ground_enemy(&cfg, 200.0)]);
        let mut world = World::from_level(&level, &cfg);
        // Drop the hero right above the enemy, falling.
        world.hero.rect = Rect::new(200.0, world.enemies[0].rect.top() - 30.0, 32.0, 32.0);
        world.hero.vy = 5.0;

        let events = world.tick(&InputFrame::default(), &cfg);
        assert_eq!(events.enemies_defeated, 1);
        assert!(!world.enemies[0].alive);
        assert_eq!(world.hero.vy, -cfg.jump_power * cfg.stomp_bounce);
        assert!(!world.hero.on_ground);
        assert_eq!(world.hero.health, 3, "stomping costs no health");
    }

    #[test]
    fn stomp_cutoff_is_exclusive_at_the_tolerance() {
        // Half-unit gravity keeps every coordinate exact in f32, so the
        // hero's bottom can be placed exactly on the cutoff line.
        let cfg = GameConfig {
            gravity: 0.5,
            ..GameConfig::default()
        };
        let level = test_level(&cfg, vec![ground_enemy(&cfg, 200.0)]);
        // Enemy center_y is 552; the cutoff sits at 552 + 5 = 557.
        assert_eq!(World::from_level(&level, &cfg).enemies[0].rect.center_y(), 552.0);

        // Bottom lands exactly on the cutoff: a hit, not a stomp.
        let mut world = World::from_level(&level, &cfg);
        world.hero.rect = Rect::new(200.0, 520.0, 32.0, 32.0);
        world.hero.vy = 4.5;
        let events = world.tick(&InputFrame::default(), &cfg);
        assert_eq!(world.hero.rect.bottom(), 557.0);
        assert_eq!(events.enemies_defeated, 0);
        assert!(events.hero_hurt);
        assert!(world.enemies[0].alive);

        // Half a unit higher and the same fall is a stomp.
        let mut world = World::from_level(&level, &cfg);
        world.hero.rect = Rect::new(200.0, 519.5, 32.0, 32.0);
        world.hero.vy = 4.5;
        let events = world.tick(&InputFrame::default(), &cfg);
        assert_eq!(events.enemies_defeated, 1);
        assert!(!events.hero_hurt);
    }

    #[test]
    fn lateral_contact_damages_hero() {
        let cfg = cfg();
        let level = test_level(&cfg, vec![ground_enemy(&cfg, 200.0)]);
        let mut world = World::from_level(&level, &cfg);
        settle(&mut world, &cfg);
        // Walk the hero into the enemy at equal height.
        world.hero.rect.x = world.enemies[0].rect.x - 10.0;
        world.hero.rect.y = world.enemies[0].rect.y;

        let events = world.tick(&hold_dir(1.0), &cfg);
        assert!(events.hero_hurt);
        assert_eq!(world.hero.health, 2);
        assert!(world.hero.invincible);
        assert!(world.enemies.iter().all(|e| e.alive));
    }

    #[test]
    fn fatal_lateral_hit_reports_death_same_tick() {
        let cfg = cfg();
        let level = test_level(&cfg, vec![ground_enemy(&cfg, 200.0)]);
        let mut world = World::from_level(&level, &cfg);
        settle(&mut world, &cfg);
        world.hero.health = 1;
        world.hero.rect.x = world.enemies[0].rect.x;
        world.hero.rect.y = world.enemies[0].rect.y;

        let events = world.tick(&InputFrame::default(), &cfg);
        assert!(events.hero_died, "death must surface on the same tick");
        assert_eq!(world.hero.health, 0);
    }

    #[test]
    fn invincible_hero_ignores_contact() {
        let cfg = cfg();
        let level = test_level(&cfg, vec![ground_enemy(&cfg, 200.0)]);
        let mut world = World::from_level(&level, &cfg);
        settle(&mut world, &cfg);
        world.hero.invincible = true;
        world.hero.invincible_ticks = 100;
        world.hero.rect.x = world.enemies[0].rect.x;
        world.hero.rect.y = world.enemies[0].rect.y;

        let events = world.tick(&InputFrame::default(), &cfg);
        assert!(!events.hero_hurt);
        assert_eq!(world.hero.health, 3);
        assert!(world.enemies[0].alive);
    }

    #[test]
    fn falling_out_of_the_playfield_is_fatal() {
        let cfg = cfg();
        let level = test_level(&cfg, vec![]);
        let mut world = World::from_level(&level, &cfg);
        world.hero.rect.y = cfg.playfield_height + cfg.fall_kill_margin + 1.0;

        let events = world.tick(&InputFrame::default(), &cfg);
        assert!(events.hero_died);
        assert_eq!(world.hero.health, 0);
    }

    #[test]
    fn reaching_the_goal_is_reported_not_applied() {
        let cfg = cfg();
        let level = test_level(&cfg, vec![]);
        let mut world = World::from_level(&level, &cfg);
        world.hero.rect.x = level.goal.0;
        world.hero.rect.y = level.goal.1 + 16.0;

        let events = world.tick(&InputFrame::default(), &cfg);
        assert!(events.reached_goal);
        assert!(world.goal.active, "goal stays active; the session decides");
        assert_eq!(world.hero.health, 3);
    }

    #[test]
    fn two_overlapping_enemies_one_stomp_then_skip() {
        // Two enemies stacked at the same spot: the falling hero stomps the
        // first; the second is then evaluated independently. With the hero
        // bouncing upward (vy < 0) the second contact is a damage hit,
        // which opens invincibility.
        let cfg = cfg();
        let level = test_level(
            &cfg,
            vec![ground_enemy(&cfg, 200.0), ground_enemy(&cfg, 202.0)],
        );
        let mut world = World::from_level(&level, &cfg);
        world.hero.rect = Rect::new(200.0, world.enemies[0].rect.top() - 30.0, 32.0, 32.0);
        world.hero.vy = 5.0;

        let events = world.tick(&InputFrame::default(), &cfg);
        assert_eq!(events.enemies_defeated, 1);
        assert!(events.hero_hurt, "second enemy lands a hit in the same tick");
        assert_eq!(world.hero.health, 2);
        assert!(!world.enemies[0].alive);
        assert!(world.enemies[1].alive);
    }

    #[test]
    fn damage_from_first_enemy_shields_against_second() {
        let cfg = cfg();
        let level = test_level(
            &cfg,
            vec![ground_enemy(&cfg, 200.0), ground_enemy(&cfg, 202.0)],
        );
        let mut world = World::from_level(&level, &cfg);
        settle(&mut world, &cfg);
        world.hero.rect.x = 200.0;
        world.hero.rect.y = world.enemies[0].rect.y;

        world.tick(&InputFrame::default(), &cfg);
        assert_eq!(
            world.hero.health,
            2,
            "only the first contact costs health; invincibility skips the rest"
        );
    }

    #[test]
    fn jump_event_fires_once() {
        let cfg = cfg();
        let level = test_level(&cfg, vec![]);
        let mut world = World::from_level(&level, &cfg);
        settle(&mut world, &cfg);

        let jump = flagstone_core::test_helpers::press_jump();
        let events = world.tick(&jump, &cfg);
        assert!(events.jumped);
        let events = world.tick(&jump, &cfg);
        assert!(!events.jumped, "airborne jump press does nothing");
    }

    #[test]
    fn sweep_advances_movers_and_enemies() {
        let cfg = cfg();
        let mut level = test_level(&cfg, vec![ground_enemy(&cfg, 400.0)]);
        level.platforms.push(PlatformSpec {
            x: 300.0,
            y: 200.0,
            w: 96.0,
            h: 32.0,
            texture: "metal".to_string(),
            kind: PlatformKind::MovingH {
                distance: 100.0,
                speed: 2.0,
            },
        });
        let mut world = World::from_level(&level, &cfg);
        let mover_x = world.platforms[1].rect.x;
        let enemy_x = world.enemies[0].rect.x;

        world.tick(&InputFrame::default(), &cfg);
        assert_ne!(world.platforms[1].rect.x, mover_x);
        assert_ne!(world.enemies[0].rect.x, enemy_x);
    }
}
