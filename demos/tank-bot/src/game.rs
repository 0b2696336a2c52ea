use doodle_engine::*;
use glam::Vec2;

const WORLD: u32 = 500;
const PLAYER_SAFE_DISTANCE: f32 = 150.0;
const MAX_BULLETS: usize = 50;
const BULLET_SPEED: f32 = 5.0;
const ENEMY_SPEED: f32 = 2.5;
const PLAYER_SPEED: f32 = 5.0;
const TURN_SPEED: f32 = 100.0;
/// Respawn attempts before the enemy settles for the last candidate.
const MAX_RESPAWN_TRIES: u32 = 100;

struct Bullet {
    id: SpriteId,
    active: bool,
}

/// A tank with a turret that fires a stream of bullets at an enemy chasing
/// the turret. Every hit scores a point and sends the enemy elsewhere.
pub struct TankBot {
    player: SpriteId,
    enemy: SpriteId,
    gun: SpriteId,
    bullets: Vec<Bullet>,
    score: u32,
    game_over: bool,
}

impl TankBot {
    pub fn new() -> Self {
        Self {
            player: SpriteId(0),
            enemy: SpriteId(0),
            gun: SpriteId(0),
            bullets: Vec::with_capacity(MAX_BULLETS),
            score: 0,
            game_over: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn fire(&mut self, ctx: &mut EngineContext) {
        let Some(gun) = ctx.scene.get(self.gun) else {
            return;
        };
        let (pos, direction) = (gun.pos, gun.direction);
        let Some(bullet) = self.bullets.iter_mut().find(|b| !b.active) else {
            return;
        };
        if let Some(mut sprite) = ctx.sprite_mut(bullet.id) {
            sprite.pos = pos;
            sprite.direction = direction;
            sprite.speed = BULLET_SPEED;
            sprite.set_layer(2);
            sprite.show();
            bullet.active = true;
        }
    }

    fn retire(ctx: &mut EngineContext, bullet: &mut Bullet) {
        bullet.active = false;
        if let Some(mut sprite) = ctx.sprite_mut(bullet.id) {
            sprite.speed = 0.0;
            sprite.hide();
        }
    }

    /// Move the enemy to a random spot away from the player.
    fn respawn_enemy(&self, ctx: &mut EngineContext) {
        let player = ctx.scene.get(self.player).map(|s| s.pos).unwrap_or_default();
        let bounds = ctx.scene.bounds();
        let mut spot = Vec2::ZERO;
        for _ in 0..MAX_RESPAWN_TRIES {
            spot = Vec2::new(
                ctx.random_number(0, bounds.x as i32) as f32,
                ctx.random_number(0, bounds.y as i32) as f32,
            );
            if ctx.distance(spot.x, spot.y, player.x, player.y) > PLAYER_SAFE_DISTANCE {
                break;
            }
        }
        if let Some(mut enemy) = ctx.sprite_mut(self.enemy) {
            enemy.pos = spot;
        }
    }
}

impl Game for TankBot {
    fn config(&self) -> GameConfig {
        GameConfig::default()
            .with_title("Tank Bot")
            .with_size(WORLD, WORLD)
            .with_fps(60)
    }

    fn start(&mut self, ctx: &mut EngineContext) -> HookResult {
        let half = WORLD as f32 / 2.0;
        self.enemy = ctx.create_sprite(400.0, 300.0, 50.0, 50.0, "red");
        self.player = ctx.create_sprite(half, half, 50.0, 50.0, "blue");
        self.gun = ctx.scene.create_sprite_with(|s| {
            s.with_pos(Vec2::new(100.0, 100.0))
                .with_size(Vec2::new(50.0, 10.0))
                .with_color("green")
                .with_anchor(Anchor::Left)
                .with_layer(3)
        });

        for _ in 0..MAX_BULLETS {
            let id = ctx.create_sprite(-100.0, -100.0, 2.0, 2.0, "red");
            if let Some(mut sprite) = ctx.sprite_mut(id) {
                sprite.hide();
            }
            self.bullets.push(Bullet { id, active: false });
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext) -> HookResult {
        let gun_pos = ctx.scene.get(self.gun).map(|s| s.pos).unwrap_or_default();
        if let Some(mut enemy) = ctx.sprite_mut(self.enemy) {
            enemy.point_towards(gun_pos.x, gun_pos.y, true);
            enemy.move_forward(ENEMY_SPEED);
        }

        let player_pos = ctx.scene.get(self.player).map(|s| s.pos).unwrap_or_default();
        let enemy_center = ctx
            .scene
            .get(self.enemy)
            .map(|s| s.pos + s.size() / 2.0)
            .unwrap_or_default();
        if let Some(mut gun) = ctx.sprite_mut(self.gun) {
            gun.move_to(player_pos.x + 25.0, player_pos.y + 20.0);
            gun.turn_towards(enemy_center.x, enemy_center.y, TURN_SPEED, true);
        }
        if let Some(mut player) = ctx.sprite_mut(self.player) {
            player.turn_towards(enemy_center.x, enemy_center.y, TURN_SPEED, true);
            player.move_forward(PLAYER_SPEED);
        }

        if ctx.check_collision(self.player, self.enemy) {
            let (p, e) = match (ctx.scene.get(self.player), ctx.scene.get(self.enemy)) {
                (Some(p), Some(e)) => (p.pos, e.pos),
                _ => return Ok(()),
            };
            let reach = ctx.scene.get(self.player).map_or(0.0, |s| s.width() * 0.8);
            if ctx.distance(p.x, p.y, e.x, e.y) < reach {
                self.game_over = true;
                ctx.freeze(None);
                log::info!("game over, score {}", self.score);
                return Ok(());
            }
        }

        self.fire(ctx);

        let mut hit = false;
        for bullet in self.bullets.iter_mut().filter(|b| b.active) {
            if ctx.check_collision(bullet.id, self.enemy) {
                self.score += 1;
                hit = true;
                Self::retire(ctx, bullet);
            } else if ctx.scene.is_touching_edge(bullet.id) {
                Self::retire(ctx, bullet);
            }
        }
        if hit {
            self.respawn_enemy(ctx);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut EngineContext, draw: &mut DrawContext<'_>) -> HookResult {
        let score = TextStyle::default().with_size(20.0).with_anchor(Anchor::Left);
        draw.draw_text(&self.score.to_string(), 20.0, 20.0, &score);
        draw.draw_text(
            &format!("FPS: {}", ctx.current_fps()),
            400.0,
            20.0,
            &TextStyle::default().with_anchor(Anchor::TopLeft),
        );
        if self.game_over {
            let bounds = ctx.scene.bounds();
            let banner = TextStyle::default().with_color("red").with_size(40.0);
            draw.draw_text("GAME OVER!", bounds.x / 2.0, bounds.y / 2.0, &banner);
        }
        Ok(())
    }
}
