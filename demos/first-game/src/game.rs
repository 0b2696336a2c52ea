use doodle_engine::*;

const STEP: f32 = 5.0;
const FOLLOW_SPEED: f32 = 3.0;
const FREEZE_SECONDS: f64 = 3.0;

const HELP: [&str; 5] = [
    "Use arrow keys to move or click to follow mouse",
    "Press f to freeze the game",
    "Press t to transform the square",
    "Press r to rotate the square",
    "Press e to set direction",
];

/// A red square driven by the arrow keys, or chasing the pointer while the
/// button is held.
pub struct FirstGame {
    player: Option<SpriteId>,
}

impl FirstGame {
    pub fn new() -> Self {
        Self { player: None }
    }
}

impl Game for FirstGame {
    fn config(&self) -> GameConfig {
        GameConfig::default()
            .with_title("My First Game")
            .with_size(800, 600)
    }

    fn start(&mut self, ctx: &mut EngineContext) -> HookResult {
        let player = ctx.create_sprite(400.0, 300.0, 50.0, 50.0, "#FF0000");
        if let Some(mut sprite) = ctx.sprite_mut(player) {
            sprite.set_layer(1);
            sprite.set_on_hover(|s| log::debug!("pointer over sprite {:?}", s.id));
        }
        self.player = Some(player);
        log::info!("game started");
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext) -> HookResult {
        let Some(player) = self.player else {
            return Ok(());
        };

        let mut delta = glam::Vec2::ZERO;
        for (key, dir) in [
            ("arrowleft", glam::Vec2::NEG_X),
            ("arrowright", glam::Vec2::X),
            ("arrowup", glam::Vec2::NEG_Y),
            ("arrowdown", glam::Vec2::Y),
        ] {
            if ctx.is_key_pressed(key) {
                delta += dir * STEP;
            }
        }
        let pointer = ctx.pointer();
        let pressed = ctx.pointer_pressed();
        let freeze = ctx.is_key_pressed("f");
        let grow = ctx.is_key_pressed("t");
        let spin = ctx.is_key_pressed("r");
        let steer = ctx.is_key_pressed("e");

        if let Some(mut sprite) = ctx.sprite_mut(player) {
            if delta != glam::Vec2::ZERO {
                sprite.move_by(delta.x, delta.y);
            }
            if pressed {
                sprite.point_towards(pointer.x, pointer.y, false);
                sprite.speed = FOLLOW_SPEED;
            } else {
                sprite.speed = 0.0;
            }
            if grow {
                sprite.transform(2.0, Easing::EaseInOut, [
                    (Property::Width, 100.0_f32.into()),
                    (Property::Height, 100.0_f32.into()),
                    (Property::Color, "#00FF00".into()),
                ]);
            }
            if spin {
                sprite.transform(3.0, Easing::Linear, [(Property::Rotation, 360.0_f32.into())]);
            }
            if steer {
                sprite.transform(3.0, Easing::Linear, [(Property::Direction, 180.0_f32.into())]);
            }
        }

        if freeze {
            ctx.freeze(Some(FREEZE_SECONDS));
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut EngineContext, draw: &mut DrawContext<'_>) -> HookResult {
        let left = TextStyle::default().with_anchor(Anchor::Left);
        let pointer = ctx.pointer();
        draw.draw_text(&format!("Mouse: ({}, {})", pointer.x, pointer.y), 20.0, 20.0, &left);
        for (i, line) in HELP.iter().enumerate() {
            draw.draw_text(line, 20.0, 40.0 + 20.0 * i as f32, &left);
        }
        draw.draw_text(
            &format!("FPS: {}", ctx.current_fps()),
            700.0,
            20.0,
            &TextStyle::default().with_anchor(Anchor::TopLeft),
        );

        let frozen = ctx.is_frozen();
        if frozen {
            let bounds = ctx.scene.bounds();
            let banner = TextStyle::default().with_color("black").with_size(30.0);
            draw.draw_text("FROZEN", bounds.x / 2.0, bounds.y / 2.0, &banner);
        }
        if let Some(player) = self.player {
            if let Some(mut sprite) = ctx.sprite_mut(player) {
                sprite.set_layer(if frozen { 0 } else { 1 });
            }
        }
        Ok(())
    }
}
