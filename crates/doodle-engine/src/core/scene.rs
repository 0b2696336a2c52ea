use std::ops::{Deref, DerefMut};
use glam::Vec2;
use crate::api::types::SpriteId;
use crate::components::color::Color;
use crate::components::pen::{PenLine, PenTrail};
use crate::components::sprite::Sprite;
use crate::extensions::easing::Easing;
use crate::extensions::transform::{Property, PropertyValue};

/// Sprite storage plus the pen trail they draw into.
/// Flat Vec in insertion order; sized for hundreds of sprites, not millions.
pub struct Scene {
    sprites: Vec<Sprite>,
    pen: PenTrail,
    bounds: Vec2,
    /// Timestamp of the current update, in seconds.
    time: f64,
    next_id: u32,
}

impl Scene {
    pub fn new(bounds: Vec2) -> Self {
        Self {
            sprites: Vec::with_capacity(64),
            pen: PenTrail::new(),
            bounds,
            time: 0.0,
            next_id: 1,
        }
    }

    /// Canvas size used for edge checks.
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_time(&mut self, now: f64) {
        self.time = now;
    }

    fn next_id(&mut self) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a plain rectangle sprite with a center anchor.
    pub fn create_sprite(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: impl Into<Color>,
    ) -> SpriteId {
        let color = color.into();
        self.create_sprite_with(|s| {
            s.with_pos(Vec2::new(x, y))
                .with_size(Vec2::new(width, height))
                .with_color(color)
        })
    }

    /// Add a sprite configured by `build`, which receives a default sprite
    /// already carrying its new id.
    pub fn create_sprite_with(&mut self, build: impl FnOnce(Sprite) -> Sprite) -> SpriteId {
        let id = self.next_id();
        let mut sprite = build(Sprite::new(id));
        sprite.id = id;
        self.pen.extend(sprite.take_traced());
        self.sprites.push(sprite);
        id
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    /// Mutable access that records pen lines into this scene.
    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<SpriteMut<'_>> {
        let now = self.time;
        let bounds = self.bounds;
        let sprite = self.sprites.iter_mut().find(|s| s.id == id)?;
        Some(SpriteMut {
            sprite,
            pen: &mut self.pen,
            now,
            bounds,
        })
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a sprite, keeping the order of the rest.
    pub fn remove(&mut self, id: SpriteId) -> Option<Sprite> {
        let idx = self.sprites.iter().position(|s| s.id == id)?;
        Some(self.sprites.remove(idx))
    }

    /// Remove every listed sprite. Ids that are already gone are ignored.
    /// Returns how many were removed.
    pub fn cull(&mut self, ids: &[SpriteId]) -> usize {
        let before = self.sprites.len();
        self.sprites.retain(|s| {
            let keep = !ids.contains(&s.id);
            if !keep {
                log::debug!("culled sprite {:?} at {}", s.id, s.pos);
            }
            keep
        });
        before - self.sprites.len()
    }

    /// Iterate sprites in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub(crate) fn sprites_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Drop all sprites and pen lines.
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.pen.clear();
    }

    /// Whether two sprites' bounding boxes overlap. Missing ids never collide.
    pub fn check_collision(&self, a: SpriteId, b: SpriteId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.is_touching(b),
            _ => false,
        }
    }

    pub fn is_touching_edge(&self, id: SpriteId) -> bool {
        self.get(id).is_some_and(|s| s.is_touching_edge(self.bounds))
    }

    /// Sprites sorted by layer; equal layers keep insertion order.
    pub fn draw_order(&self) -> Vec<&Sprite> {
        let mut order: Vec<&Sprite> = self.sprites.iter().collect();
        order.sort_by_key(|s| s.layer);
        order
    }

    /// Run one update at `now` for every sprite, in insertion order.
    pub fn update_all(&mut self, now: f64) {
        self.time = now;
        for sprite in &mut self.sprites {
            sprite.update(now);
            self.pen.extend(sprite.take_traced());
        }
    }

    /// Fire hover callbacks of every sprite under `pointer`.
    /// Returns how many callbacks ran.
    pub fn dispatch_hover(&mut self, pointer: Vec2) -> usize {
        let mut fired = 0;
        for sprite in &mut self.sprites {
            if sprite.has_hover_callback() && sprite.contains_point(pointer) {
                sprite.fire_hover();
                self.pen.extend(sprite.take_traced());
                fired += 1;
            }
        }
        fired
    }

    /// Every pen segment drawn so far, oldest first.
    pub fn pen_lines(&self) -> &[PenLine] {
        self.pen.lines()
    }

    pub fn clear_pen_lines(&mut self) {
        self.pen.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Vec2::new(800.0, 600.0))
    }
}

/// A sprite borrowed from a scene. Movement goes through the scene's pen
/// trail and transforms start at the scene's current time; everything else
/// derefs to the sprite.
pub struct SpriteMut<'a> {
    sprite: &'a mut Sprite,
    pen: &'a mut PenTrail,
    now: f64,
    bounds: Vec2,
}

impl SpriteMut<'_> {
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.sprite.move_by(dx, dy);
        self.collect();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.sprite.move_to(x, y);
        self.collect();
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.sprite.move_forward(distance);
        self.collect();
    }

    /// Run the sprite's per-frame update out of band.
    pub fn update(&mut self) {
        self.sprite.update(self.now);
        self.collect();
    }

    fn collect(&mut self) {
        self.pen.extend(self.sprite.take_traced());
    }

    pub fn transform<I>(&mut self, duration: f32, easing: Easing, targets: I)
    where
        I: IntoIterator<Item = (Property, PropertyValue)>,
    {
        self.sprite.transform(self.now, duration, easing, targets);
    }

    pub fn transform_named<'a, I>(&mut self, duration: f32, easing: &str, targets: I)
    where
        I: IntoIterator<Item = (&'a str, PropertyValue)>,
    {
        self.sprite.transform_named(self.now, duration, easing, targets);
    }

    /// Edge check against the owning scene's bounds.
    pub fn is_touching_edge(&self) -> bool {
        self.sprite.is_touching_edge(self.bounds)
    }
}

impl Deref for SpriteMut<'_> {
    type Target = Sprite;

    fn deref(&self) -> &Sprite {
        self.sprite
    }
}

impl DerefMut for SpriteMut<'_> {
    fn deref_mut(&mut self) -> &mut Sprite {
        self.sprite
    }
}

impl Drop for SpriteMut<'_> {
    fn drop(&mut self) {
        self.collect();
    }
}
