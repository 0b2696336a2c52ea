use std::fmt;
use glam::Vec2;
use crate::api::types::SpriteId;
use crate::components::anchor::Anchor;
use crate::components::color::Color;
use crate::components::pen::{PenLine, PenState};
use crate::core::collision::Aabb;
use crate::extensions::easing::Easing;
use crate::extensions::transform::{Property, PropertyValue, Transform};
use crate::renderer::traits::ImageHandle;

/// Callback attached to a sprite (per-update or hover).
pub type SpriteCallback = Box<dyn FnMut(&mut Sprite)>;

/// How the anchor offset is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// Offset follows a named point of the box.
    Preset(Anchor),
    /// Explicit offset; rescaled proportionally when the size changes.
    Custom,
}

/// Image attached to a sprite. The handle is filled in by the runner once the
/// backend has loaded the image at the sprite's current size.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteImage {
    pub path: String,
    handle: Option<ImageHandle>,
    loaded_size: Vec2,
}

impl SpriteImage {
    fn new(path: String) -> Self {
        Self { path, handle: None, loaded_size: Vec2::ZERO }
    }

    /// Handle usable for drawing, if loaded at `size`.
    pub fn handle_for(&self, size: Vec2) -> Option<ImageHandle> {
        self.handle.filter(|_| self.loaded_size == size)
    }
}

/// A positioned, sized, rotatable box with movement helpers, an optional pen,
/// and at most one running property transform.
///
/// Angles are in degrees. `direction` is the heading used for movement;
/// `rotation` is the angle the shape is drawn at when `rotate_visual` is set.
pub struct Sprite {
    /// Handle of the scene slot holding this sprite.
    pub id: SpriteId,
    /// Top-left corner.
    pub pos: Vec2,
    size: Vec2,
    pub color: Color,
    pub visible: bool,
    /// Heading in degrees, unbounded.
    pub direction: f32,
    /// Distance travelled along `direction` per update.
    pub speed: f32,
    /// Drawn rotation in degrees around the anchor point.
    pub rotation: f32,
    /// Draw as a rotated polygon instead of an axis-aligned rectangle.
    pub rotate_visual: bool,
    /// Draw order key; higher layers draw on top.
    pub layer: i32,
    anchor: AnchorMode,
    anchor_offset: Vec2,
    pen: PenState,
    /// Segments traced since the owning scene last collected them.
    traced: Vec<PenLine>,
    image: Option<SpriteImage>,
    transform: Option<Transform>,
    on_update: Option<SpriteCallback>,
    on_hover: Option<SpriteCallback>,
}

impl Sprite {
    pub const DEFAULT_SIZE: Vec2 = Vec2::new(50.0, 50.0);

    /// Create a 50×50 blue sprite at the origin, heading down (90°),
    /// anchored at its center.
    pub fn new(id: SpriteId) -> Self {
        let size = Self::DEFAULT_SIZE;
        let anchor_offset = Anchor::Center.offset(size);
        Self {
            id,
            pos: Vec2::ZERO,
            size,
            color: Color::default(),
            visible: true,
            direction: 90.0,
            speed: 0.0,
            rotation: 0.0,
            rotate_visual: false,
            layer: 0,
            anchor: AnchorMode::Preset(Anchor::Center),
            anchor_offset,
            pen: PenState::new(anchor_offset),
            traced: Vec::new(),
            image: None,
            transform: None,
            on_update: None,
            on_hover: None,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self.pen.last = self.anchor_point();
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.set_size(size.x, size.y);
        self.pen.last = self.anchor_point();
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.set_anchor(anchor);
        self
    }

    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.set_image(path);
        self
    }

    // -- Geometry --

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn anchor(&self) -> AnchorMode {
        self.anchor
    }

    /// Anchor offset from the top-left corner.
    pub fn anchor_offset(&self) -> Vec2 {
        self.anchor_offset
    }

    /// Anchor point in world coordinates.
    pub fn anchor_point(&self) -> Vec2 {
        self.pos + self.anchor_offset
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Unit vector along `direction`.
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.direction.to_radians())
    }

    /// Resize. Preset anchors are recomputed for the new size; a custom anchor
    /// keeps its relative position. Negative sizes are clamped to zero.
    pub fn set_size(&mut self, width: f32, height: f32) {
        let old = self.size;
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
        match self.anchor {
            AnchorMode::Preset(anchor) => self.anchor_offset = anchor.offset(self.size),
            AnchorMode::Custom => {
                if old.x != 0.0 {
                    self.anchor_offset.x = self.anchor_offset.x / old.x * self.size.x;
                }
                if old.y != 0.0 {
                    self.anchor_offset.y = self.anchor_offset.y / old.y * self.size.y;
                }
            }
        }
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = AnchorMode::Preset(anchor);
        self.anchor_offset = anchor.offset(self.size);
    }

    /// Set a preset anchor by name; unknown names fall back to center.
    pub fn set_anchor_named(&mut self, name: &str) {
        self.set_anchor(Anchor::from_name_or_center(name));
    }

    /// Use an explicit offset from the top-left corner.
    pub fn set_custom_anchor(&mut self, x: f32, y: f32) {
        self.anchor = AnchorMode::Custom;
        self.anchor_offset = Vec2::new(x, y);
    }

    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
        self.rotate_visual = true;
    }

    pub fn add_rotation(&mut self, degrees: f32) {
        self.rotation += degrees;
        self.rotate_visual = true;
    }

    // -- Image --

    /// Attach an image. It is loaded at the sprite's size before the next
    /// draw; if loading fails the sprite goes back to a plain rectangle.
    pub fn set_image(&mut self, path: impl Into<String>) {
        self.image = Some(SpriteImage::new(path.into()));
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&SpriteImage> {
        self.image.as_ref()
    }

    /// Path of an attached image that has no handle for the current size.
    pub(crate) fn pending_image(&self) -> Option<&str> {
        self.image
            .as_ref()
            .filter(|img| img.handle_for(self.size).is_none())
            .map(|img| img.path.as_str())
    }

    pub(crate) fn image_loaded(&mut self, handle: ImageHandle) {
        let size = self.size;
        if let Some(img) = &mut self.image {
            img.handle = Some(handle);
            img.loaded_size = size;
        }
    }

    // -- Pen --

    /// Start tracing the anchor point.
    pub fn pen_down(&mut self, color: impl Into<Color>, width: f32) {
        self.pen.active = true;
        self.pen.color = color.into();
        self.pen.width = width;
        self.pen.last = self.anchor_point();
    }

    pub fn pen_up(&mut self) {
        self.pen.active = false;
    }

    pub fn set_pen(&mut self, active: bool, color: impl Into<Color>, width: f32) {
        if active {
            self.pen_down(color, width);
        } else {
            self.pen_up();
        }
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen.active
    }

    // -- Movement --

    /// Translate by a delta. Returns the traced pen segment, if any.
    pub fn move_by(&mut self, dx: f32, dy: f32) -> Option<PenLine> {
        self.traced_move(self.pos + Vec2::new(dx, dy))
    }

    /// Move the top-left corner to `(x, y)`. Returns the traced pen segment, if any.
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<PenLine> {
        self.traced_move(Vec2::new(x, y))
    }

    /// Move along the current heading. Returns the traced pen segment, if any.
    pub fn move_forward(&mut self, distance: f32) -> Option<PenLine> {
        self.traced_move(self.pos + self.heading() * distance)
    }

    fn traced_move(&mut self, pos: Vec2) -> Option<PenLine> {
        let from = self.anchor_point();
        self.pos = pos;
        let to = self.anchor_point();
        self.trace(from, to)
    }

    fn trace(&mut self, from: Vec2, to: Vec2) -> Option<PenLine> {
        let line = self.pen.trace(from, to, self.visible)?;
        self.traced.push(line.clone());
        Some(line)
    }

    /// Take every segment traced since the last call, oldest first.
    /// Moves made from callbacks only reach a scene through here.
    pub fn take_traced(&mut self) -> Vec<PenLine> {
        std::mem::take(&mut self.traced)
    }

    pub fn turn(&mut self, degrees: f32) {
        self.direction += degrees;
    }

    /// Bearing in degrees from the anchor point to `(x, y)`.
    pub fn bearing_to(&self, x: f32, y: f32) -> f32 {
        let d = Vec2::new(x, y) - self.anchor_point();
        d.y.atan2(d.x).to_degrees()
    }

    /// Face `(x, y)`. With `rotate_visual` the drawn shape is rotated to match.
    pub fn point_towards(&mut self, x: f32, y: f32, rotate_visual: bool) {
        self.direction = self.bearing_to(x, y);
        self.face_visual(rotate_visual);
    }

    /// Turn towards `(x, y)` by at most `turn_speed` degrees along the shorter
    /// way round. A residual angle smaller than `turn_speed` snaps exactly onto
    /// the target bearing.
    pub fn turn_towards(&mut self, x: f32, y: f32, turn_speed: f32, rotate_visual: bool) {
        let target = self.bearing_to(x, y);
        let mut diff = (target - self.direction).rem_euclid(360.0);
        if diff > 180.0 {
            diff -= 360.0;
        }

        if diff.abs() < turn_speed {
            self.direction = target;
        } else if diff > 0.0 {
            self.direction += turn_speed;
        } else {
            self.direction -= turn_speed;
        }
        self.face_visual(rotate_visual);
    }

    fn face_visual(&mut self, rotate_visual: bool) {
        self.rotate_visual = rotate_visual;
        if rotate_visual {
            self.rotation = self.direction;
        }
    }

    // -- Queries --

    /// Strict bounding-box overlap with another sprite.
    pub fn is_touching(&self, other: &Sprite) -> bool {
        self.bounds().overlaps(&other.bounds())
    }

    /// Whether any edge is at or beyond a playfield of `bounds` size.
    pub fn is_touching_edge(&self, bounds: Vec2) -> bool {
        self.bounds().touches_edge(bounds)
    }

    /// Whether `point` lies strictly inside the sprite's box (hover test).
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.bounds().contains_strict(point)
    }

    // -- Transforms --

    /// Start a transform towards `targets`, replacing any running one.
    pub fn transform<I>(&mut self, now: f64, duration: f32, easing: Easing, targets: I)
    where
        I: IntoIterator<Item = (Property, PropertyValue)>,
    {
        let transform = Transform::start(self, now, duration, easing, targets);
        self.transform = Some(transform);
    }

    /// Start a transform with easing and properties given by name.
    pub fn transform_named<'a, I>(&mut self, now: f64, duration: f32, easing: &str, targets: I)
    where
        I: IntoIterator<Item = (&'a str, PropertyValue)>,
    {
        let transform = Transform::start_named(self, now, duration, easing, targets);
        self.transform = Some(transform);
    }

    pub fn active_transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn is_transforming(&self) -> bool {
        self.transform.is_some()
    }

    pub fn cancel_transform(&mut self) {
        self.transform = None;
    }

    /// Current value of an animatable property.
    pub fn property(&self, property: Property) -> PropertyValue {
        match property {
            Property::X => PropertyValue::Number(self.pos.x),
            Property::Y => PropertyValue::Number(self.pos.y),
            Property::Width => PropertyValue::Number(self.size.x),
            Property::Height => PropertyValue::Number(self.size.y),
            Property::Direction => PropertyValue::Number(self.direction),
            Property::Speed => PropertyValue::Number(self.speed),
            Property::Rotation => PropertyValue::Number(self.rotation),
            Property::Color => PropertyValue::Color(self.color.clone()),
        }
    }

    /// Assign an animatable property. Values of the wrong kind are ignored.
    pub fn set_property(&mut self, property: Property, value: &PropertyValue) {
        match (property, value) {
            (Property::Color, PropertyValue::Color(c)) => self.color = c.clone(),
            (Property::Color, PropertyValue::Number(_)) => {}
            (_, PropertyValue::Color(_)) => {}
            (Property::X, PropertyValue::Number(v)) => self.pos.x = *v,
            (Property::Y, PropertyValue::Number(v)) => self.pos.y = *v,
            (Property::Width, PropertyValue::Number(v)) => self.set_size(*v, self.size.y),
            (Property::Height, PropertyValue::Number(v)) => self.set_size(self.size.x, *v),
            (Property::Direction, PropertyValue::Number(v)) => self.direction = *v,
            (Property::Speed, PropertyValue::Number(v)) => self.speed = *v,
            (Property::Rotation, PropertyValue::Number(v)) => {
                self.rotation = *v;
                self.rotate_visual = true;
            }
        }
    }

    // -- Callbacks --

    /// Run `callback` at the end of every update.
    pub fn set_on_update(&mut self, callback: impl FnMut(&mut Sprite) + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    /// Run `callback` on every update sub-step the pointer is inside the sprite.
    pub fn set_on_hover(&mut self, callback: impl FnMut(&mut Sprite) + 'static) {
        self.on_hover = Some(Box::new(callback));
    }

    pub fn clear_callbacks(&mut self) {
        self.on_update = None;
        self.on_hover = None;
    }

    pub fn has_hover_callback(&self) -> bool {
        self.on_hover.is_some()
    }

    pub(crate) fn fire_hover(&mut self) {
        if let Some(mut callback) = self.on_hover.take() {
            callback(self);
            if self.on_hover.is_none() {
                self.on_hover = Some(callback);
            }
        }
    }

    // -- Per-update step --

    /// Advance one update: move along the heading by `speed`, step the active
    /// transform, trace the pen, then run the update callback.
    /// Returns the traced pen segment, if any.
    pub fn update(&mut self, now: f64) -> Option<PenLine> {
        self.pos += self.heading() * self.speed;

        if let Some(mut transform) = self.transform.take() {
            if transform.tick(self, now) {
                self.transform = Some(transform);
            }
        }

        let from = self.pen.last;
        let to = self.anchor_point();
        let line = self.trace(from, to);

        if let Some(mut callback) = self.on_update.take() {
            callback(self);
            if self.on_update.is_none() {
                self.on_update = Some(callback);
            }
        }

        line
    }
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("id", &self.id)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("color", &self.color)
            .field("visible", &self.visible)
            .field("direction", &self.direction)
            .field("speed", &self.speed)
            .field("rotation", &self.rotation)
            .field("layer", &self.layer)
            .field("anchor", &self.anchor)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sprite() -> Sprite {
        Sprite::new(SpriteId(1))
    }

    #[test]
    fn defaults() {
        let s = sprite();
        assert_eq!(s.size(), Vec2::new(50.0, 50.0));
        assert_eq!(s.anchor_offset(), Vec2::new(25.0, 25.0));
        assert_eq!(s.direction, 90.0);
        assert!(s.visible);
    }

    #[test]
    fn pen_traces_explicit_moves_once() {
        let mut s = sprite();
        s.pen_down("black", 2.0);

        let line = s.move_to(10.0, 0.0).expect("moved, so a line is traced");
        assert_eq!(line.from, Vec2::new(25.0, 25.0));
        assert_eq!(line.to, Vec2::new(35.0, 25.0));
        assert_eq!(line.width, 2.0);

        assert!(s.move_to(10.0, 0.0).is_none());
        assert!(s.move_by(0.0, 0.0).is_none());
    }

    #[test]
    fn pen_up_or_hidden_traces_nothing() {
        let mut s = sprite();
        assert!(s.move_by(5.0, 0.0).is_none());

        s.pen_down("red", 1.0);
        s.hide();
        assert!(s.move_by(5.0, 0.0).is_none());
        s.show();
        let line = s.move_by(5.0, 0.0).unwrap();
        assert_eq!(line.from, Vec2::new(35.0, 25.0));
    }

    #[test]
    fn update_moves_along_heading_and_traces() {
        let mut s = sprite();
        s.direction = 0.0;
        s.speed = 3.0;
        s.pen_down("black", 1.0);

        let line = s.update(0.0).unwrap();
        assert!((s.pos.x - 3.0).abs() < 1e-5);
        assert!(s.pos.y.abs() < 1e-5);
        assert_eq!(line.from, Vec2::new(25.0, 25.0));

        s.speed = 0.0;
        assert!(s.update(0.0).is_none());
    }

    #[test]
    fn update_traces_direct_position_edits() {
        let mut s = sprite();
        s.pen_down("black", 1.0);
        s.pos = Vec2::new(100.0, 0.0);
        let line = s.update(0.0).unwrap();
        assert_eq!(line.from, Vec2::new(25.0, 25.0));
        assert_eq!(line.to, Vec2::new(125.0, 25.0));
    }

    #[test]
    fn traced_segments_wait_for_collection() {
        let mut s = sprite();
        s.pen_down("black", 1.0);
        s.set_on_update(|s| {
            s.move_by(0.0, 5.0);
        });
        s.move_by(5.0, 0.0);
        s.update(0.0);

        let traced = s.take_traced();
        assert_eq!(traced.len(), 2);
        assert_eq!(traced[0].to, Vec2::new(30.0, 25.0));
        assert_eq!(traced[1].to, Vec2::new(30.0, 30.0));
        assert!(s.take_traced().is_empty());
    }

    #[test]
    fn move_forward_follows_direction() {
        let mut s = sprite();
        s.direction = 90.0;
        s.move_forward(10.0);
        assert!(s.pos.x.abs() < 1e-5);
        assert!((s.pos.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn turn_accumulates_unbounded() {
        let mut s = sprite();
        s.turn(300.0);
        s.turn(300.0);
        assert_eq!(s.direction, 690.0);
    }

    #[test]
    fn point_towards_uses_anchor_point() {
        let mut s = sprite();
        s.point_towards(25.0, 125.0, false);
        assert!((s.direction - 90.0).abs() < 1e-4);
        s.point_towards(-75.0, 25.0, true);
        assert!((s.direction - 180.0).abs() < 1e-4);
        assert!(s.rotate_visual);
        assert_eq!(s.rotation, s.direction);
    }

    #[test]
    fn turn_towards_steps_then_snaps() {
        let mut s = sprite();
        s.direction = 0.0;
        // Target straight below the anchor point: bearing 90.
        let (tx, ty) = (25.0, 1025.0);

        s.turn_towards(tx, ty, 30.0, false);
        assert!((s.direction - 30.0).abs() < 1e-4);
        s.turn_towards(tx, ty, 30.0, false);
        s.turn_towards(tx, ty, 30.0, false);
        // Residual is 0 now, or within float noise of it.
        assert!((s.direction - 90.0).abs() < 1e-3);
    }

    #[test]
    fn turn_towards_threshold() {
        let target = (25.0 + 100.0, 25.0); // bearing 0 from the anchor point

        let mut just_under = sprite();
        just_under.direction = 9.9;
        just_under.turn_towards(target.0, target.1, 10.0, false);
        assert_eq!(just_under.direction, 0.0);

        let mut just_over = sprite();
        just_over.direction = -10.1;
        just_over.turn_towards(target.0, target.1, 10.0, false);
        assert!((just_over.direction - (-0.1)).abs() < 1e-4);
    }

    #[test]
    fn turn_towards_takes_the_short_way_round() {
        let mut s = sprite();
        s.direction = 350.0;
        // Bearing 10: the short way is +20, not -340.
        let b = 10.0_f32.to_radians();
        s.turn_towards(25.0 + 100.0 * b.cos(), 25.0 + 100.0 * b.sin(), 5.0, false);
        assert!((s.direction - 355.0).abs() < 1e-3);
    }

    #[test]
    fn turn_towards_converges_without_oscillation() {
        let mut s = sprite();
        s.direction = -170.0;
        let target = (25.0 + 70.0, 25.0 + 70.0); // bearing 45
        let mut last_gap = f32::MAX;
        for _ in 0..100 {
            s.turn_towards(target.0, target.1, 7.0, true);
            let gap = (s.direction - 45.0).rem_euclid(360.0);
            let gap = gap.min(360.0 - gap);
            assert!(gap <= last_gap + 1e-3, "gap grew from {} to {}", last_gap, gap);
            last_gap = gap;
        }
        assert!(last_gap < 1e-3);
    }

    #[test]
    fn anchors_follow_size() {
        let mut s = sprite();
        s.set_anchor(Anchor::BottomRight);
        s.set_size(80.0, 40.0);
        assert_eq!(s.anchor_offset(), Vec2::new(80.0, 40.0));

        s.set_custom_anchor(10.0, 5.0);
        s.set_size(160.0, 20.0);
        assert_eq!(s.anchor_offset(), Vec2::new(20.0, 2.5));
        assert_eq!(s.anchor(), AnchorMode::Custom);
    }

    #[test]
    fn unknown_anchor_name_means_center() {
        let mut s = sprite();
        s.set_anchor_named("left");
        assert_eq!(s.anchor_offset(), Vec2::new(0.0, 25.0));
        s.set_anchor_named("somewhere");
        assert_eq!(s.anchor(), AnchorMode::Preset(Anchor::Center));
        assert_eq!(s.anchor_offset(), Vec2::new(25.0, 25.0));
    }

    #[test]
    fn touching_and_edges() {
        let a = sprite().with_size(Vec2::splat(10.0));
        let b = Sprite::new(SpriteId(2))
            .with_pos(Vec2::new(5.0, 5.0))
            .with_size(Vec2::splat(10.0));
        let c = Sprite::new(SpriteId(3))
            .with_pos(Vec2::new(10.0, 10.0))
            .with_size(Vec2::splat(10.0));
        assert!(a.is_touching(&b));
        assert!(!a.is_touching(&c));

        let field = Vec2::new(100.0, 100.0);
        assert!(a.is_touching_edge(field));
        assert!(!b.is_touching_edge(field));
    }

    #[test]
    fn hover_is_strictly_inside() {
        let s = sprite().with_pos(Vec2::new(10.0, 10.0));
        assert!(s.contains_point(Vec2::new(30.0, 30.0)));
        assert!(!s.contains_point(Vec2::new(10.0, 30.0)));
        assert!(!s.contains_point(Vec2::new(60.0, 30.0)));
    }

    #[test]
    fn finished_transform_is_dropped() {
        let mut s = sprite();
        s.transform(0.0, 1.0, Easing::Linear, [(Property::X, PropertyValue::Number(100.0))]);
        assert!(s.is_transforming());
        s.update(0.5);
        assert!((s.pos.x - 50.0).abs() < 1e-4);
        s.update(1.0);
        assert_eq!(s.pos.x, 100.0);
        assert!(!s.is_transforming());
        s.update(2.0);
        assert_eq!(s.pos.x, 100.0);
    }

    #[test]
    fn transformed_width_keeps_anchor_in_sync() {
        let mut s = sprite();
        s.transform(0.0, 1.0, Easing::Linear, [(Property::Width, PropertyValue::Number(150.0))]);
        s.update(1.0);
        assert_eq!(s.size().x, 150.0);
        assert_eq!(s.anchor_offset(), Vec2::new(75.0, 25.0));
    }

    #[test]
    fn update_callback_runs_last() {
        let seen = Rc::new(Cell::new(0.0));
        let seen_in = seen.clone();
        let mut s = sprite();
        s.speed = 2.0;
        s.direction = 0.0;
        s.set_on_update(move |sprite| seen_in.set(sprite.pos.x));
        s.update(0.0);
        assert!((seen.get() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn hover_callback_can_mutate_sprite() {
        let mut s = sprite();
        s.set_on_hover(|sprite| sprite.color = Color::Rgb(1, 2, 3));
        s.fire_hover();
        assert_eq!(s.color, Color::Rgb(1, 2, 3));
        assert!(s.has_hover_callback());
    }

    #[test]
    fn resizing_invalidates_loaded_image() {
        let mut s = sprite().with_image("hero.png");
        assert_eq!(s.pending_image(), Some("hero.png"));
        s.image_loaded(ImageHandle(7));
        assert_eq!(s.pending_image(), None);
        assert_eq!(s.image().unwrap().handle_for(s.size()), Some(ImageHandle(7)));
        s.set_size(20.0, 20.0);
        assert_eq!(s.pending_image(), Some("hero.png"));
    }
}
