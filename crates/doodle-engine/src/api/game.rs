use glam::Vec2;
use serde::Deserialize;
use crate::api::types::SpriteId;
use crate::components::color::Color;
use crate::core::collision;
use crate::core::rng::Rng;
use crate::core::scene::{Scene, SpriteMut};
use crate::error::{ConfigWarning, EngineError, HookResult};
use crate::input::state::InputState;
use crate::renderer::traits::{Renderer, TextStyle};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window or page title.
    pub title: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Target updates per second (default: 60).
    pub fps: u32,
    /// Upper bound on frames per second; 0 disables the cap.
    pub fps_limit: u32,
    /// Maximum update sub-steps per frame when catching up (default: 5).
    pub max_sub_steps: u32,
    pub background: Color,
    /// Seed for `EngineContext::random_number`.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Doodle Game".to_string(),
            width: 800,
            height: 600,
            fps: 60,
            fps_limit: 60,
            max_sub_steps: 5,
            background: Color::Named("white".to_string()),
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: GameConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Replace values the loop cannot run with, warning about each.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if self.fps == 0 {
            ConfigWarning::OutOfRange { field: "fps", fallback: defaults.fps }.log();
            self.fps = defaults.fps;
        }
        if self.max_sub_steps == 0 {
            ConfigWarning::OutOfRange {
                field: "max_sub_steps",
                fallback: defaults.max_sub_steps,
            }
            .log();
            self.max_sub_steps = defaults.max_sub_steps;
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_background(mut self, color: impl Into<Color>) -> Self {
        self.background = color.into();
        self
    }

    /// Seconds between updates at the target fps.
    pub fn frame_interval(&self) -> f64 {
        1.0 / self.fps.max(1) as f64
    }

    /// Canvas size as a vector.
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The core contract every game must fulfill. All hooks are optional.
pub trait Game {
    /// Return engine configuration. Called once, before start.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and create sprites. Runs once when the loop starts.
    fn start(&mut self, _ctx: &mut EngineContext) -> HookResult {
        Ok(())
    }

    /// One logic step. Runs before sprites update, skipped while frozen.
    fn update(&mut self, _ctx: &mut EngineContext) -> HookResult {
        Ok(())
    }

    /// Custom drawing on top of the scene, once per frame.
    fn draw(&mut self, _ctx: &mut EngineContext, _draw: &mut DrawContext<'_>) -> HookResult {
        Ok(())
    }
}

/// Lifecycle of a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    NotStarted,
    Running,
    Frozen,
    /// Terminal.
    Stopped,
}

/// A freeze expiry the runner has yet to schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct UnfreezeRequest {
    pub generation: u64,
    pub after: f64,
}

/// Mutable access to engine state, passed to every `Game` hook.
pub struct EngineContext {
    pub scene: Scene,
    pub input: InputState,
    rng: Rng,
    state: LoopState,
    /// Bumped by every freeze/unfreeze so stale expiries can be ignored.
    freeze_generation: u64,
    unfreeze_requests: Vec<UnfreezeRequest>,
    current_fps: u32,
    target_fps: u32,
    title: String,
    title_changed: bool,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(config.bounds()),
            input: InputState::new(),
            rng: Rng::new(config.seed),
            state: LoopState::NotStarted,
            freeze_generation: 0,
            unfreeze_requests: Vec::new(),
            current_fps: 0,
            target_fps: config.fps,
            title: config.title.clone(),
            title_changed: true,
        }
    }

    // -- Sprites --

    /// Add a plain rectangle sprite. See `Scene::create_sprite`.
    pub fn create_sprite(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: impl Into<Color>,
    ) -> SpriteId {
        self.scene.create_sprite(x, y, width, height, color)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<SpriteMut<'_>> {
        self.scene.sprite_mut(id)
    }

    pub fn check_collision(&self, a: SpriteId, b: SpriteId) -> bool {
        self.scene.check_collision(a, b)
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
        collision::distance(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    /// Random integer in [min, max].
    pub fn random_number(&mut self, min: i32, max: i32) -> i32 {
        self.rng.range_inclusive(min, max)
    }

    // -- Input --

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.input.is_key_pressed(key)
    }

    pub fn pointer(&self) -> Vec2 {
        self.input.pointer()
    }

    pub fn pointer_pressed(&self) -> bool {
        self.input.pointer_pressed()
    }

    // -- Loop --

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Running or frozen.
    pub fn is_live(&self) -> bool {
        matches!(self.state, LoopState::Running | LoopState::Frozen)
    }

    pub fn is_frozen(&self) -> bool {
        self.state == LoopState::Frozen
    }

    /// Suspend updates. With a finite, positive duration (seconds) the game
    /// unfreezes by itself unless another freeze or unfreeze happens first.
    /// A zero duration freezes until `unfreeze`.
    pub fn freeze(&mut self, duration: Option<f64>) {
        if !self.is_live() {
            return;
        }
        self.state = LoopState::Frozen;
        self.freeze_generation += 1;
        log::debug!("frozen (generation {})", self.freeze_generation);
        if let Some(after) = duration.filter(|d| d.is_finite() && *d > 0.0) {
            self.unfreeze_requests.push(UnfreezeRequest {
                generation: self.freeze_generation,
                after,
            });
        }
    }

    pub fn unfreeze(&mut self) {
        if self.state == LoopState::Frozen {
            self.state = LoopState::Running;
            self.freeze_generation += 1;
            log::debug!("unfrozen");
        }
    }

    /// Apply a scheduled freeze expiry. Stale expiries are ignored.
    pub(crate) fn expire_freeze(&mut self, generation: u64) {
        if generation == self.freeze_generation {
            self.unfreeze();
        }
    }

    pub(crate) fn take_unfreeze_requests(&mut self) -> Vec<UnfreezeRequest> {
        std::mem::take(&mut self.unfreeze_requests)
    }

    pub(crate) fn set_state(&mut self, state: LoopState) {
        self.state = state;
    }

    /// Stop the game for good. Takes effect at the end of the current hook.
    pub fn quit(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Frames drawn during the last full second.
    pub fn current_fps(&self) -> u32 {
        self.current_fps
    }

    pub(crate) fn set_current_fps(&mut self, fps: u32) {
        self.current_fps = fps;
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    // -- Host --

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.title_changed = true;
    }

    pub(crate) fn take_title_change(&mut self) -> Option<&str> {
        if self.title_changed {
            self.title_changed = false;
            Some(&self.title)
        } else {
            None
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// Drawing helpers handed to `Game::draw`. Everything drawn here lands on top
/// of the scene for the current frame only.
pub struct DrawContext<'a> {
    renderer: &'a mut dyn Renderer,
}

impl<'a> DrawContext<'a> {
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        Self { renderer }
    }

    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.renderer.draw_text(Vec2::new(x, y), text, style);
    }

    pub fn draw_rectangle(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: impl Into<Color>,
        filled: bool,
    ) {
        let color = color.into();
        self.renderer
            .draw_rect(Vec2::new(x, y), Vec2::new(width, height), &color, filled);
    }

    /// Circle centered on (x, y).
    pub fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: impl Into<Color>, filled: bool) {
        let color = color.into();
        self.renderer
            .draw_oval(Vec2::new(x, y), Vec2::splat(radius), &color, filled);
    }

    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: impl Into<Color>, width: f32) {
        let color = color.into();
        self.renderer
            .draw_line(Vec2::new(x1, y1), Vec2::new(x2, y2), &color, width);
    }

    /// Direct access to the backend for anything the helpers don't cover.
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCommand, RecordingRenderer};

    #[test]
    fn config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.title, "Doodle Game");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.fps, 60);
        assert_eq!(config.max_sub_steps, 5);
        assert!((config.frame_interval() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn config_from_partial_json() {
        let config = GameConfig::from_json(r##"{"title": "Tanks", "fps": 30, "background": "#102030"}"##)
            .unwrap();
        assert_eq!(config.title, "Tanks");
        assert_eq!(config.fps, 30);
        assert_eq!(config.background, Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(config.width, 800);
    }

    #[test]
    fn config_normalizes_zeroes() {
        let config = GameConfig::from_json(r#"{"fps": 0, "max_sub_steps": 0}"#).unwrap();
        assert_eq!(config.fps, 60);
        assert_eq!(config.max_sub_steps, 5);
    }

    #[test]
    fn config_rejects_bad_json() {
        assert!(matches!(GameConfig::from_json("{fps: 1"), Err(EngineError::Config(_))));
    }

    fn live_ctx() -> EngineContext {
        let mut ctx = EngineContext::default();
        ctx.set_state(LoopState::Running);
        ctx
    }

    #[test]
    fn freeze_and_unfreeze() {
        let mut ctx = live_ctx();
        ctx.freeze(None);
        assert!(ctx.is_frozen());
        assert!(ctx.take_unfreeze_requests().is_empty());
        ctx.unfreeze();
        assert_eq!(ctx.state(), LoopState::Running);
    }

    #[test]
    fn stale_freeze_expiry_is_ignored() {
        let mut ctx = live_ctx();
        ctx.freeze(Some(1.0));
        let first = ctx.take_unfreeze_requests()[0];
        ctx.freeze(Some(5.0));
        let second = ctx.take_unfreeze_requests()[0];

        ctx.expire_freeze(first.generation);
        assert!(ctx.is_frozen());
        ctx.expire_freeze(second.generation);
        assert!(!ctx.is_frozen());
    }

    #[test]
    fn infinite_or_zero_freeze_schedules_nothing() {
        let mut ctx = live_ctx();
        ctx.freeze(Some(f64::INFINITY));
        assert!(ctx.take_unfreeze_requests().is_empty());
        ctx.freeze(Some(0.0));
        assert!(ctx.is_frozen());
        assert!(ctx.take_unfreeze_requests().is_empty());
    }

    #[test]
    fn quit_is_terminal() {
        let mut ctx = live_ctx();
        ctx.quit();
        ctx.freeze(None);
        ctx.unfreeze();
        assert_eq!(ctx.state(), LoopState::Stopped);
        assert!(!ctx.is_live());
    }

    #[test]
    fn random_numbers_follow_the_seed() {
        let mut a = EngineContext::default();
        let mut b = EngineContext::default();
        for _ in 0..20 {
            let v = a.random_number(1, 6);
            assert!((1..=6).contains(&v));
            assert_eq!(v, b.random_number(1, 6));
        }
    }

    #[test]
    fn distance_is_euclidean() {
        let ctx = EngineContext::default();
        assert!((ctx.distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn title_changes_are_reported_once() {
        let mut ctx = EngineContext::default();
        assert_eq!(ctx.take_title_change(), Some("Doodle Game"));
        assert_eq!(ctx.take_title_change(), None);
        ctx.set_title("Score: 3");
        assert_eq!(ctx.take_title_change(), Some("Score: 3"));
    }

    #[test]
    fn draw_context_helpers() {
        let mut r = RecordingRenderer::new();
        {
            let mut draw = DrawContext::new(&mut r);
            draw.draw_circle(10.0, 10.0, 5.0, "red", false);
            draw.draw_text("hi", 1.0, 2.0, &TextStyle::default());
        }
        assert_eq!(r.commands()[0], DrawCommand::Oval {
            center: Vec2::new(10.0, 10.0),
            radii: Vec2::splat(5.0),
            color: Color::Named("red".into()),
            filled: false,
        });
        assert!(matches!(&r.commands()[1], DrawCommand::Text { text, .. } if text == "hi"));
    }
}
