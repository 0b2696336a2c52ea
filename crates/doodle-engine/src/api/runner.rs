use crate::api::game::{DrawContext, EngineContext, Game, GameConfig, LoopState};
use crate::core::schedule::TimerQueue;
use crate::core::time::{Clock, FpsCounter};
use crate::error::{EngineError, HookResult};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::traits::{ImageLoader, Renderer};
use crate::systems::render::draw_scene;

/// Work the runner defers to a later time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    Frame,
    Unfreeze { generation: u64 },
}

/// Drives a `Game`: owns its context, the drawing backend and the clock, and
/// turns due timers into frames.
///
/// Hosts call `start`, then repeatedly wait until `next_deadline` and call
/// `run_due`. `run_blocking` does exactly that with thread sleeps.
pub struct GameRunner<G, B, C>
where
    G: Game,
    B: Renderer + ImageLoader,
    C: Clock,
{
    game: G,
    backend: B,
    clock: C,
    ctx: EngineContext,
    input: InputQueue,
    timers: TimerQueue<Deferred>,
    config: GameConfig,
    fps: FpsCounter,
    last_delay: Option<f64>,
    frames: u64,
}

impl<G, B, C> GameRunner<G, B, C>
where
    G: Game,
    B: Renderer + ImageLoader,
    C: Clock,
{
    pub fn new(game: G, backend: B, clock: C) -> Self {
        let config = game.config().normalized();
        Self {
            ctx: EngineContext::new(&config),
            game,
            backend,
            clock,
            input: InputQueue::new(),
            timers: TimerQueue::new(),
            config,
            fps: FpsCounter::new(),
            last_delay: None,
            frames: 0,
        }
    }

    /// Run the start hook and schedule the first frame. Does nothing after
    /// the first call.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.ctx.state() != LoopState::NotStarted {
            return Ok(());
        }
        let now = self.clock.now();
        self.ctx.set_state(LoopState::Running);
        self.ctx.scene.set_time(now);
        self.fps.reset(now);
        log::info!(
            "{}: starting at {} fps ({}x{})",
            self.config.title, self.config.fps, self.config.width, self.config.height
        );

        let result = self.game.start(&mut self.ctx);
        self.check_hook("start", result)?;
        if self.after_hook() {
            return Ok(());
        }
        self.timers.schedule(now, Deferred::Frame);
        Ok(())
    }

    /// Queue an input event; it is applied at the next update sub-step.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Earliest time anything is scheduled, or `None` once stopped.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    /// Run every task due at `now`. Tasks they schedule wait for the next call.
    pub fn run_due(&mut self, now: f64) -> Result<(), EngineError> {
        for task in self.timers.drain_due(now) {
            if !self.ctx.is_live() {
                break;
            }
            match task {
                Deferred::Frame => self.frame()?,
                Deferred::Unfreeze { generation } => self.ctx.expire_freeze(generation),
            }
        }
        Ok(())
    }

    /// Start, then sleep until each deadline and run what is due, until the
    /// game stops.
    pub fn run_blocking(&mut self) -> Result<(), EngineError> {
        self.start()?;
        while let Some(deadline) = self.next_deadline() {
            let wait = deadline - self.clock.now();
            if wait > 0.0 {
                std::thread::sleep(std::time::Duration::from_secs_f64(wait));
            }
            let now = self.clock.now();
            self.run_due(now)?;
        }
        Ok(())
    }

    /// Run one frame: catch-up updates, image loading, drawing, then schedule
    /// the next frame.
    pub fn frame(&mut self) -> Result<(), EngineError> {
        if !self.ctx.is_live() {
            return Ok(());
        }
        let interval = self.config.frame_interval();
        let frame_start = self.clock.now();

        let mut steps = 0;
        while self.clock.now() - frame_start < interval && steps < self.config.max_sub_steps {
            for event in self.input.drain() {
                self.ctx.input.apply(&event);
            }
            if !self.ctx.is_frozen() {
                let now = self.clock.now();
                self.ctx.scene.set_time(now);
                let result = self.game.update(&mut self.ctx);
                self.check_hook("update", result)?;
                if self.after_hook() {
                    return Ok(());
                }
                if !self.ctx.is_frozen() {
                    self.ctx.scene.update_all(now);
                    let pointer = self.ctx.pointer();
                    self.ctx.scene.dispatch_hover(pointer);
                }
            }
            steps += 1;
        }

        self.load_images();
        if let Some(title) = self.ctx.take_title_change() {
            self.backend.set_title(title);
        }
        self.backend.clear();
        draw_scene(&self.ctx.scene, &mut self.backend);
        let result = {
            let mut draw = DrawContext::new(&mut self.backend);
            self.game.draw(&mut self.ctx, &mut draw)
        };
        self.check_hook("draw", result)?;
        if self.after_hook() {
            return Ok(());
        }

        let now = self.clock.now();
        let mut delay = (interval - (now - frame_start)).max(0.0);
        if self.config.fps_limit > 0 {
            delay = delay.min(1.0 / self.config.fps_limit as f64);
        }
        self.last_delay = Some(delay);
        self.timers.schedule(now + delay, Deferred::Frame);

        self.frames += 1;
        if let Some(fps) = self.fps.tick(now) {
            self.ctx.set_current_fps(fps);
        }
        Ok(())
    }

    /// Stop the game from outside a hook.
    pub fn quit(&mut self) {
        if self.ctx.state() != LoopState::Stopped {
            self.ctx.quit();
            self.shutdown();
        }
    }

    fn load_images(&mut self) {
        for sprite in self.ctx.scene.sprites_mut() {
            let Some(path) = sprite.pending_image().map(str::to_owned) else {
                continue;
            };
            match self.backend.load_image(&path, sprite.size()) {
                Ok(handle) => sprite.image_loaded(handle),
                Err(err) => {
                    log::warn!("sprite {:?}: {}", sprite.id, err);
                    sprite.clear_image();
                }
            }
        }
    }

    /// Turn a failed hook into a stopped runner and an `EngineError`.
    fn check_hook(&mut self, hook: &'static str, result: HookResult) -> Result<(), EngineError> {
        result.map_err(|source| {
            log::error!("{} hook failed, stopping", hook);
            self.ctx.quit();
            self.shutdown();
            EngineError::Hook { hook, source }
        })
    }

    /// Pick up loop changes a hook requested. Returns true if the game quit.
    fn after_hook(&mut self) -> bool {
        if self.ctx.state() == LoopState::Stopped {
            self.shutdown();
            return true;
        }
        let now = self.clock.now();
        for request in self.ctx.take_unfreeze_requests() {
            self.timers.schedule(
                now + request.after,
                Deferred::Unfreeze { generation: request.generation },
            );
        }
        false
    }

    fn shutdown(&mut self) {
        self.timers.clear();
        self.backend.release();
        log::info!("{}: stopped after {} frame(s)", self.config.title, self.frames);
    }

    // -- Accessors --

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.ctx.state()
    }

    pub fn is_live(&self) -> bool {
        self.ctx.is_live()
    }

    /// Current time on the runner's clock.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Delay chosen for the most recently scheduled frame.
    pub fn last_delay(&self) -> Option<f64> {
        self.last_delay
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SpriteId;
    use crate::core::time::ManualClock;
    use crate::renderer::recording::{DrawCommand, RecordingRenderer};
    use crate::renderer::traits::TextStyle;
    use glam::Vec2;

    #[derive(Debug, thiserror::Error)]
    #[error("tank exploded")]
    struct Exploded;

    #[derive(Default)]
    struct Probe {
        player: Option<SpriteId>,
        updates: u32,
        draws: u32,
        fail_update_at: Option<u32>,
        quit_at: Option<u32>,
        freeze_at: Option<(u32, Option<f64>)>,
        fps: Option<u32>,
        /// Clock moved forward by `update_cost` seconds on every update.
        slow_clock: Option<ManualClock>,
        update_cost: f64,
    }

    impl Game for Probe {
        fn config(&self) -> GameConfig {
            let config = GameConfig::default().with_title("probe");
            match self.fps {
                Some(fps) => config.with_fps(fps),
                None => config,
            }
        }

        fn start(&mut self, ctx: &mut EngineContext) -> HookResult {
            let id = ctx.create_sprite(0.0, 0.0, 50.0, 50.0, "#ff0000");
            if let Some(mut s) = ctx.sprite_mut(id) {
                s.direction = 0.0;
                s.speed = 1.0;
            }
            self.player = Some(id);
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext) -> HookResult {
            self.updates += 1;
            if let Some(clock) = &self.slow_clock {
                clock.advance(self.update_cost);
            }
            if self.fail_update_at == Some(self.updates) {
                return Err(Exploded.into());
            }
            if self.quit_at == Some(self.updates) {
                ctx.quit();
            }
            if let Some((at, duration)) = self.freeze_at {
                if at == self.updates {
                    ctx.freeze(duration);
                }
            }
            Ok(())
        }

        fn draw(&mut self, _ctx: &mut EngineContext, draw: &mut DrawContext<'_>) -> HookResult {
            self.draws += 1;
            draw.draw_text("hud", 10.0, 10.0, &TextStyle::default());
            Ok(())
        }
    }

    fn runner(game: Probe) -> (GameRunner<Probe, RecordingRenderer, ManualClock>, ManualClock) {
        let clock = ManualClock::new(0.0);
        let runner = GameRunner::new(game, RecordingRenderer::new(), clock.clone());
        (runner, clock)
    }

    /// Advance to the next deadline and run it.
    fn step(runner: &mut GameRunner<Probe, RecordingRenderer, ManualClock>, clock: &ManualClock) {
        let deadline = runner.next_deadline().unwrap();
        if deadline > clock.now() {
            clock.set(deadline);
        }
        runner.run_due(clock.now()).unwrap();
    }

    #[test]
    fn start_runs_once_and_schedules_a_frame() {
        let (mut r, _) = runner(Probe::default());
        assert_eq!(r.state(), LoopState::NotStarted);
        assert!(r.next_deadline().is_none());
        r.start().unwrap();
        r.start().unwrap();
        assert_eq!(r.ctx().scene.len(), 1);
        assert_eq!(r.state(), LoopState::Running);
        assert_eq!(r.next_deadline(), Some(0.0));
    }

    #[test]
    fn instantaneous_frame_delay_within_one_interval() {
        let (mut r, clock) = runner(Probe::default());
        r.start().unwrap();
        for _ in 0..10 {
            step(&mut r, &clock);
            let delay = r.last_delay().unwrap();
            assert!((0.0..=1.0 / 60.0).contains(&delay));
        }
        assert_eq!(r.frames(), 10);
        // Time never moves inside a frame, so every frame runs the full catch-up.
        assert_eq!(r.game().updates, 50);
    }

    #[test]
    fn slow_updates_end_the_catch_up_early() {
        let clock = ManualClock::new(0.0);
        let game = Probe {
            slow_clock: Some(clock.clone()),
            update_cost: 0.01,
            ..Probe::default()
        };
        let mut r = GameRunner::new(game, RecordingRenderer::new(), clock.clone());
        r.start().unwrap();
        r.run_due(0.0).unwrap();

        // Two 10 ms updates overrun the 16.7 ms interval.
        assert_eq!(r.game().updates, 2);
        assert_eq!(r.last_delay(), Some(0.0));
        assert_eq!(r.next_deadline(), Some(clock.now()));
    }

    #[test]
    fn fps_limit_caps_the_delay() {
        let (mut r, clock) = runner(Probe { fps: Some(30), ..Probe::default() });
        assert_eq!(r.config().fps_limit, 60);
        r.start().unwrap();
        step(&mut r, &clock);
        let delay = r.last_delay().unwrap();
        assert!((delay - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn frame_draws_scene_then_hook() {
        let (mut r, clock) = runner(Probe::default());
        r.start().unwrap();
        step(&mut r, &clock);

        let cmds = r.backend().commands();
        assert_eq!(cmds[0], DrawCommand::Clear);
        assert!(matches!(cmds[1], DrawCommand::Rect { .. }));
        assert!(matches!(&cmds[2], DrawCommand::Text { text, .. } if text == "hud"));
        assert_eq!(r.backend().title(), Some("probe"));

        let player = r.game().player.unwrap();
        assert!((r.ctx().scene.get(player).unwrap().pos.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn pending_input_reaches_the_snapshot() {
        let (mut r, clock) = runner(Probe::default());
        r.start().unwrap();
        r.push_input(InputEvent::KeyDown { key: "ArrowUp".into() });
        r.push_input(InputEvent::PointerMove { x: 4.0, y: 2.0 });
        step(&mut r, &clock);
        assert!(r.ctx().is_key_pressed("arrowup"));
        assert_eq!(r.ctx().pointer(), Vec2::new(4.0, 2.0));
    }

    #[test]
    fn hook_error_stops_the_runner() {
        let (mut r, clock) = runner(Probe { fail_update_at: Some(2), ..Probe::default() });
        r.start().unwrap();
        let deadline = r.next_deadline().unwrap();
        clock.set(deadline);
        let err = r.run_due(clock.now()).unwrap_err();
        assert!(matches!(err, EngineError::Hook { hook: "update", .. }));
        assert_eq!(r.state(), LoopState::Stopped);
        assert!(r.next_deadline().is_none());
        assert!(r.backend().is_released());
    }

    #[test]
    fn quit_from_hook_cancels_everything() {
        let (mut r, clock) = runner(Probe { quit_at: Some(1), ..Probe::default() });
        r.start().unwrap();
        step(&mut r, &clock);
        assert_eq!(r.state(), LoopState::Stopped);
        assert_eq!(r.game().draws, 0);
        assert!(r.next_deadline().is_none());
        assert!(r.backend().is_released());
    }

    #[test]
    fn quit_from_host() {
        let (mut r, _) = runner(Probe::default());
        r.start().unwrap();
        r.quit();
        assert!(!r.is_live());
        assert!(r.next_deadline().is_none());
        assert!(r.backend().is_released());
    }

    #[test]
    fn timed_freeze_expires() {
        let (mut r, clock) = runner(Probe { freeze_at: Some((1, Some(0.5))), ..Probe::default() });
        r.start().unwrap();
        step(&mut r, &clock);
        assert!(r.ctx().is_frozen());
        // Frozen frames still draw but skip updates.
        assert_eq!(r.game().updates, 1);

        let player = r.game().player.unwrap();
        let x = r.ctx().scene.get(player).unwrap().pos.x;
        clock.advance(0.1);
        step(&mut r, &clock);
        assert_eq!(r.ctx().scene.get(player).unwrap().pos.x, x);

        clock.set(0.6);
        r.run_due(0.6).unwrap();
        assert!(!r.ctx().is_frozen());
    }

    #[test]
    fn unfreeze_before_expiry_invalidates_timer() {
        let (mut r, clock) = runner(Probe { freeze_at: Some((1, Some(1.0))), ..Probe::default() });
        r.start().unwrap();
        step(&mut r, &clock);
        r.ctx_mut().unfreeze();
        r.ctx_mut().freeze(None);
        clock.set(2.0);
        r.run_due(2.0).unwrap();
        assert!(r.ctx().is_frozen());
    }

    #[test]
    fn failed_image_falls_back_to_rectangle() {
        struct Pictures;
        impl Game for Pictures {
            fn start(&mut self, ctx: &mut EngineContext) -> HookResult {
                ctx.scene.create_sprite_with(|s| s.with_image("missing.png"));
                ctx.scene.create_sprite_with(|s| s.with_image("tank.png").with_layer(1));
                Ok(())
            }
        }

        let clock = ManualClock::new(0.0);
        let backend = RecordingRenderer::new().with_missing_image("missing.png");
        let mut r = GameRunner::new(Pictures, backend, clock.clone());
        r.start().unwrap();
        r.run_due(0.0).unwrap();

        let cmds = r.backend().commands();
        assert!(matches!(cmds[1], DrawCommand::Rect { .. }));
        assert!(matches!(cmds[2], DrawCommand::Image { .. }));
        assert!(r.ctx().scene.iter().next().unwrap().image().is_none());

        // Loaded images are not requested again.
        clock.advance(1.0);
        r.run_due(1.0).unwrap();
        assert_eq!(r.backend().loads().len(), 2);
    }

    #[test]
    fn fps_counter_publishes_after_a_second() {
        let (mut r, clock) = runner(Probe::default());
        r.start().unwrap();
        for _ in 0..70 {
            clock.advance(1.0 / 60.0);
            r.run_due(clock.now()).unwrap();
        }
        assert!(r.ctx().current_fps() > 0);
    }
}
