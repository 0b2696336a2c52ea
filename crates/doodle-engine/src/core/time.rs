use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock measured from construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a test
/// can keep one handle and give another to the runner.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Counts frames over rolling one-second windows.
#[derive(Debug, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    current: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh window at `now`.
    pub fn reset(&mut self, now: f64) {
        self.window_start = Some(now);
        self.frames = 0;
    }

    /// Count a completed frame. Returns the new fps figure when a window of at
    /// least one second has just closed.
    pub fn tick(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;
        let start = *self.window_start.get_or_insert(now);
        if now - start >= 1.0 {
            self.current = self.frames;
            self.frames = 0;
            self.window_start = Some(now);
            Some(self.current)
        } else {
            None
        }
    }

    /// Frames counted in the last closed window.
    pub fn current(&self) -> u32 {
        self.current
    }
}
