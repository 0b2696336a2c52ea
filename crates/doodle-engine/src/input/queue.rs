/// Raw input as reported by the host. Coordinates are canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The primary button went down at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The primary button was released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed. `key` is the host's key name, e.g. "ArrowLeft" or "a".
    KeyDown { key: String },
    /// A key was released.
    KeyUp { key: String },
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them at the top
/// of each update sub-step.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
