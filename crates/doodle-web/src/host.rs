//! Browser host: owns the runner, feeds it DOM input and keeps it ticking
//! with `setTimeout` until the game stops.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread::LocalKey;
use doodle_engine::{Clock, Game, GameRunner, InputEvent};
use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent,
    Performance, Window,
};
use crate::canvas::CanvasRenderer;

/// `performance.now()` in seconds, falling back to `Date.now()`.
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Self {
        Self {
            performance: window.performance(),
        }
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now() / 1000.0,
            None => js_sys::Date::now() / 1000.0,
        }
    }
}

pub type WebRunner<G> = GameRunner<G, CanvasRenderer, PerformanceClock>;

/// Events captured by DOM listeners since the last tick.
type PendingInput = Rc<RefCell<Vec<InputEvent>>>;

/// Thread-local home of a running game. `export_game!` declares one per game.
pub type HostSlot<G> = LocalKey<RefCell<Option<WebHost<G>>>>;

/// A game running in the page.
pub struct WebHost<G: Game + 'static> {
    runner: WebRunner<G>,
    pending: PendingInput,
    _listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl<G: Game + 'static> WebHost<G> {
    pub fn runner(&self) -> &WebRunner<G> {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut WebRunner<G> {
        &mut self.runner
    }

    fn flush_input(&mut self) {
        for event in self.pending.borrow_mut().drain(..) {
            self.runner.push_input(event);
        }
    }
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Attach `game` to the canvas with id `canvas_id`, run its start hook and
/// schedule the first frame.
pub fn launch<G: Game + 'static>(
    slot: &'static HostSlot<G>,
    game: G,
    canvas_id: &str,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| js_error(format!("no element with id '{}'", canvas_id)))?
        .dyn_into()?;

    let config = game.config().normalized();
    canvas.set_width(config.width);
    canvas.set_height(config.height);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| js_error("canvas has no 2d context"))?
        .dyn_into()?;

    let renderer = CanvasRenderer::new(ctx, config.bounds(), &config.background)
        .with_document(document);
    let mut runner = GameRunner::new(game, renderer, PerformanceClock::new(&window));

    let pending: PendingInput = Rc::new(RefCell::new(Vec::new()));
    let listeners = vec![
        listen(&window, "keydown", &pending, |e| {
            e.dyn_ref::<KeyboardEvent>().map(|k| InputEvent::KeyDown { key: k.key() })
        })?,
        listen(&window, "keyup", &pending, |e| {
            e.dyn_ref::<KeyboardEvent>().map(|k| InputEvent::KeyUp { key: k.key() })
        })?,
        listen(&canvas, "mousemove", &pending, |e| {
            pointer(e).map(|p| InputEvent::PointerMove { x: p.x, y: p.y })
        })?,
        listen(&canvas, "mousedown", &pending, |e| {
            pointer(e).map(|p| InputEvent::PointerDown { x: p.x, y: p.y })
        })?,
        listen(&canvas, "mouseup", &pending, |e| {
            pointer(e).map(|p| InputEvent::PointerUp { x: p.x, y: p.y })
        })?,
    ];

    runner.start().map_err(js_error)?;
    let next = runner.next_deadline().map(|deadline| (deadline, runner.now()));

    slot.with(|cell| {
        *cell.borrow_mut() = Some(WebHost {
            runner,
            pending,
            _listeners: listeners,
        });
    });

    if let Some((deadline, now)) = next {
        schedule(slot, deadline - now)?;
    }
    Ok(())
}

/// Stop the game in `slot`, if one is running.
pub fn quit<G: Game + 'static>(slot: &'static HostSlot<G>) {
    slot.with(|cell| {
        if let Some(host) = cell.borrow_mut().as_mut() {
            host.runner.quit();
        }
    });
}

/// Run `f` against the hosted game, if any.
pub fn with_host<G: Game + 'static, R>(
    slot: &'static HostSlot<G>,
    f: impl FnOnce(&mut WebHost<G>) -> R,
) -> Option<R> {
    slot.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn pointer(event: &Event) -> Option<Vec2> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|m| Vec2::new(m.offset_x() as f32, m.offset_y() as f32))
}

fn listen(
    target: &EventTarget,
    kind: &str,
    pending: &PendingInput,
    map: fn(&Event) -> Option<InputEvent>,
) -> Result<Closure<dyn FnMut(Event)>, JsValue> {
    let pending = pending.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(input) = map(&event) {
            pending.borrow_mut().push(input);
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn schedule<G: Game + 'static>(slot: &'static HostSlot<G>, delay: f64) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
    let callback = Closure::once_into_js(move || tick(slot));
    let millis = (delay * 1000.0).max(0.0).round() as i32;
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)?;
    Ok(())
}

fn tick<G: Game + 'static>(slot: &'static HostSlot<G>) {
    let next = with_host(slot, |host| {
        host.flush_input();
        let now = host.runner.now();
        if let Err(err) = host.runner.run_due(now) {
            log::error!("{}", err);
            return None;
        }
        host.runner
            .next_deadline()
            .map(|deadline| deadline - host.runner.now())
    })
    .flatten();

    if let Some(delay) = next {
        if let Err(err) = schedule(slot, delay) {
            log::error!("failed to schedule next frame: {:?}", err);
        }
    }
}
