//! Drives `Engine` through the public API with in-memory collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use layerloop_engine::coords::Viewport;
use layerloop_engine::core::{Engine, EngineState};
use layerloop_engine::device::GpuContext;
use layerloop_engine::input::{Key, KeyEvent, KeyState};
use layerloop_engine::render::{Canvas, PresentationSurface};
use layerloop_engine::scene::DrawItem;
use layerloop_engine::window::{Callbacks, KeyCallback, ResizeCallback, Window};

#[derive(Default)]
struct Screen {
    viewport: Option<Viewport>,
    presented: Vec<Vec<(u32, i32, i32)>>,
}

struct Ctx {
    screen: Rc<RefCell<Screen>>,
}

impl GpuContext for Ctx {
    fn clear_color_buffer(&mut self) {}

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.screen.borrow_mut().viewport = Some(Viewport::new(x, y, width, height));
    }

    fn viewport(&self) -> Viewport {
        self.screen.borrow().viewport.unwrap_or_default()
    }
}

/// Scripted window: each `poll_events` consumes one entry of `script`.
struct ScriptedWindow {
    ctx: Ctx,
    callbacks: Callbacks<Ctx>,
    script: Vec<Input>,
    escape_down: bool,
    close: bool,
}

enum Input {
    Nothing,
    Resize(u32, u32),
    Escape,
    Close,
}

impl Window for ScriptedWindow {
    type Context = Ctx;

    fn context(&mut self) -> &mut Ctx {
        &mut self.ctx
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let vp = self.ctx.viewport();
        (vp.width, vp.height)
    }

    fn is_key_down(&self, key: Key) -> bool {
        key == Key::Escape && self.escape_down
    }

    fn should_close(&self) -> bool {
        self.close
    }

    fn swap_buffers(&mut self) {}

    fn poll_events(&mut self) {
        if self.script.is_empty() {
            return;
        }
        match self.script.remove(0) {
            Input::Nothing => {}
            Input::Resize(w, h) => {
                self.callbacks.dispatch_resize(&mut self.ctx, w, h);
            }
            Input::Escape => {
                self.escape_down = true;
                self.callbacks
                    .dispatch_key(&KeyEvent::new(Key::Escape, KeyState::Pressed));
            }
            Input::Close => self.close = true,
        }
    }

    fn set_resize_callback(&mut self, callback: ResizeCallback<Ctx>) {
        self.callbacks.set_resize(callback);
    }

    fn set_key_callback(&mut self, callback: KeyCallback) {
        self.callbacks.set_key(callback);
    }
}

#[derive(Default)]
struct Queue {
    draws: Vec<(u32, i32, i32)>,
}

impl Canvas<u32> for Queue {
    fn draw_bitmap(&mut self, bitmap: u32, x: f32, y: f32) {
        self.draws.push((bitmap, x as i32, y as i32));
    }
}

struct Surface {
    queue: Queue,
}

impl PresentationSurface for Surface {
    type Bitmap = u32;
    type Context = Ctx;
    type Canvas = Queue;

    fn flush(&mut self, ctx: &mut Ctx) {
        let draws = std::mem::take(&mut self.queue.draws);
        ctx.screen.borrow_mut().presented.push(draws);
    }

    fn canvas(&mut self) -> &mut Queue {
        &mut self.queue
    }
}

fn engine(script: Vec<Input>) -> (Engine<ScriptedWindow, Surface>, Rc<RefCell<Screen>>) {
    let screen = Rc::new(RefCell::new(Screen::default()));
    let window = ScriptedWindow {
        ctx: Ctx {
            screen: screen.clone(),
        },
        callbacks: Callbacks::default(),
        script,
        escape_down: false,
        close: false,
    };
    let surface = Surface {
        queue: Queue::default(),
    };
    (Engine::from_parts(window, surface), screen)
}

#[test]
fn host_loop_runs_until_escape() {
    let (mut engine, screen) = engine(vec![Input::Nothing, Input::Nothing, Input::Escape]);
    engine.start();

    let mut frames = 0u32;
    loop {
        engine.draw(frames as i32 % 2, DrawItem::new(frames, (frames as f32, 0.0)));
        frames += 1;
        if !engine.update() {
            break;
        }
    }

    assert_eq!(frames, 3);
    assert_eq!(engine.state(), EngineState::Stopped);

    // Each flush shows what was drawn before the previous update.
    let presented = &screen.borrow().presented;
    assert_eq!(presented.len(), 3);
    assert!(presented[0].is_empty());
    assert_eq!(presented[1], [(0, 0, 0)]);
    assert_eq!(presented[2], [(1, 1, 0)]);
}

#[test]
fn layers_are_painted_back_to_front() {
    let (mut engine, screen) = engine(vec![]);
    engine.draw(10, DrawItem::new(3, (0.0, 0.0)));
    engine.draw(-1, DrawItem::new(1, (0.0, 0.0)));
    engine.draw(0, DrawItem::new(2, (0.0, 0.0)));
    engine.draw(10, DrawItem::new(4, (0.0, 0.0)));

    assert_eq!(engine.pending().layer_count(), 3);
    engine.update();
    engine.update();

    let order: Vec<u32> = screen.borrow().presented[1].iter().map(|d| d.0).collect();
    assert_eq!(order, [1, 2, 3, 4]);
}

#[test]
fn close_request_ends_the_loop() {
    let (mut engine, _) = engine(vec![Input::Nothing, Input::Close]);
    engine.start();
    assert!(engine.update());
    assert!(!engine.update());
    assert!(!engine.is_running());
}

#[test]
fn viewport_follows_resizes_after_start() {
    let (mut engine, screen) = engine(vec![Input::Resize(800, 600), Input::Resize(0, 0)]);
    engine.start();

    engine.update();
    assert_eq!(screen.borrow().viewport, Some(Viewport::new(0, 0, 800, 600)));

    engine.update();
    assert_eq!(screen.borrow().viewport, Some(Viewport::new(0, 0, 0, 0)));
}

#[test]
fn last_key_callback_wins() {
    let (mut engine, _) = engine(vec![Input::Escape]);
    let hits = Rc::new(RefCell::new(Vec::new()));

    let h = hits.clone();
    engine.set_key_callback(Box::new(move |_| h.borrow_mut().push("first")));
    let h = hits.clone();
    engine.set_key_callback(Box::new(move |ev| {
        assert_eq!(ev.key, Key::Escape);
        h.borrow_mut().push("second");
    }));

    assert!(!engine.update());
    assert_eq!(*hits.borrow(), ["second"]);
}

#[test]
fn restarting_reinstalls_viewport_handler() {
    let (mut engine, screen) = engine(vec![Input::Resize(5, 5), Input::Resize(9, 9)]);
    engine.set_resize_callback(Box::new(|_, _, _| {}));
    engine.update();
    assert_eq!(screen.borrow().viewport, None);

    engine.stop();
    engine.start();
    engine.update();
    assert_eq!(screen.borrow().viewport, Some(Viewport::new(0, 0, 9, 9)));
}
