use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{CursorGrabMode, Window},
};

use glam::Vec3;
use std::sync::Arc;
use tracing::info;

use cubewalk::{
    controller::{Command, FrameLoopContext, KeyBindings, TickFlow},
    logging,
    utils::Aabb,
};

const SPAWN_POS: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const CAM_DIST: f32 = 20.0;
const ACTOR_HALF_SIZE: f32 = 1.0;
const GROUND_TOP: f32 = 0.0;

/// Host-side collision stage standing in for a full physics traversal:
/// keeps the actor's box above the ground plane after each tick.
struct FloorPusher {
    top: f32,
}

impl cubewalk::controller::CollisionAdjust for FloorPusher {
    fn adjust(&self, bounds: &Aabb, pos: Vec3) -> Vec3 {
        let min_z = self.top + bounds.half_extents.z;
        if pos.z < min_z {
            Vec3::new(pos.x, pos.y, min_z)
        } else {
            pos
        }
    }
}

struct App {
    window: Arc<Window>,
    frame: FrameLoopContext,
    bindings: KeyBindings,

    // Pointer handling
    cursor_pos: Option<(f64, f64)>,
    mouse_locked: bool,

    // Frame timing
    last_frame_time: std::time::Instant,
}

impl App {
    fn new(window: Arc<Window>) -> Self {
        let camera_offset = Vec3::new(0.0, 4.0, 1.0).normalize() * CAM_DIST;
        let mut frame = FrameLoopContext::new(SPAWN_POS, camera_offset);
        frame.register_collider(Aabb::cube(ACTOR_HALF_SIZE), Box::new(FloorPusher { top: GROUND_TOP }));

        Self {
            window,
            frame,
            bindings: KeyBindings::default(),
            cursor_pos: None,
            mouse_locked: false,
            last_frame_time: std::time::Instant::now(),
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) -> TickFlow {
        if event.repeat {
            return TickFlow::Continue;
        }
        let Some(name) = key_name(&event.logical_key) else {
            return TickFlow::Continue;
        };
        let cmd = match event.state {
            ElementState::Pressed => self.bindings.on_key_down(&name),
            ElementState::Released => self.bindings.on_key_up(&name),
        };
        match cmd {
            // Escape first releases the pointer; a second press quits
            Some(Command::Quit) if self.mouse_locked => {
                self.unlock_mouse();
                TickFlow::Continue
            }
            Some(cmd) => self.frame.apply(cmd),
            None => TickFlow::Continue,
        }
    }

    fn lock_mouse(&mut self) {
        self.mouse_locked = true;
        self.window.set_cursor_visible(false);
        let _ = self
            .window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Locked));
    }

    fn unlock_mouse(&mut self) {
        self.mouse_locked = false;
        self.window.set_cursor_visible(true);
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.frame.pointer = Default::default();
    }

    /// Mouse-look sampling: read the pointer offset from the window center
    /// as [-1, 1] deltas, then park the pointer back at the center. With no
    /// fresh reading (pointer outside the window) the previous delta stays.
    fn sample_pointer(&mut self) {
        if !self.mouse_locked {
            return;
        }
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        let (hw, hh) = (size.width as f64 / 2.0, size.height as f64 / 2.0);
        let reading = self
            .cursor_pos
            .map(|(x, y)| (((x - hw) / hw) as f32, (-(y - hh) / hh) as f32));
        self.frame.pointer.sample(reading);

        let _ = self
            .window
            .set_cursor_position(winit::dpi::PhysicalPosition::new(hw, hh));
        if self.cursor_pos.is_some() {
            self.cursor_pos = Some((hw, hh));
        }
    }

    fn tick(&mut self) -> TickFlow {
        let now = std::time::Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.sample_pointer();
        self.frame.step(dt)
    }
}

fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_string()),
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        Key::Named(NamedKey::Escape) => Some("Escape".to_string()),
        _ => None,
    }
}

fn main() {
    logging::init();

    let event_loop = EventLoop::new().unwrap();
    let window_attributes = Window::default_attributes()
        .with_title("cubewalk")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = event_loop.create_window(window_attributes).unwrap();
    let window = Arc::new(window);

    let mut app = App::new(window.clone());
    info!("click the window to capture the mouse, Escape to release");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput { event: key_event, .. } => {
                    if app.handle_key(key_event) == TickFlow::Exit {
                        elwt.exit();
                    }
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => app.lock_mouse(),
                WindowEvent::CursorMoved { position, .. } => {
                    app.cursor_pos = Some((position.x, position.y));
                }
                WindowEvent::CursorLeft { .. } => {
                    app.cursor_pos = None;
                }
                WindowEvent::RedrawRequested => {
                    if app.tick() == TickFlow::Exit {
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        })
        .unwrap();
}
