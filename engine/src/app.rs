use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::{Renderer2d, SurfaceSize};
use crate::pixels_renderer::PixelsRenderer2d;
use crate::view_tree::{ViewTree, hit_test};

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: bool,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Up,
}

/// A press or release, with the action of the topmost enabled button under the pointer at that
/// moment (resolved against the view on screen when the input arrived).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent<A> {
    pub phase: PointerPhase,
    pub target: Option<A>,
}

/// Pointer activity since the previous frame, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerFrame<A> {
    pub pos: Option<(u32, u32)>,
    pub events: Vec<PointerEvent<A>>,
}

/// Collects pointer input between frames.
#[derive(Debug)]
pub struct PointerInput<A> {
    pos: Option<(u32, u32)>,
    events: Vec<PointerEvent<A>>,
    held: bool,
}

impl<A> Default for PointerInput<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> PointerInput<A> {
    pub fn new() -> Self {
        Self {
            pos: None,
            events: Vec::new(),
            held: false,
        }
    }

    pub fn pos(&self) -> Option<(u32, u32)> {
        self.pos
    }

    pub fn move_to(&mut self, pos: Option<(u32, u32)>) {
        self.pos = pos;
    }

    pub fn push(&mut self, phase: PointerPhase, target: Option<A>) {
        self.held = phase == PointerPhase::Down;
        self.events.push(PointerEvent { phase, target });
    }

    /// Ends an outstanding press whose release the window will never deliver, e.g. after focus
    /// moved to another window mid-press.
    pub fn cancel_held(&mut self) {
        if self.held {
            self.push(PointerPhase::Up, None);
        }
    }

    pub fn take_frame(&mut self) -> PointerFrame<A> {
        PointerFrame {
            pos: self.pos,
            events: std::mem::take(&mut self.events),
        }
    }
}

pub trait GameApp {
    type State;
    type Action: Clone;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn build_view(&self, state: &Self::State, size: SurfaceSize) -> ViewTree<Self::Action>;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        pointer: PointerFrame<Self::Action>,
        dt: Duration,
    );

    fn render(&mut self, view: &ViewTree<Self::Action>, renderer: &mut dyn Renderer2d);
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let initial_size = match event_loop.primary_monitor().map(|m| m.size()) {
        Some(monitor) if config.clamp_to_monitor => PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        ),
        _ => config.desired_size,
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width, window_size.height);
    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
    };
    let mut state = game.init_state(&mut ctx);
    let mut pointer: PointerInput<G::Action> = PointerInput::new();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    ctx.surface_size = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = ctx.renderer.resize(ctx.surface_size) {
                        log::warn!("resize failed: {err}");
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    pointer.move_to(Some((position.x.max(0.0) as u32, position.y.max(0.0) as u32)));
                }
                WindowEvent::CursorLeft { .. } => {
                    pointer.move_to(None);
                }
                WindowEvent::Focused(false) => {
                    pointer.cancel_held();
                }
                WindowEvent::MouseInput {
                    state: button_state,
                    button: MouseButton::Left,
                    ..
                } => {
                    // Resolved now, not at frame time, so each event lands on the button that
                    // was under the pointer when it happened.
                    let view = game.build_view(&state, ctx.renderer.size());
                    let target = hit_test(&view, pointer.pos());
                    let phase = match button_state {
                        ElementState::Pressed => PointerPhase::Down,
                        ElementState::Released => PointerPhase::Up,
                    };
                    pointer.push(phase, target);
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let frame_input = pointer.take_frame();
                game.update_state(&mut state, frame_input, dt);

                let view = game.build_view(&state, ctx.renderer.size());
                ctx.renderer.draw_frame(|gfx| game.render(&view, gfx));
                if let Err(err) = ctx.renderer.present() {
                    log::error!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::MainEventsCleared => {
                ctx.window.request_redraw();
            }
            _ => {}
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(frame: &PointerFrame<u8>) -> Vec<(PointerPhase, Option<u8>)> {
        frame.events.iter().map(|e| (e.phase, e.target)).collect()
    }

    #[test]
    fn frame_keeps_events_in_arrival_order() {
        let mut input = PointerInput::new();
        input.push(PointerPhase::Up, Some(1));
        input.push(PointerPhase::Down, Some(2));

        let frame = input.take_frame();
        assert_eq!(
            phases(&frame),
            vec![(PointerPhase::Up, Some(1)), (PointerPhase::Down, Some(2))]
        );
        assert!(input.held);
        assert!(input.take_frame().events.is_empty());
    }

    #[test]
    fn cancel_releases_an_outstanding_press_once() {
        let mut input = PointerInput::new();
        input.push(PointerPhase::Down, Some(3));
        input.cancel_held();
        input.cancel_held();

        assert_eq!(
            phases(&input.take_frame()),
            vec![(PointerPhase::Down, Some(3)), (PointerPhase::Up, None)]
        );
        assert!(!input.held);
    }

    #[test]
    fn cancel_without_a_press_is_silent() {
        let mut input: PointerInput<u8> = PointerInput::new();
        input.move_to(Some((4, 5)));
        input.cancel_held();

        let frame = input.take_frame();
        assert!(frame.events.is_empty());
        assert_eq!(frame.pos, Some((4, 5)));
    }
}
