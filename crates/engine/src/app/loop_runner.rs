use std::sync::Arc;
use std::time::Instant;

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::assets::AssetSource;
use crate::config::LoopConfig;
use crate::{resolve_app_paths, StartupError};

use super::controller::{GameLoopController, TickOutcome};
use super::game::GameFactory;
use super::geometry::Point;
use super::input::{InputSnapshot, Key, KeyStates};
use super::metrics::MetricsAccumulator;
use super::{MetricsHandle, Renderer};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Runs the window and the fixed-tick loop until the controller reaches Destroyed or the
/// window closes. Each metrics snapshot is published to `metrics_handle`.
pub fn run_app_with_metrics(
    config: LoopConfig,
    factory: GameFactory,
    metrics_handle: MetricsHandle,
) -> Result<(), AppError> {
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        assets_dir = %app_paths.assets_dir.display(),
        "startup"
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window)).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let start = Instant::now();
    let mut controller = GameLoopController::new(
        &config,
        factory,
        Box::new(AssetSource::new(app_paths.assets_dir)),
        start,
    );
    let (width, height) = renderer.size();
    let mut input_collector = InputCollector::new(width, height);
    let mut metrics_accumulator = MetricsAccumulator::new(
        config.metrics_log_interval(),
        controller.update_period(),
        start,
    );

    info!(
        target_tps = config.target_tps(),
        min_sleep_ms = config.min_sleep().as_millis() as u64,
        visualizing_min_ms = config.visualizing_min().as_millis() as u64,
        menu_exit_delay_ms = config.menu_exit_delay().as_millis() as u64,
        metrics_log_interval_ms = config.metrics_log_interval().as_millis() as u64,
        "loop_config"
    );

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    input_collector.set_window_size(new_size.width, new_size.height);
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    input_collector.set_window_size(size.width, size.height);
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input_collector.set_cursor_position(position.x, position.y);
                }
                WindowEvent::CursorLeft { .. } => {
                    input_collector.clear_cursor_position();
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                }
                WindowEvent::RedrawRequested => {
                    let tick_start = Instant::now();
                    let input = input_collector.snapshot_for_tick();
                    let outcome = controller.tick(&input, tick_start);

                    if let Err(error) =
                        renderer.draw_frame(|canvas| controller.render(canvas, &input))
                    {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }

                    if outcome == TickOutcome::Exit {
                        info!(reason = "destroyed", "shutdown_requested");
                        window_target.exit();
                    } else {
                        let busy = tick_start.elapsed();
                        let sleep = controller.pace_tick(tick_start);
                        metrics_accumulator.record_tick(busy, sleep);
                        if let Some(snapshot) = metrics_accumulator.maybe_snapshot(Instant::now())
                        {
                            metrics_handle.publish(snapshot);
                            info!(
                                tps = snapshot.tps,
                                busy_time_ms = snapshot.busy_time_ms,
                                sleep_time_ms = snapshot.sleep_time_ms,
                                overruns = snapshot.overruns,
                                state = %controller.state(),
                                "loop_metrics"
                            );
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!(state = %controller.state(), "shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Latches host input between ticks.
#[derive(Debug, Default)]
struct InputCollector {
    keys: KeyStates,
    released: Vec<Key>,
    primary_down: bool,
    cursor: Option<Point>,
    window_width: u32,
    window_height: u32,
}

impl InputCollector {
    fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            ..Self::default()
        }
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        if key_event.repeat {
            return;
        }
        if let Some(key) = key_from_physical(key_event.physical_key) {
            self.handle_key_state(key, key_event.state);
        }
    }

    fn handle_key_state(&mut self, key: Key, state: ElementState) {
        match state {
            ElementState::Pressed => self.keys.set(key, true),
            ElementState::Released => {
                self.keys.set(key, false);
                self.released.push(key);
            }
        }
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.primary_down = state == ElementState::Pressed;
        }
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.cursor = Some(Point::new(x.round() as i32, y.round() as i32));
    }

    fn clear_cursor_position(&mut self) {
        self.cursor = None;
    }

    /// Levels are copied; queued releases are drained.
    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        InputSnapshot::new(
            self.keys,
            std::mem::take(&mut self.released),
            self.primary_down,
            self.cursor,
            self.window_width,
            self.window_height,
        )
    }
}

fn key_from_physical(key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        _ => return None,
    };
    Some(key)
}
