mod clock;
mod controller;
mod game;
mod geometry;
mod input;
mod loop_runner;
mod menu;
mod metrics;
mod rendering;
mod state;

pub use clock::{
    FrameClock, VisualizingTimer, DEFAULT_MIN_SLEEP, DEFAULT_TARGET_TPS, DEFAULT_VISUALIZING_MIN,
};
pub use controller::{GameLoopController, TickOutcome};
pub use game::{Game, GameFactory, GameStatus, LogSaveHook, SaveHook};
pub use geometry::{FrameDimensions, Point, Rect};
pub use input::{InputSnapshot, Key};
pub use loop_runner::{run_app_with_metrics, AppError};
pub use menu::{
    main_menu_regions, pause_menu_regions, pause_panel_rect, CoordinateSpace, MainMenuButtonSizes,
    MenuButton, MenuHitRegion, MenuNavigator, FALLBACK_BUTTON_SIZE, FALLBACK_PAUSE_PANEL_SIZE,
    PAUSE_BUTTON_SIZE,
};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{draw_art, Canvas, Renderer, Rgba, Sprite};
pub use state::{transition, Effect, GameState, StateEvent, StateMachine, Transition};
