use std::time::Duration;

use rpg_engine::{Canvas, Game, GameFactory, GameStatus, InputSnapshot, Key, Point, Rect, Rgba};
use tracing::{debug, info};

const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 0.0);
const PLAYER_MAX_HEALTH: u32 = 100;
const PLAYER_SPEED: f32 = 240.0;
const PLAYER_SIZE: i32 = 28;
const ARENA_HALF_EXTENT: f32 = 1200.0;
const CHASER_SIZE: i32 = 24;
const CHASER_BASE_SPEED: f32 = 110.0;
const CHASER_SPEED_STEP: f32 = 6.0;
const CHASER_MAX_SPEED: f32 = 220.0;
const MAX_CHASERS: usize = 12;
const CONTACT_RADIUS: f32 = 26.0;
const CONTACT_DAMAGE: u32 = 20;
const INVULNERABILITY: Duration = Duration::from_millis(800);
const FIRST_SPAWN_AT: Duration = Duration::from_secs(1);
const SPAWN_INTERVAL: Duration = Duration::from_secs(3);
const SPAWN_INTERVAL_STEP: Duration = Duration::from_millis(150);
const MIN_SPAWN_INTERVAL: Duration = Duration::from_secs(1);
const SPAWN_RING_RADIUS: f32 = 520.0;
const SPAWN_ANGLE_STEP_RADIANS: f32 = 2.399_963;
const MAX_STEP: Duration = Duration::from_millis(250);
const GRID_SPACING: i32 = 64;
const HEALTH_BAR_WIDTH: i32 = 40;
const HUD_TEXT_SCALE: i32 = 3;

const GRID_COLOR: Rgba = [28, 32, 40, 255];
const ARENA_BORDER_COLOR: Rgba = [150, 120, 70, 255];
const PLAYER_COLOR: Rgba = [220, 220, 235, 255];
const CHASER_COLOR: Rgba = [200, 48, 48, 255];
const HEALTH_BAR_BACK_COLOR: Rgba = [60, 20, 20, 255];
const HEALTH_BAR_COLOR: Rgba = [80, 200, 90, 255];
const CROSSHAIR_COLOR: Rgba = [255, 255, 255, 255];
const HUD_TEXT_COLOR: Rgba = [210, 210, 210, 255];

include!("types.rs");
include!("systems.rs");
include!("arena.rs");

pub(crate) fn build_game_factory() -> GameFactory {
    Box::new(|| -> Box<dyn Game> { Box::new(ArenaGame::new()) })
}
