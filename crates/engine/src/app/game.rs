use std::time::Duration;

use tracing::info;

use super::geometry::Point;
use super::input::InputSnapshot;
use super::rendering::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    PlayerDefeated,
}

/// Gameplay simulation driven by the loop controller.
///
/// The controller owns the only instance. It is built fresh for every new game,
/// updated only while Playing, and drawn in world coordinates: the canvas
/// offset already places `player_position` at the center of the window.
pub trait Game {
    fn update(&mut self, sim_time: Duration, cursor: Point, input: &InputSnapshot) -> GameStatus;
    fn draw(&self, canvas: &mut Canvas<'_>, cursor: Point);
    fn restart(&mut self);
    fn player_position(&self) -> Point;
}

pub type GameFactory = Box<dyn FnMut() -> Box<dyn Game>>;

pub trait SaveHook {
    fn save(&mut self, game: Option<&dyn Game>);
}

/// Saving is not implemented; the request is only logged.
#[derive(Debug, Default)]
pub struct LogSaveHook;

impl SaveHook for LogSaveHook {
    fn save(&mut self, game: Option<&dyn Game>) {
        let player = game.map(|game| game.player_position());
        info!(
            has_game = player.is_some(),
            player_x = player.map(|p| p.x),
            player_y = player.map(|p| p.y),
            "save_requested"
        );
    }
}
