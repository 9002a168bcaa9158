use tracing::{info, warn};

use crate::app::{MainMenuButtonSizes, Sprite, FALLBACK_BUTTON_SIZE, FALLBACK_PAUSE_PANEL_SIZE};

use super::AssetSource;

const INTRO_PATH: &str = "intro.png";
const BACKGROUND_PATH: &str = "menu/bg_menu.jpg";
const START_PATH: &str = "menu/btn_start.png";
const LOAD_GAME_PATH: &str = "menu/btn_loadgame.png";
const OPTIONS_PATH: &str = "menu/btn_options.png";
const EXIT_PATH: &str = "menu/btn_exit.png";
const PAUSE_PATH: &str = "pause.png";
const TASK_PATH: &str = "task.png";

/// Images used by the menu and overlay screens. A `None` slot means the image
/// failed to load; it is drawn as a placeholder of the fallback size.
///
/// `intro` is loaded on its own, ahead of the rest, so the Starting screen can show it.
#[derive(Debug, Clone, Default)]
pub struct MenuArt {
    pub intro: Option<Sprite>,
    pub background: Option<Sprite>,
    pub start: Option<Sprite>,
    pub load_game: Option<Sprite>,
    pub options: Option<Sprite>,
    pub exit: Option<Sprite>,
    pub pause: Option<Sprite>,
    pub task: Option<Sprite>,
}

impl MenuArt {
    /// Loads every slot except `intro`; failures are logged and never returned.
    pub fn load(source: &AssetSource) -> Self {
        let art = Self {
            intro: None,
            background: load_or_warn(source, BACKGROUND_PATH),
            start: load_or_warn(source, START_PATH),
            load_game: load_or_warn(source, LOAD_GAME_PATH),
            options: load_or_warn(source, OPTIONS_PATH),
            exit: load_or_warn(source, EXIT_PATH),
            pause: load_or_warn(source, PAUSE_PATH),
            task: load_or_warn(source, TASK_PATH),
        };
        info!(
            root = %source.root().display(),
            missing = art.missing_count(),
            "content_loaded"
        );
        art
    }

    pub fn load_intro(source: &AssetSource) -> Option<Sprite> {
        load_or_warn(source, INTRO_PATH)
    }

    /// Missing menu slots, not counting `intro`.
    pub fn missing_count(&self) -> usize {
        [
            &self.background,
            &self.start,
            &self.load_game,
            &self.options,
            &self.exit,
            &self.pause,
            &self.task,
        ]
        .iter()
        .filter(|slot| slot.is_none())
        .count()
    }

    pub fn button_sizes(&self) -> MainMenuButtonSizes {
        MainMenuButtonSizes {
            start: size_or(&self.start, FALLBACK_BUTTON_SIZE),
            load_game: size_or(&self.load_game, FALLBACK_BUTTON_SIZE),
            options: size_or(&self.options, FALLBACK_BUTTON_SIZE),
            exit: size_or(&self.exit, FALLBACK_BUTTON_SIZE),
        }
    }

    pub fn pause_panel_size(&self) -> (i32, i32) {
        size_or(&self.pause, FALLBACK_PAUSE_PANEL_SIZE)
    }
}

fn size_or(sprite: &Option<Sprite>, fallback: (i32, i32)) -> (i32, i32) {
    sprite.as_ref().map_or(fallback, Sprite::size)
}

fn load_or_warn(source: &AssetSource, logical: &str) -> Option<Sprite> {
    match source.load_sprite(logical) {
        Ok(sprite) => Some(sprite),
        Err(error) => {
            warn!(asset = logical, error = %error, "asset_load_failed");
            None
        }
    }
}

/// Supplies the intro image when frame dimensions are captured, and the rest of the
/// menu art when the Starting state runs content loading.
pub trait ContentLoader {
    fn load_intro(&mut self) -> Option<Sprite>;

    fn load_content(&mut self) -> MenuArt;
}

impl ContentLoader for AssetSource {
    fn load_intro(&mut self) -> Option<Sprite> {
        MenuArt::load_intro(self)
    }

    fn load_content(&mut self) -> MenuArt {
        MenuArt::load(self)
    }
}
