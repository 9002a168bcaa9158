use super::geometry::{FrameDimensions, Point, Rect};
use super::state::GameState;

pub const FALLBACK_BUTTON_SIZE: (i32, i32) = (200, 64);
pub const FALLBACK_PAUSE_PANEL_SIZE: (i32, i32) = (620, 420);
pub const PAUSE_BUTTON_SIZE: (i32, i32) = (180, 48);
const PAUSE_BUTTON_INSET_X: i32 = 220;
const PAUSE_BUTTON_OFFSETS_Y: [i32; 4] = [40, 130, 227, 320];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuButton {
    Start,
    LoadGame,
    Options,
    Exit,
    Resume,
    Save,
    PauseOptions,
    MainMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuHitRegion {
    pub button: MenuButton,
    pub rect: Rect,
    pub target: GameState,
}

impl MenuHitRegion {
    pub const fn new(button: MenuButton, rect: Rect, target: GameState) -> Self {
        Self {
            button,
            rect,
            target,
        }
    }
}

/// Which space a state's hit regions are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    Window,
    /// Regions anchored to the player; the player is drawn at `half_viewport`.
    PlayerRelative { player: Point, half_viewport: Point },
}

impl CoordinateSpace {
    pub fn to_menu_space(self, cursor: Point) -> Point {
        match self {
            CoordinateSpace::Window => cursor,
            CoordinateSpace::PlayerRelative {
                player,
                half_viewport,
            } => cursor + (player - half_viewport),
        }
    }

    /// Translation applied when drawing menu-space content onto the window.
    pub fn draw_offset(self) -> Point {
        match self {
            CoordinateSpace::Window => Point::ORIGIN,
            CoordinateSpace::PlayerRelative {
                player,
                half_viewport,
            } => half_viewport - player,
        }
    }
}

pub struct MenuNavigator;

impl MenuNavigator {
    /// First region, in list order, under the cursor while the primary button is held.
    pub fn select(
        regions: &[MenuHitRegion],
        primary_down: bool,
        cursor: Point,
        space: CoordinateSpace,
    ) -> Option<&MenuHitRegion> {
        if !primary_down {
            return None;
        }
        let point = space.to_menu_space(cursor);
        regions.iter().find(|region| region.rect.contains(point))
    }
}

/// Pixel sizes of the main-menu button art, falling back when art is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainMenuButtonSizes {
    pub start: (i32, i32),
    pub load_game: (i32, i32),
    pub options: (i32, i32),
    pub exit: (i32, i32),
}

impl Default for MainMenuButtonSizes {
    fn default() -> Self {
        Self {
            start: FALLBACK_BUTTON_SIZE,
            load_game: FALLBACK_BUTTON_SIZE,
            options: FALLBACK_BUTTON_SIZE,
            exit: FALLBACK_BUTTON_SIZE,
        }
    }
}

pub fn main_menu_regions(
    dimensions: FrameDimensions,
    sizes: MainMenuButtonSizes,
) -> Vec<MenuHitRegion> {
    let center_x = (dimensions.width / 2) as i32;
    let third_y = (dimensions.height / 3) as i32;
    let place = |button: MenuButton, dx: i32, dy: i32, size: (i32, i32), target: GameState| {
        MenuHitRegion::new(
            button,
            Rect::new(center_x + dx, third_y + dy, size.0, size.1),
            target,
        )
    };

    vec![
        place(MenuButton::Start, 0, 70, sizes.start, GameState::Playing),
        place(
            MenuButton::LoadGame,
            -17,
            165,
            sizes.load_game,
            GameState::LoadGame,
        ),
        place(
            MenuButton::Options,
            -13,
            260,
            sizes.options,
            GameState::Options,
        ),
        place(MenuButton::Exit, 13, 355, sizes.exit, GameState::Destroyed),
    ]
}

/// Pause panel centered on the player, in player-relative (world) coordinates.
pub fn pause_panel_rect(player: Point, panel_size: (i32, i32)) -> Rect {
    Rect::centered_on(player, panel_size.0, panel_size.1)
}

pub fn pause_menu_regions(player: Point, panel_size: (i32, i32)) -> Vec<MenuHitRegion> {
    let panel = pause_panel_rect(player, panel_size);
    let entries = [
        (MenuButton::Resume, GameState::Playing),
        (MenuButton::Save, GameState::Pause),
        (MenuButton::PauseOptions, GameState::Options),
        (MenuButton::MainMenu, GameState::MainMenu),
    ];

    entries
        .iter()
        .zip(PAUSE_BUTTON_OFFSETS_Y)
        .map(|(&(button, target), offset_y)| {
            MenuHitRegion::new(
                button,
                Rect::new(
                    panel.x + PAUSE_BUTTON_INSET_X,
                    panel.y + offset_y,
                    PAUSE_BUTTON_SIZE.0,
                    PAUSE_BUTTON_SIZE.1,
                ),
                target,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: FrameDimensions = FrameDimensions {
        width: 1366,
        height: 768,
    };

    fn region_for(regions: &[MenuHitRegion], button: MenuButton) -> MenuHitRegion {
        *regions
            .iter()
            .find(|region| region.button == button)
            .expect("region")
    }

    #[test]
    fn main_menu_layout_follows_frame_dimensions() {
        let regions = main_menu_regions(DIMS, MainMenuButtonSizes::default());
        let start = region_for(&regions, MenuButton::Start);
        let exit = region_for(&regions, MenuButton::Exit);

        assert_eq!(start.rect, Rect::new(683, 256 + 70, 200, 64));
        assert_eq!(exit.rect.origin(), Point::new(683 + 13, 256 + 355));
        assert_eq!(exit.target, GameState::Destroyed);
    }

    #[test]
    fn main_menu_regions_do_not_overlap() {
        let regions = main_menu_regions(DIMS, MainMenuButtonSizes::default());
        for (i, a) in regions.iter().enumerate() {
            for b in regions.iter().skip(i + 1) {
                assert!(!a.rect.intersects(&b.rect), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn click_inside_region_selects_its_target() {
        let regions = main_menu_regions(DIMS, MainMenuButtonSizes::default());
        for region in &regions {
            let hit = MenuNavigator::select(
                &regions,
                true,
                region.rect.center(),
                CoordinateSpace::Window,
            )
            .expect("hit");
            assert_eq!(hit.button, region.button);
            assert_eq!(hit.target, region.target);
        }
    }

    #[test]
    fn click_outside_all_regions_selects_nothing() {
        let regions = main_menu_regions(DIMS, MainMenuButtonSizes::default());
        assert!(
            MenuNavigator::select(&regions, true, Point::new(5, 5), CoordinateSpace::Window)
                .is_none()
        );
    }

    #[test]
    fn released_button_never_selects() {
        let regions = main_menu_regions(DIMS, MainMenuButtonSizes::default());
        let start = region_for(&regions, MenuButton::Start);
        assert!(MenuNavigator::select(
            &regions,
            false,
            start.rect.center(),
            CoordinateSpace::Window
        )
        .is_none());
    }

    #[test]
    fn overlapping_regions_resolve_in_definition_order() {
        let shared = Rect::new(0, 0, 50, 50);
        let regions = [
            MenuHitRegion::new(MenuButton::Resume, shared, GameState::Playing),
            MenuHitRegion::new(MenuButton::Save, shared, GameState::Pause),
        ];
        let hit = MenuNavigator::select(&regions, true, Point::new(10, 10), CoordinateSpace::Window)
            .expect("hit");
        assert_eq!(hit.button, MenuButton::Resume);
    }

    #[test]
    fn player_relative_cursor_is_shifted_by_camera() {
        let space = CoordinateSpace::PlayerRelative {
            player: Point::new(900, 600),
            half_viewport: Point::new(512, 384),
        };
        assert_eq!(space.to_menu_space(Point::new(512, 384)), Point::new(900, 600));
        assert_eq!(space.to_menu_space(Point::new(0, 0)), Point::new(388, 216));
        assert_eq!(space.draw_offset(), Point::new(-388, -216));
    }

    #[test]
    fn pause_regions_follow_player_position() {
        let player = Point::new(900, 600);
        let regions = pause_menu_regions(player, FALLBACK_PAUSE_PANEL_SIZE);
        let panel = pause_panel_rect(player, FALLBACK_PAUSE_PANEL_SIZE);

        let resume = region_for(&regions, MenuButton::Resume);
        assert_eq!(resume.rect, Rect::new(panel.x + 220, panel.y + 40, 180, 48));
        let main_menu = region_for(&regions, MenuButton::MainMenu);
        assert_eq!(main_menu.rect.origin(), Point::new(panel.x + 220, panel.y + 320));
        assert_eq!(main_menu.target, GameState::MainMenu);
    }

    #[test]
    fn pause_click_at_screen_position_hits_player_anchored_button() {
        let player = Point::new(2000, -300);
        let half_viewport = DIMS.half_viewport();
        let regions = pause_menu_regions(player, FALLBACK_PAUSE_PANEL_SIZE);
        let space = CoordinateSpace::PlayerRelative {
            player,
            half_viewport,
        };
        let save = region_for(&regions, MenuButton::Save);
        let on_screen = save.rect.center() + space.draw_offset();

        let hit = MenuNavigator::select(&regions, true, on_screen, space).expect("hit");
        assert_eq!(hit.button, MenuButton::Save);

        assert!(
            MenuNavigator::select(&regions, true, on_screen, CoordinateSpace::Window).is_none()
        );
    }
}
