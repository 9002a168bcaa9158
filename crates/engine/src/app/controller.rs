use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::assets::{ContentLoader, MenuArt};
use crate::config::LoopConfig;

use super::clock::{FrameClock, VisualizingTimer};
use super::game::{Game, GameFactory, GameStatus, LogSaveHook, SaveHook};
use super::geometry::{FrameDimensions, Point, Rect};
use super::input::{InputSnapshot, Key};
use super::menu::{
    main_menu_regions, pause_menu_regions, pause_panel_rect, CoordinateSpace, MenuButton,
    MenuHitRegion, MenuNavigator, FALLBACK_PAUSE_PANEL_SIZE,
};
use super::rendering::{draw_art, Canvas, Sprite, CLEAR_COLOR, STATE_LABEL_COLOR};
use super::state::{Effect, GameState, StateEvent, StateMachine};

const STATE_LABEL_ORIGIN: Point = Point::new(4, 4);
const STATE_LABEL_SCALE: i32 = 4;
const BANNER_SCALE: i32 = 6;
const BANNER_HINT_SCALE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Exit,
}

/// Drives the state machine one tick at a time and draws whatever state it lands in.
///
/// The host calls [`GameLoopController::tick`] and then [`GameLoopController::render`]
/// back to back on the same thread, so rendering always observes a settled state.
pub struct GameLoopController {
    machine: StateMachine,
    clock: FrameClock,
    visualizing: VisualizingTimer,
    dimensions: Option<FrameDimensions>,
    game: Option<Box<dyn Game>>,
    factory: GameFactory,
    save_hook: Box<dyn SaveHook>,
    loader: Box<dyn ContentLoader>,
    art: MenuArt,
    main_menu: Vec<MenuHitRegion>,
    menu_exit_delay: Duration,
    show_state_label: bool,
}

impl GameLoopController {
    pub fn new(
        config: &LoopConfig,
        factory: GameFactory,
        loader: Box<dyn ContentLoader>,
        now: Instant,
    ) -> Self {
        Self {
            machine: StateMachine::new(),
            clock: FrameClock::new(config.target_tps(), config.min_sleep(), now),
            visualizing: VisualizingTimer::new(config.visualizing_min(), now),
            dimensions: None,
            game: None,
            factory,
            save_hook: Box::new(LogSaveHook),
            loader,
            art: MenuArt::default(),
            main_menu: Vec::new(),
            menu_exit_delay: config.menu_exit_delay(),
            show_state_label: config.show_state_label,
        }
    }

    pub fn with_save_hook(mut self, save_hook: Box<dyn SaveHook>) -> Self {
        self.save_hook = save_hook;
        self
    }

    pub fn state(&self) -> GameState {
        self.machine.current()
    }

    pub fn pre_state(&self) -> GameState {
        self.machine.pre_state()
    }

    pub fn sim_time(&self) -> Duration {
        self.clock.sim_time()
    }

    pub fn dimensions(&self) -> Option<FrameDimensions> {
        self.dimensions
    }

    pub fn game(&self) -> Option<&dyn Game> {
        self.game.as_deref()
    }

    pub fn main_menu_regions(&self) -> &[MenuHitRegion] {
        &self.main_menu
    }

    /// Pause-menu regions for the current player position, in player-relative space.
    pub fn pause_menu_regions(&self) -> Vec<MenuHitRegion> {
        pause_menu_regions(self.player_position(), self.art.pause_panel_size())
    }

    pub fn update_period(&self) -> Duration {
        self.clock.update_period()
    }

    /// Sleeps out the remainder of the current tick; returns the sleep length.
    pub fn pace_tick(&self, tick_start: Instant) -> Duration {
        self.clock.pace_tick(tick_start)
    }

    pub fn tick(&mut self, input: &InputSnapshot, now: Instant) -> TickOutcome {
        for &key in input.released_keys() {
            self.dispatch(StateEvent::KeyReleased(key), input, now);
            if self.machine.is_terminal() {
                return TickOutcome::Exit;
            }
        }

        let event = self.tick_event(input);
        self.dispatch(event, input, now);
        if self.machine.is_terminal() {
            TickOutcome::Exit
        } else {
            TickOutcome::Continue
        }
    }

    /// Resets simulation time and replaces the game with a fresh one.
    pub fn new_game(&mut self, now: Instant) {
        self.clock.reset_sim_time(now);
        self.game = Some((self.factory)());
        info!("new_game");
    }

    pub fn restart_game(&mut self, now: Instant) {
        self.clock.reset_sim_time(now);
        match self.game.as_mut() {
            Some(game) => {
                game.restart();
                info!("game_restarted");
            }
            None => self.new_game(now),
        }
    }

    fn dispatch(&mut self, event: StateEvent, input: &InputSnapshot, now: Instant) {
        let before = self.machine.current();
        let transition = self.machine.apply(event);
        if before != GameState::Playing && transition.next == GameState::Playing {
            // Time spent outside Playing never reaches the simulation.
            self.clock.reanchor(now);
        }
        self.perform(transition.effect, input, now);
    }

    fn tick_event(&self, input: &InputSnapshot) -> StateEvent {
        match self.machine.current() {
            GameState::Visualizing if self.visualizing.ready(input.window_size().0) => {
                StateEvent::FrameStabilized
            }
            GameState::MainMenu => menu_event(&self.main_menu, input, CoordinateSpace::Window),
            GameState::Pause => {
                let regions = self.pause_menu_regions();
                menu_event(&regions, input, self.player_space(input))
            }
            _ => StateEvent::Tick,
        }
    }

    fn perform(&mut self, effect: Effect, input: &InputSnapshot, now: Instant) {
        match effect {
            Effect::None => {}
            Effect::AccumulateVisualizing => self.visualizing.accumulate(now),
            Effect::CaptureDimensions => {
                let (width, height) = input.window_size();
                self.dimensions = Some(FrameDimensions { width, height });
                self.art.intro = self.loader.load_intro();
                self.rebuild_main_menu();
                info!(
                    width,
                    height,
                    visualizing_ms = self.visualizing.elapsed().as_millis() as u64,
                    "frame_dimensions_captured"
                );
            }
            Effect::LoadContent => {
                let intro = self.art.intro.take();
                self.art = MenuArt {
                    intro,
                    ..self.loader.load_content()
                };
                self.rebuild_main_menu();
            }
            Effect::NewGame => self.new_game(now),
            Effect::RestartGame => self.restart_game(now),
            Effect::AdvanceSimulation => self.advance_simulation(input, now),
            Effect::SaveGame => self.save_hook.save(self.game.as_deref()),
            Effect::CooperativeYield => thread::sleep(self.menu_exit_delay),
            Effect::Exit => info!(
                sim_time_ms = self.clock.sim_time().as_millis() as u64,
                "exit_requested"
            ),
        }
    }

    fn advance_simulation(&mut self, input: &InputSnapshot, now: Instant) {
        self.clock.advance_to(now);
        let sim_time = self.clock.sim_time();
        if self.game.is_none() {
            warn!("game_built_lazily");
            self.game = Some((self.factory)());
        }
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if game.update(sim_time, input.cursor(), input) == GameStatus::PlayerDefeated {
            self.dispatch(StateEvent::PlayerDefeated, input, now);
        }
    }

    fn rebuild_main_menu(&mut self) {
        if let Some(dimensions) = self.dimensions {
            self.main_menu = main_menu_regions(dimensions, self.art.button_sizes());
        }
    }

    fn player_position(&self) -> Point {
        self.game
            .as_deref()
            .map_or(Point::ORIGIN, |game| game.player_position())
    }

    fn player_space(&self, input: &InputSnapshot) -> CoordinateSpace {
        let half_viewport = match self.dimensions {
            Some(dimensions) => dimensions.half_viewport(),
            None => {
                let (width, height) = input.window_size();
                FrameDimensions { width, height }.half_viewport()
            }
        };
        CoordinateSpace::PlayerRelative {
            player: self.player_position(),
            half_viewport,
        }
    }

    pub fn render(&self, canvas: &mut Canvas<'_>, input: &InputSnapshot) {
        canvas.clear(CLEAR_COLOR);
        match self.machine.current() {
            GameState::Starting => {
                if let Some(intro) = self.art.intro.as_ref() {
                    canvas.draw_sprite(intro, Point::ORIGIN);
                }
            }
            GameState::ContentLoading | GameState::MainMenu => self.draw_main_menu(canvas),
            GameState::Playing => self.draw_world(canvas, input, |canvas, player| {
                if input.is_down(Key::Q) {
                    let size = sprite_size_or(self.art.task.as_ref(), FALLBACK_PAUSE_PANEL_SIZE);
                    let slot = Rect::centered_on(player, size.0, size.1);
                    draw_art(canvas, self.art.task.as_ref(), slot);
                }
            }),
            GameState::GameOver => self.draw_world(canvas, input, |canvas, player| {
                canvas.draw_text(
                    Point::new(player.x - 20, player.y - 20 - Canvas::text_height(BANNER_SCALE)),
                    "YOU LOSE",
                    BANNER_SCALE,
                    STATE_LABEL_COLOR,
                );
                canvas.draw_text(
                    Point::new(player.x - 40, player.y + 10),
                    "ESC: MENU  SPACE: RETRY",
                    BANNER_HINT_SCALE,
                    STATE_LABEL_COLOR,
                );
            }),
            GameState::Pause => self.draw_world(canvas, input, |canvas, player| {
                let panel_size = self.art.pause_panel_size();
                draw_art(
                    canvas,
                    self.art.pause.as_ref(),
                    pause_panel_rect(player, panel_size),
                );
                for region in pause_menu_regions(player, panel_size) {
                    canvas.stroke_rect(region.rect, STATE_LABEL_COLOR);
                }
            }),
            GameState::Visualizing
            | GameState::LoadGame
            | GameState::Options
            | GameState::Destroyed => {}
        }

        if self.show_state_label {
            canvas.draw_text(
                STATE_LABEL_ORIGIN,
                self.machine.current().label(),
                STATE_LABEL_SCALE,
                STATE_LABEL_COLOR,
            );
        }
    }

    fn draw_main_menu(&self, canvas: &mut Canvas<'_>) {
        if let Some(background) = self.art.background.as_ref() {
            let full = Rect::new(0, 0, canvas.width() as i32, canvas.height() as i32);
            canvas.draw_sprite_scaled(background, full);
        }
        for region in &self.main_menu {
            draw_art(canvas, self.button_art(region.button), region.rect);
        }
    }

    fn button_art(&self, button: MenuButton) -> Option<&Sprite> {
        match button {
            MenuButton::Start => self.art.start.as_ref(),
            MenuButton::LoadGame => self.art.load_game.as_ref(),
            MenuButton::Options => self.art.options.as_ref(),
            MenuButton::Exit => self.art.exit.as_ref(),
            MenuButton::Resume | MenuButton::Save | MenuButton::PauseOptions | MenuButton::MainMenu => {
                None
            }
        }
    }

    /// Draws the game in world space with the player at the window center, then `overlay`
    /// in the same space.
    fn draw_world<F>(&self, canvas: &mut Canvas<'_>, input: &InputSnapshot, overlay: F)
    where
        F: FnOnce(&mut Canvas<'_>, Point),
    {
        let Some(game) = self.game.as_deref() else {
            return;
        };
        let player = game.player_position();
        let offset = self.player_space(input).draw_offset();
        canvas.with_offset(offset, |canvas| {
            game.draw(canvas, input.cursor());
            overlay(canvas, player);
        });
    }
}

fn menu_event(
    regions: &[MenuHitRegion],
    input: &InputSnapshot,
    space: CoordinateSpace,
) -> StateEvent {
    match MenuNavigator::select(regions, input.primary_down(), input.cursor(), space) {
        Some(region) => {
            debug!(button = ?region.button, target = %region.target, "menu_selected");
            StateEvent::MenuSelected(region.button)
        }
        None => StateEvent::Tick,
    }
}

fn sprite_size_or(sprite: Option<&Sprite>, fallback: (i32, i32)) -> (i32, i32) {
    sprite.map_or(fallback, Sprite::size)
}
