use std::fmt;

use tracing::info;

use super::input::Key;
use super::menu::MenuButton;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Starting,
    Visualizing,
    ContentLoading,
    MainMenu,
    LoadGame,
    Options,
    Pause,
    Playing,
    GameOver,
    Destroyed,
}

impl GameState {
    pub const ALL: [GameState; 10] = [
        GameState::Starting,
        GameState::Visualizing,
        GameState::ContentLoading,
        GameState::MainMenu,
        GameState::LoadGame,
        GameState::Options,
        GameState::Pause,
        GameState::Playing,
        GameState::GameOver,
        GameState::Destroyed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GameState::Starting => "STARTING",
            GameState::Visualizing => "VISUALIZING",
            GameState::ContentLoading => "GAME_CONTENT_LOADING",
            GameState::MainMenu => "MAIN_MENU",
            GameState::LoadGame => "LOADGAME",
            GameState::Options => "OPTIONS",
            GameState::Pause => "PAUSE",
            GameState::Playing => "PLAYING",
            GameState::GameOver => "GAMEOVER",
            GameState::Destroyed => "DESTROYED",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything that can drive a transition. `Tick` is delivered once per loop
/// iteration after released keys have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    Tick,
    FrameStabilized,
    MenuSelected(MenuButton),
    KeyReleased(Key),
    PlayerDefeated,
}

/// Side effect the controller performs for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    AccumulateVisualizing,
    CaptureDimensions,
    LoadContent,
    NewGame,
    RestartGame,
    AdvanceSimulation,
    SaveGame,
    CooperativeYield,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: GameState,
    pub effect: Effect,
}

impl Transition {
    const fn to(next: GameState, effect: Effect) -> Self {
        Self { next, effect }
    }

    const fn stay(state: GameState) -> Self {
        Self::to(state, Effect::None)
    }
}

/// The state table. Pairs without a rule leave the state unchanged.
pub fn transition(state: GameState, pre_state: GameState, event: StateEvent) -> Transition {
    use GameState as S;
    use StateEvent as E;

    match (state, event) {
        (S::Visualizing, E::FrameStabilized) => Transition::to(S::Starting, Effect::CaptureDimensions),
        (S::Visualizing, E::Tick) => Transition::to(S::Visualizing, Effect::AccumulateVisualizing),

        (S::Starting, E::Tick) => Transition::to(S::MainMenu, Effect::LoadContent),

        (S::MainMenu, E::MenuSelected(MenuButton::Start)) => {
            Transition::to(S::Playing, Effect::NewGame)
        }
        (S::MainMenu, E::MenuSelected(MenuButton::LoadGame)) => Transition::stay(S::LoadGame),
        (S::MainMenu, E::MenuSelected(MenuButton::Options)) => Transition::stay(S::Options),
        (S::MainMenu, E::MenuSelected(MenuButton::Exit)) => {
            Transition::to(S::Destroyed, Effect::Exit)
        }
        (S::MainMenu, E::KeyReleased(Key::Escape)) => Transition::to(S::Destroyed, Effect::Exit),

        (S::LoadGame, E::Tick) => Transition::to(S::Playing, Effect::NewGame),

        (S::Playing, E::Tick) => Transition::to(S::Playing, Effect::AdvanceSimulation),
        (S::Playing, E::KeyReleased(Key::Escape)) => Transition::stay(S::Pause),
        (S::Playing, E::PlayerDefeated) => Transition::stay(S::GameOver),

        (S::Pause, E::MenuSelected(MenuButton::Resume)) => Transition::stay(S::Playing),
        (S::Pause, E::MenuSelected(MenuButton::Save)) => Transition::to(S::Pause, Effect::SaveGame),
        (S::Pause, E::MenuSelected(MenuButton::PauseOptions)) => Transition::stay(S::Options),
        (S::Pause, E::MenuSelected(MenuButton::MainMenu)) => {
            Transition::to(S::MainMenu, Effect::CooperativeYield)
        }
        (S::Pause, E::KeyReleased(Key::Escape)) => Transition::stay(S::Playing),

        (S::Options, E::KeyReleased(Key::Escape)) => Transition::stay(pre_state),

        (S::GameOver, E::KeyReleased(Key::Escape)) => Transition::stay(S::MainMenu),
        (S::GameOver, E::KeyReleased(Key::Space | Key::Enter)) => {
            Transition::to(S::Playing, Effect::RestartGame)
        }

        _ => Transition::stay(state),
    }
}

/// Current and return-to state, owned by the loop controller.
#[derive(Debug, Clone)]
pub struct StateMachine {
    current: GameState,
    pre_state: GameState,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            current: GameState::Visualizing,
            pre_state: GameState::MainMenu,
        }
    }

    pub fn current(&self) -> GameState {
        self.current
    }

    pub fn pre_state(&self) -> GameState {
        self.pre_state
    }

    pub fn is_terminal(&self) -> bool {
        self.current == GameState::Destroyed
    }

    /// Runs the table for `event` and returns the effect to perform.
    /// Entering Options from another state records where Escape returns to.
    pub fn apply(&mut self, event: StateEvent) -> Transition {
        if self.is_terminal() {
            return Transition::stay(GameState::Destroyed);
        }
        let outcome = transition(self.current, self.pre_state, event);
        if outcome.next == GameState::Options && self.current != GameState::Options {
            self.pre_state = self.current;
        }
        if outcome.next != self.current {
            info!(
                from = %self.current,
                to = %outcome.next,
                event = ?event,
                "state_changed"
            );
            self.current = outcome.next;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_BUTTONS: [MenuButton; 8] = [
        MenuButton::Start,
        MenuButton::LoadGame,
        MenuButton::Options,
        MenuButton::Exit,
        MenuButton::Resume,
        MenuButton::Save,
        MenuButton::PauseOptions,
        MenuButton::MainMenu,
    ];

    const ALL_KEYS: [Key; 12] = [
        Key::Escape,
        Key::Space,
        Key::Enter,
        Key::Q,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
    ];

    fn all_events() -> Vec<StateEvent> {
        let mut events = vec![
            StateEvent::Tick,
            StateEvent::FrameStabilized,
            StateEvent::PlayerDefeated,
        ];
        events.extend(ALL_BUTTONS.iter().map(|b| StateEvent::MenuSelected(*b)));
        events.extend(ALL_KEYS.iter().map(|k| StateEvent::KeyReleased(*k)));
        events
    }

    fn has_rule(state: GameState, event: StateEvent) -> bool {
        use GameState as S;
        use StateEvent as E;
        matches!(
            (state, event),
            (S::Visualizing, E::FrameStabilized | E::Tick)
                | (S::Starting, E::Tick)
                | (
                    S::MainMenu,
                    E::MenuSelected(
                        MenuButton::Start
                            | MenuButton::LoadGame
                            | MenuButton::Options
                            | MenuButton::Exit
                    ) | E::KeyReleased(Key::Escape)
                )
                | (S::LoadGame, E::Tick)
                | (
                    S::Playing,
                    E::Tick | E::KeyReleased(Key::Escape) | E::PlayerDefeated
                )
                | (
                    S::Pause,
                    E::MenuSelected(
                        MenuButton::Resume
                            | MenuButton::Save
                            | MenuButton::PauseOptions
                            | MenuButton::MainMenu
                    ) | E::KeyReleased(Key::Escape)
                )
                | (S::Options, E::KeyReleased(Key::Escape))
                | (
                    S::GameOver,
                    E::KeyReleased(Key::Escape | Key::Space | Key::Enter)
                )
        )
    }

    #[test]
    fn unmatched_inputs_never_change_state() {
        for state in GameState::ALL {
            for event in all_events() {
                if has_rule(state, event) {
                    continue;
                }
                let outcome = transition(state, GameState::MainMenu, event);
                assert_eq!(outcome.next, state, "{state} changed on {event:?}");
                assert_eq!(outcome.effect, Effect::None, "{state} effect on {event:?}");
            }
        }
    }

    #[test]
    fn machine_starts_visualizing() {
        let machine = StateMachine::new();
        assert_eq!(machine.current(), GameState::Visualizing);
    }

    #[test]
    fn boot_sequence_reaches_main_menu() {
        let mut machine = StateMachine::new();
        assert_eq!(machine.apply(StateEvent::Tick).effect, Effect::AccumulateVisualizing);
        assert_eq!(
            machine.apply(StateEvent::FrameStabilized).effect,
            Effect::CaptureDimensions
        );
        assert_eq!(machine.current(), GameState::Starting);
        assert_eq!(machine.apply(StateEvent::Tick).effect, Effect::LoadContent);
        assert_eq!(machine.current(), GameState::MainMenu);
    }

    fn machine_in(state: GameState) -> StateMachine {
        StateMachine {
            current: state,
            pre_state: GameState::MainMenu,
        }
    }

    #[test]
    fn options_from_pause_returns_to_pause() {
        let mut machine = machine_in(GameState::Pause);
        machine.apply(StateEvent::MenuSelected(MenuButton::PauseOptions));
        assert_eq!(machine.current(), GameState::Options);
        assert_eq!(machine.pre_state(), GameState::Pause);

        machine.apply(StateEvent::KeyReleased(Key::Escape));
        assert_eq!(machine.current(), GameState::Pause);
    }

    #[test]
    fn options_from_main_menu_returns_to_main_menu() {
        let mut machine = machine_in(GameState::Pause);
        machine.apply(StateEvent::MenuSelected(MenuButton::PauseOptions));
        machine.apply(StateEvent::KeyReleased(Key::Escape));
        machine.apply(StateEvent::MenuSelected(MenuButton::MainMenu));
        assert_eq!(machine.current(), GameState::MainMenu);

        machine.apply(StateEvent::MenuSelected(MenuButton::Options));
        assert_eq!(machine.pre_state(), GameState::MainMenu);
        machine.apply(StateEvent::KeyReleased(Key::Escape));
        assert_eq!(machine.current(), GameState::MainMenu);
    }

    #[test]
    fn game_over_keys() {
        let mut machine = machine_in(GameState::GameOver);
        let outcome = machine.apply(StateEvent::KeyReleased(Key::Enter));
        assert_eq!(outcome, Transition::to(GameState::Playing, Effect::RestartGame));

        let mut machine = machine_in(GameState::GameOver);
        let outcome = machine.apply(StateEvent::KeyReleased(Key::Space));
        assert_eq!(outcome.effect, Effect::RestartGame);

        let mut machine = machine_in(GameState::GameOver);
        machine.apply(StateEvent::KeyReleased(Key::Escape));
        assert_eq!(machine.current(), GameState::MainMenu);
    }

    #[test]
    fn pause_menu_actions() {
        let save = transition(
            GameState::Pause,
            GameState::MainMenu,
            StateEvent::MenuSelected(MenuButton::Save),
        );
        assert_eq!(save, Transition::to(GameState::Pause, Effect::SaveGame));

        let leave = transition(
            GameState::Pause,
            GameState::MainMenu,
            StateEvent::MenuSelected(MenuButton::MainMenu),
        );
        assert_eq!(
            leave,
            Transition::to(GameState::MainMenu, Effect::CooperativeYield)
        );
    }

    #[test]
    fn escape_from_main_menu_exits() {
        let mut machine = machine_in(GameState::MainMenu);
        let outcome = machine.apply(StateEvent::KeyReleased(Key::Escape));
        assert_eq!(outcome.effect, Effect::Exit);
        assert!(machine.is_terminal());
    }

    #[test]
    fn destroyed_is_not_resumable() {
        let mut machine = machine_in(GameState::Destroyed);
        for event in all_events() {
            let outcome = machine.apply(event);
            assert_eq!(outcome.effect, Effect::None);
            assert_eq!(machine.current(), GameState::Destroyed);
        }
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(GameState::MainMenu.to_string(), "MAIN_MENU");
        assert_eq!(GameState::ContentLoading.to_string(), "GAME_CONTENT_LOADING");
    }
}
