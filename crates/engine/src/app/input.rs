use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Enter,
    Q,
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
}

const KEY_COUNT: usize = 12;

impl Key {
    const fn index(self) -> usize {
        match self {
            Key::Escape => 0,
            Key::Space => 1,
            Key::Enter => 2,
            Key::Q => 3,
            Key::W => 4,
            Key::A => 5,
            Key::S => 6,
            Key::D => 7,
            Key::Up => 8,
            Key::Down => 9,
            Key::Left => 10,
            Key::Right => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct KeyStates {
    down: [bool; KEY_COUNT],
}

impl KeyStates {
    pub(crate) fn set(&mut self, key: Key, is_down: bool) {
        self.down[key.index()] = is_down;
    }

    pub(crate) fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }
}

/// Input state sampled once at the start of a tick.
///
/// Key-down and mouse state are latched levels. `released_keys` holds the key
/// releases seen since the previous snapshot, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    keys: KeyStates,
    released: Vec<Key>,
    primary_down: bool,
    cursor: Option<Point>,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        keys: KeyStates,
        released: Vec<Key>,
        primary_down: bool,
        cursor: Option<Point>,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            keys,
            released,
            primary_down,
            cursor,
            window_width,
            window_height,
        }
    }

    pub fn with_key_down(mut self, key: Key, is_down: bool) -> Self {
        self.keys.set(key, is_down);
        self
    }

    pub fn with_key_released(mut self, key: Key) -> Self {
        self.released.push(key);
        self
    }

    pub fn with_primary_down(mut self, primary_down: bool) -> Self {
        self.primary_down = primary_down;
        self
    }

    pub fn with_cursor(mut self, cursor: Option<Point>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    pub fn released_keys(&self) -> &[Key] {
        &self.released
    }

    pub fn primary_down(&self) -> bool {
        self.primary_down
    }

    /// Cursor in window coordinates, `(0, 0)` while the cursor is outside the window.
    pub fn cursor(&self) -> Point {
        self.cursor.unwrap_or(Point::ORIGIN)
    }

    pub fn cursor_in_window(&self) -> Option<Point> {
        self.cursor
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
