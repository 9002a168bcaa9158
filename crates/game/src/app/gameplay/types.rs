/// World-space position or direction, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Vec2 {
    x: f32,
    y: f32,
}

impl Vec2 {
    const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    fn normalized_or_zero(self) -> Self {
        let length = self.length();
        if length <= f32::EPSILON {
            Self::ZERO
        } else {
            self.scaled(1.0 / length)
        }
    }

    fn to_point(self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PlayerState {
    position: Vec2,
    health: u32,
    invulnerable_until: Duration,
}

impl PlayerState {
    fn spawn() -> Self {
        Self {
            position: PLAYER_SPAWN,
            health: PLAYER_MAX_HEALTH,
            invulnerable_until: Duration::ZERO,
        }
    }

    fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Chaser {
    position: Vec2,
    speed: f32,
}

/// Places chasers on a ring around the player at a shrinking interval.
#[derive(Debug, Clone, PartialEq)]
struct Spawner {
    next_spawn_at: Duration,
    spawned: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            next_spawn_at: FIRST_SPAWN_AT,
            spawned: 0,
        }
    }
}
