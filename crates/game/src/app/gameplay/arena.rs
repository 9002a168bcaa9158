/// Survive in a bounded arena while chasers close in.
struct ArenaGame {
    player: PlayerState,
    chasers: Vec<Chaser>,
    spawner: Spawner,
    last_sim_time: Duration,
}

impl ArenaGame {
    fn new() -> Self {
        Self {
            player: PlayerState::spawn(),
            chasers: Vec::new(),
            spawner: Spawner::default(),
            last_sim_time: Duration::ZERO,
        }
    }

    fn draw_floor(&self, canvas: &mut Canvas<'_>) {
        // Only the grid lines inside the visible window are drawn.
        let view_origin = Point::ORIGIN - canvas.offset();
        let view = Rect::new(
            view_origin.x,
            view_origin.y,
            canvas.width() as i32,
            canvas.height() as i32,
        );
        let extent = ARENA_HALF_EXTENT as i32;
        let first_x = (view.x.max(-extent) / GRID_SPACING) * GRID_SPACING;
        let first_y = (view.y.max(-extent) / GRID_SPACING) * GRID_SPACING;
        let last_x = (view.x + view.width).min(extent);
        let last_y = (view.y + view.height).min(extent);

        let mut x = first_x;
        while x <= last_x {
            canvas.fill_rect(Rect::new(x, -extent, 1, extent * 2), GRID_COLOR);
            x += GRID_SPACING;
        }
        let mut y = first_y;
        while y <= last_y {
            canvas.fill_rect(Rect::new(-extent, y, extent * 2, 1), GRID_COLOR);
            y += GRID_SPACING;
        }
        canvas.stroke_rect(
            Rect::new(-extent, -extent, extent * 2, extent * 2),
            ARENA_BORDER_COLOR,
        );
    }

    fn draw_hud(&self, canvas: &mut Canvas<'_>) {
        let top_left = Point::ORIGIN - canvas.offset();
        let line_height = Canvas::text_height(HUD_TEXT_SCALE) + 6;
        let hud_x = top_left.x + 16;
        let hud_y = top_left.y + canvas.height() as i32 - line_height * 2 - 16;
        canvas.draw_text(
            Point::new(hud_x, hud_y),
            &format!("HP {}", self.player.health),
            HUD_TEXT_SCALE,
            HUD_TEXT_COLOR,
        );
        canvas.draw_text(
            Point::new(hud_x, hud_y + line_height),
            "WASD: MOVE  Q: TASK  ESC: PAUSE",
            HUD_TEXT_SCALE,
            HUD_TEXT_COLOR,
        );
    }
}

impl Game for ArenaGame {
    fn update(&mut self, sim_time: Duration, _cursor: Point, input: &InputSnapshot) -> GameStatus {
        let dt = sim_time
            .saturating_sub(self.last_sim_time)
            .min(MAX_STEP);
        self.last_sim_time = sim_time;
        let dt_seconds = dt.as_secs_f32();

        step_player(&mut self.player, movement_intent(input), dt_seconds);
        if let Some(chaser) = self
            .spawner
            .poll(sim_time, self.chasers.len(), self.player.position)
        {
            debug!(
                x = chaser.position.x,
                y = chaser.position.y,
                alive = self.chasers.len() + 1,
                "chaser_spawned"
            );
            self.chasers.push(chaser);
        }
        step_chasers(&mut self.chasers, self.player.position, dt_seconds);

        let damage = resolve_contacts(&mut self.player, &self.chasers, sim_time);
        if damage > 0 {
            debug!(damage, health = self.player.health, "player_hit");
        }
        if self.player.is_defeated() {
            info!(
                survived_ms = sim_time.as_millis() as u64,
                chasers = self.chasers.len(),
                "player_defeated"
            );
            return GameStatus::PlayerDefeated;
        }
        GameStatus::Running
    }

    fn draw(&self, canvas: &mut Canvas<'_>, cursor: Point) {
        self.draw_floor(canvas);

        for chaser in &self.chasers {
            canvas.fill_rect(
                Rect::centered_on(chaser.position.to_point(), CHASER_SIZE, CHASER_SIZE),
                CHASER_COLOR,
            );
        }

        let player = self.player.position.to_point();
        let blink = self.last_sim_time < self.player.invulnerable_until
            && (self.last_sim_time.as_millis() / 100) % 2 == 0;
        if !blink {
            canvas.fill_rect(
                Rect::centered_on(player, PLAYER_SIZE, PLAYER_SIZE),
                PLAYER_COLOR,
            );
        }

        let bar = Rect::new(
            player.x - HEALTH_BAR_WIDTH / 2,
            player.y - PLAYER_SIZE / 2 - 12,
            HEALTH_BAR_WIDTH,
            5,
        );
        canvas.fill_rect(bar, HEALTH_BAR_BACK_COLOR);
        let filled = HEALTH_BAR_WIDTH * self.player.health as i32 / PLAYER_MAX_HEALTH as i32;
        canvas.fill_rect(Rect::new(bar.x, bar.y, filled, bar.height), HEALTH_BAR_COLOR);

        // The cursor arrives in window space.
        let aim = cursor - canvas.offset();
        canvas.fill_rect(Rect::new(aim.x - 6, aim.y, 13, 1), CROSSHAIR_COLOR);
        canvas.fill_rect(Rect::new(aim.x, aim.y - 6, 1, 13), CROSSHAIR_COLOR);

        self.draw_hud(canvas);
    }

    fn restart(&mut self) {
        *self = Self::new();
        info!("arena_reset");
    }

    fn player_position(&self) -> Point {
        self.player.position.to_point()
    }
}
