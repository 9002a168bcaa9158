fn movement_intent(input: &InputSnapshot) -> Vec2 {
    let axis = |negative: [Key; 2], positive: [Key; 2]| {
        let held = |keys: [Key; 2]| keys.iter().any(|key| input.is_down(*key));
        match (held(negative), held(positive)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    };
    Vec2::new(
        axis([Key::A, Key::Left], [Key::D, Key::Right]),
        axis([Key::W, Key::Up], [Key::S, Key::Down]),
    )
    .normalized_or_zero()
}

fn step_player(player: &mut PlayerState, intent: Vec2, dt_seconds: f32) {
    let next = player.position + intent.scaled(PLAYER_SPEED * dt_seconds);
    player.position = Vec2::new(
        next.x.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT),
        next.y.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT),
    );
}

fn step_chasers(chasers: &mut [Chaser], target: Vec2, dt_seconds: f32) {
    for chaser in chasers {
        let to_target = target - chaser.position;
        let distance = to_target.length();
        if distance <= f32::EPSILON {
            continue;
        }
        let step = (chaser.speed * dt_seconds).min(distance);
        chaser.position = chaser.position + to_target.scaled(step / distance);
    }
}

/// Applies contact damage once per invulnerability window; returns the damage dealt.
fn resolve_contacts(player: &mut PlayerState, chasers: &[Chaser], sim_time: Duration) -> u32 {
    if sim_time < player.invulnerable_until {
        return 0;
    }
    let touching = chasers
        .iter()
        .any(|chaser| (chaser.position - player.position).length() <= CONTACT_RADIUS);
    if !touching {
        return 0;
    }
    player.health = player.health.saturating_sub(CONTACT_DAMAGE);
    player.invulnerable_until = sim_time + INVULNERABILITY;
    CONTACT_DAMAGE
}

impl Spawner {
    fn interval(&self) -> Duration {
        SPAWN_INTERVAL
            .saturating_sub(SPAWN_INTERVAL_STEP * self.spawned)
            .max(MIN_SPAWN_INTERVAL)
    }

    /// Position of the next chaser when one is due at `sim_time`.
    fn poll(&mut self, sim_time: Duration, alive: usize, around: Vec2) -> Option<Chaser> {
        if sim_time < self.next_spawn_at || alive >= MAX_CHASERS {
            return None;
        }
        let angle = self.spawned as f32 * SPAWN_ANGLE_STEP_RADIANS;
        let offset = Vec2::new(angle.cos(), angle.sin()).scaled(SPAWN_RING_RADIUS);
        let speed = (CHASER_BASE_SPEED + CHASER_SPEED_STEP * self.spawned as f32)
            .min(CHASER_MAX_SPEED);
        self.next_spawn_at = sim_time + self.interval();
        self.spawned = self.spawned.saturating_add(1);
        Some(Chaser {
            position: around + offset,
            speed,
        })
    }
}
