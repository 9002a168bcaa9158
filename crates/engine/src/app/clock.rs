use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_TARGET_TPS: u32 = 60;
pub const DEFAULT_MIN_SLEEP: Duration = Duration::from_millis(10);
pub const DEFAULT_VISUALIZING_MIN: Duration = Duration::from_secs(1);

/// Fixed-period tick pacing plus the simulation-time counter.
///
/// Simulation time only grows through [`FrameClock::advance_to`] and
/// [`FrameClock::advance_sim_time`]; the controller calls those from the Playing
/// state alone. It never decreases except through [`FrameClock::reset_sim_time`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    update_period: Duration,
    min_sleep: Duration,
    last_sample: Instant,
    sim_time: Duration,
}

impl FrameClock {
    pub fn new(target_tps: u32, min_sleep: Duration, now: Instant) -> Self {
        Self {
            update_period: update_period_for(target_tps),
            min_sleep,
            last_sample: now,
            sim_time: Duration::ZERO,
        }
    }

    pub fn sample(&self) -> Instant {
        Instant::now()
    }

    pub fn elapsed_since(&self, prior: Instant) -> Duration {
        self.sample().saturating_duration_since(prior)
    }

    pub fn update_period(&self) -> Duration {
        self.update_period
    }

    pub fn min_sleep(&self) -> Duration {
        self.min_sleep
    }

    pub fn sim_time(&self) -> Duration {
        self.sim_time
    }

    pub fn last_sample(&self) -> Instant {
        self.last_sample
    }

    pub fn advance_sim_time(&mut self, delta: Duration) {
        self.sim_time = self.sim_time.saturating_add(delta);
    }

    /// Adds the wall time since the previous anchor and re-anchors at `now`.
    pub fn advance_to(&mut self, now: Instant) -> Duration {
        let delta = now.saturating_duration_since(self.last_sample);
        self.advance_sim_time(delta);
        self.last_sample = now;
        delta
    }

    pub fn reanchor(&mut self, now: Instant) {
        self.last_sample = now;
    }

    pub fn reset_sim_time(&mut self, now: Instant) {
        self.sim_time = Duration::ZERO;
        self.last_sample = now;
    }

    /// Residual sleep after a tick body that took `time_taken`.
    ///
    /// Never below `min_sleep`, even when the tick overran the period. Missed
    /// ticks are not replayed.
    pub fn pacing_sleep(&self, time_taken: Duration) -> Duration {
        self.update_period
            .saturating_sub(time_taken)
            .max(self.min_sleep)
    }

    /// Sleeps out the remainder of the tick that began at `tick_start` and
    /// returns how long it slept.
    pub fn pace_tick(&self, tick_start: Instant) -> Duration {
        let sleep = self.pacing_sleep(self.elapsed_since(tick_start));
        thread::sleep(sleep);
        sleep
    }
}

fn update_period_for(target_tps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / target_tps.max(1) as f64)
}

/// Time spent waiting for the host window to settle before content loads.
#[derive(Debug, Clone)]
pub struct VisualizingTimer {
    elapsed: Duration,
    last_sample: Instant,
    required: Duration,
}

impl VisualizingTimer {
    pub fn new(required: Duration, now: Instant) -> Self {
        Self {
            elapsed: Duration::ZERO,
            last_sample: now,
            required,
        }
    }

    pub fn accumulate(&mut self, now: Instant) {
        self.elapsed = self
            .elapsed
            .saturating_add(now.saturating_duration_since(self.last_sample));
        self.last_sample = now;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn ready(&self, frame_width: u32) -> bool {
        frame_width > 1 && self.elapsed > self.required
    }
}
