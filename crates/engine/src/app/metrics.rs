use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::warn;

static METRICS_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_metrics_lock_poison_once(operation: &'static str) {
    if METRICS_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "metrics lock poisoned; recovered inner value");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopMetricsSnapshot {
    pub tps: f32,
    /// Average time spent in tick plus render, excluding the pacing sleep.
    pub busy_time_ms: f32,
    pub sleep_time_ms: f32,
    /// Ticks whose busy time exceeded the update period.
    pub overruns: u32,
}

#[derive(Clone, Debug)]
pub struct MetricsHandle {
    snapshot: Arc<RwLock<LoopMetricsSnapshot>>,
}

impl Default for MetricsHandle {
    fn default() -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(LoopMetricsSnapshot::default())),
        }
    }
}

impl MetricsHandle {
    pub fn snapshot(&self) -> LoopMetricsSnapshot {
        match self.snapshot.read() {
            Ok(guard) => *guard,
            Err(poisoned) => {
                warn_metrics_lock_poison_once("read");
                *poisoned.into_inner()
            }
        }
    }

    pub(crate) fn publish(&self, snapshot: LoopMetricsSnapshot) {
        match self.snapshot.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => {
                warn_metrics_lock_poison_once("write");
                let mut guard = poisoned.into_inner();
                *guard = snapshot;
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    update_period: Duration,
    ticks: u32,
    overruns: u32,
    busy_sum: Duration,
    sleep_sum: Duration,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration, update_period: Duration, now: Instant) -> Self {
        Self {
            interval_start: now,
            interval,
            update_period,
            ticks: 0,
            overruns: 0,
            busy_sum: Duration::ZERO,
            sleep_sum: Duration::ZERO,
        }
    }

    pub(crate) fn record_tick(&mut self, busy: Duration, sleep: Duration) {
        self.ticks = self.ticks.saturating_add(1);
        if busy > self.update_period {
            self.overruns = self.overruns.saturating_add(1);
        }
        self.busy_sum = self.busy_sum.saturating_add(busy);
        self.sleep_sum = self.sleep_sum.saturating_add(sleep);
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let average_ms = |sum: Duration| {
            if self.ticks == 0 {
                0.0
            } else {
                (sum.as_secs_f32() / self.ticks as f32) * 1000.0
            }
        };

        let snapshot = LoopMetricsSnapshot {
            tps: self.ticks as f32 / elapsed_seconds,
            busy_time_ms: average_ms(self.busy_sum),
            sleep_time_ms: average_ms(self.sleep_sum),
            overruns: self.overruns,
        };

        self.interval_start = now;
        self.ticks = 0;
        self.overruns = 0;
        self.busy_sum = Duration::ZERO;
        self.sleep_sum = Duration::ZERO;

        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::RwLock;
    use std::thread;

    use super::*;

    fn poison_lock(lock: &RwLock<LoopMetricsSnapshot>) {
        thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = lock.write().expect("write guard");
                    panic!("poison metrics lock");
                })
                .join();
        });
    }

    const PERIOD: Duration = Duration::from_millis(16);

    #[test]
    fn snapshot_computes_expected_values() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), PERIOD, base);

        accumulator.record_tick(Duration::from_millis(4), Duration::from_millis(12));
        accumulator.record_tick(Duration::from_millis(6), Duration::from_millis(10));
        accumulator.record_tick(Duration::from_millis(20), Duration::from_millis(10));
        accumulator.record_tick(Duration::from_millis(10), Duration::from_millis(10));

        let snapshot = accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("snapshot should be emitted");

        assert!((snapshot.tps - 4.0).abs() < 0.05);
        assert!((snapshot.busy_time_ms - 10.0).abs() < 0.001);
        assert!((snapshot.sleep_time_ms - 10.5).abs() < 0.001);
        assert_eq!(snapshot.overruns, 1);
    }

    #[test]
    fn snapshot_not_emitted_before_interval() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), PERIOD, base);
        accumulator.record_tick(Duration::from_millis(5), Duration::from_millis(11));

        assert!(accumulator
            .maybe_snapshot(base + Duration::from_millis(500))
            .is_none());
    }

    #[test]
    fn snapshot_resets_interval_counters() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1), PERIOD, base);
        accumulator.record_tick(Duration::from_millis(30), Duration::from_millis(10));
        accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("first snapshot");

        let second = accumulator
            .maybe_snapshot(base + Duration::from_secs(2))
            .expect("second snapshot");
        assert_eq!(second.tps, 0.0);
        assert_eq!(second.overruns, 0);
        assert_eq!(second.busy_time_ms, 0.0);
    }

    #[test]
    fn snapshot_recovers_after_poison_without_panic() {
        let handle = MetricsHandle::default();
        poison_lock(handle.snapshot.as_ref());

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.tps, 0.0);
        assert_eq!(snapshot.busy_time_ms, 0.0);
        assert_eq!(snapshot.overruns, 0);
    }

    #[test]
    fn publish_recovers_after_poison_without_panic() {
        let handle = MetricsHandle::default();
        poison_lock(handle.snapshot.as_ref());

        let expected = LoopMetricsSnapshot {
            tps: 58.0,
            busy_time_ms: 4.5,
            sleep_time_ms: 12.0,
            overruns: 2,
        };
        handle.publish(expected);

        let actual = handle.snapshot();
        assert_eq!(actual.tps, expected.tps);
        assert_eq!(actual.busy_time_ms, expected.busy_time_ms);
        assert_eq!(actual.overruns, expected.overruns);
    }
}
