use log::debug;
use std::time::Duration;

pub const DEFAULT_ROUND_SECS: f64 = 3.0;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Circumference of the countdown ring (radius 52 in the ring's own units)
pub const CIRCUMFERENCE: f64 = 2.0 * std::f64::consts::PI * 52.0;

const NORMAL_ABOVE: f64 = 0.55;
const WARNING_ABOVE: f64 = 0.28;

// Absorbs float noise in duration / interval so 3.0 / 0.05 counts as 60 ticks, not 61.
const TICK_COUNT_EPSILON: f64 = 1e-9;

type TickFn = Box<dyn FnMut(f64)>;
type ExpireFn = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerState {
    pub total: f64,
    pub remaining: f64,
    pub running: bool,
}

impl TimerState {
    fn idle(total: f64) -> Self {
        Self {
            total,
            remaining: total,
            running: false,
        }
    }
}

/// Urgency of the countdown, picked from the remaining/total ratio
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum ColorBand {
    Normal,
    Warning,
    Danger,
}

impl ColorBand {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > NORMAL_ABOVE {
            ColorBand::Normal
        } else if ratio > WARNING_ABOVE {
            ColorBand::Warning
        } else {
            ColorBand::Danger
        }
    }
}

/// Everything the render surface needs to draw the timer for one tick.
///
/// `remaining` is never rounded; `whole_secs` is the display-only ceiling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerView {
    pub remaining: f64,
    pub total: f64,
    pub ratio: f64,
    pub whole_secs: u32,
    pub band: ColorBand,
}

impl TimerView {
    pub fn new(remaining: f64, total: f64) -> Self {
        let remaining = remaining.max(0.0);
        let ratio = if total > 0.0 {
            (remaining / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            remaining,
            total,
            ratio,
            whole_secs: remaining.ceil() as u32,
            band: ColorBand::from_ratio(ratio),
        }
    }

    /// A freshly reset ring: full arc, normal colors
    pub fn full(total: f64) -> Self {
        Self::new(total, total)
    }

    /// Stroke offset of the ring arc; 0 draws the full circle
    pub fn arc_offset(&self) -> f64 {
        CIRCUMFERENCE * (1.0 - self.ratio)
    }
}

impl From<TimerState> for TimerView {
    fn from(state: TimerState) -> Self {
        TimerView::new(state.remaining, state.total)
    }
}

/// Fixed-step countdown. The host calls [`CountdownTimer::tick`] once per
/// `interval` of wall-clock time; each tick removes exactly one interval
/// from the remaining time.
pub struct CountdownTimer {
    interval: Duration,
    state: TimerState,
    ticks_elapsed: u32,
    ticks_total: u32,
    on_tick: Option<TickFn>,
    on_expire: Option<ExpireFn>,
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("interval", &self.interval)
            .field("state", &self.state)
            .field("ticks_elapsed", &self.ticks_elapsed)
            .field("ticks_total", &self.ticks_total)
            .finish_non_exhaustive()
    }
}

impl CountdownTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: TimerState::idle(0.0),
            ticks_elapsed: 0,
            ticks_total: 0,
            on_tick: None,
            on_expire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn view(&self) -> TimerView {
        self.state.into()
    }

    /// Begin a countdown, replacing any previous one. Callbacks of the
    /// replaced countdown are dropped without being called.
    pub fn start<T, E>(&mut self, duration_secs: f64, on_tick: T, on_expire: E)
    where
        T: FnMut(f64) + 'static,
        E: FnOnce() + 'static,
    {
        self.stop();

        let total = duration_secs.max(0.0);
        self.state = TimerState {
            total,
            remaining: total,
            running: true,
        };
        self.ticks_elapsed = 0;
        self.ticks_total = ticks_for(total, self.step_secs());
        self.on_tick = Some(Box::new(on_tick));
        self.on_expire = Some(Box::new(on_expire));

        debug!(
            "timer: started total={:.2}s interval={:?} ticks={}",
            total, self.interval, self.ticks_total
        );
    }

    /// Halt the countdown. Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        if self.state.running {
            debug!(
                "timer: stopped with {:.2}s remaining",
                self.state.remaining
            );
        }
        self.state.running = false;
        self.on_tick = None;
        self.on_expire = None;
    }

    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }

        self.ticks_elapsed += 1;
        // Multiplying instead of repeatedly subtracting keeps float error from piling up.
        let remaining = self.state.total - f64::from(self.ticks_elapsed) * self.step_secs();

        if self.ticks_elapsed >= self.ticks_total || remaining <= 0.0 {
            self.state.running = false;
            self.state.remaining = 0.0;
            let on_expire = self.on_expire.take();
            if let Some(mut on_tick) = self.on_tick.take() {
                on_tick(0.0);
            }
            if let Some(on_expire) = on_expire {
                debug!("timer: expired after {} ticks", self.ticks_elapsed);
                on_expire();
            }
            return;
        }

        self.state.remaining = remaining.min(self.state.remaining);
        if let Some(on_tick) = self.on_tick.as_mut() {
            on_tick(self.state.remaining);
        }
    }

    fn step_secs(&self) -> f64 {
        self.interval.as_secs_f64()
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

/// Number of ticks needed to drain `total` seconds at `step` seconds per tick
fn ticks_for(total: f64, step: f64) -> u32 {
    if step <= 0.0 {
        return 1;
    }
    ((total / step) - TICK_COUNT_EPSILON).ceil().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Recorder {
        ticks: Rc<RefCell<Vec<f64>>>,
        expirations: Rc<Cell<u32>>,
    }

    fn start_recorded(timer: &mut CountdownTimer, secs: f64) -> Recorder {
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let expirations = Rc::new(Cell::new(0));
        let t = Rc::clone(&ticks);
        let e = Rc::clone(&expirations);
        timer.start(
            secs,
            move |remaining| t.borrow_mut().push(remaining),
            move || e.set(e.get() + 1),
        );
        Recorder { ticks, expirations }
    }

    #[test]
    fn three_seconds_at_fifty_ms_is_sixty_ticks_then_expiry() {
        let mut timer = CountdownTimer::new(Duration::from_millis(50));
        let rec = start_recorded(&mut timer, 3.0);

        for _ in 0..200 {
            timer.tick();
        }

        let ticks = rec.ticks.borrow();
        assert_eq!(ticks.len(), 60);
        assert_eq!(*ticks.last().unwrap(), 0.0);
        assert_eq!(ticks.iter().filter(|&&r| r == 0.0).count(), 1);
        assert_eq!(rec.expirations.get(), 1);
        assert!(!timer.is_running());
        assert_eq!(timer.state().remaining, 0.0);
    }

    #[test]
    fn expiry_fires_on_the_tick_that_reaches_zero() {
        let mut timer = CountdownTimer::new(Duration::from_millis(50));
        let rec = start_recorded(&mut timer, 3.0);

        for _ in 0..59 {
            timer.tick();
        }
        assert_eq!(rec.expirations.get(), 0);
        assert!(timer.is_running());

        timer.tick();
        assert_eq!(rec.expirations.get(), 1);
    }

    #[test]
    fn remaining_never_increases() {
        let mut timer = CountdownTimer::new(Duration::from_millis(50));
        let rec = start_recorded(&mut timer, 1.0);
        for _ in 0..30 {
            timer.tick();
        }

        let ticks = rec.ticks.borrow();
        assert!(ticks.windows(2).all(|w| w[1] <= w[0]));
        assert!(ticks.iter().all(|&r| (0.0..=1.0).contains(&r)));
    }

    #[test]
    fn uneven_duration_rounds_tick_count_up() {
        let mut timer = CountdownTimer::new(Duration::from_millis(300));
        let rec = start_recorded(&mut timer, 1.0);
        for _ in 0..10 {
            timer.tick();
        }
        // ceil(1.0 / 0.3) = 4
        assert_eq!(rec.ticks.borrow().len(), 4);
        assert_eq!(rec.expirations.get(), 1);
    }

    #[test]
    fn stop_is_idempotent_and_silences_ticks() {
        let mut timer = CountdownTimer::new(Duration::from_millis(50));
        let rec = start_recorded(&mut timer, 3.0);

        timer.tick();
        timer.stop();
        timer.stop();
        for _ in 0..100 {
            timer.tick();
        }

        assert_eq!(rec.ticks.borrow().len(), 1);
        assert_eq!(rec.expirations.get(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn stop_before_start_is_harmless() {
        let mut timer = CountdownTimer::default();
        timer.stop();
        timer.tick();
        assert!(!timer.is_running());
    }

    #[test]
    fn restart_drops_previous_callbacks() {
        let mut timer = CountdownTimer::new(Duration::from_millis(50));
        let first = start_recorded(&mut timer, 0.1);
        timer.tick();
        let second = start_recorded(&mut timer, 0.1);

        timer.tick();
        timer.tick();

        assert_eq!(first.ticks.borrow().len(), 1);
        assert_eq!(first.expirations.get(), 0);
        assert_eq!(second.ticks.borrow().as_slice(), &[0.05, 0.0]);
        assert_eq!(second.expirations.get(), 1);
    }

    #[test]
    fn zero_duration_expires_on_first_tick() {
        let mut timer = CountdownTimer::new(Duration::from_millis(50));
        let rec = start_recorded(&mut timer, 0.0);
        timer.tick();
        assert_eq!(rec.ticks.borrow().as_slice(), &[0.0]);
        assert_eq!(rec.expirations.get(), 1);
    }

    #[test]
    fn band_thresholds_are_strict() {
        assert_eq!(ColorBand::from_ratio(1.0), ColorBand::Normal);
        assert_eq!(ColorBand::from_ratio(0.56), ColorBand::Normal);
        assert_eq!(ColorBand::from_ratio(0.55), ColorBand::Warning);
        assert_eq!(ColorBand::from_ratio(0.29), ColorBand::Warning);
        assert_eq!(ColorBand::from_ratio(0.28), ColorBand::Danger);
        assert_eq!(ColorBand::from_ratio(0.0), ColorBand::Danger);
    }

    #[test]
    fn view_rounds_up_for_display_only() {
        let view = TimerView::new(0.05, 3.0);
        assert_eq!(view.whole_secs, 1);
        assert_eq!(view.remaining, 0.05);
        assert_eq!(view.band, ColorBand::Danger);

        let view = TimerView::new(2.95, 3.0);
        assert_eq!(view.whole_secs, 3);
        assert_eq!(view.band, ColorBand::Normal);
    }

    #[test]
    fn arc_offset_tracks_ratio() {
        let full = TimerView::full(3.0);
        assert_eq!(full.arc_offset(), 0.0);
        assert_eq!(full.whole_secs, 3);
        assert_eq!(full.band, ColorBand::Normal);

        let empty = TimerView::new(0.0, 3.0);
        assert!((empty.arc_offset() - CIRCUMFERENCE).abs() < 1e-9);

        let half = TimerView::new(1.5, 3.0);
        assert!((half.arc_offset() - CIRCUMFERENCE / 2.0).abs() < 1e-9);
    }

    #[test]
    fn view_from_running_timer() {
        let mut timer = CountdownTimer::new(Duration::from_millis(500));
        let _rec = start_recorded(&mut timer, 2.0);
        timer.tick();
        let view = timer.view();
        assert_eq!(view.remaining, 1.5);
        assert_eq!(view.ratio, 0.75);
        assert_eq!(view.whole_secs, 2);
    }
}
