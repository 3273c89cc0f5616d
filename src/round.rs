//! Round lifecycle: `Idle -> WordChosen -> Armed -> {Answered | TimedOut}`.
//!
//! Every round gets a fresh [`RoundId`]. Timer callbacks are tagged with the id
//! they were armed under and queued; when the queue is drained, anything from
//! a superseded round is dropped. Answering and expiring are both terminal, so
//! whichever is handled first wins and the other becomes a no-op.

use crate::error::{GameError, Result};
use crate::fit::{FitResult, TextMeasure, WordDisplay};
use crate::timer::{
    CountdownTimer, TimerState, TimerView, DEFAULT_ROUND_SECS, DEFAULT_TICK_INTERVAL,
};
use crate::word_generator::WordSource;
use log::{debug, info, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

pub type RoundId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Outcome {
    Pending,
    Answered,
    TimedOut,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    pub id: RoundId,
    pub word: String,
    pub outcome: Outcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    WordChosen,
    Armed,
    Answered,
    TimedOut,
}

impl RoundPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, RoundPhase::Answered | RoundPhase::TimedOut)
    }
}

/// Timer callback, tagged with the round that armed the timer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimerSignal {
    Tick { round: RoundId, remaining: f64 },
    Expired { round: RoundId },
}

impl TimerSignal {
    pub fn round(&self) -> RoundId {
        match self {
            TimerSignal::Tick { round, .. } | TimerSignal::Expired { round } => *round,
        }
    }
}

/// Whether a request changed round state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

/// Render surface hooks. All methods default to doing nothing.
pub trait RoundObserver {
    fn on_word_displayed(&mut self, _text: &str, _fit: FitResult) {}
    /// `view.whole_secs` and `view.band` are what the surface should show
    fn on_timer_tick(&mut self, _view: TimerView) {}
    fn on_round_finished(&mut self, _word: &str, _outcome: Outcome) {}
}

impl RoundObserver for () {}

#[derive(Clone, Debug, PartialEq)]
pub enum RoundEvent {
    WordDisplayed { text: String, fit: FitResult },
    TimerTick(TimerView),
    RoundFinished { word: String, outcome: Outcome },
}

impl RoundObserver for Vec<RoundEvent> {
    fn on_word_displayed(&mut self, text: &str, fit: FitResult) {
        self.push(RoundEvent::WordDisplayed {
            text: text.to_string(),
            fit,
        });
    }

    fn on_timer_tick(&mut self, view: TimerView) {
        self.push(RoundEvent::TimerTick(view));
    }

    fn on_round_finished(&mut self, word: &str, outcome: Outcome) {
        self.push(RoundEvent::RoundFinished {
            word: word.to_string(),
            outcome,
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundSettings {
    pub round_secs: f64,
    pub tick_interval: Duration,
    pub base_font_size: u16,
    pub safety_padding: f64,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            round_secs: DEFAULT_ROUND_SECS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            base_font_size: 4,
            safety_padding: 2.0,
        }
    }
}

pub struct RoundController<W: WordSource, O: RoundObserver> {
    source: W,
    observer: O,
    settings: RoundSettings,
    timer: CountdownTimer,
    display: WordDisplay,
    timer_view: TimerView,
    phase: RoundPhase,
    round: Option<Round>,
    generation: RoundId,
    signals_tx: Sender<TimerSignal>,
    signals_rx: Receiver<TimerSignal>,
}

impl<W: WordSource, O: RoundObserver> RoundController<W, O> {
    pub fn new(source: W, observer: O, settings: RoundSettings) -> Self {
        let (signals_tx, signals_rx) = mpsc::channel();
        Self {
            source,
            observer,
            settings,
            timer: CountdownTimer::new(settings.tick_interval),
            display: WordDisplay::new(settings.base_font_size, settings.safety_padding),
            timer_view: TimerView::full(settings.round_secs),
            phase: RoundPhase::Idle,
            round: None,
            generation: 0,
            signals_tx,
            signals_rx,
        }
    }

    /// Discard the current round (if any), pick a word and arm the timer.
    ///
    /// An empty word aborts the start: the controller stays `Idle` and the
    /// error is returned to the caller.
    pub fn start_round(&mut self) -> Result<RoundId> {
        self.timer.stop();
        self.generation += 1;
        let id = self.generation;

        self.round = None;
        self.phase = RoundPhase::Idle;
        self.display.clear();

        let word = match self.source.pick_word() {
            Ok(word) if !word.trim().is_empty() => word,
            Ok(_) => {
                warn!("round {id}: word source returned an empty word");
                return Err(GameError::EmptyWord);
            }
            Err(err) => {
                warn!("round {id}: could not pick a word: {err}");
                return Err(err);
            }
        };

        self.reset_timer_view();
        self.display.set_text(word.as_str());
        self.round = Some(Round {
            id,
            word,
            outcome: Outcome::Pending,
        });
        self.phase = RoundPhase::WordChosen;

        let tick_tx = self.signals_tx.clone();
        let expire_tx = self.signals_tx.clone();
        self.timer.start(
            self.settings.round_secs,
            move |remaining| {
                let _ = tick_tx.send(TimerSignal::Tick {
                    round: id,
                    remaining,
                });
            },
            move || {
                let _ = expire_tx.send(TimerSignal::Expired { round: id });
            },
        );
        self.phase = RoundPhase::Armed;

        info!("round {id}: armed for {:.2}s", self.settings.round_secs);
        Ok(id)
    }

    pub fn next_round(&mut self) -> Result<RoundId> {
        self.start_round()
    }

    pub fn submit_answer(&mut self) -> Transition {
        if self.phase != RoundPhase::Armed {
            debug!(
                "round {}: answer ignored in {:?}",
                self.generation, self.phase
            );
            return Transition::Ignored;
        }
        self.finish(Outcome::Answered)
    }

    /// One wall-clock tick from the host: advance the countdown and handle
    /// whatever it signalled.
    pub fn on_tick(&mut self) {
        self.advance_timer();
        self.process_signals();
    }

    /// Advance the countdown without handling its signals. They stay queued
    /// until [`RoundController::process_signals`].
    pub fn advance_timer(&mut self) {
        self.timer.tick();
    }

    /// Handle queued timer signals in delivery order; returns how many applied
    pub fn process_signals(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(signal) = self.signals_rx.try_recv() {
            if self.handle_signal(signal) == Transition::Applied {
                applied += 1;
            }
        }
        applied
    }

    pub fn handle_signal(&mut self, signal: TimerSignal) -> Transition {
        if signal.round() != self.generation {
            debug!(
                "round {}: dropped stale {:?}",
                self.generation, signal
            );
            return Transition::Ignored;
        }
        if self.phase != RoundPhase::Armed {
            debug!(
                "round {}: {:?} ignored in {:?}",
                self.generation, signal, self.phase
            );
            return Transition::Ignored;
        }

        match signal {
            TimerSignal::Tick { remaining, .. } => {
                self.timer_view = TimerView::new(remaining, self.settings.round_secs);
                self.observer.on_timer_tick(self.timer_view);
                Transition::Applied
            }
            TimerSignal::Expired { .. } => self.finish(Outcome::TimedOut),
        }
    }

    /// Second phase of the word display: call once the surface knows its width
    pub fn settle_display<M: TextMeasure>(
        &mut self,
        container_width: f64,
        measure: &M,
    ) -> Option<FitResult> {
        let fit = self.display.settle(container_width, measure)?;
        self.observer.on_word_displayed(self.display.text(), fit);
        Some(fit)
    }

    /// The surface was resized; the word is refitted on the next settle
    pub fn invalidate_layout(&mut self) {
        self.display.invalidate();
    }

    fn finish(&mut self, outcome: Outcome) -> Transition {
        let phase = match outcome {
            Outcome::Answered => RoundPhase::Answered,
            Outcome::TimedOut => RoundPhase::TimedOut,
            Outcome::Pending => return Transition::Ignored,
        };
        self.timer.stop();
        let Some(round) = self.round.as_mut() else {
            return Transition::Ignored;
        };

        self.phase = phase;
        round.outcome = outcome;
        if outcome == Outcome::TimedOut {
            self.timer_view = TimerView::new(0.0, self.settings.round_secs);
        }

        info!("round {}: finished {} ({})", round.id, outcome, round.word);
        self.observer.on_round_finished(&round.word, outcome);
        Transition::Applied
    }

    fn reset_timer_view(&mut self) {
        self.timer_view = TimerView::full(self.settings.round_secs);
        self.observer.on_timer_tick(self.timer_view);
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn current_id(&self) -> RoundId {
        self.generation
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn timer_view(&self) -> TimerView {
        self.timer_view
    }

    pub fn display(&self) -> &WordDisplay {
        &self.display
    }

    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
