use crate::config::Config;
use crate::fit::{CellMeasure, FitResult};
use crate::locale::Locale;
use crate::round::{Outcome, RoundController, RoundObserver, RoundPhase, Transition};
use crate::timer::TimerView;
use crate::word_generator::WordSource;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Splash,
    Playing,
    Result,
}

/// What the player currently sees. Only round events write to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenModel {
    pub state: AppState,
    pub word: String,
    pub fit: Option<FitResult>,
    pub timer: Option<TimerView>,
    pub result: Option<(String, Outcome)>,
    pub error: Option<String>,
}

impl ScreenModel {
    /// Glyph pitch to draw the word with; base size until the first fit lands
    pub fn font_size(&self, base: u16) -> u16 {
        self.fit.map(|f| f.font_size).unwrap_or(base)
    }
}

impl RoundObserver for ScreenModel {
    fn on_word_displayed(&mut self, text: &str, fit: FitResult) {
        self.word = text.to_string();
        self.fit = Some(fit);
    }

    fn on_timer_tick(&mut self, view: TimerView) {
        self.timer = Some(view);
    }

    fn on_round_finished(&mut self, word: &str, outcome: Outcome) {
        self.result = Some((word.to_string(), outcome));
        self.state = AppState::Result;
    }
}

/// What the event loop should do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    RoundStarted,
    Quit,
}

pub struct App<W: WordSource> {
    pub controller: RoundController<W, ScreenModel>,
    pub locale: Locale,
}

impl<W: WordSource> App<W> {
    pub fn new(source: W, config: &Config) -> Self {
        Self {
            controller: RoundController::new(
                source,
                ScreenModel::default(),
                config.round_settings(),
            ),
            locale: config.locale,
        }
    }

    pub fn model(&self) -> &ScreenModel {
        self.controller.observer()
    }

    pub fn state(&self) -> AppState {
        self.model().state
    }

    pub fn base_font_size(&self) -> u16 {
        self.controller.display().base_font_size()
    }

    /// Start a round, or park on the splash screen with the error
    pub fn begin_round(&mut self) -> Flow {
        {
            let model = self.controller.observer_mut();
            model.word.clear();
            model.fit = None;
            model.result = None;
        }

        match self.controller.start_round() {
            Ok(_) => {
                let model = self.controller.observer_mut();
                model.error = None;
                model.state = AppState::Playing;
                Flow::RoundStarted
            }
            Err(err) => {
                error!("app: round failed to start: {err}");
                let model = self.controller.observer_mut();
                model.error = Some(err.to_string());
                model.state = AppState::Splash;
                Flow::Continue
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if key.code == KeyCode::Esc || ctrl_c {
            return Flow::Quit;
        }

        let confirm = matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter);
        match self.state() {
            AppState::Splash if confirm => self.begin_round(),
            AppState::Playing if confirm => {
                if self.controller.submit_answer() == Transition::Ignored {
                    debug!("app: answer key ignored in {:?}", self.controller.phase());
                }
                Flow::Continue
            }
            AppState::Result if confirm || key.code == KeyCode::Char('n') => self.begin_round(),
            _ => Flow::Continue,
        }
    }

    pub fn on_tick(&mut self) {
        if self.controller.phase() == RoundPhase::Armed {
            self.controller.on_tick();
        }
    }

    pub fn on_resize(&mut self) {
        self.controller.invalidate_layout();
    }

    /// Second display phase: called from the draw pass once the word area is known
    pub fn settle_layout(&mut self, word_area_width: u16) -> Option<FitResult> {
        self.controller
            .settle_display(f64::from(word_area_width), &CellMeasure)
    }
}
