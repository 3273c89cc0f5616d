pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::Widget,
};

use crate::{app::App, timer::ColorBand, word_generator::WordSource};

use self::screen::{current_screen, ScreenContext};

const HORIZONTAL_MARGIN: u16 = 5;

/// Stand-in for the violet→cyan gradient of the full ring
const RING_NORMAL: Color = Color::Rgb(6, 182, 212);

impl<W: WordSource> Widget for &App<W> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = ScreenContext {
            model: self.model(),
            strings: self.locale.strings(),
            locale: self.locale,
            base_font_size: self.base_font_size(),
        };
        current_screen(ctx.model.state).render(&ctx, area, buf);
    }
}

/// Rows of the playing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    pub word: Rect,
    pub seconds: Rect,
    pub ring: Rect,
    pub hint: Rect,
}

pub fn game_layout(area: Rect) -> GameLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1), // word
            Constraint::Length(1),
            Constraint::Length(1), // seconds
            Constraint::Length(1), // ring
            Constraint::Length(1),
            Constraint::Length(1), // hint
            Constraint::Fill(1),
        ])
        .split(area);

    GameLayout {
        word: chunks[1],
        seconds: chunks[3],
        ring: chunks[4],
        hint: chunks[6],
    }
}

/// The box the word is fitted into
pub fn word_area(area: Rect) -> Rect {
    game_layout(area).word
}

pub fn band_color(band: ColorBand) -> Color {
    match band {
        ColorBand::Normal => RING_NORMAL,
        ColorBand::Warning => Color::Yellow,
        ColorBand::Danger => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::locale::Locale;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn en_app(word: &'static str) -> App<impl FnMut() -> String> {
        let config = Config {
            locale: Locale::En,
            ..Config::default()
        };
        App::new(move || word.to_string(), &config)
    }

    fn draw<W: WordSource>(app: &mut App<W>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                app.settle_layout(word_area(f.area()).width);
                f.render_widget(&*app, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn test_band_colors_differ() {
        assert_ne!(band_color(ColorBand::Normal), band_color(ColorBand::Warning));
        assert_ne!(band_color(ColorBand::Warning), band_color(ColorBand::Danger));
    }

    #[test]
    fn test_word_area_respects_margin() {
        let area = Rect::new(0, 0, 60, 20);
        let word = word_area(area);
        assert_eq!(word.width, 50);
        assert_eq!(word.height, 1);
    }

    #[test]
    fn test_render_splash() {
        let mut app = en_app("cat");
        let screen = draw(&mut app, 60, 12);
        assert!(screen.contains("press space to start"));
    }

    #[test]
    fn test_render_playing_shows_word_and_seconds() {
        let mut app = en_app("cat");
        app.on_key(enter());
        let screen = draw(&mut app, 60, 12);

        assert!(screen.contains("c   a   t"));
        assert!(screen.contains('3'));
        assert!(screen.contains("press space when it's guessed"));
    }

    #[test]
    fn test_render_shrinks_long_word() {
        let mut app = en_app("hippopotamus");
        app.on_key(enter());
        // word box is 30 - 10 = 20 wide; 45 + 2 at pitch 4 does not fit, pitch 1 does
        let screen = draw(&mut app, 30, 12);

        assert_eq!(app.model().fit.unwrap().font_size, 1);
        assert!(screen.contains("hippopotamus"));
    }

    #[test]
    fn test_render_keeps_base_pitch_when_word_just_fits() {
        let mut app = en_app("elephant");
        app.on_key(enter());
        // word box is 42 - 10 = 32 wide; 29 columns + 2 padding fit
        let screen = draw(&mut app, 42, 12);

        assert_eq!(app.model().fit.unwrap().font_size, 4);
        assert!(screen.contains("e   l   e   p   h   a   n   t"));
    }

    #[test]
    fn test_render_result() {
        let mut app = en_app("cat");
        app.on_key(enter());
        app.on_key(enter());
        let screen = draw(&mut app, 60, 12);

        assert!(screen.contains("Passed!"));
        assert!(screen.contains("cat"));
        assert!(screen.contains("(n) next word"));
    }

    #[test]
    fn test_render_timeout_result() {
        let mut app = en_app("cat");
        app.on_key(enter());
        for _ in 0..60 {
            app.on_tick();
        }
        let screen = draw(&mut app, 60, 12);
        assert!(screen.contains("Time's up!"));
    }

    #[test]
    fn test_render_start_error() {
        let config = Config {
            locale: Locale::En,
            ..Config::default()
        };
        let mut app = App::new(String::new, &config);
        app.on_key(enter());
        let screen = draw(&mut app, 70, 12);
        assert!(screen.contains("could not start the round"));
    }
}
