use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};

use crate::{
    app::{AppState, ScreenModel},
    locale::{result_icon, Locale, Strings},
    round::Outcome,
    fit::spaced,
    ui::{band_color, game_layout},
};

/// Everything a screen may read while drawing
pub struct ScreenContext<'a> {
    pub model: &'a ScreenModel,
    pub strings: &'static Strings,
    pub locale: Locale,
    pub base_font_size: u16,
}

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, ctx: &ScreenContext, area: Rect, buf: &mut Buffer);
}

fn centered_rows(area: Rect, rows: u16) -> Vec<Rect> {
    let mut constraints = vec![Constraint::Fill(1)];
    constraints.extend(std::iter::repeat(Constraint::Length(1)).take(usize::from(rows)));
    constraints.push(Constraint::Fill(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .constraints(constraints)
        .split(area);
    chunks[1..=usize::from(rows)].to_vec()
}

fn centered(text: impl Into<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(text.into()).alignment(Alignment::Center)
}

pub struct SplashScreen;

impl Screen for SplashScreen {
    fn render(&self, ctx: &ScreenContext, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let rows = centered_rows(area, 6);

        centered(Span::styled(ctx.strings.title, bold.fg(Color::Magenta))).render(rows[0], buf);
        centered(Span::styled(
            ctx.strings.start_hint,
            Style::default().add_modifier(Modifier::DIM),
        ))
        .render(rows[2], buf);

        if let Some(ref err) = ctx.model.error {
            let red = Style::default().fg(Color::Red);
            centered(Span::styled(ctx.strings.start_failed, red.patch(bold))).render(rows[4], buf);
            centered(Span::styled(err.clone(), red)).render(rows[5], buf);
        }
    }
}

pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, ctx: &ScreenContext, area: Rect, buf: &mut Buffer) {
        let layout = game_layout(area);
        let model = ctx.model;
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let pitch = model.font_size(ctx.base_font_size);
        Paragraph::new(Span::styled(spaced(&model.word, pitch), bold))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout.word, buf);

        if let Some(view) = model.timer {
            let color = band_color(view.band);

            centered(Span::styled(
                view.whole_secs.to_string(),
                bold.fg(color),
            ))
            .render(layout.seconds, buf);

            Gauge::default()
                .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
                .ratio(view.ratio)
                .label(Span::raw(""))
                .render(layout.ring, buf);
        }

        centered(Span::styled(
            ctx.strings.answer_hint,
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))
        .render(layout.hint, buf);
    }
}

pub struct ResultScreen;

impl Screen for ResultScreen {
    fn render(&self, ctx: &ScreenContext, area: Rect, buf: &mut Buffer) {
        let Some((ref word, outcome)) = ctx.model.result else {
            return;
        };
        let color = match outcome {
            Outcome::Answered => Color::Green,
            _ => Color::Red,
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let rows = centered_rows(area, 5);

        centered(result_icon(outcome)).render(rows[0], buf);
        centered(Span::styled(
            ctx.locale.result_label(outcome),
            bold.fg(color),
        ))
        .render(rows[1], buf);
        centered(Span::styled(word.clone(), bold.fg(color))).render(rows[2], buf);
        centered(Span::styled(
            ctx.strings.next_hint,
            Style::default().add_modifier(Modifier::DIM),
        ))
        .render(rows[4], buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Splash => Box::new(SplashScreen),
        AppState::Playing => Box::new(GameScreen),
        AppState::Result => Box::new(ResultScreen),
    }
}
