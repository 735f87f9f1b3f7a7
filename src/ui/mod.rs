mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Popup};
use crate::theme::Theme;
use components::Icon;

/// Smallest terminal the calculator can be drawn into
pub const MIN_WIDTH: u16 = 44;
pub const MIN_HEIGHT: u16 = 24;

/// Widest the centred card grows
const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 16;

// Theme is set once at startup; falls back to the default palette
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialised");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn heading() -> Color { theme().heading }
fn subtitle() -> Color { theme().subtitle }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn icon() -> Color { theme().icon }
fn value() -> Color { theme().value }
fn panel_bg() -> Color { theme().panel_bg }
fn inactive() -> Color { theme().inactive }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Info line
            Constraint::Min(0),               // Top spacer
            Constraint::Length(2),            // Title + subtitle
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),  // Calculator card
            Constraint::Length(1),
            Constraint::Length(1),            // Footer
            Constraint::Min(0),               // Bottom spacer
            Constraint::Length(1),            // Key hints
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_header(f, chunks[2]);
    draw_card(f, app, centered_columns(CARD_WIDTH, chunks[4]));
    draw_footer(f, chunks[6]);
    draw_key_hints(f, app, chunks[8]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_message {
        Some(ref status) => Line::from(Span::styled(status.as_str(), Style::default().fg(accent()))),
        None => Line::from(Span::styled("Ready", Style::default().fg(text_dim()))),
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Perfect Pour Calculator",
            Style::default().fg(heading()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Craft your ideal pour-over coffee with precision.",
            Style::default().fg(subtitle()),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn section_heading(title: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().fg(text()).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(inactive())))
}

fn draw_card(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints([
            Constraint::Length(2),   // Brew Settings
            Constraint::Length(3),   // Coffee grounds
            Constraint::Length(3),   // Number of pours
            Constraint::Length(2),   // Brew Results
            Constraint::Length(1),   // Water per pour
            Constraint::Length(1),
            Constraint::Length(1),   // Final quantity
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(section_heading("Brew Settings"), rows[0]);

    components::draw_number_input(
        f,
        rows[1],
        "Coffee Grounds (grams)",
        &app.coffee_input,
        "e.g., 20",
        app.field == Field::CoffeeGrams,
    );
    components::draw_pour_select(
        f,
        rows[2],
        "Number of Pours",
        app.num_pours(),
        app.field == Field::Pours,
    );

    f.render_widget(section_heading("Brew Results"), rows[3]);

    components::draw_result_row(
        f,
        rows[4],
        Icon::WaterDrop,
        "Water per Pour",
        app.calculator.water_per_pour(),
    );
    components::draw_result_row(
        f,
        rows[6],
        Icon::Beaker,
        "Final Coffee Quantity",
        app.calculator.final_quantity(),
    );
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        "Happy Brewing!",
        Style::default().fg(subtitle()),
    )))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

/// Key hint line; separators are dropped when the full line would not fit
fn key_hints(field: Field, width: u16) -> Line<'static> {
    let field_keys = match field {
        Field::CoffeeGrams => ("↑/↓", "±1"),
        Field::Pours => ("←/→", "pours"),
    };
    let keys = [("Tab", "field"), field_keys, ("r", "reset"), ("?", "help"), ("q", "quit")];

    let full_width: usize = keys
        .iter()
        .map(|(k, d)| k.chars().count() + d.chars().count() + 1)
        .sum::<usize>()
        + (keys.len() - 1) * 3;
    let separator = if full_width <= width as usize { " │ " } else { " " };

    let mut spans = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(separator));
        }
        spans.push(Span::styled(*key, Style::default().fg(accent())));
        spans.push(Span::raw(format!(" {}", desc)));
    }
    Line::from(spans)
}

fn draw_key_hints(f: &mut Frame, app: &App, area: Rect) {
    let hints = Paragraph::new(key_hints(app.field, area.width))
        .alignment(Alignment::Center)
        .style(Style::default().fg(text_dim()));
    f.render_widget(hints, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(accent()));
    let help_text = vec![
        Line::from(Span::styled("═══ Fields ═══", Style::default().fg(heading()).add_modifier(Modifier::BOLD))),
        Line::from(vec![key("  Tab       "), Span::raw("Switch between coffee grounds and pours")]),
        Line::from(""),
        Line::from(Span::styled("═══ Coffee Grounds ═══", Style::default().fg(heading()).add_modifier(Modifier::BOLD))),
        Line::from(vec![key("  0-9       "), Span::raw("Type grams")]),
        Line::from(vec![key("  Backspace "), Span::raw("Delete last digit")]),
        Line::from(vec![key("  Del       "), Span::raw("Clear the field")]),
        Line::from(vec![key("  ↑/↓       "), Span::raw("Add or remove one gram")]),
        Line::from(""),
        Line::from(Span::styled("═══ Number of Pours ═══", Style::default().fg(heading()).add_modifier(Modifier::BOLD))),
        Line::from(vec![key("  ←/→ ↑/↓   "), Span::raw("Previous / next option")]),
        Line::from(vec![key("  1-5       "), Span::raw("Pick a pour count")]),
        Line::from(""),
        Line::from(Span::styled("═══ Ratio ═══", Style::default().fg(heading()).add_modifier(Modifier::BOLD))),
        Line::from(Span::raw("  Each pour uses 3g of water per gram of coffee.")),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            key("?"),
            Span::styled("/", Style::default().fg(text_dim())),
            key("Esc"),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" Perfect Pour Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

/// Horizontally centre a column of at most `width` cells
fn centered_columns(width: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    Rect {
        x: r.x + (r.width - width) / 2,
        width,
        ..r
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
