//! Stateless presentational pieces: icons, labelled inputs, result rows

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::brew::PourCount;

use super::{accent, icon, inactive, panel_bg, text, text_dim, value};

/// Nerd Font glyphs standing in for the form and result icons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    CoffeeBean,
    WaterDrop,
    Beaker,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::CoffeeBean => "\u{f0176}",
            Icon::WaterDrop => "\u{f058c}",
            Icon::Beaker => "\u{f0093}",
        }
    }

    pub fn span(self, style: Style) -> Span<'static> {
        Span::styled(self.glyph(), style)
    }
}

/// Border and title styles for a field, depending on focus
fn field_styles(focused: bool) -> (Style, Style) {
    if focused {
        (
            Style::default().fg(accent()),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(inactive()), Style::default().fg(text_dim()))
    }
}

/// Numeric text field with a leading icon, placeholder and cursor
pub fn draw_number_input(
    f: &mut Frame,
    area: Rect,
    title: &str,
    input: &str,
    placeholder: &str,
    focused: bool,
) {
    let (border, title_style) = field_styles(focused);

    let mut spans = vec![
        Icon::CoffeeBean.span(Style::default().fg(text_dim())),
        Span::raw("  "),
    ];
    if input.is_empty() {
        spans.push(Span::styled(placeholder.to_string(), Style::default().fg(text_dim())));
    } else {
        spans.push(Span::styled(input.to_string(), Style::default().fg(text())));
    }
    if focused {
        spans.push(Span::styled("_", Style::default().fg(accent())));
    }

    let field = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled(format!(" {} ", title), title_style))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(field, area);
}

/// Selection control showing every pour option, current one highlighted
pub fn draw_pour_select(f: &mut Frame, area: Rect, title: &str, selected: PourCount, focused: bool) {
    let (border, title_style) = field_styles(focused);

    let mut spans = Vec::new();
    for (i, option) in PourCount::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", Style::default()));
        }
        let style = if *option == selected {
            Style::default()
                .fg(accent())
                .bg(panel_bg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text_dim())
        };
        // Short form keeps all five options on one line
        let label = if *option == selected {
            option.label()
        } else {
            option.to_string()
        };
        spans.push(Span::styled(format!(" {} ", label), style));
    }

    let select = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled(format!(" {} ", title), title_style))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(select, area);
}

/// Text for a result amount: full digits when they fit in `available`
/// cells next to the unit, otherwise a short scientific form
pub fn fit_amount(amount: u64, available: u16) -> String {
    let full = amount.to_string();
    if full.chars().count() as u16 + 3 <= available {
        full
    } else {
        format!("{:.1e}", amount as f64)
    }
}

/// One result line: icon and label on the left, "<value> g" on the right,
/// always at least one cell apart
pub fn draw_result_row(f: &mut Frame, area: Rect, glyph: Icon, label: &str, amount: u64) {
    let background = Style::default().bg(panel_bg());
    f.render_widget(Block::default().style(background), area);

    // " " + icon + "  " + label
    let label_width = label.chars().count() as u16 + 4;
    let amount_text = fit_amount(amount, area.width.saturating_sub(label_width + 1));
    let right_width = (amount_text.chars().count() as u16 + 3).min(area.width);

    let left_area = Rect {
        width: area.width.saturating_sub(right_width + 1),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width - right_width,
        width: right_width,
        ..area
    };

    let left = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        glyph.span(Style::default().fg(icon())),
        Span::raw("  "),
        Span::styled(label.to_string(), Style::default().fg(text())),
    ]))
    .style(background);
    f.render_widget(left, left_area);

    let right = Paragraph::new(Line::from(vec![
        Span::styled(amount_text, Style::default().fg(value()).add_modifier(Modifier::BOLD)),
        Span::styled(" g ", Style::default().fg(text_dim())),
    ]))
    .alignment(Alignment::Right)
    .style(background);
    f.render_widget(right, right_area);
}
