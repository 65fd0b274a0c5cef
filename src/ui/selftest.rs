use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::ui::theme::{Band, Theme};

/// Modal overlay exercising every color band plus the header accent, so a
/// misconfigured terminal is obvious at a glance.
pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(area, 38, 9);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Color/Self-Test ",
            Style::default()
                .fg(theme.header_fg)
                .add_modifier(Modifier::BOLD),
        ));

    let band_line = |band: Band, text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(theme.band_color(band)),
        ))
    };

    let lines = vec![
        band_line(Band::Normal, "Green OK"),
        band_line(Band::Medium, "Yellow OK"),
        band_line(Band::High, "Red OK"),
        Line::from(Span::styled(
            "Cyan Header OK",
            Style::default().fg(theme.header_fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue...",
            Style::default().fg(theme.text_secondary),
        )),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
