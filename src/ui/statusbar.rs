use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::InputMode;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    kill_input: &str,
    status_message: Option<&(String, std::time::Instant)>,
    sort_label: &str,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    if input_mode == InputMode::KillInput {
        let mut spans = vec![
            Span::styled(
                " Enter PID to kill (SIGTERM): ",
                Style::default()
                    .fg(theme.pill_key_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(kill_input, Style::default().fg(theme.pill_desc_fg)),
            Span::styled("\u{2588}", Style::default().fg(theme.pill_key_bg)),
        ];
        spans.extend(pill_spans("Esc", "Cancel", theme));
        spans.extend(pill_spans("Enter", "Send", theme));
        frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
        return;
    }

    if input_mode == InputMode::SelfTest {
        let line = Line::from(Span::styled(
            " Press any key to continue...",
            Style::default().fg(theme.pill_desc_fg),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    // Status message takes priority over the key hints
    if let Some((msg, _)) = status_message {
        let color = if msg.starts_with("Sent") {
            theme.status_ok
        } else {
            theme.status_err
        };
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    spans.extend(pill_spans("q", "Quit", theme));
    spans.extend(pill_spans("t", &format!("Sort: {sort_label}"), theme));
    spans.extend(pill_spans("k", "Kill PID", theme));
    spans.extend(pill_spans("c", "Self-test", theme));
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg),
        ),
    ]
}
