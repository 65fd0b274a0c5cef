use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::theme::Theme;

#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    area: Rect,
    sort_label: &str,
    cpu_percent: f32,
    mem_percent: f32,
    alert: bool,
    proc_count: usize,
    theme: &Theme,
) {
    let title = Line::from(vec![
        Span::styled(
            " procwatch ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[Sorting: {sort_label}]"),
            Style::default().fg(theme.header_fg),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Procs: {proc_count}"),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    let mut gauges = vec![Span::raw(format!(
        "CPU: {cpu_percent:5.1}%   MEM: {mem_percent:5.1}%"
    ))];
    if alert {
        gauges.push(Span::styled(
            "   ALERT: High usage detected!",
            Style::default()
                .fg(theme.band_high)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let legend = Line::from(vec![
        Span::styled("Legend: ", Style::default().fg(theme.text_secondary)),
        Span::styled("Green=Normal ", Style::default().fg(theme.band_normal)),
        Span::styled("Yellow=Medium ", Style::default().fg(theme.band_medium)),
        Span::styled("Red=High", Style::default().fg(theme.band_high)),
    ]);

    let lines = vec![title, Line::from(gauges), legend];
    frame.render_widget(Paragraph::new(lines), area);
}
