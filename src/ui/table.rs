use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::truncate_unicode;
use crate::system::sampler::ProcessSample;
use crate::ui::theme::{Band, Theme};

/// Ranked process table. Rows beyond the area height are simply not
/// drawn; there is no pagination.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    samples: &[ProcessSample],
    max_name_width: usize,
    theme: &Theme,
) {
    if area.height == 0 {
        return;
    }

    let mut lines = Vec::with_capacity(area.height as usize);
    lines.push(Line::from(Span::styled(
        format!(
            "{:<7} {:<width$} {:>6} {:>6}",
            "PID",
            "NAME",
            "CPU%",
            "MEM%",
            width = max_name_width
        ),
        Style::default()
            .fg(theme.header_fg)
            .add_modifier(Modifier::BOLD),
    )));

    let capacity = area.height.saturating_sub(1) as usize;
    for p in samples.iter().take(capacity) {
        let name = truncate_unicode(&p.name, max_name_width);
        lines.push(Line::from(vec![
            Span::raw(format!(
                "{:<7} {:<width$} ",
                p.pid,
                name,
                width = max_name_width
            )),
            Span::styled(
                format!("{:>6.1}", p.cpu_percent),
                Style::default().fg(theme.band_color(Band::for_cpu(p.cpu_percent))),
            ),
            Span::raw(" "),
            Span::styled(
                format!("{:>6.1}", p.mem_percent),
                Style::default().fg(theme.band_color(Band::for_mem(p.mem_percent))),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
