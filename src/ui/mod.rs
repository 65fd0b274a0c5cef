pub mod header;
pub mod selftest;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{App, InputMode};
use crate::system::source::ProcSource;

pub fn draw<S: ProcSource>(frame: &mut Frame, app: &App<S>) {
    #[cfg(feature = "perf-tracing")]
    let _draw_span = tracing::debug_span!("ui.draw").entered();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        app.sort_label(),
        app.tick.cpu_percent,
        app.tick.mem_percent,
        app.alert,
        app.tick.processes.len(),
        &app.theme,
    );
    table::render(
        frame,
        chunks[1],
        &app.tick.processes,
        app.max_name_width,
        &app.theme,
    );
    statusbar::render(
        frame,
        chunks[2],
        app.input_mode,
        &app.kill_input,
        app.status_message.as_ref(),
        app.sort_label(),
        &app.theme,
    );

    // Modal overlay on top of the frozen table
    if app.input_mode == InputMode::SelfTest {
        selftest::render(frame, frame.area(), &app.theme);
    }
}
