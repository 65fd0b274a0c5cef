use std::cmp::Ordering;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::system::kill::kill_with_sigterm;
use crate::system::sampler::{ProcessSample, Sampler, TickSample};
use crate::system::source::ProcSource;
use crate::ui::theme::{Band, Theme};

/// Session loop states. `Normal` ticks; the two modal states suspend the
/// tick cadence until the operator finishes with them. Termination is the
/// `running` flag going false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    KillInput,
    SelfTest,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub toggle_sort: KeyCode,
    pub kill: KeyCode,
    pub self_test: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            toggle_sort: parse_key(&kb.toggle_sort).unwrap_or(KeyCode::Char('t')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
            self_test: parse_key(&kb.self_test).unwrap_or(KeyCode::Char('c')),
        }
    }
}

// Letter commands are case-insensitive.
fn keys_match(pressed: KeyCode, bound: KeyCode) -> bool {
    match (pressed, bound) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
        _ => pressed == bound,
    }
}

pub struct App<S> {
    pub running: bool,
    pub sort_by_cpu: bool,
    pub input_mode: InputMode,
    pub kill_input: String,
    pub status_message: Option<(String, Instant)>,
    pub tick: TickSample,
    pub alert: bool,
    pub theme: Theme,
    pub max_name_width: usize,
    pub keybinds: ResolvedKeybinds,
    sampler: Sampler<S>,
}

impl<S: ProcSource> App<S> {
    pub fn new(source: S, config: &Config) -> Self {
        let sampler = Sampler::new(source);
        let sort_by_cpu = !config.general.default_sort.eq_ignore_ascii_case("mem");
        let mut app = App {
            running: true,
            sort_by_cpu,
            input_mode: InputMode::Normal,
            kill_input: String::new(),
            status_message: None,
            tick: TickSample::default(),
            alert: false,
            theme: Theme::default(),
            max_name_width: config.general.max_name_width,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            sampler,
        };
        app.refresh_data();
        app
    }

    /// One tick: sample, sort, recompute the alert flag. A no-op while a
    /// modal state holds the loop.
    pub fn refresh_data(&mut self) {
        if self.input_mode != InputMode::Normal {
            return;
        }

        self.tick = self.sampler.sample();
        sort_samples(&mut self.tick.processes, self.sort_by_cpu);
        self.alert = alert_triggered(&self.tick.processes);

        // Clear expired status messages (older than 3 seconds)
        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= 3
        {
            self.status_message = None;
        }
    }

    pub fn sort_label(&self) -> &'static str {
        if self.sort_by_cpu { "CPU%" } else { "MEM%" }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::KillInput => map_key_kill_input(key),
            InputMode::SelfTest => Action::LeaveSelfTest,
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if keys_match(code, kb.quit) {
            return Action::Quit;
        }
        if keys_match(code, kb.toggle_sort) {
            return Action::ToggleSort;
        }
        if keys_match(code, kb.kill) {
            return Action::EnterKillInput;
        }
        if keys_match(code, kb.self_test) {
            return Action::EnterSelfTest;
        }

        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleSort => {
                self.sort_by_cpu = !self.sort_by_cpu;
                sort_samples(&mut self.tick.processes, self.sort_by_cpu);
            }
            Action::EnterKillInput => {
                self.input_mode = InputMode::KillInput;
                self.kill_input.clear();
                self.status_message = None;
            }
            Action::KillInputChar(c) => {
                self.kill_input.push(c);
            }
            Action::KillInputBackspace => {
                self.kill_input.pop();
            }
            Action::SubmitKill => {
                let result = kill_with_sigterm(self.sampler.source(), &self.kill_input);
                self.status_message = Some((result.message(), Instant::now()));
                self.kill_input.clear();
                self.input_mode = InputMode::Normal;
            }
            Action::CancelKill => {
                self.kill_input.clear();
                self.input_mode = InputMode::Normal;
            }
            Action::EnterSelfTest => {
                self.input_mode = InputMode::SelfTest;
            }
            Action::LeaveSelfTest => {
                self.input_mode = InputMode::Normal;
            }
            Action::None => {}
        }
    }
}

fn map_key_kill_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::CancelKill,
        KeyCode::Enter => Action::SubmitKill,
        KeyCode::Backspace => Action::KillInputBackspace,
        // Any text is accepted; validation happens on submit.
        KeyCode::Char(c) => Action::KillInputChar(c),
        _ => Action::None,
    }
}

/// Stable descending sort by the active metric; ties keep enumeration
/// order so output stays deterministic.
pub fn sort_samples(samples: &mut [ProcessSample], by_cpu: bool) {
    if by_cpu {
        samples.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(Ordering::Equal)
        });
    } else {
        samples.sort_by(|a, b| {
            b.mem_percent
                .partial_cmp(&a.mem_percent)
                .unwrap_or(Ordering::Equal)
        });
    }
}

/// The alert fires iff some row sits in the high band by either metric;
/// the same boundaries drive row coloring.
pub fn alert_triggered(samples: &[ProcessSample]) -> bool {
    samples.iter().any(|p| {
        Band::for_cpu(p.cpu_percent) == Band::High || Band::for_mem(p.mem_percent) == Band::High
    })
}
