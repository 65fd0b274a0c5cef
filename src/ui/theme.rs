use ratatui::style::Color;

/// Utilization bands shared by row coloring and the alert flag. The
/// boundaries are fixed; they are part of the displayed contract, not
/// tunables.
pub const CPU_MEDIUM: f32 = 25.0;
pub const CPU_HIGH: f32 = 70.0;
pub const MEM_MEDIUM: f32 = 4.0;
pub const MEM_HIGH: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Normal,
    Medium,
    High,
}

impl Band {
    pub fn for_cpu(percent: f32) -> Band {
        if percent >= CPU_HIGH {
            Band::High
        } else if percent >= CPU_MEDIUM {
            Band::Medium
        } else {
            Band::Normal
        }
    }

    pub fn for_mem(percent: f32) -> Band {
        if percent >= MEM_HIGH {
            Band::High
        } else if percent >= MEM_MEDIUM {
            Band::Medium
        } else {
            Band::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Normal => "Normal",
            Band::Medium => "Medium",
            Band::High => "High",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub band_normal: Color,
    pub band_medium: Color,
    pub band_high: Color,
    pub header_fg: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub text_secondary: Color,
    pub statusbar_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub overlay_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            band_normal: Color::Green,
            band_medium: Color::Yellow,
            band_high: Color::Red,
            header_fg: Color::Cyan,
            header_accent_fg: Color::Black,
            header_accent_bg: Color::Cyan,
            text_secondary: Color::DarkGray,
            statusbar_bg: Color::Reset,
            pill_key_fg: Color::Black,
            pill_key_bg: Color::Cyan,
            pill_desc_fg: Color::Gray,
            status_ok: Color::Green,
            status_err: Color::Red,
            overlay_border: Color::Cyan,
        }
    }
}

impl Theme {
    pub fn band_color(&self, band: Band) -> Color {
        match band {
            Band::Normal => self.band_normal,
            Band::Medium => self.band_medium,
            Band::High => self.band_high,
        }
    }
}
