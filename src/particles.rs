//! Ambient canvas backdrop.
//!
//! A sparse field of slow survey motes drifting behind the panels, echoing
//! the dotted blueprint grid of the strategy hub. Cheap enough to update
//! every frame at the 30 FPS tick.

use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::theme::colors;

/// Backdrop animation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackdropMode {
    /// Drifting survey motes (default)
    #[default]
    Drift,
    /// Static background
    Off,
}

impl BackdropMode {
    pub fn toggle(&self) -> Self {
        match self {
            BackdropMode::Drift => BackdropMode::Off,
            BackdropMode::Off => BackdropMode::Drift,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackdropMode::Drift => "Drift",
            BackdropMode::Off => "Off",
        }
    }
}

/// One mote in the field
#[derive(Debug, Clone)]
struct Mote {
    x: f32,
    y: f32,
    drift: f32,
    glyph: char,
    dim: bool,
}

impl Mote {
    fn spawn(width: u16, height: u16) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: rng.gen_range(0.0..width.max(1) as f32),
            y: rng.gen_range(0.0..height.max(1) as f32),
            drift: rng.gen_range(0.01..0.06),
            glyph: if rng.gen_bool(0.8) { '·' } else { '∙' },
            dim: rng.gen_bool(0.6),
        }
    }
}

/// The backdrop field
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    mode: BackdropMode,
    motes: Vec<Mote>,
}

/// Motes per 1000 cells of terminal area
const DENSITY: usize = 6;

impl Backdrop {
    pub fn mode(&self) -> BackdropMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        if self.mode == BackdropMode::Off {
            self.motes.clear();
        }
    }

    /// Advance the field one frame, respawning motes that drift off-screen
    pub fn update(&mut self, width: u16, height: u16) {
        if self.mode == BackdropMode::Off {
            return;
        }
        let target = (width as usize * height as usize) * DENSITY / 1000;
        while self.motes.len() < target {
            self.motes.push(Mote::spawn(width, height));
        }
        self.motes.truncate(target.max(1));

        for mote in &mut self.motes {
            mote.y += mote.drift;
            if mote.y >= height as f32 {
                *mote = Mote::spawn(width, 1);
                mote.y = 0.0;
            }
        }
    }
}

/// Renders the backdrop into empty cells only
pub struct BackdropWidget<'a> {
    field: &'a Backdrop,
}

impl<'a> BackdropWidget<'a> {
    pub fn new(field: &'a Backdrop) -> Self {
        Self { field }
    }
}

impl Widget for BackdropWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for mote in &self.field.motes {
            let x = area.x.saturating_add(mote.x as u16);
            let y = area.y.saturating_add(mote.y as u16);
            if x >= area.right() || y >= area.bottom() {
                continue;
            }
            let cell = &mut buf[(x, y)];
            if cell.symbol() != " " {
                continue;
            }
            let color: Color = if mote.dim {
                colors::BORDER_DIM
            } else {
                colors::FG_FAINT
            };
            cell.set_char(mote.glyph);
            cell.set_style(Style::default().fg(color));
        }
    }
}
