//! Tactical hub theme module.
//!
//! Deep-slate night palette with vermilion command accents, matching the
//! consultancy's "strategy hub" house style: near-black backgrounds, muted
//! steel text, emerald for allocations and red for escalations.

#![allow(dead_code)]

use ratatui::style::Color;

/// Core palette
pub mod colors {
    use super::Color;

    // === Background Colors ===
    /// Slate 950 - primary canvas background
    pub const BG_DEEP: Color = Color::Rgb(0x02, 0x06, 0x17);
    /// Slate 900 - panel background
    pub const BG_PANEL: Color = Color::Rgb(0x0F, 0x17, 0x2A);
    /// Slate 800 - raised/hover surfaces
    pub const BG_RAISED: Color = Color::Rgb(0x1E, 0x29, 0x3B);
    /// Overlay scrim behind modals
    pub const BG_SCRIM: Color = Color::Rgb(0x05, 0x08, 0x12);

    // === Foreground Colors ===
    /// Primary text
    pub const FG: Color = Color::Rgb(0xE2, 0xE8, 0xF0);
    /// Secondary text
    pub const FG_MUTED: Color = Color::Rgb(0x94, 0xA3, 0xB8);
    /// Hints and placeholders
    pub const FG_FAINT: Color = Color::Rgb(0x47, 0x55, 0x69);

    // === Accent Colors ===
    /// Vermilion - command accents, escalations, the strategy root
    pub const VERMILION: Color = Color::Rgb(0xDC, 0x26, 0x26);
    /// Signal blue - selection, the anatomy root, focus
    pub const SIGNAL_BLUE: Color = Color::Rgb(0x2F, 0x6F, 0xED);
    /// Emerald - allocations, healthy status
    pub const EMERALD: Color = Color::Rgb(0x10, 0xB9, 0x81);
    /// Amber - warnings, on-hold status
    pub const AMBER: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
    /// Indigo - project nodes, secondary accents
    pub const INDIGO: Color = Color::Rgb(0x63, 0x66, 0xF1);
    /// Rose - high-priority mail, flagged rollups
    pub const ROSE: Color = Color::Rgb(0xF4, 0x3F, 0x5E);

    // === UI Element Colors ===
    /// Panel borders
    pub const BORDER: Color = Color::Rgb(0x33, 0x41, 0x55);
    /// Subtle separators
    pub const BORDER_DIM: Color = Color::Rgb(0x1A, 0x24, 0x37);
    /// Focused borders
    pub const BORDER_ACCENT: Color = SIGNAL_BLUE;

    // === Map Colors ===
    /// Structural edges between nodes
    pub const EDGE: Color = Color::Rgb(0x33, 0x41, 0x55);
    /// Expert allocation links (strategy view)
    pub const EDGE_ALLOCATION: Color = Color::Rgb(0x3B, 0x82, 0xF6);
    /// Edges/nodes outside the focused cluster
    pub const EDGE_DIMMED: Color = Color::Rgb(0x16, 0x1E, 0x2E);
}

/// Semantic styling helpers
pub mod styles {
    use super::colors;
    use ratatui::style::{Modifier, Style};

    pub fn text() -> Style {
        Style::default().fg(colors::FG)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors::FG_MUTED)
    }

    pub fn text_hint() -> Style {
        Style::default().fg(colors::FG_FAINT)
    }

    pub fn success() -> Style {
        Style::default().fg(colors::EMERALD)
    }

    pub fn error() -> Style {
        Style::default().fg(colors::VERMILION)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors::AMBER)
    }

    pub fn info() -> Style {
        Style::default().fg(colors::SIGNAL_BLUE)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(colors::BG_DEEP)
            .bg(colors::SIGNAL_BLUE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    pub fn border_dim() -> Style {
        Style::default().fg(colors::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors::BORDER_ACCENT)
    }

    pub fn title() -> Style {
        Style::default().fg(colors::FG).add_modifier(Modifier::BOLD)
    }

    pub fn title_accent() -> Style {
        Style::default()
            .fg(colors::VERMILION)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(colors::VERMILION)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(colors::FG_MUTED)
    }

    pub fn modal_bg() -> Style {
        Style::default().bg(colors::BG_SCRIM)
    }

    pub fn modal_content_bg() -> Style {
        Style::default().bg(colors::BG_PANEL)
    }
}

/// Accent color for an expert role, used for badges on the map and registry
pub fn role_color(role: crate::models::ExpertRole) -> Color {
    use crate::models::ExpertRole;
    match role {
        ExpertRole::Oversight => colors::VERMILION,
        ExpertRole::Quantum => colors::EMERALD,
        ExpertRole::Delay => colors::SIGNAL_BLUE,
        ExpertRole::Forensic => colors::AMBER,
        ExpertRole::Legal => colors::INDIGO,
    }
}
