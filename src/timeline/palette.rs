// src/timeline/palette.rs

use serde::Serialize;

/// A named colour used to tell timeline rows apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
}

pub const PALETTE: [PaletteColor; 12] = [
    PaletteColor { name: "blue", hex: "#3b82f6" },
    PaletteColor { name: "green", hex: "#10b981" },
    PaletteColor { name: "purple", hex: "#8b5cf6" },
    PaletteColor { name: "pink", hex: "#ec4899" },
    PaletteColor { name: "indigo", hex: "#6366f1" },
    PaletteColor { name: "red", hex: "#ef4444" },
    PaletteColor { name: "yellow", hex: "#eab308" },
    PaletteColor { name: "teal", hex: "#14b8a6" },
    PaletteColor { name: "orange", hex: "#f97316" },
    PaletteColor { name: "cyan", hex: "#06b6d4" },
    PaletteColor { name: "lime", hex: "#84cc16" },
    PaletteColor { name: "rose", hex: "#f43f5e" },
];

pub const PALETTE_SIZE: usize = PALETTE.len();

/// Colour for a palette index; indices wrap around.
pub fn color_for(index: usize) -> &'static PaletteColor {
    &PALETTE[index % PALETTE_SIZE]
}
