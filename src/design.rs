//! Design tokens
//!
//! Static tables shared by every page: color palettes, glass colors,
//! breakpoints, animation timings, radii and shadows. Served read-only at
//! `GET /api/design-system`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Shade keys present in every palette
pub const SHADES: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

/// A ten-step color ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub shades: [&'static str; 10],
}

impl Palette {
    /// Hex value for `shade`, or None if it isn't one of [`SHADES`]
    pub fn shade(&self, shade: u16) -> Option<&'static str> {
        SHADES
            .iter()
            .position(|&s| s == shade)
            .map(|idx| self.shades[idx])
    }
}

pub const PRIMARY: Palette = Palette {
    name: "primary",
    shades: [
        "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
        "#1e40af", "#1e3a8a",
    ],
};

pub const SECONDARY: Palette = Palette {
    name: "secondary",
    shades: [
        "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7c3aed",
        "#6b21a8", "#581c87",
    ],
};

pub const SUCCESS: Palette = Palette {
    name: "success",
    shades: [
        "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
        "#166534", "#14532d",
    ],
};

pub const WARNING: Palette = Palette {
    name: "warning",
    shades: [
        "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309",
        "#92400e", "#78350f",
    ],
};

pub const ERROR: Palette = Palette {
    name: "error",
    shades: [
        "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c",
        "#991b1b", "#7f1d1d",
    ],
};

pub const GRAY: Palette = Palette {
    name: "gray",
    shades: [
        "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155",
        "#1e293b", "#0f172a",
    ],
};

pub const PALETTES: [&Palette; 6] = [&PRIMARY, &SECONDARY, &SUCCESS, &WARNING, &ERROR, &GRAY];

pub const GLASS: &[(&str, &str)] = &[
    ("white", "rgba(255, 255, 255, 0.7)"),
    ("light", "rgba(255, 255, 255, 0.1)"),
    ("dark", "rgba(0, 0, 0, 0.1)"),
    ("primary", "rgba(59, 130, 246, 0.1)"),
    ("secondary", "rgba(168, 85, 247, 0.1)"),
];

/// Minimum viewport widths in pixels, smallest first
pub const BREAKPOINTS: &[(&str, u32)] = &[
    ("sm", 640),
    ("md", 768),
    ("lg", 1024),
    ("xl", 1280),
    ("2xl", 1536),
];

pub const EASINGS: &[(&str, &str)] = &[
    ("linear", "linear"),
    ("out", "cubic-bezier(0, 0, 0.2, 1)"),
    ("in", "cubic-bezier(0.4, 0, 1, 1)"),
    ("inOut", "cubic-bezier(0.4, 0, 0.2, 1)"),
    ("bounce", "cubic-bezier(0.68, -0.55, 0.265, 1.55)"),
];

pub const BORDER_RADIUS: &[(&str, &str)] = &[
    ("none", "0px"),
    ("sm", "0.125rem"),
    ("DEFAULT", "0.25rem"),
    ("md", "0.375rem"),
    ("lg", "0.5rem"),
    ("xl", "0.75rem"),
    ("2xl", "1rem"),
    ("3xl", "1.5rem"),
    ("full", "9999px"),
];

pub const SHADOWS: &[(&str, &str)] = &[
    ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
    ("DEFAULT", "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)"),
    ("md", "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
    ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)"),
    ("xl", "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)"),
    ("2xl", "0 25px 50px -12px rgb(0 0 0 / 0.25)"),
    ("inner", "inset 0 2px 4px 0 rgb(0 0 0 / 0.05)"),
    ("none", "0 0 #0000"),
    ("glass", "0 8px 32px 0 rgba(31, 38, 135, 0.37)"),
    ("glassHover", "0 8px 32px 0 rgba(31, 38, 135, 0.5)"),
];

/// Named animation speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Fast,
    Normal,
    Slow,
    Slower,
}

impl AnimationSpeed {
    pub const ALL: [AnimationSpeed; 4] = [
        AnimationSpeed::Fast,
        AnimationSpeed::Normal,
        AnimationSpeed::Slow,
        AnimationSpeed::Slower,
    ];

    pub fn millis(self) -> u64 {
        match self {
            AnimationSpeed::Fast => 150,
            AnimationSpeed::Normal => 300,
            AnimationSpeed::Slow => 500,
            AnimationSpeed::Slower => 750,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::from_millis(self.millis())
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Fast => "fast",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Slower => "slower",
        }
    }
}

pub fn palette(name: &str) -> Option<&'static Palette> {
    PALETTES.iter().copied().find(|p| p.name == name)
}

/// Look up `palette.shade`, e.g. `color("primary", 500)`
pub fn color(palette_name: &str, shade: u16) -> Option<&'static str> {
    palette(palette_name).and_then(|p| p.shade(shade))
}

/// Largest breakpoint whose minimum width fits in `width_px`
pub fn breakpoint_for(width_px: u32) -> Option<&'static str> {
    BREAKPOINTS
        .iter()
        .rev()
        .find(|(_, min)| width_px >= *min)
        .map(|(name, _)| *name)
}

// ============================================
// JSON VIEW
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct AnimationTokens {
    pub duration: BTreeMap<&'static str, String>,
    pub easing: BTreeMap<&'static str, &'static str>,
}

/// All tokens as served by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    pub colors: BTreeMap<&'static str, BTreeMap<u16, &'static str>>,
    pub glass: BTreeMap<&'static str, &'static str>,
    pub breakpoints: BTreeMap<&'static str, String>,
    pub animation: AnimationTokens,
    pub border_radius: BTreeMap<&'static str, &'static str>,
    pub shadows: BTreeMap<&'static str, &'static str>,
}

fn table(entries: &[(&'static str, &'static str)]) -> BTreeMap<&'static str, &'static str> {
    entries.iter().copied().collect()
}

pub fn design_tokens() -> DesignTokens {
    let colors = PALETTES
        .iter()
        .map(|p| (p.name, SHADES.iter().copied().zip(p.shades).collect()))
        .collect();

    DesignTokens {
        colors,
        glass: table(GLASS),
        breakpoints: BREAKPOINTS
            .iter()
            .map(|(name, px)| (*name, format!("{}px", px)))
            .collect(),
        animation: AnimationTokens {
            duration: AnimationSpeed::ALL
                .iter()
                .map(|s| (s.name(), format!("{}ms", s.millis())))
                .collect(),
            easing: table(EASINGS),
        },
        border_radius: table(BORDER_RADIUS),
        shadows: table(SHADOWS),
    }
}
