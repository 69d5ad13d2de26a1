use crate::palette::Scheme;

/// Screen width of the console the effect was designed for
pub const DEFAULT_WIDTH: u16 = 240;
/// Screen height of the console the effect was designed for
pub const DEFAULT_HEIGHT: u16 = 136;

/// Hottest intensity; the bottom row is pinned to it
pub const MAX_INTENSITY: u8 = 30;
/// Intensities above this live on the high bank
pub const TIER_SPLIT: u8 = 15;
/// Intensities are reduced to their low five bits before plotting
pub const INTENSITY_MASK: i32 = 31;
/// Palette index of the fuel row on the high bank (MAX_INTENSITY - TIER_SPLIT)
pub const FUEL_INDEX: u8 = MAX_INTENSITY - TIER_SPLIT;
/// Palette index used to clear both banks
pub const BACKGROUND: u8 = 0;
/// Button that asks the benchmark overlay for a report (A)
pub const STATS_BUTTON: u8 = 4;

/// Grid size: fixed, or fitted to whatever surface displays it
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridSize {
    Fixed(u16, u16),
    Fit,
}

/// Fully resolved configuration for one run
#[derive(Clone, Debug)]
pub struct FireConfig {
    pub size: GridSize,
    pub time_step: f32,
    pub seed: Option<u64>,
    pub scheme: Scheme,
    pub bench: bool,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            size: GridSize::Fit,
            time_step: 0.03,
            seed: None,
            scheme: Scheme::Fire,
            bench: false,
        }
    }
}

/// Configuration for the headless modes
#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    pub width: u16,
    pub height: u16,
    pub frames: u64,
    pub seed: Option<u64>,
    pub scheme: Scheme,
}

/// Seed from config, or the wall clock when none was given
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    })
}
