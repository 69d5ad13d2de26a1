use crate::config::{MAX_INTENSITY, TIER_SPLIT};
use crate::host::Bank;
use crossterm::event::KeyCode;
use crossterm::style::Color;

/// Classic doom fire ramp, coolest to hottest
const DOOM_RAMP: [(u8, u8, u8); 37] = [
    (0x07, 0x07, 0x07), (0x1F, 0x07, 0x07), (0x2F, 0x0F, 0x07), (0x47, 0x0F, 0x07),
    (0x57, 0x17, 0x07), (0x67, 0x1F, 0x07), (0x77, 0x1F, 0x07), (0x8F, 0x27, 0x07),
    (0x9F, 0x2F, 0x07), (0xAF, 0x3F, 0x07), (0xBF, 0x47, 0x07), (0xC7, 0x47, 0x07),
    (0xDF, 0x4F, 0x07), (0xDF, 0x57, 0x07), (0xDF, 0x57, 0x07), (0xD7, 0x5F, 0x07),
    (0xD7, 0x5F, 0x07), (0xD7, 0x67, 0x0F), (0xCF, 0x6F, 0x0F), (0xCF, 0x77, 0x0F),
    (0xCF, 0x7F, 0x0F), (0xCF, 0x87, 0x17), (0xC7, 0x87, 0x17), (0xC7, 0x8F, 0x17),
    (0xC7, 0x97, 0x1F), (0xBF, 0x9F, 0x1F), (0xBF, 0x9F, 0x1F), (0xBF, 0xA7, 0x27),
    (0xBF, 0xA7, 0x27), (0xBF, 0xAF, 0x2F), (0xB7, 0xAF, 0x2F), (0xB7, 0xB7, 0x2F),
    (0xB7, 0xB7, 0x37), (0xCF, 0xCF, 0x6F), (0xDF, 0xDF, 0x9F), (0xEF, 0xEF, 0xC7),
    (0xFF, 0xFF, 0xFF),
];

/// Color scheme applied to both banks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    Fire,
    Ice,
    Toxic,
    Mono,
}

impl Scheme {
    #[cfg(test)]
    pub const ALL: [Scheme; 4] = [Scheme::Fire, Scheme::Ice, Scheme::Toxic, Scheme::Mono];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "fire" | "doom" => Some(Scheme::Fire),
            "ice" | "blue" => Some(Scheme::Ice),
            "toxic" | "green" => Some(Scheme::Toxic),
            "mono" | "grey" | "gray" => Some(Scheme::Mono),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Fire => "fire",
            Scheme::Ice => "ice",
            Scheme::Toxic => "toxic",
            Scheme::Mono => "mono",
        }
    }

    fn tint(self, (r, g, b): (u8, u8, u8)) -> (u8, u8, u8) {
        match self {
            Scheme::Fire => (r, g, b),
            Scheme::Ice => (b, g, r),
            Scheme::Toxic => (g, r, b),
            Scheme::Mono => {
                let l = (r as u16 * 3 + g as u16 * 6 + b as u16) / 10;
                (l as u8, l as u8, l as u8)
            }
        }
    }
}

/// Shared color scheme state for the run loop
#[derive(Clone, Copy)]
pub struct SchemeState {
    pub scheme: Scheme,
}

impl SchemeState {
    pub fn new(scheme: Scheme) -> Self {
        Self { scheme }
    }

    /// Handle color scheme key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('!') => self.scheme = Scheme::Fire,  // Shift+1
            KeyCode::Char('@') => self.scheme = Scheme::Ice,   // Shift+2
            KeyCode::Char('#') => self.scheme = Scheme::Toxic, // Shift+3
            KeyCode::Char('$') => self.scheme = Scheme::Mono,  // Shift+4
            _ => return false,
        }
        true
    }
}

/// Two 16-color banks. Low bank index `i` shows intensity `i`, high bank
/// index `i` shows intensity `i + 15`.
pub struct Palette {
    banks: [[(u8, u8, u8); 16]; 2],
}

impl Palette {
    pub fn new(scheme: Scheme) -> Self {
        let mut banks = [[(0, 0, 0); 16]; 2];
        for i in 1..16u8 {
            banks[Bank::Low.index()][i as usize] = scheme.tint(intensity_rgb(i));
            banks[Bank::High.index()][i as usize] = scheme.tint(intensity_rgb(i + TIER_SPLIT));
        }
        Self { banks }
    }

    pub fn rgb(&self, bank: Bank, index: u8) -> (u8, u8, u8) {
        self.banks[bank.index()][(index & 15) as usize]
    }

    pub fn color(&self, bank: Bank, index: u8) -> Color {
        let (r, g, b) = self.rgb(bank, index);
        Color::Rgb { r, g, b }
    }
}

/// Ramp color for intensity 0..=30; 0 is pure background
fn intensity_rgb(intensity: u8) -> (u8, u8, u8) {
    if intensity == 0 {
        return (0, 0, 0);
    }
    let i = intensity.min(MAX_INTENSITY) as usize;
    DOOM_RAMP[i * (DOOM_RAMP.len() - 1) / MAX_INTENSITY as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_black_on_both_banks() {
        for scheme in Scheme::ALL {
            let p = Palette::new(scheme);
            assert_eq!(p.rgb(Bank::Low, 0), (0, 0, 0));
            assert_eq!(p.rgb(Bank::High, 0), (0, 0, 0));
        }
    }

    #[test]
    fn test_hottest_is_white() {
        let p = Palette::new(Scheme::Fire);
        assert_eq!(p.rgb(Bank::High, 15), (0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn test_banks_continue_each_other() {
        let p = Palette::new(Scheme::Fire);
        assert_eq!(p.rgb(Bank::High, 1), intensity_rgb(16));
        assert_eq!(p.rgb(Bank::Low, 15), intensity_rgb(15));
    }

    #[test]
    fn test_scheme_names_round_trip() {
        for scheme in Scheme::ALL {
            assert_eq!(Scheme::from_name(scheme.name()), Some(scheme));
        }
        assert_eq!(Scheme::from_name("DOOM"), Some(Scheme::Fire));
        assert_eq!(Scheme::from_name("plasma"), None);
    }

    #[test]
    fn test_shift_digits_switch_scheme() {
        let mut state = SchemeState::new(Scheme::Fire);
        assert!(state.handle_key(KeyCode::Char('@')));
        assert_eq!(state.scheme, Scheme::Ice);
        assert!(state.handle_key(KeyCode::Char('$')));
        assert_eq!(state.scheme, Scheme::Mono);
        assert!(!state.handle_key(KeyCode::Char('x')));
        assert_eq!(state.scheme, Scheme::Mono);
    }
}
