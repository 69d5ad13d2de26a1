//! Host console primitives
//!
//! The fire core never draws directly. Everything it needs from the console
//! (pixel writes, bank switching, clearing, randomness, buttons) goes
//! through the [`Host`] trait.

/// One of the two stacked color banks.
///
/// `High` is composited over `Low`; palette index 0 on `High` is transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bank {
    Low = 0,
    High = 1,
}

impl Bank {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Primitives provided by the console the cart runs on
pub trait Host {
    /// Write one pixel on the currently selected bank
    fn pixel_plot(&mut self, x: u16, y: u16, index: u8);

    /// Switch the bank that subsequent plots and clears address
    fn select_bank(&mut self, bank: Bank);

    /// Fill the currently selected bank
    fn clear_screen(&mut self, index: u8);

    /// Random value; callers only rely on the low bits being uniform
    fn random_uint(&mut self) -> u32;

    /// Whether button `id` is held this frame
    fn button(&self, _id: u8) -> bool {
        false
    }
}
