//! In-memory fantasy console
//!
//! Two banks of palette indices, one active at a time, plus the random
//! source and button state a cart can query.

use crate::host::{Bank, Host};
use rand::prelude::*;

pub struct Console {
    width: u16,
    height: u16,
    banks: [Vec<u8>; 2],
    active: Bank,
    rng: StdRng,
    buttons: u8,
}

impl Console {
    pub fn new(width: u16, height: u16, seed: u64) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            banks: [vec![0; len], vec![0; len]],
            active: Bank::Low,
            rng: StdRng::seed_from_u64(seed),
            buttons: 0,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Palette index stored on `bank` at (x, y)
    #[cfg(test)]
    pub fn get(&self, bank: Bank, x: u16, y: u16) -> u8 {
        self.banks[bank.index()][self.offset(x, y)]
    }

    /// What a viewer sees at (x, y): the high bank unless it is transparent
    pub fn composite(&self, x: u16, y: u16) -> (Bank, u8) {
        let i = self.offset(x, y);
        match self.banks[Bank::High.index()][i] {
            0 => (Bank::Low, self.banks[Bank::Low.index()][i]),
            index => (Bank::High, index),
        }
    }

    /// Mark button `id` held until the next `release_buttons`
    pub fn press(&mut self, id: u8) {
        if id < 8 {
            self.buttons |= 1 << id;
        }
    }

    pub fn release_buttons(&mut self) {
        self.buttons = 0;
    }

    fn offset(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Host for Console {
    fn pixel_plot(&mut self, x: u16, y: u16, index: u8) {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            self.banks[self.active.index()][i] = index;
        }
    }

    fn select_bank(&mut self, bank: Bank) {
        self.active = bank;
    }

    fn clear_screen(&mut self, index: u8) {
        self.banks[self.active.index()].fill(index);
    }

    fn random_uint(&mut self) -> u32 {
        self.rng.gen()
    }

    fn button(&self, id: u8) -> bool {
        id < 8 && self.buttons & (1 << id) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_lands_on_active_bank_only() {
        let mut c = Console::new(4, 3, 1);
        c.select_bank(Bank::High);
        c.pixel_plot(1, 2, 9);
        assert_eq!(c.get(Bank::High, 1, 2), 9);
        assert_eq!(c.get(Bank::Low, 1, 2), 0);
    }

    #[test]
    fn test_high_bank_zero_is_transparent() {
        let mut c = Console::new(4, 3, 1);
        c.pixel_plot(0, 0, 5);
        assert_eq!(c.composite(0, 0), (Bank::Low, 5));

        c.select_bank(Bank::High);
        c.pixel_plot(0, 0, 3);
        assert_eq!(c.composite(0, 0), (Bank::High, 3));

        c.pixel_plot(0, 0, 0);
        assert_eq!(c.composite(0, 0), (Bank::Low, 5));
    }

    #[test]
    fn test_clear_fills_active_bank() {
        let mut c = Console::new(2, 2, 1);
        c.select_bank(Bank::High);
        c.clear_screen(7);
        assert!((0..2).all(|y| (0..2).all(|x| c.get(Bank::High, x, y) == 7)));
        assert_eq!(c.get(Bank::Low, 1, 1), 0);
    }

    #[test]
    fn test_out_of_bounds_plot_is_ignored() {
        let mut c = Console::new(2, 2, 1);
        c.pixel_plot(2, 0, 4);
        c.pixel_plot(0, 5, 4);
        assert!((0..2).all(|y| (0..2).all(|x| c.composite(x, y) == (Bank::Low, 0))));
    }

    #[test]
    fn test_same_seed_same_randoms() {
        let mut a = Console::new(1, 1, 42);
        let mut b = Console::new(1, 1, 42);
        let xs: Vec<u32> = (0..8).map(|_| a.random_uint()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.random_uint()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_buttons() {
        let mut c = Console::new(1, 1, 0);
        assert!(!c.button(4));
        c.press(4);
        assert!(c.button(4));
        assert!(!c.button(5));
        c.release_buttons();
        assert!(!c.button(4));
    }
}
