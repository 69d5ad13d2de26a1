//! Intensity plotter over the two color banks
//!
//! The plotter owns the cache of what was last drawn at every pixel and is
//! the only thing that writes pixels during a frame. Intensities 0-15 go to
//! the low bank as-is; 16-31 go to the high bank shifted down by 15, so the
//! high bank never receives its transparent index for a lit pixel.

use crate::config::{INTENSITY_MASK, TIER_SPLIT};
use crate::host::{Bank, Host};

pub struct Plotter {
    width: usize,
    height: usize,
    cache: Vec<u8>,
}

impl Plotter {
    pub fn new(width: u16, height: u16) -> Self {
        let width = width as usize;
        let height = height as usize;
        Self {
            width,
            height,
            cache: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Last intensity accepted for pixel `k`
    pub fn get(&self, k: usize) -> u8 {
        self.cache[k]
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[cfg(test)]
    pub fn cache(&self) -> &[u8] {
        &self.cache
    }

    /// Forget everything drawn; does not touch the display
    pub fn reset(&mut self) {
        self.cache.fill(0);
    }

    /// Store an intensity without drawing it. The caller is responsible for
    /// putting the matching pixel on screen.
    pub fn seed(&mut self, k: usize, value: u8) {
        self.cache[k] = value & INTENSITY_MASK as u8;
    }

    /// Draw intensity `value` at pixel `k`, skipping the host entirely when
    /// the pixel already shows it
    pub fn plot<H: Host + ?Sized>(&mut self, host: &mut H, k: usize, value: i32) {
        let v = (value.max(0) & INTENSITY_MASK) as u8;
        let prev = self.cache[k];
        if prev == v {
            return;
        }

        let x = (k % self.width) as u16;
        let y = (k / self.width) as u16;

        if v > TIER_SPLIT {
            host.select_bank(Bank::High);
            host.pixel_plot(x, y, v - TIER_SPLIT);
        } else {
            // A stale high-bank pixel would hide the low bank underneath
            if prev > TIER_SPLIT {
                host.select_bank(Bank::High);
                host.pixel_plot(x, y, 0);
            }
            host.select_bank(Bank::Low);
            host.pixel_plot(x, y, v);
        }

        self.cache[k] = v;
    }
}
