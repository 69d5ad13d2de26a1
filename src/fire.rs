//! Doom-style fire propagation
//!
//! Every lit pixel pushes its intensity one row up, drifting sideways by a
//! random amount and cooling by one half of the time. Dark pixels push
//! darkness straight up. The bottom row is fuel and is never rewritten.

use crate::config::{BACKGROUND, FUEL_INDEX, MAX_INTENSITY};
use crate::host::{Bank, Host};
use crate::plotter::Plotter;

/// Boot/frame lifecycle a console drives
pub trait Cart {
    fn boot<H: Host + ?Sized>(&mut self, host: &mut H);
    fn tic<H: Host + ?Sized>(&mut self, host: &mut H);
}

/// Index of the pixel that receives the heat of pixel `k` for random draw
/// `r` (0-3).
///
/// Plain `k - width - r + 1` arithmetic spills into the neighboring
/// row at the screen edges. Here the column is clamped so the target always
/// stays in the row directly above.
pub fn target_index(width: usize, k: usize, r: u32) -> usize {
    let x = (k % width) as isize;
    let y = k / width;
    let tx = (x + 1 - r as isize).clamp(0, width as isize - 1) as usize;
    (y - 1) * width + tx
}

/// Propagate pixel `k` into the row above. `k` must not be on row 0.
pub fn spread<H: Host + ?Sized>(plotter: &mut Plotter, host: &mut H, k: usize) {
    let width = plotter.width();
    let c = plotter.get(k);
    if c == 0 {
        plotter.plot(host, k - width, 0);
    } else {
        let r = host.random_uint() & 3;
        let value = c as i32 - (r & 1) as i32;
        plotter.plot(host, target_index(width, k, r), value);
    }
}

/// One full pass over the grid, column by column, skipping row 0.
///
/// Writes land in the live cache, so later cells in the same pass may see
/// heat that was pushed earlier in the pass.
pub fn step<H: Host + ?Sized>(plotter: &mut Plotter, host: &mut H) {
    let width = plotter.width();
    let height = plotter.height();
    for x in 0..width {
        for y in 1..height {
            spread(plotter, host, y * width + x);
        }
    }
}

/// The fire effect as a console cart
pub struct Fire {
    plotter: Plotter,
}

impl Fire {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            plotter: Plotter::new(width, height),
        }
    }

    #[cfg(test)]
    pub fn plotter(&self) -> &Plotter {
        &self.plotter
    }
}

impl Cart for Fire {
    fn boot<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.plotter.reset();

        host.select_bank(Bank::Low);
        host.clear_screen(BACKGROUND);
        host.select_bank(Bank::High);
        host.clear_screen(BACKGROUND);

        if self.plotter.is_empty() {
            return;
        }
        let width = self.plotter.width();
        let height = self.plotter.height();
        let bottom = self.plotter.len() - width;
        for x in 0..width {
            self.plotter.seed(bottom + x, MAX_INTENSITY);
            host.pixel_plot(x as u16, (height - 1) as u16, FUEL_INDEX);
        }
    }

    fn tic<H: Host + ?Sized>(&mut self, host: &mut H) {
        step(&mut self.plotter, host);
    }
}
