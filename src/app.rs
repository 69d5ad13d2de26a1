//! Front ends that drive the fire cart: the interactive terminal loop and
//! the headless print and bench modes.

use crate::bench::Benchmark;
use crate::config::{resolve_seed, FireConfig, GridSize, HeadlessConfig, STATS_BUTTON};
use crate::console::Console;
use crate::fire::{Cart, Fire};
use crate::host::Host;
use crate::palette::{Palette, SchemeState};
use crate::terminal::{print_console, Terminal};
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Color;
use std::io::{self, Write};

/// What a keypress asks the loop to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reboot,
    Stats,
}

/// Runtime state for interactive controls
pub struct RunState {
    pub speed: f32,   // Current speed (time per frame)
    pub paused: bool,
}

impl RunState {
    pub fn new(initial_speed: f32) -> Self {
        Self {
            speed: initial_speed,
            paused: false,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('r') => return Action::Reboot,
            // Holding z reports once, not on every auto-repeat
            KeyCode::Char('z') if kind == KeyEventKind::Repeat => {}
            KeyCode::Char('z') => return Action::Stats,
            // Number keys: change speed (1=fastest, 9=slowest, 0=very slow)
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.speed = match c {
                    '0' => 0.2,
                    '1' => 0.005,
                    '2' => 0.01,
                    '3' => 0.016,
                    '4' => 0.03,
                    '5' => 0.05,
                    '6' => 0.07,
                    '7' => 0.1,
                    '8' => 0.15,
                    _ => 0.2,
                };
            }
            _ => {}
        }
        Action::None
    }
}

/// The fire cart, optionally under the timing overlay
enum Runner {
    Plain(Fire),
    Timed(Benchmark<Fire>),
}

impl Runner {
    fn new(width: u16, height: u16, bench: bool) -> Self {
        let fire = Fire::new(width, height);
        if bench {
            Runner::Timed(Benchmark::new(fire))
        } else {
            Runner::Plain(fire)
        }
    }

    fn report(&self) -> Option<&[String]> {
        match self {
            Runner::Plain(_) => None,
            Runner::Timed(b) => b.last_report(),
        }
    }

    fn final_report(&self) -> Option<Vec<String>> {
        match self {
            Runner::Plain(_) => None,
            Runner::Timed(b) => Some(b.stats().report()),
        }
    }
}

impl Cart for Runner {
    fn boot<H: Host + ?Sized>(&mut self, host: &mut H) {
        match self {
            Runner::Plain(c) => c.boot(host),
            Runner::Timed(c) => c.boot(host),
        }
    }

    fn tic<H: Host + ?Sized>(&mut self, host: &mut H) {
        match self {
            Runner::Plain(c) => c.tic(host),
            Runner::Timed(c) => c.tic(host),
        }
    }
}

/// Advance one frame unless paused. Buttons only last for the frame they
/// were pressed in, paused or not.
fn frame<C: Cart>(cart: &mut C, console: &mut Console, paused: bool) {
    if !paused {
        cart.tic(console);
    }
    console.release_buttons();
}

fn grid_size(size: GridSize, term: &Terminal) -> (u16, u16) {
    match size {
        GridSize::Fixed(w, h) => (w, h),
        GridSize::Fit => term.pixel_size(),
    }
}

/// Run the fire in the terminal until the user quits
pub fn run(config: FireConfig) -> io::Result<()> {
    let seed = resolve_seed(config.seed);
    let mut term = Terminal::new(true)?;
    term.clear_screen()?;

    let mut state = RunState::new(config.time_step);
    let mut schemes = SchemeState::new(config.scheme);
    let mut palette = Palette::new(schemes.scheme);

    let (mut w, mut h) = grid_size(config.size, &term);
    let mut console = Console::new(w, h, seed);
    let mut cart = Runner::new(w, h, config.bench);
    cart.boot(&mut console);
    tracing::info!(width = w, height = h, seed, "fire booted");

    loop {
        // Check for terminal resize - uses crossterm directly to get fresh size
        let (term_w, term_h) = term.size();
        let (new_w, new_h) = crossterm::terminal::size().unwrap_or((term_w, term_h));
        if new_w != term_w || new_h != term_h {
            term.resize(new_w, new_h);
            term.clear_screen()?;
            if config.size == GridSize::Fit {
                (w, h) = term.pixel_size();
                console = Console::new(w, h, seed);
                cart = Runner::new(w, h, config.bench);
                cart.boot(&mut console);
                tracing::debug!(width = w, height = h, "fire resized");
            }
        }

        if let Some((code, mods, kind)) = term.check_key()? {
            if schemes.handle_key(code) {
                palette = Palette::new(schemes.scheme);
                tracing::debug!(scheme = schemes.scheme.name(), "palette switched");
            } else {
                match state.handle_key(code, mods, kind) {
                    Action::Quit => break,
                    Action::Reboot => cart.boot(&mut console),
                    Action::Stats => console.press(STATS_BUTTON),
                    Action::None => {}
                }
            }
        }

        frame(&mut cart, &mut console, state.paused);
        if state.paused {
            term.sleep(0.1);
            continue;
        }

        term.clear();
        term.draw_console(&console, &palette);
        if let Some(report) = cart.report() {
            for (i, line) in report.iter().enumerate() {
                term.set_str(1, i as i32, line, Some(Color::White));
            }
        }
        term.present()?;
        term.sleep(state.speed);
    }

    let report = cart.final_report();
    drop(term);
    if let Some(lines) = report {
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Run a number of frames off-screen and print the result
pub fn print(config: HeadlessConfig, out: &mut impl Write) -> io::Result<()> {
    let mut console = Console::new(config.width, config.height, resolve_seed(config.seed));
    let mut fire = Fire::new(config.width, config.height);
    fire.boot(&mut console);
    for _ in 0..config.frames {
        fire.tic(&mut console);
    }
    print_console(out, &console, &Palette::new(config.scheme))?;
    out.flush()
}

/// Time a number of off-screen frames and print the averages
pub fn bench(config: HeadlessConfig, out: &mut impl Write) -> io::Result<()> {
    let mut console = Console::new(config.width, config.height, resolve_seed(config.seed));
    let mut cart = Benchmark::new(Fire::new(config.width, config.height));
    cart.boot(&mut console);
    for _ in 0..config.frames {
        cart.tic(&mut console);
    }
    for line in cart.stats().report() {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Scheme;

    fn headless(frames: u64) -> HeadlessConfig {
        HeadlessConfig {
            width: 16,
            height: 10,
            frames,
            seed: Some(7),
            scheme: Scheme::Fire,
        }
    }

    #[test]
    fn test_run_state_keys() {
        let mut state = RunState::new(0.03);
        assert_eq!(state.handle_key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press), Action::Quit);
        assert_eq!(state.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press), Action::Quit);
        assert_eq!(state.handle_key(KeyCode::Char('r'), KeyModifiers::NONE, KeyEventKind::Press), Action::Reboot);
        assert_eq!(state.handle_key(KeyCode::Char('z'), KeyModifiers::NONE, KeyEventKind::Press), Action::Stats);

        assert_eq!(state.handle_key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Press), Action::None);
        assert!(state.paused);

        state.handle_key(KeyCode::Char('1'), KeyModifiers::NONE, KeyEventKind::Press);
        assert!((state.speed - 0.005).abs() < f32::EPSILON);
        state.handle_key(KeyCode::Char('9'), KeyModifiers::NONE, KeyEventKind::Press);
        assert!((state.speed - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_held_stats_key_reports_once() {
        let mut state = RunState::new(0.03);
        let z = KeyCode::Char('z');
        assert_eq!(state.handle_key(z, KeyModifiers::NONE, KeyEventKind::Press), Action::Stats);
        assert_eq!(state.handle_key(z, KeyModifiers::NONE, KeyEventKind::Repeat), Action::None);
    }

    #[test]
    fn test_stats_press_while_paused_is_dropped() {
        let mut console = Console::new(8, 6, 1);
        let mut cart = Benchmark::new(Fire::new(8, 6));
        cart.boot(&mut console);

        console.press(STATS_BUTTON);
        frame(&mut cart, &mut console, true);
        assert_eq!(cart.stats().frames, 0);
        assert!(!console.button(STATS_BUTTON));

        frame(&mut cart, &mut console, false);
        assert_eq!(cart.stats().frames, 1);
        assert!(cart.last_report().is_none());
    }

    #[test]
    fn test_stats_press_lasts_one_frame() {
        let mut console = Console::new(8, 6, 1);
        let mut cart = Benchmark::new(Fire::new(8, 6));
        cart.boot(&mut console);

        console.press(STATS_BUTTON);
        frame(&mut cart, &mut console, false);
        assert!(cart.last_report().is_some());
        assert!(!console.button(STATS_BUTTON));
    }

    #[test]
    fn test_print_is_deterministic_for_a_seed() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        print(headless(12), &mut a).unwrap();
        print(headless(12), &mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!(String::from_utf8(a).unwrap().lines().count(), 5);
    }

    #[test]
    fn test_bench_reports_frame_count() {
        let mut out = Vec::new();
        bench(headless(25), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("frames: 25"));
        assert!(text.contains("frametime (in ms):"));
        assert!(text.contains("FPS:"));
    }

    #[test]
    fn test_runner_reports_only_when_timed() {
        let plain = Runner::new(4, 4, false);
        let timed = Runner::new(4, 4, true);
        assert!(plain.final_report().is_none());
        assert_eq!(timed.final_report().map(|r| r.len()), Some(4));
    }
}
