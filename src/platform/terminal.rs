//! Terminal front-end
//!
//! Raw-mode termion terminal. A reader thread forwards key presses over a
//! channel; the frame loop drains it once per frame. Drawing packs two grid
//! rows into each terminal line with upper-half-block glyphs in true color.

use std::fmt::Write as _;
use std::io::{self, Stdout, Write, stdin, stdout};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread::spawn;

use glam::IVec2;
use termion::color::{Bg, Fg};
use termion::cursor::{Goto, HideCursor};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::{IntoRawMode, RawTerminal};
use termion::{clear, color, style};

use crate::config::Rgb;
use crate::render::Scene;
use crate::sim::FrameInput;

/// Raw-mode terminal plus its key channel
pub struct Terminal {
    out: RawTerminal<HideCursor<Stdout>>,
    keys: Receiver<Key>,
}

impl Terminal {
    /// Enter raw mode, hide the cursor and start reading keys
    pub fn open() -> io::Result<Self> {
        let mut out = HideCursor::from(stdout()).into_raw_mode()?;
        write!(out, "{}{}", clear::All, Goto(1, 1))?;
        out.flush()?;

        let (tx, keys) = channel();
        spawn(move || {
            for key in stdin().keys() {
                match key {
                    Ok(key) => {
                        if tx.send(key).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        log::warn!("Key reader stopped: {}", err);
                        return;
                    }
                }
            }
        });

        Ok(Self { out, keys })
    }

    /// Collect every key pressed since the last frame
    pub fn poll_input(&self) -> FrameInput {
        let mut input = FrameInput::default();
        loop {
            match self.keys.try_recv() {
                Ok(key) => apply_key(&mut input, key),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Stdin closed: nothing can ask us to quit any more
                    input.quit = true;
                    break;
                }
            }
        }
        input
    }

    pub fn draw(&mut self, scene: &Scene) -> io::Result<()> {
        let frame = compose(scene);
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = write!(self.out, "{}{}{}", style::Reset, clear::All, Goto(1, 1));
        let _ = self.out.flush();
    }
}

/// Map a key press onto this frame's input
pub fn apply_key(input: &mut FrameInput, key: Key) {
    match key {
        Key::Left | Key::Char('a') | Key::Char('h') => input.left = true,
        Key::Right | Key::Char('d') | Key::Char('l') => input.right = true,
        Key::Char('q') | Key::Esc | Key::Ctrl('c') => input.quit = true,
        _ => {}
    }
}

fn rgb(c: Rgb) -> color::Rgb {
    color::Rgb(c.0, c.1, c.2)
}

/// Per-cell colors over the bordered range, row-major
fn cell_colors(scene: &Scene) -> Vec<Rgb> {
    let stride = (scene.columns + 2) as usize;
    let height = (scene.rows + 2) as usize;
    let mut colors = vec![scene.background; stride * height];

    let index = |cell: IVec2| -> Option<usize> {
        let (x, y) = (cell.x + 1, cell.y + 1);
        if x < 0 || y < 0 || x as usize >= stride || y as usize >= height {
            None
        } else {
            Some(y as usize * stride + x as usize)
        }
    };

    for y in -1..=scene.rows {
        for x in -1..=scene.columns {
            if x < 0 || y < 0 || x == scene.columns || y == scene.rows {
                if let Some(i) = index(IVec2::new(x, y)) {
                    colors[i] = scene.border;
                }
            }
        }
    }
    for block in &scene.blocks {
        if let Some(i) = index(block.cell) {
            colors[i] = block.color;
        }
    }
    for dy in 0..scene.paddle_size.y {
        for dx in 0..scene.paddle_size.x {
            if let Some(i) = index(scene.paddle.cell + IVec2::new(dx, dy)) {
                colors[i] = scene.paddle.color;
            }
        }
    }
    if let Some(i) = index(scene.ball_draw_cell()) {
        colors[i] = scene.ball.color;
    }
    colors
}

/// Full frame as escape-coded text, cursor-addressed from the top-left
pub fn compose(scene: &Scene) -> String {
    let stride = (scene.columns + 2) as usize;
    let height = (scene.rows + 2) as usize;
    let colors = cell_colors(scene);
    let mut frame = String::with_capacity(stride * height * 24);

    for (line, top) in (0..height).step_by(2).enumerate() {
        let _ = write!(frame, "{}", Goto(1, line as u16 + 1));
        for x in 0..stride {
            let upper = colors[top * stride + x];
            let lower = if top + 1 < height {
                colors[(top + 1) * stride + x]
            } else {
                scene.border
            };
            let _ = write!(frame, "{}{}\u{2580}", Fg(rgb(upper)), Bg(rgb(lower)));
        }
        let _ = write!(frame, "{}", style::Reset);
    }

    let status_line = height.div_ceil(2) as u16 + 1;
    let _ = write!(
        frame,
        "{}{}blocks {:>4}  frame {:>7}  \u{2190}/\u{2192} move  q quit",
        Goto(1, status_line),
        clear::CurrentLine,
        scene.blocks.len(),
        scene.frame
    );
    frame
}
