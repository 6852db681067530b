//! Terminal output: colored `log!`/`debug!` lines and a bake progress line.
//!
//! ```ignore
//! log!("bake"; "compressing {} files", count);
//! debug!("serve"; "GET {} → {}", path, status); // only with --verbose
//!
//! let progress = ProgressLine::new("bake", files.len());
//! progress.record(payload.len());             // from any rayon worker
//! progress.finish();                          // [bake] compress(42/42) 1.3 MiB
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{StdoutLock, Write, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Print `message` under a `[module]` prefix, replacing any partial line.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();
    clear_line(&mut stdout);
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold().to_string(),
        "bake" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

fn clear_line(stdout: &mut StdoutLock<'_>) {
    execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
}

/// Render a byte count with a binary unit (`512 B`, `2.0 KiB`).
#[allow(clippy::cast_precision_loss)]
pub fn human_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

// ============================================================================
// Progress line
// ============================================================================

/// Single-line compression progress: files done out of total, bytes emitted.
///
/// Updated from worker threads. Redraws use `try_lock`, so a worker never
/// waits on the terminal; a skipped redraw is caught up by the next one.
pub struct ProgressLine {
    module: &'static str,
    total: usize,
    done: AtomicUsize,
    bytes: AtomicUsize,
    redraw: Mutex<()>,
}

impl ProgressLine {
    pub fn new(module: &'static str, total: usize) -> Self {
        let progress = Self {
            module,
            total,
            done: AtomicUsize::new(0),
            bytes: AtomicUsize::new(0),
            redraw: Mutex::new(()),
        };
        progress.draw(false);
        progress
    }

    /// Count one finished file that produced `bytes` of payload.
    pub fn record(&self, bytes: usize) {
        self.done.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
        if let Some(_guard) = self.redraw.try_lock() {
            self.draw(false);
        }
    }

    fn render(&self) -> String {
        format!(
            "compress({}/{}) {}",
            self.done.load(Ordering::Relaxed),
            self.total,
            human_bytes(self.bytes.load(Ordering::Relaxed))
        )
    }

    fn draw(&self, newline: bool) {
        let line = format!("{} {}", colorize_prefix(self.module), self.render());
        let mut stdout = stdout().lock();
        clear_line(&mut stdout);
        if newline {
            writeln!(stdout, "{line}").ok();
        } else {
            write!(stdout, "{line}").ok();
        }
        stdout.flush().ok();
    }

    /// Leave the final counts on screen and release the line.
    pub fn finish(self) {
        {
            let _guard = self.redraw.lock();
            self.draw(true);
        }
        std::mem::forget(self);
    }
}

impl Drop for ProgressLine {
    // abandoned without `finish` (error path): wipe the partial line
    fn drop(&mut self) {
        let mut stdout = stdout().lock();
        clear_line(&mut stdout);
        stdout.flush().ok();
    }
}
