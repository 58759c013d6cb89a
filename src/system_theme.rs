//! System color-scheme signal.
//!
//! Terminals have no change notification for the color scheme, so the
//! initial value comes from `COLORFGBG` and changes are picked up by polling
//! an optional hint file containing `dark` or `light`.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::app::AppEvent;

/// Dark if `COLORFGBG` names a dark background, otherwise whatever the hint
/// file says, otherwise light.
pub fn prefers_dark(hint_file: Option<&Path>) -> bool {
    if let Some(dark) = std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| parse_colorfgbg(&v))
    {
        return dark;
    }
    hint_file.and_then(read_hint).unwrap_or(false)
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); backgrounds 0-6 and 8
/// are the dark ANSI colors.
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

fn parse_hint(contents: &str) -> Option<bool> {
    match contents.trim().to_ascii_lowercase().as_str() {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

fn read_hint(path: &Path) -> Option<bool> {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| parse_hint(&s))
}

/// Polls `path` and posts [`AppEvent::SystemTheme`] whenever its value
/// changes. Stops once the receiver is gone.
pub fn watch(path: PathBuf, interval: Duration, tx: Sender<AppEvent>) {
    let mut last = read_hint(&path);
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            let current = read_hint(&path);
            if current == last {
                continue;
            }
            last = current;
            if let Some(dark) = current {
                tracing::debug!(dark, path = %path.display(), "system theme changed");
                if tx.send(AppEvent::SystemTheme(dark)).is_err() {
                    return;
                }
            }
        }
    });
}
