//! Terminal clock viewer.
//!
//! Layout:
//!   row 0            : current background summary (category + asset path)
//!   center / lower-right : time readout, seconds indicator underneath
//!   last row         : status bar (version, theme, share token)
//!
//! The background re-rolls at every minute boundary (and once at startup),
//! driven by a `PeriodicTrigger` whose callback only sends a tick over an
//! mpsc channel; the main loop drains it non-blockingly, so all state
//! stays on one thread. Every failure inside the loop degrades to
//! "retain last good state" — a missing manifest or an empty category
//! never interrupts the clock.

mod input;
mod readout;
mod terminal;

use std::sync::mpsc;

use chrono::{Local, Timelike};
use crossterm::event::{self, Event};
use log::{debug, info, warn};

use crate::config::Config;
use crate::manifest;
use crate::schedule::{PeriodicTrigger, Unit};
use crate::theme::{Background, HourMappingMode, ThemeDefinition};
use crate::token;

use input::{Action, map_key};
use terminal::Frame;

/// Run the viewer until the user quits.
pub fn run(config: Config) -> anyhow::Result<()> {
    terminal::check_tty()?;

    let settings = config.settings.clone();
    let mode = HourMappingMode::IncreaseDecrease;
    let source = manifest::source(&config.manifest_base, settings.theme);

    // Manifest failure is "no theme data yet", not a startup error;
    // loading is retried on later minute ticks.
    let mut definition = match manifest::load(&source) {
        Ok(d) => {
            info!("viewer: loaded {} with {} file(s)", source, d.files().len());
            Some(d)
        }
        Err(e) => {
            warn!("viewer: no theme data yet: {e:#}");
            None
        }
    };

    // Minute-boundary trigger; immediate so the clock starts with a
    // background. The callback just signals the main loop.
    let (tick_tx, tick_rx) = mpsc::channel::<()>();
    let mut trigger = PeriodicTrigger::start(Unit::Minute, true, move || {
        let _ = tick_tx.send(());
    });

    let mut guard = terminal::RawGuard::enter()?;
    let mut background: Option<Background> = None;
    let token = token::encode(&settings);
    let status = format!(
        " pizza-clock {} | {} | #{} | [r:re-roll q:quit]",
        version_string(),
        settings.theme.as_str(),
        truncate(&token, 16),
    );

    loop {
        // Coalesce queued minute ticks into one re-pick
        let mut repick = false;
        while tick_rx.try_recv().is_ok() {
            repick = true;
        }
        if repick {
            refresh_background(&mut definition, &source, mode, &mut background);
        }

        let now = Local::now();
        let time = now.format("%H:%M:%S").to_string();
        let readout =
            readout::render_readout(&time, settings.font_size, settings.letter_spacing);

        let seconds_rows = {
            let rows = readout::indicator_rows(settings.seconds_indicator_line_width);
            let width = readout.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            let second = now.second() as f64 + now.nanosecond() as f64 / 1e9;
            vec![readout::seconds_bar(width, second); rows]
        };

        let flip = background.as_ref().is_some_and(|b| b.flip);
        let background_line = background_summary(background.as_ref());
        terminal::draw(&Frame {
            readout: &readout,
            position: settings.clock_text_position,
            background_line: &background_line,
            flip,
            seconds_rows: &seconds_rows,
            status: &status,
        })?;

        if event::poll(config.viewer.tick)? {
            match event::read()? {
                Event::Key(key) => match map_key(key) {
                    Some(Action::Quit) => break,
                    Some(Action::Repick) => {
                        refresh_background(&mut definition, &source, mode, &mut background);
                    }
                    None => {}
                },
                // Size is re-queried every draw; nothing to do here
                Event::Resize(..) => {}
                _ => {}
            }
        }
    }

    trigger.cancel();
    guard.cleanup();
    Ok(())
}

/// Re-pick the background, retrying the manifest first if it has never
/// loaded. Keeps the previous background when no asset is available.
fn refresh_background(
    definition: &mut Option<ThemeDefinition>,
    source: &str,
    mode: HourMappingMode,
    background: &mut Option<Background>,
) {
    if definition.is_none() {
        match manifest::load(source) {
            Ok(d) => {
                info!("viewer: manifest recovered with {} file(s)", d.files().len());
                *definition = Some(d);
            }
            Err(e) => {
                warn!("viewer: manifest still unavailable: {e:#}");
                return;
            }
        }
    }
    if let Some(def) = definition {
        let hour = Local::now().hour();
        match def.choose_background(hour, mode, &mut rand::thread_rng()) {
            Some(bg) => {
                debug!("viewer: background {} ({}, flip={})", bg.path, bg.category, bg.flip);
                *background = Some(bg);
            }
            None => debug!("viewer: no asset for hour {hour}, keeping background"),
        }
    }
}

fn background_summary(background: Option<&Background>) -> String {
    match background {
        Some(b) if b.flip => format!("{} {} (mirrored)", b.category, b.path),
        Some(b) => format!("{} {}", b.category, b.path),
        None => "(no background)".to_string(),
    }
}

fn version_string() -> &'static str {
    let hash = env!("PIZZA_CLOCK_BUILD_GIT_HASH");
    if hash.is_empty() { "dev" } else { hash }
}

fn truncate(s: &str, max: usize) -> &str {
    // Tokens are ASCII, so byte slicing is safe here
    if s.len() <= max { s } else { &s[..max] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_plain() {
        let bg = Background {
            path: "assets/pizza_12p_3p_001.webp".into(),
            category: "3p".into(),
            flip: false,
        };
        assert_eq!(
            background_summary(Some(&bg)),
            "3p assets/pizza_12p_3p_001.webp"
        );
    }

    #[test]
    fn summary_mirrored() {
        let bg = Background {
            path: "a.webp".into(),
            category: "11p".into(),
            flip: true,
        };
        assert_eq!(background_summary(Some(&bg)), "11p a.webp (mirrored)");
    }

    #[test]
    fn summary_missing() {
        assert_eq!(background_summary(None), "(no background)");
    }

    #[test]
    fn truncate_token() {
        assert_eq!(truncate("abcdef", 4), "abcd");
        assert_eq!(truncate("ab", 4), "ab");
    }
}
