//! pizza-clock: a decorative clock for modern terminals.
//!
//! Each hour of the day maps to a themed background asset — a pizza with
//! an hour-dependent number of slices, or a freeform "circular" pool —
//! with a time readout drawn on top. Settings round-trip through a
//! URL-fragment-safe share token.
//!
//! Module map:
//! - [`settings`]: the schema-validated settings value and its bounds
//! - [`token`]: settings ⇄ share-token codec
//! - [`theme`]: hour-to-category mapping and random background choice
//! - [`manifest`]: theme manifest build/load (filename pattern parser)
//! - [`schedule`]: once-per-calendar-boundary trigger
//! - [`config`]: TOML config file + CLI override resolution
//! - [`viewer`]: the crossterm front end

pub mod config;
pub mod manifest;
pub mod schedule;
pub mod settings;
pub mod theme;
pub mod token;
pub mod viewer;
