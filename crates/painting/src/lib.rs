//! TagMaster paint deposition core
//!
//! This crate holds everything about putting paint on the wall that does not
//! need a renderer:
//! - [`color`] - Paint colors and hex parsing
//! - [`pattern`] - Spray pattern selection
//! - [`tool`] - Tool state holder and immutable tool snapshots
//! - [`mark`] - Paint mark shape records
//! - [`generators`] - Per-pattern procedural mark generation
//! - [`drip`] - Probabilistic drip spawning
//! - [`raycast`] - Screen to NDC mapping and ray/wall intersection
//! - [`canvas`] - The owned scene model (wall, light, marks)
//! - [`deposit`] - The deposit pipeline tying it all together
//! - [`export`] - PNG encoding and artwork file naming
//! - [`layout`] - Viewport-dependent camera placement
//!
//! Bevy systems in `tagmaster-scene` drive this crate but it does not
//! depend on Bevy itself.

pub use glam;

pub mod canvas;
pub mod color;
pub mod constants;
pub mod deposit;
pub mod drip;
pub mod export;
pub mod generators;
pub mod layout;
pub mod mark;
pub mod pattern;
pub mod raycast;
pub mod tool;

pub use canvas::*;
pub use color::*;
pub use constants::*;
pub use deposit::*;
pub use drip::*;
pub use export::*;
pub use generators::generate;
pub use layout::*;
pub use mark::*;
pub use pattern::*;
pub use raycast::*;
pub use tool::*;
