#![deny(unsafe_code)]
//! Core types and algorithms for the blob-poster generative art system.
//!
//! Provides the seeded `Xorshift64` PRNG, `Srgb`/HSV colors, `Palette`
//! generation across `PaletteMode`s, `Blob` shape synthesis, `Layer`
//! composition from `RenderParameters`, and the two-pass shadow/fill
//! renderer that draws a `Poster` onto any `Surface`.

pub mod canvas;
pub mod color;
pub mod color_table;
pub mod compose;
pub mod error;
pub mod palette;
pub mod params;
pub mod poster;
pub mod prng;
pub mod render;
pub mod shape;

pub use canvas::Canvas;
pub use color::{Hsv, Srgb};
pub use color_table::{ColorTable, ColorTableProvider, NamedColor};
pub use compose::{compose_layers, Layer};
pub use error::PosterError;
pub use palette::{generate_palette, Palette, PaletteMode};
pub use params::{Range, RenderParameters};
pub use poster::{generate, render_poster, Poster};
pub use prng::Xorshift64;
pub use render::{Surface, TextStyle};
pub use shape::{generate_blob, Blob};
