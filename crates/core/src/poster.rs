//! The generation entry point.
//!
//! [`generate`] composes a [`Poster`] from parameters; [`Poster::render`]
//! draws it onto a [`Surface`]. [`render_poster`] does both in one call.

use serde::Serialize;

use crate::canvas::Canvas;
use crate::color_table::{ColorTable, ColorTableProvider};
use crate::compose::{compose_layers, needs_color_table, Layer};
use crate::error::PosterError;
use crate::params::RenderParameters;
use crate::render::{poster_label, render_layers, Surface};

/// A fully composed poster, ready to render any number of times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Poster {
    canvas: Canvas,
    layers: Vec<Layer>,
    shadow_offset: f64,
    label: String,
}

impl Poster {
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn shadow_offset(&self) -> f64 {
        self.shadow_offset
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Draws the poster: background, shadows, fills, label.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render_layers(
            &self.canvas,
            &self.layers,
            self.shadow_offset,
            &self.label,
            surface,
        );
    }
}

/// Composes a poster from `params`.
///
/// The color table is requested from `tables` only when the palette mode is
/// external, and at most once. Fails only if the canvas dimensions are zero
/// or the provider cannot produce a table.
#[tracing::instrument(skip_all, fields(mode = %params.mode, seed = params.seed))]
pub fn generate(
    params: &RenderParameters,
    tables: &dyn ColorTableProvider,
) -> Result<Poster, PosterError> {
    let canvas = params.canvas()?;
    let table: Option<ColorTable> = if needs_color_table(params.mode) {
        Some(tables.color_table()?)
    } else {
        None
    };
    let layers = compose_layers(params, table.as_ref());
    Ok(Poster {
        canvas,
        layers,
        shadow_offset: params.shadow_offset,
        label: poster_label(params.mode),
    })
}

/// Generates a poster and draws it onto `surface` in one step.
pub fn render_poster<S: Surface + ?Sized>(
    params: &RenderParameters,
    tables: &dyn ColorTableProvider,
    surface: &mut S,
) -> Result<Poster, PosterError> {
    let poster = generate(params, tables)?;
    poster.render(surface);
    Ok(poster)
}
