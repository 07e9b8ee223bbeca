//! Layer composition: turns [`RenderParameters`] into an ordered stack of
//! colored, translucent blobs.
//!
//! A single [`Xorshift64`] seeded from `params.seed` feeds every random
//! choice, in a fixed order, so equal parameters give bit-identical layers.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::color_table::ColorTable;
use crate::palette::{generate_palette, PaletteMode};
use crate::params::{Range, RenderParameters};
use crate::prng::Xorshift64;
use crate::shape::{generate_blob, Blob, BLOB_POINTS};

/// Size of the palette drawn once per poster, whatever the layer count.
pub const PALETTE_SIZE: usize = 6;

/// Blob centers are kept this far inside every poster edge.
const CENTER_MARGIN: f64 = 0.05;

/// Fill used when the palette is empty (an external table with no rows).
const FALLBACK_COLOR: Srgb = Srgb::gray(0.5);

/// One blob with its fill color and opacity.
///
/// A layer's index in the composed stack is its draw order: later layers
/// paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    shape: Blob,
    color: Srgb,
    opacity: f64,
}

impl Layer {
    pub fn new(shape: Blob, color: Srgb, opacity: f64) -> Self {
        Self {
            shape,
            color,
            opacity,
        }
    }

    pub fn shape(&self) -> &Blob {
        &self.shape
    }

    pub fn color(&self) -> Srgb {
        self.color
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

/// Composes `params.layer_count` layers.
///
/// Draw sequence: the palette first (skipped for external mode), then per
/// layer radius, wobble, center x, center y, the blob's outline points,
/// the color index, and finally opacity.
#[tracing::instrument(skip_all, fields(layers = params.layer_count, mode = %params.mode, seed = params.seed))]
pub fn compose_layers(params: &RenderParameters, external: Option<&ColorTable>) -> Vec<Layer> {
    let mut rng = Xorshift64::new(params.seed);
    let palette = generate_palette(PALETTE_SIZE, params.mode, params.base_hue, &mut rng, external);
    if palette.is_empty() && params.layer_count > 0 {
        tracing::warn!("palette is empty; filling every layer with the fallback gray");
    }

    let sample = |rng: &mut Xorshift64, r: Range| rng.next_range(r.min, r.max);
    let layers: Vec<Layer> = (0..params.layer_count)
        .map(|_| {
            let radius = sample(&mut rng, params.radius);
            let wobble = sample(&mut rng, params.wobble);
            let center = DVec2::new(
                rng.next_range(CENTER_MARGIN, 1.0 - CENTER_MARGIN),
                rng.next_range(CENTER_MARGIN, 1.0 - CENTER_MARGIN),
            );
            let shape = generate_blob(center, radius, BLOB_POINTS, wobble, &mut rng);
            let color = palette.pick(&mut rng).unwrap_or(FALLBACK_COLOR);
            let opacity = sample(&mut rng, params.opacity);
            Layer::new(shape, color, opacity)
        })
        .collect();

    tracing::debug!(palette = palette.len(), layers = layers.len(), "composed layers");
    layers
}

/// Whether `mode` needs an external color table to produce colors.
pub fn needs_color_table(mode: PaletteMode) -> bool {
    mode == PaletteMode::External
}
