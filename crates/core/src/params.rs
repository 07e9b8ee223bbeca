//! Render parameters and the lenient JSON helpers used to read them.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! Sliders and number inputs upstream already constrain values, so the
//! helpers never fail; only a non-object parameter document is rejected.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::canvas::{Canvas, DEFAULT_BACKGROUND};
use crate::color::Srgb;
use crate::error::PosterError;
use crate::palette::{PaletteMode, DEFAULT_BASE_HUE};

const DEFAULT_LAYER_COUNT: usize = 8;
const DEFAULT_RADIUS: Range = Range::new(0.1, 0.3);
const DEFAULT_WOBBLE: Range = Range::new(0.05, 0.25);
const DEFAULT_OPACITY: Range = Range::new(0.3, 0.6);
const DEFAULT_SHADOW_OFFSET: f64 = 0.02;
const DEFAULT_WIDTH: u32 = 600;
const DEFAULT_HEIGHT: u32 = 800;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `u64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds for non-negative JSON integers.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a [`Range`] from `params[name]`.
///
/// Accepts a two-element array `[min, max]` or an object `{"min": .., "max": ..}`.
/// Anything else, including arrays of the wrong length, yields `default`.
pub fn param_range(params: &Value, name: &str, default: Range) -> Range {
    match params.get(name) {
        Some(Value::Array(items)) => match items.as_slice() {
            [min, max] => match (min.as_f64(), max.as_f64()) {
                (Some(min), Some(max)) => Range::new(min, max),
                _ => default,
            },
            _ => default,
        },
        Some(obj @ Value::Object(_)) => Range::new(
            param_f64(obj, "min", default.min),
            param_f64(obj, "max", default.max),
        ),
        _ => default,
    }
}

/// A closed interval sampled uniformly by the layer composer.
///
/// `min <= max` is expected but not enforced; a reversed range still samples
/// between its two bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies between the bounds, whichever order they are in.
    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        (lo..=hi).contains(&value)
    }

    fn to_json(self) -> Value {
        json!([self.min, self.max])
    }
}

/// Everything the caller controls about one poster.
///
/// Two identical `RenderParameters` values always produce the same poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParameters {
    pub layer_count: usize,
    pub radius: Range,
    pub wobble: Range,
    pub opacity: Range,
    pub shadow_offset: f64,
    pub mode: PaletteMode,
    pub seed: u64,
    pub base_hue: f64,
    pub background: Srgb,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            layer_count: DEFAULT_LAYER_COUNT,
            radius: DEFAULT_RADIUS,
            wobble: DEFAULT_WOBBLE,
            opacity: DEFAULT_OPACITY,
            shadow_offset: DEFAULT_SHADOW_OFFSET,
            mode: PaletteMode::default(),
            seed: 0,
            base_hue: DEFAULT_BASE_HUE,
            background: DEFAULT_BACKGROUND,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl RenderParameters {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    ///
    /// Returns `PosterError::ParamTypeMismatch` if `params` is not an object.
    pub fn from_json(params: &Value) -> Result<Self, PosterError> {
        if !params.is_object() {
            return Err(PosterError::ParamTypeMismatch {
                name: "params".to_string(),
                expected: "object".to_string(),
                got: json_type_name(params).to_string(),
            });
        }
        let d = Self::default();
        let background = params
            .get("background")
            .and_then(Value::as_str)
            .and_then(|hex| Srgb::from_hex(hex).ok())
            .unwrap_or(d.background);
        Ok(Self {
            layer_count: param_usize(params, "layer_count", d.layer_count),
            radius: param_range(params, "radius", d.radius),
            wobble: param_range(params, "wobble", d.wobble),
            opacity: param_range(params, "opacity", d.opacity),
            shadow_offset: param_f64(params, "shadow_offset", d.shadow_offset),
            mode: PaletteMode::from_name(&param_string(params, "mode", d.mode.name())),
            seed: param_u64(params, "seed", d.seed),
            base_hue: param_f64(params, "base_hue", d.base_hue),
            background,
            width: param_u64(params, "width", u64::from(d.width))
                .try_into()
                .unwrap_or(d.width),
            height: param_u64(params, "height", u64::from(d.height))
                .try_into()
                .unwrap_or(d.height),
        })
    }

    /// Current parameter values as a JSON object readable by [`Self::from_json`].
    pub fn to_json(&self) -> Value {
        json!({
            "layer_count": self.layer_count,
            "radius": self.radius.to_json(),
            "wobble": self.wobble.to_json(),
            "opacity": self.opacity.to_json(),
            "shadow_offset": self.shadow_offset,
            "mode": self.mode.name(),
            "seed": self.seed,
            "base_hue": self.base_hue,
            "background": self.background.to_hex(),
            "width": self.width,
            "height": self.height,
        })
    }

    /// The canvas described by `width`, `height` and `background`.
    pub fn canvas(&self) -> Result<Canvas, PosterError> {
        Canvas::new(self.width, self.height, self.background)
    }

    /// Schema describing every parameter: type, default, and the bounds the
    /// interactive controls offer.
    pub fn param_schema() -> Value {
        json!({
            "layer_count": {
                "type": "integer",
                "default": DEFAULT_LAYER_COUNT,
                "min": 3,
                "max": 20,
                "description": "Number of blob layers"
            },
            "radius": {
                "type": "range",
                "default": DEFAULT_RADIUS.to_json(),
                "min": 0.05,
                "max": 0.5,
                "description": "Base blob radius range, in poster widths"
            },
            "wobble": {
                "type": "range",
                "default": DEFAULT_WOBBLE.to_json(),
                "min": 0.01,
                "max": 0.5,
                "description": "Fraction by which the outline radius varies point to point"
            },
            "opacity": {
                "type": "range",
                "default": DEFAULT_OPACITY.to_json(),
                "min": 0.1,
                "max": 1.0,
                "description": "Fill opacity range"
            },
            "shadow_offset": {
                "type": "number",
                "default": DEFAULT_SHADOW_OFFSET,
                "min": 0.0,
                "max": 0.1,
                "description": "Shadow displacement right and down, in unit poster space"
            },
            "mode": {
                "type": "string",
                "default": PaletteMode::default().name(),
                "options": PaletteMode::list_names(),
                "description": "Palette mode; unknown names use the random policy"
            },
            "seed": {
                "type": "integer",
                "default": 0,
                "min": 0,
                "max": 9999,
                "description": "PRNG seed; equal seeds reproduce equal posters"
            },
            "base_hue": {
                "type": "number",
                "default": DEFAULT_BASE_HUE,
                "min": 0.0,
                "max": 1.0,
                "description": "Hue used by the mono palette"
            },
            "background": {
                "type": "color",
                "default": DEFAULT_BACKGROUND.to_hex(),
                "description": "Poster background color"
            },
            "width": {
                "type": "integer",
                "default": DEFAULT_WIDTH,
                "min": 1,
                "description": "Output width in pixels"
            },
            "height": {
                "type": "integer",
                "default": DEFAULT_HEIGHT,
                "min": 1,
                "description": "Output height in pixels"
            }
        })
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- helpers --

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"count": 10});
        assert_eq!(param_f64(&params, "count", 0.0), 10.0);
    }

    #[test]
    fn param_f64_returns_default_for_wrong_type() {
        let params = json!({"speed": "fast"});
        assert_eq!(param_f64(&params, "speed", 1.5), 1.5);
    }

    #[test]
    fn param_usize_rejects_negative_and_float() {
        let params = json!({"a": -1, "b": 2.5});
        assert_eq!(param_usize(&params, "a", 7), 7);
        assert_eq!(param_usize(&params, "b", 7), 7);
    }

    #[test]
    fn param_string_returns_default_for_missing_key() {
        assert_eq!(param_string(&json!({}), "mode", "pastel"), "pastel");
    }

    #[test]
    fn param_range_accepts_array_and_object() {
        let params = json!({"a": [0.1, 0.4], "b": {"min": 0.2, "max": 0.3}, "c": {"max": 0.9}});
        let d = Range::new(0.0, 1.0);
        assert_eq!(param_range(&params, "a", d), Range::new(0.1, 0.4));
        assert_eq!(param_range(&params, "b", d), Range::new(0.2, 0.3));
        assert_eq!(param_range(&params, "c", d), Range::new(0.0, 0.9));
    }

    #[test]
    fn param_range_falls_back_for_bad_shapes() {
        let params = json!({"a": [0.1], "b": [0.1, "x"], "c": 0.5});
        let d = Range::new(0.0, 1.0);
        for key in ["a", "b", "c", "missing"] {
            assert_eq!(param_range(&params, key, d), d, "key {key}");
        }
    }

    #[test]
    fn range_contains_handles_reversed_bounds() {
        let r = Range::new(0.6, 0.3);
        assert!(r.contains(0.3) && r.contains(0.45) && r.contains(0.6));
        assert!(!r.contains(0.61));
    }

    // -- RenderParameters --

    #[test]
    fn defaults_match_interactive_controls() {
        let p = RenderParameters::default();
        assert_eq!(p.layer_count, 8);
        assert_eq!(p.radius, Range::new(0.1, 0.3));
        assert_eq!(p.wobble, Range::new(0.05, 0.25));
        assert_eq!(p.opacity, Range::new(0.3, 0.6));
        assert_eq!(p.shadow_offset, 0.02);
        assert_eq!(p.mode, PaletteMode::Pastel);
        assert_eq!(p.seed, 0);
        assert_eq!((p.width, p.height), (600, 800));
    }

    #[test]
    fn from_json_empty_object_gives_defaults() {
        let p = RenderParameters::from_json(&json!({})).unwrap();
        assert_eq!(p, RenderParameters::default());
    }

    #[test]
    fn from_json_reads_every_key() {
        let p = RenderParameters::from_json(&json!({
            "layer_count": 3,
            "radius": [0.2, 0.4],
            "wobble": [0.0, 0.1],
            "opacity": [0.5, 0.5],
            "shadow_offset": 0.05,
            "mode": "mono",
            "seed": 1234,
            "base_hue": 0.25,
            "background": "#000000",
            "width": 300,
            "height": 200
        }))
        .unwrap();
        assert_eq!(p.layer_count, 3);
        assert_eq!(p.radius, Range::new(0.2, 0.4));
        assert_eq!(p.opacity, Range::new(0.5, 0.5));
        assert_eq!(p.mode, PaletteMode::Mono);
        assert_eq!(p.seed, 1234);
        assert_eq!(p.base_hue, 0.25);
        assert_eq!(p.background, Srgb::BLACK);
        assert_eq!((p.width, p.height), (300, 200));
    }

    #[test]
    fn from_json_unknown_mode_is_random() {
        let p = RenderParameters::from_json(&json!({"mode": "csv"})).unwrap();
        assert_eq!(p.mode, PaletteMode::Random);
    }

    #[test]
    fn from_json_bad_background_and_oversized_width_fall_back() {
        let p = RenderParameters::from_json(&json!({
            "background": "not a color",
            "width": u64::MAX
        }))
        .unwrap();
        assert_eq!(p.background, DEFAULT_BACKGROUND);
        assert_eq!(p.width, 600);
    }

    #[test]
    fn from_json_rejects_non_object() {
        let err = RenderParameters::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, PosterError::ParamTypeMismatch { ref got, .. } if got == "array"));
    }

    #[test]
    fn to_json_round_trips_through_from_json() {
        let p = RenderParameters {
            mode: PaletteMode::Vivid,
            seed: 42,
            background: Srgb::from_hex("#102030").unwrap(),
            ..RenderParameters::default()
        };
        let back = RenderParameters::from_json(&p.to_json()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn serde_struct_form_fills_missing_fields_with_defaults() {
        let p: RenderParameters =
            serde_json::from_str(r#"{"layer_count": 2, "radius": {"min": 0.1, "max": 0.2}}"#)
                .unwrap();
        assert_eq!(p.layer_count, 2);
        assert_eq!(p.radius, Range::new(0.1, 0.2));
        assert_eq!(p.seed, 0);
    }

    #[test]
    fn canvas_uses_dimensions_and_background() {
        let p = RenderParameters::default();
        let c = p.canvas().unwrap();
        assert_eq!((c.width(), c.height()), (600, 800));
        let mut bad = p;
        bad.width = 0;
        assert!(bad.canvas().is_err());
    }

    #[test]
    fn schema_has_entry_for_every_parameter() {
        let schema = RenderParameters::param_schema();
        let params = RenderParameters::default().to_json();
        for key in params.as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
        assert_eq!(schema["mode"]["options"].as_array().unwrap().len(), 5);
    }
}
