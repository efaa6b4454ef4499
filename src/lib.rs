#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Guide lines for diffusion-limited aggregation sketches.
//!
//! - **geom**: the vector, point and line primitives the guides are built from
//! - **dla**: guide segments, segment orderings and the [`GuidePath`] cursor
//! - **parse**: XML guide documents
//!
//! JavaScript sketches use [`GuideWalker`], a thin wasm-bindgen wrapper around
//! a [`GuidePath`].

pub mod dla;
pub mod geom;
pub mod parse;

use std::fmt;

use dla::GuidePath;
use geom::{Point3, Vec3};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

/// Guide path handle for JavaScript callers.
#[wasm_bindgen]
pub struct GuideWalker {
    path: GuidePath,
}

#[wasm_bindgen]
impl GuideWalker {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> GuideWalker {
        GuideWalker {
            path: GuidePath::new(),
        }
    }

    /// Builds a walker from a `<guides>` XML document.
    #[wasm_bindgen(js_name = fromXml)]
    pub fn from_xml(xml: &str) -> Result<GuideWalker, JsValue> {
        let path = parse::guide_xml::parse_str(xml).map_err(to_js_error)?;
        Ok(GuideWalker { path })
    }

    #[wasm_bindgen(js_name = addLine)]
    #[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
    pub fn add_line(
        &mut self,
        ax: f64,
        ay: f64,
        az: f64,
        bx: f64,
        by: f64,
        bz: f64,
    ) -> Result<(), JsValue> {
        self.path
            .add_line(Point3::new(ax, ay, az), Point3::new(bx, by, bz))
            .map_err(to_js_error)?;
        Ok(())
    }

    /// Adds a polyline given as flat `[x0, y0, z0, x1, y1, z1, ...]` coordinates.
    #[wasm_bindgen(js_name = addPolyline)]
    pub fn add_polyline(&mut self, coords: &[f64]) -> Result<(), JsValue> {
        let points = points_from_flat(coords).map_err(|message| js_error(&message))?;
        self.path.add_polyline(&points).map_err(to_js_error)?;
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.path.reset().map_err(to_js_error)?;
        Ok(())
    }

    pub fn advance(&mut self, delta: f64) -> Result<(), JsValue> {
        self.path.advance(delta).map_err(to_js_error)?;
        Ok(())
    }

    /// Current position as `[x, y, z]`.
    pub fn position(&mut self) -> Result<Vec<f64>, JsValue> {
        let point = self.path.current_position().map_err(to_js_error)?;
        Ok(point.to_array().to_vec())
    }

    /// Current heading as a unit `[x, y, z]`.
    pub fn direction(&mut self) -> Result<Vec<f64>, JsValue> {
        let direction: Vec3 = self.path.current_direction().map_err(to_js_error)?;
        Ok(direction.to_array().to_vec())
    }

    pub fn progress(&self) -> Result<f64, JsValue> {
        self.path.current_segment_progress().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = isComplete)]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.path.is_complete()
    }

    #[wasm_bindgen(js_name = segmentCount)]
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.path.len()
    }

    /// Walks the whole path and returns the visited points as `[x, y, z]` arrays.
    pub fn sample(&mut self, delta: f64) -> Result<JsValue, JsValue> {
        let points: Vec<[f64; 3]> = self
            .path
            .sample(delta)
            .map_err(to_js_error)?
            .into_iter()
            .map(Point3::to_array)
            .collect();
        serde_wasm_bindgen::to_value(&points).map_err(to_js_error)
    }

    #[must_use]
    pub fn diagnostics(&self) -> String {
        self.path.diagnostics().to_string()
    }
}

impl Default for GuideWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl GuideWalker {
    /// The wrapped path, for native callers.
    #[must_use]
    pub fn path(&self) -> &GuidePath {
        &self.path
    }
}

fn points_from_flat(coords: &[f64]) -> Result<Vec<Point3>, String> {
    if coords.len() % 3 != 0 {
        return Err(format!(
            "polyline coordinates must come in xyz triples, got {} values",
            coords.len()
        ));
    }
    Ok(coords
        .chunks_exact(3)
        .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
        .collect())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::points_from_flat;
    use crate::geom::Point3;

    #[test]
    fn flat_coordinates_become_points() {
        let points = points_from_flat(&[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]).expect("triples");
        assert_eq!(points, vec![Point3::ORIGIN, Point3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn flat_coordinates_reject_partial_triples() {
        assert!(points_from_flat(&[0.0, 1.0]).is_err());
    }
}
