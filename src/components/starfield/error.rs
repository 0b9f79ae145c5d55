use thiserror::Error;
use wasm_bindgen::JsValue;

/// Reasons a frame could not be drawn. All of them skip the frame only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
	#[error("canvas element is not mounted")]
	Detached,
	#[error("2d drawing context unavailable")]
	MissingContext,
	#[error("surface has zero size ({width}x{height})")]
	ZeroDimension { width: f64, height: f64 },
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
