//! Editor configuration: service location, request timeout, layout physics.

use std::time::Duration;

use force_graph::SimulationParameters;
use log::{info, warn};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlMetaElement;

/// Prefix of the `<meta name="...">` tags read by [`EditorConfig::from_document`].
pub const META_PREFIX: &str = "graph-editor:";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("unknown config key `{0}`")]
	UnknownKey(String),
	#[error("invalid value `{value}` for `{key}`: {reason}")]
	InvalidValue {
		key: String,
		value: String,
		reason: String,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub stabilization_iterations: usize,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			stabilization_iterations: 150,
		}
	}
}

impl PhysicsConfig {
	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	/// Prefix for service paths. Empty means same origin.
	pub api_base: String,
	pub request_timeout: Duration,
	pub physics: PhysicsConfig,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			api_base: String::new(),
			request_timeout: Duration::from_secs(15),
			physics: PhysicsConfig::default(),
		}
	}
}

impl EditorConfig {
	/// Apply a single `key = value` override.
	pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
		let invalid = |reason: &str| ConfigError::InvalidValue {
			key: key.to_owned(),
			value: value.to_owned(),
			reason: reason.to_owned(),
		};
		match key {
			"api-base" => {
				self.api_base = value.trim().trim_end_matches('/').to_owned();
			}
			"timeout-ms" => {
				let ms: u64 = value.trim().parse().map_err(|_| invalid("not an integer"))?;
				if ms == 0 {
					return Err(invalid("must be positive"));
				}
				self.request_timeout = Duration::from_millis(ms);
			}
			"stabilization-iterations" => {
				self.physics.stabilization_iterations =
					value.trim().parse().map_err(|_| invalid("not an integer"))?;
			}
			_ => return Err(ConfigError::UnknownKey(key.to_owned())),
		}
		Ok(())
	}

	/// Defaults overridden by `<meta name="graph-editor:KEY" content="VALUE">` tags.
	/// Bad overrides are logged and skipped.
	pub fn from_document() -> Self {
		let mut config = Self::default();
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return config;
		};
		let Ok(metas) = document.query_selector_all("meta[name]") else {
			return config;
		};
		for i in 0..metas.length() {
			let Some(meta) = metas
				.item(i)
				.and_then(|n| n.dyn_into::<HtmlMetaElement>().ok())
			else {
				continue;
			};
			let name = meta.name();
			let Some(key) = name.strip_prefix(META_PREFIX) else {
				continue;
			};
			if let Err(e) = config.apply(key, &meta.content()) {
				warn!("Ignoring config override: {e}");
			}
		}
		info!(
			"Editor config: api_base={:?} timeout={:?}",
			config.api_base, config.request_timeout
		);
		config
	}

	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.api_base, path.trim_start_matches('/'))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overrides_are_parsed() {
		let mut config = EditorConfig::default();
		config.apply("api-base", " http://localhost:5000/ ").unwrap();
		config.apply("timeout-ms", "2500").unwrap();
		config.apply("stabilization-iterations", "40").unwrap();
		assert_eq!(config.api_base, "http://localhost:5000");
		assert_eq!(config.request_timeout, Duration::from_millis(2500));
		assert_eq!(config.physics.stabilization_iterations, 40);
		assert_eq!(config.endpoint("/analyze"), "http://localhost:5000/analyze");
	}

	#[test]
	fn same_origin_by_default() {
		assert_eq!(EditorConfig::default().endpoint("clear"), "/clear");
	}

	#[test]
	fn bad_overrides_are_rejected() {
		let mut config = EditorConfig::default();
		assert_eq!(
			config.apply("colour", "red"),
			Err(ConfigError::UnknownKey("colour".into()))
		);
		assert!(matches!(
			config.apply("timeout-ms", "0"),
			Err(ConfigError::InvalidValue { .. })
		));
		assert!(config.apply("timeout-ms", "soon").is_err());
		assert_eq!(config, EditorConfig::default());
	}
}
