//! Node colors and physical mass derived from sentiment and the special flag.

use super::types::Sentiment;

pub const DEFAULT_BACKGROUND: &str = "rgba(255, 255, 255, 0.1)";
pub const DEFAULT_BORDER: &str = "rgba(255, 255, 255, 0.3)";
pub const DEFAULT_FONT: &str = "rgba(255, 255, 255, 0.8)";

pub const POSITIVE_BACKGROUND: &str = "#FDB400";
pub const NEGATIVE_BACKGROUND: &str = "#1F2833";
pub const SPECIAL_BACKGROUND: &str = "rgba(138, 43, 226, 0.5)";
pub const ACCENT_BORDER: &str = "#FFFFFF";
pub const SPECIAL_FONT: &str = "#FFFFFF";

pub const EDGE_COLOR: &str = "255, 255, 255";
pub const EDGE_HIGHLIGHT: &str = "0, 191, 255";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	pub background: &'static str,
	pub border: &'static str,
	pub font_color: &'static str,
	pub mass: f32,
}

impl Default for NodeStyle {
	fn default() -> Self {
		Self {
			background: DEFAULT_BACKGROUND,
			border: DEFAULT_BORDER,
			font_color: DEFAULT_FONT,
			mass: 1.0,
		}
	}
}

impl NodeStyle {
	/// Special colors win over sentiment colors; either one doubles the mass.
	pub fn derive(sentiment: Sentiment, special: bool) -> Self {
		let base = Self::default();
		if special {
			return Self {
				background: SPECIAL_BACKGROUND,
				border: ACCENT_BORDER,
				font_color: SPECIAL_FONT,
				mass: 2.0,
			};
		}
		match sentiment {
			Sentiment::Positive => Self {
				background: POSITIVE_BACKGROUND,
				border: ACCENT_BORDER,
				mass: 2.0,
				..base
			},
			Sentiment::Negative => Self {
				background: NEGATIVE_BACKGROUND,
				border: ACCENT_BORDER,
				mass: 2.0,
				..base
			},
			Sentiment::Neutral => base,
		}
	}
}
