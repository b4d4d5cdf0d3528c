use std::fmt;

use serde::{Deserialize, Serialize};

use super::palette::NodeStyle;

/// Node identifier assigned by the analysis service.
///
/// Kept in the JSON shape it arrived in so requests echo it back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
	/// Numeric identifier.
	Int(i64),
	/// Textual identifier, usually the word itself.
	Text(String),
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Int(n) => write!(f, "{n}"),
			NodeId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for NodeId {
	fn from(n: i64) -> Self {
		NodeId::Int(n)
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		NodeId::Text(s.to_owned())
	}
}

impl From<String> for NodeId {
	fn from(s: String) -> Self {
		NodeId::Text(s)
	}
}

/// Edge identifier, `"<from>-<to>"` for the ordered endpoint pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
	pub fn between(from: &NodeId, to: &NodeId) -> Self {
		Self(format!("{from}-{to}"))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for EdgeId {
	fn from(s: String) -> Self {
		Self(s)
	}
}

/// Tri-state sentiment tag. Unknown wire values read as neutral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
	Positive,
	Negative,
	#[default]
	#[serde(other)]
	Neutral,
}

impl Sentiment {
	pub fn as_str(self) -> &'static str {
		match self {
			Sentiment::Positive => "positive",
			Sentiment::Negative => "negative",
			Sentiment::Neutral => "neutral",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub label: String,
	pub sentiment: Sentiment,
	pub special: bool,
	/// Size hint from the service (frequency based, roughly 10..30).
	pub value: Option<f64>,
}

impl GraphNode {
	pub fn new(id: impl Into<NodeId>) -> Self {
		let id = id.into();
		Self {
			label: id.to_string(),
			id,
			sentiment: Sentiment::Neutral,
			special: false,
			value: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
		self.sentiment = sentiment;
		self
	}

	pub fn style(&self) -> NodeStyle {
		NodeStyle::derive(self.sentiment, self.special)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: EdgeId,
	pub from: NodeId,
	pub to: NodeId,
	/// Normalized weight in `0..=1` when the service provides one.
	pub value: Option<f64>,
}

impl GraphEdge {
	pub fn new(from: NodeId, to: NodeId) -> Self {
		Self {
			id: EdgeId::between(&from, &to),
			from,
			to,
			value: None,
		}
	}

	pub fn touches(&self, id: &NodeId) -> bool {
		&self.from == id || &self.to == id
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}
