//! Declarative chart specifications.
//!
//! A spec names a mark and maps dataset fields to visual channels, in the
//! Vega-Lite style. It is caller-constructed, validated only when rendered,
//! and never persisted. Unknown keys are carried through untouched so
//! richer documents survive a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Schema marker stamped onto resolved documents.
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Field-to-channel encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encoding {
    pub field: String,
    /// "quantitative" | "temporal" | "nominal" | "ordinal"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Encoding {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: name.into(),
            kind: None,
            title: None,
            extra: Map::new(),
        }
    }

    pub fn quantitative(mut self) -> Self {
        self.kind = Some("quantitative".to_string());
        self
    }

    pub fn temporal(mut self) -> Self {
        self.kind = Some("temporal".to_string());
        self
    }

    pub fn nominal(mut self) -> Self {
        self.kind = Some("nominal".to_string());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Axis label: explicit title, else the field name.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.field)
    }
}

/// Reference to a named dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRef {
    pub name: String,
}

/// Declarative mark + encoding chart document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Either a bare mark string ("line") or an object ({"type": "line"}).
    pub mark: Value,
    #[serde(default)]
    pub encoding: BTreeMap<String, Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartSpec {
    pub fn new(mark: impl Into<String>) -> Self {
        Self {
            mark: Value::String(mark.into()),
            encoding: BTreeMap::new(),
            title: None,
            width: None,
            height: None,
            data: None,
            extra: Map::new(),
        }
    }

    pub fn with_encoding(mut self, channel: impl Into<String>, encoding: Encoding) -> Self {
        self.encoding.insert(channel.into(), encoding);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The mark type, whether given as a string or an object.
    pub fn mark_type(&self) -> Option<&str> {
        match &self.mark {
            Value::String(s) => Some(s),
            Value::Object(o) => o.get("type").and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn x(&self) -> Option<&Encoding> {
        self.encoding.get("x")
    }

    pub fn y(&self) -> Option<&Encoding> {
        self.encoding.get("y")
    }

    /// Fill in a missing data reference with the named dataset.
    pub fn resolved(&self, data_name: &str) -> Self {
        let mut spec = self.clone();
        if spec.data.is_none() {
            spec.data = Some(DataRef {
                name: data_name.to_string(),
            });
        }
        spec
    }

    /// The fully-resolved declarative document, as returned for
    /// `format = "json"` renders.
    pub fn to_document(&self) -> Value {
        let mut document = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut document {
            if !map.contains_key("$schema") {
                map.insert(
                    "$schema".to_string(),
                    Value::String(VEGA_LITE_SCHEMA.to_string()),
                );
            }
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolved_fills_missing_data_reference() {
        let spec = ChartSpec::new("line")
            .with_encoding("x", Encoding::field("month").temporal())
            .with_encoding("y", Encoding::field("total_revenue").quantitative());

        let resolved = spec.resolved("s1");
        assert_eq!(resolved.data.as_ref().unwrap().name, "s1");

        // An explicit reference is left alone.
        let re_resolved = resolved.resolved("other");
        assert_eq!(re_resolved.data.unwrap().name, "s1");
    }

    #[test]
    fn document_carries_schema_and_encodings() {
        let spec = ChartSpec::new("line")
            .with_encoding("x", Encoding::field("month").temporal())
            .with_encoding("y", Encoding::field("total_revenue").quantitative())
            .resolved("s1");

        let document = spec.to_document();
        assert_eq!(document["$schema"], json!(VEGA_LITE_SCHEMA));
        assert_eq!(document["data"]["name"], json!("s1"));
        assert_eq!(document["mark"], json!("line"));
        assert_eq!(document["encoding"]["x"]["field"], json!("month"));
        assert_eq!(document["encoding"]["x"]["type"], json!("temporal"));
        assert_eq!(document["encoding"]["y"]["field"], json!("total_revenue"));
    }

    #[test]
    fn mark_type_accepts_string_or_object() {
        let bare = ChartSpec::new("bar");
        assert_eq!(bare.mark_type(), Some("bar"));

        let object: ChartSpec = serde_json::from_value(json!({
            "mark": {"type": "point", "filled": true},
            "encoding": {}
        }))
        .unwrap();
        assert_eq!(object.mark_type(), Some("point"));
    }

    #[test]
    fn unknown_keys_round_trip() {
        let parsed: ChartSpec = serde_json::from_value(json!({
            "mark": "line",
            "encoding": {"x": {"field": "m", "axis": {"grid": false}}},
            "transform": [{"filter": "datum.y > 0"}]
        }))
        .unwrap();

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["transform"][0]["filter"], json!("datum.y > 0"));
        assert_eq!(back["encoding"]["x"]["axis"]["grid"], json!(false));
    }
}
