//! Argument descriptors: typed bindings from query parameters to
//! constructor arguments, plus the Storybook control hint for each.
//!
//! Extraction is deliberately lenient: a malformed query value is never an
//! error. Booleans are false unless the raw value is exactly `"true"`,
//! numbers fall back to zero on parse failure, and objects fall back to
//! the descriptor's default. Requests from the Storybook UI control panel
//! are best-effort and a bad value should not break the preview.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::Serializer;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::dispatch::{ArgKind, ArgValue};

/// Query parameters of a preview request.
///
/// `get` returns the raw value for a name, or the empty string when the
/// parameter is absent.
#[derive(Debug, Default)]
pub struct QueryValues(HashMap<String, String>);

impl QueryValues {
    /// Raw value for `name`, empty string if absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }
}

impl From<HashMap<String, String>> for QueryValues {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

type ExtractFn = Arc<dyn Fn(&QueryValues) -> ArgValue + Send + Sync>;

/// A typed specification of one bindable constructor parameter.
///
/// Carries the query-parameter name (also the JSON key in the story
/// config), the default value shown in the UI, the control hint, and the
/// extraction function that pulls a typed value out of a request's query
/// parameters. Immutable once constructed.
#[derive(Clone)]
pub struct Arg {
    /// Parameter name; unique within a component's descriptor list.
    pub name: String,
    /// Default value, serialized into the story config's `args` map.
    pub value: Value,
    /// UI control hint, serialized into `argTypes`.
    pub control: Control,
    /// Kind of value `extract` produces; validated against the
    /// constructor's declared parameters at registration.
    pub kind: ArgKind,
    extract: ExtractFn,
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Advisory bounds for an integer control. Passed through to the UI,
/// never enforced server-side.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntConfig {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub step: Option<i64>,
}

impl Arg {
    /// A text argument: extraction returns the raw query string, empty
    /// string when absent.
    pub fn text(name: impl Into<String>, default: impl Into<String>) -> Self {
        let name = name.into();
        let param = name.clone();
        Self {
            name,
            value: Value::String(default.into()),
            control: Control::Text,
            kind: ArgKind::Text,
            extract: Arc::new(move |q| ArgValue::Text(q.get(&param).to_string())),
        }
    }

    /// A boolean argument: true iff the raw query value is exactly
    /// `"true"`. Any other value, including `"TRUE"`, `"1"`, or absent,
    /// is false.
    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        let name = name.into();
        let param = name.clone();
        Self {
            name,
            value: Value::Bool(default),
            control: Control::Boolean,
            kind: ArgKind::Boolean,
            extract: Arc::new(move |q| ArgValue::Bool(q.get(&param) == "true")),
        }
    }

    /// A signed integer argument with optional advisory bounds. A value
    /// that fails to parse as base-10 extracts as `0`, silently.
    pub fn integer(name: impl Into<String>, default: i64, config: IntConfig) -> Self {
        let name = name.into();
        let param = name.clone();
        Self {
            name,
            value: Value::Number(Number::from(default)),
            control: Control::Number(NumberControl {
                kind: "number",
                min: config.min.map(Number::from),
                max: config.max.map(Number::from),
                step: config.step.map(Number::from),
            }),
            kind: ArgKind::Integer,
            extract: Arc::new(move |q| {
                ArgValue::Int(q.get(&param).parse().unwrap_or(0))
            }),
        }
    }

    /// A float argument with advisory bounds. A value that fails to parse
    /// extracts as `0.0`, silently.
    pub fn float(name: impl Into<String>, default: f64, min: f64, max: f64, step: f64) -> Self {
        let name = name.into();
        let param = name.clone();
        Self {
            name,
            value: Number::from_f64(default).map_or(Value::Null, Value::Number),
            control: Control::Number(NumberControl {
                kind: "number",
                min: Number::from_f64(min),
                max: Number::from_f64(max),
                step: Number::from_f64(step),
            }),
            kind: ArgKind::Float,
            extract: Arc::new(move |q| {
                ArgValue::Float(q.get(&param).parse().unwrap_or(0.0))
            }),
        }
    }

    /// An arbitrary JSON object argument. The raw query value is
    /// JSON-decoded; on decode failure the descriptor's default is echoed
    /// back unchanged.
    pub fn object(name: impl Into<String>, default: Value) -> Self {
        let name = name.into();
        let param = name.clone();
        let fallback = default.clone();
        Self {
            name,
            value: default,
            control: Control::Object,
            kind: ArgKind::Object,
            extract: Arc::new(move |q| {
                ArgValue::Json(serde_json::from_str(q.get(&param)).unwrap_or_else(|_| fallback.clone()))
            }),
        }
    }

    /// Extract this argument's value from the request query parameters.
    #[must_use]
    pub fn extract(&self, query: &QueryValues) -> ArgValue {
        (self.extract)(query)
    }
}

/// Storybook control hint for an argument.
///
/// Serializes as `"text"`, `"boolean"`, `"object"`, or
/// `{"type":"number", min?, max?, step?}`.
#[derive(Debug, Clone)]
pub enum Control {
    Text,
    Boolean,
    Object,
    Number(NumberControl),
}

/// The `{"type":"number"}` control with optional bounds. Integer bounds
/// stay integers in the emitted JSON.
#[derive(Debug, Clone, Serialize)]
pub struct NumberControl {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<Number>,
}

impl Serialize for Control {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Control::Text => serializer.serialize_str("text"),
            Control::Boolean => serializer.serialize_str("boolean"),
            Control::Object => serializer.serialize_str("object"),
            Control::Number(control) => control.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> QueryValues {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>()
            .into()
    }

    #[test]
    fn test_text_extracts_raw_value_and_empty_when_absent() {
        let arg = Arg::text("label", "default");

        assert_eq!(
            arg.extract(&query(&[("label", "Hi")])),
            ArgValue::Text("Hi".to_string())
        );
        assert_eq!(arg.extract(&query(&[])), ArgValue::Text(String::new()));
    }

    #[test]
    fn test_boolean_is_true_only_for_literal_true() {
        let arg = Arg::boolean("enabled", false);

        assert_eq!(arg.extract(&query(&[("enabled", "true")])), ArgValue::Bool(true));
        assert_eq!(arg.extract(&query(&[("enabled", "TRUE")])), ArgValue::Bool(false));
        assert_eq!(arg.extract(&query(&[("enabled", "1")])), ArgValue::Bool(false));
        assert_eq!(arg.extract(&query(&[])), ArgValue::Bool(false));
    }

    #[test]
    fn test_integer_parses_base_10_and_defaults_to_zero_on_failure() {
        let arg = Arg::integer("count", 7, IntConfig::default());

        assert_eq!(arg.extract(&query(&[("count", "42")])), ArgValue::Int(42));
        assert_eq!(arg.extract(&query(&[("count", "-3")])), ArgValue::Int(-3));
        assert_eq!(arg.extract(&query(&[("count", "abc")])), ArgValue::Int(0));
        assert_eq!(arg.extract(&query(&[])), ArgValue::Int(0));
    }

    #[test]
    fn test_float_defaults_to_zero_on_failure() {
        let arg = Arg::float("ratio", 0.5, 0.0, 1.0, 0.1);

        assert_eq!(arg.extract(&query(&[("ratio", "0.25")])), ArgValue::Float(0.25));
        assert_eq!(arg.extract(&query(&[("ratio", "oops")])), ArgValue::Float(0.0));
    }

    #[test]
    fn test_object_decodes_json_and_echoes_default_on_failure() {
        let arg = Arg::object("options", json!({"size": "large"}));

        assert_eq!(
            arg.extract(&query(&[("options", r#"{"size":"small"}"#)])),
            ArgValue::Json(json!({"size": "small"}))
        );
        assert_eq!(
            arg.extract(&query(&[("options", "not json")])),
            ArgValue::Json(json!({"size": "large"}))
        );
        assert_eq!(
            arg.extract(&query(&[])),
            ArgValue::Json(json!({"size": "large"}))
        );
    }

    #[test]
    fn test_controls_serialize_to_storybook_shapes() {
        let text = Arg::text("t", "");
        let toggled = Arg::boolean("b", true);
        let bounded = Arg::integer(
            "n",
            0,
            IntConfig {
                min: Some(0),
                max: Some(10),
                step: Some(2),
            },
        );
        let unbounded = Arg::integer("m", 0, IntConfig::default());

        assert_eq!(serde_json::to_string(&text.control).unwrap(), r#""text""#);
        assert_eq!(serde_json::to_string(&toggled.control).unwrap(), r#""boolean""#);
        assert_eq!(
            serde_json::to_string(&bounded.control).unwrap(),
            r#"{"type":"number","min":0,"max":10,"step":2}"#
        );
        assert_eq!(
            serde_json::to_string(&unbounded.control).unwrap(),
            r#"{"type":"number"}"#
        );
    }
}
