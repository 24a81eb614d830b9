//! Story configuration: the per-component metadata record serialized to
//! Storybook's server-framework JSON schema.

use serde::Serialize;
use serde_json::{Value, json};

use crate::args::Arg;
use crate::ordered::OrderedMap;

/// Per-component story configuration.
///
/// Built once at registration time and immutable thereafter; serialized
/// wholesale to `<title>.stories.json` on every build-pipeline run. The
/// `args` and `argTypes` maps preserve descriptor declaration order.
#[derive(Debug, Serialize)]
pub struct StoryConfig {
    /// Component title; also the config filename stem and the server id.
    pub title: String,
    /// Storybook server parameters.
    pub parameters: StoryParameters,
    /// Default argument values, keyed by descriptor name.
    pub args: OrderedMap,
    /// UI control descriptors, keyed by descriptor name.
    #[serde(rename = "argTypes")]
    pub arg_types: OrderedMap,
    /// Named story variants; the first is conventionally `"Default"`.
    pub stories: Vec<Story>,
}

/// The `parameters` object of a story config.
#[derive(Debug, Serialize)]
pub struct StoryParameters {
    /// Server-framework parameters.
    pub server: ServerParameters,
}

/// The `parameters.server` object; `id` tells Storybook which component
/// to fetch from the preview endpoint.
#[derive(Debug, Serialize)]
pub struct ServerParameters {
    /// Component id, equal to the config title.
    pub id: String,
}

/// A named preset of argument values, shown as a distinct preview variant.
#[derive(Debug, Serialize)]
pub struct Story {
    /// Variant name.
    pub name: String,
    /// Argument overrides for this variant.
    pub args: OrderedMap,
}

impl StoryConfig {
    /// Build a configuration for `title` from its argument descriptors.
    ///
    /// Populates `args` with each descriptor's default and `argTypes`
    /// with its control hint, in declaration order, then appends one
    /// `"Default"` story with no argument overrides.
    #[must_use]
    pub fn new(title: impl Into<String>, args: &[Arg]) -> Self {
        let title = title.into();
        let mut config = Self {
            parameters: StoryParameters {
                server: ServerParameters {
                    id: title.clone(),
                },
            },
            title,
            args: OrderedMap::new(),
            arg_types: OrderedMap::new(),
            stories: Vec::new(),
        };
        for arg in args {
            config.args.add(&arg.name, arg.value.clone());
            config
                .arg_types
                .add(&arg.name, json!({ "control": control_value(arg) }));
        }
        config.add_story("Default", &[]);
        config
    }

    /// Append a named story variant whose args are taken from the given
    /// descriptors' default values.
    pub fn add_story(&mut self, name: impl Into<String>, args: &[Arg]) {
        let story_args = OrderedMap::new();
        for arg in args {
            story_args.add(&arg.name, arg.value.clone());
        }
        self.stories.push(Story {
            name: name.into(),
            args: story_args,
        });
    }
}

fn control_value(arg: &Arg) -> Value {
    serde_json::to_value(&arg.control).expect("control hints serialize infallibly")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::IntConfig;

    #[test]
    fn test_new_config_matches_storybook_schema() {
        let config = StoryConfig::new("greeting", &[Arg::text("name", "World")]);

        let out = serde_json::to_string(&config).unwrap();

        assert_eq!(
            out,
            r#"{"title":"greeting","parameters":{"server":{"id":"greeting"}},"args":{"name":"World"},"argTypes":{"name":{"control":"text"}},"stories":[{"name":"Default","args":{}}]}"#
        );
    }

    #[test]
    fn test_args_and_arg_types_preserve_declaration_order() {
        let config = StoryConfig::new(
            "button",
            &[
                Arg::text("label", "Click"),
                Arg::boolean("disabled", false),
                Arg::integer("width", 80, IntConfig::default()),
            ],
        );

        let out = serde_json::to_string(&config).unwrap();

        assert!(out.contains(r#""args":{"label":"Click","disabled":false,"width":80}"#));
        assert!(out.contains(
            r#""argTypes":{"label":{"control":"text"},"disabled":{"control":"boolean"},"width":{"control":{"type":"number"}}}"#
        ));
    }

    #[test]
    fn test_add_story_appends_variant_with_its_args() {
        let loud = Arg::boolean("loud", true);
        let mut config = StoryConfig::new("banner", &[Arg::text("text", "hi"), loud.clone()]);

        config.add_story("Shouting", &[loud]);

        let out = serde_json::to_value(&config).unwrap();
        let stories = out["stories"].as_array().unwrap();
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0]["name"], "Default");
        assert_eq!(stories[0]["args"], serde_json::json!({}));
        assert_eq!(stories[1]["name"], "Shouting");
        assert_eq!(stories[1]["args"], serde_json::json!({ "loud": true }));
    }
}
