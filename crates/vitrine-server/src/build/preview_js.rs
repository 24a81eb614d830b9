//! The fixed preview-bridge script written to `.storybook/preview.js`.
//!
//! Storybook's server framework fetches story HTML from an absolute URL
//! by default. The preview iframe and this server only share an origin at
//! the relative-path level, so the bridge rewrites the fetch to a
//! relative, same-origin URL. The file content is a fixed contract with
//! the external tool and is written verbatim.

pub const PREVIEW_JS: &str = r#"
// Customise fetch so that it uses a relative URL.
const fetchStoryHtml = async (url, path, params, context) => {
  const qs = new URLSearchParams(params);
  const response = await fetch("/storybook_preview/" + path + "?" + qs.toString());
  return response.text();
};

export const parameters = {
  server: {
    url: "http://localhost/storybook_preview", // Ignored by fetchStoryHtml.
    fetchStoryHtml,
  },
};
"#;
