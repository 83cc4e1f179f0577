//! Templates for the Swagger UI page shell, initializer script and stylesheet.
//!
//! Auto-escaping follows the template name: HTML for `.html`, JSON literals for
//! `.js` and none for `.css`. Every configuration string reaching the
//! initializer script is therefore emitted as a quoted JS string.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::config::SwaggerUiConfig;
use crate::error::UiError;

pub const INDEX_TEMPLATE_NAME: &str = "index.html";
pub const INITIALIZER_TEMPLATE_NAME: &str = "swagger-initializer.js";
pub const STYLESHEET_TEMPLATE_NAME: &str = "index.css";
const LISTING_TEMPLATE_NAME: &str = "listing.html";

/// Output of a template render.
///
/// `body` keeps whatever was written before a failure so callers can still
/// serve best-effort output.
#[derive(Debug)]
pub struct Rendered {
    pub body: String,
    pub error: Option<minijinja::Error>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the built-in templates.
    pub fn new() -> Result<Self, UiError> {
        let mut env = Environment::new();

        env.add_template_owned(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        env.add_template_owned(INITIALIZER_TEMPLATE_NAME, INITIALIZER_TEMPLATE)?;
        env.add_template_owned(STYLESHEET_TEMPLATE_NAME, STYLESHEET_TEMPLATE)?;
        env.add_template_owned(LISTING_TEMPLATE_NAME, LISTING_TEMPLATE)?;

        Ok(Self { env })
    }

    /// Render the HTML page shell.
    pub fn render_index(&self, config: &SwaggerUiConfig) -> Rendered {
        self.render(INDEX_TEMPLATE_NAME, config)
    }

    /// Render the script that boots `SwaggerUIBundle`.
    pub fn render_initializer(&self, config: &SwaggerUiConfig) -> Rendered {
        self.render(INITIALIZER_TEMPLATE_NAME, config)
    }

    pub fn render_stylesheet(&self, config: &SwaggerUiConfig) -> Rendered {
        self.render(STYLESHEET_TEMPLATE_NAME, config)
    }

    /// Render a plain listing of directory entries.
    pub fn render_listing(&self, entries: &[String]) -> Rendered {
        self.render(LISTING_TEMPLATE_NAME, context! { entries => entries })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Rendered {
        let mut out = Vec::new();

        let error = match self.env.get_template(name) {
            Ok(tmpl) => tmpl.render_captured_to(ctx, &mut out).err(),
            Err(e) => Some(e),
        };

        Rendered {
            body: String::from_utf8_lossy(&out).into_owned(),
            error,
        }
    }

    /// Replace a built-in template.
    #[cfg(test)]
    pub(crate) fn override_template(&mut self, name: &'static str, source: &'static str) {
        self.env.add_template_owned(name, source).unwrap();
    }
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{{ title if title else "Swagger UI" }}</title>
  <link rel="stylesheet" type="text/css" href="./swagger-ui.css" />
  <link rel="stylesheet" type="text/css" href="./index.css" />
  <link rel="icon" type="image/png" href="./favicon-32x32.png" sizes="32x32" />
  <link rel="icon" type="image/png" href="./favicon-16x16.png" sizes="16x16" />
</head>
<body>
  <div id="{{ dom_id }}"></div>
  <script src="./swagger-ui-bundle.js" charset="UTF-8"></script>
  <script src="./swagger-ui-standalone-preset.js" charset="UTF-8"></script>
  <script src="./swagger-initializer.js" charset="UTF-8"></script>
</body>
</html>
"##;

const INITIALIZER_TEMPLATE: &str = r##"window.onload = function() {
  const ui = SwaggerUIBundle({
    urls: [
    {%- for u in urls %}
      {
        name: {{ u.name }},
        url: {{ u.url }},
      },
    {%- endfor %}
    ],
    syntaxHighlight: {{ syntax_highlight }},
    deepLinking: {{ deep_linking }},
    docExpansion: {{ doc_expansion }},
    showExtensions: {{ show_extensions }},
    persistAuthorization: {{ persist_authorization }},
    dom_id: {{ "#" ~ dom_id }},
    validatorUrl: null,
    presets: [
      SwaggerUIBundle.presets.apis,
      SwaggerUIStandalonePreset
    ],
    plugins: [
      SwaggerUIBundle.plugins.DownloadUrl
    ],
    layout: "StandaloneLayout"
  });
{% if oauth %}
  ui.initOAuth({
    clientId: {{ oauth.client_id }},
    realm: {{ oauth.realm }},
    appName: {{ oauth.app_name }}
  });
{% endif %}
  window.ui = ui;
};
"##;

const STYLESHEET_TEMPLATE: &str = r##"html {
  box-sizing: border-box;
  overflow: -moz-scrollbars-vertical;
  overflow-y: scroll;
}

*,
*:before,
*:after {
  box-sizing: inherit;
}

body {
  margin: 0;
  background: #fafafa;
}

#{{ dom_id }} {
  min-height: 100vh;
}
"##;

const LISTING_TEMPLATE: &str = r##"<pre>
{% for entry in entries %}<a href="{{ entry }}">{{ entry }}</a>
{% endfor %}</pre>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DefinitionUrl, OAuthConfig};

    fn config() -> SwaggerUiConfig {
        SwaggerUiConfig::builder()
            .title("Pet Store")
            .dom_id("api-docs")
            .url("petstore.json")
            .definition_url(DefinitionUrl::named("Users v2", "v2/users.yaml"))
            .build()
    }

    #[test]
    fn renders_page_shell() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_index(&config());

        assert!(rendered.error.is_none());
        assert!(rendered.body.contains("<title>Pet Store</title>"));
        assert!(rendered.body.contains(r#"<div id="api-docs"></div>"#));
        assert!(rendered.body.contains("./swagger-initializer.js"));
    }

    #[test]
    fn escapes_title_in_page_shell() {
        let engine = TemplateEngine::new().unwrap();
        let config = SwaggerUiConfig::builder()
            .title("<script>alert(1)</script>")
            .url("a.json")
            .build();

        let rendered = engine.render_index(&config);

        assert!(!rendered.body.contains("<script>alert(1)</script>"));
        assert!(rendered.body.contains("&lt;script&gt;"));
    }

    #[test]
    fn renders_initializer_with_definitions_and_flags() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_initializer(&config());

        assert!(rendered.error.is_none());
        assert!(rendered.body.contains(r#"name: "petstore.json","#));
        assert!(rendered.body.contains(r#"url: "v2/users.yaml","#));
        assert!(rendered.body.contains(r#"name: "Users v2","#));
        assert!(rendered.body.contains("syntaxHighlight: true,"));
        assert!(rendered.body.contains("persistAuthorization: false,"));
        assert!(rendered.body.contains(r#"docExpansion: "list","#));
        assert!(rendered.body.contains(r##"dom_id: "#api-docs","##));
        assert!(!rendered.body.contains("initOAuth"));
    }

    #[test]
    fn renders_oauth_block_when_configured() {
        let engine = TemplateEngine::new().unwrap();
        let config = SwaggerUiConfig::builder()
            .url("a.json")
            .oauth(OAuthConfig {
                client_id: "docs-client".to_string(),
                realm: "internal".to_string(),
                app_name: "Docs".to_string(),
            })
            .build();

        let rendered = engine.render_initializer(&config);

        assert!(rendered.body.contains("ui.initOAuth({"));
        assert!(rendered.body.contains(r#"clientId: "docs-client","#));
        assert!(rendered.body.contains(r#"realm: "internal","#));
        assert!(rendered.body.contains(r#"appName: "Docs""#));
    }

    #[test]
    fn quotes_definition_names_as_js_strings() {
        let engine = TemplateEngine::new().unwrap();
        let config = SwaggerUiConfig::builder()
            .definition_url(DefinitionUrl::named(r#"Bad "name""#, "a.json"))
            .build();

        let rendered = engine.render_initializer(&config);

        assert!(!rendered.body.contains(r#""Bad "name"""#));
    }

    #[test]
    fn renders_stylesheet() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_stylesheet(&config());

        assert!(rendered.error.is_none());
        assert!(rendered.body.contains("#api-docs {"));
        assert!(rendered.body.contains("background: #fafafa;"));
    }

    #[test]
    fn renders_listing() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_listing(&["a.json".to_string(), "v1/".to_string()]);

        assert!(rendered.body.contains(r#"<a href="a.json">a.json</a>"#));
        assert!(rendered.body.contains(r#"<a href="v1&#x2f;">v1&#x2f;</a>"#));
    }

    #[test]
    fn keeps_output_written_before_a_failure() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.override_template(
            INDEX_TEMPLATE_NAME,
            "<h1>before</h1>{{ title|no_such_filter }}<p>after</p>",
        );

        let rendered = engine.render_index(&config());

        assert!(rendered.error.is_some());
        assert!(rendered.body.starts_with("<h1>before</h1>"));
        assert!(!rendered.body.contains("after"));
    }
}
