//! Logic-less templates.
//!
//! A [Template] compiled from source is rendered against a [Context]: tags
//! are replaced by values looked up in the context, sections are expanded
//! or dropped depending on their value, and partials are fetched from a
//! [PartialStore]. A [Renderer] bundles the configuration, the partial store
//! and any custom tag modifiers.
//!
//! Text outside of the delimiters (`{{` and `}}` by default) is unchanged.
//!
//! | tag            | meaning                                              |
//! |----------------|------------------------------------------------------|
//! | `{{name}}`     | value, html escaped; missing values render nothing   |
//! | `{{&name}}`    | value, unescaped (also `{{{name}}}`)                 |
//! | `{{!text}}`    | comment                                              |
//! | `{{>name}}`    | partial rendered in the current context              |
//! | `{{=<% %>=}}`  | change the delimiters for the rest of the template   |
//! | `{{#name}}..{{/name}}` | section: repeated per item, entered once, or handed to a lambda |
//! | `{{^name}}..{{/name}}` | inverted section: rendered when the value is falsy |
//! | `{{?name}}..{{/name}}` | assertion: rendered once when the value is truthy, in the same context |
//!
//! Names are paths: `.` is the current context, `a.b.c` walks nested
//! mappings, `.a` starts from the root context and numeric segments index
//! sequences (`list.-1` is the last item).
//!
//!
//! # Samples
//!
//! ## Hello world
//!
//! ```
//! use stache::{render, Context, JsonValue};
//!
//! let data = r#"{
//!     "you": "world"
//! }"#;
//! let context = Context::from(serde_json::from_str::<JsonValue>(data).unwrap());
//!
//! let result = render("hello, {{you}}!", &context).unwrap();
//!
//! assert_eq!(result, "hello, world!")
//! ```
//!
//! ## Hello team
//!
//! ```
//! use stache::{Template, Context, YamlValue};
//! let text = "{{#team}}hello, {{address}} {{name}}! {{/team}}";
//! let data = r#"
//!   team:
//!     - name: john
//!       address: little
//!     - name: 42
//!       address: citizen
//! "#;
//!
//! let template = Template::from(text).unwrap();
//! let context = Context::from(serde_yaml::from_str::<YamlValue>(data).unwrap());
//!
//! let result = template.render(&context).unwrap();
//! assert_eq!(result, "hello, little john! hello, citizen 42! ");
//! ```
//!
//! ## Lambdas
//!
//! A lambda section gets the raw section text; what it returns is rendered
//! in the current context.
//!
//! ```
//! use stache::{render, Context};
//!
//! let context = Context::mapping()
//!     .with("upper", Context::lambda(|text, _| text.to_uppercase()))
//!     .with("world", "Earth")
//!     .with("WORLD", "Mars");
//!
//! let result = render("{{#upper}}Hello {{world}}{{/upper}}", &context).unwrap();
//! assert_eq!(result, "HELLO Mars");
//! ```
mod config;
mod context;
mod encoding;
mod error;
mod json;
mod modifiers;
mod partials;
mod reader;
mod renderer;
mod template;
mod yaml;

pub use self::config::{Config, Delimiters};
pub use self::context::{Context, Lambda, resolve};
pub use self::encoding::Encoding;
pub use self::error::{Error, Result};
pub use self::json::JsonValue;
pub use self::modifiers::{Modifiers, RESERVED};
pub use self::partials::{PartialStore, PartialMap};
pub use self::renderer::Renderer;
pub use self::template::Template;
pub use self::yaml::YamlValue;


/// Renders `template` against `context` with the default configuration.
///
/// ```
/// use stache::{render, Context};
///
/// let context = Context::mapping().with("text", "<>&");
/// let result = render("{{text}} {{&text}} {{nothere}}", &context).unwrap();
/// assert_eq!(result, "&lt;&gt;&amp; <>& ");
/// ```
pub fn render(template: &str, context: &Context) -> Result<String> {
    Renderer::new().render(template, context)
}

/// Renders and converts the output to the named byte encoding.
///
/// ```
/// use stache::{render_encoded, Context};
///
/// let context = Context::mapping().with("object", "friend");
/// let result = render_encoded("my {{object}}", &context, "utf-8").unwrap();
/// assert_eq!(result, b"my friend");
/// ```
pub fn render_encoded(template: &str, context: &Context, encoding: &str) -> Result<Vec<u8>> {
    Renderer::new().render_encoded(template, context, encoding)
}
