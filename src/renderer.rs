use std::fmt;
use log::debug;
use crate::config::Config;
use crate::context::{Context, Stack};
use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::modifiers::Modifiers;
use crate::partials::{NoPartials, PartialStore};
use crate::template::Template;


/// A rendering pipeline: configuration, tag modifiers and the partial store.
///
/// Every render starts from the configured delimiters; a `{{=...=}}` tag
/// only affects the rest of the template it appears in. A `Renderer` holds
/// no per-render state and can be shared between threads.
///
/// ```
/// use stache::{Context, PartialMap, Renderer};
///
/// let partials = [("greet", "hello, {{name}}")].into_iter().collect::<PartialMap>();
/// let renderer = Renderer::new()
///     .with_partials(partials)
///     .with_modifier('~', |name, _| format!(":P {}", name))
///     .unwrap();
///
/// let context = Context::mapping().with("name", "world");
/// let result = renderer.render("{{>greet}} {{~ yo}}", &context).unwrap();
/// assert_eq!(result, "hello, world :P yo");
/// ```
#[derive(Default)]
pub struct Renderer {
    config: Config,
    modifiers: Modifiers,
    partials: Option<Box<dyn PartialStore + Send + Sync>>
}

impl Renderer {
    pub fn new() -> Self {
        Renderer::default()
    }

    pub fn with_config(config: Config) -> Self {
        Renderer {
            config,
            ..Renderer::default()
        }
    }

    pub fn with_partials<P>(mut self, partials: P) -> Self
    where P: PartialStore + Send + Sync + 'static {
        self.partials = Some(Box::new(partials));
        self
    }

    pub fn with_modifier<F>(mut self, symbol: char, handler: F) -> Result<Self>
    where F: Fn(&str, &Context) -> String + Send + Sync + 'static {
        self.modifiers.register(symbol, handler)?;
        Ok(self)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn compile(&self, source: &str) -> Result<Template> {
        Template::compile(source, self)
    }

    pub fn render(&self, source: &str, context: &Context) -> Result<String> {
        let template = self.compile(source)?;
        self.render_template(&template, context)
    }

    pub fn render_template(&self, template: &Template, context: &Context) -> Result<String> {
        let env = match &self.partials {
            Some(partials) => Env::new(&self.config, &self.modifiers, partials.as_ref()),
            None => Env::new(&self.config, &self.modifiers, &NoPartials)
        };
        template.render_internal(Stack::new(context), &env)
    }

    pub fn render_encoded(
        &self, source: &str, context: &Context, encoding: &str
    ) -> Result<Vec<u8>> {
        let encoding = encoding.parse::<Encoding>()?;
        let text = self.render(source, context)?;
        debug!("encoding {} bytes of output as {}", text.len(), encoding.name());
        encoding.encode(&text)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("modifiers", &self.modifiers)
            .field("partials", &self.partials.is_some())
            .finish()
    }
}


/// What segments need from the pipeline while rendering.
#[derive(Clone, Copy)]
pub(crate) struct Env<'r> {
    pub(crate) config: &'r Config,
    pub(crate) modifiers: &'r Modifiers,
    pub(crate) partials: &'r dyn PartialStore,
    depth: usize
}

impl<'r> Env<'r> {
    pub(crate) fn new(
        config: &'r Config, modifiers: &'r Modifiers, partials: &'r dyn PartialStore
    ) -> Self {
        Env {
            config,
            modifiers,
            partials,
            depth: 0
        }
    }

    /// The environment of a partial or lambda output rendered from this one.
    pub(crate) fn nested(&self) -> Result<Env<'r>> {
        let depth = self.depth + 1;
        match self.config.max_depth {
            Some(limit) if depth > limit => Err(Error::DepthExceeded(limit)),
            _ => Ok(Env { depth, ..*self })
        }
    }
}
