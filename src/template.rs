use std::fmt::Debug;
use log::{debug, trace};
use crate::config::{Config, Delimiters};
use crate::context::{Context, Stack};
use crate::error::{Error, Result};
use crate::modifiers::Modifiers;
use crate::partials::{NoPartials, PartialStore};
use crate::reader::{Marker, Reader, Token};
use crate::renderer::{Env, Renderer};


/// A template compiled into a tree of segments, ready to be rendered any
/// number of times.
#[derive(Debug)]
pub struct Template {
    segments: Segments
}

impl Template {
    /// Compiles `input` with the default `{{ }}` delimiters.
    pub fn from(input: &str) -> Result<Self> {
        Template::parse_with(input, &Delimiters::default(), Vec::new())
    }

    /// Compiles `input` with the delimiters and modifiers of `renderer`.
    pub fn compile(input: &str, renderer: &Renderer) -> Result<Self> {
        Template::parse_with(
            input,
            &renderer.config().delimiters,
            renderer.modifiers().symbols()
        )
    }

    pub(crate) fn parse_with(
        input: &str, delimiters: &Delimiters, modifiers: Vec<char>
    ) -> Result<Self> {
        let mut reader = Reader::new(input, delimiters, modifiers);
        let (segments, _) = parse(&mut reader, None)?;
        Ok(Template { segments })
    }

    pub fn render(&self, context: &Context) -> Result<String> {
        let config = Config::default();
        let modifiers = Modifiers::new();
        let env = Env::new(&config, &modifiers, &NoPartials);
        self.render_internal(Stack::new(context), &env)
    }

    pub fn render_with_partials(
        &self, context: &Context, partials: &dyn PartialStore
    ) -> Result<String> {
        let config = Config::default();
        let modifiers = Modifiers::new();
        let env = Env::new(&config, &modifiers, partials);
        self.render_internal(Stack::new(context), &env)
    }

    pub(crate) fn render_internal(&self, stack: Stack, env: &Env) -> Result<String> {
        self.segments.render(stack, env)
    }
}


// return the segments up to the end of `section` (or of the input) and the
// offset where the closing tag starts
fn parse(
    reader: &mut Reader, section: Option<&str>
) -> Result<(Segments, usize)> {
    let mut segments = Segments::new();
    while let Some(token) = reader.pop_front() {
        match token {
            Token::Text(text) => {
                segments.push(Box::new(
                    TextSegment::new(text)
                ))
            },
            Token::Value(name, is_escaped) => {
                segments.push(Box::new(
                    ValueSegment::new(name, is_escaped)
                ))
            },
            Token::Section(marker, name, after_tag) => {
                trace!("section {} opened at offset {}", name, after_tag);
                let delimiters = reader.delimiters().clone();
                let (children, before_end) = parse(reader, Some(name))?;
                let raw = reader.slice(after_tag, before_end);
                segments.push(Box::new(
                    SectionSegment::new(marker, name, children, raw, delimiters)
                ))
            },
            Token::EndSection(name, before_tag) => {
                if section != Some(name) {
                    return Err(Error::UnexpectedEndSection {
                        expected: section.map(str::to_owned),
                        found: name.to_owned()
                    });
                }
                return Ok((segments, before_tag));
            },
            Token::Partial(name) => {
                segments.push(Box::new(
                    PartialSegment::new(name)
                ))
            },
            Token::Modifier(symbol, name) => {
                segments.push(Box::new(
                    ModifierSegment::new(symbol, name)
                ))
            },
            Token::Delimiters(od, cd) => {
                reader.set_delimiters(od, cd);
            },
            Token::Comment(_) => {
            },
            Token::Error(message, offset) => {
                return Err(Error::Syntax { message, offset });
            }
        }
    }
    match section {
        Some(name) => Err(Error::UnclosedSection(name.to_owned())),
        None => Ok((segments, reader.len()))
    }
}


trait Segment: Debug + Send + Sync {
    fn render(&self, stack: Stack, env: &Env) -> Result<String>;
}

type Segments = Vec<Box<dyn Segment>>;

impl Segment for Segments {
    fn render(&self, stack: Stack, env: &Env) -> Result<String> {
        self.iter()
            .map(|child| child.render(stack, env))
            .collect::<Result<String>>()
    }
}


#[derive(Debug)]
struct TextSegment {
    text: String
}

impl TextSegment {
    fn new(text: &str) -> Self {
        TextSegment {
            text: text.to_owned()
        }
    }
}

impl Segment for TextSegment {
    fn render(&self, _stack: Stack, _env: &Env) -> Result<String> {
        Ok(self.text.clone())
    }
}


#[derive(Debug)]
struct ValueSegment {
    name: String,
    is_escaped: bool
}

impl ValueSegment {
    fn new(name: &str, is_escaped: bool) -> Self {
        ValueSegment {
            name: name.to_owned(),
            is_escaped
        }
    }
}

impl Segment for ValueSegment {
    fn render(&self, stack: Stack, _env: &Env) -> Result<String> {
        let value = stack.get(&self.name);
        let text = match value {
            Context::Lambda(lambda) => lambda.call("", stack.current()),
            // zero is falsy but still printed
            _ if self.is_escaped && !value.is_truthy() && !value.is_zero() => String::new(),
            _ => value.to_text()
        };
        Ok(match self.is_escaped {
            true => html_escape(&text),
            false => text
        })
    }
}


#[derive(Debug)]
struct SectionSegment {
    marker: Marker,
    name: String,
    children: Segments,
    raw: String,
    delimiters: Delimiters
}

impl SectionSegment {
    fn new(
        marker: Marker, name: &str, children: Segments, raw: &str, delimiters: Delimiters
    ) -> Self {
        SectionSegment {
            marker,
            name: name.to_owned(),
            children,
            raw: raw.to_owned(),
            delimiters
        }
    }

    fn render_lambda(&self, text: &str, stack: Stack, env: &Env) -> Result<String> {
        let nested = env.nested()?;
        Template::parse_with(text, &self.delimiters, env.modifiers.symbols())?
            .render_internal(stack, &nested)
    }
}

impl Segment for SectionSegment {
    fn render(&self, stack: Stack, env: &Env) -> Result<String> {
        let it = stack.get(&self.name);
        match (self.marker, it.is_truthy()) {
            (Marker::Section, true) => match it {
                Context::Lambda(lambda) => {
                    debug!("invoking lambda for section {}", self.name);
                    let text = lambda.call(&self.raw, stack.current());
                    self.render_lambda(&text, stack, env)
                },
                Context::Sequence(items) =>
                    items.iter()
                        .map(|item| self.children.render(stack.push(item), env))
                        .collect::<Result<String>>(),
                _ => self.children.render(stack.push(it), env)
            },
            (Marker::Inverted, false) | (Marker::Assertion, true) =>
                self.children.render(stack, env),
            _ => Ok(String::new())
        }
    }
}


#[derive(Debug)]
struct PartialSegment {
    name: String
}

impl PartialSegment {
    fn new(name: &str) -> Self {
        PartialSegment {
            name: name.to_owned()
        }
    }
}

impl Segment for PartialSegment {
    fn render(&self, stack: Stack, env: &Env) -> Result<String> {
        let text = env.partials.load(&self.name)?;
        debug!("rendering partial {}", self.name);
        let nested = env.nested()?;
        Template::parse_with(&text, &env.config.delimiters, env.modifiers.symbols())?
            .render_internal(stack, &nested)
    }
}


#[derive(Debug)]
struct ModifierSegment {
    symbol: char,
    name: String
}

impl ModifierSegment {
    fn new(symbol: char, name: &str) -> Self {
        ModifierSegment {
            symbol,
            name: name.to_owned()
        }
    }
}

impl Segment for ModifierSegment {
    fn render(&self, stack: Stack, env: &Env) -> Result<String> {
        env.modifiers.apply(self.symbol, &self.name, stack.current())
    }
}


fn html_escape(input: &str) -> String {
    input.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_specials() {
        assert_eq!(html_escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn mismatched_end_section() {
        let err = Template::from("{{#a}}x{{/b}}").unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedEndSection { expected: Some(ref e), ref found } if e == "a" && found == "b"
        ));
    }

    #[test]
    fn stray_end_section() {
        let err = Template::from("x{{/b}}").unwrap_err();
        assert!(matches!(err, Error::UnexpectedEndSection { expected: None, .. }));
    }

    #[test]
    fn unclosed_section() {
        let err = Template::from("{{#a}}{{#b}}{{/b}}").unwrap_err();
        assert!(matches!(err, Error::UnclosedSection(ref name) if name == "a"));
    }

    #[test]
    fn invalid_delimiters_is_a_syntax_error() {
        let err = Template::from("abc{{=x}}").unwrap_err();
        assert!(matches!(err, Error::Syntax { offset: 3, .. }));
    }

    #[test]
    fn section_keeps_raw_text() {
        let template = Template::from("{{#a}} {{b}} {{/a}}").unwrap();
        let rendered = format!("{:?}", template);
        assert!(rendered.contains(r#"raw: " {{b}} ""#));
    }
}
