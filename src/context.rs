use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;


/// A callable section value.
///
/// It receives the raw, unrendered text of the section and the context
/// current at the section, and returns the text that replaces it.
#[derive(Clone)]
pub struct Lambda(Arc<dyn Fn(&str, &Context) -> String + Send + Sync>);

impl Lambda {
    pub fn call(&self, text: &str, context: &Context) -> String {
        (self.0)(text, context)
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lambda {{...}}")
    }
}

impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}


/// The data a template is rendered against.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Context {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<Context>),
    Mapping(BTreeMap<String, Context>),
    Lambda(Lambda),
}

pub(crate) static MISSING: Context = Context::Null;

impl Context {
    pub fn lambda<F>(fun: F) -> Context
    where F: Fn(&str, &Context) -> String + Send + Sync + 'static {
        Context::Lambda(Lambda(Arc::new(fun)))
    }

    pub fn mapping() -> Context {
        Context::Mapping(BTreeMap::new())
    }

    /// Builder-style insertion; has no effect unless `self` is a mapping.
    pub fn with<T: Into<Context>>(mut self, key: &str, value: T) -> Context {
        if let Context::Mapping(map) = &mut self {
            map.insert(key.to_owned(), value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Context> {
        match self {
            Context::Mapping(map) => map.get(key),
            _ => None
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Context::Null => false,
            Context::Bool(b) => *b,
            Context::Integer(n) => *n != 0,
            Context::Float(x) => *x != 0.0,
            Context::Text(text) => !text.is_empty(),
            Context::Sequence(seq) => !seq.is_empty(),
            Context::Mapping(map) => !map.is_empty(),
            Context::Lambda(_) => true,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Context::Integer(n) => *n == 0,
            Context::Float(x) => *x == 0.0,
            _ => false
        }
    }

    /// Textual form used when the value is interpolated.
    ///
    /// Lambdas are invoked with empty section text. Sequences and mappings
    /// render as JSON.
    pub fn to_text(&self) -> String {
        match self {
            Context::Null => String::new(),
            Context::Bool(b) => b.to_string(),
            Context::Integer(n) => n.to_string(),
            // whole floats keep their decimal form
            Context::Float(x) if x.is_finite() && x.fract() == 0.0 => format!("{:.1}", x),
            Context::Float(x) => x.to_string(),
            Context::Text(text) => text.clone(),
            Context::Lambda(lambda) => lambda.call("", &MISSING),
            Context::Sequence(_) | Context::Mapping(_) =>
                serde_json::to_string(self).unwrap_or_default(),
        }
    }

    fn index(&self, segment: &str) -> Option<&Context> {
        let seq = match self {
            Context::Sequence(seq) => seq,
            _ => return None
        };
        let index = segment.parse::<i64>().ok()?;
        let len = seq.len() as i64;
        let index = if index < 0 { len + index } else { index };
        if (0..len).contains(&index) {
            seq.get(index as usize)
        } else {
            None
        }
    }
}


/// Resolves a tag or section name.
///
/// `.` is the current context, `a.b.c` walks nested mappings, a leading `.`
/// starts from the root and numeric segments index sequences (negative
/// indices count from the end). Anything unresolvable is [Context::Null].
pub fn resolve<'a>(name: &str, context: &'a Context, root: &'a Context) -> &'a Context {
    if name == "." {
        return context;
    }
    let mut segments = name.split('.').peekable();
    let mut current = context;
    if segments.peek() == Some(&"") {
        segments.next();
        current = root;
    }
    for segment in segments {
        current = match current {
            Context::Mapping(map) => map.get(segment).unwrap_or(&MISSING),
            _ => match current.index(segment) {
                Some(item) => item,
                None => return &MISSING
            }
        };
    }
    current
}


/// Current and root context of one rendering step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stack<'a> {
    root: &'a Context,
    current: &'a Context
}

impl<'a> Stack<'a> {
    pub(crate) fn new(root: &'a Context) -> Self {
        Stack {
            root,
            current: root
        }
    }

    pub(crate) fn get(&self, name: &str) -> &'a Context {
        resolve(name, self.current, self.root)
    }

    pub(crate) fn current(&self) -> &'a Context {
        self.current
    }

    pub(crate) fn push(&self, current: &'a Context) -> Stack<'a> {
        Stack {
            root: self.root,
            current
        }
    }
}


impl From<bool> for Context {
    fn from(b: bool) -> Self {
        Context::Bool(b)
    }
}

impl From<i64> for Context {
    fn from(n: i64) -> Self {
        Context::Integer(n)
    }
}

impl From<i32> for Context {
    fn from(n: i32) -> Self {
        Context::Integer(n as i64)
    }
}

impl From<u32> for Context {
    fn from(n: u32) -> Self {
        Context::Integer(n as i64)
    }
}

impl From<f64> for Context {
    fn from(x: f64) -> Self {
        Context::Float(x)
    }
}

impl From<&str> for Context {
    fn from(text: &str) -> Self {
        Context::Text(text.to_owned())
    }
}

impl From<String> for Context {
    fn from(text: String) -> Self {
        Context::Text(text)
    }
}

impl<T: Into<Context>> From<Option<T>> for Context {
    fn from(value: Option<T>) -> Self {
        value.map_or(Context::Null, Into::into)
    }
}

impl<T: Into<Context>> From<Vec<T>> for Context {
    fn from(seq: Vec<T>) -> Self {
        Context::Sequence(seq.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Context>> From<BTreeMap<String, T>> for Context {
    fn from(map: BTreeMap<String, T>) -> Self {
        map.into_iter().collect()
    }
}

impl<T: Into<Context>> From<HashMap<String, T>> for Context {
    fn from(map: HashMap<String, T>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, T: Into<Context>> FromIterator<(K, T)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Context::Mapping(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect()
        )
    }
}
