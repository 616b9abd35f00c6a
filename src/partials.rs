use std::collections::HashMap;
use crate::error::{Error, Result};


/// Supplies the text of partial templates by name.
///
/// Failures are returned to the caller of the render unchanged.
pub trait PartialStore {
    fn load(&self, name: &str) -> Result<String>;
}

impl<F> PartialStore for F
where F: Fn(&str) -> Result<String> {
    fn load(&self, name: &str) -> Result<String> {
        self(name)
    }
}


/// In-memory partials.
#[derive(Debug, Clone, Default)]
pub struct PartialMap {
    partials: HashMap<String, String>
}

impl PartialMap {
    pub fn new() -> Self {
        PartialMap::default()
    }

    pub fn insert(&mut self, name: &str, text: &str) {
        self.partials.insert(name.to_owned(), text.to_owned());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PartialMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PartialMap {
            partials: iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect()
        }
    }
}

impl PartialStore for PartialMap {
    fn load(&self, name: &str) -> Result<String> {
        self.partials
            .get(name)
            .cloned()
            .ok_or_else(|| Error::PartialNotFound(name.to_owned()))
    }
}


/// The store used when none is configured: every lookup fails.
pub(crate) struct NoPartials;

impl PartialStore for NoPartials {
    fn load(&self, name: &str) -> Result<String> {
        Err(Error::PartialNotFound(name.to_owned()))
    }
}
