use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use crate::context::Context;
use crate::error::{Error, Result};


/// Symbols with a built-in meaning, either as tag modifiers or section markers.
pub const RESERVED: &[char] = &['=', '&', '{', '!', '>', '#', '^', '?', '/'];

type Handler = Arc<dyn Fn(&str, &Context) -> String + Send + Sync>;


/// Tag modifiers registered on one [Renderer](crate::Renderer).
///
/// `{{~ yo}}` with a handler registered for `~` is replaced by
/// `handler("yo", current_context)`, inserted without escaping.
#[derive(Clone, Default)]
pub struct Modifiers {
    handlers: HashMap<char, Handler>
}

impl Modifiers {
    pub fn new() -> Self {
        Modifiers::default()
    }

    pub fn register<F>(&mut self, symbol: char, handler: F) -> Result<()>
    where F: Fn(&str, &Context) -> String + Send + Sync + 'static {
        // symbols that can start a name would capture plain values
        if RESERVED.contains(&symbol) || symbol.is_whitespace()
            || symbol.is_alphanumeric() || symbol == '_' || symbol == '.' {
            return Err(Error::ReservedModifier(symbol));
        }
        self.handlers.insert(symbol, Arc::new(handler));
        Ok(())
    }

    pub fn symbols(&self) -> Vec<char> {
        self.handlers.keys().copied().collect()
    }

    pub(crate) fn apply(&self, symbol: char, name: &str, context: &Context) -> Result<String> {
        match self.handlers.get(&symbol) {
            Some(handler) => Ok(handler(name, context)),
            None => Err(Error::UnknownModifier(symbol))
        }
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_symbols_are_rejected() {
        let mut modifiers = Modifiers::new();
        for symbol in RESERVED {
            assert!(matches!(
                modifiers.register(*symbol, |_, _| String::new()),
                Err(Error::ReservedModifier(s)) if s == *symbol
            ));
        }
        assert!(modifiers.symbols().is_empty());
    }

    #[test]
    fn name_characters_are_rejected() {
        let mut modifiers = Modifiers::new();
        for symbol in ['P', 'x', '7', '_', '.', '\u{e9}'] {
            assert!(matches!(
                modifiers.register(symbol, |_, _| String::new()),
                Err(Error::ReservedModifier(s)) if s == symbol
            ));
        }
        assert!(modifiers.symbols().is_empty());
    }

    #[test]
    fn registered_handler_is_applied() {
        let mut modifiers = Modifiers::new();
        modifiers.register('~', |name, _| format!(":P {}", name)).unwrap();
        assert_eq!(modifiers.symbols(), vec!['~']);
        assert_eq!(modifiers.apply('~', "yo", &Context::Null).unwrap(), ":P yo");
        assert!(matches!(
            modifiers.apply('Q', "yo", &Context::Null),
            Err(Error::UnknownModifier('Q'))
        ));
    }
}
