use serde::Deserialize;


/// The open/close pair that marks tags in a template.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String
}

impl Delimiters {
    pub fn new(open: &str, close: &str) -> Self {
        Delimiters {
            open: open.to_owned(),
            close: close.to_owned()
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters::new("{{", "}}")
    }
}


/// Settings shared by every pipeline a [Renderer](crate::Renderer) creates.
///
/// `delimiters` is the pair each template (and each partial or lambda
/// output) starts from. `max_depth` bounds how deeply partials and lambda
/// output may re-enter the renderer; `None` means unbounded.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub delimiters: Delimiters,
    pub max_depth: Option<usize>
}
