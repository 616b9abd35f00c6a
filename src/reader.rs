use log::trace;
use crate::config::Delimiters;


/// The symbol opening a section block.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) enum Marker {
    /// `#`: conditional, iterating or lambda section
    Section,
    /// `^`: rendered when the value is falsy
    Inverted,
    /// `?`: rendered once when the value is truthy
    Assertion,
}


pub(crate) struct Reader<'a> {
    input: &'a str,
    delimiters: Delimiters,
    modifiers: Vec<char>,
    pos: usize
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str, delimiters: &Delimiters, modifiers: Vec<char>) -> Self {
        Reader {
            input,
            delimiters: delimiters.clone(),
            modifiers,
            pos: 0
        }
    }

    pub(crate) fn pop_front(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.input.len() {
            None
        } else {
            let tail = &self.input[self.pos..];
            let open = &self.delimiters.open;
            let token = if !open.is_empty() && tail.starts_with(open.as_str()) {
                self.read_tag(tail)
            } else {
                self.read_text(tail)
            };
            Some(token)
        }
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    pub(crate) fn len(&self) -> usize {
        self.input.len()
    }

    pub(crate) fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub(crate) fn set_delimiters(&mut self, od: &str, cd: &str) {
        trace!("delimiters changed to {} {} at offset {}", od, cd, self.pos);
        self.delimiters = Delimiters::new(od, cd);
    }

    fn read_text(&mut self, tail: &'a str) -> Token<'a> {
        let end = match tail.find(self.delimiters.open.as_str()) {
            Some(p) if p > 0 => p,
            _ => tail.len()
        };
        self.pos += end;
        Token::Text(&tail[..end])
    }

    fn read_tag(&mut self, tail: &'a str) -> Token<'a> {
        let start = self.pos;
        let odl = self.delimiters.open.len();
        match tail[odl..].span_tag(&self.delimiters.close) {
            Some((body, after_tag)) => {
                self.pos += odl + after_tag;
                if body.is_empty() {
                    // nothing between the delimiters: not a tag
                    Token::Text(&tail[..odl + after_tag])
                } else {
                    self.tag(body, start, self.pos)
                }
            },
            None => {
                // an unterminated tag is plain text
                self.pos = self.input.len();
                Token::Text(tail)
            }
        }
    }

    fn tag(&self, body: &'a str, before_tag: usize, after_tag: usize) -> Token<'a> {
        let sigil = match body.chars().next() {
            Some(c) => c,
            None => return Token::Text(body)
        };
        let rest = body.trim_sigil();
        match sigil {
            '#' => Token::section(Marker::Section, rest, before_tag, after_tag),
            '^' => Token::section(Marker::Inverted, rest, before_tag, after_tag),
            '?' => Token::section(Marker::Assertion, rest, before_tag, after_tag),
            '/' => Token::end_section(rest, before_tag),
            '>' => Token::Partial(rest),
            '=' => Token::delimiters(rest, before_tag),
            '!' => Token::Comment(rest),
            '&' => Token::Value(rest, false),
            '{' => Token::Value(rest.trim_end_matches('}').trim_end(), false),
            c if self.modifiers.contains(&c) => Token::Modifier(c, rest),
            _ => Token::Value(body, true)
        }
    }
}


#[derive(PartialEq, Debug)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    Value(&'a str, bool),
    Section(Marker, &'a str, usize),
    EndSection(&'a str, usize),
    Partial(&'a str),
    Modifier(char, &'a str),
    Comment(&'a str),
    Delimiters(&'a str, &'a str),
    Error(String, usize)
}

impl<'a> Token<'a> {
    fn section(marker: Marker, name: &'a str, before_tag: usize, after_tag: usize) -> Token<'a> {
        if name.is_empty() {
            Token::error("missing section name", before_tag)
        } else {
            Token::Section(marker, name, after_tag)
        }
    }

    fn end_section(name: &'a str, before_tag: usize) -> Token<'a> {
        if name.is_empty() {
            Token::error("missing section name", before_tag)
        } else {
            Token::EndSection(name, before_tag)
        }
    }

    fn delimiters(text: &'a str, before_tag: usize) -> Token<'a> {
        let text = text.strip_suffix('=').unwrap_or(text);
        let words = text.split_whitespace().collect::<Vec<_>>();
        if text.contains('=') || words.len() != 2 {
            Token::error("invalid delimiters tag", before_tag)
        } else {
            Token::Delimiters(words[0], words[1])
        }
    }

    fn error(text: &str, offset: usize) -> Token<'a> {
        Token::Error(text.to_string(), offset)
    }
}


trait ReaderStringOps {
    fn span_tag(&self, close_delimiter: &str) -> Option<(&str, usize)>;
    fn trim_sigil(&self) -> &str;
}

impl ReaderStringOps for str {
    // self starts right after an open delimiter
    // return the trimmed tag body and the position after the close delimiter
    // a triple mustache also swallows one `}` right after the nearest close
    fn span_tag(&self, close_delimiter: &str) -> Option<(&str, usize)> {
        let end = self.find(close_delimiter)?;
        let mut after = end + close_delimiter.len();
        if self.trim_start().starts_with('{') && self[after..].starts_with('}') {
            after += 1;
        }
        Some((self[..end].trim(), after))
    }

    fn trim_sigil(&self) -> &str {
        match self.chars().next() {
            Some(c) => self[c.len_utf8()..].trim(),
            None => self
        }
    }
}
