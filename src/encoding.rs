use std::str::FromStr;
use crate::error::{Error, Result};


/// Byte encodings the rendered text can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Ascii,
    Latin1,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
        }
    }

    /// Encodes `text`, failing on the first character the encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Encoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Encoding::Ascii => self.single_byte(text, 0x7f),
            Encoding::Latin1 => self.single_byte(text, 0xff),
        }
    }

    fn single_byte(&self, text: &str, max: u32) -> Result<Vec<u8>> {
        text.chars()
            .map(|ch| match ch as u32 {
                code if code <= max => Ok(code as u8),
                _ => Err(Error::Encoding { encoding: self.name().to_owned(), ch })
            })
            .collect()
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-16le" | "utf-16-le" => Ok(Encoding::Utf16Le),
            "utf-16be" | "utf-16-be" => Ok(Encoding::Utf16Be),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(Error::UnknownEncoding(name.to_owned()))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_normalized() {
        assert_eq!("UTF_8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!(matches!(
            "ebcdic".parse::<Encoding>(),
            Err(Error::UnknownEncoding(name)) if name == "ebcdic"
        ));
    }

    #[test]
    fn utf16_byte_order() {
        assert_eq!(Encoding::Utf16Le.encode("a\u{e9}").unwrap(), vec![0x61, 0x00, 0xe9, 0x00]);
        assert_eq!(Encoding::Utf16Be.encode("a").unwrap(), vec![0x00, 0x61]);
    }

    #[test]
    fn single_byte_encodings_are_strict() {
        assert_eq!(Encoding::Latin1.encode("caf\u{e9}").unwrap(), b"caf\xe9".to_vec());
        assert!(matches!(
            Encoding::Ascii.encode("caf\u{e9}"),
            Err(Error::Encoding { ch: '\u{e9}', .. })
        ));
    }
}
