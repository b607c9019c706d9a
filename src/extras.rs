use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::Deserialize;

bitflags! {
    /// Extra emphasis families recognized on top of `*`/`_` emphasis.
    ///
    /// Each flag toggles exactly one marker family. A cleared flag makes the
    /// corresponding marker characters plain text for the whole engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EmphasisExtras: u8 {
        /// `~~text~~`
        const STRIKEOUT   = 1 << 0;
        /// `~text~`
        const SUBSCRIPT   = 1 << 1;
        /// `^text^`
        const SUPERSCRIPT = 1 << 2;
        /// `++text++`
        const INSERTED    = 1 << 3;
        /// `==text==`
        const MARKED      = 1 << 4;

        const DEFAULT = Self::STRIKEOUT.bits()
            | Self::SUBSCRIPT.bits()
            | Self::SUPERSCRIPT.bits()
            | Self::INSERTED.bits()
            | Self::MARKED.bits();
    }
}

impl Default for EmphasisExtras {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single named extra, as written in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Extension {
    Strikeout,
    Subscript,
    Superscript,
    Inserted,
    Marked,
}

impl Extension {
    pub const ALL: [Extension; 5] = [
        Extension::Strikeout,
        Extension::Subscript,
        Extension::Superscript,
        Extension::Inserted,
        Extension::Marked,
    ];

    pub fn flag(self) -> EmphasisExtras {
        match self {
            Extension::Strikeout => EmphasisExtras::STRIKEOUT,
            Extension::Subscript => EmphasisExtras::SUBSCRIPT,
            Extension::Superscript => EmphasisExtras::SUPERSCRIPT,
            Extension::Inserted => EmphasisExtras::INSERTED,
            Extension::Marked => EmphasisExtras::MARKED,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Extension::Strikeout => "strikeout",
            Extension::Subscript => "subscript",
            Extension::Superscript => "superscript",
            Extension::Inserted => "inserted",
            Extension::Marked => "marked",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Extension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Extension::ALL
            .into_iter()
            .find(|ext| ext.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown extension `{s}`"))
    }
}

impl FromIterator<Extension> for EmphasisExtras {
    fn from_iter<I: IntoIterator<Item = Extension>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EmphasisExtras::empty(), |acc, ext| acc | ext.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_five() {
        let all: EmphasisExtras = Extension::ALL.into_iter().collect();
        assert_eq!(all, EmphasisExtras::DEFAULT);
        assert_eq!(EmphasisExtras::default(), EmphasisExtras::DEFAULT);
    }

    #[test]
    fn parses_extension_names() {
        assert_eq!("marked".parse::<Extension>(), Ok(Extension::Marked));
        assert_eq!(" Subscript ".parse::<Extension>(), Ok(Extension::Subscript));
        assert!("underline".parse::<Extension>().is_err());
    }

    #[test]
    fn out_of_range_bits_are_dropped() {
        let extras = EmphasisExtras::from_bits_truncate(0xff);
        assert_eq!(extras, EmphasisExtras::DEFAULT);
    }
}
