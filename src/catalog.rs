use crate::extras::EmphasisExtras;

/// The semantic kind of span a marker produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerFamily {
    Emphasis,
    Strikeout,
    Subscript,
    Superscript,
    Inserted,
    Marked,
}

impl MarkerFamily {
    /// The HTML element a renderer is expected to use for this family.
    pub fn html_tag(self, strength: Strength) -> &'static str {
        match (self, strength) {
            (MarkerFamily::Emphasis, Strength::Weak) => "em",
            (MarkerFamily::Emphasis, Strength::Strong) => "strong",
            (MarkerFamily::Strikeout, _) => "del",
            (MarkerFamily::Subscript, _) => "sub",
            (MarkerFamily::Superscript, _) => "sup",
            (MarkerFamily::Inserted, _) => "ins",
            (MarkerFamily::Marked, _) => "mark",
        }
    }

    pub fn name(self, strength: Strength) -> &'static str {
        match (self, strength) {
            (MarkerFamily::Emphasis, Strength::Weak) => "emphasis",
            (MarkerFamily::Emphasis, Strength::Strong) => "strong",
            (MarkerFamily::Strikeout, _) => "strikeout",
            (MarkerFamily::Subscript, _) => "subscript",
            (MarkerFamily::Superscript, _) => "superscript",
            (MarkerFamily::Inserted, _) => "inserted",
            (MarkerFamily::Marked, _) => "marked",
        }
    }
}

/// Single vs double marker usage. Only emphasis ever produces `Strong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    Weak,
    Strong,
}

/// How an opener and a closer of the same marker character are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// `*` and `_`: runs of any length, matched two (strong) or one (weak)
    /// character at a time, subject to the rule of three.
    Nested,
    /// Extra families: opener and closer must have the same length, and that
    /// length must name an enabled family. The whole run is consumed.
    Exact {
        single: Option<MarkerFamily>,
        double: Option<MarkerFamily>,
    },
}

/// Catalog entry for one marker character under the active configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub ch: char,
    pub rule: MatchRule,
    /// Whether the marker may open or close in the middle of a word.
    pub intraword: bool,
}

impl Marker {
    /// Whether a run of `len` characters can take part in matching at all.
    pub fn accepts_run(&self, len: usize) -> bool {
        match self.rule {
            MatchRule::Nested => len > 0,
            MatchRule::Exact { .. } => self.exact_family(len).is_some(),
        }
    }

    fn exact_family(&self, len: usize) -> Option<MarkerFamily> {
        match (self.rule, len) {
            (MatchRule::Exact { single, .. }, 1) => single,
            (MatchRule::Exact { double, .. }, 2) => double,
            _ => None,
        }
    }

    /// Number of characters to consume from both sides when pairing an opener
    /// holding `opener` characters with a closer holding `closer` characters,
    /// or `None` when the two cannot pair.
    pub fn consume(&self, opener: usize, closer: usize) -> Option<usize> {
        if opener == 0 || closer == 0 {
            return None;
        }
        match self.rule {
            MatchRule::Nested => Some(if opener >= 2 && closer >= 2 { 2 } else { 1 }),
            MatchRule::Exact { .. } => {
                (opener == closer && self.exact_family(opener).is_some()).then_some(opener)
            }
        }
    }

    /// Family and strength of a span built from `used` characters per side.
    pub fn resolve(&self, used: usize) -> Option<(MarkerFamily, Strength)> {
        match self.rule {
            MatchRule::Nested => match used {
                1 => Some((MarkerFamily::Emphasis, Strength::Weak)),
                2 => Some((MarkerFamily::Emphasis, Strength::Strong)),
                _ => None,
            },
            MatchRule::Exact { .. } => self.exact_family(used).map(|f| (f, Strength::Weak)),
        }
    }
}

struct Entry {
    ch: char,
    len: usize,
    family: MarkerFamily,
    flag: EmphasisExtras,
}

const EXTRA_TABLE: &[Entry] = &[
    Entry {
        ch: '~',
        len: 2,
        family: MarkerFamily::Strikeout,
        flag: EmphasisExtras::STRIKEOUT,
    },
    Entry {
        ch: '~',
        len: 1,
        family: MarkerFamily::Subscript,
        flag: EmphasisExtras::SUBSCRIPT,
    },
    Entry {
        ch: '^',
        len: 1,
        family: MarkerFamily::Superscript,
        flag: EmphasisExtras::SUPERSCRIPT,
    },
    Entry {
        ch: '+',
        len: 2,
        family: MarkerFamily::Inserted,
        flag: EmphasisExtras::INSERTED,
    },
    Entry {
        ch: '=',
        len: 2,
        family: MarkerFamily::Marked,
        flag: EmphasisExtras::MARKED,
    },
];

/// Every character the tokenizer groups into delimiter runs.
pub const MARKER_CHARS: [char; 6] = ['*', '_', '~', '^', '+', '='];

pub fn is_marker_char(c: char) -> bool {
    MARKER_CHARS.contains(&c)
}

fn slot(c: char) -> Option<usize> {
    MARKER_CHARS.iter().position(|&m| m == c)
}

/// Lookup table from marker character to its active definition. Built once
/// from [`EmphasisExtras`]; being `Copy`, one instance serves any number of
/// parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    markers: [Option<Marker>; MARKER_CHARS.len()],
}

impl Catalog {
    pub fn new(extras: EmphasisExtras) -> Self {
        let mut markers = [None; MARKER_CHARS.len()];
        markers[0] = Some(Marker {
            ch: '*',
            rule: MatchRule::Nested,
            intraword: true,
        });
        markers[1] = Some(Marker {
            ch: '_',
            rule: MatchRule::Nested,
            intraword: false,
        });

        for entry in EXTRA_TABLE.iter().filter(|e| extras.contains(e.flag)) {
            let Some(i) = slot(entry.ch) else { continue };
            let marker = markers[i].get_or_insert(Marker {
                ch: entry.ch,
                rule: MatchRule::Exact {
                    single: None,
                    double: None,
                },
                intraword: true,
            });
            if let MatchRule::Exact { single, double } = &mut marker.rule {
                match entry.len {
                    1 => *single = Some(entry.family),
                    _ => *double = Some(entry.family),
                }
            }
        }

        log::debug!("Marker catalog built for {extras:?}");
        Self { markers }
    }

    /// The active marker for `c`, or `None` if `c` is not a marker or its
    /// family is disabled.
    pub fn lookup(&self, c: char) -> Option<Marker> {
        slot(c).and_then(|i| self.markers[i])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(EmphasisExtras::DEFAULT)
    }
}
