//! Explicit pipeline stage descriptor.
//!
//! The markdown pipeline applies its syntax extensions in a fixed order to
//! avoid syntactic collisions. The order is an enumerated, documented
//! sequence rather than an incidental consequence of registration order:
//! [`PipelineStage::ORDERED`] is the single source of truth, and the
//! parser options handed to pulldown-cmark are derived from it.

use pulldown_cmark::Options;

/// One stage of the parse-and-render pipeline, in required order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Tables, strikethrough, and task lists. Runs first so table row
    /// delimiters exist before line-break semantics are applied.
    ExtendedMarkup,
    /// Single line breaks render as hard breaks. Must follow table syntax
    /// so row delimiters are not misinterpreted as breaks; a render-phase
    /// behavior with no parser options.
    HardLineBreaks,
    /// Dollar-delimited spans become inline/display math events. Runs
    /// after preprocessing has made the delimiter forms canonical.
    MathSyntax,
    /// Blockquote-prefixed severity markers become alert nodes. Last among
    /// the syntax extensions: it specializes blockquotes that must already
    /// be final.
    AlertBlocks,
    /// Terminal decoration stage: math events are typeset into MathML.
    /// Operates on already-built math nodes and never re-enters parsing.
    MathTypesetting,
}

impl PipelineStage {
    /// The fixed stage sequence.
    pub const ORDERED: [Self; 5] = [
        Self::ExtendedMarkup,
        Self::HardLineBreaks,
        Self::MathSyntax,
        Self::AlertBlocks,
        Self::MathTypesetting,
    ];

    /// Parser options contributed by this stage.
    ///
    /// Render-phase stages contribute none.
    #[must_use]
    pub fn options(self) -> Options {
        match self {
            Self::ExtendedMarkup => {
                Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
            }
            Self::MathSyntax => Options::ENABLE_MATH,
            Self::AlertBlocks => Options::ENABLE_GFM,
            Self::HardLineBreaks | Self::MathTypesetting => Options::empty(),
        }
    }
}

/// Parser options for the full pipeline, derived from the stage sequence.
#[must_use]
pub fn parser_options() -> Options {
    PipelineStage::ORDERED
        .iter()
        .fold(Options::empty(), |acc, stage| acc | stage.options())
}
