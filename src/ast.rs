/// Top-level parsed token of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text, copied to the output unchanged.
    /// A lone backslash that starts no macro is its own literal.
    Literal(&'a str),
    /// `\n`
    Newline,
    /// `\t`
    Tab,
    /// Sequence counter: `\c` or `\c{seed}`
    Counter(Option<Seed>),
    /// Named text macro applied to the selection: `\e{name}`
    Function(&'a str),
}

/// Offset added to the sequence counter by `\c{...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    /// `\c{5}`
    Decimal(u64),
    /// `\c{x00ff}` / `\c{X0A}`
    ///
    /// `width` is the number of seed digits (marker excluded) and is the
    /// minimum width of the zero-padded output.
    Hex {
        value: u64,
        width: usize,
        uppercase: bool,
    },
}

impl Token<'_> {
    /// Whether the expansion of this token depends on the counter or the selection
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Token::Counter(_) | Token::Function(_))
    }
}
