use crate::ast::{Seed, Token};
use crate::functions;
use crate::parser::ExpressionParser;

/// Expression expander.
///
/// Holds the sequence counter for one expansion pass. Every `\c` token takes
/// the current value and advances it, so later tokens see the counter state
/// left by earlier ones.
#[derive(Debug, Clone)]
pub struct Expander<'s> {
    counter: u64,
    selection: &'s str,
}

impl<'s> Expander<'s> {
    pub fn new(counter: u64, selection: &'s str) -> Self {
        Self { counter, selection }
    }

    /// Current counter value, i.e. the value the next `\c` will produce
    /// before its seed is added
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Expand all macros in the expression (main entry point)
    pub fn expand(&mut self, expression: &str) -> String {
        self.expand_tokens(&tokenize(expression))
    }

    /// Expand a list of tokens
    pub fn expand_tokens(&mut self, tokens: &[Token]) -> String {
        let mut result = String::new();
        for token in tokens {
            self.expand_token(token, &mut result);
        }
        result
    }

    fn expand_token(&mut self, token: &Token, out: &mut String) {
        match token {
            Token::Literal(s) => out.push_str(s),
            Token::Newline => out.push('\n'),
            Token::Tab => out.push('\t'),
            Token::Counter(seed) => {
                let value = self.next_counter();
                out.push_str(&render_counter(value, *seed));
            }
            Token::Function(name) => out.push_str(&functions::apply_macro(name, self.selection)),
        }
    }

    fn next_counter(&mut self) -> u64 {
        let value = self.counter;
        self.counter = self.counter.saturating_add(1);
        value
    }
}

fn render_counter(value: u64, seed: Option<Seed>) -> String {
    match seed {
        None => value.to_string(),
        Some(Seed::Decimal(offset)) => value.saturating_add(offset).to_string(),
        Some(Seed::Hex {
            value: offset,
            width,
            uppercase,
        }) => {
            let sum = value.saturating_add(offset);
            if uppercase {
                format!("{sum:0width$X}")
            } else {
                format!("{sum:0width$x}")
            }
        }
    }
}

/// Split an expression into tokens.
///
/// Never fails: text the grammar does not recognise as a macro is literal.
pub fn tokenize(expression: &str) -> Vec<Token<'_>> {
    match ExpressionParser::parse_input(expression) {
        Ok(tokens) => tokens,
        Err(err) => {
            tracing::warn!(%err, "expression did not parse, using it verbatim");
            vec![Token::Literal(expression)]
        }
    }
}

/// Expand `expression` with the counter starting at `counter` and `selection`
/// as the input of `\e{...}` macros.
pub fn expand(expression: &str, counter: u64, selection: &str) -> String {
    Expander::new(counter, selection).expand(expression)
}

/// Whether the expression contains counter or selection macros.
///
/// A static expression expands to the same text whatever the counter and the
/// selection are, so callers can expand it once and reuse the result.
pub fn has_dynamic_values(expression: &str) -> bool {
    expression.contains("\\c") || expression.contains("\\e")
}
