use pest::{Parser, iterators::Pair};
use pest_derive::Parser;

use crate::ast::{Seed, Token};

#[derive(Parser)]
#[grammar = "expression.pest"]
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse an expression into a list of tokens
    pub fn parse_input(input: &str) -> Result<Vec<Token<'_>>, Box<pest::error::Error<Rule>>> {
        let mut pairs = ExpressionParser::parse(Rule::expression, input).map_err(Box::new)?;
        let Some(expression) = pairs.next() else {
            return Ok(Vec::new());
        };

        Ok(expression
            .into_inner()
            .filter_map(Self::parse_token)
            .collect::<Vec<_>>())
    }

    fn parse_token(pair: Pair<'_, Rule>) -> Option<Token<'_>> {
        match pair.as_rule() {
            Rule::newline => Some(Token::Newline),
            Rule::tab => Some(Token::Tab),
            Rule::counter => Some(Self::parse_counter(pair)),
            Rule::function => Self::parse_function(pair),
            Rule::literal => Some(Token::Literal(pair.as_str())),
            _ => None,
        }
    }

    fn parse_counter(pair: Pair<'_, Rule>) -> Token<'_> {
        let lexeme = pair.as_str();
        let Some(seed) = pair.into_inner().next() else {
            return Token::Counter(None);
        };

        // A seed too large for the counter does not make a macro
        match Self::parse_seed(seed) {
            Some(seed) => Token::Counter(Some(seed)),
            None => Token::Literal(lexeme),
        }
    }

    fn parse_seed(pair: Pair<'_, Rule>) -> Option<Seed> {
        match pair.as_rule() {
            Rule::decimal_seed => pair.as_str().parse().ok().map(Seed::Decimal),
            Rule::hex_seed => {
                let mut inner = pair.into_inner();
                let marker = inner.next()?.as_str();
                let digits = inner.next()?.as_str();
                let value = u64::from_str_radix(digits, 16).ok()?;

                Some(Seed::Hex {
                    value,
                    width: digits.len(),
                    uppercase: marker == "X",
                })
            }
            _ => None,
        }
    }

    fn parse_function(pair: Pair<'_, Rule>) -> Option<Token<'_>> {
        let name = pair.into_inner().next()?;
        Some(Token::Function(name.as_str()))
    }
}
