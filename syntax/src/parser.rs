//! The template parser.
//!
//! Parsing is driven by the pest grammar in `grammar.pest`; this module lowers
//! the resulting parse tree into the AST used by the runtime.
use crate::ast::*;
use crate::error::ParseError;
use crate::grammar::{self, Rule};
use crate::source::*;
use pest::iterators::Pair;

/// Parse the given template source into an AST.
pub fn parse(file: impl Into<SourceFile>) -> Result<Template, ParseError> {
    let file = file.into();

    debug!("parsing template {}", file.name());

    let pairs = grammar::parse(file.source(), Rule::template)
        .map_err(|e| ParseError::from_pest(&e, &file))?;

    let mut segments = Vec::new();

    for pair in pairs.flat_map(Pair::into_inner) {
        match pair.as_rule() {
            Rule::text => segments.push(Segment::Text(pair.as_str().to_owned())),
            Rule::section => {
                let span = pair.as_span();

                match pair.into_inner().next() {
                    Some(expr) => segments.push(Segment::Section(build_expr(expr, &file)?)),
                    None => return Err(ParseError::new("empty section", span.into(), file.clone())),
                }
            }
            _ => {}
        }
    }

    Ok(Template {
        segments,
    })
}

fn build_expr(pair: Pair<'_, Rule>, file: &SourceFile) -> Result<Expr, ParseError> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();

    let mut expr = match inner.next() {
        Some(primary) => build_primary(primary, file)?,
        None => return Err(ParseError::new("empty expression", span.into(), file.clone())),
    };

    for postfix in inner {
        expr = match postfix.as_rule() {
            Rule::field => Expr::Field(Box::new(expr), postfix.into_inner().as_str().to_owned()),
            Rule::call => {
                let args = postfix
                    .into_inner()
                    .map(|arg| build_expr(arg, file))
                    .collect::<Result<Vec<_>, _>>()?;

                Expr::Call(Box::new(expr), args)
            }
            rule => return Err(unexpected(rule, &postfix, file)),
        };
    }

    Ok(expr)
}

fn build_primary(pair: Pair<'_, Rule>, file: &SourceFile) -> Result<Expr, ParseError> {
    match pair.as_rule() {
        Rule::number => pair.as_str().parse().map(Expr::Number).map_err(|_| {
            ParseError::new(format!("invalid number literal: {}", pair.as_str()), pair.as_span().into(), file.clone())
        }),
        Rule::string => Ok(Expr::String(unescape(pair.into_inner().as_str()))),
        Rule::boolean => Ok(Expr::Boolean(pair.as_str() == "true")),
        Rule::null => Ok(Expr::Null),
        Rule::identifier => Ok(Expr::Variable(pair.as_str().to_owned())),
        Rule::expr => build_expr(pair, file),
        rule => Err(unexpected(rule, &pair, file)),
    }
}

fn unexpected(rule: Rule, pair: &Pair<'_, Rule>, file: &SourceFile) -> ParseError {
    ParseError::new(format!("unexpected {:?} in expression", rule), pair.as_span().into(), file.clone())
}

/// Resolve backslash escapes in a string literal body.
fn unescape(raw: &str) -> String {
    let mut string = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            string.push(c);
            continue;
        }

        string.push(match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some(other) => other,
            None => '\\',
        });
    }

    string
}
