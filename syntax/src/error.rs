use crate::grammar::Rule;
use crate::source::*;
use pest::error::{Error, ErrorVariant, InputLocation, LineColLocation};
use std::fmt;

/// Describes an error that occurred in parsing.
pub struct ParseError {
    /// The error message. This is a string instead of an enum because the
    /// messages can be highly specific.
    pub message: String,

    /// The span in the source the error occurred in.
    pub span: Span,

    /// The source file the error occurred in.
    pub file: SourceFile,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span, file: SourceFile) -> Self {
        Self {
            message: message.into(),
            span,
            file,
        }
    }

    pub(crate) fn from_pest(error: &Error<Rule>, file: &SourceFile) -> Self {
        let message = match &error.variant {
            ErrorVariant::ParsingError { positives, negatives } => match (positives.is_empty(), negatives.is_empty()) {
                (false, _) => format!("expected {}", describe_rules(positives)),
                (true, false) => format!("unexpected {}", describe_rules(negatives)),
                (true, true) => String::from("unknown parsing error"),
            },
            ErrorVariant::CustomError { message } => message.clone(),
        };

        let offset = match error.location {
            InputLocation::Pos(offset) => offset,
            InputLocation::Span((start, _)) => start,
        };

        let (line, column) = match error.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };

        let position = Position {
            line,
            column,
            offset,
        };

        Self::new(message, position.into(), file.clone())
    }
}

fn describe_rules(rules: &[Rule]) -> String {
    rules
        .iter()
        .map(|rule| match rule {
            Rule::EOI => "end of input",
            Rule::text => "text",
            Rule::section => "section",
            Rule::expr => "expression",
            Rule::field => "field access",
            Rule::call => "call arguments",
            Rule::number => "number",
            Rule::string | Rule::string_inner => "string",
            Rule::boolean => "boolean",
            Rule::null => "null",
            Rule::identifier => "identifier",
            _ => "token",
        })
        .collect::<Vec<_>>()
        .join(" or ")
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}\n{}:{}:{}",
            self.message,
            self.file.name(),
            self.span.start.line,
            self.span.start.column,
        )?;

        let source = self.file.source();
        let start = self.span.start.offset.min(source.len());
        let end = self.span.end.offset.clamp(start, source.len());

        let starting_offset = source[..start]
            .rfind('\n')
            .map(|offset| offset + 1)
            .unwrap_or(0);
        let ending_offset = source[end..]
            .find('\n')
            .map(|offset| offset + end)
            .unwrap_or(source.len());

        for line in source[starting_offset..ending_offset].lines() {
            writeln!(f, "| {}", line.trim())?;
        }

        Ok(())
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for ParseError {}
