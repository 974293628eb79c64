//! `template=TEXT` output: literal text with `{{ path }}` placeholders.

use xcctl_document::{DotPath, Value};

use super::OutputFormatError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Field(DotPath),
}

/// A parsed output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    parts: Vec<Part>,
}

impl Template {
    pub(crate) fn parse(text: &str) -> Result<Self, OutputFormatError> {
        let mut parts = Vec::new();
        let mut rest = text;
        while let Some((literal, after_open)) = rest.split_once("{{") {
            let Some((expression, tail)) = after_open.split_once("}}") else {
                return Err(OutputFormatError::UnterminatedPlaceholder {
                    offset: text.len() - rest.len() + literal.len(),
                });
            };
            if !literal.is_empty() {
                parts.push(Part::Literal(literal.to_owned()));
            }
            parts.push(Part::Field(DotPath::parse(expression)));
            rest = tail;
        }
        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_owned()));
        }
        Ok(Self { parts })
    }

    /// Substitutes each placeholder with the rendered value at its path.
    pub(crate) fn render(&self, document: &Value) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Literal(text) => text.clone(),
                Part::Field(path) => path.evaluate(document).to_string(),
            })
            .collect()
    }
}
