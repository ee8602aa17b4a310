//! RFC 6570 URI templates
//!
//! Supports levels 1-3 with string values: every operator and comma-separated
//! variable lists, no prefix or explode modifiers. Templates are parsed once
//! when a registry is built, so syntax problems surface before any fixture
//! is read.

use speclink_common::{Result, SpecLinkError};

/// Parsed URI template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Expression { op: Operator, names: Vec<String> },
}

/// Expression operator, RFC 6570 section 2.2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    PathSegment,
    PathParameter,
    Query,
    QueryContinuation,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Reserved),
            '#' => Some(Self::Fragment),
            '.' => Some(Self::Label),
            '/' => Some(Self::PathSegment),
            ';' => Some(Self::PathParameter),
            '?' => Some(Self::Query),
            '&' => Some(Self::QueryContinuation),
            _ => None,
        }
    }

    fn first(self) -> &'static str {
        match self {
            Self::Simple | Self::Reserved => "",
            Self::Fragment => "#",
            Self::Label => ".",
            Self::PathSegment => "/",
            Self::PathParameter => ";",
            Self::Query => "?",
            Self::QueryContinuation => "&",
        }
    }

    fn separator(self) -> char {
        match self {
            Self::Simple | Self::Reserved | Self::Fragment => ',',
            Self::Label => '.',
            Self::PathSegment => '/',
            Self::PathParameter => ';',
            Self::Query | Self::QueryContinuation => '&',
        }
    }

    fn named(self) -> bool {
        matches!(
            self,
            Self::PathParameter | Self::Query | Self::QueryContinuation
        )
    }

    /// Suffix written after the name when a named value is empty
    fn if_empty(self) -> &'static str {
        match self {
            Self::Query | Self::QueryContinuation => "=",
            _ => "",
        }
    }

    fn allows_reserved(self) -> bool {
        matches!(self, Self::Reserved | Self::Fragment)
    }
}

impl UriTemplate {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(c) = rest.chars().next() {
            match c {
                '{' => {
                    let close = rest
                        .find('}')
                        .ok_or_else(|| invalid(source, "unclosed expression"))?;
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(parse_expression(source, &rest[1..close])?);
                    rest = &rest[close + 1..];
                }
                '}' => return Err(invalid(source, "unmatched '}'")),
                _ => {
                    literal.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Expand the template with the given variables
    ///
    /// Every variable the template names must be supplied. Empty strings are
    /// defined values, so `{#x}` with `x = ""` still yields `#`.
    pub fn expand(&self, vars: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());

        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Expression { op, names } => {
                    out.push_str(op.first());
                    for (i, name) in names.iter().enumerate() {
                        let value = lookup(vars, name).ok_or_else(|| {
                            SpecLinkError::UnknownVariable {
                                template: self.source.clone(),
                                variable: name.clone(),
                            }
                        })?;
                        if i > 0 {
                            out.push(op.separator());
                        }
                        if op.named() {
                            out.push_str(name);
                            if value.is_empty() {
                                out.push_str(op.if_empty());
                                continue;
                            }
                            out.push('=');
                        }
                        encode_into(&mut out, value, op.allows_reserved());
                    }
                }
            }
        }

        Ok(out)
    }
}

fn invalid(source: &str, reason: &str) -> SpecLinkError {
    SpecLinkError::Template {
        template: source.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_expression(source: &str, body: &str) -> Result<Part> {
    let (op, list) = match body.chars().next() {
        None => return Err(invalid(source, "empty expression")),
        Some(c) => match Operator::from_char(c) {
            Some(op) => (op, &body[1..]),
            None if "=,!@|".contains(c) => {
                return Err(invalid(source, &format!("reserved operator '{}'", c)))
            }
            None => (Operator::Simple, body),
        },
    };

    let names = list
        .split(',')
        .map(|name| {
            if name.ends_with('*') || name.contains(':') {
                Err(invalid(source, &format!("unsupported modifier in '{}'", name)))
            } else if !is_varname(name) {
                Err(invalid(source, &format!("invalid variable name '{}'", name)))
            } else {
                Ok(name.to_string())
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Part::Expression { op, names })
}

/// varname = varchar *( ["."] varchar ), varchar = ALPHA / DIGIT / "_" / pct-encoded
fn is_varname(name: &str) -> bool {
    if name.is_empty() || name.starts_with('.') || name.ends_with('.') || name.contains("..") {
        return false;
    }
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if !is_pct_triplet(&bytes[i..]) {
                    return false;
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' => i += 1,
            _ => return false,
        }
    }
    true
}

fn is_pct_triplet(bytes: &[u8]) -> bool {
    bytes.len() >= 3
        && bytes[0] == b'%'
        && bytes[1].is_ascii_hexdigit()
        && bytes[2].is_ascii_hexdigit()
}

fn lookup<'a>(vars: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
}

const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

fn encode_into(out: &mut String, value: &str, allow_reserved: bool) {
    if !allow_reserved {
        out.push_str(&urlencoding::encode(value));
        return;
    }

    let mut rest = value;
    while let Some(c) = rest.chars().next() {
        if c == '%' && is_pct_triplet(rest.as_bytes()) {
            out.push_str(&rest[..3]);
            rest = &rest[3..];
            continue;
        }
        if RESERVED.contains(c) {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
        rest = &rest[c.len_utf8()..];
    }
}
