use std::fmt;

/// A compile-time constant in its canonical TAC spelling.
///
/// `Display` and `parse` round-trip: `Literal::parse(&lit.to_string())`
/// yields `lit` again, which keeps folding idempotent.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Double(f64),
    Str(String),
    Bool(bool),
}

impl Literal {
    pub fn parse(text: &str) -> Option<Literal> {
        match text {
            "true" => return Some(Literal::Bool(true)),
            "false" => return Some(Literal::Bool(false)),
            _ => {}
        }
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            return Some(Literal::Str(text[1..text.len() - 1].to_string()));
        }
        if let Ok(value) = text.parse::<i32>() {
            return Some(Literal::Int(value));
        }
        // Require a digit-bearing float spelling so names like `inf` stay names.
        let looks_float = text.contains(['.', 'e', 'E']) && text.starts_with(|c: char| c.is_ascii_digit() || c == '-');
        if looks_float {
            if let Ok(value) = text.parse::<f64>() {
                return Some(Literal::Double(value));
            }
        }
        None
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Double(v) => write!(f, "{:?}", v),
            Literal::Str(s) => write!(f, "\"{}\"", s),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}
