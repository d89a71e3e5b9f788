//! Route selector expressions.
//!
//! A selector is a boolean expression over a single bound variable, `event`,
//! holding the event as a plain JSON value. Compilation happens once per
//! route when the resolver is built; evaluation is side-effect-free and never
//! mutates the event.
//!
//! Supported forms: field access (`event.content.body`), the string methods
//! `contains` / `startsWith` / `endsWith`, equality and ordering comparisons,
//! and `&&` / `||` / `!` composition. String literals may use single or
//! double quotes. All numbers compare as f64.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// A compiled selector expression, ready for repeated evaluation.
#[derive(Debug, Clone)]
pub struct Selector {
    expr: Expr,
}

impl Selector {
    /// Compile an expression string.
    ///
    /// A malformed expression is a configuration error; callers reject the
    /// whole route table rather than dropping the route.
    pub fn compile(input: &str) -> Result<Self, CompileError> {
        let tokens = tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_expr()?;
        if parser.peek().is_some() {
            return Err(CompileError::TrailingInput);
        }
        Ok(Self { expr })
    }

    /// Evaluate against an event and return the raw expression value.
    pub fn eval(&self, event: &Value) -> Result<Value, EvalError> {
        eval_expr(&self.expr, event).map(Cow::into_owned)
    }

    /// Evaluate and coerce to a match decision.
    ///
    /// Only a literal boolean `true` is a match; any other value is a
    /// non-match, not an error.
    pub fn matches(&self, event: &Value) -> Result<bool, EvalError> {
        Ok(self.eval(event)? == Value::Bool(true))
    }
}

/// Rejected expression at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    UnexpectedChar { ch: char, pos: usize },
    UnterminatedString { pos: usize },
    InvalidNumber { pos: usize },
    InvalidEscape { ch: char, pos: usize },
    UnexpectedToken(String),
    UnexpectedEnd,
    UnknownIdentifier(String),
    UnknownMethod(String),
    TrailingInput,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnexpectedChar { ch, pos } =>
                write!(f, "unexpected character {:?} at byte {}", ch, pos),
            CompileError::UnterminatedString { pos } =>
                write!(f, "unterminated string literal starting at byte {}", pos),
            CompileError::InvalidNumber { pos } =>
                write!(f, "invalid number literal at byte {}", pos),
            CompileError::InvalidEscape { ch, pos } =>
                write!(f, "invalid escape sequence \\{} at byte {}", ch, pos),
            CompileError::UnexpectedToken(token) =>
                write!(f, "unexpected {}", token),
            CompileError::UnexpectedEnd =>
                write!(f, "unexpected end of expression"),
            CompileError::UnknownIdentifier(name) =>
                write!(f, "unknown identifier '{}' (only 'event' is bound)", name),
            CompileError::UnknownMethod(name) =>
                write!(f, "unknown method '{}'", name),
            CompileError::TrailingInput =>
                write!(f, "trailing input after expression"),
        }
    }
}

impl std::error::Error for CompileError {}

/// Recoverable failure while evaluating a selector against one event.
///
/// The route is treated as non-matching; evaluation of the remaining routes
/// continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    NotAnObject { field: String, found: &'static str },
    MissingField(String),
    TypeMismatch { op: &'static str, found: &'static str },
    NotComparable { left: &'static str, right: &'static str },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::NotAnObject { field, found } =>
                write!(f, "cannot access field '{}' on {} value", field, found),
            EvalError::MissingField(field) =>
                write!(f, "no such field '{}'", field),
            EvalError::TypeMismatch { op, found } =>
                write!(f, "{} is not defined for {} value", op, found),
            EvalError::NotComparable { left, right } =>
                write!(f, "cannot order {} against {}", left, right),
        }
    }
}

impl std::error::Error for EvalError {}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(Value),
    Event,
    Field(Box<Expr>, String),
    Call(Box<Expr>, Method, Box<Expr>),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare(Box<Expr>, CmpOp, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Contains,
    StartsWith,
    EndsWith,
}

impl Method {
    fn name(self) -> &'static str {
        match self {
            Method::Contains => "contains",
            Method::StartsWith => "startsWith",
            Method::EndsWith => "endsWith",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "contains" => Some(Method::Contains),
            "startsWith" => Some(Method::StartsWith),
            "endsWith" => Some(Method::EndsWith),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Num(f64),
    AndAnd,
    OrOr,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Dot,
    LParen,
    RParen,
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("identifier '{}'", name),
        Token::Str(_) => "string literal".to_string(),
        Token::Num(_) => "number literal".to_string(),
        Token::AndAnd => "'&&'".to_string(),
        Token::OrOr => "'||'".to_string(),
        Token::Bang => "'!'".to_string(),
        Token::EqEq => "'=='".to_string(),
        Token::NotEq => "'!='".to_string(),
        Token::Lt => "'<'".to_string(),
        Token::Le => "'<='".to_string(),
        Token::Gt => "'>'".to_string(),
        Token::Ge => "'>='".to_string(),
        Token::Dot => "'.'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            '&' => {
                chars.next();
                match chars.next_if(|&(_, c)| c == '&') {
                    Some(_) => tokens.push(Token::AndAnd),
                    None => return Err(CompileError::UnexpectedChar { ch: '&', pos }),
                }
            }
            '|' => {
                chars.next();
                match chars.next_if(|&(_, c)| c == '|') {
                    Some(_) => tokens.push(Token::OrOr),
                    None => return Err(CompileError::UnexpectedChar { ch: '|', pos }),
                }
            }
            '!' => {
                chars.next();
                match chars.next_if(|&(_, c)| c == '=') {
                    Some(_) => tokens.push(Token::NotEq),
                    None => tokens.push(Token::Bang),
                }
            }
            '=' => {
                chars.next();
                match chars.next_if(|&(_, c)| c == '=') {
                    Some(_) => tokens.push(Token::EqEq),
                    None => return Err(CompileError::UnexpectedChar { ch: '=', pos }),
                }
            }
            '<' => {
                chars.next();
                match chars.next_if(|&(_, c)| c == '=') {
                    Some(_) => tokens.push(Token::Le),
                    None => tokens.push(Token::Lt),
                }
            }
            '>' => {
                chars.next();
                match chars.next_if(|&(_, c)| c == '=') {
                    Some(_) => tokens.push(Token::Ge),
                    None => tokens.push(Token::Gt),
                }
            }
            quote @ ('\'' | '"') => {
                chars.next();
                tokens.push(lex_string(&mut chars, quote, pos)?);
            }
            c if c.is_ascii_digit() => {
                tokens.push(lex_number(&mut chars, pos)?);
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => return Err(CompileError::UnexpectedChar { ch: other, pos }),
        }
    }

    Ok(tokens)
}

fn lex_string(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    quote: char,
    start: usize,
) -> Result<Token, CompileError> {
    let mut value = String::new();
    loop {
        match chars.next() {
            Some((_, c)) if c == quote => return Ok(Token::Str(value)),
            Some((_, '\\')) => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, '\'')) => value.push('\''),
                Some((_, '"')) => value.push('"'),
                Some((pos, other)) => {
                    return Err(CompileError::InvalidEscape { ch: other, pos })
                }
                None => return Err(CompileError::UnterminatedString { pos: start }),
            },
            Some((_, c)) => value.push(c),
            None => return Err(CompileError::UnterminatedString { pos: start }),
        }
    }
}

fn lex_number(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    start: usize,
) -> Result<Token, CompileError> {
    let mut text = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_digit() {
            text.push(c);
            chars.next();
        } else {
            break;
        }
    }

    // Fractional part; a bare trailing '.' belongs to field access, which is
    // meaningless after a number and rejected by the parser.
    if let Some(&(_, '.')) = chars.peek() {
        let mut lookahead = chars.clone();
        lookahead.next();
        if matches!(lookahead.peek(), Some(&(_, c)) if c.is_ascii_digit()) {
            text.push('.');
            chars.next();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
        }
    }

    text.parse::<f64>()
        .map(Token::Num)
        .map_err(|_| CompileError::InvalidNumber { pos: start })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, wanted: Token) -> Result<(), CompileError> {
        match self.advance() {
            Some(token) if token == wanted => Ok(()),
            Some(token) => Err(CompileError::UnexpectedToken(describe(&token))),
            None => Err(CompileError::UnexpectedEnd),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, CompileError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::OrOr)) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_comparison()?;
        while matches!(self.peek(), Some(Token::AndAnd)) {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, CompileError> {
        let left = self.parse_unary()?;
        let op = match self.peek() {
            Some(Token::EqEq) => CmpOp::Eq,
            Some(Token::NotEq) => CmpOp::Ne,
            Some(Token::Lt) => CmpOp::Lt,
            Some(Token::Le) => CmpOp::Le,
            Some(Token::Gt) => CmpOp::Gt,
            Some(Token::Ge) => CmpOp::Ge,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_unary()?;
        Ok(Expr::Compare(Box::new(left), op, Box::new(right)))
    }

    fn parse_unary(&mut self) -> Result<Expr, CompileError> {
        if matches!(self.peek(), Some(Token::Bang)) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_primary()?;
        while matches!(self.peek(), Some(Token::Dot)) {
            self.advance();
            let name = match self.advance() {
                Some(Token::Ident(name)) => name,
                Some(token) => return Err(CompileError::UnexpectedToken(describe(&token))),
                None => return Err(CompileError::UnexpectedEnd),
            };
            if matches!(self.peek(), Some(Token::LParen)) {
                self.advance();
                let method = Method::from_name(&name)
                    .ok_or(CompileError::UnknownMethod(name))?;
                let arg = self.parse_expr()?;
                self.expect(Token::RParen)?;
                expr = Expr::Call(Box::new(expr), method, Box::new(arg));
            } else {
                expr = Expr::Field(Box::new(expr), name);
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, CompileError> {
        match self.advance() {
            Some(Token::Ident(name)) => match name.as_str() {
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                "null" => Ok(Expr::Literal(Value::Null)),
                "event" => Ok(Expr::Event),
                _ => Err(CompileError::UnknownIdentifier(name)),
            },
            Some(Token::Str(value)) => Ok(Expr::Literal(Value::String(value))),
            Some(Token::Num(value)) => Ok(Expr::Literal(Value::from(value))),
            Some(Token::LParen) => {
                let expr = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Some(token) => Err(CompileError::UnexpectedToken(describe(&token))),
            None => Err(CompileError::UnexpectedEnd),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn eval_expr<'a>(expr: &'a Expr, event: &'a Value) -> Result<Cow<'a, Value>, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(Cow::Borrowed(value)),

        Expr::Event => Ok(Cow::Borrowed(event)),

        Expr::Field(receiver, name) => match eval_expr(receiver, event)? {
            Cow::Borrowed(Value::Object(map)) => map
                .get(name)
                .map(Cow::Borrowed)
                .ok_or_else(|| EvalError::MissingField(name.clone())),
            Cow::Owned(Value::Object(mut map)) => map
                .remove(name)
                .map(Cow::Owned)
                .ok_or_else(|| EvalError::MissingField(name.clone())),
            other => Err(EvalError::NotAnObject {
                field: name.clone(),
                found: type_name(&other),
            }),
        },

        Expr::Call(receiver, method, arg) => {
            let receiver = eval_expr(receiver, event)?;
            let haystack = receiver.as_str().ok_or(EvalError::TypeMismatch {
                op: method.name(),
                found: type_name(&receiver),
            })?;
            let arg = eval_expr(arg, event)?;
            let needle = arg.as_str().ok_or(EvalError::TypeMismatch {
                op: method.name(),
                found: type_name(&arg),
            })?;
            let result = match method {
                Method::Contains => haystack.contains(needle),
                Method::StartsWith => haystack.starts_with(needle),
                Method::EndsWith => haystack.ends_with(needle),
            };
            Ok(Cow::Owned(Value::Bool(result)))
        }

        Expr::Not(inner) => {
            let value = eval_expr(inner, event)?;
            let b = expect_bool(&value, "!")?;
            Ok(Cow::Owned(Value::Bool(!b)))
        }

        Expr::And(left, right) => {
            let left = eval_expr(left, event)?;
            if !expect_bool(&left, "&&")? {
                return Ok(Cow::Owned(Value::Bool(false)));
            }
            let right = eval_expr(right, event)?;
            let b = expect_bool(&right, "&&")?;
            Ok(Cow::Owned(Value::Bool(b)))
        }

        Expr::Or(left, right) => {
            let left = eval_expr(left, event)?;
            if expect_bool(&left, "||")? {
                return Ok(Cow::Owned(Value::Bool(true)));
            }
            let right = eval_expr(right, event)?;
            let b = expect_bool(&right, "||")?;
            Ok(Cow::Owned(Value::Bool(b)))
        }

        Expr::Compare(left, op, right) => {
            let left = eval_expr(left, event)?;
            let right = eval_expr(right, event)?;
            let result = match op {
                CmpOp::Eq => json_equal(&left, &right),
                CmpOp::Ne => !json_equal(&left, &right),
                ordering => compare(*ordering, &left, &right)?,
            };
            Ok(Cow::Owned(Value::Bool(result)))
        }
    }
}

fn expect_bool(value: &Value, op: &'static str) -> Result<bool, EvalError> {
    value.as_bool().ok_or(EvalError::TypeMismatch {
        op,
        found: type_name(value),
    })
}

/// Deep JSON equality with all numbers collapsed to f64.
fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, v)| b.get(k).is_some_and(|w| json_equal(v, w)))
        }
        _ => left == right,
    }
}

fn compare(op: CmpOp, left: &Value, right: &Value) -> Result<bool, EvalError> {
    use std::cmp::Ordering;

    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).ok_or(EvalError::NotComparable {
                left: "number",
                right: "number",
            })?
        }
        (Value::String(a), Value::String(b)) => a.as_str().cmp(b.as_str()),
        (l, r) => {
            return Err(EvalError::NotComparable {
                left: type_name(l),
                right: type_name(r),
            })
        }
    };

    Ok(match op {
        CmpOp::Lt => ordering == Ordering::Less,
        CmpOp::Le => ordering != Ordering::Greater,
        CmpOp::Gt => ordering == Ordering::Greater,
        CmpOp::Ge => ordering != Ordering::Less,
        CmpOp::Eq | CmpOp::Ne => unreachable!("equality handled before ordering"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matches(expr: &str, event: Value) -> bool {
        Selector::compile(expr)
            .expect("compile")
            .matches(&event)
            .expect("eval")
    }

    fn message(body: &str) -> Value {
        json!({
            "type": "m.room.message",
            "sender": "@user:domain.com",
            "origin_server_ts": 1_234_567_890i64,
            "content": {"body": body, "msgtype": "m.text"}
        })
    }

    #[test]
    fn literal_true_matches_everything() {
        assert!(matches("true", json!({})));
        assert!(matches("true", message("anything")));
        assert!(!matches("false", json!({})));
    }

    #[test]
    fn field_access_and_containment() {
        assert!(matches(
            "event.content.body.contains('alert')",
            message("please alert now"),
        ));
        assert!(!matches(
            "event.content.body.contains('alert')",
            message("nothing here"),
        ));
    }

    #[test]
    fn logical_composition() {
        let event = message("alert and notify team");
        assert!(matches(
            "event.type == 'm.room.message' && event.content.body.contains('alert')",
            event.clone(),
        ));
        assert!(matches(
            "event.content.body.contains('missing') || event.content.body.contains('notify')",
            event.clone(),
        ));
        assert!(matches("!event.content.body.contains('missing')", event));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        // false && false || true => (false && false) || true
        assert!(matches("false && false || true", json!({})));
        assert!(!matches("false && (false || true)", json!({})));
    }

    #[test]
    fn short_circuit_skips_right_operand_errors() {
        // `event.nope` would error; it must never be evaluated.
        assert!(!matches("false && event.nope == 1", json!({})));
        assert!(matches("true || event.nope == 1", json!({})));
    }

    #[test]
    fn string_prefix_and_suffix_methods() {
        assert!(matches("event.sender.startsWith('@user')", message("x")));
        assert!(matches("event.sender.endsWith(':domain.com')", message("x")));
        assert!(!matches("event.sender.startsWith('@other')", message("x")));
    }

    #[test]
    fn numeric_comparison_is_f64() {
        assert!(matches("event.origin_server_ts > 0", message("x")));
        assert!(matches("1 == 1.0", json!({})));
        assert!(matches("2 >= 2", json!({})));
        assert!(matches("'abc' < 'abd'", json!({})));
    }

    #[test]
    fn equality_over_structures_and_null() {
        assert!(matches("event.content.msgtype == 'm.text'", message("x")));
        assert!(matches("event.content.msgtype != 'm.image'", message("x")));
        assert!(matches("null == null", json!({})));
        assert!(matches("event.content == event.content", message("x")));
    }

    #[test]
    fn double_quoted_strings_and_escapes() {
        assert!(matches(r#"event.content.body == "it's fine""#, message("it's fine")));
        assert!(matches(r"event.content.body.contains('\'')", message("it's fine")));
    }

    #[test]
    fn missing_field_is_an_eval_error() {
        let selector = Selector::compile("event.content.missing == 'x'").unwrap();
        assert_eq!(
            selector.matches(&message("x")),
            Err(EvalError::MissingField("missing".to_string())),
        );
    }

    #[test]
    fn field_access_on_scalar_is_an_eval_error() {
        let selector = Selector::compile("event.sender.body == 'x'").unwrap();
        assert!(matches!(
            selector.matches(&message("x")),
            Err(EvalError::NotAnObject { .. }),
        ));
    }

    #[test]
    fn contains_on_non_string_is_an_eval_error() {
        let selector = Selector::compile("event.content.contains('x')").unwrap();
        assert!(matches!(
            selector.matches(&message("x")),
            Err(EvalError::TypeMismatch { .. }),
        ));
    }

    #[test]
    fn ordering_across_types_is_an_eval_error() {
        let selector = Selector::compile("event.sender > 5").unwrap();
        assert!(matches!(
            selector.matches(&message("x")),
            Err(EvalError::NotComparable { .. }),
        ));
    }

    #[test]
    fn non_boolean_result_is_not_a_match() {
        // Evaluates to a string; coerced to non-match, not an error.
        let selector = Selector::compile("event.sender").unwrap();
        assert_eq!(selector.matches(&message("x")), Ok(false));
        assert_eq!(
            selector.eval(&message("x")).unwrap(),
            json!("@user:domain.com"),
        );
    }

    #[test]
    fn compile_rejects_malformed_expressions() {
        assert!(matches!(
            Selector::compile(""),
            Err(CompileError::UnexpectedEnd),
        ));
        assert!(matches!(
            Selector::compile("event.content.body.contains('alert'"),
            Err(CompileError::UnexpectedEnd),
        ));
        assert!(matches!(
            Selector::compile("event &&"),
            Err(CompileError::UnexpectedEnd),
        ));
        assert!(matches!(
            Selector::compile("'unterminated"),
            Err(CompileError::UnterminatedString { .. }),
        ));
        assert!(matches!(
            Selector::compile("event ? 1"),
            Err(CompileError::UnexpectedChar { ch: '?', .. }),
        ));
        assert!(matches!(
            Selector::compile("event.body.explode('x')"),
            Err(CompileError::UnknownMethod(_)),
        ));
        assert!(matches!(
            Selector::compile("message.body == 'x'"),
            Err(CompileError::UnknownIdentifier(_)),
        ));
        assert!(matches!(
            Selector::compile("true true"),
            Err(CompileError::TrailingInput),
        ));
        assert!(matches!(
            Selector::compile("event = 1"),
            Err(CompileError::UnexpectedChar { ch: '=', .. }),
        ));
    }

    #[test]
    fn parenthesized_expressions() {
        assert!(matches(
            "(event.type == 'm.room.message') && (1 < 2)",
            message("x"),
        ));
    }
}
