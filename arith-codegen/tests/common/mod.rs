//! Shared test support: a minimal arithmetics front end producing documents
//! with exact source regions, an evaluator for the generated script subset,
//! and a decoder for inline source maps.

#![allow(dead_code)]


use arith_codegen::ast::*;
use arith_codegen::frontend::SourceIndex;
use arith_codegen::RawSourceMap;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

// ── Front end ────────────────────────────────────────────────────────────

/// Parse arithmetics source into a validated-looking document. Panics on
/// syntax errors; test inputs are expected to be well formed.
pub fn parse(source: &str) -> Document {
    let tokens = tokenize(source);
    let mut parser = Parser {
        tokens,
        pos: 0,
        index: SourceIndex::new(source),
    };
    let module = parser.module(source.len());
    Document {
        source_text: Some(source.to_string()),
        module,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Number(f64),
    Punct(char),
}

#[derive(Debug, Clone)]
struct Token {
    tok: Tok,
    start: usize,
    end: usize,
}

fn tokenize(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_whitespace() {
            i += 1;
        } else if source[i..].starts_with("//") {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
        } else if source[i..].starts_with("/*") {
            let close = source[i + 2..].find("*/").expect("unterminated comment");
            i += close + 4;
        } else if c.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            let value = source[start..i].parse().expect("malformed number");
            tokens.push(Token {
                tok: Tok::Number(value),
                start,
                end: i,
            });
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push(Token {
                tok: Tok::Ident(source[start..i].to_string()),
                start,
                end: i,
            });
        } else if "(),:;+-*/^%".contains(c) {
            tokens.push(Token {
                tok: Tok::Punct(c),
                start: i,
                end: i + 1,
            });
            i += 1;
        } else {
            panic!("unexpected character {c:?} at {i}");
        }
    }
    tokens
}

struct Parser<'s> {
    tokens: Vec<Token>,
    pos: usize,
    index: SourceIndex<'s>,
}

impl Parser<'_> {
    fn module(&mut self, len: usize) -> Module {
        if self.peek_keyword("module") {
            self.pos += 1;
            self.ident();
        }
        let mut statements = Vec::new();
        while self.pos < self.tokens.len() {
            statements.push(self.statement());
        }
        Module {
            region: Some(self.index.region(0, len)),
            statements,
        }
    }

    fn statement(&mut self) -> Statement {
        if self.peek_keyword("def") {
            let start = self.tokens[self.pos].start;
            self.pos += 1;
            let (name, name_region) = self.ident();
            let mut parameters = Vec::new();
            if self.eat('(') {
                loop {
                    let (name, region) = self.ident();
                    parameters.push(Parameter {
                        name,
                        region: Some(region),
                    });
                    if !self.eat(',') {
                        break;
                    }
                }
                self.expect(')');
            }
            self.expect(':');
            let body = self.expression();
            let end = self.expect(';');
            Statement::Definition(Definition {
                name,
                name_region: Some(name_region),
                parameters,
                body,
                region: Some(self.index.region(start, end)),
            })
        } else {
            let expression = self.expression();
            let start = expression.region().map(|r| r.offset).unwrap_or(0);
            let end = self.expect(';');
            Statement::Evaluation(Evaluation {
                expression,
                region: Some(self.index.region(start, end)),
            })
        }
    }

    fn expression(&mut self) -> Expression {
        self.binary_level(0)
    }

    /// Levels, loosest first: `+ -`, `* /`, `^`, `%`.
    fn binary_level(&mut self, level: usize) -> Expression {
        const LEVELS: [&str; 4] = ["+-", "*/", "^", "%"];
        if level == LEVELS.len() {
            return self.primary();
        }
        let mut left = self.binary_level(level + 1);
        while let Some(Token {
            tok: Tok::Punct(op),
            start,
            end,
        }) = self.tokens.get(self.pos).cloned()
        {
            if !LEVELS[level].contains(op) {
                break;
            }
            self.pos += 1;
            let right = self.binary_level(level + 1);
            let region = self.index.region(
                left.region().expect("left operand region").offset,
                right.region().expect("right operand region").end,
            );
            left = Expression::BinaryExpression(BinaryExpression {
                operator: BinaryOperator::from_symbol(&op.to_string()).expect("operator"),
                operator_region: Some(self.index.region(start, end)),
                left: Box::new(left),
                right: Box::new(right),
                region: Some(region),
            });
        }
        left
    }

    fn primary(&mut self) -> Expression {
        let token = self.tokens.get(self.pos).cloned().expect("unexpected end of input");
        match token.tok {
            Tok::Punct('(') => {
                self.pos += 1;
                let inner = self.expression();
                self.expect(')');
                inner
            }
            Tok::Number(value) => {
                self.pos += 1;
                Expression::NumberLiteral(NumberLiteral {
                    value,
                    region: Some(self.index.region(token.start, token.end)),
                })
            }
            Tok::Ident(_) => {
                let (name, name_region) = self.ident();
                let mut arguments = Vec::new();
                let mut end = token.end;
                if self.eat('(') {
                    loop {
                        arguments.push(self.expression());
                        if !self.eat(',') {
                            break;
                        }
                    }
                    end = self.expect(')');
                }
                Expression::FunctionCall(FunctionCall {
                    function: Reference {
                        name,
                        region: Some(name_region),
                    },
                    arguments,
                    region: Some(self.index.region(token.start, end)),
                })
            }
            other => panic!("unexpected token {other:?} at {}", token.start),
        }
    }

    fn ident(&mut self) -> (String, SourceRegion) {
        match self.tokens.get(self.pos).cloned() {
            Some(Token {
                tok: Tok::Ident(name),
                start,
                end,
            }) => {
                self.pos += 1;
                (name, self.index.region(start, end))
            }
            other => panic!("expected identifier, got {other:?}"),
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.tokens.get(self.pos), Some(Token { tok: Tok::Ident(name), .. }) if name.eq_ignore_ascii_case(keyword))
    }

    fn eat(&mut self, punct: char) -> bool {
        if matches!(self.tokens.get(self.pos), Some(Token { tok: Tok::Punct(c), .. }) if *c == punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `punct`, returning the offset just past it.
    fn expect(&mut self, punct: char) -> usize {
        let end = self.tokens.get(self.pos).map(|t| t.end);
        assert!(self.eat(punct), "expected {punct:?} at token {}", self.pos);
        end.unwrap_or_default()
    }
}

// ── Structural evaluation ────────────────────────────────────────────────

/// Evaluate an expression tree directly (literals and operators only).
pub fn eval_structural(expr: &Expression) -> f64 {
    match expr {
        Expression::NumberLiteral(lit) => lit.value,
        Expression::BinaryExpression(bin) => {
            let l = eval_structural(&bin.left);
            let r = eval_structural(&bin.right);
            match bin.operator {
                BinaryOperator::Add => l + r,
                BinaryOperator::Sub => l - r,
                BinaryOperator::Mul => l * r,
                BinaryOperator::Div => l / r,
                BinaryOperator::Mod => l % r,
                BinaryOperator::Pow => l.powf(r),
            }
        }
        Expression::FunctionCall(_) => panic!("calls need an environment"),
    }
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// ── Source map decoding ──────────────────────────────────────────────────

/// Extract and decode the inline source map appended to `code`.
pub fn inline_source_map(code: &str) -> RawSourceMap {
    const PREFIX: &str = "//# sourceMappingURL=data:application/json;charset=utf-8;base64,";
    let start = code.rfind(PREFIX).expect("missing sourceMappingURL annotation");
    let payload = &code[start + PREFIX.len()..];
    let json = BASE64.decode(payload.trim()).expect("payload is not base64");
    serde_json::from_slice(&json).expect("payload is not a source map")
}

/// One decoded segment with absolute, 0-based values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub generated_line: i64,
    pub generated_column: i64,
    pub source: i64,
    pub original_line: i64,
    pub original_column: i64,
    pub name: Option<i64>,
}

pub fn decode_mappings(mappings: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let (mut source, mut original_line, mut original_column, mut name) = (0, 0, 0, 0);
    for (line, group) in mappings.split(';').enumerate() {
        let mut column = 0;
        for raw in group.split(',').filter(|s| !s.is_empty()) {
            let fields = decode_vlq(raw);
            column += fields[0];
            source += fields[1];
            original_line += fields[2];
            original_column += fields[3];
            let segment_name = fields.get(4).map(|delta| {
                name += delta;
                name
            });
            segments.push(Segment {
                generated_line: line as i64,
                generated_column: column,
                source,
                original_line,
                original_column,
                name: segment_name,
            });
        }
    }
    segments
}

fn decode_vlq(segment: &str) -> Vec<i64> {
    const DIGITS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut values = Vec::new();
    let (mut value, mut shift) = (0i64, 0);
    for ch in segment.chars() {
        let digit = DIGITS.find(ch).expect("invalid base64 digit") as i64;
        value += (digit & 31) << shift;
        if digit & 32 != 0 {
            shift += 5;
        } else {
            let negative = value & 1 == 1;
            value >>= 1;
            values.push(if negative { -value } else { value });
            value = 0;
            shift = 0;
        }
    }
    values
}

/// Line/character of a byte offset in `text`, as `(line, column)`.
pub fn line_col(text: &str, offset: usize) -> (u32, u32) {
    let position = SourceIndex::new(text).position(offset).expect("offset on a char boundary");
    (position.line, position.character)
}
