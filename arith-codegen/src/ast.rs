//! AST of an arithmetics module, as handed over by the front end.
//!
//! The tree is already validated (names resolved, arities checked) when it
//! reaches the generator. Every node may carry a [`SourceRegion`]; nodes
//! without one simply contribute no source mapping.

use serde::{Deserialize, Serialize};

/// 0-based line/character position. Characters are counted in UTF-16 code
/// units, the column model of the script host consuming the source map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionRange {
    pub start: Position,
    pub end: Position,
}

/// A span of the source text: byte offsets `[offset, end)` plus the
/// line/character range, which the deserializer derives from the offsets
/// when the producer left it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRegion {
    pub offset: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<PositionRange>,
}

impl SourceRegion {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest region spanning from the start of `self` to the end of `last`.
    pub fn cover(&self, last: &SourceRegion) -> SourceRegion {
        let range = match (self.range, last.range) {
            (Some(first), Some(last)) => Some(PositionRange {
                start: first.start,
                end: last.end,
            }),
            _ => None,
        };
        SourceRegion {
            offset: self.offset,
            end: last.end,
            range,
        }
    }
}

/// A parsed document: the module plus the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub source_text: Option<String>,
    pub module: Module,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub region: Option<SourceRegion>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum Statement {
    Definition(Definition),
    Evaluation(Evaluation),
}

impl Statement {
    pub fn region(&self) -> Option<&SourceRegion> {
        match self {
            Statement::Definition(def) => def.region.as_ref(),
            Statement::Evaluation(evaln) => evaln.region.as_ref(),
        }
    }
}

/// `DEF name(params): body;`. Parameters may be empty, in which case the
/// definition behaves like a constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub name: String,
    #[serde(default)]
    pub name_region: Option<SourceRegion>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub body: Expression,
    #[serde(default)]
    pub region: Option<SourceRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub region: Option<SourceRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub expression: Expression,
    #[serde(default)]
    pub region: Option<SourceRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum Expression {
    NumberLiteral(NumberLiteral),
    BinaryExpression(BinaryExpression),
    FunctionCall(FunctionCall),
}

impl Expression {
    pub fn region(&self) -> Option<&SourceRegion> {
        match self {
            Expression::NumberLiteral(lit) => lit.region.as_ref(),
            Expression::BinaryExpression(bin) => bin.region.as_ref(),
            Expression::FunctionCall(call) => call.region.as_ref(),
        }
    }

    /// Literals and calls delimit themselves and never need parentheses
    /// when used as an operand.
    pub fn is_atomic(&self) -> bool {
        match self {
            Expression::NumberLiteral(_) | Expression::FunctionCall(_) => true,
            Expression::BinaryExpression(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberLiteral {
    pub value: f64,
    #[serde(default)]
    pub region: Option<SourceRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    #[serde(default)]
    pub operator_region: Option<SourceRegion>,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    #[serde(default)]
    pub region: Option<SourceRegion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "^")]
    Pow,
}

impl BinaryOperator {
    /// The operator as written in arithmetics source.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "^",
        }
    }

    /// The operator token in generated script text. `^` is exponentiation in
    /// arithmetics but bitwise xor in the script language.
    pub fn script_token(self) -> &'static str {
        match self {
            BinaryOperator::Pow => "**",
            other => other.symbol(),
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "%" => BinaryOperator::Mod,
            "^" => BinaryOperator::Pow,
            _ => return None,
        })
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `name` or `name(args)`. A call with no arguments reads a constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub function: Reference,
    #[serde(default)]
    pub arguments: Vec<Expression>,
    #[serde(default)]
    pub region: Option<SourceRegion>,
}

impl FunctionCall {
    /// Region spanning every argument, if all of the boundary arguments
    /// carry one.
    pub fn arguments_region(&self) -> Option<SourceRegion> {
        let first = self.arguments.first()?.region()?;
        let last = self.arguments.last()?.region()?;
        Some(first.cover(last))
    }
}

/// Weak, by-name reference to a definition or to a parameter of the
/// enclosing definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    #[serde(default)]
    pub region: Option<SourceRegion>,
}
