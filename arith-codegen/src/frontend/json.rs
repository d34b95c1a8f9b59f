use super::source_index::SourceIndex;
use crate::ast::{Document, Expression, SourceRegion, Statement};
use crate::options::GenerateOptions;
use crate::GenerateError;
use serde::Deserialize;

/// JSON nesting spent on document, module, statement and region objects
/// around the expression tree.
const FRAMING_DEPTH: usize = 16;

/// Deserialize a document and fill in missing line/character ranges from
/// its source text.
///
/// ```json
/// {
///   "sourceText": "DEF x: 5;",
///   "module": {
///     "statements": [{
///       "$type": "Definition",
///       "name": "x",
///       "body": { "$type": "NumberLiteral", "value": 5 }
///     }]
///   }
/// }
/// ```
pub fn parse_document(input: &str) -> Result<Document, GenerateError> {
    parse_document_with_limit(input, GenerateOptions::DEFAULT_MAX_DEPTH)
}

/// Like [`parse_document`], accepting expressions nested up to `max_depth`
/// levels. Input whose JSON nesting could only come from deeper expressions
/// fails with [`GenerateError::NestingTooDeep`] before deserializing.
pub fn parse_document_with_limit(input: &str, max_depth: usize) -> Result<Document, GenerateError> {
    check_nesting(input, max_depth)?;

    let mut de = serde_json::Deserializer::from_str(input);
    de.disable_recursion_limit();
    let mut document = Document::deserialize(&mut de)?;
    de.end()?;

    if let Some(text) = document.source_text.as_deref() {
        let index = SourceIndex::new(text);
        let module = &mut document.module;
        resolve(&mut module.region, &index);
        for stmt in &mut module.statements {
            resolve_statement(stmt, &index);
        }
    }
    tracing::debug!(
        statements = document.module.statements.len(),
        has_source = document.source_text.is_some(),
        "deserialized document"
    );
    Ok(document)
}

/// Reject input nested deeper than `max_depth` expressions can account for.
/// Each expression level costs at most two JSON levels (a call argument sits
/// in an array inside the call object).
fn check_nesting(input: &str, max_depth: usize) -> Result<(), GenerateError> {
    let limit = max_depth.saturating_mul(2).saturating_add(FRAMING_DEPTH);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in input.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > limit {
                    return Err(GenerateError::NestingTooDeep { limit: max_depth });
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn resolve(region: &mut Option<SourceRegion>, index: &SourceIndex<'_>) {
    if let Some(region) = region {
        if region.range.is_none() {
            region.range = index.range(region.offset, region.end);
        }
    }
}

fn resolve_statement(stmt: &mut Statement, index: &SourceIndex<'_>) {
    match stmt {
        Statement::Definition(def) => {
            resolve(&mut def.region, index);
            resolve(&mut def.name_region, index);
            for param in &mut def.parameters {
                resolve(&mut param.region, index);
            }
            resolve_expression(&mut def.body, index);
        }
        Statement::Evaluation(evaln) => {
            resolve(&mut evaln.region, index);
            resolve_expression(&mut evaln.expression, index);
        }
    }
}

fn resolve_expression(expr: &mut Expression, index: &SourceIndex<'_>) {
    match expr {
        Expression::NumberLiteral(lit) => resolve(&mut lit.region, index),
        Expression::BinaryExpression(bin) => {
            resolve(&mut bin.region, index);
            resolve(&mut bin.operator_region, index);
            resolve_expression(&mut bin.left, index);
            resolve_expression(&mut bin.right, index);
        }
        Expression::FunctionCall(call) => {
            resolve(&mut call.region, index);
            resolve(&mut call.function.region, index);
            for arg in &mut call.arguments {
                resolve_expression(arg, index);
            }
        }
    }
}
