use super::context::{Gen, UNRESOLVED_CALLEE};
use crate::ast::{BinaryExpression, BinaryOperator, Expression, FunctionCall, NumberLiteral};
use crate::trace::TraceBuilder;
use crate::GenerateError;

impl Gen<'_> {
    pub fn lower_expression(&mut self, expr: &Expression) -> Result<(), GenerateError> {
        self.nested(|this| match expr {
            Expression::NumberLiteral(lit) => {
                this.lower_number(lit);
                Ok(())
            }
            Expression::BinaryExpression(bin) => this.lower_binary(bin),
            Expression::FunctionCall(call) => this.lower_call(call),
        })
    }

    fn lower_number(&mut self, lit: &NumberLiteral) {
        let text = number_text(lit.value);
        self.traced(lit.region.as_ref(), |this| this.append(&text));
    }

    fn lower_binary(&mut self, bin: &BinaryExpression) -> Result<(), GenerateError> {
        // `-2 ** 2` is a syntax error in the script language
        let negative_base =
            bin.operator == BinaryOperator::Pow && is_negative_literal(&bin.left);
        self.traced(bin.region.as_ref(), |this| {
            this.lower_operand(&bin.left, negative_base)?;
            this.append(" ");
            this.traced(bin.operator_region.as_ref(), |this| {
                this.append(bin.operator.script_token())
            });
            this.append(" ");
            this.lower_operand(&bin.right, false)
        })
    }

    /// Operands that are not atomic are always parenthesized; there is no
    /// precedence table. `wrap` forces parentheses around an atomic operand.
    fn lower_operand(&mut self, operand: &Expression, wrap: bool) -> Result<(), GenerateError> {
        if operand.is_atomic() && !wrap {
            return self.lower_expression(operand);
        }
        self.traced(operand.region(), |this| {
            this.append("(");
            this.lower_expression(operand)?;
            this.append(")");
            Ok::<_, GenerateError>(())
        })
    }

    fn lower_call(&mut self, call: &FunctionCall) -> Result<(), GenerateError> {
        let callee = match self.scope.resolve(&call.function.name) {
            Some(symbol) => symbol.name(),
            None => {
                tracing::debug!(
                    name = %call.function.name,
                    "unresolved reference, emitting placeholder callee"
                );
                UNRESOLVED_CALLEE
            }
        };

        self.traced(call.region.as_ref(), |this| {
            this.traced(call.function.region.as_ref(), |this| this.append(callee));
            let arguments = call.arguments_region();
            this.append_if(!call.arguments.is_empty(), |this| {
                this.traced(arguments.as_ref(), |this| {
                    this.append("(");
                    this.join(&call.arguments, ", ", |this, arg| this.lower_expression(arg))?;
                    this.append(")");
                    Ok::<_, GenerateError>(())
                })
            })
        })
    }
}

fn is_negative_literal(expr: &Expression) -> bool {
    matches!(expr, Expression::NumberLiteral(lit) if lit.value < 0.0)
}

/// Script numeral for `value`; integral values print without a fraction.
pub fn number_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        // also covers -0.0, which the script host prints as 0
        "0".to_string()
    } else {
        value.to_string()
    }
}
