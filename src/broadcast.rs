//! Element-wise application of an operator over vector-typed operands.
//!
//! An operator whose operands all evaluate to single values is computed once.
//! When one or more operands evaluate to vectors, those vectors must have the
//! same length `L`; the operator is then computed `L` times, row `i` taking
//! element `i` of every vector operand and the unchanged value of every scalar
//! operand, and the row results are collected into one vector.
//!
//! ```text
//! a.*.b      field `b` of each node in the vector `a.*`
//! x.* && y.* pairwise `&&` of two equal-length vectors
//! ```

use tracing::trace;

use crate::{
    ast::Expr,
    evaluator::{EvalContext, EvalError},
    lexer::Position,
    node::{NULL, Node},
    value::Value,
};

/// Evaluates each operand once, then hands the results to [`dot_product`].
pub(crate) fn eval_as_dot_product<F>(
    position: Position,
    operands: &[&Expr],
    ctx: &EvalContext<'_>,
    compute: F,
) -> Result<Value, EvalError>
where
    F: FnMut(&[&Node]) -> Result<Value, EvalError>,
{
    let values = operands
        .iter()
        .map(|operand| operand.eval(ctx))
        .collect::<Result<Vec<_>, _>>()?;
    dot_product(position, &values, compute)
}

/// Applies `compute` to already evaluated operands, broadcasting over any
/// vectors among them.
///
/// The operand values are read by index for every row and never re-evaluated.
/// Evaluation stops at the first row that fails.
pub(crate) fn dot_product<F>(
    position: Position,
    values: &[Value],
    mut compute: F,
) -> Result<Value, EvalError>
where
    F: FnMut(&[&Node]) -> Result<Value, EvalError>,
{
    let mut length: Option<usize> = None;
    for value in values {
        if let Value::Vector(nodes) = value {
            match length {
                None => length = Some(nodes.len()),
                Some(len) if len != nodes.len() => {
                    return Err(EvalError::runtime(
                        position,
                        format!("dot product of incompatible sizes: {len} vs {}", nodes.len()),
                    ));
                }
                Some(_) => {}
            }
        }
    }

    let mut row: Vec<&Node> = Vec::with_capacity(values.len());

    let Some(length) = length else {
        row.extend(values.iter().filter_map(Value::scalar));
        return compute(&row);
    };

    trace!(operands = values.len(), length, "broadcasting");

    let mut out = Vec::with_capacity(length);
    for i in 0..length {
        row.clear();
        row.extend(values.iter().map(|value| match value {
            Value::Vector(nodes) => &nodes[i],
            scalar => scalar.scalar().unwrap_or(&NULL),
        }));
        compute(&row)?.add_to(&mut out);
    }
    Ok(Value::Vector(out))
}
