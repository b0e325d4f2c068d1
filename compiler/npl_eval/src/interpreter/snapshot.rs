//! `foreach` snapshots.

use std::cmp::Ordering;

use npl_ir::{ExprId, ForeachKind, Name, SortOrder, Span};
use npl_world::ObjectRef;

use super::Interpreter;
use crate::errors::EvalError;
use crate::queries::enumerate;
use crate::Value;

impl Interpreter<'_> {
    /// Collect, filter and sort the objects a `foreach` iterates.
    ///
    /// `where` and `sort` clauses are evaluated with `var` bound to each
    /// candidate in turn. The variable is null before and after. Sorting is
    /// stable, so equal keys keep world order.
    pub(crate) fn snapshot(
        &mut self,
        var: Name,
        kind: ForeachKind,
        filter: Option<ExprId>,
        sort: Option<(ExprId, SortOrder)>,
        span: Span,
    ) -> Result<Vec<ObjectRef>, EvalError> {
        self.assign(var, Value::NULL, span)?;

        let mut selected = Vec::new();
        for object in enumerate(self.world, kind) {
            self.assign(var, Value::Object(object), span)?;
            let keep = match filter {
                Some(filter) => self
                    .eval_bool(filter)
                    .map_err(|err| self.release_loop_var(var, span, err))?,
                None => true,
            };
            if !keep {
                continue;
            }
            let key = match sort {
                Some((key, _)) => self
                    .eval_number(key)
                    .map_err(|err| self.release_loop_var(var, span, err))?,
                None => 0.0,
            };
            selected.push((key, object));
        }
        self.assign(var, Value::NULL, span)?;

        if let Some((_, order)) = sort {
            selected.sort_by(|(a, _), (b, _)| compare_keys(*a, *b, order));
        }
        Ok(selected.into_iter().map(|(_, object)| object).collect())
    }

    /// Reset a loop variable to null on the way out of a failed `foreach`
    /// and hand back the error that aborted it.
    pub(crate) fn release_loop_var(&mut self, var: Name, span: Span, err: EvalError) -> EvalError {
        // Null always fits an Object variable; `err` is what gets reported.
        if let Err(clear) = self.assign(var, Value::NULL, span) {
            tracing::debug!(error = %clear, "loop variable not cleared");
        }
        err
    }
}

/// Ordering of two sort keys under a sort direction.
fn compare_keys(a: f64, b: f64, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => a.total_cmp(&b),
        SortOrder::Descending => b.total_cmp(&a),
    }
}
