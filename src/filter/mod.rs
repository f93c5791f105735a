//! Threshold filter conditions.
//!
//! A condition is a single comparison over one of five derived event fields,
//! e.g. `content_size > 50000` or `tool_identifier == "Bash"`. This is a
//! deliberately restricted mini-language: one field, one operator, one
//! literal — never an expression evaluator.

use crate::config::FilterDef;

/// Comparison operators, in detection priority order.
///
/// Two-character symbols come first so `>=` is found before `>` when
/// scanning the condition string for an operator substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Ge,
    Le,
    Gt,
    Lt,
    Eq,
    Ne,
}

impl Op {
    const PRIORITY: [Op; 6] = [Op::Ge, Op::Le, Op::Gt, Op::Lt, Op::Eq, Op::Ne];

    fn symbol(self) -> &'static str {
        match self {
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Eq => "==",
            Op::Ne => "!=",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Op::Ge | Op::Le | Op::Gt | Op::Lt)
    }
}

/// The fixed set of named fields a condition may reference, derived from the
/// sanitized event. Anything else is unknown and never matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFields {
    pub content_size: u64,
    pub execution_time: i64,
    pub prompt_character_count: u64,
    pub tool_identifier: String,
    pub hook_category: String,
}

/// A field value as seen by the comparison operators.
enum FieldValue<'a> {
    Num(f64),
    Text(&'a str),
}

impl EventFields {
    fn lookup(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "content_size" => Some(FieldValue::Num(self.content_size as f64)),
            "execution_time" => Some(FieldValue::Num(self.execution_time as f64)),
            "prompt_character_count" => Some(FieldValue::Num(self.prompt_character_count as f64)),
            "tool_identifier" => Some(FieldValue::Text(&self.tool_identifier)),
            "hook_category" => Some(FieldValue::Text(&self.hook_category)),
            _ => None,
        }
    }
}

impl FieldValue<'_> {
    /// Numeric view of the field. Text coerces like the comparison expects:
    /// an empty string is 0, anything unparsable is no value at all.
    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Num(n) => Some(*n),
            FieldValue::Text(s) if s.is_empty() => Some(0.0),
            FieldValue::Text(s) => s.parse().ok(),
        }
    }

    fn as_text(&self) -> String {
        match self {
            FieldValue::Num(n) => {
                // Integral values render without a trailing `.0` so that
                // `execution_time == 5000` compares against "5000".
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            FieldValue::Text(s) => s.to_string(),
        }
    }
}

/// One parsed comparison: field name, operator, literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition<'a> {
    pub field: &'a str,
    pub op: Op,
    pub literal: &'a str,
}

impl<'a> Condition<'a> {
    /// Split a raw condition on the first occurrence of `op`'s symbol.
    /// `None` when the symbol does not appear at all.
    fn split_on(raw: &'a str, op: Op) -> Option<Self> {
        let (lhs, rhs) = raw.split_once(op.symbol())?;
        Some(Condition {
            field: lhs.trim(),
            op,
            literal: rhs.trim().trim_matches(|c| c == '"' || c == '\''),
        })
    }

    /// Evaluate against the field mapping.
    ///
    /// `None` means this parse attempt is unusable — unknown field name, or
    /// a numeric operator where either side fails to parse as a number —
    /// and the caller should keep scanning for another operator symbol.
    fn try_match(&self, fields: &EventFields) -> Option<bool> {
        let value = fields.lookup(self.field)?;
        if self.op.is_numeric() {
            let lhs = value.as_number()?;
            let rhs: f64 = self.literal.parse().ok()?;
            Some(match self.op {
                Op::Ge => lhs >= rhs,
                Op::Le => lhs <= rhs,
                Op::Gt => lhs > rhs,
                Op::Lt => lhs < rhs,
                Op::Eq | Op::Ne => unreachable!("guarded by is_numeric"),
            })
        } else {
            let lhs = value.as_text().to_lowercase();
            let rhs = self.literal.to_lowercase();
            Some(match self.op {
                Op::Eq => lhs == rhs,
                Op::Ne => lhs != rhs,
                _ => unreachable!("guarded by is_numeric"),
            })
        }
    }
}

/// Evaluate a condition string against the derived fields.
///
/// Operators are tried in priority order; the condition is split on the
/// first occurrence of each symbol in turn. An unusable parse (unknown
/// field, unparsable numeric literal) does not fail the condition — the
/// scan falls through to the next operator symbol, so a condition
/// containing several operator-like substrings can end up matching on a
/// later one. A condition that matches no operator, or whose every parse
/// attempt is unusable, evaluates to false. Never errors.
pub fn evaluate_condition(condition: &str, fields: &EventFields) -> bool {
    for op in Op::PRIORITY {
        let Some(parsed) = Condition::split_on(condition, op) else {
            continue;
        };
        if let Some(matched) = parsed.try_match(fields) {
            return matched;
        }
    }
    false
}

/// Evaluate every configured filter, returning the definitions that fired.
///
/// Filters with an empty name or condition are skipped, matching how blank
/// config entries behave. Evaluation is per-filter total: one bad condition
/// never affects its neighbors.
pub fn matching_filters<'a>(filters: &'a [FilterDef], fields: &EventFields) -> Vec<&'a FilterDef> {
    filters
        .iter()
        .filter(|f| !f.name.is_empty() && !f.condition.is_empty())
        .filter(|f| {
            let matched = evaluate_condition(&f.condition, fields);
            if matched {
                tracing::debug!("filter '{}' matched", f.name);
            }
            matched
        })
        .collect()
}
