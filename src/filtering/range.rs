//! Range boundary extraction and normalization.
//!
//! A range request arrives as `range[target][min]` / `range[target][max]`
//! where `target` is a bare column or a dot-qualified relation column.
//! Boundaries that parse as calendar dates are widened to day boundaries
//! (`00:00:00` for min, `23:59:59` for max); everything else passes through
//! with numeric coercion. A boundary that fails to parse as a date is not
//! an error; it is the signal that the range is numeric or opaque.

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::sea_query::{Alias, Expr, ExprTrait, SimpleExpr, Value};

use crate::config::SiftConfig;
use crate::params::ParamStore;

/// Raw `min`/`max` bounds read from the request for one target column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeParam {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl RangeParam {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Read the bounds for `target` from the configured range parameter. The
/// target is looked up as one literal segment, so relation targets keep
/// their dot.
pub fn extract(params: &impl ParamStore, config: &SiftConfig, target: &str) -> RangeParam {
    RangeParam {
        min: boundary_input(params, config, target, "min"),
        max: boundary_input(params, config, target, "max"),
    }
}

fn boundary_input(
    params: &impl ParamStore,
    config: &SiftConfig,
    target: &str,
    bound: &str,
) -> Option<String> {
    match params.input_at(&[config.range_key.as_str(), target, bound])? {
        serde_json::Value::String(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Build the comparison for one column from its extracted bounds.
///
/// Two bounds collapse into a single `BETWEEN`, inclusive on both ends no
/// matter how `include_equal_in_range_filter` is set; single bounds follow
/// the flag. Date widening and operator inclusivity are orthogonal: a `max`
/// date is pushed to end-of-day even under strict comparison.
pub fn comparison(
    table: &str,
    column: &str,
    bounds: &RangeParam,
    config: &SiftConfig,
) -> Option<SimpleExpr> {
    let col = || Expr::col((Alias::new(table), Alias::new(column)));
    match (&bounds.min, &bounds.max) {
        (None, None) => None,
        (Some(min), Some(max)) => Some(col().between(
            boundary_value(min, Bound::Min),
            boundary_value(max, Bound::Max),
        )),
        (Some(min), None) => {
            let value = boundary_value(min, Bound::Min);
            Some(if config.include_equal_in_range_filter {
                col().gte(value)
            } else {
                col().gt(value)
            })
        }
        (None, Some(max)) => {
            let value = boundary_value(max, Bound::Max);
            Some(if config.include_equal_in_range_filter {
                col().lte(value)
            } else {
                col().lt(value)
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Min,
    Max,
}

fn boundary_value(raw: &str, bound: Bound) -> Value {
    if let Some(date) = parse_day(raw) {
        let widened = match bound {
            Bound::Min => format!("{} 00:00:00", date.format("%Y-%m-%d")),
            Bound::Max => format!("{} 23:59:59", date.format("%Y-%m-%d")),
        };
        return widened.into();
    }
    if let Ok(int) = raw.parse::<i64>() {
        return int.into();
    }
    if let Ok(float) = raw.parse::<f64>() {
        return float.into();
    }
    raw.into()
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|stamp| stamp.date())
                .ok()
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .map(|stamp| stamp.date())
                .ok()
        })
}
