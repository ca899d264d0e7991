use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::extract::{author_of, date_of, rating_of, text_of};
use crate::json::{field, object_or_null, render_cell, NULL};

/// Column order of every output file.
pub const CSV_HEADER: [&str; 7] = [
    "business_name",
    "business_alias",
    "total_reviews",
    "author",
    "rating",
    "date",
    "text",
];

/// One flattened review row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    pub business_name: String,
    pub business_alias: String,
    pub total_reviews: String,
    pub author: String,
    pub rating: String,
    pub date: String,
    pub text: String,
}

impl ReviewRecord {
    /// Cells in [`CSV_HEADER`] order.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.business_name.as_str(),
            self.business_alias.as_str(),
            self.total_reviews.as_str(),
            self.author.as_str(),
            self.rating.as_str(),
            self.date.as_str(),
            self.text.as_str(),
        ]
    }
}

/// Where a business' review count came from.
#[derive(Debug, Clone, PartialEq)]
pub enum TotalReviews {
    /// `reviews.totalCount`, copied as given.
    Reported(Value),
    /// Sum over `reviewCountsByLanguage[*].count`.
    Summed(i64),
    /// Neither source was present. Distinct from a confirmed zero.
    Unknown,
}

impl TotalReviews {
    pub fn from_business(business: &Value) -> Self {
        if let Some(reported) = field(object_or_null(business, "reviews"), "totalCount") {
            return TotalReviews::Reported(reported.clone());
        }

        match field(business, "reviewCountsByLanguage") {
            Some(Value::Array(langs)) if !langs.is_empty() => TotalReviews::Summed(
                langs
                    .iter()
                    .map(|lang| coerce_count(field(lang, "count")))
                    .fold(0i64, i64::saturating_add),
            ),
            _ => TotalReviews::Unknown,
        }
    }

    pub fn render(&self) -> String {
        match self {
            TotalReviews::Reported(v) => render_cell(v),
            TotalReviews::Summed(n) => n.to_string(),
            TotalReviews::Unknown => String::new(),
        }
    }
}

/// Integer view of a per-language count. Anything unusable counts as zero.
fn coerce_count(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

/// Business-level fields shared by every review of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessContext {
    pub name: String,
    pub alias: String,
    pub total_reviews: TotalReviews,
}

impl BusinessContext {
    pub fn from_business(business: &Value) -> Self {
        let name = field(business, "name")
            .or_else(|| field(business, "displayName"))
            .map(render_cell)
            .unwrap_or_default();
        let alias = field(business, "alias").map(render_cell).unwrap_or_default();

        Self {
            name,
            alias,
            total_reviews: TotalReviews::from_business(business),
        }
    }

    fn record_for(&self, total_reviews: &str, node: &Value) -> ReviewRecord {
        ReviewRecord {
            business_name: self.name.clone(),
            business_alias: self.alias.clone(),
            total_reviews: total_reviews.to_string(),
            author: author_of(node),
            rating: rating_of(node),
            date: date_of(node),
            text: text_of(node),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub operations: usize,
    pub businesses: usize,
    pub records: usize,
}

/// A lone document is treated as a one-element list of operations.
pub fn operations(input: &Value) -> Vec<&Value> {
    match input {
        Value::Array(ops) => ops.iter().collect(),
        single => vec![single],
    }
}

/// `data.business` of an operation, or `NULL` when any level is missing.
pub fn business_of(op: &Value) -> &Value {
    object_or_null(object_or_null(op, "data"), "business")
}

fn edges_of(business: &Value) -> &[Value] {
    match field(object_or_null(business, "reviews"), "edges") {
        Some(Value::Array(edges)) => edges.as_slice(),
        _ => &[],
    }
}

fn node_of(edge: &Value) -> &Value {
    match field(edge, "node") {
        Some(node @ Value::Object(_)) => node,
        _ => &NULL,
    }
}

/// Flatten a single operation into one record per review edge.
pub fn walk_operation(op: &Value) -> Vec<ReviewRecord> {
    let business = business_of(op);
    let context = BusinessContext::from_business(business);
    let total_reviews = context.total_reviews.render();

    let edges = edges_of(business);
    if edges.is_empty() {
        trace!(business = %context.name, "operation has no review edges");
    }

    edges
        .iter()
        .map(|edge| context.record_for(&total_reviews, node_of(edge)))
        .collect()
}

/// Flatten a whole export, preserving operation order then edge order.
pub fn walk(input: &Value) -> Vec<ReviewRecord> {
    walk_with_summary(input).0
}

pub fn walk_with_summary(input: &Value) -> (Vec<ReviewRecord>, WalkSummary) {
    let mut summary = WalkSummary::default();
    let mut out = Vec::new();

    for (index, op) in operations(input).into_iter().enumerate() {
        summary.operations += 1;
        if business_of(op).is_object() {
            summary.businesses += 1;
        }

        let rows = walk_operation(op);
        debug!(operation = index, records = rows.len(), "flattened operation");
        out.extend(rows);
    }

    summary.records = out.len();
    (out, summary)
}
