use crate::errors::{CoreError, Result};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Operator placed at the end of a filter path.
///
/// Renders as `{"operation": ...}` the way the object filter grammar expects.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// `*= text`, substring match
    Contains(String),
    /// `^= text`
    StartsWith(String),
    /// `$= text`
    EndsWith(String),
    /// `_= text`, case-insensitive exact string match
    Equals(String),
    /// Exact numeric value
    Value(i64),
}

impl FilterOp {
    /// Parse a query using the wildcard shorthand.
    ///
    /// `*text*` becomes a substring match, `*text` a suffix match, `text*` a prefix
    /// match, integers an exact value and anything else an exact string match.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();

        if let Ok(value) = query.parse::<i64>() {
            return FilterOp::Value(value);
        }

        let starts = query.starts_with('*');
        // a lone `*` counts as both ends and matches everything
        let ends = query.ends_with('*');
        let inner = query.trim_matches('*').to_string();

        match (starts, ends) {
            (true, true) => FilterOp::Contains(inner),
            (true, false) => FilterOp::EndsWith(inner),
            (false, true) => FilterOp::StartsWith(inner),
            (false, false) => FilterOp::Equals(inner),
        }
    }

    fn operation(&self) -> Value {
        match self {
            FilterOp::Contains(text) => Value::String(format!("*= {}", text)),
            FilterOp::StartsWith(text) => Value::String(format!("^= {}", text)),
            FilterOp::EndsWith(text) => Value::String(format!("$= {}", text)),
            FilterOp::Equals(text) => Value::String(format!("_= {}", text)),
            FilterOp::Value(value) => Value::from(*value),
        }
    }

    pub fn to_value(&self) -> Value {
        let mut operation = Map::new();
        operation.insert("operation".to_string(), self.operation());
        Value::Object(operation)
    }
}

impl From<i64> for FilterOp {
    fn from(value: i64) -> Self {
        FilterOp::Value(value)
    }
}

/// Object filter built from `path -> operator` clauses.
///
/// ```
/// use slb_core::{FilterOp, ObjectFilter};
///
/// let filter = ObjectFilter::new()
///     .with(&["virtualServers", "id"], FilterOp::Value(42))
///     .unwrap();
/// assert_eq!(
///     filter.to_value(),
///     serde_json::json!({"virtualServers": {"id": {"operation": 42}}})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectFilter {
    clauses: Vec<(Vec<String>, FilterOp)>,
}

impl ObjectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause. Fails on an empty path or a path that would overwrite
    /// an existing clause or branch through one.
    pub fn with(mut self, path: &[&str], op: FilterOp) -> Result<Self> {
        if path.is_empty() || path.iter().any(|segment| segment.is_empty()) {
            return Err(CoreError::InvalidFilter(format!(
                "empty segment in filter path {:?}",
                path
            )));
        }

        let path: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        let conflict = self.clauses.iter().any(|(existing, _)| {
            let shared = existing.len().min(path.len());
            existing[..shared] == path[..shared]
        });
        if conflict {
            return Err(CoreError::InvalidFilter(format!(
                "filter path {} overlaps an existing clause",
                path.join(".")
            )));
        }

        self.clauses.push((path, op));
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render as the nested JSON object sent on the wire.
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();

        for (path, op) in &self.clauses {
            let (leaf, parents) = match path.split_last() {
                Some(split) => split,
                None => continue,
            };

            let mut node = &mut root;
            for segment in parents {
                let entry = node
                    .entry(segment.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                node = match entry {
                    Value::Object(map) => map,
                    // `with` rejects overlapping paths
                    _ => unreachable!("filter branch is always an object"),
                };
            }
            node.insert(leaf.clone(), op.to_value());
        }

        Value::Object(root)
    }
}

impl Serialize for ObjectFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_wildcards() {
        assert_eq!(
            FilterOp::parse("*Load Balancer*"),
            FilterOp::Contains("Load Balancer".to_string())
        );
        assert_eq!(
            FilterOp::parse("Global*"),
            FilterOp::StartsWith("Global".to_string())
        );
        assert_eq!(FilterOp::parse("*.com"), FilterOp::EndsWith(".com".to_string()));
        assert_eq!(FilterOp::parse("dal05"), FilterOp::Equals("dal05".to_string()));
        assert_eq!(FilterOp::parse(" 1234 "), FilterOp::Value(1234));
        assert_eq!(FilterOp::parse("*"), FilterOp::Contains(String::new()));
        assert_eq!(FilterOp::parse("**"), FilterOp::Contains(String::new()));
    }

    #[test]
    fn test_operator_rendering() {
        assert_eq!(
            FilterOp::Contains("Load Balancer".to_string()).to_value(),
            json!({"operation": "*= Load Balancer"})
        );
        assert_eq!(
            FilterOp::Equals("dal05".to_string()).to_value(),
            json!({"operation": "_= dal05"})
        );
        assert_eq!(FilterOp::Value(7).to_value(), json!({"operation": 7}));
    }

    #[test]
    fn test_nested_filter() {
        let filter = ObjectFilter::new()
            .with(
                &["virtualServers", "serviceGroups", "services", "id"],
                FilterOp::Value(99),
            )
            .unwrap();

        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "virtualServers": {
                    "serviceGroups": {
                        "services": {"id": {"operation": 99}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_sibling_clauses_share_parents() {
        let filter = ObjectFilter::new()
            .with(&["items", "description"], FilterOp::parse("*Load Balancer*"))
            .unwrap()
            .with(&["items", "id"], FilterOp::Value(3))
            .unwrap();

        assert_eq!(
            filter.to_value(),
            json!({
                "items": {
                    "description": {"operation": "*= Load Balancer"},
                    "id": {"operation": 3}
                }
            })
        );
    }

    #[test]
    fn test_rejects_bad_paths() {
        assert!(ObjectFilter::new().with(&[], FilterOp::Value(1)).is_err());
        assert!(ObjectFilter::new().with(&["a", ""], FilterOp::Value(1)).is_err());

        let filter = ObjectFilter::new().with(&["a", "b"], FilterOp::Value(1)).unwrap();
        assert!(filter.clone().with(&["a"], FilterOp::Value(2)).is_err());
        assert!(filter.with(&["a", "b", "c"], FilterOp::Value(2)).is_err());
    }
}
