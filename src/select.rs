//! Output projection for operation responses.
//!
//! Each operation produces a serializable output struct with a natural
//! default projection (the list of items, the launched job, and so on).
//! [`Select`] chooses what actually lands on the pipeline: the default view,
//! the whole response, or a property path into the serialized response.
//! Path syntax is validated up front, before any network call is made; a
//! path that later fails to resolve projects to `null`, matching
//! null-propagating property lookup.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Output transform applied to an operation response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Select {
    /// The operation's natural projection (e.g. the item list).
    #[default]
    Default,
    /// The whole response object.
    Response,
    /// A property path into the serialized response: dot-separated segments
    /// with optional `[n]` indices, e.g. `items[0].source_server_id`.
    Path(String),
}

impl Select {
    /// Parses a select expression from the command line.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        match trimmed {
            "" | "default" => Ok(Select::Default),
            "*" | "response" => Ok(Select::Response),
            path => {
                validate_path(path)?;
                Ok(Select::Path(path.to_string()))
            }
        }
    }

    /// Projects an operation output into the value written to the pipeline.
    ///
    /// `default_path` names the property holding the operation's natural
    /// projection; `None` means the whole response is the default view.
    pub fn project<T: Serialize>(&self, output: &T, default_path: Option<&str>) -> Result<Value> {
        let response = serde_json::to_value(output)?;
        match self {
            Select::Response => Ok(response),
            Select::Default => Ok(match default_path {
                Some(path) => lookup(&response, path),
                None => response,
            }),
            Select::Path(path) => Ok(lookup(&response, path)),
        }
    }
}

/// Rejects malformed paths before any request is built.
fn validate_path(path: &str) -> Result<()> {
    for segment in path.split('.') {
        parse_segment(path, segment)?;
    }
    Ok(())
}

/// Splits one `name[i][j]` segment into the name and its indices.
fn parse_segment<'a>(path: &str, segment: &'a str) -> Result<(&'a str, Vec<usize>)> {
    let bad = |message: &str| Error::SelectPath {
        path: path.to_string(),
        message: message.to_string(),
    };

    let (name, rest) = match segment.find('[') {
        Some(pos) => segment.split_at(pos),
        None => (segment, ""),
    };
    if name.is_empty() {
        return Err(bad("empty path segment"));
    }

    let mut indices = Vec::new();
    let mut rest = rest;
    while !rest.is_empty() {
        let close = rest
            .find(']')
            .ok_or_else(|| bad("unterminated index bracket"))?;
        if !rest.starts_with('[') {
            return Err(bad("malformed index"));
        }
        let index: usize = rest[1..close]
            .parse()
            .map_err(|_| bad("index is not a number"))?;
        indices.push(index);
        rest = &rest[close + 1..];
    }
    Ok((name, indices))
}

/// Resolves a validated path against a value. Missing keys and out-of-range
/// indices yield `null` rather than an error.
fn lookup(value: &Value, path: &str) -> Value {
    let mut current = value;
    for segment in path.split('.') {
        // Validated at parse time; a second failure here cannot happen for
        // paths that came through Select::parse.
        let Ok((name, indices)) = parse_segment(path, segment) else {
            return Value::Null;
        };
        match current.get(name) {
            Some(next) => current = next,
            None => return Value::Null,
        }
        for index in indices {
            match current.get(index) {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }
    }
    current.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Sample {
        items: Vec<serde_json::Value>,
        next_token: Option<String>,
    }

    fn sample() -> Sample {
        Sample {
            items: vec![
                json!({"source_server_id": "s-1", "is_archived": false}),
                json!({"source_server_id": "s-2", "is_archived": true}),
            ],
            next_token: Some("abc".into()),
        }
    }

    #[test]
    fn parse_keywords() {
        assert_eq!(Select::parse("").unwrap(), Select::Default);
        assert_eq!(Select::parse("default").unwrap(), Select::Default);
        assert_eq!(Select::parse("*").unwrap(), Select::Response);
        assert_eq!(Select::parse("response").unwrap(), Select::Response);
        assert_eq!(
            Select::parse("items[0].source_server_id").unwrap(),
            Select::Path("items[0].source_server_id".into())
        );
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        assert!(Select::parse("items..id").is_err());
        assert!(Select::parse("items[").is_err());
        assert!(Select::parse("items[x]").is_err());
        assert!(Select::parse(".leading").is_err());
    }

    #[test]
    fn default_projection_uses_default_path() {
        let value = Select::Default.project(&sample(), Some("items")).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn response_projection_is_whole_output() {
        let value = Select::Response.project(&sample(), Some("items")).unwrap();
        assert!(value.get("items").is_some());
        assert_eq!(value["next_token"], json!("abc"));
    }

    #[test]
    fn path_projection_descends() {
        let select = Select::parse("items[1].source_server_id").unwrap();
        let value = select.project(&sample(), Some("items")).unwrap();
        assert_eq!(value, json!("s-2"));
    }

    #[test]
    fn unresolved_path_projects_null() {
        let select = Select::parse("items[9].source_server_id").unwrap();
        assert_eq!(select.project(&sample(), None).unwrap(), Value::Null);

        let select = Select::parse("missing.field").unwrap();
        assert_eq!(select.project(&sample(), None).unwrap(), Value::Null);
    }
}
