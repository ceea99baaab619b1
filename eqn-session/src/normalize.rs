//! Rewriting of spoken-word tokens into canonical symbols before a command is parsed.
//!
//! Substitutions are plain substring replacements applied one entry at a time, in table order.
//! They are not overlap-safe: with `{"two": "2", "twenty": "20"}`, the text `twenty` becomes
//! `2nty`. Table authors should list longer keys before the keys they contain.

use crate::error::SubstitutionError;
use serde_json::Value;
use std::{fs, path::{Path, PathBuf}};

/// An ordered list of `(token, replacement)` pairs.
pub type Substitutions = Vec<(String, String)>;

/// Provides the substitution table. It is loaded again for every command, so edits to the
/// underlying source apply to the next command.
pub trait SubstitutionSource: Send + Sync {
    fn load(&self) -> Result<Substitutions, SubstitutionError>;
}

/// Reads the table from a JSON object on disk, such as `{"squared": "**2", "equals": "="}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubstitutionSource for JsonFileSource {
    fn load(&self) -> Result<Substitutions, SubstitutionError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|source| SubstitutionError::Io { path: self.path.clone(), source })?;
        let value: Value = serde_json::from_str(&contents)
            .map_err(|source| SubstitutionError::Json { path: self.path.clone(), source })?;

        let Value::Object(entries) = value else {
            return Err(SubstitutionError::NotAnObject { path: self.path.clone() });
        };

        entries.into_iter()
            .map(|(key, value)| match value {
                Value::String(replacement) => Ok((key, replacement)),
                _ => Err(SubstitutionError::NonStringValue { key }),
            })
            .collect()
    }
}

/// A fixed, in-memory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource(pub Substitutions);

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl SubstitutionSource for StaticSource {
    fn load(&self) -> Result<Substitutions, SubstitutionError> {
        Ok(self.0.clone())
    }
}

/// Applies each substitution to `raw`, in order, replacing every occurrence of the token.
pub fn normalize(raw: &str, table: &[(String, String)]) -> String {
    table.iter()
        .fold(raw.to_string(), |text, (token, replacement)| {
            if token.is_empty() {
                text
            } else {
                text.replace(token.as_str(), replacement)
            }
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> Substitutions {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn replace_every_occurrence() {
        let table = table(&[("two", "2"), ("x squared", "x**2")]);
        assert_eq!(normalize("divide by two", &table), "divide by 2");
        assert_eq!(normalize("set x squared equals two two", &table), "set x**2 equals 2 2");
    }

    #[test]
    fn order_matters() {
        let short_first = table(&[("two", "2"), ("twenty", "20")]);
        let long_first = table(&[("twenty", "20"), ("two", "2")]);
        assert_eq!(normalize("add twenty", &short_first), "add 2nty");
        assert_eq!(normalize("add twenty", &long_first), "add 20");
    }

    #[test]
    fn empty_token_is_skipped() {
        assert_eq!(normalize("simplify", &table(&[("", "!")])), "simplify");
    }

    #[test]
    fn load_in_file_order() {
        let file = json_file(r#"{"zero": "0", "equals": "=", "add": "add"}"#);
        let loaded = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(loaded, table(&[("zero", "0"), ("equals", "="), ("add", "add")]));
    }

    #[test]
    fn reload_sees_edits() {
        let file = json_file(r#"{"one": "1"}"#);
        let source = JsonFileSource::new(file.path());
        assert_eq!(source.load().unwrap(), table(&[("one", "1")]));

        fs::write(file.path(), r#"{"one": "one"}"#).unwrap();
        assert_eq!(source.load().unwrap(), table(&[("one", "one")]));
    }

    #[test]
    fn load_errors() {
        let missing = JsonFileSource::new("does/not/exist.json").load().unwrap_err();
        assert!(matches!(missing, SubstitutionError::Io { .. }));

        let malformed = json_file("{ nope");
        let err = JsonFileSource::new(malformed.path()).load().unwrap_err();
        assert!(matches!(err, SubstitutionError::Json { .. }));

        let array = json_file(r#"["two", "2"]"#);
        let err = JsonFileSource::new(array.path()).load().unwrap_err();
        assert!(matches!(err, SubstitutionError::NotAnObject { .. }));

        let number = json_file(r#"{"two": 2}"#);
        let err = JsonFileSource::new(number.path()).load().unwrap_err();
        assert_eq!(err.to_string(), "the replacement for `two` must be a string");
    }

    #[test]
    fn static_source() {
        let source: StaticSource = [("plus", "+")].into_iter().collect();
        assert_eq!(source.load().unwrap(), table(&[("plus", "+")]));
    }
}
