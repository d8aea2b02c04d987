//! Query parameter encoding
//!
//! [`QueryParams`] keeps parameters in insertion order. Encoding omits null
//! values, expands sequences into repeated keys and form-urlencodes names and
//! values.

use crate::error::{RestError, RestResult};

/// A query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Omitted from the encoded query
    Null,
    /// Single `name=value` pair
    Scalar(String),
    /// One `name=element` pair per element, in order
    List(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Scalar(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Scalar(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(u8, u16, u32, u64, usize, i32, i64, f64);

impl From<rust_decimal::Decimal> for ParamValue {
    fn from(value: rust_decimal::Decimal) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl<T: ToString> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        ParamValue::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        ParamValue::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Ordered query parameters
///
/// # Example
///
/// ```
/// use coinbase_rest::QueryParams;
///
/// let params = QueryParams::new()
///     .with("status", ["open", "pending"])
///     .with("limit", 100u32)
///     .with("product_id", None::<&str>);
///
/// assert_eq!(params.to_query_string().unwrap(), "?status=open&status=pending&limit=100");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a parameter
    ///
    /// Setting a name that already exists replaces its value and keeps its
    /// original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Set a parameter only if the name is not present yet
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        if !self.contains(&name) {
            self.entries.push((name, value.into()));
        }
    }

    /// Whether a parameter with this name exists (null values included)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    /// Get a parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into `(name, value)` pairs in encoding order
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::with_capacity(self.entries.len());

        for (name, value) in &self.entries {
            match value {
                ParamValue::Null => {}
                ParamValue::Scalar(value) => pairs.push((name.as_str(), value.as_str())),
                ParamValue::List(values) => {
                    pairs.extend(values.iter().map(|v| (name.as_str(), v.as_str())));
                }
            }
        }

        pairs
    }

    /// Encode as a URL query string
    ///
    /// Returns `""` when no pair survives, otherwise `?` followed by the
    /// pairs joined with `&`.
    pub fn to_query_string(&self) -> RestResult<String> {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return Ok(String::new());
        }

        let encoded = serde_urlencoded::to_string(&pairs)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;

        Ok(format!("?{}", encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_encode_to_empty_string() {
        assert_eq!(QueryParams::new().to_query_string().unwrap(), "");
    }

    #[test]
    fn test_only_null_values_encode_to_empty_string() {
        let params = QueryParams::new()
            .with("before", None::<String>)
            .with("after", ParamValue::Null);
        assert_eq!(params.to_query_string().unwrap(), "");
    }

    #[test]
    fn test_sequence_repeats_key() {
        let params = QueryParams::new().with("status", ["open", "done"]);
        assert_eq!(
            params.to_query_string().unwrap(),
            "?status=open&status=done"
        );
    }

    #[test]
    fn test_null_omitted() {
        let params = QueryParams::new().with("a", 1u32).with("b", None::<u32>);
        assert_eq!(params.to_query_string().unwrap(), "?a=1");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let params = QueryParams::new()
            .with("z", "1")
            .with("a", "2")
            .with("m", vec!["3", "4"]);
        assert_eq!(params.to_query_string().unwrap(), "?z=1&a=2&m=3&m=4");
    }

    #[test]
    fn test_empty_sequence_contributes_nothing() {
        let params = QueryParams::new()
            .with("status", Vec::<String>::new())
            .with("limit", 5u32);
        assert_eq!(params.to_query_string().unwrap(), "?limit=5");
    }

    #[test]
    fn test_scalar_kinds() {
        let params = QueryParams::new()
            .with("flag", true)
            .with("level", 2u16)
            .with("ratio", 0.5f64);
        assert_eq!(
            params.to_query_string().unwrap(),
            "?flag=true&level=2&ratio=0.5"
        );
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        // Values are form-urlencoded rather than inserted literally
        let params = QueryParams::new()
            .with("q", "a b&c=d")
            .with("start", "2014-11-06T10:34:47.123456");
        assert_eq!(
            params.to_query_string().unwrap(),
            "?q=a+b%26c%3Dd&start=2014-11-06T10%3A34%3A47.123456"
        );
    }

    #[test]
    fn test_unreserved_values_are_unchanged() {
        let params = QueryParams::new()
            .with("product_id", "BTC-USD")
            .with("cursor", "abc_1.2*x");
        assert_eq!(
            params.to_query_string().unwrap(),
            "?product_id=BTC-USD&cursor=abc_1.2*x"
        );
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = QueryParams::new().with("limit", 10u32).with("status", "open");
        params.set("limit", 50u32);
        assert_eq!(params.to_query_string().unwrap(), "?limit=50&status=open");
    }

    #[test]
    fn test_set_default_keeps_existing() {
        let mut params = QueryParams::new().with("limit", 10u32);
        params.set_default("limit", 100u32);
        params.set_default("status", ["all"]);
        assert_eq!(params.to_query_string().unwrap(), "?limit=10&status=all");
    }
}
