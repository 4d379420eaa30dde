//! Serialization utilities.

/// Rank positions encoded as integers, with `-1` standing for "not found".
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Match {
///     #[serde(with = "nlc_evaluation::serialization::match_index")]
///     match_index: Option<usize>,
/// }
///
/// let json = serde_json::to_string(&Match { match_index: None }).unwrap();
/// assert_eq!(json, r#"{"match_index":-1}"#);
/// ```
pub mod match_index {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize `Some(rank)` as the rank and `None` as `-1`.
    pub fn serialize<S>(index: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match index {
            Some(rank) => serializer.serialize_u64(*rank as u64),
            None => serializer.serialize_i64(-1),
        }
    }

    /// Deserialize a rank; negative numbers and `null` mean "not found".
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| usize::try_from(value).ok()))
    }
}
