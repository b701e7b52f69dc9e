//! Field whitelisting for compiled queries.

/// Allow-list of field names a compiled query may reference.
///
/// An empty whitelist permits every field name. Constructed once per query
/// façade and immutable afterwards.
///
/// # Examples
///
/// ```
/// use jsonwhere::FieldWhitelist;
///
/// let open = FieldWhitelist::allow_all();
/// assert!(open.allows("anything"));
///
/// let strict = FieldWhitelist::new(["name", "age"]);
/// assert!(strict.allows("name"));
/// assert!(!strict.allows("password"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldWhitelist {
    fields: Vec<String>,
}

impl FieldWhitelist {
    /// Build a whitelist from an iterator of field names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldWhitelist {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty whitelist, which allows every field.
    pub fn allow_all() -> Self {
        FieldWhitelist::default()
    }

    /// Check whether a field name may appear in a query.
    pub fn allows(&self, name: &str) -> bool {
        self.fields.is_empty() || self.fields.iter().any(|f| f == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
