use std::fmt::{self, Display, Formatter};

/// Identifier of a cached query: a scope such as `members` followed by the
/// parameters that distinguish one request from another.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    scope: &'static str,
    parts: Vec<String>,
}

impl QueryKey {
    pub fn new(scope: &'static str) -> Self {
        Self {
            scope,
            parts: Vec::new(),
        }
    }

    pub fn with(mut self, part: impl ToString) -> Self {
        self.parts.push(part.to_string());
        self
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Whether `self` lies under `prefix`: same scope, and `prefix`'s parts
    /// lead `self`'s.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.scope == prefix.scope && self.parts.starts_with(&prefix.parts)
    }
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.scope)?;
        for part in &self.parts {
            write!(f, "/{part}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching_is_per_part() {
        let key = QueryKey::new("members").with("unpaid").with(2);
        assert!(key.starts_with(&QueryKey::new("members")));
        assert!(key.starts_with(&QueryKey::new("members").with("unpaid")));
        assert!(!key.starts_with(&QueryKey::new("members").with("unp")));
        assert!(!key.starts_with(&QueryKey::new("payments")));
        assert_eq!(key.to_string(), "members/unpaid/2");
    }
}
