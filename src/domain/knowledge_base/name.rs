//! Knowledge base name

use serde::{Deserialize, Serialize};

use super::validation::{validate_knowledge_base_name, KnowledgeBaseValidationError};

/// Knowledge base identifier - an opaque display name chosen by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBaseName(String);

impl KnowledgeBaseName {
    /// Create a name from user input, trimming it and rejecting blanks
    pub fn parse(name: &str) -> Result<Self, KnowledgeBaseValidationError> {
        validate_knowledge_base_name(name).map(|n| Self(n.to_string()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name with its first character upper-cased, as shown in lists and headers
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for KnowledgeBaseName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for KnowledgeBaseName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<KnowledgeBaseName> for String {
    fn from(name: KnowledgeBaseName) -> Self {
        name.0
    }
}

impl PartialEq<str> for KnowledgeBaseName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for KnowledgeBaseName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for KnowledgeBaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_capitalizes_first_char() {
        assert_eq!(KnowledgeBaseName::from("java").display_name(), "Java");
        assert_eq!(KnowledgeBaseName::from("Network").display_name(), "Network");
        assert_eq!(KnowledgeBaseName::from("éclair").display_name(), "Éclair");
        assert_eq!(KnowledgeBaseName::from("").display_name(), "");
    }

    #[test]
    fn test_parse_trims() {
        let name = KnowledgeBaseName::parse("  algorithm ").unwrap();
        assert_eq!(name.as_str(), "algorithm");
        assert!(KnowledgeBaseName::parse("   ").is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let names: Vec<KnowledgeBaseName> = serde_json::from_str(r#"["java","db"]"#).unwrap();
        assert_eq!(names[0], "java");
        assert_eq!(serde_json::to_string(&names[1]).unwrap(), "\"db\"");
    }
}
