//! Tool catalog snapshot
//!
//! The catalog is fetched once per session from the provider and never
//! mutated afterwards. Order is the provider's order.

use super::definition::Tool;

/// Immutable, ordered catalog of provider tools
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCatalog {
    tools: Vec<Tool>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from tools in provider order
    ///
    /// Later duplicates of a name are dropped so names stay unique.
    pub fn from_tools(tools: Vec<Tool>) -> Self {
        let mut unique: Vec<Tool> = Vec::with_capacity(tools.len());
        for tool in tools {
            if unique.iter().any(|t| t.name == tool.name) {
                log::warn!("Ignoring duplicate tool definition: {}", tool.name);
                continue;
            }
            unique.push(tool);
        }
        Self { tools: unique }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// List all tool names in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Iterate tools in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    /// Get number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToolCatalog {
        ToolCatalog::from_tools(vec![
            Tool::new("minecraft_chat", "Send a chat message"),
            Tool::new("minecraft_get_status", "Get bot status"),
            Tool::new("minecraft_get_inventory", "Get inventory"),
        ])
    }

    #[test]
    fn test_catalog_new_empty() {
        let catalog = ToolCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_catalog_preserves_order() {
        assert_eq!(
            sample().names(),
            vec!["minecraft_chat", "minecraft_get_status", "minecraft_get_inventory"]
        );
    }

    #[test]
    fn test_catalog_get_and_contains() {
        let catalog = sample();
        assert_eq!(catalog.get("minecraft_chat").unwrap().description, "Send a chat message");
        assert!(catalog.contains("minecraft_get_status"));
        assert!(!catalog.contains("minecraft_fly"));
        assert!(catalog.get("none").is_none());
    }

    #[test]
    fn test_catalog_drops_duplicate_names() {
        let catalog = ToolCatalog::from_tools(vec![
            Tool::new("dup", "first"),
            Tool::new("other", "x"),
            Tool::new("dup", "second"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("dup").unwrap().description, "first");
    }
}
