//! Session context: the provider connection plus its tool catalog
//!
//! The catalog is fetched exactly once when the session opens and is
//! immutable afterwards. Sessions share no state with each other.

use crate::error::Result;
use crate::provider::ToolProvider;
use crate::tools::ToolCatalog;

pub struct Session<P: ToolProvider> {
    provider: P,
    catalog: ToolCatalog,
}

impl<P: ToolProvider> Session<P> {
    /// Fetch the catalog from the provider and hold both
    pub async fn open(provider: P) -> Result<Self> {
        let tools = provider.list_tools().await?;
        let catalog = ToolCatalog::from_tools(tools);
        log::info!("Session opened with {} tools: {}", catalog.len(), catalog.names().join(", "));
        Ok(Self { provider, catalog })
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Close the provider connection
    pub async fn close(mut self) -> Result<()> {
        log::info!("Closing session");
        self.provider.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockToolProvider;
    use crate::tools::Tool;

    #[tokio::test]
    async fn test_open_fetches_catalog_once() {
        let provider = MockToolProvider::new()
            .with_tool(Tool::new("minecraft_chat", "Send a chat message"))
            .with_tool(Tool::new("minecraft_get_status", "Get bot status"));
        let handle = provider.clone();

        let session = Session::open(provider).await.unwrap();
        let _ = session.catalog();
        let _ = session.catalog();

        assert_eq!(session.catalog().names(), vec!["minecraft_chat", "minecraft_get_status"]);
        assert_eq!(handle.list_count(), 1);
    }

    #[tokio::test]
    async fn test_open_propagates_listing_failure() {
        let provider = MockToolProvider::new().with_list_failure("server exited");
        assert!(Session::open(provider).await.is_err());
    }

    #[tokio::test]
    async fn test_close_closes_provider() {
        let provider = MockToolProvider::new();
        let handle = provider.clone();

        let session = Session::open(provider).await.unwrap();
        session.close().await.unwrap();
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let first = Session::open(MockToolProvider::new().with_tool(Tool::new("a", "A")))
            .await
            .unwrap();
        let second = Session::open(MockToolProvider::new().with_tool(Tool::new("b", "B")))
            .await
            .unwrap();

        assert!(first.catalog().contains("a"));
        assert!(!first.catalog().contains("b"));
        assert!(second.catalog().contains("b"));
    }
}
