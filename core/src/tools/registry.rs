//! Tool registry for managing available tools

use crate::pixabay::PixabayClient;
use crate::tools::{Tool, ToolExecutor};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry for managing tool creation and registration
pub struct ToolRegistry {
    factories: BTreeMap<String, Box<dyn ToolFactory>>,
}

/// Factory trait for creating tools
pub trait ToolFactory: Send + Sync {
    /// Create a new instance of the tool backed by `client`
    fn create(&self, client: Arc<PixabayClient>) -> Box<dyn Tool>;

    /// Get the name of the tool this factory creates
    fn tool_name(&self) -> &str;

    /// Get the description of the tool this factory creates
    fn tool_description(&self) -> &str;
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register a tool factory
    pub fn register_factory(&mut self, factory: Box<dyn ToolFactory>) {
        self.factories
            .insert(factory.tool_name().to_string(), factory);
    }

    /// List all available tool names
    pub fn list_tools(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Get tool information
    pub fn get_tool_info(&self, name: &str) -> Option<(&str, &str)> {
        self.factories
            .get(name)
            .map(|factory| (factory.tool_name(), factory.tool_description()))
    }

    /// Create a tool executor with all available tools sharing one client
    pub fn create_executor(&self, client: Arc<PixabayClient>) -> ToolExecutor {
        let mut executor = ToolExecutor::new();

        for factory in self.factories.values() {
            executor.register_tool(factory.create(Arc::clone(&client)));
        }

        executor
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        registry.register_factory(Box::new(crate::tools::builtin::SearchImagesToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::SearchVideosToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::GetImageByIdToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::GetVideoByIdToolFactory));

        registry
    }
}

/// Macro to help implement tool factories
#[macro_export]
macro_rules! impl_tool_factory {
    ($factory:ident, $tool:ident, $name:expr, $description:expr) => {
        pub struct $factory;

        impl $crate::tools::ToolFactory for $factory {
            fn create(
                &self,
                client: ::std::sync::Arc<$crate::pixabay::PixabayClient>,
            ) -> Box<dyn $crate::tools::Tool> {
                Box::new($tool::new(client))
            }

            fn tool_name(&self) -> &str {
                $name
            }

            fn tool_description(&self) -> &str {
                $description
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;

    const EXPECTED_TOOLS: [&str; 4] = [
        "get_image_by_id",
        "get_video_by_id",
        "search_images",
        "search_videos",
    ];

    fn keyless_client() -> Arc<PixabayClient> {
        Arc::new(PixabayClient::new(GatewayConfig::default()).unwrap())
    }

    #[test]
    fn test_default_registry_has_all_tools() {
        let registry = ToolRegistry::default();
        assert_eq!(registry.list_tools(), EXPECTED_TOOLS.to_vec());
    }

    #[test]
    fn test_executor_has_every_registered_tool() {
        let registry = ToolRegistry::default();
        let executor = registry.create_executor(keyless_client());

        for tool_name in registry.list_tools() {
            let tool = executor
                .get_tool(tool_name)
                .unwrap_or_else(|| panic!("Tool '{}' was not created", tool_name));

            assert_eq!(tool.name(), tool_name);
            assert!(!tool.description().is_empty());
            assert!(tool.parameters_schema().is_object());
        }
    }

    #[test]
    fn test_tool_info_matches_tool() {
        let registry = ToolRegistry::default();
        let executor = registry.create_executor(keyless_client());

        for tool_name in registry.list_tools() {
            let (name, description) = registry.get_tool_info(tool_name).unwrap();
            let tool = executor.get_tool(tool_name).unwrap();
            assert_eq!(name, tool.name());
            assert!(tool.description().starts_with(description));
        }
    }

    #[test]
    fn test_listing_works_without_credentials() {
        let executor = ToolRegistry::default().create_executor(keyless_client());
        let descriptors = executor.descriptors();
        assert_eq!(descriptors.len(), 4);
    }

    #[test]
    fn test_tool_examples() {
        let executor = ToolRegistry::default().create_executor(keyless_client());

        for descriptor in executor.descriptors() {
            let tool = executor.get_tool(&descriptor.name).unwrap();
            let examples = tool.examples();

            assert!(!examples.is_empty(), "Tool '{}' has no examples", descriptor.name);
            for example in examples {
                assert!(!example.description.is_empty());
                assert!(example.parameters.is_object());
                assert!(!example.expected_result.is_empty());
            }
        }
    }

    #[test]
    fn test_tool_parameter_schemas() {
        let executor = ToolRegistry::default().create_executor(keyless_client());

        for descriptor in executor.descriptors() {
            let schema = &descriptor.input_schema;

            assert_eq!(schema["type"], "object", "Tool '{}'", descriptor.name);
            let props = schema["properties"].as_object().unwrap();
            assert!(!props.is_empty(), "Tool '{}' has no properties", descriptor.name);
            assert_eq!(schema["additionalProperties"], false);
        }
    }
}
