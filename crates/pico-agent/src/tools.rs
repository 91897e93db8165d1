// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and registry for actions the chat assistant may request.
//!
//! The [`ToolRegistry`] maps function names to [`Tool`]s and produces the
//! function declarations sent with every chat request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pico_core::error::PicoError;
use pico_core::traits::SupplierAdapter;
use pico_core::types::{FunctionDeclaration, OrderItem};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Reply sent back for a function the registry does not know.
pub const UNKNOWN_FUNCTION_NOTICE: &str = "알 수 없는 함수 호출입니다.";

/// Name of the supply order function.
pub const PLACE_ORDER: &str = "placeOrder";

/// Output from a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Text handed back to the model as the function result.
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }

    /// The `response` payload of a function response part.
    pub fn to_response(&self) -> serde_json::Value {
        serde_json::json!({ "result": self.content })
    }
}

/// An action the model can ask the application to run.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Schema of the arguments object, in the service's schema dialect.
    fn parameters_schema(&self) -> serde_json::Value;

    async fn invoke(&self, args: serde_json::Value) -> Result<ToolOutput, PicoError>;
}

/// Registry of available tools, indexed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool under its `name()`, replacing any previous one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Declarations for every registered tool, sorted by name.
    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        let mut decls: Vec<FunctionDeclaration> = self
            .tools
            .values()
            .map(|t| FunctionDeclaration {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect();
        decls.sort_by(|a, b| a.name.cmp(&b.name));
        decls
    }

    /// Runs the named tool. Unknown names and tool errors become error
    /// outputs so the model always gets an answer.
    pub async fn dispatch(&self, name: &str, args: serde_json::Value) -> ToolOutput {
        let Some(tool) = self.get(name) else {
            return ToolOutput::error(UNKNOWN_FUNCTION_NOTICE);
        };
        match tool.invoke(args).await {
            Ok(output) => output,
            Err(e) => ToolOutput::error(format!("Tool error: {e}")),
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct PlaceOrderArgs {
    #[serde(default)]
    items: Option<Vec<OrderItem>>,
}

/// Places a supply order for low-stock items.
pub struct PlaceOrderTool {
    supplier: Arc<dyn SupplierAdapter>,
}

impl PlaceOrderTool {
    pub fn new(supplier: Arc<dyn SupplierAdapter>) -> Self {
        Self { supplier }
    }
}

#[async_trait]
impl Tool for PlaceOrderTool {
    fn name(&self) -> &str {
        PLACE_ORDER
    }

    fn description(&self) -> &str {
        "Place an order for low-stock pharmacy items from a supplier."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "description": "Place an order for low-stock pharmacy items from a supplier.",
            "properties": {
                "items": {
                    "type": "ARRAY",
                    "description": "An array of items to reorder.",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": {
                                "type": "STRING",
                                "description": "The name of the item to order."
                            },
                            "quantityToOrder": {
                                "type": "NUMBER",
                                "description": "The quantity of the item to order. Default is 50."
                            }
                        },
                        "required": ["name", "quantityToOrder"]
                    }
                }
            },
            "required": ["items"]
        })
    }

    async fn invoke(&self, args: serde_json::Value) -> Result<ToolOutput, PicoError> {
        let args: PlaceOrderArgs = serde_json::from_value(args)
            .map_err(|e| PicoError::Validation(format!("invalid placeOrder arguments: {e}")))?;

        // A call without an item list is treated like an unknown call.
        let Some(items) = args.items else {
            return Ok(ToolOutput::error(UNKNOWN_FUNCTION_NOTICE));
        };

        info!(items = items.len(), supplier = self.supplier.name(), "placing supply order");
        let confirmation = self.supplier.place_order(&items).await?;
        Ok(ToolOutput::ok(confirmation))
    }
}
