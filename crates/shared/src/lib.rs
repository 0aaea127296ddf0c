pub mod error;
pub mod executor;
pub mod macros;
pub mod registry;
pub mod schemas;
pub mod toolbelts;

pub use error::ToolError;
pub use schemas::{FunctionDefinition, ParameterSchema, Tool, ToolSchema};
pub use registry::{get_tools, use_tool};
