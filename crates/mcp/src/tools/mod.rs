pub mod weather;
mod registry;

pub use registry::{json_schema_enum, json_schema_object, Tool, ToolRegistry};
pub use weather::GetWeatherTool;
