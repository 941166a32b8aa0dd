//! Schema command implementation.
//!
//! `surveyor schema` prints the JSON Schema (Draft-07) for check definition
//! files, enabling IDE autocomplete and validation.

use serde_json::{json, Value};

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete JSON Schema for a check definition file.
    pub fn generate(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Surveyor Check Definition",
            "description": "One declarative assertion against the project tree",
            "type": "object",
            "required": ["id", "kind"],
            "properties": self.common_properties(),
            "oneOf": [
                self.pattern_match_schema(),
                self.file_exists_schema(),
                self.json_path_schema(),
                self.multi_condition_schema(),
                self.glob_count_schema(),
            ]
        })
    }

    fn common_properties(&self) -> Value {
        json!({
            "id": {
                "type": "string",
                "description": "Unique check identifier"
            },
            "title": {
                "type": "string",
                "description": "Display title"
            },
            "reportAs": {
                "type": "string",
                "description": "Alias used as the externally visible result id"
            },
            "relatedRequirementIds": {
                "type": "array",
                "items": {"type": "string"}
            },
            "relatedInvariantIds": {
                "type": "array",
                "items": {"type": "string"}
            },
            "kind": {
                "type": "string",
                "enum": [
                    "PatternMatch",
                    "FileExists",
                    "JsonPathAssertion",
                    "MultiCondition",
                    "GlobCountMatch"
                ]
            }
        })
    }

    fn pattern_match_schema(&self) -> Value {
        json!({
            "properties": {
                "kind": {"const": "PatternMatch"},
                "file": {"type": "string"},
                "pattern": {"type": "string"},
                "flags": {"type": "string"},
                "mustExist": {"type": "boolean", "default": true}
            },
            "required": ["kind", "file", "pattern"]
        })
    }

    fn file_exists_schema(&self) -> Value {
        json!({
            "properties": {
                "kind": {"const": "FileExists"},
                "file": {"type": "string"},
                "shouldExist": {"type": "boolean", "default": true}
            },
            "required": ["kind", "file"]
        })
    }

    fn json_path_schema(&self) -> Value {
        json!({
            "properties": {
                "kind": {"const": "JsonPathAssertion"},
                "file": {"type": "string"},
                "path": {"type": "string", "description": "JSONPath expression"},
                "equals": {"description": "Expected value, compared structurally"},
                "exists": {"type": "boolean", "default": true}
            },
            "required": ["kind", "file", "path"]
        })
    }

    fn multi_condition_schema(&self) -> Value {
        json!({
            "properties": {
                "kind": {"const": "MultiCondition"},
                "mode": {"type": "string", "enum": ["all", "any"], "default": "all"},
                "checks": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "file": {"type": "string"},
                            "pattern": {"type": "string"},
                            "flags": {"type": "string"},
                            "mustExist": {"type": "boolean", "default": true},
                            "label": {"type": "string"}
                        },
                        "required": ["file", "pattern"]
                    }
                }
            },
            "required": ["kind", "checks"]
        })
    }

    fn glob_count_schema(&self) -> Value {
        json!({
            "properties": {
                "kind": {"const": "GlobCountMatch"},
                "pattern": {"type": "string", "description": "Glob expression"},
                "ignore": {"type": "array", "items": {"type": "string"}},
                "dot": {"type": "boolean", "default": false},
                "min": {"type": "integer", "minimum": 0, "default": 1},
                "max": {"type": "integer", "minimum": 0},
                "eachGrep": {
                    "type": "object",
                    "properties": {
                        "pattern": {"type": "string"},
                        "flags": {"type": "string"},
                        "mustExist": {"type": "boolean", "default": true}
                    },
                    "required": ["pattern"]
                },
                "eachMode": {"type": "string", "enum": ["all", "any"], "default": "all"}
            },
            "required": ["kind", "pattern"]
        })
    }
}

impl Default for SchemaCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for SchemaCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = self.generate();
        let json = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::new)?;
        println!("{json}");
        Ok(CommandResult::success())
    }
}
