//! MCP server implementation that handles JSON-RPC communication
//!
//! This module implements the actual MCP server that:
//! 1. Reads JSON-RPC requests, one per line
//! 2. Dispatches tool calls to the habit and settings stores
//! 3. Writes JSON-RPC responses, one per line

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{HabitTrackerServer, ServerError};

/// MCP server that handles communication with the client
pub struct McpServer {
    habit_tracker: HabitTrackerServer,
    /// Set once the client sends `notifications/initialized`
    initialized: bool,
}

impl McpServer {
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Give back the wrapped server, e.g. to inspect state after a session
    pub fn into_inner(self) -> HabitTrackerServer {
        self.habit_tracker
    }

    /// Run the MCP server over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with(stdin, stdout).await
    }

    /// Run the request loop until the reader reaches end of input
    pub async fn run_with<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request.method);
            return None;
        }

        Some(self.handle_request(request))
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" => {
                info!("MCP client finished initialization");
                self.initialized = true;
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Habit Streak Tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::from_result(id, &result)
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "Missing parameters".to_string(),
                None,
            );
        };

        let call: ToolCallParams = match serde_json::from_value(params) {
            Ok(call) => call,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
        };

        debug!("Calling tool '{}'", call.name);

        // the session may have crossed midnight since the last call
        self.habit_tracker.habits_mut().refresh_streaks();

        let result = self.call_tool(&call.name, call.arguments);
        JsonRpcResponse::from_result(id, &result)
    }

    fn call_tool(&mut self, name: &str, arguments: Map<String, Value>) -> ToolCallResult {
        let args = Value::Object(arguments);
        let server = &mut self.habit_tracker;

        match name {
            "habit_create" => run_tool(args, |p| {
                tools::create_habit(server.habits_mut(), p)
                    .map(|r| format!("{}\nHabit ID: {}", r.message, r.habit_id))
            }),
            "habit_toggle" => run_tool(args, |p| {
                tools::toggle_habit(server.habits_mut(), p).map(|r| r.message)
            }),
            "habit_update" => run_tool(args, |p| {
                tools::update_habit(server.habits_mut(), p).map(|r| r.message)
            }),
            "habit_delete" => run_tool(args, |p| {
                tools::delete_habit(server.habits_mut(), p).map(|r| r.message)
            }),
            "habit_list" => run_tool(args, |p| {
                tools::list_habits(server.habits(), p).map(|r| r.message)
            }),
            "habit_status" => run_tool(args, |p| {
                tools::get_habit_status(server.habits(), p).map(|r| r.message)
            }),
            "habit_stats" => run_tool(args, |p| {
                tools::get_stats(server.habits(), p).map(|r| r.message)
            }),
            "habit_reset" => run_tool(args, |p| {
                tools::reset_all(server.habits_mut(), p).map(|r| r.message)
            }),
            "settings_color_scheme" => run_tool(args, |p| {
                tools::color_scheme(server.settings_mut(), p).map(|r| r.message)
            }),
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        }
    }
}

/// Deserialize tool arguments and render the outcome as a tool result
fn run_tool<P, F>(args: Value, call: F) -> ToolCallResult
where
    P: DeserializeOwned,
    F: FnOnce(P) -> Result<String, ToolError>,
{
    let params: P = match serde_json::from_value(args) {
        Ok(params) => params,
        Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
    };

    match call(params) {
        Ok(message) => ToolCallResult::success(message),
        Err(e) => ToolCallResult::error(e.to_string()),
    }
}

/// Definitions returned by `tools/list`
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let habit_id = json!({"type": "string", "description": "ID of the habit"});

    vec![
        ToolDefinition {
            name: "habit_create".to_string(),
            description: "Create a new habit to track".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Name of the habit"},
                    "description": {"type": "string", "description": "Longer description (optional)"},
                    "icon": {"type": "string", "description": "Emoji icon (optional)"},
                    "color": {"type": "string", "description": "Display color, e.g. #6AADDF (optional)"},
                    "frequency": {"type": "string", "enum": ["daily", "weekly"], "description": "How often (defaults to daily)"},
                    "days": {"type": "array", "items": {"type": "string"}, "description": "Weekdays for a weekly habit, e.g. [\"Mon\", \"Thu\"]"},
                    "time_of_day": {"type": "string", "enum": ["morning", "afternoon", "evening", "anytime"]},
                    "goal": {"type": "integer", "minimum": 1, "description": "Target count (optional)"}
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "habit_toggle".to_string(),
            description: "Mark a habit done for a day, or undo it if already done".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": habit_id,
                    "date": {"type": "string", "description": "Day to toggle (YYYY-MM-DD, optional - defaults to today)"}
                },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_update".to_string(),
            description: "Change a habit's details; completion history is kept".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": habit_id,
                    "name": {"type": "string"},
                    "description": {"type": "string"},
                    "icon": {"type": "string"},
                    "color": {"type": "string"},
                    "frequency": {"type": "string", "enum": ["daily", "weekly"]},
                    "days": {"type": "array", "items": {"type": "string"}},
                    "time_of_day": {"type": "string", "enum": ["morning", "afternoon", "evening", "anytime"]},
                    "goal": {"type": "integer", "minimum": 1},
                    "clear": {"type": "array", "items": {"type": "string", "enum": ["time_of_day", "goal"]}, "description": "Optional fields to unset"}
                },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_delete".to_string(),
            description: "Delete a habit and its history".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": { "habit_id": habit_id },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_list".to_string(),
            description: "List all habits with their current streaks and today's status".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "sort_by": {"type": "string", "enum": ["created", "name", "streak"], "description": "Sort order (default: created)"}
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "habit_status".to_string(),
            description: "Check one habit's streaks, completion rate and recent days".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": habit_id,
                    "days": {"type": "integer", "minimum": 1, "maximum": tools::MAX_CALENDAR_DAYS, "description": "Days in the calendar strip (default: 7)"}
                },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_stats".to_string(),
            description: "Overall stats and the habits with the longest current streaks".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "top": {"type": "integer", "minimum": 0, "description": "How many habits to rank (default: 5)"}
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "habit_reset".to_string(),
            description: "Delete every habit and all history".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "confirm": {"type": "boolean", "description": "Must be true"}
                },
                "required": ["confirm"]
            }),
        },
        ToolDefinition {
            name: "settings_color_scheme".to_string(),
            description: "Read or change the color scheme preference".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "scheme": {"type": "string", "enum": ["auto", "light", "dark"], "description": "New value (omit to read)"},
                    "host_appearance": {"type": "string", "enum": ["light", "dark"], "description": "Client's current appearance, used to resolve auto (optional)"}
                },
                "required": []
            }),
        },
    ]
}
