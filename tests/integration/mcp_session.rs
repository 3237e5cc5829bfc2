/// End-to-end MCP sessions driven through the line-oriented request loop
use habit_streak_tracker::mcp::McpServer;
use habit_streak_tracker::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn request(id: u64, method: &str, params: Value) -> String {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}).to_string()
}

fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    request(id, "tools/call", json!({"name": name, "arguments": arguments}))
}

/// Feed `lines` to a server and collect the parsed responses
fn run_session(server: HabitTrackerServer, lines: &[String]) -> (Vec<Value>, HabitTrackerServer) {
    let input = lines.join("\n") + "\n";
    let mut output: Vec<u8> = Vec::new();
    let mut mcp = McpServer::new(server);

    tokio_test::block_on(mcp.run_with(input.as_bytes(), &mut output)).expect("session failed");

    let responses = String::from_utf8(output)
        .expect("output is utf-8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is a JSON-RPC response"))
        .collect();
    (responses, mcp.into_inner())
}

fn text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap_or("")
}

#[test]
fn test_handshake_and_tool_listing() {
    let server = HabitTrackerServer::in_memory().unwrap();
    let lines = vec![
        request(1, "initialize", json!({"protocolVersion": "2024-11-05", "capabilities": {}})),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
        request(2, "tools/list", json!({})),
    ];

    let (responses, _) = run_session(server, &lines);

    // the notification produces no response line
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "Habit Streak Tracker");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 9);
}

#[test]
fn test_habit_lifecycle_over_the_wire() {
    let server = HabitTrackerServer::in_memory().unwrap();

    let (responses, server) = run_session(
        server,
        &[tool_call(1, "habit_create", json!({"name": "Drink water", "time_of_day": "morning"}))],
    );
    assert_eq!(responses[0]["result"]["isError"], false);
    assert!(text(&responses[0]).contains("Drink water"));

    let id = server.habits().habits()[0].id.to_string();
    let yesterday = dates::days_ago(1).to_string();

    let lines = vec![
        tool_call(2, "habit_toggle", json!({"habit_id": id, "date": yesterday})),
        tool_call(3, "habit_toggle", json!({"habit_id": id})),
        tool_call(4, "habit_status", json!({"habit_id": id, "days": 2})),
        tool_call(5, "habit_stats", json!({})),
        tool_call(6, "habit_update", json!({"habit_id": id, "name": "Drink more water", "clear": ["time_of_day"]})),
        tool_call(7, "habit_list", json!({"sort_by": "streak"})),
    ];
    let (responses, server) = run_session(server, &lines);

    assert_eq!(responses.len(), 6);
    for response in &responses {
        assert_eq!(response["result"]["isError"], false, "unexpected error: {}", response);
    }
    assert!(text(&responses[1]).contains("2 days"));
    assert!(text(&responses[2]).contains("■■"));
    assert!(text(&responses[3]).contains("1/1"));
    assert!(text(&responses[5]).contains("Drink more water"));

    let habit = &server.habits().habits()[0];
    assert_eq!(habit.streak(), 2);
    assert_eq!(habit.time_of_day, None);
}

#[test]
fn test_unknown_ids_and_bad_input() {
    let server = HabitTrackerServer::in_memory().unwrap();
    let ghost = HabitId::new().to_string();

    let lines = vec![
        tool_call(1, "habit_toggle", json!({"habit_id": ghost})),
        tool_call(2, "habit_delete", json!({"habit_id": ghost})),
        tool_call(3, "habit_toggle", json!({"habit_id": "not-a-uuid"})),
        tool_call(4, "habit_create", json!({"name": "Read", "frequency": "hourly"})),
        tool_call(5, "habit_toggle", json!({"habit_id": ghost, "date": "yesterday"})),
        "{ this is not json".to_string(),
        request(6, "prompts/list", json!({})),
    ];
    let (responses, server) = run_session(server, &lines);

    assert_eq!(responses.len(), 7);

    // unknown ids are successful no-ops
    assert_eq!(responses[0]["result"]["isError"], false);
    assert!(text(&responses[0]).contains("nothing changed"));
    assert_eq!(responses[1]["result"]["isError"], false);

    // malformed arguments are tool errors
    assert_eq!(responses[2]["result"]["isError"], true);
    assert_eq!(responses[3]["result"]["isError"], true);
    assert_eq!(responses[4]["result"]["isError"], true);

    // protocol-level failures are JSON-RPC errors
    assert_eq!(responses[5]["error"]["code"], -32700);
    assert_eq!(responses[5]["id"], Value::Null);
    assert_eq!(responses[6]["error"]["code"], -32601);

    assert_eq!(server.habits().total_habits(), 0);
}

#[test]
fn test_reset_and_settings_persist_across_sessions() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");

    let server = HabitTrackerServer::new(temp_file.path()).unwrap();
    let lines = vec![
        tool_call(1, "habit_create", json!({"name": "a"})),
        tool_call(2, "habit_create", json!({"name": "b", "days": ["Mon", "Fri"]})),
        tool_call(3, "settings_color_scheme", json!({"scheme": "dark"})),
        tool_call(4, "habit_reset", json!({"confirm": false})),
    ];
    let (responses, server) = run_session(server, &lines);
    assert_eq!(responses[3]["result"]["isError"], true);
    assert_eq!(server.habits().total_habits(), 2);
    assert_eq!(
        server.habits().habits()[1].frequency,
        Frequency::weekly([chrono::Weekday::Mon, chrono::Weekday::Fri])
    );
    drop(server);

    let server = HabitTrackerServer::new(temp_file.path()).unwrap();
    assert_eq!(server.settings().color_scheme(), ColorScheme::Dark);

    let (responses, server) = run_session(
        server,
        &[
            tool_call(5, "habit_reset", json!({"confirm": true})),
            tool_call(6, "settings_color_scheme", json!({})),
        ],
    );
    assert!(text(&responses[0]).contains("Removed 2 habits"));
    assert!(text(&responses[1]).contains("dark"));
    assert_eq!(server.habits().total_habits(), 0);
}
