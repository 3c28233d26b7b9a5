use futures::StreamExt;
use serde_json::{json, Value};

use cohere_sdk::types::chat::{ReplyRequest, ToolDefinition, ToolInvocationResult};
use cohere_sdk::types::models::COMMAND_R_PLUS;
use cohere_sdk::types::StreamEvent;
use cohere_sdk::CohereClient;

fn fibonacci(n: u64) -> u128 {
    let (mut a, mut b): (u128, u128) = (0, 1);
    for _ in 0..n {
        let c = a.saturating_add(b);
        a = b;
        b = c;
    }
    a
}

/// Runs one tool call locally. Cohere sends `{"name": ..., "parameters": {...}}`.
fn run_tool(call: &Value) -> Value {
    let name = call.get("name").and_then(Value::as_str).unwrap_or_default();
    let n = call
        .pointer("/parameters/n")
        .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())));

    match (name, n) {
        ("fibonacci", Some(n)) => json!({ "result": fibonacci(n).to_string() }),
        ("fibonacci", None) => json!({ "error": "missing or invalid parameter 'n'" }),
        _ => json!({ "error": format!("no tool named '{}'", name) }),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = CohereClient::builder().model(COMMAND_R_PLUS).build()?;

    let fibonacci_tool = ToolDefinition::new(
        "fibonacci",
        "Compute the Fibonacci number for a given non-negative integer `n`",
    )
    .parameter(
        "n",
        json!({
            "type": "int",
            "description": "Index in the Fibonacci sequence (0-based).",
            "required": true
        }),
    );

    let user_prompt = "Use the `fibonacci` tool to compute fibonacci(31) and fibonacci(11). \
        Call the tool instead of computing the values yourself.";
    println!("user: {}", user_prompt);

    let mut request = ReplyRequest::new(user_prompt).add_tool(fibonacci_tool);

    // At most one round of tool calls, then the final answer.
    for _ in 0..2 {
        let mut stream = client.reply(request.clone()).await?;
        let mut results = Vec::new();

        print!("assistant: ");
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::Text(text) => print!("{}", text),
                StreamEvent::ToolCalls { calls, json } => {
                    println!("\n{}", StreamEvent::ToolCalls { calls: calls.clone(), json });
                    for call in calls {
                        let output = run_tool(&call);
                        println!("tool_result: {}", output);
                        results.push(ToolInvocationResult::new(call, vec![output]));
                    }
                }
                StreamEvent::Error(error) => eprintln!("\nstream error: {}", error),
            }
        }
        println!();

        if results.is_empty() {
            break;
        }
        for result in results {
            request = request.add_tool_result(result);
        }
    }

    Ok(())
}
