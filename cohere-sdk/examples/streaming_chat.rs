use cohere_sdk::types::chat::{ConversationMessage, ReplyRequest};
use cohere_sdk::types::models::COMMAND_R;
use cohere_sdk::types::{Role, StreamEvent};
use cohere_sdk::CohereClient;
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let client = CohereClient::builder()
        .model(COMMAND_R)
        .temperature(0.3)
        .build()?;

    let request = ReplyRequest::new("Tell me a story about a Rust programmer.")
        .preamble("You are a concise storyteller.")
        .add_history(ConversationMessage::new(Role::User, "Hi!"))
        .add_history(ConversationMessage::new(Role::Chatbot, "Hello, what shall I write?"));

    let mut stream = client.reply(request).await?;

    while let Some(event) = stream.next().await {
        match event {
            StreamEvent::Text(text) => print!("{}", text),
            StreamEvent::Error(error) => eprintln!("\nStream error: {}", error),
            other => println!("\n{}", other),
        }
    }
    println!();

    Ok(())
}
