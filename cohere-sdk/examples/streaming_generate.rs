use cohere_sdk::types::chat::ReplyRequest;
use cohere_sdk::types::models::COMMAND;
use cohere_sdk::CohereClient;
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = CohereClient::builder()
        .model(COMMAND)
        .completion(true)
        .max_tokens(200)
        .stop_sequences(vec!["\n\n".to_string()])
        .build()?;

    let mut stream = client
        .reply(ReplyRequest::new("Write a haiku about borrow checking."))
        .await?;

    // Print the tagged line form: `text: ...`, `tool: ...` or `error: ...`.
    while let Some(event) = stream.next().await {
        println!("{}", event);
    }

    Ok(())
}
