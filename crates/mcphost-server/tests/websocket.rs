//! Full WebSocket round trips against the router

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use prost::Message as _;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use mcphost_core::{
    ChatClient, Choice, Logger, MockProvider, NoOpLogger, ProviderModelConfig, StaticToolProvider,
    ToolCall, ToolProvider,
};
use mcphost_server::{router, ChatFrame};

fn logger() -> Arc<dyn Logger> {
    Arc::new(NoOpLogger::new())
}

async fn serve(client: ChatClient) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(Arc::new(client))).await.unwrap();
    });
    format!("ws://{}/ws", addr)
}

fn user_frame(content: &str) -> Message {
    Message::Binary(ChatFrame::new("user", content).encode_to_vec().into())
}

fn decode(msg: Message) -> ChatFrame {
    let data = msg.into_data();
    ChatFrame::decode(&data[..]).unwrap()
}

#[tokio::test]
async fn replies_with_assistant_frame() {
    let llm = Arc::new(MockProvider::echo(logger()));
    let url = serve(ChatClient::new(llm, ProviderModelConfig::new("m"), logger())).await;
    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();

    ws.send(user_frame("hello")).await.unwrap();
    let reply = decode(ws.next().await.unwrap().unwrap());

    assert_eq!(reply, ChatFrame::new("assistant", "Echo: hello"));
}

#[tokio::test]
async fn malformed_frame_keeps_connection_open() {
    let llm = Arc::new(MockProvider::echo(logger()));
    let url = serve(ChatClient::new(llm, ProviderModelConfig::new("m"), logger())).await;
    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();

    ws.send(Message::Binary(vec![0xffu8, 0xff, 0xff].into())).await.unwrap();
    ws.send(user_frame("after garbage")).await.unwrap();

    let reply = decode(ws.next().await.unwrap().unwrap());
    assert_eq!(reply.content, "Echo: after garbage");
}

#[tokio::test]
async fn tool_round_over_the_socket() {
    let llm = Arc::new(MockProvider::scripted(
        vec![
            vec![Choice::tool_calls(vec![ToolCall::new("call_1", "X", "{}")])],
            vec![Choice::text("The answer is 4")],
        ],
        logger(),
    ));
    let tools: Arc<dyn ToolProvider> =
        Arc::new(StaticToolProvider::new("calc").with_text_tool("X", "4"));
    let client = ChatClient::new(llm, ProviderModelConfig::new("m"), logger())
        .with_providers(vec![tools]);
    let url = serve(client).await;
    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();

    ws.send(user_frame("What's 2+2 and also call tool X")).await.unwrap();
    let reply = decode(ws.next().await.unwrap().unwrap());

    assert_eq!(reply.content, "The answer is 4");
}

#[tokio::test]
async fn each_connection_has_its_own_history() {
    let llm = Arc::new(MockProvider::echo(logger()));
    let url = serve(ChatClient::new(llm.clone(), ProviderModelConfig::new("m"), logger())).await;

    let (mut first, _) = connect_async(url.as_str()).await.unwrap();
    first.send(user_frame("one")).await.unwrap();
    first.next().await.unwrap().unwrap();
    first.send(user_frame("two")).await.unwrap();
    first.next().await.unwrap().unwrap();

    let (mut second, _) = connect_async(url.as_str()).await.unwrap();
    second.send(user_frame("fresh")).await.unwrap();
    second.next().await.unwrap().unwrap();

    let requests = llm.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].messages.len(), 3);
    assert_eq!(requests[2].messages.len(), 1);
}
