use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use common::id_generator::generate_connection_id;
use common::{log, ClientId, ClientMessage, ServerMessage};

use crate::room::{BingoRoom, RoomBroadcaster};
use crate::web_server::WebServerState;

pub async fn handle_websocket(socket: WebSocket, state: WebServerState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(state.client_channel_capacity);

    let client_id = generate_connection_id();

    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let text = match message.to_json() {
                Ok(text) => text,
                Err(e) => {
                    log!("{}", e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    state.broadcaster.register(client_id.clone(), tx).await;
    log!("WebSocket client connected: {}", client_id);
    state.room.connect(&client_id).await;

    while let Some(result) = ws_receiver.next().await {
        let text = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                log!("[ws:{}] WebSocket error: {}", client_id, e);
                break;
            }
        };

        match ClientMessage::from_json(text.as_str()) {
            Ok(message) => handle_client_message(&state.room, &client_id, message).await,
            Err(e) => log!("[ws:{}] {}", client_id, e),
        }
    }

    log!("WebSocket connection ended for client: {}", client_id);
    state.broadcaster.unregister(&client_id).await;
    state.room.disconnect(&client_id).await;

    send_task.abort();
}

pub async fn handle_client_message<B: RoomBroadcaster>(
    room: &BingoRoom<B>,
    client_id: &ClientId,
    message: ClientMessage,
) {
    match message {
        ClientMessage::Join(name) => room.join(client_id, &name).await,
        ClientMessage::RegenerateBoard => room.regenerate_board(client_id).await,
        ClientMessage::DeclareReadyToPlay => room.declare_ready_to_play(client_id).await,
        ClientMessage::DialCurrentNumber => {
            room.dial(client_id).await;
        }
        ClientMessage::DeclareReadyForNext => room.declare_ready_for_next(client_id).await,
        ClientMessage::ClaimBingo => room.claim_bingo(client_id).await,
    }
}
