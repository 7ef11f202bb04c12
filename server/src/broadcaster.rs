use tokio::sync::{mpsc, Mutex};
use std::collections::HashMap;
use std::sync::Arc;
use common::{log, ClientId, ServerMessage};

use crate::room::RoomBroadcaster;

pub type ClientSender = mpsc::Sender<ServerMessage>;

/// Registry of connected sockets. Sends never wait on a slow client: a full
/// or closed channel drops the message and logs it.
#[derive(Clone)]
pub struct Broadcaster {
    clients: Arc<Mutex<HashMap<ClientId, ClientSender>>>,
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster").finish()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn register(&self, client_id: ClientId, sender: ClientSender) {
        self.clients.lock().await.insert(client_id, sender);
    }

    pub async fn unregister(&self, client_id: &ClientId) {
        self.clients.lock().await.remove(client_id);
    }

    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }

    pub async fn send_to_client(&self, client_id: &ClientId, message: ServerMessage) {
        let clients = self.clients.lock().await;
        if let Some(sender) = clients.get(client_id) {
            deliver(client_id, sender, message);
        }
    }

    pub async fn broadcast_to_all(&self, message: ServerMessage) {
        let clients = self.clients.lock().await;
        for (client_id, sender) in clients.iter() {
            deliver(client_id, sender, message.clone());
        }
    }
}

fn deliver(client_id: &ClientId, sender: &ClientSender, message: ServerMessage) {
    let event = message.event_name();
    if let Err(e) = sender.try_send(message) {
        log!("Failed to send {} to client {}: {}", event, client_id, e);
    }
}

impl RoomBroadcaster for Broadcaster {
    async fn send_to_client(&self, client_id: &ClientId, message: ServerMessage) {
        Broadcaster::send_to_client(self, client_id, message).await;
    }

    async fn broadcast_to_all(&self, message: ServerMessage) {
        Broadcaster::broadcast_to_all(self, message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_to_client_targets_one_connection() {
        let broadcaster = Broadcaster::new();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        broadcaster.register(ClientId::from("a"), tx_a).await;
        broadcaster.register(ClientId::from("b"), tx_b).await;

        broadcaster
            .send_to_client(&ClientId::from("a"), ServerMessage::Winner)
            .await;

        assert_eq!(rx_a.try_recv().unwrap(), ServerMessage::Winner);
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_everyone_registered() {
        let broadcaster = Broadcaster::new();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        broadcaster.register(ClientId::from("a"), tx_a).await;
        broadcaster.register(ClientId::from("b"), tx_b).await;
        broadcaster.unregister(&ClientId::from("b")).await;

        broadcaster.broadcast_to_all(ServerMessage::Reset).await;

        assert_eq!(rx_a.try_recv().unwrap(), ServerMessage::Reset);
        assert!(rx_b.try_recv().is_err());
        assert_eq!(broadcaster.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_full_channel_drops_instead_of_blocking() {
        let broadcaster = Broadcaster::new();
        let (tx, mut rx) = mpsc::channel(1);
        broadcaster.register(ClientId::from("slow"), tx).await;

        broadcaster.broadcast_to_all(ServerMessage::GameStarted).await;
        broadcaster.broadcast_to_all(ServerMessage::Reset).await;

        assert_eq!(rx.try_recv().unwrap(), ServerMessage::GameStarted);
        assert!(rx.try_recv().is_err());
    }
}
