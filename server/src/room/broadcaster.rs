use std::future::Future;

use common::{ClientId, ServerMessage};

/// Delivery seam between the room and whatever transport holds the sockets.
pub trait RoomBroadcaster: Send + Sync + Clone + 'static {
    fn send_to_client(
        &self,
        client_id: &ClientId,
        message: ServerMessage,
    ) -> impl Future<Output = ()> + Send;

    fn broadcast_to_all(&self, message: ServerMessage) -> impl Future<Output = ()> + Send;
}
