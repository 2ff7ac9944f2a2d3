//! WebSocket broadcast transport.
//!
//! A second listener, one route. Every connected client holds a
//! subscription to the process-wide event channel; the REST handlers
//! publish trade and depth updates after each mutation, and this server
//! fans them out as JSON text frames. Slow clients lag and skip rather
//! than apply backpressure to the matcher. Inbound frames are drained and
//! ignored except for `Close`.

use std::net::SocketAddr;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::stream::StreamExt;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Serve the `/ws` endpoint on its own address until the process exits.
pub async fn serve(addr: SocketAddr, events: broadcast::Sender<String>) -> anyhow::Result<()> {
    let app = Router::new().route("/ws", get(ws_handler)).with_state(events);

    let listener = TcpListener::bind(addr).await?;
    info!("websocket feed listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(events): State<broadcast::Sender<String>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, events.subscribe()))
}

async fn handle_socket(mut socket: WebSocket, mut events: broadcast::Receiver<String>) {
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(text) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "websocket client lagged, skipping missed events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = socket.next() => match inbound {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("websocket client disconnected");
}
