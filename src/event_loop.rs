//! Event pump for the long-running agent.
//!
//! [`run`] feeds every [`HostEvent`] to the router in its own task, so a timer
//! sync and a message sync may overlap; nothing serializes them.
//! [`serve_messages`] is the message bus over newline-delimited JSON: one
//! message object per input line, one reply object per output line.
//!
//! Request:  {"id":1, "type":"SYNC_BOOKMARKS", "meta":{"device_name":"Desk"}}
//! Response: {"id":1, "ok":true, "result":{...}} or {"id":1, "ok":false, "error":"..."}

use std::future::Future;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinSet;

use crate::event_router::EventRouter;
use crate::platform::host::HostEvent;
use crate::types::message::MessageReply;

/// Dispatches events until `shutdown` completes or every sender is gone, then
/// waits for in-flight handlers.
pub async fn run<F>(router: Arc<EventRouter>, mut events: UnboundedReceiver<HostEvent>, shutdown: F)
where
    F: Future<Output = ()>,
{
    let mut handlers = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let router = Arc::clone(&router);
                handlers.spawn(async move { router.dispatch(event).await });
            }
            Some(finished) = handlers.join_next(), if !handlers.is_empty() => {
                if let Err(e) = finished {
                    tracing::error!(error = %e, "event handler panicked");
                }
            }
            _ = &mut shutdown => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    while let Some(finished) = handlers.join_next().await {
        if let Err(e) = finished {
            tracing::error!(error = %e, "event handler panicked");
        }
    }
}

/// Reads messages from `input` until EOF, forwards them as host events and
/// writes each reply to `output`. Returns once every pending reply is written.
///
/// Lines that are not JSON get a parse-error reply; messages the router does
/// not recognise get no reply at all.
pub async fn serve_messages<R, W>(
    input: R,
    output: W,
    events: UnboundedSender<HostEvent>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let output = Arc::new(Mutex::new(output));
    let mut pending = JoinSet::new();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let message: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable message line");
                let reply = MessageReply::failed(format!("parse error: {}", e));
                write_reply(&output, Value::Null, reply).await?;
                continue;
            }
        };

        let id = message.get("id").cloned().unwrap_or(Value::Null);
        let (reply_tx, reply_rx) = oneshot::channel();
        let event = HostEvent::Message {
            message,
            reply: Some(reply_tx),
        };
        if events.send(event).is_err() {
            tracing::warn!("event loop stopped, no longer accepting messages");
            break;
        }

        let output = Arc::clone(&output);
        pending.spawn(async move {
            // A dropped sender means the message was ignored.
            if let Ok(reply) = reply_rx.await {
                write_reply(&output, id, reply).await
            } else {
                Ok(())
            }
        });
    }

    while let Some(written) = pending.join_next().await {
        match written {
            Ok(result) => result?,
            Err(e) => tracing::error!(error = %e, "reply writer panicked"),
        }
    }
    Ok(())
}

async fn write_reply<W>(output: &Mutex<W>, id: Value, reply: MessageReply) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = match serde_json::to_value(&reply) {
        Ok(Value::Object(mut map)) => {
            if !id.is_null() {
                map.insert("id".to_string(), id);
            }
            Value::Object(map).to_string()
        }
        _ => json!({"id": id, "ok": false, "error": "reply encoding failed"}).to_string(),
    };
    line.push('\n');

    let mut out = output.lock().await;
    out.write_all(line.as_bytes()).await?;
    out.flush().await
}
