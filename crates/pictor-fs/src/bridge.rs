//! The `fs:dir` bridge between the display side and the privileged side.
//!
//! The display side never touches the filesystem. It sends an invocation
//! (channel name plus arguments) to the privileged side and awaits a reply.
//! Both travel as JSON text, so nothing but plain data crosses the boundary.
//!
//! Exactly one channel is served: [`FS_DIR`], which takes a single path
//! string and answers with a [`Listing`]. There is no way to read file bytes,
//! write or delete through the bridge.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pictor_fs::{Bridge, DirectoryLister};
//!
//! let client = Bridge::spawn(Arc::new(DirectoryLister::default()));
//! let listing = client.dir("./").await?;
//! ```

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use pictor_core::logging::targets;

use crate::entry::Listing;
use crate::error::{BridgeError, ServiceError};
use crate::lister::DirectoryLister;
use crate::service::DirectoryService;

/// Channel that lists a directory.
pub const FS_DIR: &str = "fs:dir";

/// A call across the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub channel: String,
    pub args: Vec<serde_json::Value>,
}

/// The answer to an [`Invocation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reply {
    Ok(serde_json::Value),
    Err(String),
}

struct Envelope {
    message: String,
    reply: oneshot::Sender<String>,
}

/// The privileged end of the bridge.
pub struct Bridge {
    lister: Arc<DirectoryLister>,
}

impl Bridge {
    /// Starts serving bridge calls with `lister` and returns a client.
    ///
    /// Must be called from within a tokio runtime. The serving task ends
    /// once every client has been dropped.
    pub fn spawn(lister: Arc<DirectoryLister>) -> BridgeClient {
        let (sender, receiver) = mpsc::unbounded_channel();
        let bridge = Arc::new(Bridge { lister });
        tokio::spawn(bridge.serve(receiver));
        BridgeClient { sender }
    }

    async fn serve(self: Arc<Self>, mut receiver: mpsc::UnboundedReceiver<Envelope>) {
        tracing::debug!(target: targets::BRIDGE, "bridge serving");
        while let Some(envelope) = receiver.recv().await {
            // Calls are served concurrently.
            let bridge = self.clone();
            tokio::spawn(async move {
                let reply = bridge.handle(&envelope.message).await;
                if envelope.reply.send(reply).is_err() {
                    tracing::debug!(target: targets::BRIDGE, "caller went away before the reply");
                }
            });
        }
        tracing::debug!(target: targets::BRIDGE, "bridge closed");
    }

    /// Handles one encoded invocation and returns the encoded reply.
    async fn handle(&self, message: &str) -> String {
        let reply = match self.dispatch(message).await {
            Ok(value) => Reply::Ok(value),
            Err(err) => {
                tracing::warn!(target: targets::BRIDGE, error = %err, "rejecting bridge call");
                Reply::Err(err.to_string())
            }
        };
        // A reply holding only JSON values and strings always serializes.
        serde_json::to_string(&reply).unwrap_or_else(|err| {
            format!(r#"{{"err":"failed to encode reply: {err}"}}"#)
        })
    }

    async fn dispatch(&self, message: &str) -> Result<serde_json::Value, BridgeError> {
        let invocation: Invocation = serde_json::from_str(message).map_err(BridgeError::Decode)?;
        match invocation.channel.as_str() {
            FS_DIR => {
                let path = invocation
                    .args
                    .first()
                    .and_then(|arg| arg.as_str())
                    .ok_or_else(|| {
                        BridgeError::Rejected(format!("{FS_DIR} expects a path string"))
                    })?;
                tracing::debug!(target: targets::BRIDGE, channel = FS_DIR, path, "bridge call");
                let listing = DirectoryLister::list(&self.lister, path).await;
                serde_json::to_value(listing).map_err(BridgeError::Encode)
            }
            other => Err(BridgeError::UnknownChannel(other.to_string())),
        }
    }
}

/// The display end of the bridge.
#[derive(Clone)]
pub struct BridgeClient {
    sender: mpsc::UnboundedSender<Envelope>,
}

impl BridgeClient {
    /// Sends an invocation and decodes the reply value.
    pub async fn invoke<T>(&self, channel: &str, args: Vec<serde_json::Value>) -> Result<T, BridgeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let invocation = Invocation {
            channel: channel.to_string(),
            args,
        };
        let message = serde_json::to_string(&invocation).map_err(BridgeError::Encode)?;

        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(Envelope {
                message,
                reply: reply_sender,
            })
            .map_err(|_| BridgeError::Closed)?;

        let encoded = reply_receiver.await.map_err(|_| BridgeError::NoReply)?;
        match serde_json::from_str::<Reply>(&encoded).map_err(BridgeError::Decode)? {
            Reply::Ok(value) => serde_json::from_value(value).map_err(BridgeError::Decode),
            Reply::Err(message) => Err(BridgeError::Rejected(message)),
        }
    }

    /// Lists a directory on the privileged side.
    pub async fn dir(&self, path: &str) -> Result<Listing, BridgeError> {
        self.invoke(FS_DIR, vec![serde_json::Value::from(path)]).await
    }

    /// Returns true once the privileged side has stopped serving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl DirectoryService for BridgeClient {
    fn list<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Listing, ServiceError>> {
        async move { self.dir(path).await.map_err(ServiceError::from) }.boxed()
    }
}
