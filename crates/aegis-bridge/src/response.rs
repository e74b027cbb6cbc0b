//! Worker -> UI delivery.
//!
//! Async workers push [`Outbound`] messages into a bounded tokio channel and
//! wake the UI loop; the UI thread drains the channel and evaluates one
//! script per message in the page. A full channel makes workers wait.

use std::sync::Arc;

use aegis_common::Outbound;
use tokio::sync::mpsc;

use crate::host::UiWaker;

/// Global page function receiving terminal results.
pub const RESOLVE_FN: &str = "window.__aegisResolve";
/// Global page function receiving progress events.
pub const PROGRESS_FN: &str = "window.__aegisProgress";

pub fn channel(capacity: usize, waker: Arc<dyn UiWaker>) -> (ResponseSender, ResponseReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ResponseSender { tx, waker }, ResponseReceiver { rx })
}

#[derive(Clone)]
pub struct ResponseSender {
    tx: mpsc::Sender<Outbound>,
    waker: Arc<dyn UiWaker>,
}

impl ResponseSender {
    /// Queue a message, waiting for room. Returns false once the UI side
    /// has gone away.
    pub async fn send(&self, msg: Outbound) -> bool {
        match self.tx.send(msg).await {
            Ok(()) => {
                self.waker.wake();
                true
            }
            Err(_) => {
                tracing::debug!("response channel closed, dropping message");
                false
            }
        }
    }

    /// Queue without waiting. Used where awaiting is impossible.
    pub fn try_send(&self, msg: Outbound) -> bool {
        match self.tx.try_send(msg) {
            Ok(()) => {
                self.waker.wake();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not queue response");
                false
            }
        }
    }
}

pub struct ResponseReceiver {
    rx: mpsc::Receiver<Outbound>,
}

impl ResponseReceiver {
    /// Everything queued right now, in arrival order.
    pub fn drain(&mut self) -> Vec<Outbound> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            out.push(msg);
        }
        out
    }

    pub async fn recv(&mut self) -> Option<Outbound> {
        self.rx.recv().await
    }
}

/// Page script that hands `msg` to the resolver or progress function.
pub fn to_script(msg: &Outbound) -> String {
    let function = if msg.is_terminal() {
        RESOLVE_FN
    } else {
        PROGRESS_FN
    };
    format!("{function}({});", msg.to_wire())
}
