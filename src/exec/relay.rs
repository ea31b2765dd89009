// src/exec/relay.rs

//! Listener registry for one launched server.
//!
//! Each [`ServerProcessHandle`](crate::exec::ServerProcessHandle) owns its own
//! `OutputRelay`; there is no process-wide registry. The relay is only
//! touched by the task that owns the handle, so it needs no locking.

use std::fmt;

use serde::Serialize;

use crate::types::StreamKind;

/// One chunk of output from a launched server, tagged with its stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEvent {
    pub stream: StreamKind,
    pub data: String,
}

impl OutputEvent {
    pub fn stdout(data: impl Into<String>) -> Self {
        Self {
            stream: StreamKind::Stdout,
            data: data.into(),
        }
    }

    pub fn stderr(data: impl Into<String>) -> Self {
        Self {
            stream: StreamKind::Stderr,
            data: data.into(),
        }
    }
}

/// Token returned by [`OutputRelay::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&OutputEvent) + Send>;

struct Registration {
    id: ListenerId,
    stream: StreamKind,
    listener: Listener,
}

#[derive(Default)]
pub struct OutputRelay {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl fmt::Debug for OutputRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputRelay")
            .field("stdout_listeners", &self.listener_count(StreamKind::Stdout))
            .field("stderr_listeners", &self.listener_count(StreamKind::Stderr))
            .finish()
    }
}

impl OutputRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for chunks from `stream`.
    pub fn subscribe<F>(&mut self, stream: StreamKind, listener: F) -> ListenerId
    where
        F: FnMut(&OutputEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            stream,
            listener: Box::new(listener),
        });
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Hand `event` to every listener registered for its stream, in
    /// registration order. Returns how many listeners saw it.
    pub fn dispatch(&mut self, event: &OutputEvent) -> usize {
        let mut delivered = 0;
        for reg in self
            .registrations
            .iter_mut()
            .filter(|r| r.stream == event.stream)
        {
            (reg.listener)(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self, stream: StreamKind) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.stream == stream)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn clear(&mut self) {
        self.registrations.clear();
    }
}
