//! Append-only JSON-lines audit trail of notifications.

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tally_types::{Notification, Timestamp};

use crate::events::Listener;
use crate::NodeError;

/// One line of the audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Position in this log, starting at 1.
    pub seq: u64,
    pub at: Timestamp,
    pub event: Notification,
}

/// Writes each notification as one JSON line and flushes it.
pub struct AuditLog<W: Write + Send> {
    out: Mutex<W>,
    seq: AtomicU64,
}

impl AuditLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "audit log opened");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send + 'static> AuditLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            seq: AtomicU64::new(0),
        }
    }

    pub fn record(&self, at: Timestamp, event: &Notification) -> Result<u64, NodeError> {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let entry = AuditEntry {
            seq,
            at,
            event: event.clone(),
        };
        serde_json::to_writer(&mut *out, &entry)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(seq)
    }

    /// Number of entries written so far.
    pub fn written(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    /// An [`EventBus`](crate::EventBus) listener. Write failures are logged,
    /// never propagated to the command that produced the event.
    pub fn listener(self: Arc<Self>) -> Listener {
        Box::new(move |at, event| {
            if let Err(e) = self.record(at, event) {
                tracing::error!(error = %e, kind = event.kind(), "audit write failed");
            }
        })
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_types::{Identity, WorkflowStatus};

    #[test]
    fn writes_one_numbered_line_per_event() {
        let log = AuditLog::new(Vec::new());
        log.record(
            Timestamp::new(10),
            &Notification::WorkflowStatusChanged {
                previous: WorkflowStatus::RegisteringVoters,
                current: WorkflowStatus::ProposalsRegistrationStarted,
            },
        )
        .unwrap();
        log.record(
            Timestamp::new(11),
            &Notification::ParticipantRegistered {
                identity: Identity::new([4u8; 32]),
            },
        )
        .unwrap();
        assert_eq!(log.written(), 2);

        let text = String::from_utf8(log.into_inner()).unwrap();
        let entries: Vec<AuditEntry> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].seq, 1);
        assert_eq!(entries[1].seq, 2);
        assert_eq!(entries[1].at, Timestamp::new(11));
        assert_eq!(entries[1].event.kind(), "participant_registered");
    }

    #[test]
    fn open_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let event = Notification::ParticipantUpdated {
            identity: Identity::new([5u8; 32]),
        };

        AuditLog::open(&path).unwrap().record(Timestamp::new(1), &event).unwrap();
        AuditLog::open(&path).unwrap().record(Timestamp::new(2), &event).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
