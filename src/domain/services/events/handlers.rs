//--------------------------------------------------------------------------------------------------
// STRUCTS & TRAITS
//--------------------------------------------------------------------------------------------------
// | Name                    | Description                                       | Key Methods       |
// |-------------------------|---------------------------------------------------|------------------|
// | EventHandler            | Trait for replaying recorded events              | handle_event      |
// | EventLogger             | Bounded in-memory history, traced as it goes     | history           |
// | PersistenceEventHandler | Writes events to a JSON lines file               | write_event       |
// | replay                  | Feeds a slice of events to a handler             |                   |
//--------------------------------------------------------------------------------------------------

use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::event_types::{EventKind, EventResult, MatchingEvent};

/// Event handler trait for consumers of the matching trace
pub trait EventHandler {
    /// Returns the kinds of events this handler processes
    fn event_kinds(&self) -> Vec<EventKind>;

    /// Processes an event
    fn handle_event(&mut self, event: &MatchingEvent) -> EventResult<()>;
}

/// Feeds every event of `events` that the handler subscribes to, in order.
///
/// Stops at the first handler error.
pub fn replay<H: EventHandler + ?Sized>(events: &[MatchingEvent], handler: &mut H) -> EventResult<usize> {
    let kinds = handler.event_kinds();
    let mut handled = 0;

    for event in events.iter().filter(|event| kinds.contains(&event.kind())) {
        handler.handle_event(event)?;
        handled += 1;
    }

    debug!("Replayed {} of {} events", handled, events.len());
    Ok(handled)
}

/// A simple in-memory event logger for debugging
#[derive(Debug)]
pub struct EventLogger {
    /// Maximum number of events to keep in history
    max_history: usize,
    /// Event history
    history: Vec<MatchingEvent>,
}

impl EventLogger {
    /// Creates a new event logger
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            history: Vec::with_capacity(max_history),
        }
    }

    /// Returns the event history
    pub fn history(&self) -> &[MatchingEvent] {
        &self.history
    }
}

impl EventHandler for EventLogger {
    fn event_kinds(&self) -> Vec<EventKind> {
        vec![
            EventKind::Prepare,
            EventKind::Engage,
            EventKind::Break,
            EventKind::Reject,
            EventKind::Done,
            EventKind::Exhausted,
        ]
    }

    fn handle_event(&mut self, event: &MatchingEvent) -> EventResult<()> {
        info!("{}", event);

        if self.max_history == 0 {
            return Ok(());
        }

        // Remove oldest event if at capacity
        if self.history.len() >= self.max_history {
            self.history.remove(0);
        }

        self.history.push(event.clone());

        Ok(())
    }
}

/// A persistence-oriented event handler that writes events to a JSON lines file
#[derive(Debug)]
pub struct PersistenceEventHandler {
    /// Directory to store trace files
    output_dir: PathBuf,
    /// File handle and path for current write operations
    current_file: Option<(File, PathBuf)>,
    /// Number of events written to the current file
    event_count: usize,
}

impl PersistenceEventHandler {
    /// Creates a new persistence handler
    pub fn new<P: AsRef<Path>>(output_dir: P) -> std::io::Result<Self> {
        let path = output_dir.as_ref().to_path_buf();

        // Ensure directory exists
        if !path.exists() {
            std::fs::create_dir_all(&path)?;
        }

        Ok(Self {
            output_dir: path,
            current_file: None,
            event_count: 0,
        })
    }

    /// Path of the file currently being written, once the first event arrived
    pub fn current_path(&self) -> Option<&Path> {
        self.current_file.as_ref().map(|(_, path)| path.as_path())
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    fn open_new_file(&self) -> std::io::Result<(File, PathBuf)> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let path = self.output_dir.join(format!("trace_{}.jsonl", timestamp));

        debug!("Opening new trace file: {:?}", path);

        let file = File::create(&path)?;
        Ok((file, path))
    }

    /// Writes an event to the current file
    fn write_event(&mut self, event: &MatchingEvent) -> EventResult<()> {
        if self.current_file.is_none() {
            self.current_file = Some(self.open_new_file()?);
            self.event_count = 0;
        }

        let json = serde_json::to_string(event)?;

        if let Some((file, _)) = self.current_file.as_mut() {
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
        }

        self.event_count += 1;

        Ok(())
    }
}

impl EventHandler for PersistenceEventHandler {
    fn event_kinds(&self) -> Vec<EventKind> {
        vec![
            EventKind::Prepare,
            EventKind::Engage,
            EventKind::Break,
            EventKind::Reject,
            EventKind::Done,
            EventKind::Exhausted,
        ]
    }

    fn handle_event(&mut self, event: &MatchingEvent) -> EventResult<()> {
        self.write_event(event).inspect_err(|e| {
            error!("Failed to persist event: {}", e);
        })
    }
}
