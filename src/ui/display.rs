//! Display binding - the sink the engine notifies of selection changes

use std::fmt;

/// Kind of selection change reported to the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionEvent {
    Hover,
    ClickAdd,
    ClickRemove,
}

impl SelectionEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionEvent::Hover => "hover",
            SelectionEvent::ClickAdd => "click-add",
            SelectionEvent::ClickRemove => "click-remove",
        }
    }
}

impl fmt::Display for SelectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cursor affordance requested from the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIntent {
    #[default]
    Default,
    /// Something under the pointer can be clicked
    Pointer,
}

/// Receives selection notifications synchronously during event handling.
/// Implementations must not panic.
pub trait DisplayBinding {
    fn notify(&mut self, id: &str, kind: SelectionEvent);

    fn set_cursor(&mut self, _intent: CursorIntent) {}
}

/// Writes every notification to the log
#[derive(Debug, Default)]
pub struct LogDisplay {
    notifications: usize,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> usize {
        self.notifications
    }
}

impl DisplayBinding for LogDisplay {
    fn notify(&mut self, id: &str, kind: SelectionEvent) {
        self.notifications += 1;
        log::info!("{}: {}", kind, id);
    }

    fn set_cursor(&mut self, intent: CursorIntent) {
        log::debug!("Cursor intent {:?}", intent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(SelectionEvent::Hover.as_str(), "hover");
        assert_eq!(SelectionEvent::ClickAdd.to_string(), "click-add");
        assert_eq!(SelectionEvent::ClickRemove.to_string(), "click-remove");
    }

    #[test]
    fn test_log_display_counts() {
        let mut display = LogDisplay::new();
        display.notify("ISS (ZARYA)", SelectionEvent::Hover);
        display.set_cursor(CursorIntent::Pointer);
        assert_eq!(display.notifications(), 1);
    }
}
