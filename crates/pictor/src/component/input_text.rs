//! Text input with change notification.
//!
//! [`InputText`] wraps the text control inside an `input-text` shell element.
//! Setting the text programmatically behaves like a user edit followed by a
//! `change` event: the control value is updated and every change handler
//! runs once, whether or not the value differs from before.
//!
//! # Example
//!
//! ```
//! use pictor::component::InputText;
//!
//! let input = InputText::new();
//! input.on_change(|text| println!("path is now {text}"));
//! input.set_text("./photos");
//! assert_eq!(input.text(), "./photos");
//! ```

use parking_lot::Mutex;

use pictor_core::logging::targets;
use pictor_core::{ConnectionId, Property, Signal};

use crate::element::{CustomElement, InputTextShell};

/// A single-line text input.
pub struct InputText {
    /// The decorated shell around the control.
    shell: Mutex<CustomElement<InputTextShell>>,

    /// The control's current value.
    value: Property<String>,

    /// Signal emitted on every change notification.
    changed: Signal<String>,
}

impl InputText {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::with_shell(CustomElement::new())
    }

    /// Create an empty input inside an existing shell element.
    pub fn with_shell(shell: CustomElement<InputTextShell>) -> Self {
        Self {
            shell: Mutex::new(shell),
            value: Property::default(),
            changed: Signal::new(),
        }
    }

    /// The control's current value.
    pub fn text(&self) -> String {
        self.value.get()
    }

    /// Set the control's value and dispatch one change notification.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let changed = self.value.set(text.clone());
        tracing::trace!(target: targets::ELEMENT, changed, "input value set");
        self.changed.emit(text);
    }

    /// Subscribe to change notifications. The handler receives the new value.
    pub fn on_change<F>(&self, handler: F) -> ConnectionId
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.changed.connect(handler)
    }

    /// Remove a change handler.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }

    /// The symbol shown before the control.
    pub fn prefix_symbol(&self) -> String {
        self.shell.lock().presentation().prefix_symbol.clone()
    }

    /// Set the `prefix-symbol` attribute of the shell.
    pub fn set_prefix_symbol(&self, symbol: &str) {
        self.shell.lock().set_attribute("prefix-symbol", symbol);
    }
}

impl Default for InputText {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(InputText: Send, Sync);
