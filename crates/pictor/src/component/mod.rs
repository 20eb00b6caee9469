//! Reusable display components.
//!
//! Components wrap a piece of the display tree and expose a small imperative
//! API over it. Changes are reported through [`Signal`](pictor_core::Signal)s.

mod container;
mod input_text;

pub use container::Container;
pub use input_text::InputText;
