//! Layout engine
//!
//! Parsed definitions come in from the compiler, the registry resolves
//! `extends` chains and validates completeness, and the resolved layouts
//! answer (position, modifier state) lookups at keystroke time.

mod definition;
mod layout;
mod registry;

pub use definition::{KeyDefinition, LayoutDefinition, RowDefinition};
pub use layout::{Key, Layout};
pub use registry::LayoutRegistry;
