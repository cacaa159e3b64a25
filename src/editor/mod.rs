//! Editor view of a plugin control base.
//!
//! Each input control port becomes a control widget, grouped per processor
//! and laid out in a grid under an optional row of action buttons.

pub mod grid;
pub mod host;
pub mod linked;
pub mod proc_view;
pub mod view;
pub mod visitor;
pub mod widget;

pub use host::{HostHandle, MainWindow};
pub use linked::LinkedModelGroupsView;
pub use view::{ButtonKind, GridItem, Lv2View, ViewOptions};
