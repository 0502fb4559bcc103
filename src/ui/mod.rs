//! UI layout and hit-testing

mod modal;
mod scrollbar;
mod text_input;
mod toolbar;
mod tree;
mod types;

pub use modal::{AddTabLayout, JsonModalLayout};
pub use scrollbar::{ScrollbarAction, ScrollbarWidget};
pub use text_input::TextInput;
pub use toolbar::{Button, ButtonRow};
pub use tree::{CollapseState, TreeRow, TreeView, build_rows};
pub use types::{ButtonId, Rect, TreeHit};
