//! UI Components
//!
//! Leptos components for the objective page.

pub mod chart;
pub mod objective_list;
pub mod toast;
pub mod toolbar;

pub use chart::Charts;
pub use objective_list::ObjectiveList;
pub use toast::Toast;
pub use toolbar::Toolbar;
