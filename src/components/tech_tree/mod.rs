mod component;
mod connectors;
mod node;
mod state;

pub use component::{Legend, TechTree};
pub use state::TreeState;
