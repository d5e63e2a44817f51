//! Navigation domain: documents, link discovery and the history engine.
//!
//! Nothing in here touches the network or the terminal.

pub mod document;
pub mod links;
pub mod navigation;

pub use document::FetchResult;
pub use links::LineTarget;
pub use navigation::{FetchRequest, HistoryEntry, NavigationState, Phase};
