pub mod collapse;
pub mod config;
pub mod diagnostics;
pub mod edges;
pub mod errors;
pub mod export;
pub mod hierarchy;
pub mod layout;
pub mod loader;
pub mod model;
pub mod request;
pub mod session;
pub mod visibility;

// Terminal host
pub mod actions;
pub mod app;
pub mod event;
pub mod ui;

// Re-export commonly used types
pub use app::{AppMode, AppState};
pub use collapse::CollapseState;
pub use config::AppConfig;
pub use diagnostics::Diagnostic;
pub use edges::Edge;
pub use errors::{AppError, AppResult};
pub use hierarchy::HierarchyIndex;
pub use layout::{LayoutNode, LayoutSettings, RankBasis};
pub use model::{MindMapNode, NodeId, NodeStore};
pub use session::{recompute, RenderFrame, Session, ViewState};
