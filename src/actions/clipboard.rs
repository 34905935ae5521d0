use crate::app::AppState;
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use tracing::debug;

/// Copies the active node's label to the system clipboard.
pub fn yank_node(app: &mut AppState) -> Result<()> {
    let Some(active_id) = app.active_node_id.clone() else {
        return Ok(());
    };
    let Some(node) = app.frame.node(&active_id) else {
        return Ok(());
    };

    let text = node.label.clone();
    let copied = ClipboardContext::new().and_then(|mut ctx| ctx.set_contents(text));
    match copied {
        Ok(()) => app.set_message("Node yanked"),
        Err(e) => {
            debug!(error = %e, "system clipboard unavailable");
            app.set_message("Node yanked (system clipboard unavailable)");
        }
    }
    Ok(())
}
