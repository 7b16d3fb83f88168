//! Slot reconciliation for dynamic containers.
//!
//! Dictionary and list style blocks carry a numbered run of value
//! sockets (`PAIR0..`, `ADD0..`). Changing the count reconciles the
//! existing run against the target instead of rebuilding it: surviving
//! slots keep their occupants, removed slots detach theirs, and new
//! slots start empty.

use blocked_blocks::{Socket, SocketMode, Workspace};

use crate::mutations::MutationError;

/// Upper bound on container slots. Keeps a malformed UI message from
/// allocating an absurd socket run.
pub const MAX_ITEMS: usize = 1024;

/// Set a dynamic container's slot count to `items`.
///
/// Slots are removed from the high end first, so slots `0..items`
/// always survive a shrink with their children attached. Detached
/// occupants become top-level blocks. Growing appends empty slots;
/// re-growing after a shrink does not resurrect old children.
pub fn set_item_count(
    workspace: &mut Workspace,
    block_id: &str,
    items: i64,
) -> Result<(), MutationError> {
    if items < 0 || items as usize > MAX_ITEMS {
        tracing::warn!("Rejected item count {} for block {}", items, block_id);
        return Err(MutationError::InvalidArity(items));
    }
    let target = items as usize;

    let (prefix, accepts, current) = {
        let block = workspace.block(block_id)?;
        match &block.dynamic {
            Some(d) => (d.prefix.clone(), d.accepts.clone(), d.item_count),
            None => return Err(MutationError::FixedShape(block_id.to_string())),
        }
    };

    // Shrink from the high end; occupants are detached, not destroyed.
    for i in (target..current).rev() {
        let name = format!("{}{}", prefix, i);
        workspace.disconnect(block_id, &name)?;
        workspace.block_mut(block_id)?.sockets.retain(|s| s.name != name);
    }

    // Grow with fresh empty slots.
    for i in current..target {
        let slot = Socket {
            name: format!("{}{}", prefix, i),
            mode: SocketMode::Value,
            accepts: accepts.clone(),
            child: None,
        };
        workspace.block_mut(block_id)?.sockets.push(slot);
    }

    if let Some(d) = workspace.block_mut(block_id)?.dynamic.as_mut() {
        d.item_count = target;
    }
    Ok(())
}
