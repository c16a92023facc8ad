//! Attribute Propagator
//!
//! The host exposes no reliable way to ask whether a node supports an
//! attribute other than attempting the write. The propagator therefore
//! writes first and treats exactly one failure class,
//! [`HostError::AttributeUnsupported`], as "this is a container, recurse
//! into its children". Every other failure propagates as fatal: an
//! unrecognized error is never reinterpreted as a recursion cue.

use crate::error::{HostError, Result};
use crate::host::{Host, NodeId};
use tracing::debug;

/// Set `attribute = value` on `node`, recursing into children wherever a
/// node reports the attribute as unsupported
///
/// Mutates leaf attribute values in place; never creates or deletes nodes.
pub fn propagate<H: Host>(
    host: &mut H,
    node: NodeId,
    attribute: &str,
    value: bool,
) -> Result<()> {
    match host.set_attribute(node, attribute, value) {
        Ok(()) => Ok(()),
        Err(HostError::AttributeUnsupported { .. }) => {
            debug!(attribute, "node rejected attribute, descending into children");
            for child in host.list_children(node)? {
                propagate(host, child, attribute, value)?;
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
