//! Deterministic parameter allocation.
//!
//! Poses are packed into fixed-capacity parameter blocks: every block is
//! one synced animator int, every pose in a block occupies one state of
//! that int. Allocation walks the document in declaration order (category
//! order, then pose order within the category), so reordering poses
//! changes their assignments and nothing else does.

use crate::error::LibraryError;
use crate::hash::library_content_hash;
use crate::library::PoseLibrary;

/// Maximum number of pose states per synchronization parameter.
///
/// Values are 1-based within a block; an 8-bit synced int keeps 0 free as
/// the idle state.
pub const MAX_ANIMATION_STATE: u32 = 255;

/// Allocator output for one pose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamAssignment {
    /// Synchronization parameter this pose belongs to.
    pub parameter: String,
    /// 1-based position within the parameter's state space.
    pub value: u32,
    /// 1-based global position across the whole document.
    pub index: u32,
}

impl ParamAssignment {
    /// The global index split into low and high bytes, for 8-bit animator
    /// parameter drivers.
    pub fn driver_bytes(&self) -> [u8; 2] {
        [(self.index & 0xff) as u8, ((self.index >> 8) & 0xff) as u8]
    }
}

/// Assigns every pose a deterministic `(parameter, value, index)` triple
/// and stores the document's content hash in `guid`.
///
/// Parameter names are `AnimPose_<hash>_<n>`, where `<hash>` is the
/// content hash and `<n>` is the global index the block starts at. The
/// hash covers only authored content, so allocation is idempotent:
/// re-running it on an unmodified document reproduces the same hash and
/// the same assignments. Ranges are never reclaimed or compacted;
/// every run starts clean from pose 1.
///
/// Returns the content hash.
pub fn update_parameters(library: &mut PoseLibrary) -> Result<String, LibraryError> {
    let hash = library_content_hash(library)?;
    library.guid = Some(hash.clone());

    // Start over capacity so the first pose opens a fresh block.
    let mut value = MAX_ANIMATION_STATE + 1;
    let mut index = 1u32;
    let mut parameter = String::new();

    for category in &mut library.categories {
        for pose in &mut category.poses {
            if value > MAX_ANIMATION_STATE {
                parameter = format!("AnimPose_{}_{}", hash, index);
                value = 1;
            }

            pose.assignment = Some(ParamAssignment {
                parameter: parameter.clone(),
                value,
                index,
            });
            value += 1;
            index += 1;
        }
    }

    Ok(hash)
}
