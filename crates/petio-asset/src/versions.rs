//! # Version History Loading
//!
//! Pages an owner's signature versions out of the profile contract into a
//! [`VersionHistory`], preserving the at-most-one-active invariant the
//! contract maintains on its side.

use petio_client::{ContractError, ProfileContract};
use petio_core::{OwnerAddress, VersionHistory};

/// Page size for version listing calls.
const VERSION_PAGE: u64 = 50;

/// Load the owner's full version history, oldest first.
pub async fn load_version_history(
    profile: &dyn ProfileContract,
    owner: &OwnerAddress,
) -> Result<VersionHistory, ContractError> {
    let mut history = VersionHistory::new();
    let mut offset = 0u64;
    loop {
        let page = profile.get_versions(owner, offset, VERSION_PAGE).await?;
        let fetched = page.len() as u64;
        for pointer in page {
            history.push(pointer);
        }
        if fetched < VERSION_PAGE {
            break;
        }
        offset += fetched;
    }
    Ok(history)
}
