use crate::advisory::PackageState;
use crate::inventory::{Packages, release_major};
use crate::status::{PackageStatus, PackageStatuses};

const CPE_PREFIX: &str = "cpe:/o:redhat:enterprise_linux:";

/// Fix-state labels meaning the package remains vulnerable on this host.
/// Everything else ("Fixed", "Not affected", ...) carries no further
/// information for this pass.
fn still_unfixed(fix_state: &str) -> bool {
    fix_state == "Will not fix" || fix_state == "Fix deferred"
}

/// Walk an advisory's package-state entries and upsert the ones that are
/// still unfixed for an installed package on this release.
///
/// The walk returns at the first entry that fails any check, so a single
/// mismatching entry truncates evaluation of everything after it. This
/// truncation is long-standing observed behavior that downstream consumers
/// depend on; `first_mismatch_truncates_remaining_entries` pins it. Do not
/// change it to a per-entry skip.
pub fn unresolved_statuses(
    current: &PackageStatuses,
    states: &[PackageState],
    installed: &Packages,
    release: &str,
) -> PackageStatuses {
    let mut statuses = current.clone();
    let expected_cpe = format!("{CPE_PREFIX}{}", release_major(release));

    for state in states {
        if state.cpe != expected_cpe {
            return statuses;
        }
        if !still_unfixed(&state.fix_state) {
            return statuses;
        }
        if !installed.contains_key(&state.package_name) {
            return statuses;
        }

        statuses.store(PackageStatus {
            name: state.package_name.clone(),
            fix_state: state.fix_state.clone(),
            not_fixed_yet: true,
        });
    }
    statuses
}
