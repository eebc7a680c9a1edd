//! Role router: which role-group inboxes a principal may read and reply from.
//!
//! | Roles contain            | Reachable                         |
//! |--------------------------|-----------------------------------|
//! | ADMIN                    | RECEPTIONIST, MANAGER, ADMIN      |
//! | MANAGER and RECEPTIONIST | MANAGER, RECEPTIONIST             |
//! | MANAGER                  | MANAGER                           |
//! | RECEPTIONIST             | RECEPTIONIST                      |
//! | none of the above        | (empty: no staff inbox)           |

use std::collections::BTreeSet;

use crate::types::{Role, RoleGroup};

/// Pure mapping from a role set to reachable role groups. ADMIN dominates.
pub fn reachable_role_groups(roles: &BTreeSet<Role>) -> BTreeSet<RoleGroup> {
    if roles.contains(&Role::Admin) {
        return RoleGroup::ALL.into_iter().collect();
    }

    let mut reachable = BTreeSet::new();
    if roles.contains(&Role::Manager) {
        reachable.insert(RoleGroup::Manager);
    }
    if roles.contains(&Role::Receptionist) {
        reachable.insert(RoleGroup::Receptionist);
    }
    reachable
}
