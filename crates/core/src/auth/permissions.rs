//! Role to permission table and the authorization evaluator.

use std::collections::{HashMap, HashSet};

use super::{Permission, UserRole};
use crate::petty_cash::TransactionType;

/// Immutable mapping from role to granted permissions.
///
/// Built once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    grants: HashMap<UserRole, HashSet<Permission>>,
}

impl PermissionTable {
    /// Builds the standard table.
    ///
    /// Admins hold every permission. Employees may log in, read the balance,
    /// record expenses, and list their own expenses.
    #[must_use]
    pub fn standard() -> Self {
        let mut grants = HashMap::new();
        grants.insert(UserRole::Admin, Permission::ALL.into_iter().collect());
        grants.insert(
            UserRole::Employee,
            [
                Permission::Login,
                Permission::PettyCashViewBalance,
                Permission::ExpenseCreate,
                Permission::ExpenseViewOwn,
            ]
            .into_iter()
            .collect(),
        );
        Self { grants }
    }

    /// Returns true if `role` holds `permission`.
    #[must_use]
    pub fn authorize(&self, role: UserRole, permission: Permission) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|granted| granted.contains(&permission))
    }

    /// Returns the permissions held by `role`, sorted by tag order.
    #[must_use]
    pub fn permissions_for(&self, role: UserRole) -> Vec<Permission> {
        let mut perms: Vec<Permission> = self
            .grants
            .get(&role)
            .map(|granted| granted.iter().copied().collect())
            .unwrap_or_default();
        perms.sort();
        perms
    }

    /// Decides whether `role` may record a petty cash transaction of `kind`.
    ///
    /// Credits require `petty_cash.create`. A debit is also allowed to anyone
    /// holding `expenses.create`, since recording an expense withdraws cash.
    #[must_use]
    pub fn can_create_transaction(&self, role: UserRole, kind: TransactionType) -> bool {
        if self.authorize(role, Permission::PettyCashCreate) {
            return true;
        }
        kind == TransactionType::Debit && self.authorize(role, Permission::ExpenseCreate)
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Hierarchical role check: admin satisfies every requirement.
#[must_use]
pub const fn role_satisfies(actual: UserRole, required: UserRole) -> bool {
    actual.is_admin() || !required.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UserRole::Admin, Permission::Login, true)]
    #[case(UserRole::Admin, Permission::PettyCashCreate, true)]
    #[case(UserRole::Admin, Permission::PettyCashViewList, true)]
    #[case(UserRole::Admin, Permission::PettyCashViewBalance, true)]
    #[case(UserRole::Admin, Permission::ExpenseCreate, true)]
    #[case(UserRole::Admin, Permission::ExpenseViewOwn, true)]
    #[case(UserRole::Admin, Permission::ReportsView, true)]
    #[case(UserRole::Employee, Permission::Login, true)]
    #[case(UserRole::Employee, Permission::PettyCashCreate, false)]
    #[case(UserRole::Employee, Permission::PettyCashViewList, false)]
    #[case(UserRole::Employee, Permission::PettyCashViewBalance, true)]
    #[case(UserRole::Employee, Permission::ExpenseCreate, true)]
    #[case(UserRole::Employee, Permission::ExpenseViewOwn, true)]
    #[case(UserRole::Employee, Permission::ReportsView, false)]
    fn test_standard_table(
        #[case] role: UserRole,
        #[case] permission: Permission,
        #[case] expected: bool,
    ) {
        let table = PermissionTable::standard();
        assert_eq!(table.authorize(role, permission), expected);
    }

    #[rstest]
    #[case(UserRole::Admin, TransactionType::Credit, true)]
    #[case(UserRole::Admin, TransactionType::Debit, true)]
    #[case(UserRole::Employee, TransactionType::Credit, false)]
    #[case(UserRole::Employee, TransactionType::Debit, true)]
    fn test_can_create_transaction(
        #[case] role: UserRole,
        #[case] kind: TransactionType,
        #[case] expected: bool,
    ) {
        let table = PermissionTable::standard();
        assert_eq!(table.can_create_transaction(role, kind), expected);
    }

    #[test]
    fn test_permissions_for_employee() {
        let table = PermissionTable::standard();
        assert_eq!(
            table.permissions_for(UserRole::Employee),
            vec![
                Permission::Login,
                Permission::PettyCashViewBalance,
                Permission::ExpenseCreate,
                Permission::ExpenseViewOwn,
            ]
        );
        assert_eq!(table.permissions_for(UserRole::Admin).len(), Permission::ALL.len());
    }

    #[test]
    fn test_admin_superset_of_employee() {
        let table = PermissionTable::standard();
        for perm in table.permissions_for(UserRole::Employee) {
            assert!(table.authorize(UserRole::Admin, perm));
        }
    }

    #[rstest]
    #[case(UserRole::Admin, UserRole::Admin, true)]
    #[case(UserRole::Admin, UserRole::Employee, true)]
    #[case(UserRole::Employee, UserRole::Employee, true)]
    #[case(UserRole::Employee, UserRole::Admin, false)]
    fn test_role_satisfies(
        #[case] actual: UserRole,
        #[case] required: UserRole,
        #[case] expected: bool,
    ) {
        assert_eq!(role_satisfies(actual, required), expected);
    }
}
