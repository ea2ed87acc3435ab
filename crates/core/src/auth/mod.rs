//! Authentication and authorization primitives.
//!
//! This module provides:
//! - User roles and the named permissions they can hold
//! - The immutable role to permission table and its evaluator
//! - Password hashing with Argon2id

mod password;
mod permissions;

pub use password::{PasswordError, dummy_verify, hash_password, verify_password};
pub use permissions::{PermissionTable, role_satisfies};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User roles. Every user has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including cash box funding and reports.
    Admin,
    /// Records expenses and reads the balance.
    Employee,
}

impl UserRole {
    /// Every role, in privilege order.
    pub const ALL: [Self; 2] = [Self::Admin, Self::Employee];

    /// Returns the storage and token representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }

    /// Returns true if this role is the administrator role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role or permission tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseTagError {
    kind: &'static str,
    value: String,
}

impl ParseTagError {
    /// Creates an error for an unrecognised `value` of the given `kind`.
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl FromStr for UserRole {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            other => Err(ParseTagError::new("role", other)),
        }
    }
}

/// Named actions guarded by the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    /// Obtain a session token.
    #[serde(rename = "auth.login")]
    Login,
    /// Fund the cash box or record raw cash movements.
    #[serde(rename = "petty_cash.create")]
    PettyCashCreate,
    /// List cash box transactions.
    #[serde(rename = "petty_cash.view_list")]
    PettyCashViewList,
    /// Read the cash box balance.
    #[serde(rename = "petty_cash.view_balance")]
    PettyCashViewBalance,
    /// Record an expense.
    #[serde(rename = "expenses.create")]
    ExpenseCreate,
    /// List one's own expenses.
    #[serde(rename = "expenses.view_own")]
    ExpenseViewOwn,
    /// Read the summary reports.
    #[serde(rename = "reports.view")]
    ReportsView,
}

impl Permission {
    /// Every permission known to the system.
    pub const ALL: [Self; 7] = [
        Self::Login,
        Self::PettyCashCreate,
        Self::PettyCashViewList,
        Self::PettyCashViewBalance,
        Self::ExpenseCreate,
        Self::ExpenseViewOwn,
        Self::ReportsView,
    ];

    /// Returns the wire tag of this permission.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "auth.login",
            Self::PettyCashCreate => "petty_cash.create",
            Self::PettyCashViewList => "petty_cash.view_list",
            Self::PettyCashViewBalance => "petty_cash.view_balance",
            Self::ExpenseCreate => "expenses.create",
            Self::ExpenseViewOwn => "expenses.view_own",
            Self::ReportsView => "reports.view",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseTagError::new("permission", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("owner".parse::<UserRole>().is_err());
        assert!("Admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_matches_as_str() {
        let json = serde_json::to_string(&UserRole::Employee).unwrap();
        assert_eq!(json, "\"employee\"");
    }

    #[test]
    fn test_permission_tags() {
        assert_eq!(Permission::ExpenseCreate.as_str(), "expenses.create");
        assert_eq!(
            "petty_cash.view_balance".parse::<Permission>().unwrap(),
            Permission::PettyCashViewBalance
        );
        let json = serde_json::to_string(&Permission::ReportsView).unwrap();
        assert_eq!(json, "\"reports.view\"");
    }

    #[test]
    fn test_unknown_permission_is_rejected() {
        let err = "expenses.delete".parse::<Permission>().unwrap_err();
        assert_eq!(err.to_string(), "unknown permission: expenses.delete");
    }
}
