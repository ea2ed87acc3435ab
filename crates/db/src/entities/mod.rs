//! `SeaORM` entity definitions.

pub mod expenses;
pub mod petty_cash_transactions;
pub mod users;

pub mod prelude {
    //! Entity re-exports.
    pub use super::expenses::Entity as Expenses;
    pub use super::petty_cash_transactions::Entity as PettyCashTransactions;
    pub use super::users::Entity as Users;
}
