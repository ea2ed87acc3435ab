//! `SeaORM` Entity for expenses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub category: String,
    pub user_id: Uuid,
    pub petty_cash_transaction_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::petty_cash_transactions::Entity",
        from = "Column::PettyCashTransactionId",
        to = "super::petty_cash_transactions::Column::Id"
    )]
    PettyCashTransactions,
}

impl Related<super::petty_cash_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PettyCashTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
