//! 图书实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub author: String,
    /// 去掉连字符后的 ISBN
    #[sea_orm(unique)]
    pub isbn: String,
    pub category: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book_loans::Entity")]
    Loans,
}

impl Related<super::book_loans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_book(self) -> crate::models::library::Book {
        use crate::utils::dates::from_timestamp;

        crate::models::library::Book {
            id: self.id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            category: self.category,
            total_copies: self.total_copies,
            available_copies: self.available_copies,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
