//! 收费标准实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_structures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub class_id: Option<i64>,
    pub academic_year: String,
    pub total_amount: f64,
    /// JSON: `[{"name": "...", "amount": 0.0}]`
    #[sea_orm(column_type = "Text")]
    pub components: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_structure(self) -> crate::models::fees::entities::FeeStructure {
        use crate::models::fees::entities::FeeStructure;
        use crate::utils::dates::from_timestamp;

        FeeStructure {
            id: self.id,
            name: self.name,
            class_id: self.class_id,
            academic_year: self.academic_year,
            total_amount: self.total_amount,
            components: serde_json::from_str(&self.components).unwrap_or_default(),
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
