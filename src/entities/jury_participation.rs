use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jury_participation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub jury_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub screening_id: i32,
    pub role: String,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::jury::Entity",
        from = "Column::JuryId",
        to = "super::jury::Column::Id",
        on_delete = "Cascade"
    )]
    Jury,
}

impl Related<super::jury::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jury.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
