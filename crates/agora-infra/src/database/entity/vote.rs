//! Vote entity for SeaORM. `(voter_id, post_id)` carries a unique index,
//! created by the migration.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub voter_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::VoterId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Voter,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for agora_core::domain::Vote {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            voter_id: model.voter_id,
            post_id: model.post_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<agora_core::domain::Vote> for ActiveModel {
    fn from(vote: agora_core::domain::Vote) -> Self {
        Self {
            id: Set(vote.id),
            voter_id: Set(vote.voter_id),
            post_id: Set(vote.post_id),
            created_at: Set(vote.created_at.into()),
        }
    }
}
