//! `SeaORM` Entity for the journal_entries table.
//!
//! Posted and void rows are immutable except for the posted-to-void status
//! transition; a database trigger enforces this below the application.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EntryStatus, SourceDocumentType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub entry_date: Date,
    pub description: String,
    pub reference: Option<String>,
    pub status: EntryStatus,
    pub source_document_type: Option<SourceDocumentType>,
    pub source_document_id: Option<Uuid>,
    pub reverses_entry_id: Option<Uuid>,
    pub created_by: Uuid,
    pub posted_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    JournalLines,
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
