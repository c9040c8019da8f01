//! Artist fields.

use mbsearch_core::EntityKind;

use super::{FieldDefinition, FieldSet};
use crate::analyzer::Analyzer;

pub(super) fn field_set() -> FieldSet {
    FieldSet::new(
        EntityKind::Artist,
        vec![
            FieldDefinition::keyword("arid").stored(),
            FieldDefinition::text("artist", Analyzer::Title).stored(),
            FieldDefinition::default_text("sortname").stored(),
            FieldDefinition::text("alias", Analyzer::StandardWithPositionGap),
            FieldDefinition::keyword("type").stored(),
            FieldDefinition::keyword("gender").stored(),
            FieldDefinition::default_text("comment").stored(),
            FieldDefinition::keyword("begin").stored(),
            FieldDefinition::keyword("end").stored(),
        ],
        vec!["artist", "alias", "sortname"],
    )
}
