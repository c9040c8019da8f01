//! Release group fields.

use mbsearch_core::EntityKind;

use super::{FieldDefinition, FieldSet, credit_field_definitions};
use crate::analyzer::Analyzer;

pub(super) fn field_set() -> FieldSet {
    let mut fields = vec![
        FieldDefinition::keyword("rgid").stored(),
        FieldDefinition::text("releasegroup", Analyzer::Title).stored(),
        FieldDefinition::keyword("type").stored(),
        FieldDefinition::text("release", Analyzer::TitleWithPositionGap).stored(),
        FieldDefinition::keyword("reid").stored(),
    ];
    fields.extend(credit_field_definitions());

    FieldSet::new(EntityKind::ReleaseGroup, fields, vec!["releasegroup"])
}
