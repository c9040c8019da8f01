//! Release fields.

use mbsearch_core::EntityKind;

use super::{FieldDefinition, FieldSet, credit_field_definitions};
use crate::analyzer::Analyzer;

pub(super) fn field_set() -> FieldSet {
    let mut fields = vec![
        FieldDefinition::keyword("reid").stored(),
        FieldDefinition::text("release", Analyzer::Title).stored(),
        FieldDefinition::keyword("status").stored(),
        FieldDefinition::keyword("type").stored(),
        FieldDefinition::keyword("rgid").stored(),
        FieldDefinition::keyword("barcode").stored(),
        FieldDefinition::keyword("date").stored(),
        FieldDefinition::integer("mediums").stored(),
        FieldDefinition::integer("tracks").stored(),
        FieldDefinition::keyword("catno").stored(),
        FieldDefinition::text("label", Analyzer::StandardWithPositionGap).stored(),
    ];
    fields.extend(credit_field_definitions());

    FieldSet::new(EntityKind::Release, fields, vec!["release"])
}
