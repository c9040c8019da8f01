//! Recording fields.
//!
//! A recording document carries the recording itself plus one entry per
//! track it appears on: the track name is searchable through `recording`,
//! and the release, medium and position of each track are multi-valued.

use mbsearch_core::EntityKind;

use super::{FieldDefinition, FieldSet, credit_field_definitions};
use crate::analyzer::Analyzer;

pub(super) fn field_set() -> FieldSet {
    let mut fields = vec![
        FieldDefinition::keyword("rid").stored(),
        FieldDefinition::text("recording", Analyzer::TitleWithPositionGap),
        FieldDefinition::stored_only("recording_output"),
        FieldDefinition::stored_only("track_output"),
        FieldDefinition::integer("dur").stored(),
        FieldDefinition::integer("qdur"),
        FieldDefinition::keyword("isrc").stored(),
        FieldDefinition::integer("tracks").stored(),
        FieldDefinition::integer("tnum").stored(),
        FieldDefinition::keyword("type").stored(),
        FieldDefinition::keyword("status").stored(),
        FieldDefinition::keyword("reid").stored(),
        FieldDefinition::text("release", Analyzer::TitleWithPositionGap).stored(),
        FieldDefinition::stored_only("position"),
    ];
    fields.extend(credit_field_definitions());

    FieldSet::new(EntityKind::Recording, fields, vec!["recording"])
}
