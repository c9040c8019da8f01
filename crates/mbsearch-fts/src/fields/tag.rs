//! Tag fields.

use mbsearch_core::EntityKind;

use super::{FieldDefinition, FieldSet};

pub(super) fn field_set() -> FieldSet {
    FieldSet::new(
        EntityKind::Tag,
        vec![
            FieldDefinition::default_text("tag").stored(),
            FieldDefinition::stored_only("tagid"),
        ],
        vec!["tag"],
    )
}
