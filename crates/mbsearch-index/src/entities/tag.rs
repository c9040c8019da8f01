//! Tags.

use mbsearch_core::{EntityKind, Result};
use mbsearch_fts::Document;

use crate::entity::{EntityDescriptor, SourceQueries};
use crate::source::{NamedQuery, SourceRow};
use crate::window::WindowGroups;

/// Tag descriptor.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Tag,
    queries: SourceQueries {
        max_id: NamedQuery::new("tag.max_id", "SELECT MAX(id) FROM tag"),
        row_count: NamedQuery::new("tag.row_count", "SELECT COUNT(*) FROM tag WHERE id <= ?1"),
        parents: NamedQuery::new(
            "tag.parents",
            "SELECT id, name FROM tag WHERE id BETWEEN ?1 AND ?2 ORDER BY id",
        ),
        parent_id_column: "id",
        relations: &[],
    },
    written_fields: &["tag", "tagid"],
    build,
};

fn build(id: i64, row: &SourceRow, _groups: &WindowGroups) -> Result<Document> {
    let mut doc = Document::new(EntityKind::Tag);
    doc.add_field("tag", row.get_str("name")?)
        .add_field("tagid", id.to_string());
    Ok(doc)
}
