//! Artists.

use mbsearch_core::{EntityKind, Result};
use mbsearch_fts::Document;

use super::partial_date;
use crate::entity::{EntityDescriptor, RelationQuery, SourceQueries};
use crate::source::{NamedQuery, SourceRow};
use crate::window::WindowGroups;

const ALIASES: NamedQuery = NamedQuery::new(
    "artist.aliases",
    "SELECT artist, name
       FROM artist_alias
      WHERE artist BETWEEN ?1 AND ?2
      ORDER BY artist, id",
);

static RELATIONS: [RelationQuery; 1] = [RelationQuery::children(ALIASES, "artist")];

/// Artist descriptor.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Artist,
    queries: SourceQueries {
        max_id: NamedQuery::new("artist.max_id", "SELECT MAX(id) FROM artist"),
        row_count: NamedQuery::new("artist.row_count", "SELECT COUNT(*) FROM artist WHERE id <= ?1"),
        parents: NamedQuery::new(
            "artist.parents",
            "SELECT a.id, a.gid, a.name, a.sort_name,
                    at.name AS type,
                    g.name AS gender,
                    a.comment,
                    a.begin_date_year, a.begin_date_month, a.begin_date_day,
                    a.end_date_year, a.end_date_month, a.end_date_day
               FROM artist a
               LEFT JOIN artist_type at ON at.id = a.type
               LEFT JOIN gender g ON g.id = a.gender
              WHERE a.id BETWEEN ?1 AND ?2
              ORDER BY a.id",
        ),
        parent_id_column: "id",
        relations: &RELATIONS,
    },
    written_fields: &[
        "arid", "artist", "sortname", "alias", "type", "gender", "comment", "begin", "end",
    ],
    build,
};

fn build(id: i64, row: &SourceRow, groups: &WindowGroups) -> Result<Document> {

    let mut doc = Document::new(EntityKind::Artist);
    doc.add_field("arid", row.get_str("gid")?)
        .add_field("artist", row.get_str("name")?)
        .add_field("sortname", row.get_str("sort_name")?)
        .add_field_or_placeholder("type", row.get_opt_str("type")?)
        .add_non_empty_field("gender", row.get_opt_str("gender")?)
        .add_non_empty_field("comment", row.get_opt_str("comment")?)
        .add_non_empty_field("begin", partial_date(row, "begin_date")?)
        .add_non_empty_field("end", partial_date(row, "end_date")?);

    for alias in groups.children(ALIASES.name, id) {
        doc.add_non_empty_field("alias", alias.get_opt_str("name")?);
    }

    Ok(doc)
}
