//! Release groups.

use mbsearch_core::{EntityKind, Result};
use mbsearch_fts::{ARTIST_CREDIT_FIELDS, Document};

use crate::credit::add_credit_fields;
use crate::entity::{EntityDescriptor, RelationQuery, SourceQueries};
use crate::source::{NamedQuery, SourceRow};
use crate::window::WindowGroups;

const RELEASES: NamedQuery = NamedQuery::new(
    "releasegroup.releases",
    "SELECT release_group, gid, name
       FROM release
      WHERE release_group BETWEEN ?1 AND ?2
      ORDER BY release_group, id",
);

const ARTIST_CREDITS: NamedQuery = NamedQuery::new(
    "releasegroup.artist_credits",
    "SELECT rg.id AS release_group,
            a.gid AS artistId,
            a.name AS artistName,
            a.sort_name AS artistSortName,
            acn.name AS artistCreditName,
            acn.join_phrase AS joinphrase,
            a.comment AS comment
       FROM release_group rg
       JOIN artist_credit_name acn ON acn.artist_credit = rg.artist_credit
       JOIN artist a ON a.id = acn.artist
      WHERE rg.id BETWEEN ?1 AND ?2
      ORDER BY rg.id, acn.position",
);

static RELATIONS: [RelationQuery; 2] = [
    RelationQuery::children(RELEASES, "release_group"),
    RelationQuery::artist_credits(ARTIST_CREDITS, "release_group"),
];

/// Release group descriptor.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::ReleaseGroup,
    queries: SourceQueries {
        max_id: NamedQuery::new("releasegroup.max_id", "SELECT MAX(id) FROM release_group"),
        row_count: NamedQuery::new(
            "releasegroup.row_count",
            "SELECT COUNT(*) FROM release_group WHERE id <= ?1",
        ),
        parents: NamedQuery::new(
            "releasegroup.parents",
            "SELECT rg.id, rg.gid, rg.name, rgt.name AS type
               FROM release_group rg
               LEFT JOIN release_group_primary_type rgt ON rgt.id = rg.type
              WHERE rg.id BETWEEN ?1 AND ?2
              ORDER BY rg.id",
        ),
        parent_id_column: "id",
        relations: &RELATIONS,
    },
    written_fields: &[
        "rgid",
        "releasegroup",
        "type",
        "release",
        "reid",
        "arid",
        "artist",
        "artistname",
        "creditname",
        "artistcredit",
    ],
    build,
};

fn build(id: i64, row: &SourceRow, groups: &WindowGroups) -> Result<Document> {

    let mut doc = Document::new(EntityKind::ReleaseGroup);
    doc.add_field("rgid", row.get_str("gid")?)
        .add_field("releasegroup", row.get_str("name")?)
        .add_field_or_placeholder("type", row.get_opt_str("type")?);

    for release in groups.children(RELEASES.name, id) {
        doc.add_field("release", release.get_str("name")?)
            .add_field("reid", release.get_str("gid")?);
    }

    add_credit_fields(&mut doc, groups.credit(id), &ARTIST_CREDIT_FIELDS);

    Ok(doc)
}
