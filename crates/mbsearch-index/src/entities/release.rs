//! Releases.

use mbsearch_core::{EntityKind, Result};
use mbsearch_fts::{ARTIST_CREDIT_FIELDS, Document};

use super::partial_date;
use crate::credit::add_credit_fields;
use crate::entity::{EntityDescriptor, RelationQuery, SourceQueries};
use crate::source::{NamedQuery, SourceRow};
use crate::window::WindowGroups;

const MEDIUMS: NamedQuery = NamedQuery::new(
    "release.mediums",
    "SELECT release, track_count
       FROM medium
      WHERE release BETWEEN ?1 AND ?2
      ORDER BY release, position",
);

const LABELS: NamedQuery = NamedQuery::new(
    "release.labels",
    "SELECT rl.release, l.name AS label, rl.catalog_number
       FROM release_label rl
       LEFT JOIN label l ON l.id = rl.label
      WHERE rl.release BETWEEN ?1 AND ?2
      ORDER BY rl.release, rl.id",
);

const ARTIST_CREDITS: NamedQuery = NamedQuery::new(
    "release.artist_credits",
    "SELECT r.id AS release,
            a.gid AS artistId,
            a.name AS artistName,
            a.sort_name AS artistSortName,
            acn.name AS artistCreditName,
            acn.join_phrase AS joinphrase,
            a.comment AS comment
       FROM release r
       JOIN artist_credit_name acn ON acn.artist_credit = r.artist_credit
       JOIN artist a ON a.id = acn.artist
      WHERE r.id BETWEEN ?1 AND ?2
      ORDER BY r.id, acn.position",
);

static RELATIONS: [RelationQuery; 3] = [
    RelationQuery::children(MEDIUMS, "release"),
    RelationQuery::children(LABELS, "release"),
    RelationQuery::artist_credits(ARTIST_CREDITS, "release"),
];

/// Release descriptor.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Release,
    queries: SourceQueries {
        max_id: NamedQuery::new("release.max_id", "SELECT MAX(id) FROM release"),
        row_count: NamedQuery::new(
            "release.row_count",
            "SELECT COUNT(*) FROM release WHERE id <= ?1",
        ),
        parents: NamedQuery::new(
            "release.parents",
            "SELECT r.id, r.gid, r.name, r.barcode,
                    rs.name AS status,
                    rgt.name AS type,
                    rg.gid AS rgid,
                    r.date_year, r.date_month, r.date_day
               FROM release r
               JOIN release_group rg ON rg.id = r.release_group
               LEFT JOIN release_status rs ON rs.id = r.status
               LEFT JOIN release_group_primary_type rgt ON rgt.id = rg.type
              WHERE r.id BETWEEN ?1 AND ?2
              ORDER BY r.id",
        ),
        parent_id_column: "id",
        relations: &RELATIONS,
    },
    written_fields: &[
        "reid",
        "release",
        "status",
        "type",
        "rgid",
        "barcode",
        "date",
        "mediums",
        "tracks",
        "catno",
        "label",
        "arid",
        "artist",
        "artistname",
        "creditname",
        "artistcredit",
    ],
    build,
};

fn build(id: i64, row: &SourceRow, groups: &WindowGroups) -> Result<Document> {

    let mut doc = Document::new(EntityKind::Release);
    doc.add_field("reid", row.get_str("gid")?)
        .add_field("release", row.get_str("name")?)
        .add_field_or_placeholder("status", row.get_opt_str("status")?)
        .add_field_or_placeholder("type", row.get_opt_str("type")?)
        .add_field("rgid", row.get_str("rgid")?)
        .add_non_empty_field("barcode", row.get_opt_str("barcode")?)
        .add_non_empty_field("date", partial_date(row, "date")?);

    let mediums = groups.children(MEDIUMS.name, id);
    if !mediums.is_empty() {
        let tracks = mediums
            .iter()
            .map(|medium| medium.get_i64("track_count"))
            .sum::<Result<i64>>()?;
        doc.add_numeric_field("mediums", mediums.len() as i64)
            .add_numeric_field("tracks", tracks);
    }

    for label in groups.children(LABELS.name, id) {
        doc.add_non_empty_field("catno", label.get_opt_str("catalog_number")?)
            .add_non_empty_field("label", label.get_opt_str("label")?);
    }

    add_credit_fields(&mut doc, groups.credit(id), &ARTIST_CREDIT_FIELDS);

    Ok(doc)
}
