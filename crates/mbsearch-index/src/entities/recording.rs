//! Recordings.
//!
//! Besides its own columns, a recording document carries its ISRCs, its
//! artist credit, and one entry per track it appears on (track name, track
//! number, medium position, and the release the medium belongs to).

use mbsearch_core::{EntityKind, Result};
use mbsearch_fts::{ARTIST_CREDIT_FIELDS, Document};

use super::quantize_duration;
use crate::credit::add_credit_fields;
use crate::entity::{EntityDescriptor, RelationQuery, SourceQueries};
use crate::source::{NamedQuery, SourceRow};
use crate::window::WindowGroups;

const ISRCS: NamedQuery = NamedQuery::new(
    "recording.isrcs",
    "SELECT recording, isrc
       FROM isrc
      WHERE recording BETWEEN ?1 AND ?2
      ORDER BY recording, id",
);

const TRACKS: NamedQuery = NamedQuery::new(
    "recording.tracks",
    "SELECT t.recording,
            t.name AS track_name,
            t.position AS track_position,
            m.track_count,
            m.position AS medium_position,
            r.gid AS release_gid,
            r.name AS release_name,
            rs.name AS release_status,
            rgt.name AS release_type
       FROM track t
       JOIN medium m ON m.id = t.medium
       JOIN release r ON r.id = m.release
       JOIN release_group rg ON rg.id = r.release_group
       LEFT JOIN release_status rs ON rs.id = r.status
       LEFT JOIN release_group_primary_type rgt ON rgt.id = rg.type
      WHERE t.recording BETWEEN ?1 AND ?2
      ORDER BY t.recording, r.id, m.position, t.position",
);

const ARTIST_CREDITS: NamedQuery = NamedQuery::new(
    "recording.artist_credits",
    "SELECT r.id AS recording,
            a.gid AS artistId,
            a.name AS artistName,
            a.sort_name AS artistSortName,
            acn.name AS artistCreditName,
            acn.join_phrase AS joinphrase,
            a.comment AS comment
       FROM recording r
       JOIN artist_credit_name acn ON acn.artist_credit = r.artist_credit
       JOIN artist a ON a.id = acn.artist
      WHERE r.id BETWEEN ?1 AND ?2
      ORDER BY r.id, acn.position",
);

static RELATIONS: [RelationQuery; 3] = [
    RelationQuery::children(ISRCS, "recording"),
    RelationQuery::children(TRACKS, "recording"),
    RelationQuery::artist_credits(ARTIST_CREDITS, "recording"),
];

/// Recording descriptor.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Recording,
    queries: SourceQueries {
        max_id: NamedQuery::new("recording.max_id", "SELECT MAX(id) FROM recording"),
        row_count: NamedQuery::new(
            "recording.row_count",
            "SELECT COUNT(*) FROM recording WHERE id <= ?1",
        ),
        parents: NamedQuery::new(
            "recording.parents",
            "SELECT id, gid, name, length
               FROM recording
              WHERE id BETWEEN ?1 AND ?2
              ORDER BY id",
        ),
        parent_id_column: "id",
        relations: &RELATIONS,
    },
    written_fields: &[
        "rid",
        "recording",
        "recording_output",
        "track_output",
        "dur",
        "qdur",
        "isrc",
        "tracks",
        "tnum",
        "type",
        "status",
        "reid",
        "release",
        "position",
        "arid",
        "artist",
        "artistname",
        "creditname",
        "artistcredit",
    ],
    build,
};

fn build(id: i64, row: &SourceRow, groups: &WindowGroups) -> Result<Document> {
    let name = row.get_str("name")?;

    let mut doc = Document::new(EntityKind::Recording);
    doc.add_field("rid", row.get_str("gid")?)
        .add_field("recording", name)
        .add_field("recording_output", name);

    if let Some(length) = row.get_opt_i64("length")? {
        doc.add_numeric_field("dur", length)
            .add_numeric_field("qdur", quantize_duration(length));
    }

    for isrc in groups.children(ISRCS.name, id) {
        doc.add_non_empty_field("isrc", isrc.get_opt_str("isrc")?);
    }

    add_credit_fields(&mut doc, groups.credit(id), &ARTIST_CREDIT_FIELDS);

    for track in groups.children(TRACKS.name, id) {
        let track_name = track.get_str("track_name")?;
        doc.add_field("recording", track_name)
            .add_field("track_output", track_name)
            .add_numeric_field("tracks", track.get_i64("track_count")?)
            .add_numeric_field("tnum", track.get_i64("track_position")?)
            .add_field_or_placeholder("type", track.get_opt_str("release_type")?)
            .add_field_or_placeholder("status", track.get_opt_str("release_status")?)
            .add_field("reid", track.get_str("release_gid")?)
            .add_field("release", track.get_str("release_name")?)
            .add_field("position", track.get_i64("medium_position")?.to_string());
    }

    Ok(doc)
}
