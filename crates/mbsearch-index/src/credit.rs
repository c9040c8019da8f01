//! Artist credits.
//!
//! An artist credit is the ordered chain of artists credited on a recording,
//! release or release group, each with the name it was credited under and
//! the phrase joining it to the next member ("feat. ", " & ", ...).
//!
//! Credit queries return one row per member, in chain order, with the
//! columns named by the constants below.

use std::collections::HashMap;

use mbsearch_core::Result;
use mbsearch_fts::{CreditFields, Document};
use serde::Serialize;

use crate::source::SourceRow;
use crate::window::group_by_parent;

/// Column holding the member's artist id (MBID).
pub const ARTIST_ID_COLUMN: &str = "artistId";
/// Column holding the member's artist name.
pub const ARTIST_NAME_COLUMN: &str = "artistName";
/// Column holding the member's artist sort name.
pub const ARTIST_SORT_NAME_COLUMN: &str = "artistSortName";
/// Column holding the name the member is credited under.
pub const CREDIT_NAME_COLUMN: &str = "artistCreditName";
/// Column holding the phrase following the member.
pub const JOIN_PHRASE_COLUMN: &str = "joinphrase";
/// Column holding the artist disambiguation comment.
pub const COMMENT_COLUMN: &str = "comment";

/// One member of an artist credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCreditName {
    /// Artist MBID.
    pub artist_id: String,
    /// Artist name.
    pub artist_name: String,
    /// Artist sort name.
    pub sort_name: String,
    /// Name the artist is credited under.
    pub credited_name: String,
    /// Phrase joining this member to the next one.
    pub join_phrase: String,
    /// Disambiguation comment.
    pub comment: Option<String>,
}

impl ArtistCreditName {
    fn from_row(row: &SourceRow) -> Result<Self> {
        let artist_name = row.get_str(ARTIST_NAME_COLUMN)?.to_string();
        let credited_name = row
            .get_opt_str(CREDIT_NAME_COLUMN)?
            .filter(|name| !name.is_empty())
            .map_or_else(|| artist_name.clone(), str::to_string);

        Ok(Self {
            artist_id: row.get_str(ARTIST_ID_COLUMN)?.to_string(),
            sort_name: row
                .get_opt_str(ARTIST_SORT_NAME_COLUMN)?
                .unwrap_or(&artist_name)
                .to_string(),
            artist_name,
            credited_name,
            join_phrase: row.get_opt_str(JOIN_PHRASE_COLUMN)?.unwrap_or("").to_string(),
            comment: row
                .get_opt_str(COMMENT_COLUMN)?
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }
}

/// An ordered artist credit chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtistCredit {
    names: Vec<ArtistCreditName>,
}

impl ArtistCredit {
    /// Build a credit from its members, in chain order.
    pub fn new(names: Vec<ArtistCreditName>) -> Self {
        Self { names }
    }

    /// Members in chain order.
    pub fn names(&self) -> &[ArtistCreditName] {
        &self.names
    }

    /// Whether the credit has no members.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The credit as displayed: credited names and join phrases in order.
    ///
    /// A join phrase that starts with a letter or digit is separated from the
    /// preceding name by a space, and a name following a join phrase that
    /// ends with a letter, digit or `.` is separated from it by a space.
    pub fn display_credit(&self) -> String {
        let mut out = String::new();
        for member in &self.names {
            if needs_space_before_name(&out) {
                out.push(' ');
            }
            out.push_str(&member.credited_name);

            let phrase = member.join_phrase.as_str();
            if phrase.chars().next().is_some_and(char::is_alphanumeric) {
                out.push(' ');
            }
            out.push_str(phrase);
        }
        out.trim_end().to_string()
    }

    /// Member names and credited names, deduplicated, as one searchable value.
    pub fn searchable_names(&self) -> String {
        let mut seen: Vec<&str> = Vec::new();
        for member in &self.names {
            for name in [&member.artist_name, &member.credited_name] {
                if !name.is_empty() && !seen.contains(&name.as_str()) {
                    seen.push(name);
                }
            }
        }
        seen.join(" ")
    }
}

fn needs_space_before_name(text: &str) -> bool {
    text.chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || c == '.')
}

/// Assemble credits from member rows grouped by the parent id column.
pub fn assemble_credits(
    rows: Vec<SourceRow>,
    parent_column: &str,
) -> Result<HashMap<i64, ArtistCredit>> {
    group_by_parent(rows, parent_column)?
        .into_iter()
        .map(|(parent, members)| {
            let names = members
                .iter()
                .map(ArtistCreditName::from_row)
                .collect::<Result<Vec<_>>>()?;
            Ok((parent, ArtistCredit::new(names)))
        })
        .collect()
}

/// Expand a credit into document fields.
///
/// Writes one id, name and credited name per member, the display credit,
/// and the searchable aggregate. A missing credit writes nothing.
pub fn add_credit_fields(doc: &mut Document, credit: Option<&ArtistCredit>, fields: &CreditFields) {
    let Some(credit) = credit.filter(|c| !c.is_empty()) else {
        return;
    };

    for member in credit.names() {
        doc.add_field(fields.artist_id, member.artist_id.as_str())
            .add_field(fields.artist_name, member.artist_name.as_str())
            .add_field(fields.credit_name, member.credited_name.as_str());
    }
    doc.add_field(fields.display, credit.display_credit())
        .add_field(fields.artist, credit.searchable_names());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mbsearch_core::EntityKind;
    use mbsearch_fts::ARTIST_CREDIT_FIELDS;

    use super::*;
    use crate::source::SqlValue;

    fn member(name: &str, credited: &str, join: &str) -> ArtistCreditName {
        ArtistCreditName {
            artist_id: format!("id-{name}"),
            artist_name: name.to_string(),
            sort_name: name.to_string(),
            credited_name: credited.to_string(),
            join_phrase: join.to_string(),
            comment: None,
        }
    }

    fn text(value: &str) -> SqlValue {
        SqlValue::Text(value.to_string())
    }

    #[test]
    fn test_display_credit_with_bare_join_phrase() {
        let credit = ArtistCredit::new(vec![
            member("Artist A", "Artist A", "feat. "),
            member("Artist B", "Artist B", ""),
        ]);
        assert_eq!(credit.display_credit(), "Artist A feat. Artist B");
    }

    #[test]
    fn test_display_credit_with_spaced_join_phrase() {
        let credit = ArtistCredit::new(vec![
            member("Simon", "Simon", " & "),
            member("Garfunkel", "Garfunkel", ""),
        ]);
        assert_eq!(credit.display_credit(), "Simon & Garfunkel");
    }

    #[test]
    fn test_display_credit_with_punctuation_join() {
        let credit = ArtistCredit::new(vec![
            member("Crosby", "Crosby", ", "),
            member("Stills", "Stills", " & "),
            member("Nash", "Nash", ""),
        ]);
        assert_eq!(credit.display_credit(), "Crosby, Stills & Nash");
    }

    #[test]
    fn test_display_credit_uses_credited_name() {
        let credit = ArtistCredit::new(vec![member("Prince", "The Artist", "")]);
        assert_eq!(credit.display_credit(), "The Artist");
    }

    #[test]
    fn test_searchable_names_dedupe() {
        let credit = ArtistCredit::new(vec![
            member("Prince", "The Artist", " & "),
            member("Prince", "Prince", ""),
        ]);
        assert_eq!(credit.searchable_names(), "Prince The Artist");
    }

    #[test]
    fn test_assemble_credits_from_rows() {
        let row = |parent: i64, name: &str, credited: Option<&str>, join: &str| {
            SourceRow::new("recording.artist_credits")
                .with("recording", SqlValue::Integer(parent))
                .with(ARTIST_ID_COLUMN, text(&format!("id-{name}")))
                .with(ARTIST_NAME_COLUMN, text(name))
                .with(ARTIST_SORT_NAME_COLUMN, SqlValue::Null)
                .with(CREDIT_NAME_COLUMN, credited.map_or(SqlValue::Null, text))
                .with(JOIN_PHRASE_COLUMN, text(join))
                .with(COMMENT_COLUMN, SqlValue::Null)
        };
        let rows = vec![
            row(1, "Artist A", Some("Artist A"), "feat. "),
            row(1, "Artist B", None, ""),
            row(2, "Björk", Some("Björk"), ""),
        ];

        let credits = assemble_credits(rows, "recording").unwrap();
        assert_eq!(credits.len(), 2);
        let first = &credits[&1];
        assert_eq!(first.names().len(), 2);
        assert_eq!(first.names()[1].credited_name, "Artist B");
        assert_eq!(first.names()[1].sort_name, "Artist B");
        assert_eq!(first.display_credit(), "Artist A feat. Artist B");
    }

    #[test]
    fn test_assemble_credits_rejects_missing_artist() {
        let rows = vec![
            SourceRow::new("recording.artist_credits")
                .with("recording", SqlValue::Integer(1))
                .with(ARTIST_ID_COLUMN, SqlValue::Null),
        ];
        assert!(assemble_credits(rows, "recording").is_err());
    }

    #[test]
    fn test_add_credit_fields() {
        let credit = ArtistCredit::new(vec![
            member("Artist A", "Artist A", "feat. "),
            member("Artist B", "B", ""),
        ]);
        let mut doc = Document::new(EntityKind::Recording);
        add_credit_fields(&mut doc, Some(&credit), &ARTIST_CREDIT_FIELDS);

        assert_eq!(doc.texts("arid"), vec!["id-Artist A", "id-Artist B"]);
        assert_eq!(doc.texts("artistname"), vec!["Artist A", "Artist B"]);
        assert_eq!(doc.texts("creditname"), vec!["Artist A", "B"]);
        assert_eq!(doc.texts("artistcredit"), vec!["Artist A feat. B"]);
        assert_eq!(doc.texts("artist"), vec!["Artist A Artist B B"]);
    }

    #[test]
    fn test_add_credit_fields_without_credit() {
        let mut doc = Document::new(EntityKind::Release);
        add_credit_fields(&mut doc, None, &ARTIST_CREDIT_FIELDS);
        assert!(doc.is_empty());
    }
}
