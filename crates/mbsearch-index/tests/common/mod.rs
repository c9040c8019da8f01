//! A small MusicBrainz-shaped SQLite fixture.
//!
//! Ids 1..=5 of every main table are populated:
//!
//! - recording 1 and 2 are Beatles tracks on the album "Abbey Road"
//! - recording 3 has no tracks, no ISRCs and no length
//! - recording 4 is "Jóga" by Björk, 185000 ms long
//! - recording 5 is credited "Artist A feat. Artist B" and sits on a release
//!   without a status

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use mbsearch_core::{Error, Result};
use mbsearch_index::{BatchWindow, NamedQuery, RelationalSource, SourceRow, SqliteSource};
use rusqlite::Connection;

pub const SCHEMA: &str = "
CREATE TABLE artist_type (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE gender (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE artist (
    id INTEGER PRIMARY KEY,
    gid TEXT NOT NULL,
    name TEXT NOT NULL,
    sort_name TEXT NOT NULL,
    type INTEGER,
    gender INTEGER,
    comment TEXT,
    begin_date_year INTEGER, begin_date_month INTEGER, begin_date_day INTEGER,
    end_date_year INTEGER, end_date_month INTEGER, end_date_day INTEGER
);
CREATE TABLE artist_alias (id INTEGER PRIMARY KEY, artist INTEGER NOT NULL, name TEXT NOT NULL);
CREATE TABLE artist_credit (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE artist_credit_name (
    artist_credit INTEGER NOT NULL,
    position INTEGER NOT NULL,
    artist INTEGER NOT NULL,
    name TEXT,
    join_phrase TEXT
);
CREATE TABLE release_group_primary_type (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE release_group (
    id INTEGER PRIMARY KEY,
    gid TEXT NOT NULL,
    name TEXT NOT NULL,
    artist_credit INTEGER NOT NULL,
    type INTEGER
);
CREATE TABLE release_status (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE release (
    id INTEGER PRIMARY KEY,
    gid TEXT NOT NULL,
    name TEXT NOT NULL,
    artist_credit INTEGER NOT NULL,
    release_group INTEGER NOT NULL,
    status INTEGER,
    barcode TEXT,
    date_year INTEGER, date_month INTEGER, date_day INTEGER
);
CREATE TABLE medium (
    id INTEGER PRIMARY KEY,
    release INTEGER NOT NULL,
    position INTEGER NOT NULL,
    track_count INTEGER NOT NULL
);
CREATE TABLE recording (
    id INTEGER PRIMARY KEY,
    gid TEXT NOT NULL,
    name TEXT NOT NULL,
    artist_credit INTEGER NOT NULL,
    length INTEGER
);
CREATE TABLE track (
    id INTEGER PRIMARY KEY,
    medium INTEGER NOT NULL,
    recording INTEGER NOT NULL,
    position INTEGER NOT NULL,
    name TEXT NOT NULL
);
CREATE TABLE isrc (id INTEGER PRIMARY KEY, recording INTEGER NOT NULL, isrc TEXT NOT NULL);
CREATE TABLE label (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE release_label (
    id INTEGER PRIMARY KEY,
    release INTEGER NOT NULL,
    label INTEGER,
    catalog_number TEXT
);
CREATE TABLE tag (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
";

pub const DATA: &str = "
INSERT INTO artist_type VALUES (1, 'Person'), (2, 'Group');
INSERT INTO gender VALUES (1, 'Male'), (2, 'Female');

INSERT INTO artist VALUES
    (1, 'a-beatles', 'The Beatles', 'Beatles, The', 2, NULL, NULL, 1960, NULL, NULL, 1970, 4, 10),
    (2, 'a-artist-a', 'Artist A', 'A, Artist', 1, 1, 'the first one', NULL, NULL, NULL, NULL, NULL, NULL),
    (3, 'a-artist-b', 'Artist B', 'B, Artist', NULL, NULL, '', NULL, NULL, NULL, NULL, NULL, NULL),
    (4, 'a-bjork', 'Björk', 'Björk', 1, 2, NULL, 1965, 11, 21, NULL, NULL, NULL),
    (5, 'a-wings', 'Wings', 'Wings', 2, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL);
INSERT INTO artist_alias VALUES
    (1, 1, 'Fab Four'),
    (2, 4, 'Bjork'),
    (3, 4, 'Björk Guðmundsdóttir');

INSERT INTO artist_credit VALUES
    (1, 'The Beatles'),
    (2, 'Artist A feat. Artist B'),
    (3, 'Björk');
INSERT INTO artist_credit_name VALUES
    (1, 0, 1, 'The Beatles', ''),
    (2, 0, 2, 'Artist A', 'feat. '),
    (2, 1, 3, NULL, ''),
    (3, 0, 4, 'Björk', '');

INSERT INTO release_group_primary_type VALUES (1, 'Album'), (2, 'Single');
INSERT INTO release_group VALUES
    (1, 'rg-abbey-road', 'Abbey Road', 1, 1),
    (2, 'rg-collab', 'Collab', 2, 2),
    (3, 'rg-homogenic', 'Homogenic', 3, 1),
    (4, 'rg-untyped', 'Untyped', 1, NULL);

INSERT INTO release_status VALUES (1, 'Official'), (2, 'Bootleg');
INSERT INTO release VALUES
    (1, 're-abbey-road', 'Abbey Road', 1, 1, 1, '077774644624', 1969, 9, 26),
    (2, 're-collab', 'Collab', 2, 2, NULL, NULL, NULL, NULL, NULL),
    (3, 're-homogenic', 'Homogenic', 3, 3, 1, NULL, 1997, 9, NULL),
    (4, 're-abbey-road-boot', 'Abbey Road (Live)', 1, 1, 2, NULL, NULL, NULL, NULL);

INSERT INTO medium VALUES
    (1, 1, 1, 2),
    (2, 2, 1, 1),
    (3, 3, 1, 1),
    (4, 3, 2, 3);

INSERT INTO recording VALUES
    (1, 'r-come-together', 'Come Together', 1, 259000),
    (2, 'r-something', 'Something', 1, 182000),
    (3, 'r-lonely', 'Lonely Song', 2, NULL),
    (4, 'r-joga', 'Jóga', 3, 185000),
    (5, 'r-collab', 'Collab Track', 2, 200000);

INSERT INTO track VALUES
    (1, 1, 1, 1, 'Come Together'),
    (2, 1, 2, 2, 'Something'),
    (3, 2, 5, 1, 'Collab Track (radio edit)'),
    (4, 3, 4, 1, 'Jóga');

INSERT INTO isrc VALUES
    (1, 1, 'GBAYE6900001'),
    (2, 4, 'GBAAN9700001'),
    (3, 4, 'GBAAN9700002');

INSERT INTO label VALUES (1, 'Apple Records'), (2, 'One Little Indian');
INSERT INTO release_label VALUES
    (1, 1, 1, 'PCS 7088'),
    (2, 3, 2, 'TPLP71'),
    (3, 3, NULL, 'TPLP71CD');

INSERT INTO tag VALUES
    (1, 'rock'),
    (2, 'alternative rock'),
    (3, 'trip hop'),
    (5, 'electronic');
";

/// An open connection populated with the fixture.
pub fn fixture_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(DATA).unwrap();
    conn
}

/// An in-memory source over the fixture.
pub fn fixture_source() -> SqliteSource {
    SqliteSource::from_connection(fixture_connection())
}

/// Write the fixture to a database file in `dir`.
pub fn fixture_file(dir: &Path) -> PathBuf {
    let path = dir.join("musicbrainz.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(DATA).unwrap();
    path
}

/// A source whose named query always fails.
pub struct FailingSource<S> {
    pub inner: S,
    pub failing_query: &'static str,
}

impl<S: RelationalSource> RelationalSource for FailingSource<S> {
    fn max_id(&self, query: &NamedQuery) -> Result<i64> {
        self.inner.max_id(query)
    }

    fn row_count(&self, query: &NamedQuery, max_id: i64) -> Result<i64> {
        self.inner.row_count(query, max_id)
    }

    fn query_window(&self, query: &NamedQuery, window: BatchWindow) -> Result<Vec<SourceRow>> {
        if query.name == self.failing_query {
            return Err(Error::source_query(format!("{} failed", query.name)));
        }
        self.inner.query_window(query, window)
    }
}
