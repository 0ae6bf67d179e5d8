// tone.txt -- plays simple songs written down as text
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Songs are read from text files with one note per line,
//! consisting of a pitch name and a duration code, e.g. `A4 4`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, error};
use snafu::{ResultExt, Snafu};

use crate::note::{Duration, Pitch};

/// A single line of a song: which bell to ring and for how long.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub duration: Duration,
}

/// A description of a complete song, played note by note in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Song {
    pub notes: Vec<NoteEvent>,
}

#[derive(Debug, Snafu)]
pub enum LoadError {
    #[snafu(display("Could not read song file {}: {}", path.display(), source))]
    ReadSong { path: PathBuf, source: io::Error },
}

impl Song {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteEvent> {
        self.notes.iter()
    }
}

/// Read a song from a file.
///
/// A missing file is not an error: it is reported and results in an empty song.
/// Lines that are not made up of exactly two tokens are reported and skipped.
/// Unknown pitches and durations are kept as invalid notes, see [`validate`].
pub fn load(path: &Path) -> Result<Song, LoadError> {
    if !path.exists() {
        error!("File '{}' not found", path.display());
        return Ok(Song::default());
    }
    let file = File::open(path).context(ReadSong { path })?;
    let song = parse(BufReader::new(file)).context(ReadSong { path })?;
    debug!("loaded {} notes from {}", song.len(), path.display());
    Ok(song)
}

/// Parse a song line by line from any buffered reader.
pub fn parse<R: BufRead>(reader: R) -> io::Result<Song> {
    let mut notes = Vec::new();
    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Some(note) => notes.push(note),
            None => error!("Error: Invalid note '{}'", line),
        }
    }
    Ok(Song { notes })
}

/// Parse one line of a song file.
/// Returns `None` unless the line consists of exactly two whitespace separated tokens.
///
/// # Examples
///
/// ```
/// use tone_txt::note::*;
/// use tone_txt::song::*;
///
/// assert_eq!(
///     parse_line("a4   8"),
///     Some(NoteEvent { pitch: Pitch::A4, duration: Duration::Eighth })
/// );
/// assert_eq!(parse_line("A4 4 4"), None);
/// ```
pub fn parse_line(line: &str) -> Option<NoteEvent> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [pitch, duration] => Some(NoteEvent {
            pitch: Pitch::from_name(pitch),
            duration: Duration::from_code(duration),
        }),
        _ => None,
    }
}

/// Check that every note of the song can be played.
///
/// Every invalid pitch and every invalid duration is reported separately.
/// An empty song is trivially valid.
pub fn validate(song: &Song) -> bool {
    let mut success = true;
    for (index, note) in song.iter().enumerate() {
        if !note.pitch.is_valid() {
            error!("Invalid Note");
            debug!("note {} has an unknown pitch", index + 1);
            success = false;
        }
        if !note.duration.is_valid() {
            error!("Note length invalid");
            debug!("note {} has an unknown duration", index + 1);
            success = false;
        }
    }
    success
}
