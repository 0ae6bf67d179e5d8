// tone.txt -- plays simple songs written down as text
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Translate a song into a stream of samples.

use std::io::{self, Write};

use log::{info, trace};
use snafu::{ResultExt, Snafu};

use crate::note::{Duration, Pitch};
use crate::output::copy_i8_bytes;
use crate::output::sox::{SoxSink, SoxTarget};
use crate::song::Song;
use crate::wave::{NoteTable, MEASURE_LENGTH_SEC, REST_GAP_SAMPLES, SAMPLE_RATE};

#[derive(Debug, Snafu)]
pub enum PlayError {
    #[snafu(display("Could not open audio output: {}", source))]
    OpenSink { source: io::Error },
    #[snafu(display("Failed to write audio: {}", source))]
    WriteAudio { source: io::Error },
    #[snafu(display("Audio output did not finish cleanly: {}", source))]
    CloseSink { source: io::Error },
    #[snafu(display("Note {} cannot be played: {:?}", index, pitch))]
    InvalidNote { index: usize, pitch: Pitch },
}

/// Number of samples a note of the given duration sounds for.
/// Notes never last longer than a measure.
///
/// # Examples
///
/// ```
/// use tone_txt::note::Duration;
/// use tone_txt::play::samples_for;
///
/// assert_eq!(samples_for(Duration::Quarter), 12288);
/// assert_eq!(samples_for(Duration::Invalid), 0);
/// ```
pub fn samples_for(duration: Duration) -> usize {
    let ms = duration.time_ms().min(MEASURE_LENGTH_SEC * 1000);
    (SAMPLE_RATE as usize * ms as usize) / 1000
}

/// Number of samples written when playing the song, including the gaps between notes.
pub fn total_samples(song: &Song) -> usize {
    song.iter()
        .map(|note| samples_for(note.duration) + REST_GAP_SAMPLES)
        .sum()
}

/// Play a song on the default speakers, or write it to a file.
///
/// The song must have been checked with [`crate::song::validate`] before.
pub fn play(table: &NoteTable, song: &Song, target: SoxTarget) -> Result<(), PlayError> {
    if song.is_empty() {
        info!("nothing to play");
        return Ok(());
    }
    info!(
        "playing {} notes at {} Hz ({:.2} seconds)",
        song.len(),
        SAMPLE_RATE,
        total_samples(song) as f64 / SAMPLE_RATE as f64
    );

    let mut sink = SoxSink::open(SAMPLE_RATE, target).context(OpenSink)?;
    // on error the sink is dropped, which still shuts down sox
    render(table, song, &mut sink)?;
    sink.finish().context(CloseSink)
}

/// Write all notes of the song in order, each followed by a short silence.
pub fn render<W: Write>(table: &NoteTable, song: &Song, sink: &mut W) -> Result<(), PlayError> {
    let mut byte_buffer = vec![0u8; samples_for(Duration::Whole)];
    let gap = &table.silence()[..REST_GAP_SAMPLES];

    for (index, note) in song.iter().enumerate() {
        let wave = table.waveform(note.pitch).ok_or(PlayError::InvalidNote {
            index: index + 1,
            pitch: note.pitch,
        })?;
        let length = samples_for(note.duration);
        trace!("{:4}: {} for {} samples", index + 1, note.pitch.name(), length);

        let n = copy_i8_bytes(&wave[..length], &mut byte_buffer);
        sink.write_all(&byte_buffer[..n]).context(WriteAudio)?;

        let n = copy_i8_bytes(gap, &mut byte_buffer);
        sink.write_all(&byte_buffer[..n]).context(WriteAudio)?;
    }

    sink.flush().context(WriteAudio)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::song::{parse, NoteEvent};

    fn bytes_of(samples: &[i8]) -> Vec<u8> {
        samples.iter().map(|&s| s as u8).collect()
    }

    #[test]
    fn sample_counts() {
        assert_eq!(samples_for(Duration::Whole), 49152);
        assert_eq!(samples_for(Duration::Half), 24576);
        assert_eq!(samples_for(Duration::Quarter), 12288);
        assert_eq!(samples_for(Duration::Eighth), 6144);
        assert_eq!(samples_for(Duration::Invalid), 0);
    }

    #[test]
    fn song_length() {
        let song = parse("A4 4\nREST 1\n".as_bytes()).unwrap();
        assert_eq!(total_samples(&song), 12288 + 50 + 49152 + 50);
        assert_eq!(total_samples(&Song::default()), 0);
    }

    #[test]
    fn single_quarter_note() {
        let table = NoteTable::new();
        let song = parse("A4 4\n".as_bytes()).unwrap();
        let mut out = Vec::new();
        render(&table, &song, &mut out).unwrap();

        assert_eq!(out.len(), 12288 + 50);
        let a4 = table.waveform(Pitch::A4).unwrap();
        assert_eq!(&out[..12288], &bytes_of(&a4[..12288])[..]);
        assert!(out[12288..].iter().all(|&b| b == 0));
    }

    #[test]
    fn notes_in_order() {
        let table = NoteTable::new();
        let song = parse("C4 8\nREST 8\nG4 2\n".as_bytes()).unwrap();
        let mut out = Vec::new();
        render(&table, &song, &mut out).unwrap();
        assert_eq!(out.len(), total_samples(&song));

        let c4 = bytes_of(&table.waveform(Pitch::C4).unwrap()[..6144]);
        let g4 = bytes_of(&table.waveform(Pitch::G4).unwrap()[..24576]);
        assert_eq!(&out[..6144], &c4[..]);
        let rest_end = 6144 + 50 + 6144 + 50;
        assert!(out[6144..rest_end].iter().all(|&b| b == 0));
        assert_eq!(&out[rest_end..rest_end + 24576], &g4[..]);
    }

    #[test]
    fn empty_song_writes_nothing() {
        let mut out = Vec::new();
        render(&NoteTable::new(), &Song::default(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn refuses_invalid_notes() {
        let song = Song {
            notes: vec![NoteEvent {
                pitch: Pitch::Invalid,
                duration: Duration::Quarter,
            }],
        };
        let mut out = Vec::new();
        match render(&NoteTable::new(), &song, &mut out) {
            Err(PlayError::InvalidNote { index, pitch }) => {
                assert_eq!(index, 1);
                assert_eq!(pitch, Pitch::Invalid);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn empty_song_does_not_open_output() {
        // sox would fail to write here, so success means it was never started
        let target = SoxTarget::File(std::path::Path::new("/nonexistent/dir/out.wav"));
        assert!(play(&NoteTable::new(), &Song::default(), target).is_ok());
    }

    #[test]
    fn write_errors_propagate() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let song = parse("A4 1\n".as_bytes()).unwrap();
        let result = render(&NoteTable::new(), &song, &mut Broken);
        assert!(matches!(result, Err(PlayError::WriteAudio { .. })));
    }
}
