// tone.txt -- plays simple songs written down as text
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

use log::debug;

use crate::note::Pitch;
use crate::tuning::Tuning;

/// Number of samples per second (~48 kHz).
pub const SAMPLE_RATE: u32 = 48 * 1024;

/// Length of one measure, which is also the longest a single note can sound.
pub const MEASURE_LENGTH_SEC: u32 = 1;

/// Peak amplitude of a tone, the largest value a signed 8 bit sample can hold.
pub const MAX_AMPLITUDE: f64 = 127.0;

/// Number of silent samples between two consecutive notes.
pub const REST_GAP_SAMPLES: usize = 50;

/// Length of every waveform in the note table.
pub const WAVEFORM_LEN: usize = (SAMPLE_RATE * MEASURE_LENGTH_SEC) as usize;

/// Precomputed waveforms of all playable pitches.
///
/// Each waveform is one measure long, notes are truncated to their duration
/// when played. The table is built once and only handed out by shared reference.
pub struct NoteTable {
    /// Indexed by the position of the pitch in the enumeration.
    waveforms: Vec<Box<[i8]>>,
}

impl NoteTable {
    pub fn new() -> Self {
        Self::with_tuning(&Tuning::default())
    }

    pub fn with_tuning(tuning: &Tuning) -> Self {
        let waveforms = Pitch::PLAYABLE
            .iter()
            .map(|&pitch| match tuning.frequency(pitch) {
                Some(freq) => {
                    debug!("sampling {} at {:.2} Hz", pitch.name(), freq);
                    sine_wave(freq)
                }
                None => silence(),
            })
            .collect();
        Self { waveforms }
    }

    /// The waveform of a pitch, or `None` for [`Pitch::Invalid`] which has no sound.
    pub fn waveform(&self, pitch: Pitch) -> Option<&[i8]> {
        if pitch.is_valid() {
            self.waveforms.get(pitch as usize).map(|wave| &wave[..])
        } else {
            None
        }
    }

    /// The silent waveform used for rests and the gaps between notes.
    pub fn silence(&self) -> &[i8] {
        &self.waveforms[Pitch::Rest as usize]
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a sine wave of the given frequency for one measure.
fn sine_wave(frequency: f64) -> Box<[i8]> {
    // Circumference of a circle divided by number of samples
    let step_alpha = 2.0 * std::f64::consts::PI / SAMPLE_RATE as f64;
    let sin_step = frequency * step_alpha;
    (0..WAVEFORM_LEN)
        .map(|i| ((i as f64 * sin_step).sin() * MAX_AMPLITUDE).round() as i8)
        .collect()
}

fn silence() -> Box<[i8]> {
    vec![0; WAVEFORM_LEN].into_boxed_slice()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn waveform_lengths() {
        let table = NoteTable::new();
        assert_eq!(WAVEFORM_LEN, 49152);
        for &pitch in Pitch::PLAYABLE.iter() {
            let wave = table.waveform(pitch).unwrap();
            assert_eq!(wave.len(), WAVEFORM_LEN, "{:?}", pitch);
            assert_eq!(wave[0], 0, "{:?}", pitch);
        }
        assert_eq!(table.waveform(Pitch::Invalid), None);
    }

    #[test]
    fn rest_is_silent() {
        let table = NoteTable::new();
        assert!(table.waveform(Pitch::Rest).unwrap().iter().all(|&s| s == 0));
        assert_eq!(table.silence(), table.waveform(Pitch::Rest).unwrap());
    }

    #[test]
    fn tones_follow_sine() {
        let table = NoteTable::new();
        let a4 = table.waveform(Pitch::A4).unwrap();
        let step = 440.0 * (2.0 * std::f64::consts::PI / SAMPLE_RATE as f64);
        for i in [1usize, 7, 28, 1000, 49151].iter() {
            let expected = ((*i as f64 * step).sin() * 127.0).round() as i8;
            assert_eq!(a4[*i], expected);
        }
        // tones reach the full amplitude but never exceed it
        assert_eq!(a4.iter().copied().max(), Some(127));
        assert_eq!(a4.iter().copied().min(), Some(-127));
    }

    #[test]
    fn pitches_differ() {
        let table = NoteTable::new();
        assert_ne!(table.waveform(Pitch::A4), table.waveform(Pitch::A5));
        assert_ne!(table.waveform(Pitch::C4), table.waveform(Pitch::C4S));
    }
}
