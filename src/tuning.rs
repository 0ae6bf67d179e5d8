// tone.txt -- plays simple songs written down as text
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use crate::note::*;

/// Defines the tuning of the bells by assigning a frequency to A4.
/// All other pitches follow at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use tone_txt::note::*;
/// use tone_txt::tuning::*;
/// assert_eq!(Tuning::default().frequency(Pitch::A4), Some(440.0));
/// assert_eq!(Tuning::default().frequency(Pitch::A5), Some(880.0));
/// assert_eq!(Tuning::default().frequency(Pitch::Rest), None);
/// ```
pub struct Tuning {
    pub reference_frequency: f64,
}

impl Tuning {
    /// Return the frequency of a pitch relative to this tuning.
    pub fn frequency(&self, pitch: Pitch) -> Option<f64> {
        let semitones = pitch.half_steps_from_a4()?;
        let octaves = semitones as f64 / 12.0;
        Some(self.reference_frequency * 2.0f64.powf(octaves))
    }
}

/// Default concert tuning, where A4 corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_frequency: 440.0,
        }
    }
}
