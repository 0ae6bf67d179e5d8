// tone.txt -- plays simple songs written down as text
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note is.

use crate::wave::MEASURE_LENGTH_SEC;

/// A named tone on the bell set, or a rest.
///
/// The order of the variants is significant: the position of a pitch
/// determines its frequency, see [`Pitch::half_steps_from_a4`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Pitch {
    Rest,
    A4,
    A4S,
    B4,
    C4,
    C4S,
    D4,
    D4S,
    E4,
    F4,
    F4S,
    G4,
    G4S,
    A5,
    A3,
    F3,
    F3S,
    G3,
    Invalid,
}

impl Pitch {
    /// All pitches that can be sounded or rested, i.e. everything except `Invalid`.
    pub const PLAYABLE: [Pitch; 18] = [
        Pitch::Rest,
        Pitch::A4,
        Pitch::A4S,
        Pitch::B4,
        Pitch::C4,
        Pitch::C4S,
        Pitch::D4,
        Pitch::D4S,
        Pitch::E4,
        Pitch::F4,
        Pitch::F4S,
        Pitch::G4,
        Pitch::G4S,
        Pitch::A5,
        Pitch::A3,
        Pitch::F3,
        Pitch::F3S,
        Pitch::G3,
    ];

    /// Parse a pitch name as written in a song file.
    /// Matching ignores case; anything not in the vocabulary is `Invalid`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tone_txt::note::*;
    ///
    /// assert_eq!(Pitch::from_name("A4"), Pitch::A4);
    /// assert_eq!(Pitch::from_name("c4s"), Pitch::C4S);
    /// assert_eq!(Pitch::from_name("rest"), Pitch::Rest);
    /// assert_eq!(Pitch::from_name("H2"), Pitch::Invalid);
    /// ```
    pub fn from_name(name: &str) -> Pitch {
        Self::PLAYABLE
            .iter()
            .copied()
            .find(|pitch| pitch.name().eq_ignore_ascii_case(name))
            .unwrap_or(Pitch::Invalid)
    }

    /// The canonical name of the pitch, as accepted by [`Pitch::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Pitch::Rest => "REST",
            Pitch::A4 => "A4",
            Pitch::A4S => "A4S",
            Pitch::B4 => "B4",
            Pitch::C4 => "C4",
            Pitch::C4S => "C4S",
            Pitch::D4 => "D4",
            Pitch::D4S => "D4S",
            Pitch::E4 => "E4",
            Pitch::F4 => "F4",
            Pitch::F4S => "F4S",
            Pitch::G4 => "G4",
            Pitch::G4S => "G4S",
            Pitch::A5 => "A5",
            Pitch::A3 => "A3",
            Pitch::F3 => "F3",
            Pitch::F3S => "F3S",
            Pitch::G3 => "G3",
            Pitch::Invalid => "INVALID",
        }
    }

    /// Number of half steps above A4, taken from the position in the enumeration.
    /// `None` for the rest and invalid pitches which have no frequency.
    pub fn half_steps_from_a4(self) -> Option<i32> {
        match self {
            Pitch::Rest | Pitch::Invalid => None,
            other => Some(other as i32 - 1),
        }
    }

    pub fn is_valid(self) -> bool {
        self != Pitch::Invalid
    }
}

/// How long a note is held, as a fraction of a measure.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Duration {
    Whole,
    Half,
    Quarter,
    Eighth,
    Invalid,
}

impl Duration {
    /// Parse a duration code: `1`, `2`, `4` or `8` for whole, half, quarter and eighth notes.
    ///
    /// # Examples
    ///
    /// ```
    /// use tone_txt::note::*;
    ///
    /// assert_eq!(Duration::from_code("4"), Duration::Quarter);
    /// assert_eq!(Duration::from_code("16"), Duration::Invalid);
    /// ```
    pub fn from_code(code: &str) -> Duration {
        match code.to_ascii_lowercase().as_str() {
            "1" => Duration::Whole,
            "2" => Duration::Half,
            "4" => Duration::Quarter,
            "8" => Duration::Eighth,
            _ => Duration::Invalid,
        }
    }

    /// Length of the note in milliseconds, 0 for `Invalid`.
    pub fn time_ms(self) -> u32 {
        let measure_ms = MEASURE_LENGTH_SEC * 1000;
        match self {
            Duration::Whole => measure_ms,
            Duration::Half => measure_ms / 2,
            Duration::Quarter => measure_ms / 4,
            Duration::Eighth => measure_ms / 8,
            Duration::Invalid => 0,
        }
    }

    pub fn is_valid(self) -> bool {
        self != Duration::Invalid
    }
}
