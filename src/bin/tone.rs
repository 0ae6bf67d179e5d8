// tone.txt -- plays simple songs written down as text
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `tone` - plays a song file on the default speakers, one bell at a time.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use log::{error, warn};
use snafu::{ResultExt, Snafu};
use structopt::StructOpt;

use tone_txt::output::sox::SoxTarget;
use tone_txt::play::{self, PlayError};
use tone_txt::song::{self, LoadError};
use tone_txt::wave::NoteTable;

#[derive(Debug, StructOpt)]
#[structopt(name = "tone", about = "Playing songs written as text")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The song, one `<pitch> <duration>` pair per line.
    #[structopt(parse(from_os_str))]
    song: PathBuf,

    /// Output file (any sox-supported format). Music is played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Dump the notes read from the song file.
    #[structopt(long)]
    #[allow(clippy::option_option)]
    dump_description: Option<Option<PathBuf>>,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("Could not set up logging: {}", source))]
    InitLogger { source: log::SetLoggerError },
    #[snafu(display("{}", source))]
    Load { source: LoadError },
    #[snafu(display("Could not dump song description: {}", source))]
    Dump { source: io::Error },
    #[snafu(display("{}", source))]
    Play { source: PlayError },
}

fn main() {
    let opt = Opt::from_args();
    match run(opt) {
        Ok(true) => {}
        Ok(false) => {
            error!("Failed");
            process::exit(-1);
        }
        Err(err) => {
            // the logger may be what failed
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}

/// Returns whether the song was valid and got played.
fn run(opt: Opt) -> Result<bool, Error> {
    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).context(InitLogger)?;

    let song = song::load(&opt.song).context(Load)?;

    if let Some(dump_out) = opt.dump_description {
        let dump_out_path = dump_out.unwrap_or_else(|| "/dev/stdout".into());
        let mut f = std::fs::File::create(dump_out_path).context(Dump)?;
        writeln!(f, "{:?}", song).context(Dump)?;
    }

    if !song::validate(&song) {
        return Ok(false);
    }
    if song.is_empty() {
        warn!("{} contains no notes", opt.song.display());
    }

    let table = NoteTable::new();
    let target = match opt.output.as_deref() {
        None => SoxTarget::Play,
        Some(path) => SoxTarget::File(path),
    };
    play::play(&table, &song, target).context(Play)?;
    Ok(true)
}
