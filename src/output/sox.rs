// tone.txt -- plays simple songs written down as text
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

use log::{debug, warn};

pub enum SoxTarget<'a> {
    /// Play on the default audio device.
    Play,
    /// Write to a file in any format sox supports.
    File(&'a Path),
}

/// A running sox process accepting raw signed 8 bit mono samples on its stdin.
///
/// Writes block once the pipe is full, so the audio device paces the writer.
/// The process is always reaped, either by [`SoxSink::finish`] or when the sink is dropped.
pub struct SoxSink {
    player: Child,
    audio_stream: Option<ChildStdin>,
}

impl SoxSink {
    pub fn open(sample_rate: u32, target: SoxTarget) -> io::Result<Self> {
        let sample_rate_str = format!("{}", sample_rate);
        let input_args = &[
            "-R", // make the output reproducible
            "--channels",
            "1",
            "--rate",
            &sample_rate_str,
            "--type",
            "s8",
            "/dev/stdin",
        ];

        let (play, sox) = sox_binaries();

        let mut player = match target {
            SoxTarget::Play => Command::new(&play)
                .args(input_args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .spawn()?,
            SoxTarget::File(outfile) => Command::new(&sox)
                .args(input_args)
                .arg(outfile)
                .stdin(Stdio::piped())
                .spawn()?,
        };

        let audio_stream = match player.stdin.take() {
            Some(stream) => stream,
            None => {
                let _ = player.kill();
                let _ = player.wait();
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "sox process has no input stream",
                ));
            }
        };

        Ok(Self {
            player,
            audio_stream: Some(audio_stream),
        })
    }

    /// Close the input stream and wait until sox has played everything.
    /// Fails if sox did not exit successfully, e.g. because no audio device was available.
    pub fn finish(mut self) -> io::Result<()> {
        let status = self.close()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("sox exited with {}", status),
            ))
        }
    }

    fn close(&mut self) -> io::Result<ExitStatus> {
        if let Some(mut stream) = self.audio_stream.take() {
            // sox exits on its own once the input stream is closed
            let flushed = stream.flush();
            drop(stream);
            let status = self.player.wait()?;
            debug!("sox finished with {}", status);
            flushed.map(|_| status)
        } else {
            self.player.wait()
        }
    }
}

impl Write for SoxSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.audio_stream.as_mut() {
            Some(stream) => stream.write(buf),
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "sox sink closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.audio_stream.as_mut() {
            Some(stream) => stream.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for SoxSink {
    fn drop(&mut self) {
        if self.audio_stream.is_some() {
            if let Err(err) = self.close() {
                warn!("Failed to shut down sox: {}", err);
            }
        }
    }
}

/// The `play` and `sox` executables, optionally pinned at build time.
fn sox_binaries() -> (PathBuf, PathBuf) {
    // For properly recording the sox dependency on nix:
    if let Some(sox_bin) = option_env!("NIX_SOX_BIN") {
        debug!("using sox from nix store {}", sox_bin);
        let play = Path::new(sox_bin).join("play");
        let sox = Path::new(sox_bin).join("sox");
        (play, sox)
    } else {
        ("play".into(), "sox".into())
    }
}
