//! Gesture feed from an external hand-gesture classifier.
//!
//! The classifier runs in another process and writes one category label per
//! line into a pipe (or file). A reader thread turns each label into an
//! "open palm" flag and publishes it on a channel; the game loop samples the
//! channel once per tick and keeps only the most recent value. A verdict can
//! therefore be up to one tick stale; the loop never blocks waiting for one.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

/// Classifier label that counts as a jump.
pub const OPEN_PALM_LABEL: &str = "Open_Palm";

pub fn is_open_palm(label: &str) -> bool {
    label.trim() == OPEN_PALM_LABEL
}

/// Create a connected sender/receiver pair.
pub fn gesture_channel() -> (GestureSender, GestureReceiver) {
    let (tx, rx) = mpsc::channel();
    (
        GestureSender { tx },
        GestureReceiver {
            rx,
            latest: false,
            connected: true,
        },
    )
}

/// Writer side, owned by the feed thread.
#[derive(Debug, Clone)]
pub struct GestureSender {
    tx: Sender<bool>,
}

impl GestureSender {
    /// Publish a verdict. Returns false once the game has gone away.
    pub fn publish(&self, open_palm: bool) -> bool {
        self.tx.send(open_palm).is_ok()
    }
}

/// Reader side, owned by the game loop.
#[derive(Debug)]
pub struct GestureReceiver {
    rx: Receiver<bool>,
    latest: bool,
    connected: bool,
}

impl GestureReceiver {
    /// Drain pending verdicts and return the newest one. With nothing new,
    /// the previous verdict stands. A closed feed reads as "no gesture".
    pub fn sample(&mut self) -> bool {
        loop {
            match self.rx.try_recv() {
                Ok(open_palm) => self.latest = open_palm,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.connected {
                        log::info!("gesture feed disconnected");
                        self.connected = false;
                    }
                    self.latest = false;
                    break;
                }
            }
        }
        self.latest
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Publish one verdict per line until EOF, a read error, or the receiver
/// being dropped. Returns the number of labels published.
pub fn read_labels<R: BufRead>(reader: R, sender: &GestureSender) -> usize {
    let mut published = 0;
    for line in reader.lines() {
        match line {
            Ok(label) => {
                if !sender.publish(is_open_palm(&label)) {
                    break;
                }
                published += 1;
            }
            Err(e) => {
                log::warn!("gesture feed read error: {}", e);
                break;
            }
        }
    }
    published
}

/// Open `path` on a background thread and feed its labels into `sender`.
/// Opening a FIFO blocks until the classifier connects, so it happens on the
/// thread, not the caller.
pub fn spawn_pipe_reader(path: PathBuf, sender: GestureSender) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("gesture-feed".to_string())
        .spawn(move || match File::open(&path) {
            Ok(file) => {
                log::info!("gesture feed opened: {}", path.display());
                let count = read_labels(BufReader::new(file), &sender);
                log::info!("gesture feed closed after {} labels", count);
            }
            Err(e) => log::warn!("cannot open gesture feed {}: {}", path.display(), e),
        })
}
