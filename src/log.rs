// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Simple logger. Writes into the console (stdout) and into every registered listener. Kernel
//! operations write argument errors and numerical warnings here, listeners let the host
//! application route the messages into its own log.

use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

/// A message that could be sent by the logger to all listeners.
#[derive(Debug, Clone)]
pub struct LogMessage {
    /// Kind of the message: information, warning or error.
    pub kind: MessageKind,
    /// The source message without logger prefixes.
    pub content: String,
    /// Time point at which the message was recorded. It is relative to the moment when the
    /// logger was initialized.
    pub time: Duration,
}

static LOG: LazyLock<Mutex<Log>> = LazyLock::new(|| {
    Mutex::new(Log {
        verbosity: MessageKind::Information,
        console: true,
        listeners: Default::default(),
        time_origin: Instant::now(),
        one_shot_sources: Default::default(),
    })
});

/// A kind of message.
#[derive(Debug, Default, Copy, Clone, PartialOrd, PartialEq, Eq, Ord, Hash)]
#[repr(u32)]
pub enum MessageKind {
    /// Some useful information.
    #[default]
    Information = 0,
    /// A warning.
    Warning = 1,
    /// An error of some kind.
    Error = 2,
}

impl MessageKind {
    fn as_str(self) -> &'static str {
        match self {
            MessageKind::Information => "[INFO]: ",
            MessageKind::Warning => "[WARNING]: ",
            MessageKind::Error => "[ERROR]: ",
        }
    }
}

/// See module docs.
pub struct Log {
    verbosity: MessageKind,
    console: bool,
    listeners: Vec<Sender<LogMessage>>,
    time_origin: Instant,
    one_shot_sources: FxHashMap<usize, String>,
}

impl Log {
    fn write_internal<S>(&mut self, id: Option<usize>, kind: MessageKind, message: S) -> bool
    where
        S: AsRef<str>,
    {
        let mut msg = message.as_ref().to_owned();
        if kind as u32 >= self.verbosity as u32 {
            if let Some(id) = id {
                match self.one_shot_sources.entry(id) {
                    Entry::Occupied(mut message) => {
                        if message.get() == &msg {
                            return false;
                        }
                        message.insert(msg.clone());
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(msg.clone());
                    }
                }
            }

            // Notify listeners about the message and remove all disconnected listeners.
            let time = Instant::now() - self.time_origin;
            self.listeners.retain(|listener| {
                listener
                    .send(LogMessage {
                        kind,
                        content: msg.clone(),
                        time,
                    })
                    .is_ok()
            });

            if self.console {
                msg.insert_str(0, kind.as_str());
                msg.push('\n');
                let _ = io::stdout().write_all(msg.as_bytes());
            }
        }

        true
    }

    /// Writes a string to the console and to the listeners.
    pub fn write<S>(kind: MessageKind, msg: S)
    where
        S: AsRef<str>,
    {
        LOG.lock().write_internal(None, kind, msg);
    }

    /// Unlike [`Self::write`] this method writes the message only once per given id if the
    /// message remains the same. If the message changes, then the new version will be written.
    /// Numerical warnings on per-frame paths go through this to avoid flooding the log.
    pub fn write_once<S>(id: usize, kind: MessageKind, msg: S) -> bool
    where
        S: AsRef<str>,
    {
        LOG.lock().write_internal(Some(id), kind, msg)
    }

    /// Writes an information message.
    pub fn info<S>(msg: S)
    where
        S: AsRef<str>,
    {
        Self::write(MessageKind::Information, msg)
    }

    /// Writes a warning message.
    pub fn warn<S>(msg: S)
    where
        S: AsRef<str>,
    {
        Self::write(MessageKind::Warning, msg)
    }

    /// Writes error message.
    pub fn err<S>(msg: S)
    where
        S: AsRef<str>,
    {
        Self::write(MessageKind::Error, msg)
    }

    /// Writes a warning message once. See [`Self::write_once`] for more info.
    pub fn warn_once<S>(id: usize, msg: S) -> bool
    where
        S: AsRef<str>,
    {
        Self::write_once(id, MessageKind::Warning, msg)
    }

    /// Sets verbosity level.
    pub fn set_verbosity(kind: MessageKind) {
        LOG.lock().verbosity = kind;
    }

    /// Enables or disables console output. Listeners are notified regardless.
    pub fn set_console_output(enabled: bool) {
        LOG.lock().console = enabled;
    }

    /// Adds a listener that will receive a copy of every message passed into the log.
    pub fn add_listener(listener: Sender<LogMessage>) {
        LOG.lock().listeners.push(listener)
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log::Log::info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log::Log::warn(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::log::Log::err(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn_once {
    ($id:expr, $($arg:tt)*) => {
        $crate::log::Log::warn_once($id, format!($($arg)*))
    };
}

#[cfg(test)]
mod test {
    use super::{Log, MessageKind};
    use std::sync::mpsc::channel;

    #[test]
    fn test_listener_receives_messages() {
        let (sender, receiver) = channel();
        Log::add_listener(sender);
        Log::err("listener check");
        let received = receiver
            .try_iter()
            .any(|m| m.kind == MessageKind::Error && m.content == "listener check");
        assert!(received);
    }

    #[test]
    fn test_write_once_suppresses_repeats() {
        let id = 0xdead_beef;
        assert!(Log::warn_once(id, "repeated"));
        assert!(!Log::warn_once(id, "repeated"));
        assert!(Log::warn_once(id, "changed"));
    }

    #[test]
    fn test_message_kind_order() {
        assert!(MessageKind::Information < MessageKind::Warning);
        assert!(MessageKind::Warning < MessageKind::Error);
    }
}
