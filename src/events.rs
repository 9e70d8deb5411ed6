use crate::config;
use nix::sys::signal::{SigSet, Signal};
use std::io;
use std::sync::mpsc;
use std::thread;

use unsegen::input::Input;

use config::Config;

pub enum Event {
    Input(Input),
    Update,
    Resize,
}

/// Merges terminal input, awaited signals and periodic update ticks into one
/// ordered stream.
pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
    _signal_handle: thread::JoinHandle<()>,
}

fn forward_signals<W>(mut wait: W, tx: mpsc::Sender<Event>)
where
    W: FnMut() -> nix::Result<Signal>,
{
    loop {
        let event = match wait() {
            Ok(Signal::SIGWINCH) => Event::Resize,
            Ok(signal) => {
                log::debug!("Ignoring signal {}", signal);
                continue;
            }
            Err(err) => {
                log::warn!("Failed to wait for signals: {}", err);
                return;
            }
        };

        if tx.send(event).is_err() {
            return;
        }
    }
}

impl Dispatcher {
    /// `signals` are blocked for the calling thread and every thread spawned after
    /// this call, so must be called before any other threads are started.
    pub fn from_config(config: &Config, signals: SigSet) -> Dispatcher {
        if let Err(err) = signals.thread_block() {
            log::warn!("Unable to block signals: {}", err);
        }

        let tick_rate = config.tick_rate;
        let (tx, rx) = mpsc::channel();
        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for evt in Input::read_all(stdin) {
                    match evt {
                        Ok(input) => {
                            if tx.send(Event::Input(input)).is_err() {
                                return;
                            }
                        }
                        Err(err) => log::warn!("Failed to read input: {}", err),
                    }
                }
            })
        };
        let signal_handle = {
            let tx = tx.clone();
            thread::spawn(move || forward_signals(|| signals.wait(), tx))
        };
        let update_handle = thread::spawn(move || {
            while tx.send(Event::Update).is_ok() {
                thread::sleep(tick_rate);
            }
        });
        Dispatcher {
            rx,
            _input_handle: input_handle,
            _update_handle: update_handle,
            _signal_handle: signal_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
