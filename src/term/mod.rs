extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::altair::{Altair, Config};
use crate::io::Terminal;
use crate::mach::Event;
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const CPU_STEPS: usize = 1000;
const BASIC_STATEMENTS: usize = 5000;

pub fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(interrupted) {
        eprintln!("{}", error);
    }
}

fn main_loop(interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let interface = Arc::new(Interface::new("ALTAIR")?);
    interface.set_report_signal(Signal::Interrupt, true);
    // Line editing already shows what was typed.
    let config = Config {
        echo: false,
        ..Config::default()
    };
    let mut altair = Altair::with_config(config, LineTerminal::new(interface.clone()));
    altair.load_basic();

    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            altair.interrupt();
        }
        altair.tick(CPU_STEPS);
        let event = altair.execute(BASIC_STATEMENTS);
        if let Some(error) = altair.io.terminal_mut().failure.take() {
            return Err(error);
        }
        match event {
            Event::Running => {}
            Event::Stopped | Event::Input => {
                let prompt = altair.io.terminal_mut().take_partial();
                interface.set_prompt(&prompt)?;
                match interface.read_line()? {
                    ReadResult::Input(string) => {
                        altair.enter(&string);
                        if event == Event::Stopped && !string.trim().is_empty() {
                            interface.add_history_unique(string);
                        }
                    }
                    ReadResult::Signal(Signal::Interrupt) => {
                        interface.set_buffer("")?;
                        altair.interrupt();
                    }
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                }
            }
        }
    }
    Ok(())
}

/// Writes whole lines through the line editor. A trailing partial line is
/// held back so it can become the next prompt.
struct LineTerminal {
    interface: Arc<Interface<DefaultTerminal>>,
    partial: String,
    failure: Option<std::io::Error>,
}

impl LineTerminal {
    fn new(interface: Arc<Interface<DefaultTerminal>>) -> LineTerminal {
        LineTerminal {
            interface,
            partial: String::new(),
            failure: None,
        }
    }

    fn take_partial(&mut self) -> String {
        std::mem::take(&mut self.partial)
    }

    fn write(&mut self, args: std::fmt::Arguments) {
        if let Err(error) = self.interface.write_fmt(args) {
            if self.failure.is_none() {
                self.failure = Some(error);
            }
        }
    }
}

impl Terminal for LineTerminal {
    fn print(&mut self, text: &str) {
        self.partial.push_str(text);
        if let Some(end) = self.partial.rfind('\n') {
            let complete: String = self.partial.drain(..=end).collect();
            self.write(format_args!("{}", complete));
        }
    }

    fn error(&mut self, text: &str) {
        let partial = self.take_partial();
        if !partial.is_empty() {
            self.write(format_args!("{}\n", partial));
        }
        self.write(format_args!("{}\n", Style::new().bold().paint(text)));
    }

    fn clear(&mut self) {
        self.partial.clear();
    }
}
