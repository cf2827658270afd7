#![allow(dead_code)]
use altair::io::{PortIo, Transcript};
use altair::mach::{Event, Runtime};

/// A runtime wired to an in-memory console.
pub struct Basic {
    pub runtime: Runtime,
    pub io: PortIo<Transcript>,
}

impl Basic {
    pub fn new() -> Basic {
        let mut runtime = Runtime::new();
        runtime.seed(1);
        Basic {
            runtime,
            io: PortIo::new(Transcript::new()),
        }
    }

    pub fn enter(&mut self, s: &str) {
        self.runtime.enter(s, &mut self.io);
    }

    pub fn program(&mut self, lines: &[&str]) {
        for line in lines {
            self.enter(line);
        }
    }
}

pub fn exec(basic: &mut Basic) -> String {
    exec_n(basic, 5000)
}

/// Drives the runtime until it stops or waits for input and returns
/// everything printed along the way.
pub fn exec_n(basic: &mut Basic, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = basic.runtime.execute(cycles, &mut basic.io);
        s.push_str(&basic.io.terminal_mut().take());
        match event {
            Event::Stopped | Event::Input => break,
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
                prev_running = true;
            }
        }
    }
    s
}
