use super::Terminal;
use std::collections::{BTreeMap, VecDeque};

/// Port where the serial console sits on a stock machine.
pub const CONSOLE_PORT: u8 = 0x01;

/// The I/O bus as seen by the CPU. Port numbers are separate from memory.
pub trait Io {
    fn input(&mut self, port: u8) -> u8;
    fn output(&mut self, port: u8, value: u8);
}

/// A handler attached to a single port.
pub trait Device {
    fn output(&mut self, value: u8);

    fn input(&mut self) -> u8 {
        0
    }
}

/// Port space with one port wired to a text terminal and an input FIFO.
/// Other ports go to attached devices or read as zero.
pub struct PortIo<T> {
    console: u8,
    terminal: T,
    queue: VecDeque<u8>,
    on_input: Option<Box<dyn FnOnce()>>,
    devices: BTreeMap<u8, Box<dyn Device>>,
}

impl<T: Terminal> PortIo<T> {
    pub fn new(terminal: T) -> PortIo<T> {
        PortIo::with_console_port(CONSOLE_PORT, terminal)
    }

    pub fn with_console_port(console: u8, terminal: T) -> PortIo<T> {
        PortIo {
            console,
            terminal,
            queue: VecDeque::new(),
            on_input: None,
            devices: BTreeMap::new(),
        }
    }

    pub fn console_port(&self) -> u8 {
        self.console
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    /// Attaches a handler, replacing any previous one on that port.
    /// The console port cannot be taken over.
    pub fn attach(&mut self, port: u8, device: Box<dyn Device>) -> bool {
        if port == self.console {
            return false;
        }
        self.devices.insert(port, device);
        true
    }

    pub fn detach(&mut self, port: u8) -> Option<Box<dyn Device>> {
        self.devices.remove(&port)
    }

    /// Queues console input. A registered resume callback fires once
    /// there is something to read.
    pub fn enqueue(&mut self, bytes: &[u8]) {
        self.queue.extend(bytes);
        if !self.queue.is_empty() {
            if let Some(callback) = self.on_input.take() {
                callback();
            }
        }
    }

    /// Registers a one-shot callback for when console input is available.
    /// Fires immediately if input is already waiting.
    pub fn on_input(&mut self, callback: Box<dyn FnOnce()>) {
        if self.queue.is_empty() {
            self.on_input = Some(callback);
        } else {
            callback();
        }
    }

    pub fn pending_input(&self) -> usize {
        self.queue.len()
    }

    pub fn clear_input(&mut self) {
        self.queue.clear();
        self.on_input = None;
    }

    /// Drains console input up to and including the next newline.
    pub fn read_line(&mut self) -> String {
        let mut bytes = vec![];
        while let Some(byte) = self.queue.pop_front() {
            if byte == b'\n' {
                break;
            }
            bytes.push(byte);
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl<T: Terminal> Io for PortIo<T> {
    fn input(&mut self, port: u8) -> u8 {
        if port == self.console {
            return self.queue.pop_front().unwrap_or(0);
        }
        match self.devices.get_mut(&port) {
            Some(device) => device.input(),
            None => 0,
        }
    }

    fn output(&mut self, port: u8, value: u8) {
        if port == self.console {
            let mut buf = [0; 4];
            self.terminal.print(char::from(value).encode_utf8(&mut buf));
            return;
        }
        if let Some(device) = self.devices.get_mut(&port) {
            device.output(value);
        }
    }
}

impl<T: Terminal + Default> Default for PortIo<T> {
    fn default() -> Self {
        PortIo::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Transcript;
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Latch(Rc<RefCell<Vec<u8>>>);

    impl Device for Latch {
        fn output(&mut self, value: u8) {
            self.0.borrow_mut().push(value);
        }

        fn input(&mut self) -> u8 {
            self.0.borrow().last().copied().unwrap_or(0)
        }
    }

    #[test]
    fn test_console_fifo() {
        let mut io = PortIo::new(Transcript::new());
        io.enqueue(b"AB");
        assert_eq!(io.input(CONSOLE_PORT), b'A');
        assert_eq!(io.input(CONSOLE_PORT), b'B');
        assert_eq!(io.input(CONSOLE_PORT), 0);
    }

    #[test]
    fn test_console_output() {
        let mut io = PortIo::new(Transcript::new());
        io.output(CONSOLE_PORT, b'H');
        io.output(CONSOLE_PORT, b'I');
        io.output(0x10, b'X');
        assert_eq!(io.terminal().as_str(), "HI");
    }

    #[test]
    fn test_devices() {
        let seen = Rc::new(RefCell::new(vec![]));
        let mut io = PortIo::new(Transcript::new());
        assert!(io.attach(0x20, Box::new(Latch(seen.clone()))));
        assert!(!io.attach(CONSOLE_PORT, Box::new(Latch(seen.clone()))));
        io.output(0x20, 7);
        assert_eq!(io.input(0x20), 7);
        assert_eq!(io.input(0x21), 0);
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_resume_callback_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let mut io = PortIo::new(Transcript::new());
        let f = fired.clone();
        io.on_input(Box::new(move || f.set(f.get() + 1)));
        assert_eq!(fired.get(), 0);
        io.enqueue(b"1\n");
        io.enqueue(b"2\n");
        assert_eq!(fired.get(), 1);
        assert_eq!(io.read_line(), "1");
        assert_eq!(io.read_line(), "2");
        assert_eq!(io.read_line(), "");
    }
}
