use super::{Evaluator, Listing, Operation, Stack, Val, Var};
use crate::error;
use crate::io::{PortIo, Terminal};
use crate::lang::{
    is_identifier, lex, parse, split_condition, Error, Line, LineNumber, Literal, Operator, Token,
    Word, MAX_LINE_NUMBER,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// The ready signal.
pub const READY: &str = "OK";

const BANNER: [&str; 2] = [
    "ALTAIR BASIC VERSION 4.0",
    "COPYRIGHT 1975 BY MITS AND BILL GATES",
];

/// Where the runtime stands after a call to `execute`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Event {
    /// Back at the prompt.
    Stopped,
    /// The statement budget ran out with the program still running.
    Running,
    /// Suspended until a line of input arrives.
    Input,
}

#[derive(Debug)]
struct LoopFrame {
    var: Rc<str>,
    end: f64,
    cursor: usize,
}

#[derive(Debug)]
struct CallFrame {
    cursor: usize,
    direct: bool,
}

#[derive(Debug)]
struct PendingInput {
    var: Rc<str>,
    direct: bool,
}

/// ## BASIC interpreter
///
/// Holds the program store, variables and both control stacks. The cursor
/// indexes the sorted line list and names the next statement to run; jumps
/// overwrite it and `execute` keeps stepping until the program stops.
pub struct Runtime {
    listing: Listing,
    var: Var,
    loops: Stack<LoopFrame>,
    calls: Stack<CallFrame>,
    cursor: usize,
    line: LineNumber,
    running: bool,
    pending: Option<PendingInput>,
    interrupted: bool,
    echo: bool,
    rng: StdRng,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime {
            listing: Listing::default(),
            var: Var::new(),
            loops: Stack::new("FOR LOOPS"),
            calls: Stack::new("GOSUB CALLS"),
            cursor: 0,
            line: None,
            running: false,
            pending: None,
            interrupted: false,
            echo: true,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    /// Whether INPUT replies are printed back after they are read.
    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    /// Makes RND repeatable.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn var(&self) -> &Var {
        &self.var
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn banner<T: Terminal>(&self, io: &mut PortIo<T>) {
        for line in BANNER.iter() {
            io.terminal_mut().println(line);
        }
        io.terminal_mut().println(READY);
    }

    /// Requests a stop. Takes effect at the next `execute`.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Stops without printing anything. The program store survives.
    pub fn halt(&mut self) {
        self.running = false;
        self.pending = None;
        self.interrupted = false;
        self.line = None;
    }

    /// Handles one typed line: an answer to a pending INPUT, a numbered
    /// line for the store, or a direct statement.
    pub fn enter<T: Terminal>(&mut self, s: &str, io: &mut PortIo<T>) {
        if self.pending.is_some() {
            let mut bytes = s.as_bytes().to_vec();
            bytes.push(b'\n');
            io.enqueue(&bytes);
            self.resume(io);
            return;
        }
        let line = match Line::new(s) {
            Ok(line) => line,
            Err(error) => {
                self.line = None;
                self.report(error, io);
                return;
            }
        };
        match line {
            Line::Empty => {}
            Line::Indirect(line_number, text) => {
                self.listing.insert(line_number, text);
            }
            Line::Delete(line_number) => {
                self.listing.remove(line_number);
            }
            Line::Direct(tokens) => {
                self.line = None;
                self.statement(&tokens, true, io);
            }
        }
    }

    /// Completes a pending INPUT from the queued console line.
    /// Does nothing until input has been queued.
    pub fn resume<T: Terminal>(&mut self, io: &mut PortIo<T>) {
        if self.pending.is_none() || io.pending_input() == 0 {
            return;
        }
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => return,
        };
        let text = io.read_line();
        let text = text.trim();
        if self.echo {
            io.terminal_mut().println(text);
        }
        self.var.store(&pending.var, Val::from_input(text));
        tracing::debug!(var = %pending.var, direct = pending.direct, "input resumed");
    }

    /// Runs up to `cycles` statements of a running program.
    pub fn execute<T: Terminal>(&mut self, cycles: usize, io: &mut PortIo<T>) -> Event {
        if self.interrupted {
            self.interrupted = false;
            if self.running || self.pending.is_some() {
                self.r#break(io);
            }
        }
        for _ in 0..cycles {
            if self.pending.is_some() {
                return Event::Input;
            }
            if !self.running {
                return Event::Stopped;
            }
            self.step(io);
        }
        if self.pending.is_some() {
            Event::Input
        } else if self.running {
            Event::Running
        } else {
            Event::Stopped
        }
    }

    fn step<T: Terminal>(&mut self, io: &mut PortIo<T>) {
        let (line_number, text) = match self.listing.line(self.cursor) {
            Some((line_number, text)) => (line_number, text.to_string()),
            None => {
                self.line = None;
                self.ready(io);
                return;
            }
        };
        self.line = Some(line_number);
        self.cursor += 1;
        let tokens = lex(&text);
        self.statement(&tokens, false, io);
    }

    fn statement<T: Terminal>(&mut self, tokens: &[Token], direct: bool, io: &mut PortIo<T>) {
        if let Err(error) = self.dispatch(tokens, direct, io) {
            let fatal = error.is_fatal();
            self.report(error, io);
            if fatal && self.running {
                self.ready(io);
            }
        }
    }

    fn report<T: Terminal>(&self, error: Error, io: &mut PortIo<T>) {
        let error = error.in_line_number(self.line);
        io.terminal_mut().error(&format!("?{}", error));
    }

    fn ready<T: Terminal>(&mut self, io: &mut PortIo<T>) {
        if self.running {
            tracing::debug!(line = ?self.line, "program stopped");
        }
        self.running = false;
        io.terminal_mut().println(READY);
    }

    fn jump(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.running = true;
    }

    fn dispatch<T: Terminal>(
        &mut self,
        tokens: &[Token],
        direct: bool,
        io: &mut PortIo<T>,
    ) -> Result<()> {
        let (first, rest) = match tokens.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        let word = match first {
            Token::Word(word) => *word,
            _ => return self.r#let(tokens, io),
        };
        use Word::*;
        match word {
            Print => self.r#print(rest, io),
            Input => self.r#input(rest, direct, io),
            Let => self.r#let(rest, io),
            If => self.r#if(rest, direct, io),
            Goto => self.r#goto(rest),
            Gosub => self.r#gosub(rest, direct),
            Return => self.r#return(io),
            For => self.r#for(rest, direct, io),
            Next => self.r#next(rest, direct),
            End => {
                self.ready(io);
                Ok(())
            }
            Dim => self.r#dim(rest, io),
            List | Run | New if !direct => Err(error!(SyntaxError; "COMMAND NOT ALLOWED IN PROGRAM")),
            List => self.r#list(rest, io),
            Run => self.r#run(rest),
            New => {
                self.new_program(io);
                Ok(())
            }
            Then | To => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    /// Evaluates an expression. Errors are reported and read as 0.
    fn value<T: Terminal>(&mut self, tokens: &[Token], io: &mut PortIo<T>) -> Val {
        match self.evaluate(tokens) {
            Ok(val) => val,
            Err(error) => {
                self.report(error, io);
                Val::Number(0.0)
            }
        }
    }

    fn evaluate(&mut self, tokens: &[Token]) -> Result<Val> {
        let expr = parse(tokens)?;
        Evaluator::new(&self.var, &mut self.rng).eval(&expr)
    }

    fn condition<T: Terminal>(&mut self, tokens: &[Token], io: &mut PortIo<T>) -> bool {
        let (lhs, op, rhs) = match split_condition(tokens) {
            Some(split) => split,
            None => return false,
        };
        let lhs = self.value(lhs, io);
        let rhs = self.value(rhs, io);
        match Operation::compare(op, lhs, rhs) {
            Ok(b) => b,
            Err(error) => {
                self.report(error, io);
                false
            }
        }
    }

    fn target(&self, tokens: &[Token]) -> Result<usize> {
        let line_number = match tokens {
            [token] => token.line_number(),
            _ => None,
        };
        let line_number = match line_number {
            Some(line_number) => line_number,
            None => return Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        };
        match self.listing.position(line_number) {
            Some(cursor) => Ok(cursor),
            None => Err(error!(UndefinedLine)),
        }
    }

    fn r#print<T: Terminal>(&mut self, tokens: &[Token], io: &mut PortIo<T>) -> Result<()> {
        let mut out = String::new();
        let mut start = 0;
        for index in 0..=tokens.len() {
            let separator = tokens.get(index);
            match separator {
                None | Some(Token::Comma) | Some(Token::Semicolon) => {}
                _ => continue,
            }
            let mut span = &tokens[start..index];
            while let [Token::Literal(Literal::String(s)), rest @ ..] = span {
                out.push_str(s);
                span = rest;
            }
            if !span.is_empty() {
                let val = self.value(span, io);
                out.push_str(&val.to_string());
            }
            if let Some(Token::Comma) = separator {
                out.push(' ');
            }
            start = index + 1;
        }
        if let Some(Token::Semicolon) = tokens.last() {
            io.terminal_mut().print(&out);
        } else {
            io.terminal_mut().println(&out);
        }
        Ok(())
    }

    fn r#input<T: Terminal>(
        &mut self,
        tokens: &[Token],
        direct: bool,
        io: &mut PortIo<T>,
    ) -> Result<()> {
        let mut tokens = tokens;
        if let [Token::Literal(Literal::String(prompt)), Token::Semicolon | Token::Comma, rest @ ..] =
            tokens
        {
            io.terminal_mut().print(prompt);
            tokens = rest;
        }
        let name = match tokens {
            [Token::Ident(name)] if is_identifier(name) => name,
            _ => return Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        };
        io.terminal_mut().print("? ");
        self.pending = Some(PendingInput {
            var: name.as_str().into(),
            direct,
        });
        tracing::debug!(var = %name, line = ?self.line, "waiting for input");
        Ok(())
    }

    fn r#let<T: Terminal>(&mut self, tokens: &[Token], io: &mut PortIo<T>) -> Result<()> {
        let eq = match tokens
            .iter()
            .position(|t| *t == Token::Operator(Operator::Equal))
        {
            Some(eq) => eq,
            None => return Err(error!(SyntaxError; "EXPECTED =")),
        };
        let (target, expr) = (&tokens[..eq], &tokens[eq + 1..]);
        match target {
            [Token::Ident(name)] if is_identifier(name) => {
                let val = self.value(expr, io);
                self.var.store(name, val);
                Ok(())
            }
            [Token::Ident(name), Token::LParen, index @ .., Token::RParen]
                if is_identifier(name) && !index.is_empty() =>
            {
                if self.var.array_len(name).is_none() {
                    return Err(error!(SubscriptOutOfRange; "UNDIMENSIONED ARRAY"));
                }
                let index = self.value(index, io);
                let val = self.value(expr, io);
                self.var.store_array(name, index, val)
            }
            _ => Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        }
    }

    fn r#if<T: Terminal>(
        &mut self,
        tokens: &[Token],
        direct: bool,
        io: &mut PortIo<T>,
    ) -> Result<()> {
        let then = match tokens.iter().position(|t| t.is_word(Word::Then)) {
            Some(then) => then,
            None => return Err(error!(SyntaxError; "EXPECTED THEN")),
        };
        let (predicate, action) = (&tokens[..then], &tokens[then + 1..]);
        if !self.condition(predicate, io) {
            return Ok(());
        }
        match action {
            [token] if token.line_number().is_some() => self.r#goto(action),
            _ => self.dispatch(action, direct, io),
        }
    }

    fn r#goto(&mut self, tokens: &[Token]) -> Result<()> {
        let cursor = self.target(tokens)?;
        self.jump(cursor);
        Ok(())
    }

    fn r#gosub(&mut self, tokens: &[Token], direct: bool) -> Result<()> {
        let cursor = self.target(tokens)?;
        self.calls.push(CallFrame {
            cursor: self.cursor,
            direct,
        })?;
        self.jump(cursor);
        Ok(())
    }

    fn r#return<T: Terminal>(&mut self, io: &mut PortIo<T>) -> Result<()> {
        match self.calls.pop() {
            None => Err(error!(ReturnWithoutGosub)),
            Some(frame) if frame.direct => {
                self.ready(io);
                Ok(())
            }
            Some(frame) => {
                self.jump(frame.cursor);
                Ok(())
            }
        }
    }

    fn r#for<T: Terminal>(
        &mut self,
        tokens: &[Token],
        direct: bool,
        io: &mut PortIo<T>,
    ) -> Result<()> {
        if direct {
            return Err(error!(IllegalDirect));
        }
        let eq = tokens
            .iter()
            .position(|t| *t == Token::Operator(Operator::Equal));
        let to = tokens.iter().position(|t| t.is_word(Word::To));
        let (eq, to) = match (eq, to) {
            (Some(eq), Some(to)) if eq < to => (eq, to),
            _ => return Err(error!(SyntaxError; "EXPECTED = AND TO")),
        };
        let name: Rc<str> = match &tokens[..eq] {
            [Token::Ident(name)] if is_identifier(name) => name.as_str().into(),
            _ => return Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        };
        let start = self.value(&tokens[eq + 1..to], io);
        let end = self.value(&tokens[to + 1..], io).number()?;
        start.number()?;
        self.var.store(&name, start);
        self.loops.retain(|frame| frame.var != name);
        self.loops.push(LoopFrame {
            var: name,
            end,
            cursor: self.cursor,
        })
    }

    fn r#next(&mut self, tokens: &[Token], direct: bool) -> Result<()> {
        if direct {
            return Err(error!(IllegalDirect));
        }
        let index = match tokens {
            [] => self.loops.len().checked_sub(1),
            [Token::Ident(name)] => self.loops.position(|frame| *frame.var == **name),
            _ => return Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        };
        let (var, end, cursor) = match index.and_then(|index| self.loops.get(index)) {
            Some(frame) => (frame.var.clone(), frame.end, frame.cursor),
            None => return Err(error!(NextWithoutFor)),
        };
        let value = self.var.fetch(&var).number()? + 1.0;
        self.var.store(&var, Val::Number(value));
        if value <= end {
            self.cursor = cursor;
        } else if let Some(index) = index {
            self.loops.remove(index);
        }
        Ok(())
    }

    fn r#dim<T: Terminal>(&mut self, tokens: &[Token], io: &mut PortIo<T>) -> Result<()> {
        let mut depth = 0;
        let mut start = 0;
        for index in 0..=tokens.len() {
            let split = match tokens.get(index) {
                None => true,
                Some(Token::Comma) => depth == 0,
                Some(Token::LParen) => {
                    depth += 1;
                    false
                }
                Some(Token::RParen) => {
                    depth -= 1;
                    false
                }
                _ => false,
            };
            if !split {
                continue;
            }
            match &tokens[start..index] {
                [Token::Ident(name), Token::LParen, size @ .., Token::RParen]
                    if is_identifier(name) && !size.is_empty() =>
                {
                    let size = self.value(size, io);
                    self.var.dimension_array(name, size)?;
                }
                _ => return Err(error!(SyntaxError; "EXPECTED ARRAY")),
            }
            start = index + 1;
        }
        Ok(())
    }

    fn r#list<T: Terminal>(&mut self, tokens: &[Token], io: &mut PortIo<T>) -> Result<()> {
        let number = |token: &Token| match token.line_number() {
            Some(line_number) => Ok(line_number),
            None => Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        };
        let dash = Token::Operator(Operator::Minus);
        let (from, to) = match tokens {
            [] => (0, MAX_LINE_NUMBER),
            [n] => (number(n)?, number(n)?),
            [n, d] if *d == dash => (number(n)?, MAX_LINE_NUMBER),
            [d, m] if *d == dash => (0, number(m)?),
            [n, d, m] if *d == dash => (number(n)?, number(m)?),
            _ => return Err(error!(SyntaxError; "EXPECTED LINE RANGE")),
        };
        if from <= to {
            for line in self.listing.lines(from..=to) {
                io.terminal_mut().println(&line);
            }
        }
        self.ready(io);
        Ok(())
    }

    fn r#run(&mut self, tokens: &[Token]) -> Result<()> {
        let cursor = match tokens {
            [] => 0,
            _ => self.target(tokens)?,
        };
        self.var.clear();
        self.loops.clear();
        self.calls.clear();
        self.jump(cursor);
        tracing::debug!(lines = self.listing.len(), "run");
        Ok(())
    }

    fn new_program<T: Terminal>(&mut self, io: &mut PortIo<T>) {
        self.listing.clear();
        self.var.clear();
        self.loops.clear();
        self.calls.clear();
        self.cursor = 0;
        self.halt();
        io.terminal_mut().println(READY);
    }

    fn r#break<T: Terminal>(&mut self, io: &mut PortIo<T>) {
        let waiting = self.pending.take().is_some();
        if waiting {
            io.clear_input();
            io.terminal_mut().println("");
        }
        match self.line {
            Some(line_number) if self.running => {
                io.terminal_mut().println(&format!("BREAK IN {}", line_number))
            }
            _ => io.terminal_mut().println("BREAK"),
        }
        self.ready(io);
    }
}
