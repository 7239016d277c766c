// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tokenizing parameterized strings
//!
//! A template is compiled once into a flat list of operations. Conditional
//! jumps are resolved at compile time, which also rejects unbalanced
//! `%?`/`%t`/`%e`/`%;` structures before anything is executed.

use std::{fmt, ops::Range};

use crate::expand::{Error, Parameter};

/// printf-style conversions supported by `%d`, `%o`, `%x`, `%X` and `%s`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    Decimal,
    Octal,
    LowerHex,
    UpperHex,
    String,
}

impl Conversion {
    const fn from_byte(c: u8) -> Option<Self> {
        match c {
            b'd' => Some(Self::Decimal),
            b'o' => Some(Self::Octal),
            b'x' => Some(Self::LowerHex),
            b'X' => Some(Self::UpperHex),
            b's' => Some(Self::String),
            _ => None,
        }
    }

    pub(crate) const fn symbol(self) -> char {
        match self {
            Self::Decimal => 'd',
            Self::Octal => 'o',
            Self::LowerHex => 'x',
            Self::UpperHex => 'X',
            Self::String => 's',
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Flags {
    pub(crate) width: u16,
    pub(crate) precision: Option<u16>,
    pub(crate) alternate: bool,
    pub(crate) left: bool,
    /// Pad numbers with zeros instead of spaces
    pub(crate) zero: bool,
    pub(crate) sign: bool,
    pub(crate) space: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    BitAnd,
    BitOr,
    BitXor,
    Equal,
    Greater,
    Less,
    And,
    Or,
}

impl BinaryOp {
    const fn from_byte(c: u8) -> Option<Self> {
        Some(match c {
            b'+' => Self::Add,
            b'-' => Self::Subtract,
            b'*' => Self::Multiply,
            b'/' => Self::Divide,
            b'm' => Self::Modulo,
            b'&' => Self::BitAnd,
            b'|' => Self::BitOr,
            b'^' => Self::BitXor,
            b'=' => Self::Equal,
            b'>' => Self::Greater,
            b'<' => Self::Less,
            b'A' => Self::And,
            b'O' => Self::Or,
            _ => return None,
        })
    }

    pub(crate) const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Modulo => 'm',
            Self::BitAnd => '&',
            Self::BitOr => '|',
            Self::BitXor => '^',
            Self::Equal => '=',
            Self::Greater => '>',
            Self::Less => '<',
            Self::And => 'A',
            Self::Or => 'O',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Not,
    Complement,
}

/// Variable slot: `A`-`Z` are static, `a`-`z` are dynamic
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Variable {
    Static(usize),
    Dynamic(usize),
}

impl Variable {
    fn parse(c: u8) -> Result<Self, Error> {
        match c {
            b'A'..=b'Z' => Ok(Self::Static(usize::from(c - b'A'))),
            b'a'..=b'z' => Ok(Self::Dynamic(usize::from(c - b'a'))),
            _ => Err(Error::InvalidVariableName(c as char)),
        }
    }

    const fn name(self) -> char {
        match self {
            Self::Static(slot) => (b'A' + slot as u8) as char,
            Self::Dynamic(slot) => (b'a' + slot as u8) as char,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op<'a> {
    Literal(&'a [u8]),
    Percent,
    Format(Conversion, Flags),
    Char,
    /// Zero-based parameter index
    PushParam(usize),
    SetVar(Variable),
    GetVar(Variable),
    Constant(i32),
    Length,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Increment,
    If,
    /// Jumps to `target` if the popped condition is false
    Then {
        target: usize,
    },
    /// Reached at the end of a taken branch, jumps to `target`
    Else {
        target: usize,
    },
    EndIf,
}

#[derive(Clone, Debug)]
struct Token<'a> {
    op: Op<'a>,
    span: Range<usize>,
}

#[derive(Default)]
struct Frame {
    pending_then: Vec<usize>,
    elses: Vec<usize>,
}

/// Compiled parameterized string
#[derive(Clone, Debug)]
pub struct Template<'a> {
    source: &'a [u8],
    tokens: Vec<Token<'a>>,
}

impl<'a> Template<'a> {
    /// Tokenize `source` and resolve its conditionals
    pub fn compile(source: &'a [u8]) -> Result<Self, Error> {
        let mut lexer = Lexer {
            source,
            position: 0,
        };
        let mut tokens: Vec<Token<'a>> = Vec::new();
        let mut open: Vec<Frame> = Vec::new();

        while let Some(token) = lexer.next_token()? {
            let index = tokens.len();
            match token.op {
                Op::If => open.push(Frame::default()),
                Op::Then { .. } => {
                    let frame = open.last_mut().ok_or(Error::UnbalancedConditional('t'))?;
                    frame.pending_then.push(index);
                }
                Op::Else { .. } => {
                    let frame = open.last_mut().ok_or(Error::UnbalancedConditional('e'))?;
                    for then in frame.pending_then.drain(..) {
                        set_target(&mut tokens, then, index + 1);
                    }
                    frame.elses.push(index);
                }
                Op::EndIf => {
                    let frame = open.pop().ok_or(Error::UnbalancedConditional(';'))?;
                    for jump in frame.pending_then.into_iter().chain(frame.elses) {
                        set_target(&mut tokens, jump, index + 1);
                    }
                }
                _ => {}
            }
            tokens.push(token);
        }

        if !open.is_empty() {
            return Err(Error::UnterminatedConditional);
        }
        Ok(Self { source, tokens })
    }

    #[must_use]
    pub const fn source(&self) -> &'a [u8] {
        self.source
    }

    pub(crate) fn op(&self, index: usize) -> Option<&Op<'a>> {
        self.tokens.get(index).map(|token| &token.op)
    }

    /// Number and expected types of the arguments the template reads
    #[must_use]
    pub fn signature(&self) -> Signature {
        let mut hints: Vec<Hint> = Vec::new();
        for (index, token) in self.tokens.iter().enumerate() {
            let Op::PushParam(param) = token.op else {
                continue;
            };
            if hints.len() <= param {
                hints.resize(param + 1, Hint::Unused);
            }
            let next = self.op(index + 1);
            hints[param] = hints[param].merge(consumer_type(next));
        }
        Signature {
            expected: hints.into_iter().map(Hint::known).collect(),
        }
    }

    /// Describe every non-literal element of the template
    #[must_use]
    pub fn parameters(&self) -> Vec<ParameterInfo> {
        self.tokens
            .iter()
            .filter_map(|token| {
                let kind = ParameterKind::of(&token.op)?;
                Some(ParameterInfo {
                    representation: String::from_utf8_lossy(&self.source[token.span.clone()])
                        .into_owned(),
                    position: token.span.start,
                    kind,
                })
            })
            .collect()
    }
}

fn set_target(tokens: &mut [Token<'_>], index: usize, jump: usize) {
    if let Some(Token {
        op: Op::Then { target } | Op::Else { target },
        ..
    }) = tokens.get_mut(index)
    {
        *target = jump;
    }
}

/// Type an operation expects from the value pushed right before it
const fn consumer_type(op: Option<&Op<'_>>) -> Option<ArgumentType> {
    match op {
        Some(Op::Format(Conversion::String, _) | Op::Length) => Some(ArgumentType::String),
        Some(Op::Format(..) | Op::Char | Op::Binary(_) | Op::Unary(_) | Op::Then { .. }) => {
            Some(ArgumentType::Number)
        }
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Hint {
    Unused,
    Untyped,
    Known(ArgumentType),
    Mixed,
}

impl Hint {
    const fn merge(self, observed: Option<ArgumentType>) -> Self {
        match (self, observed) {
            (Self::Mixed, _) => Self::Mixed,
            (Self::Unused | Self::Untyped, None) => Self::Untyped,
            (Self::Unused | Self::Untyped, Some(kind)) => Self::Known(kind),
            (Self::Known(kind), None) => Self::Known(kind),
            (Self::Known(ArgumentType::Number), Some(ArgumentType::Number))
            | (Self::Known(ArgumentType::String), Some(ArgumentType::String)) => self,
            (Self::Known(_), Some(_)) => Self::Mixed,
        }
    }

    const fn known(self) -> Option<ArgumentType> {
        match self {
            Self::Known(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Argument type a template expects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentType {
    /// Numbers and booleans
    Number,
    String,
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Number => "number",
            Self::String => "string",
        })
    }
}

/// Formal parameters of a template
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    /// One entry per parameter up to the highest `%pN`, `None` when untyped
    expected: Vec<Option<ArgumentType>>,
}

impl Signature {
    /// Highest parameter number referenced by `%pN`
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.expected.len()
    }

    /// Expected type of the zero-based parameter `index`
    #[must_use]
    pub fn expected(&self, index: usize) -> Option<ArgumentType> {
        self.expected.get(index).copied().flatten()
    }

    /// Reject argument lists that are too short or of the wrong type
    pub fn check(&self, params: &[Parameter]) -> Result<(), Error> {
        if params.len() < self.arity() {
            return Err(Error::MissingArgument {
                expected: self.arity(),
                supplied: params.len(),
            });
        }
        for (index, (expected, param)) in self.expected.iter().zip(params).enumerate() {
            if let Some(expected) = *expected
                && param.argument_type() != expected
            {
                return Err(Error::ArgumentType {
                    index: index + 1,
                    expected,
                });
            }
        }
        Ok(())
    }
}

/// Kind of a template element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterKind {
    /// `%%`
    Percent,
    /// `%d`, `%o`, `%x`, `%X`, `%s` with optional flags
    Format,
    /// `%c`
    PopChar,
    /// `%p1`..`%p9`, one-based
    PushParam(u8),
    SetVariable(char),
    GetVariable(char),
    /// `%'c'` or `%{nn}`
    Constant,
    /// `%l`
    StringLength,
    /// Binary or unary operator
    Operator(char),
    /// `%i`
    Increment,
    If,
    Then,
    Else,
    EndIf,
}

impl ParameterKind {
    const fn of(op: &Op<'_>) -> Option<Self> {
        Some(match *op {
            Op::Literal(_) => return None,
            Op::Percent => Self::Percent,
            Op::Format(..) => Self::Format,
            Op::Char => Self::PopChar,
            Op::PushParam(index) => Self::PushParam(index as u8 + 1),
            Op::SetVar(variable) => Self::SetVariable(variable.name()),
            Op::GetVar(variable) => Self::GetVariable(variable.name()),
            Op::Constant(_) => Self::Constant,
            Op::Length => Self::StringLength,
            Op::Binary(op) => Self::Operator(op.symbol()),
            Op::Unary(UnaryOp::Not) => Self::Operator('!'),
            Op::Unary(UnaryOp::Complement) => Self::Operator('~'),
            Op::Increment => Self::Increment,
            Op::If => Self::If,
            Op::Then { .. } => Self::Then,
            Op::Else { .. } => Self::Else,
            Op::EndIf => Self::EndIf,
        })
    }
}

/// One element of a template, as written
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterInfo {
    pub representation: String,
    /// Byte offset of the leading `%`
    pub position: usize,
    pub kind: ParameterKind,
}

struct Lexer<'a> {
    source: &'a [u8],
    position: usize,
}

impl<'a> Lexer<'a> {
    fn bump(&mut self) -> Result<u8, Error> {
        let c = *self
            .source
            .get(self.position)
            .ok_or(Error::IncompleteEscape)?;
        self.position += 1;
        Ok(c)
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, Error> {
        let start = self.position;
        let Some(rest) = self.source.get(start..).filter(|rest| !rest.is_empty()) else {
            return Ok(None);
        };
        let op = if rest[0] == b'%' {
            self.position += 1;
            self.escape()?
        } else {
            let length = rest.iter().position(|c| *c == b'%').unwrap_or(rest.len());
            self.position += length;
            Op::Literal(&rest[..length])
        };
        Ok(Some(Token {
            op,
            span: start..self.position,
        }))
    }

    /// Parse what follows a `%`
    fn escape(&mut self) -> Result<Op<'a>, Error> {
        let c = self.bump()?;
        if let Some(conversion) = Conversion::from_byte(c) {
            return Ok(Op::Format(conversion, Flags::default()));
        }
        if let Some(op) = BinaryOp::from_byte(c) {
            return Ok(Op::Binary(op));
        }
        let op = match c {
            b'%' => Op::Percent,
            b'c' => Op::Char,
            b'p' => match self.bump()? {
                index @ b'1'..=b'9' => Op::PushParam(usize::from(index - b'1')),
                index => return Err(Error::InvalidParameterIndex(index as char)),
            },
            b'P' => Op::SetVar(Variable::parse(self.bump()?)?),
            b'g' => Op::GetVar(Variable::parse(self.bump()?)?),
            b'\'' => {
                let value = self.bump()?;
                if self.bump()? != b'\'' {
                    return Err(Error::MalformedCharacterConstant);
                }
                Op::Constant(i32::from(value))
            }
            b'{' => Op::Constant(self.integer()?),
            b'l' => Op::Length,
            b'!' => Op::Unary(UnaryOp::Not),
            b'~' => Op::Unary(UnaryOp::Complement),
            b'i' => Op::Increment,
            b'?' => Op::If,
            b't' => Op::Then { target: 0 },
            b'e' => Op::Else { target: 0 },
            b';' => Op::EndIf,
            b':' | b'#' | b' ' | b'.' | b'0'..=b'9' => self.format_spec(c)?,
            c => return Err(Error::UnrecognizedFormatOption(c as char)),
        };
        Ok(op)
    }

    /// Digits of `%{nn}` up to the closing brace
    fn integer(&mut self) -> Result<i32, Error> {
        let mut value: i32 = 0;
        loop {
            match self.bump()? {
                b'}' => return Ok(value),
                digit @ b'0'..=b'9' => {
                    value = value
                        .checked_mul(10)
                        .and_then(|value| value.checked_add(i32::from(digit - b'0')))
                        .ok_or(Error::IntegerConstantOverflow)?;
                }
                _ => return Err(Error::MalformedIntegerConstant),
            }
        }
    }

    /// Flags, width and precision of a printf-style conversion
    fn format_spec(&mut self, first: u8) -> Result<Op<'a>, Error> {
        #[derive(Clone, Copy, PartialEq)]
        enum Stage {
            Flags,
            Width,
            Precision,
        }

        let mut flags = Flags::default();
        let mut stage = match first {
            b'#' => {
                flags.alternate = true;
                Stage::Flags
            }
            b' ' => {
                flags.space = true;
                Stage::Flags
            }
            b'.' => Stage::Precision,
            b'0' => {
                flags.zero = true;
                Stage::Flags
            }
            b'1'..=b'9' => {
                flags.width = u16::from(first - b'0');
                Stage::Width
            }
            _ => Stage::Flags,
        };

        loop {
            let c = self.bump()?;
            if let Some(conversion) = Conversion::from_byte(c) {
                return Ok(Op::Format(conversion, flags));
            }
            match (stage, c) {
                (Stage::Flags, b'#') => flags.alternate = true,
                (Stage::Flags, b'-') => flags.left = true,
                (Stage::Flags, b'+') => flags.sign = true,
                (Stage::Flags, b' ') => flags.space = true,
                (Stage::Flags, b'0') => flags.zero = true,
                (Stage::Flags, b'1'..=b'9') => {
                    flags.width = u16::from(c - b'0');
                    stage = Stage::Width;
                }
                (Stage::Width, b'0'..=b'9') => {
                    flags.width = flags
                        .width
                        .checked_mul(10)
                        .and_then(|width| width.checked_add(u16::from(c - b'0')))
                        .ok_or(Error::FormatWidthOverflow)?;
                }
                (Stage::Flags | Stage::Width, b'.') => stage = Stage::Precision,
                (Stage::Precision, b'0'..=b'9') => {
                    let precision = flags
                        .precision
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|precision| precision.checked_add(u16::from(c - b'0')))
                        .ok_or(Error::FormatPrecisionOverflow)?;
                    flags.precision = Some(precision);
                }
                _ => return Err(Error::UnrecognizedFormatOption(c as char)),
            }
        }
    }
}
