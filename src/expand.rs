// Copyright 2019 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parameterized string expansion

use std::array::from_fn;

use tracing::trace;

use crate::{
    caps::CapabilityKind,
    template::{ArgumentType, BinaryOp, Conversion, Flags, Op, Template, UnaryOp, Variable},
};

/// Types of parameters a capability can use
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parameter {
    Number(i32),
    String(Vec<u8>),
    /// Behaves as the number 1 or 0
    Boolean(bool),
}

impl Parameter {
    #[must_use]
    pub const fn argument_type(&self) -> ArgumentType {
        match self {
            Self::Number(_) | Self::Boolean(_) => ArgumentType::Number,
            Self::String(_) => ArgumentType::String,
        }
    }

    const fn number(&self) -> Option<i32> {
        match *self {
            Self::Number(value) => Some(value),
            Self::Boolean(value) => Some(value as i32),
            Self::String(_) => None,
        }
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl From<i32> for Parameter {
    fn from(value: i32) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Parameter {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&[u8]> for Parameter {
    fn from(value: &[u8]) -> Self {
        Self::String(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Parameter {
    fn from(value: &[u8; N]) -> Self {
        Self::String(value.to_vec())
    }
}

impl From<Vec<u8>> for Parameter {
    fn from(value: Vec<u8>) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Self::String(value.as_bytes().to_vec())
    }
}

impl From<String> for Parameter {
    fn from(value: String) -> Self {
        Self::String(value.into_bytes())
    }
}

/// Errors reported when expanding a string
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("Capability {name} is a {kind}, not a string")]
    NotAString { name: String, kind: CapabilityKind },
    #[error("Template needs {expected} parameters, {supplied} supplied")]
    MissingArgument { expected: usize, supplied: usize },
    #[error("Parameter {index} should be a {expected}")]
    ArgumentType {
        index: usize,
        expected: ArgumentType,
    },
    #[error("Not enough stack elements for operator {0}")]
    StackUnderflow(char),
    #[error("Parameter type not expected by operator {0}")]
    TypeMismatch(char),
    #[error("Unrecognized format option: {0}")]
    UnrecognizedFormatOption(char),
    #[error("Invalid variable name: {0}")]
    InvalidVariableName(char),
    #[error("Invalid parameter index: {0}")]
    InvalidParameterIndex(char),
    #[error("Malformed character constant")]
    MalformedCharacterConstant,
    #[error("Integer constant too large")]
    IntegerConstantOverflow,
    #[error("Malformed integer constant")]
    MalformedIntegerConstant,
    #[error("Format width too large")]
    FormatWidthOverflow,
    #[error("Format precision too large")]
    FormatPrecisionOverflow,
    #[error("Format does not match parameter type")]
    FormatTypeMismatch,
    #[error("Template ends inside an escape")]
    IncompleteEscape,
    #[error("Conditional operator {0} outside of %?...%;")]
    UnbalancedConditional(char),
    #[error("Conditional not closed with %;")]
    UnterminatedConditional,
    #[error("Division by zero in operator {0}")]
    DivisionByZero(char),
}

/// Context for variable expansion
///
/// Holds the static variables `A`-`Z`, which keep their values between
/// expansions. Dynamic variables `a`-`z` start as zero on every call.
#[derive(Clone, Debug)]
pub struct ExpandContext {
    static_variables: [Parameter; 26],
}

impl ExpandContext {
    /// Create a context with all static variables set to zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            static_variables: from_fn(|_| Parameter::default()),
        }
    }

    /// Expand a parameterized string
    ///
    /// Padding markers such as `$<5>` are copied to the output unchanged.
    pub fn expand(&mut self, cap: &[u8], params: &[Parameter]) -> Result<Vec<u8>, Error> {
        let template = Template::compile(cap)?;
        self.run(&template, params)
    }

    /// Expand a template compiled earlier
    pub fn run(&mut self, template: &Template<'_>, params: &[Parameter]) -> Result<Vec<u8>, Error> {
        template.signature().check(params)?;
        trace!(
            template = %String::from_utf8_lossy(template.source()),
            params = params.len(),
            "expanding"
        );

        let mut machine = Machine {
            static_variables: &mut self.static_variables,
            dynamic_variables: from_fn(|_| Parameter::default()),
            params: params.to_vec(),
            incremented: false,
            stack: Vec::new(),
            output: Vec::with_capacity(template.source().len()),
        };
        let mut pc = 0;
        while let Some(op) = template.op(pc) {
            pc = machine.step(op, pc)?;
        }
        Ok(machine.finish())
    }
}

impl Default for ExpandContext {
    fn default() -> Self {
        Self::new()
    }
}

struct Machine<'c> {
    static_variables: &'c mut [Parameter; 26],
    dynamic_variables: [Parameter; 26],
    params: Vec<Parameter>,
    incremented: bool,
    stack: Vec<Parameter>,
    output: Vec<u8>,
}

impl Machine<'_> {
    fn pop(&mut self, op: char) -> Result<Parameter, Error> {
        self.stack.pop().ok_or(Error::StackUnderflow(op))
    }

    fn pop_number(&mut self, op: char) -> Result<i32, Error> {
        self.pop(op)?.number().ok_or(Error::TypeMismatch(op))
    }

    fn variable(&mut self, variable: Variable) -> &mut Parameter {
        match variable {
            Variable::Static(slot) => &mut self.static_variables[slot],
            Variable::Dynamic(slot) => &mut self.dynamic_variables[slot],
        }
    }

    /// Execute the operation at `pc`, return the next `pc`
    fn step(&mut self, op: &Op<'_>, pc: usize) -> Result<usize, Error> {
        match *op {
            Op::Literal(bytes) => self.output.extend_from_slice(bytes),
            Op::Percent => self.output.push(b'%'),
            Op::Char => {
                let c = self.pop_number('c')?;
                // NUL cannot be sent through C strings
                self.output.push(if c == 0 { 0x80 } else { c as u8 });
            }
            Op::Format(conversion, flags) => {
                let value = self.pop(conversion.symbol())?;
                let text = format(value, conversion, flags)?;
                self.output.extend(text);
            }
            Op::PushParam(index) => {
                let value = self
                    .params
                    .get(index)
                    .cloned()
                    .ok_or(Error::MissingArgument {
                        expected: index + 1,
                        supplied: self.params.len(),
                    })?;
                self.stack.push(value);
            }
            Op::SetVar(variable) => {
                let value = self.pop('P')?;
                *self.variable(variable) = value;
            }
            Op::GetVar(variable) => {
                let value = self.variable(variable).clone();
                self.stack.push(value);
            }
            Op::Constant(value) => self.stack.push(Parameter::Number(value)),
            Op::Length => match self.pop('l')? {
                Parameter::String(s) => self.stack.push(Parameter::Number(s.len() as i32)),
                _ => return Err(Error::TypeMismatch('l')),
            },
            Op::Binary(op) => {
                let symbol = op.symbol();
                let y = self.pop(symbol)?;
                let x = self.pop(symbol)?;
                let (Some(x), Some(y)) = (x.number(), y.number()) else {
                    return Err(Error::TypeMismatch(symbol));
                };
                self.stack.push(Parameter::Number(evaluate(op, x, y)?));
            }
            Op::Unary(UnaryOp::Not) => {
                let x = self.pop_number('!')?;
                self.stack.push(Parameter::Number(i32::from(x == 0)));
            }
            Op::Unary(UnaryOp::Complement) => {
                let x = self.pop_number('~')?;
                self.stack.push(Parameter::Number(!x));
            }
            Op::Increment => {
                if !self.incremented {
                    self.incremented = true;
                    for param in self.params.iter_mut().take(2) {
                        let value = param.number().ok_or(Error::TypeMismatch('i'))?;
                        *param = Parameter::Number(value.wrapping_add(1));
                    }
                }
            }
            Op::If | Op::EndIf => {}
            Op::Then { target } => {
                if self.pop_number('t')? == 0 {
                    return Ok(target);
                }
            }
            Op::Else { target } => return Ok(target),
        }
        Ok(pc + 1)
    }

    /// Output with whatever is still on the stack appended in push order
    fn finish(mut self) -> Vec<u8> {
        for value in self.stack.drain(..) {
            match value {
                Parameter::String(s) => self.output.extend(s),
                number => {
                    if let Some(n) = number.number() {
                        self.output.extend(n.to_string().into_bytes());
                    }
                }
            }
        }
        self.output
    }
}

/// Arithmetic wraps on overflow, logical results are 0 or 1
fn evaluate(op: BinaryOp, x: i32, y: i32) -> Result<i32, Error> {
    Ok(match op {
        BinaryOp::Add => x.wrapping_add(y),
        BinaryOp::Subtract => x.wrapping_sub(y),
        BinaryOp::Multiply => x.wrapping_mul(y),
        BinaryOp::Divide | BinaryOp::Modulo if y == 0 => {
            return Err(Error::DivisionByZero(op.symbol()));
        }
        BinaryOp::Divide => x.wrapping_div(y),
        BinaryOp::Modulo => x.wrapping_rem(y),
        BinaryOp::BitAnd => x & y,
        BinaryOp::BitOr => x | y,
        BinaryOp::BitXor => x ^ y,
        BinaryOp::Equal => i32::from(x == y),
        BinaryOp::Greater => i32::from(x > y),
        BinaryOp::Less => i32::from(x < y),
        BinaryOp::And => i32::from(x != 0 && y != 0),
        BinaryOp::Or => i32::from(x != 0 || y != 0),
    })
}

/// printf-style formatting of a single value
fn format(value: Parameter, conversion: Conversion, flags: Flags) -> Result<Vec<u8>, Error> {
    let text = match (value, conversion) {
        (Parameter::String(mut s), Conversion::String) => {
            if let Some(precision) = flags.precision {
                s.truncate(usize::from(precision));
            }
            s
        }
        (Parameter::String(_), _) | (_, Conversion::String) => {
            return Err(Error::FormatTypeMismatch);
        }
        (value, conversion) => {
            let n = value.number().ok_or(Error::FormatTypeMismatch)?;
            let text = format_number(n, conversion, flags);
            if flags.zero && !flags.left && flags.precision.is_none() {
                zero_fill(text, flags.width).into_bytes()
            } else {
                text.into_bytes()
            }
        }
    };
    Ok(justify(text, flags))
}

fn format_number(n: i32, conversion: Conversion, flags: Flags) -> String {
    match conversion {
        Conversion::Octal => {
            let digits = zero_extend(format!("{n:o}"), flags.precision);
            if flags.alternate && !digits.starts_with('0') {
                format!("0{digits}")
            } else {
                digits
            }
        }
        Conversion::LowerHex | Conversion::UpperHex => {
            let (digits, prefix) = if conversion == Conversion::UpperHex {
                (format!("{n:X}"), "0X")
            } else {
                (format!("{n:x}"), "0x")
            };
            let digits = zero_extend(digits, flags.precision);
            if flags.alternate && n != 0 {
                format!("{prefix}{digits}")
            } else {
                digits
            }
        }
        Conversion::Decimal | Conversion::String => {
            let digits = zero_extend(n.unsigned_abs().to_string(), flags.precision);
            let sign = if n < 0 {
                "-"
            } else if flags.sign {
                "+"
            } else if flags.space {
                " "
            } else {
                ""
            };
            format!("{sign}{digits}")
        }
    }
}

/// Pad digits with leading zeros up to the precision
fn zero_extend(digits: String, precision: Option<u16>) -> String {
    match precision.map(usize::from) {
        Some(precision) if precision > digits.len() => {
            format!("{}{digits}", "0".repeat(precision - digits.len()))
        }
        _ => digits,
    }
}

/// Insert zeros after the sign and radix prefix up to the field width
fn zero_fill(text: String, width: u16) -> String {
    let width = usize::from(width);
    if text.len() >= width {
        return text;
    }
    let mut prefix = usize::from(text.starts_with(['-', '+', ' ']));
    if text[prefix..].starts_with("0x") || text[prefix..].starts_with("0X") {
        prefix += 2;
    }
    let (head, digits) = text.split_at(prefix);
    format!("{head}{}{digits}", "0".repeat(width - text.len()))
}

/// Pad with spaces up to the field width
fn justify(mut text: Vec<u8>, flags: Flags) -> Vec<u8> {
    let width = usize::from(flags.width);
    if text.len() >= width {
        return text;
    }
    let padding = vec![b' '; width - text.len()];
    if flags.left {
        text.extend(padding);
        text
    } else {
        let mut padded = padding;
        padded.extend(text);
        padded
    }
}
