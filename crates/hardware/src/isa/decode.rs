//! Vector Core Instruction Decoder.
//!
//! This module turns one whitespace-split program line into an `Instruction`. It
//! parses register tokens (`VR3`, `SR0`, `V3`), resolves bracketed address and mask
//! lists against the current scalar register values, and captures the vector
//! length and mask by value. `MTCL`, `CVM` and the mask-setting comparisons update
//! the live `VectorState` once the whole line has parsed; nothing else mutates it.
//!
//! Vector loads and stores always carry one address per element up to the captured
//! vector length. The operand is either that many explicit addresses (extra ones are
//! dropped) or a pattern: `(base)` for unit stride, `(base,stride)` for `LVWS`/`SVWS`.

use crate::common::constants::NUM_SCALAR_REGS;
use crate::common::error::DecodeError;
use crate::common::reg::{Reg, RegKind, RegisterFile, ScalarReg, VectorReg};
use crate::core::arch::vector::{VectorMask, VectorState};
use crate::isa::instruction::{Instruction, Layout, Opcode, RegSet, VectorAccess};

/// Read access to scalar register values, used to resolve register references
/// inside address and length lists.
pub trait ScalarValues {
    /// Current value of `reg`.
    fn scalar(&self, reg: ScalarReg) -> i32;
}

impl ScalarValues for RegisterFile {
    fn scalar(&self, reg: ScalarReg) -> i32 {
        self.read_word(reg.index()).unwrap_or(0)
    }
}

impl ScalarValues for [i32; NUM_SCALAR_REGS] {
    fn scalar(&self, reg: ScalarReg) -> i32 {
        self.get(reg.index()).copied().unwrap_or(0)
    }
}

/// Result of decoding one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// An instruction to admit into its issue queue.
    Instruction(Instruction),
    /// `HALT`: end of program, nothing to enqueue.
    Halt,
}

/// Update to the live vector state, applied after a line decodes successfully.
enum Effect {
    SetLength(usize),
    SetMask(VectorMask),
    ClearMask,
}

/// Decodes one program line.
///
/// # Arguments
///
/// * `tokens` - The line split on whitespace; token 0 is the mnemonic.
/// * `vector` - Live VLR/VMR. Read for the snapshot, written by `MTCL`, `CVM` and
///   the mask-setting comparisons.
/// * `scalars` - Scalar register values for resolving register references in lists.
///
/// # Errors
///
/// `UnknownInstruction` for a mnemonic outside the instruction set, and a
/// malformed-operand error for anything else that does not parse. On error the
/// vector state is left untouched.
///
/// # Examples
///
/// ```
/// use vcsim_core::core::arch::vector::VectorState;
/// use vcsim_core::isa::decode::{decode, Decoded};
/// use vcsim_core::isa::instruction::{ComputeResource, IssueClass};
///
/// let mut vector = VectorState::new();
/// let scalars = [0i32; 8];
/// let Ok(Decoded::Instruction(instr)) = decode(&["ADDVV", "VR1", "VR2", "VR3"], &mut vector, &scalars) else {
///     panic!("expected an instruction");
/// };
/// assert_eq!(instr.class, IssueClass::VectorCompute);
/// assert_eq!(instr.resource, Some(ComputeResource::Adder));
/// ```
pub fn decode<S: AsRef<str>>(
    tokens: &[S],
    vector: &mut VectorState,
    scalars: &dyn ScalarValues,
) -> Result<Decoded, DecodeError> {
    let words = group_operands(tokens);
    let (mnemonic, rest) = words.split_first().ok_or(DecodeError::EmptyInstruction)?;
    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| DecodeError::UnknownInstruction(mnemonic.clone()))?;
    let Some(class) = opcode.class() else {
        return Ok(Decoded::Halt);
    };

    let snapshot = vector.snapshot();
    let ops = Operands {
        mnemonic: opcode.mnemonic(),
        tokens: rest,
    };
    let mut src = RegSet::default();
    let mut dst = RegSet::default();
    let mut scalar_addrs = Vec::new();
    let mut vector_addrs = Vec::new();
    let mut effect = None;

    match opcode.layout() {
        Layout::VectorVector => {
            dst.insert(Reg::Vector(ops.vector(1)?));
            src.insert(Reg::Vector(ops.vector(2)?));
            src.insert(Reg::Vector(ops.vector(3)?));
        }
        Layout::VectorScalar => {
            dst.insert(Reg::Vector(ops.vector(1)?));
            src.insert(Reg::Vector(ops.vector(2)?));
            src.insert(Reg::Scalar(ops.scalar(3)?));
        }
        Layout::CompareVV | Layout::CompareVS => {
            src.insert(Reg::Vector(ops.vector(1)?));
            if opcode.layout() == Layout::CompareVV {
                src.insert(Reg::Vector(ops.vector(2)?));
            } else {
                src.insert(Reg::Scalar(ops.scalar(2)?));
            }
            let flags = ops
                .list(3)?
                .into_iter()
                .map(|bit| {
                    parse_int(bit).map(|v| v != 0).ok_or_else(|| DecodeError::InvalidOperand {
                        token: bit.to_string(),
                        reason: "expected a mask bit",
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            effect = Some(Effect::SetMask(VectorMask::from_flags(flags)));
        }
        Layout::VectorLoad | Layout::VectorStore => {
            let reg = Reg::Vector(ops.vector(1)?);
            if opcode.layout() == Layout::VectorLoad {
                dst.insert(reg);
            } else {
                src.insert(reg);
            }
            let values = resolve_values(&ops.list(2)?, scalars, &mut src)?;
            let access = match opcode {
                Opcode::LoadVector(access) | Opcode::StoreVector(access) => access,
                _ => VectorAccess::Unit,
            };
            vector_addrs = element_addresses(access, &values, snapshot.length, ops.token(2)?)?;
        }
        Layout::ScalarDest => {
            dst.insert(Reg::Scalar(ops.scalar(1)?));
        }
        Layout::LengthSource => {
            let reg = ops.scalar(1)?;
            src.insert(Reg::Scalar(reg));
            let length = match ops.optional_list(2)? {
                Some(elems) => match resolve(&elems, scalars, &mut src)?.as_slice() {
                    [length] => *length,
                    _ => {
                        return Err(DecodeError::InvalidOperand {
                            token: ops.token(2)?.to_string(),
                            reason: "expected exactly one vector length",
                        });
                    }
                },
                None => to_address(i64::from(scalars.scalar(reg)), ops.token(1)?)?,
            };
            effect = Some(Effect::SetLength(length));
        }
        Layout::ScalarLoad | Layout::ScalarStore => {
            let reg = Reg::Scalar(ops.scalar(1)?);
            if opcode.layout() == Layout::ScalarLoad {
                dst.insert(reg);
            } else {
                src.insert(reg);
            }
            scalar_addrs = resolve(&ops.list(2)?, scalars, &mut src)?;
        }
        Layout::ScalarAlu => {
            dst.insert(Reg::Scalar(ops.scalar(1)?));
            src.insert(Reg::Scalar(ops.scalar(2)?));
            src.insert(Reg::Scalar(ops.scalar(3)?));
        }
        Layout::Branch => {
            src.insert(Reg::Scalar(ops.scalar(1)?));
            src.insert(Reg::Scalar(ops.scalar(2)?));
            // Targets are parsed for validity only; branches fall through.
            let _ = ops.optional_list(3)?;
        }
        Layout::Empty => {
            if opcode == Opcode::ClearMask {
                effect = Some(Effect::ClearMask);
            }
        }
    }

    match effect {
        Some(Effect::SetLength(length)) => vector.set_length(length)?,
        Some(Effect::SetMask(mask)) => vector.set_mask(mask),
        Some(Effect::ClearMask) => vector.clear_mask(),
        None => {}
    }

    Ok(Decoded::Instruction(Instruction {
        opcode,
        class,
        resource: opcode.resource(),
        src,
        dst,
        scalar_addrs,
        vector_addrs,
        snapshot: opcode.is_vector().then_some(snapshot),
    }))
}

/// Literal addresses in the bracketed operand of a load or store.
///
/// Register references are skipped since their values are only known while the
/// program runs, and so is the stride of a `(base,stride)` pattern. Returns `None`
/// for lines that are not memory instructions or whose address operand does not
/// parse.
pub fn literal_addresses<S: AsRef<str>>(tokens: &[S]) -> Option<(Opcode, Vec<usize>)> {
    let words = group_operands(tokens);
    let opcode = Opcode::from_mnemonic(words.first()?)?;
    let _ = opcode.memory_space()?;
    let mut elems = parse_list(words.get(2)?).ok()?;
    let strided = matches!(
        opcode,
        Opcode::LoadVector(VectorAccess::Strided) | Opcode::StoreVector(VectorAccess::Strided)
    );
    if strided && elems.len() == 2 {
        elems.truncate(1);
    }
    let addrs = elems
        .into_iter()
        .filter_map(parse_int)
        .filter_map(|v| usize::try_from(v).ok())
        .collect();
    Some((opcode, addrs))
}

/// Parses a register token of the given kind.
///
/// Accepts the kind letter, an optional `R`, and a decimal index, ignoring case.
pub fn parse_register(token: &str, kind: RegKind) -> Result<Reg, DecodeError> {
    match kind {
        RegKind::Scalar => parse_scalar(token).map(Reg::Scalar),
        RegKind::Vector => parse_vector(token).map(Reg::Vector),
    }
}

fn parse_scalar(token: &str) -> Result<ScalarReg, DecodeError> {
    register_index(token, RegKind::Scalar)
        .and_then(ScalarReg::new)
        .ok_or_else(|| invalid_register(token, RegKind::Scalar))
}

fn parse_vector(token: &str) -> Result<VectorReg, DecodeError> {
    register_index(token, RegKind::Vector)
        .and_then(VectorReg::new)
        .ok_or_else(|| invalid_register(token, RegKind::Vector))
}

fn register_index(token: &str, kind: RegKind) -> Option<usize> {
    let letter = match kind {
        RegKind::Scalar => 'S',
        RegKind::Vector => 'V',
    };
    let mut chars = token.chars();
    if !chars.next().is_some_and(|c| c.eq_ignore_ascii_case(&letter)) {
        return None;
    }
    let rest = chars.as_str();
    let digits = rest.strip_prefix(['R', 'r']).unwrap_or(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn invalid_register(token: &str, expected: RegKind) -> DecodeError {
    DecodeError::InvalidRegister {
        token: token.to_string(),
        expected,
    }
}

/// Splits a bracketed list, `(a,b)` or `[a,b]`, into trimmed elements.
pub fn parse_list(token: &str) -> Result<Vec<&str>, DecodeError> {
    let inner = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .or_else(|| token.strip_prefix('[').and_then(|t| t.strip_suffix(']')))
        .ok_or_else(|| DecodeError::InvalidOperand {
            token: token.to_string(),
            reason: "expected a bracketed list",
        })?;
    Ok(inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect())
}

/// Parses a decimal or `0x` hexadecimal integer with an optional sign.
fn parse_int(text: &str) -> Option<i64> {
    let (negative, body) = text
        .strip_prefix('-')
        .map_or((false, text), |body| (true, body));
    let value = match body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => body.parse::<i64>().ok()?,
    };
    Some(if negative { -value } else { value })
}

/// Rejoins bracketed lists that contain whitespace, e.g. `(1, 2)`.
fn group_operands<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut words: Vec<String> = Vec::with_capacity(tokens.len());
    let mut depth = 0usize;
    for token in tokens {
        let token = token.as_ref();
        match words.last_mut() {
            Some(last) if depth > 0 => last.push_str(token),
            _ => words.push(token.to_string()),
        }
        for c in token.chars() {
            match c {
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }
    words
}

fn to_address(value: i64, token: &str) -> Result<usize, DecodeError> {
    usize::try_from(value).map_err(|_| DecodeError::InvalidOperand {
        token: token.to_string(),
        reason: "negative address",
    })
}

/// Resolves list elements to values; scalar registers referenced become sources.
fn resolve_values(
    elems: &[&str],
    scalars: &dyn ScalarValues,
    src: &mut RegSet,
) -> Result<Vec<i64>, DecodeError> {
    elems
        .iter()
        .map(|elem| {
            if elem.starts_with(|c: char| c.is_ascii_alphabetic()) {
                let reg = parse_scalar(elem)?;
                src.insert(Reg::Scalar(reg));
                Ok(i64::from(scalars.scalar(reg)))
            } else {
                parse_int(elem).ok_or_else(|| DecodeError::InvalidOperand {
                    token: (*elem).to_string(),
                    reason: "expected an address or scalar register",
                })
            }
        })
        .collect()
}

/// Resolves list elements to addresses; scalar registers referenced become sources.
fn resolve(
    elems: &[&str],
    scalars: &dyn ScalarValues,
    src: &mut RegSet,
) -> Result<Vec<usize>, DecodeError> {
    resolve_values(elems, scalars, src)?
        .into_iter()
        .zip(elems)
        .map(|(value, elem)| to_address(value, elem))
        .collect()
}

/// Expands a vector load/store operand into one address per element.
///
/// A list with at least `length` entries is taken element by element. Shorter
/// lists must be a pattern: `(base)` for unit stride, `(base,stride)` for a
/// strided access.
fn element_addresses(
    access: VectorAccess,
    values: &[i64],
    length: usize,
    token: &str,
) -> Result<Vec<usize>, DecodeError> {
    let (base, stride) = match (access, values) {
        _ if values.len() >= length => {
            return values
                .iter()
                .take(length)
                .map(|&value| to_address(value, token))
                .collect();
        }
        (VectorAccess::Unit, &[base]) => (base, 1),
        (VectorAccess::Strided, &[base, stride]) => (base, stride),
        _ => {
            return Err(DecodeError::InvalidOperand {
                token: token.to_string(),
                reason: "expected one address per element",
            });
        }
    };
    (0..length)
        .map(|elem| {
            let address = i64::try_from(elem)
                .ok()
                .and_then(|index| index.checked_mul(stride))
                .and_then(|offset| base.checked_add(offset))
                .ok_or_else(|| DecodeError::InvalidOperand {
                    token: token.to_string(),
                    reason: "address overflows",
                })?;
            to_address(address, token)
        })
        .collect()
}

/// Positional operand access with errors naming the instruction.
struct Operands<'a> {
    mnemonic: &'static str,
    tokens: &'a [String],
}

impl Operands<'_> {
    /// Operand at 1-based `position`.
    fn token(&self, position: usize) -> Result<&str, DecodeError> {
        self.tokens
            .get(position - 1)
            .map(String::as_str)
            .ok_or_else(|| DecodeError::MissingOperand {
                mnemonic: self.mnemonic.to_string(),
                position,
            })
    }

    fn scalar(&self, position: usize) -> Result<ScalarReg, DecodeError> {
        parse_scalar(self.token(position)?)
    }

    fn vector(&self, position: usize) -> Result<VectorReg, DecodeError> {
        parse_vector(self.token(position)?)
    }

    fn list(&self, position: usize) -> Result<Vec<&str>, DecodeError> {
        parse_list(self.token(position)?)
    }

    fn optional_list(&self, position: usize) -> Result<Option<Vec<&str>>, DecodeError> {
        match self.tokens.get(position - 1) {
            Some(token) => parse_list(token).map(Some),
            None => Ok(None),
        }
    }
}
