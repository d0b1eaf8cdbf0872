//! Tuple dictionaries carried by companion app messages
//!
//! A dictionary is a flat run of tuples:
//!
//! ```text
//! [key][kind][len][value ...] [key][kind][len][value ...] ...
//! ```
//!
//! `kind` 0 is a UTF-8 string of `len` bytes (no terminator), `kind` 1 is a
//! little-endian `i32` and always has `len` 4.

use heapless::Vec;

/// Dictionary keys understood by the watchface
pub mod keys {
    pub const TEMPERATURE: u8 = 0;
    pub const CONDITIONS: u8 = 1;
    pub const API_KEY: u8 = 2;
    pub const AMERICAN_DATE: u8 = 3;
}

const KIND_STR: u8 = 0;
const KIND_INT: u8 = 1;

const TUPLE_HEADER_LEN: usize = 3;

/// Errors raised while reading or writing a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictionaryError {
    /// Tuple header or value runs past the end of the buffer
    Truncated,
    /// Unknown value kind byte
    UnknownKind(u8),
    /// Integer tuple whose length is not 4
    InvalidIntLength(u8),
    /// String tuple that is not valid UTF-8
    InvalidUtf8,
    /// String value longer than a tuple can carry
    ValueTooLong,
    /// Writer buffer is full
    BufferFull,
}

/// Value carried by a tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleValue<'a> {
    Str(&'a str),
    Int(i32),
}

impl<'a> TupleValue<'a> {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            TupleValue::Int(v) => Some(*v),
            TupleValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            TupleValue::Str(s) => Some(s),
            TupleValue::Int(_) => None,
        }
    }
}

/// A single key/value entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuple<'a> {
    pub key: u8,
    pub value: TupleValue<'a>,
}

/// Borrowed view over an encoded dictionary
#[derive(Debug, Clone, Copy)]
pub struct Dictionary<'a> {
    bytes: &'a [u8],
}

impl<'a> Dictionary<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Iterate over the tuples in wire order
    ///
    /// Iteration stops after the first malformed tuple.
    pub fn iter(&self) -> DictionaryIter<'a> {
        DictionaryIter {
            remaining: self.bytes,
        }
    }

    /// Find the first tuple with `key`
    ///
    /// Every tuple up to the match must be well formed.
    pub fn find(&self, key: u8) -> Result<Option<Tuple<'a>>, DictionaryError> {
        for tuple in self.iter() {
            let tuple = tuple?;
            if tuple.key == key {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> IntoIterator for Dictionary<'a> {
    type Item = Result<Tuple<'a>, DictionaryError>;
    type IntoIter = DictionaryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over dictionary tuples
#[derive(Debug, Clone)]
pub struct DictionaryIter<'a> {
    remaining: &'a [u8],
}

impl<'a> DictionaryIter<'a> {
    fn parse_next(&mut self) -> Result<Tuple<'a>, DictionaryError> {
        if self.remaining.len() < TUPLE_HEADER_LEN {
            return Err(DictionaryError::Truncated);
        }

        let key = self.remaining[0];
        let kind = self.remaining[1];
        let len = self.remaining[2];
        let rest = &self.remaining[TUPLE_HEADER_LEN..];

        if rest.len() < len as usize {
            return Err(DictionaryError::Truncated);
        }
        let (raw, tail) = rest.split_at(len as usize);

        let value = match kind {
            KIND_STR => {
                let s = core::str::from_utf8(raw).map_err(|_| DictionaryError::InvalidUtf8)?;
                TupleValue::Str(s)
            }
            KIND_INT => {
                let bytes: [u8; 4] = raw
                    .try_into()
                    .map_err(|_| DictionaryError::InvalidIntLength(len))?;
                TupleValue::Int(i32::from_le_bytes(bytes))
            }
            other => return Err(DictionaryError::UnknownKind(other)),
        };

        self.remaining = tail;
        Ok(Tuple { key, value })
    }
}

impl<'a> Iterator for DictionaryIter<'a> {
    type Item = Result<Tuple<'a>, DictionaryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let result = self.parse_next();
        if result.is_err() {
            self.remaining = &[];
        }
        Some(result)
    }
}

/// Builds an encoded dictionary into a fixed buffer
#[derive(Debug, Clone, Default)]
pub struct DictionaryWriter<const N: usize> {
    buffer: Vec<u8, N>,
}

impl<const N: usize> DictionaryWriter<N> {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn push_int(&mut self, key: u8, value: i32) -> Result<(), DictionaryError> {
        self.push_raw(key, KIND_INT, &value.to_le_bytes())
    }

    pub fn push_str(&mut self, key: u8, value: &str) -> Result<(), DictionaryError> {
        if value.len() > u8::MAX as usize {
            return Err(DictionaryError::ValueTooLong);
        }
        self.push_raw(key, KIND_STR, value.as_bytes())
    }

    fn push_raw(&mut self, key: u8, kind: u8, value: &[u8]) -> Result<(), DictionaryError> {
        if self.buffer.capacity() - self.buffer.len() < TUPLE_HEADER_LEN + value.len() {
            return Err(DictionaryError::BufferFull);
        }
        self.buffer
            .extend_from_slice(&[key, kind, value.len() as u8])
            .map_err(|_| DictionaryError::BufferFull)?;
        self.buffer
            .extend_from_slice(value)
            .map_err(|_| DictionaryError::BufferFull)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}
