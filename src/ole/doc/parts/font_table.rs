/// Font table (SttbfFfn).
///
/// Each FFN record starts with its size minus one, followed by a fixed
/// 40-byte header and the null-terminated UTF-16 font name.
use crate::common::binary::{BinaryError, BinaryResult, parse_utf16le_string_z, read_u16_le};

/// Size of the FFN fields preceding `xszFfn`.
const FFN_HEADER_SIZE: usize = 40;

/// Ordered font names, indexed by ftc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    names: Vec<String>,
}

impl FontTable {
    /// Build a table from names, mostly for synthetic documents.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse an SttbfFfn.
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        let count = read_u16_le(data, 0)? as usize;
        let mut names = Vec::with_capacity(count);
        let mut offset = 4;

        for _ in 0..count {
            let cb_ffn_m1 = data
                .get(offset)
                .copied()
                .ok_or_else(|| BinaryError::ParseError(format!("FFN {} truncated", names.len())))?;
            let size = cb_ffn_m1 as usize + 1;
            let record = data.get(offset..offset + size).ok_or_else(|| {
                BinaryError::ParseError(format!("FFN {} exceeds table", names.len()))
            })?;
            let (name, _) = parse_utf16le_string_z(record, FFN_HEADER_SIZE);
            names.push(name);
            offset += size;
        }

        Ok(Self { names })
    }

    /// Font name for an ftc.
    pub fn name(&self, ftc: u16) -> Option<&str> {
        self.names.get(ftc as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
