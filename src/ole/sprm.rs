/// SPRM (Single Property Modifier) parsing.
///
/// SPRMs are the variable-length records Word uses to express every
/// section, paragraph and character property as a delta over defaults. A
/// group of them (`grpprl`) is walked front to back and applied in order.
use crate::common::binary::{read_i16_le, read_u16_le, read_u32_le};
use crate::ole::sprm_operations::{SPRM_T_DEF_TABLE, get_sprm_size_code};

/// Property group an SPRM applies to (bits 10-12 of the opcode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprmGroup {
    Paragraph,
    Character,
    Picture,
    Section,
    Table,
    Unknown(u8),
}

impl From<u16> for SprmGroup {
    fn from(opcode: u16) -> Self {
        match (opcode >> 10) & 0x07 {
            1 => SprmGroup::Paragraph,
            2 => SprmGroup::Character,
            3 => SprmGroup::Picture,
            4 => SprmGroup::Section,
            5 => SprmGroup::Table,
            other => SprmGroup::Unknown(other as u8),
        }
    }
}

/// A single SPRM borrowing its operand from the group it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprm<'a> {
    /// SPRM opcode
    pub opcode: u16,
    /// Operand bytes (the length prefix of variable operands is stripped)
    pub operand: &'a [u8],
}

impl<'a> Sprm<'a> {
    #[inline]
    pub fn group(&self) -> SprmGroup {
        SprmGroup::from(self.opcode)
    }

    #[inline]
    pub fn byte(&self) -> Option<u8> {
        self.operand.first().copied()
    }

    #[inline]
    pub fn flag(&self) -> bool {
        self.byte().unwrap_or(0) != 0
    }

    #[inline]
    pub fn word(&self) -> Option<u16> {
        read_u16_le(self.operand, 0).ok()
    }

    #[inline]
    pub fn i16(&self) -> Option<i16> {
        read_i16_le(self.operand, 0).ok()
    }

    #[inline]
    pub fn dword(&self) -> Option<u32> {
        read_u32_le(self.operand, 0).ok()
    }
}

/// Iterator over the SPRMs of a `grpprl`.
///
/// Iteration stops silently at the first truncated SPRM; Word files in the
/// wild regularly carry a few bytes of garbage at the end of a group.
///
/// # Examples
///
/// ```
/// use doc2odt::ole::sprm::SprmIter;
///
/// // sprmCFBold(1), sprmCHps(24)
/// let grpprl = [0x35, 0x08, 0x01, 0x43, 0x4A, 0x18, 0x00];
/// let sprms: Vec<_> = SprmIter::new(&grpprl).collect();
/// assert_eq!(sprms.len(), 2);
/// assert_eq!(sprms[1].word(), Some(24));
/// ```
#[derive(Debug, Clone)]
pub struct SprmIter<'a> {
    grpprl: &'a [u8],
    offset: usize,
}

impl<'a> SprmIter<'a> {
    pub fn new(grpprl: &'a [u8]) -> Self {
        Self { grpprl, offset: 0 }
    }

    fn operand_bounds(&self, opcode: u16, at: usize) -> Option<(usize, usize)> {
        let fixed = match get_sprm_size_code(opcode) {
            0 | 1 => 1,
            2 | 4 | 5 => 2,
            3 => 4,
            7 => 3,
            _ => 0,
        };
        if fixed > 0 {
            return Some((at, fixed));
        }
        if opcode == SPRM_T_DEF_TABLE {
            // cb counts itself minus one
            let cb = read_u16_le(self.grpprl, at).ok()? as usize;
            return Some((at + 2, cb.saturating_sub(1)));
        }
        let cb = *self.grpprl.get(at)? as usize;
        Some((at + 1, cb))
    }
}

impl<'a> Iterator for SprmIter<'a> {
    type Item = Sprm<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let opcode = read_u16_le(self.grpprl, self.offset).ok()?;
        let (start, len) = self.operand_bounds(opcode, self.offset + 2)?;
        let operand = self.grpprl.get(start..start + len)?;
        self.offset = start + len;
        Some(Sprm { opcode, operand })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_from_opcode() {
        assert_eq!(SprmGroup::from(0x0835), SprmGroup::Character);
        assert_eq!(SprmGroup::from(0x2403), SprmGroup::Paragraph);
        assert_eq!(SprmGroup::from(0x3009), SprmGroup::Section);
        assert_eq!(SprmGroup::from(0x5400), SprmGroup::Table);
    }

    #[test]
    fn test_variable_operand_strips_length() {
        // sprmSBrcTop with an 8-byte BRC
        let grpprl = [0x34, 0xD2, 0x08, 1, 2, 3, 4, 5, 6, 7, 8, 0x09, 0x30, 0x02];
        let sprms: Vec<_> = SprmIter::new(&grpprl).collect();
        assert_eq!(sprms.len(), 2);
        assert_eq!(sprms[0].operand, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(sprms[1].opcode, 0x3009);
        assert_eq!(sprms[1].byte(), Some(2));
    }

    #[test]
    fn test_truncated_group_stops() {
        // sprmSXaPage missing its second operand byte
        let grpprl = [0x09, 0x30, 0x00, 0x1F, 0xB0, 0x10];
        let sprms: Vec<_> = SprmIter::new(&grpprl).collect();
        assert_eq!(sprms.len(), 1);
    }

    #[test]
    fn test_signed_operand() {
        let grpprl = [0x23, 0x90, 0x60, 0xFA];
        let sprm = SprmIter::new(&grpprl).next().unwrap();
        assert_eq!(sprm.i16(), Some(-1440));
    }
}
