/// Associated strings (SttbfAssoc).
///
/// An extended string table whose fixed slots hold the document's title,
/// subject, keywords, comments, author and last editor.
use crate::common::binary::{BinaryError, BinaryResult, parse_utf16le_string_len, read_u16_le};

const IBST_TITLE: usize = 2;
const IBST_SUBJECT: usize = 3;
const IBST_KEYWORDS: usize = 4;
const IBST_COMMENTS: usize = 5;
const IBST_AUTHOR: usize = 6;
const IBST_LAST_REV_BY: usize = 7;

/// Textual document properties. Empty strings are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociatedStrings {
    pub author: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub last_revised_by: Option<String>,
    pub keywords: Option<String>,
    pub comments: Option<String>,
}

impl AssociatedStrings {
    /// Parse an extended SttbfAssoc.
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        if read_u16_le(data, 0)? != 0xFFFF {
            return Err(BinaryError::ParseError(
                "SttbfAssoc is not an extended string table".to_string(),
            ));
        }
        let count = read_u16_le(data, 2)? as usize;
        let cb_extra = read_u16_le(data, 4)? as usize;

        let mut strings = Vec::with_capacity(count);
        let mut offset = 6;
        for _ in 0..count {
            let cch = read_u16_le(data, offset)? as usize;
            strings.push(parse_utf16le_string_len(data, offset + 2, cch)?);
            offset += 2 + cch * 2 + cb_extra;
        }

        let slot = |index: usize| strings.get(index).filter(|s| !s.is_empty()).cloned();
        Ok(Self {
            author: slot(IBST_AUTHOR),
            title: slot(IBST_TITLE),
            subject: slot(IBST_SUBJECT),
            last_revised_by: slot(IBST_LAST_REV_BY),
            keywords: slot(IBST_KEYWORDS),
            comments: slot(IBST_COMMENTS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sttb(strings: &[&str]) -> Vec<u8> {
        let mut data = vec![0xFF, 0xFF];
        data.extend_from_slice(&(strings.len() as u16).to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        for s in strings {
            let units: Vec<u16> = s.encode_utf16().collect();
            data.extend_from_slice(&(units.len() as u16).to_le_bytes());
            for unit in units {
                data.extend_from_slice(&unit.to_le_bytes());
            }
        }
        data
    }

    #[test]
    fn test_parse() {
        let data = sttb(&["", "Normal.dot", "Report", "", "doc, legacy", "", "Ada", "Grace"]);
        let assoc = AssociatedStrings::parse(&data).unwrap();
        assert_eq!(assoc.title.as_deref(), Some("Report"));
        assert_eq!(assoc.subject, None);
        assert_eq!(assoc.keywords.as_deref(), Some("doc, legacy"));
        assert_eq!(assoc.comments, None);
        assert_eq!(assoc.author.as_deref(), Some("Ada"));
        assert_eq!(assoc.last_revised_by.as_deref(), Some("Grace"));
    }

    #[test]
    fn test_short_table() {
        let assoc = AssociatedStrings::parse(&sttb(&["", "", "Only title"])).unwrap();
        assert_eq!(assoc.title.as_deref(), Some("Only title"));
        assert!(assoc.author.is_none());
    }

    #[test]
    fn test_not_extended() {
        assert!(AssociatedStrings::parse(&[0x02, 0x00, 0x00, 0x00]).is_err());
    }
}
