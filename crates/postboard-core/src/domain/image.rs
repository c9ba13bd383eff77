/// A parsed `data:<media type>;base64,<payload>` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    pub media_type: &'a str,
    pub payload: &'a str,
}

impl<'a> DataUri<'a> {
    /// Parse a base64 data URI. Returns `None` for anything else.
    pub fn parse(uri: &'a str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let media_type = header.strip_suffix(";base64")?;
        if media_type.is_empty() {
            return None;
        }
        Some(Self {
            media_type,
            payload,
        })
    }

    /// Size in bytes of the decoded payload.
    pub fn decoded_len(&self) -> usize {
        let len = self.payload.len();
        let padding = self.payload.bytes().rev().take_while(|&b| b == b'=').count();
        ((len / 4) * 3).saturating_sub(padding.min(2))
    }
}
