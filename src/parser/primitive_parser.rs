use encoding_rs::WINDOWS_1252;
use nom::{bytes, number, IResult};

/// Parse unsigned byte
pub fn parse_u8(i: &[u8]) -> IResult<&[u8], u8> {
    number::complete::be_u8(i)
}

/// Parse big endian unsigned short
pub fn parse_u16(i: &[u8]) -> IResult<&[u8], u16> {
    number::complete::be_u16(i)
}

/// Parse big endian unsigned 32
pub fn parse_u32(i: &[u8]) -> IResult<&[u8], u32> {
    number::complete::be_u32(i)
}

/// Match a 4 bytes chunk marker such as `MThd`.
pub fn parse_chunk_magic(magic: &'static [u8; 4]) -> impl Fn(&[u8]) -> IResult<&[u8], &[u8]> {
    move |i: &[u8]| bytes::complete::tag(&magic[..])(i)
}

/// Materialize properly encoded String
///
/// Valid UTF-8 is kept as is, anything else is read as Windows-1252.
pub fn make_string(i: &[u8]) -> String {
    match std::str::from_utf8(i) {
        Ok(s) => s.to_string(),
        Err(e) => {
            log::debug!("Not UTF-8 ({e}), decoding with {:?}", WINDOWS_1252.name());
            let (cow, _encoding_used, _had_errors) = WINDOWS_1252.decode(i);
            cow.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_big_endian_numbers() {
        let data: Vec<u8> = vec![0x00, 0x00, 0x00, 0x06, 0x01, 0xE0, 0x7F];
        let (rest, len) = parse_u32(&data).unwrap();
        assert_eq!(len, 6);
        let (rest, ticks) = parse_u16(rest).unwrap();
        assert_eq!(ticks, 480);
        let (rest, byte) = parse_u8(rest).unwrap();
        assert_eq!(byte, 0x7F);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_parse_chunk_magic() {
        let data: &[u8] = b"MThd\x00";
        let (rest, magic) = parse_chunk_magic(b"MThd")(data).unwrap();
        assert_eq!(magic, b"MThd");
        assert_eq!(rest, b"\x00");
        assert!(parse_chunk_magic(b"MTrk")(data).is_err());
    }

    #[test]
    fn test_make_string_ascii() {
        assert_eq!(make_string(b"e|---3---|"), "e|---3---|");
    }

    #[test]
    fn test_make_string_utf8_without_bom() {
        assert_eq!(make_string("[Intro café]".as_bytes()), "[Intro café]");
    }

    #[test]
    fn test_make_string_windows_1252() {
        // 0xE9 is 'é' in Windows-1252
        assert_eq!(make_string(b"[Intro caf\xE9]"), "[Intro café]");
    }
}
