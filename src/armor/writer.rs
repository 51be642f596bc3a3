use std::hash::Hasher;
use std::io::Write;

use base64::engine::{general_purpose, Engine as _};
use crc24::Crc24Hasher;

use crate::armor::{ArmorOptions, BlockType};
use crate::errors::Result;
use crate::ser::Serialize;

/// Maximum length of a base64 body line.
const LINE_LENGTH: usize = 64;

pub fn write(
    source: &impl Serialize,
    typ: BlockType,
    writer: &mut impl Write,
    opts: ArmorOptions<'_>,
) -> Result<()> {
    // write armor header
    writer.write_all(&b"-----BEGIN "[..])?;
    typ.to_writer(writer)?;
    writer.write_all(&b"-----\n"[..])?;

    // write armor headers
    if let Some(headers) = opts.headers {
        for (key, value) in headers.iter() {
            writer.write_all(key.as_bytes())?;
            writer.write_all(&b": "[..])?;
            writer.write_all(value.as_bytes())?;
            writer.write_all(&b"\n"[..])?;
        }
    }

    writer.write_all(&b"\n"[..])?;

    // write body
    let body = source.to_bytes()?;
    let encoded = general_purpose::STANDARD.encode(&body);
    for line in encoded.as_bytes().chunks(LINE_LENGTH) {
        writer.write_all(line)?;
        writer.write_all(&b"\n"[..])?;
    }

    // write crc
    if opts.include_checksum {
        let mut crc_hasher = Crc24Hasher::new();
        crc_hasher.write(&body);
        let crc = crc_hasher.finish() as u32;
        let crc_buf = [(crc >> 16) as u8, (crc >> 8) as u8, crc as u8];
        let crc_enc = general_purpose::STANDARD.encode(crc_buf);

        writer.write_all(b"=")?;
        writer.write_all(crc_enc.as_bytes())?;
        writer.write_all(&b"\n"[..])?;
    }

    // write footer
    writer.write_all(&b"-----END "[..])?;
    typ.to_writer(writer)?;
    writer.write_all(&b"-----\n"[..])?;
    writer.flush()?;

    Ok(())
}

/// Armors `source` into a `String`.
pub fn to_armored_string(
    source: &impl Serialize,
    typ: BlockType,
    opts: ArmorOptions<'_>,
) -> Result<String> {
    let mut buf = Vec::new();
    write(source, typ, &mut buf, opts)?;
    let res = String::from_utf8(buf).map_err(|e| e.utf8_error())?;
    Ok(res)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::BTreeMap;

    use bytes::Bytes;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;

    #[test]
    fn writes_no_doubleline() {
        let rng = &mut XorShiftRng::seed_from_u64(0);

        for i in 2..1024 {
            let buf: Vec<u8> = (0..i).map(|_| rng.gen()).collect();
            let source = Bytes::from(buf);

            let mut dest = Vec::new();

            write(&source, BlockType::Message, &mut dest, ArmorOptions::default()).unwrap();

            let dest_str = std::str::from_utf8(&dest).unwrap();
            let lines = dest_str.lines().collect::<Vec<_>>();

            assert_eq!(lines[0], "-----BEGIN PGP MESSAGE-----");
            assert!(
                !lines[lines.len() - 3].is_empty(),
                "last line must not be empty"
            );
            assert_eq!(
                lines[lines.len() - 2].len(),
                5,
                "invalid checksum line: '{}'",
                lines[lines.len() - 2]
            );
            assert_eq!(lines[lines.len() - 1], "-----END PGP MESSAGE-----");
        }
    }

    #[test]
    fn writes_no_checksum() {
        let mut rng = XorShiftRng::seed_from_u64(0);

        for i in 2..256 {
            let buf: Vec<u8> = (0..i).map(|_| rng.gen()).collect();
            let source = Bytes::from(buf);

            let opts = ArmorOptions {
                headers: None,
                include_checksum: false,
            };
            let armored = to_armored_string(&source, BlockType::Message, opts).unwrap();
            let lines = armored.lines().collect::<Vec<_>>();

            assert_eq!(lines[0], "-----BEGIN PGP MESSAGE-----");
            assert!(!lines[lines.len() - 2].starts_with('='));
            assert_eq!(lines[lines.len() - 1], "-----END PGP MESSAGE-----");
        }
    }

    #[test]
    fn writes_headers_in_order() {
        let mut headers = BTreeMap::new();
        headers.insert("Version".to_string(), "1.0".to_string());
        headers.insert("Comment".to_string(), "hello".to_string());

        let armored = to_armored_string(
            &Bytes::from_static(b"hi"),
            BlockType::Signature,
            Some(&headers).into(),
        )
        .unwrap();

        assert_eq!(
            armored,
            "-----BEGIN PGP SIGNATURE-----\n\
             Comment: hello\n\
             Version: 1.0\n\
             \n\
             aGk=\n\
             =Um4c\n\
             -----END PGP SIGNATURE-----\n"
        );
    }
}
