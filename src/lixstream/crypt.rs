use base64::{Engine as _, engine::general_purpose::STANDARD};
use cbc::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};
use tracing::warn;

use crate::common::DecryptError;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const BLOCK_SIZE: usize = 16;
pub(crate) const CRYPTO_KEY: [u8; 32] = *b"GNgN1lHXIFCQd8hSEZIeqozKInQTFNXj";
pub(crate) const CRYPTO_IV: [u8; 16] = *b"2Xk4dLo38c9Z2Q2a";

/// Recovers the plaintext asset URL from the base64 AES-256-CBC payload
/// returned by the assets endpoint.
pub fn decrypt_url(encrypted: &str) -> Result<String, DecryptError> {
    let mut buf = STANDARD.decode(encrypted).map_err(|e| {
        warn!("Lixstream: base64 decode failed: {}", e);
        e
    })?;

    if buf.is_empty() || buf.len() % BLOCK_SIZE != 0 {
        warn!("Lixstream: invalid ciphertext length: {}", buf.len());
        return Err(DecryptError::BlockLength(buf.len()));
    }

    let cipher = Aes256CbcDec::new(&CRYPTO_KEY.into(), &CRYPTO_IV.into());
    let plain_len = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| {
            warn!("Lixstream: PKCS#7 unpadding failed");
            DecryptError::Padding
        })?
        .len();

    buf.truncate(plain_len);
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbc::cipher::{BlockEncryptMut, block_padding::NoPadding};

    type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

    fn encrypt(plain: &[u8]) -> String {
        let mut buf = vec![0u8; (plain.len() / BLOCK_SIZE + 1) * BLOCK_SIZE];
        buf[..plain.len()].copy_from_slice(plain);
        let cipher = Aes256CbcEnc::new(&CRYPTO_KEY.into(), &CRYPTO_IV.into());
        let ct = cipher
            .encrypt_padded_mut::<Pkcs7>(&mut buf, plain.len())
            .unwrap();
        STANDARD.encode(ct)
    }

    #[test]
    fn decrypts_known_ciphertext() {
        assert_eq!(
            decrypt_url("K4KPagXVEf0qsKRgruWCsxHTANUk75dXbsM3CaymCbE=").unwrap(),
            "https://cdn/real.mp4"
        );
        assert_eq!(
            decrypt_url(
                "8D2wzpN3IsMHi7EWXgQeBUW3aA17opbGVwJD3AkVzmkx3AAqhJ6esxgdczaCUsvXHtTgm7KQ7KG4S2QpdJF0ew=="
            )
            .unwrap(),
            "https://cdn.example.net/v/XyZ987/master.m3u8?token=abc"
        );
    }

    #[test]
    fn roundtrips_block_aligned_plaintext() {
        // 32 bytes, so PKCS#7 appends a whole block
        let url = "https://cdn.example/abcdefghijkl";
        assert_eq!(url.len(), 32);
        assert_eq!(decrypt_url(&encrypt(url.as_bytes())).unwrap(), url);
    }

    #[test]
    fn rejects_non_base64() {
        assert!(matches!(
            decrypt_url("this is not base64!"),
            Err(DecryptError::Base64(_))
        ));
    }

    #[test]
    fn rejects_partial_blocks() {
        let short = STANDARD.encode([0u8; 15]);
        assert!(matches!(
            decrypt_url(&short),
            Err(DecryptError::BlockLength(15))
        ));
        assert!(matches!(decrypt_url(""), Err(DecryptError::BlockLength(0))));
    }

    #[test]
    fn rejects_bad_padding() {
        // single block whose plaintext ends in 0x00
        assert!(matches!(
            decrypt_url("T3rnO5X5IGzSRBW/fgM6ig=="),
            Err(DecryptError::Padding)
        ));

        let mut block = *b"AAAAAAAAAAAAAAA\x11";
        let cipher = Aes256CbcEnc::new(&CRYPTO_KEY.into(), &CRYPTO_IV.into());
        let ct = cipher
            .encrypt_padded_mut::<NoPadding>(&mut block, BLOCK_SIZE)
            .unwrap();
        assert!(matches!(
            decrypt_url(&STANDARD.encode(ct)),
            Err(DecryptError::Padding)
        ));
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(
            decrypt_url("sbGuI6JyefKkai5xH37jdw=="),
            Err(DecryptError::Utf8(_))
        ));
        assert!(matches!(
            decrypt_url(&encrypt(&[0xC3, 0x28])),
            Err(DecryptError::Utf8(_))
        ));
    }
}
