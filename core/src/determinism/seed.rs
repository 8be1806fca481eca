use crate::determinism::clock::unix_millis;
use sha2::{Digest, Sha256};

pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
pub const FNV_PRIME: u32 = 16_777_619;
pub const CASE_ID_PREFIX: &str = "CC";
pub const CUSTOM_CHARGE_MARKER: &str = "CUSTOM::";

/// FNV-1a over the UTF-16 code units of the trimmed text.
///
/// Collisions between distinct texts are possible and accepted: the seed only
/// drives reproducible selection, it is not an identity.
pub fn derive_seed(text: &str) -> u32 {
    text.trim()
        .encode_utf16()
        .fold(FNV_OFFSET_BASIS, |h, unit| {
            (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
        })
}

/// `CC-<first 6 hex digits of seed>-<base36 unix millis>`, upper-cased.
///
/// Mixes in wall-clock time, so two filings of the same text get distinct ids.
pub fn derive_case_id(seed: u32) -> String {
    derive_case_id_at(seed, unix_millis())
}

pub fn derive_case_id_at(seed: u32, unix_millis: u64) -> String {
    let hex = format!("{:x}", seed);
    let head: String = hex.chars().take(6).collect();
    format!("{}-{:0>6}-{}", CASE_ID_PREFIX, head, to_base36(unix_millis)).to_ascii_uppercase()
}

pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

pub fn charge_id(seed: u32, text: &str) -> String {
    digest_id(&format!("{}:{}", seed, text))
}

pub fn custom_charge_id(seed: u32, text: &str) -> String {
    digest_id(&format!("{}:{}{}", seed, CUSTOM_CHARGE_MARKER, text))
}

fn digest_id(material: &str) -> String {
    let hex = sha256_hex(material.as_bytes());
    format!("ch_{}", &hex[..16])
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}
