/*!
 * Text armor for keys and signatures
 *
 * Armored values are standard base64 wrapped at 64 columns between a header
 * and footer naming the variant and the kind of value, e.g.
 *
 * ```text
 * -----BEGIN DILITHIUM3 PUBLIC KEY-----
 * ...
 * -----END DILITHIUM3 PUBLIC KEY-----
 * ```
 *
 * Only in-memory encoding lives here; reading and writing files is left to
 * callers.
 */

use zeroize::Zeroizing;

use crate::error::ArmorError;
use crate::params::DilithiumVariant;

/// Base64 characters per body line
pub const LINE_WIDTH: usize = 64;

/// What an armored block contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmorKind {
    PublicKey,
    SecretKey,
    Signature,
}

impl ArmorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArmorKind::PublicKey => "PUBLIC KEY",
            ArmorKind::SecretKey => "SECRET KEY",
            ArmorKind::Signature => "SIGNATURE",
        }
    }

    /// Decoded length required for this kind under `variant`
    pub fn expected_len(&self, variant: DilithiumVariant) -> usize {
        match self {
            ArmorKind::PublicKey => variant.public_key_size(),
            ArmorKind::SecretKey => variant.private_key_size(),
            ArmorKind::Signature => variant.signature_size(),
        }
    }
}

pub fn header(variant: DilithiumVariant, kind: ArmorKind) -> String {
    format!(
        "-----BEGIN {} {}-----",
        variant.name().to_ascii_uppercase(),
        kind.label()
    )
}

pub fn footer(variant: DilithiumVariant, kind: ArmorKind) -> String {
    format!(
        "-----END {} {}-----",
        variant.name().to_ascii_uppercase(),
        kind.label()
    )
}

/// Armor `bytes` as `kind` for `variant`.
///
/// The output ends with a newline after the footer.
pub fn encode(variant: DilithiumVariant, kind: ArmorKind, bytes: &[u8]) -> String {
    let body = Zeroizing::new(base64::encode(bytes));
    let header = header(variant, kind);
    let footer = footer(variant, kind);

    let mut out = String::with_capacity(
        header.len() + footer.len() + body.len() + body.len() / LINE_WIDTH + 3,
    );
    out.push_str(&header);
    out.push('\n');
    for (i, c) in body.chars().enumerate() {
        if i > 0 && i % LINE_WIDTH == 0 {
            out.push('\n');
        }
        out.push(c);
    }
    if !body.is_empty() {
        out.push('\n');
    }
    out.push_str(&footer);
    out.push('\n');
    out
}

/// Decode an armored `kind` for `variant`.
///
/// Leading blank lines and whitespace inside the body are ignored. Anything
/// after the footer is ignored. The decoded value must have exactly the
/// length `kind` has under `variant`. The decoded bytes are wiped on drop,
/// including when the length check fails.
pub fn decode(
    variant: DilithiumVariant,
    kind: ArmorKind,
    text: &str,
) -> Result<Zeroizing<Vec<u8>>, ArmorError> {
    let header = header(variant, kind);
    let footer = footer(variant, kind);

    let mut lines = text.lines().map(str::trim).skip_while(|line| line.is_empty());
    if lines.next() != Some(header.as_str()) {
        return Err(ArmorError::MissingHeader { expected: header });
    }

    let mut body = Zeroizing::new(String::new());
    let mut closed = false;
    for line in lines {
        if line == footer {
            closed = true;
            break;
        }
        body.extend(line.chars().filter(|c| !c.is_whitespace()));
    }
    if !closed {
        return Err(ArmorError::MissingFooter { expected: footer });
    }

    let bytes = Zeroizing::new(
        base64::decode(body.as_bytes()).map_err(|e| ArmorError::InvalidBase64(e.to_string()))?,
    );

    let expected = kind.expected_len(variant);
    if bytes.len() != expected {
        return Err(ArmorError::WrongLength {
            label: kind.label().to_ascii_lowercase(),
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}
