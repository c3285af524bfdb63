use anyhow::{bail, Context, Result};
use ed25519_dalek::{Signature, Verifier, VerifyingKey, SIGNATURE_LENGTH};
use std::convert::TryInto;

/// Checks the Ed25519 signature Discord puts on every interaction request.
///
/// The signed message is the `X-Signature-Timestamp` header followed by the
/// raw body. Malformed hex or a signature that is not 64 bytes is rejected
/// before any cryptographic work.
pub fn verify_discord_request(
    signature_hex: &str,
    timestamp: &str,
    body: &[u8],
    public_key_hex: &str,
) -> Result<()> {
    let signature_bytes = hex::decode(signature_hex).context("Failed to decode signature hex")?;

    if signature_bytes.len() != SIGNATURE_LENGTH {
        bail!("invalid signature length");
    }

    let signature_array: &[u8; SIGNATURE_LENGTH] = signature_bytes
        .as_slice()
        .try_into()
        .context("Signature has invalid length")?;

    let public_key_bytes =
        hex::decode(public_key_hex.trim()).context("Failed to decode public key hex")?;

    let public_key_array: &[u8; 32] = public_key_bytes
        .as_slice()
        .try_into()
        .context("Public key has invalid length")?;

    let public_key =
        VerifyingKey::from_bytes(public_key_array).context("Invalid public key bytes")?;

    let signature = Signature::from_bytes(signature_array);

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    public_key
        .verify(&message, &signature)
        .context("invalid request signature")?;

    Ok(())
}
