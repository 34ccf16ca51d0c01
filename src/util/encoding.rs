use anyhow::{Context, Result, anyhow};
use encoding::DecoderTrap;
use encoding::label::encoding_from_whatwg_label;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// read to end and decode to utf-8 (see [`decode_to_utf8`])
pub fn read_to_utf8<R>(input: &mut R) -> Result<String>
where
    R: std::io::Read,
{
    let mut buf: Vec<u8> = Vec::new();
    input
        .read_to_end(&mut buf)
        .context("could not read input")?;
    decode_to_utf8(&buf)
}

/// utf-8 input (with or without BOM) is taken as is, anything else goes through
/// charset detection and unknown characters are dropped.
/// ref. https://github.com/thuleqaid/rust-chardet
pub fn decode_to_utf8(input: &[u8]) -> Result<String> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    if let Ok(text) = std::str::from_utf8(input) {
        return Ok(text.to_string());
    }

    // (charset, confidence, language)
    let detected = chardet::detect(input);
    let label = chardet::charset2encoding(&detected.0);
    let coder = encoding_from_whatwg_label(label)
        // single byte fallback, never fails
        .unwrap_or(encoding::all::WINDOWS_1252);
    tracing::debug!(
        "decoding non utf-8 input as {} (detected {:?}, confidence {})",
        coder.name(),
        detected.0,
        detected.1
    );
    coder
        .decode(input, DecoderTrap::Ignore)
        .map_err(|e| anyhow!("cannot decode input as {}: {:?}", coder.name(), e))
}
