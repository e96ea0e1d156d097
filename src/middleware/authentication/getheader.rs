use tonic::metadata::MetadataMap;

pub const AUTHORIZATION: &str = "authorization";

/// Reads the single access token carried under the `authorization` key.
///
/// A `Bearer ` prefix is accepted and stripped. `Ok(None)` means no token
/// was sent at all.
pub fn get_token(metadata: &MetadataMap) -> Result<Option<String>, String> {
    let mut values = metadata.get_all(AUTHORIZATION).iter();
    let value = match values.next() {
        Some(value) => value,
        None => return Ok(None),
    };
    if values.next().is_some() {
        return Err(format!("more than one {AUTHORIZATION} value provided"));
    }

    let token = value
        .to_str()
        .map_err(|_| format!("metadata {AUTHORIZATION} can't be converted to string"))?
        .trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token.to_string()))
}
