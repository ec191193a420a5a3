use super::ConfigError;

/// Maximum nesting of placeholders that reference other placeholders.
pub const MAX_PLACEHOLDER_DEPTH: usize = 32;

/// Replace every `${key}` in `value` with the string returned by `lookup`.
///
/// Text outside `${...}` is copied verbatim, so templates like
/// `{baseUrl}${okta.oauth2.redirect-uri}` keep `{baseUrl}` for the consumer.
/// The replacement text is not rescanned; recursive resolution is the
/// caller's job.
pub fn resolve_placeholders<F>(value: &str, mut lookup: F) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Result<String, ConfigError>,
{
    let mut result = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let end = rest[start..]
            .find('}')
            .ok_or_else(|| ConfigError::Placeholder(format!("unclosed placeholder in '{value}'")))?;
        result.push_str(&rest[..start]);
        let reference = rest[start + 2..start + end].trim();
        result.push_str(&lookup(reference)?);
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}

/// Returns `true` if the value contains at least one `${` marker.
pub fn has_placeholder(value: &str) -> bool {
    value.contains("${")
}
