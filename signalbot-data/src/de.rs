/// Determine the `DateTime<Utc>` from the provided milliseconds since the epoch.
pub fn datetime_utc_from_epoch_ms(epoch_ms: u64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from(
        std::time::UNIX_EPOCH + std::time::Duration::from_millis(epoch_ms),
    )
}

/// Assists deserialisation of sequences by attempting to extract & parse the next element in the
/// provided sequence.
///
/// A [`serde::de::Error`] is returned if the element does not exist, or it cannot
/// be deserialized into the `Target` type inferred.
pub fn extract_next<'de, SeqAccessor, Target>(
    sequence: &mut SeqAccessor,
    name: &'static str,
) -> Result<Target, SeqAccessor::Error>
where
    SeqAccessor: serde::de::SeqAccess<'de>,
    Target: serde::de::DeserializeOwned,
{
    sequence
        .next_element::<Target>()?
        .ok_or_else(|| serde::de::Error::missing_field(name))
}

/// Extract the next sequence element as a `String` and parse it as the desired type.
///
/// Exchanges commonly encode prices & quantities as strings to preserve precision,
/// eg/ `"0.01634790"`.
pub fn extract_next_str<'de, SeqAccessor, Target>(
    sequence: &mut SeqAccessor,
    name: &'static str,
) -> Result<Target, SeqAccessor::Error>
where
    SeqAccessor: serde::de::SeqAccess<'de>,
    Target: std::str::FromStr,
    Target::Err: std::fmt::Display,
{
    extract_next::<SeqAccessor, String>(sequence, name)?
        .parse::<Target>()
        .map_err(serde::de::Error::custom)
}
