/// Server-assigned identifier for a persisted preference record.
///
/// Opaque to the client: only its presence matters, to decide between the
/// create and update paths when saving.
pub type PreferenceId = String;
