/// Generate a unique document id payload.
///
/// Returns a 21-character URL-friendly string. The store prepends its key
/// namespace to form the full [`crate::model::DocId`].
pub fn generate_id() -> String {
    nanoid::nanoid!(21)
}
