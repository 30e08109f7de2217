/// Result of a line prompt.
///
/// `Cancelled` is its own variant so an empty submission can never be
/// mistaken for the user backing out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineInput {
    Submitted(String),
    Cancelled,
}
