/// What the user picked once the search box closes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipBoxOutput {
    /// Selected item names, in the order they were picked
    pub selected: Vec<String>,
    /// The query text left in the input field
    pub query: String,
    /// Whether the user aborted instead of accepting
    pub is_abort: bool,
}
