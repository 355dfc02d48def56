/// Parsed form of a search-stage (ESearch) XML response
#[derive(Debug, Default)]
pub(crate) struct SearchStageResponse {
    /// Text of the first `Count` element; empty if the element is absent
    pub count: String,
    /// Child `Id` texts of the first `IdList`, in document order
    pub ids: Vec<String>,
}
