#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("script injection refused for top-level document {url}: {reason}")]
    TopFrameDenied { url: String, reason: String },
}

/// Why a single mapping entry was not applied in one document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    #[error("no element matches the field id")]
    Unresolved,
    #[error("element went away before it could be filled")]
    Detached,
    #[error("<{tag}> is not a fillable control")]
    NotFillable { tag: String },
    #[error("empty value cannot select an option")]
    EmptyValue,
    #[error("no option matches {value:?}")]
    NoMatchingOption { value: String },
    #[error("no radio in the group matches {value:?}")]
    NoMatchingRadio { value: String },
    #[error("{value:?} is neither a yes/no answer nor the checkbox's value")]
    NotAToggle { value: String },
    #[error("control kept {actual:?} instead of the assigned value")]
    Rejected { actual: String },
}

impl FillError {
    /// Expected misses are logged at debug level; anything else at warn.
    pub fn is_expected(&self) -> bool {
        !matches!(self, FillError::Rejected { .. })
    }
}
