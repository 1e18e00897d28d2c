use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("{0} target is not an element")]
    NotAnElement(String),
    #[error("no mount target: neither {selector} nor <body> exists")]
    MountTargetMissing { selector: String },
    #[error("cached products under {key:?} are malformed: {message}")]
    CorruptCache { key: String, message: String },
    #[error("favorites under {key:?} are malformed: {message}")]
    CorruptFavorites { key: String, message: String },
    #[error("storage error: {0}")]
    Storage(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },
    #[error("invalid product payload: {0}")]
    Payload(String),
    #[error("config error: {0}")]
    Config(String),
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}
