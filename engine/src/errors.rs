use crate::word::Word;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("node not found in graph: {0}")]
    NodeNotFound(Word),

    #[error("no mutually unambiguous pairs found for evaluation")]
    EmptySample,

    #[error("precision and recall are both zero, cannot compute f1")]
    DegenerateMetrics,

    #[error("missing input file: {0}")]
    MissingFile(String),

    #[error("error reading {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
