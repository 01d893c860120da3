use std::{sync::Arc, time::SystemTime};

#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub payload: T,
    pub received_at: SystemTime,
}

impl<T> Envelope<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            received_at: SystemTime::now(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(String),
    #[error("transform error: {0}")]
    Transform(String),
    #[error("sink error: {0}")]
    Sink(String),
}

pub type Items<'a, T> = Box<dyn Iterator<Item = Result<Envelope<T>, PipelineError>> + 'a>;

/// Produces items one by one. Failing to open at all is the outer error;
/// a single bad item is an inner error that downstream stages may skip.
pub trait Source<T> {
    fn items(&mut self) -> Result<Items<'_, T>, PipelineError>;
}

pub trait Transform<I, O>: Send + Sync {
    fn apply(&self, input: Envelope<I>) -> Result<Envelope<O>, PipelineError>;
}

pub trait Sink<T> {
    type Output;

    fn run<I>(&self, input: I) -> Result<Self::Output, PipelineError>
    where
        I: Iterator<Item = Result<Envelope<T>, PipelineError>>;
}

pub struct Pipeline<S, T, K> {
    pub source: S,
    pub transforms: Vec<Arc<dyn Transform<T, T> + Send + Sync>>, // same-type transforms chain
    pub sink: K,
}

impl<T, S, K> Pipeline<S, T, K>
where
    S: Source<T>,
    K: Sink<T>,
{
    pub fn run(self) -> Result<K::Output, PipelineError> {
        let Pipeline {
            mut source,
            transforms,
            sink,
        } = self;

        let items = source.items()?;

        // Apply transforms in sequence; the first rejection short-circuits the item.
        let transformed = items.map(|item| {
            transforms
                .iter()
                .try_fold(item?, |env, t| t.apply(env))
        });

        sink.run(transformed)
    }
}
