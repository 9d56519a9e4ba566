use std::sync::Arc;

use crate::embedding::Encoder;
use crate::provider::CompletionProvider;
use crate::router::ResponseRouter;

/// Shared state for every handler.
pub struct HandlerState<E, P>
where
    E: Encoder + 'static,
    P: CompletionProvider + 'static,
{
    pub router: Arc<ResponseRouter<E, P>>,
}

impl<E, P> HandlerState<E, P>
where
    E: Encoder + 'static,
    P: CompletionProvider + 'static,
{
    pub fn new(router: Arc<ResponseRouter<E, P>>) -> Self {
        Self { router }
    }

    pub fn corpus_rows(&self) -> usize {
        self.router.matcher().index().len()
    }

    pub fn encoder_is_stub(&self) -> bool {
        self.router.matcher().encoder().is_stub()
    }
}

impl<E, P> Clone for HandlerState<E, P>
where
    E: Encoder + 'static,
    P: CompletionProvider + 'static,
{
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}
