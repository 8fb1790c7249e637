use super::{Request, Response};

/// Per-request state threaded through a handler chain
#[derive(Debug, Clone)]
pub struct Context {
    pub request: Request,
    pub response: Response,
}

impl Context {
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: Response::default(),
        }
    }
}

impl From<Request> for Context {
    fn from(request: Request) -> Self {
        Self::new(request)
    }
}
