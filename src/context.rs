/// Options carried by a document and consulted by `Jpath::try_query`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    /// Reject expressions containing characters outside every segment grammar.
    pub strict: bool,
}

impl Context {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
