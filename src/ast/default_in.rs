/// Creates an empty value of a type inside an arena.
///
/// This mirrors [`Default`] for AST nodes, schema definitions, and validation rules which hold
/// arena-allocated collections and can't be constructed without one.
pub trait DefaultIn<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self;
}

impl<'a, T> DefaultIn<'a> for T
where
    T: Default,
{
    fn default_in(_arena: &'a bumpalo::Bump) -> Self {
        Self::default()
    }
}
