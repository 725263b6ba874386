use crate::{ClassifiedGroups, ItemPosition};

/// Paints the three groups. Supplied by the UI layer; the core never builds visual output.
pub trait GroupRenderer {
    type Output;

    fn above(&mut self, items: &[ItemPosition]) -> Self::Output;
    fn inside(&mut self, items: &[ItemPosition]) -> Self::Output;
    fn below(&mut self, items: &[ItemPosition]) -> Self::Output;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedGroups<T> {
    pub above: T,
    pub inside: T,
    pub below: T,
}

impl ClassifiedGroups {
    /// Hands each group to `renderer`, in the order above, inside, below.
    pub fn render<R: GroupRenderer>(&self, renderer: &mut R) -> RenderedGroups<R::Output> {
        let above = renderer.above(&self.above);
        let inside = renderer.inside(&self.inside);
        let below = renderer.below(&self.below);
        RenderedGroups {
            above,
            inside,
            below,
        }
    }
}
