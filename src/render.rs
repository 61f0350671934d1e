use crate::coord::Coord;

/// Something that can show a generation.
///
/// `cells` holds every live cell of the generation exactly once. Implementors replace whatever
/// they showed before and draw one mark per cell at its `(x, y)` position.
pub trait Render {
    fn render(&mut self, cells: &[Coord]) -> anyhow::Result<()>;
}
